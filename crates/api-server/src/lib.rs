#![warn(clippy::unwrap_used)]

pub mod ads_rest;
pub mod auth_rest;
pub mod chat_rest;
pub mod extract;
pub mod rest;
pub mod server;
pub mod swagger;

pub use rest::AppState;
pub use server::{build_router, ApiServer};
pub use swagger::ApiDoc;
