pub mod client;
pub mod error;
pub mod schema;
pub mod types;

pub use client::{SeamapClient, SeamapClientParams};
pub use error::ApiError;
