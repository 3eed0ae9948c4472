mod client;
mod error;

pub use client::{EmojisResponse, MisskeyClient};
pub use error::{ApiError, ApiResult};
