//! Shared HTTP building blocks

pub mod api_response;
pub mod validated_json;

pub use api_response::{domain_error, status_for, ApiError, ApiResponse, ApiResult, EmptyData};
pub use validated_json::ValidatedJson;
