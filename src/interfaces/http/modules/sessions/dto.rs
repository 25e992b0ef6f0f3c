//! Session DTOs

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::catalog::CatalogView;

/// A newly opened session with its first view
#[derive(Debug, Serialize, ToSchema)]
pub struct SessionResponse {
    pub session_id: String,
    pub view: CatalogView,
}

/// A delegated DOM event: the target's `data-*` attributes and current value
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct DelegatedEventRequest {
    /// `data-*` attributes without the `data-` prefix, e.g. `{"action": "go-to-page", "page": "2"}`
    pub dataset: BTreeMap<String, String>,
    /// Value of the target control, used by the search box
    #[serde(default)]
    #[validate(length(max = 256, message = "value is at most 256 characters"))]
    pub value: Option<String>,
}
