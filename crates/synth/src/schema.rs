use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Body of `POST /messages/create_component`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentRequest {
    pub message: String,
}

/// The structured reply the model is asked to produce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LlmComponentResponse {
    pub component_name: String,
    pub summary: String,
    pub html: String,
}
