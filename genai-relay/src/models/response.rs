use serde::{Deserialize, Serialize};

/// Successful relay response: the first candidate's text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub output: String,
}
