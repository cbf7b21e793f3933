use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct SearchPapersParams {
    pub term: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchPapersResponse {
    pub titles: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
