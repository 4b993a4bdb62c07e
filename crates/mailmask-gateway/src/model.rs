use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct AssignRequest {
    pub url: String,
    #[serde(default)]
    pub strategy: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AssignResponse {
    pub message: &'static str,
    pub address: String,
}

#[derive(Debug, Deserialize)]
pub struct UnassignRequest {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub strategy: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UnassignResponse {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct SweepResponse {
    pub message: &'static str,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}
