use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_INSTRUCTION;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RerankRequest {
    pub vacancy_title: String,
    pub job_description: String,
    #[serde(default = "default_instruction")]
    pub instruction: String,
}

fn default_instruction() -> String {
    DEFAULT_INSTRUCTION.to_string()
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RerankResponse {
    pub probability: f64,
    pub score: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct HealthResponse {
    pub status: String,
    pub model_loaded: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RootResponse {
    pub message: String,
    pub version: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ErrorResponse {
    pub detail: String,
}
