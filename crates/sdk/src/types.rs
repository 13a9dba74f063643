//! SDK response types, mirroring the wire DTOs served by `oj-api`.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct StepResultDto {
    pub input: String,
    pub output: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JobDto {
    pub id: String,
    pub flow: String,
    pub state: String,
    pub output: Vec<StepResultDto>,
}
