// Wire shape of `soko.yml`, deserialized directly from YAML.

use std::collections::HashMap;

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Document {
    pub name: String,
    #[serde(default)]
    pub flows: HashMap<String, FlowDoc>,
}

#[derive(Debug, Deserialize)]
pub struct FlowDoc {
    #[serde(default)]
    pub steps: Vec<StepDoc>,
    pub schedule: Option<ScheduleDoc>,
}

#[derive(Debug, Deserialize)]
pub struct StepDoc {
    #[serde(default)]
    pub cmd: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ScheduleDoc {
    pub minute: Option<String>,
    pub hour: Option<String>,
    pub day: Option<String>,
}
