//! soko REST client implementation

use reqwest::{Client, StatusCode};

use crate::error::{Result, SdkError};
use crate::types::JobDto;

/// A thin client over the daemon's `/api/*` routes.
///
/// # Example
///
/// ```no_run
/// use soko_sdk::SokoClient;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = SokoClient::new("http://127.0.0.1:8000");
/// let job = client.run_flow("project.build").await?;
/// # Ok(())
/// # }
/// ```
pub struct SokoClient {
    base_url: String,
    http: Client,
}

impl SokoClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: Client::new(),
        }
    }

    pub async fn ping(&self) -> Result<()> {
        let url = format!("{}/api/ping", self.base_url);
        let response = self.http.get(&url).send().await?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(SdkError::UnexpectedStatus(response.status()))
        }
    }

    pub async fn run_flow(&self, flow_id: &str) -> Result<JobDto> {
        let url = format!("{}/api/flows/{}/run", self.base_url, flow_id);
        let response = self.http.post(&url).send().await?;
        match response.status() {
            StatusCode::OK => Ok(response.json::<JobDto>().await?),
            StatusCode::NOT_FOUND => Err(SdkError::FlowNotFound(flow_id.to_string())),
            status => Err(SdkError::UnexpectedStatus(status)),
        }
    }

    pub async fn get_job(&self, job_id: &str) -> Result<JobDto> {
        let url = format!("{}/api/jobs/{}", self.base_url, job_id);
        let response = self.http.get(&url).send().await?;
        match response.status() {
            StatusCode::OK => Ok(response.json::<JobDto>().await?),
            StatusCode::NOT_FOUND => Err(SdkError::JobNotFound(job_id.to_string())),
            status => Err(SdkError::UnexpectedStatus(status)),
        }
    }
}
