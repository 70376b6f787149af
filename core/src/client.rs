use async_trait::async_trait;
use strive_common::{Problem, Recommendation};

use crate::config::Config;
use crate::error::Result;
use crate::protocol::{unwrap_fenced, StreamActionRequest};

/// A source of recommendations. `Ok(None)` means the backend answered but the
/// payload was unusable; `Err` means the call itself failed.
#[async_trait]
pub trait RecommendationSource: Send + Sync {
    async fn fetch(&self, problem: &Problem) -> Result<Option<Recommendation>>;
}

/// Talks to the real service over HTTP. One POST per submission, no retries,
/// no timeout beyond what the network stack imposes.
pub struct HttpRecommendationSource {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpRecommendationSource {
    pub fn new(config: &Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: format!(
                "{}/api/streamAction",
                config.service_url.trim_end_matches('/')
            ),
        }
    }
}

#[async_trait]
impl RecommendationSource for HttpRecommendationSource {
    async fn fetch(&self, problem: &Problem) -> Result<Option<Recommendation>> {
        let body = StreamActionRequest::new(problem);
        let res = self.client.post(&self.endpoint).json(&body).send().await?;
        tracing::debug!(status = %res.status(), "streamAction response");
        // A body that is not JSON at all is a hard failure, unlike a bad
        // nested payload below.
        let value: serde_json::Value = res.json().await?;
        Ok(parse_response(&value))
    }
}

/// Dig out `result.operation.result.response`, strip the fence and parse the
/// embedded JSON. Anything unexpected is logged and mapped to `None` so the
/// caller renders its unusable-response state instead of crashing.
pub fn parse_response(value: &serde_json::Value) -> Option<Recommendation> {
    let raw = match value
        .pointer("/result/operation/result/response")
        .and_then(|v| v.as_str())
    {
        Some(raw) => raw,
        None => {
            tracing::error!("streamAction result carries no response string");
            return None;
        }
    };
    let inner = match unwrap_fenced(raw) {
        Some(inner) => inner,
        None => {
            tracing::error!(len = raw.len(), "response string too short to unwrap");
            return None;
        }
    };
    match serde_json::from_str::<Recommendation>(inner) {
        Ok(recommendation) => Some(recommendation),
        Err(err) => {
            tracing::error!("recommendation payload did not parse: {err}");
            None
        }
    }
}

/// Canned source for tests and offline runs.
pub struct StubSource;

#[async_trait]
impl RecommendationSource for StubSource {
    async fn fetch(&self, problem: &Problem) -> Result<Option<Recommendation>> {
        Ok(Some(Recommendation {
            symptom: format!("Something a {} often runs into.", problem.role),
            measure: "Block out focus time and review it weekly.".to_string(),
            follow_up: "Check in after a week and adjust.".to_string(),
            identified_symptoms: vec![problem.struggle.clone()],
        }))
    }
}
