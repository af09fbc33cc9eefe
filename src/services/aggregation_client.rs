// src/services/aggregation_client.rs
use serde::{Deserialize, Serialize};

use crate::error::AppError;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRequest {
    pub title: String,
    pub current_price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<f64>,
    pub category: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreResponse {
    pub score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealSubmission {
    pub title: String,
    pub url: String,
    pub current_price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<f64>,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submission_id: Option<String>,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issues: Option<Vec<String>>,
}

/// Client for the deal aggregation backend. No retries.
#[derive(Debug, Clone)]
pub struct AggregationClient {
    base_url: String,
    http: reqwest::Client,
}

impl AggregationClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    pub async fn score(&self, request: &ScoreRequest) -> Result<ScoreResponse, AppError> {
        let url = format!("{}/api/aggregation/score", self.base_url);
        let resp = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await?
            .error_for_status()?;
        Ok(resp.json().await?)
    }

    pub async fn submit(&self, submission: &DealSubmission) -> Result<SubmitResponse, AppError> {
        let url = format!("{}/api/aggregation/submit", self.base_url);
        let resp = self
            .http
            .post(&url)
            .json(submission)
            .send()
            .await?
            .error_for_status()?;
        Ok(resp.json().await?)
    }

    /// Like [`submit`](Self::submit) but failures come back as an unsuccessful
    /// response with a generic issue list.
    pub async fn submit_or_report(&self, submission: &DealSubmission) -> SubmitResponse {
        match self.submit(submission).await {
            Ok(resp) => resp,
            Err(err) => {
                tracing::warn!(%err, "deal submission failed");
                SubmitResponse {
                    success: false,
                    submission_id: None,
                    message: "We couldn't submit your deal. Please try again later.".to_string(),
                    preview_score: None,
                    issues: Some(vec!["Submission service unavailable".to_string()]),
                }
            }
        }
    }
}
