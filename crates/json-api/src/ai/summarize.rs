//! Summarize Product Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{extensions::*, state::State};

/// Summarize Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SummarizeRequest {
    pub name: String,

    #[serde(default)]
    pub description: String,
}

/// Summarize Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SummarizeResponse {
    /// Listing blurb, or the reason none could be produced
    pub summary: String,
}

/// Summarize Product Handler
///
/// Asks the configured model for a two-sentence listing blurb. Provider
/// failures are reported in `summary` with a 200 status.
#[endpoint(
    tags("ai"),
    summary = "Summarize Product",
    responses(
        (status_code = StatusCode::OK, description = "Summary, or the reason none was produced"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<SummarizeRequest>,
    depot: &mut Depot,
) -> Result<Json<SummarizeResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let summary = state
        .app
        .summarizer
        .summarize(request.name, request.description)
        .await;

    Ok(Json(SummarizeResponse { summary }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use storefront_app::ai::MockSummarizer;

    use crate::test_helpers::summarizer_service;

    use super::*;

    fn make_service(summarizer: MockSummarizer) -> Service {
        summarizer_service(summarizer, Router::with_path("ai/summarize").post(handler))
    }

    #[tokio::test]
    async fn test_summarize_returns_summary() -> TestResult {
        let mut summarizer = MockSummarizer::new();

        summarizer
            .expect_summarize()
            .once()
            .withf(|name, description| name == "Phone" && description == "Fast and light")
            .return_once(|_, _| "A fast, light phone.".to_string());

        let body: SummarizeResponse = TestClient::post("http://example.com/ai/summarize")
            .json(&json!({ "name": "Phone", "description": "Fast and light" }))
            .send(&make_service(summarizer))
            .await
            .take_json()
            .await?;

        assert_eq!(body.summary, "A fast, light phone.");

        Ok(())
    }

    #[tokio::test]
    async fn test_provider_failure_is_still_200() -> TestResult {
        let mut summarizer = MockSummarizer::new();

        summarizer
            .expect_summarize()
            .once()
            .return_once(|_, _| "API key not configured".to_string());

        let mut res = TestClient::post("http://example.com/ai/summarize")
            .json(&json!({ "name": "Phone" }))
            .send(&make_service(summarizer))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: SummarizeResponse = res.take_json().await?;

        assert_eq!(body.summary, "API key not configured");

        Ok(())
    }
}
