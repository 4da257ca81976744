// POST /api/analyze — fetch and analyze a video's comments.
//
// Accepts `video_url` as a form field or in a JSON body.
// Returns 400 for a missing or invalid URL and when no comments could be
// fetched, 500 when the pipeline cannot produce a result, and otherwise the
// full analysis plus a `visualization_data` object with the three charts.

use axum::extract::{FromRequest, Request, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Form, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::output::report::AnalysisResult;
use crate::pipeline::video::VideoError;
use crate::web::{api_error, AppState};

#[derive(Debug, Default, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub video_url: String,
}

#[derive(Serialize)]
struct AnalyzeResponse<'a> {
    #[serde(flatten)]
    result: &'a AnalysisResult,
    visualization_data: VisualizationData<'a>,
}

#[derive(Serialize)]
struct VisualizationData<'a> {
    sentiment_chart: &'a Value,
    topics_chart: &'a Value,
    emotion_chart: &'a Value,
}

/// POST /api/analyze — run the analysis for `video_url`.
pub async fn analyze(State(state): State<AppState>, request: Request) -> Response {
    let video_url = match read_video_url(request, &state).await {
        Some(url) if !url.trim().is_empty() => url.trim().to_string(),
        _ => return api_error(StatusCode::BAD_REQUEST, "No YouTube URL provided."),
    };

    match state.video.analyze_url(&video_url).await {
        Ok(result) => Json(AnalyzeResponse {
            result: &result,
            visualization_data: VisualizationData {
                sentiment_chart: &result.sentiment_chart,
                topics_chart: &result.topics_chart,
                emotion_chart: &result.emotion_chart,
            },
        })
        .into_response(),
        Err(e @ (VideoError::InvalidUrl | VideoError::NoComments)) => {
            api_error(StatusCode::BAD_REQUEST, &e.to_string())
        }
        Err(VideoError::Fetch(e)) => {
            tracing::error!(error = %e, %video_url, "Comment fetch failed");
            api_error(StatusCode::BAD_REQUEST, &VideoError::NoComments.to_string())
        }
        Err(VideoError::Pipeline(e)) => {
            tracing::error!(error = %e, %video_url, "Analysis failed");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to analyze comments.")
        }
    }
}

/// `video_url` from a JSON body or a urlencoded form; `None` if the body
/// cannot be read as either.
async fn read_video_url(request: Request, state: &AppState) -> Option<String> {
    let is_json = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/json"));

    if is_json {
        Json::<AnalyzeRequest>::from_request(request, state)
            .await
            .ok()
            .map(|Json(body)| body.video_url)
    } else {
        Form::<AnalyzeRequest>::from_request(request, state)
            .await
            .ok()
            .map(|Form(body)| body.video_url)
    }
}
