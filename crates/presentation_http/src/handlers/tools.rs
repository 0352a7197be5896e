//! Agent tool endpoints

use application::{ToolCall, ToolDescriptor, ToolOutcome};
use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use validator::Validate;

use crate::{middleware::ValidatedJson, state::AppState};

/// Tool listing
#[derive(Debug, Serialize)]
pub struct ToolListResponse {
    pub tools: Vec<ToolDescriptor>,
}

/// Legacy text invocation body
#[derive(Debug, Deserialize, Validate)]
pub struct TextInvocation {
    /// Comma-separated tool input, e.g. `"Delhi,Jaipur"`
    #[validate(length(max = 1000, message = "must be at most 1000 characters"))]
    pub input: String,
}

/// List the tools the agent can call
pub async fn list_tools(State(state): State<AppState>) -> Json<ToolListResponse> {
    Json(ToolListResponse {
        tools: state.tools.descriptors(),
    })
}

/// Invoke a tool from a structured JSON call
///
/// Tool failures are reported in the outcome, never as an HTTP error.
#[instrument(skip(state, call), fields(tool = %call.tool))]
pub async fn invoke_tool(
    State(state): State<AppState>,
    Json(call): Json<ToolCall>,
) -> Json<ToolOutcome> {
    Json(state.tools.invoke(call).await)
}

/// Invoke a tool with comma-separated text input
#[instrument(skip(state, body))]
pub async fn invoke_tool_text(
    State(state): State<AppState>,
    Path(tool): Path<String>,
    ValidatedJson(body): ValidatedJson<TextInvocation>,
) -> Json<ToolOutcome> {
    Json(state.tools.invoke_text(&tool, &body.input).await)
}
