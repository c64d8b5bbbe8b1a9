//! 文档生成端点

use axum::{extract::State, routing::post, Json, Router};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{GenerateDocsRequest, GenerateDocsResponse};
use crate::state::AppState;

/// 创建文档生成路由
pub fn docs_routes() -> Router<Arc<AppState>> {
    Router::new().route("/generate-docs", post(generate_docs))
}

/// 生成请求 ID（用于日志关联）
fn generate_request_id() -> String {
    Uuid::new_v4().simple().to_string()[..8].to_string()
}

/// 生成文档
async fn generate_docs(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GenerateDocsRequest>,
) -> AppResult<Json<GenerateDocsResponse>> {
    let request_id = generate_request_id();
    let start = Instant::now();
    info!(
        "Received documentation request: request_id={}, language={}, doc_type={}, code_len={}",
        request_id,
        req.language,
        req.doc_type,
        req.code.len()
    );

    let messages = state.prompts.build_messages(&req.code, &req.language, &req.doc_type);

    let completion = state.llm.complete(&messages).await.map_err(|e| {
        error!("Documentation request failed: request_id={}, error={}", request_id, e);
        AppError::from(e)
    })?;

    info!(
        "Documentation generated: request_id={}, length={}, finish_reason={:?}, elapsed_ms={}",
        request_id,
        completion.content.len(),
        completion.finish_reason,
        start.elapsed().as_millis()
    );

    Ok(Json(GenerateDocsResponse {
        documentation: completion.content,
    }))
}
