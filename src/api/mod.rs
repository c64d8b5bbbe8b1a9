//! API 路由模块

mod docs;
mod health;

pub use docs::docs_routes;
pub use health::health_routes;

use axum::{http::HeaderValue, Router};
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// 创建所有 API 路由
pub fn create_api_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(health_routes())
        .merge(docs_routes())
        .with_state(state)
}

/// 创建完整应用：路由 + CORS + 请求追踪
pub fn create_app(state: Arc<AppState>) -> AppResult<Router> {
    let cors = cors_layer(&state.config.allowed_origins)?;
    Ok(create_api_routes(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http()))
}

/// 根据配置的来源列表构建 CORS 层
///
/// 列表中包含 `*` 时允许所有来源（此时不能携带凭据）。
pub fn cors_layer(origins: &[String]) -> AppResult<CorsLayer> {
    if origins.iter().any(|o| o == "*") {
        return Ok(CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any));
    }

    let origins = origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .map_err(|e| AppError::Config(format!("无效的 CORS 来源 {}: {}", origin, e)))
        })
        .collect::<AppResult<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true))
}
