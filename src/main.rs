//! AI Code Documentation Generator - Rust Backend
//!
//! 使用 axum 框架构建的后端服务，提供 `/generate-docs` 文档生成接口。

use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use docgen_rs::api::create_app;
use docgen_rs::config::get_config;
use docgen_rs::state::create_shared_state;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env 需在读取配置前加载
    dotenvy::dotenv().ok();

    // 初始化日志
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "docgen_rs=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting AI Code Documentation Generator backend...");

    let config = get_config();
    if config.api_key.is_empty() {
        warn!("ANTHROPIC_API_KEY is not set; /generate-docs will fail until it is configured");
    }
    info!("Using model: {}", config.model);

    let addr = config.socket_addr()?;
    let app = create_app(create_shared_state(config))?;

    info!("Server listening on: {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
