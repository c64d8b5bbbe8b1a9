//! AI Code Documentation Generator
//!
//! 两部分组成：
//!
//! - 客户端核心（[`session`]、[`client`]）：配置存储与单请求生命周期管理，
//!   通过 `DocService` 与文档服务通信，不依赖任何展示技术。
//! - 服务端（[`api`]、[`services`]、[`llm`]）：`/generate-docs` 接口，
//!   按文档类型构建 prompt 并调用 LLM。
//!
//! # 使用示例
//!
//! ```ignore
//! use docgen_rs::session::Session;
//!
//! let session = Session::connect("http://localhost:8000")?;
//! session.config().set_source_code("def add(a, b): return a + b");
//! session.config().set_doc_type("readme")?;
//!
//! if session.can_trigger() {
//!     session.generate().await?;
//! }
//! println!("{:?}", session.state());
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod llm;
pub mod models;
pub mod services;
pub mod session;
pub mod state;

#[cfg(test)]
mod test_support;
