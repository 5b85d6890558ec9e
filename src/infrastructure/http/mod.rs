//! HTTP - axum 宿主绑定
//!
//! 薄绑定层：把编排器的调用约定（synthesize / stop / locale 查询）
//! 和控制信号面暴露给外部调用方。

pub mod dto;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod state;

pub use server::{HttpServer, ServerConfig};
pub use state::AppState;
