//! # Módulo Web — API de Sentimento e Chat
//!
//! Camada HTTP construída com **Axum**. Quase todas as rotas falam JSON;
//! a raiz serve uma página curta em **Maud** listando os endpoints.
//!
//! ## Rotas
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  GET  /              → página inicial (HTML)            │
//! │  GET  /status        → JSON: pronto? quantas intenções  │
//! │  POST /analyze       → JSON {text} → AnalysisResult     │
//! │  POST /analyze_file  → multipart "file" → + meta.chars  │
//! │  POST /analyze_csv   → multipart "file" → JSON ou CSV   │
//! │  GET  /history       → JSON {items} (por usuário)       │
//! │  POST /chat          → JSON {message, tone} → ChatTurn  │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! O usuário é identificado pelo header `x-user-id` (padrão
//! `anonymous`). CORS é permissivo para o frontend servido em outra porta.
//!
//! ## Submódulos
//!
//! | Módulo | Responsabilidade |
//! |--------|------------------|
//! | [`state`] | Estado compartilhado (`AppState`) |
//! | [`handlers`] | Handlers Axum para cada rota |
//! | [`templates`] | Página inicial em Maud |

pub mod handlers;
pub mod state;
pub mod templates;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use state::AppState;

/// Cria o router Axum com todas as rotas da aplicação.
///
/// As rotas de upload recebem o limite de corpo configurado em
/// `--max-upload-mb`; as demais usam o padrão do Axum.
pub fn create_router(state: AppState) -> Router {
    let upload_limit = DefaultBodyLimit::max(state.config.max_upload_bytes());

    Router::new()
        // ── Página ────────────────────────────────────────────
        .route("/", get(handlers::index))
        .route("/status", get(handlers::status))
        // ── Análise ──────────────────────────────────────────
        .route("/analyze", post(handlers::analyze))
        .route(
            "/analyze_file",
            post(handlers::analyze_file).layer(upload_limit.clone()),
        )
        .route(
            "/analyze_csv",
            post(handlers::analyze_csv).layer(upload_limit),
        )
        .route("/history", get(handlers::history))
        // ── Chat ─────────────────────────────────────────────
        .route("/chat", post(handlers::chat))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
