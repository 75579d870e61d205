#![allow(dead_code)]
//! # Sentiment Chat
//!
//! **Ponto de entrada principal** do serviço de análise de sentimento.
//!
//! Este arquivo monta os componentes do sistema e inicia o servidor web.
//! Tudo é construído antes do bind: se as tabelas de respostas do chat
//! estiverem incompletas, o processo termina com erro em vez de aceitar
//! conexões.
//!
//! ## Fluxo de Inicialização
//!
//! ```text
//! main()
//!   ├── Configura tracing/logging (RUST_LOG)
//!   ├── Lê Config (flags + SENTIMENT_*)
//!   ├── Cria LexiconScorer
//!   ├── Cria ChatEngine (valida regras e tabelas)
//!   ├── Carrega histórico do disco (ou cria vazio)
//!   ├── Monta AppState e Router
//!   └── Inicia servidor TCP
//! ```
//!
//! ## Exemplo de Uso
//!
//! ```bash
//! # Executar com logs padrão (info)
//! cargo run
//!
//! # Logs detalhados e outra porta
//! RUST_LOG=debug cargo run -- --bind 127.0.0.1:8080
//! ```

/// Módulo `batch` — análise de lotes CSV.
mod batch;

/// Módulo `chat` — intenções, respostas e tom do chat.
mod chat;

/// Módulo `config` — parâmetros de execução (clap).
mod config;

/// Módulo `error` — erros HTTP em JSON.
mod error;

/// Módulo `persistence` — histórico de análises em JSON.
mod persistence;

/// Módulo `sentiment` — pontuação de polaridade e rótulos.
mod sentiment;

/// Módulo `web` — servidor axum, handlers e página inicial.
mod web;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::chat::ChatEngine;
use crate::config::Config;
use crate::persistence::HistoryStore;
use crate::sentiment::lexicon::LexiconScorer;
use crate::web::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Exemplo: RUST_LOG=debug cargo run
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::parse();
    tracing::info!(bind = %config.bind, data_dir = %config.data_dir.display(), "Sentiment Chat — Starting...");

    let scorer = LexiconScorer::new().context("Falha ao compilar o tokenizador do léxico")?;
    let engine = ChatEngine::new(Arc::new(scorer)).context("Tabelas do chat incompletas")?;

    let history = HistoryStore::open(&config.data_dir, config.history_cap);
    tracing::info!(entries = history.len(), cap = config.history_cap, "Histórico pronto");

    let listener = tokio::net::TcpListener::bind(&config.bind)
        .await
        .with_context(|| format!("Falha ao fazer bind em {}", config.bind))?;

    let state = AppState {
        engine: Arc::new(engine),
        history: Arc::new(history),
        config: Arc::new(config),
    };
    let app = web::create_router(state);

    tracing::info!(addr = %listener.local_addr()?, "🚀 Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
