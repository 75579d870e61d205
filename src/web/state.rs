//! # Estado da Aplicação Web
//!
//! Tudo que os handlers compartilham, montado uma única vez em `main`
//! e injetado via `State<AppState>`.
//!
//! ```text
//! AppState
//!  ├── engine  → ChatEngine (pontuador + regras + respostas), imutável
//!  ├── history → HistoryStore (RwLock interno)
//!  └── config  → limites de lote/upload
//! ```

use std::sync::Arc;

use crate::chat::ChatEngine;
use crate::config::Config;
use crate::persistence::HistoryStore;
use crate::sentiment::SentimentScorer;

/// Estado compartilhado da aplicação Axum.
#[derive(Clone)]
pub struct AppState {
    /// Motor do chat; também expõe o pontuador usado pelas análises.
    pub engine: Arc<ChatEngine>,
    /// Histórico de análises por usuário.
    pub history: Arc<HistoryStore>,
    /// Configuração de execução.
    pub config: Arc<Config>,
}

impl AppState {
    pub fn scorer(&self) -> &dyn SentimentScorer {
        self.engine.scorer()
    }
}
