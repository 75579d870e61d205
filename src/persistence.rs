//! # Persistência — Histórico de Análises em Disco
//!
//! O [`HistoryStore`] guarda as análises de cada usuário como JSON
//! "pretty-printed" em `<data_dir>/history.json`.
//!
//! ## Quando o Histórico é Salvo?
//!
//! - Após cada análise de texto, arquivo ou chat
//! - Após cada lote CSV (uma escrita para o lote inteiro)
//!
//! ## Limite por Usuário
//!
//! Cada usuário mantém no máximo `cap` entradas; as mais antigas saem
//! primeiro.
//!
//! ## Concorrência
//!
//! ```text
//! record_many()
//!   ├── write_lock (Mutex)   → escritas em disco na ordem dos registros
//!   │    ├── entries.write() → altera e serializa, depois solta
//!   │    └── fs::write       → leitores de /history não esperam o disco
//! ```
//!
//! ## ⚠️ Atomicidade
//!
//! A escrita **não é atômica**: crash durante escrita pode corromper
//! o arquivo. Na carga, um arquivo corrompido vira histórico vazio.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::sentiment::{AnalysisResult, Label};

/// Nome do arquivo de histórico dentro do diretório de dados.
const HISTORY_FILE: &str = "history.json";

/// Tamanho máximo do trecho de texto guardado por entrada (em caracteres).
pub const SNIPPET_CHARS: usize = 200;

/// Origem de uma análise.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Text,
    File,
    Csv,
    Chat,
}

/// Uma análise registrada no histórico.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: Uuid,
    pub user: String,
    pub created_at: DateTime<Utc>,
    pub source: Source,
    pub label: Label,
    pub pos: f64,
    pub neu: f64,
    pub neg: f64,
    pub compound: f64,
    pub text_snippet: String,
}

impl HistoryEntry {
    pub fn new(user: &str, source: Source, text: &str, result: &AnalysisResult) -> Self {
        Self {
            id: Uuid::new_v4(),
            user: user.to_string(),
            created_at: Utc::now(),
            source,
            label: result.label,
            pos: result.scores.pos,
            neu: result.scores.neu,
            neg: result.scores.neg,
            compound: result.scores.compound,
            text_snippet: snippet(text),
        }
    }
}

fn snippet(text: &str) -> String {
    text.trim().chars().take(SNIPPET_CHARS).collect()
}

/// Histórico de análises por usuário, com persistência em JSON.
pub struct HistoryStore {
    path: PathBuf,
    cap: usize,
    entries: RwLock<Vec<HistoryEntry>>,
    write_lock: Mutex<()>,
}

impl HistoryStore {
    /// Abre o histórico em `data_dir`, ou começa vazio.
    ///
    /// Arquivo ausente é o caso normal da primeira execução; arquivo
    /// ilegível é registrado com `warn!` e ignorado.
    pub fn open(data_dir: &Path, cap: usize) -> Self {
        let path = data_dir.join(HISTORY_FILE);
        let entries = match load_entries(&path) {
            Ok(entries) => {
                tracing::info!(entries = entries.len(), path = %path.display(), "Histórico carregado");
                entries
            }
            Err(e) => {
                tracing::warn!(error = %e, "Falha ao carregar histórico, iniciando vazio");
                Vec::new()
            }
        };
        Self {
            path,
            cap: cap.max(1),
            entries: RwLock::new(entries),
            write_lock: Mutex::new(()),
        }
    }

    /// Registra uma entrada e salva em disco.
    pub fn record(&self, entry: HistoryEntry) -> Result<()> {
        self.record_many(vec![entry])
    }

    /// Registra várias entradas com uma única escrita em disco.
    pub fn record_many(&self, batch: Vec<HistoryEntry>) -> Result<()> {
        if batch.is_empty() {
            return Ok(());
        }
        let _writing = self.write_lock.lock();
        let json = {
            let mut entries = self.entries.write();
            let mut users: Vec<String> = batch.iter().map(|e| e.user.clone()).collect();
            users.sort();
            users.dedup();
            entries.extend(batch);
            for user in &users {
                enforce_cap(&mut entries, user, self.cap);
            }
            serde_json::to_string_pretty(&*entries).context("Falha ao serializar histórico")?
        };
        write_json(&self.path, &json)
    }

    /// Entradas mais recentes do usuário, da mais nova para a mais antiga.
    pub fn recent(&self, user: &str, limit: usize) -> Vec<HistoryEntry> {
        self.entries
            .read()
            .iter()
            .rev()
            .filter(|e| e.user == user)
            .take(limit)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

/// Remove as entradas mais antigas do usuário acima do limite.
fn enforce_cap(entries: &mut Vec<HistoryEntry>, user: &str, cap: usize) {
    let count = entries.iter().filter(|e| e.user == user).count();
    let mut excess = count.saturating_sub(cap);
    if excess == 0 {
        return;
    }
    entries.retain(|e| {
        if excess > 0 && e.user == user {
            excess -= 1;
            false
        } else {
            true
        }
    });
}

fn load_entries(path: &Path) -> Result<Vec<HistoryEntry>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Falha ao ler {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("Falha ao desserializar {}", path.display()))
}

fn write_json(path: &Path, json: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).context("Falha ao criar diretório de dados")?;
    }
    std::fs::write(path, json).with_context(|| format!("Falha ao escrever {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentiment::PolarityScores;

    fn result(compound: f64) -> AnalysisResult {
        AnalysisResult::from_scores(PolarityScores {
            pos: 0.5,
            neu: 0.5,
            neg: 0.0,
            compound,
        })
    }

    #[test]
    fn records_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let store = HistoryStore::open(dir.path(), 10);
        store
            .record(HistoryEntry::new("ana", Source::Text, "what a lovely day", &result(0.6)))
            .unwrap();

        let reopened = HistoryStore::open(dir.path(), 10);
        let items = reopened.recent("ana", 10);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].label, Label::Positive);
        assert_eq!(items[0].source, Source::Text);
        assert_eq!(items[0].text_snippet, "what a lovely day");
    }

    #[test]
    fn recent_is_newest_first_and_per_user() {
        let dir = tempfile::tempdir().unwrap();
        let store = HistoryStore::open(dir.path(), 10);
        for text in ["one", "two", "three"] {
            store
                .record(HistoryEntry::new("ana", Source::Chat, text, &result(0.0)))
                .unwrap();
        }
        store
            .record(HistoryEntry::new("bo", Source::Chat, "other", &result(0.0)))
            .unwrap();

        let items = store.recent("ana", 2);
        let texts: Vec<_> = items.iter().map(|e| e.text_snippet.as_str()).collect();
        assert_eq!(texts, ["three", "two"]);
        assert_eq!(store.recent("bo", 10).len(), 1);
        assert!(store.recent("nobody", 10).is_empty());
    }

    #[test]
    fn cap_drops_oldest_entries_of_that_user_only() {
        let dir = tempfile::tempdir().unwrap();
        let store = HistoryStore::open(dir.path(), 2);
        store
            .record(HistoryEntry::new("bo", Source::Text, "keep", &result(0.0)))
            .unwrap();
        let batch = ["a", "b", "c"]
            .iter()
            .map(|t| HistoryEntry::new("ana", Source::Csv, t, &result(0.0)))
            .collect();
        store.record_many(batch).unwrap();

        let texts: Vec<_> = store
            .recent("ana", 10)
            .into_iter()
            .map(|e| e.text_snippet)
            .collect();
        assert_eq!(texts, ["c", "b"]);
        assert_eq!(store.recent("bo", 10).len(), 1);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn snippet_is_truncated() {
        let long = "x".repeat(SNIPPET_CHARS + 50);
        let entry = HistoryEntry::new("ana", Source::File, &long, &result(0.0));
        assert_eq!(entry.text_snippet.chars().count(), SNIPPET_CHARS);
    }

    #[test]
    fn corrupt_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(HISTORY_FILE), "{not json").unwrap();
        let store = HistoryStore::open(dir.path(), 10);
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn concurrent_writers_leave_file_matching_memory() {
        let dir = tempfile::tempdir().unwrap();
        let store = std::sync::Arc::new(HistoryStore::open(dir.path(), 100));

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = store.clone();
                std::thread::spawn(move || {
                    for j in 0..5 {
                        let text = format!("msg {i}-{j}");
                        store
                            .record(HistoryEntry::new("ana", Source::Chat, &text, &result(0.0)))
                            .unwrap();
                        assert!(!store.recent("ana", 1).is_empty());
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(store.len(), 40);
        let reopened = HistoryStore::open(dir.path(), 100);
        assert_eq!(reopened.recent("ana", 100), store.recent("ana", 100));
    }
}
