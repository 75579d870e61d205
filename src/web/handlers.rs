//! # Handlers HTTP — Os Endpoints da Aplicação
//!
//! Cada função pública neste módulo é um handler Axum, mapeado a uma
//! rota em [`super::create_router()`].
//!
//! ## Padrão de Resposta
//!
//! | Handler | Método | Retorno |
//! |---------|--------|---------|
//! | `index` | GET | HTML |
//! | `status` | GET | JSON |
//! | `analyze` | POST | JSON `AnalysisResult` |
//! | `analyze_file` | POST | JSON `AnalysisResult` + `meta` |
//! | `analyze_csv` | POST | JSON (prévia) ou `text/csv` |
//! | `history` | GET | JSON `{ items }` |
//! | `chat` | POST | JSON `ChatTurn` |
//!
//! ## Histórico
//!
//! As análises são gravadas no [`HistoryStore`](crate::persistence::HistoryStore)
//! depois de calculadas. Falha de gravação é registrada em log e **não**
//! altera a resposta ao usuário.

use axum::body::Bytes;
use axum::extract::{Multipart, Query, State};
use axum::http::{header, HeaderMap};
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use super::state::AppState;
use super::templates;
use crate::batch::{self, BatchRow};
use crate::chat::intent::IntentTag;
use crate::chat::ChatTurn;
use crate::error::{ApiError, ApiResult};
use crate::persistence::{HistoryEntry, Source};
use crate::sentiment::{analyze_text, AnalysisResult};

/// Header que identifica o usuário dono do histórico.
pub const USER_HEADER: &str = "x-user-id";

/// Usuário assumido quando o header está ausente ou vazio.
pub const ANONYMOUS_USER: &str = "anonymous";

/// Limite padrão de `/history`.
const DEFAULT_HISTORY_LIMIT: usize = 10;

/// Limite máximo aceito em `/history`.
const MAX_HISTORY_LIMIT: usize = 100;

/// Resposta do endpoint `/status`.
#[derive(Serialize)]
pub struct StatusResponse {
    pub ready: bool,
    /// Número de intenções conhecidas pelo chat.
    pub intents: usize,
}

/// Corpo de `/analyze`. Campos ausentes valem vazio.
#[derive(Debug, Default, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub text: String,
}

/// Corpo de `/chat`.
#[derive(Debug, Default, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub tone: Option<String>,
}

/// Metadados do arquivo analisado.
#[derive(Debug, Serialize)]
pub struct FileMeta {
    /// Número de caracteres do texto decodificado.
    pub chars: usize,
}

/// Resposta de `/analyze_file`.
#[derive(Debug, Serialize)]
pub struct FileAnalysis {
    #[serde(flatten)]
    pub result: AnalysisResult,
    pub meta: FileMeta,
}

#[derive(Debug, Default, Deserialize)]
pub struct CsvQuery {
    pub format: Option<String>,
}

/// Prévia JSON de um lote CSV.
#[derive(Debug, Serialize)]
pub struct CsvPreview {
    /// Total de linhas analisadas.
    pub count: usize,
    /// Primeiras linhas (até `--csv-preview`).
    pub results: Vec<BatchRow>,
}

#[derive(Debug, Default, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub items: Vec<HistoryEntry>,
}

/// Identifica o usuário pelo header [`USER_HEADER`].
fn user_id(headers: &HeaderMap) -> String {
    headers
        .get(USER_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(ANONYMOUS_USER)
        .to_string()
}

/// Falha ao gravar o histórico só é registrada em log.
fn log_history_failure(outcome: anyhow::Result<()>) {
    if let Err(e) = outcome {
        tracing::error!(error = %e, "Falha ao salvar histórico");
    }
}

/// Lê o campo `file` de um upload multipart como texto.
///
/// Bytes que não são UTF-8 válido são decodificados como Latin-1.
async fn read_file_field(multipart: &mut Multipart) -> ApiResult<String> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or("upload").to_string();
        let bytes = field.bytes().await?;
        tracing::info!(size_bytes = bytes.len(), filename = %filename, "Upload recebido");
        return Ok(decode_text(&bytes));
    }
    Err(ApiError::NoFile)
}

fn decode_text(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

/// GET `/` — Página inicial.
pub async fn index() -> Html<String> {
    Html(templates::index_page().into_string())
}

/// GET `/status` — O serviço está pronto assim que o router existe.
pub async fn status() -> Json<StatusResponse> {
    Json(StatusResponse {
        ready: true,
        intents: IntentTag::ALL.len(),
    })
}

/// POST `/analyze` — Analisa o campo `text` do corpo JSON.
///
/// Corpo ausente ou malformado é tratado como texto vazio, que resulta
/// no resultado neutro zerado.
pub async fn analyze(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Json<AnalysisResult> {
    let req: AnalyzeRequest = serde_json::from_slice(&body).unwrap_or_default();
    let result = analyze_text(state.scorer(), &req.text);

    if !req.text.trim().is_empty() {
        let entry = HistoryEntry::new(&user_id(&headers), Source::Text, &req.text, &result);
        log_history_failure(state.history.record(entry));
    }
    Json(result)
}

/// POST `/analyze_file` — Analisa um arquivo de texto enviado.
pub async fn analyze_file(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> ApiResult<Json<FileAnalysis>> {
    let text = read_file_field(&mut multipart).await?;
    let result = analyze_text(state.scorer(), &text);

    if !text.trim().is_empty() {
        let entry = HistoryEntry::new(&user_id(&headers), Source::File, &text, &result);
        log_history_failure(state.history.record(entry));
    }
    Ok(Json(FileAnalysis {
        result,
        meta: FileMeta {
            chars: text.chars().count(),
        },
    }))
}

/// POST `/analyze_csv` — Analisa cada linha de um CSV.
///
/// `?format=csv` devolve o CSV completo como anexo; sem `format` (ou
/// `format=json`) devolve a contagem e uma prévia das primeiras linhas.
pub async fn analyze_csv(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<CsvQuery>,
    mut multipart: Multipart,
) -> ApiResult<Response> {
    let as_csv = match query.format.as_deref().map(str::to_ascii_lowercase).as_deref() {
        None | Some("json") => false,
        Some("csv") => true,
        Some(other) => return Err(ApiError::BadRequest(format!("unsupported format '{other}'"))),
    };

    let text = read_file_field(&mut multipart).await?;
    let rows = batch::analyze_csv(state.scorer(), &text);
    tracing::info!(rows = rows.len(), as_csv, "Lote CSV analisado");

    let user = user_id(&headers);
    let entries = rows
        .iter()
        .map(|r| HistoryEntry::new(&user, Source::Csv, &r.text, &r.result))
        .collect();
    log_history_failure(state.history.record_many(entries));

    if as_csv {
        return Ok((
            [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"analysis_results.csv\"",
                ),
            ],
            batch::to_csv(&rows),
        )
            .into_response());
    }

    let count = rows.len();
    let results = rows.into_iter().take(state.config.csv_preview).collect();
    Ok(Json(CsvPreview { count, results }).into_response())
}

/// GET `/history` — Análises recentes do usuário, mais novas primeiro.
pub async fn history(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<HistoryQuery>,
) -> Json<HistoryResponse> {
    let limit = query
        .limit
        .unwrap_or(DEFAULT_HISTORY_LIMIT)
        .clamp(1, MAX_HISTORY_LIMIT);
    Json(HistoryResponse {
        items: state.history.recent(&user_id(&headers), limit),
    })
}

/// POST `/chat` — Responde a uma mensagem com o tom pedido.
///
/// ## Fluxo
///
/// ```text
/// 1. Lê {message, tone} do corpo (ausente = vazio / listening)
/// 2. ChatEngine::respond() → ChatTurn
/// 3. Mensagem não vazia → grava no histórico (source = chat)
/// 4. Devolve o ChatTurn como JSON
/// ```
pub async fn chat(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Json<ChatTurn> {
    let req: ChatRequest = serde_json::from_slice(&body).unwrap_or_default();
    let turn = state.engine.respond(&req.message, req.tone.as_deref());

    if turn.intent.is_some() {
        let entry = HistoryEntry::new(&user_id(&headers), Source::Chat, &req.message, &turn.sentiment);
        log_history_failure(state.history.record(entry));
    }
    Json(turn)
}
