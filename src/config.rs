//! # Configuração
//!
//! Parâmetros de execução lidos da linha de comando, com fallback para
//! variáveis de ambiente (`SENTIMENT_*`) e defaults embutidos.
//!
//! ```bash
//! sentiment-chat --bind 127.0.0.1:8080 --data-dir /var/lib/sentiment
//! SENTIMENT_HISTORY_CAP=1000 cargo run
//! ```

use std::path::PathBuf;

use clap::Parser;

#[derive(Clone, Debug, Parser)]
#[command(name = "sentiment-chat", version, about = "Sentiment analysis and rule-based chat service")]
pub struct Config {
    /// Endereço de escuta do servidor HTTP.
    #[arg(long, env = "SENTIMENT_BIND", default_value = "0.0.0.0:5000")]
    pub bind: String,

    /// Diretório onde o histórico é persistido.
    #[arg(long, env = "SENTIMENT_DATA_DIR", default_value = "data")]
    pub data_dir: PathBuf,

    /// Máximo de entradas de histórico mantidas por usuário.
    #[arg(long, env = "SENTIMENT_HISTORY_CAP", default_value_t = 500)]
    pub history_cap: usize,

    /// Linhas devolvidas na prévia JSON de um lote CSV.
    #[arg(long, env = "SENTIMENT_CSV_PREVIEW", default_value_t = 50)]
    pub csv_preview: usize,

    /// Tamanho máximo de upload, em MB.
    #[arg(long, env = "SENTIMENT_MAX_UPLOAD_MB", default_value_t = 10)]
    pub max_upload_mb: usize,
}

impl Config {
    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb * 1024 * 1024
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:5000".to_string(),
            data_dir: PathBuf::from("data"),
            history_cap: 500,
            csv_preview: 50,
            max_upload_mb: 10,
        }
    }
}
