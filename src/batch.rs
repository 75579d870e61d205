//! # Lote CSV — Análise de Várias Linhas
//!
//! Lê um CSV enviado pelo usuário, analisa cada linha e gera o resultado
//! como JSON (prévia) ou como um novo CSV para download.
//!
//! ## Coluna de Texto
//!
//! ```text
//! primeira linha tem célula "text" (qualquer caixa)?
//!   ├── sim → essa coluna; a linha é cabeçalho
//!   └── não → primeira coluna; todas as linhas são dados
//! ```
//!
//! Células de texto vazias são ignoradas. O parser aceita aspas no
//! estilo RFC 4180 (`""` escapa aspas, campos com quebra de linha) e
//! finais de linha `\r\n`.

use serde::Serialize;

use crate::sentiment::{analyze_text, AnalysisResult, SentimentScorer};

/// Cabeçalho do CSV de saída.
pub const OUTPUT_HEADER: &str = "row,text,label,pos,neu,neg,compound";

/// Uma linha analisada do lote.
#[derive(Clone, Debug, Serialize)]
pub struct BatchRow {
    /// Número da linha de dados (1-indexed, sem contar o cabeçalho).
    pub row: usize,
    pub text: String,
    #[serde(flatten)]
    pub result: AnalysisResult,
}

/// Separa o conteúdo CSV em registros de campos.
pub fn parse_records(input: &str) -> Vec<Vec<String>> {
    let mut records = Vec::new();
    let mut record = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = input.trim_start_matches('\u{feff}').chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    field.push('"');
                    chars.next();
                }
                '"' => in_quotes = false,
                _ => field.push(c),
            }
            continue;
        }
        match c {
            '"' => in_quotes = true,
            ',' => record.push(std::mem::take(&mut field)),
            '\r' => {}
            '\n' => {
                record.push(std::mem::take(&mut field));
                records.push(std::mem::take(&mut record));
            }
            _ => field.push(c),
        }
    }
    if !field.is_empty() || !record.is_empty() {
        record.push(field);
        records.push(record);
    }

    // linhas totalmente em branco não são registros
    records.retain(|r| r.iter().any(|f| !f.trim().is_empty()));
    records
}

/// Extrai os textos a analisar, aplicando a regra da coluna de texto.
pub fn extract_texts(records: &[Vec<String>]) -> Vec<String> {
    let Some(first) = records.first() else {
        return Vec::new();
    };
    let header_col = first
        .iter()
        .position(|cell| cell.trim().eq_ignore_ascii_case("text"));
    let (column, skip) = match header_col {
        Some(col) => (col, 1),
        None => (0, 0),
    };

    records
        .iter()
        .skip(skip)
        .filter_map(|r| r.get(column))
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

/// Analisa todas as linhas de um CSV.
pub fn analyze_csv(scorer: &dyn SentimentScorer, input: &str) -> Vec<BatchRow> {
    extract_texts(&parse_records(input))
        .into_iter()
        .enumerate()
        .map(|(i, text)| BatchRow {
            row: i + 1,
            result: analyze_text(scorer, &text),
            text,
        })
        .collect()
}

/// Escreve o resultado do lote como CSV.
pub fn to_csv(rows: &[BatchRow]) -> String {
    let mut out = String::with_capacity(64 * (rows.len() + 1));
    out.push_str(OUTPUT_HEADER);
    out.push('\n');
    for r in rows {
        let s = &r.result.scores;
        out.push_str(&format!(
            "{},{},{},{},{},{},{}\n",
            r.row,
            escape_field(&r.text),
            r.result.label.as_str(),
            s.pos,
            s.neu,
            s.neg,
            s.compound
        ));
    }
    out
}

fn escape_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentiment::lexicon::LexiconScorer;
    use crate::sentiment::Label;

    #[test]
    fn parses_quotes_and_crlf() {
        let records = parse_records("id,text\r\n1,\"hello, \"\"world\"\"\"\r\n2,plain\r\n");
        assert_eq!(records.len(), 3);
        assert_eq!(records[1], vec!["1", "hello, \"world\""]);
        assert_eq!(records[2], vec!["2", "plain"]);
    }

    #[test]
    fn quoted_field_may_span_lines() {
        let records = parse_records("text\n\"line one\nline two\"\n");
        assert_eq!(records[1], vec!["line one\nline two"]);
    }

    #[test]
    fn header_selects_text_column() {
        let records = parse_records("id,Text\n1,good\n2,\n3,bad\n");
        assert_eq!(extract_texts(&records), vec!["good", "bad"]);
    }

    #[test]
    fn without_header_first_column_is_data() {
        let records = parse_records("I love it,5\nI hate it,1\n\n");
        assert_eq!(extract_texts(&records), vec!["I love it", "I hate it"]);
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(analyze_csv(&LexiconScorer::new().unwrap(), "").is_empty());
    }

    #[test]
    fn analyzes_and_writes_csv() {
        let scorer = LexiconScorer::new().unwrap();
        let rows = analyze_csv(&scorer, "text\n\"I love this, truly\"\nterrible service\n");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].row, 1);
        assert_eq!(rows[0].result.label, Label::Positive);
        assert_eq!(rows[1].result.label, Label::Negative);

        let csv = to_csv(&rows);
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some(OUTPUT_HEADER));
        assert!(lines.next().unwrap().starts_with("1,\"I love this, truly\",Positive,"));
        assert!(lines.next().unwrap().starts_with("2,terrible service,Negative,"));
    }
}
