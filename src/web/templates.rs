//! # Templates Maud
//!
//! Só a página inicial é renderizada no servidor: um índice dos
//! endpoints com um exemplo de chamada para cada um.

use maud::{html, Markup, DOCTYPE};

/// Endpoints exibidos na página inicial: (método, caminho, descrição).
const ENDPOINTS: &[(&str, &str, &str)] = &[
    ("POST", "/analyze", "Score a JSON body {\"text\": \"...\"}"),
    ("POST", "/analyze_file", "Score an uploaded text file (multipart field \"file\")"),
    ("POST", "/analyze_csv", "Score every row of a CSV (add ?format=csv to download)"),
    ("GET", "/history?limit=10", "Your most recent analyses"),
    ("POST", "/chat", "Chat: {\"message\": \"...\", \"tone\": \"listening|coaching\"}"),
    ("GET", "/status", "Service readiness"),
];

/// Página inicial com a lista de endpoints.
pub fn index_page() -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { "Sentiment Chat" }
            }
            body {
                h1 { "Sentiment Chat" }
                p { "Score the sentiment of text, files or CSV batches, and talk to a rule-based companion." }
                table {
                    thead {
                        tr { th { "Method" } th { "Path" } th { "Description" } }
                    }
                    tbody {
                        @for (method, path, description) in ENDPOINTS {
                            tr {
                                td { code { (method) } }
                                td { code { (path) } }
                                td { (description) }
                            }
                        }
                    }
                }
            }
        }
    }
}
