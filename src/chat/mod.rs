//! # Chat — Respondedor por Regras
//!
//! O [`ChatEngine`] responde a uma mensagem em um único passo puro:
//!
//! ```text
//! mensagem
//!   ├── trim → vazia? → resposta fixa "please share something"
//!   ├── normaliza uma vez (NFC + minúsculas + aspas retas)
//!   ├── pontua sentimento (SentimentScorer)
//!   ├── classifica intenção (IntentMatcher)
//!   ├── escolhe resposta do pool (ResponseBook + ReplyPicker)
//!   ├── aplica tom (apply_tone)
//!   └── resolve sugestões → ChatTurn
//! ```
//!
//! Todas as dependências são injetadas na construção e ficam imutáveis;
//! o motor é `Send + Sync` e fica atrás de um `Arc` no estado web.
//!
//! ## Sub-módulos
//!
//! | Módulo | Responsabilidade |
//! |--------|------------------|
//! | [`intent`] | Cascata de regras → [`IntentTag`] |
//! | [`replies`] | Pools de respostas, sugestões e [`ReplyPicker`] |
//! | [`tone`] | Sufixos de tom (listening/coaching) |

pub mod intent;
pub mod replies;
pub mod tone;

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;

use crate::sentiment::{analyze_text, AnalysisResult, SentimentScorer};

use intent::{IntentMatcher, IntentTag};
use replies::{ReplyPicker, ResponseBook, ThreadRngPicker, FALLBACK_SUGGESTION};
use tone::{apply_tone, Tone};

/// Resposta fixa para mensagens vazias ou só com espaços.
pub const EMPTY_MESSAGE_REPLY: &str = "Please share something so I can respond.";

/// Defeitos de configuração das tabelas do chat.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("no replies configured for intent '{0}'")]
    MissingReplies(IntentTag),

    #[error("no suggestions configured for intent '{0}'")]
    MissingSuggestions(IntentTag),
}

/// Resultado de um turno de chat, serializado diretamente na API.
///
/// `intent` é `null` apenas no turno de mensagem vazia.
#[derive(Clone, Debug, Serialize)]
pub struct ChatTurn {
    pub reply: String,
    pub sentiment: AnalysisResult,
    pub tone: Tone,
    pub intent: Option<IntentTag>,
    pub suggestions: Vec<String>,
}

/// Motor de resposta do chat.
pub struct ChatEngine {
    scorer: Arc<dyn SentimentScorer>,
    matcher: IntentMatcher,
    book: ResponseBook,
    picker: Box<dyn ReplyPicker>,
}

impl ChatEngine {
    /// Cria o motor com as tabelas embutidas e sorteio uniforme.
    ///
    /// # Erros
    ///
    /// Propaga [`ChatError`] se alguma intenção ficou sem respostas ou
    /// sem sugestões.
    pub fn new(scorer: Arc<dyn SentimentScorer>) -> Result<Self, ChatError> {
        Ok(Self::with_parts(
            scorer,
            IntentMatcher::default(),
            ResponseBook::new()?,
            Box::new(ThreadRngPicker),
        ))
    }

    /// Cria o motor com todas as partes explícitas (usado nos testes).
    pub fn with_parts(
        scorer: Arc<dyn SentimentScorer>,
        matcher: IntentMatcher,
        book: ResponseBook,
        picker: Box<dyn ReplyPicker>,
    ) -> Self {
        Self {
            scorer,
            matcher,
            book,
            picker,
        }
    }

    pub fn scorer(&self) -> &dyn SentimentScorer {
        self.scorer.as_ref()
    }

    pub fn book(&self) -> &ResponseBook {
        &self.book
    }

    /// Responde a uma mensagem com o tom pedido.
    ///
    /// Nunca falha: mensagem vazia e tom desconhecido são casos previstos.
    pub fn respond(&self, message: &str, tone: Option<&str>) -> ChatTurn {
        let tone = Tone::parse(tone);
        let trimmed = message.trim();
        if trimmed.is_empty() {
            return ChatTurn {
                reply: EMPTY_MESSAGE_REPLY.to_string(),
                sentiment: AnalysisResult::neutral_zero(),
                tone,
                intent: None,
                suggestions: vec![FALLBACK_SUGGESTION.to_string()],
            };
        }

        let normalized = normalize(trimmed);
        let sentiment = analyze_text(self.scorer.as_ref(), trimmed);
        let intent = self.matcher.classify(&normalized, &sentiment);
        let reply = apply_tone(self.book.select_reply(intent, self.picker.as_ref()), tone);

        tracing::debug!(
            intent = %intent,
            tone = %tone,
            compound = sentiment.scores.compound,
            "chat turn"
        );

        ChatTurn {
            reply,
            sentiment,
            tone,
            intent: Some(intent),
            suggestions: self.book.suggestions_for(intent),
        }
    }
}

/// Forma canônica usada por todos os predicados de intenção.
///
/// NFC, minúsculas e apóstrofos tipográficos trocados pelo reto, para que
/// "I can’t sleep" case com `can't sleep`.
pub fn normalize(text: &str) -> String {
    text.nfc()
        .collect::<String>()
        .to_lowercase()
        .replace(['\u{2018}', '\u{2019}'], "'")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentiment::lexicon::LexiconScorer;
    use crate::sentiment::{Label, PolarityScores};
    use replies::FirstPicker;

    /// Pontuador que sempre devolve o mesmo compound e conta as chamadas.
    struct FixedScorer {
        compound: f64,
        calls: std::sync::atomic::AtomicUsize,
    }

    impl FixedScorer {
        fn new(compound: f64) -> Arc<Self> {
            Arc::new(Self {
                compound,
                calls: Default::default(),
            })
        }
    }

    impl SentimentScorer for FixedScorer {
        fn score(&self, _text: &str) -> PolarityScores {
            self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            PolarityScores {
                compound: self.compound,
                ..Default::default()
            }
        }
    }

    fn lexicon_engine() -> ChatEngine {
        ChatEngine::new(Arc::new(LexiconScorer::new().unwrap())).unwrap()
    }

    fn fixed_engine(scorer: Arc<FixedScorer>) -> ChatEngine {
        ChatEngine::with_parts(
            scorer,
            IntentMatcher::default(),
            ResponseBook::new().unwrap(),
            Box::new(FirstPicker),
        )
    }

    #[test]
    fn empty_message_short_circuits() {
        let scorer = FixedScorer::new(-0.9);
        let engine = fixed_engine(scorer.clone());
        for msg in ["", "   ", "\n\t "] {
            let turn = engine.respond(msg, Some("coaching"));
            assert_eq!(turn.reply, EMPTY_MESSAGE_REPLY);
            assert_eq!(turn.sentiment.label, Label::Neutral);
            assert_eq!(turn.sentiment.scores, PolarityScores::default());
            assert_eq!(turn.intent, None);
            assert_eq!(turn.tone, Tone::Coaching);
        }
        assert_eq!(scorer.calls.load(std::sync::atomic::Ordering::SeqCst), 0);
    }

    #[test]
    fn greeting_takes_priority() {
        let turn = lexicon_engine().respond("hi, I'm so sad about my exam, I feel anxious", None);
        assert_eq!(turn.intent, Some(IntentTag::Greeting));
    }

    #[test]
    fn exam_stress_from_real_scorer() {
        let engine = lexicon_engine();
        let turn = engine.respond("I have finals and I'm so anxious", None);
        assert_eq!(turn.intent, Some(IntentTag::ExamStress));

        let turn = engine.respond("I have finals tomorrow", None);
        assert_ne!(turn.intent, Some(IntentTag::ExamStress));
    }

    #[test]
    fn strongly_negative_message_without_sad_words_is_sadness() {
        let engine = fixed_engine(FixedScorer::new(-0.75));
        let turn = engine.respond("The quarterly report came back", None);
        assert_eq!(turn.intent, Some(IntentTag::Sadness));
        assert_eq!(turn.sentiment.label, Label::Negative);
    }

    #[test]
    fn reply_belongs_to_intent_pool() {
        let engine = lexicon_engine();
        for _ in 0..50 {
            let turn = engine.respond("my laptop won't turn on", Some("listening"));
            let pool = engine.book().pool(IntentTag::DeviceIssue);
            assert!(pool.iter().any(|r| turn.reply.starts_with(r)));
        }
    }

    #[test]
    fn coaching_suffix_applied_to_neutral_reply() {
        let engine = fixed_engine(FixedScorer::new(0.0));
        let turn = engine.respond("The bus was on time", Some("coaching"));
        assert_eq!(turn.intent, Some(IntentTag::Neutral));
        assert_eq!(turn.reply, format!("I see. Tell me more.{}", tone::COACHING_SUFFIX));
        assert_eq!(turn.suggestions[0], FALLBACK_SUGGESTION);
    }

    #[test]
    fn unknown_tone_echoes_listening() {
        let turn = lexicon_engine().respond("Hello there", Some("supportive"));
        assert_eq!(turn.tone, Tone::Listening);
        assert_eq!(turn.intent, Some(IntentTag::Greeting));
        assert!(!turn.reply.is_empty());
    }

    #[test]
    fn typographic_apostrophe_is_normalized() {
        assert_eq!(normalize("I Can\u{2019}t Sleep"), "i can't sleep");
        let turn = lexicon_engine().respond("I can\u{2019}t sleep", None);
        assert_eq!(turn.intent, Some(IntentTag::Sleep));
    }

    #[test]
    fn turn_serializes_expected_shape() {
        let turn = fixed_engine(FixedScorer::new(0.0)).respond("Hello", Some("coaching"));
        let json = serde_json::to_value(&turn).unwrap();
        assert_eq!(json["intent"], "greeting");
        assert_eq!(json["tone"], "coaching");
        assert_eq!(json["sentiment"]["label"], "Neutral");
        assert!(json["suggestions"].as_array().is_some_and(|s| !s.is_empty()));
    }
}
