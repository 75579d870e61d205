//! # Sentimento — Pontuação de Polaridade
//!
//! Este módulo define o contrato com o **pontuador de sentimento** e o
//! resultado imutável de cada análise ([`AnalysisResult`]).
//!
//! O algoritmo de pontuação em si é um colaborador plugável, exposto pelo
//! trait [`SentimentScorer`]. A implementação padrão é o
//! [`LexiconScorer`](lexicon::LexiconScorer), baseado em léxico de valências.
//!
//! ## Rótulo Grosso
//!
//! ```text
//! compound ≥  0.05 → Positive 😊
//! compound ≤ -0.05 → Negative 😞
//! caso contrário   → Neutral  😐
//! ```

/// Sub-módulo do pontuador baseado em léxico.
pub mod lexicon;

use serde::{Deserialize, Serialize};

/// Limiar de compound acima do qual o texto é considerado positivo.
pub const POSITIVE_THRESHOLD: f64 = 0.05;

/// Limiar de compound abaixo do qual o texto é considerado negativo.
pub const NEGATIVE_THRESHOLD: f64 = -0.05;

/// Pontuações brutas retornadas pelo pontuador.
///
/// `pos`, `neu` e `neg` são proporções em `[0, 1]`; `compound` resume a
/// polaridade geral em `[-1, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PolarityScores {
    pub pos: f64,
    pub neu: f64,
    pub neg: f64,
    pub compound: f64,
}

/// Rótulo grosso derivado do `compound`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Label {
    Positive,
    Negative,
    Neutral,
}

impl Label {
    /// Deriva o rótulo a partir do compound usando os limiares fixos.
    pub fn from_compound(compound: f64) -> Self {
        if compound >= POSITIVE_THRESHOLD {
            Label::Positive
        } else if compound <= NEGATIVE_THRESHOLD {
            Label::Negative
        } else {
            Label::Neutral
        }
    }

    /// Emoji exibido ao lado do rótulo (relação 1:1).
    pub fn emoji(&self) -> &'static str {
        match self {
            Label::Positive => "😊",
            Label::Negative => "😞",
            Label::Neutral => "😐",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Positive => "Positive",
            Label::Negative => "Negative",
            Label::Neutral => "Neutral",
        }
    }
}

/// Resultado imutável de uma análise de sentimento.
///
/// Criado novo a cada chamada e nunca mutado depois. Serializado como
/// `{ "label": "Positive", "emoji": "😊", "scores": { ... } }`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Rótulo grosso (Positive/Negative/Neutral).
    pub label: Label,
    /// Emoji associado ao rótulo.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
    /// Pontuações brutas do pontuador.
    pub scores: PolarityScores,
}

impl AnalysisResult {
    /// Resultado neutro com todas as pontuações zeradas.
    ///
    /// Usado para texto vazio; o pontuador nem chega a ser chamado.
    pub fn neutral_zero() -> Self {
        Self::from_scores(PolarityScores::default())
    }

    /// Monta o resultado a partir das pontuações, derivando rótulo e emoji.
    pub fn from_scores(scores: PolarityScores) -> Self {
        let label = Label::from_compound(scores.compound);
        Self {
            label,
            emoji: Some(label.emoji().to_string()),
            scores,
        }
    }
}

/// Colaborador que pontua a polaridade de um texto.
///
/// O contrato é **total**: nunca falha, e texto sem pistas de sentimento
/// resulta em compound 0. Implementações precisam ser `Send + Sync` pois
/// são compartilhadas entre handlers via `Arc`.
pub trait SentimentScorer: Send + Sync {
    fn score(&self, text: &str) -> PolarityScores;
}

/// Analisa um texto e retorna rótulo, emoji e pontuações.
///
/// Texto vazio (após trim) retorna [`AnalysisResult::neutral_zero()`]
/// sem consultar o pontuador.
pub fn analyze_text(scorer: &dyn SentimentScorer, text: &str) -> AnalysisResult {
    if text.trim().is_empty() {
        return AnalysisResult::neutral_zero();
    }
    AnalysisResult::from_scores(scorer.score(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(f64);

    impl SentimentScorer for Fixed {
        fn score(&self, _text: &str) -> PolarityScores {
            PolarityScores {
                compound: self.0,
                ..Default::default()
            }
        }
    }

    #[test]
    fn label_thresholds_are_inclusive() {
        assert_eq!(Label::from_compound(0.05), Label::Positive);
        assert_eq!(Label::from_compound(-0.05), Label::Negative);
        assert_eq!(Label::from_compound(0.0499), Label::Neutral);
        assert_eq!(Label::from_compound(-0.0499), Label::Neutral);
    }

    #[test]
    fn empty_text_skips_scorer() {
        let result = analyze_text(&Fixed(0.9), "   \n\t");
        assert_eq!(result, AnalysisResult::neutral_zero());
        assert_eq!(result.emoji.as_deref(), Some("😐"));
    }

    #[test]
    fn emoji_follows_label() {
        let result = analyze_text(&Fixed(-0.7), "whatever");
        assert_eq!(result.label, Label::Negative);
        assert_eq!(result.emoji.as_deref(), Some("😞"));
    }

    #[test]
    fn serializes_label_and_scores() {
        let json = serde_json::to_value(AnalysisResult::neutral_zero()).unwrap();
        assert_eq!(json["label"], "Neutral");
        assert_eq!(json["scores"]["compound"], 0.0);
        assert_eq!(json["scores"]["pos"], 0.0);
    }
}
