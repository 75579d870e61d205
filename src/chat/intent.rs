//! # Classificador de Intenção do Chat
//!
//! O [`IntentMatcher`] escolhe **exatamente uma** [`IntentTag`] para cada
//! mensagem, avaliando uma tabela de regras em ordem fixa de prioridade.
//! A primeira regra verdadeira vence; é uma cascata, não uma votação.
//!
//! ## Ordem de Prioridade
//!
//! ```text
//! greeting → help → gratitude → lost_keys → anger → sadness → happiness
//!   → sleep → exam_stress → focus → relationship → motivation → finances
//!   → device_issue → boredom → stress → tired
//!   → fallback pelo rótulo (positive / negative / neutral)
//! ```
//!
//! A ordem importa: "hi, I'm so sad about my exam" contém pistas de três
//! intenções e resolve para `greeting`.
//!
//! ## Tipos de Pista
//!
//! | Pista | Verdadeira quando |
//! |-------|-------------------|
//! | [`Cue::LeadingWord`] | a primeira palavra (ou o prefixo) casa |
//! | [`Cue::Any`] | qualquer keyword aparece como substring |
//! | [`Cue::Both`] | uma keyword de **cada** conjunto aparece |
//! | [`Cue::AnyOrCompoundAtMost`] | keyword, ou compound ≤ limiar |
//! | [`Cue::AnyOrCompoundAtLeast`] | keyword, ou compound ≥ limiar |
//!
//! O texto de entrada já chega normalizado (minúsculas); os testes de
//! substring são sensíveis a caixa sobre essa forma.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::sentiment::{AnalysisResult, Label};

/// Intenção conversacional de uma mensagem de chat.
///
/// Conjunto fechado. As três últimas variantes são o fallback derivado do
/// rótulo de sentimento quando nenhuma regra léxica casa.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IntentTag {
    Greeting,
    Help,
    Gratitude,
    LostKeys,
    Anger,
    Sadness,
    Happiness,
    Sleep,
    ExamStress,
    Focus,
    Relationship,
    Motivation,
    Finances,
    DeviceIssue,
    Boredom,
    Stress,
    Tired,
    Positive,
    Negative,
    Neutral,
}

impl IntentTag {
    /// Todas as variantes, na ordem de declaração.
    pub const ALL: [IntentTag; 20] = [
        IntentTag::Greeting,
        IntentTag::Help,
        IntentTag::Gratitude,
        IntentTag::LostKeys,
        IntentTag::Anger,
        IntentTag::Sadness,
        IntentTag::Happiness,
        IntentTag::Sleep,
        IntentTag::ExamStress,
        IntentTag::Focus,
        IntentTag::Relationship,
        IntentTag::Motivation,
        IntentTag::Finances,
        IntentTag::DeviceIssue,
        IntentTag::Boredom,
        IntentTag::Stress,
        IntentTag::Tired,
        IntentTag::Positive,
        IntentTag::Negative,
        IntentTag::Neutral,
    ];

    /// Nome snake_case usado na API (`"exam_stress"`, `"lost_keys"`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            IntentTag::Greeting => "greeting",
            IntentTag::Help => "help",
            IntentTag::Gratitude => "gratitude",
            IntentTag::LostKeys => "lost_keys",
            IntentTag::Anger => "anger",
            IntentTag::Sadness => "sadness",
            IntentTag::Happiness => "happiness",
            IntentTag::Sleep => "sleep",
            IntentTag::ExamStress => "exam_stress",
            IntentTag::Focus => "focus",
            IntentTag::Relationship => "relationship",
            IntentTag::Motivation => "motivation",
            IntentTag::Finances => "finances",
            IntentTag::DeviceIssue => "device_issue",
            IntentTag::Boredom => "boredom",
            IntentTag::Stress => "stress",
            IntentTag::Tired => "tired",
            IntentTag::Positive => "positive",
            IntentTag::Negative => "negative",
            IntentTag::Neutral => "neutral",
        }
    }

    /// Posição da variante em [`IntentTag::ALL`].
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Tag de fallback derivada do rótulo de sentimento.
    pub fn from_label(label: Label) -> Self {
        match label {
            Label::Positive => IntentTag::Positive,
            Label::Negative => IntentTag::Negative,
            Label::Neutral => IntentTag::Neutral,
        }
    }
}

impl fmt::Display for IntentTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for IntentTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

// ─── Conjuntos de keywords ──────────────────────────────────────

const GREETING_WORDS: &[&str] = &["hi", "hello", "hey", "hiya", "howdy", "yo", "greetings", "sup"];
const GREETING_PREFIXES: &[&str] = &["good morning", "good afternoon", "good evening"];

const HELP_WORDS: &[&str] = &["help"];
const HELP_PREFIXES: &[&str] = &[
    "please help",
    "can you please help",
    "what can you do",
    "how does this work",
    "how do you work",
    "can you help",
    "i need help",
];

const GRATITUDE_KEYWORDS: &[&str] = &["thank", "thx", "appreciate", "grateful"];

const LOST_KEYS_KEYWORDS: &[&str] = &[
    "lost my keys",
    "lost my key",
    "lost keys",
    "can't find my keys",
    "cant find my keys",
    "misplaced my keys",
    "where are my keys",
];

const ANGER_KEYWORDS: &[&str] = &[
    "angry",
    "furious",
    "pissed",
    "annoyed",
    "irritated",
    "infuriat",
    "i hate",
    "so mad",
    "mad at",
];

const SAD_KEYWORDS: &[&str] = &[
    "sad",
    "depressed",
    "unhappy",
    "lonely",
    "miserable",
    "heartbroken",
    "crying",
    "cried",
    "upset",
    "feel down",
    "feeling down",
    "feeling low",
];

const HAPPY_KEYWORDS: &[&str] = &[
    "happy",
    "glad",
    "excited",
    "thrilled",
    "delighted",
    "great news",
    "good news",
    "wonderful",
];

const SLEEP_KEYWORDS: &[&str] = &[
    "can't sleep",
    "cant sleep",
    "couldn't sleep",
    "cannot sleep",
    "insomnia",
    "trouble sleeping",
    "no sleep",
    "awake all night",
];

const EXAM_KEYWORDS: &[&str] = &[
    "exam",
    "finals",
    "midterm",
    "quiz",
    "my test",
    "a test",
    "the test",
    "test tomorrow",
];

const EXAM_STRESS_KEYWORDS: &[&str] = &[
    "stress",
    "anxious",
    "anxiety",
    "nervous",
    "worried",
    "panic",
    "overwhelmed",
    "scared",
    "freaking out",
];

const FOCUS_KEYWORDS: &[&str] = &[
    "can't focus",
    "cant focus",
    "cannot focus",
    "can't concentrate",
    "cant concentrate",
    "distracted",
    "procrastinat",
];

const RELATIONSHIP_KEYWORDS: &[&str] = &[
    "relationship",
    "boyfriend",
    "girlfriend",
    "partner",
    "broke up",
    "breakup",
    "break up",
    "crush",
    "divorce",
];

const MOTIVATION_KEYWORDS: &[&str] = &["motivat", "lazy", "can't get started", "no drive"];

const FINANCE_KEYWORDS: &[&str] = &[
    "money",
    "my rent",
    "the rent",
    "pay rent",
    "debt",
    "bills",
    "i'm broke",
    "so broke",
    "flat broke",
    "totally broke",
    "salary",
    "loan",
    "budget",
];

const DEVICE_KEYWORDS: &[&str] = &[
    "laptop",
    "phone",
    "computer",
    "wifi",
    "wi-fi",
    "crashed",
    "won't turn on",
    "not working",
    "battery",
];

const BOREDOM_KEYWORDS: &[&str] = &["bored", "boring", "nothing to do"];

const STRESS_KEYWORDS: &[&str] = &["stress", "overwhelmed", "anxious", "anxiety", "pressure", "panic"];

const TIRED_KEYWORDS: &[&str] = &["tired", "exhausted", "sleepy", "drained", "worn out", "fatigue"];

/// Compound a partir do qual a mensagem conta como tristeza mesmo sem keyword.
pub const SADNESS_COMPOUND_MAX: f64 = -0.4;

/// Compound a partir do qual a mensagem conta como felicidade mesmo sem keyword.
pub const HAPPINESS_COMPOUND_MIN: f64 = 0.6;

/// Predicado de uma regra da cascata.
#[derive(Clone, Copy, Debug)]
pub enum Cue {
    /// Primeira palavra em `words`, ou texto começando por um de `prefixes`.
    LeadingWord {
        words: &'static [&'static str],
        prefixes: &'static [&'static str],
    },
    /// Qualquer keyword presente.
    Any(&'static [&'static str]),
    /// Uma keyword de cada conjunto presente (conjunção).
    Both(&'static [&'static str], &'static [&'static str]),
    /// Keyword presente, ou compound ≤ limiar.
    AnyOrCompoundAtMost(&'static [&'static str], f64),
    /// Keyword presente, ou compound ≥ limiar.
    AnyOrCompoundAtLeast(&'static [&'static str], f64),
}

impl Cue {
    pub fn matches(&self, text: &str, sentiment: &AnalysisResult) -> bool {
        match *self {
            Cue::LeadingWord { words, prefixes } => {
                let first = text
                    .split(|c: char| !(c.is_alphanumeric() || c == '\''))
                    .find(|w| !w.is_empty())
                    .unwrap_or("");
                words.contains(&first) || prefixes.iter().any(|p| text.starts_with(p))
            }
            Cue::Any(keywords) => contains_any(text, keywords),
            Cue::Both(first, second) => contains_any(text, first) && contains_any(text, second),
            Cue::AnyOrCompoundAtMost(keywords, limit) => {
                contains_any(text, keywords) || sentiment.scores.compound <= limit
            }
            Cue::AnyOrCompoundAtLeast(keywords, limit) => {
                contains_any(text, keywords) || sentiment.scores.compound >= limit
            }
        }
    }
}

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text.contains(k))
}

/// Regra da cascata: a tag produzida quando a pista casa.
#[derive(Clone, Copy, Debug)]
pub struct Rule {
    pub tag: IntentTag,
    pub cue: Cue,
}

/// Tabela de regras na ordem de prioridade.
pub const RULES: &[Rule] = &[
    Rule {
        tag: IntentTag::Greeting,
        cue: Cue::LeadingWord { words: GREETING_WORDS, prefixes: GREETING_PREFIXES },
    },
    Rule {
        tag: IntentTag::Help,
        cue: Cue::LeadingWord { words: HELP_WORDS, prefixes: HELP_PREFIXES },
    },
    Rule { tag: IntentTag::Gratitude, cue: Cue::Any(GRATITUDE_KEYWORDS) },
    Rule { tag: IntentTag::LostKeys, cue: Cue::Any(LOST_KEYS_KEYWORDS) },
    Rule { tag: IntentTag::Anger, cue: Cue::Any(ANGER_KEYWORDS) },
    Rule {
        tag: IntentTag::Sadness,
        cue: Cue::AnyOrCompoundAtMost(SAD_KEYWORDS, SADNESS_COMPOUND_MAX),
    },
    Rule {
        tag: IntentTag::Happiness,
        cue: Cue::AnyOrCompoundAtLeast(HAPPY_KEYWORDS, HAPPINESS_COMPOUND_MIN),
    },
    Rule { tag: IntentTag::Sleep, cue: Cue::Any(SLEEP_KEYWORDS) },
    Rule {
        tag: IntentTag::ExamStress,
        cue: Cue::Both(EXAM_KEYWORDS, EXAM_STRESS_KEYWORDS),
    },
    Rule { tag: IntentTag::Focus, cue: Cue::Any(FOCUS_KEYWORDS) },
    Rule { tag: IntentTag::Relationship, cue: Cue::Any(RELATIONSHIP_KEYWORDS) },
    Rule { tag: IntentTag::Motivation, cue: Cue::Any(MOTIVATION_KEYWORDS) },
    Rule { tag: IntentTag::Finances, cue: Cue::Any(FINANCE_KEYWORDS) },
    Rule { tag: IntentTag::DeviceIssue, cue: Cue::Any(DEVICE_KEYWORDS) },
    Rule { tag: IntentTag::Boredom, cue: Cue::Any(BOREDOM_KEYWORDS) },
    Rule { tag: IntentTag::Stress, cue: Cue::Any(STRESS_KEYWORDS) },
    Rule { tag: IntentTag::Tired, cue: Cue::Any(TIRED_KEYWORDS) },
];

/// Classificador de intenção por cascata de regras.
///
/// Sem estado mutável; pode ser compartilhado entre threads livremente.
#[derive(Clone, Debug)]
pub struct IntentMatcher {
    rules: &'static [Rule],
}

impl Default for IntentMatcher {
    fn default() -> Self {
        Self { rules: RULES }
    }
}

impl IntentMatcher {
    /// Classifica uma mensagem já normalizada (minúsculas).
    ///
    /// Sempre retorna uma tag: se nenhuma regra casa, o fallback vem do
    /// rótulo de sentimento.
    pub fn classify(&self, text: &str, sentiment: &AnalysisResult) -> IntentTag {
        self.rules
            .iter()
            .find(|rule| rule.cue.matches(text, sentiment))
            .map(|rule| rule.tag)
            .unwrap_or_else(|| IntentTag::from_label(sentiment.label))
    }
}
