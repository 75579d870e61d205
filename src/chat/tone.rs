//! # Pós-processamento de Tom
//!
//! Depois que a resposta foi escolhida, o tom pedido pelo usuário pode
//! acrescentar **um** sufixo fixo. O gatilho é a presença de frases-chave
//! no texto da resposta (não na mensagem original):
//!
//! | Tom | Gatilhos na resposta | Sufixo |
//! |-----|----------------------|--------|
//! | `coaching` | [`COACHING_TRIGGERS`] | [`COACHING_SUFFIX`] |
//! | `listening` | [`LISTENING_TRIGGERS`] | [`LISTENING_SUFFIX`] |
//!
//! A comparação ignora caixa. Uma resposta que já termina com o sufixo
//! volta inalterada, então aplicar o tom duas vezes não duplica nada.

use std::fmt;

use serde::{Serialize, Serializer};

/// Frases de escuta genérica que viram um convite a planejar no modo coaching.
pub const COACHING_TRIGGERS: &[&str] = &["tell me more", "want to talk", "i'm here"];

/// Frases empáticas que ganham reforço de presença no modo listening.
pub const LISTENING_TRIGGERS: &[&str] = &[
    "that sounds",
    "i'm sorry",
    "it's okay",
    "that must be",
    "be gentle with yourself",
];

pub const COACHING_SUFFIX: &str = " If you'd like, we can plan one small next step together.";

pub const LISTENING_SUFFIX: &str = " I'm here with you.";

/// Tom da conversa escolhido pelo usuário.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Tone {
    #[default]
    Listening,
    Coaching,
}

impl Tone {
    /// Interpreta o valor enviado pelo cliente.
    ///
    /// Qualquer coisa que não seja `coaching` (inclusive vazio ou valores
    /// desconhecidos como `supportive`) resolve para `Listening`.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_lowercase()).as_deref() {
            Some("coaching") => Tone::Coaching,
            _ => Tone::Listening,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Listening => "listening",
            Tone::Coaching => "coaching",
        }
    }

    fn rule(&self) -> (&'static [&'static str], &'static str) {
        match self {
            Tone::Listening => (LISTENING_TRIGGERS, LISTENING_SUFFIX),
            Tone::Coaching => (COACHING_TRIGGERS, COACHING_SUFFIX),
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Tone {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Aplica o sufixo do tom à resposta, se algum gatilho estiver presente.
pub fn apply_tone(reply: &str, tone: Tone) -> String {
    let (triggers, suffix) = tone.rule();
    if reply.ends_with(suffix) {
        return reply.to_string();
    }
    let lowered = reply.to_lowercase();
    if triggers.iter().any(|t| lowered.contains(t)) {
        format!("{reply}{suffix}")
    } else {
        reply.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_defaults_to_listening() {
        assert_eq!(Tone::parse(None), Tone::Listening);
        assert_eq!(Tone::parse(Some("")), Tone::Listening);
        assert_eq!(Tone::parse(Some("supportive")), Tone::Listening);
        assert_eq!(Tone::parse(Some(" Coaching ")), Tone::Coaching);
    }

    #[test]
    fn coaching_appends_once_on_trigger() {
        let out = apply_tone("I see. Tell me more.", Tone::Coaching);
        assert!(out.ends_with(COACHING_SUFFIX));
        assert_eq!(out.matches(COACHING_SUFFIX).count(), 1);
    }

    #[test]
    fn coaching_twice_does_not_duplicate() {
        let once = apply_tone("Do you want to talk about it?", Tone::Coaching);
        let twice = apply_tone(&once, Tone::Coaching);
        assert_eq!(once, twice);
        assert_eq!(twice.matches(COACHING_SUFFIX).count(), 1);
    }

    #[test]
    fn coaching_ignores_replies_without_trigger() {
        let reply = "Have you tried restarting it?";
        assert_eq!(apply_tone(reply, Tone::Coaching), reply);
    }

    #[test]
    fn listening_appends_on_empathetic_phrase() {
        let out = apply_tone("That sounds hard.", Tone::Listening);
        assert_eq!(out, format!("That sounds hard.{LISTENING_SUFFIX}"));
        assert_eq!(apply_tone(&out, Tone::Listening), out);
    }

    #[test]
    fn listening_leaves_coaching_phrases_alone() {
        let reply = "I see. Tell me more.";
        assert_eq!(apply_tone(reply, Tone::Listening), reply);
    }

    #[test]
    fn trigger_lists_are_lowercase() {
        for t in COACHING_TRIGGERS.iter().chain(LISTENING_TRIGGERS) {
            assert_eq!(*t, t.to_lowercase());
        }
    }
}
