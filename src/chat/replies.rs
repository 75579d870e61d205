//! # Respostas e Sugestões por Intenção
//!
//! O [`ResponseBook`] guarda, para cada [`IntentTag`], o **pool de
//! respostas** candidatas e a lista de **sugestões** (chips) exibidas ao
//! usuário. Ambos são dados estáticos, validados uma única vez na
//! construção e somente leitura depois disso.
//!
//! ## Aleatoriedade Isolada
//!
//! A escolha da resposta dentro do pool é o único ponto não
//! determinístico do chat. Ela passa pelo trait [`ReplyPicker`]:
//!
//! ```text
//! ThreadRngPicker → sorteio uniforme (produção)
//! FirstPicker     → sempre o índice 0 (testes determinísticos)
//! ```

use rand::Rng;

use super::intent::IntentTag;
use super::ChatError;

/// Sugestão universal, presente também no turno de mensagem vazia.
pub const FALLBACK_SUGGESTION: &str = "Tell me more";

/// Fonte de índices para a escolha da resposta.
///
/// `pick(len)` deve retornar um valor em `0..len`; `len` é sempre ≥ 1.
pub trait ReplyPicker: Send + Sync {
    fn pick(&self, len: usize) -> usize;
}

/// Sorteio uniforme com o RNG thread-local do processo.
#[derive(Clone, Copy, Debug, Default)]
pub struct ThreadRngPicker;

impl ReplyPicker for ThreadRngPicker {
    fn pick(&self, len: usize) -> usize {
        rand::rng().random_range(0..len)
    }
}

/// Sempre escolhe a primeira resposta do pool.
#[derive(Clone, Copy, Debug, Default)]
pub struct FirstPicker;

impl ReplyPicker for FirstPicker {
    fn pick(&self, _len: usize) -> usize {
        0
    }
}

const REPLY_TABLE: &[(IntentTag, &[&str])] = &[
    (
        IntentTag::Greeting,
        &[
            "Hi there! How are you feeling today?",
            "Hello! What's on your mind?",
            "Hey! I'm here. Tell me more about your day.",
        ],
    ),
    (
        IntentTag::Help,
        &["I can listen to how you're feeling, score the sentiment of your messages, \
           and suggest small next steps. Try telling me about your day, or pick a \
           suggestion below."],
    ),
    (
        IntentTag::Gratitude,
        &[
            "You're very welcome!",
            "Anytime. I'm glad I could help.",
            "Happy to help. Is there anything else you want to talk about?",
        ],
    ),
    (
        IntentTag::LostKeys,
        &[
            "That's frustrating! Try retracing your steps from the last place you remember having them.",
            "Check the usual suspects: coat pockets, bags, the door and the kitchen counter.",
            "Take a breath first. Where did you go after you last came home?",
        ],
    ),
    (
        IntentTag::Anger,
        &[
            "That sounds really frustrating. Do you want to talk about what happened?",
            "It's okay to feel angry. What set it off?",
            "I hear you. Sometimes a short walk helps before deciding what to do next.",
        ],
    ),
    (
        IntentTag::Sadness,
        &[
            "I'm sorry you're feeling this way. Do you want to talk about it?",
            "That sounds hard. I'm here to listen.",
            "It's okay to feel sad. Tell me more about what's going on.",
        ],
    ),
    (
        IntentTag::Happiness,
        &[
            "That's wonderful to hear!",
            "Love that! What made it so good?",
            "Great news! Tell me more.",
        ],
    ),
    (
        IntentTag::Sleep,
        &[
            "Trouble sleeping is rough. A screen-free wind-down before bed can help.",
            "That sounds exhausting. Has something been keeping your mind busy at night?",
            "Try keeping the same bedtime for a few nights and see if it settles.",
        ],
    ),
    (
        IntentTag::ExamStress,
        &[
            "Exams can feel overwhelming. Breaking your revision into short blocks can help.",
            "That sounds stressful. Which subject worries you the most?",
            "You've prepared more than you think. Want to plan a study schedule together?",
        ],
    ),
    (
        IntentTag::Focus,
        &[
            "Try a 25-minute focus block with your phone in another room.",
            "Focusing is hard some days. What's pulling your attention away?",
            "Pick one small task and give it ten minutes. Momentum helps.",
        ],
    ),
    (
        IntentTag::Relationship,
        &[
            "Relationships can be complicated. Do you want to talk about what happened?",
            "That must be a lot to carry. How are you feeling about it?",
            "I'm here to listen. Tell me more about the situation.",
        ],
    ),
    (
        IntentTag::Motivation,
        &[
            "Motivation often follows action. What's one tiny step you could take now?",
            "It's normal to feel stuck sometimes. What goal matters most to you right now?",
            "Try setting a two-minute starter task. Getting started is the hardest part.",
        ],
    ),
    (
        IntentTag::Finances,
        &[
            "Money worries are stressful. Writing down income and expenses can bring some clarity.",
            "That sounds like a lot of pressure. Want to talk through your options?",
            "A simple budget for the next two weeks might make things feel more manageable.",
        ],
    ),
    (
        IntentTag::DeviceIssue,
        &[
            "Have you tried restarting it? It fixes more than you'd expect.",
            "That's annoying. Check for updates and free storage space first.",
            "Tech trouble is the worst. What exactly happens when you try to use it?",
        ],
    ),
    (
        IntentTag::Boredom,
        &[
            "How about a short walk or a new playlist?",
            "Boredom can be a chance to try something new. Anything you've been curious about?",
            "Maybe pick up a hobby you dropped a while ago?",
        ],
    ),
    (
        IntentTag::Stress,
        &[
            "That sounds stressful. Try a slow breath in for four, hold, and out for four.",
            "It's okay to feel overwhelmed. What's weighing on you the most?",
            "One thing at a time. Want to talk about what's on your plate?",
        ],
    ),
    (
        IntentTag::Tired,
        &[
            "Sounds like you need some rest. Can you take a short break?",
            "Being tired makes everything harder. Have you been sleeping okay?",
            "Be gentle with yourself today. A glass of water and a short pause can help.",
        ],
    ),
    (
        IntentTag::Positive,
        &[
            "That's great to hear!",
            "Love the positive vibes!",
            "Sounds like things are going well. Tell me more!",
        ],
    ),
    (
        IntentTag::Negative,
        &[
            "I'm sorry things feel tough right now.",
            "That sounds difficult. Do you want to talk about it?",
            "I'm here for you. What's going on?",
        ],
    ),
    (
        IntentTag::Neutral,
        &[
            "I see. Tell me more.",
            "Got it. How do you feel about that?",
            "Okay. What's on your mind?",
        ],
    ),
];

/// Rótulos de sugestão reconhecidos pelo frontend (chips de resposta rápida).
pub const DO_BREATHING: &str = "Do breathing";
pub const URGENT_VS_IMPORTANT: &str = "Urgent vs important";
pub const MAKE_MINI_PLAN: &str = "Make a mini plan";
pub const PICK_FIRST_TOPIC: &str = "Pick first topic";
pub const BODY_SCAN: &str = "Body scan";
pub const WIND_DOWN_TIPS: &str = "Wind-down tips";
pub const TEN_MINUTE_TIMER: &str = "Start 10-minute timer";
pub const POMODORO: &str = "25/5 Pomodoro";
pub const SHOW_HISTORY: &str = "Show history";
pub const ANALYZE_MY_TEXT: &str = "Analyze my text";

const SUGGESTION_TABLE: &[(IntentTag, &[&str])] = &[
    (IntentTag::Greeting, &[ANALYZE_MY_TEXT, SHOW_HISTORY, FALLBACK_SUGGESTION]),
    (IntentTag::Help, &[ANALYZE_MY_TEXT, SHOW_HISTORY, DO_BREATHING]),
    (IntentTag::Gratitude, &[FALLBACK_SUGGESTION, SHOW_HISTORY]),
    (IntentTag::LostKeys, &[DO_BREATHING, MAKE_MINI_PLAN]),
    (IntentTag::Anger, &[DO_BREATHING, FALLBACK_SUGGESTION]),
    (IntentTag::Sadness, &[FALLBACK_SUGGESTION, DO_BREATHING, MAKE_MINI_PLAN]),
    (IntentTag::Happiness, &[FALLBACK_SUGGESTION, SHOW_HISTORY]),
    (IntentTag::Sleep, &[BODY_SCAN, WIND_DOWN_TIPS]),
    (IntentTag::ExamStress, &[PICK_FIRST_TOPIC, POMODORO, DO_BREATHING]),
    (IntentTag::Focus, &[POMODORO, TEN_MINUTE_TIMER]),
    (IntentTag::Relationship, &[FALLBACK_SUGGESTION, DO_BREATHING]),
    (IntentTag::Motivation, &[TEN_MINUTE_TIMER, MAKE_MINI_PLAN]),
    (IntentTag::Finances, &[MAKE_MINI_PLAN, URGENT_VS_IMPORTANT]),
    (IntentTag::DeviceIssue, &[FALLBACK_SUGGESTION, MAKE_MINI_PLAN]),
    (IntentTag::Boredom, &[TEN_MINUTE_TIMER, ANALYZE_MY_TEXT]),
    (IntentTag::Stress, &[DO_BREATHING, URGENT_VS_IMPORTANT, MAKE_MINI_PLAN]),
    (IntentTag::Tired, &[BODY_SCAN, WIND_DOWN_TIPS]),
    (IntentTag::Positive, &[FALLBACK_SUGGESTION, SHOW_HISTORY]),
    (IntentTag::Negative, &[FALLBACK_SUGGESTION, DO_BREATHING]),
    (IntentTag::Neutral, &[FALLBACK_SUGGESTION, ANALYZE_MY_TEXT]),
];

/// Pools de respostas e listas de sugestões, indexados por [`IntentTag`].
///
/// Só pode ser construído via [`ResponseBook::new()`], que garante que
/// toda tag da enumeração tem ao menos uma resposta e uma sugestão.
#[derive(Clone, Debug)]
pub struct ResponseBook {
    replies: Vec<Vec<&'static str>>,
    suggestions: Vec<Vec<&'static str>>,
}

impl ResponseBook {
    /// Constrói o livro a partir das tabelas embutidas.
    ///
    /// # Erros
    ///
    /// [`ChatError::MissingReplies`] ou [`ChatError::MissingSuggestions`]
    /// se alguma tag ficou sem entrada. É um defeito de configuração que
    /// deve derrubar o processo na inicialização.
    pub fn new() -> Result<Self, ChatError> {
        Self::from_tables(REPLY_TABLE, SUGGESTION_TABLE)
    }

    fn from_tables(
        reply_table: &[(IntentTag, &[&'static str])],
        suggestion_table: &[(IntentTag, &[&'static str])],
    ) -> Result<Self, ChatError> {
        let mut replies = vec![Vec::new(); IntentTag::ALL.len()];
        for (tag, pool) in reply_table {
            replies[tag.index()].extend_from_slice(pool);
        }
        let mut suggestions = vec![Vec::new(); IntentTag::ALL.len()];
        for (tag, chips) in suggestion_table {
            suggestions[tag.index()].extend_from_slice(chips);
        }

        for tag in IntentTag::ALL {
            if replies[tag.index()].is_empty() {
                return Err(ChatError::MissingReplies(tag));
            }
            if suggestions[tag.index()].is_empty() {
                return Err(ChatError::MissingSuggestions(tag));
            }
        }

        Ok(Self { replies, suggestions })
    }

    /// Pool completo de respostas de uma tag.
    pub fn pool(&self, tag: IntentTag) -> &[&'static str] {
        &self.replies[tag.index()]
    }

    /// Escolhe uma resposta do pool usando o `picker`.
    ///
    /// Índices fora do intervalo são reduzidos módulo o tamanho do pool.
    pub fn select_reply(&self, tag: IntentTag, picker: &dyn ReplyPicker) -> &'static str {
        let pool = self.pool(tag);
        pool[picker.pick(pool.len()) % pool.len()]
    }

    /// Sugestões de follow-up para a tag, em ordem.
    pub fn suggestions_for(&self, tag: IntentTag) -> Vec<String> {
        self.suggestions[tag.index()]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn every_tag_has_replies_and_suggestions() {
        let book = ResponseBook::new().unwrap();
        for tag in IntentTag::ALL {
            assert!(!book.pool(tag).is_empty(), "no replies for {tag}");
            assert!(!book.suggestions_for(tag).is_empty(), "no suggestions for {tag}");
            assert!(book.pool(tag).iter().all(|r| !r.trim().is_empty()));
        }
    }

    #[test]
    fn suggestions_use_known_chip_labels() {
        let known = [
            DO_BREATHING,
            URGENT_VS_IMPORTANT,
            MAKE_MINI_PLAN,
            PICK_FIRST_TOPIC,
            BODY_SCAN,
            WIND_DOWN_TIPS,
            TEN_MINUTE_TIMER,
            POMODORO,
            SHOW_HISTORY,
            ANALYZE_MY_TEXT,
            FALLBACK_SUGGESTION,
        ];
        let book = ResponseBook::new().unwrap();
        for tag in IntentTag::ALL {
            for chip in book.suggestions_for(tag) {
                assert!(known.contains(&chip.as_str()), "unknown chip {chip:?} for {tag}");
            }
        }
        assert_eq!(book.suggestions_for(IntentTag::Sleep), [BODY_SCAN, WIND_DOWN_TIPS]);
        assert_eq!(book.suggestions_for(IntentTag::Focus), [POMODORO, TEN_MINUTE_TIMER]);
        assert!(book.suggestions_for(IntentTag::Stress).contains(&DO_BREATHING.to_string()));
        assert!(book
            .suggestions_for(IntentTag::ExamStress)
            .contains(&PICK_FIRST_TOPIC.to_string()));
    }

    #[test]
    fn help_pool_is_a_single_fixed_entry() {
        let book = ResponseBook::new().unwrap();
        assert_eq!(book.pool(IntentTag::Help).len(), 1);
        let first = book.select_reply(IntentTag::Help, &ThreadRngPicker);
        for _ in 0..20 {
            assert_eq!(book.select_reply(IntentTag::Help, &ThreadRngPicker), first);
        }
    }

    #[test]
    fn random_draws_stay_in_pool_and_cover_it() {
        let book = ResponseBook::new().unwrap();
        for tag in IntentTag::ALL {
            let pool = book.pool(tag);
            let mut seen = HashSet::new();
            for _ in 0..1000 {
                let reply = book.select_reply(tag, &ThreadRngPicker);
                assert!(pool.contains(&reply), "{reply:?} not in pool for {tag}");
                seen.insert(reply);
            }
            assert_eq!(seen.len(), pool.len(), "pool for {tag} not fully covered");
        }
    }

    #[test]
    fn first_picker_is_deterministic() {
        let book = ResponseBook::new().unwrap();
        assert_eq!(
            book.select_reply(IntentTag::Neutral, &FirstPicker),
            "I see. Tell me more."
        );
    }

    #[test]
    fn out_of_range_pick_wraps() {
        struct Wild;
        impl ReplyPicker for Wild {
            fn pick(&self, len: usize) -> usize {
                len + 1
            }
        }
        let book = ResponseBook::new().unwrap();
        let pool = book.pool(IntentTag::Greeting);
        assert_eq!(book.select_reply(IntentTag::Greeting, &Wild), pool[1]);
    }

    #[test]
    fn missing_pool_is_rejected() {
        let replies: Vec<(IntentTag, &[&str])> = REPLY_TABLE
            .iter()
            .copied()
            .filter(|(tag, _)| *tag != IntentTag::Boredom)
            .collect();
        let err = ResponseBook::from_tables(&replies, SUGGESTION_TABLE).unwrap_err();
        assert!(matches!(err, ChatError::MissingReplies(IntentTag::Boredom)));
    }

    #[test]
    fn missing_suggestions_are_rejected() {
        let chips: Vec<(IntentTag, &[&str])> = SUGGESTION_TABLE
            .iter()
            .copied()
            .filter(|(tag, _)| *tag != IntentTag::Neutral)
            .collect();
        let err = ResponseBook::from_tables(REPLY_TABLE, &chips).unwrap_err();
        assert!(matches!(err, ChatError::MissingSuggestions(IntentTag::Neutral)));
    }
}
