//! # Pontuador Léxico de Valências
//!
//! Implementação padrão de [`SentimentScorer`]: cada palavra conhecida tem
//! uma **valência** em `[-4, 4]`, ajustada pelo contexto local antes da soma.
//!
//! ## Regras de Contexto
//!
//! ```text
//! "so sad"          → booster: |valência| += 0.293 (decai com a distância)
//! "not happy"       → negação nas 3 palavras anteriores: valência × -0.74
//! "great!!!"        → cada '!' (máx. 4) soma 0.292 na direção da soma
//! ```
//!
//! ## Normalização
//!
//! O compound é `s / √(s² + 15)`, onde `s` é a soma das valências, e tende
//! a ±1 conforme o texto acumula evidência. As proporções `pos`, `neu` e
//! `neg` são calculadas sobre a massa de cada polaridade.

use std::collections::HashMap;

use regex::Regex;

use super::{PolarityScores, SentimentScorer};

/// Constante de normalização do compound.
const NORMALIZATION_ALPHA: f64 = 15.0;

/// Incremento de um booster imediatamente anterior à palavra.
const BOOSTER_INCREMENT: f64 = 0.293;

/// Fator aplicado a uma palavra negada.
const NEGATION_SCALAR: f64 = -0.74;

/// Ênfase por ponto de exclamação.
const EXCLAMATION_INCREMENT: f64 = 0.292;

/// Máximo de exclamações que contam para a ênfase.
const MAX_EXCLAMATIONS: usize = 4;

/// Janela de palavras anteriores examinadas para boosters e negações.
const CONTEXT_WINDOW: usize = 3;

/// Valências por palavra.
const LEXICON: &[(&str, f64)] = &[
    // positivas
    ("love", 3.2),
    ("loved", 2.9),
    ("lovely", 2.8),
    ("like", 2.0),
    ("happy", 2.7),
    ("glad", 2.0),
    ("great", 3.1),
    ("good", 1.9),
    ("awesome", 3.1),
    ("amazing", 2.8),
    ("wonderful", 2.7),
    ("wonderfully", 2.7),
    ("excellent", 3.2),
    ("fantastic", 2.6),
    ("nice", 1.8),
    ("fun", 2.3),
    ("joy", 2.8),
    ("excited", 2.2),
    ("thrilled", 2.6),
    ("delighted", 2.9),
    ("grateful", 2.0),
    ("thankful", 2.7),
    ("thanks", 1.9),
    ("thank", 1.5),
    ("beautiful", 2.9),
    ("best", 3.2),
    ("better", 1.9),
    ("calm", 1.3),
    ("relaxed", 2.2),
    ("proud", 2.1),
    ("hope", 1.9),
    ("hopeful", 2.3),
    ("win", 2.8),
    ("won", 2.7),
    ("success", 2.7),
    ("perfect", 2.7),
    ("brilliant", 2.8),
    ("cool", 1.3),
    ("enjoy", 2.2),
    ("enjoyed", 2.3),
    ("yay", 2.4),
    ("peaceful", 2.2),
    ("confident", 2.2),
    ("helpful", 1.8),
    ("kind", 2.4),
    ("smile", 1.5),
    ("laugh", 2.6),
    ("care", 2.2),
    ("support", 1.7),
    ("safe", 1.9),
    ("wow", 2.8),
    ("okay", 0.9),
    ("ok", 1.2),
    ("fine", 0.8),
    // negativas
    ("sad", -2.1),
    ("unhappy", -1.8),
    ("depressed", -2.3),
    ("lonely", -2.0),
    ("miserable", -2.2),
    ("cry", -2.1),
    ("crying", -2.1),
    ("cried", -1.6),
    ("hate", -2.7),
    ("angry", -2.3),
    ("furious", -2.7),
    ("mad", -2.2),
    ("annoyed", -1.6),
    ("irritated", -2.0),
    ("upset", -1.6),
    ("terrible", -2.1),
    ("awful", -2.0),
    ("horrible", -2.5),
    ("bad", -2.5),
    ("worst", -3.1),
    ("worse", -2.1),
    ("anxious", -1.0),
    ("anxiety", -0.7),
    ("nervous", -1.1),
    ("worried", -1.2),
    ("worry", -1.9),
    ("scared", -2.2),
    ("afraid", -2.0),
    ("fear", -2.2),
    ("panic", -2.3),
    ("stress", -1.8),
    ("stressed", -1.4),
    ("stressful", -2.3),
    ("overwhelmed", -1.5),
    ("tired", -1.9),
    ("exhausted", -1.5),
    ("bored", -1.1),
    ("boring", -1.3),
    ("lost", -1.3),
    ("fail", -2.5),
    ("failed", -2.3),
    ("failing", -2.2),
    ("broken", -2.1),
    ("hurt", -2.4),
    ("pain", -2.3),
    ("problem", -1.7),
    ("problems", -1.7),
    ("difficult", -1.5),
    ("sick", -1.8),
    ("stupid", -2.4),
    ("useless", -1.8),
    ("hopeless", -2.0),
    ("heartbroken", -2.9),
    ("disappointed", -1.9),
    ("frustrated", -2.4),
    ("frustrating", -1.9),
    ("wrong", -2.1),
    ("sucks", -1.5),
    ("guilty", -1.8),
    ("ashamed", -2.1),
    ("grief", -2.2),
    ("lose", -1.6),
    ("losing", -1.6),
    ("trouble", -1.7),
    ("crashed", -1.7),
];

/// Palavras que intensificam (positivo) ou atenuam (negativo) a próxima valência.
const BOOSTERS: &[(&str, f64)] = &[
    ("very", BOOSTER_INCREMENT),
    ("so", BOOSTER_INCREMENT),
    ("really", BOOSTER_INCREMENT),
    ("extremely", BOOSTER_INCREMENT),
    ("incredibly", BOOSTER_INCREMENT),
    ("totally", BOOSTER_INCREMENT),
    ("absolutely", BOOSTER_INCREMENT),
    ("super", BOOSTER_INCREMENT),
    ("too", BOOSTER_INCREMENT),
    ("slightly", -BOOSTER_INCREMENT),
    ("somewhat", -BOOSTER_INCREMENT),
    ("barely", -BOOSTER_INCREMENT),
];

const NEGATIONS: &[&str] = &[
    "not", "no", "never", "none", "nobody", "nothing", "neither", "nor", "cannot", "without",
];

/// Pontuador léxico, stateless após construção, seguro entre threads.
pub struct LexiconScorer {
    valences: HashMap<&'static str, f64>,
    boosters: HashMap<&'static str, f64>,
    token_re: Regex,
}

impl LexiconScorer {
    /// Constrói o pontuador com o léxico embutido.
    ///
    /// # Erros
    ///
    /// Falha apenas se a regex de tokenização for inválida.
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            valences: LEXICON.iter().copied().collect(),
            boosters: BOOSTERS.iter().copied().collect(),
            token_re: Regex::new(r"[a-z]+(?:'[a-z]+)?|!")?,
        })
    }

    fn is_negation(token: &str) -> bool {
        NEGATIONS.contains(&token) || token.ends_with("n't")
    }

    /// Valência da palavra na posição `i`, já ajustada pelo contexto.
    fn contextual_valence(&self, words: &[&str], i: usize) -> f64 {
        let Some(&base) = self.valences.get(words[i]) else {
            return 0.0;
        };
        let mut valence = base;
        let mut negated = false;

        for distance in 1..=CONTEXT_WINDOW.min(i) {
            let prev = words[i - distance];
            if let Some(&boost) = self.boosters.get(prev) {
                // o efeito do booster decai 5% por palavra de distância
                let decay = 1.0 - 0.05 * (distance - 1) as f64;
                valence += boost * decay * base.signum();
            }
            if Self::is_negation(prev) {
                negated = true;
            }
        }

        if negated {
            valence *= NEGATION_SCALAR;
        }
        valence
    }
}

impl SentimentScorer for LexiconScorer {
    fn score(&self, text: &str) -> PolarityScores {
        let lowered = text.to_lowercase().replace('\u{2019}', "'");
        let mut words = Vec::new();
        let mut exclamations = 0usize;
        for m in self.token_re.find_iter(&lowered) {
            if m.as_str() == "!" {
                exclamations += 1;
            } else {
                words.push(m.as_str());
            }
        }

        if words.is_empty() {
            return PolarityScores::default();
        }

        let valences: Vec<f64> = (0..words.len())
            .map(|i| self.contextual_valence(&words, i))
            .collect();

        let sum: f64 = valences.iter().sum();
        let emphasis = exclamations.min(MAX_EXCLAMATIONS) as f64 * EXCLAMATION_INCREMENT;

        let adjusted = if sum > 0.0 {
            sum + emphasis
        } else if sum < 0.0 {
            sum - emphasis
        } else {
            sum
        };
        let compound = (adjusted / (adjusted * adjusted + NORMALIZATION_ALPHA).sqrt()).clamp(-1.0, 1.0);

        let mut pos_sum = 0.0;
        let mut neg_sum = 0.0;
        let mut neu_count = 0.0;
        for v in &valences {
            if *v > 0.0 {
                pos_sum += v + 1.0;
            } else if *v < 0.0 {
                neg_sum += v - 1.0;
            } else {
                neu_count += 1.0;
            }
        }
        if pos_sum > neg_sum.abs() {
            pos_sum += emphasis;
        } else if pos_sum < neg_sum.abs() {
            neg_sum -= emphasis;
        }

        let total = pos_sum + neg_sum.abs() + neu_count;
        if total == 0.0 {
            return PolarityScores::default();
        }

        PolarityScores {
            pos: round_to(pos_sum / total, 3),
            neu: round_to(neu_count / total, 3),
            neg: round_to(neg_sum.abs() / total, 3),
            compound: round_to(compound, 4),
        }
    }
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scorer() -> LexiconScorer {
        LexiconScorer::new().unwrap()
    }

    #[test]
    fn no_sentiment_words_is_zero_compound() {
        let s = scorer().score("I have finals tomorrow");
        assert_eq!(s.compound, 0.0);
        assert_eq!(s.neu, 1.0);
    }

    #[test]
    fn punctuation_only_is_all_zero() {
        assert_eq!(scorer().score("?? ..."), PolarityScores::default());
    }

    #[test]
    fn positive_review_is_positive() {
        let s = scorer().score("I absolutely love this product! It works wonderfully.");
        assert!(s.compound >= 0.5, "compound = {}", s.compound);
        assert!(s.pos > s.neg);
    }

    #[test]
    fn negation_flips_polarity() {
        let sc = scorer();
        let plain = sc.score("I am happy");
        let negated = sc.score("I am not happy");
        assert!(plain.compound > 0.0);
        assert!(negated.compound < 0.0);
    }

    #[test]
    fn contraction_negation_flips_polarity() {
        assert!(scorer().score("I don't feel good").compound < 0.0);
    }

    #[test]
    fn booster_increases_magnitude() {
        let sc = scorer();
        let plain = sc.score("I am sad");
        let boosted = sc.score("I am so sad");
        assert!(boosted.compound < plain.compound);
    }

    #[test]
    fn exclamations_add_emphasis() {
        let sc = scorer();
        assert!(sc.score("great!!!").compound > sc.score("great").compound);
    }

    #[test]
    fn mild_exam_worry_stays_above_sadness_threshold() {
        let s = scorer().score("I have finals and I'm so anxious");
        assert!(s.compound < 0.0);
        assert!(s.compound > -0.4, "compound = {}", s.compound);
    }

    #[test]
    fn proportions_sum_to_one() {
        let s = scorer().score("good day but a terrible night");
        assert!((s.pos + s.neu + s.neg - 1.0).abs() < 0.01);
    }
}
