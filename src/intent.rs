//! Keyword intent classifier
//!
//! Free text is normalized and matched against a fixed table of trigger
//! phrases. The match covering the largest share of the normalized input
//! wins; on a tie the intent listed first in the table is kept.


use serde::{Deserialize, Serialize};
use std::fmt;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Classifications below this confidence are treated as "no intent"
pub const CONFIDENCE_THRESHOLD: f64 = 0.25;

/// Coarse category of what the sender wants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Intent {
    Greeting,
    Services,
    Pricing,
    Support,
    Human,
}

impl Intent {
    pub fn as_str(self) -> &'static str {
        match self {
            Intent::Greeting => "GREETING",
            Intent::Services => "SERVICES",
            Intent::Pricing => "PRICING",
            Intent::Support => "SUPPORT",
            Intent::Human => "HUMAN",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trigger phrases per intent, already in normalized form.
/// Table order is the tie-break order.
pub(crate) const INTENT_TRIGGERS: &[(Intent, &[&str])] = &[
    (
        Intent::Greeting,
        &["oi", "ola", "bom dia", "boa tarde", "boa noite"],
    ),
    (
        Intent::Services,
        &[
            "servicos",
            "servico",
            "oferecem",
            "oferece",
            "oferecer",
            "o que voces oferecem",
            "quais servicos",
        ],
    ),
    (
        Intent::Pricing,
        &["preco", "precos", "valor", "valores", "quanto custa"],
    ),
    (Intent::Support, &["suporte", "ajuda", "problema", "erro"]),
    (
        Intent::Human,
        &["humano", "atendente", "pessoa", "falar com alguem"],
    ),
];

/// Outcome of classifying one message
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Classification {
    pub intent: Option<Intent>,
    /// Share of the normalized text explained by the winning phrase, rounded
    /// to two decimals
    pub confidence: f64,
}

impl Classification {
    pub const NONE: Self = Self {
        intent: None,
        confidence: 0.0,
    };

    /// The intent, if the match is strong enough to act on
    pub fn accepted(self) -> Option<Intent> {
        if self.confidence < CONFIDENCE_THRESHOLD {
            None
        } else {
            self.intent
        }
    }
}

/// Lowercase, strip diacritics and punctuation, collapse whitespace.
pub fn normalize(text: &str) -> String {
    let stripped: String = text
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || *c == '_')
        .collect();

    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Classify free text into one of the fixed intents.
#[allow(clippy::cast_precision_loss)] // message lengths are far below f64 precision
pub fn classify(text: &str) -> Classification {
    let normalized = normalize(text);
    if normalized.is_empty() {
        return Classification::NONE;
    }

    let text_len = normalized.chars().count() as f64;
    let mut best = Classification::NONE;

    for (intent, triggers) in INTENT_TRIGGERS {
        for trigger in *triggers {
            if !normalized.contains(trigger) {
                continue;
            }
            let score = trigger.chars().count() as f64 / text_len;
            if score > best.confidence {
                best = Classification {
                    intent: Some(*intent),
                    confidence: score,
                };
            }
        }
    }

    best.confidence = round_to_hundredths(best.confidence);
    best
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}
