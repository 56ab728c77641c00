//! Pluggable tokenizers for turning raw text into token sequences
//!
//! The scoring functions only consume token sequences; these tokenizers are
//! conveniences for callers that start from text.

use crate::error::BleuError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Splits text into an ordered sequence of tokens
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text
    fn tokenize(&self, text: &str) -> Vec<String>;

    /// Short identifier used in configuration and reports
    fn name(&self) -> &'static str;
}

/// Splits on Unicode whitespace only
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceTokenizer;

impl Tokenizer for WhitespaceTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }

    fn name(&self) -> &'static str {
        "whitespace"
    }
}

/// Whitespace and punctuation tokenizer in the style of mteval's 13a rules
///
/// Punctuation and symbols become standalone tokens, except periods and
/// commas inside numbers (`3.14`, `25,000`). Case is preserved.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleWordTokenizer;

struct TokenRules {
    symbols: Regex,
    separator_after_non_digit: Regex,
    separator_before_non_digit: Regex,
    dash_after_digit: Regex,
}

static TOKEN_RULES: OnceLock<TokenRules> = OnceLock::new();

const ENTITIES: [(&str, &str); 4] = [
    ("&quot;", "\""),
    ("&amp;", "&"),
    ("&lt;", "<"),
    ("&gt;", ">"),
];

fn token_rules() -> &'static TokenRules {
    TOKEN_RULES.get_or_init(|| TokenRules {
        symbols: Regex::new(r"([\{-~\[-\x60 -&\(-\+:-@/])").expect("valid symbol pattern"),
        separator_after_non_digit: Regex::new(r"([^0-9])([\.,])")
            .expect("valid separator pattern"),
        separator_before_non_digit: Regex::new(r"([\.,])([^0-9])")
            .expect("valid separator pattern"),
        dash_after_digit: Regex::new(r"([0-9])(-)").expect("valid dash pattern"),
    })
}

impl SimpleWordTokenizer {
    fn normalize(text: &str) -> String {
        let mut normalized = text
            .replace("<skipped>", "")
            .replace("-\n", "")
            .replace('\n', " ");

        for (entity, replacement) in ENTITIES {
            if normalized.contains(entity) {
                normalized = normalized.replace(entity, replacement);
            }
        }

        normalized
    }
}

impl Tokenizer for SimpleWordTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        let rules = token_rules();
        let padded = format!(" {} ", Self::normalize(text));

        let spaced = rules.symbols.replace_all(&padded, " ${1} ");
        let spaced = rules
            .separator_after_non_digit
            .replace_all(&spaced, "${1} ${2} ");
        let spaced = rules
            .separator_before_non_digit
            .replace_all(&spaced, " ${1} ${2}");
        let spaced = rules.dash_after_digit.replace_all(&spaced, "${1} ${2} ");

        spaced.split_whitespace().map(str::to_string).collect()
    }

    fn name(&self) -> &'static str {
        "simple"
    }
}

/// Tokenizer selection for configuration files and the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenizerKind {
    /// [`SimpleWordTokenizer`]
    #[default]
    Simple,
    /// [`WhitespaceTokenizer`]
    Whitespace,
}

impl TokenizerKind {
    /// Every selectable tokenizer
    pub const ALL: [TokenizerKind; 2] = [TokenizerKind::Simple, TokenizerKind::Whitespace];

    /// Instantiate the selected tokenizer
    pub fn build(self) -> Box<dyn Tokenizer> {
        match self {
            TokenizerKind::Simple => Box::new(SimpleWordTokenizer),
            TokenizerKind::Whitespace => Box::new(WhitespaceTokenizer),
        }
    }

    /// Configuration name
    pub fn as_str(self) -> &'static str {
        match self {
            TokenizerKind::Simple => "simple",
            TokenizerKind::Whitespace => "whitespace",
        }
    }

    /// One-line description for listings
    pub fn description(self) -> &'static str {
        match self {
            TokenizerKind::Simple => "whitespace and punctuation splitting (13a style)",
            TokenizerKind::Whitespace => "whitespace splitting only",
        }
    }
}

impl fmt::Display for TokenizerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TokenizerKind {
    type Err = BleuError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "simple" | "13a" => Ok(TokenizerKind::Simple),
            "whitespace" | "space" => Ok(TokenizerKind::Whitespace),
            other => Err(BleuError::Config(format!("unknown tokenizer '{other}'"))),
        }
    }
}
