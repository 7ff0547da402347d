use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

use super::{EffectId, EffectParams};

/// Maximum length of a client query after trimming; longer input is
/// truncated, never rejected.
pub const MAX_QUERY_CHARS: usize = 50;
pub const MAX_DISPLAY_NAME_CHARS: usize = 40;
pub const MAX_TASTE_NOTES: usize = 3;
pub const MAX_TASTE_NOTE_CHARS: usize = 40;
pub const MAX_MESSAGE_CHARS: usize = 120;

pub const DEFAULT_COLOR_HEX: &str = "#A0C4FF";
pub const DEFAULT_MESSAGE: &str = "Your drink is ready.";

/// A validated, request-scoped drink request. Created at receipt, discarded
/// once the response is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrinkRequest {
    query: String,
}

impl DrinkRequest {
    /// Trim and bound the untrusted client string. Empty input is the only
    /// rejection; overlong input is truncated to [`MAX_QUERY_CHARS`].
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DomainError::invalid_input("Missing query"));
        }

        Ok(Self {
            query: truncate_chars(trimmed, MAX_QUERY_CHARS),
        })
    }

    pub fn query(&self) -> &str {
        &self.query
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Temperature {
    Cold,
    Cool,
    Ambient,
    Warm,
    Hot,
}

impl Temperature {
    pub fn from_wire(s: &str) -> Option<Temperature> {
        match s {
            "cold" => Some(Temperature::Cold),
            "cool" => Some(Temperature::Cool),
            "ambient" => Some(Temperature::Ambient),
            "warm" => Some(Temperature::Warm),
            "hot" => Some(Temperature::Hot),
            _ => None,
        }
    }
}

impl Default for Temperature {
    fn default() -> Self {
        Temperature::Ambient
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Container {
    PaperCup,
    Mug,
    Glass,
    MetalCup,
}

impl Container {
    pub fn from_wire(s: &str) -> Option<Container> {
        match s {
            "paper_cup" => Some(Container::PaperCup),
            "mug" => Some(Container::Mug),
            "glass" => Some(Container::Glass),
            "metal_cup" => Some(Container::MetalCup),
            _ => None,
        }
    }
}

impl Default for Container {
    fn default() -> Self {
        Container::PaperCup
    }
}

/// Cosmetic liquid rendering hints. All three flags are required on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Visual {
    pub foam: bool,
    pub bubbles: bool,
    pub steam: bool,
}

impl Visual {
    pub fn new(foam: bool, bubbles: bool, steam: bool) -> Self {
        Self {
            foam,
            bubbles,
            steam,
        }
    }
}

/// The sole response contract returned to game clients.
///
/// Constructed fresh per request and never mutated after being sent. Every
/// instance leaving the system satisfies the full schema; no partially-valid
/// object is ever emitted, no matter which pipeline stage produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrinkResponse {
    pub display_name: String,
    pub color_hex: String,
    pub temperature: Temperature,
    pub container: Container,
    pub visual: Visual,
    pub taste_notes: Vec<String>,
    pub effect_id: EffectId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effect_params: Option<EffectParams>,
    pub message: String,
}

impl DrinkResponse {
    /// Check the full schema. Fallback constructors and the sanitizer are
    /// expected to keep this trivially true; it exists for tests and debug
    /// assertions, not as a runtime gate.
    pub fn is_schema_valid(&self) -> bool {
        char_len(&self.display_name) <= MAX_DISPLAY_NAME_CHARS
            && is_color_hex(&self.color_hex)
            && self.taste_notes.len() <= MAX_TASTE_NOTES
            && self
                .taste_notes
                .iter()
                .all(|n| char_len(n) <= MAX_TASTE_NOTE_CHARS)
            && char_len(&self.message) <= MAX_MESSAGE_CHARS
            && self
                .effect_params
                .as_ref()
                .is_none_or(|p| p.clamped() == *p)
    }
}

/// `#RRGGBB` with exactly six hex digits.
pub fn is_color_hex(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == 7 && bytes[0] == b'#' && bytes[1..].iter().all(u8::is_ascii_hexdigit)
}

/// Truncate to at most `max` characters. Operates on char boundaries so
/// multi-byte input never splits mid-codepoint.
pub fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}
