//! The fallback ladder: statically-defined safe responses substituted when a
//! pipeline stage fails, times out, or short-circuits.
//!
//! Tier selection is by failure cause, not severity. Safety short-circuits
//! resolve to a refusal-flavored object, infrastructure and parsing failures
//! to a neutral one, and only truly unexpected errors to the hard failsafe.

use super::models::{
    truncate_chars, Container, DrinkResponse, EffectId, EffectParams, Temperature, Visual,
    DEFAULT_COLOR_HEX, MAX_DISPLAY_NAME_CHARS,
};

const REFUSAL_GREY: &str = "#9E9E9E";
const COOLANT_BLUE: &str = "#7FDBFF";

/// Returned when the local pre-filter trips. The moderation gate and the
/// generator are never consulted.
pub fn deny() -> DrinkResponse {
    DrinkResponse {
        display_name: "Dispenser Refuses".to_string(),
        color_hex: REFUSAL_GREY.to_string(),
        temperature: Temperature::Ambient,
        container: Container::PaperCup,
        visual: Visual::default(),
        taste_notes: vec![],
        effect_id: EffectId::None,
        effect_params: Some(EffectParams::neutral()),
        message: "The machine buzzes once and prints a small tag: REQUEST DENIED.".to_string(),
    }
}

/// Returned when the moderation gate flags the request. Same shape and
/// intent as [`deny`], used one stage later.
pub fn refusal() -> DrinkResponse {
    DrinkResponse {
        display_name: "Dispenser Refuses".to_string(),
        color_hex: REFUSAL_GREY.to_string(),
        temperature: Temperature::Ambient,
        container: Container::PaperCup,
        visual: Visual::default(),
        taste_notes: vec![],
        effect_id: EffectId::None,
        effect_params: Some(EffectParams::neutral()),
        message: "The machine clicks, whirs, and refuses to dispense that.".to_string(),
    }
}

/// Returned when generation or extraction fails for non-safety reasons.
/// From the client's perspective this is an unusual-but-valid drink, named
/// after the original query when one is available.
pub fn generic_ok(query: &str) -> DrinkResponse {
    let trimmed = query.trim();
    let display_name = if trimmed.is_empty() {
        "Mystery Drink".to_string()
    } else {
        truncate_chars(trimmed, MAX_DISPLAY_NAME_CHARS)
    };

    DrinkResponse {
        display_name,
        color_hex: DEFAULT_COLOR_HEX.to_string(),
        temperature: Temperature::Ambient,
        container: Container::PaperCup,
        visual: Visual::new(false, true, false),
        taste_notes: vec!["mild".to_string()],
        effect_id: EffectId::None,
        effect_params: None,
        message: "A nondescript drink dispenses with a soft hum.".to_string(),
    }
}

/// Returned when an unexpected error escapes every other handler, including
/// rate-limit rejection. A fixed coolant so the client still renders a drink.
pub fn hard_failsafe() -> DrinkResponse {
    DrinkResponse {
        display_name: "Emergency Coolant".to_string(),
        color_hex: COOLANT_BLUE.to_string(),
        temperature: Temperature::Cold,
        container: Container::MetalCup,
        visual: Visual::new(false, false, true),
        taste_notes: vec!["metallic".to_string()],
        effect_id: EffectId::Cooling,
        effect_params: Some(EffectParams {
            duration: 10.0,
            ..EffectParams::neutral()
        }),
        message: "The machine shudders and dispenses emergency coolant.".to_string(),
    }
}
