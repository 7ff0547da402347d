//! Field-by-field repair of candidate objects onto the response schema.
//!
//! The generator is not under this system's control, so this stage accepts
//! any malformed-but-well-typed-enough object and repairs it instead of
//! erroring. Invalid values are replaced by documented defaults, numeric
//! knobs are clamped, strings are truncated. The only wholesale replacement
//! is a candidate with no usable `effectId`, which becomes the generic
//! fallback drink.

use serde_json::Value;
use tracing::debug;

use super::fallback;
use super::models::{
    is_color_hex, truncate_chars, Container, DrinkResponse, EffectId, EffectParams, ParamRange,
    Temperature, Visual, DEFAULT_COLOR_HEX, DEFAULT_MESSAGE, DURATION_RANGE,
    GLOW_BRIGHTNESS_RANGE, JUMP_BOOST_RANGE, MAX_DISPLAY_NAME_CHARS, MAX_MESSAGE_CHARS,
    MAX_TASTE_NOTES, MAX_TASTE_NOTE_CHARS, POWER_RANGE, RADIUS_RANGE, SPEED_MULTIPLIER_RANGE,
};

/// Produce a guaranteed-valid [`DrinkResponse`] from whatever the extractor
/// yielded. `query` supplies the naming fallback.
pub fn sanitize(candidate: Option<&Value>, query: &str) -> DrinkResponse {
    let Some(candidate) = candidate else {
        return fallback::generic_ok(query);
    };

    let Some(object) = candidate.as_object() else {
        debug!("sanitize: candidate is not an object, using generic fallback");
        return fallback::generic_ok(query);
    };

    // No usable effectId at all means the generator did not follow the
    // schema even loosely; the whole candidate is replaced.
    let effect_value = match object.get("effectId") {
        None | Some(Value::Null) => {
            debug!("sanitize: candidate has no effectId, using generic fallback");
            return fallback::generic_ok(query);
        }
        Some(v) => v,
    };

    // Unknown or mistyped identifiers coerce to NONE with neutral params.
    let (effect_id, coerced) = match effect_value.as_str().and_then(EffectId::from_wire) {
        Some(effect) => (effect, false),
        None => {
            debug!("sanitize: unknown effectId {effect_value}, coercing to NONE");
            (EffectId::None, true)
        }
    };

    let display_name = match object.get("displayName").and_then(Value::as_str) {
        Some(name) if !name.trim().is_empty() => {
            truncate_chars(name.trim(), MAX_DISPLAY_NAME_CHARS)
        }
        _ => fallback::generic_ok(query).display_name,
    };

    let color_hex = match object.get("colorHex").and_then(Value::as_str) {
        Some(hex) if is_color_hex(hex) => hex.to_string(),
        _ => DEFAULT_COLOR_HEX.to_string(),
    };

    let temperature = object
        .get("temperature")
        .and_then(Value::as_str)
        .and_then(Temperature::from_wire)
        .unwrap_or_default();

    let container = object
        .get("container")
        .and_then(Value::as_str)
        .and_then(Container::from_wire)
        .unwrap_or_default();

    let visual = sanitize_visual(object.get("visual"));
    let taste_notes = sanitize_taste_notes(object.get("tasteNotes"));

    let effect_params = if coerced {
        Some(EffectParams::neutral())
    } else {
        sanitize_params(object.get("effectParams"))
    };

    let message = match object.get("message").and_then(Value::as_str) {
        Some(text) if !text.trim().is_empty() => truncate_chars(text.trim(), MAX_MESSAGE_CHARS),
        _ => DEFAULT_MESSAGE.to_string(),
    };

    DrinkResponse {
        display_name,
        color_hex,
        temperature,
        container,
        visual,
        taste_notes,
        effect_id,
        effect_params,
        message,
    }
}

fn sanitize_visual(value: Option<&Value>) -> Visual {
    let Some(object) = value.and_then(Value::as_object) else {
        return Visual::default();
    };

    let flag = |key: &str| object.get(key).and_then(Value::as_bool).unwrap_or(false);
    Visual::new(flag("foam"), flag("bubbles"), flag("steam"))
}

fn sanitize_taste_notes(value: Option<&Value>) -> Vec<String> {
    let Some(entries) = value.and_then(Value::as_array) else {
        return vec![];
    };

    entries
        .iter()
        .filter_map(Value::as_str)
        .map(str::trim)
        .filter(|note| !note.is_empty())
        .map(|note| truncate_chars(note, MAX_TASTE_NOTE_CHARS))
        .take(MAX_TASTE_NOTES)
        .collect()
}

fn sanitize_params(value: Option<&Value>) -> Option<EffectParams> {
    let object = value.and_then(Value::as_object)?;

    let knob = |key: &str, range: ParamRange| {
        object
            .get(key)
            .and_then(Value::as_f64)
            .map(|v| range.clamp(v))
            .unwrap_or(range.neutral)
    };

    Some(EffectParams {
        duration: knob("duration", DURATION_RANGE),
        speed_multiplier: knob("speedMultiplier", SPEED_MULTIPLIER_RANGE),
        jump_boost: knob("jumpBoost", JUMP_BOOST_RANGE),
        glow_brightness: knob("glowBrightness", GLOW_BRIGHTNESS_RANGE),
        power: knob("power", POWER_RANGE),
        radius: knob("radius", RADIUS_RANGE),
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn valid_candidate() -> Value {
        json!({
            "displayName": "Glowberry Fizz",
            "colorHex": "#33FF99",
            "temperature": "cool",
            "container": "glass",
            "visual": {"foam": false, "bubbles": true, "steam": false},
            "tasteNotes": ["berry", "fizzy"],
            "effectId": "GLOW",
            "effectParams": {
                "duration": 20.0,
                "speedMultiplier": 1.0,
                "jumpBoost": 0.0,
                "glowBrightness": 5.0,
                "power": 0.0,
                "radius": 0.0
            },
            "message": "It glows faintly in the dark."
        })
    }

    #[test]
    fn test_missing_candidate_yields_generic_fallback() {
        let result = sanitize(None, "lemonade");
        assert_eq!(result, fallback::generic_ok("lemonade"));
    }

    #[test]
    fn test_missing_effect_id_yields_generic_fallback() {
        let candidate = json!({"displayName": "Thing"});
        let result = sanitize(Some(&candidate), "soda");
        assert_eq!(result, fallback::generic_ok("soda"));
    }

    #[test]
    fn test_null_effect_id_yields_generic_fallback() {
        let candidate = json!({"effectId": null});
        let result = sanitize(Some(&candidate), "soda");
        assert_eq!(result, fallback::generic_ok("soda"));
    }

    #[test]
    fn test_non_object_candidate_yields_generic_fallback() {
        let candidate = json!("just a string");
        let result = sanitize(Some(&candidate), "tea");
        assert_eq!(result, fallback::generic_ok("tea"));
    }

    #[test]
    fn test_valid_object_round_trips_unchanged() {
        let candidate = valid_candidate();
        let result = sanitize(Some(&candidate), "glowberry fizz");

        assert_eq!(serde_json::to_value(&result).unwrap(), candidate);
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        let candidates = [
            valid_candidate(),
            json!({"effectId": "WARP_DRIVE", "displayName": 42}),
            json!({"effectId": "EXPLODE", "effectParams": {"power": 9999.0}}),
            json!({"effectId": "BURP", "colorHex": "purple", "temperature": "lava"}),
        ];

        for candidate in candidates {
            let once = sanitize(Some(&candidate), "fizz");
            let reparsed = serde_json::to_value(&once).unwrap();
            let twice = sanitize(Some(&reparsed), "fizz");
            assert_eq!(once, twice, "candidate: {candidate}");
        }
    }

    #[test]
    fn test_unknown_effect_coerces_to_none_with_neutral_params() {
        let candidate = json!({
            "displayName": "Phase Shifter",
            "effectId": "PHASE_SHIFT",
            "effectParams": {"power": 80.0}
        });

        let result = sanitize(Some(&candidate), "phase shifter");
        assert_eq!(result.effect_id, EffectId::None);
        assert_eq!(result.effect_params, Some(EffectParams::neutral()));
        assert_eq!(result.display_name, "Phase Shifter");
    }

    #[test]
    fn test_mistyped_effect_id_coerces_to_none() {
        let candidate = json!({"effectId": 7});
        let result = sanitize(Some(&candidate), "fizz");
        assert_eq!(result.effect_id, EffectId::None);
    }

    #[test]
    fn test_out_of_range_params_are_clamped() {
        let candidate = json!({
            "effectId": "EXPLODE",
            "effectParams": {"power": 9000.0, "radius": -3.0, "speedMultiplier": 0.01}
        });

        let result = sanitize(Some(&candidate), "boom juice");
        let params = result.effect_params.unwrap();
        assert_eq!(params.power, 100.0);
        assert_eq!(params.radius, 0.0);
        assert_eq!(params.speed_multiplier, 0.25);
    }

    #[test]
    fn test_malformed_fields_fall_back_to_defaults() {
        let candidate = json!({
            "effectId": "WARMTH",
            "displayName": "",
            "colorHex": "not-a-color",
            "temperature": "scalding",
            "container": "bathtub",
            "visual": "bubbly",
            "tasteNotes": "sweet",
            "message": 12
        });

        let result = sanitize(Some(&candidate), "cocoa");
        assert_eq!(result.display_name, "cocoa");
        assert_eq!(result.color_hex, DEFAULT_COLOR_HEX);
        assert_eq!(result.temperature, Temperature::Ambient);
        assert_eq!(result.container, Container::PaperCup);
        assert_eq!(result.visual, Visual::default());
        assert!(result.taste_notes.is_empty());
        assert_eq!(result.message, DEFAULT_MESSAGE);
        assert_eq!(result.effect_id, EffectId::Warmth);
    }

    #[test]
    fn test_strings_are_truncated_not_rejected() {
        let candidate = json!({
            "effectId": "BURP",
            "displayName": "b".repeat(100),
            "tasteNotes": ["x".repeat(100), "ok", "three", "dropped"],
            "message": "m".repeat(500)
        });

        let result = sanitize(Some(&candidate), "soda");
        assert_eq!(result.display_name.chars().count(), 40);
        assert_eq!(result.taste_notes.len(), 3);
        assert_eq!(result.taste_notes[0].chars().count(), 40);
        assert_eq!(result.message.chars().count(), 120);
        assert!(result.is_schema_valid());
    }

    #[test]
    fn test_missing_params_object_stays_absent() {
        let candidate = json!({"effectId": "BURP"});
        let result = sanitize(Some(&candidate), "soda");
        assert!(result.effect_params.is_none());
    }

    #[test]
    fn test_non_string_taste_notes_are_dropped() {
        let candidate = json!({
            "effectId": "NONE",
            "tasteNotes": ["mild", 3, null, {"a": 1}, "sweet"]
        });

        let result = sanitize(Some(&candidate), "soda");
        assert_eq!(result.taste_notes, vec!["mild".to_string(), "sweet".to_string()]);
    }
}
