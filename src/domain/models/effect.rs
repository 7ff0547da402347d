use serde::{Deserialize, Serialize};

/// The closed catalog of cosmetic effect identifiers the dispenser may emit.
///
/// Game clients hard-code handling for these, so the set is versioned here
/// and nowhere else. Adding an effect is a schema migration: extend the enum,
/// extend [`EffectId::ALL`], and the generation constraint picks it up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EffectId {
    None,
    Warmth,
    Cooling,
    SpeedSmall,
    JumpSmall,
    Glow,
    ShrinkVfx,
    GrowVfx,
    Burp,
    Explode,
    // Extended audio/visual/prop catalog
    HeliumVoice,
    DeepVoice,
    Sparkles,
    RainbowTrail,
    PropUmbrella,
    PropTopHat,
}

impl EffectId {
    /// Every catalog member, in wire order.
    pub const ALL: [EffectId; 16] = [
        EffectId::None,
        EffectId::Warmth,
        EffectId::Cooling,
        EffectId::SpeedSmall,
        EffectId::JumpSmall,
        EffectId::Glow,
        EffectId::ShrinkVfx,
        EffectId::GrowVfx,
        EffectId::Burp,
        EffectId::Explode,
        EffectId::HeliumVoice,
        EffectId::DeepVoice,
        EffectId::Sparkles,
        EffectId::RainbowTrail,
        EffectId::PropUmbrella,
        EffectId::PropTopHat,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EffectId::None => "NONE",
            EffectId::Warmth => "WARMTH",
            EffectId::Cooling => "COOLING",
            EffectId::SpeedSmall => "SPEED_SMALL",
            EffectId::JumpSmall => "JUMP_SMALL",
            EffectId::Glow => "GLOW",
            EffectId::ShrinkVfx => "SHRINK_VFX",
            EffectId::GrowVfx => "GROW_VFX",
            EffectId::Burp => "BURP",
            EffectId::Explode => "EXPLODE",
            EffectId::HeliumVoice => "HELIUM_VOICE",
            EffectId::DeepVoice => "DEEP_VOICE",
            EffectId::Sparkles => "SPARKLES",
            EffectId::RainbowTrail => "RAINBOW_TRAIL",
            EffectId::PropUmbrella => "PROP_UMBRELLA",
            EffectId::PropTopHat => "PROP_TOP_HAT",
        }
    }

    /// Resolve a wire identifier to a catalog member. Unknown identifiers
    /// return `None` so callers can coerce to [`EffectId::None`].
    pub fn from_wire(s: &str) -> Option<EffectId> {
        EffectId::ALL.iter().copied().find(|e| e.as_str() == s)
    }
}

impl std::fmt::Display for EffectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bounds for one numeric effect knob.
#[derive(Debug, Clone, Copy)]
pub struct ParamRange {
    pub min: f64,
    pub max: f64,
    pub neutral: f64,
}

impl ParamRange {
    pub const fn new(min: f64, max: f64, neutral: f64) -> Self {
        Self { min, max, neutral }
    }

    pub fn clamp(&self, value: f64) -> f64 {
        if !value.is_finite() {
            return self.neutral;
        }
        value.clamp(self.min, self.max)
    }
}

pub const DURATION_RANGE: ParamRange = ParamRange::new(0.0, 60.0, 0.0);
pub const SPEED_MULTIPLIER_RANGE: ParamRange = ParamRange::new(0.25, 3.0, 1.0);
pub const JUMP_BOOST_RANGE: ParamRange = ParamRange::new(0.0, 50.0, 0.0);
pub const GLOW_BRIGHTNESS_RANGE: ParamRange = ParamRange::new(0.0, 10.0, 0.0);
pub const POWER_RANGE: ParamRange = ParamRange::new(0.0, 100.0, 0.0);
pub const RADIUS_RANGE: ParamRange = ParamRange::new(0.0, 30.0, 0.0);

/// Numeric knobs an effect may carry. Every knob is declared with a default
/// so providers that require exhaustive schemas can emit the whole object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectParams {
    #[serde(default)]
    pub duration: f64,
    #[serde(default = "default_speed_multiplier")]
    pub speed_multiplier: f64,
    #[serde(default)]
    pub jump_boost: f64,
    #[serde(default)]
    pub glow_brightness: f64,
    #[serde(default)]
    pub power: f64,
    #[serde(default)]
    pub radius: f64,
}

fn default_speed_multiplier() -> f64 {
    SPEED_MULTIPLIER_RANGE.neutral
}

impl EffectParams {
    /// The all-neutral object used for `NONE` effects and refusals.
    pub fn neutral() -> Self {
        Self {
            duration: DURATION_RANGE.neutral,
            speed_multiplier: SPEED_MULTIPLIER_RANGE.neutral,
            jump_boost: JUMP_BOOST_RANGE.neutral,
            glow_brightness: GLOW_BRIGHTNESS_RANGE.neutral,
            power: POWER_RANGE.neutral,
            radius: RADIUS_RANGE.neutral,
        }
    }

    /// Clamp every knob into its declared range.
    pub fn clamped(&self) -> Self {
        Self {
            duration: DURATION_RANGE.clamp(self.duration),
            speed_multiplier: SPEED_MULTIPLIER_RANGE.clamp(self.speed_multiplier),
            jump_boost: JUMP_BOOST_RANGE.clamp(self.jump_boost),
            glow_brightness: GLOW_BRIGHTNESS_RANGE.clamp(self.glow_brightness),
            power: POWER_RANGE.clamp(self.power),
            radius: RADIUS_RANGE.clamp(self.radius),
        }
    }

    pub fn is_neutral(&self) -> bool {
        *self == Self::neutral()
    }
}

impl Default for EffectParams {
    fn default() -> Self {
        Self::neutral()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effect_wire_names_round_trip() {
        for effect in EffectId::ALL {
            assert_eq!(EffectId::from_wire(effect.as_str()), Some(effect));
        }
    }

    #[test]
    fn test_unknown_wire_name_is_rejected() {
        assert_eq!(EffectId::from_wire("TELEPORT"), None);
        assert_eq!(EffectId::from_wire("none"), None);
    }

    #[test]
    fn test_serde_uses_screaming_snake_case() {
        let json = serde_json::to_string(&EffectId::SpeedSmall).unwrap();
        assert_eq!(json, "\"SPEED_SMALL\"");

        let parsed: EffectId = serde_json::from_str("\"PROP_TOP_HAT\"").unwrap();
        assert_eq!(parsed, EffectId::PropTopHat);
    }

    #[test]
    fn test_params_clamp_into_declared_ranges() {
        let params = EffectParams {
            duration: 400.0,
            speed_multiplier: 0.0,
            jump_boost: -5.0,
            glow_brightness: 11.0,
            power: 250.0,
            radius: 30.0,
        };

        let clamped = params.clamped();
        assert_eq!(clamped.duration, 60.0);
        assert_eq!(clamped.speed_multiplier, 0.25);
        assert_eq!(clamped.jump_boost, 0.0);
        assert_eq!(clamped.glow_brightness, 10.0);
        assert_eq!(clamped.power, 100.0);
        assert_eq!(clamped.radius, 30.0);
    }

    #[test]
    fn test_non_finite_params_reset_to_neutral() {
        let params = EffectParams {
            duration: f64::NAN,
            speed_multiplier: f64::INFINITY,
            ..EffectParams::neutral()
        };

        let clamped = params.clamped();
        assert_eq!(clamped.duration, 0.0);
        assert_eq!(clamped.speed_multiplier, 1.0);
    }

    #[test]
    fn test_neutral_is_clamp_fixed_point() {
        let neutral = EffectParams::neutral();
        assert_eq!(neutral.clamped(), neutral);
        assert!(neutral.is_neutral());
    }
}
