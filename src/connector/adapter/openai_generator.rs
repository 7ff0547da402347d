use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::warn;

use crate::application::DrinkGenerator;
use crate::domain::{DomainError, EffectId};

const RESPONSES_PATH: &str = "/v1/responses";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
const MAX_OUTPUT_TOKENS: u32 = 512;

/// Behavioral policy for the dispenser persona. The schema constrains the
/// shape; this constrains the content.
const SYSTEM_PROMPT: &str = "\
You are SCP-294, a coin-operated drink dispenser in a game. A player has \
typed a short free-text drink request. Produce one JSON object describing \
the dispensed drink.

Rules:
1. Choose exactly one effectId from the declared catalog. Never invent \
   identifiers outside it.
2. Requests for real intoxicants, drugs, bodily fluids, or hazardous \
   chemicals get effectId NONE and an in-universe refusal: the machine \
   dispenses a bland substitute and the message explains the refusal in \
   character.
3. Keep displayName, tasteNotes, and message playful but family-friendly. \
   No real-world brand names.
4. EXPLODE is cosmetic slapstick affecting only the requesting player: \
   harmless confetti-burst flavor, never destruction.
5. Pick colors and visual flags that fit the drink. Keep effectParams \
   modest and inside their declared ranges.";

#[derive(serde::Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    instructions: &'a str,
    input: &'a str,
    max_output_tokens: u32,
    text: Value,
}

/// HTTP client for the OpenAI Responses API asking for one schema-constrained
/// drink object.
///
/// Implements [`DrinkGenerator`]. Returns the provider's raw response
/// envelope so the extractor can tolerate envelope drift across provider
/// versions. A single attempt per call; the caller owns the timeout race.
pub struct OpenAiGenerator {
    client: reqwest::Client,
    api_key: String,
    model: String,
    url: String,
}

impl OpenAiGenerator {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        let base: String = base_url.into();
        let url = format!("{}{}", base.trim_end_matches('/'), RESPONSES_PATH);
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            model: model.into(),
            url,
        }
    }

    /// JSON schema for the structured-output constraint. Enum lists are
    /// derived from the effect catalog so catalog growth propagates here
    /// without edits.
    fn response_schema() -> Value {
        let effect_ids: Vec<&str> = EffectId::ALL.iter().map(|e| e.as_str()).collect();

        json!({
            "type": "object",
            "additionalProperties": false,
            "required": [
                "displayName", "colorHex", "temperature", "container",
                "visual", "tasteNotes", "effectId", "effectParams", "message"
            ],
            "properties": {
                "displayName": {"type": "string", "maxLength": 40},
                "colorHex": {"type": "string", "pattern": "^#[0-9A-Fa-f]{6}$"},
                "temperature": {"type": "string", "enum": ["cold", "cool", "ambient", "warm", "hot"]},
                "container": {"type": "string", "enum": ["paper_cup", "mug", "glass", "metal_cup"]},
                "visual": {
                    "type": "object",
                    "additionalProperties": false,
                    "required": ["foam", "bubbles", "steam"],
                    "properties": {
                        "foam": {"type": "boolean"},
                        "bubbles": {"type": "boolean"},
                        "steam": {"type": "boolean"}
                    }
                },
                "tasteNotes": {
                    "type": "array",
                    "items": {"type": "string", "maxLength": 40},
                    "maxItems": 3
                },
                "effectId": {"type": "string", "enum": effect_ids},
                "effectParams": {
                    "type": "object",
                    "additionalProperties": false,
                    "required": [
                        "duration", "speedMultiplier", "jumpBoost",
                        "glowBrightness", "power", "radius"
                    ],
                    "properties": {
                        "duration": {"type": "number", "minimum": 0.0, "maximum": 60.0},
                        "speedMultiplier": {"type": "number", "minimum": 0.25, "maximum": 3.0},
                        "jumpBoost": {"type": "number", "minimum": 0.0, "maximum": 50.0},
                        "glowBrightness": {"type": "number", "minimum": 0.0, "maximum": 10.0},
                        "power": {"type": "number", "minimum": 0.0, "maximum": 100.0},
                        "radius": {"type": "number", "minimum": 0.0, "maximum": 30.0}
                    }
                },
                "message": {"type": "string", "maxLength": 120}
            }
        })
    }

    fn text_format() -> Value {
        json!({
            "format": {
                "type": "json_schema",
                "name": "drink_response",
                "strict": true,
                "schema": Self::response_schema()
            }
        })
    }
}

#[async_trait]
impl DrinkGenerator for OpenAiGenerator {
    async fn generate(&self, query: &str) -> Result<Value, DomainError> {
        let request = ApiRequest {
            model: &self.model,
            instructions: SYSTEM_PROMPT,
            input: query,
            max_output_tokens: MAX_OUTPUT_TOKENS,
            text: Self::text_format(),
        };

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| DomainError::generation(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!("OpenAiGenerator: API returned {status}: {body}");
            return Err(DomainError::generation(format!("API returned {status}")));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| DomainError::parse(format!("failed to read envelope: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_enumerates_full_effect_catalog() {
        let schema = OpenAiGenerator::response_schema();
        let effects = schema["properties"]["effectId"]["enum"].as_array().unwrap();

        assert_eq!(effects.len(), EffectId::ALL.len());
        assert!(effects.iter().any(|e| *e == "NONE"));
        assert!(effects.iter().any(|e| *e == "EXPLODE"));
        assert!(effects.iter().any(|e| *e == "PROP_TOP_HAT"));
    }

    #[test]
    fn test_schema_declares_every_param_with_bounds() {
        let schema = OpenAiGenerator::response_schema();
        let params = &schema["properties"]["effectParams"];

        let required = params["required"].as_array().unwrap();
        assert_eq!(required.len(), 6);
        assert_eq!(params["properties"]["power"]["maximum"], 100.0);
        assert_eq!(params["properties"]["speedMultiplier"]["minimum"], 0.25);
    }

    #[test]
    fn test_text_format_is_strict_json_schema() {
        let format = OpenAiGenerator::text_format();
        assert_eq!(format["format"]["type"], "json_schema");
        assert_eq!(format["format"]["strict"], true);
    }
}
