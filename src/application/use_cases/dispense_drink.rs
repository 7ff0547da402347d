use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::application::{DrinkGenerator, ModerationGate};
use crate::domain::{fallback, prefilter, sanitize, DrinkRequest, DrinkResponse};

use super::extract::extract_payload;

/// Default budget for the moderation call. Moderation is advisory, so the
/// budget is short: an unavailable classifier must not hold up dispensing.
pub const DEFAULT_MODERATION_TIMEOUT: Duration = Duration::from_secs(2);

/// Default budget for the generation call. Together with the moderation
/// budget this bounds worst-case pipeline latency.
pub const DEFAULT_GENERATION_TIMEOUT: Duration = Duration::from_millis(6500);

/// Orchestrates the dispensing pipeline:
/// pre-filter → moderation gate → structured generation → extraction →
/// sanitization, degrading to a stage-appropriate fallback tier at every
/// step. The pipeline is total: it always produces a schema-valid
/// [`DrinkResponse`] and never propagates an error to the transport layer.
pub struct DispenseDrinkUseCase {
    moderation: Arc<dyn ModerationGate>,
    generator: Arc<dyn DrinkGenerator>,
    moderation_timeout: Duration,
    generation_timeout: Duration,
}

impl DispenseDrinkUseCase {
    pub fn new(moderation: Arc<dyn ModerationGate>, generator: Arc<dyn DrinkGenerator>) -> Self {
        Self {
            moderation,
            generator,
            moderation_timeout: DEFAULT_MODERATION_TIMEOUT,
            generation_timeout: DEFAULT_GENERATION_TIMEOUT,
        }
    }

    pub fn with_moderation_timeout(mut self, timeout: Duration) -> Self {
        self.moderation_timeout = timeout;
        self
    }

    pub fn with_generation_timeout(mut self, timeout: Duration) -> Self {
        self.generation_timeout = timeout;
        self
    }

    pub async fn execute(&self, request: &DrinkRequest) -> DrinkResponse {
        let request_id = Uuid::new_v4();
        let query = request.query();
        let start_time = Instant::now();

        info!("[{request_id}] dispensing: {query:?}");

        // Local denylist: short-circuits before any external call is spent.
        if prefilter::is_denied(query) {
            info!("[{request_id}] denylist hit, dispensing refusal");
            return fallback::deny();
        }

        // Moderation gate: a flagged verdict blocks generation; timeout or
        // classifier failure is advisory and the pipeline proceeds.
        match tokio::time::timeout(self.moderation_timeout, self.moderation.flagged(query)).await {
            Ok(Ok(true)) => {
                info!("[{request_id}] moderation flagged, dispensing refusal");
                return fallback::refusal();
            }
            Ok(Ok(false)) => {}
            Ok(Err(e)) => {
                warn!("[{request_id}] moderation unavailable, proceeding: {e}");
            }
            Err(_) => {
                warn!(
                    "[{request_id}] moderation timed out after {:?}, proceeding",
                    self.moderation_timeout
                );
            }
        }

        // Generation: a single attempt raced against its budget. The losing
        // branch is abandoned, not cancelled at the transport level.
        let envelope =
            match tokio::time::timeout(self.generation_timeout, self.generator.generate(query))
                .await
            {
                Ok(Ok(envelope)) => envelope,
                Ok(Err(e)) => {
                    warn!("[{request_id}] generation failed, dispensing generic drink: {e}");
                    return fallback::generic_ok(query);
                }
                Err(_) => {
                    warn!(
                        "[{request_id}] generation timed out after {:?}, dispensing generic drink",
                        self.generation_timeout
                    );
                    return fallback::generic_ok(query);
                }
            };

        let candidate = extract_payload(&envelope);
        if candidate.is_none() {
            debug!("[{request_id}] no payload in envelope: {envelope}");
        }

        let response = sanitize(candidate.as_ref(), query);

        info!(
            "[{request_id}] dispensed {} in {:.2}s",
            response.effect_id,
            start_time.elapsed().as_secs_f64()
        );

        response
    }
}
