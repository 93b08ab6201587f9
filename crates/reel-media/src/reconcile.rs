//! Duration reconciliation.
//!
//! Speech providers estimate duration from text length or payload size, not
//! from a decode, so the estimate can drift from what the renderer will
//! actually play. Once the audio is on disk in a known container we measure
//! the decodable duration and prefer it; captions and footage timing
//! downstream run off this exact value.

use tracing::{debug, warn};

use crate::error::MediaResult;

/// Disagreements smaller than this are not worth logging.
const LOG_DISAGREEMENT_SECONDS: f64 = 0.1;

/// Pick the authoritative duration for a scene.
///
/// A successful, positive measurement wins; otherwise the provider estimate
/// is kept and a warning is logged.
pub fn reconcile_duration(estimated_seconds: f64, measured: MediaResult<f64>) -> f64 {
    match measured {
        Ok(measured_seconds) if measured_seconds > 0.0 => {
            if (measured_seconds - estimated_seconds).abs() > LOG_DISAGREEMENT_SECONDS {
                debug!(
                    estimated = estimated_seconds,
                    measured = measured_seconds,
                    "Replacing estimated duration with measured value"
                );
            }
            measured_seconds
        }
        Ok(measured_seconds) => {
            warn!(
                estimated = estimated_seconds,
                measured = measured_seconds,
                "Measured duration not positive, keeping estimate"
            );
            estimated_seconds
        }
        Err(e) => {
            warn!(
                estimated = estimated_seconds,
                error = %e,
                "Duration measurement failed, keeping estimate"
            );
            estimated_seconds
        }
    }
}
