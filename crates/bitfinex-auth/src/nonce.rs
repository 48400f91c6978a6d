//! Nonce source for signed requests
//!
//! Bitfinex rejects any signed request whose nonce is not greater than the
//! last nonce seen for the same API key. Nonces here are microseconds since
//! the Unix epoch, scaled by a multiplier, and never issued twice.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{AuthError, AuthResult};

/// Default nonce multiplier
pub const DEFAULT_NONCE_MULTIPLIER: f64 = 1.0;

/// Strictly increasing nonce generator
///
/// If a key was previously used by another tool that issued larger nonces,
/// raise the multiplier so the scaled clock overtakes them.
#[derive(Debug)]
pub struct NonceGenerator {
    multiplier: f64,
    last: AtomicU64,
}

impl NonceGenerator {
    /// Create a generator with the given multiplier
    pub fn new(multiplier: f64) -> AuthResult<Self> {
        if !multiplier.is_finite() || multiplier <= 0.0 {
            return Err(AuthError::InvalidNonceMultiplier(multiplier));
        }

        Ok(Self {
            multiplier,
            last: AtomicU64::new(0),
        })
    }

    /// The configured multiplier
    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    /// Issue the next nonce as a decimal string
    pub fn next(&self) -> AuthResult<String> {
        let micros = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|_| AuthError::SystemClock)?
            .as_micros() as f64;

        // `as` saturates on overflow
        let scaled = (micros * self.multiplier) as u64;
        Ok(self.issue(scaled).to_string())
    }

    /// Record `candidate` unless it would not advance the sequence
    fn issue(&self, candidate: u64) -> u64 {
        let previous = self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(candidate.max(last.saturating_add(1)))
            })
            .unwrap_or_else(|last| last);

        candidate.max(previous.saturating_add(1))
    }
}

impl Default for NonceGenerator {
    fn default() -> Self {
        Self {
            multiplier: DEFAULT_NONCE_MULTIPLIER,
            last: AtomicU64::new(0),
        }
    }
}
