//! Coupon code generation and the overlay boundary.
//!
//! Codes are purely presentational: a fixed prefix plus a random uppercase
//! alphanumeric suffix, no uniqueness check, never validated by a backend.

use crate::consts::CODE_SUFFIX_LEN;
use crate::sim::rng::ArcadeRng;

/// Characters a code suffix is drawn from.
const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Where issued codes are shown. The production sink is a DOM overlay with a
/// copy-to-clipboard button; tests inject a recording sink.
pub trait RewardSink {
    fn display(&mut self, code: &str);
}

/// Sink that drops codes on the floor. Used by the native demo binary.
pub struct NullSink;

impl RewardSink for NullSink {
    fn display(&mut self, _code: &str) {}
}

/// Issues coupon codes and pushes them at the configured sink.
pub struct RewardIssuer {
    sink: Box<dyn RewardSink>,
}

impl RewardIssuer {
    pub fn new(sink: Box<dyn RewardSink>) -> Self {
        Self { sink }
    }

    /// An issuer with no visible overlay.
    pub fn silent() -> Self {
        Self::new(Box::new(NullSink))
    }

    /// Generate `PREFIX-XXXXXX`, hand it to the sink, and return it.
    pub fn issue(&mut self, prefix: &str, rng: &mut ArcadeRng) -> String {
        let mut code = String::with_capacity(prefix.len() + 1 + CODE_SUFFIX_LEN);
        code.push_str(prefix);
        code.push('-');
        for _ in 0..CODE_SUFFIX_LEN {
            code.push(*rng.pick(CODE_ALPHABET) as char);
        }
        self.sink.display(&code);
        code
    }
}
