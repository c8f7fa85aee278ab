use crate::error::crypto::CryptoError;
use ring::rand::{SecureRandom, SystemRandom};

/// Supplies the per-message nonces for payload encryption.
///
/// Every call must yield a fresh value; a repeated nonce under the same key
/// breaks GCM entirely.
pub trait NonceSource: Send + Sync {
    fn fill(&self, nonce: &mut [u8]) -> Result<(), CryptoError>;
}

/// Nonces drawn from the operating system's secure random generator.
#[derive(Debug)]
pub struct SystemNonceSource {
    rng: SystemRandom,
}

impl SystemNonceSource {
    pub fn new() -> Self {
        Self {
            rng: SystemRandom::new(),
        }
    }
}

impl Default for SystemNonceSource {
    fn default() -> Self {
        Self::new()
    }
}

impl NonceSource for SystemNonceSource {
    fn fill(&self, nonce: &mut [u8]) -> Result<(), CryptoError> {
        self.rng
            .fill(nonce)
            .map_err(CryptoError::RandomSourceExhausted)
    }
}
