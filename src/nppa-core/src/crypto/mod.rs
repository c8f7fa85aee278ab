//! Authenticated encryption of request bodies.
//!
//! A body is sealed with AES-128-GCM under the hex-decoded secret key and sent
//! as `{"data": base64(nonce || ciphertext || tag)}`.
pub mod nonce;

use crate::config::model::credentials::SecretKey;
use crate::error::configuration::ConfigurationError;
use crate::error::crypto::CryptoError::{
    DecryptContentFailed, EncryptContentFailed, EnvelopeTooShort, MalformedEnvelope,
};
use crate::error::crypto::{CryptoError, EncryptPayloadError};
use crate::error::encoding::EncodingError;
use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes128Gcm, Nonce};
use base64::engine::{general_purpose::STANDARD as BASE64, Engine};
use nonce::{NonceSource, SystemNonceSource};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const NONCE_LENGTH: usize = 12;
pub const TAG_LENGTH: usize = 16;

/// The wire form of an encrypted body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedBody {
    pub data: String,
}

impl EncryptedBody {
    /// Serializes the envelope once; the result is what gets signed and what
    /// gets sent.
    pub fn to_json(&self) -> Result<String, EncodingError> {
        serde_json::to_string(self).map_err(EncodingError::SerializeBodyFailed)
    }
}

pub struct PayloadCipher {
    cipher: Aes128Gcm,
    nonces: Arc<dyn NonceSource>,
}

impl PayloadCipher {
    pub fn new(
        key: &SecretKey,
        nonces: Arc<dyn NonceSource>,
    ) -> Result<Self, ConfigurationError> {
        let key = key.aes_key()?;
        Ok(Self {
            cipher: Aes128Gcm::new(&key),
            nonces,
        })
    }

    pub fn encrypt(&self, plaintext: &[u8]) -> Result<EncryptedBody, CryptoError> {
        let mut nonce = [0u8; NONCE_LENGTH];
        self.nonces.fill(&mut nonce)?;

        let ciphertext = self
            .cipher
            .encrypt(Nonce::from_slice(&nonce), plaintext)
            .map_err(EncryptContentFailed)?;

        let mut sealed = Vec::with_capacity(NONCE_LENGTH + ciphertext.len());
        sealed.extend_from_slice(&nonce);
        sealed.extend_from_slice(&ciphertext);

        Ok(EncryptedBody {
            data: BASE64.encode(sealed),
        })
    }

    pub fn decrypt(&self, body: &EncryptedBody) -> Result<Vec<u8>, CryptoError> {
        let sealed = BASE64.decode(&body.data).map_err(MalformedEnvelope)?;
        if sealed.len() < NONCE_LENGTH + TAG_LENGTH {
            return Err(EnvelopeTooShort(sealed.len()));
        }
        let (nonce, ciphertext) = sealed.split_at(NONCE_LENGTH);
        self.cipher
            .decrypt(Nonce::from_slice(nonce), ciphertext)
            .map_err(DecryptContentFailed)
    }
}

/// Encrypts `plaintext` under `hex_key` with nonces from the system random source.
pub fn encrypt_payload(plaintext: &[u8], hex_key: &str) -> Result<EncryptedBody, EncryptPayloadError> {
    let cipher = PayloadCipher::new(
        &SecretKey::new(hex_key),
        Arc::new(SystemNonceSource::new()),
    )?;
    Ok(cipher.encrypt(plaintext)?)
}

#[cfg(test)]
pub(crate) mod test {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    pub(crate) const KEY: &str = "00112233445566778899aabbccddeeff";
    const PLAINTEXT: &[u8] = br#"{"ai":"u1","name":"Li","idNum":"110101199003077777"}"#;

    /// Hands out 0x00..0x0B every time; only for fixed test vectors.
    pub(crate) struct FixedNonceSource;

    impl NonceSource for FixedNonceSource {
        fn fill(&self, nonce: &mut [u8]) -> Result<(), CryptoError> {
            for (i, b) in nonce.iter_mut().enumerate() {
                *b = i as u8;
            }
            Ok(())
        }
    }

    struct ExhaustedNonceSource;

    impl NonceSource for ExhaustedNonceSource {
        fn fill(&self, _nonce: &mut [u8]) -> Result<(), CryptoError> {
            Err(CryptoError::RandomSourceExhausted(ring::error::Unspecified))
        }
    }

    fn system_cipher() -> PayloadCipher {
        PayloadCipher::new(&SecretKey::new(KEY), Arc::new(SystemNonceSource::new())).unwrap()
    }

    #[test]
    fn matches_reference_vector() {
        let cipher = PayloadCipher::new(&SecretKey::new(KEY), Arc::new(FixedNonceSource)).unwrap();
        let body = cipher.encrypt(PLAINTEXT).unwrap();

        assert_eq!(
            body.data,
            "AAECAwQFBgcICQoLUPdWrYytrRWuGgW9fuwsiC8lrwYdk8Kv5jqUO4wpvAoHuOJlITl4yUudu8biJuLXyAemxAShC/VH2oh+hqjviqSh6vk="
        );
        let sealed = BASE64.decode(&body.data).unwrap();
        assert_eq!(sealed.len(), PLAINTEXT.len() + NONCE_LENGTH + TAG_LENGTH);
        assert_eq!(&sealed[..NONCE_LENGTH], &(0u8..12).collect::<Vec<_>>()[..]);
    }

    #[test]
    fn envelope_serializes_as_data_field() {
        let body = EncryptedBody {
            data: "AAEC+/==".to_string(),
        };
        assert_eq!(body.to_json().unwrap(), r#"{"data":"AAEC+/=="}"#);
    }

    #[test]
    fn nonces_are_unique() {
        let cipher = system_cipher();
        let mut seen = HashSet::new();
        for i in 0..10_000u32 {
            let body = cipher.encrypt(&i.to_be_bytes()).unwrap();
            let sealed = BASE64.decode(&body.data).unwrap();
            assert!(
                seen.insert(sealed[..NONCE_LENGTH].to_vec()),
                "nonce repeated after {i} encryptions"
            );
        }
    }

    #[test]
    fn tampering_fails_authentication() {
        let cipher = system_cipher();
        let body = cipher.encrypt(PLAINTEXT).unwrap();
        let mut sealed = BASE64.decode(&body.data).unwrap();

        for index in [0, NONCE_LENGTH, sealed.len() - 1] {
            sealed[index] ^= 0x01;
            let tampered = EncryptedBody {
                data: BASE64.encode(&sealed),
            };
            assert!(matches!(
                cipher.decrypt(&tampered),
                Err(DecryptContentFailed(_))
            ));
            sealed[index] ^= 0x01;
        }
    }

    #[test]
    fn truncated_envelope_is_rejected() {
        let cipher = system_cipher();
        let short = EncryptedBody {
            data: BASE64.encode([0u8; 20]),
        };
        assert!(matches!(cipher.decrypt(&short), Err(EnvelopeTooShort(20))));

        let garbage = EncryptedBody {
            data: "not base64!".to_string(),
        };
        assert!(matches!(cipher.decrypt(&garbage), Err(MalformedEnvelope(_))));
    }

    #[test]
    fn short_key_is_a_configuration_error() {
        // decodes to 10 bytes
        let err = encrypt_payload(PLAINTEXT, "00112233445566778899").unwrap_err();
        assert!(matches!(
            err,
            EncryptPayloadError::InvalidKey(ConfigurationError::InvalidKeyLength(10))
        ));
    }

    #[test]
    fn exhausted_random_source_is_surfaced() {
        let cipher =
            PayloadCipher::new(&SecretKey::new(KEY), Arc::new(ExhaustedNonceSource)).unwrap();
        assert!(matches!(
            cipher.encrypt(PLAINTEXT),
            Err(CryptoError::RandomSourceExhausted(_))
        ));
    }

    proptest! {
        #[test]
        fn decrypt_reverts_encrypt(content in proptest::collection::vec(any::<u8>(), 0..512)) {
            let cipher = system_cipher();
            let body = cipher.encrypt(&content).unwrap();
            prop_assert_eq!(cipher.decrypt(&body).unwrap(), content);
        }
    }
}
