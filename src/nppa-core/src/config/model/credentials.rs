use crate::error::configuration::ConfigurationError;
use crate::error::configuration::ConfigurationError::{InvalidKeyLength, MalformedSecretKey};
use aes_gcm::{Aes128Gcm, Key};
use std::fmt;

/// Length in bytes of the AES-128 key the secret decodes to.
pub const AES_KEY_LENGTH: usize = 16;

/// Identity fields and secret issued by the regulator for one application.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credentials {
    pub app_id: String,
    pub biz_id: String,
    pub secret_key: SecretKey,
}

/// The shared secret, used verbatim as text when signing and hex-decoded as the
/// symmetric key when encrypting.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretKey(String);

impl SecretKey {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn aes_key(&self) -> Result<Key<Aes128Gcm>, ConfigurationError> {
        let bytes = hex::decode(&self.0).map_err(MalformedSecretKey)?;
        if bytes.len() != AES_KEY_LENGTH {
            return Err(InvalidKeyLength(bytes.len()));
        }
        Ok(Key::<Aes128Gcm>::clone_from_slice(&bytes))
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey(***)")
    }
}
