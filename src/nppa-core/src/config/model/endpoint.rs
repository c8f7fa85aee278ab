use crate::config::model::credentials::{Credentials, SecretKey};
use crate::error::configuration::ConfigurationError;
use crate::error::configuration::ConfigurationError::{EmptyField, MalformedUrl, UnsupportedHost};
use crate::error::structured_file::StructuredFileError;
use crate::json::load_json_file;
use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

/// Connection and identity settings for one regulator endpoint.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EndpointConfig {
    pub host: String,
    pub api: String,

    #[serde(rename = "nppa_app_id")]
    pub app_id: String,

    #[serde(rename = "nppa_secret_key")]
    pub secret_key: String,

    pub biz_id: String,

    /// The regulator's test environment serves https without a valid certificate.
    #[serde(rename = "is_https_cert_skip_verify", default)]
    pub skip_tls_verify: bool,
}

impl EndpointConfig {
    /// Checks that every required field is present and that the host is usable.
    ///
    /// The secret key is only checked for presence; its hex form is decoded when
    /// a body is encrypted.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let required = [
            ("host", &self.host),
            ("nppa_app_id", &self.app_id),
            ("nppa_secret_key", &self.secret_key),
            ("biz_id", &self.biz_id),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(EmptyField(name));
            }
        }

        let host = Url::parse(&self.host).map_err(|source| MalformedUrl {
            url: self.host.clone(),
            source,
        })?;
        if !matches!(host.scheme(), "http" | "https") || host.cannot_be_a_base() {
            return Err(UnsupportedHost(self.host.clone()));
        }
        Ok(())
    }

    pub fn credentials(&self) -> Credentials {
        Credentials {
            app_id: self.app_id.clone(),
            biz_id: self.biz_id.clone(),
            secret_key: SecretKey::new(self.secret_key.clone()),
        }
    }
}

/// The endpoints used by the business wrappers, one per regulator api.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EndpointSuite {
    pub real_name_auth: EndpointConfig,
    pub real_name_query: EndpointConfig,
    pub player_behavior: EndpointConfig,
}

impl EndpointSuite {
    pub fn load(path: &Path) -> Result<Self, StructuredFileError> {
        load_json_file(path)
    }
}
