//! Request signatures.
//!
//! The regulator authenticates a request by recomputing a SHA-256 digest over
//! the secret key, the request parameters and the serialized body:
//!
//! ```text
//! hex(sha256(secret ++ sort(name ++ value, ...).join("") ++ body))
//! ```
//!
//! The parameters include the identity headers (`appId`, `bizId`,
//! `timestamps`) next to the query string parameters, so the timestamp that is
//! signed has to be the one that is sent. [`SignableParams`] carries both so
//! they cannot drift apart.
pub mod timestamp;

use crate::config::model::credentials::Credentials;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fmt;
pub use timestamp::Timestamp;

pub const APP_ID_PARAM: &str = "appId";
pub const BIZ_ID_PARAM: &str = "bizId";
pub const TIMESTAMP_PARAM: &str = "timestamps";

/// Query string parameters of a request, by name.
pub type QueryParams = BTreeMap<String, String>;

/// A lowercase hex SHA-256 digest.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Signature(String);

impl Signature {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Signature {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Signature> for String {
    fn from(signature: Signature) -> String {
        signature.0
    }
}

/// The caller's query parameters together with the identity fields and the
/// single timestamp of one request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignableParams {
    query: QueryParams,
    app_id: String,
    biz_id: String,
    timestamp: Timestamp,
}

impl SignableParams {
    /// Adds the identity fields and `timestamp` to `query`.
    ///
    /// A query parameter named like one of the identity fields is shadowed by
    /// the identity value, both in the signature and in the query string.
    pub fn augment(query: &QueryParams, credentials: &Credentials, timestamp: Timestamp) -> Self {
        let query = query
            .iter()
            .filter(|(name, _)| !is_identity_param(name))
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();
        Self {
            query,
            app_id: credentials.app_id.clone(),
            biz_id: credentials.biz_id.clone(),
            timestamp,
        }
    }

    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    pub fn biz_id(&self) -> &str {
        &self.biz_id
    }

    /// The parameters that travel in the query string.
    pub fn query_pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.query.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn has_query(&self) -> bool {
        !self.query.is_empty()
    }

    /// Every signed parameter, identity fields included.
    pub fn to_map(&self) -> BTreeMap<String, String> {
        let mut all = self.query.clone();
        all.insert(APP_ID_PARAM.to_string(), self.app_id.clone());
        all.insert(BIZ_ID_PARAM.to_string(), self.biz_id.clone());
        all.insert(TIMESTAMP_PARAM.to_string(), self.timestamp.to_string());
        all
    }

    /// The exact string that gets hashed.
    pub fn canonical_string(&self, secret: &str, body: &str) -> String {
        canonical_string(&self.to_map(), body, secret)
    }

    pub fn sign(&self, secret: &str, body: &str) -> Signature {
        sign(&self.to_map(), body, secret)
    }
}

fn is_identity_param(name: &str) -> bool {
    matches!(name, APP_ID_PARAM | BIZ_ID_PARAM | TIMESTAMP_PARAM)
}

/// Builds the signature pre-image: the secret, then every `name ++ value`
/// entry in byte-wise order, then the body.
///
/// Entries are sorted after concatenation, which is not the same order as
/// sorting by name when one name is a prefix of another.
pub fn canonical_string<I, K, V>(params: I, body: &str, secret: &str) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut entries: Vec<String> = params
        .into_iter()
        .map(|(name, value)| format!("{}{}", name.as_ref(), value.as_ref()))
        .collect();
    entries.sort_unstable();

    let mut data = String::with_capacity(
        secret.len() + entries.iter().map(String::len).sum::<usize>() + body.len(),
    );
    data.push_str(secret);
    entries.iter().for_each(|entry| data.push_str(entry));
    data.push_str(body);
    data
}

pub fn sign<I, K, V>(params: I, body: &str, secret: &str) -> Signature
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let digest = Sha256::digest(canonical_string(params, body, secret).as_bytes());
    Signature(hex::encode(digest))
}
