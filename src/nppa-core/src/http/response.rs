use crate::error::encoding::EncodingError::DeserializeResponseFailed;
use crate::error::remote::RemoteError;
use crate::error::request::RequestError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// The envelope every regulator response is wrapped in.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub errcode: i64,

    #[serde(default)]
    pub errmsg: String,

    #[serde(default)]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn is_success(&self) -> bool {
        self.errcode == 0
    }
}

/// Decodes a raw response body and returns its `data` payload.
///
/// A non-zero `errcode` becomes a [`RemoteError`] whatever the payload looks
/// like; a missing payload decodes as `T::default()`.
pub fn parse_response<T>(body: &[u8]) -> Result<T, RequestError>
where
    T: DeserializeOwned + Default,
{
    let response: ApiResponse<serde_json::Value> =
        serde_json::from_slice(body).map_err(DeserializeResponseFailed)?;

    if !response.is_success() {
        return Err(RemoteError {
            code: response.errcode,
            message: response.errmsg,
        }
        .into());
    }

    match response.data {
        None | Some(serde_json::Value::Null) => Ok(T::default()),
        Some(data) => Ok(serde_json::from_value(data).map_err(DeserializeResponseFailed)?),
    }
}
