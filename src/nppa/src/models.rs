use serde::{Deserialize, Serialize};
use std::fmt;
use time::OffsetDateTime;

/// Outcome of a real-name authentication, as reported by the regulator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum RealNameAuthStatus {
    Success,
    /// Also used when the regulator returns no result at all.
    #[default]
    Processing,
    Failed,
}

impl TryFrom<u8> for RealNameAuthStatus {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(RealNameAuthStatus::Success),
            1 => Ok(RealNameAuthStatus::Processing),
            2 => Ok(RealNameAuthStatus::Failed),
            x => Err(format!("unknown real-name auth status {x}")),
        }
    }
}

impl From<RealNameAuthStatus> for u8 {
    fn from(status: RealNameAuthStatus) -> u8 {
        match status {
            RealNameAuthStatus::Success => 0,
            RealNameAuthStatus::Processing => 1,
            RealNameAuthStatus::Failed => 2,
        }
    }
}

impl fmt::Display for RealNameAuthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RealNameAuthStatus::Success => "success",
            RealNameAuthStatus::Processing => "processing",
            RealNameAuthStatus::Failed => "failed",
        };
        f.write_str(s)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum BehaviorType {
    Offline,
    Online,
}

impl TryFrom<u8> for BehaviorType {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(BehaviorType::Offline),
            1 => Ok(BehaviorType::Online),
            x => Err(format!("unknown behavior type {x}")),
        }
    }
}

impl From<BehaviorType> for u8 {
    fn from(bt: BehaviorType) -> u8 {
        match bt {
            BehaviorType::Offline => 0,
            BehaviorType::Online => 1,
        }
    }
}

/// Whether the player reported on is a verified user or a guest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum CertType {
    Authenticated,
    Guest,
}

impl TryFrom<u8> for CertType {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(CertType::Authenticated),
            2 => Ok(CertType::Guest),
            x => Err(format!("unknown certification type {x}")),
        }
    }
}

impl From<CertType> for u8 {
    fn from(ct: CertType) -> u8 {
        match ct {
            CertType::Authenticated => 0,
            CertType::Guest => 2,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RealNameAuthRequest {
    pub ai: String,
    pub name: String,
    #[serde(rename = "idNum")]
    pub id_num: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RealNameAuthResult {
    pub status: RealNameAuthStatus,
    /// The regulator's stable person identifier; empty until authenticated.
    #[serde(default)]
    pub pi: String,
}

/// A response without `result` decodes as processing rather than as status 0,
/// which would read as a successful authentication. Statuses outside 0..=2 are
/// rejected instead of passed through.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RealNameAuthData {
    #[serde(default)]
    pub result: RealNameAuthResult,
}

/// One login or logout event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BehaviorCollection {
    /// Position of the event in the batch, echoed back in the results.
    pub no: u32,
    /// Session id.
    pub si: String,
    pub bt: BehaviorType,
    /// Unix time of the event, in seconds.
    pub ot: i64,
    pub ct: CertType,
    /// Device id, required for guests.
    #[serde(default)]
    pub di: String,
    /// Person id, required for authenticated players.
    #[serde(default)]
    pub pi: String,
}

impl BehaviorCollection {
    pub fn new(
        no: u32,
        session_id: impl Into<String>,
        behavior: BehaviorType,
        cert: CertType,
        device_id: impl Into<String>,
        pi: impl Into<String>,
    ) -> Self {
        Self {
            no,
            si: session_id.into(),
            bt: behavior,
            ot: OffsetDateTime::now_utc().unix_timestamp(),
            ct: cert,
            di: device_id.into(),
            pi: pi.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BehaviorReportRequest {
    pub collections: Vec<BehaviorCollection>,
}

/// Per-event outcome of a behavior report; only rejected events are listed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BehaviorReportResult {
    pub no: u32,
    pub errcode: i64,
    #[serde(default)]
    pub errmsg: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BehaviorReportData {
    #[serde(default)]
    pub results: Vec<BehaviorReportResult>,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn auth_request_uses_wire_names() {
        let request = RealNameAuthRequest {
            ai: "u1".to_string(),
            name: "Li".to_string(),
            id_num: "110101199003077777".to_string(),
        };
        assert_eq!(
            serde_json::to_string(&request).unwrap(),
            r#"{"ai":"u1","name":"Li","idNum":"110101199003077777"}"#
        );
    }

    #[test]
    fn collection_serializes_enums_as_numbers() {
        let collection = BehaviorCollection {
            no: 1,
            si: "s1".to_string(),
            bt: BehaviorType::Online,
            ot: 1_700_000_000,
            ct: CertType::Guest,
            di: "d1".to_string(),
            pi: String::new(),
        };
        assert_eq!(
            serde_json::to_string(&collection).unwrap(),
            r#"{"no":1,"si":"s1","bt":1,"ot":1700000000,"ct":2,"di":"d1","pi":""}"#
        );
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert!(serde_json::from_str::<RealNameAuthResult>(r#"{"status":7,"pi":""}"#).is_err());
        let result: RealNameAuthResult = serde_json::from_str(r#"{"status":0,"pi":"p"}"#).unwrap();
        assert_eq!(result.status, RealNameAuthStatus::Success);
    }

    #[test]
    fn new_collection_is_stamped_now() {
        let collection = BehaviorCollection::new(
            1,
            "s1",
            BehaviorType::Offline,
            CertType::Authenticated,
            "",
            "pi",
        );
        assert!(collection.ot > 1_600_000_000);
    }

    #[test]
    fn missing_result_is_processing() {
        let data: RealNameAuthData = serde_json::from_str("{}").unwrap();
        assert_eq!(data.result.status, RealNameAuthStatus::Processing);
        assert!(data.result.pi.is_empty());
    }
}
