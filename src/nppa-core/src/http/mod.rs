pub mod client;
pub mod context;
pub mod response;
pub mod transport;


pub use reqwest::Method;

pub const CONTENT_TYPE_JSON: &str = "application/json";

// Header names are case-insensitive on the wire; `http` stores them lowercased.
pub const APP_ID_HEADER: &str = "appid";
pub const BIZ_ID_HEADER: &str = "bizid";
pub const TIMESTAMP_HEADER: &str = "timestamps";
pub const SIGN_HEADER: &str = "sign";
