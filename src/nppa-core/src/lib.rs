//! Client core for the NPPA (National Press and Publication Administration)
//! identity and behavior reporting api.
//!
//! Every outbound call is signed over its parameters and, when it carries a
//! body, encrypted with AES-128-GCM. [`http::client::NppaClient`] composes the
//! two and sends the result through a caller-supplied transport.
pub mod config;
pub mod crypto;
pub mod error;
pub mod fs;
pub mod http;
pub mod json;
pub mod sign;
