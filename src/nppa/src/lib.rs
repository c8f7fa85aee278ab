//! Business calls against the NPPA real-name authentication and player
//! behavior reporting apis, built on `nppa_core`.
pub mod api;
pub mod logger;
pub mod models;

#[cfg(test)]
mod api_test;
