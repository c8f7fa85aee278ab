pub mod credentials;
pub mod endpoint;
