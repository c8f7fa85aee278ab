pub mod configuration;
pub mod crypto;
pub mod encoding;
pub mod fs;
pub mod remote;
pub mod request;
pub mod reqwest;
pub mod structured_file;
pub mod transport;
