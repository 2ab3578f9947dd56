pub mod config;
pub mod diagnostics;
pub mod errors;
pub mod http;

pub use config::Config;
pub use errors::ConnectError;
