pub mod anki;
pub mod core;
pub mod persistence;
pub mod renshuu;
pub mod server;

pub use anki::Dispatcher;
pub use crate::core::{
    Config,
    ConnectError,
};
