// GeoBlade dialogue and gameplay library

pub mod cli;
pub mod config;
pub mod dialogue;
pub mod gameplay;
pub mod logging;

pub use cli::Cli;
pub use config::Options;
pub use logging::LogLevel;
