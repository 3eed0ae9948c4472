// Library interface for the mfm binary (also used by its integration tests)
pub mod api;
pub mod config;
pub mod emoji;
pub mod logging;
pub mod server_config;
pub mod source;
pub mod terminal;
