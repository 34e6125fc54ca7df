pub mod config;

pub use config::{DiffSection, EngineConfig, SearchSection};
