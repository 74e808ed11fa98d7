// Re-export all items from the submodules
mod engine_config;

pub use engine_config::{load_or_default, EngineConfig};
