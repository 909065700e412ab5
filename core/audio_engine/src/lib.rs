pub mod config;
pub mod device_manager;
pub mod engine;
pub mod loader;

pub use engine::PlaybackEngine;
