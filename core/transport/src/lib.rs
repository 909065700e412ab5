pub mod backend;
pub mod clock;
pub mod config;
pub mod controller;
pub mod input;

pub use backend::PlaybackBackend;
pub use clock::FrameClock;
pub use config::TransportConfig;
pub use controller::{CursorSnapshot, PlaybackController, PlaybackState, TickStatus};
pub use input::{InputEvent, Key};
