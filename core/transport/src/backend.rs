use std::error::Error;

/// What the [`PlaybackController`](crate::controller::PlaybackController)
/// needs from an audio engine.
///
/// `seek` must be a single store the real-time thread can observe at any
/// point; it also clears any end-of-stream flag.
pub trait PlaybackBackend {
    type Error: Error;

    fn start(&mut self) -> Result<(), Self::Error>;
    /// Halts output without touching the read position.
    fn stop(&mut self) -> Result<(), Self::Error>;
    fn seek(&self, sample: usize);
    fn position(&self) -> usize;
    fn total_samples(&self) -> usize;
    fn end_of_stream(&self) -> bool;
}
