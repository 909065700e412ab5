/// Coalescing redraw trigger.
///
/// Any number of `request` calls between two frames collapse into a single
/// `take() == true`, so triggering a redraw is idempotent.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RedrawRequest {
    pending: bool,
}

impl RedrawRequest {
    pub fn request(&mut self) {
        self.pending = true;
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }
}
