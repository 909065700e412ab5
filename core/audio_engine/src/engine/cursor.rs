use std::sync::atomic::{AtomicUsize, Ordering};

const END_OF_STREAM: usize = 1 << (usize::BITS - 1);
const POSITION_MASK: usize = !END_OF_STREAM;

/// The one value shared between the UI thread and the audio callback.
///
/// Read position and end-of-stream flag are packed into a single word, so a
/// seek is one store that also clears the flag. The audio thread publishes
/// progress with a compare-exchange against the word it read at the start of
/// the callback; if a seek landed in between, the seek wins and the callback's
/// advance is dropped.
#[derive(Debug, Default)]
pub struct PlaybackCursor {
    word: AtomicUsize,
}

/// Decoded view of one load of the cursor word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorWord {
    raw: usize,
}

impl CursorWord {
    fn pack(position: usize, end_of_stream: bool) -> Self {
        let flag = if end_of_stream { END_OF_STREAM } else { 0 };
        Self {
            raw: (position & POSITION_MASK) | flag,
        }
    }

    pub fn position(self) -> usize {
        self.raw & POSITION_MASK
    }

    pub fn end_of_stream(self) -> bool {
        self.raw & END_OF_STREAM != 0
    }
}

impl PlaybackCursor {
    pub fn new(position: usize) -> Self {
        Self {
            word: AtomicUsize::new(CursorWord::pack(position, false).raw),
        }
    }

    pub fn load(&self) -> CursorWord {
        CursorWord {
            raw: self.word.load(Ordering::Acquire),
        }
    }

    pub fn position(&self) -> usize {
        self.load().position()
    }

    pub fn end_of_stream(&self) -> bool {
        self.load().end_of_stream()
    }

    /// UI-thread seek. Clears end-of-stream.
    pub fn seek(&self, position: usize) {
        self.word.store(CursorWord::pack(position, false).raw, Ordering::Release);
    }

    /// Audio-thread publish. Returns `false` if the word changed since
    /// `observed` was loaded.
    pub(crate) fn publish(
        &self,
        observed: CursorWord,
        position: usize,
        end_of_stream: bool,
    ) -> bool {
        let next = CursorWord::pack(position, end_of_stream);
        if next == observed {
            return true;
        }
        self.word
            .compare_exchange(observed.raw, next.raw, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }
}
