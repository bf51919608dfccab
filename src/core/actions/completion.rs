use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

type CompletionCallback = Box<dyn Fn() + Send + Sync>;

/// Counts worker completions and fires its callback once the target is reached.
///
/// Calls beyond the target are counted but never fire the callback again.
pub struct CompletionTracker {
    target: u32,
    count: AtomicU32,
    callback: CompletionCallback,
}

impl CompletionTracker {
    pub fn new<F>(target: u32, callback: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self {
            target,
            count: AtomicU32::new(0),
            callback: Box::new(callback),
        }
    }

    /// Records one completion. Returns `true` for the call that reached the target.
    pub fn finished(&self) -> bool {
        let reached = self.count.fetch_add(1, Ordering::AcqRel) + 1 == self.target;

        if reached {
            (self.callback)();
        }

        reached
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.count.load(Ordering::Acquire) >= self.target
    }

    #[must_use]
    pub fn target(&self) -> u32 {
        self.target
    }
}

impl fmt::Debug for CompletionTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompletionTracker")
            .field("target", &self.target)
            .field("count", &self.count.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}
