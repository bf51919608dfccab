use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cancelled;

impl std::fmt::Display for Cancelled {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "operation cancelled")
    }
}

impl std::error::Error for Cancelled {}

pub trait CancelToken: Send + Sync {
    fn is_cancelled(&self) -> bool;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NeverCancel;

impl CancelToken for NeverCancel {
    #[inline]
    fn is_cancelled(&self) -> bool {
        false
    }
}

impl<F> CancelToken for F
where
    F: Fn() -> bool + Send + Sync,
{
    #[inline]
    fn is_cancelled(&self) -> bool {
        self()
    }
}

/// Cooperative stop flag shared by every worker of one render pass.
///
/// Clones share the same flag. Once cancelled a token stays cancelled; a new pass
/// gets a fresh token.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
}

impl CancellationToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Release);
    }
}

impl CancelToken for CancellationToken {
    #[inline]
    fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_never_cancel_always_returns_false() {
        let token = NeverCancel;
        assert!(!token.is_cancelled());
        assert!(!token.is_cancelled());
    }

    #[test]
    fn test_closure_token_reflects_atomic_state() {
        let flag = AtomicBool::new(false);
        let token = || flag.load(Ordering::Relaxed);

        assert!(!token.is_cancelled());

        flag.store(true, Ordering::Relaxed);
        assert!(token.is_cancelled());
    }

    #[test]
    fn test_cancellation_token_is_shared_between_clones() {
        let token = CancellationToken::new();
        let worker_token = token.clone();

        assert!(!worker_token.is_cancelled());

        token.cancel();

        assert!(worker_token.is_cancelled());
        assert!(token.is_cancelled());
    }

    #[test]
    fn test_cancellation_is_visible_across_threads() {
        let token = CancellationToken::new();
        let worker_token = token.clone();

        token.cancel();

        let seen = thread::spawn(move || worker_token.is_cancelled())
            .join()
            .unwrap();

        assert!(seen);
    }

    #[test]
    fn test_fresh_token_is_independent() {
        let old = CancellationToken::new();
        old.cancel();

        let fresh = CancellationToken::new();

        assert!(old.is_cancelled());
        assert!(!fresh.is_cancelled());
    }
}
