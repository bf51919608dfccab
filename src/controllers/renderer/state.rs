use std::sync::atomic::{AtomicU8, Ordering};

/// Lifecycle of the most recent render pass.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum RenderState {
    #[default]
    Idle = 0,
    Rendering = 1,
    FirstPassDone = 2,
    Finished = 3,
    Cancelled = 4,
    /// A worker hit an error other than cancellation; the image is incomplete.
    Failed = 5,
}

impl RenderState {
    const fn from_u8(value: u8) -> Self {
        match value {
            1 => Self::Rendering,
            2 => Self::FirstPassDone,
            3 => Self::Finished,
            4 => Self::Cancelled,
            5 => Self::Failed,
            _ => Self::Idle,
        }
    }

    /// `true` while workers may still be painting.
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Rendering | Self::FirstPassDone)
    }
}

#[derive(Debug, Default)]
pub(crate) struct AtomicRenderState(AtomicU8);

impl AtomicRenderState {
    pub(crate) fn load(&self) -> RenderState {
        RenderState::from_u8(self.0.load(Ordering::Acquire))
    }

    pub(crate) fn store(&self, state: RenderState) {
        self.0.store(state as u8, Ordering::Release);
    }
}
