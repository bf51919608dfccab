use std::num::NonZeroU32;

/// Worker pool size: one less than the available cores, and at least one.
pub fn calculate_workers_for_slicing() -> NonZeroU32 {
    let num_avail_threads = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1) as u32;

    NonZeroU32::new(num_avail_threads.saturating_sub(1)).unwrap_or(NonZeroU32::MIN)
}
