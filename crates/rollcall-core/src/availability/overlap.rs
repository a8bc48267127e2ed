use crate::models::Interval;

/// True when no busy block overlaps `window`.
///
/// Overlap is half-open, so a block ending exactly when the window starts is
/// not a conflict. No busy blocks means free. `window` must already be valid.
pub fn is_free(busy: &[Interval], window: Interval) -> bool {
    !busy.iter().any(|block| block.overlaps(&window))
}

/// The busy blocks that overlap `window`, in input order.
pub fn conflicts(busy: &[Interval], window: Interval) -> Vec<Interval> {
    busy.iter()
        .filter(|block| block.overlaps(&window))
        .copied()
        .collect()
}
