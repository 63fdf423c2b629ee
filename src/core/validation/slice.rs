/// Applies `delta` to `current` and clamps into `0..count`.
///
/// Returns `None` for an empty stack.
#[must_use]
pub fn clamp_slice_index(current: usize, delta: i64, count: usize) -> Option<usize> {
    let last = count.checked_sub(1)?;

    let moved = if delta.is_negative() {
        current.saturating_sub(usize::try_from(delta.unsigned_abs()).unwrap_or(usize::MAX))
    } else {
        current.saturating_add(usize::try_from(delta).unwrap_or(usize::MAX))
    };

    Some(moved.min(last))
}

#[must_use]
pub fn validate_slice_index(index: usize, count: usize) -> Option<usize> {
    (index < count).then_some(index)
}
