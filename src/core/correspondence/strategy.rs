use crate::core::correspondence::map::CorrespondenceMap;
use std::fmt::Debug;

/// Builds the slice correspondence for a pair of stacks when a link activates.
pub trait CorrespondenceStrategy: Debug + Send + Sync {
    fn build(&self, source_count: usize, target_count: usize) -> CorrespondenceMap;
}

/// Pairs slices by index, dropping the tail of the longer stack.
///
/// This is an approximation: it ignores slice positions and spacing, so
/// stacks with differing geometry only line up at their first slice.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityTruncated;

impl CorrespondenceStrategy for IdentityTruncated {
    fn build(&self, source_count: usize, target_count: usize) -> CorrespondenceMap {
        CorrespondenceMap::identity_truncated(source_count, target_count)
    }
}

#[cfg(test)]
mod tests {
    use super::{CorrespondenceStrategy, IdentityTruncated};

    #[test]
    fn identity_strategy_matches_identity_map() {
        let map = IdentityTruncated.build(3, 8);

        assert_eq!(map.len(), 3);
        assert_eq!(map.get(2), Some(2));
        assert_eq!(map.target_count(), 8);
    }
}
