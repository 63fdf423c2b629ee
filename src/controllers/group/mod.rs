//! Named groups broadcasting a shared zoom/pan state.

pub mod group_synchronizer;
pub mod sync_groups;

pub use group_synchronizer::{GroupListener, GroupSynchronizer};
pub use sync_groups::SyncGroups;
