use crate::controllers::group::group_synchronizer::GroupSynchronizer;
use std::collections::BTreeMap;

/// Named [`GroupSynchronizer`]s, e.g. one per hanging protocol.
#[derive(Debug, Default)]
pub struct SyncGroups {
    groups: BTreeMap<String, GroupSynchronizer>,
}

impl SyncGroups {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the group called `name`, creating an empty one if needed.
    pub fn create(&mut self, name: impl Into<String>) -> &mut GroupSynchronizer {
        self.groups.entry(name.into()).or_default()
    }

    /// Inserts `group` under `name`, returning the group it replaced.
    pub fn insert(&mut self, name: impl Into<String>, group: GroupSynchronizer) -> Option<GroupSynchronizer> {
        self.groups.insert(name.into(), group)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&GroupSynchronizer> {
        self.groups.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut GroupSynchronizer> {
        self.groups.get_mut(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<GroupSynchronizer> {
        self.groups.remove(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }
}
