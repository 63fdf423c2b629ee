use crate::core::data::ids::SurfaceId;
use crate::core::data::logical_state::{LogicalState, LogicalStatePatch};
use log::{debug, trace};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Receives every logical state the synchronizer changes, so the host can
/// push zoom and pan into the matching renderer. Patches that leave a
/// surface as it was are not reported.
pub trait GroupListener: Send + Sync {
    fn state_applied(&self, surface_id: &SurfaceId, state: &LogicalState);
}

/// One-shot broadcast of coarse view state across a group of surfaces.
///
/// Unlike a link it never subscribes to anything, so a broadcast cannot come
/// back around and needs no guard.
#[derive(Default)]
pub struct GroupSynchronizer {
    states: BTreeMap<SurfaceId, LogicalState>,
    listener: Option<Arc<dyn GroupListener>>,
}

impl GroupSynchronizer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_listener(mut self, listener: Arc<dyn GroupListener>) -> Self {
        self.listener = Some(listener);
        self
    }

    /// Adds a member at the identity state; returns `false` if already present.
    pub fn register(&mut self, surface_id: SurfaceId) -> bool {
        if self.states.contains_key(&surface_id) {
            return false;
        }

        debug!("surface {surface_id} joined group");
        self.states.insert(surface_id, LogicalState::IDENTITY);
        true
    }

    pub fn unregister(&mut self, surface_id: &SurfaceId) -> Option<LogicalState> {
        self.states.remove(surface_id)
    }

    #[must_use]
    pub fn contains(&self, surface_id: &SurfaceId) -> bool {
        self.states.contains_key(surface_id)
    }

    pub fn members(&self) -> impl Iterator<Item = &SurfaceId> {
        self.states.keys()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    #[must_use]
    pub fn get_state(&self, surface_id: &SurfaceId) -> Option<LogicalState> {
        self.states.get(surface_id).copied()
    }

    /// Applies `patch` to `surface_id`, registering it if needed, and with
    /// `broadcast` to every other member as well.
    pub fn update_state(&mut self, surface_id: &SurfaceId, patch: &LogicalStatePatch, broadcast: bool) {
        self.states.entry(surface_id.clone()).or_default();
        self.apply_to(surface_id, patch);

        if broadcast {
            let others: Vec<SurfaceId> = self
                .states
                .keys()
                .filter(|member| *member != surface_id)
                .cloned()
                .collect();
            trace!("broadcasting {patch:?} from {surface_id} to {} surfaces", others.len());

            for member in &others {
                self.apply_to(member, patch);
            }
        }
    }

    /// Restores the listed surfaces to identity, then broadcasts identity to
    /// the remaining members once.
    pub fn reset(&mut self, surface_ids: &[SurfaceId]) {
        if surface_ids.is_empty() {
            debug!("reset requested for no surfaces");
            return;
        }

        let identity = LogicalStatePatch::full(LogicalState::IDENTITY);
        for surface_id in surface_ids {
            self.states.entry(surface_id.clone()).or_default();
            self.apply_to(surface_id, &identity);
        }

        let others: Vec<SurfaceId> = self
            .states
            .keys()
            .filter(|member| !surface_ids.contains(member))
            .cloned()
            .collect();
        for member in &others {
            self.apply_to(member, &identity);
        }
        debug!("reset {} surfaces to identity", self.states.len());
    }

    fn apply_to(&mut self, surface_id: &SurfaceId, patch: &LogicalStatePatch) {
        let Some(state) = self.states.get_mut(surface_id) else {
            return;
        };

        if !state.apply(patch) {
            return;
        }
        let state = *state;

        if let Some(listener) = &self.listener {
            listener.state_applied(surface_id, &state);
        }
    }
}

impl fmt::Debug for GroupSynchronizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GroupSynchronizer")
            .field("states", &self.states)
            .field("has_listener", &self.listener.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        applied: Mutex<Vec<(String, LogicalState)>>,
    }

    impl GroupListener for Recorder {
        fn state_applied(&self, surface_id: &SurfaceId, state: &LogicalState) {
            self.applied
                .lock()
                .unwrap()
                .push((surface_id.to_string(), *state));
        }
    }

    fn id(value: &str) -> SurfaceId {
        SurfaceId::new(value).expect("valid surface id")
    }

    fn group(members: &[&str]) -> (GroupSynchronizer, Arc<Recorder>) {
        let recorder = Arc::new(Recorder::default());
        let mut group = GroupSynchronizer::new().with_listener(recorder.clone());
        for member in members {
            group.register(id(member));
        }

        (group, recorder)
    }

    #[test]
    fn register_starts_at_identity_once() {
        let (mut group, _) = group(&["axial"]);

        assert!(!group.register(id("axial")));
        assert_eq!(group.get_state(&id("axial")), Some(LogicalState::IDENTITY));
        assert_eq!(group.get_state(&id("coronal")), None);
        assert_eq!(group.len(), 1);
    }

    #[test]
    fn local_update_touches_only_that_surface() {
        let (mut group, recorder) = group(&["axial", "coronal"]);

        group.update_state(&id("axial"), &LogicalStatePatch::zoom(2.0), false);

        assert_eq!(group.get_state(&id("axial")).map(|state| state.zoom), Some(2.0));
        assert_eq!(group.get_state(&id("coronal")), Some(LogicalState::IDENTITY));
        assert_eq!(recorder.applied.lock().unwrap().len(), 1);
    }

    #[test]
    fn broadcast_applies_the_same_partial_update_everywhere() {
        let (mut group, recorder) = group(&["axial", "coronal", "sagittal"]);
        group.update_state(&id("coronal"), &LogicalStatePatch::pan([5.0, 5.0]), false);

        group.update_state(&id("axial"), &LogicalStatePatch::zoom(3.0), true);

        for member in ["axial", "coronal", "sagittal"] {
            assert_eq!(group.get_state(&id(member)).map(|state| state.zoom), Some(3.0));
        }
        assert_eq!(
            group.get_state(&id("coronal")).map(|state| state.pan),
            Some([5.0, 5.0])
        );
        assert_eq!(recorder.applied.lock().unwrap().len(), 4);
    }

    #[test]
    fn update_of_unknown_surface_registers_it() {
        let (mut group, _) = group(&[]);

        group.update_state(&id("axial"), &LogicalStatePatch::zoom(1.5), true);

        assert!(group.contains(&id("axial")));
        assert_eq!(group.get_state(&id("axial")).map(|state| state.zoom), Some(1.5));
    }

    #[test]
    fn invalid_zoom_is_ignored() {
        let (mut group, recorder) = group(&["axial", "coronal"]);

        group.update_state(&id("axial"), &LogicalStatePatch::zoom(0.0), true);

        assert_eq!(group.get_state(&id("axial")), Some(LogicalState::IDENTITY));
        assert_eq!(group.get_state(&id("coronal")), Some(LogicalState::IDENTITY));
        assert!(recorder.applied.lock().unwrap().is_empty());
    }

    #[test]
    fn reset_skips_surfaces_already_at_identity() {
        let (mut group, recorder) = group(&["axial", "coronal"]);
        group.update_state(&id("axial"), &LogicalStatePatch::zoom(2.0), false);
        recorder.applied.lock().unwrap().clear();

        group.reset(&[id("axial")]);

        assert_eq!(
            *recorder.applied.lock().unwrap(),
            vec![("axial".to_string(), LogicalState::IDENTITY)]
        );
    }

    #[test]
    fn reset_restores_identity_and_notifies_each_surface_once() {
        let (mut group, recorder) = group(&["axial", "coronal", "sagittal"]);
        group.update_state(
            &id("axial"),
            &LogicalStatePatch::full(LogicalState {
                zoom: 4.0,
                pan: [1.0, 2.0],
            }),
            true,
        );
        recorder.applied.lock().unwrap().clear();

        group.reset(&[id("axial")]);

        for member in ["axial", "coronal", "sagittal"] {
            assert_eq!(group.get_state(&id(member)), Some(LogicalState::IDENTITY));
        }
        let applied = recorder.applied.lock().unwrap();
        assert_eq!(applied.len(), 3);
        assert_eq!(applied[0].0, "axial");
    }

    #[test]
    fn reset_of_nothing_changes_nothing() {
        let (mut group, recorder) = group(&["axial"]);
        group.update_state(&id("axial"), &LogicalStatePatch::zoom(2.0), false);
        recorder.applied.lock().unwrap().clear();

        group.reset(&[]);

        assert_eq!(group.get_state(&id("axial")).map(|state| state.zoom), Some(2.0));
        assert!(recorder.applied.lock().unwrap().is_empty());
    }

    #[test]
    fn unregistered_surface_is_left_out_of_broadcasts() {
        let (mut group, _) = group(&["axial", "coronal"]);

        assert!(group.unregister(&id("coronal")).is_some());
        group.update_state(&id("axial"), &LogicalStatePatch::zoom(2.0), true);

        assert_eq!(group.members().count(), 1);
        assert_eq!(group.get_state(&id("coronal")), None);
    }
}
