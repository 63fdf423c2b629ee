use crate::core::data::camera::Camera;
use crate::core::data::intensity_range::IntensityRange;
use crate::events::notification::SurfaceNotification;
use crate::ports::errors::SurfaceError;
use crate::ports::listener::SurfaceListener;
use crate::ports::surface::{IntensitySurface, ScrollSurface, StackSurface, SubscriptionId, Surface};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// World-space distance moved per unit of `scroll_by` on a continuous surface.
pub const SLICE_SPACING: f64 = 1.0;

const DEFAULT_INTENSITY: IntensityRange = IntensityRange::new(0.0, 255.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Addressing {
    Stack,
    Continuous,
}

/// Writes and renders performed through the [`Surface`] ports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WriteCounts {
    pub camera: usize,
    pub slice: usize,
    pub intensity: usize,
    pub renders: usize,
}

#[derive(Debug)]
struct SurfaceState {
    camera: Camera,
    intensity: IntensityRange,
    slice_index: usize,
    slice_count: usize,
    counts: WriteCounts,
    fail_reads: bool,
    fail_writes: bool,
    fail_renders: bool,
}

/// Headless surface keeping its state in memory.
///
/// Every successful port write notifies subscribers synchronously, the way
/// a renderer fires its own "modified" events as a side effect of a write.
/// The `*_quiet` setters change state without notifying or counting, which
/// stands in for the host mutating the surface behind the engine's back.
pub struct MemorySurface {
    addressing: Addressing,
    has_intensity: bool,
    state: Mutex<SurfaceState>,
    listeners: Mutex<Vec<(SubscriptionId, Arc<dyn SurfaceListener>)>>,
    next_subscription: AtomicU64,
}

impl MemorySurface {
    /// A surface addressing `slice_count` discrete frames, starting at 0.
    #[must_use]
    pub fn stack(slice_count: usize) -> Self {
        Self::build(Addressing::Stack, slice_count)
    }

    /// A surface without a stack, navigated through its focal point.
    #[must_use]
    pub fn volume() -> Self {
        Self::build(Addressing::Continuous, 0)
    }

    fn build(addressing: Addressing, slice_count: usize) -> Self {
        Self {
            addressing,
            has_intensity: true,
            state: Mutex::new(SurfaceState {
                camera: Camera::default(),
                intensity: DEFAULT_INTENSITY,
                slice_index: 0,
                slice_count,
                counts: WriteCounts::default(),
                fail_reads: false,
                fail_writes: false,
                fail_renders: false,
            }),
            listeners: Mutex::new(Vec::new()),
            next_subscription: AtomicU64::new(0),
        }
    }

    #[must_use]
    pub fn without_intensity(mut self) -> Self {
        self.has_intensity = false;
        self
    }

    #[must_use]
    pub fn with_camera(self, camera: Camera) -> Self {
        self.lock_state().camera = camera;
        self
    }

    #[must_use]
    pub fn with_intensity(self, range: IntensityRange) -> Self {
        self.lock_state().intensity = range;
        self
    }

    #[must_use]
    pub fn with_slice_index(self, index: usize) -> Self {
        {
            let mut state = self.lock_state();
            state.slice_index = index.min(state.slice_count.saturating_sub(1));
        }
        self
    }

    #[must_use]
    pub fn current_camera(&self) -> Camera {
        self.lock_state().camera
    }

    #[must_use]
    pub fn current_intensity(&self) -> IntensityRange {
        self.lock_state().intensity
    }

    #[must_use]
    pub fn current_slice_index(&self) -> usize {
        self.lock_state().slice_index
    }

    #[must_use]
    pub fn current_slice_count(&self) -> usize {
        self.lock_state().slice_count
    }

    #[must_use]
    pub fn write_counts(&self) -> WriteCounts {
        self.lock_state().counts
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.lock_listeners().len()
    }

    pub fn set_camera_quiet(&self, camera: Camera) {
        self.lock_state().camera = camera;
    }

    pub fn set_intensity_quiet(&self, range: IntensityRange) {
        self.lock_state().intensity = range;
    }

    pub fn set_slice_index_quiet(&self, index: usize) {
        let mut state = self.lock_state();
        state.slice_index = index.min(state.slice_count.saturating_sub(1));
    }

    pub fn set_slice_count(&self, slice_count: usize) {
        let mut state = self.lock_state();
        state.slice_count = slice_count;
        state.slice_index = state.slice_index.min(slice_count.saturating_sub(1));
    }

    pub fn fail_reads(&self, fail: bool) {
        self.lock_state().fail_reads = fail;
    }

    pub fn fail_writes(&self, fail: bool) {
        self.lock_state().fail_writes = fail;
    }

    pub fn fail_renders(&self, fail: bool) {
        self.lock_state().fail_renders = fail;
    }

    /// Delivers `notification` to every subscriber, as the host's own event
    /// dispatch would.
    pub fn emit(&self, notification: SurfaceNotification) {
        let listeners: Vec<Arc<dyn SurfaceListener>> = self
            .lock_listeners()
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();

        for listener in listeners {
            listener.notify(&notification);
        }
    }

    fn read<T>(&self, read: impl FnOnce(&SurfaceState) -> T) -> Result<T, SurfaceError> {
        let state = self.lock_state();
        if state.fail_reads {
            return Err(SurfaceError::NotReady("reads disabled".to_string()));
        }

        Ok(read(&state))
    }

    fn write(
        &self,
        notification: SurfaceNotification,
        write: impl FnOnce(&mut SurfaceState) -> Result<(), SurfaceError>,
    ) -> Result<(), SurfaceError> {
        {
            let mut state = self.lock_state();
            if state.fail_writes {
                return Err(SurfaceError::Rejected("writes disabled".to_string()));
            }
            write(&mut state)?;
        }

        self.emit(notification);
        Ok(())
    }

    fn lock_state(&self) -> MutexGuard<'_, SurfaceState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_listeners(&self) -> MutexGuard<'_, Vec<(SubscriptionId, Arc<dyn SurfaceListener>)>> {
        self.listeners.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Surface for MemorySurface {
    fn camera(&self) -> Result<Camera, SurfaceError> {
        self.read(|state| state.camera)
    }

    fn set_camera(&self, camera: &Camera) -> Result<(), SurfaceError> {
        self.write(SurfaceNotification::CameraChanged, |state| {
            state.camera = *camera;
            state.counts.camera += 1;
            Ok(())
        })
    }

    fn render(&self) -> Result<(), SurfaceError> {
        let mut state = self.lock_state();
        if state.fail_renders {
            return Err(SurfaceError::Render("renders disabled".to_string()));
        }

        state.counts.renders += 1;
        Ok(())
    }

    fn subscribe(&self, listener: Arc<dyn SurfaceListener>) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription.fetch_add(1, Ordering::Relaxed) + 1);
        self.lock_listeners().push((id, listener));

        id
    }

    fn unsubscribe(&self, subscription: SubscriptionId) -> bool {
        let mut listeners = self.lock_listeners();
        let before = listeners.len();
        listeners.retain(|(id, _)| *id != subscription);

        listeners.len() != before
    }

    fn as_stack(&self) -> Option<&dyn StackSurface> {
        (self.addressing == Addressing::Stack).then_some(self as &dyn StackSurface)
    }

    fn as_intensity(&self) -> Option<&dyn IntensitySurface> {
        self.has_intensity.then_some(self as &dyn IntensitySurface)
    }

    fn as_scrollable(&self) -> Option<&dyn ScrollSurface> {
        (self.addressing == Addressing::Continuous).then_some(self as &dyn ScrollSurface)
    }
}

impl StackSurface for MemorySurface {
    fn slice_index(&self) -> Result<usize, SurfaceError> {
        self.read(|state| state.slice_index)
    }

    fn set_slice_index(&self, index: usize) -> Result<(), SurfaceError> {
        self.write(SurfaceNotification::NewFrameLoaded, |state| {
            if index >= state.slice_count {
                return Err(SurfaceError::Rejected(format!(
                    "slice {index} outside stack of {}",
                    state.slice_count
                )));
            }

            state.slice_index = index;
            state.counts.slice += 1;
            Ok(())
        })
    }

    fn slice_count(&self) -> Result<usize, SurfaceError> {
        self.read(|state| state.slice_count)
    }
}

impl IntensitySurface for MemorySurface {
    fn intensity_range(&self) -> Result<IntensityRange, SurfaceError> {
        self.read(|state| state.intensity)
    }

    fn set_intensity_range(&self, range: &IntensityRange) -> Result<(), SurfaceError> {
        self.write(SurfaceNotification::IntensityChanged, |state| {
            state.intensity = *range;
            state.counts.intensity += 1;
            Ok(())
        })
    }
}

impl ScrollSurface for MemorySurface {
    fn scroll_by(&self, delta: i64) -> Result<(), SurfaceError> {
        self.write(SurfaceNotification::CameraChanged, |state| {
            let shift = state.camera.view_plane_normal * (delta as f64 * SLICE_SPACING);
            state.camera.position = state.camera.position + shift;
            state.camera.focal_point = state.camera.focal_point + shift;
            state.counts.camera += 1;
            Ok(())
        })
    }
}

impl fmt::Debug for MemorySurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemorySurface")
            .field("addressing", &self.addressing)
            .field("has_intensity", &self.has_intensity)
            .field("state", &*self.lock_state())
            .field("listeners", &self.listener_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::vec3::Vec3;

    #[derive(Default)]
    struct Recorder {
        seen: Mutex<Vec<SurfaceNotification>>,
    }

    impl SurfaceListener for Recorder {
        fn notify(&self, notification: &SurfaceNotification) {
            self.seen.lock().unwrap().push(*notification);
        }
    }

    #[test]
    fn capabilities_follow_addressing_mode() {
        let stack = MemorySurface::stack(4);
        let volume = MemorySurface::volume().without_intensity();

        assert!(stack.as_stack().is_some());
        assert!(stack.as_scrollable().is_none());
        assert!(stack.as_intensity().is_some());

        assert!(volume.as_stack().is_none());
        assert!(volume.as_scrollable().is_some());
        assert!(volume.as_intensity().is_none());
    }

    #[test]
    fn port_writes_notify_and_count() {
        let surface = MemorySurface::stack(4);
        let recorder = Arc::new(Recorder::default());
        let _ = surface.subscribe(Arc::clone(&recorder) as Arc<dyn SurfaceListener>);

        surface.set_camera(&Camera::default()).unwrap();
        surface.set_slice_index(2).unwrap();
        surface
            .set_intensity_range(&IntensityRange::new(-100.0, 100.0))
            .unwrap();
        surface.render().unwrap();

        assert_eq!(
            *recorder.seen.lock().unwrap(),
            vec![
                SurfaceNotification::CameraChanged,
                SurfaceNotification::NewFrameLoaded,
                SurfaceNotification::IntensityChanged,
            ]
        );
        assert_eq!(
            surface.write_counts(),
            WriteCounts {
                camera: 1,
                slice: 1,
                intensity: 1,
                renders: 1,
            }
        );
    }

    #[test]
    fn quiet_setters_do_not_notify() {
        let surface = MemorySurface::stack(4);
        let recorder = Arc::new(Recorder::default());
        let _ = surface.subscribe(Arc::clone(&recorder) as Arc<dyn SurfaceListener>);

        surface.set_slice_index_quiet(9);
        surface.set_camera_quiet(Camera::default());

        assert!(recorder.seen.lock().unwrap().is_empty());
        assert_eq!(surface.current_slice_index(), 3);
        assert_eq!(surface.write_counts(), WriteCounts::default());
    }

    #[test]
    fn out_of_range_slice_is_rejected_without_notification() {
        let surface = MemorySurface::stack(4);
        let recorder = Arc::new(Recorder::default());
        let _ = surface.subscribe(Arc::clone(&recorder) as Arc<dyn SurfaceListener>);

        assert!(matches!(
            surface.set_slice_index(4),
            Err(SurfaceError::Rejected(_))
        ));
        assert!(recorder.seen.lock().unwrap().is_empty());
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let surface = MemorySurface::volume();
        let recorder = Arc::new(Recorder::default());
        let id = surface.subscribe(Arc::clone(&recorder) as Arc<dyn SurfaceListener>);

        assert!(surface.unsubscribe(id));
        assert!(!surface.unsubscribe(id));
        surface.set_camera(&Camera::default()).unwrap();

        assert!(recorder.seen.lock().unwrap().is_empty());
        assert_eq!(surface.listener_count(), 0);
    }

    #[test]
    fn scroll_moves_focal_point_along_normal() {
        let surface = MemorySurface::volume();

        surface.scroll_by(3).unwrap();

        let camera = surface.current_camera();
        assert_eq!(camera.focal_point, Vec3::new(0.0, 0.0, 3.0));
        assert_eq!(camera.position, Vec3::new(0.0, 0.0, 4.0));
    }

    #[test]
    fn failure_switches_surface_errors() {
        let surface = MemorySurface::stack(2);

        surface.fail_reads(true);
        assert!(matches!(surface.camera(), Err(SurfaceError::NotReady(_))));

        surface.fail_writes(true);
        assert!(matches!(
            surface.set_camera(&Camera::default()),
            Err(SurfaceError::Rejected(_))
        ));

        surface.fail_renders(true);
        assert!(matches!(surface.render(), Err(SurfaceError::Render(_))));
    }
}
