use crate::controllers::interaction::heartbeat::InteractionHeartbeat;
use crate::controllers::interaction::session::SessionKind;
use crate::controllers::interaction::wheel_debounce::WheelDebouncer;
use crate::controllers::sync::channel::SyncChannel;
use crate::controllers::sync::context::SyncContext;
use crate::controllers::sync::errors::{ConfigurationError, SyncFailure};
use crate::controllers::sync::guard::SyncGuard;
use crate::controllers::sync::options::{SyncOptions, SyncOptionsPatch};
use crate::core::correspondence::{CorrespondenceMap, CorrespondenceStrategy, IdentityTruncated};
use crate::core::data::ids::SurfaceAddress;
use crate::core::timing::timer_queue::TimerQueue;
use crate::core::timing::timings::SyncTimings;
use crate::core::validation::{clamp_slice_index, validate_camera, validate_intensity_within};
use crate::events::input::InputEvent;
use crate::events::notification::SurfaceNotification;
use crate::ports::errors::SurfaceError;
use crate::ports::listener::SurfaceListener;
use crate::ports::surface::{SubscriptionId, Surface};
use crate::registry::SurfaceRegistry;
use log::{debug, trace, warn};
use std::error::Error as _;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

/// Per-component tolerance when deciding a target camera is already in sync.
const CAMERA_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SyncOutcome {
    Written,
    Unchanged,
}

type SyncResult = Result<SyncOutcome, SyncFailure>;

fn access_failure(channel: SyncChannel, address: &SurfaceAddress, source: SurfaceError) -> SyncFailure {
    SyncFailure::Surface {
        channel,
        address: address.clone(),
        source,
    }
}

fn render_failure(address: &SurfaceAddress, source: SurfaceError) -> SyncFailure {
    SyncFailure::Render {
        address: address.clone(),
        source,
    }
}

fn rejected(channel: SyncChannel, address: &SurfaceAddress) -> SyncFailure {
    SyncFailure::ValidationRejected {
        channel,
        address: address.clone(),
    }
}

fn unsupported(channel: SyncChannel, address: &SurfaceAddress) -> SyncFailure {
    SyncFailure::Unsupported {
        channel,
        address: address.clone(),
    }
}

#[derive(Debug, Default)]
struct Guards {
    camera: SyncGuard,
    slice: SyncGuard,
    intensity: SyncGuard,
}

impl Guards {
    fn get(&self, channel: SyncChannel) -> &SyncGuard {
        match channel {
            SyncChannel::Camera => &self.camera,
            SyncChannel::Slice => &self.slice,
            SyncChannel::Intensity => &self.intensity,
        }
    }

    fn get_mut(&mut self, channel: SyncChannel) -> &mut SyncGuard {
        match channel {
            SyncChannel::Camera => &mut self.camera,
            SyncChannel::Slice => &mut self.slice,
            SyncChannel::Intensity => &mut self.intensity,
        }
    }

    fn clear_all(&mut self, timers: &TimerQueue) {
        for channel in SyncChannel::ALL {
            self.get_mut(channel).clear(timers);
        }
    }
}

struct Subscription {
    surface: Weak<dyn Surface>,
    id: SubscriptionId,
}

/// Exists only while the link is enabled.
struct LinkRuntime {
    subscription: Subscription,
    guards: Guards,
    last_sync: Option<Duration>,
    correspondence: Option<Arc<CorrespondenceMap>>,
    reverse_correspondence: Option<Arc<CorrespondenceMap>>,
    heartbeat: InteractionHeartbeat,
    wheel: WheelDebouncer,
}

struct LinkState {
    options: SyncOptions,
    strategy: Arc<dyn CorrespondenceStrategy>,
    runtime: Option<LinkRuntime>,
}

struct LinkShared {
    source: SurfaceAddress,
    target: SurfaceAddress,
    /// Set for the halves of a bidirectional pair.
    paired: bool,
    registry: SurfaceRegistry,
    timers: TimerQueue,
    timings: SyncTimings,
    state: Mutex<LinkState>,
}

struct LinkListener {
    link: Weak<LinkShared>,
}

impl SurfaceListener for LinkListener {
    fn notify(&self, notification: &SurfaceNotification) {
        if let Some(shared) = self.link.upgrade() {
            shared.handle(notification);
        }
    }
}

/// Propagates camera, slice and intensity state from one surface to another.
///
/// A link is inert until [`enable`](Self::enable) resolves both surfaces and
/// subscribes to the source. Nothing that goes wrong while synchronizing is
/// reported to the caller: failures are logged and the propagation skipped.
pub struct SyncLink {
    shared: Arc<LinkShared>,
}

impl SyncLink {
    pub fn new(
        source_engine_id: &str,
        source_surface_id: &str,
        target_engine_id: &str,
        target_surface_id: &str,
        options: SyncOptions,
        context: &SyncContext,
    ) -> Result<Self, ConfigurationError> {
        let source = SurfaceAddress::new(source_engine_id, source_surface_id)?;
        let target = SurfaceAddress::new(target_engine_id, target_surface_id)?;

        Self::build(source, target, options, context, false)
    }

    pub(crate) fn build(
        source: SurfaceAddress,
        target: SurfaceAddress,
        options: SyncOptions,
        context: &SyncContext,
        paired: bool,
    ) -> Result<Self, ConfigurationError> {
        if source == target {
            return Err(ConfigurationError::SelfLink(source));
        }

        if !context.timings.is_valid() {
            return Err(ConfigurationError::InvalidTimings);
        }

        Ok(Self {
            shared: Arc::new(LinkShared {
                source,
                target,
                paired,
                registry: context.registry.clone(),
                timers: context.timers.clone(),
                timings: context.timings,
                state: Mutex::new(LinkState {
                    options,
                    strategy: Arc::new(IdentityTruncated),
                    runtime: None,
                }),
            }),
        })
    }

    /// Resolves both surfaces and starts listening to the source.
    ///
    /// If either surface is missing the link stays disabled; calling again
    /// later retries. Enabling an enabled link does nothing.
    pub fn enable(&self) {
        self.shared.enable();
    }

    /// Unsubscribes and cancels every pending timer. Idempotent.
    pub fn disable(&self) {
        self.shared.disable();
    }

    /// Merges `patch` into the options, restarting the link if it is enabled.
    pub fn update_options(&self, patch: &SyncOptionsPatch) {
        let enabled = {
            let mut state = self.shared.lock_state();
            state.options.apply(patch);
            state.runtime.is_some()
        };

        if enabled {
            debug!("link {} restarting with new options", self.shared);
            self.disable();
            self.enable();
        }
    }

    /// Uses `strategy` instead of [`IdentityTruncated`] to pair slices.
    #[must_use]
    pub fn with_strategy(self, strategy: Arc<dyn CorrespondenceStrategy>) -> Self {
        self.shared.lock_state().strategy = strategy;
        self
    }

    /// Replaces the correspondence strategy, restarting the link if enabled.
    pub fn set_correspondence_strategy(&self, strategy: Arc<dyn CorrespondenceStrategy>) {
        let enabled = {
            let mut state = self.shared.lock_state();
            state.strategy = strategy;
            state.runtime.is_some()
        };

        if enabled {
            self.disable();
            self.enable();
        }
    }

    /// Steps the source stack by `delta` and carries the target along.
    pub fn request_slice_delta(&self, delta: i64) {
        self.shared.apply_slice_delta(delta);
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.shared.lock_state().runtime.is_some()
    }

    #[must_use]
    pub fn is_syncing(&self, channel: SyncChannel) -> bool {
        self.shared
            .lock_state()
            .runtime
            .as_ref()
            .is_some_and(|runtime| runtime.guards.get(channel).is_armed())
    }

    /// Logical time of the last write to the target during this activation.
    #[must_use]
    pub fn last_sync(&self) -> Option<Duration> {
        self.shared
            .lock_state()
            .runtime
            .as_ref()
            .and_then(|runtime| runtime.last_sync)
    }

    #[must_use]
    pub fn options(&self) -> SyncOptions {
        self.shared.lock_state().options
    }

    #[must_use]
    pub fn correspondence_map(&self) -> Option<Arc<CorrespondenceMap>> {
        self.shared
            .lock_state()
            .runtime
            .as_ref()
            .and_then(|runtime| runtime.correspondence.clone())
    }

    #[must_use]
    pub fn source(&self) -> &SurfaceAddress {
        &self.shared.source
    }

    #[must_use]
    pub fn target(&self) -> &SurfaceAddress {
        &self.shared.target
    }
}

impl fmt::Debug for SyncLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncLink")
            .field("source", &self.shared.source)
            .field("target", &self.shared.target)
            .field("paired", &self.shared.paired)
            .field("active", &self.is_active())
            .finish()
    }
}

impl Drop for SyncLink {
    fn drop(&mut self) {
        self.shared.disable();
    }
}

impl fmt::Display for LinkShared {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.source, self.target)
    }
}

impl LinkShared {
    fn lock_state(&self) -> MutexGuard<'_, LinkState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn active_options(&self) -> Option<SyncOptions> {
        let state = self.lock_state();
        state.runtime.as_ref().map(|_| state.options)
    }

    fn resolve(&self, address: &SurfaceAddress) -> Result<Arc<dyn Surface>, SyncFailure> {
        self.registry
            .resolve_surface(address)
            .ok_or_else(|| SyncFailure::Resolution {
                address: address.clone(),
            })
    }

    fn enable(self: &Arc<Self>) {
        let (options, strategy) = {
            let state = self.lock_state();
            if state.runtime.is_some() {
                trace!("link {self} already enabled");
                return;
            }
            (state.options, Arc::clone(&state.strategy))
        };

        let surfaces = self
            .resolve(&self.source)
            .and_then(|source| self.resolve(&self.target).map(|target| (source, target)));
        let (source, target) = match surfaces {
            Ok(surfaces) => surfaces,
            Err(failure) => {
                warn!("link {self} stays disabled at {:?}: {failure}", self.timers.now());
                return;
            }
        };

        let (correspondence, reverse_correspondence) =
            if options.enable_slice && options.enable_correspondence_mapping {
                self.build_correspondence(source.as_ref(), target.as_ref(), strategy.as_ref())
            } else {
                (None, None)
            };

        let listener: Arc<dyn SurfaceListener> = Arc::new(LinkListener {
            link: Arc::downgrade(self),
        });
        let subscription_id = source.subscribe(listener);

        let runtime = LinkRuntime {
            subscription: Subscription {
                surface: Arc::downgrade(&source),
                id: subscription_id,
            },
            guards: Guards::default(),
            last_sync: None,
            correspondence,
            reverse_correspondence,
            heartbeat: self.heartbeat(),
            wheel: self.wheel_debouncer(),
        };

        let mut state = self.lock_state();
        if state.runtime.is_some() {
            drop(state);
            source.unsubscribe(subscription_id);
            return;
        }
        state.runtime = Some(runtime);
        debug!("link {self} enabled");
    }

    fn disable(&self) {
        let runtime = self.lock_state().runtime.take();
        let Some(mut runtime) = runtime else {
            trace!("link {self} already disabled");
            return;
        };

        runtime.guards.clear_all(&self.timers);
        runtime.heartbeat.end_all();
        runtime.wheel.cancel();

        if let Some(surface) = runtime.subscription.surface.upgrade() {
            surface.unsubscribe(runtime.subscription.id);
        }
        debug!("link {self} disabled");
    }

    fn heartbeat(self: &Arc<Self>) -> InteractionHeartbeat {
        let link = Arc::downgrade(self);

        InteractionHeartbeat::new(
            self.timers.clone(),
            &self.timings,
            Arc::new(move |kind: SessionKind| {
                if let Some(shared) = link.upgrade() {
                    shared.on_session_tick(kind);
                }
            }),
        )
    }

    fn wheel_debouncer(self: &Arc<Self>) -> WheelDebouncer {
        let link = Arc::downgrade(self);

        WheelDebouncer::new(
            self.timers.clone(),
            self.timings.wheel_debounce,
            Arc::new(move |delta: i64| {
                if let Some(shared) = link.upgrade() {
                    shared.apply_slice_delta(delta);
                }
            }),
        )
    }

    fn build_correspondence(
        &self,
        source: &dyn Surface,
        target: &dyn Surface,
        strategy: &dyn CorrespondenceStrategy,
    ) -> (Option<Arc<CorrespondenceMap>>, Option<Arc<CorrespondenceMap>>) {
        let (Some(source_stack), Some(target_stack)) = (source.as_stack(), target.as_stack()) else {
            return (None, None);
        };

        let counts = source_stack
            .slice_count()
            .and_then(|source_count| target_stack.slice_count().map(|target_count| (source_count, target_count)));

        match counts {
            Ok((source_count, target_count)) => {
                let forward = Arc::new(strategy.build(source_count, target_count));
                let reverse = self
                    .paired
                    .then(|| Arc::new(strategy.build(target_count, source_count)));
                (Some(forward), reverse)
            }
            Err(error) => {
                warn!("link {self} has no correspondence map, stack size unavailable: {error}");
                (None, None)
            }
        }
    }

    fn handle(self: &Arc<Self>, notification: &SurfaceNotification) {
        let Some(options) = self.active_options() else {
            return;
        };

        match notification {
            SurfaceNotification::CameraChanged => {
                if let Some(channel) = self.camera_channel(options) {
                    self.propagate(channel);
                }
            }
            SurfaceNotification::IntensityChanged => {
                if options.enable_intensity {
                    self.propagate(SyncChannel::Intensity);
                }
            }
            SurfaceNotification::NewFrameLoaded => {
                if options.enable_slice {
                    self.resync_slice();
                }
            }
            SurfaceNotification::Input(event) => self.handle_input(*event, options),
        }
    }

    /// Channel that carries a change of the source camera: the full camera,
    /// or only its focal point when the source has no discrete stack.
    fn camera_channel(&self, options: SyncOptions) -> Option<SyncChannel> {
        if options.enable_camera {
            return Some(SyncChannel::Camera);
        }

        let continuous = self
            .registry
            .resolve_surface(&self.source)
            .is_some_and(|source| source.as_stack().is_none());

        (options.enable_slice && continuous).then_some(SyncChannel::Slice)
    }

    fn session_channel(&self, kind: SessionKind, options: SyncOptions) -> Option<SyncChannel> {
        match kind {
            SessionKind::Camera => self.camera_channel(options),
            SessionKind::Intensity => options.enable_intensity.then_some(SyncChannel::Intensity),
        }
    }

    fn handle_input(self: &Arc<Self>, event: InputEvent, options: SyncOptions) {
        let mut ended = Vec::new();
        let mut key_delta = None;

        {
            let mut state = self.lock_state();
            let Some(runtime) = state.runtime.as_mut() else {
                return;
            };

            // Ticks before a press opens its own session, so a press alone
            // arms no timer.
            if !event.ends_session() {
                runtime.heartbeat.tick_if_active();
            }

            match event {
                InputEvent::PointerDown { button } => {
                    runtime.heartbeat.start(SessionKind::for_button(button));
                }
                InputEvent::TouchStart => runtime.heartbeat.start(SessionKind::Camera),
                InputEvent::PointerMove | InputEvent::TouchMove => {}
                InputEvent::PointerUp { button } => {
                    let kind = SessionKind::for_button(button);
                    if runtime.heartbeat.end(kind) {
                        ended.push(kind);
                    }
                }
                InputEvent::TouchEnd => {
                    if runtime.heartbeat.end(SessionKind::Camera) {
                        ended.push(SessionKind::Camera);
                    }
                }
                InputEvent::PointerLeave => ended = runtime.heartbeat.end_all(),
                InputEvent::Wheel { delta_y } => {
                    if options.enable_slice {
                        runtime.wheel.push(delta_y);
                    }
                }
                InputEvent::KeyDown(key) => key_delta = key.slice_delta(),
            }
        }

        // Land the target on the state the interaction ended with.
        for kind in ended {
            if let Some(channel) = self.session_channel(kind, options) {
                self.run(channel, true);
            }
        }

        if let Some(delta) = key_delta {
            self.apply_slice_delta(delta);
        }
    }

    fn on_session_tick(self: &Arc<Self>, kind: SessionKind) {
        let Some(options) = self.active_options() else {
            return;
        };

        if let Some(channel) = self.session_channel(kind, options) {
            self.propagate(channel);
        }
    }

    fn propagate(self: &Arc<Self>, channel: SyncChannel) {
        self.run(channel, false);
    }

    /// Guarded propagation. When the guard is armed the call is dropped, or,
    /// with `defer_if_busy`, replayed once the guard opens.
    fn run(self: &Arc<Self>, channel: SyncChannel, defer_if_busy: bool) {
        let armed = {
            let mut state = self.lock_state();
            match state.runtime.as_mut() {
                Some(runtime) => {
                    let guard = runtime.guards.get_mut(channel);
                    let armed = guard.try_arm();
                    if !armed && defer_if_busy {
                        guard.request_trailing();
                    }
                    armed
                }
                None => false,
            }
        };

        if !armed {
            trace!("link {self} {channel} guard armed, propagation dropped");
            return;
        }

        let result = match channel {
            SyncChannel::Camera => self.write_camera(),
            SyncChannel::Slice => self.sync_slice_to_source(),
            SyncChannel::Intensity => self.write_intensity(),
        };

        self.finish(channel, result);
    }

    fn finish(self: &Arc<Self>, channel: SyncChannel, result: SyncResult) {
        self.record(channel, &result);

        let link = Arc::downgrade(self);
        let mut state = self.lock_state();
        let Some(runtime) = state.runtime.as_mut() else {
            return;
        };

        let handle = self.timers.schedule_once(self.timings.guard_release, move || {
            if let Some(shared) = link.upgrade() {
                shared.release_guard(channel);
            }
        });
        runtime.guards.get_mut(channel).set_release(handle, &self.timers);
    }

    fn release_guard(self: &Arc<Self>, channel: SyncChannel) {
        let trailing = {
            let mut state = self.lock_state();
            let options = state.options;
            match state.runtime.as_mut() {
                Some(runtime) => runtime.guards.get_mut(channel).release() && options.allows(channel),
                None => false,
            }
        };

        if trailing {
            self.propagate(channel);
        }
    }

    fn record(&self, channel: SyncChannel, result: &SyncResult) {
        let now = self.timers.now();

        match result {
            Ok(SyncOutcome::Written) => {
                if let Some(runtime) = self.lock_state().runtime.as_mut() {
                    runtime.last_sync = Some(now);
                }
                trace!("link {self} synced {channel} at {now:?}");
            }
            Ok(SyncOutcome::Unchanged) => {
                trace!("link {self} {channel} already in sync at {now:?}");
            }
            Err(failure @ SyncFailure::Unsupported { .. }) => {
                debug!("link {self} skipped {channel} at {now:?}: {failure}");
            }
            Err(failure) => match failure.source() {
                Some(cause) => warn!("link {self} skipped {channel} at {now:?}: {failure}: {cause}"),
                None => warn!("link {self} skipped {channel} at {now:?}: {failure}"),
            },
        }
    }

    fn write_camera(&self) -> SyncResult {
        let source = self.resolve(&self.source)?;
        let target = self.resolve(&self.target)?;

        let candidate = source
            .camera()
            .map_err(|error| access_failure(SyncChannel::Camera, &self.source, error))?;
        let camera = validate_camera(&candidate).ok_or_else(|| rejected(SyncChannel::Camera, &self.source))?;

        let current = target.camera().ok().and_then(|current| validate_camera(&current));
        if current.is_some_and(|current| current.approx_eq(&camera, CAMERA_EPSILON)) {
            return Ok(SyncOutcome::Unchanged);
        }

        target
            .set_camera(&camera)
            .map_err(|error| access_failure(SyncChannel::Camera, &self.target, error))?;
        target
            .render()
            .map_err(|error| render_failure(&self.target, error))?;

        Ok(SyncOutcome::Written)
    }

    fn write_intensity(&self) -> SyncResult {
        let source = self.resolve(&self.source)?;
        let target = self.resolve(&self.target)?;

        let source_intensity = source
            .as_intensity()
            .ok_or_else(|| unsupported(SyncChannel::Intensity, &self.source))?;
        let target_intensity = target
            .as_intensity()
            .ok_or_else(|| unsupported(SyncChannel::Intensity, &self.target))?;

        let candidate = source_intensity
            .intensity_range()
            .map_err(|error| access_failure(SyncChannel::Intensity, &self.source, error))?;
        let range = validate_intensity_within(&candidate, self.timings.max_intensity_window)
            .ok_or_else(|| rejected(SyncChannel::Intensity, &self.source))?;

        if target_intensity.intensity_range().ok() == Some(range) {
            return Ok(SyncOutcome::Unchanged);
        }

        target_intensity
            .set_intensity_range(&range)
            .map_err(|error| access_failure(SyncChannel::Intensity, &self.target, error))?;
        target
            .render()
            .map_err(|error| render_failure(&self.target, error))?;

        Ok(SyncOutcome::Written)
    }

    /// Brings the target to the source's current slice position.
    fn sync_slice_to_source(&self) -> SyncResult {
        let source = self.resolve(&self.source)?;

        match source.as_stack() {
            Some(stack) => {
                let index = stack
                    .slice_index()
                    .map_err(|error| access_failure(SyncChannel::Slice, &self.source, error))?;
                let count = stack
                    .slice_count()
                    .map_err(|error| access_failure(SyncChannel::Slice, &self.source, error))?;
                self.write_slice(index, count)
            }
            None => self.write_focal_point(source.as_ref()),
        }
    }

    /// Re-sync after the source reports a new frame. Bypasses the guard, so
    /// the target lands on the source's current slice however that slice
    /// was reached.
    fn resync_slice(&self) {
        let result = self.sync_slice_to_source();
        self.record(SyncChannel::Slice, &result);
    }

    fn apply_slice_delta(self: &Arc<Self>, delta: i64) {
        let Some(options) = self.active_options() else {
            return;
        };
        if !options.enable_slice || delta == 0 {
            return;
        }

        // User deltas always step the source; an armed guard only asks for
        // one more target sync once it opens.
        {
            let mut state = self.lock_state();
            let Some(runtime) = state.runtime.as_mut() else {
                return;
            };
            let guard = runtime.guards.get_mut(SyncChannel::Slice);
            if !guard.try_arm() {
                guard.request_trailing();
                trace!("link {self} slice guard armed, delta {delta} stepped with trailing sync");
            }
        }

        let result = self.step_source(delta);
        self.finish(SyncChannel::Slice, result);
    }

    fn step_source(&self, delta: i64) -> SyncResult {
        let source = self.resolve(&self.source)?;

        if let Some(stack) = source.as_stack() {
            let count = stack
                .slice_count()
                .map_err(|error| access_failure(SyncChannel::Slice, &self.source, error))?;
            let current = stack
                .slice_index()
                .map_err(|error| access_failure(SyncChannel::Slice, &self.source, error))?;
            let index = clamp_slice_index(current, delta, count)
                .ok_or_else(|| rejected(SyncChannel::Slice, &self.source))?;

            if index != current {
                stack
                    .set_slice_index(index)
                    .map_err(|error| access_failure(SyncChannel::Slice, &self.source, error))?;
                self.render_source(source.as_ref());
            }

            return self.write_slice(index, count);
        }

        let scroll = source
            .as_scrollable()
            .ok_or_else(|| unsupported(SyncChannel::Slice, &self.source))?;
        scroll
            .scroll_by(delta)
            .map_err(|error| access_failure(SyncChannel::Slice, &self.source, error))?;
        self.render_source(source.as_ref());

        self.write_focal_point(source.as_ref())
    }

    fn render_source(&self, source: &dyn Surface) {
        if let Err(error) = source.render() {
            warn!("link {self} could not render source {}: {error}", self.source);
        }
    }

    fn write_slice(&self, source_index: usize, source_count: usize) -> SyncResult {
        let target = self.resolve(&self.target)?;
        let stack = target
            .as_stack()
            .ok_or_else(|| unsupported(SyncChannel::Slice, &self.target))?;

        let target_count = stack
            .slice_count()
            .map_err(|error| access_failure(SyncChannel::Slice, &self.target, error))?;
        let current = stack
            .slice_index()
            .map_err(|error| access_failure(SyncChannel::Slice, &self.target, error))?;

        let (forward, reverse) = self
            .lock_state()
            .runtime
            .as_ref()
            .map(|runtime| {
                (
                    runtime.correspondence.clone(),
                    runtime.reverse_correspondence.clone(),
                )
            })
            .unwrap_or_default();

        let index = CorrespondenceMap::resolve(forward.as_deref(), source_index, target_count)
            .ok_or_else(|| rejected(SyncChannel::Slice, &self.target))?;
        if index == current {
            return Ok(SyncOutcome::Unchanged);
        }

        // In a pair, the reverse link already maps the target's slice onto
        // the source's; writing would drag the other pane off its position.
        if self.paired
            && CorrespondenceMap::resolve(reverse.as_deref(), current, source_count) == Some(source_index)
        {
            return Ok(SyncOutcome::Unchanged);
        }

        stack
            .set_slice_index(index)
            .map_err(|error| access_failure(SyncChannel::Slice, &self.target, error))?;
        target
            .render()
            .map_err(|error| render_failure(&self.target, error))?;

        Ok(SyncOutcome::Written)
    }

    /// Continuous addressing: slide the target along its own view plane
    /// normal until its focal plane contains the source focal point.
    fn write_focal_point(&self, source: &dyn Surface) -> SyncResult {
        let target = self.resolve(&self.target)?;

        let source_camera = source
            .camera()
            .map_err(|error| access_failure(SyncChannel::Slice, &self.source, error))?;
        let source_camera =
            validate_camera(&source_camera).ok_or_else(|| rejected(SyncChannel::Slice, &self.source))?;

        let target_camera = target
            .camera()
            .map_err(|error| access_failure(SyncChannel::Slice, &self.target, error))?;
        let target_camera =
            validate_camera(&target_camera).ok_or_else(|| rejected(SyncChannel::Slice, &self.target))?;

        let moved = target_camera.translated_to_plane_of(source_camera.focal_point);
        if moved.approx_eq(&target_camera, CAMERA_EPSILON) {
            return Ok(SyncOutcome::Unchanged);
        }
        let moved = validate_camera(&moved).ok_or_else(|| rejected(SyncChannel::Slice, &self.target))?;

        target
            .set_camera(&moved)
            .map_err(|error| access_failure(SyncChannel::Slice, &self.target, error))?;
        target
            .render()
            .map_err(|error| render_failure(&self.target, error))?;

        Ok(SyncOutcome::Written)
    }
}
