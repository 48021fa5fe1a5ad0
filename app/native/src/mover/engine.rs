//! The manipulation engine.
//!
//! The engine is a small state machine driven by two inputs, both delivered
//! serially on the same thread:
//!
//! - [`Engine::set_intent`] whenever the held modifiers change;
//! - [`Engine::handle_pointer`] for every pointer-movement sample while a
//!   pointer subscription is held.
//!
//! # States
//!
//! | State            | Subscription | Session                  |
//! |------------------|--------------|--------------------------|
//! | Idle (`Ignore`)  | none         | none                     |
//! | Active(`Drag`)   | held         | built on the first sample |
//! | Active(`Resize`) | held         | built on the first sample |
//!
//! Every intent change releases the subscription and discards the session,
//! then re-subscribes if the new intent is active. Switching directly between
//! drag and resize therefore re-anchors the gesture at the next sample instead
//! of continuing it.
//!
//! # Failure Handling
//!
//! Nothing here is fatal. A sample with no window under the pointer, an
//! unreadable window or screen frame, or a failed geometry write only skips
//! that sample; the next sample tries again.

use tracing::{debug, trace, warn};

use super::constraint::{self, ConstraintPolicy, DEFAULT_SPEED_THRESHOLD};
use super::intent::IntentState;
use super::platform::{Platform, PointerSample, WindowHandle, WindowLocator};
use super::session::ManipulationSession;
use super::speed::{DEFAULT_SMOOTHING, SpeedTracker};
use crate::config::ModMoveConfig;

type WindowOf<P> = <P as WindowLocator>::Window;

// ============================================================================
// Settings
// ============================================================================

/// Tunables for the engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineSettings {
    /// When and how much to clamp against the screen edges.
    pub policy: ConstraintPolicy,

    /// Weight of the newest sample in the speed average.
    pub smoothing: f64,

    /// Activate the window's application when a gesture starts on a
    /// background window.
    pub activate_owner: bool,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            policy: ConstraintPolicy::default(),
            smoothing: DEFAULT_SMOOTHING,
            activate_owner: true,
        }
    }
}

impl EngineSettings {
    /// Builds settings from the loaded configuration.
    ///
    /// A non-positive or non-finite speed threshold falls back to the default.
    #[must_use]
    pub fn from_config(config: &ModMoveConfig) -> Self {
        let speed_threshold = if config.speed_threshold.is_finite() && config.speed_threshold > 0.0
        {
            config.speed_threshold
        } else {
            DEFAULT_SPEED_THRESHOLD
        };

        Self {
            policy: ConstraintPolicy {
                speed_threshold,
                enabled: config.constrain_to_screen,
            },
            smoothing: config.smoothing,
            activate_owner: config.activate_owner,
        }
    }
}

// ============================================================================
// Engine
// ============================================================================

/// Converts intent changes and pointer samples into window geometry writes.
pub struct Engine<P: Platform> {
    platform: P,
    settings: EngineSettings,
    intent: IntentState,
    subscription: Option<P::Subscription>,
    /// Window resolved under the pointer whose baseline is not readable yet.
    pending: Option<WindowOf<P>>,
    session: Option<ManipulationSession<WindowOf<P>>>,
    speed: SpeedTracker,
}

impl<P: Platform> Engine<P> {
    /// Creates an idle engine.
    #[must_use]
    pub fn new(platform: P, settings: EngineSettings) -> Self {
        Self {
            platform,
            speed: SpeedTracker::new(settings.smoothing),
            settings,
            intent: IntentState::Ignore,
            subscription: None,
            pending: None,
            session: None,
        }
    }

    /// The current intent.
    #[must_use]
    pub const fn intent(&self) -> IntentState { self.intent }

    /// Whether a pointer subscription is currently held.
    #[must_use]
    pub const fn is_subscribed(&self) -> bool { self.subscription.is_some() }

    /// The live session, if a gesture has started.
    #[must_use]
    pub const fn session(&self) -> Option<&ManipulationSession<WindowOf<P>>> {
        self.session.as_ref()
    }

    /// Smoothed pointer speed in logical pixels per second.
    #[must_use]
    pub const fn speed(&self) -> f64 { self.speed.speed() }

    #[must_use]
    pub const fn settings(&self) -> &EngineSettings { &self.settings }

    /// Applies a new intent.
    ///
    /// Repeating the current intent is a no-op. Any other value releases the
    /// pointer subscription and discards the session; an active intent then
    /// acquires a fresh subscription.
    pub fn set_intent(&mut self, intent: IntentState) {
        if intent == self.intent {
            return;
        }

        debug!(from = self.intent.as_str(), to = intent.as_str(), "mover: intent changed");

        self.intent = intent;
        self.end_session();
        self.release();

        if intent.is_active() {
            self.subscription = self.platform.subscribe(intent);
            if self.subscription.is_none() {
                warn!(intent = intent.as_str(), "mover: pointer subscription unavailable");
            }
        }
    }

    /// Processes one pointer sample.
    pub fn handle_pointer(&mut self, sample: PointerSample) {
        if !self.intent.is_active() {
            return;
        }

        if !sample.position.is_finite() {
            trace!("mover: dropping non-finite pointer sample");
            return;
        }

        if self.session.is_none() {
            self.begin_session(sample);
            return;
        }

        self.update_session(sample);
    }

    /// Returns the engine to idle and releases the subscription.
    pub fn shutdown(&mut self) { self.set_intent(IntentState::Ignore); }

    /// Resolves the target window and captures the baseline.
    fn begin_session(&mut self, sample: PointerSample) {
        let window = match self.pending.take() {
            Some(window) => window,
            None => {
                let Some(window) = self.platform.window_at(sample.position) else {
                    trace!(x = sample.position.x, y = sample.position.y, "mover: no window under pointer");
                    return;
                };
                window
            }
        };

        let Some(screen) = self.platform.screen_frame(sample.position) else {
            trace!("mover: screen frame unavailable");
            self.pending = Some(window);
            return;
        };

        let session =
            match ManipulationSession::capture(window, sample.position, self.intent, screen) {
                Ok(session) => session,
                Err(window) => {
                    trace!("mover: window geometry unavailable");
                    self.pending = Some(window);
                    return;
                }
            };

        self.bring_to_front(session.window());
        self.speed.reset_sample();
        self.speed.record(sample.position, sample.timestamp, screen.scale_factor);

        debug!(
            intent = self.intent.as_str(),
            corner = session.corner().map(|corner| corner.as_str()),
            x = session.baseline().x,
            y = session.baseline().y,
            width = session.baseline().width,
            height = session.baseline().height,
            "mover: session started"
        );

        self.session = Some(session);
    }

    /// Activates the owning process if it is in the background, then raises
    /// the window.
    fn bring_to_front(&self, window: &WindowOf<P>) {
        if self.settings.activate_owner {
            if let Some(pid) = window.pid().filter(|pid| self.platform.frontmost_pid() != Some(*pid))
            {
                if !self.platform.activate(pid) {
                    debug!(pid, "mover: failed to activate window owner");
                }
            }
        }

        if let Err(err) = window.raise() {
            debug!(error = %err, "mover: failed to raise window");
        }
    }

    /// Moves or resizes the session window to follow the pointer.
    fn update_session(&mut self, sample: PointerSample) {
        let Some(session) = self.session.as_ref() else {
            return;
        };

        let screen = session.screen();
        let baseline = session.baseline();
        let speed = self.speed.record(sample.position, sample.timestamp, screen.scale_factor);
        let constrain = self.settings.policy.should_constrain(speed, &baseline, &screen.usable);

        let transform = constraint::transform(
            &baseline,
            session.delta(sample.position),
            session.corner(),
            &screen.usable,
            constrain,
        );

        trace!(speed, constrain, "mover: applying transform");

        if let Err(err) = session.write(&transform) {
            debug!(error = %err, "mover: failed to update window geometry");
        }
    }

    /// Discards the session and any pending window.
    fn end_session(&mut self) {
        if self.session.take().is_some() {
            debug!("mover: session ended");
        }
        self.pending = None;
        self.speed.reset_sample();
    }

    /// Drops the pointer subscription, releasing the hook.
    fn release(&mut self) {
        if self.subscription.take().is_some() {
            trace!("mover: pointer subscription released");
        }
    }
}

impl<P: Platform> Drop for Engine<P> {
    fn drop(&mut self) {
        self.end_session();
        self.release();
    }
}
