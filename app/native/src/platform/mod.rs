//! macOS host integration.
//!
//! - [`accessibility`] - `AXUIElement` windows
//! - [`event_tap`] - Modifier and pointer event taps
//! - [`permissions`] - Accessibility trust checks
//! - [`process`] - Frontmost application and activation
//! - [`screen`] - Usable display frames
//! - [`timebase`] - Event timestamp conversion
//!
//! Both taps are attached to the main thread's run loop. The engine lives in
//! a thread-local slot on that thread, so every callback reaches it serially.

mod accessibility;
mod event_tap;
pub mod permissions;
mod process;
mod screen;
mod timebase;

use std::cell::RefCell;

use core_foundation::runloop::CFRunLoop;
use tracing::{info, trace, warn};

pub use accessibility::AXElement;
use event_tap::{CGEventRef, EventTap, FLAGS_CHANGED_MASK, MOUSE_MOVED_MASK};

use crate::config::ModMoveConfig;
use crate::error::ModMoveError;
use crate::mover::{
    Engine, EngineSettings, IntentClassifier, IntentState, Point, PointerFeed, ProcessActivator,
    ScreenFrame, ScreenQuery, WindowLocator,
};

// NSScreen, NSWorkspace and NSRunningApplication live in AppKit.
#[link(name = "AppKit", kind = "framework")]
unsafe extern "C" {}

// ============================================================================
// Platform
// ============================================================================

/// The live macOS implementation of the engine's capabilities.
#[derive(Debug, Default)]
pub struct MacPlatform;

impl WindowLocator for MacPlatform {
    type Window = AXElement;

    fn window_at(&self, point: Point) -> Option<AXElement> {
        AXElement::system_wide()?.element_at(point)?.window()
    }
}

impl ScreenQuery for MacPlatform {
    fn screen_frame(&self, point: Point) -> Option<ScreenFrame> { screen::screen_frame(point) }
}

impl ProcessActivator for MacPlatform {
    fn frontmost_pid(&self) -> Option<i32> { process::frontmost_pid() }

    fn activate(&self, pid: i32) -> bool { process::activate(pid) }
}

impl PointerFeed for MacPlatform {
    type Subscription = EventTap;

    fn subscribe(&mut self, intent: IntentState) -> Option<EventTap> {
        EventTap::install(intent.as_str(), MOUSE_MOVED_MASK, on_pointer_event)
            .inspect_err(|err| warn!(error = %err, "platform: pointer tap unavailable"))
            .ok()
    }
}

// ============================================================================
// Agent
// ============================================================================

/// Everything the tap callbacks need.
struct Agent {
    engine: Engine<MacPlatform>,
    classifier: IntentClassifier,
}

thread_local! {
    static AGENT: RefCell<Option<Agent>> = const { RefCell::new(None) };
}

/// Runs `f` against the installed agent inside an autorelease pool.
///
/// Events delivered while the agent is already borrowed are dropped.
fn with_agent(f: impl FnOnce(&mut Agent)) {
    objc::rc::autoreleasepool(|| {
        AGENT.with(|slot| match slot.try_borrow_mut() {
            Ok(mut agent) => {
                if let Some(agent) = agent.as_mut() {
                    f(agent);
                }
            }
            Err(_) => trace!("platform: dropping reentrant event"),
        });
    });
}

fn on_flags_event(event: CGEventRef) {
    let flags = event_tap::event_flags(event);
    with_agent(|agent| {
        let intent = agent.classifier.classify(flags);
        agent.engine.set_intent(intent);
    });
}

fn on_pointer_event(event: CGEventRef) {
    let sample = event_tap::pointer_sample(event);
    with_agent(|agent| agent.engine.handle_pointer(sample));
}

/// Starts the agent on the current thread and blocks in its run loop.
///
/// # Errors
///
/// Returns an error if the modifier tap cannot be installed.
pub fn run(config: &ModMoveConfig) -> Result<(), ModMoveError> {
    if !permissions::check_and_prompt() {
        warn!(
            "accessibility access is not granted; enable it under System Settings > \
            Privacy & Security > Accessibility and restart"
        );
    }

    let agent = Agent {
        engine: Engine::new(MacPlatform, EngineSettings::from_config(config)),
        classifier: IntentClassifier::from_config(config),
    };
    AGENT.with(|slot| *slot.borrow_mut() = Some(agent));

    let flags_tap = match EventTap::install("flags", FLAGS_CHANGED_MASK, on_flags_event) {
        Ok(tap) => tap,
        Err(err) => {
            AGENT.with(|slot| slot.borrow_mut().take());
            return Err(err);
        }
    };

    info!("modmove: running");
    CFRunLoop::run_current();

    drop(flags_tap);
    // Dropping the engine releases any pointer tap it still holds.
    AGENT.with(|slot| slot.borrow_mut().take());
    info!("modmove: stopped");

    Ok(())
}
