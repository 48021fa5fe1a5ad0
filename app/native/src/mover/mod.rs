//! Modifier-driven window moving and resizing.
//!
//! This module holds the platform-independent manipulation logic. Holding the
//! drag modifiers moves the window under the pointer; holding the resize
//! modifiers resizes it from the nearest corner. Movement is clamped to the
//! usable screen frame unless the pointer moves fast or the window already
//! sticks out of the screen.
//!
//! # Modules
//!
//! - [`geometry`] - Points, sizes, rectangles and screen frames
//! - [`corner`] - Which corner a resize grabs
//! - [`speed`] - Smoothed pointer speed
//! - [`constraint`] - Screen-edge clamping and delta application
//! - [`session`] - Baseline captured when a gesture starts
//! - [`intent`] - Intent states and modifier classification
//! - [`platform`] - Capabilities consumed from the host
//! - [`engine`] - The state machine tying everything together

pub mod constraint;
pub mod corner;
pub mod engine;
pub mod geometry;
pub mod intent;
pub mod platform;
pub mod session;
pub mod speed;

pub use constraint::{ConstraintPolicy, WindowTransform};
pub use corner::Corner;
pub use engine::{Engine, EngineSettings};
pub use geometry::{Point, Rect, ScreenFrame, Size};
pub use intent::{IntentClassifier, IntentState};
pub use platform::{
    Platform, PointerFeed, PointerSample, ProcessActivator, ScreenQuery, WindowHandle,
    WindowLocator,
};
pub use session::ManipulationSession;
pub use speed::SpeedTracker;
