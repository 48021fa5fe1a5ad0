//! Manipulation intent and its derivation from held modifier keys.

use crate::config::ModMoveConfig;

/// What the user currently asks the mover to do with the window under the
/// pointer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum IntentState {
    /// No manipulation; pointer movement is not observed.
    #[default]
    Ignore,
    /// Move the window rigidly with the pointer.
    Drag,
    /// Resize the window from the corner nearest the pointer.
    Resize,
}

impl IntentState {
    /// Returns true for [`IntentState::Drag`] and [`IntentState::Resize`].
    #[must_use]
    pub const fn is_active(self) -> bool { !matches!(self, Self::Ignore) }

    /// Returns the intent name as a static string, used in log fields.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ignore => "ignore",
            Self::Drag => "drag",
            Self::Resize => "resize",
        }
    }
}

/// Modifier flag bits as reported by Core Graphics (`CGEventFlags`).
pub mod flags {
    pub const SHIFT: u64 = 0x0002_0000;
    pub const CONTROL: u64 = 0x0004_0000;
    pub const OPTION: u64 = 0x0008_0000;
    pub const COMMAND: u64 = 0x0010_0000;
}

/// Maps the currently held modifier flags to an [`IntentState`].
///
/// The resize combination is checked first, so it may be a superset of the
/// drag combination. Modifiers outside a combination are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntentClassifier {
    drag_mask: u64,
    resize_mask: u64,
}

impl Default for IntentClassifier {
    fn default() -> Self {
        Self::new(flags::CONTROL | flags::OPTION, flags::CONTROL | flags::OPTION | flags::SHIFT)
    }
}

impl IntentClassifier {
    /// Creates a classifier from the required flag masks.
    #[must_use]
    pub const fn new(drag_mask: u64, resize_mask: u64) -> Self { Self { drag_mask, resize_mask } }

    /// Creates a classifier from the configured modifier combinations.
    #[must_use]
    pub fn from_config(config: &ModMoveConfig) -> Self {
        Self::new(config.drag.required_flags(), config.resize.required_flags())
    }

    /// Classifies a modifier flag bitmask.
    #[must_use]
    pub const fn classify(&self, modifier_flags: u64) -> IntentState {
        if Self::holds(modifier_flags, self.resize_mask) {
            IntentState::Resize
        } else if Self::holds(modifier_flags, self.drag_mask) {
            IntentState::Drag
        } else {
            IntentState::Ignore
        }
    }

    /// An empty mask never matches, otherwise every bit must be held.
    const fn holds(modifier_flags: u64, mask: u64) -> bool {
        mask != 0 && modifier_flags & mask == mask
    }
}

#[cfg(test)]
mod tests {
    use super::flags::{COMMAND, CONTROL, OPTION, SHIFT};
    use super::*;

    #[test]
    fn test_default_combinations() {
        let classifier = IntentClassifier::default();
        assert_eq!(classifier.classify(CONTROL | OPTION), IntentState::Drag);
        assert_eq!(classifier.classify(CONTROL | OPTION | SHIFT), IntentState::Resize);
    }

    #[test]
    fn test_partial_combination_is_ignore() {
        let classifier = IntentClassifier::default();
        assert_eq!(classifier.classify(0), IntentState::Ignore);
        assert_eq!(classifier.classify(CONTROL), IntentState::Ignore);
        assert_eq!(classifier.classify(OPTION | SHIFT), IntentState::Ignore);
    }

    #[test]
    fn test_extra_modifiers_do_not_matter() {
        let classifier = IntentClassifier::default();
        assert_eq!(classifier.classify(CONTROL | OPTION | COMMAND), IntentState::Drag);
        // Non-modifier bits (e.g. caps lock, device-dependent bits) are ignored too.
        assert_eq!(classifier.classify(CONTROL | OPTION | 0x0001_0000 | 0x100), IntentState::Drag);
    }

    #[test]
    fn test_empty_mask_never_matches() {
        let classifier = IntentClassifier::new(0, CONTROL | SHIFT);
        assert_eq!(classifier.classify(0), IntentState::Ignore);
        assert_eq!(classifier.classify(CONTROL | SHIFT), IntentState::Resize);
    }

    #[test]
    fn test_from_config_uses_configured_modifiers() {
        let config: ModMoveConfig =
            serde_json::from_str(r#"{ "drag": { "modifiers": ["command"] } }"#).unwrap();
        let classifier = IntentClassifier::from_config(&config);
        assert_eq!(classifier.classify(COMMAND), IntentState::Drag);
        assert_eq!(classifier.classify(CONTROL | OPTION), IntentState::Ignore);
        assert_eq!(classifier.classify(CONTROL | OPTION | SHIFT), IntentState::Resize);
    }

    #[test]
    fn test_intent_helpers() {
        assert!(!IntentState::Ignore.is_active());
        assert!(IntentState::Drag.is_active());
        assert!(IntentState::Resize.is_active());
        assert_eq!(IntentState::default(), IntentState::Ignore);
        assert_eq!(IntentState::Resize.as_str(), "resize");
    }
}
