//! Lifecycle signals
//!
//! The host reports raw observations (screen focus, app visibility phase);
//! [`LifecycleTracker`] turns them into the signals that trigger a refresh.

/// Event meaning the gallery should be brought up to date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleSignal {
    Mount,
    BecameActive,
    ResumedFromBackground,
}

/// Host application phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppPhase {
    Active,
    Inactive,
    Background,
}

impl AppPhase {
    /// Maps a webview `document.visibilityState` value
    pub fn from_visibility(state: &str) -> Self {
        match state {
            "visible" => AppPhase::Active,
            "hidden" => AppPhase::Background,
            _ => AppPhase::Inactive,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LifecycleTracker {
    mounted: bool,
    focused: bool,
    phase: AppPhase,
}

impl Default for LifecycleTracker {
    fn default() -> Self {
        Self {
            mounted: false,
            focused: false,
            phase: AppPhase::Active,
        }
    }
}

impl LifecycleTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// `Mount` the first time the gallery is mounted, `None` afterwards
    pub fn mounted(&mut self) -> Option<LifecycleSignal> {
        let first = !std::mem::replace(&mut self.mounted, true);
        first.then_some(LifecycleSignal::Mount)
    }

    /// `BecameActive` when the screen goes from unfocused to focused
    pub fn focus_changed(&mut self, focused: bool) -> Option<LifecycleSignal> {
        let was_focused = std::mem::replace(&mut self.focused, focused);
        (focused && !was_focused).then_some(LifecycleSignal::BecameActive)
    }

    /// `ResumedFromBackground` only for inactive or background to active
    pub fn phase_changed(&mut self, phase: AppPhase) -> Option<LifecycleSignal> {
        let previous = std::mem::replace(&mut self.phase, phase);
        let resumed = phase == AppPhase::Active
            && matches!(previous, AppPhase::Inactive | AppPhase::Background);
        resumed.then_some(LifecycleSignal::ResumedFromBackground)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mount_once() {
        let mut tracker = LifecycleTracker::new();
        assert_eq!(tracker.mounted(), Some(LifecycleSignal::Mount));
        assert_eq!(tracker.mounted(), None);
    }

    #[test]
    fn test_focus_edges() {
        let mut tracker = LifecycleTracker::new();
        assert_eq!(
            tracker.focus_changed(true),
            Some(LifecycleSignal::BecameActive)
        );
        assert_eq!(tracker.focus_changed(true), None);
        assert_eq!(tracker.focus_changed(false), None);
        assert_eq!(
            tracker.focus_changed(true),
            Some(LifecycleSignal::BecameActive)
        );
    }

    #[test]
    fn test_resume_only_from_background_or_inactive() {
        let mut tracker = LifecycleTracker::new();
        assert_eq!(tracker.phase_changed(AppPhase::Active), None);
        assert_eq!(tracker.phase_changed(AppPhase::Background), None);
        assert_eq!(
            tracker.phase_changed(AppPhase::Active),
            Some(LifecycleSignal::ResumedFromBackground)
        );
        assert_eq!(tracker.phase_changed(AppPhase::Inactive), None);
        assert_eq!(
            tracker.phase_changed(AppPhase::Active),
            Some(LifecycleSignal::ResumedFromBackground)
        );
        assert_eq!(tracker.phase_changed(AppPhase::Active), None);
    }

    #[test]
    fn test_visibility_mapping() {
        assert_eq!(AppPhase::from_visibility("visible"), AppPhase::Active);
        assert_eq!(AppPhase::from_visibility("hidden"), AppPhase::Background);
        assert_eq!(AppPhase::from_visibility("prerender"), AppPhase::Inactive);
    }
}
