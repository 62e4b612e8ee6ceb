//! Gallery view-model
//!
//! Owns the media collection and its day groups and decides when the media
//! source has to be asked again. Every transition is a plain synchronous
//! function; whatever needs the media source is returned as an [`Effect`] for
//! the caller to run, and its result is fed back through
//! [`GalleryViewModel::complete_refresh`] or
//! [`GalleryViewModel::complete_capture`].

use crate::grouping::{group_by_day, DayLabeler};
use crate::lifecycle::LifecycleSignal;
use crate::models::{CaptureMode, CaptureOutcome, DayGroup, MediaRecord};
use crate::source::MediaSourceError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum RefreshState {
    Idle,
    Refreshing,
    /// Last refresh failed; the previous collection is still shown
    Error(String),
}

/// Message for the user that outlives a single render
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum Notice {
    /// Media access is missing; the user has to grant it in the settings
    PermissionRequired,
    /// A capture failed for a reason other than cancellation
    CaptureFailed(String),
}

impl Notice {
    /// Persistent notices stay until dismissed, one-shot notices may auto-hide
    pub fn is_persistent(&self) -> bool {
        matches!(self, Notice::PermissionRequired)
    }
}

/// Input from the presentation layer and the lifecycle source
#[derive(Debug, Clone, PartialEq)]
pub enum GalleryEvent {
    Lifecycle(LifecycleSignal),
    CaptureRequested(CaptureMode),
    Select(String),
    Dismiss,
    DismissNotice,
}

/// Media source work requested by a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Check access, then list recent media
    Refresh,
    /// Check access, then run the capture flow
    Capture(CaptureMode),
}

/// Result of a refresh as seen by the view-model
#[derive(Debug, Clone, PartialEq)]
pub enum RefreshOutcome {
    /// Access check returned false; `list_recent` was never called
    AccessDenied,
    Fetched(Vec<MediaRecord>),
    Failed(MediaSourceError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshDecision {
    /// A refresh must be started now
    Start,
    /// A refresh is in flight; this request runs once it settles
    Deferred,
    /// Nothing left to do
    Settled,
}

/// Everything the presentation layer renders
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GallerySnapshot {
    pub groups: Vec<DayGroup>,
    pub refresh: RefreshState,
    pub selected: Option<String>,
    pub notice: Option<Notice>,
    pub item_count: usize,
}

impl GallerySnapshot {
    /// The record behind `selected`, if it is still in the collection
    pub fn selected_record(&self) -> Option<&MediaRecord> {
        let uri = self.selected.as_deref()?;
        self.groups
            .iter()
            .flat_map(|group| group.items.iter())
            .find(|record| record.uri == uri)
    }
}

impl Default for GallerySnapshot {
    fn default() -> Self {
        Self {
            groups: Vec::new(),
            refresh: RefreshState::Idle,
            selected: None,
            notice: None,
            item_count: 0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GalleryViewModel {
    media: Vec<MediaRecord>,
    groups: Vec<DayGroup>,
    refresh: RefreshState,
    selected: Option<String>,
    notice: Option<Notice>,
    refresh_pending: bool,
    capture_active: bool,
    labeler: DayLabeler,
}

impl GalleryViewModel {
    pub fn new(labeler: DayLabeler) -> Self {
        Self {
            media: Vec::new(),
            groups: Vec::new(),
            refresh: RefreshState::Idle,
            selected: None,
            notice: None,
            refresh_pending: false,
            capture_active: false,
            labeler,
        }
    }

    pub fn media(&self) -> &[MediaRecord] {
        &self.media
    }

    pub fn groups(&self) -> &[DayGroup] {
        &self.groups
    }

    pub fn refresh_state(&self) -> &RefreshState {
        &self.refresh
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn is_capturing(&self) -> bool {
        self.capture_active
    }

    pub fn snapshot(&self) -> GallerySnapshot {
        GallerySnapshot {
            groups: self.groups.clone(),
            refresh: self.refresh.clone(),
            selected: self.selected.clone(),
            notice: self.notice.clone(),
            item_count: self.media.len(),
        }
    }

    /// Applies one event and returns the media source work it needs, if any
    pub fn handle(&mut self, event: GalleryEvent) -> Option<Effect> {
        match event {
            GalleryEvent::Lifecycle(signal) => match self.request_refresh(signal) {
                RefreshDecision::Start => Some(Effect::Refresh),
                RefreshDecision::Deferred | RefreshDecision::Settled => None,
            },
            GalleryEvent::CaptureRequested(mode) => self.request_capture(mode),
            GalleryEvent::Select(uri) => {
                self.selected = Some(uri);
                None
            }
            GalleryEvent::Dismiss => {
                self.selected = None;
                None
            }
            GalleryEvent::DismissNotice => {
                self.notice = None;
                None
            }
        }
    }

    /// Any lifecycle signal asks for a refresh; at most one runs at a time
    pub fn request_refresh(&mut self, signal: LifecycleSignal) -> RefreshDecision {
        if self.refresh == RefreshState::Refreshing {
            log::debug!("{:?} while refreshing, deferring", signal);
            self.refresh_pending = true;
            return RefreshDecision::Deferred;
        }
        log::debug!("{:?} starts a refresh", signal);
        self.refresh = RefreshState::Refreshing;
        RefreshDecision::Start
    }

    /// Applies a settled refresh; returns `Start` when a deferred one is due
    pub fn complete_refresh(&mut self, outcome: RefreshOutcome) -> RefreshDecision {
        match outcome {
            RefreshOutcome::Fetched(records) => {
                log::info!("Refresh fetched {} records", records.len());
                self.media = records;
                self.regroup();
                self.refresh = RefreshState::Idle;
                if self.notice == Some(Notice::PermissionRequired) {
                    self.notice = None;
                }
            }
            RefreshOutcome::AccessDenied => {
                log::warn!("Media access denied, skipping refresh");
                return self.settle_denied();
            }
            RefreshOutcome::Failed(MediaSourceError::PermissionDenied(msg)) => {
                log::warn!("Listing media was denied: {}", msg);
                return self.settle_denied();
            }
            RefreshOutcome::Failed(MediaSourceError::SourceUnavailable(msg)) => {
                log::error!("Refresh failed, keeping {} records: {}", self.media.len(), msg);
                self.refresh = RefreshState::Error(msg);
            }
        }

        if std::mem::take(&mut self.refresh_pending) {
            log::debug!("Running deferred refresh");
            self.refresh = RefreshState::Refreshing;
            RefreshDecision::Start
        } else {
            RefreshDecision::Settled
        }
    }

    /// Signals deferred behind a denial are dropped so the user is not asked again
    fn settle_denied(&mut self) -> RefreshDecision {
        if std::mem::take(&mut self.refresh_pending) {
            log::debug!("Dropping deferred refresh after denial");
        }
        self.refresh = RefreshState::Idle;
        self.notice = Some(Notice::PermissionRequired);
        RefreshDecision::Settled
    }

    fn request_capture(&mut self, mode: CaptureMode) -> Option<Effect> {
        if self.capture_active {
            log::warn!("Capture already in progress, ignoring {:?} request", mode);
            return None;
        }
        self.capture_active = true;
        Some(Effect::Capture(mode))
    }

    /// Applies a settled capture; never touches the refresh state
    pub fn complete_capture(&mut self, result: Result<CaptureOutcome, MediaSourceError>) {
        self.capture_active = false;
        match result {
            Ok(CaptureOutcome::Captured(record)) => {
                log::info!("Appending captured {}", record.uri);
                self.media.push(record);
                self.regroup();
            }
            Ok(CaptureOutcome::Cancelled) => {
                log::debug!("Capture cancelled");
            }
            Err(MediaSourceError::PermissionDenied(msg)) => {
                log::warn!("Capture denied: {}", msg);
                self.notice = Some(Notice::PermissionRequired);
            }
            Err(MediaSourceError::SourceUnavailable(msg)) => {
                log::error!("Capture failed: {}", msg);
                self.notice = Some(Notice::CaptureFailed(msg));
            }
        }
    }

    fn regroup(&mut self) {
        self.groups = group_by_day(&self.media, &self.labeler);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grouping::DayZone;
    use crate::models::MediaKind;
    use chrono::{FixedOffset, Locale, TimeZone, Utc};

    fn model() -> GalleryViewModel {
        GalleryViewModel::new(DayLabeler::new(
            Locale::en_US,
            DayZone::Fixed(FixedOffset::east_opt(0).unwrap()),
        ))
    }

    fn record(uri: &str, day: u32, hour: u32) -> MediaRecord {
        MediaRecord::new(
            uri,
            MediaKind::Photo,
            Utc.with_ymd_and_hms(2024, 3, day, hour, 0, 0).unwrap(),
        )
    }

    fn loaded(records: Vec<MediaRecord>) -> GalleryViewModel {
        let mut vm = model();
        assert_eq!(
            vm.handle(GalleryEvent::Lifecycle(LifecycleSignal::Mount)),
            Some(Effect::Refresh)
        );
        assert_eq!(
            vm.complete_refresh(RefreshOutcome::Fetched(records)),
            RefreshDecision::Settled
        );
        vm
    }

    #[test]
    fn test_refresh_replaces_wholesale() {
        let mut vm = loaded(vec![record("a", 3, 10), record("b", 3, 11)]);
        assert_eq!(vm.media().len(), 2);
        assert_eq!(vm.refresh_state(), &RefreshState::Idle);

        vm.handle(GalleryEvent::Lifecycle(LifecycleSignal::BecameActive));
        vm.complete_refresh(RefreshOutcome::Fetched(vec![record("c", 4, 9)]));

        assert_eq!(vm.media(), &[record("c", 4, 9)]);
        assert_eq!(vm.groups().len(), 1);
        assert_eq!(vm.groups()[0].label, "March 4");
    }

    #[test]
    fn test_signals_collapse_while_refreshing() {
        let mut vm = model();
        assert_eq!(
            vm.handle(GalleryEvent::Lifecycle(LifecycleSignal::Mount)),
            Some(Effect::Refresh)
        );
        assert_eq!(vm.refresh_state(), &RefreshState::Refreshing);
        assert_eq!(
            vm.request_refresh(LifecycleSignal::BecameActive),
            RefreshDecision::Deferred
        );
        assert_eq!(
            vm.handle(GalleryEvent::Lifecycle(
                LifecycleSignal::ResumedFromBackground
            )),
            None
        );

        // The deferred requests run exactly once after the first settles
        assert_eq!(
            vm.complete_refresh(RefreshOutcome::Fetched(vec![record("a", 3, 10)])),
            RefreshDecision::Start
        );
        assert_eq!(vm.refresh_state(), &RefreshState::Refreshing);
        assert_eq!(
            vm.complete_refresh(RefreshOutcome::Fetched(vec![record("a", 3, 10)])),
            RefreshDecision::Settled
        );
        assert_eq!(vm.refresh_state(), &RefreshState::Idle);
    }

    #[test]
    fn test_unavailable_keeps_stale_collection() {
        let mut vm = loaded(vec![record("a", 3, 10)]);
        vm.handle(GalleryEvent::Lifecycle(LifecycleSignal::BecameActive));
        vm.complete_refresh(RefreshOutcome::Failed(
            MediaSourceError::SourceUnavailable("disk gone".into()),
        ));

        assert_eq!(
            vm.refresh_state(),
            &RefreshState::Error("disk gone".to_string())
        );
        assert_eq!(vm.media(), &[record("a", 3, 10)]);
        assert_eq!(vm.groups().len(), 1);

        // Error is eligible for retry on the next signal
        assert_eq!(
            vm.handle(GalleryEvent::Lifecycle(
                LifecycleSignal::ResumedFromBackground
            )),
            Some(Effect::Refresh)
        );
        vm.complete_refresh(RefreshOutcome::Fetched(vec![]));
        assert_eq!(vm.refresh_state(), &RefreshState::Idle);
        assert!(vm.media().is_empty());
    }

    #[test]
    fn test_access_denied_stays_idle_with_notice() {
        let mut vm = model();
        vm.handle(GalleryEvent::Lifecycle(LifecycleSignal::Mount));
        vm.complete_refresh(RefreshOutcome::AccessDenied);

        assert_eq!(vm.refresh_state(), &RefreshState::Idle);
        assert_eq!(vm.notice(), Some(&Notice::PermissionRequired));
        assert!(vm.notice().unwrap().is_persistent());
        assert!(vm.media().is_empty());
    }

    #[test]
    fn test_denial_drops_deferred_refresh() {
        let mut vm = model();
        vm.handle(GalleryEvent::Lifecycle(LifecycleSignal::Mount));
        assert_eq!(
            vm.handle(GalleryEvent::Lifecycle(LifecycleSignal::BecameActive)),
            None
        );

        assert_eq!(
            vm.complete_refresh(RefreshOutcome::AccessDenied),
            RefreshDecision::Settled
        );
        assert_eq!(vm.refresh_state(), &RefreshState::Idle);

        // A signal after the denial asks again
        assert_eq!(
            vm.handle(GalleryEvent::Lifecycle(LifecycleSignal::BecameActive)),
            Some(Effect::Refresh)
        );
        vm.handle(GalleryEvent::Lifecycle(LifecycleSignal::ResumedFromBackground));
        assert_eq!(
            vm.complete_refresh(RefreshOutcome::Failed(MediaSourceError::PermissionDenied(
                "revoked".into()
            ))),
            RefreshDecision::Settled
        );
        assert_eq!(vm.notice(), Some(&Notice::PermissionRequired));
    }

    #[test]
    fn test_successful_refresh_clears_permission_notice() {
        let mut vm = model();
        vm.handle(GalleryEvent::Lifecycle(LifecycleSignal::Mount));
        vm.complete_refresh(RefreshOutcome::Failed(MediaSourceError::PermissionDenied(
            "revoked".into(),
        )));
        assert_eq!(vm.refresh_state(), &RefreshState::Idle);
        assert_eq!(vm.notice(), Some(&Notice::PermissionRequired));

        vm.handle(GalleryEvent::Lifecycle(LifecycleSignal::BecameActive));
        vm.complete_refresh(RefreshOutcome::Fetched(vec![record("a", 3, 10)]));
        assert_eq!(vm.notice(), None);
    }

    #[test]
    fn test_capture_appends_without_disturbing_groups() {
        let a = record("a", 3, 10);
        let b = record("b", 4, 8);
        let mut vm = loaded(vec![a.clone()]);

        assert_eq!(
            vm.handle(GalleryEvent::CaptureRequested(CaptureMode::Photo)),
            Some(Effect::Capture(CaptureMode::Photo))
        );
        assert_eq!(vm.refresh_state(), &RefreshState::Idle);
        vm.complete_capture(Ok(CaptureOutcome::Captured(b.clone())));

        assert_eq!(vm.media(), &[a.clone(), b.clone()]);
        assert_eq!(vm.groups().len(), 2);
        assert_eq!(vm.groups()[0].label, "March 3");
        assert_eq!(vm.groups()[0].items, vec![a]);
        assert_eq!(vm.groups()[1].label, "March 4");
        assert_eq!(vm.groups()[1].items, vec![b]);
        assert_eq!(vm.refresh_state(), &RefreshState::Idle);
    }

    #[test]
    fn test_cancelled_capture_changes_nothing() {
        let a = record("a", 3, 10);
        let mut vm = loaded(vec![a.clone()]);
        let before = vm.snapshot();

        vm.handle(GalleryEvent::CaptureRequested(CaptureMode::Video));
        vm.complete_capture(Ok(CaptureOutcome::Cancelled));

        assert_eq!(vm.media(), &[a]);
        assert_eq!(vm.snapshot(), before);
        assert!(!vm.is_capturing());
    }

    #[test]
    fn test_capture_failure_is_one_shot_notice() {
        let a = record("a", 3, 10);
        let mut vm = loaded(vec![a.clone()]);

        vm.handle(GalleryEvent::CaptureRequested(CaptureMode::Photo));
        vm.complete_capture(Err(MediaSourceError::SourceUnavailable(
            "camera busy".into(),
        )));

        assert_eq!(vm.media(), &[a]);
        assert_eq!(vm.refresh_state(), &RefreshState::Idle);
        let notice = vm.notice().cloned().unwrap();
        assert_eq!(notice, Notice::CaptureFailed("camera busy".to_string()));
        assert!(!notice.is_persistent());

        vm.handle(GalleryEvent::DismissNotice);
        assert_eq!(vm.notice(), None);
    }

    #[test]
    fn test_second_capture_ignored_while_active() {
        let mut vm = model();
        assert!(vm
            .handle(GalleryEvent::CaptureRequested(CaptureMode::Photo))
            .is_some());
        assert!(vm.is_capturing());
        assert_eq!(
            vm.handle(GalleryEvent::CaptureRequested(CaptureMode::Photo)),
            None
        );
        vm.complete_capture(Ok(CaptureOutcome::Cancelled));
        assert!(vm
            .handle(GalleryEvent::CaptureRequested(CaptureMode::Photo))
            .is_some());
    }

    #[test]
    fn test_capture_does_not_touch_refresh_state() {
        let mut vm = model();
        vm.handle(GalleryEvent::Lifecycle(LifecycleSignal::Mount));
        vm.handle(GalleryEvent::CaptureRequested(CaptureMode::Photo));
        vm.complete_capture(Ok(CaptureOutcome::Captured(record("b", 4, 8))));
        assert_eq!(vm.refresh_state(), &RefreshState::Refreshing);

        // Fetch settling after the capture replaces wholesale and drops it
        vm.complete_refresh(RefreshOutcome::Fetched(vec![record("a", 3, 10)]));
        assert_eq!(vm.media(), &[record("a", 3, 10)]);
    }

    #[test]
    fn test_select_and_dismiss_independent_of_refresh() {
        let mut vm = model();
        vm.handle(GalleryEvent::Lifecycle(LifecycleSignal::Mount));
        assert_eq!(vm.handle(GalleryEvent::Select("file:///x.jpg".into())), None);
        assert_eq!(vm.selected(), Some("file:///x.jpg"));
        assert_eq!(vm.refresh_state(), &RefreshState::Refreshing);

        vm.handle(GalleryEvent::Dismiss);
        assert_eq!(vm.selected(), None);
    }

    #[test]
    fn test_selected_record_carries_kind() {
        let mut vm = loaded(vec![record("a", 3, 10)]);
        let clip = MediaRecord::new(
            "file:///clip.mp4",
            MediaKind::Video,
            Utc.with_ymd_and_hms(2024, 3, 4, 9, 0, 0).unwrap(),
        );
        vm.complete_capture(Ok(CaptureOutcome::Captured(clip.clone())));

        vm.handle(GalleryEvent::Select("file:///clip.mp4".into()));
        assert_eq!(vm.snapshot().selected_record(), Some(&clip));

        vm.handle(GalleryEvent::Select("file:///gone.jpg".into()));
        assert_eq!(vm.snapshot().selected_record(), None);
    }

    #[test]
    fn test_snapshot_serializes() {
        let vm = loaded(vec![record("a", 3, 10)]);
        let json = serde_json::to_string(&vm.snapshot()).unwrap();
        let back: GallerySnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, vm.snapshot());
        assert_eq!(back.item_count, 1);
    }
}
