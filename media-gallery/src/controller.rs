//! Async driver for [`GalleryViewModel`]
//!
//! Reads [`GalleryEvent`]s from a channel, runs the effects the view-model
//! asks for against a [`MediaSource`] and publishes a snapshot after every
//! change. Everything runs on the caller's task; the only suspension points
//! are the media source calls.

use crate::config::GalleryConfig;
use crate::grouping::DayLabeler;
use crate::models::{CaptureMode, CaptureOutcome};
use crate::source::{MediaSource, MediaSourceError};
use crate::view_model::{
    Effect, GalleryEvent, GallerySnapshot, GalleryViewModel, RefreshDecision, RefreshOutcome,
};
use std::future::Future;
use std::pin::Pin;
use tokio::sync::mpsc::UnboundedReceiver;

type LocalBoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

pub struct GalleryController<S> {
    source: S,
    model: GalleryViewModel,
    fetch_limit: usize,
}

async fn refresh_from<S: MediaSource>(source: &S, limit: usize) -> RefreshOutcome {
    if !source.check_and_request_access().await {
        return RefreshOutcome::AccessDenied;
    }
    match source.list_recent(limit).await {
        Ok(records) => RefreshOutcome::Fetched(records),
        Err(e) => RefreshOutcome::Failed(e),
    }
}

async fn capture_from<S: MediaSource>(
    source: &S,
    mode: CaptureMode,
) -> Result<CaptureOutcome, MediaSourceError> {
    if !source.check_and_request_access().await {
        return Err(MediaSourceError::PermissionDenied(
            "Media access not granted".to_string(),
        ));
    }
    source.capture(mode).await
}

/// Waits for the future in `slot`, or forever when it is empty
async fn settle<T>(slot: &mut Option<LocalBoxFuture<'_, T>>) -> T {
    match slot.as_mut() {
        Some(fut) => fut.await,
        None => std::future::pending().await,
    }
}

impl<S: MediaSource> GalleryController<S> {
    pub fn new(source: S, config: &GalleryConfig) -> Self {
        Self::with_labeler(source, config, DayLabeler::local(&config.locale))
    }

    pub fn with_labeler(source: S, config: &GalleryConfig, labeler: DayLabeler) -> Self {
        Self {
            source,
            model: GalleryViewModel::new(labeler),
            fetch_limit: config.fetch_limit,
        }
    }

    pub fn model(&self) -> &GalleryViewModel {
        &self.model
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Processes events until the channel closes and no call is in flight
    ///
    /// User events are taken before settled calls, so signals arriving while
    /// a refresh runs collapse into its single deferred follow-up.
    pub async fn run<F>(&mut self, mut events: UnboundedReceiver<GalleryEvent>, mut publish: F)
    where
        F: FnMut(GallerySnapshot),
    {
        let source = &self.source;
        let model = &mut self.model;
        let limit = self.fetch_limit;

        let mut refresh: Option<LocalBoxFuture<'_, RefreshOutcome>> = None;
        let mut capture: Option<LocalBoxFuture<'_, Result<CaptureOutcome, MediaSourceError>>> =
            None;
        let mut open = true;

        publish(model.snapshot());

        loop {
            if !open && refresh.is_none() && capture.is_none() {
                break;
            }

            tokio::select! {
                biased;

                event = events.recv(), if open => {
                    let Some(event) = event else {
                        log::debug!("Gallery event stream closed");
                        open = false;
                        continue;
                    };
                    match model.handle(event) {
                        Some(Effect::Refresh) => {
                            refresh = Some(Box::pin(refresh_from(source, limit)));
                        }
                        Some(Effect::Capture(mode)) => {
                            capture = Some(Box::pin(capture_from(source, mode)));
                        }
                        None => {}
                    }
                }
                outcome = settle(&mut refresh), if refresh.is_some() => {
                    refresh = None;
                    if model.complete_refresh(outcome) == RefreshDecision::Start {
                        refresh = Some(Box::pin(refresh_from(source, limit)));
                    }
                }
                result = settle(&mut capture), if capture.is_some() => {
                    capture = None;
                    model.complete_capture(result);
                }
                else => break,
            }

            publish(model.snapshot());
        }
    }
}
