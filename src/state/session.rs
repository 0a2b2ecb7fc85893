//! Capture session state and its reducer.
//!
//! Every mutation flows through [`SessionAction`]; effects (invoke calls,
//! media acquisition, timers) live in the component layer and report back
//! by dispatching. Invalid transitions are dropped here rather than
//! guarded at every call site.

use std::rc::Rc;

use yew::Reducible;

use crate::model::{Backend, CaptureMode, MediaItem};
use crate::state::gallery::Gallery;

/// Lifecycle of the capture view.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SessionPhase {
    /// Mounted, probe not yet issued.
    #[default]
    Uninitialized,
    /// Backend probe in flight.
    Detecting,
    /// Backend resolved, no live preview.
    Idle,
    /// Live preview on screen.
    Previewing,
    /// Still capture in flight. Feedback only; rapid captures are not
    /// mutually excluded.
    Capturing,
}

/// Video recording runs beside the preview, native backend only.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum RecordingState {
    #[default]
    Idle,
    Recording { output: String },
}

impl RecordingState {
    pub fn is_recording(&self) -> bool {
        matches!(self, RecordingState::Recording { .. })
    }

    fn stop(&mut self) -> Option<String> {
        match std::mem::replace(self, RecordingState::Idle) {
            RecordingState::Recording { output } => Some(output),
            RecordingState::Idle => None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CaptureSession {
    /// Resolved once by the startup probe, then fixed for the session.
    pub backend: Option<Backend>,
    pub phase: SessionPhase,
    pub recording: RecordingState,
    pub mode: CaptureMode,
    pub gallery: Gallery,
    /// Banner text for failures the user must see. `None` hides the banner.
    pub error: Option<String>,
}

impl CaptureSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// A capture needs a live preview. `Capturing` still qualifies: the
    /// phase is shutter feedback, not a lock, and rapid captures race.
    pub fn can_capture(&self) -> bool {
        matches!(self.phase, SessionPhase::Previewing | SessionPhase::Capturing)
    }

    pub fn is_recording(&self) -> bool {
        self.recording.is_recording()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum SessionAction {
    ProbeStarted,
    BackendDetected(Backend),
    PreviewStarted,
    PreviewFailed(String),
    PreviewStopped,
    CaptureBegan,
    CaptureFinished(MediaItem),
    CaptureFailed(String),
    RecordingStarted { output: String },
    RecordingStopped,
    Listed(Vec<MediaItem>),
    ModeSet(CaptureMode),
    Selected(String),
    SelectionCleared,
    NextItem,
    PrevItem,
    ErrorRaised(String),
    ErrorCleared,
}

impl Reducible for CaptureSession {
    type Action = SessionAction;

    fn reduce(self: Rc<Self>, action: SessionAction) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            SessionAction::ProbeStarted => {
                if next.phase == SessionPhase::Uninitialized {
                    next.phase = SessionPhase::Detecting;
                }
            }
            SessionAction::BackendDetected(backend) => {
                // First resolution wins; the backend never changes after.
                if next.backend.is_none() {
                    next.backend = Some(backend);
                    next.phase = SessionPhase::Idle;
                }
            }
            SessionAction::PreviewStarted => {
                if next.phase == SessionPhase::Idle {
                    next.phase = SessionPhase::Previewing;
                    next.error = None;
                }
            }
            SessionAction::PreviewFailed(message) => {
                next.phase = SessionPhase::Idle;
                next.error = Some(message);
            }
            SessionAction::PreviewStopped => {
                if matches!(next.phase, SessionPhase::Previewing | SessionPhase::Capturing) {
                    next.phase = SessionPhase::Idle;
                }
                // Recording cannot outlive the preview it records; the view
                // issues the host-side stop, this keeps the state honest.
                if let Some(output) = next.recording.stop() {
                    next.gallery.prepend(MediaItem::native(&output));
                }
            }
            SessionAction::CaptureBegan => {
                if next.phase == SessionPhase::Previewing {
                    next.phase = SessionPhase::Capturing;
                }
            }
            SessionAction::CaptureFinished(item) => {
                next.gallery.prepend(item);
                if next.phase == SessionPhase::Capturing {
                    next.phase = SessionPhase::Previewing;
                }
            }
            SessionAction::CaptureFailed(message) => {
                next.error = Some(message);
                if next.phase == SessionPhase::Capturing {
                    next.phase = SessionPhase::Previewing;
                }
            }
            SessionAction::RecordingStarted { output } => {
                let native = next.backend == Some(Backend::Native);
                if native && next.phase == SessionPhase::Previewing && !next.is_recording() {
                    next.recording = RecordingState::Recording { output };
                }
            }
            SessionAction::RecordingStopped => {
                if let Some(output) = next.recording.stop() {
                    next.gallery.prepend(MediaItem::native(&output));
                }
            }
            SessionAction::Listed(items) => {
                next.gallery.replace(items);
            }
            SessionAction::ModeSet(mode) => {
                next.mode = mode;
            }
            SessionAction::Selected(id) => {
                next.gallery.select(&id);
            }
            SessionAction::SelectionCleared => {
                next.gallery.clear_selection();
            }
            SessionAction::NextItem => {
                next.gallery.next();
            }
            SessionAction::PrevItem => {
                next.gallery.prev();
            }
            SessionAction::ErrorRaised(message) => {
                next.error = Some(message);
            }
            SessionAction::ErrorCleared => {
                next.error = None;
            }
        }
        Rc::new(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MediaKind;
    use crate::util::capture_file_name_now;

    fn apply(session: CaptureSession, action: SessionAction) -> CaptureSession {
        (*Rc::new(session).reduce(action)).clone()
    }

    fn ready(backend: Backend) -> CaptureSession {
        let s = apply(CaptureSession::new(), SessionAction::ProbeStarted);
        apply(s, SessionAction::BackendDetected(backend))
    }

    fn is_capture_name(name: &str) -> bool {
        let b = name.as_bytes();
        name.len() == 23
            && name.starts_with("IMG_")
            && b[4..12].iter().all(u8::is_ascii_digit)
            && b[12] == b'_'
            && b[13..19].iter().all(u8::is_ascii_digit)
            && name.ends_with(".jpg")
    }

    #[test]
    fn probe_walks_uninitialized_to_idle() {
        let s = CaptureSession::new();
        assert_eq!(s.phase, SessionPhase::Uninitialized);
        let s = apply(s, SessionAction::ProbeStarted);
        assert_eq!(s.phase, SessionPhase::Detecting);
        let s = apply(s, SessionAction::BackendDetected(Backend::Native));
        assert_eq!(s.phase, SessionPhase::Idle);
        assert_eq!(s.backend, Some(Backend::Native));
    }

    #[test]
    fn backend_is_fixed_after_first_resolution() {
        let s = ready(Backend::Browser);
        let s = apply(s, SessionAction::BackendDetected(Backend::Native));
        assert_eq!(s.backend, Some(Backend::Browser));
    }

    #[test]
    fn preview_starts_only_from_idle() {
        let s = apply(CaptureSession::new(), SessionAction::PreviewStarted);
        assert_eq!(s.phase, SessionPhase::Uninitialized);

        let s = ready(Backend::Native);
        let s = apply(s, SessionAction::PreviewStarted);
        assert_eq!(s.phase, SessionPhase::Previewing);
        let s = apply(s, SessionAction::PreviewStopped);
        assert_eq!(s.phase, SessionPhase::Idle);
    }

    #[test]
    fn preview_failure_returns_to_idle_with_a_visible_error() {
        let s = ready(Backend::Browser);
        let s = apply(s, SessionAction::PreviewFailed("camera denied".into()));
        assert_eq!(s.phase, SessionPhase::Idle);
        assert_eq!(s.error.as_deref(), Some("camera denied"));
        // Manual retry succeeds and clears the banner.
        let s = apply(s, SessionAction::PreviewStarted);
        assert_eq!(s.phase, SessionPhase::Previewing);
        assert_eq!(s.error, None);
    }

    #[test]
    fn capture_cycle_prepends_the_new_item() {
        let s = ready(Backend::Native);
        let s = apply(s, SessionAction::PreviewStarted);
        let s = apply(s, SessionAction::CaptureBegan);
        assert_eq!(s.phase, SessionPhase::Capturing);
        let s = apply(
            s,
            SessionAction::CaptureFinished(MediaItem::native("/data/photo_3.jpg")),
        );
        assert_eq!(s.phase, SessionPhase::Previewing);
        assert_eq!(s.gallery.items()[0].id, "photo_3.jpg");
    }

    #[test]
    fn overlapping_captures_are_not_excluded() {
        let s = ready(Backend::Native);
        let s = apply(s, SessionAction::PreviewStarted);
        let s = apply(s, SessionAction::CaptureBegan);
        // The shutter stays armed while a capture is in flight; the host
        // is the one serializing device access.
        assert!(s.can_capture());
        let s = apply(s, SessionAction::CaptureBegan);
        assert_eq!(s.phase, SessionPhase::Capturing);
        let s = apply(
            s,
            SessionAction::CaptureFinished(MediaItem::native("photo_1.jpg")),
        );
        let s = apply(
            s,
            SessionAction::CaptureFinished(MediaItem::native("photo_2.jpg")),
        );
        assert_eq!(s.gallery.len(), 2);
        assert_eq!(s.phase, SessionPhase::Previewing);
    }

    #[test]
    fn capture_requires_a_running_preview() {
        let s = ready(Backend::Native);
        let s = apply(s, SessionAction::CaptureBegan);
        assert_eq!(s.phase, SessionPhase::Idle);
    }

    #[test]
    fn capture_failure_surfaces_and_keeps_previewing() {
        let s = ready(Backend::Native);
        let s = apply(s, SessionAction::PreviewStarted);
        let s = apply(s, SessionAction::CaptureBegan);
        let s = apply(s, SessionAction::CaptureFailed("rpicam-still exited".into()));
        assert_eq!(s.phase, SessionPhase::Previewing);
        assert_eq!(s.error.as_deref(), Some("rpicam-still exited"));
        assert_eq!(s.gallery.len(), 0);
    }

    #[test]
    fn capture_finishing_after_preview_stopped_still_lands_in_the_gallery() {
        let s = ready(Backend::Native);
        let s = apply(s, SessionAction::PreviewStarted);
        let s = apply(s, SessionAction::CaptureBegan);
        let s = apply(s, SessionAction::PreviewStopped);
        let s = apply(
            s,
            SessionAction::CaptureFinished(MediaItem::native("photo_9.jpg")),
        );
        assert_eq!(s.phase, SessionPhase::Idle);
        assert_eq!(s.gallery.len(), 1);
    }

    #[test]
    fn recording_is_reachable_only_from_previewing() {
        let s = ready(Backend::Native);
        let s = apply(
            s,
            SessionAction::RecordingStarted { output: "video_1.h264".into() },
        );
        assert!(!s.is_recording());

        let s = apply(s, SessionAction::PreviewStarted);
        let s = apply(
            s,
            SessionAction::RecordingStarted { output: "video_1.h264".into() },
        );
        assert!(s.is_recording());
    }

    #[test]
    fn double_start_and_double_stop_are_no_ops() {
        let s = ready(Backend::Native);
        let s = apply(s, SessionAction::PreviewStarted);
        let s = apply(
            s,
            SessionAction::RecordingStarted { output: "video_1.h264".into() },
        );
        let s = apply(
            s,
            SessionAction::RecordingStarted { output: "video_2.h264".into() },
        );
        assert_eq!(
            s.recording,
            RecordingState::Recording { output: "video_1.h264".into() }
        );
        let s = apply(s, SessionAction::RecordingStopped);
        assert!(!s.is_recording());
        assert_eq!(s.gallery.len(), 1);
        let s = apply(s, SessionAction::RecordingStopped);
        assert_eq!(s.gallery.len(), 1);
    }

    #[test]
    fn stopped_recording_joins_the_gallery_as_a_clip() {
        let s = ready(Backend::Native);
        let s = apply(s, SessionAction::PreviewStarted);
        let s = apply(
            s,
            SessionAction::RecordingStarted { output: "/data/video_7.h264".into() },
        );
        let s = apply(s, SessionAction::RecordingStopped);
        let head = &s.gallery.items()[0];
        assert_eq!(head.id, "video_7.h264");
        assert_eq!(head.kind, MediaKind::Clip);
    }

    #[test]
    fn stopping_the_preview_ends_a_live_recording() {
        let s = ready(Backend::Native);
        let s = apply(s, SessionAction::PreviewStarted);
        let s = apply(
            s,
            SessionAction::RecordingStarted { output: "/data/video_4.h264".into() },
        );
        let s = apply(s, SessionAction::PreviewStopped);
        assert_eq!(s.phase, SessionPhase::Idle);
        assert!(!s.is_recording());
        assert_eq!(s.gallery.items()[0].id, "video_4.h264");
    }

    #[test]
    fn browser_sessions_never_record() {
        let s = ready(Backend::Browser);
        let s = apply(s, SessionAction::PreviewStarted);
        let s = apply(
            s,
            SessionAction::RecordingStarted { output: "video_1.h264".into() },
        );
        assert!(!s.is_recording());
    }

    #[test]
    fn browser_capture_prepends_one_timestamped_item() {
        let s = ready(Backend::Browser);
        let s = apply(s, SessionAction::PreviewStarted);
        let before = s.gallery.len();
        let s = apply(s, SessionAction::CaptureBegan);
        let item = MediaItem::browser(
            capture_file_name_now(),
            "data:image/jpeg;base64,abc".into(),
        );
        let s = apply(s, SessionAction::CaptureFinished(item));
        assert_eq!(s.gallery.len(), before + 1);
        assert!(is_capture_name(&s.gallery.items()[0].id));
        assert_eq!(s.phase, SessionPhase::Previewing);
    }

    #[test]
    fn listing_replaces_the_gallery() {
        let s = ready(Backend::Native);
        let s = apply(s, SessionAction::Listed(vec![
            MediaItem::native("b.jpg"),
            MediaItem::native("a.jpg"),
        ]));
        let s = apply(s, SessionAction::Selected("a.jpg".into()));
        let s = apply(s, SessionAction::PrevItem);
        assert_eq!(s.gallery.selected().map(|i| i.id.as_str()), Some("b.jpg"));
        let s = apply(s, SessionAction::SelectionCleared);
        assert_eq!(s.gallery.selected(), None);
    }

    #[test]
    fn errors_can_be_dismissed() {
        let s = ready(Backend::Native);
        let s = apply(s, SessionAction::ErrorRaised("boom".into()));
        assert_eq!(s.error.as_deref(), Some("boom"));
        let s = apply(s, SessionAction::ErrorCleared);
        assert_eq!(s.error, None);
    }
}
