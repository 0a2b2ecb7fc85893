//! Core data model shared by the session, gallery and view layers.

use crate::constants::endpoints;

/// Which capture backend serves this session. Decided once by the startup
/// probe and immutable afterwards; after a `Browser` resolution no native
/// command is issued for the rest of the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Backend {
    /// External camera host reached through invoke commands plus the local
    /// media server for frames and photos.
    Native,
    /// The browser's own media-device stack.
    Browser,
}

impl Backend {
    pub fn is_native(self) -> bool {
        matches!(self, Backend::Native)
    }

    pub fn label(self) -> &'static str {
        match self {
            Backend::Native => "rpicam",
            Backend::Browser => "browser",
        }
    }
}

/// Which of the two top-level views is showing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CaptureMode {
    #[default]
    Camera,
    Gallery,
}

/// Rough media classification, derived from the file extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MediaKind {
    Photo,
    Clip,
}

impl MediaKind {
    pub fn from_name(name: &str) -> Self {
        let lower = name.to_ascii_lowercase();
        for ext in [".h264", ".mp4", ".mkv", ".webm"] {
            if lower.ends_with(ext) {
                return MediaKind::Clip;
            }
        }
        MediaKind::Photo
    }
}

/// One captured artifact. Items are created on successful capture or
/// listing, prepended most-recent-first, and never mutated.
#[derive(Clone, Debug, PartialEq)]
pub struct MediaItem {
    /// File name. Native listings may hand back absolute paths; those are
    /// reduced to their final component so the photo URL join stays
    /// deterministic.
    pub id: String,
    /// Inline JPEG data URL for browser-backed captures; `None` for native
    /// items, which resolve against the media server instead.
    pub payload: Option<String>,
    /// Full path on the host filesystem, when the host reported one. Only
    /// used for handing files to external applications.
    pub path: Option<String>,
    pub kind: MediaKind,
}

impl MediaItem {
    /// Item backed by the native host, identified by a path or name. Bare
    /// names (the `get_photos` index) carry no path; the external opener
    /// needs a real host path to resolve.
    pub fn native(path_or_name: &str) -> Self {
        let id = file_name(path_or_name).to_string();
        let kind = MediaKind::from_name(&id);
        let path = if path_or_name.contains(['/', '\\']) {
            Some(path_or_name.to_string())
        } else {
            None
        };
        Self {
            id,
            payload: None,
            path,
            kind,
        }
    }

    /// Item captured in the browser, carrying its payload inline.
    pub fn browser(name: String, data_url: String) -> Self {
        let kind = MediaKind::from_name(&name);
        Self {
            id: name,
            payload: Some(data_url),
            path: None,
            kind,
        }
    }

    /// Resolve the displayable source for this item. Native photos live on
    /// the media server under their name; browser items carry their data
    /// URL inline. Clips have no inline display path.
    pub fn display_url(&self, backend: Backend) -> Option<String> {
        if self.kind == MediaKind::Clip {
            return None;
        }
        match backend {
            Backend::Native => Some(format!("{}{}", endpoints::PHOTO_BASE_URL, self.id)),
            Backend::Browser => self.payload.clone(),
        }
    }
}

/// Final path component of a native identifier.
pub fn file_name(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}
