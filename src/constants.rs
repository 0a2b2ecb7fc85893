//! Application-wide constants.

/// Endpoints of the native media server. The host process serves the live
/// preview as a continuously refreshed JPEG and captured photos by name.
pub mod endpoints {
    /// Live preview image resource.
    pub const STREAM_URL: &str = "http://localhost:18888/stream";
    /// Base for photo payloads; append the item name.
    pub const PHOTO_BASE_URL: &str = "http://localhost:18888/photos/";
}

/// Gesture tuning for the gallery image viewer.
pub mod gesture {
    /// Minimum display scale (fit-to-view).
    pub const SCALE_MIN: f64 = 1.0;
    /// Maximum pinch/wheel zoom.
    pub const SCALE_MAX: f64 = 4.0;
    /// Above this scale a drag pans instead of swiping.
    pub const PAN_SCALE_GATE: f64 = 1.1;
    /// Net movement in px a swipe must exceed to fire an event.
    pub const SWIPE_THRESHOLD_PX: f64 = 50.0;
    /// Multiplicative zoom step per wheel notch.
    pub const WHEEL_ZOOM_STEP: f64 = 1.25;
}

/// Preview stream supervision.
pub mod stream {
    /// Fixed delay before reissuing the frame fetch after a load error.
    pub const RETRY_DELAY_MS: u32 = 1_000;
}

/// Browser-backed capture settings.
pub mod capture {
    /// Preferred device resolution when acquiring the media stream.
    pub const IDEAL_WIDTH: u32 = 1920;
    pub const IDEAL_HEIGHT: u32 = 1080;
    /// Rear camera preference on mobile devices.
    pub const FACING_MODE: &str = "environment";
    /// JPEG encoder quality for canvas snapshots.
    pub const JPEG_QUALITY: f64 = 0.92;
}
