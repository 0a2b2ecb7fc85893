pub mod gallery;
pub mod session;
pub mod stream;
pub mod viewer;

pub use gallery::Gallery;
pub use session::{CaptureSession, SessionAction, SessionPhase};
pub use stream::{RetryPolicy, StreamSupervisor, Verdict};
pub use viewer::{GestureEngine, SwipeAction, Transform};
