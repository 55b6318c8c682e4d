//! Events module
//!
//! Typed single-threaded signals and the notification payloads the host
//! publishes (resize, camera pose, frame tick). Signals are owned by the
//! host; managers subscribe to them. There is no global registry.

mod signal;
mod notifications;

pub use signal::{Signal, SubscriptionId};
pub use notifications::{
    Notifications, ResizeEvent, OrientationEvent, PositionEvent, FrameTick,
};
