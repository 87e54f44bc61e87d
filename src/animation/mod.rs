//! Animation module - the lock contract and the playback behind it.

mod clips;
mod lock;
mod playback;
mod plugin;

pub use clips::{AnimationQueue, ClipLibrary, CrossFade, QueuedAnimator};
pub use lock::{effective_duration, AnimationLock, WaitStatus, WaitTicket};
pub use playback::{AgentAnimations, AnimationLink, NeedsAnimationSetup};
pub use plugin::AgentAnimationPlugin;
