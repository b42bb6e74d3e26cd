mod kinds;
mod manager;
mod request;

pub use kinds::{Animation, AnimationKind};
pub use manager::{random_id, AnimationManager, RunningAnimation};
pub use request::AnimationRequest;
