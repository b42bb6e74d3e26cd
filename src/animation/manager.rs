use super::kinds::Animation;
use super::request::AnimationRequest;
use crate::error::EmulatorError;
use crate::strip::EmulatedStrip;
use chrono::{DateTime, Utc};
use log::{debug, error, info};
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

pub fn random_id() -> String {
    format!("{:08x}", rand::random::<u32>())
}

pub struct RunningAnimation {
    pub id: String,
    pub started_at: DateTime<Utc>,
    pub params: AnimationRequest,
    task: JoinHandle<()>,
}

impl RunningAnimation {
    pub async fn join(self) {
        if let Err(e) = self.task.await {
            error!("Animation {} ({}) failed: {}", self.id, self.params.animation, e);
        }
    }
}

/// Runs animations against the strip on the server runtime.
pub struct AnimationManager {
    strip: Arc<EmulatedStrip>,
    runtime: Handle,
}

impl AnimationManager {
    pub fn new(strip: Arc<EmulatedStrip>, runtime: Handle) -> Self {
        Self { strip, runtime }
    }

    pub fn start_animation(&self, request: AnimationRequest) -> Result<RunningAnimation, EmulatorError> {
        let animation = Animation::from_request(&request, &self.strip)?;
        let id = request.id.clone().unwrap_or_else(random_id);
        let started_at = Utc::now();

        info!("[{}] Starting {:?} animation {}", started_at, animation.kind(), id);
        debug!(
            "Animation {} params: {}",
            id,
            serde_json::to_string(&request).unwrap_or_else(|e| e.to_string())
        );

        let task = self.runtime.spawn(animation.run(self.strip.clone()));
        Ok(RunningAnimation {
            id,
            started_at,
            params: request,
            task,
        })
    }
}
