use crate::animation::{random_id, AnimationManager, AnimationRequest, RunningAnimation};
use crate::error::EmulatorError;
use crate::layout::PixelLocation;
use crate::strip::EmulatedStrip;
use chrono::{DateTime, Utc};
use log::{info, warn};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::{watch, RwLock};

/// Owns the emulated strip, its animation manager and the saved animations.
pub struct LedServer {
    strip: Arc<EmulatedStrip>,
    animation_manager: AnimationManager,
    saved_animations: RwLock<HashMap<String, AnimationRequest>>,
    running: watch::Sender<bool>,
}

pub struct ServerHandle {
    started_at: DateTime<Utc>,
    running: watch::Receiver<bool>,
}

impl ServerHandle {
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub async fn wait_until_stop(mut self) {
        // A dropped sender also means the server is gone.
        let _ = self.running.wait_for(|running| !running).await;
    }
}

impl LedServer {
    pub fn new(layout: &[PixelLocation], runtime: Handle) -> Self {
        let strip = Arc::new(EmulatedStrip::new(layout));
        let (running, _) = watch::channel(false);
        Self {
            animation_manager: AnimationManager::new(strip.clone(), runtime),
            strip,
            saved_animations: RwLock::new(HashMap::new()),
            running,
        }
    }

    pub fn strip(&self) -> &Arc<EmulatedStrip> {
        &self.strip
    }

    pub fn is_running(&self) -> bool {
        *self.running.borrow()
    }

    pub fn start(&self) -> ServerHandle {
        let started_at = Utc::now();
        if self.running.send_replace(true) {
            warn!("[{}] Server already running", started_at);
        } else {
            info!("[{}] Server started with {} pixels", started_at, self.strip.num_pixels());
        }
        ServerHandle {
            started_at,
            running: self.running.subscribe(),
        }
    }

    pub fn stop(&self) {
        if self.running.send_replace(false) {
            info!("[{}] Server stopped", Utc::now());
        }
    }

    pub fn start_animation(&self, request: AnimationRequest) -> Result<RunningAnimation, EmulatorError> {
        if !self.is_running() {
            return Err(EmulatorError::ServerNotRunning);
        }
        self.animation_manager.start_animation(request)
    }

    /// Stores `request` under its id, assigning a random id when it has none.
    /// Returns the key it was saved under.
    pub async fn add_saved_animation(&self, mut request: AnimationRequest) -> String {
        let key = request.id.get_or_insert_with(random_id).clone();
        info!("Saving {} animation as '{}'", request.animation, key);
        self.saved_animations.write().await.insert(key.clone(), request);
        key
    }

    pub async fn saved_animation(&self, key: &str) -> Result<AnimationRequest, EmulatorError> {
        self.saved_animations
            .read()
            .await
            .get(key)
            .cloned()
            .ok_or_else(|| EmulatorError::SavedAnimationNotFound(key.to_string()))
    }

    pub async fn start_saved_animation(&self, key: &str) -> Result<RunningAnimation, EmulatorError> {
        let request = self.saved_animation(key).await?;
        self.start_animation(request)
    }
}
