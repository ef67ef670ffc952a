//! The polling task and its shared snapshot.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use tracing::{debug, info};

use crate::detector::EmotionDetector;
use crate::EmotionSnapshot;

/// Handle to the latest emotion snapshot.
///
/// Cloning shares the underlying state. The background task is the only
/// writer; any number of readers may take snapshots.
#[derive(Clone, Default)]
pub struct EmotionMonitor {
    snapshot: Arc<RwLock<EmotionSnapshot>>,
}

impl EmotionMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recent reading. May be stale or the default; advisory only.
    pub fn snapshot(&self) -> EmotionSnapshot {
        match self.snapshot.read() {
            Ok(guard) => guard.clone(),
            // A poisoned lock means a panicked writer; the stored value is
            // still a complete snapshot.
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Spawn the background sampling task.
    ///
    /// Each tick samples the detector and overwrites the snapshot. Detector
    /// errors are logged and skipped — the previous value simply stays
    /// current until the next successful sample.
    pub fn spawn(
        &self,
        detector: Arc<dyn EmotionDetector>,
        interval: Duration,
    ) -> tokio::task::JoinHandle<()> {
        let snapshot = Arc::clone(&self.snapshot);
        info!(interval_ms = interval.as_millis() as u64, "emotion monitor started");

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;

                match detector.sample().await {
                    Ok(Some(reading)) => {
                        if let Ok(mut guard) = snapshot.write() {
                            guard.emotion = reading.emotion;
                            guard.face_detected = true;
                            guard.last_seen = jiff::Timestamp::now();
                        }
                    }
                    Ok(None) => {
                        // Keep the last emotion; only the presence flag drops.
                        if let Ok(mut guard) = snapshot.write() {
                            guard.face_detected = false;
                        }
                    }
                    Err(e) => {
                        debug!(error = %e, "emotion sample failed, keeping previous snapshot");
                    }
                }
            }
        })
    }
}
