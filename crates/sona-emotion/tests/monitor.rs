//! Emotion monitor: latest-wins snapshot semantics.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use sona_emotion::detector::EmotionDetector;
use sona_emotion::monitor::EmotionMonitor;
use sona_emotion::{Emotion, EmotionError, FaceReading};

/// Replays scripted samples; repeats the last behavior once exhausted.
struct ScriptedDetector {
    script: Mutex<VecDeque<Result<Option<FaceReading>, String>>>,
}

impl ScriptedDetector {
    fn new(samples: Vec<Result<Option<FaceReading>, String>>) -> Self {
        Self {
            script: Mutex::new(samples.into()),
        }
    }
}

#[async_trait]
impl EmotionDetector for ScriptedDetector {
    async fn sample(&self) -> Result<Option<FaceReading>, EmotionError> {
        let mut script = self.script.lock().unwrap();
        match script.pop_front() {
            Some(Ok(reading)) => Ok(reading),
            Some(Err(message)) => Err(EmotionError::Detector(message)),
            None => Ok(None),
        }
    }
}

fn face(emotion: Emotion) -> Result<Option<FaceReading>, String> {
    Ok(Some(FaceReading { emotion }))
}

#[tokio::test]
async fn default_snapshot_is_neutral_and_faceless() {
    let monitor = EmotionMonitor::new();
    let snapshot = monitor.snapshot();
    assert_eq!(snapshot.emotion, Emotion::Neutral);
    assert!(!snapshot.face_detected);
}

#[tokio::test]
async fn latest_sample_wins() {
    let detector = Arc::new(ScriptedDetector::new(vec![
        face(Emotion::Happy),
        face(Emotion::Sad),
    ]));

    let monitor = EmotionMonitor::new();
    let handle = monitor.spawn(detector, Duration::from_millis(5));

    tokio::time::sleep(Duration::from_millis(50)).await;
    handle.abort();

    let snapshot = monitor.snapshot();
    assert_eq!(snapshot.emotion, Emotion::Sad);
}

#[tokio::test]
async fn lost_face_keeps_last_emotion_but_drops_presence() {
    let detector = Arc::new(ScriptedDetector::new(vec![face(Emotion::Surprise)]));
    // Script exhausts to Ok(None) afterwards.

    let monitor = EmotionMonitor::new();
    let handle = monitor.spawn(detector, Duration::from_millis(5));

    tokio::time::sleep(Duration::from_millis(50)).await;
    handle.abort();

    let snapshot = monitor.snapshot();
    assert_eq!(snapshot.emotion, Emotion::Surprise);
    assert!(!snapshot.face_detected);
}

#[tokio::test]
async fn detector_errors_leave_snapshot_untouched() {
    let detector = Arc::new(ScriptedDetector::new(vec![
        face(Emotion::Happy),
        Err("camera unavailable".to_string()),
        Err("camera unavailable".to_string()),
    ]));

    let monitor = EmotionMonitor::new();
    let handle = monitor.spawn(detector, Duration::from_millis(5));

    tokio::time::sleep(Duration::from_millis(20)).await;
    let snapshot = monitor.snapshot();
    handle.abort();

    assert_eq!(snapshot.emotion, Emotion::Happy);
}
