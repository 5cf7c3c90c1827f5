// ABOUTME: Progress reporting for the script-deck application
// ABOUTME: Status events emitted while a deck is generated, plus reporter implementations

use std::fmt;
use std::sync::Mutex;

/// A user-visible progress update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    AnalyzingScript,
    PreparingImages,
    GeneratingImage { position: usize, total: usize },
    ImageUnavailable { position: usize, rate_limited: bool },
    PreviewReady { slides: usize },
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::AnalyzingScript => write!(f, "Analysing the script to plan the slides..."),
            Status::PreparingImages => write!(f, "Preparing slide images..."),
            Status::GeneratingImage { position, total } => write!(
                f,
                "Generating image for slide {}/{} (one at a time to respect API limits)",
                position, total
            ),
            Status::ImageUnavailable {
                position,
                rate_limited: true,
            } => write!(
                f,
                "Slide {}: image skipped, the API rate limit was reached",
                position
            ),
            Status::ImageUnavailable { position, .. } => {
                write!(f, "Slide {}: no image (generation failed)", position)
            }
            Status::PreviewReady { slides } => write!(f, "Preview ready: {} slides", slides),
        }
    }
}

pub trait StatusReporter: Send + Sync {
    fn report(&self, status: &Status);
}

/// Keeps every update, in order.
#[derive(Default)]
pub struct RecordingReporter {
    events: Mutex<Vec<Status>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Status> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }
}

impl StatusReporter for RecordingReporter {
    fn report(&self, status: &Status) {
        if let Ok(mut events) = self.events.lock() {
            events.push(status.clone());
        }
    }
}
