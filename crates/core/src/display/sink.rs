//! Render sink trait and implementations.

use std::sync::{Arc, Mutex};

use super::RenderOutput;

/// Receives every frame the engine wants on screen.
///
/// Implementations draw to a status item, a terminal line, a log, etc.
/// `render()` is called from the engine task and must not block.
pub trait RenderSink: Send + Sync {
    fn render(&self, output: &RenderOutput);
}

/// Mock sink for testing - collects rendered frames.
#[derive(Clone, Default)]
pub struct MockRenderSink {
    frames: Arc<Mutex<Vec<RenderOutput>>>,
}

impl MockRenderSink {
    pub fn new() -> Self {
        Self {
            frames: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Returns all collected frames.
    pub fn frames(&self) -> Vec<RenderOutput> {
        self.frames.lock().map(|f| f.clone()).unwrap_or_default()
    }

    /// Text of every collected frame.
    pub fn texts(&self) -> Vec<String> {
        self.frames().iter().map(RenderOutput::text).collect()
    }

    /// Text of the most recent frame.
    pub fn last_text(&self) -> Option<String> {
        self.frames().last().map(RenderOutput::text)
    }

    /// Clears collected frames.
    pub fn clear(&self) {
        if let Ok(mut frames) = self.frames.lock() {
            frames.clear();
        }
    }
}

impl RenderSink for MockRenderSink {
    fn render(&self, output: &RenderOutput) {
        if let Ok(mut frames) = self.frames.lock() {
            frames.push(output.clone());
        }
    }
}
