// ─── Event Stream Buffer ───
// Append-only launch log plus the latest progress value. Nothing is ever
// removed from the history; the render policy alone decides what is shown.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::warn;

use crate::core::observe::{Subscribers, Subscription};

/// How many trailing lines the log panel shows by default.
pub const DEFAULT_TAIL_LIMIT: usize = 50;

/// Fired after every append; a log view scrolls to `index` in response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogAppended {
    pub index: usize,
    pub len: usize,
}

struct BufferState {
    lines: Vec<String>,
    progress: f64,
}

#[derive(Clone)]
pub struct EventStreamBuffer {
    state: Arc<Mutex<BufferState>>,
    appended: Subscribers<LogAppended>,
    progress_changed: Subscribers<f64>,
}

impl Default for EventStreamBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl EventStreamBuffer {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(BufferState {
                lines: Vec::new(),
                progress: 0.0,
            })),
            appended: Subscribers::new(),
            progress_changed: Subscribers::new(),
        }
    }

    pub fn append(&self, line: impl Into<String>) -> LogAppended {
        let event = {
            let mut state = self.state.lock();
            state.lines.push(line.into());
            let len = state.lines.len();
            LogAppended {
                index: len - 1,
                len,
            }
        };
        self.appended.emit(&event);
        event
    }

    /// Store the latest progress value as reported.
    ///
    /// Values outside `[0, 1]` are kept verbatim and only logged; use
    /// [`display_progress`](Self::display_progress) when drawing a bar.
    pub fn set_progress(&self, value: f64) {
        if !(0.0..=1.0).contains(&value) {
            warn!("Host reported progress outside [0, 1]: {value}");
        }
        self.state.lock().progress = value;
        self.progress_changed.emit(&value);
    }

    pub fn progress(&self) -> f64 {
        self.state.lock().progress
    }

    /// Progress clamped into `[0, 1]`; NaN reads as 0.
    pub fn display_progress(&self) -> f64 {
        let value = self.progress();
        if value.is_nan() {
            0.0
        } else {
            value.clamp(0.0, 1.0)
        }
    }

    /// Full history when `show_all`, otherwise the last `tail_limit` lines.
    pub fn render(&self, tail_limit: usize, show_all: bool) -> String {
        let state = self.state.lock();
        if show_all {
            return state.lines.join("\n");
        }
        let start = state.lines.len().saturating_sub(tail_limit);
        state.lines[start..].join("\n")
    }

    pub fn len(&self) -> usize {
        self.state.lock().lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn lines(&self) -> Vec<String> {
        self.state.lock().lines.clone()
    }

    /// Auto-scroll hook: called after every appended line.
    pub fn on_append<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&LogAppended) + Send + Sync + 'static,
    {
        self.appended.subscribe(callback)
    }

    pub fn on_progress<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&f64) + Send + Sync + 'static,
    {
        self.progress_changed.subscribe(callback)
    }
}
