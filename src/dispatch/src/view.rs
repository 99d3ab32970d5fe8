//! Output handles: where markup and alerts go

use std::sync::Mutex;

/// The results container.
pub trait ResultsSink: Send + Sync {
    fn set_html(&self, html: &str);
}

/// Blocking user notification, shown instead of sending a request.
pub trait Notifier: Send + Sync {
    fn alert(&self, message: &str);
}

/// Keeps every markup write in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    writes: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current content, empty if never written
    pub fn html(&self) -> String {
        self.writes
            .lock()
            .map(|w| w.last().cloned().unwrap_or_default())
            .unwrap_or_default()
    }

    pub fn writes(&self) -> Vec<String> {
        self.writes.lock().map(|w| w.clone()).unwrap_or_default()
    }
}

impl ResultsSink for MemorySink {
    fn set_html(&self, html: &str) {
        if let Ok(mut w) = self.writes.lock() {
            w.push(html.to_string());
        }
    }
}

#[derive(Debug, Default)]
pub struct MemoryNotifier {
    alerts: Mutex<Vec<String>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().map(|a| a.clone()).unwrap_or_default()
    }
}

impl Notifier for MemoryNotifier {
    fn alert(&self, message: &str) {
        if let Ok(mut a) = self.alerts.lock() {
            a.push(message.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_keeps_last_write() {
        let sink = MemorySink::new();
        assert_eq!(sink.html(), "");
        sink.set_html("a");
        sink.set_html("b");
        assert_eq!(sink.html(), "b");
        assert_eq!(sink.writes(), vec!["a", "b"]);
    }
}
