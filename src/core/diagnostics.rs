use std::{
    collections::VecDeque,
    sync::{
        LazyLock,
        Mutex,
    },
};

use chrono::{
    DateTime,
    Local,
};

pub const DIAGNOSTIC_CAPACITY: usize = 100;

static DIAGNOSTICS: LazyLock<DiagnosticLog> =
    LazyLock::new(|| DiagnosticLog::with_capacity(DIAGNOSTIC_CAPACITY));

#[derive(Debug, Clone)]
pub struct DiagnosticEntry {
    pub at: DateTime<Local>,
    pub message: String,
}

impl std::fmt::Display for DiagnosticEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.at.format("%Y-%m-%d %H:%M:%S"), self.message)
    }
}

/// Bounded ring buffer; once full, each append drops the oldest entry.
#[derive(Debug)]
pub struct DiagnosticLog {
    capacity: usize,
    entries: Mutex<VecDeque<DiagnosticEntry>>,
}

impl DiagnosticLog {
    pub fn with_capacity(capacity: usize) -> Self {
        Self { capacity, entries: Mutex::new(VecDeque::with_capacity(capacity)) }
    }

    pub fn append(&self, message: impl Into<String>) {
        let entry = DiagnosticEntry { at: Local::now(), message: message.into() };
        // A poisoned lock only means another append panicked mid-push; the
        // deque itself is still usable.
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        if self.capacity == 0 {
            return;
        }
        if entries.len() == self.capacity {
            entries.pop_front();
        }
        entries.push_back(entry);
    }

    /// Oldest first.
    pub fn snapshot(&self) -> Vec<DiagnosticEntry> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.iter().cloned().collect()
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

/// Appends to the process-wide diagnostic buffer.
pub fn record(message: impl Into<String>) {
    DIAGNOSTICS.append(message);
}

pub fn global() -> &'static DiagnosticLog {
    &DIAGNOSTICS
}
