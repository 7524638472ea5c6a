// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 simdeploy contributors

//! Append-only event log
//!
//! Every pipeline stage reports significant events (start, success, failure)
//! as timestamped human-readable messages. The core only ever writes to the
//! sink; the presentation layer owns the receiving end and renders entries
//! in emission order.

use chrono::{DateTime, Local};
use std::fmt;
use tokio::sync::mpsc;

/// One timestamped log message
#[derive(Debug, Clone)]
pub struct LogEntry {
    /// When the message was emitted
    pub timestamp: DateTime<Local>,
    /// Human-readable message text
    pub message: String,
}

impl LogEntry {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            timestamp: Local::now(),
            message: message.into(),
        }
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.timestamp.format("%H:%M:%S"), self.message)
    }
}

/// Writing end of the event log, cloned into every stage
#[derive(Debug, Clone)]
pub struct EventSender {
    tx: mpsc::UnboundedSender<LogEntry>,
}

impl EventSender {
    /// Append a message to the log
    ///
    /// Emission never blocks and never fails from the core's point of view:
    /// a closed receiver simply means no one is watching anymore.
    pub fn emit(&self, message: impl Into<String>) {
        let _ = self.tx.send(LogEntry::new(message));
    }
}

/// Receiving end of the event log, owned by the presentation layer
pub type EventReceiver = mpsc::UnboundedReceiver<LogEntry>;

/// Create a connected sender/receiver pair
pub fn channel() -> (EventSender, EventReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (EventSender { tx }, rx)
}

/// Drain whatever is currently buffered in the receiver
///
/// Useful once the run has finished and the sender side has been dropped.
pub fn drain(rx: &mut EventReceiver) -> Vec<LogEntry> {
    let mut entries = Vec::new();
    while let Ok(entry) = rx.try_recv() {
        entries.push(entry);
    }
    entries
}
