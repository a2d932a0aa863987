// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

/// One timestamped line of the run log.
///
/// `node_id` is `None` for run-level lines (start, fallback, completion).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub node_id: Option<String>,
    pub level: LogLevel,
    pub message: String,
}

impl Display for LogEntry {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let level = match self.level {
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        };
        match &self.node_id {
            Some(node_id) => write!(
                f,
                "[{}] {:<5} {}: {}",
                self.timestamp.format("%H:%M:%S%.3f"),
                level,
                node_id,
                self.message
            ),
            None => write!(
                f,
                "[{}] {:<5} {}",
                self.timestamp.format("%H:%M:%S%.3f"),
                level,
                self.message
            ),
        }
    }
}

/// Ordered log sink for a run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunLog {
    entries: Vec<LogEntry>,
}

impl RunLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(
        &mut self,
        node_id: Option<&str>,
        level: LogLevel,
        message: impl Into<String>,
    ) -> &LogEntry {
        self.entries.push(LogEntry {
            timestamp: Utc::now(),
            node_id: node_id.map(str::to_string),
            level,
            message: message.into(),
        });
        let last = self.entries.len() - 1;
        &self.entries[last]
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Lines written for a single node, in order.
    pub fn for_node<'a>(&'a self, node_id: &'a str) -> impl Iterator<Item = &'a LogEntry> + 'a {
        self.entries
            .iter()
            .filter(move |entry| entry.node_id.as_deref() == Some(node_id))
    }

    /// Messages only, handy for comparing runs while ignoring timestamps.
    pub fn messages(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.message.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_filter_by_node() {
        let mut log = RunLog::new();
        log.push(None, LogLevel::Info, "run started");
        log.push(Some("n1"), LogLevel::Info, "succeeded");
        log.push(Some("n2"), LogLevel::Error, "failed: boom");

        assert_eq!(log.len(), 3);
        let n2: Vec<&LogEntry> = log.for_node("n2").collect();
        assert_eq!(n2.len(), 1);
        assert_eq!(n2[0].level, LogLevel::Error);
        assert_eq!(
            log.messages(),
            vec!["run started", "succeeded", "failed: boom"]
        );
    }

    #[test]
    fn test_display_includes_node_and_level() {
        let mut log = RunLog::new();
        let line = log.push(Some("n1"), LogLevel::Warn, "slow").to_string();
        assert!(line.contains("WARN"));
        assert!(line.ends_with("n1: slow"));
    }
}
