//! Per-shortcode ordered access history.

use crate::domain::entities::AccessRecord;

/// Number of accesses exposed by reporting.
pub const HISTORY_WINDOW: usize = 10;

/// Append-only sequence of accesses for one shortcode.
///
/// Entries keep the order in which the registry accepted them. Storage is
/// unbounded; only [`AccessLog::recent`] bounds what is reported.
#[derive(Debug, Clone, Default)]
pub struct AccessLog {
    entries: Vec<AccessRecord>,
}

impl AccessLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, access: AccessRecord) {
        self.entries.push(access);
    }

    /// Returns the last `limit` entries, oldest first.
    pub fn recent(&self, limit: usize) -> &[AccessRecord] {
        let start = self.entries.len().saturating_sub(limit);
        &self.entries[start..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn access(agent: &str) -> AccessRecord {
        AccessRecord::new(Some(agent.to_string()), None)
    }

    fn agents(entries: &[AccessRecord]) -> Vec<String> {
        entries
            .iter()
            .filter_map(|a| a.client_agent.clone())
            .collect()
    }

    #[test]
    fn test_empty_log() {
        let log = AccessLog::new();

        assert!(log.recent(HISTORY_WINDOW).is_empty());
        assert!(log.recent(usize::MAX).is_empty());
    }

    #[test]
    fn test_recent_returns_everything_below_window() {
        let mut log = AccessLog::new();
        log.append(access("a"));
        log.append(access("b"));

        assert_eq!(agents(log.recent(HISTORY_WINDOW)), vec!["a", "b"]);
    }

    #[test]
    fn test_recent_keeps_trailing_window_in_order() {
        let mut log = AccessLog::new();
        for i in 0..15 {
            log.append(access(&i.to_string()));
        }

        let recent = agents(log.recent(HISTORY_WINDOW));
        let expected: Vec<String> = (5..15).map(|i| i.to_string()).collect();

        assert_eq!(log.recent(usize::MAX).len(), 15);
        assert_eq!(recent, expected);
    }
}
