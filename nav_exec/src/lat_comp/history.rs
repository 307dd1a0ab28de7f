//! Command history for latency compensation

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::Serialize;
use std::collections::VecDeque;

// Internal
use crate::toc_ctrl::Command;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A command stamped with the time it was issued.
#[derive(Clone, Copy, Serialize, Debug)]
pub struct CommandStamped {
    pub command: Command,

    /// Units: seconds since the Unix epoch
    pub timestamp_s: f64,
}

/// Time-ordered (oldest first) record of issued commands.
///
/// Functions as a sliding window approximating "commands issued but not yet
/// reflected in the latest sensor reading": it grows by appending at the
/// back and shrinks by evicting stale entries from the front.
#[derive(Debug, Default, Clone)]
pub struct CommandHistory {
    entries: VecDeque<CommandStamped>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl CommandHistory {
    /// Append a stamped command. Callers must push in chronological order.
    pub fn push(&mut self, stamped: CommandStamped) {
        self.entries.push_back(stamped);
    }

    /// Drop entries from the front whose age relative to `now_s` is at
    /// least `horizon_s`.
    pub fn evict_stale(&mut self, now_s: f64, horizon_s: f64) {
        while let Some(front) = self.entries.front() {
            if now_s - front.timestamp_s < horizon_s {
                break;
            }
            self.entries.pop_front();
        }
    }

    /// Iterate the retained commands oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &CommandStamped> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    fn stamped(timestamp_s: f64) -> CommandStamped {
        CommandStamped {
            command: Command {
                velocity_ms: 1.0,
                curvature_m: 0.0,
            },
            timestamp_s,
        }
    }

    #[test]
    fn test_push_preserves_order() {
        let mut history = CommandHistory::default();
        history.push(stamped(1.0));
        history.push(stamped(2.0));
        history.push(stamped(3.0));

        let stamps: Vec<f64> = history.iter().map(|c| c.timestamp_s).collect();
        assert_eq!(stamps, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_evict_stale_drops_old_entries() {
        let mut history = CommandHistory::default();
        history.push(stamped(1.0));
        history.push(stamped(1.1));
        history.push(stamped(1.2));

        // Horizon of 0.15 s at t = 1.3: the first two entries are stale
        history.evict_stale(1.3, 0.15);

        assert_eq!(history.len(), 1);
        assert!((history.iter().next().unwrap().timestamp_s - 1.2).abs() < 1e-9);
    }

    #[test]
    fn test_evict_stale_empty_history() {
        let mut history = CommandHistory::default();
        history.evict_stale(10.0, 0.15);
        assert!(history.is_empty());
    }
}
