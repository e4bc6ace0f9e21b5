//! Debounced, cancellable persistence writes keyed by node id.
//!
//! The scheduler owns no timer: the host drives it with a millisecond
//! clock (real time in the browser, a counter in tests) and polls after
//! any clock advance. Whether a due write still applies is a single
//! comparison of the node id captured at schedule time against the
//! current selection.

use std::collections::BTreeMap;

use crate::category::ConfigMap;

/// Coalescing window per change-burst.
pub const DEBOUNCE_WINDOW_MS: u64 = 300;

#[derive(Debug, Clone)]
pub struct PendingWrite {
    /// Target captured at schedule time, not at fire time.
    pub node_id: String,
    pub config: ConfigMap,
    deadline_ms: u64,
}

impl PendingWrite {
    pub fn deadline_ms(&self) -> u64 {
        self.deadline_ms
    }
}

#[derive(Debug)]
pub struct WriteScheduler {
    window_ms: u64,
    pending: BTreeMap<String, PendingWrite>,
}

impl Default for WriteScheduler {
    fn default() -> Self {
        WriteScheduler::new()
    }
}

impl WriteScheduler {
    pub fn new() -> Self {
        WriteScheduler {
            window_ms: DEBOUNCE_WINDOW_MS,
            pending: BTreeMap::new(),
        }
    }

    pub fn with_window(window_ms: u64) -> Self {
        WriteScheduler {
            window_ms,
            ..WriteScheduler::new()
        }
    }

    /// Schedule a write of `config` for `node_id`. A burst of edits to the
    /// same node coalesces into one write of the latest state with a
    /// pushed-out deadline.
    pub fn schedule(&mut self, node_id: &str, config: ConfigMap, now_ms: u64) {
        self.pending.insert(
            node_id.to_string(),
            PendingWrite {
                node_id: node_id.to_string(),
                config,
                deadline_ms: now_ms + self.window_ms,
            },
        );
    }

    /// Drain due writes. A due write whose captured node id no longer
    /// matches the current selection is silently dropped — the stale
    /// timer case. At most one write can match the selection.
    pub fn poll(&mut self, now_ms: u64, current_selection: Option<&str>) -> Option<PendingWrite> {
        let due: Vec<String> = self
            .pending
            .iter()
            .filter(|(_, w)| w.deadline_ms <= now_ms)
            .map(|(id, _)| id.clone())
            .collect();

        let mut fired = None;
        for id in due {
            if let Some(write) = self.pending.remove(&id) {
                if current_selection == Some(write.node_id.as_str()) {
                    fired = Some(write);
                }
            }
        }
        fired
    }

    /// Cancel the pending write for one node.
    pub fn cancel(&mut self, node_id: &str) {
        self.pending.remove(node_id);
    }

    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    pub fn has_pending(&self, node_id: &str) -> bool {
        self.pending.contains_key(node_id)
    }
}
