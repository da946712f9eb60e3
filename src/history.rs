use std::collections::VecDeque;

/// Number of deltas kept for the sparkline.
pub const HISTORY_CAPACITY: usize = 20;

/// Bounded FIFO of recent elapsed deltas, oldest first.
#[derive(Debug, Clone)]
pub struct TimingHistory {
    values: VecDeque<u64>,
    capacity: usize,
}

impl Default for TimingHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl TimingHistory {
    pub fn new() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }

    /// A history holding at most `capacity` values (at least one).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            values: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Append a delta, evicting from the front once over capacity.
    pub fn record(&mut self, delta_ms: u64) {
        self.values.push_back(delta_ms);
        while self.values.len() > self.capacity {
            self.values.pop_front();
        }
    }

    /// Recorded values in chronological order.
    pub fn snapshot(&self) -> Vec<u64> {
        self.values.iter().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = u64> + '_ {
        self.values.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }
}
