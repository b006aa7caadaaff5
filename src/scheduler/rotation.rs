//! Segment rotation.
//!
//! The drill keeps a short window of recently used segment indices and
//! picks the next segment at random from those outside the window, so a
//! session feels varied without repeating a segment until the others have
//! had their turn. Once every segment sits inside the window, selection
//! falls back to cycling forward from the least-recently-used entry.
//!
//! The selection and recording steps are free functions over caller-owned
//! state; [`SegmentRotation`] bundles them for consumers that want a
//! single handle per session.

use rand::Rng;

/// Smallest usage window for lessons with at least three segments.
const MIN_WINDOW: usize = 2;

/// How many recently used indices to track for a pool of `segment_count`
/// segments.
///
/// Grows with the pool but stays at half its size at most, so there are
/// always untracked segments to choose from. Pools of fewer than three
/// segments get a degenerate window of `segment_count - 1`.
pub fn max_tracked(segment_count: usize) -> usize {
    if segment_count < 3 {
        segment_count.saturating_sub(1)
    } else {
        (segment_count - 1).min(segment_count / 2).max(MIN_WINDOW)
    }
}

/// Pick the next segment index to serve.
///
/// Returns `0` for an empty pool (the caller is expected to check for
/// content before asking) and on the very first call, so a fresh session
/// always starts at the top of the material. Otherwise picks uniformly at
/// random among indices not in `usage`; if every index is tracked, cycles
/// forward from the oldest entry.
pub fn next_index<R: Rng + ?Sized>(segment_count: usize, usage: &[usize], rng: &mut R) -> usize {
    if segment_count == 0 || usage.is_empty() {
        return 0;
    }

    let available: Vec<usize> = (0..segment_count).filter(|i| !usage.contains(i)).collect();
    if !available.is_empty() {
        return available[rng.random_range(0..available.len())];
    }

    // Everything is inside the tracked window. Walk forward from the
    // least-recently-used index; if its successor is still tracked and the
    // window is smaller than the pool, skip one further so the cycle keeps
    // making progress.
    let lru = usage[0];
    let mut next = (lru + 1) % segment_count;
    if usage.contains(&next) && usage.len() < segment_count {
        next = (next + 1) % segment_count;
    }
    next
}

/// Record a served segment index into the usage window.
///
/// Appends `index` and evicts the oldest entries until the window fits
/// `max_tracked`. A window of zero keeps the history permanently empty.
pub fn record_usage(usage: &mut Vec<usize>, index: usize, max_tracked: usize) {
    usage.push(index);
    while usage.len() > max_tracked {
        usage.remove(0);
    }
}

/// Per-session rotation state: pool size plus the usage window.
#[derive(Debug, Clone)]
pub struct SegmentRotation {
    segment_count: usize,
    window: usize,
    usage: Vec<usize>,
}

impl SegmentRotation {
    /// Create rotation state for a pool of `segment_count` segments.
    pub fn new(segment_count: usize) -> Self {
        Self {
            segment_count,
            window: max_tracked(segment_count),
            usage: Vec::new(),
        }
    }

    pub fn segment_count(&self) -> usize {
        self.segment_count
    }

    pub fn usage(&self) -> &[usize] {
        &self.usage
    }

    /// Pick the next segment to serve. Does not mark it used; call
    /// [`SegmentRotation::mark_used`] once the segment was actually
    /// consumed.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        next_index(self.segment_count, &self.usage, rng)
    }

    /// Record a consumed segment into the usage window.
    pub fn mark_used(&mut self, index: usize) {
        record_usage(&mut self.usage, index, self.window);
    }
}
