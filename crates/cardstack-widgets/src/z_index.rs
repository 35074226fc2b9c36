//! Z-index epochs for promoted cards.
//!
//! Every promotion opens a new epoch whose offset lies strictly above all
//! stacking values of earlier epochs. Steady-state cards stack at
//! `(len - i) + offset`; the promoted card gets `offset + len + 1`, one
//! above the highest value in its own epoch.

/// Default distance between epochs per card.
pub const DEFAULT_STRIDE: u64 = 100;

/// Monotonic z-offset allocator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZIndexAllocator {
    stride: u64,
    offset: u64,
    epochs: u64,
    top: Option<u64>,
}

impl Default for ZIndexAllocator {
    fn default() -> Self {
        Self::new(DEFAULT_STRIDE)
    }
}

impl ZIndexAllocator {
    /// Create an allocator. `stride` is clamped to at least 1.
    pub fn new(stride: u64) -> Self {
        Self {
            stride: stride.max(1),
            offset: 0,
            epochs: 0,
            top: None,
        }
    }

    /// Offset added to every steady-state stacking value.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Number of promotions so far.
    pub fn epochs(&self) -> u64 {
        self.epochs
    }

    /// Value allocated by the latest [`bump`](Self::bump).
    pub fn top(&self) -> Option<u64> {
        self.top
    }

    /// Open a new epoch for a stack of `len` cards and return the z-index
    /// allocated to the promoted card.
    ///
    /// The offset grows by `(len - 1) * stride` (at least `stride`), so the
    /// first bump lands exactly on `(len - 1) * stride`.
    pub fn bump(&mut self, len: usize) -> u64 {
        let cards = len as u64;
        let step = self.stride.saturating_mul(cards.saturating_sub(1).max(1));
        self.offset = self.offset.saturating_add(step);
        self.epochs += 1;
        let allocated = self.offset.saturating_add(cards).saturating_add(1);
        self.top = Some(allocated);
        allocated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_bump_matches_coarse_policy() {
        let mut z = ZIndexAllocator::default();
        z.bump(5);
        assert_eq!(z.offset(), 400);
        assert_eq!(z.epochs(), 1);
    }

    #[test]
    fn offset_is_monotonic() {
        let mut z = ZIndexAllocator::default();
        let mut last = z.offset();
        for _ in 0..20 {
            z.bump(5);
            assert!(z.offset() > last);
            last = z.offset();
        }
    }

    #[test]
    fn each_allocation_beats_everything_before_it() {
        let len = 5usize;
        let mut z = ZIndexAllocator::default();
        // Highest value any card could hold before the first promotion.
        let mut prior_max = len as u64;

        for _ in 0..10 {
            let allocated = z.bump(len);
            assert!(allocated > prior_max, "{allocated} <= {prior_max}");

            let epoch_steady_max = len as u64 + z.offset();
            assert!(allocated > epoch_steady_max);
            prior_max = allocated.max(epoch_steady_max);
        }
    }

    #[test]
    fn single_card_stack_still_advances() {
        let mut z = ZIndexAllocator::default();
        let a = z.bump(1);
        let b = z.bump(1);
        assert!(b > a);
        assert_eq!(z.offset(), 200);
    }

    #[test]
    fn stride_is_at_least_one() {
        let mut z = ZIndexAllocator::new(0);
        let a = z.bump(3);
        let b = z.bump(3);
        assert!(b > a);
    }
}
