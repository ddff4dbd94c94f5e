//! Invariant checks excluded from coverage.

#![cfg_attr(coverage_nightly, coverage(off))]

#[inline]
pub(super) fn settle_polled_after_completion() -> ! {
    panic!("Settle: polled after completion")
}
