//! Reference workloads driven through a [`Memoizer`]
//!
//! - Range-sum queries over a mutable array, memoized by `(left, right)`
//!   and invalidated wholesale on every update.
//! - Recursive Fibonacci, memoized by `n`.

use tracing::debug;

use crate::error::{Error, Result};
use crate::memo::Memoizer;

/// Inclusive `(left, right)` bounds of a range query
pub type Span = (usize, usize);

/// Integer array answering range-sum queries through a memoizer
pub struct RangeSum<M> {
    data: Vec<u64>,
    memo: M,
}

impl<M> RangeSum<M>
where
    M: Memoizer<Span, u64>,
{
    /// Wrap `data`, memoizing sums in `memo`
    pub fn new(data: Vec<u64>, memo: M) -> Self {
        Self { data, memo }
    }

    /// Sum of `data[left..=right]`, served from the memoizer when possible
    pub fn query(&mut self, left: usize, right: usize) -> Result<u64> {
        self.check_span(left, right)?;

        let span = (left, right);
        if let Some(sum) = self.memo.lookup(&span) {
            return Ok(sum);
        }

        let sum = self.sum_span(left, right)?;
        self.memo.store(span, sum);
        Ok(sum)
    }

    /// Sum of `data[left..=right]`, always recomputed
    pub fn query_uncached(&self, left: usize, right: usize) -> Result<u64> {
        self.check_span(left, right)?;
        self.sum_span(left, right)
    }

    /// Overwrite one element; every memoized sum is dropped
    pub fn update(&mut self, index: usize, value: u64) -> Result<()> {
        self.update_uncached(index, value)?;
        self.memo.invalidate();
        Ok(())
    }

    /// Overwrite one element without touching the memoizer
    ///
    /// Only sound when the memoizer is not being consulted.
    pub fn update_uncached(&mut self, index: usize, value: u64) -> Result<()> {
        let len = self.data.len();
        let slot = self
            .data
            .get_mut(index)
            .ok_or(Error::IndexOutOfBounds { index, len })?;
        *slot = value;
        Ok(())
    }

    /// Get the underlying array
    pub fn data(&self) -> &[u64] {
        &self.data
    }

    /// Get the memoizer
    pub fn memo(&self) -> &M {
        &self.memo
    }

    fn sum_span(&self, left: usize, right: usize) -> Result<u64> {
        self.data[left..=right]
            .iter()
            .try_fold(0u64, |acc, &value| acc.checked_add(value))
            .ok_or(Error::SumOverflow { left, right })
    }

    fn check_span(&self, left: usize, right: usize) -> Result<()> {
        if left > right {
            return Err(Error::InvalidRange { left, right });
        }
        if right >= self.data.len() {
            return Err(Error::IndexOutOfBounds {
                index: right,
                len: self.data.len(),
            });
        }
        Ok(())
    }
}

/// Largest `n` whose Fibonacci number fits in a u128
pub const MAX_FIBONACCI_N: u64 = 186;

/// Fibonacci number `n`, memoized through `memo`
///
/// Base cases are stored too, so a warm memoizer answers every `n` it has
/// seen with a single lookup.
pub fn fibonacci<M>(n: u64, memo: &mut M) -> Result<u128>
where
    M: Memoizer<u64, u128>,
{
    if n > MAX_FIBONACCI_N {
        return Err(Error::Overflow { n });
    }
    Ok(fib_memo(n, memo))
}

fn fib_memo<M>(n: u64, memo: &mut M) -> u128
where
    M: Memoizer<u64, u128>,
{
    if let Some(value) = memo.lookup(&n) {
        return value;
    }

    let value = if n <= 1 {
        u128::from(n)
    } else {
        fib_memo(n - 1, memo) + fib_memo(n - 2, memo)
    };

    memo.store(n, value);
    value
}

/// Fibonacci number `n`, computed iteratively without memoization
pub fn fibonacci_uncached(n: u64) -> Result<u128> {
    if n == 0 {
        return Ok(0);
    }

    let (mut a, mut b) = (0u128, 1u128);
    for _ in 1..n {
        let next = a.checked_add(b).ok_or(Error::Overflow { n })?;
        a = b;
        b = next;
    }
    debug!(n, "computed fibonacci without memoization");
    Ok(b)
}
