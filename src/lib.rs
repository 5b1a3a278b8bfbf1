#![deny(missing_docs)]

//! The **equal-block-partitions** crate enumerates and counts the partitions
//! of a finite set into pairwise disjoint blocks of a single fixed size.
//!
//! You can use the `equal_block_partitions` function to list every way to
//! split a set of `n` distinct elements into `n / k` blocks of exactly `k`
//! elements, and the `equal_block_partition_count` function to get the number
//! of such partitions, `n! / ((n/k)! * (k!)^(n/k))`, without enumerating them.
//!
//! See <https://cs.stackexchange.com/questions/79562/enumerate-partitions-of-a-set-with-blocks-of-equal-size>
//! for a statement of the problem and pointers to the literature.
//!
//! # How to use
//!
//! Collect the elements into a `BTreeSet` and call `equal_block_partitions`
//! with the block size. Every partition in the result is a `Partition`, a set
//! of `Block`s, and both are thin wrappers that dereference to the underlying
//! `BTreeSet`, so the usual set operations are available on them.
//!
//! Elements need `Ord` and `Clone`. The ordering keeps blocks and partitions
//! in a canonical form, which is what lets structural equality recognize a
//! partition that was reached through two different block choice orders as a
//! duplicate.

use itertools::Itertools;
use num_traits::PrimInt;
use std::borrow::Borrow;
use std::collections::btree_set;
use std::collections::BTreeSet;
use std::ops::Deref;
use thiserror::Error;

/// Error returned when a requested block size cannot be enumerated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BlockSizeError {
    /// The block size was zero; every block must hold at least one element.
    #[error("block size must be positive")]
    Zero,
    /// The block size exceeds the number of elements in the set.
    #[error("block size {k} exceeds set size {n}")]
    TooLarge {
        /// The requested block size.
        k: usize,
        /// The number of elements in the set being partitioned.
        n: usize,
    },
}

/// A block of a partition: a set of elements, all belonging to the same part.
///
/// Blocks produced by `equal_block_partitions` all have the same size.
/// `Block` dereferences to the underlying `BTreeSet`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Block<T: Ord>(BTreeSet<T>);

impl<T: Ord> Block<T> {
    /// Returns the underlying set of elements.
    pub fn into_inner(self) -> BTreeSet<T> {
        self.0
    }
}

impl<T: Ord> Deref for Block<T> {
    type Target = BTreeSet<T>;

    fn deref(&self) -> &BTreeSet<T> {
        &self.0
    }
}

impl<T: Ord> AsRef<BTreeSet<T>> for Block<T> {
    fn as_ref(&self) -> &BTreeSet<T> {
        &self.0
    }
}

impl<T: Ord> Borrow<BTreeSet<T>> for Block<T> {
    fn borrow(&self) -> &BTreeSet<T> {
        &self.0
    }
}

impl<T: Ord> From<BTreeSet<T>> for Block<T> {
    fn from(elements: BTreeSet<T>) -> Self {
        Block(elements)
    }
}

impl<T: Ord> FromIterator<T> for Block<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Block(iter.into_iter().collect())
    }
}

impl<T: Ord> IntoIterator for Block<T> {
    type Item = T;
    type IntoIter = btree_set::IntoIter<T>;

    fn into_iter(self) -> btree_set::IntoIter<T> {
        self.0.into_iter()
    }
}

impl<'a, T: Ord> IntoIterator for &'a Block<T> {
    type Item = &'a T;
    type IntoIter = btree_set::Iter<'a, T>;

    fn into_iter(self) -> btree_set::Iter<'a, T> {
        self.0.iter()
    }
}

/// A partition: a set of pairwise disjoint blocks covering the partitioned
/// set.
///
/// `Partition` dereferences to the underlying `BTreeSet` of blocks.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Partition<T: Ord>(BTreeSet<Block<T>>);

impl<T: Ord> Partition<T> {
    /// Returns the number of blocks in the partition.
    pub fn num_blocks(&self) -> usize {
        self.0.len()
    }

    /// Returns an iterator over the blocks of the partition.
    pub fn blocks(&self) -> btree_set::Iter<'_, Block<T>> {
        self.0.iter()
    }

    /// Returns an iterator over every element of every block.
    pub fn elements(&self) -> impl Iterator<Item = &T> {
        self.0.iter().flat_map(|block| block.iter())
    }

    /// Returns the underlying set of blocks.
    pub fn into_inner(self) -> BTreeSet<Block<T>> {
        self.0
    }
}

impl<T: Ord> Deref for Partition<T> {
    type Target = BTreeSet<Block<T>>;

    fn deref(&self) -> &BTreeSet<Block<T>> {
        &self.0
    }
}

impl<T: Ord> AsRef<BTreeSet<Block<T>>> for Partition<T> {
    fn as_ref(&self) -> &BTreeSet<Block<T>> {
        &self.0
    }
}

impl<T: Ord> Borrow<BTreeSet<Block<T>>> for Partition<T> {
    fn borrow(&self) -> &BTreeSet<Block<T>> {
        &self.0
    }
}

impl<T: Ord> From<BTreeSet<Block<T>>> for Partition<T> {
    fn from(blocks: BTreeSet<Block<T>>) -> Self {
        Partition(blocks)
    }
}

impl<T: Ord> FromIterator<Block<T>> for Partition<T> {
    fn from_iter<I: IntoIterator<Item = Block<T>>>(iter: I) -> Self {
        Partition(iter.into_iter().collect())
    }
}

impl<T: Ord> IntoIterator for Partition<T> {
    type Item = Block<T>;
    type IntoIter = btree_set::IntoIter<Block<T>>;

    fn into_iter(self) -> btree_set::IntoIter<Block<T>> {
        self.0.into_iter()
    }
}

impl<'a, T: Ord> IntoIterator for &'a Partition<T> {
    type Item = &'a Block<T>;
    type IntoIter = btree_set::Iter<'a, Block<T>>;

    fn into_iter(self) -> btree_set::Iter<'a, Block<T>> {
        self.0.iter()
    }
}

/// Returns all partitions of `s` into blocks of exactly `k` elements.
///
/// Every partition in the result covers `s` exactly: its blocks are pairwise
/// disjoint sets of exactly `k` elements whose union is `s`. Each partition
/// appears exactly once. If `k` does not divide the size of `s`, no such
/// partition exists and the result is empty.
///
/// Fails with `BlockSizeError` if `k` is zero or larger than the set.
///
/// The whole result is materialized; the number of partitions is
/// `n! / ((n/k)! * (k!)^(n/k))` for `n` elements, so this is only practical
/// for small sets.
///
/// # Examples
///
/// ```
/// use equal_block_partitions::{equal_block_partitions, Partition};
/// use std::collections::BTreeSet;
///
/// let s = BTreeSet::from([1, 2, 3, 4]);
/// let all = equal_block_partitions(&s, 2).unwrap();
///
/// let expected: BTreeSet<Partition<i32>> = [
///     [[1, 2], [3, 4]],
///     [[1, 3], [2, 4]],
///     [[1, 4], [2, 3]],
/// ]
/// .into_iter()
/// .map(|blocks| blocks.into_iter().map(|b| b.into_iter().collect()).collect())
/// .collect();
/// assert_eq!(all, expected);
/// ```
pub fn equal_block_partitions<T>(
    s: &BTreeSet<T>,
    k: usize,
) -> Result<BTreeSet<Partition<T>>, BlockSizeError>
where
    T: Ord + Clone,
{
    if k == 0 {
        return Err(BlockSizeError::Zero);
    }
    if k > s.len() {
        return Err(BlockSizeError::TooLarge { k, n: s.len() });
    }

    Ok(enumerate(s, k))
}

fn enumerate<T>(s: &BTreeSet<T>, k: usize) -> BTreeSet<Partition<T>>
where
    T: Ord + Clone,
{
    if s.len() == k {
        let whole: Block<T> = s.iter().cloned().collect();
        return BTreeSet::from([Partition::from_iter([whole])]);
    }

    // Each k-combination of s is tried as the block peeled off first. A
    // partition with m blocks is rebuilt once per block, so the accumulating
    // set absorbs the repeats. A remainder smaller than k has no
    // k-combinations at all, which is how a non-dividing size drains to an
    // empty result.
    let mut all = BTreeSet::new();
    for first in s.iter().cloned().combinations(k) {
        let first: Block<T> = first.into_iter().collect();
        let rest: BTreeSet<T> = s.difference(&first).cloned().collect();

        for partition in enumerate(&rest, k) {
            let mut blocks = partition.into_inner();
            blocks.insert(first.clone());
            all.insert(Partition(blocks));
        }
    }
    all
}

/// Number of partitions of a set of `n` elements into blocks of `k` elements.
///
/// Computes `n! / ((n/k)! * (k!)^(n/k))` as a product of binomial
/// coefficients, one per block. Returns `None` if `k` is zero or the count
/// does not fit in `N`. If `k` does not divide `n` the count is zero, and the
/// empty set counts a single, empty partition.
///
/// # Examples
///
/// ```
/// use equal_block_partitions::equal_block_partition_count;
///
/// assert_eq!(equal_block_partition_count::<u64>(6, 3), Some(10));
/// assert_eq!(equal_block_partition_count::<u64>(12, 4), Some(5775));
/// assert_eq!(equal_block_partition_count::<u64>(5, 2), Some(0));
/// ```
pub fn equal_block_partition_count<N: PrimInt>(n: usize, k: usize) -> Option<N> {
    if k == 0 {
        return None;
    }
    if n % k != 0 {
        return Some(N::zero());
    }

    // The least element left after peeling off a block picks the k - 1
    // companions of its own block from the other left - 1 elements.
    let mut count = N::one();
    let mut left = n;
    while left > 0 {
        count = count.checked_mul(&binomial(left - 1, k - 1)?)?;
        left -= k;
    }
    Some(count)
}

/// Binomial coefficient `n` over `k`, or `None` if it does not fit in `N`.
fn binomial<N: PrimInt>(n: usize, k: usize) -> Option<N> {
    if k > n {
        return Some(N::zero());
    }

    let k = k.min(n - k);
    let mut c = N::one();
    for i in 1..=k {
        // c * (n - k + i) is a multiple of i at every step
        c = c.checked_mul(&N::from(n - k + i)?)?.checked_div(&N::from(i)?)?;
    }
    Some(c)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn set(elements: &[u32]) -> BTreeSet<u32> {
        elements.iter().copied().collect()
    }

    fn partition(blocks: &[&[u32]]) -> Partition<u32> {
        blocks
            .iter()
            .map(|block| block.iter().copied().collect())
            .collect()
    }

    #[test]
    fn single_block() {
        let all = equal_block_partitions(&set(&[1, 2, 3]), 3).unwrap();
        let expected = BTreeSet::from([partition(&[&[1, 2, 3]])]);
        assert_eq!(all, expected);
    }

    #[test]
    fn pairs_of_four() {
        let all = equal_block_partitions(&set(&[1, 2, 3, 4]), 2).unwrap();
        let expected = BTreeSet::from([
            partition(&[&[1, 3], &[2, 4]]),
            partition(&[&[1, 2], &[3, 4]]),
            partition(&[&[2, 3], &[1, 4]]),
        ]);
        assert_eq!(all, expected);
    }

    #[test]
    fn triples_of_six() {
        let all = equal_block_partitions(&set(&[1, 2, 3, 4, 5, 6]), 3).unwrap();
        let expected = BTreeSet::from([
            partition(&[&[2, 3, 5], &[1, 4, 6]]),
            partition(&[&[1, 3, 4], &[2, 5, 6]]),
            partition(&[&[3, 4, 6], &[1, 2, 5]]),
            partition(&[&[2, 4, 6], &[1, 3, 5]]),
            partition(&[&[1, 4, 5], &[2, 3, 6]]),
            partition(&[&[1, 3, 6], &[2, 4, 5]]),
            partition(&[&[1, 5, 6], &[2, 3, 4]]),
            partition(&[&[1, 2, 3], &[4, 5, 6]]),
            partition(&[&[1, 2, 6], &[3, 4, 5]]),
            partition(&[&[3, 5, 6], &[1, 2, 4]]),
        ]);
        assert_eq!(all, expected);
    }

    #[test]
    fn quadruples_of_twelve() {
        let s: BTreeSet<u32> = (1..=12).collect();
        let all = equal_block_partitions(&s, 4).unwrap();
        assert_eq!(all.len(), 5775);
    }

    #[test]
    fn non_dividing_size_is_empty() {
        let all = equal_block_partitions(&set(&[1, 2, 3, 4, 5]), 2).unwrap();
        assert!(all.is_empty());
    }

    #[test]
    fn zero_block_size_fails() {
        assert_eq!(
            equal_block_partitions(&set(&[1, 2]), 0),
            Err(BlockSizeError::Zero)
        );
    }

    #[test]
    fn oversized_block_fails() {
        assert_eq!(
            equal_block_partitions(&set(&[1, 2]), 3),
            Err(BlockSizeError::TooLarge { k: 3, n: 2 })
        );
    }

    #[test]
    fn partitions_cover_the_set() {
        for (n, k) in [(4u32, 2usize), (6, 2), (6, 3), (8, 4), (9, 3)] {
            let s: BTreeSet<u32> = (0..n).collect();

            for p in equal_block_partitions(&s, k).unwrap() {
                // n elements in total with the union equal to the whole set,
                // so the blocks are also pairwise disjoint
                assert_eq!(p.elements().count(), s.len());
                assert_eq!(p.elements().copied().collect::<BTreeSet<_>>(), s);
                assert_eq!(p.num_blocks(), s.len() / k);
                for block in p.blocks() {
                    assert_eq!(block.len(), k);
                }
            }
        }
    }

    #[test]
    fn matches_closed_form_count() {
        for n in 1..=8usize {
            for k in 1..=n {
                let s: BTreeSet<usize> = (0..n).collect();
                let all = equal_block_partitions(&s, k).unwrap();
                let expected = equal_block_partition_count::<u64>(n, k).unwrap();
                assert_eq!(all.len() as u64, expected);
            }
        }
    }

    #[test]
    fn count_agrees_with_factorials() {
        fn factorial(n: u128) -> u128 {
            (1..=n).product()
        }

        for n in 0..=16u128 {
            for k in 1..=16u128 {
                if n % k != 0 {
                    continue;
                }
                let m = n / k;
                let expected = factorial(n) / (factorial(m) * factorial(k).pow(m as u32));
                assert_eq!(
                    equal_block_partition_count::<u128>(n as usize, k as usize),
                    Some(expected)
                );
            }
        }
    }

    #[test]
    fn count_zero_block_size() {
        assert_eq!(equal_block_partition_count::<u64>(4, 0), None);
    }

    #[test]
    fn count_that_does_not_fit() {
        assert_eq!(equal_block_partition_count::<u8>(12, 4), None);
        assert_eq!(equal_block_partition_count::<u16>(12, 4), Some(5775));
    }

    #[test]
    fn str_elements() {
        let s: BTreeSet<&str> = ["north", "south", "east", "west"].into_iter().collect();
        let all = equal_block_partitions(&s, 2).unwrap();

        assert_eq!(all.len(), 3);
        for p in &all {
            assert!(p.blocks().all(|block| block.len() == 2));
        }
    }
}
