//! Stable top-down merge sort.
//!
//! Collinear detection depends on stability: points with equal slope to
//! a pivot must keep the natural order they had before the slope sort,
//! so the sort here never reorders elements that compare equal.
//!
//! The comparison is supplied by the caller, which lets the same routine
//! sort by natural point order ([`merge_sort`]) and by slope to a pivot
//! ([`merge_sort_by`] with a [`SlopeOrder`](crate::slope::SlopeOrder)).

use std::cmp::Ordering;

/// Reusable merge sort with its own scratch buffer.
///
/// Sorting many slices of similar length through one sorter avoids
/// reallocating the auxiliary buffer for every call.
#[derive(Debug, Clone, Default)]
pub struct MergeSorter<T> {
    aux: Vec<T>,
}

impl<T: Clone> MergeSorter<T> {
    /// Create a sorter with an empty scratch buffer.
    #[must_use]
    pub const fn new() -> Self {
        Self { aux: Vec::new() }
    }

    /// Stably sort `items` with the given comparison.
    pub fn sort_by<F>(&mut self, items: &mut [T], mut compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        if items.len() < 2 {
            return;
        }
        self.aux.clear();
        self.aux.extend_from_slice(items);
        sort_range(items, &mut self.aux, &mut compare);
    }
}

/// Stably sort `items` by their natural [`Ord`] order.
pub fn merge_sort<T: Ord + Clone>(items: &mut [T]) {
    merge_sort_by(items, T::cmp);
}

/// Stably sort `items` with an externally supplied comparison.
pub fn merge_sort_by<T, F>(items: &mut [T], compare: F)
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    MergeSorter::new().sort_by(items, compare);
}

/// Sort `items` recursively, using the equally long `aux` as scratch.
fn sort_range<T, F>(items: &mut [T], aux: &mut [T], compare: &mut F)
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    let len = items.len();
    if len < 2 {
        return;
    }
    let mid = len / 2;
    {
        let (left, right) = items.split_at_mut(mid);
        let (aux_left, aux_right) = aux.split_at_mut(mid);
        sort_range(left, aux_left, compare);
        sort_range(right, aux_right, compare);
    }

    // Halves already in order: nothing to merge.
    if compare(&items[mid - 1], &items[mid]) != Ordering::Greater {
        return;
    }
    merge(items, aux, mid, compare);
}

/// Merge the sorted halves `items[..mid]` and `items[mid..]`.
///
/// On ties the left element wins, which is what makes the sort stable.
fn merge<T, F>(items: &mut [T], aux: &mut [T], mid: usize, compare: &mut F)
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    aux.clone_from_slice(items);
    let (left, right) = aux.split_at(mid);
    let (mut i, mut j) = (0, 0);

    for slot in items.iter_mut() {
        let take_left = j >= right.len()
            || (i < left.len() && compare(&left[i], &right[j]) != Ordering::Greater);
        if take_left {
            slot.clone_from(&left[i]);
            i += 1;
        } else {
            slot.clone_from(&right[j]);
            j += 1;
        }
    }
}
