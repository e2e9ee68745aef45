//! Fixed-length, heap-allocated array of numbers.

use anyhow::{Context, Result};
use std::{
    ops::{Index, IndexMut},
    slice,
};

/// Contiguous heap allocation of `len` elements.
///
/// The length is fixed at construction. The array is move-only: moving it
/// transfers the allocation, and [`std::mem::take`] leaves an empty array
/// behind.
#[derive(Debug, PartialEq)]
pub struct NumericArray<T> {
    data: Box<[T]>,
}

impl<T: Default> NumericArray<T> {
    /// Allocate an array of `len` default-initialized elements.
    ///
    /// Every element is written on construction, so with memory overcommit a
    /// reservation that succeeds can still exhaust memory while filling.
    ///
    /// # Errors
    /// Returns an error if the reservation cannot be satisfied.
    pub fn try_new(len: usize) -> Result<Self> {
        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .with_context(|| format!("failed to allocate {len} elements"))?;
        data.resize_with(len, T::default);
        Ok(Self {
            data: data.into_boxed_slice(),
        })
    }
}

impl<T> NumericArray<T> {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.data.iter()
    }

    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.data.iter_mut()
    }
}

impl<T> Default for NumericArray<T> {
    fn default() -> Self {
        Self {
            data: Box::default(),
        }
    }
}

impl<T> From<Vec<T>> for NumericArray<T> {
    fn from(vec: Vec<T>) -> Self {
        Self {
            data: vec.into_boxed_slice(),
        }
    }
}

impl<T> Index<usize> for NumericArray<T> {
    type Output = T;

    fn index(&self, idx: usize) -> &T {
        &self.data[idx]
    }
}

impl<T> IndexMut<usize> for NumericArray<T> {
    fn index_mut(&mut self, idx: usize) -> &mut T {
        &mut self.data[idx]
    }
}

impl<'a, T> IntoIterator for &'a NumericArray<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut NumericArray<T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn try_new_allocates_default_elements() {
        let array = NumericArray::<f64>::try_new(3).unwrap();
        assert_eq!(array.len(), 3);
        assert_eq!(array.as_slice(), &[0.0, 0.0, 0.0]);
    }

    #[test]
    fn try_new_fails_on_impossible_sizes() {
        let error = NumericArray::<f64>::try_new(usize::MAX).unwrap_err();
        assert!(error.to_string().contains("failed to allocate"));
    }

    #[test]
    fn indexing_reads_and_writes_elements() {
        let mut array = NumericArray::<i32>::try_new(2).unwrap();
        array[0] = 4;
        array[1] = -1;
        assert_eq!(array[0], 4);
        assert_eq!(array[1], -1);
    }

    #[test]
    #[should_panic]
    fn indexing_past_the_end_panics() {
        let array = NumericArray::from(vec![1.0]);
        let _ele = array[1];
    }

    #[test]
    fn iterator_distance_is_the_element_count() {
        let array = NumericArray::from(vec![1, 2, 3, 4]);
        let mut iter = array.iter();
        assert_eq!(iter.len(), 4);
        iter.nth(1);
        assert_eq!(iter.len(), 2);
        assert_eq!(iter.as_slice(), &[3, 4]);
    }

    #[test]
    fn iter_mut_updates_in_place() {
        let mut array = NumericArray::from(vec![1.0, 2.0]);
        for ele in &mut array {
            *ele *= 2.0;
        }
        assert_eq!(array.as_slice(), &[2.0, 4.0]);
    }

    #[test]
    fn take_leaves_source_empty() {
        let mut array = NumericArray::from(vec![1.0, 2.0]);
        let moved = std::mem::take(&mut array);
        assert!(array.is_empty());
        assert_eq!(moved.len(), 2);
    }
}
