/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Tag-value store for a single message.
//!
//! This module provides:
//! - [`FieldStore`]: ordered multi-map of `(tag, value)` pairs, filled once by `put`
//! - [`FieldSlice`]: a borrowed, ordered window over a store used for every read
//!
//! Writing needs `&mut FieldStore` and reading goes through a [`FieldSlice`]
//! borrowed from it, so the append phase and the read phase cannot overlap.

use crate::field::FieldRef;
use smallvec::SmallVec;
use std::ops::Range;

/// Inline capacity before the store spills to the heap.
pub const INLINE_FIELDS: usize = 32;

/// Ordered multi-map of one message's fields.
///
/// Duplicated tags are kept in arrival order; nothing is ever overwritten.
#[derive(Debug, Clone, Default)]
pub struct FieldStore<'a> {
    fields: SmallVec<[FieldRef<'a>; INLINE_FIELDS]>,
}

impl<'a> FieldStore<'a> {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            fields: SmallVec::new(),
        }
    }

    /// Appends a field. Existing occurrences of `tag` are left untouched.
    ///
    /// # Arguments
    /// * `tag` - The field tag number
    /// * `value` - The raw value bytes
    #[inline]
    pub fn put(&mut self, tag: u32, value: &'a [u8]) {
        self.fields.push(FieldRef::new(tag, value));
    }

    /// Appends an already built field reference.
    #[inline]
    pub fn push(&mut self, field: FieldRef<'a>) {
        self.fields.push(field);
    }

    /// Returns a read view over every field.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> FieldSlice<'_> {
        FieldSlice::new(&self.fields)
    }

    /// Returns the first occurrence of `tag`.
    #[must_use]
    pub fn get_first(&self, tag: u32) -> Option<FieldRef<'a>> {
        self.fields.iter().find(|f| f.tag == tag).copied()
    }

    /// Returns every occurrence of `tag` in order.
    pub fn get_all(&self, tag: u32) -> impl Iterator<Item = FieldRef<'a>> + '_ {
        self.fields.iter().filter(move |f| f.tag == tag).copied()
    }

    /// Returns an iterator over the fields in order.
    pub fn iter(&self) -> impl Iterator<Item = FieldRef<'a>> + '_ {
        self.fields.iter().copied()
    }

    /// See [`FieldSlice::slice_between`].
    #[must_use]
    pub fn slice_between(&self, start_tag: u32, end_tag: u32) -> Option<FieldSlice<'_>> {
        self.as_slice().slice_between(start_tag, end_tag)
    }

    /// Returns the number of stored fields.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if no field was stored.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<'a> FromIterator<FieldRef<'a>> for FieldStore<'a> {
    fn from_iter<I: IntoIterator<Item = FieldRef<'a>>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

impl<'a> Extend<FieldRef<'a>> for FieldStore<'a> {
    fn extend<I: IntoIterator<Item = FieldRef<'a>>>(&mut self, iter: I) {
        self.fields.extend(iter);
    }
}

/// Borrowed ordered window over stored fields.
///
/// Message segments, group instances and the accessor scope are all
/// `FieldSlice`s, so bounded views never copy field data.
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldSlice<'s> {
    fields: &'s [FieldRef<'s>],
}

impl<'s> FieldSlice<'s> {
    /// Wraps a slice of field references.
    #[inline]
    #[must_use]
    pub const fn new(fields: &'s [FieldRef<'s>]) -> Self {
        Self { fields }
    }

    /// Returns the first occurrence of `tag`.
    #[must_use]
    pub fn get_first(self, tag: u32) -> Option<FieldRef<'s>> {
        self.fields.iter().find(|f| f.tag == tag).copied()
    }

    /// Returns every occurrence of `tag` in order. Empty if there is none.
    pub fn get_all(self, tag: u32) -> impl Iterator<Item = FieldRef<'s>> + 's {
        self.fields.iter().filter(move |f| f.tag == tag).copied()
    }

    /// Counts the occurrences of `tag`.
    #[must_use]
    pub fn count(self, tag: u32) -> usize {
        self.fields.iter().filter(|f| f.tag == tag).count()
    }

    /// Returns the index of the first occurrence of `tag`.
    #[must_use]
    pub fn position(self, tag: u32) -> Option<usize> {
        self.position_from(tag, 0)
    }

    /// Returns the index of the first occurrence of `tag` at or after `from`.
    #[must_use]
    pub fn position_from(self, tag: u32, from: usize) -> Option<usize> {
        self.fields
            .get(from..)?
            .iter()
            .position(|f| f.tag == tag)
            .map(|i| i + from)
    }

    /// Returns the run starting at the first `start_tag` (inclusive) and
    /// ending before the next `end_tag` (exclusive).
    ///
    /// If `end_tag` does not follow `start_tag` the run extends to the end of
    /// this slice.
    ///
    /// # Returns
    /// `None` if `start_tag` does not occur.
    #[must_use]
    pub fn slice_between(self, start_tag: u32, end_tag: u32) -> Option<FieldSlice<'s>> {
        let start = self.position(start_tag)?;
        let end = self
            .position_from(end_tag, start + 1)
            .unwrap_or(self.fields.len());
        self.sub(start..end)
    }

    /// Returns the sub-window at `range`, or `None` if it is out of bounds.
    #[must_use]
    pub fn sub(self, range: Range<usize>) -> Option<FieldSlice<'s>> {
        self.fields.get(range).map(Self::new)
    }

    /// Returns the field at `index`.
    #[inline]
    #[must_use]
    pub fn get(self, index: usize) -> Option<FieldRef<'s>> {
        self.fields.get(index).copied()
    }

    /// Returns an iterator over the fields in order.
    #[inline]
    pub fn iter(self) -> impl Iterator<Item = FieldRef<'s>> + 's {
        self.fields.iter().copied()
    }

    /// Returns the underlying slice.
    #[inline]
    #[must_use]
    pub const fn as_slice(self) -> &'s [FieldRef<'s>] {
        self.fields
    }

    /// Returns the number of fields in the window.
    #[inline]
    #[must_use]
    pub const fn len(self) -> usize {
        self.fields.len()
    }

    /// Returns true if the window is empty.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.fields.is_empty()
    }
}
