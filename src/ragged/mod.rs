//! An owned ragged sequence: the CSR layout shared by every table in the engine.
//!
//! A `Ragged<T>` stores `rows` variable-length rows as a row-offset array of
//! length `rows + 1` plus one flat value buffer. The constructor and every
//! mutator keep the two CSR invariants:
//!
//! - `offsets` is non-decreasing and starts at `0`
//! - `offsets[rows] == values.len()`
//!
//! Growth goes through `try_reserve`, so running out of memory surfaces as
//! [`EnumerationError::Allocation`] rather than an abort.

use core::ops::Range;

use crate::error::{checked_add, EnumerationError, Result};

/// Row offsets plus a flat value buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ragged<T> {
    offsets: Vec<usize>,
    values: Vec<T>,
}

impl<T> Default for Ragged<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Ragged<T> {
    /// An empty relation with zero rows.
    pub fn new() -> Self {
        Self {
            offsets: vec![0],
            values: Vec::new(),
        }
    }

    /// An empty relation with room for `rows` rows and `values` values.
    ///
    /// # Errors
    /// Returns `Allocation` if either reservation fails.
    pub fn try_with_capacity(rows: usize, values: usize) -> Result<Self> {
        let mut out = Self::new();
        out.offsets.try_reserve(rows)?;
        out.values.try_reserve(values)?;
        Ok(out)
    }

    /// Builds a relation from raw CSR parts, checking both invariants.
    ///
    /// # Errors
    /// Returns `DimensionMismatch` if `offsets` is empty, does not start at
    /// zero, decreases anywhere, or does not end at `values.len()`.
    pub fn from_parts(offsets: Vec<usize>, values: Vec<T>) -> Result<Self> {
        check_offsets(&offsets, values.len())?;
        Ok(Self { offsets, values })
    }

    /// Builds a relation whose rows all hold exactly `width` values.
    ///
    /// # Errors
    /// Returns `DimensionMismatch` if `values.len()` is not a multiple of
    /// `width`, and `Allocation` if the offsets cannot be allocated.
    pub fn from_uniform(width: usize, values: Vec<T>) -> Result<Self> {
        if width == 0 {
            return if values.is_empty() {
                Ok(Self::new())
            } else {
                Err(EnumerationError::DimensionMismatch(
                    "zero-width rows cannot hold values".into(),
                ))
            };
        }
        if values.len() % width != 0 {
            return Err(EnumerationError::DimensionMismatch(format!(
                "{} values do not split into rows of width {width}",
                values.len()
            )));
        }
        let rows = values.len() / width;
        let mut offsets = Vec::new();
        offsets.try_reserve_exact(checked_add(rows, 1, "row offsets")?)?;
        offsets.extend((0..=rows).map(|r| r * width));
        Ok(Self { offsets, values })
    }

    /// Number of rows.
    #[inline]
    pub fn row_count(&self) -> usize {
        self.offsets.len() - 1
    }

    /// Total number of stored values (the relation's nnz).
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if no values are stored (rows may still exist).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The row-offset array, length `row_count() + 1`.
    #[inline]
    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    /// The flat value buffer.
    #[inline]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Value-index range of row `row`.
    ///
    /// # Panics
    /// Panics if `row >= row_count()`.
    #[inline]
    pub fn row_range(&self, row: usize) -> Range<usize> {
        assert!(row < self.row_count(), "row {row} out of bounds");
        self.offsets[row]..self.offsets[row + 1]
    }

    /// Values of row `row`.
    ///
    /// # Panics
    /// Panics if `row >= row_count()`.
    #[inline]
    pub fn row(&self, row: usize) -> &[T] {
        &self.values[self.row_range(row)]
    }

    /// Values of row `row`, or `None` when out of bounds.
    #[inline]
    pub fn get_row(&self, row: usize) -> Option<&[T]> {
        (row < self.row_count()).then(|| self.row(row))
    }

    /// Number of values in row `row`.
    ///
    /// # Panics
    /// Panics if `row >= row_count()`.
    #[inline]
    pub fn row_len(&self, row: usize) -> usize {
        self.row_range(row).len()
    }

    /// Iterates over the rows in order.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[T]> + '_ {
        self.offsets
            .windows(2)
            .map(move |w| &self.values[w[0]..w[1]])
    }

    /// Appends one row produced by `fill`.
    ///
    /// `fill` may only append to the buffer it is given; the row's extent is
    /// whatever it appended. If `fill` fails, the partial row is rolled back.
    ///
    /// # Errors
    /// Propagates `fill`'s error, or `Allocation` if the offsets cannot grow.
    pub fn try_push_row_with<F>(&mut self, fill: F) -> Result<()>
    where
        F: FnOnce(&mut Vec<T>) -> Result<()>,
    {
        self.offsets.try_reserve(1)?;
        let start = self.values.len();
        if let Err(e) = fill(&mut self.values) {
            self.values.truncate(start);
            return Err(e);
        }
        debug_assert!(self.values.len() >= start, "row fill shrank the value buffer");
        self.offsets.push(self.values.len());
        Ok(())
    }

    /// Decomposes into `(offsets, values)`.
    pub fn into_parts(self) -> (Vec<usize>, Vec<T>) {
        (self.offsets, self.values)
    }
}

impl<T: Copy> Ragged<T> {
    /// Appends a copy of `row`.
    ///
    /// # Errors
    /// Returns `Allocation` if either buffer cannot grow.
    pub fn try_push_row(&mut self, row: &[T]) -> Result<()> {
        self.try_push_row_with(|values| {
            values.try_reserve(row.len())?;
            values.extend_from_slice(row);
            Ok(())
        })
    }
}

fn check_offsets(offsets: &[usize], nnz: usize) -> Result<()> {
    let Some(&first) = offsets.first() else {
        return Err(EnumerationError::DimensionMismatch(
            "offsets must have length rows + 1".into(),
        ));
    };
    if first != 0 {
        return Err(EnumerationError::DimensionMismatch(format!(
            "offsets must start at 0, found {first}"
        )));
    }
    if let Some(pos) = offsets.windows(2).position(|w| w[0] > w[1]) {
        return Err(EnumerationError::DimensionMismatch(format!(
            "offsets decrease at row {pos}"
        )));
    }
    let last = offsets[offsets.len() - 1];
    if last != nnz {
        return Err(EnumerationError::DimensionMismatch(format!(
            "last offset {last} does not match {nnz} values"
        )));
    }
    Ok(())
}
