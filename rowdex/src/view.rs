//! View-index to model-row indirection.

use crate::row::Row;

/// Wraps an ordered index (or the identity) over the caller's row array and
/// resolves view-row indices to model rows.
///
/// Out-of-range view indices resolve to a shared empty placeholder row; the
/// rendering layer may probe one row past the end during layout measurement
/// and that must not fail.
#[derive(Debug, Clone, PartialEq)]
pub struct RowView<'a> {
    rows: &'a [Row],
    order: Option<Vec<usize>>,
}

impl<'a> RowView<'a> {
    /// `order` of `None` means identity: view index i is model row i.
    pub fn new(rows: &'a [Row], order: Option<Vec<usize>>) -> Self {
        Self { rows, order }
    }

    /// Number of view rows.
    pub fn len(&self) -> usize {
        self.order.as_ref().map_or(self.rows.len(), Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Resolve a view index to its row. Never fails; out-of-range indices
    /// yield the empty placeholder row.
    pub fn row(&self, view_index: usize) -> &'a Row {
        let model = match &self.order {
            None => Some(view_index),
            Some(order) => order.get(view_index).copied(),
        };
        match model.and_then(|m| self.rows.get(m)) {
            Some(row) => row,
            None => Row::placeholder(),
        }
    }

    /// Model index behind a view index, if in range.
    pub fn model_index(&self, view_index: usize) -> Option<usize> {
        match &self.order {
            None => (view_index < self.rows.len()).then_some(view_index),
            Some(order) => order.get(view_index).copied(),
        }
    }

    /// The underlying ordered index; `None` means identity order.
    pub fn order(&self) -> Option<&[usize]> {
        self.order.as_deref()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Row> + '_ {
        (0..self.len()).map(|i| self.row(i))
    }
}
