use serde::Serialize;

/// Initial window size and "show more" increment.
pub const DEFAULT_PAGE_SIZE: usize = 8;

/// Visible prefix of a filtered result list.
///
/// Invariant: `visible <= total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaginationWindow {
    visible: usize,
    total: usize,
    page_size: usize,
}

impl PaginationWindow {
    /// A fresh window over `total` results showing the first page.
    ///
    /// A `page_size` of zero is treated as one.
    #[must_use]
    pub fn new(total: usize, page_size: usize) -> Self {
        let page_size = page_size.max(1);
        Self {
            visible: page_size.min(total),
            total,
            page_size,
        }
    }

    #[must_use]
    pub fn visible(&self) -> usize {
        self.visible
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    #[must_use]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    #[must_use]
    pub fn has_more(&self) -> bool {
        self.visible < self.total
    }

    /// `true` once every result is visible and "show more" is replaced by
    /// the "all shown" affordance.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        !self.has_more()
    }

    /// Grow the window by one page, capped at `total`. Returns `false` when
    /// nothing changed.
    pub fn show_more(&mut self) -> bool {
        if self.is_exhausted() {
            return false;
        }
        self.visible = self.visible.saturating_add(self.page_size).min(self.total);
        true
    }

    /// Back to the first page over a new result count.
    pub fn reset(&mut self, total: usize) {
        *self = Self::new(total, self.page_size);
    }

    /// The visible prefix of `items`.
    #[must_use]
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[..self.visible.min(items.len())]
    }
}
