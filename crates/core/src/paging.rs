//! Pagination window derived from collection fetch responses.
//!
//! The window is driven only by fetch responses and explicit navigation;
//! it is never persisted. `page_size` is observed from the last non-empty
//! fetch rather than assumed constant, since the resource controls its
//! own page size.

use crate::types::PageNumber;

/// Derived pagination state for the current view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageWindow {
    /// Current page, 1-based. Never below 1.
    pub page_number: PageNumber,
    /// Records per page as last observed; `None` before the first
    /// non-empty fetch.
    pub page_size: Option<u32>,
    /// Server-reported total record count across all pages.
    pub total_count: u64,
    /// Server-reported presence of a following page.
    pub has_next: bool,
}

impl Default for PageWindow {
    fn default() -> Self {
        Self {
            page_number: 1,
            page_size: None,
            total_count: 0,
            has_next: false,
        }
    }
}

/// What the window decided after applying a fetch response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The response settled the current page.
    Settled,
    /// The page came back empty while the collection still has records
    /// (e.g. the last item on this page was just deleted). The window
    /// clamped down; the caller must re-fetch the new page.
    ClampedTo(PageNumber),
}

impl PageWindow {
    /// Apply a successful fetch response for the current page.
    pub fn apply_fetch(
        &mut self,
        returned: usize,
        total_count: u64,
        has_next: bool,
    ) -> FetchOutcome {
        self.total_count = total_count;
        self.has_next = has_next;
        if returned > 0 {
            self.page_size = Some(returned as u32);
        } else if total_count > 0 && self.page_number > 1 {
            // Never leave the view on an empty page while records exist.
            self.page_number -= 1;
            return FetchOutcome::ClampedTo(self.page_number);
        }
        FetchOutcome::Settled
    }

    /// Derived page count; 1 until the page size is known.
    pub fn total_pages(&self) -> u32 {
        match self.page_size {
            Some(size) if size > 0 => {
                (self.total_count.div_ceil(u64::from(size)) as u32).max(1)
            }
            _ => 1,
        }
    }

    /// Clamp an arbitrary navigation target to a valid page number.
    /// Targets below 1 clamp to 1 and targets beyond the page-number
    /// range saturate; over-shooting upwards is corrected by the
    /// empty-page rule in [`apply_fetch`](Self::apply_fetch).
    pub fn clamp_target(&self, target: i64) -> PageNumber {
        target.clamp(1, i64::from(PageNumber::MAX)) as PageNumber
    }

    /// Whether `Next` navigation is currently valid.
    pub fn can_next(&self) -> bool {
        self.has_next
    }

    /// Whether `Previous` navigation is currently valid.
    pub fn can_prev(&self) -> bool {
        self.page_number > 1
    }
}
