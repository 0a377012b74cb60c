//! Pagination over externally fetched pages. The controller never slices
//! data itself; it writes the target page into a caller-owned query map and
//! waits for the caller to deliver the fetched rows.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Query parameter the controller writes on navigation.
pub const PAGE_PARAM: &str = "page";

/// Externally owned pagination metadata. Absent metadata (or a zero total)
/// means no pagination controls render at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    pub cur_page: u64,
    pub total_pages: u64,
    pub total_count: u64,
}

impl PageInfo {
    pub fn new(cur_page: u64, total_pages: u64, total_count: u64) -> Self {
        Self { cur_page, total_pages, total_count }
    }

    pub fn prev_enabled(&self) -> bool {
        self.total_count > 0 && self.cur_page > 1
    }

    pub fn next_enabled(&self) -> bool {
        self.total_count > 0 && self.cur_page != self.total_pages
    }

    /// Rows per page, inferred from the totals.
    pub fn per_page(&self) -> u64 {
        if self.total_pages == 0 {
            0
        } else {
            self.total_count.div_ceil(self.total_pages)
        }
    }

    /// "Showing X-Y of N" for the current page.
    pub fn range_label(&self) -> String {
        let per_page = self.per_page();
        let start = (self.cur_page.saturating_sub(1)) * per_page + 1;
        let end = (start + per_page - 1).min(self.total_count);
        format!("Showing {start}-{end} of {}", self.total_count)
    }
}

/// Direction of a page navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageDir {
    Prev,
    Next,
}

/// Pagination controller: gates navigation on the metadata, records the
/// target page in the query map, and holds the transient loading flag that
/// suppresses the table body until the caller's fetch lands.
#[derive(Default)]
pub struct Paginator {
    info: Option<PageInfo>,
    loading: bool,
}

impl Paginator {
    pub fn new(info: Option<PageInfo>) -> Self {
        Self { info, loading: false }
    }

    pub fn info(&self) -> Option<&PageInfo> {
        self.info.as_ref()
    }

    /// Fresh metadata from the caller, typically alongside a page of rows.
    pub fn set_info(&mut self, info: Option<PageInfo>) {
        self.info = info;
    }

    /// Whether pagination controls should render at all.
    pub fn visible(&self) -> bool {
        self.info.map(|i| i.total_count > 0).unwrap_or(false)
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    /// Navigate one page in `dir`, if the boundary allows it. Writes the
    /// target page into `query` under [`PAGE_PARAM`], raises the loading
    /// flag, and returns the target page number.
    ///
    /// Fire-and-forget: there is no request token or cancellation, so two
    /// rapid flips can land out of order. Sequencing is the caller's
    /// responsibility.
    pub fn navigate(
        &mut self,
        dir: PageDir,
        query: &mut BTreeMap<String, String>,
    ) -> Option<u64> {
        let info = self.info?;
        let target = match dir {
            PageDir::Prev if info.prev_enabled() => info.cur_page - 1,
            PageDir::Next if info.next_enabled() => info.cur_page + 1,
            _ => return None,
        };
        query.insert(PAGE_PARAM.to_string(), target.to_string());
        self.loading = true;
        Some(target)
    }

    /// Re-request the current page: writes it into `query` under
    /// [`PAGE_PARAM`], raises the loading flag, and returns the page number.
    /// A no-op without metadata; there is no page to re-request.
    pub fn refresh(&mut self, query: &mut BTreeMap<String, String>) -> Option<u64> {
        let info = self.info?;
        query.insert(PAGE_PARAM.to_string(), info.cur_page.to_string());
        self.loading = true;
        Some(info.cur_page)
    }

    /// The caller delivered a ready record set; drop the loading flag.
    pub fn data_ready(&mut self) {
        self.loading = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundary_gating() {
        let first = PageInfo::new(1, 5, 42);
        assert!(!first.prev_enabled());
        assert!(first.next_enabled());

        let middle = PageInfo::new(3, 5, 42);
        assert!(middle.prev_enabled());
        assert!(middle.next_enabled());

        let last = PageInfo::new(5, 5, 42);
        assert!(last.prev_enabled());
        assert!(!last.next_enabled());

        let empty = PageInfo::new(1, 0, 0);
        assert!(!empty.prev_enabled());
        assert!(!empty.next_enabled());
    }

    #[test]
    fn test_range_label() {
        assert_eq!(PageInfo::new(1, 5, 42).range_label(), "Showing 1-9 of 42");
        assert_eq!(PageInfo::new(5, 5, 42).range_label(), "Showing 37-42 of 42");
        assert_eq!(PageInfo::new(2, 4, 40).range_label(), "Showing 11-20 of 40");
    }

    #[test]
    fn test_navigate_writes_page_param_and_sets_loading() {
        let mut paginator = Paginator::new(Some(PageInfo::new(2, 5, 42)));
        let mut query = BTreeMap::new();

        let target = paginator.navigate(PageDir::Next, &mut query);
        assert_eq!(target, Some(3));
        assert_eq!(query.get(PAGE_PARAM).map(String::as_str), Some("3"));
        assert!(paginator.loading());

        paginator.data_ready();
        assert!(!paginator.loading());
    }

    #[test]
    fn test_navigate_blocked_at_boundary() {
        let mut paginator = Paginator::new(Some(PageInfo::new(1, 3, 30)));
        let mut query = BTreeMap::new();

        assert_eq!(paginator.navigate(PageDir::Prev, &mut query), None);
        assert!(query.is_empty());
        assert!(!paginator.loading());
    }

    #[test]
    fn test_refresh_re_requests_current_page() {
        let mut paginator = Paginator::new(Some(PageInfo::new(3, 5, 42)));
        let mut query = BTreeMap::new();

        assert_eq!(paginator.refresh(&mut query), Some(3));
        assert_eq!(query.get(PAGE_PARAM).map(String::as_str), Some("3"));
        assert!(paginator.loading());

        let mut bare = Paginator::new(None);
        assert_eq!(bare.refresh(&mut query), None);
    }

    #[test]
    fn test_hidden_without_metadata_or_rows() {
        assert!(!Paginator::new(None).visible());
        assert!(!Paginator::new(Some(PageInfo::new(1, 0, 0))).visible());
        assert!(Paginator::new(Some(PageInfo::new(1, 1, 4))).visible());
    }
}
