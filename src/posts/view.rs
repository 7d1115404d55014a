//! Filtered, paginated view of the post list.
//!
//! Everything here is a pure function of its inputs. The store calls
//! [`derive_view`] on every render and [`clamp_page`] after mutations that
//! change the filtered count.

use super::types::Post;

/// Default number of cards per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// One page of the filtered post list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView<'a> {
    /// Posts on the current page, in store order.
    pub items: Vec<&'a Post>,
    /// Number of posts matching the search term.
    pub total: usize,
    /// Always at least 1, even when `total == 0`.
    pub total_pages: usize,
    /// 1-based page, clamped into `[1, total_pages]`.
    pub current_page: usize,
    /// 0-based slice bounds into the filtered list.
    pub start: usize,
    pub end: usize,
}

impl PageView<'_> {
    /// "Showing 11–20 of 42" label for the pagination bar.
    pub fn range_label(&self) -> String {
        if self.total == 0 {
            return "Showing 0–0 of 0".to_string();
        }
        format!("Showing {}–{} of {}", self.start + 1, self.end, self.total)
    }

    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }
}

/// Normalize a raw search input into the lowercase needle used for matching.
///
/// Returns `None` for empty or whitespace-only input (no filtering).
pub fn normalize_term(search_term: &str) -> Option<String> {
    let trimmed = search_term.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Case-insensitive substring match on the post title.
pub fn title_matches(post: &Post, needle: &str) -> bool {
    post.title.to_lowercase().contains(needle)
}

/// Posts whose title contains the search term. Empty term keeps everything.
pub fn filter_posts<'a>(posts: &'a [Post], search_term: &str) -> Vec<&'a Post> {
    match normalize_term(search_term) {
        Some(needle) => posts.iter().filter(|p| title_matches(p, &needle)).collect(),
        None => posts.iter().collect(),
    }
}

/// Count of posts matching the search term.
pub fn filtered_count(posts: &[Post], search_term: &str) -> usize {
    match normalize_term(search_term) {
        Some(needle) => posts.iter().filter(|p| title_matches(p, &needle)).count(),
        None => posts.len(),
    }
}

/// `max(1, ceil(total / page_size))`. A zero page size is treated as 1.
pub fn total_pages(total: usize, page_size: usize) -> usize {
    let page_size = page_size.max(1);
    total.div_ceil(page_size).max(1)
}

/// Clamp a 1-based page into `[1, total_pages(total, page_size)]`.
pub fn clamp_page(page: usize, total: usize, page_size: usize) -> usize {
    page.clamp(1, total_pages(total, page_size))
}

/// Derive the visible page.
///
/// 1. Filter by trimmed, case-insensitive title substring.
/// 2. Compute `total` and `total_pages`.
/// 3. Clamp `current_page`.
/// 4. Slice `[(page-1)*size, min(total, page*size))`.
pub fn derive_view<'a>(
    posts: &'a [Post],
    search_term: &str,
    current_page: usize,
    page_size: usize,
) -> PageView<'a> {
    let page_size = page_size.max(1);
    let filtered = filter_posts(posts, search_term);
    let total = filtered.len();
    let total_pages = total_pages(total, page_size);
    let current_page = current_page.clamp(1, total_pages);
    let start = (current_page - 1).saturating_mul(page_size).min(total);
    let end = current_page.saturating_mul(page_size).min(total);

    PageView {
        items: filtered[start..end].to_vec(),
        total,
        total_pages,
        current_page,
        start,
        end,
    }
}
