//! In-memory post store.
//!
//! Holds the authoritative post list plus the session-only view flags.
//! Every operation is synchronous and total: an id that does not exist, or
//! that belongs to a disabled post, turns the operation into a no-op rather
//! than an error. The UI never issues such calls itself.

use super::types::{LoadState, Post, PostDraft, PostEdit};
use super::view::{self, PageView, DEFAULT_PAGE_SIZE};

/// A single state transition, as issued by the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostOp {
    AddNew(PostDraft),
    AddAfter { reference_id: u64, draft: PostDraft },
    Edit { id: u64, edit: PostEdit },
    Delete(u64),
    ToggleDisable(u64),
    SetSearch(String),
    ClearSearch,
    SetPage(usize),
    NextPage,
    PrevPage,
    ToggleShowBody,
}

/// Post list and view state for one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostStore {
    posts: Vec<Post>,
    search_term: String,
    current_page: usize,
    show_body: bool,
    page_size: usize,
    load_state: LoadState,
}

impl Default for PostStore {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl PostStore {
    /// Empty store in the `Loading` state.
    pub fn new(page_size: usize) -> Self {
        Self {
            posts: Vec::new(),
            search_term: String::new(),
            current_page: 1,
            show_body: true,
            page_size: page_size.max(1),
            load_state: LoadState::Loading,
        }
    }

    /// Store already holding `posts`, in the `Ready` state.
    pub fn with_posts(posts: Vec<Post>, page_size: usize) -> Self {
        let mut store = Self::new(page_size);
        store.load(posts);
        store
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn get(&self, id: u64) -> Option<&Post> {
        self.posts.iter().find(|p| p.id == id)
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn show_body(&self) -> bool {
        self.show_body
    }

    pub fn set_show_body(&mut self, show: bool) {
        self.show_body = show;
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    /// Number of pages for the current filter.
    pub fn total_pages(&self) -> usize {
        view::total_pages(self.filtered_count(), self.page_size)
    }

    /// The visible page for the current search term and page.
    pub fn view(&self) -> PageView<'_> {
        view::derive_view(
            &self.posts,
            &self.search_term,
            self.current_page,
            self.page_size,
        )
    }

    /// Id for the next locally created post: `max(ids ∪ {0}) + 1`.
    ///
    /// Scans the live list each time, so ids freed by deletion are only
    /// reused once nothing above them remains.
    pub fn next_id(&self) -> u64 {
        self.posts.iter().map(|p| p.id).max().unwrap_or(0) + 1
    }

    // ------------------------------------------------------------------------
    // Bootstrap transitions
    // ------------------------------------------------------------------------

    /// Replace the list with fetched posts and become `Ready`.
    pub fn load(&mut self, posts: Vec<Post>) {
        tracing::info!(count = posts.len(), "Post store loaded");
        self.posts = posts;
        self.current_page = 1;
        self.load_state = LoadState::Ready;
    }

    /// Record a bootstrap failure. The message is never empty.
    pub fn fail(&mut self, message: impl Into<String>) {
        let mut message = message.into();
        if message.trim().is_empty() {
            message = "Failed to load posts".to_string();
        }
        tracing::warn!(error = %message, "Post store failed to load");
        self.load_state = LoadState::Error(message);
    }

    // ------------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------------

    /// Insert a new post at the front and jump to page 1. Returns its id.
    pub fn add_new(&mut self, draft: PostDraft) -> u64 {
        let id = self.next_id();
        self.posts.insert(0, draft.into_post(id));
        self.current_page = 1;
        tracing::debug!(id, "Added post at front");
        id
    }

    /// Insert a new post right after `reference_id`.
    ///
    /// No-op (returns `None`) when the reference is missing or disabled.
    /// The current page is left alone.
    pub fn add_after(&mut self, reference_id: u64, draft: PostDraft) -> Option<u64> {
        let idx = self.position_enabled(reference_id)?;
        let id = self.next_id();
        self.posts.insert(idx + 1, draft.into_post(id));
        self.clamp_current_page();
        tracing::debug!(id, after = reference_id, "Added post after reference");
        Some(id)
    }

    /// Replace the `Some` fields of `edit` on the matching post.
    ///
    /// Returns `false` when the post is missing or disabled.
    pub fn edit(&mut self, id: u64, edit: PostEdit) -> bool {
        let Some(idx) = self.position_enabled(id) else {
            return false;
        };
        let post = &mut self.posts[idx];
        if let Some(title) = edit.title {
            post.title = title;
        }
        if let Some(body) = edit.body {
            post.body = body;
        }
        // A retitled post can drop out of the current filter
        self.clamp_current_page();
        tracing::debug!(id, "Edited post");
        true
    }

    /// Remove the matching post and re-clamp the current page.
    ///
    /// Returns `false` when the post is missing or disabled.
    pub fn delete(&mut self, id: u64) -> bool {
        let Some(idx) = self.position_enabled(id) else {
            return false;
        };
        self.posts.remove(idx);
        self.clamp_current_page();
        tracing::debug!(id, page = self.current_page, "Deleted post");
        true
    }

    /// Flip the disabled flag. Returns the new flag, or `None` if not found.
    pub fn toggle_disable(&mut self, id: u64) -> Option<bool> {
        let post = self.posts.iter_mut().find(|p| p.id == id)?;
        post.disabled = !post.disabled;
        tracing::debug!(id, disabled = post.disabled, "Toggled post disabled flag");
        Some(post.disabled)
    }

    // ------------------------------------------------------------------------
    // View flags
    // ------------------------------------------------------------------------

    /// Change the search term and go back to page 1.
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        self.current_page = 1;
    }

    pub fn clear_search(&mut self) {
        self.set_search(String::new());
    }

    /// Jump to `page`, clamped into range.
    pub fn set_page(&mut self, page: usize) {
        self.current_page = view::clamp_page(page, self.filtered_count(), self.page_size);
    }

    pub fn next_page(&mut self) {
        self.set_page(self.current_page.saturating_add(1));
    }

    pub fn prev_page(&mut self) {
        self.set_page(self.current_page.saturating_sub(1));
    }

    pub fn toggle_show_body(&mut self) -> bool {
        self.show_body = !self.show_body;
        self.show_body
    }

    // ------------------------------------------------------------------------
    // Transition entry points
    // ------------------------------------------------------------------------

    /// Apply one operation. Returns `true` if anything changed.
    pub fn apply(&mut self, op: PostOp) -> bool {
        match op {
            PostOp::AddNew(draft) => {
                self.add_new(draft);
                true
            }
            PostOp::AddAfter {
                reference_id,
                draft,
            } => self.add_after(reference_id, draft).is_some(),
            PostOp::Edit { id, edit } => self.edit(id, edit),
            PostOp::Delete(id) => self.delete(id),
            PostOp::ToggleDisable(id) => self.toggle_disable(id).is_some(),
            PostOp::SetSearch(term) => {
                let changed = term != self.search_term || self.current_page != 1;
                self.set_search(term);
                changed
            }
            PostOp::ClearSearch => {
                let changed = !self.search_term.is_empty() || self.current_page != 1;
                self.clear_search();
                changed
            }
            PostOp::SetPage(page) => self.change_page(|s| s.set_page(page)),
            PostOp::NextPage => self.change_page(Self::next_page),
            PostOp::PrevPage => self.change_page(Self::prev_page),
            PostOp::ToggleShowBody => {
                self.toggle_show_body();
                true
            }
        }
    }

    /// By-value form of [`apply`](Self::apply): current state in, next state out.
    pub fn transition(mut self, op: PostOp) -> Self {
        self.apply(op);
        self
    }

    // ------------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------------

    fn filtered_count(&self) -> usize {
        view::filtered_count(&self.posts, &self.search_term)
    }

    fn clamp_current_page(&mut self) {
        self.current_page =
            view::clamp_page(self.current_page, self.filtered_count(), self.page_size);
    }

    fn change_page(&mut self, f: impl FnOnce(&mut Self)) -> bool {
        let before = self.current_page;
        f(self);
        before != self.current_page
    }

    /// Index of the post with `id`, provided it exists and is enabled.
    fn position_enabled(&self, id: u64) -> Option<usize> {
        match self.posts.iter().position(|p| p.id == id) {
            Some(idx) if self.posts[idx].disabled => {
                tracing::debug!(id, "Ignoring operation on disabled post");
                None
            }
            Some(idx) => Some(idx),
            None => {
                tracing::debug!(id, "Ignoring operation on unknown post");
                None
            }
        }
    }
}
