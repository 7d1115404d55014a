//! Post domain: entities, the in-memory store, the derived page view and
//! the one-time bootstrap load.
//!
//! # Module Structure
//!
//! - `types` - `Post`, drafts, edits, the wire record and `LoadState`
//! - `store` - `PostStore` and its `PostOp` transitions
//! - `view` - pure filtering and pagination
//! - `bootstrap` - cancellable initial fetch

pub mod bootstrap;
mod store;
mod types;
pub mod view;

pub use bootstrap::{BootstrapResult, CancelToken};
pub use store::{PostOp, PostStore};
pub use types::{posts_from_raw, LoadState, Post, PostDraft, PostEdit, RawPost, DEFAULT_TITLE};
pub use view::{derive_view, PageView, DEFAULT_PAGE_SIZE};
