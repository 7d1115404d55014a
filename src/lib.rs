//! postboard: a terminal board for posts fetched from a REST endpoint.
//!
//! The post list lives in an in-memory [`posts::PostStore`]; the page shown
//! on screen is derived from it on every render by [`posts::derive_view`].
//! A single cancellable bootstrap fetch fills the store at startup.

pub mod app;
pub mod config;
pub mod keybindings;
pub mod posts;
pub mod remote;
pub mod theme;
pub mod ui;
pub mod util;
