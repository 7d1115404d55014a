//! Utility functions for common operations.
//!
//! - **Endpoint validation**: scheme and host checks for the post source URL
//! - **Text processing**: Unicode-aware width, truncation, wrapping and
//!   control-character stripping for remote text rendered in the terminal

mod endpoint;
mod text;

pub use endpoint::{validate_endpoint, EndpointError};
pub use text::{display_width, strip_control_chars, truncate_to_width, wrap_to_width};

/// Maximum allowed search input length
pub const MAX_SEARCH_QUERY_LENGTH: usize = 256;

/// Maximum length accepted by the title field of the post forms
pub const MAX_TITLE_LENGTH: usize = 200;

/// Maximum length accepted by the body field of the post forms
pub const MAX_BODY_LENGTH: usize = 5000;
