use serde::Deserialize;
use std::collections::HashSet;

/// Title assigned to locally created posts whose draft title is empty.
pub const DEFAULT_TITLE: &str = "Untitled";

// ============================================================================
// Entities
// ============================================================================

/// A single post card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: u64,
    pub title: String,
    pub body: String,
    /// Disabled posts reject edit, delete and add-after until re-enabled.
    pub disabled: bool,
}

/// User-entered title/body pair for a new post.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostDraft {
    pub title: String,
    pub body: String,
}

impl PostDraft {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }

    /// Draft with only a title.
    pub fn titled(title: impl Into<String>) -> Self {
        Self::new(title, String::new())
    }

    /// A draft is blank when both fields are empty. Forms refuse to submit these.
    pub fn is_blank(&self) -> bool {
        self.title.is_empty() && self.body.is_empty()
    }

    /// Build the post this draft becomes once it is assigned `id`.
    pub(crate) fn into_post(self, id: u64) -> Post {
        let title = if self.title.is_empty() {
            DEFAULT_TITLE.to_string()
        } else {
            self.title
        };
        Post {
            id,
            title,
            body: self.body,
            disabled: false,
        }
    }
}

/// Field replacement for `PostStore::edit`. `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostEdit {
    pub title: Option<String>,
    pub body: Option<String>,
}

impl PostEdit {
    /// Replace both fields, as the edit form does on save.
    pub fn both(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            body: Some(body.into()),
        }
    }
}

// ============================================================================
// Wire Record
// ============================================================================

/// A post as returned by the remote endpoint.
///
/// Only `title` and `body` are required; unknown fields (e.g. `userId`) are ignored.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct RawPost {
    #[serde(default)]
    pub id: Option<u64>,
    pub title: String,
    #[serde(default)]
    pub body: String,
}

/// Map fetched records to posts.
///
/// The first record carrying a remote id keeps it. Records without an id,
/// or repeating an id already seen, are numbered after the highest remote
/// id, in order, so ids stay unique.
pub fn posts_from_raw(records: Vec<RawPost>) -> Vec<Post> {
    let mut next_id = records.iter().filter_map(|r| r.id).max().unwrap_or(0);
    let mut seen = HashSet::with_capacity(records.len());
    records
        .into_iter()
        .map(|r| {
            let id = match r.id {
                Some(id) if seen.insert(id) => id,
                Some(dup) => {
                    next_id += 1;
                    tracing::warn!(duplicate = dup, id = next_id, "Renumbered duplicate post id");
                    next_id
                }
                None => {
                    next_id += 1;
                    next_id
                }
            };
            Post {
                id,
                title: r.title,
                body: r.body,
                disabled: false,
            }
        })
        .collect()
}

// ============================================================================
// Load State
// ============================================================================

/// Bootstrap progress of the store.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Loading,
    Ready,
    Error(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_defaults_title() {
        let post = PostDraft::new("", "body").into_post(7);
        assert_eq!(post.title, "Untitled");
        assert_eq!(post.body, "body");
        assert_eq!(post.id, 7);
        assert!(!post.disabled);
    }

    #[test]
    fn test_blank_draft() {
        assert!(PostDraft::default().is_blank());
        assert!(!PostDraft::titled("x").is_blank());
        assert!(!PostDraft::new("", "b").is_blank());
    }

    #[test]
    fn test_raw_post_ignores_unknown_fields() {
        let json = r#"{"userId": 1, "id": 3, "title": "t", "body": "b"}"#;
        let raw: RawPost = serde_json::from_str(json).unwrap();
        assert_eq!(raw.id, Some(3));
        assert_eq!(raw.title, "t");
    }

    #[test]
    fn test_raw_post_body_optional() {
        let raw: RawPost = serde_json::from_str(r#"{"title": "only"}"#).unwrap();
        assert_eq!(raw.id, None);
        assert_eq!(raw.body, "");
    }

    #[test]
    fn test_posts_from_raw_numbers_missing_ids() {
        let records = vec![
            RawPost {
                id: Some(5),
                title: "a".into(),
                body: String::new(),
            },
            RawPost {
                id: None,
                title: "b".into(),
                body: String::new(),
            },
            RawPost {
                id: Some(2),
                title: "c".into(),
                body: String::new(),
            },
            RawPost {
                id: None,
                title: "d".into(),
                body: String::new(),
            },
        ];
        let ids: Vec<u64> = posts_from_raw(records).iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![5, 6, 2, 7]);
    }

    #[test]
    fn test_posts_from_raw_renumbers_duplicate_ids() {
        let raw = |id: Option<u64>, title: &str| RawPost {
            id,
            title: title.into(),
            body: String::new(),
        };
        let posts = posts_from_raw(vec![
            raw(Some(3), "first"),
            raw(Some(3), "again"),
            raw(None, "none"),
            raw(Some(1), "one"),
        ]);
        let ids: Vec<(u64, &str)> = posts.iter().map(|p| (p.id, p.title.as_str())).collect();
        assert_eq!(ids, vec![(3, "first"), (4, "again"), (5, "none"), (1, "one")]);
    }
}
