//! Integration tests for the post store and the derived page view.
//!
//! Scenario tests pin down concrete behavior; the proptest block checks the
//! id, filter and pagination properties over random operation sequences.

use postboard::posts::{derive_view, Post, PostDraft, PostEdit, PostOp, PostStore};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use std::collections::HashSet;

fn post(id: u64, title: &str) -> Post {
    Post {
        id,
        title: title.to_string(),
        body: String::new(),
        disabled: false,
    }
}

fn numbered(n: u64) -> Vec<Post> {
    (1..=n).map(|id| post(id, &format!("Post {}", id))).collect()
}

fn ids(store: &PostStore) -> Vec<u64> {
    store.posts().iter().map(|p| p.id).collect()
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_add_new_uses_max_plus_one_at_front() {
    let store = PostStore::with_posts(vec![post(1, "a"), post(3, "b")], 10);
    let store = store.transition(PostOp::AddNew(PostDraft::titled("X")));

    assert_eq!(
        store.posts()[0],
        Post {
            id: 4,
            title: "X".to_string(),
            body: String::new(),
            disabled: false,
        }
    );
    assert_eq!(ids(&store), vec![4, 1, 3]);
}

#[test]
fn test_delete_keeps_or_clamps_page() {
    let mut store = PostStore::with_posts(numbered(25), 10);
    store.set_page(3);
    assert_eq!(store.current_page(), 3);

    // 24 posts still need three pages
    assert!(store.delete(25));
    assert_eq!(store.current_page(), 3);

    for id in 21..=24 {
        assert!(store.delete(id));
    }
    assert_eq!(store.len(), 20);
    assert_eq!(store.current_page(), 2);
}

#[test]
fn test_search_is_case_insensitive_substring() {
    let posts = vec![post(1, "Foobar"), post(2, "bar")];
    let view = derive_view(&posts, "foo", 1, 10);
    let titles: Vec<&str> = view.items.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["Foobar"]);
}

#[test]
fn test_search_resets_page_and_clamps_against_filtered_count() {
    let mut store = PostStore::with_posts(numbered(30), 10);
    store.set_page(3);
    store.apply(PostOp::SetSearch("Post 1".into()));
    assert_eq!(store.current_page(), 1);

    // "Post 1" and "Post 10".."Post 19": 11 matches, two pages
    let view = store.view();
    assert_eq!(view.total, 11);
    assert_eq!(view.total_pages, 2);

    store.apply(PostOp::SetPage(99));
    assert_eq!(store.current_page(), 2);
    assert_eq!(store.view().range_label(), "Showing 11–11 of 11");
}

#[test]
fn test_disabled_post_rejects_mutations_until_enabled() {
    let mut store = PostStore::with_posts(numbered(2), 10);
    assert_eq!(store.toggle_disable(1), Some(true));

    assert!(!store.apply(PostOp::Edit {
        id: 1,
        edit: PostEdit::both("new", "body"),
    }));
    assert!(!store.apply(PostOp::Delete(1)));
    assert!(!store.apply(PostOp::AddAfter {
        reference_id: 1,
        draft: PostDraft::titled("after"),
    }));
    assert_eq!(store.len(), 2);
    assert_eq!(store.get(1).map(|p| p.title.as_str()), Some("Post 1"));

    assert_eq!(store.toggle_disable(1), Some(false));
    assert!(store.apply(PostOp::Delete(1)));
    assert_eq!(ids(&store), vec![2]);
}

#[test]
fn test_unknown_ids_are_no_ops() {
    let mut store = PostStore::with_posts(numbered(3), 10);
    let before = store.clone();
    assert!(!store.apply(PostOp::Delete(42)));
    assert!(!store.apply(PostOp::ToggleDisable(42)));
    assert!(!store.apply(PostOp::AddAfter {
        reference_id: 42,
        draft: PostDraft::titled("x"),
    }));
    assert_eq!(store, before);
}

#[test]
fn test_empty_store_view() {
    let store = PostStore::with_posts(Vec::new(), 10);
    let view = store.view();
    assert!(view.items.is_empty());
    assert_eq!(view.total_pages, 1);
    assert_eq!(view.current_page, 1);
    assert_eq!(view.range_label(), "Showing 0–0 of 0");
}

// ============================================================================
// Properties
// ============================================================================

fn arb_title() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Foo".to_string()),
        Just("foobar".to_string()),
        Just("Bar".to_string()),
        "[a-zA-Z ]{0,12}",
    ]
}

fn arb_op() -> impl Strategy<Value = PostOp> {
    prop_oneof![
        arb_title().prop_map(|t| PostOp::AddNew(PostDraft::titled(t))),
        (0u64..40, arb_title()).prop_map(|(reference_id, t)| PostOp::AddAfter {
            reference_id,
            draft: PostDraft::titled(t),
        }),
        (0u64..40, arb_title()).prop_map(|(id, t)| PostOp::Edit {
            id,
            edit: PostEdit::both(t, "")
        }),
        (0u64..40).prop_map(PostOp::Delete),
        (0u64..40).prop_map(PostOp::ToggleDisable),
        prop_oneof![Just("foo"), Just("BAR"), Just(""), Just("  ")]
            .prop_map(|s| PostOp::SetSearch(s.to_string())),
        Just(PostOp::ClearSearch),
        (0usize..10).prop_map(PostOp::SetPage),
        prop_oneof![Just(PostOp::NextPage), Just(PostOp::PrevPage)],
        Just(PostOp::ToggleShowBody),
    ]
}

proptest! {
    #[test]
    fn prop_add_new_grows_by_one_with_fresh_id(initial in 0u64..30, title in arb_title()) {
        let mut store = PostStore::with_posts(numbered(initial), 10);
        let expected = ids(&store).into_iter().max().unwrap_or(0) + 1;

        let id = store.add_new(PostDraft::titled(title));

        prop_assert_eq!(store.len() as u64, initial + 1);
        prop_assert_eq!(id, expected);
        prop_assert_eq!(store.posts()[0].id, id);
    }

    #[test]
    fn prop_ids_stay_unique(ops in prop::collection::vec(arb_op(), 0..60)) {
        let mut store = PostStore::with_posts(numbered(5), 3);
        for op in ops {
            store.apply(op);
            let unique: HashSet<u64> = store.posts().iter().map(|p| p.id).collect();
            prop_assert_eq!(unique.len(), store.len());
        }
    }

    #[test]
    fn prop_delete_then_add_never_duplicates(n in 1u64..20, victim in 1u64..20) {
        let mut store = PostStore::with_posts(numbered(n), 10);
        store.delete(victim);
        let id = store.add_new(PostDraft::titled("new"));
        let count = store.posts().iter().filter(|p| p.id == id).count();
        prop_assert_eq!(count, 1);
    }

    #[test]
    fn prop_current_page_always_in_range(ops in prop::collection::vec(arb_op(), 0..60)) {
        let mut store = PostStore::with_posts(numbered(12), 4);
        for op in ops {
            store.apply(op);
            let total = store.total_pages();
            prop_assert!(store.current_page() >= 1);
            prop_assert!(store.current_page() <= total);
        }
    }

    #[test]
    fn prop_filter_matches_term(
        titles in prop::collection::vec(arb_title(), 0..30),
        term in prop_oneof![Just("foo"), Just("FOO"), Just("bar"), Just(""), Just("  ")],
    ) {
        let posts: Vec<Post> = titles
            .iter()
            .enumerate()
            .map(|(i, t)| post(i as u64 + 1, t))
            .collect();
        let view = derive_view(&posts, term, 1, usize::MAX);
        let needle = term.trim().to_lowercase();

        if needle.is_empty() {
            prop_assert_eq!(view.total, posts.len());
        } else {
            let expected = posts
                .iter()
                .filter(|p| p.title.to_lowercase().contains(&needle))
                .count();
            prop_assert_eq!(view.total, expected);
            for item in &view.items {
                prop_assert!(item.title.to_lowercase().contains(&needle));
            }
        }
    }

    #[test]
    fn prop_view_pages_cover_filtered_list(n in 0u64..50, page_size in 1usize..12, page in 0usize..10) {
        let posts = numbered(n);
        let view = derive_view(&posts, "", page, page_size);
        prop_assert!(view.items.len() <= page_size);
        prop_assert!(view.current_page >= 1 && view.current_page <= view.total_pages);
        prop_assert_eq!(view.end - view.start, view.items.len());
        prop_assert_eq!(view.total_pages, (n as usize).div_ceil(page_size).max(1));
    }
}
