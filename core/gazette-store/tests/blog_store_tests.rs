use gazette_store::{BlogStore, StoreError};
use gazette_types::{CommentStatus, NewComment, NewPost, PostStatus};
use pretty_assertions::assert_eq;

fn store() -> BlogStore {
    BlogStore::open_in_memory().unwrap()
}

fn new_post(author_id: i64, title: &str, slug: &str, published_at: &str) -> NewPost {
    NewPost {
        title: title.to_string(),
        slug: slug.to_string(),
        excerpt: format!("{title} excerpt"),
        content: format!("Body of {title}."),
        category: "essays".to_string(),
        author_id,
        status: PostStatus::Published,
        published_at: Some(published_at.to_string()),
    }
}

fn comment(author_name: &str, content: &str) -> NewComment {
    NewComment {
        author_name: author_name.to_string(),
        content: content.to_string(),
    }
}

/// Seeds an author plus one published post, returning the post id.
fn seed_post(store: &BlogStore) -> i64 {
    let author = store.insert_author("ed").unwrap();
    store
        .insert_post(&new_post(author, "First", "first", "2024-01-05T00:00:00Z"))
        .unwrap()
}

// ── posts ────────────────────────────────────────────────────────

#[test]
fn published_posts_newest_first() {
    let store = store();
    let author = store.insert_author("ed").unwrap();
    store
        .insert_post(&new_post(author, "Old", "old", "2024-01-01T00:00:00Z"))
        .unwrap();
    store
        .insert_post(&new_post(author, "New", "new", "2024-03-01T00:00:00Z"))
        .unwrap();

    let posts = store.published_posts().unwrap();
    let titles: Vec<_> = posts.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["New", "Old"]);
    assert_eq!(posts[0].author_name.as_deref(), Some("ed"));
}

#[test]
fn drafts_are_not_listed() {
    let store = store();
    let author = store.insert_author("ed").unwrap();
    let mut draft = new_post(author, "Hidden", "hidden", "2024-01-01T00:00:00Z");
    draft.status = PostStatus::Draft;
    store.insert_post(&draft).unwrap();

    assert!(store.published_posts().unwrap().is_empty());
}

// ── search ───────────────────────────────────────────────────────

#[test]
fn search_matches_title_and_body_case_insensitively() {
    let store = store();
    let author = store.insert_author("ed").unwrap();
    let mut a = new_post(author, "On the Republic", "republic", "2024-02-01T00:00:00Z");
    a.content = "Plato wrote at length.".to_string();
    store.insert_post(&a).unwrap();

    let mut b = new_post(author, "Gardening", "gardening", "2024-01-01T00:00:00Z");
    b.content = "A REPUBLIC of vegetables.".to_string();
    store.insert_post(&b).unwrap();

    let mut c = new_post(author, "Unrelated", "unrelated", "2024-03-01T00:00:00Z");
    c.content = "Nothing relevant.".to_string();
    store.insert_post(&c).unwrap();

    let results = store.search_posts("republic").unwrap();
    let titles: Vec<_> = results.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["On the Republic", "Gardening"]);
}

#[test]
fn search_is_capped_at_twenty() {
    let store = store();
    let author = store.insert_author("ed").unwrap();
    for i in 0..25 {
        store
            .insert_post(&new_post(
                author,
                &format!("Common topic {i}"),
                &format!("common-{i}"),
                &format!("2024-01-{:02}T00:00:00Z", (i % 28) + 1),
            ))
            .unwrap();
    }

    let results = store.search_posts("common").unwrap();
    assert_eq!(results.len(), 20);
}

#[test]
fn search_skips_drafts() {
    let store = store();
    let author = store.insert_author("ed").unwrap();
    let mut draft = new_post(author, "Secret topic", "secret", "2024-01-01T00:00:00Z");
    draft.status = PostStatus::Draft;
    store.insert_post(&draft).unwrap();

    assert!(store.search_posts("secret").unwrap().is_empty());
}

// ── comments ─────────────────────────────────────────────────────

#[test]
fn insert_comment_reads_back_stored_row() {
    let store = store();
    let post_id = seed_post(&store);

    let stored = store
        .insert_comment(post_id, &comment("Al", "I enjoyed this piece."), CommentStatus::Approved)
        .unwrap();

    assert_eq!(stored.post_id, post_id);
    assert_eq!(stored.author_name, "Al");
    assert_eq!(stored.status, CommentStatus::Approved);
    assert!(!stored.created_at.is_empty());
    assert_eq!(store.get_comment(stored.id).unwrap(), stored);
}

#[test]
fn comment_for_missing_post_is_refused() {
    let store = store();
    let result = store.insert_comment(999, &comment("Al", "Fine words."), CommentStatus::Approved);
    assert!(matches!(result, Err(StoreError::Database(_))));
}

#[test]
fn approved_listing_excludes_pending_and_rejected() {
    let store = store();
    let post_id = seed_post(&store);
    store
        .insert_comment(post_id, &comment("A", "Approved one."), CommentStatus::Approved)
        .unwrap();
    store
        .insert_comment(post_id, &comment("B", "Held for review."), CommentStatus::Pending)
        .unwrap();
    store
        .insert_comment(post_id, &comment("C", "Thrown out."), CommentStatus::Rejected)
        .unwrap();

    let visible = store.approved_comments(post_id).unwrap();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].author_name, "A");
}

#[test]
fn approved_listing_is_newest_first() {
    let store = store();
    let post_id = seed_post(&store);
    let first = store
        .insert_comment(post_id, &comment("A", "Earlier remark."), CommentStatus::Approved)
        .unwrap();
    let second = store
        .insert_comment(post_id, &comment("B", "Later remark."), CommentStatus::Approved)
        .unwrap();

    let visible = store.approved_comments(post_id).unwrap();
    assert_eq!(
        visible.iter().map(|c| c.id).collect::<Vec<_>>(),
        vec![second.id, first.id]
    );
}

#[test]
fn moderation_listing_joins_post_title_and_includes_everything() {
    let store = store();
    let post_id = seed_post(&store);
    store
        .insert_comment(post_id, &comment("A", "Approved one."), CommentStatus::Approved)
        .unwrap();
    store
        .insert_comment(post_id, &comment("B", "Held for review."), CommentStatus::Pending)
        .unwrap();

    let all = store.all_comments().unwrap();
    assert_eq!(all.len(), 2);
    assert!(all.iter().all(|m| m.post_title == "First"));
    // Newest first.
    assert_eq!(all[0].comment.author_name, "B");
}

#[test]
fn status_update_moves_between_any_states() {
    let store = store();
    let post_id = seed_post(&store);
    let stored = store
        .insert_comment(post_id, &comment("A", "Held for review."), CommentStatus::Pending)
        .unwrap();

    let approved = store
        .update_comment_status(stored.id, CommentStatus::Approved)
        .unwrap();
    assert_eq!(approved.status, CommentStatus::Approved);

    let rejected = store
        .update_comment_status(stored.id, CommentStatus::Rejected)
        .unwrap();
    assert_eq!(rejected.status, CommentStatus::Rejected);

    let back = store
        .update_comment_status(stored.id, CommentStatus::Pending)
        .unwrap();
    assert_eq!(back.status, CommentStatus::Pending);
}

#[test]
fn status_update_of_missing_comment_is_not_found() {
    let store = store();
    let result = store.update_comment_status(404, CommentStatus::Approved);
    assert!(matches!(result, Err(StoreError::NotFound(_))));
}

#[test]
fn delete_removes_comment() {
    let store = store();
    let post_id = seed_post(&store);
    let stored = store
        .insert_comment(post_id, &comment("A", "Fleeting words."), CommentStatus::Approved)
        .unwrap();

    store.delete_comment(stored.id).unwrap();
    assert!(matches!(
        store.get_comment(stored.id),
        Err(StoreError::NotFound(_))
    ));
    assert!(matches!(
        store.delete_comment(stored.id),
        Err(StoreError::NotFound(_))
    ));
}

// ── stats ────────────────────────────────────────────────────────

#[test]
fn stats_count_by_status() {
    let store = store();
    let post_id = seed_post(&store);
    for (status, n) in [
        (CommentStatus::Approved, 3),
        (CommentStatus::Pending, 2),
        (CommentStatus::Rejected, 1),
    ] {
        for i in 0..n {
            store
                .insert_comment(post_id, &comment("A", &format!("Remark {i}.")), status)
                .unwrap();
        }
    }

    let stats = store.comment_stats().unwrap();
    assert_eq!(stats.approved, 3);
    assert_eq!(stats.pending, 2);
    assert_eq!(stats.rejected, 1);
    assert_eq!(stats.total, 6);
}

#[test]
fn stats_on_empty_store_are_zero() {
    let stats = store().comment_stats().unwrap();
    assert_eq!(stats, Default::default());
}

// ── newsletter ───────────────────────────────────────────────────

#[test]
fn subscribe_is_idempotent() {
    let store = store();
    assert!(store.subscribe("reader@example.com").unwrap());
    assert!(!store.subscribe("reader@example.com").unwrap());
}

// ── persistence ──────────────────────────────────────────────────

#[test]
fn data_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gazette.db");

    let post_id = {
        let store = BlogStore::open(&path).unwrap();
        let post_id = seed_post(&store);
        store
            .insert_comment(post_id, &comment("Al", "Still here later."), CommentStatus::Approved)
            .unwrap();
        post_id
    };

    let reopened = BlogStore::open(&path).unwrap();
    let comments = reopened.approved_comments(post_id).unwrap();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].content, "Still here later.");
}
