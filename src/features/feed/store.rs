//! In-memory feed projection.
//!
//! `FeedStore` is the single authoritative view of the posts loaded so
//! far. It is pure: every mutation is a reducer-style transformation
//! (add/remove/replace by id) driven by the outcome of a remote call the
//! service has already awaited. Keeping it free of I/O makes the
//! reconciliation rules testable without a database.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// A comment as projected into the feed
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FeedComment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub author_id: Uuid,
    pub author_name: String,
    pub author_photo_url: Option<String>,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// A like entry; at most one per user per post
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FeedLike {
    pub user_id: Uuid,
}

/// A post with its nested comments and likes
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FeedPost {
    pub id: Uuid,
    pub author_id: Uuid,
    pub author_name: String,
    pub author_photo_url: Option<String>,
    pub content: String,
    pub image_url: Option<String>,
    pub is_pinned: bool,
    pub created_at: DateTime<Utc>,
    pub comments: Vec<FeedComment>,
    pub likes: Vec<FeedLike>,
}

#[derive(Debug, Default)]
pub struct FeedStore {
    posts: Vec<FeedPost>,
}

impl FeedStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole projection (initial load / full reload)
    pub fn replace_with(&mut self, posts: Vec<FeedPost>) {
        self.posts = posts;
        self.sort();
    }

    /// Append a page, skipping posts already present
    pub fn append_page(&mut self, page: Vec<FeedPost>) {
        for post in page {
            if !self.posts.iter().any(|p| p.id == post.id) {
                self.posts.push(post);
            }
        }
        self.sort();
    }

    /// Insert a newly created post
    pub fn insert_post(&mut self, post: FeedPost) {
        if !self.posts.iter().any(|p| p.id == post.id) {
            self.posts.push(post);
        }
        self.sort();
    }

    pub fn posts(&self) -> &[FeedPost] {
        &self.posts
    }

    pub fn snapshot(&self) -> Vec<FeedPost> {
        self.posts.clone()
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// Record a like. A user likes a post at most once.
    pub fn apply_like(&mut self, post_id: Uuid, user_id: Uuid) {
        if let Some(post) = self.post_mut(post_id) {
            if !post.likes.iter().any(|l| l.user_id == user_id) {
                post.likes.push(FeedLike { user_id });
            }
        }
    }

    pub fn remove_like(&mut self, post_id: Uuid, user_id: Uuid) {
        if let Some(post) = self.post_mut(post_id) {
            post.likes.retain(|l| l.user_id != user_id);
        }
    }

    /// Append a comment; comments stay in creation order
    pub fn push_comment(&mut self, post_id: Uuid, comment: FeedComment) {
        if let Some(post) = self.post_mut(post_id) {
            post.comments.push(comment);
        }
    }

    pub fn remove_comment(&mut self, post_id: Uuid, comment_id: Uuid) {
        if let Some(post) = self.post_mut(post_id) {
            post.comments.retain(|c| c.id != comment_id);
        }
    }

    pub fn set_content(&mut self, post_id: Uuid, content: String) {
        if let Some(post) = self.post_mut(post_id) {
            post.content = content;
        }
    }

    pub fn remove_post(&mut self, post_id: Uuid) {
        self.posts.retain(|p| p.id != post_id);
    }

    /// Flip the pinned flag and restore feed order
    pub fn set_pinned(&mut self, post_id: Uuid, pinned: bool) {
        if let Some(post) = self.post_mut(post_id) {
            post.is_pinned = pinned;
        }
        self.sort();
    }

    fn post_mut(&mut self, post_id: Uuid) -> Option<&mut FeedPost> {
        self.posts.iter_mut().find(|p| p.id == post_id)
    }

    /// Feed order: pinned first, then newest first
    fn sort(&mut self) {
        self.posts
            .sort_by(|a, b| match b.is_pinned.cmp(&a.is_pinned) {
                std::cmp::Ordering::Equal => b.created_at.cmp(&a.created_at),
                other => other,
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn post(id: Uuid, is_pinned: bool, age_minutes: i64) -> FeedPost {
        FeedPost {
            id,
            author_id: Uuid::new_v4(),
            author_name: "Irmão José".to_string(),
            author_photo_url: None,
            content: "A paz do Senhor".to_string(),
            image_url: None,
            is_pinned,
            created_at: Utc::now() - Duration::minutes(age_minutes),
            comments: Vec::new(),
            likes: Vec::new(),
        }
    }

    #[test]
    fn like_alternation_restores_original_state() {
        let mut store = FeedStore::new();
        let post_id = Uuid::new_v4();
        let user_id = Uuid::new_v4();
        store.replace_with(vec![post(post_id, false, 0)]);

        let before = store.posts()[0].likes.len();
        store.apply_like(post_id, user_id);
        assert_eq!(store.posts()[0].likes.len(), before + 1);
        store.remove_like(post_id, user_id);
        assert_eq!(store.posts()[0].likes.len(), before);
    }

    #[test]
    fn like_set_holds_one_entry_per_user() {
        let mut store = FeedStore::new();
        let post_id = Uuid::new_v4();
        let user_id = Uuid::new_v4();
        store.replace_with(vec![post(post_id, false, 0)]);

        store.apply_like(post_id, user_id);
        store.apply_like(post_id, user_id);
        assert_eq!(store.posts()[0].likes.len(), 1);
    }

    #[test]
    fn pinned_older_post_sorts_before_unpinned_newer() {
        let mut store = FeedStore::new();
        let pinned_old = post(Uuid::new_v4(), true, 120);
        let unpinned_new = post(Uuid::new_v4(), false, 1);
        let pinned_id = pinned_old.id;

        store.replace_with(vec![unpinned_new, pinned_old]);
        assert_eq!(store.posts()[0].id, pinned_id);
    }

    #[test]
    fn pin_toggle_moves_post_to_front_and_keeps_created_at() {
        let mut store = FeedStore::new();
        let older = post(Uuid::new_v4(), false, 60);
        let newer = post(Uuid::new_v4(), false, 1);
        let older_id = older.id;
        let original_created_at = older.created_at;

        store.replace_with(vec![newer, older]);
        assert_eq!(store.posts()[1].id, older_id);

        store.set_pinned(older_id, true);
        assert_eq!(store.posts()[0].id, older_id);
        assert!(store.posts()[0].is_pinned);
        assert_eq!(store.posts()[0].created_at, original_created_at);
    }

    #[test]
    fn append_page_skips_already_loaded_posts() {
        let mut store = FeedStore::new();
        let shared = post(Uuid::new_v4(), false, 30);
        let fresh = post(Uuid::new_v4(), false, 40);

        store.replace_with(vec![shared.clone()]);
        store.append_page(vec![shared, fresh]);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn comments_keep_creation_order() {
        let mut store = FeedStore::new();
        let post_id = Uuid::new_v4();
        store.replace_with(vec![post(post_id, false, 0)]);

        let first = Uuid::new_v4();
        let second = Uuid::new_v4();
        for (id, minutes) in [(first, 10), (second, 5)] {
            store.push_comment(
                post_id,
                FeedComment {
                    id,
                    post_id,
                    author_id: Uuid::new_v4(),
                    author_name: "Irmã Maria".to_string(),
                    author_photo_url: None,
                    content: "Amém".to_string(),
                    created_at: Utc::now() - Duration::minutes(minutes),
                },
            );
        }

        let comments = &store.posts()[0].comments;
        assert_eq!(comments[0].id, first);
        assert_eq!(comments[1].id, second);
    }

    #[test]
    fn remove_post_drops_it_from_the_projection() {
        let mut store = FeedStore::new();
        let keep = post(Uuid::new_v4(), false, 5);
        let drop = post(Uuid::new_v4(), false, 10);
        let drop_id = drop.id;

        store.replace_with(vec![keep, drop]);
        store.remove_post(drop_id);
        assert_eq!(store.len(), 1);
        assert!(store.posts().iter().all(|p| p.id != drop_id));
    }
}
