//! Feed service.
//!
//! Owns the database access and the in-memory [`FeedStore`] projection.
//! Every mutation follows the same discipline: the remote write is
//! awaited first, and only its confirmed outcome is applied to the
//! store. There is no optimistic update ahead of the remote call and no
//! full reload after it.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::feed::dtos::{
    CreateCommentDto, CreatePostDto, FeedPageDto, LikeToggleDto, UpdatePostDto,
};
use crate::features::feed::store::{FeedComment, FeedLike, FeedPost, FeedStore};
use crate::features::profiles::models::{ProfileStatus, Role};
use crate::modules::storage::MinIOClient;
use crate::shared::constants::{
    DEFAULT_PAGE_SIZE, LEADER_WEEKLY_POST_LIMIT, MAX_IMAGE_SIZE_BYTES, MEMBER_WEEKLY_POST_LIMIT,
    POST_IMAGES_PREFIX, QUOTA_WINDOW_DAYS,
};
use crate::shared::validation::is_image_content_type;

/// Weekly post limit for a role; `None` means unlimited
fn weekly_limit(role: Role) -> Option<i64> {
    match role {
        Role::Admin => None,
        Role::Leader => Some(LEADER_WEEKLY_POST_LIMIT),
        Role::Member => Some(MEMBER_WEEKLY_POST_LIMIT),
    }
}

/// Quota decision given a role and the trailing-week post count
fn quota_allows(role: Role, posts_this_week: i64) -> bool {
    match weekly_limit(role) {
        None => true,
        Some(limit) => posts_this_week < limit,
    }
}

#[derive(Debug, sqlx::FromRow)]
struct PostRow {
    id: Uuid,
    author_id: Uuid,
    author_name: String,
    author_photo_url: Option<String>,
    content: String,
    image_url: Option<String>,
    is_pinned: bool,
    created_at: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
struct CommentRow {
    id: Uuid,
    post_id: Uuid,
    author_id: Uuid,
    author_name: String,
    author_photo_url: Option<String>,
    content: String,
    created_at: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
struct LikeRow {
    post_id: Uuid,
    user_id: Uuid,
}

#[derive(Debug, sqlx::FromRow)]
struct AuthorRow {
    full_name: String,
    photo_url: Option<String>,
    status: ProfileStatus,
}

/// Service for the social feed
pub struct FeedService {
    pool: PgPool,
    storage: Arc<MinIOClient>,
    store: RwLock<FeedStore>,
}

impl FeedService {
    pub fn new(pool: PgPool, storage: Arc<MinIOClient>) -> Self {
        Self {
            pool,
            storage,
            store: RwLock::new(FeedStore::new()),
        }
    }

    /// Store a post image, returning a presigned URL the caller can put
    /// into `image_url` when creating the post.
    pub async fn upload_image(
        &self,
        user: &AuthenticatedUser,
        filename: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> Result<String> {
        if !is_image_content_type(content_type) {
            return Err(AppError::Validation(
                "Apenas imagens JPEG, PNG, WebP ou GIF são aceitas".to_string(),
            ));
        }
        if data.len() > MAX_IMAGE_SIZE_BYTES {
            return Err(AppError::Validation(
                "A imagem excede o limite de 5 MB".to_string(),
            ));
        }

        let key = format!(
            "{}/{}/{}-{}",
            POST_IMAGES_PREFIX,
            user.id,
            Uuid::new_v4(),
            filename
        );
        self.storage.upload(&key, data, content_type).await?;
        self.storage.get_presigned_url(&key).await
    }

    /// Load one page of posts into the projection.
    ///
    /// Page 1 replaces the projection; later pages append to it, so the
    /// caller always gets the full accumulated list back.
    pub async fn load_page(&self, page: i64) -> Result<FeedPageDto> {
        let page = page.max(1);

        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM posts")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to count posts: {:?}", e);
                AppError::Database(e)
            })?;

        let rows = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT p.id, p.author_id, pr.full_name AS author_name,
                   pr.photo_url AS author_photo_url, p.content, p.image_url,
                   p.is_pinned, p.created_at
            FROM posts p
            JOIN profiles pr ON pr.id = p.author_id
            ORDER BY p.is_pinned DESC, p.created_at DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(DEFAULT_PAGE_SIZE)
        .bind((page - 1) * DEFAULT_PAGE_SIZE)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load feed page {}: {:?}", page, e);
            AppError::Database(e)
        })?;

        let post_ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
        let comments = self.comments_for(&post_ids).await?;
        let likes = self.likes_for(&post_ids).await?;

        let posts = rows
            .into_iter()
            .map(|row| FeedPost {
                comments: comments
                    .iter()
                    .filter(|c| c.post_id == row.id)
                    .map(|c| FeedComment {
                        id: c.id,
                        post_id: c.post_id,
                        author_id: c.author_id,
                        author_name: c.author_name.clone(),
                        author_photo_url: c.author_photo_url.clone(),
                        content: c.content.clone(),
                        created_at: c.created_at,
                    })
                    .collect(),
                likes: likes
                    .iter()
                    .filter(|l| l.post_id == row.id)
                    .map(|l| FeedLike { user_id: l.user_id })
                    .collect(),
                id: row.id,
                author_id: row.author_id,
                author_name: row.author_name,
                author_photo_url: row.author_photo_url,
                content: row.content,
                image_url: row.image_url,
                is_pinned: row.is_pinned,
                created_at: row.created_at,
            })
            .collect();

        let mut store = self.store.write().await;
        if page == 1 {
            store.replace_with(posts);
        } else {
            store.append_page(posts);
        }

        Ok(FeedPageDto {
            posts: store.snapshot(),
            has_more: page * DEFAULT_PAGE_SIZE < total,
        })
    }

    async fn comments_for(&self, post_ids: &[Uuid]) -> Result<Vec<CommentRow>> {
        if post_ids.is_empty() {
            return Ok(Vec::new());
        }

        sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT c.id, c.post_id, c.author_id, pr.full_name AS author_name,
                   pr.photo_url AS author_photo_url, c.content, c.created_at
            FROM post_comments c
            JOIN profiles pr ON pr.id = c.author_id
            WHERE c.post_id = ANY($1)
            ORDER BY c.created_at
            "#,
        )
        .bind(post_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load comments: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn likes_for(&self, post_ids: &[Uuid]) -> Result<Vec<LikeRow>> {
        if post_ids.is_empty() {
            return Ok(Vec::new());
        }

        sqlx::query_as::<_, LikeRow>(
            "SELECT post_id, user_id FROM post_likes WHERE post_id = ANY($1)",
        )
        .bind(post_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load likes: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn author(&self, user_id: Uuid) -> Result<AuthorRow> {
        sqlx::query_as::<_, AuthorRow>(
            "SELECT full_name, photo_url, status FROM profiles WHERE id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch author profile {}: {:?}", user_id, e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound("Perfil não encontrado".to_string()))
    }

    /// Enforce the trailing-week posting quota.
    ///
    /// A failed count query is logged and lets the post through: quota
    /// enforcement must never block a member because of an infrastructure
    /// hiccup.
    async fn check_weekly_quota(&self, user: &AuthenticatedUser) -> Result<()> {
        if weekly_limit(user.role).is_none() {
            return Ok(());
        }

        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM posts WHERE author_id = $1 \
             AND created_at >= NOW() - make_interval(days => $2::int)",
        )
        .bind(user.id)
        .bind(QUOTA_WINDOW_DAYS)
        .fetch_one(&self.pool)
        .await;

        let count = match count {
            Ok(count) => count,
            Err(e) => {
                tracing::warn!("Weekly quota count failed, allowing post: {:?}", e);
                return Ok(());
            }
        };

        if !quota_allows(user.role, count) {
            return Err(AppError::QuotaExceeded(
                "Limite semanal de publicações atingido".to_string(),
            ));
        }

        Ok(())
    }

    /// Create a post. Requires an active profile and a free quota slot.
    pub async fn create_post(
        &self,
        user: &AuthenticatedUser,
        data: &CreatePostDto,
    ) -> Result<FeedPost> {
        let author = self.author(user.id).await?;
        if author.status != ProfileStatus::Ativo {
            return Err(AppError::Forbidden(
                "Apenas membros ativos podem publicar".to_string(),
            ));
        }

        self.check_weekly_quota(user).await?;

        let row = sqlx::query_as::<_, PostRow>(
            r#"
            WITH inserted AS (
                INSERT INTO posts (author_id, content, image_url)
                VALUES ($1, $2, $3)
                RETURNING id, author_id, content, image_url, is_pinned, created_at
            )
            SELECT i.id, i.author_id, pr.full_name AS author_name,
                   pr.photo_url AS author_photo_url, i.content, i.image_url,
                   i.is_pinned, i.created_at
            FROM inserted i
            JOIN profiles pr ON pr.id = i.author_id
            "#,
        )
        .bind(user.id)
        .bind(&data.content)
        .bind(data.image_url.as_deref())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create post: {:?}", e);
            AppError::Database(e)
        })?;

        let post = FeedPost {
            id: row.id,
            author_id: row.author_id,
            author_name: row.author_name,
            author_photo_url: row.author_photo_url,
            content: row.content,
            image_url: row.image_url,
            is_pinned: row.is_pinned,
            created_at: row.created_at,
            comments: Vec::new(),
            likes: Vec::new(),
        };

        self.store.write().await.insert_post(post.clone());
        tracing::info!("Created post {} by {}", post.id, user.id);
        Ok(post)
    }

    /// Toggle the caller's like on a post.
    ///
    /// The remote like row is checked first; only the confirmed result
    /// mutates the projection, so toggling twice restores the original
    /// state.
    pub async fn toggle_like(
        &self,
        user: &AuthenticatedUser,
        post_id: Uuid,
    ) -> Result<LikeToggleDto> {
        let existing = sqlx::query_scalar::<_, Uuid>(
            "SELECT id FROM post_likes WHERE post_id = $1 AND user_id = $2",
        )
        .bind(post_id)
        .bind(user.id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to check like on post {}: {:?}", post_id, e);
            AppError::Database(e)
        })?;

        let liked = match existing {
            Some(like_id) => {
                sqlx::query("DELETE FROM post_likes WHERE id = $1")
                    .bind(like_id)
                    .execute(&self.pool)
                    .await
                    .map_err(|e| {
                        tracing::error!("Failed to remove like on post {}: {:?}", post_id, e);
                        AppError::Database(e)
                    })?;

                self.store.write().await.remove_like(post_id, user.id);
                false
            }
            None => {
                sqlx::query("INSERT INTO post_likes (post_id, user_id) VALUES ($1, $2)")
                    .bind(post_id)
                    .bind(user.id)
                    .execute(&self.pool)
                    .await
                    .map_err(|e| {
                        tracing::error!("Failed to like post {}: {:?}", post_id, e);
                        AppError::Database(e)
                    })?;

                self.store.write().await.apply_like(post_id, user.id);
                true
            }
        };

        let store = self.store.read().await;
        let like_count = store
            .posts()
            .iter()
            .find(|p| p.id == post_id)
            .map(|p| p.likes.len())
            .unwrap_or(0);

        Ok(LikeToggleDto { liked, like_count })
    }

    /// Add a comment.
    ///
    /// The comment id is generated locally and sent with the insert; on
    /// success a synthesized record built from the caller's known profile
    /// fields is appended to the projection without a re-fetch.
    pub async fn add_comment(
        &self,
        user: &AuthenticatedUser,
        post_id: Uuid,
        data: &CreateCommentDto,
    ) -> Result<FeedComment> {
        let author = self.author(user.id).await?;
        let comment_id = Uuid::new_v4();

        sqlx::query("INSERT INTO post_comments (id, post_id, author_id, content) VALUES ($1, $2, $3, $4)")
            .bind(comment_id)
            .bind(post_id)
            .bind(user.id)
            .bind(&data.content)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to comment on post {}: {:?}", post_id, e);
                AppError::Database(e)
            })?;

        let comment = FeedComment {
            id: comment_id,
            post_id,
            author_id: user.id,
            author_name: author.full_name,
            author_photo_url: author.photo_url,
            content: data.content.clone(),
            created_at: Utc::now(),
        };

        self.store
            .write()
            .await
            .push_comment(post_id, comment.clone());
        Ok(comment)
    }

    pub async fn delete_comment(
        &self,
        user: &AuthenticatedUser,
        post_id: Uuid,
        comment_id: Uuid,
    ) -> Result<()> {
        let author_id = sqlx::query_scalar::<_, Uuid>(
            "SELECT author_id FROM post_comments WHERE id = $1 AND post_id = $2",
        )
        .bind(comment_id)
        .bind(post_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch comment {}: {:?}", comment_id, e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound("Comentário não encontrado".to_string()))?;

        if author_id != user.id && !user.is_moderator() {
            return Err(AppError::Forbidden(
                "Sem permissão para excluir este comentário".to_string(),
            ));
        }

        sqlx::query("DELETE FROM post_comments WHERE id = $1")
            .bind(comment_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete comment {}: {:?}", comment_id, e);
                AppError::Database(e)
            })?;

        self.store.write().await.remove_comment(post_id, comment_id);
        Ok(())
    }

    /// Edit a post's text (owner or moderator)
    pub async fn update_post(
        &self,
        user: &AuthenticatedUser,
        post_id: Uuid,
        data: &UpdatePostDto,
    ) -> Result<()> {
        self.authorize_post_mutation(user, post_id).await?;

        sqlx::query("UPDATE posts SET content = $2, updated_at = NOW() WHERE id = $1")
            .bind(post_id)
            .bind(&data.content)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to update post {}: {:?}", post_id, e);
                AppError::Database(e)
            })?;

        self.store
            .write()
            .await
            .set_content(post_id, data.content.clone());
        Ok(())
    }

    /// Delete a post (owner or moderator). Immediate and irreversible.
    pub async fn delete_post(&self, user: &AuthenticatedUser, post_id: Uuid) -> Result<()> {
        self.authorize_post_mutation(user, post_id).await?;

        sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(post_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete post {}: {:?}", post_id, e);
                AppError::Database(e)
            })?;

        self.store.write().await.remove_post(post_id);
        tracing::info!("Deleted post {} by {}", post_id, user.id);
        Ok(())
    }

    /// Flip a post's pinned flag and restore feed order
    pub async fn toggle_pin(&self, post_id: Uuid) -> Result<bool> {
        let pinned = sqlx::query_scalar::<_, bool>(
            "UPDATE posts SET is_pinned = NOT is_pinned, updated_at = NOW() \
             WHERE id = $1 RETURNING is_pinned",
        )
        .bind(post_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to toggle pin on post {}: {:?}", post_id, e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound("Publicação não encontrada".to_string()))?;

        self.store.write().await.set_pinned(post_id, pinned);
        Ok(pinned)
    }

    async fn authorize_post_mutation(
        &self,
        user: &AuthenticatedUser,
        post_id: Uuid,
    ) -> Result<()> {
        let author_id =
            sqlx::query_scalar::<_, Uuid>("SELECT author_id FROM posts WHERE id = $1")
                .bind(post_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to fetch post {}: {:?}", post_id, e);
                    AppError::Database(e)
                })?
                .ok_or_else(|| AppError::NotFound("Publicação não encontrada".to_string()))?;

        if author_id != user.id && !user.is_moderator() {
            return Err(AppError::Forbidden(
                "Sem permissão para alterar esta publicação".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn member_at_limit_is_denied() {
        assert!(quota_allows(Role::Member, 2));
        assert!(!quota_allows(Role::Member, 3));
        assert!(!quota_allows(Role::Member, 4));
    }

    #[test]
    fn leader_at_limit_is_denied() {
        assert!(quota_allows(Role::Leader, 3));
        assert!(!quota_allows(Role::Leader, 4));
    }

    #[test]
    fn admin_is_never_denied() {
        assert!(quota_allows(Role::Admin, 0));
        assert!(quota_allows(Role::Admin, 1000));
    }
}
