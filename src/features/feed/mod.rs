//! Social feed.
//!
//! Posts with likes, comments and pinning. The service keeps an
//! in-memory projection ([`store::FeedStore`]) of the loaded posts and
//! reconciles it after each confirmed remote write instead of reloading
//! the feed. Posting is rate-limited by a trailing-week quota that
//! depends on the author's role.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/feed` | Yes | Load a page into the projection |
//! | POST | `/api/feed/posts` | Yes | Create a post (quota applies) |
//! | POST | `/api/feed/images` | Yes | Upload a post image |
//! | PUT | `/api/feed/posts/{id}` | Owner/Leader | Edit post text |
//! | DELETE | `/api/feed/posts/{id}` | Owner/Leader | Delete a post |
//! | POST | `/api/feed/posts/{id}/like` | Yes | Toggle a like |
//! | POST | `/api/feed/posts/{id}/pin` | Leader | Toggle the pinned flag |
//! | POST | `/api/feed/posts/{id}/comments` | Yes | Add a comment |
//! | DELETE | `/api/feed/posts/{id}/comments/{comment_id}` | Owner/Leader | Delete a comment |

pub mod dtos;
pub mod handlers;
pub mod routes;
pub mod services;
pub mod store;

pub use services::FeedService;
