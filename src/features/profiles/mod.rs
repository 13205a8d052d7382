//! Member profile management.
//!
//! Profiles mirror the hosted auth provider's user records and carry the
//! application role (`admin`, `leader`, `member`) and activity status used
//! by permission checks across the whole system.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/profiles/me` | Yes | Current user's profile |
//! | GET | `/api/profiles/{id}` | Yes | Public view of a profile |
//! | PUT | `/api/profiles/me` | Yes | Update own name/phone/photo |
//! | POST | `/api/profiles/me/photo` | Yes | Upload a profile photo |
//! | GET | `/api/profiles` | Admin | List profiles with filters |
//! | PUT | `/api/profiles/{id}` | Admin | Update role/status |
//! | DELETE | `/api/profiles/{id}` | Admin | Delete a profile |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::ProfileService;
