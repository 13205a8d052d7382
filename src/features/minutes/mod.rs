//! Meeting minutes ("atas").
//!
//! Formal records of official meetings: sequential numbering
//! (`ATA-YYYY-NNN`), a signed-PDF attachment kept in object storage, an
//! AI-generated summary produced by an external webhook, and an audit
//! log per minute. Archiving requires the signed PDF.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/minutes` | Yes | List minutes |
//! | POST | `/api/minutes` | Leader | Create a minute |
//! | GET | `/api/minutes/generate-number` | Leader | Mint the next number |
//! | GET | `/api/minutes/{id}` | Yes | Minute with parsed summary |
//! | PUT | `/api/minutes/{id}` | Leader | Edit header fields |
//! | DELETE | `/api/minutes/{id}` | Admin | Delete minute and PDF |
//! | POST | `/api/minutes/{id}/pdf` | Leader | Attach the signed PDF |
//! | GET | `/api/minutes/{id}/pdf` | Yes | Presigned download URL |
//! | POST | `/api/minutes/{id}/archive` | Leader | Archive (PDF required) |
//! | POST | `/api/minutes/{id}/summary` | Leader | Trigger the AI summary |
//! | GET | `/api/minutes/{id}/logs` | Yes | Audit history |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::MinuteService;
