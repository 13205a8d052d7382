//! Cell (small group) management.
//!
//! Cells carry a street address and optional coordinates. The address is
//! resolved from a postal code through a cascading geocoder: ViaCEP for
//! the street address, then Geoapify (when a key is configured) and
//! Nominatim for coordinates, with manual map placement as the final
//! fallback.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/cells` | Yes | List cells with leaders and member counts |
//! | POST | `/api/cells` | Leader | Create a cell |
//! | GET | `/api/cells/resolve-address` | Leader | Resolve a CEP to address + coordinates |
//! | GET | `/api/cells/{id}` | Yes | Cell details |
//! | PUT | `/api/cells/{id}` | Leader | Update a cell |
//! | DELETE | `/api/cells/{id}` | Admin | Delete a cell |
//! | PUT | `/api/cells/{id}/location` | Leader | Save manual coordinates |
//! | GET | `/api/cells/{id}/members` | Yes | List members |
//! | POST | `/api/cells/{id}/members` | Leader | Add a member |
//! | DELETE | `/api/cells/{id}/members/{member_id}` | Leader | Remove a member |
//! | GET | `/api/cells/{id}/meetings` | Yes | List meetings with attendance |
//! | POST | `/api/cells/{id}/meetings` | Leader | Register a meeting |
//! | PUT | `/api/cells/meetings/{meeting_id}/attendance` | Leader | Upsert attendance |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::{AddressResolver, CellService};
