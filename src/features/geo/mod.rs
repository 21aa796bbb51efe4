//! Turkey administrative hierarchy feature.
//!
//! Serves read-only reference data for provinces, districts, neighborhoods,
//! villages and towns, loaded once from static JSON files and indexed in
//! memory.
//!
//! ## Data Hierarchy
//!
//! - Level 1: Provinces (il) - 81 records, ids follow license-plate codes
//! - Level 2: Districts (ilce)
//! - Level 3: Neighborhoods (mahalle), Villages (koy) and Towns (belde),
//!   three sibling collections under districts
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/v1/provinces` | List provinces with filters |
//! | GET | `/api/v1/provinces/{id}` | Get province by id, optionally extended |
//! | GET | `/api/v1/districts` | List districts with filters |
//! | GET | `/api/v1/districts/{id}` | Get district by id, optionally extended |
//! | GET | `/api/v1/neighborhoods` | List neighborhoods with filters |
//! | GET | `/api/v1/neighborhoods/{id}` | Get neighborhood by id |
//! | GET | `/api/v1/villages` | List villages with filters |
//! | GET | `/api/v1/villages/{id}` | Get village by id |
//! | GET | `/api/v1/towns` | List towns with filters |
//! | GET | `/api/v1/towns/{id}` | Get town by id |

pub mod datastore;
pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use datastore::DataStore;
