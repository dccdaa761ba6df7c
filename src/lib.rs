//! Teaching REST API over seeded in-memory collections.
//!
//! The service exposes a student roster and a user list, each seeded with
//! fixed records at startup and held in process memory:
//!
//! ```text
//! GET  /students        {total, data}
//! GET  /student/{id}    record | 404 {error: "student not found"}
//! POST /student         ack    | 400 when name is missing
//! PUT  /student         ack
//! GET  /users           [records]
//! GET  /user/{id}       record | 404 {error: "user not found"}
//! POST /user            201 {user} | 400 missing field / duplicate email
//! ```
//!
//! By default create/update requests are validated and echoed but never
//! stored. Setting `WRITE_MODE=persist` makes them go through the repository.
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`store`]: Repository trait and the in-memory collection
//! - [`models`]: Records, payloads and seed data
//! - [`roster`]: Lookup and write operations over the collections
//! - [`api`]: HTTP router, handlers and OpenAPI document
//! - [`metrics`]: Prometheus metrics
//! - [`utils`]: Utility functions

pub mod api;
pub mod config;
pub mod error;
pub mod metrics;
pub mod models;
pub mod roster;
pub mod store;
pub mod utils;

pub use config::{Config, WriteMode};
pub use error::{ApiError, Result, ServiceError};
