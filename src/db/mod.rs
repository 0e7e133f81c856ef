//! Database module: pool, schema, readiness and per-table storage.
//!
//! Layout:
//! - `pool.rs`: lazy `AnyPool` construction and the SQL dialect in use
//! - `schema.rs`: DDL for `usuarios` and `grupos` (MariaDB and SQLite)
//! - `readiness.rs`: startup gate polling the database until it answers
//! - `models.rs`: records and request payloads
//! - `entity.rs`: table descriptions driving the generic CRUD code
//! - `storage.rs`: one-statement-per-call CRUD over a table

pub mod entity;
pub mod models;
pub mod pool;
pub mod readiness;
pub mod schema;
pub mod storage;

pub use entity::Entity;
pub use models::{Group, GroupPayload, Person, PersonPayload};
pub use pool::{Dialect, connect_lazy};
pub use readiness::{ReadinessPolicy, wait_for_database, wait_for_database_with};
pub use schema::init_schema;
pub use storage::Storage;
