//! Database models, schema, and record stores

pub mod init;
pub mod memory;
pub mod models;
pub mod repository;
pub mod sqlite;

pub use init::{connect_in_memory, create_schema, init_database, reset_schema};
pub use memory::InMemoryRepository;
pub use models::{team_key, Match, Winner};
pub use repository::Repository;
pub use sqlite::SqliteRepository;
