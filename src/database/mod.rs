pub mod manager;
pub mod memory;
pub mod postgres;
pub mod store;

pub use manager::{DatabaseError, DatabaseManager};
pub use memory::{Fixture, MemoryStore};
pub use postgres::PgDocStore;
pub use store::{DocStore, Record, VIEW_SETTINGS_DOCTYPE};
