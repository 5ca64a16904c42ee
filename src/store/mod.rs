pub mod cats;
pub mod missions;
pub mod schema_gen;
pub mod sqlite;
pub mod targets;

pub use missions::Assignment;
pub use sqlite::Store;
