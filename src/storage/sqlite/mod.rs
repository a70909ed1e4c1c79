mod migration;
#[allow(clippy::module_inception)]
mod sqlite;

pub use sqlite::Sqlite;
