pub mod memory;
pub mod profile;

pub use memory::InMemoryEntityStore;
pub use profile::PostgresEntityStore;
