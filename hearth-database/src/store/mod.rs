mod memory;
mod postgres;

pub use memory::MemoryPlayerStore;
pub(crate) use postgres::PgPlayerStore;
