//! Caching for derived view data.

mod row_cache;

pub use row_cache::RowCache;
