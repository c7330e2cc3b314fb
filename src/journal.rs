//! The memory journal: `posts` and `photos` collections backed by TOML
//! documents under the data directory.
//!
//! Reads load a whole collection in file order; writes append one record by
//! read-modify-rewrite, and the caller reloads its full state afterwards. A
//! failed read is logged and the collection defaults to empty.

mod model;
mod store;

pub use model::{Photo, Post, format_post_date};
pub use store::JournalStore;

#[cfg(test)]
mod tests;
