//! # Route Table
//!
//! Bidirectional index of resolved routes: `path → entry` and
//! `handler type → entry (or entries)`.
//!
//! Entries are stored as `Arc<PageEntry>` so a resolved entry can be handed
//! to callers without copying and without holding any lock.
//!
//! ## Insert Rule
//!
//! Declared entries (explicit routes and the built-in pages) always win over
//! inferred entries (automapped and excluded). An inferred entry never
//! overwrites an existing path, and the first declaration of a path is kept.
//! The type index only changes when the path index accepts the entry, so the
//! two indices never disagree.

mod core;
mod entry;
#[cfg(test)]
mod tests;

pub use self::core::{RouteTable, TypeBinding};
pub use entry::{normalize_path, Origin, PageEntry};
