//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod menu;
mod resolver;

pub use menu::{MenuNode, PermissionKind};
pub use resolver::{filter_visible, find_open_ancestor_chain, resolve_flag};
