//! Folders: owned containers for notes, nestable under a parent folder.
//!
//! Deleting a folder removes its descendant folders; notes inside them
//! survive with no folder.
mod dto;
mod folder;
pub mod handlers;
mod repository;
mod store;

pub use dto::*;
pub use folder::*;
pub use store::*;
