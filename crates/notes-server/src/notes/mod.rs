//! Notes: owned text documents, optionally filed in a folder.
mod dto;
pub mod handlers;
mod note;
mod repository;
mod store;

pub use dto::*;
pub use note::*;
pub use store::*;
