//! shelfwise library
//!
//! Client for a remote book catalog and order API. Orders are cached in
//! memory and served in pages; the CLI module wraps the client for the binary.

pub mod cache;
pub mod cli;
pub mod client;
pub mod config;
pub mod data;
pub mod paging;

pub use client::{LibraryClient, LibraryError};
pub use paging::PagedList;
