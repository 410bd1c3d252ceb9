//! Shared building blocks for the account workspace: logging bootstrap and
//! small wire types reused by the binaries and the HTTP layer.

pub mod types;
pub mod utils;
