//! Service layer for account credentials.
//! - `auth` holds registration/login business rules independent of transport.
//! - Storage and token issuing are reached through traits so adapters stay swappable.

pub mod auth;
#[cfg(test)]
pub mod test_support;
