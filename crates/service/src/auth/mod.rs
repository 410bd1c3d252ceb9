//! Auth module: three-layer architecture (domain, repository, service).
//!
//! Password hashing and verification live beside the flows as plain
//! functions; the store and token issuer are collaborators behind traits.

pub mod domain;
pub mod errors;
pub mod hasher;
pub mod verifier;
pub mod repository;
pub mod token;
pub mod service;
pub mod repo;

pub use errors::AuthError;
pub use service::AuthService;
