//! Storage-backed implementations of `UserStore`.

pub mod seaorm;
