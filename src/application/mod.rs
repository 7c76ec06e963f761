//! Application layer services implementing business logic.
//!
//! Services consume the [`crate::domain::MappingStore`] trait and expose a
//! small API to HTTP handlers and the admin CLI. Neither service holds
//! in-process state; both are shared behind `Arc`.
//!
//! # Available Services
//!
//! - [`services::code_allocator::CodeAllocator`] - Custom and random short code allocation
//! - [`services::redirect_resolver::RedirectResolver`] - Short code lookup

pub mod services;
