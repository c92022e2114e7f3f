//! Service layer for the course recommendation backend.
//!
//! This crate wires the catalog, the candidate sources and the ranking
//! pipeline behind two services:
//! - [`AccountService`]: registration, login, token verification, profile
//! - [`CourseService`]: search, enrollment lifecycle, progress summary and
//!   recommendations
//!
//! Storage and identity are reached through traits ([`CourseStore`],
//! [`IdentityProvider`], [`CredentialHasher`]); [`MemoryStore`] is the
//! bundled store, backed by a JSON data directory.

pub mod accounts;
pub mod config;
pub mod error;
pub mod identity;
pub mod service;
pub mod store;

pub use accounts::{AccountService, ProfileView, RegisterRequest};
pub use config::{Config, QuizThresholds};
pub use error::{Result, ServiceError};
pub use identity::{CredentialHasher, IdentityProvider};
pub use service::{CourseService, EnrollOutcome, Recommendation};
pub use store::{CourseStore, MemoryStore};
