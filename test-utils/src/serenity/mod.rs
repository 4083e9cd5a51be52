//! Test factories for creating Serenity API objects.
//!
//! These factories create valid Serenity structs by deserializing JSON, simulating
//! what Discord's API would return.
//!
//! # Available Factories
//!
//! - `member::create_test_member` - Create Serenity Member objects

pub mod member;
mod user;

pub use member::create_test_member;
