//! Factory methods for creating test data.
//!
//! Factories insert rows with sensible defaults so tests only spell out the fields
//! they actually care about.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! // Member with a full birthday
//! let member = factory::create_member_with_birthday(&db, 2003, 1, 30).await?;
//!
//! // Member whose birthday has been unset
//! let member = factory::discord_member::DiscordMemberFactory::new(&db)
//!     .no_birthday()
//!     .build()
//!     .await?;
//! ```
//!
//! # Available Factories
//!
//! - `discord_member` - Create member records with or without birthdays
//! - `helpers` - Shared ID generation

pub mod discord_member;
pub mod helpers;

pub use discord_member::{create_member, create_member_with_birthday, create_member_without_year};
