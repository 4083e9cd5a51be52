//! Service layer for business logic and orchestration.
//!
//! Services sit between the bot handlers and the data layer. They work with domain
//! models, keep Discord API calls out of the repositories, and hold the pure logic
//! (ranking, game state, row matching) that the handlers drive.

pub mod birthday;
pub mod game;
pub mod guild;
pub mod onboarding;
pub mod registration;
pub mod verification;
