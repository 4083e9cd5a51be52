//! Domain models shared by the data, service, and bot layers.
//!
//! Entity models from the `entity` crate are converted into these types at the
//! repository boundary so that the rest of the bot never deals with nullable
//! columns or placeholder years directly.

pub mod birthday;
pub mod game;
pub mod interaction;
pub mod member;
