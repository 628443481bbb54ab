#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Level data model, persistence and validation for Pushbox.
//!
//! A [`LevelModel`] is what the editor mutates and what the game consumes
//! when a playthrough starts. The [`codec`] module converts it to and from
//! its persisted JSON form and the [`validator`] module checks it against the
//! playability rules that gate saving and playing.

pub mod codec;
mod model;
pub mod validator;

pub use codec::ParseError;
pub use model::{LevelModel, OutOfRange};
pub use validator::Violation;

/// Decodes a level from its persisted text.
pub fn import_level(text: &str) -> Result<LevelModel, ParseError> {
    codec::decode(text)
}

/// Encodes a level into its persisted text.
#[must_use]
pub fn export_level(level: &LevelModel) -> String {
    codec::encode(level)
}

/// Checks a level against the playability rules, reporting the first rule it
/// breaks.
pub fn validate_level(level: &LevelModel) -> Result<(), Violation> {
    validator::validate(level)
}
