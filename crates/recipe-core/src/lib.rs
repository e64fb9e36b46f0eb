//! # Recipe Core
//!
//! The domain layer of the recipe card.
//! Records, the card state machine and its renderer are pure; services talk to
//! the outside world only through the traits in [`ports`].

pub mod card;
pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use error::RecipeError;
