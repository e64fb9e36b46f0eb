//! Domain entities - the persisted recipe and the form payloads that change it.

mod edit;
mod recipe;
mod transcript;

pub use edit::{RecipeDraft, RecipeEdit, RecipeUpdate};
pub use recipe::{Recipe, fields, split_lines};
pub use transcript::transcript;
