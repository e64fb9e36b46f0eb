//! The recipe card: per-session state, its reducer, and the pure renderer.

mod action;
mod pagination;
mod render;
mod state;
mod view;

pub use action::{CardAction, Effect, FormPrompt, PageDelta, PageDimension, RecipeEditDefaults};
pub use pagination::{can_go_back, can_go_forward, page_range};
pub use render::{
    CardLoad, format_ingredients, format_instructions, loading_preview, render_card,
};
pub use state::{ActiveView, CardContext, CardState, SAVED_COMMENT, Transition, reduce};
pub use view::{Icon, Node, ResizeMode, TextStyle};
