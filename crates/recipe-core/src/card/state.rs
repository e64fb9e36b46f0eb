//! Card state and its reducer.
//!
//! The state is a set of independent toggles; every combination is legal.
//! [`reduce`] is pure: it returns the next state plus the effects the caller
//! must run, and never touches the store itself.

use serde::Serialize;

use super::action::{CardAction, Effect, FormPrompt, PageDelta, PageDimension};
use super::pagination::{can_go_back, can_go_forward};
use crate::domain::{Recipe, RecipeEdit};

/// Text of the comment posted when a viewer saves the recipe.
pub const SAVED_COMMENT: &str = "I saved this recipe!";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActiveView {
    #[default]
    Picture,
    Instructions,
}

impl ActiveView {
    pub fn toggled(self) -> Self {
        match self {
            ActiveView::Picture => ActiveView::Instructions,
            ActiveView::Instructions => ActiveView::Picture,
        }
    }
}

/// Ephemeral per-session card state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardState {
    pub active_view: ActiveView,
    pub menu_open: bool,
    /// Optimistic mirror of the viewer's save flag.
    pub saved: bool,
    pub ingredients_page: usize,
    pub instructions_page: usize,
    /// One mark per instruction line, sized at mount.
    pub acknowledged_steps: Vec<bool>,
}

impl CardState {
    /// Fresh state for a newly mounted card.
    pub fn new(recipe: &Recipe, saved: bool) -> Self {
        Self {
            active_view: ActiveView::default(),
            menu_open: false,
            saved,
            ingredients_page: 0,
            instructions_page: 0,
            acknowledged_steps: vec![false; recipe.instruction_lines().len()],
        }
    }

    pub fn page(&self, dimension: PageDimension) -> usize {
        match dimension {
            PageDimension::Ingredients => self.ingredients_page,
            PageDimension::Instructions => self.instructions_page,
        }
    }

    fn page_mut(&mut self, dimension: PageDimension) -> &mut usize {
        match dimension {
            PageDimension::Ingredients => &mut self.ingredients_page,
            PageDimension::Instructions => &mut self.instructions_page,
        }
    }

    pub fn is_acknowledged(&self, index: usize) -> bool {
        self.acknowledged_steps.get(index).copied().unwrap_or(false)
    }
}

/// Read-only inputs a transition may consult.
#[derive(Debug, Clone, Copy)]
pub struct CardContext<'a> {
    pub recipe: &'a Recipe,
    /// Signed-in viewer, `None` when anonymous.
    pub viewer: Option<&'a str>,
}

impl CardContext<'_> {
    pub fn total_lines(&self, dimension: PageDimension) -> usize {
        match dimension {
            PageDimension::Ingredients => self.recipe.ingredient_lines().len(),
            PageDimension::Instructions => self.recipe.instruction_lines().len(),
        }
    }

    pub fn can_paginate(&self, state: &CardState, dimension: PageDimension, delta: PageDelta) -> bool {
        let page = state.page(dimension);
        match delta {
            PageDelta::Previous => can_go_back(page),
            PageDelta::Next => {
                can_go_forward(page, dimension.page_size(), self.total_lines(dimension))
            }
        }
    }
}

/// Result of applying one action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: CardState,
    pub effects: Vec<Effect>,
}

impl Transition {
    fn unchanged(state: &CardState) -> Self {
        Self {
            state: state.clone(),
            effects: Vec::new(),
        }
    }
}

/// Apply `action` to `state`.
pub fn reduce(state: &CardState, action: &CardAction, ctx: &CardContext<'_>) -> Transition {
    let mut next = state.clone();
    let mut effects = Vec::new();

    match action {
        CardAction::ToggleView => next.active_view = state.active_view.toggled(),
        CardAction::ToggleMenu => next.menu_open = !state.menu_open,
        CardAction::OpenMenu => next.menu_open = true,
        CardAction::DismissMenu => next.menu_open = false,
        CardAction::Paginate { dimension, delta } => {
            if !ctx.can_paginate(state, *dimension, *delta) {
                tracing::debug!(?dimension, ?delta, page = state.page(*dimension), "Pagination out of range");
                return Transition::unchanged(state);
            }
            let page = next.page_mut(*dimension);
            match delta {
                PageDelta::Previous => *page -= 1,
                PageDelta::Next => *page += 1,
            }
        }
        CardAction::AcknowledgeStep { index } => match next.acknowledged_steps.get_mut(*index) {
            Some(mark) => *mark = !*mark,
            None => return Transition::unchanged(state),
        },
        CardAction::Save => {
            if state.saved || ctx.viewer.is_none() {
                return Transition::unchanged(state);
            }
            next.saved = true;
            next.menu_open = false;
            effects.push(Effect::SetSaveFlag);
            effects.push(Effect::SubmitComment(SAVED_COMMENT.to_string()));
        }
        CardAction::Unsave => {
            if !state.saved || ctx.viewer.is_none() {
                return Transition::unchanged(state);
            }
            next.saved = false;
            next.menu_open = false;
            effects.push(Effect::ClearSaveFlag);
        }
        CardAction::OpenLink => {
            if ctx.recipe.link.is_empty() {
                return Transition::unchanged(state);
            }
            effects.push(Effect::Navigate(ctx.recipe.link.clone()));
        }
        CardAction::Edit => {
            if !ctx.recipe.is_author(ctx.viewer) {
                tracing::debug!(viewer = ?ctx.viewer, "Edit requested by non-author");
                return Transition::unchanged(state);
            }
            next.menu_open = false;
            effects.push(Effect::ShowForm(FormPrompt::Edit {
                defaults: RecipeEdit::prefilled(ctx.recipe).into(),
            }));
        }
        CardAction::New => {
            next.menu_open = false;
            effects.push(Effect::ShowForm(FormPrompt::Create));
        }
    }

    Transition {
        state: next,
        effects,
    }
}
