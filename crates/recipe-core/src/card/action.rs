use serde::{Deserialize, Serialize};

use crate::domain::RecipeEdit;

/// A paginated list on the card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageDimension {
    Ingredients,
    Instructions,
}

impl PageDimension {
    /// Lines shown per page.
    pub const fn page_size(self) -> usize {
        match self {
            PageDimension::Ingredients => 10,
            PageDimension::Instructions => 8,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageDelta {
    Previous,
    Next,
}

/// User input on the card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum CardAction {
    ToggleView,
    ToggleMenu,
    OpenMenu,
    /// Tap on the backdrop behind an open menu.
    DismissMenu,
    Paginate {
        dimension: PageDimension,
        delta: PageDelta,
    },
    AcknowledgeStep {
        index: usize,
    },
    Save,
    Unsave,
    OpenLink,
    Edit,
    New,
}

/// Side effects requested by a transition; run outside the reducer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    SetSaveFlag,
    ClearSaveFlag,
    SubmitComment(String),
    Navigate(String),
    ShowForm(FormPrompt),
}

/// A form the host should present to the viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "form", rename_all = "snake_case")]
pub enum FormPrompt {
    /// "Post a Recipe".
    Create,
    /// "Edit the Recipe", pre-filled.
    Edit { defaults: RecipeEditDefaults },
}

/// Pre-filled values of the edit form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeEditDefaults {
    pub title: String,
    pub intro: String,
    pub ingredients: String,
    pub instructions: String,
    pub link: String,
}

impl From<RecipeEdit> for RecipeEditDefaults {
    fn from(edit: RecipeEdit) -> Self {
        Self {
            title: edit.title,
            intro: edit.intro.unwrap_or_default(),
            ingredients: edit.ingredients,
            instructions: edit.instructions.unwrap_or_default(),
            link: edit.link.unwrap_or_default(),
        }
    }
}
