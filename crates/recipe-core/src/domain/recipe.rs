use serde::{Deserialize, Serialize};

use crate::ports::FieldMap;

/// Field names of the persisted record.
pub mod fields {
    pub const TITLE: &str = "title";
    pub const PICTURE_URL: &str = "pictureUrl";
    pub const INTRO: &str = "intro";
    pub const INGREDIENTS: &str = "ingredients";
    pub const INSTRUCTIONS: &str = "instructions";
    pub const LINK: &str = "link";
    pub const AUTHOR: &str = "author";

    /// Picture field written by the first revision of the card.
    pub const LEGACY_PICTURE: &str = "picture";
}

/// Recipe entity - the canonical persisted fields of one post.
///
/// Absent fields read back as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub title: String,
    pub picture_url: String,
    pub intro: String,
    pub ingredients: String,
    pub instructions: String,
    pub link: String,
    pub author: String,
}

impl Recipe {
    /// Build a recipe from a stored field-map.
    pub fn from_fields(map: &FieldMap) -> Self {
        let get = |name: &str| map.get(name).cloned().unwrap_or_default();

        let picture_url = map
            .get(fields::PICTURE_URL)
            .or_else(|| map.get(fields::LEGACY_PICTURE))
            .cloned()
            .unwrap_or_default();

        Self {
            title: get(fields::TITLE),
            picture_url,
            intro: get(fields::INTRO),
            ingredients: get(fields::INGREDIENTS),
            instructions: get(fields::INSTRUCTIONS),
            link: get(fields::LINK),
            author: get(fields::AUTHOR),
        }
    }

    /// Full field-map, every field present.
    pub fn to_fields(&self) -> FieldMap {
        [
            (fields::TITLE, &self.title),
            (fields::PICTURE_URL, &self.picture_url),
            (fields::INTRO, &self.intro),
            (fields::INGREDIENTS, &self.ingredients),
            (fields::INSTRUCTIONS, &self.instructions),
            (fields::LINK, &self.link),
            (fields::AUTHOR, &self.author),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
    }

    pub fn ingredient_lines(&self) -> Vec<&str> {
        split_lines(&self.ingredients)
    }

    pub fn instruction_lines(&self) -> Vec<&str> {
        split_lines(&self.instructions)
    }

    /// Whether `viewer` created this recipe.
    pub fn is_author(&self, viewer: Option<&str>) -> bool {
        match viewer {
            Some(id) => !self.author.is_empty() && self.author == id,
            None => false,
        }
    }
}

/// Split newline-delimited text into lines. Empty text has no lines.
pub fn split_lines(text: &str) -> Vec<&str> {
    if text.is_empty() {
        return Vec::new();
    }
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect()
}
