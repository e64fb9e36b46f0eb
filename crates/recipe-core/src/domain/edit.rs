use serde::{Deserialize, Serialize};

use super::recipe::{Recipe, fields};
use crate::ports::FieldMap;

/// Values of the "Post a Recipe" form. The picture is a source URL still to be uploaded.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDraft {
    pub title: String,
    pub picture: String,
    pub intro: Option<String>,
    pub ingredients: String,
    pub instructions: Option<String>,
    pub link: Option<String>,
}

impl RecipeDraft {
    /// The record to persist once the picture has been uploaded.
    pub fn into_recipe(self, picture_url: String, author: String) -> Recipe {
        Recipe {
            title: self.title,
            picture_url,
            intro: self.intro.unwrap_or_default(),
            ingredients: self.ingredients,
            instructions: self.instructions.unwrap_or_default(),
            link: self.link.unwrap_or_default(),
            author,
        }
    }
}

/// Values of the "Edit the Recipe" form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeEdit {
    pub title: String,
    /// New picture source; blank or absent keeps the stored picture.
    pub picture: Option<String>,
    pub intro: Option<String>,
    pub ingredients: String,
    pub instructions: Option<String>,
    pub link: Option<String>,
}

impl RecipeEdit {
    /// Edit form pre-filled from the stored record.
    pub fn prefilled(recipe: &Recipe) -> Self {
        Self {
            title: recipe.title.clone(),
            picture: None,
            intro: Some(recipe.intro.clone()),
            ingredients: recipe.ingredients.clone(),
            instructions: Some(recipe.instructions.clone()),
            link: Some(recipe.link.clone()),
        }
    }

    /// The picture source to upload, if one was supplied.
    pub fn new_picture(&self) -> Option<&str> {
        self.picture
            .as_deref()
            .map(str::trim)
            .filter(|source| !source.is_empty())
    }

    pub fn into_update(self, picture_url: Option<String>) -> RecipeUpdate {
        RecipeUpdate {
            title: self.title,
            picture_url,
            intro: self.intro.unwrap_or_default(),
            ingredients: self.ingredients,
            instructions: self.instructions.unwrap_or_default(),
            link: self.link.unwrap_or_default(),
        }
    }
}

/// A full-replacement update of every editable field.
///
/// Merge rule: `picture_url: None` retains the stored picture, every other
/// field replaces what is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeUpdate {
    pub title: String,
    pub picture_url: Option<String>,
    pub intro: String,
    pub ingredients: String,
    pub instructions: String,
    pub link: String,
}

impl RecipeUpdate {
    /// Field-map to merge into the store; `pictureUrl` is omitted when retained.
    pub fn to_fields(&self) -> FieldMap {
        let mut map = FieldMap::new();
        map.insert(fields::TITLE.into(), self.title.clone());
        if let Some(url) = &self.picture_url {
            map.insert(fields::PICTURE_URL.into(), url.clone());
        }
        map.insert(fields::INTRO.into(), self.intro.clone());
        map.insert(fields::INGREDIENTS.into(), self.ingredients.clone());
        map.insert(fields::INSTRUCTIONS.into(), self.instructions.clone());
        map.insert(fields::LINK.into(), self.link.clone());
        map
    }

    /// The record as it reads after the update is stored.
    pub fn apply_to(&self, recipe: &Recipe) -> Recipe {
        Recipe {
            title: self.title.clone(),
            picture_url: self
                .picture_url
                .clone()
                .unwrap_or_else(|| recipe.picture_url.clone()),
            intro: self.intro.clone(),
            ingredients: self.ingredients.clone(),
            instructions: self.instructions.clone(),
            link: self.link.clone(),
            author: recipe.author.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored() -> Recipe {
        Recipe {
            title: "Soup".into(),
            picture_url: "https://media/soup.png".into(),
            intro: "Serves 2".into(),
            ingredients: "Water\nSalt".into(),
            instructions: "Boil".into(),
            link: "https://example.com".into(),
            author: "t2_cook".into(),
        }
    }

    #[test]
    fn test_update_without_picture_omits_field() {
        let edit = RecipeEdit {
            title: "Better Soup".into(),
            picture: Some("   ".into()),
            ingredients: "Water\nSalt\nPepper".into(),
            ..Default::default()
        };
        assert_eq!(edit.new_picture(), None);

        let update = edit.into_update(None);
        let map = update.to_fields();
        assert!(!map.contains_key("pictureUrl"));
        assert_eq!(map["intro"], "");
        assert_eq!(map["instructions"], "");

        let merged = update.apply_to(&stored());
        assert_eq!(merged.picture_url, "https://media/soup.png");
        assert_eq!(merged.title, "Better Soup");
        assert_eq!(merged.author, "t2_cook");
        assert_eq!(merged.link, "");
    }

    #[test]
    fn test_update_with_picture_replaces() {
        let update = RecipeEdit {
            picture: Some("https://upload/new.png".into()),
            ..RecipeEdit::prefilled(&stored())
        }
        .into_update(Some("https://media/new.png".into()));

        assert_eq!(update.to_fields()["pictureUrl"], "https://media/new.png");
        assert_eq!(update.apply_to(&stored()).picture_url, "https://media/new.png");
    }

    #[test]
    fn test_prefilled_round_trip_keeps_record() {
        let recipe = stored();
        let merged = RecipeEdit::prefilled(&recipe)
            .into_update(None)
            .apply_to(&recipe);
        assert_eq!(merged, recipe);
    }
}
