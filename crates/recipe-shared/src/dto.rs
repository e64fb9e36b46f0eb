//! Data Transfer Objects - form payloads and responses.

use serde::{Deserialize, Serialize};
use url::Url;

/// "Post a Recipe" form submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRecipeRequest {
    pub title: String,
    /// Source URL of the picture to upload.
    pub picture: String,
    #[serde(default)]
    pub intro: Option<String>,
    pub ingredients: String,
    #[serde(default)]
    pub instructions: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
}

impl CreateRecipeRequest {
    /// Field errors, empty when the form is acceptable.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        require("title", &self.title, &mut errors);
        require("ingredients", &self.ingredients, &mut errors);
        if self.picture.trim().is_empty() {
            errors.push("picture is required".to_string());
        } else {
            check_url("picture", &self.picture, &mut errors);
        }
        if let Some(link) = non_blank(&self.link) {
            check_url("link", link, &mut errors);
        }
        errors
    }
}

/// "Edit the Recipe" form submission. A blank picture keeps the current one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRecipeRequest {
    pub title: String,
    #[serde(default)]
    pub picture: Option<String>,
    #[serde(default)]
    pub intro: Option<String>,
    pub ingredients: String,
    #[serde(default)]
    pub instructions: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
}

impl UpdateRecipeRequest {
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        require("title", &self.title, &mut errors);
        require("ingredients", &self.ingredients, &mut errors);
        if let Some(picture) = non_blank(&self.picture) {
            check_url("picture", picture, &mut errors);
        }
        if let Some(link) = non_blank(&self.link) {
            check_url("link", link, &mut errors);
        }
        errors
    }
}

fn require(field: &str, value: &str, errors: &mut Vec<String>) {
    if value.trim().is_empty() {
        errors.push(format!("{field} is required"));
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

fn check_url(field: &str, value: &str, errors: &mut Vec<String>) {
    match Url::parse(value.trim()) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        _ => errors.push(format!("{field} must be an http(s) URL")),
    }
}

/// Response to a successful create.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedRecipeResponse {
    pub post_id: String,
}

/// A stored recipe.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeResponse {
    pub post_id: String,
    pub title: String,
    pub picture_url: String,
    pub intro: String,
    pub ingredients: String,
    pub instructions: String,
    pub link: String,
    pub author: String,
}

/// The rendered card after mount or an action.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    /// Node tree to display.
    pub view: serde_json::Value,
    /// Form the client should open.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<serde_json::Value>,
    /// URLs the client should open.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub navigate_to: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create() -> CreateRecipeRequest {
        CreateRecipeRequest {
            title: "Soup".into(),
            picture: "http://x/y.png".into(),
            intro: None,
            ingredients: "Water\nSalt".into(),
            instructions: None,
            link: None,
        }
    }

    #[test]
    fn test_valid_create() {
        assert!(create().validate().is_empty());
    }

    #[test]
    fn test_create_requires_fields() {
        let req = CreateRecipeRequest {
            title: " ".into(),
            picture: String::new(),
            ingredients: String::new(),
            ..create()
        };
        assert_eq!(
            req.validate(),
            vec![
                "title is required",
                "ingredients is required",
                "picture is required"
            ]
        );
    }

    #[test]
    fn test_bad_urls() {
        let req = CreateRecipeRequest {
            picture: "javascript:alert(1)".into(),
            link: Some("not a link".into()),
            ..create()
        };
        assert_eq!(req.validate().len(), 2);
    }

    #[test]
    fn test_update_blank_picture_is_fine() {
        let req: UpdateRecipeRequest = serde_json::from_value(serde_json::json!({
            "title": "Soup",
            "picture": "",
            "ingredients": "Water"
        }))
        .unwrap();
        assert!(req.validate().is_empty());
        assert_eq!(req.intro, None);
    }
}
