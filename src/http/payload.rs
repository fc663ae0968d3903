use crate::models::{Author, AuthorDescription, AuthorForm, AuthorName, BirthDate, ImageUrl};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorHttpResponse {
    id: i64,
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    birth_date: Option<String>,
}

impl From<AuthorHttpResponse> for Author {
    fn from(value: AuthorHttpResponse) -> Self {
        Self::new(
            value.id,
            AuthorName::new_unchecked(&value.name),
            AuthorDescription::new_unchecked(&value.description.unwrap_or_default()),
            ImageUrl::new_unchecked(&value.image.unwrap_or_default()),
            BirthDate::new_unchecked(&value.birth_date.unwrap_or_default()),
        )
    }
}

/// Body of both the create and the update calls.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorHttpRequest {
    name: String,
    description: String,
    image: String,
    birth_date: String,
}

impl From<&AuthorForm> for AuthorHttpRequest {
    fn from(value: &AuthorForm) -> Self {
        Self {
            name: value.name().to_string(),
            description: value.description().to_string(),
            image: value.image().to_string(),
            birth_date: value.birth_date().to_string(),
        }
    }
}
