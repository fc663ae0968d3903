use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorName(String);

impl AuthorName {
    pub fn new(raw: &str) -> Result<Self, AuthorNameEmptyError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            Err(AuthorNameEmptyError)
        } else {
            Ok(Self(trimmed.into()))
        }
    }

    pub fn new_unchecked(raw: &str) -> Self {
        Self(raw.into())
    }
}

impl std::fmt::Display for AuthorName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Error, Debug)]
#[error("Author name cannot be empty")]
pub struct AuthorNameEmptyError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorDescription(String);

impl AuthorDescription {
    pub fn new(raw: &str) -> Result<Self, AuthorDescriptionEmptyError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            Err(AuthorDescriptionEmptyError)
        } else {
            Ok(Self(trimmed.into()))
        }
    }

    pub fn new_unchecked(raw: &str) -> Self {
        Self(raw.into())
    }
}

impl std::fmt::Display for AuthorDescription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Error, Debug)]
#[error("Author description cannot be empty")]
pub struct AuthorDescriptionEmptyError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUrl(String);

impl ImageUrl {
    pub fn new(raw: &str) -> Result<Self, ImageUrlError> {
        let trimmed = raw.trim();
        if Self::is_valid(trimmed) {
            Ok(Self(trimmed.into()))
        } else {
            Err(ImageUrlError(trimmed.into()))
        }
    }

    pub fn new_unchecked(raw: &str) -> Self {
        Self(raw.into())
    }

    fn is_valid(s: &str) -> bool {
        static RE: LazyLock<Regex> =
            LazyLock::new(|| Regex::new(r"^https?://[^\s/?#]+[^\s]*$").unwrap());
        RE.is_match(s)
    }
}

impl std::fmt::Display for ImageUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Error, Debug)]
#[error("{0} is not a valid image URL")]
pub struct ImageUrlError(String);

/// Calendar date kept in the `YYYY-MM-DD` form the backend exchanges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BirthDate(String);

impl BirthDate {
    pub fn new(raw: &str) -> Result<Self, BirthDateError> {
        let trimmed = raw.trim();
        if Self::is_valid(trimmed) {
            Ok(Self(trimmed.into()))
        } else {
            Err(BirthDateError(trimmed.into()))
        }
    }

    pub fn new_unchecked(raw: &str) -> Self {
        Self(raw.into())
    }

    fn is_valid(s: &str) -> bool {
        static RE: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^[0-9]{4}-(0[1-9]|1[0-2])-(0[1-9]|[12][0-9]|3[01])$").unwrap()
        });
        RE.is_match(s)
    }
}

impl std::fmt::Display for BirthDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Error, Debug)]
#[error("{0} is not a valid birth date, expected YYYY-MM-DD")]
pub struct BirthDateError(String);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    id: i64,
    name: AuthorName,
    description: AuthorDescription,
    image: ImageUrl,
    birth_date: BirthDate,
}

impl Author {
    pub const fn new(
        id: i64,
        name: AuthorName,
        description: AuthorDescription,
        image: ImageUrl,
        birth_date: BirthDate,
    ) -> Self {
        Self {
            id,
            name,
            description,
            image,
            birth_date,
        }
    }

    pub const fn id(&self) -> i64 {
        self.id
    }

    pub const fn name(&self) -> &AuthorName {
        &self.name
    }

    pub const fn description(&self) -> &AuthorDescription {
        &self.description
    }

    pub const fn image(&self) -> &ImageUrl {
        &self.image
    }

    pub const fn birth_date(&self) -> &BirthDate {
        &self.birth_date
    }
}

impl std::fmt::Display for Author {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "#{} {}", self.id, self.name)?;
        writeln!(f, "    {}", self.description)?;
        writeln!(f, "    Born: {}", self.birth_date)?;
        write!(f, "    Image: {}", self.image)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorForm {
    name: AuthorName,
    description: AuthorDescription,
    image: ImageUrl,
    birth_date: BirthDate,
}

impl AuthorForm {
    pub const fn new(
        name: AuthorName,
        description: AuthorDescription,
        image: ImageUrl,
        birth_date: BirthDate,
    ) -> Self {
        Self {
            name,
            description,
            image,
            birth_date,
        }
    }

    pub fn parse(
        name: &str,
        description: &str,
        image: &str,
        birth_date: &str,
    ) -> Result<Self, ParseAuthorFormError> {
        Ok(Self::new(
            AuthorName::new(name)?,
            AuthorDescription::new(description)?,
            ImageUrl::new(image)?,
            BirthDate::new(birth_date)?,
        ))
    }

    pub const fn name(&self) -> &AuthorName {
        &self.name
    }

    pub const fn description(&self) -> &AuthorDescription {
        &self.description
    }

    pub const fn image(&self) -> &ImageUrl {
        &self.image
    }

    pub const fn birth_date(&self) -> &BirthDate {
        &self.birth_date
    }
}

#[derive(Error, Debug)]
pub enum ParseAuthorFormError {
    #[error(transparent)]
    Name(#[from] AuthorNameEmptyError),
    #[error(transparent)]
    Description(#[from] AuthorDescriptionEmptyError),
    #[error(transparent)]
    Image(#[from] ImageUrlError),
    #[error(transparent)]
    BirthDate(#[from] BirthDateError),
}

#[derive(Debug)]
pub struct CreateAuthorRequest {
    form: AuthorForm,
}

impl CreateAuthorRequest {
    pub const fn new(form: AuthorForm) -> Self {
        Self { form }
    }

    pub const fn form(&self) -> &AuthorForm {
        &self.form
    }
}

#[derive(Error, Debug)]
pub enum CreateAuthorError {
    #[error("Backend rejected author \"{name}\" with status {status}")]
    Rejected { name: String, status: u16 },
    #[error(transparent)]
    Other(anyhow::Error),
}

#[derive(Debug)]
pub struct FindAuthorRequest {
    id: i64,
}

impl FindAuthorRequest {
    pub const fn new(id: i64) -> Self {
        Self { id }
    }

    pub const fn id(&self) -> i64 {
        self.id
    }
}

#[derive(Error, Debug)]
pub enum FindAuthorError {
    #[error("Author with id \"{id}\" does not exist")]
    NotFound { id: i64 },
    #[error(transparent)]
    Other(anyhow::Error),
}

#[derive(Error, Debug)]
#[error(transparent)]
pub struct FindAllAuthorsError(#[from] pub anyhow::Error);

#[derive(Debug)]
pub struct UpdateAuthorRequest {
    id: i64,
    form: AuthorForm,
}

impl UpdateAuthorRequest {
    pub const fn new(id: i64, form: AuthorForm) -> Self {
        Self { id, form }
    }

    pub const fn id(&self) -> i64 {
        self.id
    }

    pub const fn form(&self) -> &AuthorForm {
        &self.form
    }
}

#[derive(Error, Debug)]
pub enum UpdateAuthorError {
    #[error("Author with id \"{id}\" does not exist")]
    NotFound { id: i64 },
    #[error("Backend rejected update of author \"{id}\" with status {status}")]
    Rejected { id: i64, status: u16 },
    #[error(transparent)]
    Other(anyhow::Error),
}

#[derive(Debug)]
pub struct DeleteAuthorRequest {
    id: i64,
}

impl DeleteAuthorRequest {
    pub const fn new(id: i64) -> Self {
        Self { id }
    }

    pub const fn id(&self) -> i64 {
        self.id
    }
}

#[derive(Error, Debug)]
pub enum DeleteAuthorError {
    #[error("Backend refused to delete author \"{id}\" with status {status}")]
    Rejected { id: i64, status: u16 },
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[derive(Error, Debug)]
#[error(transparent)]
pub struct HiddenStoreError(#[from] pub anyhow::Error);
