use crate::models::{
    Author, AuthorForm, CreateAuthorError, CreateAuthorRequest, DeleteAuthorError,
    DeleteAuthorRequest, FindAllAuthorsError, FindAuthorError, FindAuthorRequest,
    UpdateAuthorError, UpdateAuthorRequest,
};
use crate::repositories::{AuthorRepository, HiddenAuthorStore};
use std::collections::BTreeSet;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    LoadFailed,
    MutationFailed,
}

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Failed to load authors")]
    LoadAuthors(#[source] FindAllAuthorsError),
    #[error("Failed to load author")]
    LoadAuthor(#[source] FindAuthorError),
    #[error("Failed to create author")]
    Create(#[source] CreateAuthorError),
    #[error("Failed to update author")]
    Update(#[source] UpdateAuthorError),
}

impl RegistryError {
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::LoadAuthors(_) | Self::LoadAuthor(_) => ErrorKind::LoadFailed,
            Self::Create(_) | Self::Update(_) => ErrorKind::MutationFailed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HideReason {
    Rejected { status: u16 },
    Unreachable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted { id: i64 },
    Hidden { id: i64, reason: HideReason },
}

impl std::fmt::Display for DeleteOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Deleted { id } => write!(f, "Author {id} deleted."),
            Self::Hidden {
                reason: HideReason::Rejected { .. },
                ..
            } => f.write_str(
                "This author has related records and could not be deleted. \
                 It was hidden from the list instead.",
            ),
            Self::Hidden {
                reason: HideReason::Unreachable,
                ..
            } => f.write_str("Failed to delete author. It was hidden from the list instead."),
        }
    }
}

#[derive(Debug)]
pub struct AuthorRegistry<AR, HS> {
    author_repo: AR,
    hidden_store: HS,
    authors: Vec<Author>,
    hidden_ids: BTreeSet<i64>,
}

impl<AR: AuthorRepository, HS: HiddenAuthorStore> AuthorRegistry<AR, HS> {
    pub const fn new(author_repo: AR, hidden_store: HS) -> Self {
        Self {
            author_repo,
            hidden_store,
            authors: Vec::new(),
            hidden_ids: BTreeSet::new(),
        }
    }

    /// On failure the previously loaded collection is discarded.
    pub async fn load(&mut self) -> Result<Vec<&Author>, RegistryError> {
        self.load_hidden().await;

        match self.author_repo.find_all_authors().await {
            Ok(authors) => {
                tracing::debug!(
                    total = authors.len(),
                    hidden = self.hidden_ids.len(),
                    "Loaded authors"
                );
                self.authors = authors;
                Ok(self.visible())
            }
            Err(err) => {
                tracing::warn!(error = %err, "Loading authors failed");
                self.authors.clear();
                Err(RegistryError::LoadAuthors(err))
            }
        }
    }

    pub async fn load_hidden(&mut self) -> &BTreeSet<i64> {
        self.hidden_ids = match self.hidden_store.read().await {
            Ok(ids) => ids.into_iter().collect(),
            Err(err) => {
                tracing::warn!(error = %err, "Could not read hidden authors, showing all");
                BTreeSet::new()
            }
        };
        &self.hidden_ids
    }

    pub fn visible(&self) -> Vec<&Author> {
        self.authors
            .iter()
            .filter(|author| !self.hidden_ids.contains(&author.id()))
            .collect()
    }

    pub fn hidden_ids(&self) -> &BTreeSet<i64> {
        &self.hidden_ids
    }

    pub async fn get(&self, id: i64) -> Result<Author, RegistryError> {
        self.author_repo
            .find_author(&FindAuthorRequest::new(id))
            .await
            .map_err(|err| {
                tracing::warn!(id, error = %err, "Loading author failed");
                RegistryError::LoadAuthor(err)
            })
    }

    pub async fn create(&self, form: &AuthorForm) -> Result<(), RegistryError> {
        let req = CreateAuthorRequest::new(form.clone());
        self.author_repo
            .create_author(&req)
            .await
            .map_err(|err| {
                tracing::warn!(error = %err, "Creating author failed");
                RegistryError::Create(err)
            })?;

        tracing::info!(name = %form.name(), "Author created");
        Ok(())
    }

    pub async fn update(&self, id: i64, form: &AuthorForm) -> Result<(), RegistryError> {
        let req = UpdateAuthorRequest::new(id, form.clone());
        self.author_repo
            .update_author(&req)
            .await
            .map_err(|err| {
                tracing::warn!(id, error = %err, "Updating author failed");
                RegistryError::Update(err)
            })?;

        tracing::info!(id, "Author updated");
        Ok(())
    }

    /// Deletes the author on the backend, or hides it locally when that fails.
    pub async fn delete(&mut self, id: i64) -> DeleteOutcome {
        let reason = match self
            .author_repo
            .delete_author(&DeleteAuthorRequest::new(id))
            .await
        {
            Ok(()) => {
                self.authors.retain(|author| author.id() != id);
                tracing::info!(id, "Author deleted");
                return DeleteOutcome::Deleted { id };
            }
            Err(DeleteAuthorError::Rejected { status, .. }) => HideReason::Rejected { status },
            Err(DeleteAuthorError::Other(err)) => {
                tracing::warn!(id, error = %err, "Delete request failed");
                HideReason::Unreachable
            }
        };

        self.hide(id).await;
        tracing::info!(id, ?reason, "Author hidden locally");
        DeleteOutcome::Hidden { id, reason }
    }

    async fn hide(&mut self, id: i64) {
        if let Err(err) = self.hidden_store.append(id).await {
            tracing::error!(id, error = %err, "Failed to persist hidden author");
        }
        self.hidden_ids.insert(id);
    }
}
