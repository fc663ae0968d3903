pub mod payload;

use crate::models::{
    Author, CreateAuthorError, CreateAuthorRequest, DeleteAuthorError, DeleteAuthorRequest,
    FindAllAuthorsError, FindAuthorError, FindAuthorRequest, UpdateAuthorError,
    UpdateAuthorRequest,
};
use crate::repositories::AuthorRepository;
use anyhow::{Context, anyhow};
use async_trait::async_trait;
use payload::{AuthorHttpRequest, AuthorHttpResponse};
use reqwest::header::{CACHE_CONTROL, HeaderValue};
use reqwest::{Client, StatusCode};

/// `AuthorRepository` backed by the REST API.
#[derive(Debug, Clone)]
pub struct HttpAuthorRepository {
    client: Client,
    base_url: String,
}

impl HttpAuthorRepository {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let client = Client::builder()
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').into(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn authors_url(&self) -> String {
        format!("{}/authors", self.base_url)
    }

    fn author_url(&self, id: i64) -> String {
        format!("{}/authors/{id}", self.base_url)
    }
}

#[async_trait]
impl AuthorRepository for HttpAuthorRepository {
    async fn create_author(&self, req: &CreateAuthorRequest) -> Result<(), CreateAuthorError> {
        let name = req.form().name().to_string();
        tracing::debug!(%name, "POST /authors");

        let res = self
            .client
            .post(self.authors_url())
            .json(&AuthorHttpRequest::from(req.form()))
            .send()
            .await
            .map_err(|err| {
                let err =
                    anyhow!(err).context(format!(r#"Failed to create author with name "{name}""#));
                CreateAuthorError::Other(err)
            })?;

        let status = res.status();
        if !status.is_success() {
            return Err(CreateAuthorError::Rejected {
                name,
                status: status.as_u16(),
            });
        }

        Ok(())
    }

    async fn find_author(&self, req: &FindAuthorRequest) -> Result<Author, FindAuthorError> {
        let id = req.id();
        tracing::debug!(id, "GET /authors/{{id}}");

        let other = |err: anyhow::Error| {
            FindAuthorError::Other(err.context(format!(r#"Failed to retrieve author with id "{id}""#)))
        };

        let res = self
            .client
            .get(self.author_url(id))
            .send()
            .await
            .map_err(|err| other(anyhow!(err)))?;

        let status = res.status();
        if status == StatusCode::NOT_FOUND {
            return Err(FindAuthorError::NotFound { id });
        }
        if !status.is_success() {
            return Err(other(anyhow!("Backend responded with status {status}")));
        }

        let author = res
            .json::<AuthorHttpResponse>()
            .await
            .map_err(|err| other(anyhow!(err)))?;

        Ok(author.into())
    }

    async fn find_all_authors(&self) -> Result<Vec<Author>, FindAllAuthorsError> {
        tracing::debug!("GET /authors");

        let res = self
            .client
            .get(self.authors_url())
            .header(CACHE_CONTROL, HeaderValue::from_static("no-cache"))
            .send()
            .await
            .map_err(|err| {
                let err = anyhow!(err).context("Failed to retrieve all authors");
                FindAllAuthorsError(err)
            })?;

        let status = res.status();
        if !status.is_success() {
            let err = anyhow!("Backend responded with status {status}")
                .context("Failed to retrieve all authors");
            return Err(FindAllAuthorsError(err));
        }

        let authors = res
            .json::<Vec<AuthorHttpResponse>>()
            .await
            .map_err(|err| {
                let err = anyhow!(err).context("Failed to decode authors");
                FindAllAuthorsError(err)
            })?;

        Ok(authors.into_iter().map(Author::from).collect())
    }

    async fn update_author(&self, req: &UpdateAuthorRequest) -> Result<(), UpdateAuthorError> {
        let id = req.id();
        tracing::debug!(id, "PUT /authors/{{id}}");

        let res = self
            .client
            .put(self.author_url(id))
            .json(&AuthorHttpRequest::from(req.form()))
            .send()
            .await
            .map_err(|err| {
                let err =
                    anyhow!(err).context(format!(r#"Failed to update author with id "{id}""#));
                UpdateAuthorError::Other(err)
            })?;

        let status = res.status();
        if status == StatusCode::NOT_FOUND {
            return Err(UpdateAuthorError::NotFound { id });
        }
        if !status.is_success() {
            return Err(UpdateAuthorError::Rejected {
                id,
                status: status.as_u16(),
            });
        }

        Ok(())
    }

    async fn delete_author(&self, req: &DeleteAuthorRequest) -> Result<(), DeleteAuthorError> {
        let id = req.id();
        tracing::debug!(id, "DELETE /authors/{{id}}");

        let res = self
            .client
            .delete(self.author_url(id))
            .send()
            .await
            .map_err(|err| {
                let err =
                    anyhow!(err).context(format!(r#"Failed to delete author with id "{id}""#));
                DeleteAuthorError::Other(err)
            })?;

        let status = res.status();
        if !status.is_success() {
            return Err(DeleteAuthorError::Rejected {
                id,
                status: status.as_u16(),
            });
        }

        Ok(())
    }
}
