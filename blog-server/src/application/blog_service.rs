use crate::data::blog_repository::BlogRepository;
use crate::domain::blog::{non_empty, CreateBlogRequest, CreatedBlogResponse, SaveBlogRequest};
use crate::domain::{Blog, DomainError};
use std::sync::Arc;

pub struct BlogService {
    blog_repo: Arc<dyn BlogRepository + Send + Sync>,
}

impl BlogService {
    pub fn new(blog_repo: Arc<dyn BlogRepository + Send + Sync>) -> Self {
        Self { blog_repo }
    }

    /// All blogs, or those whose title or content contains `search`.
    ///
    /// An empty table is a client error only when nothing was searched for.
    pub async fn list_blogs(&self, search: Option<String>) -> Result<Vec<Blog>, DomainError> {
        match non_empty(search) {
            Some(query) => {
                let blogs = self.blog_repo.search(&query).await?;
                tracing::debug!("Search {:?} matched {} blogs", query, blogs.len());
                Ok(blogs)
            }
            None => {
                let blogs = self.blog_repo.list().await?;
                if blogs.is_empty() {
                    return Err(DomainError::InvalidInput("no blogs to list".to_string()));
                }
                Ok(blogs)
            }
        }
    }

    pub async fn get_blog(&self, id: i64) -> Result<Blog, DomainError> {
        self.blog_repo.find_by_id(id).await
    }

    pub async fn create_blog(
        &self,
        req: CreateBlogRequest,
    ) -> Result<CreatedBlogResponse, DomainError> {
        let title = non_empty(req.title)
            .ok_or_else(|| DomainError::InvalidInput("title is required".to_string()))?;
        let content = non_empty(req.content)
            .ok_or_else(|| DomainError::InvalidInput("content is required".to_string()))?;
        let created_at = non_empty(req.created_at);

        let (id, generated) = self
            .blog_repo
            .create(&title, &content, created_at.as_deref())
            .await?;

        tracing::info!("Blog created: id={}", id);

        Ok(CreatedBlogResponse {
            id,
            created_at: generated,
        })
    }

    /// Applies whichever of title and content were supplied.
    pub async fn save_blog(&self, req: SaveBlogRequest) -> Result<(), DomainError> {
        let id = req
            .id
            .as_ref()
            .and_then(|id| id.parse())
            .ok_or_else(|| DomainError::InvalidInput("id is required".to_string()))?;
        let title = non_empty(req.title);
        let content = non_empty(req.content);

        if title.is_none() && content.is_none() {
            tracing::debug!("Save for blog {} carried no changes", id);
            return Ok(());
        }

        let affected = self
            .blog_repo
            .update(id, title.as_deref(), content.as_deref())
            .await?;

        if affected == 0 {
            tracing::warn!("Save targeted missing blog {}", id);
        } else {
            tracing::info!("Blog saved: id={}", id);
        }

        Ok(())
    }

    pub async fn delete_blog(&self, id: i64) -> Result<(), DomainError> {
        let affected = self.blog_repo.delete(id).await?;

        tracing::info!("Blog delete: id={}, removed={}", id, affected);

        Ok(())
    }

    pub async fn delete_all_blogs(&self) -> Result<(), DomainError> {
        let removed = self.blog_repo.delete_all().await?;

        tracing::info!("All blogs deleted: removed={}", removed);

        Ok(())
    }
}
