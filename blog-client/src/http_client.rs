use crate::error::BlogClientError;
use crate::models::{Blog, BlogsResponse, CreateBlogRequest, CreatedBlog, SaveBlogRequest};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
}

impl HttpClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .connect_timeout(Duration::from_secs(5))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// `GET /blogs/all`, optionally filtered by `search`.
    ///
    /// With no query and no blogs the server answers 400, which surfaces as
    /// [`BlogClientError::InvalidRequest`].
    pub async fn list_blogs(&self, search: Option<&str>) -> Result<Vec<Blog>, BlogClientError> {
        let url = self.url("/blogs/all");
        let mut request = self.client.get(&url);
        if let Some(query) = search {
            request = request.query(&[("search", query)]);
        }

        tracing::debug!("GET {} search={:?}", url, search);
        let response = request.send().await?;
        let body: BlogsResponse = read_json(response).await?;

        Ok(body.blogs)
    }

    pub async fn get_blog(&self, id: i64) -> Result<Blog, BlogClientError> {
        let url = self.url(&format!("/blogs/{}", id));

        tracing::debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;

        read_json(response).await
    }

    pub async fn create_blog(
        &self,
        title: impl Into<String>,
        content: impl Into<String>,
        created_at: Option<String>,
    ) -> Result<CreatedBlog, BlogClientError> {
        let url = self.url("/blogs/create");
        let request = CreateBlogRequest {
            title: title.into(),
            content: content.into(),
            created_at,
        };

        tracing::debug!("POST {}", url);
        let response = self.client.post(&url).json(&request).send().await?;

        read_json(response).await
    }

    /// Returns the server's confirmation text.
    pub async fn save_blog(
        &self,
        id: i64,
        title: Option<String>,
        content: Option<String>,
    ) -> Result<String, BlogClientError> {
        let url = self.url("/blogs/save");
        let request = SaveBlogRequest { id, title, content };

        tracing::debug!("POST {} id={}", url, id);
        let response = self.client.post(&url).json(&request).send().await?;

        read_text(response).await
    }

    pub async fn delete_blog(&self, id: i64) -> Result<String, BlogClientError> {
        let url = self.url(&format!("/blogs/{}", id));

        tracing::debug!("DELETE {}", url);
        let response = self.client.delete(&url).send().await?;

        read_text(response).await
    }

    pub async fn delete_all_blogs(&self) -> Result<String, BlogClientError> {
        let url = self.url("/blogs/all");

        tracing::debug!("DELETE {}", url);
        let response = self.client.delete(&url).send().await?;

        read_text(response).await
    }
}

async fn check_status(response: Response) -> Result<Response, BlogClientError> {
    let status = response.status();

    match status {
        StatusCode::OK => Ok(response),
        StatusCode::BAD_REQUEST => {
            let error_text = response.text().await?;
            Err(BlogClientError::InvalidRequest(error_text))
        }
        StatusCode::INTERNAL_SERVER_ERROR => {
            let error_text = response.text().await?;
            Err(BlogClientError::ServerError(error_text))
        }
        _ => {
            let error_text = response.text().await?;
            Err(BlogClientError::TransportError(format!(
                "HTTP {}: {}",
                status, error_text
            )))
        }
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, BlogClientError> {
    let text = check_status(response).await?.text().await?;

    serde_json::from_str(&text).map_err(|e| BlogClientError::SerializationError(e.to_string()))
}

async fn read_text(response: Response) -> Result<String, BlogClientError> {
    Ok(check_status(response).await?.text().await?)
}
