use crate::models::*;
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};

const API_BASE: &str = match option_env!("BLOGIT_API_BASE") {
    Some(base) => base,
    None => "http://localhost:8000",
};

#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    pub fn new() -> Self {
        Self {
            base_url: API_BASE.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(
        &self,
        builder: RequestBuilder,
        body: Option<&impl Serialize>,
    ) -> Result<String, ApiError> {
        let response = match body {
            Some(body) => {
                let body_json = serde_json::to_string(body)
                    .map_err(|e| ApiError::Decode(format!("Failed to serialize request: {}", e)))?;

                builder
                    .header("Content-Type", "application/json")
                    .body(body_json)
                    .map_err(|e| ApiError::Network(e.to_string()))?
                    .send()
                    .await
            }
            None => builder.send().await,
        }
        .map_err(|e| ApiError::Network(e.to_string()))?;

        read_text(response).await
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        body: Option<&impl Serialize>,
    ) -> Result<T, ApiError> {
        let text = self.send(builder, body).await?;

        serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))
    }

    pub async fn list_blogs(&self, search: Option<&str>) -> Result<Vec<Blog>, ApiError> {
        let mut builder = Request::get(&self.url("/blogs/all"));
        if let Some(query) = search {
            builder = builder.query([("search", query)]);
        }

        let response: BlogsResponse = self.send_json(builder, None::<&()>).await?;
        Ok(response.blogs)
    }

    pub async fn create_blog(&self, req: &CreateBlogRequest) -> Result<CreatedBlog, ApiError> {
        self.send_json(Request::post(&self.url("/blogs/create")), Some(req))
            .await
    }

    pub async fn save_blog(&self, req: &SaveBlogRequest) -> Result<(), ApiError> {
        self.send(Request::post(&self.url("/blogs/save")), Some(req))
            .await?;
        Ok(())
    }

    pub async fn delete_blog(&self, id: i64) -> Result<(), ApiError> {
        self.send(
            Request::delete(&self.url(&format!("/blogs/{}", id))),
            None::<&()>,
        )
        .await?;
        Ok(())
    }

    pub async fn delete_all(&self) -> Result<(), ApiError> {
        self.send(Request::delete(&self.url("/blogs/all")), None::<&()>)
            .await?;
        Ok(())
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

async fn read_text(response: Response) -> Result<String, ApiError> {
    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| ApiError::Network(format!("Failed to read response: {}", e)))?;

    match status {
        200..=299 => Ok(text),
        400 => Err(ApiError::BadRequest(text)),
        500..=599 => Err(ApiError::Server(text)),
        _ => Err(ApiError::Network(format!("HTTP {}: {}", status, text))),
    }
}
