//! Typed client for the BlogIt REST API.

pub mod error;
pub mod http_client;
pub mod models;

pub use error::BlogClientError;
pub use http_client::HttpClient;
pub use models::{Blog, BlogsResponse, CreateBlogRequest, CreatedBlog, SaveBlogRequest};
