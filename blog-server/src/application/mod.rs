pub mod blog_service;

pub use blog_service::BlogService;
