pub mod blog;
pub mod error;

pub use blog::Blog;
pub use error::DomainError;
