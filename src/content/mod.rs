//! Content module - blog posts, front-matter and markdown processing

mod error;
mod frontmatter;
mod markdown;
mod post;
mod repository;

pub use error::ContentError;
pub use frontmatter::{Field, FrontMatter};
pub use markdown::MarkdownRenderer;
pub use post::{reading_time, Post, PostMeta};
pub use repository::PostRepository;
