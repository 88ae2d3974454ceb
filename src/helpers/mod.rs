//! Helper functions shared by the markdown renderer, templates and the
//! generated feed and sitemap.

mod date;
mod html;
mod toc;
mod url;

pub use date::*;
pub use html::*;
pub use toc::*;
pub use url::*;
