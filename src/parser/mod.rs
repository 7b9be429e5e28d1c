pub mod context;
pub mod frontmatter;
pub mod lines;

pub use context::{resolve_context, SectionContext};
pub use lines::{classify, LineKind};
