//! Application services - compose ports into the operations the API exposes.

mod comment;
mod post;
mod tag;

pub use comment::{CommentDraft, CommentService};
pub use post::{PostDraft, PostSearch, PostService};
pub use tag::TagService;
