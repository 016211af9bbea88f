pub mod comments;
pub mod notes;
pub mod posts;
