pub mod extract;
pub mod rewrite;
pub mod summarize;
