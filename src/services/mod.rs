pub mod aggregator;
pub mod object_store;
pub mod rewrite;
pub mod summary;
pub mod uploader;
pub mod writer;
