pub mod extractor;
pub mod materializer;
pub mod store;
pub mod translator;
pub mod workflow;
