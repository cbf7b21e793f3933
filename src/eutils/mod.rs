pub mod client;
pub mod models;

pub use client::EutilsClient;
pub use models::{ArticleRecord, ArticleSet, IdList};
