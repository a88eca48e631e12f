// src/fetch/mod.rs

pub mod pages;
pub mod retry;

pub use pages::{collect_pages, ApiClient, Page};
pub use retry::RetryPolicy;
