//! Reference collaborator implementations.

pub mod firecrawl;
pub mod openai;

pub use firecrawl::FirecrawlClient;
pub use openai::OpenAIExtractor;
