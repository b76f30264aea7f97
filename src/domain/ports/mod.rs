pub mod market_analyst;
pub mod news_summarizer;
pub mod reasoning;
pub mod report_store;
pub mod technical_analyst;
pub mod token_directory;
