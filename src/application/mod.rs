pub mod fan_out;
pub mod news_batcher;
pub mod pipeline;
pub mod search_tokens;
pub mod synthesizer;
