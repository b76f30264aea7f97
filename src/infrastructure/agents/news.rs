use crate::domain::error::DomainError;
use crate::domain::ports::news_summarizer::NewsSummarizer;
use crate::infrastructure::llm::openai::OpenAiChat;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::warn;

const NEWSAPI_URL: &str = "https://newsapi.org/v2/everything";
const MAX_ARTICLES: usize = 5;
const INSTRUCTIONS: &str = "You are a financial news analyst. Summarize key news articles relevant to the given cryptocurrency.";

/// News summarizer over NewsAPI. Queries all symbols in one request and
/// condenses the freshest articles into a single summary.
pub struct NewsApiAgent {
    client: Client,
    api_key: String,
    chat: OpenAiChat,
}

#[derive(Deserialize)]
struct NewsResponse {
    #[serde(default)]
    articles: Vec<Article>,
}

#[derive(Deserialize)]
struct Article {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

impl NewsApiAgent {
    pub fn new(api_key: String, chat: OpenAiChat) -> Self {
        Self {
            client: Client::builder()
                .user_agent("TokenIntel/0.1")
                .timeout(Duration::from_secs(10))
                .build()
                .unwrap_or_else(|err| {
                    warn!(error = %err, "Failed to build HTTP client, using defaults");
                    Client::new()
                }),
            api_key,
            chat: chat.with_instructions(INSTRUCTIONS),
        }
    }

    async fn fetch_articles(&self, query: &str) -> Result<Vec<Article>, DomainError> {
        let resp = self
            .client
            .get(NEWSAPI_URL)
            .query(&[
                ("q", query),
                ("language", "en"),
                ("sortBy", "publishedAt"),
                ("apiKey", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| DomainError::Provider(format!("NewsAPI error: {e}")))?;

        if !resp.status().is_success() {
            return Err(DomainError::Provider(format!(
                "NewsAPI returned {}",
                resp.status()
            )));
        }

        let data: NewsResponse = resp
            .json()
            .await
            .map_err(|e| DomainError::Parse(format!("NewsAPI response: {e}")))?;
        Ok(data.articles.into_iter().take(MAX_ARTICLES).collect())
    }
}

#[async_trait]
impl NewsSummarizer for NewsApiAgent {
    async fn summarize(&self, symbols: &[String]) -> Result<String, DomainError> {
        let query = symbols.join(" OR ");
        let articles = self.fetch_articles(&query).await?;
        if articles.is_empty() {
            return Ok("No relevant news found.".to_string());
        }
        self.chat.complete(&build_prompt(&articles)).await
    }
}

fn build_prompt(articles: &[Article]) -> String {
    articles
        .iter()
        .map(|article| {
            format!(
                "Title: {}\nContent: {}\nSummarize the key insights.",
                article.title.as_deref().unwrap_or("No title"),
                article.description.as_deref().unwrap_or("No description"),
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
