use crate::domain::error::DomainError;
use crate::domain::ports::reasoning::{ReasoningOutput, ReasoningProvider};
use crate::infrastructure::llm::openai::OpenAiChat;
use async_trait::async_trait;

const INSTRUCTIONS: &str = "You are a cryptocurrency investment advisor. Analyze the given token reports, assess risks, and provide a clear final decision: 'BUY', 'HOLD', or 'AVOID'. Justify your reasoning with key insights.";

/// Investment-advisor persona over the chat client. The synthesizer builds
/// the report prompt; this agent only contributes the system role and hands
/// the raw completion back for parsing.
pub struct AdvisorAgent {
    chat: OpenAiChat,
}

impl AdvisorAgent {
    pub fn new(chat: OpenAiChat) -> Self {
        Self {
            chat: chat.with_instructions(INSTRUCTIONS),
        }
    }
}

#[async_trait]
impl ReasoningProvider for AdvisorAgent {
    async fn reason(&self, prompt: &str) -> Result<ReasoningOutput, DomainError> {
        Ok(ReasoningOutput::Text(self.chat.complete(prompt).await?))
    }
}
