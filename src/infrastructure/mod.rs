pub mod agents;
pub mod directory;
pub mod llm;
pub mod sqlite;
