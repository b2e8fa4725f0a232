// Career agent: the two-pass conversation protocol around the `search_jobs` tool.
// All completion calls go through llm_client::ChatModel.

pub mod handlers;
pub mod orchestrator;
pub mod prompts;
pub mod tools;
