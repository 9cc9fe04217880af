pub mod fallback;
pub mod openai_client;
mod orchestration;
pub mod prompts;
