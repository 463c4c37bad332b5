pub mod provider;
pub mod providers;
pub mod types;

pub use provider::{ChatProvider, ChatRequest, ProviderError};
pub use providers::{FunctionProvider, OpenAiProvider, OpenAiSettings};
