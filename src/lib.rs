//! Sous library exports for testing

use clap::ValueEnum;

pub mod core;
pub mod inference;
pub mod tui;

#[cfg(test)]
pub mod test_support;

/// Chat backends selectable with `--provider`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Provider {
    /// The hosted chat function
    Function,
    /// OpenAI Chat Completions (needs OPENAI_API_KEY)
    #[value(name = "openai")]
    OpenAi,
}

impl Provider {
    /// Name used in the config file and `SOUS_PROVIDER`.
    pub fn as_str(self) -> &'static str {
        match self {
            Provider::Function => "function",
            Provider::OpenAi => "openai",
        }
    }
}
