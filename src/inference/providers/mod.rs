pub mod function;
pub mod openai;

pub use function::FunctionProvider;
pub use openai::{OpenAiProvider, OpenAiSettings};
