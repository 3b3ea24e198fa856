//! External service clients.

pub mod openrouter;

use crate::Result;

/// A text completion service the naming advisor can query.
#[allow(async_fn_in_trait)]
pub trait CompletionBackend {
    /// Send a prompt and return the model's reply text.
    async fn complete(&self, prompt: &str) -> Result<String>;
}
