use crate::CompletionError;

/// Source of generated replies.
pub trait CompletionClient {
    fn complete(&self, prompt: &str) -> Result<String, CompletionError>;
}

/// A client that never reaches a service.
#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineClient;

impl CompletionClient for OfflineClient {
    fn complete(&self, _prompt: &str) -> Result<String, CompletionError> {
        Err(CompletionError::Unavailable)
    }
}

impl<C> CompletionClient for &C
where
    C: CompletionClient + ?Sized,
{
    fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        (**self).complete(prompt)
    }
}

impl<C> CompletionClient for Box<C>
where
    C: CompletionClient + ?Sized,
{
    fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        (**self).complete(prompt)
    }
}
