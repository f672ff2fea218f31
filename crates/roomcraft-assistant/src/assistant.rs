use crate::{CompletionClient, CompletionError, FallbackResponder};

/// Where a [`Reply`] came from.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::IsVariant)]
pub enum ReplySource {
    Completion,
    /// The completion client failed with `cause` and a canned reply was used.
    Fallback { cause: CompletionError },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub source: ReplySource,
}

/// Answers chat messages, preferring the completion client over canned replies.
#[derive(Debug, Clone, Default)]
pub struct Assistant<C> {
    client: C,
    fallback: FallbackResponder,
}

impl<C> Assistant<C>
where
    C: CompletionClient,
{
    pub fn new(client: C) -> Self {
        Self {
            client,
            fallback: FallbackResponder,
        }
    }

    /// Replies to `message`.
    ///
    /// Blank messages are rejected with [`CompletionError::EmptyPrompt`] without
    /// contacting the client. Any client failure is answered by the fallback table.
    pub fn reply(&self, message: &str) -> Result<Reply, CompletionError> {
        if message.trim().is_empty() {
            return Err(CompletionError::EmptyPrompt);
        }
        let reply = match self.client.complete(message) {
            Ok(text) => Reply {
                text,
                source: ReplySource::Completion,
            },
            Err(cause) => Reply {
                text: self.fallback.respond(message).to_owned(),
                source: ReplySource::Fallback { cause },
            },
        };
        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::{DEFAULT_REPLY, OfflineClient};

    #[derive(Debug, Default)]
    struct Echo {
        calls: Cell<usize>,
    }

    impl CompletionClient for Echo {
        fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
            self.calls.set(self.calls.get() + 1);
            Ok(format!("echo: {prompt}"))
        }
    }

    #[test]
    fn test_completion_is_preferred() {
        let assistant = Assistant::new(Echo::default());
        let reply = assistant.reply("kitchen").unwrap();
        assert_eq!(reply.text, "echo: kitchen");
        assert!(reply.source.is_completion());
    }

    #[test]
    fn test_offline_client_falls_back() {
        let assistant = Assistant::new(OfflineClient);
        let reply = assistant.reply("zzz").unwrap();
        assert_eq!(reply.text, DEFAULT_REPLY);
        assert_eq!(
            reply.source,
            ReplySource::Fallback {
                cause: CompletionError::Unavailable
            }
        );
    }

    #[test]
    fn test_failing_client_keeps_cause() {
        struct Broken;
        impl CompletionClient for Broken {
            fn complete(&self, _prompt: &str) -> Result<String, CompletionError> {
                Err(CompletionError::Failed {
                    message: "HTTP 503".to_owned(),
                })
            }
        }

        let reply = Assistant::new(Broken).reply("add a window").unwrap();
        assert_eq!(
            reply.text,
            "I can add that to your design. Where would you like it placed?"
        );
        assert!(matches!(
            reply.source,
            ReplySource::Fallback { cause: CompletionError::Failed { ref message } } if message == "HTTP 503"
        ));
    }

    #[test]
    fn test_blank_message_is_rejected_before_calling_client() {
        let echo = Echo::default();
        let assistant = Assistant::new(&echo);
        assert_eq!(assistant.reply("  \n"), Err(CompletionError::EmptyPrompt));
        assert_eq!(echo.calls.get(), 0);
    }
}
