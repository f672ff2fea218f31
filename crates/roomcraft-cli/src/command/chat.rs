use std::io::{self, BufRead as _};

use anyhow::Context;
use chrono::Utc;
use roomcraft_assistant::{
    Assistant, ChatLog, ChatRole, CompletionClient, OfflineClient, ReplySource,
};
use roomcraft_store::KeyValueStore;

use crate::command::ConfigArg;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct ChatArg {
    /// Ask a single question instead of reading questions from stdin
    #[clap(long)]
    message: Option<String>,
    /// Continue an existing chat session
    #[clap(long)]
    session: Option<String>,
    /// List your chat sessions, most recent first
    #[clap(long, conflicts_with_all = ["message", "transcript"])]
    list: bool,
    /// Print the messages of `--session`
    #[clap(long, requires = "session", conflicts_with = "message")]
    transcript: bool,
}

pub(crate) fn run(config: &ConfigArg, arg: &ChatArg) -> anyhow::Result<()> {
    let ChatArg {
        message,
        session,
        list,
        transcript,
    } = arg;

    let mut log = ChatLog::new(config.store()?);

    if *list {
        for session in log.user_sessions(config.user())? {
            println!(
                "{:<10} {:>3} messages  updated {}",
                session.id,
                session.messages.len(),
                session.updated_at.format("%Y-%m-%d %H:%M")
            );
        }
        return Ok(());
    }

    if *transcript && let Some(session_id) = session {
        for message in log.messages(session_id)? {
            println!("{}: {}", message.role, message.content);
        }
        return Ok(());
    }

    let session_id = match session {
        Some(id) => id.clone(),
        None => log.create_session(config.user(), Utc::now())?,
    };
    eprintln!("Chat session {session_id}");

    let assistant = Assistant::new(OfflineClient);
    if let Some(message) = message {
        return exchange(&assistant, &mut log, &session_id, message);
    }

    eprintln!("Ask about floor plans, rooms or layouts. Type `exit` to leave.");
    for line in io::stdin().lock().lines() {
        let line = line.context("Failed to read from stdin")?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if matches!(line, "exit" | "quit") {
            break;
        }
        exchange(&assistant, &mut log, &session_id, line)?;
    }
    Ok(())
}

fn exchange<C, S>(
    assistant: &Assistant<C>,
    log: &mut ChatLog<S>,
    session_id: &str,
    message: &str,
) -> anyhow::Result<()>
where
    C: CompletionClient,
    S: KeyValueStore,
{
    let reply = assistant.reply(message)?;
    if let ReplySource::Fallback { cause } = &reply.source {
        eprintln!("({cause}; answering offline)");
    }
    log.add_message(session_id, ChatRole::User, message, Utc::now())
        .with_context(|| format!("Failed to save message to chat session {session_id}"))?;
    log.add_message(session_id, ChatRole::Assistant, reply.text.clone(), Utc::now())?;
    println!("{}", reply.text);
    Ok(())
}
