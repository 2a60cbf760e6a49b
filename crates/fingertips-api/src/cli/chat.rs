//! Chat commands: `chat`, `flow` and `history`.

use anyhow::Result;
use console::style;

use fingertips_core::history::repository::HistoryRepository;
use fingertips_types::chat::{ChatRequest, ChatResponse};
use fingertips_types::turn::{Turn, TurnRecord};

use crate::state::AppState;
use crate::turn::{demo_request, run_turn};

/// Run one turn for `user` and print the reply.
pub async fn chat<H: HistoryRepository>(
    state: &AppState<H>,
    user: String,
    message: String,
    json: bool,
) -> Result<()> {
    let request = ChatRequest::new(user, message);
    let response = run_turn(&state.handler, &request).await?;
    print_response(&request, &response, json)
}

/// Run the demonstration turn.
pub async fn flow<H: HistoryRepository>(state: &AppState<H>, json: bool) -> Result<()> {
    let request = demo_request();
    let response = run_turn(&state.handler, &request).await?;
    print_response(&request, &response, json)
}

/// Print the stored history for `user`.
pub async fn history<H: HistoryRepository>(
    state: &AppState<H>,
    user: &str,
    json: bool,
) -> Result<()> {
    let records = state.handler.load_history(user).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    if records.is_empty() {
        println!();
        println!("  No history for '{}'.", style(user).cyan());
        println!();
        return Ok(());
    }

    println!();
    println!(
        "  {} ({} turns)",
        style(format!("History for '{user}'")).bold(),
        records.len()
    );
    println!();
    for record in &records {
        println!("  {}", format_record(record));
    }
    println!();

    Ok(())
}

fn print_response(request: &ChatRequest, response: &ChatResponse, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(response)?);
        return Ok(());
    }

    println!();
    println!("  {} {}", style("you:").cyan().bold(), request.message);
    println!("  {} {}", style("bot:").green().bold(), response.bot_response);
    println!();
    println!(
        "  {}",
        style(format!(
            "{} turns stored for '{}'",
            response.chat_history.len(),
            request.user_id
        ))
        .dim()
    );
    println!();

    Ok(())
}

/// One history line, labelled by role.
fn format_record(record: &TurnRecord) -> String {
    match &record.turn {
        Turn::User { text } => format!("{} {text}", style("you:").cyan()),
        Turn::Bot { text } => format!("{} {text}", style("bot:").green()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use fingertips_core::chat::handler::ConversationTurnHandler;
    use fingertips_core::history::memory::InMemoryHistoryRepository;
    use fingertips_core::llm::box_provider::BoxLlmProvider;
    use fingertips_types::config::CompletionSettings;

    use crate::turn::DEMO_USER;
    use crate::turn::test_support::EchoProvider;

    fn state(provider: Option<BoxLlmProvider>) -> AppState<InMemoryHistoryRepository> {
        AppState::new(ConversationTurnHandler::new(
            InMemoryHistoryRepository::new(),
            provider,
            CompletionSettings::default(),
        ))
    }

    #[test]
    fn test_format_record_labels_roles() {
        console::set_colors_enabled(false);
        let user = TurnRecord::new("alice", Turn::user("hi"));
        let bot = TurnRecord::new("alice", Turn::bot("hello"));
        assert_eq!(format_record(&user), "you: hi");
        assert_eq!(format_record(&bot), "bot: hello");
    }

    #[tokio::test]
    async fn test_chat_and_history_commands() {
        let state = state(Some(BoxLlmProvider::new(EchoProvider)));

        chat(&state, "alice".to_string(), "hi".to_string(), true).await.unwrap();
        chat(&state, "alice".to_string(), "again".to_string(), false).await.unwrap();
        history(&state, "alice", false).await.unwrap();

        assert_eq!(state.handler.history().turn_count("alice"), 4);
    }

    #[tokio::test]
    async fn test_flow_uses_demo_user() {
        let state = state(Some(BoxLlmProvider::new(EchoProvider)));
        flow(&state, true).await.unwrap();
        assert_eq!(state.handler.history().turn_count(DEMO_USER), 2);
    }

    #[tokio::test]
    async fn test_chat_without_credential_fails() {
        let state = state(None);
        let err = chat(&state, "alice".to_string(), "hi".to_string(), false)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("configuration error"));
        assert_eq!(state.handler.history().turn_count("alice"), 0);
    }
}
