//! Interview chat - terminal client for a turn-based interview backend
//!
//! Sends each answer to the backend, shows the interviewer's reply, and
//! locks input for good once the backend signals the end of the interview.

mod config;
mod host;
mod reply;
mod runtime;
mod state_machine;
mod transport;
mod tui;
mod view;

use config::{ChatConfig, HostConfig};
use host::{StandaloneHost, SurveyHost, SurveyQuestion};
use runtime::{Host, Transport};
use state_machine::{ConvContext, HostKind};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::{Arc, Mutex};
use transport::{HttpTransport, LoggingTransport};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use view::SharedTranscript;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ChatConfig::from_env()?;

    // The terminal belongs to the chat, so logs go to a file
    init_logging(&config.log_path)?;

    let http = HttpTransport::new(&config.endpoint, config.timeout)?;
    let transport: Arc<dyn Transport> = Arc::new(LoggingTransport::new(Arc::new(http)));

    let (context, seed, host, embedded) = match &config.host {
        HostConfig::Standalone {
            session_id,
            first_message,
        } => {
            let host: Arc<dyn Host> = Arc::new(StandaloneHost::new(session_id.as_str()));
            let context = ConvContext::new(session_id.as_str(), HostKind::Standalone);
            (context, first_message.clone(), host, None)
        }
        HostConfig::Survey { question_file } => {
            let survey = SurveyHost::new(SurveyQuestion::from_file(question_file)?);
            let context = ConvContext::new(survey.session_id(), HostKind::Survey);
            let seed = survey.first_question().to_string();
            let embedded = survey.embedded_data();
            let host: Arc<dyn Host> = Arc::new(survey);
            (context, seed, host, Some(embedded))
        }
    };

    tracing::info!(
        session_id = %context.session_id,
        host = context.host.as_str(),
        endpoint = %config.endpoint,
        timeout_secs = config.timeout.as_secs(),
        "Interview chat starting"
    );

    let title = format!("Interview ({})", context.host.as_str());
    let transcript = SharedTranscript::new();
    let handle = runtime::start(context, seed, transcript.clone(), transport, host);

    tui::run(transcript, handle.event_tx.clone(), title).await?;

    tracing::info!(
        concluded = handle.state().is_terminal(),
        "Interview chat closed"
    );
    // An in-flight request has nowhere to render any more
    handle.task.abort();

    if let Some(data) = embedded {
        println!("{}", serde_json::to_string_pretty(&data.snapshot())?);
    }

    Ok(())
}

fn init_logging(path: &Path) -> std::io::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "interview_chat=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false)
                .with_writer(Mutex::new(file)),
        )
        .init();

    Ok(())
}
