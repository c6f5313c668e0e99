//! CLI entrypoint for snippet-explain
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

mod input;
mod logging;

use anyhow::{Context, Result, bail};
use clap::Parser;
use explain_application::{
    ConversationLogger, CredentialService, ErrorClassifier, ExplainOutcome, ExplainSnippetUseCase,
    RecoveryAction, UserNotifier,
};
use explain_infrastructure::{
    ConfigLoader, FileConfig, FileCredentialStore, JsonlConversationLogger, OpenAiConnector,
    OpenAiSettings,
};
use explain_presentation::{Cli, ConsoleNotifier, OutputConfig, StdinPrompter, TerminalSink};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Exit code after Ctrl-C.
const EXIT_INTERRUPTED: u8 = 130;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // === Configuration ===
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).context("failed to load configuration")?
    };

    let _log_guard = logging::init(cli.verbose, config.logging.file.as_deref())?;
    info!("Starting snippet-explain");

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        println!();
        println!("{}", toml::to_string_pretty(&config)?);
        return Ok(ExitCode::SUCCESS);
    }

    let issues = config.validate();
    for issue in &issues {
        warn!("config: {}", issue);
    }
    if issues.iter().any(|i| i.is_error()) {
        let details: Vec<String> = issues.iter().map(ToString::to_string).collect();
        bail!("invalid configuration:\n  {}", details.join("\n  "));
    }

    let output = OutputConfig {
        color: config.output.color,
        show_progress: config.output.show_progress,
    }
    .with_flags(cli.no_color, cli.quiet);
    if !output.color {
        colored::control::set_override(false);
    }

    // === Dependency Injection ===
    let notifier: Arc<dyn UserNotifier> = Arc::new(ConsoleNotifier);
    let sink = Arc::new(TerminalSink::stdout(output));
    let credentials = Arc::new(credential_service(&config, notifier.clone())?);
    let classifier = ErrorClassifier::new(credentials.clone(), notifier.clone(), sink.clone());

    // === Key management ===
    if cli.clear_key {
        restore_stored_key(&credentials, &classifier);
        return Ok(match credentials.clear() {
            Ok(_) => ExitCode::SUCCESS,
            Err(e) => {
                classifier.classify(&e, None);
                ExitCode::FAILURE
            }
        });
    }
    if cli.set_key {
        return Ok(match credentials.request().await {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                classifier.classify(&e, None);
                ExitCode::FAILURE
            }
        });
    }

    // === Explain ===
    let file = cli.input_file().map(|p| p.as_path());
    let text = input::read_source(file)?;
    let snippet = input::snippet_from(file, text, cli.language.clone(), cli.lines)?;

    restore_stored_key(&credentials, &classifier);
    if !credentials.is_set() {
        use_environment_key(&config, &credentials);
    }

    let mut use_case = ExplainSnippetUseCase::new(
        credentials,
        sink.clone(),
        notifier,
        config.openai.to_explain_params(),
    );
    if let Some(logger) = conversation_logger(&config) {
        use_case = use_case.with_conversation_logger(logger);
    }

    let outcome = tokio::select! {
        outcome = use_case.execute(&snippet, |handle| debug!("Streaming into {}", handle.id())) => outcome,
        Ok(()) = tokio::signal::ctrl_c() => {
            info!("Interrupted");
            sink.dispose_all();
            drop(_log_guard);
            // a pending key prompt blocks runtime shutdown
            std::process::exit(i32::from(EXIT_INTERRUPTED));
        }
    };

    Ok(match outcome {
        ExplainOutcome::Completed { answer } => {
            debug!("Answer: {} bytes", answer.len());
            sink.dispose_all();
            ExitCode::SUCCESS
        }
        ExplainOutcome::Closed => ExitCode::from(EXIT_INTERRUPTED),
        ExplainOutcome::Failed(RecoveryAction::PromptForCredential) => {
            eprintln!("Run `snippet-explain --set-key` to enter a new key.");
            ExitCode::FAILURE
        }
        ExplainOutcome::Failed(_) => ExitCode::FAILURE,
    })
}

fn credential_service(
    config: &FileConfig,
    notifier: Arc<dyn UserNotifier>,
) -> Result<CredentialService> {
    let store = FileCredentialStore::at_default_location()
        .context("could not determine the data directory for the credential store")?;
    debug!("Credential store: {}", store.path().display());

    let connector = OpenAiConnector::new(OpenAiSettings {
        base_url: config.openai.base_url.clone(),
        connect_timeout: config.openai.connect_timeout(),
    });

    Ok(CredentialService::new(
        Arc::new(store),
        Arc::new(connector),
        Arc::new(StdinPrompter),
        notifier,
    ))
}

/// Activate the stored key. Failures are reported and leave the key unset.
fn restore_stored_key(credentials: &CredentialService, classifier: &ErrorClassifier) {
    match credentials.restore() {
        Ok(true) => debug!("Using stored API key"),
        Ok(false) => {}
        Err(e) => {
            classifier.classify(&e, None);
        }
    }
}

fn use_environment_key(config: &FileConfig, credentials: &CredentialService) {
    let name = config.openai.api_key_env.trim();
    if name.is_empty() {
        return;
    }
    let Ok(value) = std::env::var(name) else {
        return;
    };
    if value.trim().is_empty() {
        return;
    }
    match credentials.set_from_environment(&value) {
        Ok(()) => debug!("Using API key from ${}", name),
        Err(e) => warn!("Ignoring ${}: {}", name, e),
    }
}

fn conversation_logger(config: &FileConfig) -> Option<Arc<dyn ConversationLogger>> {
    let path = config.logging.conversation_log.as_ref()?;
    let logger = JsonlConversationLogger::open(path)?;
    info!("Conversation log: {}", logger.path().display());
    Some(Arc::new(logger))
}
