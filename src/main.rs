mod config;
mod convert;
mod exa;
mod lang;
mod openai;
mod pipeline;
mod tts;

pub const USER_AGENT: &str = concat!("audicle/", env!("CARGO_PKG_VERSION"));

use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use reqwest::Client;
use tracing::info;

use config::Settings;
use exa::ExaClient;
use openai::OpenAiClient;
use pipeline::{Answers, Session};
use tts::GoogleTts;

/// TCP connection establishment timeout.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
/// Per-request timeout; summaries of long articles can take a while.
const HTTP_TIMEOUT: Duration = Duration::from_secs(120);

/// Turn a topic into a narrated audio digest of a news article and three related reads.
#[derive(Debug, Parser)]
#[command(name = "audicle", version, about)]
struct Cli {
    /// Topic to search for (skips the topic prompt)
    #[arg(long)]
    topic: Option<String>,

    /// Full name of the spoken language, e.g. "English" (skips the language prompt when supported)
    #[arg(long)]
    language: Option<String>,

    /// Chat model used for queries, summaries and cleanup (overrides OPENAI_MODEL)
    #[arg(long)]
    model: Option<String>,

    /// Directory the MP3 file is written to
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Print the supported languages and exit
    #[arg(long)]
    list_languages: bool,

    /// Log request-level detail
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", failure_message(e.as_ref()));
            ExitCode::FAILURE
        }
    }
}

/// One line for stderr, built from the error's `Display` text.
fn failure_message(err: &dyn Error) -> String {
    format!("audicle: {err}")
}

async fn run(cli: Cli) -> Result<(), Box<dyn Error>> {

    let directive = if cli.verbose { "audicle=debug" } else { "audicle=info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(directive.parse()?),
        )
        .init();

    if cli.list_languages {
        for (code, name) in lang::LanguageTable::builtin().iter() {
            println!("{name} ({code})");
        }
        return Ok(());
    }

    let settings = Settings::from_env()?
        .with_model(cli.model)
        .with_output_dir(cli.output_dir);

    let http = Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(HTTP_TIMEOUT)
        .build()?;

    let session = Session::new(
        &settings,
        OpenAiClient::new(http.clone(), &settings),
        ExaClient::new(http.clone(), &settings),
        GoogleTts::new(http, &settings),
    );

    let answers = Answers {
        topic: cli.topic,
        language: cli.language,
    };
    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut output = std::io::stdout();

    let outcome = session.run(&mut input, &mut output, answers).await?;

    info!(
        path = %outcome.audio_path.display(),
        articles = outcome.reading.articles().count(),
        script_chars = outcome.script.chars().count(),
        closing_chars = outcome.closing.chars().count(),
        "done"
    );
    Ok(())
}
