use clap::Parser;
use parley::api::HttpAgentClient;
use parley::core::config::{self, CliOverrides};
use parley::core::locale::Locale;
use parley::core::state::App;
use parley::{headless, tui};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "parley", about = "Terminal chat client for a remote agent service")]
struct Args {
    /// Base address of the agent backend (e.g. http://localhost:5000)
    #[arg(short, long)]
    base_url: Option<String>,

    /// Language of the interface texts
    #[arg(short, long, value_enum)]
    locale: Option<Locale>,

    /// Send a single prompt without the terminal UI and print the transcript
    #[arg(short, long)]
    prompt: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to parley.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("parley.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = match config::load_config() {
        Ok(config) => config,
        Err(e) => {
            log::warn!("Failed to load config: {}", e);
            eprintln!("parley: {e}");
            std::process::exit(2);
        }
    };
    let resolved = config::resolve(
        &file_config,
        &CliOverrides {
            base_url: args.base_url.as_deref(),
            locale: args.locale,
        },
    );

    log::info!(
        "Parley starting up: base_url={}, locale={:?}",
        resolved.base_url,
        resolved.locale
    );

    match args.prompt {
        Some(prompt) => {
            let backend = Arc::new(HttpAgentClient::new(resolved.base_url.clone()));
            let mut app = App::from_config(backend, &resolved);
            headless::run_once(&mut app, &prompt).await;
            print!("{}", headless::render(&app));
            Ok(())
        }
        None => tui::run(resolved),
    }
}
