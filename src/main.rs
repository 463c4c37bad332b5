use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use sous::Provider;
use sous::core::config::{self, CliOverrides};
use sous::tui;
use std::fs::File;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "sous", about = "Recipe browser with an AI cooking assistant")]
struct Args {
    /// Chat backend (overrides SOUS_PROVIDER and the config file)
    #[arg(short, long, value_enum)]
    provider: Option<Provider>,

    /// Chat function URL (overrides SOUS_ENDPOINT and the config file)
    #[arg(short, long)]
    endpoint: Option<String>,

    /// Verbosity of sous.log
    #[arg(long, default_value_t = LevelFilter::Debug)]
    log_level: LevelFilter,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to sous.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create("sous.log") {
        let _ = WriteLogger::init(args.log_level, log_config, log_file);
    }

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            log::error!("Failed to load config: {}", e);
            eprintln!("sous: {e}");
            return ExitCode::FAILURE;
        }
    };

    let overrides = CliOverrides {
        provider: args.provider.map(|p| p.as_str().to_string()),
        endpoint: args.endpoint,
    };
    let resolved = match config::resolve(&file_config, &overrides) {
        Ok(r) => r,
        Err(e) => {
            log::error!("Failed to resolve config: {}", e);
            eprintln!("sous: {e}");
            return ExitCode::FAILURE;
        }
    };

    log::info!(
        "Sous starting up with provider: {}",
        resolved.provider.name()
    );

    match tui::run(resolved) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Terminal error: {}", e);
            eprintln!("sous: {e}");
            ExitCode::FAILURE
        }
    }
}
