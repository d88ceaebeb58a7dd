use clap::Parser;
use muse::Tool;
use muse::core::config::{self, CliOverrides, MuseConfig};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "muse", about = "AI conversation and code generation in the terminal")]
struct Args {
    /// Tool page to open first
    #[arg(short, long, value_enum)]
    tool: Option<Tool>,

    /// Base URL of the generation service
    #[arg(long)]
    base_url: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to muse.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create("muse.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = match config::load_config() {
        Ok(cfg) => cfg,
        Err(e) => {
            log::warn!("Config load failed, using defaults: {e}");
            MuseConfig::default()
        }
    };

    let cli = CliOverrides {
        tool: args.tool,
        base_url: args.base_url,
    };
    let resolved = config::resolve(&file_config, &cli);

    log::info!(
        "Muse starting up on {:?} against {}",
        resolved.tool,
        resolved.base_url
    );

    muse::tui::run(resolved)
}
