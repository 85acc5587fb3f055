use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use vidchat::Recognizer;
use vidchat::core::config;
use vidchat::tui;

#[derive(Parser)]
#[command(name = "vidchat", about = "Watch a video and ask questions about it by voice")]
struct Args {
    /// Speech recognizer to use (overrides config and VIDCHAT_RECOGNIZER)
    #[arg(short, long, value_enum)]
    recognizer: Option<Recognizer>,

    /// Video URL to open right away, skipping the form
    #[arg(short, long)]
    url: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to vidchat.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create("vidchat.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            log::warn!("Falling back to default config: {}", e);
            eprintln!("vidchat: {e}, using defaults");
            config::VidchatConfig::default()
        }
    };
    let resolved = config::resolve(
        &file_config,
        args.recognizer.as_ref().map(Recognizer::config_name),
        args.url.as_deref(),
    );

    log::info!("vidchat starting up with recognizer: {}", resolved.recognizer);

    tui::run(resolved)
}
