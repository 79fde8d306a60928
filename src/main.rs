use clap::Parser;
use parley::core::config::{CliOverrides, load_config, resolve};
use parley::core::reply::DeliveryPolicy;
use parley::tui;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "parley", about = "Terminal chat assistant with a simulated backend")]
struct Args {
    /// Where a pending reply goes if you switch conversations
    #[arg(short, long, value_enum)]
    delivery: Option<DeliveryPolicy>,

    /// Start with the sidebar collapsed
    #[arg(long)]
    sidebar_closed: bool,

    /// Log file path
    #[arg(long, default_value = "parley.log")]
    log_file: PathBuf,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to parley.log in current directory by default
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create(&args.log_file) {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = load_config().map_err(std::io::Error::other)?;
    let cli = CliOverrides {
        delivery: args.delivery,
        sidebar_closed: args.sidebar_closed,
    };
    let config = resolve(&file_config, &cli);

    log::info!(
        "Parley starting up (brand: {}, delivery: {:?})",
        config.brand,
        config.reply.delivery
    );

    tui::run(config)
}
