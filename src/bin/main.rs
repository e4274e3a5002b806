use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "movie-explorer")]
#[command(about = "Movie search front-end for The Movie Database", long_about = None)]
struct Args {
    #[arg(short, long, default_value = "movie-explorer.yaml")]
    config: String,

    /// Log at debug level for this crate.
    #[arg(short, long)]
    debug: bool,

    /// Emit logs as JSON lines.
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let default_filter = if args.debug {
        "movie_explorer=debug,tower_http=debug"
    } else {
        "movie_explorer=info,tower_http=info"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    let registry = tracing_subscriber::registry().with(filter);
    if args.json_logs {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    if let Err(e) = movie_explorer::run(&args.config, args.debug).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
