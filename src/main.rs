use clap::Parser;
use std::path::PathBuf;
use summatrans::common::config::DeviceSetting;
use summatrans::common::resources::ResourceLocation;
use summatrans::server::{run_server, AppState};
use summatrans::AppConfig;

/// Web demo summarizing arbitrary-language text into English
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// JSON configuration file (defaults to the user configuration directory if present)
    #[arg(short, long, env = "SUMMATRANS_CONFIG")]
    config: Option<PathBuf>,

    /// Interface to bind to, overrides the configuration file
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to, overrides the configuration file
    #[arg(short, long)]
    port: Option<u16>,

    /// Converted mT5 XLSum weights (rust_model.ot), overrides the configuration file
    #[arg(long, env = "XLSUM_MODEL_PATH")]
    summarizer_weights: Option<PathBuf>,

    /// Run the models on CPU even if CUDA is available
    #[arg(long)]
    cpu: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut config = AppConfig::load(args.config.as_deref())?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(weights) = args.summarizer_weights {
        config.summarizer.model_resource = Some(ResourceLocation::local(weights));
    }
    if args.cpu {
        config.device = DeviceSetting::Cpu;
    }

    // Models are downloaded with blocking IO, before the actix runtime starts.
    let state = AppState::load(&config)?;
    actix_web::rt::System::new().block_on(run_server(state, &config.server))?;
    Ok(())
}
