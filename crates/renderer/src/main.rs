//! Media Renderer - render a url as an image or a video element.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use media_detect::{AttributeMap, RenderPhase};
use media_renderer::{RenderEngine, RendererConfig};

/// Detect whether a url is an image or a video and print the element for it
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Media URL
    url: String,

    /// Detection strategy: fileExtension, contentTypeHeader or zeroByteGet
    #[arg(short, long)]
    strategy: Option<String>,

    /// Generic attribute (name=value, or a bare name for boolean attributes)
    #[arg(long = "attr", value_name = "NAME=VALUE")]
    attrs: Vec<String>,

    /// Attribute applied only to image output
    #[arg(long = "image-attr", value_name = "NAME=VALUE")]
    image_attrs: Vec<String>,

    /// Attribute applied only to video output
    #[arg(long = "video-attr", value_name = "NAME=VALUE")]
    video_attrs: Vec<String>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// User agent string
    #[arg(long)]
    user_agent: Option<String>,

    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn parse_attributes(pairs: &[String]) -> Result<AttributeMap> {
    pairs
        .iter()
        .map(|pair| {
            AttributeMap::parse_pair(pair)
                .with_context(|| format!("Invalid attribute: {:?}", pair))
        })
        .collect()
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Media Renderer v{}", media_renderer::VERSION);

    // Build configuration
    let mut config = match &args.config {
        Some(path) => RendererConfig::from_file(path)
            .with_context(|| format!("Loading {}", path.display()))?,
        None => RendererConfig::default(),
    };

    if let Some(strategy) = args.strategy {
        config.default_strategy = strategy;
    }
    if let Some(timeout) = args.timeout {
        config.request_timeout = Some(timeout);
    }
    if let Some(ua) = args.user_agent {
        config.user_agent = ua;
    }

    let engine = RenderEngine::new(config)?;

    let props = engine
        .props(&args.url)
        .attributes(parse_attributes(&args.attrs)?)
        .image_props(parse_attributes(&args.image_attrs)?)
        .video_props(parse_attributes(&args.video_attrs)?);

    let report = engine.render(props).await?;

    if let Some(error) = &report.error {
        tracing::error!("{}", error);
        return Ok(ExitCode::from(2));
    }

    match (&report.phase, &report.element) {
        (RenderPhase::Resolved(kind), Some(element)) => {
            info!("Detected {}", kind);
            println!("{}", element);
        }
        _ => info!("Nothing to render for {}", args.url),
    }

    Ok(ExitCode::SUCCESS)
}
