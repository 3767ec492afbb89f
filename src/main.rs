use std::path::Path;

use anyhow::Context;
use clap::Parser;
use log::info;

use vmedia::api::MediaApi;
use vmedia::conf::Config;
use vmedia::core::{CliArgs, setup_logging};
use vmedia::service::MediaService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    let config = Config::load(args.config.as_deref().map(Path::new))
        .context("loading configuration")?;

    setup_logging(&config.server.log_level);
    info!(args = args; "vmedia started.");
    let root = config.media.root.display().to_string();
    let addr = config.server.addr();
    info!(root = root.as_str(), addr = addr.as_str(); "Serving media");

    let api = MediaApi::new(MediaService::new(config));
    api.serve(&addr).await.context("running HTTP server")?;
    Ok(())
}
