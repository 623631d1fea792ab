use ami_features::config::PipelineConfig;
use ami_features::pipeline;
use anyhow::Context;
use log::info;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = PipelineConfig::from_env().context("Failed to read pipeline configuration")?;
    let summary = pipeline::run(&config).context("Feature pipeline failed")?;
    info!("Done: {summary}");

    Ok(())
}
