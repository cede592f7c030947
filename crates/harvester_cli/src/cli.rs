use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use catalog_harvester::{HarvestConfig, Mirror, DEFAULT_OUTPUT_FILENAME};
use clap::Parser;
use engine_logging::LogDestination;
use log::LevelFilter;

/// Crawl a JDK mirror and write a sorted download catalog.
#[derive(Debug, Parser)]
#[command(name = "catalog-harvester", version)]
pub struct Args {
    /// Mirror to crawl: tuna, lzu, huawei, injdk or azul (not implemented).
    #[arg(long, default_value = "lzu", value_parser = clap::value_parser!(Mirror))]
    pub mirror: Mirror,

    /// Override the mirror's root listing URL (must end with '/').
    #[arg(long)]
    pub base_url: Option<String>,

    /// Catalog output path.
    #[arg(long, short, default_value = DEFAULT_OUTPUT_FILENAME)]
    pub output: PathBuf,

    /// Per-request timeout in seconds.
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,

    /// Maximum concurrent requests against the mirror.
    #[arg(long, default_value_t = 4)]
    pub max_in_flight: usize,

    /// Also write the log to this file.
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Log per-file diagnostics.
    #[arg(long, short)]
    pub verbose: bool,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn log_destination(&self) -> LogDestination {
        match &self.log_file {
            Some(path) => LogDestination::Both(path.clone()),
            None => LogDestination::Terminal,
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        }
    }

    pub fn harvest_config(&self) -> anyhow::Result<HarvestConfig> {
        let mut config = HarvestConfig::for_mirror(self.mirror);
        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        config.output_path = self.output.clone();
        config.fetch.request_timeout = Duration::from_secs(self.timeout_secs);
        config.fetch.max_in_flight = self.max_in_flight.max(1);
        if config.mirror != Mirror::Azul {
            config
                .validate()
                .with_context(|| format!("invalid settings for mirror {}", config.mirror))?;
        }
        Ok(config)
    }
}
