use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use log::LevelFilter;
use thread_harvester_engine::{HarvesterConfig, DEFAULT_MIRROR_BASE_URL};

use crate::logging::LogDestination;

#[derive(Parser, Debug, Clone)]
#[command(name = "thread-harvester")]
#[command(about = "Save a twitter.com/x.com thread as plain text via a rendering mirror", long_about = None)]
pub struct Cli {
    /// Status URL of the thread's first tweet.
    pub url: String,

    /// Directory thread files are written to. Overrides --base-dir.
    #[arg(long, env = "THREAD_HARVESTER_RAW_DIR")]
    pub raw_dir: Option<PathBuf>,

    /// Base directory; files go to <base-dir>/transcript/raw.
    #[arg(long, default_value = ".")]
    pub base_dir: PathBuf,

    #[arg(long, env = "THREAD_HARVESTER_MIRROR_URL", default_value = DEFAULT_MIRROR_BASE_URL)]
    pub mirror_url: String,

    #[arg(long, default_value = "30")]
    pub timeout_secs: u64,

    #[arg(long, value_enum, default_value = "terminal")]
    pub log: LogDestination,

    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn harvester_config(&self) -> HarvesterConfig {
        let mut config = match &self.raw_dir {
            Some(dir) => HarvesterConfig::default_with_output(dir.clone()),
            None => HarvesterConfig::from_base_dir(&self.base_dir),
        };
        config.fetch.mirror_base_url = self.mirror_url.clone();
        config.fetch.request_timeout = Duration::from_secs(self.timeout_secs);
        config
    }

    pub fn log_level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        }
    }
}
