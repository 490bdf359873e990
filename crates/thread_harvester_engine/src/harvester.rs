use std::sync::Arc;

use engine_logging::{engine_debug, engine_info, engine_warn};

use crate::classify::ThreadUrl;
use crate::config::HarvesterConfig;
use crate::extract::FallbackExtractor;
use crate::fetch::{Fetcher, ReqwestFetcher};
use crate::persist::{ensure_output_dir, join_blocks, PersistError, ThreadWriter};
use crate::snowflake::created_time_iso;
use crate::title::infer_title;
use crate::{ContentType, HarvestError, HarvestOutcome, HarvestedThread, ThreadMetadata};

/// Runs the thread pipeline for one URL at a time:
/// classify, fetch from the mirror, extract, infer a title, write.
pub struct ThreadHarvester {
    fetcher: Arc<dyn Fetcher>,
    extractor: FallbackExtractor,
    writer: ThreadWriter,
}

impl ThreadHarvester {
    pub fn new(config: HarvesterConfig) -> Self {
        let fetcher = Arc::new(ReqwestFetcher::new(config.fetch.clone()));
        Self::with_fetcher(config, fetcher)
    }

    pub fn with_fetcher(config: HarvesterConfig, fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            fetcher,
            extractor: FallbackExtractor::default(),
            writer: ThreadWriter::new(config.raw_dir),
        }
    }

    /// Creates the raw directory and checks it is writable. Call once before
    /// the first harvest; repeated calls are harmless.
    pub fn initialize(&self) -> Result<(), PersistError> {
        ensure_output_dir(self.writer.raw_dir())
    }

    pub async fn harvest(&self, url: &str) -> Result<HarvestedThread, HarvestError> {
        engine_info!("Fetching thread from {}", url);
        let thread_url = ThreadUrl::parse(url)?;
        let item_id = thread_url.item_id();
        let handle = thread_url.author_handle();
        engine_info!("Item id {}, author @{}", item_id, handle);

        let page = self.fetcher.fetch_rendered_page(item_id).await?;
        engine_debug!(
            "Mirror answered {} for {} after {} redirects",
            page.status,
            page.metadata.request_url,
            page.metadata.redirect_count
        );

        let created_time = created_time_iso(item_id);
        match created_time.as_deref() {
            Some(at) => engine_info!("Thread created at {}", at),
            None => engine_warn!("Could not decode creation time from item id {}", item_id),
        }

        let extracted = self.extractor.extract(&page.body);
        let Some(strategy) = extracted.strategy else {
            return Err(HarvestError::Extraction {
                item_id: item_id.to_string(),
            });
        };
        engine_info!(
            "Found {} blocks with {}",
            extracted.blocks.len(),
            strategy.describe()
        );

        let title = infer_title(&join_blocks(&extracted.blocks), handle);
        engine_info!("Title: {}", title);

        let file_path = self
            .writer
            .write_thread(handle, item_id, &extracted.blocks)?;

        Ok(HarvestedThread {
            file_path,
            metadata: ThreadMetadata {
                title,
                uploader: handle.to_string(),
                url: thread_url.as_str().to_string(),
                created_time,
                content_type: ContentType::TwitterThread,
            },
            block_count: extracted.blocks.len(),
        })
    }

    /// Same as [`harvest`](Self::harvest), collapsed to the uniform
    /// success/path/metadata outcome. Failures are logged, never raised.
    pub async fn fetch_thread(&self, url: &str) -> HarvestOutcome {
        let result = self.harvest(url).await;
        if let Err(err) = &result {
            engine_warn!("Thread harvest failed for {}: {}", url, err);
        }
        result.into()
    }

    /// Blocking form of [`fetch_thread`](Self::fetch_thread) on a private
    /// current-thread runtime. Must not be called from within a Tokio runtime.
    pub fn fetch_thread_blocking(&self, url: &str) -> HarvestOutcome {
        let runtime = match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                engine_warn!("Could not start runtime for {}: {}", url, err);
                return HarvestOutcome::failed();
            }
        };
        runtime.block_on(self.fetch_thread(url))
    }
}
