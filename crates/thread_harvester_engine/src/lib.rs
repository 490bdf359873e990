//! Thread harvester engine: turn a twitter.com/x.com status URL into a plain
//! text thread file plus metadata, using a thread-rendering mirror.
mod classify;
mod config;
mod decode;
mod extract;
mod fetch;
mod filename;
mod harvester;
mod persist;
mod snowflake;
mod title;
mod types;

pub use classify::{
    extract_author_handle, extract_item_id, is_supported_url, ClassifyError, ThreadUrl,
};
pub use config::HarvesterConfig;
pub use decode::{decode_body, DecodedBody};
pub use extract::{
    visible_text, ExtractedThread, FallbackExtractor, Strategy, MIN_BLOCK_CHARS,
    MIRROR_STRATEGIES,
};
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher, DEFAULT_MIRROR_BASE_URL, DEFAULT_USER_AGENT};
pub use filename::thread_filename;
pub use harvester::ThreadHarvester;
pub use persist::{
    ensure_output_dir, join_blocks, AtomicFileWriter, PersistError, ThreadWriter, BLOCK_SEPARATOR,
};
pub use snowflake::{
    created_time_iso, snowflake_created_at, snowflake_timestamp_millis, EPOCH_OFFSET_MILLIS,
};
pub use title::{fallback_title, infer_title, MAX_TITLE_CHARS, MIN_TITLE_CHARS};
pub use types::{
    ContentType, FailureKind, FetchError, FetchMetadata, FetchOutput, HarvestError,
    HarvestOutcome, HarvestedThread, ThreadMetadata,
};
