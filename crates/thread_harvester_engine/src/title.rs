use std::sync::LazyLock;

use regex::Regex;

use crate::persist::BLOCK_SEPARATOR;

pub const MAX_TITLE_CHARS: usize = 100;
pub const MIN_TITLE_CHARS: usize = 20;
const TRUNCATED_CHARS: usize = 97;
const ELLIPSIS: &str = "...";

static URL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"https?://\S+").expect("valid regex"));
static MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\(thread\)|\[thread\]").expect("valid regex"));
static SENTENCE_END_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]\s+").expect("valid regex"));

/// Display title for a thread, taken from its first block.
///
/// Links and `(thread)`/`[thread]` markers are removed. Long text is cut to
/// its first sentence when that fits in 100 characters, otherwise to 97
/// characters plus `...`. Anything under 20 characters falls back to
/// `Thread by @<handle>`.
pub fn infer_title(thread_text: &str, author_handle: &str) -> String {
    let first_block = thread_text
        .split(BLOCK_SEPARATOR)
        .next()
        .unwrap_or_default()
        .trim();
    let without_urls = URL_RE.replace_all(first_block, "");
    let candidate = MARKER_RE.replace_all(&without_urls, "");

    let title = if candidate.chars().count() > MAX_TITLE_CHARS {
        let first_sentence = SENTENCE_END_RE.split(&candidate).next().unwrap_or_default();
        if first_sentence.chars().count() <= MAX_TITLE_CHARS {
            first_sentence.to_string()
        } else {
            let mut cut: String = candidate.chars().take(TRUNCATED_CHARS).collect();
            cut.push_str(ELLIPSIS);
            cut
        }
    } else {
        candidate.into_owned()
    };

    let title = title.trim();
    if title.chars().count() < MIN_TITLE_CHARS {
        fallback_title(author_handle)
    } else {
        title.to_string()
    }
}

pub fn fallback_title(author_handle: &str) -> String {
    format!("Thread by @{author_handle}")
}
