use engine_logging::engine_trace;
use scraper::node::Node;
use scraper::{ElementRef, Html, Selector};

/// Blocks must be strictly longer than this, in characters, after trimming.
pub const MIN_BLOCK_CHARS: usize = 20;

/// One way of locating thread text in mirror markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Every element matching the selector is one block.
    Elements(&'static str),
    /// Paragraphs under the first element matching `container`.
    ContainerParagraphs { container: &'static str },
}

impl Strategy {
    pub fn describe(&self) -> &'static str {
        match self {
            Strategy::Elements(selector) => *selector,
            Strategy::ContainerParagraphs { container } => *container,
        }
    }

    fn collect(&self, doc: &Html) -> Vec<String> {
        match self {
            Strategy::Elements(selector) => match Selector::parse(selector) {
                Ok(sel) => qualifying_blocks(doc.select(&sel)),
                Err(_) => Vec::new(),
            },
            Strategy::ContainerParagraphs { container } => {
                let (Ok(container_sel), Ok(p_sel)) =
                    (Selector::parse(container), Selector::parse("p"))
                else {
                    return Vec::new();
                };
                doc.select(&container_sel)
                    .next()
                    .map(|node| qualifying_blocks(node.select(&p_sel)))
                    .unwrap_or_default()
            }
        }
    }
}

/// Most tweet-specific markup first, generic content container last.
pub const MIRROR_STRATEGIES: &[Strategy] = &[
    Strategy::Elements("div.tweet-text"),
    Strategy::Elements("div.content-tweet"),
    Strategy::Elements("p.tweet"),
    Strategy::Elements("div.t-main"),
    Strategy::ContainerParagraphs {
        container: "div.content",
    },
];

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExtractedThread {
    pub blocks: Vec<String>,
    /// Strategy that produced `blocks`; `None` when nothing qualified.
    pub strategy: Option<Strategy>,
}

impl ExtractedThread {
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

/// Tries each strategy in order and keeps the first that yields any
/// qualifying block; later strategies are never consulted.
#[derive(Debug, Clone)]
pub struct FallbackExtractor {
    strategies: &'static [Strategy],
}

impl FallbackExtractor {
    pub fn new(strategies: &'static [Strategy]) -> Self {
        Self { strategies }
    }

    pub fn extract(&self, html: &str) -> ExtractedThread {
        let doc = Html::parse_document(html);
        self.strategies
            .iter()
            .find_map(|strategy| {
                let blocks = strategy.collect(&doc);
                if blocks.is_empty() {
                    engine_trace!("No qualifying blocks for {}", strategy.describe());
                    return None;
                }
                Some(ExtractedThread {
                    blocks,
                    strategy: Some(*strategy),
                })
            })
            .unwrap_or_default()
    }
}

impl Default for FallbackExtractor {
    fn default() -> Self {
        Self::new(MIRROR_STRATEGIES)
    }
}

fn qualifying_blocks<'a>(elements: impl Iterator<Item = ElementRef<'a>>) -> Vec<String> {
    elements
        .map(visible_text)
        .filter(|text| text.chars().count() > MIN_BLOCK_CHARS)
        .collect()
}

/// Text of an element with script-like content dropped and whitespace runs
/// collapsed to single spaces.
pub fn visible_text(element: ElementRef<'_>) -> String {
    let mut raw = String::new();
    for node in element.descendants() {
        match node.value() {
            Node::Text(text) => {
                let hidden = node
                    .ancestors()
                    .filter_map(ElementRef::wrap)
                    .any(|el| is_hidden_tag(el.value().name()));
                if !hidden {
                    raw.push_str(text);
                }
            }
            Node::Element(el) if el.name().eq_ignore_ascii_case("br") => raw.push(' '),
            _ => {}
        }
    }
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn is_hidden_tag(name: &str) -> bool {
    matches!(
        name.to_ascii_lowercase().as_str(),
        "script" | "style" | "noscript" | "template"
    )
}
