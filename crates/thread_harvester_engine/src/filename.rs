const THREAD_SUFFIX: &str = "_thread.txt";

/// `{author_handle}_{item_id}_thread.txt`, with filename-hostile characters
/// in either component replaced by `_`.
pub fn thread_filename(author_handle: &str, item_id: &str) -> String {
    format!(
        "{}_{}{THREAD_SUFFIX}",
        sanitize_component(author_handle),
        sanitize_component(item_id)
    )
}

fn sanitize_component(input: &str) -> String {
    let cleaned: String = input
        .trim()
        .chars()
        .map(|c| if is_forbidden(c) { '_' } else { c })
        .collect();
    if cleaned.is_empty() {
        "unknown".to_string()
    } else {
        cleaned
    }
}

fn is_forbidden(c: char) -> bool {
    matches!(c,
        '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '\0'..='\u{1F}'
    )
}
