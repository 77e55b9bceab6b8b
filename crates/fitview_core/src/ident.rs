//! Identifier conventions shared with the report generator.
//!
//! Header cells carry ids of the form `<prefix>_level<L>_col<N>` and data
//! cells `<prefix>_row<R>_col<N>`. Support-page links embed a composite key
//! `_<cost_func>_<minimizer>_[<software>` that ties a cell to its column.

/// Header level of the cost function row.
pub const COST_FUNCTION_LEVEL: u8 = 0;
/// Header level of the software row.
pub const SOFTWARE_LEVEL: u8 = 1;
/// Header level of the minimizer row.
pub const MINIMIZER_LEVEL: u8 = 2;

/// Extracts the first `col<digits>` group from an element id.
///
/// Ids without such a group (or with an overflowing number) yield `None`,
/// which callers treat as "no match".
pub fn parse_column_number(id: &str) -> Option<usize> {
    digits_after(id, "col")
}

/// Extracts the header level from a `<prefix>_level<L>_col<N>` id.
pub fn parse_header_level(id: &str) -> Option<u8> {
    digits_after(id, "level").and_then(|level| u8::try_from(level).ok())
}

fn digits_after(id: &str, marker: &str) -> Option<usize> {
    let mut search = id;
    while let Some(pos) = search.find(marker) {
        let rest = &search[pos + marker.len()..];
        let end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        if end > 0 {
            return rest[..end].parse().ok();
        }
        search = rest;
    }
    None
}

pub fn header_id(prefix: &str, level: u8, column: usize) -> String {
    format!("{prefix}_level{level}_col{column}")
}

/// Lookup key for a cost function: trimmed and case-folded.
pub fn cost_function_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Lookup key for a minimizer.
///
/// Cost-function selector annotations are dropped, so
/// `"lm-scipy: j:best_available"` becomes `"lm-scipy"`.
pub fn minimizer_key(name: &str) -> String {
    let prefix = match name.split_once(':') {
        Some((prefix, _)) => prefix,
        None => name,
    };
    prefix.trim().to_lowercase()
}

/// Software token as it appears in support-page links (hyphens become underscores).
pub fn software_token(name: &str) -> String {
    name.trim().replace('-', "_")
}

/// Composite key `_<cost_func>_<minimizer>_[<software>` identifying one
/// minimizer column.
pub fn composite_key(cost_func: &str, minimizer: &str, software: &str) -> String {
    format!(
        "_{}_{}_[{}",
        cost_function_key(cost_func),
        minimizer_key(minimizer),
        software_token(software)
    )
}
