//! The CLI's file-search rendering: merge overlapping/adjacent match spans
//! and mark them up in the source text.
//!
//! Mirrors the source's `util.highlight` + `regex.merge_intervals` pipeline:
//! every group span from every match is flattened into one list, merged down
//! to a minimal disjoint cover, then rendered against the original text.

/// Merges half-open `[start, end)` byte ranges into a sorted, disjoint cover.
/// Two ranges are merged when one starts at or before the other's end, i.e.
/// they overlap or touch with no gap between them.
pub fn merge_intervals(mut spans: Vec<(usize, usize)>) -> Vec<(usize, usize)> {
    if spans.len() < 2 {
        return spans;
    }
    spans.sort_unstable_by_key(|&(start, _)| start);
    let mut merged: Vec<(usize, usize)> = vec![spans[0]];
    for (start, end) in spans.into_iter().skip(1) {
        let top = merged.last_mut().expect("merged is non-empty");
        if start > top.1 {
            merged.push((start, end));
        } else if end > top.1 {
            top.1 = end;
        }
    }
    merged
}

/// Wraps `text` in ANSI bold-red escapes for terminal highlighting.
pub fn highlight(text: &str) -> String {
    format!("\x1b[1;31m{text}\x1b[0m")
}

/// Renders `text` with every span in `spans` highlighted. `spans` must
/// already be sorted and disjoint (the output of `merge_intervals`).
pub fn render(text: &str, spans: &[(usize, usize)]) -> String {
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for &(start, end) in spans {
        out.push_str(&text[cursor..start]);
        out.push_str(&highlight(&text[start..end]));
        cursor = end;
    }
    out.push_str(&text[cursor..]);
    out
}
