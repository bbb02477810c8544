//! Indentation-aware block line sorting.
//!
//! Selected lines are grouped into blocks — a leader line at (or below)
//! the range's base indentation plus every following deeper-indented or
//! blank line — and the blocks are reordered as units. Lines inside a
//! block never move relative to each other, so a heading drags its
//! indented children along and concatenating the blocks in original order
//! always reproduces the input.

use std::cmp::Ordering;
use std::sync::LazyLock;

use core_events::{EditorSurface, SelectionSpan};
use regex::Regex;
use tracing::debug;

/// One sortable unit: a leader line plus its continuation lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    lines: Vec<String>,
}

impl Block {
    /// Sort key: the first non-blank line, trimmed. `None` only for the
    /// all-blank implicit block.
    fn key(&self) -> Option<&str> {
        self.lines.iter().find(|l| !is_blank(l)).map(|l| l.trim())
    }
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Leading whitespace measured as a raw count of space/tab characters.
/// Mixed tab/space indentation is deliberately not normalized.
fn indent_width(line: &str) -> usize {
    line.chars().take_while(|c| *c == ' ' || *c == '\t').count()
}

/// Split `lines` into blocks against the minimum indentation of the
/// range's non-blank lines. Blank lines ahead of the first leader attach
/// to the block that follows them; trailing blanks stay with the last
/// block; a range with no leader at all (only blank lines) is one
/// implicit block.
pub fn partition_blocks(lines: &[String]) -> Vec<Block> {
    let base_indent = lines
        .iter()
        .filter(|l| !is_blank(l))
        .map(|l| indent_width(l))
        .min();
    let Some(base_indent) = base_indent else {
        return vec![Block {
            lines: lines.to_vec(),
        }];
    };

    let mut blocks: Vec<Block> = Vec::new();
    let mut pending: Vec<String> = Vec::new();
    for line in lines {
        let is_leader = !is_blank(line) && indent_width(line) <= base_indent;
        if is_leader {
            let mut block_lines = std::mem::take(&mut pending);
            block_lines.push(line.clone());
            blocks.push(Block { lines: block_lines });
        } else if let Some(last) = blocks.last_mut() {
            last.lines.push(line.clone());
        } else {
            pending.push(line.clone());
        }
    }
    // A non-blank line at base_indent is always a leader, so by the time
    // the scan ends every pending blank has been absorbed.
    debug_assert!(pending.is_empty());
    blocks
}

/// Sort the range's lines as blocks and return them re-flattened.
pub fn sort_lines(lines: &[String]) -> Vec<String> {
    let mut blocks = partition_blocks(lines);
    debug!(target: "sort.blocks", lines = lines.len(), blocks = blocks.len(), "range_partitioned");
    blocks.sort_by(|a, b| compare_blocks(a, b));
    blocks.into_iter().flat_map(|b| b.lines).collect()
}

/// Sort every selected line range through the host surface.
pub fn sort_selected_ranges<S: EditorSurface>(surface: &mut S) -> anyhow::Result<()> {
    for span in surface.selected_line_ranges()? {
        let (start, end) = span.normalized();
        let mut lines = Vec::with_capacity(end - start + 1);
        for number in start..=end {
            lines.push(surface.line(number)?);
        }
        let sorted = sort_lines(&lines);
        surface.replace_line_range(&sorted.join("\n"), span)?;
    }
    Ok(())
}

fn compare_blocks(a: &Block, b: &Block) -> Ordering {
    match (a.key(), b.key()) {
        (Some(ka), Some(kb)) => compare_keys(ka, kb),
        // Keyless blocks only exist alone; keep whatever order they have.
        _ => Ordering::Equal,
    }
}

static LEADING_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+(\.\d+)*").expect("leading number pattern compiles"));

fn leading_number(key: &str) -> Option<&str> {
    LEADING_NUMBER.find(key).map(|m| m.as_str())
}

/// Keys with a leading numeric token order before keys without one and
/// compare by the token's dot-separated numeric components; token ties and
/// tokenless pairs fall through to case-insensitive full-string order.
fn compare_keys(a: &str, b: &str) -> Ordering {
    match (leading_number(a), leading_number(b)) {
        (Some(na), Some(nb)) => compare_dotted(na, nb).then_with(|| caseless_cmp(a, b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => caseless_cmp(a, b),
    }
}

fn compare_dotted(a: &str, b: &str) -> Ordering {
    let mut left = a.split('.');
    let mut right = b.split('.');
    loop {
        match (left.next(), right.next()) {
            (Some(x), Some(y)) => match compare_component(x, y) {
                Ordering::Equal => continue,
                other => return other,
            },
            (Some(_), None) => return Ordering::Greater,
            (None, Some(_)) => return Ordering::Less,
            (None, None) => return Ordering::Equal,
        }
    }
}

/// Compare two digit runs by magnitude without parsing: strip leading
/// zeros, then longer wins, then lexical.
fn compare_component(x: &str, y: &str) -> Ordering {
    let x = x.trim_start_matches('0');
    let y = y.trim_start_matches('0');
    x.len().cmp(&y.len()).then_with(|| x.cmp(y))
}

fn caseless_cmp(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn sorts_flat_lines_case_insensitively() {
        let input = lines(&["- item B", "- item A"]);
        assert_eq!(sort_lines(&input), lines(&["- item A", "- item B"]));
    }

    #[test]
    fn numeric_prefixes_sort_numerically() {
        let input = lines(&["3. three", "1. one", "2. two"]);
        assert_eq!(sort_lines(&input), lines(&["1. one", "2. two", "3. three"]));
    }

    #[test]
    fn numeric_is_not_lexical() {
        let input = lines(&["10. ten", "9. nine", "2. two"]);
        assert_eq!(sort_lines(&input), lines(&["2. two", "9. nine", "10. ten"]));
    }

    #[test]
    fn dotted_versions_compare_componentwise() {
        let input = lines(&["1.10 late", "1.2 early", "1.2.1 patch"]);
        assert_eq!(
            sort_lines(&input),
            lines(&["1.2 early", "1.2.1 patch", "1.10 late"])
        );
    }

    #[test]
    fn numeric_keys_sort_before_plain_keys() {
        let input = lines(&["beta", "2 second", "alpha", "1 first"]);
        assert_eq!(
            sort_lines(&input),
            lines(&["1 first", "2 second", "alpha", "beta"])
        );
    }

    #[test]
    fn children_move_with_their_leader() {
        let input = lines(&["Parent B", "  child of B", "Parent A"]);
        assert_eq!(
            sort_lines(&input),
            lines(&["Parent A", "Parent B", "  child of B"])
        );
    }

    #[test]
    fn blank_lines_inside_a_block_stay_in_it() {
        let input = lines(&["Parent B", "", "  child of B", "Parent A"]);
        assert_eq!(
            sort_lines(&input),
            lines(&["Parent A", "Parent B", "", "  child of B"])
        );
    }

    #[test]
    fn leading_blanks_attach_to_the_first_block() {
        let input = lines(&["", "zebra", "apple"]);
        assert_eq!(sort_lines(&input), lines(&["apple", "", "zebra"]));
    }

    #[test]
    fn trailing_blanks_attach_to_the_last_block() {
        let input = lines(&["zebra", "apple", ""]);
        assert_eq!(sort_lines(&input), lines(&["apple", "", "zebra"]));
    }

    #[test]
    fn all_blank_range_is_one_block_and_a_noop() {
        let input = lines(&["", "  ", ""]);
        assert_eq!(sort_lines(&input), input);
    }

    #[test]
    fn mixed_tab_space_indent_compares_by_raw_count() {
        // "\tchild" is one indent character, same depth class as " child"
        // would be: deeper than the zero-indent leaders.
        let input = lines(&["b heading", "\tchild", "a heading"]);
        assert_eq!(
            sort_lines(&input),
            lines(&["a heading", "b heading", "\tchild"])
        );
    }

    #[test]
    fn equal_keys_keep_original_order() {
        let input = lines(&["same", "  first child", "SAME", "  second child"]);
        assert_eq!(sort_lines(&input), input);
    }

    #[test]
    fn partition_concatenation_reproduces_input() {
        let input = lines(&[
            "", "3. c", "  deep", "", "1. a", "\t\tdeeper", "2. b", "",
        ]);
        let flattened: Vec<String> = partition_blocks(&input)
            .into_iter()
            .flat_map(|b| b.lines)
            .collect();
        assert_eq!(flattened, input);
    }

    #[test]
    fn deeper_leaders_are_children_of_the_shallowest() {
        let input = lines(&["  b", "    b child", "  a"]);
        assert_eq!(sort_lines(&input), lines(&["  a", "  b", "    b child"]));
    }
}
