//! Section extraction from a flat running-config.
//!
//! A section is the header line that matches a resource's header pattern
//! plus every following line indented deeper than the header. It ends at the
//! first line whose indentation is at or below the header's, or at the end
//! of the text. Lines are returned verbatim, line breaks included.
//!
//! ```text
//! vlan 10            <- header, indent 0
//!    name BIGDATA    <- member
//!    state active    <- member
//! !                  <- indent 0, ends the section
//! ```

use indexmap::{IndexMap, IndexSet};
use regex::Regex;

/// A bounded block of configuration belonging to one resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Header line without indentation or line break
    pub header: String,
    /// Header plus member lines, verbatim
    pub content: String,
    /// Indentation of the header, in characters
    pub indent: usize,
    /// 1-based line number of the header
    pub start_line: usize,
    /// 1-based line number of the last member (or the header)
    pub end_line: usize,
}

/// Leading whitespace width of a line.
fn indentation(line: &str) -> usize {
    line.len() - line.trim_start().len()
}

/// Line content without its trailing line break.
fn strip_eol(line: &str) -> &str {
    line.trim_end_matches(['\n', '\r'])
}

/// Find the first section whose header line matches `header`.
///
/// `header` is matched against each line with its line break removed, so
/// anchors (`^...$`) bound the whole line and an id like `1` never matches
/// the header of `10`.
pub fn find_section(config: &str, header: &Regex) -> Option<Section> {
    let mut lines = config.split_inclusive('\n').enumerate();

    let (start, indent, mut content, header_text) = loop {
        let (idx, line) = lines.next()?;
        let bare = strip_eol(line);
        if header.is_match(bare) {
            break (idx, indentation(bare), line.to_string(), bare.trim().to_string());
        }
    };

    let mut end = start;
    for (idx, line) in lines {
        if indentation(strip_eol(line)) <= indent {
            break;
        }
        content.push_str(line);
        end = idx;
    }

    Some(Section {
        header: header_text,
        content,
        indent,
        start_line: start + 1,
        end_line: end + 1,
    })
}

/// Text of the section whose header matches `header`, or an empty string
/// when there is none.
pub fn get_section(config: &str, header: &Regex) -> String {
    find_section(config, header)
        .map(|s| s.content)
        .unwrap_or_default()
}

/// Every first capture group of `header` across `config`, in order of first
/// appearance, without duplicates.
///
/// Used to enumerate resource ids: with `^vlan (\d+)$` this yields every VLAN
/// id that has a section.
pub fn find_headers(config: &str, header: &Regex) -> Vec<String> {
    config
        .lines()
        .filter_map(|line| header.captures(line)?.get(1))
        .map(|id| id.as_str().to_string())
        .collect::<IndexSet<_>>()
        .into_iter()
        .collect()
}

/// Every section whose header matches `header`, keyed by the header's first
/// capture group, in one pass over `config`.
///
/// Sections never overlap: a matching line inside an open section's body
/// belongs to that body. For headers anchored at column 0 each section is
/// what [`find_section`] returns for that header. When a key repeats, the
/// first section wins. Headers without a capture group are ignored.
pub fn find_sections(config: &str, header: &Regex) -> IndexMap<String, Section> {
    let mut sections = IndexMap::new();
    let mut current: Option<(String, Section)> = None;

    for (idx, line) in config.split_inclusive('\n').enumerate() {
        let bare = strip_eol(line);

        if let Some((_, section)) = current.as_mut() {
            if indentation(bare) > section.indent {
                section.content.push_str(line);
                section.end_line = idx + 1;
                continue;
            }
        }
        if let Some((key, section)) = current.take() {
            sections.entry(key).or_insert(section);
        }

        let Some(key) = header.captures(bare).and_then(|caps| caps.get(1)) else {
            continue;
        };
        current = Some((
            key.as_str().to_string(),
            Section {
                header: bare.trim().to_string(),
                content: line.to_string(),
                indent: indentation(bare),
                start_line: idx + 1,
                end_line: idx + 1,
            },
        ));
    }

    if let Some((key, section)) = current {
        sections.entry(key).or_insert(section);
    }
    sections
}
