// src/pipeline.rs
//
// Line-oriented rewrite of a Netscape bookmark export.
//
// Five stages, run strictly in order, each a total function over the line list:
//   1. strip_header_lines   : drop the export doctype and the "DO NOT EDIT" comment
//   2. remove_title_heading : drop the default `<H1>Bookmarks</H1>`
//   3. normalize_tag_case   : lowercase tag names only (attributes/content untouched)
//   4. prune_empty_elements : collapse empty `<dl><p>`..`</dl><p>` blocks, drop bare `<p>`
//   5. finish_structure     : trim the tail, prepend the template, close body/html
//
// Lines are matched with substring and pattern tests on raw text; nothing is parsed
// into a tree. `\r\n` and lone `\r` become `\n` on input; after that each line keeps
// its own terminator so joining reproduces the normalized text.

use memchr::memchr;
use regex::Regex;
use std::borrow::Cow;
use std::ops::Range;
use std::sync::LazyLock;
use tracing::debug;

use crate::template::Template;

/// Ordered lines of a document, each with its original line break (if any).
pub type Document = Vec<String>;

/* ================================ Markers ================================ */

const HEADER_FRAGMENTS: [&str; 4] = [
    "<!DOCTYPE NETSCAPE-Bookmark-file-1>",
    "<!-- This is an automatically generated file.",
    "It will be read and overwritten.",
    "DO NOT EDIT! -->",
];

const FOLDER_OPEN: &str = "<dl><p>";
const FOLDER_CLOSE: &str = "</dl><p>";

static TITLE_HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<h1[^>]*>Bookmarks</h1>").unwrap());

/* ================================ Options ================================ */

/// 1-based inclusive line range for the tag-case normalizer.
///
/// The default covers the whole document. `start == 0` behaves like `1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LineRange {
    pub start: usize,
    pub end: Option<usize>,
}

impl Default for LineRange {
    fn default() -> Self {
        LineRange { start: 1, end: None }
    }
}

impl LineRange {
    pub fn new(start: usize, end: Option<usize>) -> Self {
        LineRange { start, end }
    }

    /// Whether the 1-based `line_no` falls inside the range.
    pub fn contains(&self, line_no: usize) -> bool {
        line_no >= self.start.max(1) && self.end.map_or(true, |end| line_no <= end)
    }
}

/// Per-conversion settings. Nothing here is global; every call passes its own.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Options {
    pub range: LineRange,
    pub template: Template,
}

/* ============================== Line helpers ============================= */

/// Split text into lines, keeping each `\n` on the line it ends.
///
/// `\r\n` and lone `\r` count as line breaks and come out as `\n`.
pub fn split_lines(text: &str) -> Document {
    normalize_line_breaks(text)
        .split_inclusive('\n')
        .map(str::to_owned)
        .collect()
}

fn normalize_line_breaks(text: &str) -> Cow<'_, str> {
    if memchr(b'\r', text.as_bytes()).is_none() {
        return Cow::Borrowed(text);
    }
    Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
}

pub fn join_lines(doc: &[String]) -> String {
    doc.concat()
}

#[inline]
fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

#[inline]
fn is_tag_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-'
}

/* ================================ Stages ================================= */

/// Stage 1: drop every line carrying one of the export boilerplate fragments.
pub fn strip_header_lines(doc: Document) -> Document {
    doc.into_iter()
        .filter(|line| !HEADER_FRAGMENTS.iter().any(|frag| line.contains(frag)))
        .collect()
}

/// Stage 2: drop lines holding an `<h1 ...>Bookmarks</h1>` heading (any case).
pub fn remove_title_heading(doc: Document) -> Document {
    doc.into_iter()
        .filter(|line| !TITLE_HEADING_RE.is_match(line))
        .collect()
}

/// Stage 3: lowercase tag names on the lines inside `range`.
pub fn normalize_tag_case(mut doc: Document, range: &LineRange) -> Document {
    for (idx, line) in doc.iter_mut().enumerate() {
        if range.contains(idx + 1) {
            lowercase_tag_names(line);
        }
    }
    doc
}

/// Rewrite every `<` `/`? NAME `[^>]*` `>` delimiter so NAME is lowercase.
///
/// NAME is a non-empty run of ASCII letters, digits and `-`. Matches do not overlap;
/// after a `<` that starts no delimiter, scanning resumes at the next byte.
fn lowercase_tag_names(line: &mut String) {
    let spans = tag_name_spans(line.as_bytes());
    for span in spans {
        // Spans cover ASCII bytes only, so they always sit on char boundaries.
        if let Some(name) = line.get_mut(span) {
            name.make_ascii_lowercase();
        }
    }
}

fn tag_name_spans(s: &[u8]) -> Vec<Range<usize>> {
    let n = s.len();
    let mut spans = Vec::new();
    let mut i = 0usize;

    while let Some(off) = memchr(b'<', &s[i..]) {
        let lt = i + off;
        let mut j = lt + 1;
        if j < n && s[j] == b'/' {
            j += 1;
        }
        let name_start = j;
        while j < n && is_tag_name_byte(s[j]) {
            j += 1;
        }
        if j == name_start {
            i = lt + 1;
            continue;
        }
        // No '>' left means no later '<' can close either.
        let Some(gt) = memchr(b'>', &s[j..]) else {
            break;
        };
        if s[name_start..j].iter().any(u8::is_ascii_uppercase) {
            spans.push(name_start..j);
        }
        i = j + gt + 1;
    }
    spans
}

/// Stage 4: collapse empty folders and drop standalone paragraph markers.
///
/// A `<dl><p>` line whose next non-blank line is `</dl><p>` disappears together with
/// the blank lines between and the close marker. Only one level is collapsed per pass.
pub fn prune_empty_elements(doc: Document) -> Document {
    let mut out = Vec::with_capacity(doc.len());
    let mut i = 0usize;

    while i < doc.len() {
        let marker = doc[i].trim().to_lowercase();

        if marker == FOLDER_OPEN {
            let mut next = i + 1;
            while next < doc.len() && is_blank(&doc[next]) {
                next += 1;
            }
            if next < doc.len() && doc[next].trim().to_lowercase() == FOLDER_CLOSE {
                i = next + 1;
                continue;
            }
        }

        if marker != "<p>" && marker != "</p>" {
            out.push(doc[i].clone());
        }
        i += 1;
    }
    out
}

/// Stage 5: trim the tail, prepend `template`, and close `body`/`html`.
pub fn finish_structure(mut doc: Document, template: &Template) -> Document {
    while doc.last().is_some_and(|line| is_blank(line)) {
        doc.pop();
    }
    while doc.last().is_some_and(|line| {
        let lower = line.to_lowercase();
        lower.contains("</body>") || lower.contains("</html>")
    }) {
        doc.pop();
    }

    doc.insert(0, template.render());

    if doc.last().is_some_and(|line| !is_blank(line)) {
        doc.push("\n".to_string());
    }
    doc.push("</body>\n".to_string());
    doc.push("</html>".to_string());
    doc
}

/* ================================== Run ================================== */

/// Apply all five stages in order.
pub fn run(doc: Document, options: &Options) -> Document {
    debug!(lines = doc.len(), "pipeline input");

    let doc = strip_header_lines(doc);
    debug!(lines = doc.len(), "header lines stripped");

    let doc = remove_title_heading(doc);
    debug!(lines = doc.len(), "title heading removed");

    let doc = normalize_tag_case(doc, &options.range);
    debug!(lines = doc.len(), range = ?options.range, "tag names lowercased");

    let doc = prune_empty_elements(doc);
    debug!(lines = doc.len(), "empty elements pruned");

    let doc = finish_structure(doc, &options.template);
    debug!(lines = doc.len(), "structure finished");

    doc
}
