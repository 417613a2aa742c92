//! Locates marker-delimited sections inside a raw support dump.
//!
//! Section markers are literal, case-sensitive strings such as `# status`
//! that appear at the start of a line. A marker only matches when the rest of
//! the line is empty or separated from the marker by whitespace, so `# serial`
//! never matches a `# serialpassthrough` line.

/// Character that opens every section marker line.
pub const SECTION_MARKER: char = '#';

pub const STATUS: &str = "# status";
pub const DMA_SHOW: &str = "# dma show";
pub const TIMER_SHOW: &str = "# timer show";
pub const SERIAL: &str = "# serial";
pub const AUX: &str = "# aux";
pub const DUMP_MASTER: &str = "# dump master";
pub const VERSION: &str = "# version";
pub const BATCH_END: &str = "batch end";
pub const PROBLEM_DESCRIPTION: &str = "# Problem description";

/// A line of the input together with its byte offsets.
#[derive(Debug, Clone, Copy)]
struct Line<'a> {
    start: usize,
    end: usize,
    text: &'a str,
}

fn lines_with_offsets(text: &str) -> impl Iterator<Item = Line<'_>> {
    let mut offset = 0;
    text.split_inclusive('\n').map(move |raw| {
        let start = offset;
        offset += raw.len();
        Line {
            start,
            end: offset,
            text: raw.trim_end_matches(['\n', '\r']),
        }
    })
}

fn is_marker_line(line: &str, marker: &str) -> bool {
    match line.trim_start().strip_prefix(marker) {
        Some(rest) => rest.is_empty() || rest.starts_with(char::is_whitespace),
        None => false,
    }
}

fn is_section_start(line: &str) -> bool {
    line.trim_start().starts_with(SECTION_MARKER)
}

/// Find the text strictly between `start` and `end`, trimmed.
///
/// With `end == None` the section runs until the next line that begins with
/// [`SECTION_MARKER`] or the end of the input. With an explicit end marker the
/// section must be closed by it; an unclosed section is reported as absent.
pub fn find_section<'a>(text: &'a str, start: &str, end: Option<&str>) -> Option<&'a str> {
    let mut lines = lines_with_offsets(text).skip_while(|l| !is_marker_line(l.text, start));
    let opening = lines.next()?;
    let body_start = opening.end;

    let mut body_end = text.len();
    let mut closed = end.is_none();
    for line in lines {
        let boundary = match end {
            Some(marker) => is_marker_line(line.text, marker),
            None => is_section_start(line.text),
        };
        if boundary {
            body_end = line.start;
            closed = true;
            break;
        }
    }

    if !closed {
        tracing::debug!("Section {:?} is not closed by {:?}", start, end);
        return None;
    }

    Some(text[body_start..body_end].trim())
}

/// Extract the configuration dump.
///
/// By default this is everything between `# dump master` and `batch end`.
/// With `full_text` the capture starts at the line preceding `# version`
/// (the command echo) and runs through the closing `batch end`.
pub fn extract_memory_dump(text: &str, full_text: bool) -> Option<String> {
    if full_text {
        let version_idx = text.find(VERSION)?;
        let bytes = text.as_bytes();

        let mut start = version_idx;
        while start > 0 && matches!(bytes[start - 1], b'\n' | b'\r') {
            start -= 1;
        }
        while start > 0 && bytes[start - 1] != b'\n' {
            start -= 1;
        }

        let batch_end = text.find(BATCH_END)?;
        let end = batch_end + BATCH_END.len();
        if end < start {
            return None;
        }
        Some(text[start..end].trim().to_string())
    } else {
        let open = text.find(DUMP_MASTER)? + DUMP_MASTER.len();
        let close = text[open..].find(BATCH_END)? + open;
        Some(text[open..close].trim().to_string())
    }
}
