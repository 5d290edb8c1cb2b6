use std::path::Path;

use markdown::Options;

use crate::error::{ContentError, ContentResult};

/// Renders a Markdown body to HTML with GitHub flavoured extensions
/// (tables, strikethrough, autolinks, task lists).
///
/// Raw HTML in the body is escaped rather than passed through, and HTML
/// comments are dropped before rendering.
pub fn render_markdown(file_path: &Path, md_text: &str) -> ContentResult<String> {
    let buf = match remove_comments(md_text) {
        Ok(buf) => buf,
        Err(reason) => return Err(ContentError::Processing { path: file_path.to_path_buf(), reason }),
    };

    match markdown::to_html_with_options(buf.as_str(), &Options::gfm()) {
        Ok(html) => Ok(html),
        Err(e) => Err(ContentError::Processing {
            path: file_path.to_path_buf(),
            reason: e.reason.to_string(),
        }),
    }
}

const START_COMMENT: &str = "<!--";
const END_COMMENT: &str = "-->";

/// Drops `<!-- ... -->` comments. Fenced code blocks and inline code spans are
/// copied untouched, so code samples may show comment syntax.
pub fn remove_comments(md_post: &str) -> Result<String, String> {
    let mut res = String::with_capacity(md_post.len());
    let mut fence: Option<(char, usize)> = None;
    let mut in_comment = false;

    for line in md_post.split_inclusive('\n') {
        if !in_comment {
            if let Some((ch, len)) = fence {
                res.push_str(line);
                if closes_fence(line, ch, len) {
                    fence = None;
                }
                continue;
            }
            if let Some(open) = opens_fence(line) {
                fence = Some(open);
                res.push_str(line);
                continue;
            }
        }
        in_comment = strip_line(line, in_comment, &mut res);
    }

    if in_comment {
        return Err("Error finding end of comment".to_string());
    }
    Ok(res)
}

/// Copies `line` into `res` without comments. Returns whether a comment is
/// still open at the end of the line.
fn strip_line(line: &str, mut in_comment: bool, res: &mut String) -> bool {
    let mut rest = line;
    while !rest.is_empty() {
        if in_comment {
            match rest.find(END_COMMENT) {
                Some(end) => {
                    rest = &rest[(end + END_COMMENT.len())..];
                    in_comment = false;
                }
                None => return true,
            }
        } else if rest.starts_with(START_COMMENT) {
            rest = &rest[START_COMMENT.len()..];
            in_comment = true;
        } else if rest.starts_with('`') {
            let span = code_span_len(rest);
            res.push_str(&rest[..span]);
            rest = &rest[span..];
        } else {
            let first = rest.chars().next().map(char::len_utf8).unwrap_or(1);
            let next = rest[first..].find(['`', '<']).map(|i| i + first).unwrap_or(rest.len());
            res.push_str(&rest[..next]);
            rest = &rest[next..];
        }
    }
    in_comment
}

fn backtick_run(text: &str) -> usize {
    text.len() - text.trim_start_matches('`').len()
}

/// Length of the code span opening at the start of `text`, or just the
/// backticks when no closing run of the same length follows on the line.
fn code_span_len(text: &str) -> usize {
    let ticks = backtick_run(text);
    let mut pos = ticks;
    while let Some(found) = text[pos..].find('`') {
        let start = pos + found;
        let run = backtick_run(&text[start..]);
        if run == ticks {
            return start + run;
        }
        pos = start + run;
    }
    ticks
}

fn fence_marker(line: &str) -> Option<(char, usize, &str)> {
    let trimmed = line.trim_start_matches(' ');
    if line.len() - trimmed.len() > 3 {
        return None;
    }
    let ch = trimmed.chars().next().filter(|c| *c == '`' || *c == '~')?;
    let rest = trimmed.trim_start_matches(ch);
    let len = trimmed.len() - rest.len();
    if len < 3 {
        return None;
    }
    Some((ch, len, rest))
}

fn opens_fence(line: &str) -> Option<(char, usize)> {
    match fence_marker(line)? {
        // a backtick fence info string cannot hold backticks
        ('`', _, info) if info.contains('`') => None,
        (ch, len, _) => Some((ch, len)),
    }
}

fn closes_fence(line: &str, ch: char, len: usize) -> bool {
    match fence_marker(line) {
        Some((c, l, rest)) => c == ch && l >= len && rest.trim().is_empty(),
        None => false,
    }
}
