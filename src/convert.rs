//! HTML → plain-text normalization for extracted article content.

/// Converts extracted HTML to Markdown-flavoured plain text and normalizes whitespace.
///
/// Text without markup skips the converter and only gets whitespace
/// normalization, so applying this twice gives the same result as once.
pub fn html_to_plain(html: &str) -> String {
    if !looks_like_html(html) {
        return normalize_whitespace(html);
    }
    let text = html2md::rewrite_html(html, false);
    normalize_whitespace(&text)
}

fn looks_like_html(text: &str) -> bool {
    text.split('<')
        .skip(1)
        .any(|rest| rest.starts_with(|c: char| c.is_ascii_alphabetic() || c == '/' || c == '!'))
}

/// Strips trailing whitespace per line, keeps at most one blank line between blocks, trims the ends.
fn normalize_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut blank_run = 0usize;

    for line in text.lines() {
        let line = line.trim_end();
        if line.is_empty() {
            blank_run += 1;
            if blank_run > 1 {
                continue;
            }
        } else {
            blank_run = 0;
        }
        out.push_str(line);
        out.push('\n');
    }

    out.trim().to_string()
}
