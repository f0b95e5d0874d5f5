//! Simplified HTML tokenizer for admin form markup and preview fragments.
//!
//! Tag names are ASCII `[A-Za-z0-9:_-]` and are lowercased. Attribute names run until
//! whitespace, `=`, `/` or `>` and are lowercased as well. `<script>` and `<style>` bodies
//! are raw text; `<textarea>` and `<title>` bodies are text with entities decoded.
//!
//! Known limitations:
//! - No HTML5 parse-error recovery; a stray `<` that does not start a tag is text.
//! - Raw-text close tags only allow ASCII whitespace before `>`.
use crate::entities::decode_entities;
use crate::types::Token;
use memchr::memchr;

const HTML_COMMENT_START: &str = "<!--";
const HTML_COMMENT_END: &str = "-->";

fn starts_with_ignore_ascii_case_at(haystack: &[u8], start: usize, needle: &[u8]) -> bool {
    haystack.len() >= start + needle.len()
        && haystack[start..start + needle.len()].eq_ignore_ascii_case(needle)
}

fn is_tag_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_' || b == b':'
}

fn is_raw_text_element(name: &str) -> bool {
    matches!(name, "script" | "style")
}

fn is_escapable_raw_text_element(name: &str) -> bool {
    matches!(name, "textarea" | "title")
}

/// Find `</name` followed by optional whitespace and `>`; returns (start, end-exclusive).
fn find_close_tag(haystack: &str, name: &str) -> Option<(usize, usize)> {
    let bytes = haystack.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        let rel = memchr(b'<', &bytes[i..])?;
        i += rel;
        if bytes.get(i + 1) == Some(&b'/')
            && starts_with_ignore_ascii_case_at(bytes, i + 2, name.as_bytes())
        {
            let mut k = i + 2 + name.len();
            while k < bytes.len() && bytes[k].is_ascii_whitespace() {
                k += 1;
            }
            if k < bytes.len() && bytes[k] == b'>' {
                return Some((i, k + 1));
            }
        }
        i += 1;
    }
    None
}

/// Tokenize markup into a flat token list.
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut out = Vec::new();
    let bytes = input.as_bytes();
    let mut i = 0;
    // Slices are only cut at ASCII structural bytes, so every endpoint is a char boundary.
    while i < bytes.len() {
        if bytes[i] != b'<' {
            let end = memchr(b'<', &bytes[i..]).map_or(bytes.len(), |rel| i + rel);
            push_text(&mut out, &input[i..end]);
            i = end;
            continue;
        }

        if input[i..].starts_with(HTML_COMMENT_START) {
            let body_start = i + HTML_COMMENT_START.len();
            match input[body_start..].find(HTML_COMMENT_END) {
                Some(end) => {
                    out.push(Token::Comment(input[body_start..body_start + end].to_string()));
                    i = body_start + end + HTML_COMMENT_END.len();
                }
                None => {
                    out.push(Token::Comment(input[body_start..].to_string()));
                    i = bytes.len();
                }
            }
            continue;
        }

        if starts_with_ignore_ascii_case_at(bytes, i, b"<!doctype") {
            let rest = &input[i + "<!doctype".len()..];
            match rest.find('>') {
                Some(end) => {
                    out.push(Token::Doctype(rest[..end].trim().to_string()));
                    i += "<!doctype".len() + end + 1;
                }
                None => i = bytes.len(),
            }
            continue;
        }

        if bytes.get(i + 1) == Some(&b'/') {
            let start = i + 2;
            let mut j = start;
            while j < bytes.len() && is_tag_name_byte(bytes[j]) {
                j += 1;
            }
            let name = input[start..j].to_ascii_lowercase();
            while j < bytes.len() && bytes[j] != b'>' {
                j += 1;
            }
            if !name.is_empty() {
                out.push(Token::EndTag(name));
            }
            i = (j + 1).min(bytes.len());
            continue;
        }

        let start = i + 1;
        let mut j = start;
        while j < bytes.len() && is_tag_name_byte(bytes[j]) {
            j += 1;
        }
        if j == start {
            // `<` not followed by a tag name, e.g. "a < b".
            push_text(&mut out, "<");
            i += 1;
            continue;
        }
        let name = input[start..j].to_ascii_lowercase();
        let (attributes, self_closing, next) = read_attributes(input, j);
        i = next;

        let raw = is_raw_text_element(&name);
        let escapable = is_escapable_raw_text_element(&name);
        out.push(Token::StartTag {
            name: name.clone(),
            attributes,
            self_closing,
        });

        if (raw || escapable) && !self_closing {
            let (body_end, resume) = match find_close_tag(&input[i..], &name) {
                Some((s, e)) => (i + s, i + e),
                None => (bytes.len(), bytes.len()),
            };
            let body = &input[i..body_end];
            if !body.is_empty() {
                let text = if raw {
                    body.to_string()
                } else {
                    decode_entities(body)
                };
                out.push(Token::Text(text));
            }
            out.push(Token::EndTag(name));
            i = resume;
        }
    }
    out
}

fn push_text(out: &mut Vec<Token>, raw: &str) {
    if raw.is_empty() {
        return;
    }
    let decoded = decode_entities(raw);
    // Merge with a preceding text token so stray `<` does not split runs.
    if let Some(Token::Text(prev)) = out.last_mut() {
        prev.push_str(&decoded);
    } else {
        out.push(Token::Text(decoded));
    }
}

/// Parse attributes starting right after the tag name; returns the position past `>`.
fn read_attributes(input: &str, mut k: usize) -> (Vec<(String, Option<String>)>, bool, usize) {
    let bytes = input.as_bytes();
    let len = bytes.len();
    let mut attributes: Vec<(String, Option<String>)> = Vec::new();
    let mut self_closing = false;

    loop {
        while k < len && bytes[k].is_ascii_whitespace() {
            k += 1;
        }
        if k >= len {
            return (attributes, self_closing, len);
        }
        match bytes[k] {
            b'>' => return (attributes, self_closing, k + 1),
            b'/' => {
                if bytes.get(k + 1) == Some(&b'>') {
                    self_closing = true;
                }
                k += 1;
                continue;
            }
            _ => {}
        }

        let name_start = k;
        while k < len && !bytes[k].is_ascii_whitespace() && !matches!(bytes[k], b'=' | b'>' | b'/')
        {
            k += 1;
        }
        let attr_name = input[name_start..k].to_ascii_lowercase();

        while k < len && bytes[k].is_ascii_whitespace() {
            k += 1;
        }

        let mut value: Option<String> = None;
        if k < len && bytes[k] == b'=' {
            k += 1;
            while k < len && bytes[k].is_ascii_whitespace() {
                k += 1;
            }
            if k < len && (bytes[k] == b'"' || bytes[k] == b'\'') {
                let quote = bytes[k];
                let value_start = k + 1;
                let value_end = memchr(quote, &bytes[value_start..])
                    .map_or(len, |rel| value_start + rel);
                value = Some(decode_entities(&input[value_start..value_end]));
                k = (value_end + 1).min(len);
            } else {
                let value_start = k;
                while k < len && !bytes[k].is_ascii_whitespace() && bytes[k] != b'>' {
                    k += 1;
                }
                value = Some(decode_entities(&input[value_start..k]));
            }
        }

        // First occurrence wins, as in browsers.
        if !attr_name.is_empty() && !attributes.iter().any(|(n, _)| *n == attr_name) {
            attributes.push((attr_name, value));
        }
    }
}
