//! Simplified HTML tokenizer with a constrained, practical tag-name set.
//!
//! Tag and attribute names are ASCII `[A-Za-z0-9:_-]` and are emitted
//! lowercased. This is not an HTML5 state machine: the annotation pipeline
//! needs document loading, not spec-grade error recovery, so tokenization
//! stays linear and allocation-light.
//!
//! Known limitations (intentional):
//! - No spec parse-error recovery; malformed markup degrades to text.
//! - Rawtext (`<script>`, `<style>`) close tags accept only ASCII whitespace
//!   before `>`.

use crate::entities::decode_entities;
use crate::types::Token;
use memchr::memchr;

const COMMENT_START: &str = "<!--";
const COMMENT_END: &str = "-->";

fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_' || b == b':'
}

fn starts_with_ignore_ascii_case_at(haystack: &[u8], start: usize, needle: &[u8]) -> bool {
    haystack.len() >= start + needle.len()
        && haystack[start..start + needle.len()].eq_ignore_ascii_case(needle)
}

/// Find `</name` + optional ASCII whitespace + `>` in `haystack`; returns the
/// byte range of the whole close tag. `name` must be ASCII.
fn find_rawtext_close(haystack: &str, name: &str) -> Option<(usize, usize)> {
    let bytes = haystack.as_bytes();
    let len = bytes.len();
    let mut i = 0;
    while i + 2 + name.len() <= len {
        let rel = memchr(b'<', &bytes[i..])?;
        i += rel;
        if i + 2 + name.len() > len {
            return None;
        }
        if bytes[i + 1] == b'/'
            && starts_with_ignore_ascii_case_at(bytes, i + 2, name.as_bytes())
        {
            let mut k = i + 2 + name.len();
            while k < len && bytes[k].is_ascii_whitespace() {
                k += 1;
            }
            if k < len && bytes[k] == b'>' {
                return Some((i, k + 1));
            }
        }
        i += 1;
    }
    None
}

pub(crate) fn is_void_element(name: &str) -> bool {
    matches!(
        name,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}

pub(crate) fn is_rawtext_element(name: &str) -> bool {
    name == "script" || name == "style"
}

pub fn tokenize(input: &str) -> Vec<Token> {
    let bytes = input.as_bytes();
    let mut out = Vec::new();
    let mut i = 0;
    // We scan by byte, but slice endpoints only ever land on ASCII structural
    // bytes, so they remain UTF-8 char boundaries.
    while i < bytes.len() {
        if bytes[i] != b'<' {
            let start = i;
            i = match memchr(b'<', &bytes[i..]) {
                Some(rel) => i + rel,
                None => bytes.len(),
            };
            debug_assert!(input.is_char_boundary(start) && input.is_char_boundary(i));
            let decoded = decode_entities(&input[start..i]);
            if !decoded.is_empty() {
                out.push(Token::Text(decoded));
            }
            continue;
        }

        if input[i..].starts_with(COMMENT_START) {
            let body_start = i + COMMENT_START.len();
            match input[body_start..].find(COMMENT_END) {
                Some(end) => {
                    out.push(Token::Comment(input[body_start..body_start + end].to_string()));
                    i = body_start + end + COMMENT_END.len();
                }
                None => {
                    out.push(Token::Comment(input[body_start..].to_string()));
                    i = bytes.len();
                }
            }
            continue;
        }

        if starts_with_ignore_ascii_case_at(bytes, i, b"<!doctype") {
            match input[i + 2..].find('>') {
                Some(end) => {
                    out.push(Token::Doctype(input[i + 2..i + 2 + end].trim().to_string()));
                    i += 2 + end + 1;
                }
                None => break,
            }
            continue;
        }

        if i + 2 <= bytes.len() && bytes[i + 1] == b'/' {
            let start = i + 2;
            let mut j = start;
            while j < bytes.len() && is_name_byte(bytes[j]) {
                j += 1;
            }
            let name = input[start..j].to_ascii_lowercase();
            while j < bytes.len() && bytes[j] != b'>' {
                j += 1;
            }
            if j < bytes.len() {
                j += 1;
            }
            out.push(Token::EndTag(name));
            i = j;
            continue;
        }

        let start = i + 1;
        let mut j = start;
        while j < bytes.len() && is_name_byte(bytes[j]) {
            j += 1;
        }
        if j == start {
            // A lone '<' that opens nothing; treat it as text.
            out.push(Token::Text("<".to_string()));
            i += 1;
            continue;
        }
        let name = input[start..j].to_ascii_lowercase();
        let (attributes, self_closing, after) = scan_attributes(input, j);
        let self_closing = self_closing || is_void_element(&name);
        out.push(Token::StartTag {
            name: name.clone(),
            attributes,
            self_closing,
        });
        i = after;

        if is_rawtext_element(&name) && !self_closing {
            match find_rawtext_close(&input[i..], &name) {
                Some((rel_start, rel_end)) => {
                    if rel_start > 0 {
                        out.push(Token::Text(input[i..i + rel_start].to_string()));
                    }
                    out.push(Token::EndTag(name));
                    i += rel_end;
                }
                None => {
                    // Missing close tag: the remainder is rawtext content.
                    if i < bytes.len() {
                        out.push(Token::Text(input[i..].to_string()));
                    }
                    out.push(Token::EndTag(name));
                    break;
                }
            }
        }
    }
    out
}

/// Scan attributes from `from` until past the closing `>`. Returns the
/// attribute list, the self-closing flag, and the byte index after the tag.
fn scan_attributes(
    input: &str,
    from: usize,
) -> (Vec<(String, Option<String>)>, bool, usize) {
    let bytes = input.as_bytes();
    let len = bytes.len();
    let mut attributes = Vec::new();
    let mut self_closing = false;
    let mut k = from;

    loop {
        while k < len && bytes[k].is_ascii_whitespace() {
            k += 1;
        }
        if k >= len {
            break;
        }
        if bytes[k] == b'>' {
            k += 1;
            break;
        }
        if bytes[k] == b'/' {
            if k + 1 < len && bytes[k + 1] == b'>' {
                self_closing = true;
                k += 2;
                break;
            }
            k += 1;
            continue;
        }

        let name_start = k;
        while k < len && is_name_byte(bytes[k]) {
            k += 1;
        }
        if name_start == k {
            k += 1;
            continue;
        }
        let name = input[name_start..k].to_ascii_lowercase();

        while k < len && bytes[k].is_ascii_whitespace() {
            k += 1;
        }
        let value = if k < len && bytes[k] == b'=' {
            k += 1;
            while k < len && bytes[k].is_ascii_whitespace() {
                k += 1;
            }
            if k < len && (bytes[k] == b'"' || bytes[k] == b'\'') {
                let quote = bytes[k];
                k += 1;
                let vstart = k;
                while k < len && bytes[k] != quote {
                    k += 1;
                }
                let raw = &input[vstart..k];
                if k < len {
                    k += 1;
                }
                Some(decode_entities(raw))
            } else {
                let vstart = k;
                while k < len && !bytes[k].is_ascii_whitespace() && bytes[k] != b'>' {
                    if bytes[k] == b'/' && k + 1 < len && bytes[k + 1] == b'>' {
                        break;
                    }
                    k += 1;
                }
                Some(input[vstart..k].to_string())
            }
        } else {
            None
        };
        attributes.push((name, value));
    }

    (attributes, self_closing, k)
}
