//! Splitting text into literal runs and `${...}` placeholders.

/// A piece of scanned text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Part<'a> {
    Literal(&'a str),
    /// The text between `${` and its matching `}`. It may itself contain
    /// placeholders, which are left for the resolver to expand.
    Placeholder(&'a str),
}

/// Returns true if `text` contains anything that looks like a placeholder opening.
pub fn has_placeholders(text: &str) -> bool {
    text.contains("${")
}

/// Scans `text` left to right.
///
/// Each `${` opens a level and each `}` closes one, so `${env.${NAME}}` is a
/// single placeholder named `env.${NAME}`. An opening that is never balanced is
/// returned, together with the rest of the input, as a trailing literal.
pub fn split(text: &str) -> Vec<Part<'_>> {
    let bytes = text.as_bytes();
    let mut parts = Vec::new();
    let mut literal_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        if !opens_at(bytes, i) {
            i += 1;
            continue;
        }

        let Some(close) = matching_close(bytes, i + 2) else {
            break;
        };
        if literal_start < i {
            parts.push(Part::Literal(&text[literal_start..i]));
        }
        parts.push(Part::Placeholder(&text[i + 2..close]));
        i = close + 1;
        literal_start = i;
    }

    if literal_start < i {
        parts.push(Part::Literal(&text[literal_start..i]));
    }
    if i < bytes.len() {
        parts.push(Part::Literal(&text[i..]));
    }
    parts
}

fn opens_at(bytes: &[u8], i: usize) -> bool {
    bytes[i] == b'$' && bytes.get(i + 1) == Some(&b'{')
}

fn matching_close(bytes: &[u8], mut i: usize) -> Option<usize> {
    let mut depth = 1usize;
    while i < bytes.len() {
        if opens_at(bytes, i) {
            depth += 1;
            i += 2;
            continue;
        }
        if bytes[i] == b'}' {
            depth -= 1;
            if depth == 0 {
                return Some(i);
            }
        }
        i += 1;
    }
    None
}
