//! Environment-variable expansion for program paths.
//!
//! Follows the Windows `expandvars` rules: `%VAR%`, `$VAR` and `${VAR}`
//! are replaced, `%%` and `$$` yield a literal `%` and `$`, and text in
//! single quotes is copied as is. A `$VAR` name may contain letters,
//! digits, `_` and `-`. Unset variables are left in the output unchanged,
//! and an unterminated `%` or `${` copies the rest of the input verbatim.

/// Expands variables in `input` using the process environment.
pub fn expand(input: &str) -> String {
    expand_with(input, |name| std::env::var(name).ok())
}

/// Expands variables in `input`, resolving names through `lookup`.
pub fn expand_with(input: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    if !input.contains(['%', '$']) {
        return input.to_string();
    }

    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(pos) = rest.find(['\'', '%', '$']) {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        let consumed = match tail.as_bytes()[0] {
            b'\'' => copy_quoted(tail, &mut out),
            b'%' => expand_percent(tail, &lookup, &mut out),
            _ => expand_dollar(tail, &lookup, &mut out),
        };
        rest = &tail[consumed..];
    }
    out.push_str(rest);
    out
}

/// Copies `'...'` through unchanged. Returns the bytes consumed.
fn copy_quoted(tail: &str, out: &mut String) -> usize {
    let len = match tail[1..].find('\'') {
        Some(end) => end + 2,
        None => tail.len(),
    };
    out.push_str(&tail[..len]);
    len
}

fn expand_percent(tail: &str, lookup: &impl Fn(&str) -> Option<String>, out: &mut String) -> usize {
    let body = &tail[1..];
    if body.starts_with('%') {
        out.push('%');
        return 2;
    }
    let Some(end) = body.find('%') else {
        out.push_str(tail);
        return tail.len();
    };
    let whole = &tail[..end + 2];
    out.push_str(&lookup(&body[..end]).unwrap_or_else(|| whole.to_string()));
    whole.len()
}

fn expand_dollar(tail: &str, lookup: &impl Fn(&str) -> Option<String>, out: &mut String) -> usize {
    let body = &tail[1..];
    if body.starts_with('$') {
        out.push('$');
        return 2;
    }

    if let Some(braced) = body.strip_prefix('{') {
        let Some(end) = braced.find('}') else {
            out.push_str(tail);
            return tail.len();
        };
        let whole = &tail[..end + 3];
        out.push_str(&lookup(&braced[..end]).unwrap_or_else(|| whole.to_string()));
        return whole.len();
    }

    let len = body
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '-'))
        .unwrap_or(body.len());
    let whole = &tail[..len + 1];
    match lookup(&body[..len]) {
        Some(value) if len > 0 => out.push_str(&value),
        _ => out.push_str(whole),
    }
    whole.len()
}
