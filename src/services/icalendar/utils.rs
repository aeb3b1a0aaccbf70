use chrono::{DateTime, FixedOffset, Utc};

/// Maximum octets per physical content line before folding (RFC 5545 §3.1).
const FOLD_LIMIT: usize = 75;

/// Format a timestamp as UTC `YYYYMMDDTHHMMSSZ`.
pub(super) fn format_datetime_utc(dt: &DateTime<FixedOffset>) -> String {
    dt.with_timezone(&Utc).format("%Y%m%dT%H%M%SZ").to_string()
}

pub(super) fn format_utc(dt: &DateTime<Utc>) -> String {
    dt.format("%Y%m%dT%H%M%SZ").to_string()
}

/// Escape TEXT property values. Backslash must be first so that the
/// backslashes introduced by the later substitutions survive untouched.
pub(super) fn escape_text(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace(',', "\\,")
        .replace(';', "\\;")
        .replace('\n', "\\n")
}

/// Escape URI property values. Only comma and semicolon: URLs carry no raw
/// newlines, and backslash-escaping a URL is non-standard.
pub(super) fn escape_url(url: &str) -> String {
    url.replace(',', "\\,").replace(';', "\\;")
}

/// Fold one logical content line at 75 octets. The first chunk stands
/// alone; each continuation chunk is prefixed with CRLF and a single space.
/// Splits back off to the nearest character boundary so multi-byte UTF-8
/// never gets cut in half.
pub(super) fn fold_line(line: &str) -> String {
    if line.len() <= FOLD_LIMIT {
        return line.to_string();
    }

    let mut out = String::with_capacity(line.len() + line.len() / FOLD_LIMIT * 3);
    let mut rest = line;
    let mut first = true;
    while !rest.is_empty() {
        if !first {
            out.push_str("\r\n ");
        }
        if rest.len() <= FOLD_LIMIT {
            out.push_str(rest);
            break;
        }
        let mut split = FOLD_LIMIT;
        while !rest.is_char_boundary(split) {
            split -= 1;
        }
        out.push_str(&rest[..split]);
        rest = &rest[split..];
        first = false;
    }
    out
}
