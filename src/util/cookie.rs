//! `document.cookie` lookup.

#[cfg(test)]
#[path = "cookie_test.rs"]
mod cookie_test;

/// Django's CSRF cookie.
pub const CSRF_COOKIE: &str = "csrftoken";

/// Value of cookie `name` in a `document.cookie` string, percent-decoded.
pub fn read_cookie(cookies: &str, name: &str) -> Option<String> {
    cookies
        .split(';')
        .map(str::trim)
        .find_map(|pair| pair.strip_prefix(name)?.strip_prefix('='))
        .map(percent_decode)
}

pub fn csrf_token(cookies: &str) -> Option<String> {
    read_cookie(cookies, CSRF_COOKIE).filter(|t| !t.is_empty())
}

/// Decode `%XX` escapes. Malformed escapes are kept as-is; invalid UTF-8
/// yields the raw input.
fn percent_decode(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = bytes.get(i + 1..i + 3).and_then(|h| std::str::from_utf8(h).ok());
            if let Some(byte) = hex.and_then(|h| u8::from_str_radix(h, 16).ok()) {
                out.push(byte);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8(out).unwrap_or_else(|_| raw.to_owned())
}
