use nutype::nutype;
use url::Url;

/// Scheme prefixed onto input that does not name one.
pub const DEFAULT_SCHEME_PREFIX: &str = "https://";

/// A normalized absolute `http`/`https` address.
///
/// Input is trimmed and, when it carries no scheme, prefixed with `https://`.
/// The stored text is the normalized input itself rather than the URL parser's
/// re-serialization, so `https://x.com` is kept without a trailing slash.
#[nutype(
    sanitize(with = |s| normalize(&s)),
    validate(predicate = |s| is_web_url(s)),
    derive(
        Debug,
        Clone,
        PartialEq,
        Eq,
        PartialOrd,
        Ord,
        AsRef,
        Deref,
        TryFrom,
        Into,
        Hash,
        Borrow,
        Display,
        Serialize,
        Deserialize,
    )
)]
pub struct Address(String);

impl Address {
    /// Default display label: the host string, or the whole address when the
    /// parser reports no host.
    pub fn default_name(&self) -> String {
        Url::parse(self.as_str())
            .ok()
            .and_then(|url| url.host_str().map(str::to_owned))
            .filter(|host| !host.is_empty())
            .unwrap_or_else(|| self.to_string())
    }
}

fn normalize(input: &str) -> String {
    let trimmed = input.trim();

    if has_explicit_scheme(trimmed) {
        trimmed.to_string()
    } else {
        format!("{DEFAULT_SCHEME_PREFIX}{trimmed}")
    }
}

/// Whether `s` opens with `scheme://`, where scheme is
/// `ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`.
fn has_explicit_scheme(s: &str) -> bool {
    let Some((scheme, _)) = s.split_once("://") else {
        return false;
    };

    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

fn is_web_url(s: &str) -> bool {
    let Ok(url) = Url::parse(s) else {
        return false;
    };

    matches!(url.scheme(), "http" | "https") && url.host_str().is_some_and(|h| !h.is_empty())
}

#[cfg(test)]
mod tests;
