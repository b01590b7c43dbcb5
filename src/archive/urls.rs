use url::Url;

use super::fields::normalize_field;

/// Host every review link must point at (subdomains included).
pub const DISCUSSION_HOST: &str = "reddit.com";
const REPAIR_PREFIX: &str = "https://www.";

#[derive(Debug, Clone, PartialEq)]
pub enum LinkCheck {
    /// Parsed with a scheme and host as entered.
    Valid(String),
    /// Had no usable scheme and was rebuilt with the canonical prefix.
    Repaired(String),
    /// Empty, unparseable after repair, or off-site.
    Rejected,
}

impl LinkCheck {
    pub fn into_url(self) -> Option<String> {
        match self {
            LinkCheck::Valid(u) | LinkCheck::Repaired(u) => Some(u),
            LinkCheck::Rejected => None,
        }
    }
}

/// A link counts as having a scheme only when the parse also found a host;
/// "reddit.com:443/r/x" parses with scheme "reddit.com" and no host.
fn parse_with_host(candidate: &str) -> Option<Url> {
    Url::parse(candidate).ok().filter(Url::has_host)
}

/// Prefix a scheme-less link with `https://www.`, dropping a `www.` that
/// was already typed.
pub fn repair(link: &str) -> String {
    let bare = link.strip_prefix("www.").unwrap_or(link);
    format!("{}{}", REPAIR_PREFIX, bare)
}

pub fn on_discussion_host(url: &Url) -> bool {
    match url.host_str() {
        Some(host) => {
            host == DISCUSSION_HOST
                || host
                    .strip_suffix(DISCUSSION_HOST)
                    .is_some_and(|sub| sub.ends_with('.'))
        }
        None => false,
    }
}

/// Normalize, validate, repair if needed, and host-check one link.
pub fn check_link(raw: &str) -> LinkCheck {
    let Some(link) = normalize_field(raw) else {
        return LinkCheck::Rejected;
    };

    if let Some(url) = parse_with_host(&link) {
        return if on_discussion_host(&url) {
            LinkCheck::Valid(link)
        } else {
            LinkCheck::Rejected
        };
    }

    let fixed = repair(&link);
    match parse_with_host(&fixed) {
        Some(url) if on_discussion_host(&url) => LinkCheck::Repaired(fixed),
        _ => LinkCheck::Rejected,
    }
}

/// Run `check_link` over a column, preserving positions.
pub fn check_links<S: AsRef<str>>(values: &[S]) -> Vec<LinkCheck> {
    values.iter().map(|v| check_link(v.as_ref())).collect()
}
