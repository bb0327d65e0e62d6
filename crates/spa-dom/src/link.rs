//! Anchor target resolution.

use url::Url;

/// Origin that relative links are resolved against.
const PAGE_ORIGIN: &str = "http://localhost/";

/// Pathname an anchor navigates to, as the browser's `anchor.pathname` reports it.
///
/// Absolute URLs keep their own path; query strings and fragments are dropped.
/// Returns `None` when the href cannot be resolved at all.
pub fn link_path(href: &str) -> Option<String> {
    let base = Url::parse(PAGE_ORIGIN).ok()?;
    match base.join(href.trim()) {
        Ok(url) => Some(url.path().to_string()),
        Err(err) => {
            tracing::warn!(href, error = %err, "unresolvable link");
            None
        }
    }
}
