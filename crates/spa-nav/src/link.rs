//! Link path interpretation.

/// Where a link points: `/<app>/<section>/...`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkTarget {
    pub app: String,
    pub section: Option<String>,
}

/// Split a link path into its app and optional section.
///
/// Empty segments are discarded, so `/billing//invoices/` and
/// `billing/invoices` are the same target. Segments after the section are
/// ignored. A path with no segments has no target.
pub fn parse_link_path(path: &str) -> Option<LinkTarget> {
    let mut segments = path.split('/').filter(|s| !s.is_empty());
    let app = segments.next()?.to_string();
    let section = segments.next().map(str::to_string);
    Some(LinkTarget { app, section })
}
