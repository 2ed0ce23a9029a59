use crate::runtime::error::{XtaskError, XtaskResult};
use chrono::NaiveDate;
use serde::Deserialize;
use url::Url;

/// The slice of a compiled dataset record the sitemap needs.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct DatasetEntry {
    /// URL slug.
    pub slug: String,
    /// Authored last-update date, if any.
    #[serde(default)]
    pub last_updated: Option<String>,
}

/// One `<url>` element of the sitemap.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SitemapEntry {
    /// Absolute URL.
    pub loc: String,
    /// Last modification date, omitted when unknown.
    pub lastmod: Option<String>,
    /// Expected change frequency.
    pub changefreq: &'static str,
    /// Relative priority.
    pub priority: &'static str,
}

/// Parse and canonicalize a site URL, dropping one trailing `/`.
pub fn normalize_site_url(raw: &str) -> XtaskResult<String> {
    let url = Url::parse(raw.trim()).map_err(|err| {
        XtaskError::config(format!("invalid site URL `{raw}`: {err}"))
            .with_hint("set SITE_URL to an absolute URL such as https://example.ng")
    })?;
    let text = url.to_string();
    Ok(text.strip_suffix('/').map(str::to_string).unwrap_or(text))
}

/// Normalize a site path: empty or `/` becomes `/`; otherwise one leading `/` and no trailing `/`.
pub fn normalize_path(path: &str) -> String {
    if path.is_empty() || path == "/" {
        return "/".to_string();
    }
    let with_leading = if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    };
    with_leading
        .strip_suffix('/')
        .map(str::to_string)
        .unwrap_or(with_leading)
}

/// Escape the five XML special characters.
pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    out
}

/// Parse a strict `YYYY-MM-DD` calendar date; the value must round-trip unchanged.
fn parse_date(value: &str) -> Option<NaiveDate> {
    if value.len() != 10 {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .filter(|date| date.format("%Y-%m-%d").to_string() == value)
}

/// Whether `value` is a strict `YYYY-MM-DD` calendar date.
pub fn is_valid_date(value: &str) -> bool {
    parse_date(value).is_some()
}

/// Build the sitemap entries: home, submit, then one per project in dataset order.
///
/// The home page carries the latest valid project date; projects carry their own date verbatim
/// when it is valid.
pub fn build_sitemap_entries(site_url: &str, projects: &[DatasetEntry]) -> Vec<SitemapEntry> {
    let absolute = |path: &str| format!("{site_url}{}", normalize_path(path));
    let valid_date = |entry: &DatasetEntry| {
        entry
            .last_updated
            .as_deref()
            .filter(|value| is_valid_date(value))
            .map(str::to_string)
    };

    let latest = projects
        .iter()
        .filter_map(|entry| entry.last_updated.as_deref().and_then(parse_date))
        .max();

    let mut entries = vec![
        SitemapEntry {
            loc: absolute("/"),
            lastmod: latest.map(|date| date.format("%Y-%m-%d").to_string()),
            changefreq: "daily",
            priority: "1.0",
        },
        SitemapEntry {
            loc: absolute("/submit"),
            lastmod: None,
            changefreq: "weekly",
            priority: "0.7",
        },
    ];
    entries.extend(projects.iter().map(|entry| SitemapEntry {
        loc: absolute(&format!("/projects/{}", entry.slug)),
        lastmod: valid_date(entry),
        changefreq: "weekly",
        priority: "0.8",
    }));
    entries
}

/// Render a sitemaps.org 0.9 document.
pub fn render_sitemap(entries: &[SitemapEntry]) -> String {
    let mut out = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );
    for entry in entries {
        out.push_str("  <url>\n");
        out.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&entry.loc)));
        if let Some(lastmod) = &entry.lastmod {
            out.push_str(&format!("    <lastmod>{}</lastmod>\n", escape_xml(lastmod)));
        }
        out.push_str(&format!("    <changefreq>{}</changefreq>\n", entry.changefreq));
        out.push_str(&format!("    <priority>{}</priority>\n", entry.priority));
        out.push_str("  </url>\n");
    }
    out.push_str("</urlset>\n");
    out
}

/// Render `robots.txt` allowing everything and pointing at the sitemap.
pub fn render_robots(site_url: &str) -> String {
    format!("User-agent: *\nAllow: /\n\nSitemap: {site_url}/sitemap.xml\n")
}
