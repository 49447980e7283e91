use std::fmt;

/// Custom protocol the bundled pages are served under.
pub const BUNDLED_SCHEME: &str = "echarts";

/// A page the chart view can load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resource {
    /// A page bundled into the binary, by path relative to the asset root
    /// (e.g. `"index_inner.html"`).
    Bundled(String),
    /// Any other URL, loaded as-is by the webview.
    Remote(String),
}

impl Resource {
    /// Interpret `uri_or_path`: anything with a URL scheme is remote,
    /// everything else names a bundled page.
    #[must_use]
    pub fn parse(uri_or_path: &str) -> Self {
        if uri_or_path.contains("://") {
            Self::Remote(uri_or_path.to_owned())
        } else {
            Self::Bundled(uri_or_path.trim_start_matches('/').to_owned())
        }
    }

    /// URL handed to the webview.
    #[must_use]
    pub fn url(&self) -> String {
        match self {
            Self::Bundled(path) => format!("{}{path}", bundled_origin()),
            Self::Remote(url) => url.clone(),
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bundled(path) => write!(f, "bundled:{path}"),
            Self::Remote(url) => f.write_str(url),
        }
    }
}

/// Origin of the bundled pages.
///
/// On Windows and Android wry serves custom protocols from
/// `http://<scheme>.localhost/` instead of `<scheme>://localhost/`.
#[must_use]
pub fn bundled_origin() -> String {
    if cfg!(any(target_os = "windows", target_os = "android")) {
        format!("http://{BUNDLED_SCHEME}.localhost/")
    } else {
        format!("{BUNDLED_SCHEME}://localhost/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_are_bundled_and_urls_are_remote() {
        assert_eq!(
            Resource::parse("index.html"),
            Resource::Bundled("index.html".into())
        );
        assert_eq!(
            Resource::parse("/index_inner.html"),
            Resource::Bundled("index_inner.html".into())
        );
        assert_eq!(
            Resource::parse("https://example.com/chart.html"),
            Resource::Remote("https://example.com/chart.html".into())
        );
    }

    #[test]
    fn bundled_url_uses_custom_protocol() {
        let url = Resource::Bundled("index.html".into()).url();
        assert!(url.ends_with("/index.html"));
        assert!(url.contains(BUNDLED_SCHEME));
        assert_eq!(
            Resource::Remote("https://example.com/".into()).url(),
            "https://example.com/"
        );
    }
}
