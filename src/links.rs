//! Hyperlinks shown in contact lines

/// Separator between links in an academic contact line
pub const LINK_SEPARATOR: &str = " · ";

/// Text shown on the page together with where clicking it leads
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub label: String,
    pub uri: String,
}

/// `url` with `https://` in front unless it already names the http(s) scheme
pub fn absolute_url(url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{url}")
    }
}

impl Link {
    /// A web link shown as `label`, e.g. `Link::url("Portfolio", "johndoe.dev")`
    pub fn url<L: ToString>(label: L, url: &str) -> Link {
        Link {
            label: label.to_string(),
            uri: absolute_url(url),
        }
    }

    /// A web link shown as the url itself, as written
    pub fn bare(url: &str) -> Link {
        Link {
            label: url.to_string(),
            uri: absolute_url(url),
        }
    }

    /// A `mailto:` link shown as the address
    pub fn email(address: &str) -> Link {
        Link {
            label: address.to_string(),
            uri: format!("mailto:{address}"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn schemes_are_added_when_missing() {
        assert_eq!(
            Link::url("LinkedIn", "linkedin.com/in/johndoe").uri,
            "https://linkedin.com/in/johndoe"
        );
        assert_eq!(Link::bare("http://example.com").uri, "http://example.com");
        assert_eq!(Link::bare("https://example.com").label, "https://example.com");
    }

    #[test]
    fn emails_use_mailto() {
        let link = Link::email("john.doe@example.com");
        assert_eq!(link.uri, "mailto:john.doe@example.com");
        assert_eq!(link.label, "john.doe@example.com");
    }
}
