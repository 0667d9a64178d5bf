use reqwest::Url;

const SCHEME_HINT: &str = "URL must start with http:// or https://";

/// An absolute `http(s)` URL with a host, as required for links in the email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpUrl(String);

impl HttpUrl {
    pub fn parse(s: String) -> Result<HttpUrl, String> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err("URL is required".to_string());
        }
        if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
            return Err(format!("{} ({})", SCHEME_HINT, trimmed));
        }

        match Url::parse(trimmed) {
            Ok(url) if url.host_str().is_some() => Ok(Self(trimmed.to_string())),
            _ => Err(format!("{} is not a valid URL", trimmed)),
        }
    }

    pub fn inner(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for HttpUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A page to import styles from. A missing scheme is read as `https://`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleSourceUrl(Url);

impl StyleSourceUrl {
    pub fn parse(s: &str) -> Result<StyleSourceUrl, String> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err("Please enter a valid URL.".to_string());
        }

        let candidate = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            trimmed.to_string()
        } else if explicit_scheme(trimmed).is_some() {
            return Err("Please enter a valid URL.".to_string());
        } else {
            format!("https://{}", trimmed)
        };

        match Url::parse(&candidate) {
            Ok(url)
                if matches!(url.scheme(), "http" | "https")
                    && url.host_str().map_or(false, |h| !h.is_empty()) =>
            {
                Ok(Self(url))
            }
            _ => Err("Please enter a valid URL.".to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// The `scheme` of `scheme:rest`, unless the colon only introduces a port
/// (`idss.ba:8080/about`).
fn explicit_scheme(s: &str) -> Option<&str> {
    let (scheme, rest) = s.split_once(':')?;
    let mut chars = scheme.chars();
    let well_formed = chars.next().map_or(false, |c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '.' | '-'));
    if !well_formed {
        return None;
    }

    let port = rest.split('/').next().unwrap_or_default();
    if !port.is_empty() && port.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    Some(scheme)
}
