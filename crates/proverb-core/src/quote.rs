use serde::Deserialize;
use url::Url;

/// Query parameter carrying a shared quote.
pub const QUOTE_PARAM: &str = "quote";
/// BCP 47 tag for the generated text.
pub const QUOTE_LANG: &str = "vi";
/// Title passed to the native share sheet.
pub const SHARE_TITLE: &str = "Câu Trích Dẫn Phản Động Lực";

/// One generated anti-motivational quote. Opaque text, owned for the
/// duration of a display cycle and replaced wholesale by the next fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    text: String,
}

impl Quote {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Success body of the quote endpoint: `{ "quote": string }`.
#[derive(Debug, Deserialize)]
pub struct QuoteResponse {
    pub quote: String,
}

impl QuoteResponse {
    /// Parse the endpoint body. A malformed body is a fetch failure from
    /// the controller's point of view.
    pub fn parse(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body)
    }
}

/// Build a shareable link: the page origin with the quote as an encoded
/// query parameter.
pub fn share_url(href: &str, quote: &str) -> Result<String, url::ParseError> {
    let mut url = Url::parse(href)?;
    url.set_path("/");
    url.set_fragment(None);
    url.query_pairs_mut()
        .clear()
        .append_pair(QUOTE_PARAM, quote);
    Ok(url.into())
}

/// A quote found in the page address on load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedQuote {
    /// The decoded quote text.
    pub text: String,
    /// The address with the quote parameter stripped, for a reload-free
    /// history replacement.
    pub stripped: String,
}

/// Check the page address for a shared quote parameter.
pub fn extract_shared(href: &str) -> Option<SharedQuote> {
    let mut url = Url::parse(href).ok()?;
    let text = url
        .query_pairs()
        .find(|(k, _)| k == QUOTE_PARAM)
        .map(|(_, v)| v.into_owned())?;
    url.set_query(None);
    url.set_fragment(None);
    Some(SharedQuote {
        text,
        stripped: url.into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_endpoint_body() {
        let body = r#"{"quote":"Động lực là tạm thời."}"#;
        let resp = QuoteResponse::parse(body).unwrap();
        assert_eq!(resp.quote, "Động lực là tạm thời.");
    }

    #[test]
    fn rejects_malformed_body() {
        assert!(QuoteResponse::parse("not json").is_err());
        assert!(QuoteResponse::parse(r#"{"text":"wrong key"}"#).is_err());
    }

    #[test]
    fn share_url_points_at_origin() {
        let url = share_url("https://example.com/some/page?old=1#frag", "Thất bại").unwrap();
        assert!(url.starts_with("https://example.com/?quote="));
        assert!(!url.contains("old=1"));
        assert!(!url.contains('#'));
    }

    #[test]
    fn share_link_round_trips() {
        let url = share_url("https://example.com/", "Mơ lớn, thất vọng lớn").unwrap();
        let shared = extract_shared(&url).unwrap();
        assert_eq!(shared.text, "Mơ lớn, thất vọng lớn");
    }

    #[test]
    fn extracts_percent_encoded_quote() {
        let shared =
            extract_shared("https://example.com/?quote=Th%E1%BA%A5t%20b%E1%BA%A1i").unwrap();
        assert_eq!(shared.text, "Thất bại");
        assert_eq!(shared.stripped, "https://example.com/");
    }

    #[test]
    fn no_param_means_no_shared_quote() {
        assert!(extract_shared("https://example.com/").is_none());
        assert!(extract_shared("https://example.com/?other=1").is_none());
    }

    #[test]
    fn bad_href_is_ignored() {
        assert!(extract_shared("not a url").is_none());
    }
}
