use indexmap::IndexMap;
use indexmap::map::Iter;
use serde::Serialize;

/// Headers of one SSDP response, iterated in order of first appearance.
///
/// Re-inserting a header replaces its value but keeps its original position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Advertisement {
    headers: IndexMap<String, String>,
}

impl Advertisement {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a header, returning the value it replaced.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.headers.insert(name.into(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// Lookup ignoring ASCII case. Returns the first match in header order.
    pub fn get_ignore_case(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Service instance identifier (`USN`), verbatim.
    pub fn usn(&self) -> Option<&str> {
        self.get_ignore_case("USN")
    }

    /// Base address of the advertised service (`LOCATION`), verbatim.
    pub fn location(&self) -> Option<&str> {
        self.get_ignore_case("LOCATION")
    }

    pub fn len(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, String, String> {
        self.headers.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.headers.keys().map(String::as_str)
    }
}

impl<'a> IntoIterator for &'a Advertisement {
    type Item = (&'a String, &'a String);
    type IntoIter = Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.headers.iter()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Advertisement {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut ad = Advertisement::new();
        for (k, v) in iter {
            ad.insert(k, v);
        }
        ad
    }
}

/// Parse one received datagram. Invalid UTF-8 is replaced, never rejected.
pub fn parse_response(datagram: &[u8]) -> Advertisement {
    parse_response_text(&String::from_utf8_lossy(datagram))
}

pub fn parse_response_text(text: &str) -> Advertisement {
    parse_lines(text).0
}

/// Parse and also report how many lines had no colon and were skipped.
pub(crate) fn parse_lines(text: &str) -> (Advertisement, usize) {
    let mut ad = Advertisement::new();
    let mut skipped = 0;

    // NUL padding counts as whitespace for trimming
    let body = text.trim_matches(|c: char| c.is_whitespace() || c == '\0');
    if body.is_empty() {
        return (ad, 0);
    }

    for line in body.split("\r\n") {
        match line.split_once(':') {
            Some((name, value)) => {
                ad.insert(name.trim(), value.trim());
            }
            None => skipped += 1,
        }
    }
    (ad, skipped)
}
