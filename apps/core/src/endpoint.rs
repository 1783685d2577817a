use std::fmt::Write as _;

/// Routes exposed by the stats API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    Team(String),
    Category(String),
    Players,
    Log,
}

impl Endpoint {
    pub fn path(&self) -> String {
        match self {
            Self::Team(team) => format!("/api/team/{}", encode_component(team)),
            Self::Category(category) => format!("/api/category/{}", encode_component(category)),
            Self::Players => "/api/players".to_string(),
            Self::Log => "/api/log".to_string(),
        }
    }
}

/// Percent-encodes a path segment, leaving the same characters untouched as
/// `encodeURIComponent` does.
pub fn encode_component(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => encoded.push(char::from(byte)),
            _ => {
                let _ = write!(encoded, "%{byte:02X}");
            }
        }
    }
    encoded
}

#[cfg(test)]
mod tests {
    use super::{encode_component, Endpoint};

    #[test]
    fn builds_api_paths() {
        assert_eq!(Endpoint::Team("India".into()).path(), "/api/team/India");
        assert_eq!(
            Endpoint::Team("New Zealand".into()).path(),
            "/api/team/New%20Zealand"
        );
        assert_eq!(Endpoint::Category("fast".into()).path(), "/api/category/fast");
        assert_eq!(Endpoint::Players.path(), "/api/players");
        assert_eq!(Endpoint::Log.path(), "/api/log");
    }

    #[test]
    fn encodes_reserved_and_unicode_bytes() {
        assert_eq!(encode_component("U.A.E."), "U.A.E.");
        assert_eq!(encode_component("a/b?c"), "a%2Fb%3Fc");
        assert_eq!(encode_component("é"), "%C3%A9");
    }
}
