use plurabus_core::{LinkError, LobbyKey, link::LOBBY_KEY_LEN};
use rand::{Rng, distr::Alphanumeric};

/// Fresh random lobby key.
pub fn generate_lobby_key() -> Result<LobbyKey, LinkError> {
    let mut rng = rand::rng();
    let raw: String = (0..LOBBY_KEY_LEN)
        .map(|_| char::from(rng.sample(Alphanumeric)))
        .collect();
    LobbyKey::parse(&raw)
}

/// Escape text for HTML element content and quoted attribute values.
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_keys_are_valid_and_distinct() {
        let a = generate_lobby_key().unwrap();
        let b = generate_lobby_key().unwrap();
        assert_eq!(a.as_str().len(), LOBBY_KEY_LEN);
        assert_ne!(a, b);
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">'&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }
}
