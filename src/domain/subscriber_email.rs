use regex::Regex;
use std::sync::LazyLock;

// Something, an at sign, something, a dot, something. No whitespace, no second `@`.
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Email pattern is a valid regex.")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriberEmail(String);

impl SubscriberEmail {
    /// The raw input is matched as typed, so leading or trailing whitespace
    /// makes it invalid.
    pub fn parse(email: &str) -> Result<Self, String> {
        if EMAIL_PATTERN.is_match(email) {
            Ok(Self(email.to_string()))
        } else {
            Err(format!("{} is not a valid subscriber email.", email))
        }
    }
}

impl AsRef<str> for SubscriberEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SubscriberEmail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
