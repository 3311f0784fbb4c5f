use serde::Serialize;

/// Dialling codes offered by the form, paired with the country they label.
/// `+1` appears twice because it covers both the US and Canada.
pub const COUNTRY_CODES: [(&str, &str); 6] = [
    ("+91", "India"),
    ("+1", "US"),
    ("+44", "UK"),
    ("+971", "UAE"),
    ("+1", "Canada"),
    ("+61", "Australia"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CountryCode(&'static str);

impl CountryCode {
    pub fn parse(code: &str) -> Result<Self, String> {
        let code = code.trim();
        COUNTRY_CODES
            .iter()
            .find(|(known, _)| *known == code)
            .map(|(known, _)| Self(*known))
            .ok_or_else(|| format!("{} is not a supported country code.", code))
    }
}

impl Default for CountryCode {
    fn default() -> Self {
        Self(COUNTRY_CODES[0].0)
    }
}

impl AsRef<str> for CountryCode {
    fn as_ref(&self) -> &str {
        self.0
    }
}

impl std::fmt::Display for CountryCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

/// An optional mobile number together with its dialling code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactNumber {
    pub country_code: CountryCode,
    pub mobile: String,
}

impl ContactNumber {
    /// Whitespace-only input counts as "no number given".
    pub fn from_input(country_code: CountryCode, mobile: &str) -> Option<Self> {
        let mobile = mobile.trim();
        if mobile.is_empty() {
            None
        } else {
            Some(Self {
                country_code,
                mobile: mobile.to_string(),
            })
        }
    }
}
