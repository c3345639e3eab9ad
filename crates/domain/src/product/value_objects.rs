//! Value objects for the product domain.

use serde::{Deserialize, Serialize};

/// Sequential product identifier, starting at 1 within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(u64);

impl ProductId {
    /// Creates a product ID from its numeric value.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the numeric value.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A strictly positive price.
///
/// Prices are kept as entered (a decimal number) rather than rounded
/// to cents, so `0.001` is a valid price that displays as `0.00`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(f64);

impl Price {
    /// Parses a price from form text.
    ///
    /// Accepts plain decimal notation with an optional sign, fraction and
    /// exponent (`19.99`, `.5`, `5.`, `+3`, `1e3`). Returns `None` for
    /// anything else and for values that are not finite or not above zero.
    pub fn parse(text: &str) -> Option<Self> {
        if !is_decimal_literal(text) {
            return None;
        }
        text.parse::<f64>()
            .ok()
            .filter(|value| value.is_finite() && *value > 0.0)
            .map(Self)
    }

    /// Creates a price from a value already known to be positive.
    ///
    /// Returns `None` when `value` is not a finite number above zero.
    pub fn from_f64(value: f64) -> Option<Self> {
        (value.is_finite() && value > 0.0).then_some(Self(value))
    }

    // Seed data only; the values are literals known to be positive.
    pub(super) const fn seed(value: f64) -> Self {
        Self(value)
    }

    /// Returns the numeric value.
    pub fn value(&self) -> f64 {
        self.0
    }
}

/// Renders with two decimals and comma thousands separators: `1,234.50`.
impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let fixed = format!("{:.2}", self.0);
        let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

        let digits = whole.len();
        let mut grouped = String::with_capacity(digits + digits / 3);
        for (i, c) in whole.chars().enumerate() {
            if i > 0 && (digits - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(c);
        }
        write!(f, "{grouped}.{fraction}")
    }
}

// Rust's float parser also understands `inf`, `nan` and `infinity`;
// only ordinary decimal literals count as numbers on the form.
fn is_decimal_literal(text: &str) -> bool {
    let bytes = text.as_bytes();
    let mut i = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }

    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let mut mantissa_digits = i - int_start;

    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        let frac_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        mantissa_digits += i - frac_start;
    }

    if mantissa_digits == 0 {
        return false;
    }

    if i < bytes.len() && matches!(bytes[i], b'e' | b'E') {
        i += 1;
        if matches!(bytes.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        let exp_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == exp_start {
            return false;
        }
    }

    i == bytes.len()
}

/// Product category.
///
/// The form offers a fixed list of choices ([`Category::OPTIONS`]), but a
/// category is stored as the text that was submitted. Whether that text
/// has to be one of the listed choices is decided by validation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    /// The choices presented by the form, in display order.
    pub const OPTIONS: [&'static str; 5] =
        ["Electronics", "Home Appliances", "Clothing", "Books", "Other"];

    /// Creates a category from text.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the category as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if this is one of [`Category::OPTIONS`].
    pub fn is_listed(&self) -> bool {
        Self::OPTIONS.contains(&self.0.as_str())
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Category {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Category {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for Category {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
