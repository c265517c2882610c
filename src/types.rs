//! Common types used throughout the kursbot bot.

use std::fmt;

use crate::error::{BotError, Result};

/// Stable identity of a chat user, as assigned by Telegram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub u64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Uppercase alphabetic currency identifier such as `USD`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Parse a code, normalizing it to uppercase.
    ///
    /// Returns `None` for empty input or anything that is not ASCII letters.
    pub fn parse(input: &str) -> Option<Self> {
        let code = input.trim();
        if code.is_empty() || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return None;
        }
        Some(CurrencyCode(code.to_ascii_uppercase()))
    }

    /// Wrap a code without validation. Used for keys coming back from the rate service.
    pub fn new_unchecked(code: &str) -> Self {
        CurrencyCode(code.to_ascii_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ordered (source, target) pair of currencies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyPair {
    pub from: CurrencyCode,
    pub to: CurrencyCode,
}

impl CurrencyPair {
    /// Parse `SRC/TGT`, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`BotError::InvalidPairFormat`] unless the input splits on `/`
    /// into exactly two valid currency codes.
    pub fn parse(input: &str) -> Result<Self> {
        let normalized = input.trim().to_uppercase();
        let tokens: Vec<&str> = normalized.split('/').collect();
        let [from, to] = tokens.as_slice() else {
            return Err(BotError::InvalidPairFormat(input.to_string()));
        };

        match (CurrencyCode::parse(from), CurrencyCode::parse(to)) {
            (Some(from), Some(to)) => Ok(Self { from, to }),
            _ => Err(BotError::InvalidPairFormat(input.to_string())),
        }
    }

    /// Distinct codes to request from the rate service, source first.
    pub fn symbols(&self) -> Vec<CurrencyCode> {
        if self.from == self.to {
            vec![self.from.clone()]
        } else {
            vec![self.from.clone(), self.to.clone()]
        }
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.from, self.to)
    }
}

/// Positive, finite amount of money awaiting conversion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Amount(f64);

impl Amount {
    /// Parse user input as a decimal amount.
    ///
    /// Single underscores between digits are accepted as digit separators
    /// (`1_000`).
    ///
    /// # Errors
    ///
    /// Returns [`BotError::InvalidAmount`] when the text is not a number or
    /// the number is not strictly positive and finite.
    pub fn parse(input: &str) -> Result<Self> {
        let invalid = || BotError::InvalidAmount(input.to_string());
        let digits = strip_digit_separators(input.trim()).ok_or_else(invalid)?;
        let value: f64 = digits.parse().map_err(|_| invalid())?;

        Self::new(value).ok_or_else(invalid)
    }

    pub fn new(value: f64) -> Option<Self> {
        (value.is_finite() && value > 0.0).then_some(Amount(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

fn strip_digit_separators(input: &str) -> Option<String> {
    let chars: Vec<char> = input.chars().collect();
    let mut digits = String::with_capacity(input.len());
    for (i, &c) in chars.iter().enumerate() {
        if c != '_' {
            digits.push(c);
            continue;
        }
        let between_digits = i > 0
            && chars[i - 1].is_ascii_digit()
            && chars.get(i + 1).is_some_and(char::is_ascii_digit);
        if !between_digits {
            return None;
        }
    }
    Some(digits)
}

// Renders like a Python float: "100.0", "12.5", and exponent form outside
// [1e-4, 1e16) such as "1e+16" or "1e-05".
impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.0;
        if !(1e-4..1e16).contains(&value) {
            let scientific = format!("{value:e}");
            let (mantissa, exponent) = scientific
                .split_once('e')
                .unwrap_or((scientific.as_str(), "0"));
            let (sign, exponent) = match exponent.strip_prefix('-') {
                Some(exponent) => ('-', exponent),
                None => ('+', exponent),
            };
            write!(f, "{mantissa}e{sign}{exponent:0>2}")
        } else if value.fract() == 0.0 {
            write!(f, "{value:.1}")
        } else {
            write!(f, "{value}")
        }
    }
}

/// A single inline button: the label shown and the data sent back when tapped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    pub data: String,
}

/// Rows of inline buttons attached to a reply.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Keyboard {
    pub rows: Vec<Vec<Button>>,
}

/// Outgoing chat message produced by the dialogue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub keyboard: Option<Keyboard>,
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            keyboard: None,
        }
    }

    pub fn with_keyboard(text: impl Into<String>, keyboard: Keyboard) -> Self {
        Self {
            text: text.into(),
            keyboard: Some(keyboard),
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn pair_is_uppercased() -> Result<()> {
        let pair = CurrencyPair::parse(" gbp/jpy ")?;
        assert_eq!(pair.from.as_str(), "GBP");
        assert_eq!(pair.to.as_str(), "JPY");
        Ok(())
    }

    #[test]
    fn pair_tolerates_spaces_around_slash() -> Result<()> {
        let pair = CurrencyPair::parse("usd / eur")?;
        assert_eq!(pair.to_string(), "USD/EUR");
        Ok(())
    }

    #[test]
    fn pair_rejects_wrong_token_count() {
        for input in ["USD", "USD/EUR/RUB", "", "/", "USD/", "USDEUR"] {
            assert!(
                matches!(
                    CurrencyPair::parse(input),
                    Err(BotError::InvalidPairFormat(_))
                ),
                "accepted {input:?}"
            );
        }
    }

    #[test]
    fn pair_rejects_non_alphabetic_codes() {
        assert!(CurrencyPair::parse("US1/EUR").is_err());
        assert!(CurrencyPair::parse("$/€").is_err());
    }

    #[test]
    fn same_currency_requests_one_symbol() -> Result<()> {
        let pair = CurrencyPair::parse("usd/USD")?;
        assert_eq!(pair.symbols().len(), 1);
        Ok(())
    }

    #[test]
    fn amount_rejects_non_positive_and_garbage() {
        for input in ["-5", "0", "0.0", "abc", "", "nan", "inf", "1,5"] {
            assert!(
                matches!(Amount::parse(input), Err(BotError::InvalidAmount(_))),
                "accepted {input:?}"
            );
        }
    }

    #[test]
    fn amount_display_keeps_trailing_zero() -> Result<()> {
        assert_eq!(Amount::parse("100")?.to_string(), "100.0");
        assert_eq!(Amount::parse(" 12.5 ")?.to_string(), "12.5");
        assert_eq!(Amount::parse("0.1")?.to_string(), "0.1");
        assert_eq!(Amount::parse("0.0001")?.to_string(), "0.0001");
        Ok(())
    }

    #[test]
    fn amount_display_uses_exponent_at_extremes() -> Result<()> {
        assert_eq!(Amount::parse("1e16")?.to_string(), "1e+16");
        assert_eq!(Amount::parse("2.5e20")?.to_string(), "2.5e+20");
        assert_eq!(Amount::parse("0.00001")?.to_string(), "1e-05");
        assert_eq!(Amount::parse("1.5e-7")?.to_string(), "1.5e-07");
        Ok(())
    }

    #[test]
    fn amount_accepts_digit_separators() -> Result<()> {
        assert_eq!(Amount::parse("1_000")?.value(), 1000.0);
        assert_eq!(Amount::parse("1_000.5")?.value(), 1000.5);
        for input in ["_1000", "1000_", "1__000", "1_.5"] {
            assert!(Amount::parse(input).is_err(), "accepted {input:?}");
        }
        Ok(())
    }

    proptest! {
        #[test]
        fn non_positive_amounts_are_rejected(
            value in any::<f64>().prop_filter("non-positive", |v| *v <= 0.0),
        ) {
            prop_assert!(matches!(
                Amount::parse(&value.to_string()),
                Err(BotError::InvalidAmount(_))
            ));
        }

        #[test]
        fn letters_are_not_amounts(input in "[a-zA-Z ]{0,12}") {
            prop_assert!(matches!(
                Amount::parse(&input),
                Err(BotError::InvalidAmount(_))
            ));
        }

        #[test]
        fn pairs_need_exactly_one_slash(
            tokens in prop_oneof![
                prop::collection::vec("[A-Za-z]{0,4}", 1..2),
                prop::collection::vec("[A-Za-z]{0,4}", 3..6),
            ],
        ) {
            let input = tokens.join("/");
            prop_assert!(matches!(
                CurrencyPair::parse(&input),
                Err(BotError::InvalidPairFormat(_))
            ));
        }
    }
}
