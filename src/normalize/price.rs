//! Price text conversion.
//!
//! Scraped prices arrive as display strings (`"$1,250,000"`, `"$899K"`,
//! `"$400,000 - $450,000"`). The listing normalizer does not care how they are
//! read; it asks a [`PriceParser`] and treats a rejection as a bad row.

/// Converts a scraped price string into a number.
pub trait PriceParser: Send + Sync {
    fn parse_price(&self, text: &str) -> Result<f64, String>;
}

/// Default currency-text parser for US listing sites.
///
/// - `$`, `,`, whitespace and a trailing `+` are ignored
/// - `K` / `M` suffixes scale by 1e3 / 1e6
/// - ranges (`-`, `–`, `—`) resolve to the lower bound
#[derive(Debug, Clone, Copy, Default)]
pub struct CurrencyText;

impl PriceParser for CurrencyText {
    fn parse_price(&self, text: &str) -> Result<f64, String> {
        let lower = text
            .split(['-', '\u{2013}', '\u{2014}'])
            .map(str::trim)
            .find(|part| !part.is_empty())
            .ok_or_else(|| "empty price".to_string())?;

        let cleaned: String = lower
            .chars()
            .filter(|c| !matches!(c, '$' | ',' | '+') && !c.is_whitespace())
            .collect();

        let (digits, scale) = match cleaned.chars().last() {
            Some('K' | 'k') => (&cleaned[..cleaned.len() - 1], 1_000.0),
            Some('M' | 'm') => (&cleaned[..cleaned.len() - 1], 1_000_000.0),
            _ => (cleaned.as_str(), 1.0),
        };

        let value = digits
            .parse::<f64>()
            .map_err(|_| format!("not a currency amount: {text:?}"))?;
        if !value.is_finite() || value < 0.0 {
            return Err(format!("not a currency amount: {text:?}"));
        }
        Ok(value * scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_dollar_amounts() {
        assert_eq!(CurrencyText.parse_price("$1,250,000").unwrap(), 1_250_000.0);
        assert_eq!(CurrencyText.parse_price("  $ 899,000 ").unwrap(), 899_000.0);
        assert_eq!(CurrencyText.parse_price("450000").unwrap(), 450_000.0);
    }

    #[test]
    fn magnitude_suffixes() {
        assert_eq!(CurrencyText.parse_price("$899K").unwrap(), 899_000.0);
        assert_eq!(CurrencyText.parse_price("$1.2M").unwrap(), 1_200_000.0);
    }

    #[test]
    fn ranges_use_lower_bound() {
        assert_eq!(
            CurrencyText.parse_price("$400,000 - $450,000").unwrap(),
            400_000.0
        );
        assert_eq!(CurrencyText.parse_price("$1.1M\u{2013}$1.3M").unwrap(), 1_100_000.0);
    }

    #[test]
    fn rejects_non_amounts() {
        assert!(CurrencyText.parse_price("").is_err());
        assert!(CurrencyText.parse_price("Contact agent").is_err());
        assert!(CurrencyText.parse_price("$").is_err());
    }
}
