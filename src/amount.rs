//! Validation of the amounts recorded against transactions.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::Error;

/// Convert `amount` to a [Decimal] holding exactly the digits it is written
/// with, e.g. `12.345` or `0.004`.
///
/// # Errors
///
/// Returns an [Error::InvalidAmount] if `amount` is not a finite number
/// greater than zero, or has more digits than a [Decimal] can hold.
pub fn positive_amount(amount: f64) -> Result<Decimal, Error> {
    let text = amount.to_string();

    if !amount.is_finite() {
        return Err(Error::InvalidAmount(text));
    }

    // `f64`'s `Display` is the shortest text that reads back as `amount`, and
    // it never uses an exponent.
    let decimal = match Decimal::from_str(&text) {
        Ok(decimal) => decimal,
        Err(_) => return Err(Error::InvalidAmount(text)),
    };

    if decimal > Decimal::ZERO {
        Ok(decimal)
    } else {
        Err(Error::InvalidAmount(text))
    }
}

/// Parse amount text as typed into a form, e.g. `"12.50"`.
///
/// # Errors
///
/// Returns an [Error::InvalidAmount] if `text` is not a number, or is not a
/// valid amount according to [positive_amount].
pub fn parse_amount(text: &str) -> Result<f64, Error> {
    let amount: f64 = text
        .trim()
        .parse()
        .map_err(|_| Error::InvalidAmount(text.to_owned()))?;

    positive_amount(amount)?;

    Ok(amount)
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use crate::Error;

    use super::{parse_amount, positive_amount};

    #[test]
    fn keeps_every_digit() {
        assert_eq!(positive_amount(12.345), Ok(Decimal::new(12_345, 3)));
        assert_eq!(positive_amount(0.004), Ok(Decimal::new(4, 3)));
        assert_eq!(positive_amount(0.1), Ok(Decimal::new(1, 1)));
        assert_eq!(positive_amount(1500.0), Ok(Decimal::new(1_500, 0)));
        assert_eq!(positive_amount(12.345).unwrap().to_string(), "12.345");
    }

    #[test]
    fn rejects_zero_negative_and_non_finite() {
        for amount in [0.0, -0.0, -5.0, -0.004, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let result = positive_amount(amount);

            assert!(
                matches!(result, Err(Error::InvalidAmount(_))),
                "want InvalidAmount for {amount}, got {result:?}"
            );
        }
    }

    #[test]
    fn rejects_amounts_too_large_for_a_decimal() {
        let result = positive_amount(1e30);

        assert!(matches!(result, Err(Error::InvalidAmount(_))));
    }

    #[test]
    fn parses_form_text() {
        assert_eq!(parse_amount("12.50"), Ok(12.5));
        assert_eq!(parse_amount(" 7 "), Ok(7.0));
        assert_eq!(parse_amount("0.004"), Ok(0.004));
        assert_eq!(parse_amount(""), Err(Error::InvalidAmount("".to_owned())));
        assert_eq!(
            parse_amount("ten"),
            Err(Error::InvalidAmount("ten".to_owned()))
        );
        assert!(parse_amount("NaN").is_err());
        assert!(parse_amount("-3").is_err());
    }
}
