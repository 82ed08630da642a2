use crate::EngineError;

use super::round_to;

/// Converts a quote-currency amount into fractional units.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShareSizer;

impl ShareSizer {
    /// Units affordable with `amount_quote`, rounded to 3 decimals.
    pub fn size(amount_quote: f64, unit_price: f64) -> Result<f64, EngineError> {
        if !unit_price.is_finite() || unit_price <= 0.0 {
            return Err(EngineError::InvalidPrice { price: unit_price });
        }
        Ok(round_to(amount_quote / unit_price, 3))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes_fractional_units() {
        assert_eq!(ShareSizer::size(16.23, 580.0), Ok(0.028));
        assert_eq!(ShareSizer::size(6.49, 62.0), Ok(0.105));
        assert_eq!(ShareSizer::size(0.0, 62.0), Ok(0.0));
    }

    #[test]
    fn units_times_price_recovers_amount() {
        for (amount, price) in [(16.23, 580.0), (9.74, 230.0), (1_250.0, 425.0), (3.5, 0.75)] {
            let units = ShareSizer::size(amount, price).expect("valid price");
            assert!(
                (units * price - amount).abs() <= 0.0005 * price + 1e-9,
                "amount={amount} price={price} units={units}"
            );
        }
    }

    #[test]
    fn non_positive_price_is_rejected() {
        assert_eq!(
            ShareSizer::size(10.0, 0.0),
            Err(EngineError::InvalidPrice { price: 0.0 })
        );
        assert!(ShareSizer::size(10.0, -1.0).is_err());
    }
}
