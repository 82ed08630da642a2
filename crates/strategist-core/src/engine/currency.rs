use serde::{Deserialize, Serialize};

use crate::EngineError;

use super::round_to;

/// Budget split for one template slot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Allocation {
    pub amount_local: f64,
    pub amount_quote: f64,
}

/// Local currency to quote currency arithmetic.
#[derive(Debug, Clone, Copy, Default)]
pub struct CurrencyConverter;

impl CurrencyConverter {
    /// Quote-currency value of the whole budget, rounded to cents.
    pub fn buying_power(budget_local: f64, fx_rate: f64) -> Result<f64, EngineError> {
        check_rate(fx_rate)?;
        Ok(round_to(budget_local / fx_rate, 2))
    }

    /// Amount assigned to a slot holding `percent` of the budget.
    pub fn allocate(
        budget_local: f64,
        percent: f64,
        fx_rate: f64,
    ) -> Result<Allocation, EngineError> {
        check_rate(fx_rate)?;
        let amount_local = budget_local * (percent / 100.0);
        let amount_quote = amount_local / fx_rate;

        Ok(Allocation {
            amount_local: round_to(amount_local, 2),
            amount_quote: round_to(amount_quote, 2),
        })
    }
}

fn check_rate(fx_rate: f64) -> Result<(), EngineError> {
    if !fx_rate.is_finite() || fx_rate <= 0.0 {
        return Err(EngineError::InvalidRate { rate: fx_rate });
    }
    Ok(())
}
