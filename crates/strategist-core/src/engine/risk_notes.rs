/// Builds the fixed list of plain-language risk statements for a projection.
#[derive(Debug, Clone, Copy)]
pub struct RiskNarrativeAssembler<'a> {
    local_currency: &'a str,
}

impl<'a> RiskNarrativeAssembler<'a> {
    pub fn new(local_currency: &'a str) -> Self {
        Self { local_currency }
    }

    /// Horizon note, volatility note, then the two currency statements.
    pub fn assemble(&self, horizon_years: f64, total_volatility: f64) -> Vec<String> {
        let horizon_note = if horizon_years < 1.0 {
            "Short-term investments are highly volatile - expect significant fluctuations"
        } else if horizon_years < 2.0 {
            "Medium-term horizon allows some volatility smoothing but remains uncertain"
        } else {
            "Long-term horizon reduces impact of short-term volatility"
        };

        let volatility_note = if total_volatility > 0.20 {
            "High portfolio volatility - value may swing ±30% or more"
        } else if total_volatility > 0.15 {
            "Moderate volatility - expect fluctuations of ±20-30%"
        } else {
            "Lower volatility portfolio - relatively stable growth expected"
        };

        vec![
            horizon_note.to_owned(),
            volatility_note.to_owned(),
            format!(
                "FX risk: {} depreciation increases foreign asset value but also increases \
                 local currency volatility",
                self.local_currency
            ),
            String::from(
                "Market access: Liquidity depends on broker availability and FX regulations",
            ),
        ]
    }
}
