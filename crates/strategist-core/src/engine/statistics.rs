use crate::{Catalog, PortfolioStatistics, WeightedSymbol};

/// Weighted portfolio return and volatility from catalog profiles.
///
/// Variance is `Σ (w·σ)²`: assets are treated as uncorrelated, so the
/// covariance cross terms of a full mean-variance model are absent.
#[derive(Debug, Clone, Copy)]
pub struct PortfolioStatisticsAggregator<'a> {
    catalog: &'a Catalog,
}

impl<'a> PortfolioStatisticsAggregator<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    pub fn aggregate(&self, positions: &[WeightedSymbol]) -> PortfolioStatistics {
        let mut weighted_return = 0.0;
        let mut weighted_variance = 0.0;

        for position in positions {
            let weight = position.allocation_percent / 100.0;
            let (expected_return, volatility) =
                self.catalog.return_and_volatility(&position.symbol);

            weighted_return += weight * expected_return;
            weighted_variance += (weight * volatility).powi(2);
        }

        let stats = PortfolioStatistics {
            expected_return: weighted_return,
            volatility: weighted_variance.max(0.0).sqrt(),
        };
        tracing::debug!(
            positions = positions.len(),
            expected_return = stats.expected_return,
            volatility = stats.volatility,
            "aggregated portfolio statistics"
        );
        stats
    }
}
