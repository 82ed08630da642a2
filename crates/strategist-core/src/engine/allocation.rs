use crate::{AllocationTemplate, Catalog, RiskTier};

/// Maps a risk-tier label to its fixed allocation template.
#[derive(Debug, Clone, Copy)]
pub struct AllocationTemplateSelector<'a> {
    catalog: &'a Catalog,
}

impl<'a> AllocationTemplateSelector<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// Case-insensitive; unrecognized labels get the medium template.
    pub fn select(&self, risk_tier: &str) -> &'a AllocationTemplate {
        self.select_tier(RiskTier::resolve(risk_tier))
    }

    pub fn select_tier(&self, tier: RiskTier) -> &'a AllocationTemplate {
        self.catalog.template(tier)
    }
}
