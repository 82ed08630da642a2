use strategist_core::{PortfolioReport, ProjectionResult};

use crate::cli::OutputFormat;
use crate::commands::Rendered;
use crate::error::CliError;

pub fn render(rendered: &Rendered, format: OutputFormat, pretty: bool) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => {
            let payload = if pretty {
                serde_json::to_string_pretty(&rendered.envelope)?
            } else {
                serde_json::to_string(&rendered.envelope)?
            };
            println!("{payload}");
        }
        OutputFormat::Table => render_table(rendered)?,
    }

    Ok(())
}

fn render_table(rendered: &Rendered) -> Result<(), CliError> {
    let meta = &rendered.envelope.meta;
    println!("request_id  : {}", meta.request_id);
    println!("generated_at: {}", meta.generated_at_rfc3339());
    println!(
        "sources     : {}",
        meta.source_chain
            .iter()
            .map(|source| source.as_str())
            .collect::<Vec<_>>()
            .join(",")
    );
    println!("latency_ms  : {}", meta.latency_ms);

    if !meta.warnings.is_empty() {
        println!("warnings:");
        for warning in &meta.warnings {
            println!("  - {warning}");
        }
    }

    println!();
    if rendered.table.is_empty() {
        println!("{}", serde_json::to_string_pretty(&rendered.envelope.data)?);
    } else {
        for line in &rendered.table {
            println!("{line}");
        }
    }

    Ok(())
}

/// Summary of a built portfolio.
pub fn report_lines(report: &PortfolioReport) -> Vec<String> {
    let local = report.local_currency.as_str();
    let quote = report.quote_currency.as_str();

    let mut lines = vec![
        format!(
            "Portfolio: {} ({}), horizon {}",
            report.risk_tier,
            report.risk_tier.label(),
            report.projection.horizon_label
        ),
        format!(
            "Budget: {local} {} = {quote} {} at {} {local}/{quote}",
            group_thousands(report.budget_local, 2),
            group_thousands(report.buying_power_quote, 2),
            group_thousands(report.fx_rate, 2)
        ),
        String::new(),
        format!(
            "{:<7} {:<6} {:>6} {:>12} {:>14} {:>12} {:>9}",
            "SYMBOL",
            "TYPE",
            "ALLOC",
            format!("PRICE {quote}"),
            format!("AMOUNT {local}"),
            format!("AMOUNT {quote}"),
            "UNITS"
        ),
    ];

    for position in &report.positions {
        lines.push(format!(
            "{:<7} {:<6} {:>5}% {:>12} {:>14} {:>12} {:>9.3}",
            position.symbol.as_str(),
            position.asset_type.as_str(),
            position.allocation_percent,
            group_thousands(position.unit_price, 2),
            group_thousands(position.amount_local, 2),
            group_thousands(position.amount_quote, 2),
            position.fractional_units
        ));
    }

    if !report.skipped_symbols.is_empty() {
        let skipped = report
            .skipped_symbols
            .iter()
            .map(|symbol| symbol.as_str())
            .collect::<Vec<_>>();
        lines.push(format!("Skipped (no price): {}", skipped.join(", ")));
    }

    lines.push(String::new());
    lines.extend(projection_lines(&report.projection, local));
    lines.push(String::new());
    lines.push(report.disclaimer.clone());
    lines
}

/// Scenario table, assumptions and risk factors.
pub fn projection_lines(projection: &ProjectionResult, local_currency: &str) -> Vec<String> {
    let scenarios = &projection.scenarios;
    let assumptions = &projection.assumptions;

    let mut lines = vec![format!("Projection over {}:", projection.horizon_label)];
    for (name, scenario) in [
        ("pessimistic", &scenarios.pessimistic),
        ("expected", &scenarios.expected),
        ("optimistic", &scenarios.optimistic),
    ] {
        lines.push(format!(
            "  {name:<12} {local_currency} {:>14}  ({:+.1}%)",
            group_thousands(scenario.value_local, 0),
            scenario.return_percent
        ));
    }

    lines.push(format!(
        "Assumptions: asset return {}, fx impact {}, total return {}, volatility {}",
        percent(assumptions.asset_return),
        percent(assumptions.fx_impact),
        percent(assumptions.total_return),
        percent(assumptions.total_volatility)
    ));
    lines.push(String::from("Risk factors:"));
    lines.extend(projection.risk_factors.iter().map(|note| format!("  - {note}")));
    lines
}

/// Fraction as a one-decimal percentage, `0.149` -> `14.9%`.
pub fn percent(fraction: f64) -> String {
    format!("{:.1}%", fraction * 100.0)
}

/// Fixed-point formatting with comma thousands separators.
pub fn group_thousands(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (integer, fraction) = match formatted.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::with_capacity(formatted.len() + integer.len() / 3 + 1);
    if value.is_sign_negative() && formatted.chars().any(|ch| ch.is_ascii_digit() && ch != '0') {
        grouped.push('-');
    }
    for (index, ch) in integer.chars().enumerate() {
        if index > 0 && (integer.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if let Some(fraction) = fraction {
        grouped.push('.');
        grouped.push_str(fraction);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(group_thousands(57_117.8, 0), "57,118");
        assert_eq!(group_thousands(1_540.0, 2), "1,540.00");
        assert_eq!(group_thousands(999.999, 2), "1,000.00");
        assert_eq!(group_thousands(16.23, 2), "16.23");
        assert_eq!(group_thousands(1_234_567.0, 0), "1,234,567");
        assert_eq!(group_thousands(-2_500.5, 1), "-2,500.5");
        assert_eq!(group_thousands(-0.001, 2), "0.00");
    }

    #[test]
    fn formats_percentages() {
        assert_eq!(percent(0.149), "14.9%");
        assert_eq!(percent(-0.04), "-4.0%");
    }
}
