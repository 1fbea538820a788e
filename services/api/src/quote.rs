use chrono::{Local, NaiveDate};
use clap::Args;
use jewel_quote::error::AppError;
use jewel_quote::pricing::{quote, DesignConfiguration, DesignKeys, PriceQuote};
use jewel_quote::text::truncate;
use std::path::PathBuf;

const LABEL_WIDTH: usize = 44;

#[derive(Args, Debug, Default)]
pub(crate) struct QuoteArgs {
    /// JSON design document with catalog keys; flags below are ignored when given
    #[arg(long)]
    pub(crate) design: Option<PathBuf>,
    /// Metal key, e.g. yellow_gold or stainless_steel
    #[arg(long)]
    pub(crate) metal: Option<String>,
    /// Jewelry type key; repeat for several pieces (necklace, pendant, ring, ...)
    #[arg(long = "type")]
    pub(crate) types: Vec<String>,
    /// Karat or purity key (10k, 14k, 18k, 24k, 925_silver, pure_platinum)
    #[arg(long)]
    pub(crate) karat: Option<String>,
    /// Gemstone key, or none
    #[arg(long)]
    pub(crate) gemstone: Option<String>,
    /// Gemstone size: small, medium, large, extra_large
    #[arg(long)]
    pub(crate) gem_size: Option<String>,
    /// Chain style key for necklaces and bracelets
    #[arg(long)]
    pub(crate) chain_style: Option<String>,
    /// Chain thickness: delicate, medium, bold, statement
    #[arg(long)]
    pub(crate) chain_thickness: Option<String>,
    /// Chain length in inches (defaults to 18)
    #[arg(long)]
    pub(crate) chain_length: Option<f64>,
    /// Closure key for necklaces and bracelets
    #[arg(long)]
    pub(crate) closure: Option<String>,
    /// Reference artwork URL; adds the custom design fee outside the steel tier
    #[arg(long)]
    pub(crate) logo_url: Option<String>,
    /// Number of units (defaults to 1)
    #[arg(long)]
    pub(crate) quantity: Option<u32>,
    /// Print the quote as JSON instead of a table
    #[arg(long)]
    pub(crate) json: bool,
}

impl QuoteArgs {
    fn design_keys(self) -> Result<DesignKeys, AppError> {
        if let Some(path) = self.design {
            let raw = std::fs::read_to_string(path)?;
            return Ok(serde_json::from_str(&raw)?);
        }

        Ok(DesignKeys {
            jewelry_types: self.types,
            metal_type: self.metal,
            metal_karat: self.karat,
            gemstone_type: self.gemstone,
            gemstone_size: self.gem_size,
            chain_style: self.chain_style,
            chain_thickness: self.chain_thickness,
            chain_length: self.chain_length,
            closure_type: self.closure,
            logo_image_url: self.logo_url,
            quantity: self.quantity,
        })
    }
}

pub(crate) fn run_quote(args: QuoteArgs) -> Result<(), AppError> {
    let as_json = args.json;
    let design = args.design_keys()?.into_design();
    let quote = quote(&design);

    if as_json {
        println!("{}", serde_json::to_string_pretty(&quote)?);
    } else {
        let today = Local::now().date_naive();
        for line in render_quote(&design, &quote, today) {
            println!("{line}");
        }
    }

    Ok(())
}

fn row(label: &str, amount: impl std::fmt::Display) -> String {
    format!(
        "  {:<width$} ${amount:>8}",
        truncate(label, LABEL_WIDTH),
        width = LABEL_WIDTH
    )
}

pub(crate) fn render_quote(
    design: &DesignConfiguration,
    quote: &PriceQuote,
    today: NaiveDate,
) -> Vec<String> {
    let mut lines = vec![format!("Custom jewelry estimate ({today})")];

    if design.jewelry_types.is_empty() {
        lines.push("No jewelry type selected; nothing to price yet.".to_string());
        return lines;
    }

    lines.push(String::new());
    lines.push("Per unit".to_string());
    for item in &quote.breakdown {
        lines.push(row(&item.label, item.amount));
    }
    lines.push(row("Unit price", quote.unit_price));

    lines.push(String::new());
    let order = &quote.order;
    lines.push(row(&format!("Subtotal ({} units)", order.quantity), order.subtotal));
    if order.has_discount() {
        lines.push(row(
            &format!("Bulk discount ({})", order.bulk_tier.label()),
            format!("-{}", order.savings),
        ));
    }
    lines.push(row("Estimated total", quote.total_price));
    if order.has_discount() {
        lines.push(row("Per unit after discount", order.effective_unit_price()));
    }

    if let Some((tier, missing)) = order.units_to_next_tier() {
        lines.push(format!(
            "Order {missing} more to unlock {} off.",
            tier.rate()
        ));
    }

    lines.push(String::new());
    lines.push("Prices are estimates and are confirmed by the studio before production.".to_string());
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 14).expect("valid date")
    }

    #[test]
    fn flags_build_lenient_design() {
        let args = QuoteArgs {
            metal: Some("stainless_steel".to_string()),
            types: vec!["necklace".to_string(), "pendant".to_string()],
            karat: Some("24k".to_string()),
            ..QuoteArgs::default()
        };

        let design = args.design_keys().expect("keys").into_design();

        assert_eq!(design.jewelry_types.len(), 2);
        assert_eq!(design.metal_karat, None);
        assert_eq!(quote(&design).unit_price, 53);
    }

    #[test]
    fn render_shows_bulk_savings_and_next_tier() {
        let args = QuoteArgs {
            metal: Some("yellow_gold".to_string()),
            types: vec!["ring".to_string()],
            gemstone: Some("diamond".to_string()),
            gem_size: Some("large".to_string()),
            quantity: Some(30),
            ..QuoteArgs::default()
        };
        let design = args.design_keys().expect("keys").into_design();
        let quote = quote(&design);

        let lines = render_quote(&design, &quote, sample_day());

        assert_eq!(lines[0], "Custom jewelry estimate (2026-03-14)");
        assert!(lines.iter().any(|line| line.contains("-6975")));
        assert!(lines
            .iter()
            .any(|line| line.starts_with("  Estimated total") && line.ends_with("20925")));
        assert!(lines.iter().any(
            |line| line.starts_with("  Per unit after discount") && line.ends_with("698")
        ));
        assert!(lines
            .iter()
            .any(|line| line == "Order 20 more to unlock 30% off."));
    }

    #[test]
    fn render_without_types_skips_breakdown() {
        let design = DesignConfiguration::new();
        let lines = render_quote(&design, &quote(&design), sample_day());
        assert_eq!(lines.len(), 2);
    }
}
