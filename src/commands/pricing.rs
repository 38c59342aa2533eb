//! `tracelens pricing` command - show the effective pricing table

use crate::cli::{Cli, OutputFormat};
use tracelens_core::error::Result;
use tracelens_core::pricing::{ModelPricing, PricingTable};

/// Execute the pricing command
pub fn execute(cli: &Cli, pricing: &PricingTable) -> Result<()> {
    match cli.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(pricing)?);
        }
        OutputFormat::Human => print!("{}", render_table(pricing)),
    }
    Ok(())
}

fn render_table(pricing: &PricingTable) -> String {
    let mut out = format!(
        "{:<16} {:>12} {:>12}\n",
        "PROVIDER", "INPUT/1M", "OUTPUT/1M"
    );
    for (provider, rate) in &pricing.providers {
        out.push_str(&rate_line(provider, rate));
    }
    out.push_str(&rate_line("(default)", &pricing.default));
    out
}

fn rate_line(provider: &str, rate: &ModelPricing) -> String {
    format!(
        "{:<16} {:>12} {:>12}\n",
        provider,
        format!("${:.3}", rate.input_per_million),
        format!("${:.3}", rate.output_per_million)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_table() {
        let text = render_table(&PricingTable::builtin());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 5);
        assert_eq!(lines[1], "anthropic              $3.000      $15.000");
        assert!(lines[2].starts_with("gemini "));
        assert!(lines[3].starts_with("openai "));
        assert!(lines[4].starts_with("(default)"));
        assert!(lines[4].ends_with("$0.100       $0.300"));
    }
}
