//! Per-provider token pricing
//!
//! Rates are USD per million tokens. The table is plain data: it ships with
//! built-in defaults and can be replaced from the config file.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::step::StepRecord;

const TOKENS_PER_RATE_UNIT: f64 = 1_000_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelPricing {
    pub input_per_million: f64,
    pub output_per_million: f64,
}

impl ModelPricing {
    pub const fn new(input_per_million: f64, output_per_million: f64) -> Self {
        Self {
            input_per_million,
            output_per_million,
        }
    }

    /// Cost of a prompt/completion token pair at this rate
    pub fn cost(&self, prompt_tokens: u64, completion_tokens: u64) -> f64 {
        prompt_tokens as f64 * (self.input_per_million / TOKENS_PER_RATE_UNIT)
            + completion_tokens as f64 * (self.output_per_million / TOKENS_PER_RATE_UNIT)
    }
}

/// Lookup table from lower-cased provider name to rate, with a fallback.
///
/// A deserialized table holds only the providers it lists; it is not merged
/// with [`PricingTable::builtin`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingTable {
    #[serde(default = "default_rate")]
    pub default: ModelPricing,

    #[serde(default, deserialize_with = "lowercase_keys")]
    pub providers: BTreeMap<String, ModelPricing>,
}

impl Default for PricingTable {
    fn default() -> Self {
        Self::builtin()
    }
}

fn default_rate() -> ModelPricing {
    ModelPricing::new(0.10, 0.30)
}

fn lowercase_keys<'de, D>(deserializer: D) -> Result<BTreeMap<String, ModelPricing>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = BTreeMap::<String, ModelPricing>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|(provider, rate)| (provider.to_lowercase(), rate))
        .collect())
}

impl PricingTable {
    /// Table with only a fallback rate
    pub fn with_default(default: ModelPricing) -> Self {
        Self {
            default,
            providers: BTreeMap::new(),
        }
    }

    /// Built-in rates for the providers agents commonly report
    pub fn builtin() -> Self {
        let mut table = Self::with_default(default_rate());
        table.insert("gemini", ModelPricing::new(0.075, 0.30));
        table.insert("openai", ModelPricing::new(0.50, 1.50));
        table.insert("anthropic", ModelPricing::new(3.00, 15.00));
        table
    }

    pub fn insert(&mut self, provider: &str, pricing: ModelPricing) {
        self.providers.insert(provider.to_lowercase(), pricing);
    }

    /// Rate for a provider; unmatched providers use the fallback rate
    pub fn rate_for(&self, provider: &str) -> ModelPricing {
        self.providers
            .get(&provider.to_lowercase())
            .copied()
            .unwrap_or(self.default)
    }

    /// Estimated cost of one step; steps without token usage cost nothing
    pub fn step_cost(&self, step: &StepRecord) -> f64 {
        match &step.token_usage {
            Some(tokens) => self
                .rate_for(step.provider())
                .cost(tokens.prompt_tokens, tokens.completion_tokens),
            None => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn test_builtin_rates() {
        let table = PricingTable::builtin();

        assert_eq!(table.rate_for("gemini"), ModelPricing::new(0.075, 0.30));
        assert_eq!(table.rate_for("openai"), ModelPricing::new(0.50, 1.50));
        assert_eq!(table.rate_for("anthropic"), ModelPricing::new(3.00, 15.00));
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let table = PricingTable::builtin();
        assert_eq!(table.rate_for("Gemini"), table.rate_for("gemini"));
        assert_eq!(table.rate_for("ANTHROPIC"), table.rate_for("anthropic"));
    }

    #[test]
    fn test_unknown_provider_uses_default() {
        let table = PricingTable::builtin();
        assert_eq!(table.rate_for("mistral"), ModelPricing::new(0.10, 0.30));
        assert_eq!(table.rate_for("unknown"), table.default);
    }

    #[test]
    fn test_step_cost() {
        let mut table = PricingTable::with_default(ModelPricing::new(1.0, 1.0));
        table.insert("acme", ModelPricing::new(10.0, 20.0));

        let step = StepRecord::new("s2", "plan")
            .with_provider("acme")
            .with_tokens(1000, 500);
        assert!(approx_eq(table.step_cost(&step), 0.02));
    }

    #[test]
    fn test_step_without_tokens_costs_nothing() {
        let table = PricingTable::builtin();
        let step = StepRecord::new("s1", "send_email").with_provider("gmail");
        assert_eq!(table.step_cost(&step), 0.0);
    }

    #[test]
    fn test_deserialize_lowercases_provider_keys() {
        let table: PricingTable = toml::from_str(
            r#"
            [providers.OpenAI]
            input_per_million = 2.5
            output_per_million = 10.0
            "#,
        )
        .unwrap();

        assert_eq!(table.default, ModelPricing::new(0.10, 0.30));
        assert_eq!(table.rate_for("openai"), ModelPricing::new(2.5, 10.0));
        assert_eq!(table.providers.len(), 1);
    }
}
