//! Reproducibility engine — runs every emitter in order.
//!
//! Pipeline:
//! 1. Header imports
//! 2. US nationwide baseline reform
//! 3. Parameter reform
//! 4. Household situation and simulation
//! 5. Microsimulation comparison
//!
//! Each stage only contributes lines for the scopes it applies to; the
//! script is the concatenation in this fixed order.

use tracing::info;

use crate::context::EmitContext;
use crate::error::ReproResult;
use crate::household::{HouseholdNormaliser, PassthroughNormaliser};
use crate::types::{CodegenConfig, ReproRequest, ReproScript};
use crate::{baseline, header, implementation, reform, situation};

/// The reproducibility code engine.
pub struct ReproEngine {
    /// Household normaliser applied before embedding a situation.
    normaliser: Box<dyn HouseholdNormaliser>,
    /// Engine configuration.
    config: CodegenConfig,
}

impl ReproEngine {
    /// Create an engine with the default configuration.
    pub fn new(normaliser: Box<dyn HouseholdNormaliser>) -> Self {
        Self {
            normaliser,
            config: CodegenConfig::default(),
        }
    }

    /// Create with custom configuration.
    pub fn with_config(mut self, config: CodegenConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &CodegenConfig {
        &self.config
    }

    /// Generate the script reproducing `request`.
    pub fn generate(&self, request: &ReproRequest) -> ReproResult<ReproScript> {
        let ctx = EmitContext::new(request, &self.config);

        let mut lines = header::emit(&ctx);
        lines.extend(baseline::emit(&ctx)?);
        lines.extend(reform::emit(&ctx)?);
        lines.extend(situation::emit(&ctx, self.normaliser.as_ref())?);
        lines.extend(implementation::emit(&ctx));

        info!(
            scope = %request.scope,
            region = %request.region,
            year = %ctx.year,
            parameters = request.policy.reform.parameter_count(),
            lines = lines.len(),
            "generated reproducibility script"
        );
        Ok(ReproScript::new(lines))
    }
}

impl Default for ReproEngine {
    fn default() -> Self {
        Self::new(Box::new(PassthroughNormaliser))
    }
}

/// Generate script lines for `request` with a default engine.
pub fn reproducibility_code_block(request: &ReproRequest) -> ReproResult<Vec<String>> {
    ReproEngine::default()
        .generate(request)
        .map(ReproScript::into_lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::household::SchemaNormaliser;
    use crate::types::{Metadata, Reform, Year};
    use serde_json::json;

    fn us_reform() -> Reform {
        Reform::default().with_update("gov.a.b", "2023-01-01.2023-12-31", true)
    }

    #[test]
    fn engine_policy_empty_non_us() {
        let request = ReproRequest::policy(Metadata::new("policyengine_uk"), "uk");
        let script = ReproEngine::default().generate(&request).unwrap();
        assert_eq!(script.lines()[0], "from policyengine_uk import Microsimulation");
        assert_eq!(script.lines()[1], "baseline = Microsimulation()");
        assert_eq!(script.len(), 8);
    }

    #[test]
    fn engine_policy_us_orders_stages() {
        let request =
            ReproRequest::policy(Metadata::new("policyengine_us"), "us").with_reform(us_reform());
        let script = ReproEngine::default().generate(&request).unwrap();
        let source = script.to_source();
        let baseline_at = source.find("def modify_baseline").unwrap();
        let reform_at = source.find("def modify_parameters").unwrap();
        let compare_at = source.find("baseline = Microsimulation(").unwrap();
        assert!(baseline_at < reform_at);
        assert!(reform_at < compare_at);
    }

    #[test]
    fn engine_us_policy_without_reform_defines_what_it_uses() {
        let request = ReproRequest::policy(Metadata::new("policyengine_us"), "us");
        let source = ReproEngine::default().generate(&request).unwrap().to_source();
        assert!(!source.contains("class baseline_reform"));
        assert!(!source.contains("reform=baseline_reform"));
        assert!(source.contains("baseline = Microsimulation()\n"));
    }

    #[test]
    fn engine_household_uses_normaliser() {
        let metadata: Metadata = serde_json::from_value(json!({
            "package": "policyengine_us",
            "variables": {
                "household_net_income": { "entity": "household", "isInputVariable": false }
            }
        }))
        .unwrap();
        let household = json!({
            "households": {
                "your household": {
                    "members": ["you"],
                    "household_net_income": { "2024": 100 }
                }
            }
        });
        let request = ReproRequest::household(metadata, household);

        let with_schema = ReproEngine::new(Box::new(SchemaNormaliser))
            .generate(&request)
            .unwrap();
        assert!(!with_schema.to_source().contains("\"household_net_income\": {"));

        let passthrough = ReproEngine::default().generate(&request).unwrap();
        assert!(passthrough.to_source().contains("\"household_net_income\": {"));
    }

    #[test]
    fn engine_custom_default_year() {
        let config = CodegenConfig {
            default_year: Year(2027),
            ..CodegenConfig::default()
        };
        let engine = ReproEngine::default().with_config(config);
        let request = ReproRequest::policy(Metadata::new("policyengine_uk"), "uk");
        let script = engine.generate(&request).unwrap();
        assert!(script.to_source().contains("period=2027"));
        assert_eq!(engine.config().default_year, Year(2027));
    }

    #[test]
    fn code_block_matches_engine() {
        let request =
            ReproRequest::policy(Metadata::new("policyengine_us"), "us").with_reform(us_reform());
        let lines = reproducibility_code_block(&request).unwrap();
        let script = ReproEngine::default().generate(&request).unwrap();
        assert_eq!(lines, script.lines());
    }
}
