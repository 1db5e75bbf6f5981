//! Baseline reform for US nationwide simulations.
//!
//! Population-wide US runs switch the baseline to reported state income
//! tax liabilities for the span the reform is active.

use tracing::{debug, warn};

use crate::context::EmitContext;
use crate::dates::{start_end_dates, DateRange};
use crate::error::ReproResult;
use crate::types::Scope;

/// Statement setting the reported state income tax toggle over `range`.
pub(crate) fn reported_state_tax_update(range: &DateRange) -> [String; 3] {
    [
        "    parameters.simulation.reported_state_income_tax.update(".to_string(),
        format!(
            "        start=instant(\"{}\"), stop=instant(\"{}\"),",
            range.earliest_start, range.latest_end,
        ),
        "        value=True)".to_string(),
    ]
}

/// Emit `modify_baseline` and the `baseline_reform` class.
///
/// Nothing is emitted for household scope, for regions outside the US
/// set, or when the reform has no parameters to take a date range from.
pub fn emit(ctx: &EmitContext<'_>) -> ReproResult<Vec<String>> {
    match ctx.scope() {
        Scope::Household => return Ok(Vec::new()),
        Scope::Policy if !ctx.is_us_region() => return Ok(Vec::new()),
        Scope::Policy => {}
    }

    let Some(range) = start_end_dates(ctx.policy())? else {
        warn!(
            region = ctx.region(),
            "reform has no parameters, skipping reported state income tax baseline"
        );
        return Ok(Vec::new());
    };

    let mut lines: Vec<String> = [
        "",
        "",
        "\"\"\"",
        "In US nationwide simulations,",
        "use reported state income tax liabilities",
        "\"\"\"",
        "def modify_baseline(parameters):",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();
    lines.extend(reported_state_tax_update(&range));
    lines.extend(
        [
            "    return parameters",
            "",
            "",
            "class baseline_reform(Reform):",
            "    def apply(self):",
            "        self.modify_parameters(modify_baseline)",
        ]
        .iter()
        .map(|s| s.to_string()),
    );

    debug!(lines = lines.len(), "emitted baseline");
    Ok(lines)
}
