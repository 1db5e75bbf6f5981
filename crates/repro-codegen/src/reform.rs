//! `modify_parameters` and the `reform` class.

use tracing::debug;

use crate::baseline::reported_state_tax_update;
use crate::context::EmitContext;
use crate::dates::{start_end_dates, DateInterval};
use crate::error::ReproResult;
use crate::types::Scope;

/// Emit one `update` call per parameter interval, wrapped in
/// `modify_parameters`, followed by the `reform` class.
///
/// US population runs also set the reported state income tax toggle
/// inside `modify_parameters`.
pub fn emit(ctx: &EmitContext<'_>) -> ReproResult<Vec<String>> {
    if !ctx.has_reform() {
        return Ok(Vec::new());
    }

    let mut lines = vec![
        String::new(),
        String::new(),
        "def modify_parameters(parameters):".to_string(),
    ];

    let reported_state_tax = match ctx.scope() {
        Scope::Policy => ctx.is_us_region(),
        Scope::Household => false,
    };
    if reported_state_tax {
        if let Some(range) = start_end_dates(ctx.policy())? {
            lines.extend(reported_state_tax_update(&range));
        }
    }

    for (parameter, key, value) in ctx.policy().reform.updates() {
        let interval = DateInterval::parse(key)?;
        lines.push(format!("    parameters.{}.update(", parameter));
        lines.push(format!(
            "        start=instant(\"{}\"), stop=instant(\"{}\"),",
            interval.start, interval.end,
        ));
        lines.push(format!("        value={})", value));
    }
    lines.push("    return parameters".to_string());

    lines.extend(
        [
            "",
            "",
            "class reform(Reform):",
            "    def apply(self):",
            "        self.modify_parameters(modify_parameters)",
        ]
        .iter()
        .map(|s| s.to_string()),
    );

    debug!(
        parameters = ctx.policy().reform.parameter_count(),
        lines = lines.len(),
        "emitted reform"
    );
    Ok(lines)
}
