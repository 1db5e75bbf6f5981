//! Baseline-vs-reform microsimulation comparison.

use tracing::debug;

use crate::context::EmitContext;
use crate::types::Scope;

/// Emit both microsimulations and the per-person net income difference.
///
/// The baseline only receives `baseline_reform` in US regions with a
/// non-empty reform, the only case where that class is defined; otherwise
/// it is constructed with an empty argument list.
pub fn emit(ctx: &EmitContext<'_>) -> Vec<String> {
    match ctx.scope() {
        Scope::Household => return Vec::new(),
        Scope::Policy => {}
    }

    let baseline_args = if ctx.is_us_region() && ctx.has_reform() {
        "reform=baseline_reform"
    } else {
        ""
    };
    let variable = &ctx.config.output_variable;

    let lines = vec![
        format!("baseline = Microsimulation({})", baseline_args),
        "reformed = Microsimulation(reform=reform)".to_string(),
        format!("baseline_person = baseline.calc(\"{}\",", variable),
        format!("    period={}, map_to=\"person\")", ctx.year),
        format!("reformed_person = reformed.calc(\"{}\",", variable),
        format!("    period={}, map_to=\"person\")", ctx.year),
        "difference_person = reformed_person - baseline_person".to_string(),
    ];

    debug!(lines = lines.len(), "emitted implementation");
    lines
}
