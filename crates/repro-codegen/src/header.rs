//! Import lines at the top of the script.

use tracing::debug;

use crate::context::EmitContext;

pub const REFORM_IMPORT: &str = "from policyengine_core.reforms import Reform";
pub const INSTANT_IMPORT: &str = "from policyengine_core.periods import instant";

/// Import the simulation class for the scope, plus the reform machinery
/// when the policy changes any parameter.
pub fn emit(ctx: &EmitContext<'_>) -> Vec<String> {
    let mut lines = vec![format!(
        "from {} import {}",
        ctx.request.metadata.package,
        ctx.scope().simulation_class(),
    )];

    if ctx.has_reform() {
        lines.push(REFORM_IMPORT.to_string());
        lines.push(INSTANT_IMPORT.to_string());
    }

    debug!(lines = lines.len(), "emitted header");
    lines
}
