//! Household situation literal and the single-household simulation.
//!
//! The household is normalised, copied, pruned of variables that are
//! explicitly unset for the target year, optionally given an earnings
//! axis, and embedded as a Python dict literal.

use serde_json::{json, Map, Value};
use tracing::debug;

use crate::context::EmitContext;
use crate::error::{ReproError, ReproResult};
use crate::household::{HouseholdNormaliser, MEMBERS_KEY};
use crate::literal::python_literal;
use crate::types::{EarningAxis, Scope, Year};

/// Key under which a household carries its axes.
pub const AXES_KEY: &str = "axes";

/// Drop unset variables and, for earning sweeps, the swept variable.
///
/// A variable is unset when its value for `year` is present and null.
/// `members` lists are never pruned.
pub fn prune_household(
    household: &mut Map<String, Value>,
    year: Year,
    sweep_variable: Option<&str>,
) {
    let year_key = year.to_string();
    for group in household.values_mut() {
        let Some(instances) = group.as_object_mut() else {
            continue;
        };
        for instance in instances.values_mut() {
            let Some(variables) = instance.as_object_mut() else {
                continue;
            };
            variables.retain(|name, value| {
                if name == MEMBERS_KEY {
                    return true;
                }
                let unset = value.get(&year_key).is_some_and(Value::is_null);
                let swept = sweep_variable == Some(name.as_str());
                !unset && !swept
            });
        }
    }
}

/// The `axes` entry sweeping one variable across a range.
pub fn earning_axes(axis: &EarningAxis) -> Value {
    json!([[{
        "name": axis.variable,
        "count": axis.count,
        "min": axis.min,
        "max": axis.max,
    }]])
}

/// Emit the `situation` literal, the `Simulation` construction and the
/// output calculation. Household scope only.
pub fn emit(
    ctx: &EmitContext<'_>,
    normaliser: &dyn HouseholdNormaliser,
) -> ReproResult<Vec<String>> {
    match ctx.scope() {
        Scope::Policy => return Ok(Vec::new()),
        Scope::Household => {}
    }

    let household = ctx
        .request
        .household_input
        .as_ref()
        .ok_or(ReproError::HouseholdMissing)?;

    let normalised = normaliser.normalise(household, &ctx.request.metadata, true)?;
    let Value::Object(mut situation) = normalised else {
        return Err(ReproError::InvalidHousehold(
            "expected an object of entity groups".into(),
        ));
    };

    let axis = &ctx.config.earning_axis;
    let sweep = ctx.request.earning_variation.then_some(axis.variable.as_str());
    prune_household(&mut situation, ctx.year, sweep);
    if ctx.request.earning_variation {
        situation.insert(AXES_KEY.to_string(), earning_axes(axis));
    }

    let literal = python_literal(&Value::Object(situation))?;

    let mut lines = vec![
        String::new(),
        String::new(),
        format!("situation = {}", literal),
        String::new(),
        "simulation = Simulation(".to_string(),
    ];
    if ctx.has_reform() {
        lines.push("    reform=reform,".to_string());
    }
    lines.extend([
        "    situation=situation,".to_string(),
        ")".to_string(),
        String::new(),
        format!(
            "output = simulation.calculate(\"{}\", {})",
            ctx.config.output_variable, ctx.year,
        ),
        "print(output)".to_string(),
    ]);

    debug!(
        normaliser = normaliser.name(),
        earning_variation = ctx.request.earning_variation,
        lines = lines.len(),
        "emitted situation"
    );
    Ok(lines)
}
