//! Household normaliser — trait and provided implementations.
//!
//! The `HouseholdNormaliser` trait stands in for the host application's
//! household optimisation step, which strips a household down to what a
//! script needs before it is embedded. The engine always hands the
//! normaliser a borrowed household and receives an owned copy back, so
//! the caller's structure is never mutated.

use serde_json::Value;

use crate::error::{ReproError, ReproResult};
use crate::types::Metadata;

/// Key holding the member list of a group entity.
pub const MEMBERS_KEY: &str = "members";

// ── HouseholdNormaliser Trait ──────────────────────────────────────────

/// Trait for normalising a household before it is rendered.
pub trait HouseholdNormaliser: Send + Sync {
    /// Return a normalised copy of `household`.
    ///
    /// `remove_computed` asks the normaliser to drop variables the
    /// simulation engine computes itself.
    fn normalise(
        &self,
        household: &Value,
        metadata: &Metadata,
        remove_computed: bool,
    ) -> ReproResult<Value>;

    /// Name of this normaliser for logging.
    fn name(&self) -> &str;
}

// ── Passthrough ────────────────────────────────────────────────────────

/// Returns the household unchanged.
#[derive(Clone, Copy, Debug, Default)]
pub struct PassthroughNormaliser;

impl HouseholdNormaliser for PassthroughNormaliser {
    fn normalise(
        &self,
        household: &Value,
        _metadata: &Metadata,
        _remove_computed: bool,
    ) -> ReproResult<Value> {
        Ok(household.clone())
    }

    fn name(&self) -> &str {
        "passthrough"
    }
}

// ── Schema Normaliser ──────────────────────────────────────────────────

/// Uses the package metadata to drop computed variables and groups the
/// package has no entity for.
///
/// Variables unknown to the metadata are kept. Object groups whose key is
/// not an entity plural, and groups left with no instances, are removed.
/// Non-object entries such as `axes` are left alone.
#[derive(Clone, Copy, Debug, Default)]
pub struct SchemaNormaliser;

impl SchemaNormaliser {
    fn is_computed(metadata: &Metadata, variable: &str) -> bool {
        metadata
            .variables
            .get(variable)
            .is_some_and(|meta| !meta.is_input_variable)
    }
}

impl HouseholdNormaliser for SchemaNormaliser {
    fn normalise(
        &self,
        household: &Value,
        metadata: &Metadata,
        remove_computed: bool,
    ) -> ReproResult<Value> {
        let mut copy = household.clone();
        let groups = copy.as_object_mut().ok_or_else(|| {
            ReproError::Normalisation("household must be an object of entity groups".into())
        })?;

        if !remove_computed {
            return Ok(copy);
        }

        for group in groups.values_mut() {
            let Some(instances) = group.as_object_mut() else {
                continue;
            };
            for instance in instances.values_mut() {
                if let Some(variables) = instance.as_object_mut() {
                    variables.retain(|name, _| {
                        name == MEMBERS_KEY || !Self::is_computed(metadata, name)
                    });
                }
            }
        }
        groups.retain(|key, group| match group.as_object() {
            Some(instances) => !instances.is_empty() && metadata.is_entity_group(key),
            None => true,
        });

        Ok(copy)
    }

    fn name(&self) -> &str {
        "schema"
    }
}
