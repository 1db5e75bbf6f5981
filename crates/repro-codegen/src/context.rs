//! Shared view of a request handed to every emitter.

use crate::types::{CodegenConfig, Policy, ReproRequest, Scope, Year};

/// A request paired with configuration and its resolved year.
#[derive(Clone, Copy, Debug)]
pub struct EmitContext<'a> {
    pub request: &'a ReproRequest,
    pub config: &'a CodegenConfig,
    /// The request year, or the configured default.
    pub year: Year,
}

impl<'a> EmitContext<'a> {
    pub fn new(request: &'a ReproRequest, config: &'a CodegenConfig) -> Self {
        Self {
            request,
            config,
            year: Year::resolve(request.year, config.default_year),
        }
    }

    pub fn scope(&self) -> Scope {
        self.request.scope
    }

    pub fn policy(&self) -> &'a Policy {
        &self.request.policy
    }

    pub fn region(&self) -> &'a str {
        &self.request.region
    }

    /// Whether the request region gets the US nationwide treatment.
    pub fn is_us_region(&self) -> bool {
        self.config.is_us_region(&self.request.region)
    }

    /// Whether the policy changes any parameter.
    pub fn has_reform(&self) -> bool {
        !self.request.policy.reform.is_empty()
    }
}
