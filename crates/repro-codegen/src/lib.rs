//! # repro-codegen
//!
//! **Reproducibility code generation** for PolicyEngine simulations.
//!
//! Takes the description of a simulation a user ran interactively (a
//! reform, a household or a population, a year, an optional earnings
//! sweep) and produces a Python script that runs the same computation
//! against the country package.
//!
//! ## Architecture
//!
//! ```text
//! ReproRequest
//!     │
//!     ▼
//! ReproEngine
//!     │─── header          (imports)
//!     │─── baseline        (US nationwide reported state tax baseline)
//!     │─── reform          (modify_parameters + reform class)
//!     │─── situation       (household literal via HouseholdNormaliser)
//!     │─── implementation  (baseline vs reformed microsimulation)
//!     ▼
//! ReproScript (ordered source lines)
//! ```
//!
//! ## Traits
//!
//! - [`HouseholdNormaliser`] — abstracts the host's household
//!   optimisation step. [`PassthroughNormaliser`] and
//!   [`SchemaNormaliser`] are provided.

#![deny(unsafe_code)]

pub mod baseline;
pub mod context;
pub mod dates;
pub mod engine;
pub mod error;
pub mod header;
pub mod household;
pub mod implementation;
pub mod literal;
pub mod reform;
pub mod situation;
pub mod types;

// Re-exports
pub use context::EmitContext;
pub use dates::{start_end_dates, DateInterval, DateRange};
pub use engine::{reproducibility_code_block, ReproEngine};
pub use error::{ReproError, ReproResult};
pub use household::{HouseholdNormaliser, PassthroughNormaliser, SchemaNormaliser};
pub use literal::{python_literal, pythonize_keywords};
pub use types::{
    CodegenConfig, EarningAxis, EntityMeta, Metadata, ParameterValue, Policy, Reform,
    ReproRequest, ReproScript, Scope, VariableMeta, Year, DEFAULT_YEAR,
};
