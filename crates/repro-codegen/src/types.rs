//! Core types for reproducibility code generation.
//!
//! Defines the simulation scope, reform parameter data, engine metadata,
//! target year, the request envelope, the generated script, and
//! configuration.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// ── Scope ──────────────────────────────────────────────────────────────

/// Which kind of simulation the script reproduces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// A single household run through `Simulation`.
    Household,
    /// A population-wide run through `Microsimulation`.
    Policy,
}

impl Scope {
    /// Name of the simulation class imported from the country package.
    pub fn simulation_class(&self) -> &'static str {
        match self {
            Self::Household => "Simulation",
            Self::Policy => "Microsimulation",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Household => write!(f, "household"),
            Self::Policy => write!(f, "policy"),
        }
    }
}

// ── Year ───────────────────────────────────────────────────────────────

/// Default simulation year used when a request does not name one.
pub const DEFAULT_YEAR: Year = Year(2024);

/// A simulation period, expressed as a calendar year.
///
/// Accepts either a JSON number or a numeric string. A zero year is
/// treated as absent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Year(pub u32);

impl Year {
    /// The requested year, or `default` when it is absent or zero.
    pub fn resolve(year: Option<Year>, default: Year) -> Year {
        match year {
            Some(y) if y.0 != 0 => y,
            _ => default,
        }
    }
}

impl Default for Year {
    fn default() -> Self {
        DEFAULT_YEAR
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for Year {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u32),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Ok(Year(n)),
            Raw::Text(s) if s.trim().is_empty() => Ok(Year(0)),
            Raw::Text(s) => s
                .trim()
                .parse::<u32>()
                .map(Year)
                .map_err(|_| serde::de::Error::custom(format!("invalid year '{}'", s))),
        }
    }
}

// ── Reform ─────────────────────────────────────────────────────────────

/// A single value assigned to a parameter over a date interval.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterValue {
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(true) => write!(f, "True"),
            Self::Bool(false) => write!(f, "False"),
            // Whole-number floats print without a trailing `.0`.
            Self::Number(n) if n.is_f64() => match n.as_f64() {
                Some(x) => write!(f, "{}", x),
                None => write!(f, "{}", n),
            },
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<bool> for ParameterValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for ParameterValue {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl From<&str> for ParameterValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Parameter updates making up a reform.
///
/// Maps a dotted parameter path to a map of `"<start>.<end>"` interval
/// keys to values. Both levels keep insertion order, which is the order
/// the generated script applies the updates in.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Reform {
    #[serde(default)]
    pub data: IndexMap<String, IndexMap<String, ParameterValue>>,
}

impl Reform {
    /// Whether the reform changes no parameters.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Number of distinct parameters the reform touches.
    pub fn parameter_count(&self) -> usize {
        self.data.len()
    }

    /// Add a parameter update, keeping earlier insertion order.
    pub fn with_update(
        mut self,
        parameter: impl Into<String>,
        interval: impl Into<String>,
        value: impl Into<ParameterValue>,
    ) -> Self {
        self.data
            .entry(parameter.into())
            .or_default()
            .insert(interval.into(), value.into());
        self
    }

    /// Every `(parameter, interval key, value)` triple in emission order.
    pub fn updates(&self) -> impl Iterator<Item = (&str, &str, &ParameterValue)> {
        self.data.iter().flat_map(|(name, intervals)| {
            intervals
                .iter()
                .map(move |(key, value)| (name.as_str(), key.as_str(), value))
        })
    }
}

/// A policy as stored by the host application.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Policy {
    #[serde(default)]
    pub reform: Reform,
}

impl Policy {
    pub fn new(reform: Reform) -> Self {
        Self { reform }
    }
}

// ── Metadata ───────────────────────────────────────────────────────────

/// Entity definition from the country package metadata.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EntityMeta {
    /// Plural name used as the key of the entity group in a household.
    pub plural: String,
}

/// Variable definition from the country package metadata.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VariableMeta {
    /// False for variables the engine computes rather than reads.
    #[serde(default = "default_true", alias = "isInputVariable")]
    pub is_input_variable: bool,
}

fn default_true() -> bool {
    true
}

/// Country package metadata.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Python package the script imports from, e.g. `policyengine_us`.
    pub package: String,
    /// Entity definitions keyed by singular name.
    #[serde(default)]
    pub entities: IndexMap<String, EntityMeta>,
    #[serde(default)]
    pub variables: IndexMap<String, VariableMeta>,
}

impl Metadata {
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            entities: IndexMap::new(),
            variables: IndexMap::new(),
        }
    }

    /// Whether `group` names an entity plural. Without entity
    /// definitions every group is accepted.
    pub fn is_entity_group(&self, group: &str) -> bool {
        self.entities.is_empty() || self.entities.values().any(|e| e.plural == group)
    }
}

// ── Request ────────────────────────────────────────────────────────────

/// Everything needed to reproduce one interactive simulation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReproRequest {
    #[serde(rename = "type")]
    pub scope: Scope,
    pub metadata: Metadata,
    #[serde(default)]
    pub policy: Policy,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub year: Option<Year>,
    /// Household structure: entity group → instance → variable → year → value.
    #[serde(default, alias = "householdInput")]
    pub household_input: Option<Value>,
    /// Sweep employment income along an axis instead of fixing it.
    #[serde(default, alias = "earningVariation")]
    pub earning_variation: bool,
}

impl ReproRequest {
    /// A population-wide request with no reform and no year.
    pub fn policy(metadata: Metadata, region: impl Into<String>) -> Self {
        Self {
            scope: Scope::Policy,
            metadata,
            policy: Policy::default(),
            region: region.into(),
            year: None,
            household_input: None,
            earning_variation: false,
        }
    }

    /// A household request with no reform and no year.
    pub fn household(metadata: Metadata, household: Value) -> Self {
        Self {
            scope: Scope::Household,
            metadata,
            policy: Policy::default(),
            region: String::new(),
            year: None,
            household_input: Some(household),
            earning_variation: false,
        }
    }

    pub fn with_reform(mut self, reform: Reform) -> Self {
        self.policy = Policy::new(reform);
        self
    }

    pub fn with_year(mut self, year: u32) -> Self {
        self.year = Some(Year(year));
        self
    }

    pub fn with_earning_variation(mut self) -> Self {
        self.earning_variation = true;
        self
    }
}

// ── Script ─────────────────────────────────────────────────────────────

/// A generated script as an ordered list of source lines.
///
/// A single entry may span several physical lines (the situation
/// literal). Consumers must keep the order and must not deduplicate.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReproScript {
    lines: Vec<String>,
}

impl ReproScript {
    pub fn new(lines: Vec<String>) -> Self {
        Self { lines }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Join the lines into a source file with a trailing newline.
    pub fn to_source(&self) -> String {
        let mut source = self.lines.join("\n");
        source.push('\n');
        source
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

impl fmt::Display for ReproScript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lines.join("\n"))
    }
}

// ── Configuration ──────────────────────────────────────────────────────

/// The income sweep attached to a household when earnings vary.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EarningAxis {
    /// Variable swept along the axis.
    pub variable: String,
    /// Number of points on the axis.
    pub count: u32,
    pub min: i64,
    pub max: i64,
}

impl Default for EarningAxis {
    fn default() -> Self {
        Self {
            variable: "employment_income".to_string(),
            count: 200,
            min: 0,
            max: 200_000,
        }
    }
}

/// Configuration for the reproducibility engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodegenConfig {
    /// Year used when a request carries none.
    pub default_year: Year,
    /// Regions that get the reported state income tax treatment.
    pub us_regions: Vec<String>,
    /// Axis used for earning-variation household scripts.
    pub earning_axis: EarningAxis,
    /// Variable the script computes and prints.
    pub output_variable: String,
}

impl CodegenConfig {
    /// Whether `region` gets the US nationwide baseline treatment.
    pub fn is_us_region(&self, region: &str) -> bool {
        self.us_regions.iter().any(|r| r == region)
    }
}

impl Default for CodegenConfig {
    fn default() -> Self {
        Self {
            default_year: DEFAULT_YEAR,
            us_regions: vec!["us".to_string(), "enhanced_us".to_string()],
            earning_axis: EarningAxis::default(),
            output_variable: "household_net_income".to_string(),
        }
    }
}
