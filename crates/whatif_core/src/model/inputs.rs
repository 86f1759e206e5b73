//! Input records for the cash-flow model
//!
//! `Inputs` is the open record used for baselines and overrides: the four
//! fields the cash-flow formula needs are named, anything else lands in
//! `extra`. `EffectiveInputs` is the validated form produced after merging
//! overrides and clamping constraints.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};

/// Per-field caps applied after overrides. Ordered so citations number stably.
pub type Constraints = IndexMap<String, f64>;

/// The named fields read by the cash-flow formula
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputField {
    Revenue,
    FixedCosts,
    OperationalCosts,
    MarketingSpend,
}

impl InputField {
    pub const ALL: [InputField; 4] = [
        InputField::Revenue,
        InputField::FixedCosts,
        InputField::OperationalCosts,
        InputField::MarketingSpend,
    ];

    /// Fields probed by sensitivity and breakpoint analysis
    pub const PERTURBABLE: [InputField; 3] = [
        InputField::Revenue,
        InputField::OperationalCosts,
        InputField::MarketingSpend,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            InputField::Revenue => "revenue",
            InputField::FixedCosts => "fixed_costs",
            InputField::OperationalCosts => "operational_costs",
            InputField::MarketingSpend => "marketing_spend",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == name)
    }
}

/// Baseline or override values keyed by field name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Inputs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revenue: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_costs: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operational_costs: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marketing_spend: Option<f64>,
    /// Fields the formula does not read; carried through untouched
    #[serde(flatten)]
    pub extra: IndexMap<String, f64>,
}

impl Inputs {
    /// A record with all four core fields set
    #[must_use]
    pub fn new(
        revenue: f64,
        fixed_costs: f64,
        operational_costs: f64,
        marketing_spend: f64,
    ) -> Self {
        Self {
            revenue: Some(revenue),
            fixed_costs: Some(fixed_costs),
            operational_costs: Some(operational_costs),
            marketing_spend: Some(marketing_spend),
            extra: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn field(&self, field: InputField) -> Option<f64> {
        match field {
            InputField::Revenue => self.revenue,
            InputField::FixedCosts => self.fixed_costs,
            InputField::OperationalCosts => self.operational_costs,
            InputField::MarketingSpend => self.marketing_spend,
        }
    }

    fn field_mut(&mut self, field: InputField) -> &mut Option<f64> {
        match field {
            InputField::Revenue => &mut self.revenue,
            InputField::FixedCosts => &mut self.fixed_costs,
            InputField::OperationalCosts => &mut self.operational_costs,
            InputField::MarketingSpend => &mut self.marketing_spend,
        }
    }

    /// Look up any field by name, core or extra
    #[must_use]
    pub fn get(&self, name: &str) -> Option<f64> {
        match InputField::from_name(name) {
            Some(field) => self.field(field),
            None => self.extra.get(name).copied(),
        }
    }

    pub fn set(&mut self, name: &str, value: f64) {
        match InputField::from_name(name) {
            Some(field) => *self.field_mut(field) = Some(value),
            None => {
                self.extra.insert(name.to_string(), value);
            }
        }
    }

    /// Copy of this record with one field replaced
    #[must_use]
    pub fn with(&self, name: &str, value: f64) -> Self {
        let mut next = self.clone();
        next.set(name, value);
        next
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterate present fields: core fields in declaration order, then extras
    /// in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        InputField::ALL
            .into_iter()
            .filter_map(|f| self.field(f).map(|v| (f.as_str(), v)))
            .chain(self.extra.iter().map(|(k, v)| (k.as_str(), *v)))
    }

    /// New record with `overrides` laid over this one. Override wins on collision.
    #[must_use]
    pub fn merged_with(&self, overrides: &Inputs) -> Self {
        let mut merged = self.clone();
        for (name, value) in overrides.iter() {
            merged.set(name, value);
        }
        merged
    }

    /// New record with every constrained field capped at its maximum.
    ///
    /// Values above a cap are silently clamped; caps on absent fields are inert.
    #[must_use]
    pub fn clamped(&self, constraints: &Constraints) -> Self {
        let mut clamped = self.clone();
        for (name, cap) in constraints {
            if let Some(value) = clamped.get(name)
                && value > *cap
            {
                clamped.set(name, *cap);
            }
        }
        clamped
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

/// Merged, clamped inputs with every field the formula needs present
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectiveInputs {
    pub revenue: f64,
    pub fixed_costs: f64,
    pub operational_costs: f64,
    pub marketing_spend: f64,
    #[serde(flatten)]
    pub extra: IndexMap<String, f64>,
}

impl EffectiveInputs {
    #[must_use]
    pub fn field(&self, field: InputField) -> f64 {
        match field {
            InputField::Revenue => self.revenue,
            InputField::FixedCosts => self.fixed_costs,
            InputField::OperationalCosts => self.operational_costs,
            InputField::MarketingSpend => self.marketing_spend,
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<f64> {
        match InputField::from_name(name) {
            Some(field) => Some(self.field(field)),
            None => self.extra.get(name).copied(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        InputField::ALL
            .into_iter()
            .map(|f| (f.as_str(), self.field(f)))
            .chain(self.extra.iter().map(|(k, v)| (k.as_str(), *v)))
    }
}

fn require(inputs: &Inputs, field: InputField) -> Result<f64> {
    inputs.field(field).ok_or(AnalysisError::MissingField {
        field: field.as_str(),
    })
}

impl TryFrom<Inputs> for EffectiveInputs {
    type Error = AnalysisError;

    fn try_from(inputs: Inputs) -> Result<Self> {
        Ok(Self {
            revenue: require(&inputs, InputField::Revenue)?,
            fixed_costs: require(&inputs, InputField::FixedCosts)?,
            operational_costs: require(&inputs, InputField::OperationalCosts)?,
            marketing_spend: require(&inputs, InputField::MarketingSpend)?,
            extra: inputs.extra,
        })
    }
}

impl From<EffectiveInputs> for Inputs {
    fn from(inputs: EffectiveInputs) -> Self {
        Self {
            revenue: Some(inputs.revenue),
            fixed_costs: Some(inputs.fixed_costs),
            operational_costs: Some(inputs.operational_costs),
            marketing_spend: Some(inputs.marketing_spend),
            extra: inputs.extra,
        }
    }
}
