//! Structured filter constraints.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::record::{PriceLevel, TriState};

/// Constraint on a yes/no field such as voucher acceptance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Requirement {
    /// No constraint.
    #[default]
    Any,
    /// The field must be `Yes`; `No` and `Unknown` are rejected.
    Required,
    /// The field must not be `Yes`; `No` and `Unknown` pass.
    Excluded,
}

impl Requirement {
    pub fn is_active(&self) -> bool {
        !matches!(self, Requirement::Any)
    }

    /// Whether a value satisfies this requirement.
    pub fn accepts(&self, value: TriState) -> bool {
        match (self, value) {
            (Requirement::Any, _) => true,
            (Requirement::Required, TriState::Yes) => true,
            (Requirement::Required, TriState::No | TriState::Unknown) => false,
            (Requirement::Excluded, TriState::Yes) => false,
            (Requirement::Excluded, TriState::No | TriState::Unknown) => true,
        }
    }
}

impl FromStr for Requirement {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "any" | "indiferente" | "" => Ok(Requirement::Any),
            "yes" | "required" | "sim" => Ok(Requirement::Required),
            "no" | "excluded" | "não" | "nao" => Ok(Requirement::Excluded),
            other => Err(format!("Unknown requirement: {}. Use: any, yes, or no.", other)),
        }
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Requirement::Any => write!(f, "any"),
            Requirement::Required => write!(f, "yes"),
            Requirement::Excluded => write!(f, "no"),
        }
    }
}

/// A set of independent constraints for structured filtering.
///
/// Empty tag lists, `price: None` and [`Requirement::Any`] mean "don't care".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Any one of these cuisines matches (OR).
    #[serde(default)]
    pub cuisines: Vec<String>,

    /// Exact price tier.
    #[serde(default)]
    pub price: Option<PriceLevel>,

    #[serde(default)]
    pub voucher: Requirement,

    /// Every one of these diet tags must be offered (AND).
    #[serde(default)]
    pub diets: Vec<String>,

    #[serde(default)]
    pub accessibility: Requirement,
}

impl FilterCriteria {
    /// Criteria with every constraint set to "don't care".
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cuisines<I, S>(mut self, cuisines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cuisines = cuisines.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_price(mut self, price: PriceLevel) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_voucher(mut self, requirement: Requirement) -> Self {
        self.voucher = requirement;
        self
    }

    pub fn with_diets<I, S>(mut self, diets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.diets = diets.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_accessibility(mut self, requirement: Requirement) -> Self {
        self.accessibility = requirement;
        self
    }

    pub(crate) fn cuisine_active(&self) -> bool {
        self.cuisines.iter().any(|c| !c.trim().is_empty())
    }

    pub(crate) fn diet_active(&self) -> bool {
        self.diets.iter().any(|d| !d.trim().is_empty())
    }

    /// Number of constraints that are not "don't care".
    pub fn active_count(&self) -> u32 {
        [
            self.cuisine_active(),
            self.price.is_some(),
            self.voucher.is_active(),
            self.diet_active(),
            self.accessibility.is_active(),
        ]
        .iter()
        .filter(|active| **active)
        .count() as u32
    }

    pub fn is_unconstrained(&self) -> bool {
        self.active_count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requirement_tri_state_contract() {
        assert!(Requirement::Any.accepts(TriState::Unknown));

        assert!(Requirement::Required.accepts(TriState::Yes));
        assert!(!Requirement::Required.accepts(TriState::No));
        assert!(!Requirement::Required.accepts(TriState::Unknown));

        assert!(!Requirement::Excluded.accepts(TriState::Yes));
        assert!(Requirement::Excluded.accepts(TriState::No));
        assert!(Requirement::Excluded.accepts(TriState::Unknown));
    }

    #[test]
    fn test_requirement_from_str() {
        assert_eq!("Sim".parse::<Requirement>(), Ok(Requirement::Required));
        assert_eq!("indiferente".parse::<Requirement>(), Ok(Requirement::Any));
        assert_eq!("no".parse::<Requirement>(), Ok(Requirement::Excluded));
        assert!("perhaps".parse::<Requirement>().is_err());
    }

    #[test]
    fn test_active_count() {
        assert_eq!(FilterCriteria::new().active_count(), 0);
        assert!(FilterCriteria::new().with_cuisines([" "]).is_unconstrained());

        let criteria = FilterCriteria::new()
            .with_cuisines(["italiana"])
            .with_price(PriceLevel::Budget)
            .with_accessibility(Requirement::Required);
        assert_eq!(criteria.active_count(), 3);
    }
}
