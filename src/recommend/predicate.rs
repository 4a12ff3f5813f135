//! Declarative filters over track descriptors.
//!
//! A [`FilterPredicate`] is a conjunction of [`Condition`]s. The empty
//! conjunction is the identity predicate and matches every usable track.
//! Predicates deserialize from TOML so the mood vocabulary can be extended
//! from the config file:
//!
//! ```toml
//! predicate = [
//!     { descriptor = "energy", op = "above", value = 0.85 },
//!     { descriptor = "tempo", op = "between", min = 60.0, max = 100.0 },
//! ]
//! ```

use crate::catalog::{AudioDescriptors, Descriptor};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Bound {
    /// Strictly greater than `value`.
    Above { value: f64 },
    /// Strictly less than `value`.
    Below { value: f64 },
    /// Closed interval, both ends included.
    Between { min: f64, max: f64 },
}

impl Bound {
    pub fn contains(&self, x: f64) -> bool {
        match *self {
            Bound::Above { value } => x > value,
            Bound::Below { value } => x < value,
            Bound::Between { min, max } => min <= x && x <= max,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub descriptor: Descriptor,
    #[serde(flatten)]
    pub bound: Bound,
}

impl Condition {
    pub fn above(descriptor: Descriptor, value: f64) -> Self {
        Condition {
            descriptor,
            bound: Bound::Above { value },
        }
    }

    pub fn below(descriptor: Descriptor, value: f64) -> Self {
        Condition {
            descriptor,
            bound: Bound::Below { value },
        }
    }

    pub fn between(descriptor: Descriptor, min: f64, max: f64) -> Self {
        Condition {
            descriptor,
            bound: Bound::Between { min, max },
        }
    }

    pub fn matches(&self, descriptors: &AudioDescriptors) -> bool {
        self.bound.contains(descriptors.get(self.descriptor))
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.bound {
            Bound::Above { value } => write!(f, "{} > {}", self.descriptor, value),
            Bound::Below { value } => write!(f, "{} < {}", self.descriptor, value),
            Bound::Between { min, max } => {
                write!(f, "{} in [{}, {}]", self.descriptor, min, max)
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterPredicate {
    conditions: Vec<Condition>,
}

static IDENTITY: FilterPredicate = FilterPredicate {
    conditions: Vec::new(),
};

impl FilterPredicate {
    pub fn all(conditions: Vec<Condition>) -> Self {
        FilterPredicate { conditions }
    }

    /// The predicate that filters nothing out.
    pub fn identity() -> &'static FilterPredicate {
        &IDENTITY
    }

    pub fn is_identity(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn matches(&self, descriptors: &AudioDescriptors) -> bool {
        self.conditions.iter().all(|c| c.matches(descriptors))
    }
}

impl fmt::Display for FilterPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.conditions.is_empty() {
            return f.write_str("any");
        }
        for (i, condition) in self.conditions.iter().enumerate() {
            if i > 0 {
                f.write_str(" AND ")?;
            }
            write!(f, "{}", condition)?;
        }
        Ok(())
    }
}
