//! Select conditions
//!
//! A select sends its conditions as an array of `[operator, field, value]`
//! triples; an empty array is a full scan. The optional `first` limit
//! travels in the options map.

use std::fmt;

use tupleproxy_core::{ConverterRegistry, Object, WireValue};

use crate::error::Result;

/// Comparison operator of a condition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// `=`
    Eq,
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `>=`
    Ge,
}

impl Operator {
    /// Wire spelling of the operator.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::Lt => "<",
            Operator::Le => "<=",
            Operator::Gt => ">",
            Operator::Ge => ">=",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One comparison against a field or index
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    /// Comparison operator
    pub operator: Operator,
    /// Field or index name
    pub field: String,
    /// Value compared against
    pub value: Object,
}

impl Condition {
    /// Create a condition.
    pub fn new(operator: Operator, field: impl Into<String>, value: impl Into<Object>) -> Self {
        Self {
            operator,
            field: field.into(),
            value: value.into(),
        }
    }

    /// `field = value`
    pub fn eq(field: impl Into<String>, value: impl Into<Object>) -> Self {
        Self::new(Operator::Eq, field, value)
    }

    /// `field < value`
    pub fn lt(field: impl Into<String>, value: impl Into<Object>) -> Self {
        Self::new(Operator::Lt, field, value)
    }

    /// `field <= value`
    pub fn le(field: impl Into<String>, value: impl Into<Object>) -> Self {
        Self::new(Operator::Le, field, value)
    }

    /// `field > value`
    pub fn gt(field: impl Into<String>, value: impl Into<Object>) -> Self {
        Self::new(Operator::Gt, field, value)
    }

    /// `field >= value`
    pub fn ge(field: impl Into<String>, value: impl Into<Object>) -> Self {
        Self::new(Operator::Ge, field, value)
    }

    fn to_wire(&self, registry: &ConverterRegistry) -> Result<WireValue> {
        Ok(WireValue::Array(vec![
            WireValue::from(self.operator.as_str()),
            WireValue::from(self.field.as_str()),
            registry.to_wire(&self.value)?,
        ]))
    }
}

/// Conjunction of conditions with an optional row limit
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Conditions {
    conditions: Vec<Condition>,
    first: Option<u64>,
}

impl Conditions {
    /// No conditions: every record matches.
    pub fn any() -> Self {
        Self::default()
    }

    /// Add a condition.
    pub fn and(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Return at most `first` records.
    pub fn with_first(mut self, first: u64) -> Self {
        self.first = Some(first);
        self
    }

    /// Row limit, if set.
    pub fn first(&self) -> Option<u64> {
        self.first
    }

    /// Conditions in the order they were added.
    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// Encode as an array of `[operator, field, value]` triples.
    pub fn to_wire(&self, registry: &ConverterRegistry) -> Result<WireValue> {
        self.conditions
            .iter()
            .map(|c| c.to_wire(registry))
            .collect::<Result<Vec<_>>>()
            .map(WireValue::Array)
    }
}

impl From<Condition> for Conditions {
    fn from(condition: Condition) -> Self {
        Conditions::any().and(condition)
    }
}
