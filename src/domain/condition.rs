//! Structured filter conditions produced by the query parser.

use crate::domain::stock::Metric;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    #[serde(rename = ">")]
    GreaterThan,
    #[serde(rename = "<")]
    LessThan,
    #[serde(rename = "=")]
    Equal,
}

impl Operator {
    pub fn symbol(self) -> char {
        match self {
            Operator::GreaterThan => '>',
            Operator::LessThan => '<',
            Operator::Equal => '=',
        }
    }

    pub fn from_char(ch: char) -> Option<Operator> {
        match ch {
            '>' => Some(Operator::GreaterThan),
            '<' => Some(Operator::LessThan),
            '=' => Some(Operator::Equal),
            _ => None,
        }
    }

    /// Compare `lhs` against `rhs`. Equality is literal, with no epsilon.
    pub fn apply(self, lhs: f64, rhs: f64) -> bool {
        match self {
            Operator::GreaterThan => lhs > rhs,
            Operator::LessThan => lhs < rhs,
            Operator::Equal => lhs == rhs,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub field: Metric,
    pub operator: Operator,
    pub value: f64,
}

impl Condition {
    pub fn new(field: Metric, operator: Operator, value: f64) -> Self {
        Self {
            field,
            operator,
            value,
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.field, self.operator, self.value)
    }
}

/// Conditions in clause order, combined with logical AND.
pub type Query = Vec<Condition>;
