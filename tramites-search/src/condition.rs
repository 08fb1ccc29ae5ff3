use crate::coerce::{
    contains_value, is_blank, strict_equals, to_display_string, to_number, to_timestamp_millis,
};
use crate::ServiceRecord;
use log::trace;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Operator {
    Equals,
    NotEquals,
    Contains,
    NotContains,
    StartsWith,
    EndsWith,
    GreaterThan,
    LessThan,
    GreaterEqual,
    LessEqual,
    Between,
    NotBetween,
    IsNull,
    IsNotNull,
    In,
    NotIn,
    /// Any operator name this version does not know. Evaluates to `true`.
    Unknown(String),
}

impl Operator {
    pub const ALL: [Operator; 16] = [
        Operator::Equals,
        Operator::NotEquals,
        Operator::Contains,
        Operator::NotContains,
        Operator::StartsWith,
        Operator::EndsWith,
        Operator::GreaterThan,
        Operator::LessThan,
        Operator::GreaterEqual,
        Operator::LessEqual,
        Operator::Between,
        Operator::NotBetween,
        Operator::IsNull,
        Operator::IsNotNull,
        Operator::In,
        Operator::NotIn,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Operator::Equals => "equals",
            Operator::NotEquals => "not_equals",
            Operator::Contains => "contains",
            Operator::NotContains => "not_contains",
            Operator::StartsWith => "starts_with",
            Operator::EndsWith => "ends_with",
            Operator::GreaterThan => "greater_than",
            Operator::LessThan => "less_than",
            Operator::GreaterEqual => "greater_equal",
            Operator::LessEqual => "less_equal",
            Operator::Between => "between",
            Operator::NotBetween => "not_between",
            Operator::IsNull => "is_null",
            Operator::IsNotNull => "is_not_null",
            Operator::In => "in",
            Operator::NotIn => "not_in",
            Operator::Unknown(name) => name,
        }
    }

    /// Label shown in the filter builder.
    pub fn label(&self) -> &'static str {
        match self {
            Operator::Equals => "Igual a",
            Operator::NotEquals => "Diferente de",
            Operator::Contains => "Contiene",
            Operator::NotContains => "No contiene",
            Operator::StartsWith => "Comienza con",
            Operator::EndsWith => "Termina con",
            Operator::GreaterThan => "Mayor que",
            Operator::LessThan => "Menor que",
            Operator::GreaterEqual => "Mayor o igual que",
            Operator::LessEqual => "Menor o igual que",
            Operator::Between => "Entre",
            Operator::NotBetween => "No está entre",
            Operator::IsNull => "Está vacío",
            Operator::IsNotNull => "No está vacío",
            Operator::In => "Está en",
            Operator::NotIn => "No está en",
            Operator::Unknown(_) => "Desconocido",
        }
    }

    pub fn requires_value(&self) -> bool {
        !matches!(
            self,
            Operator::IsNull | Operator::IsNotNull | Operator::Unknown(_)
        )
    }

    /// Takes a `[min, max]` pair.
    pub fn requires_range(&self) -> bool {
        matches!(self, Operator::Between | Operator::NotBetween)
    }

    /// Takes a list of candidate values.
    pub fn accepts_multiple(&self) -> bool {
        matches!(self, Operator::In | Operator::NotIn)
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Operator::Unknown(_))
    }
}

impl FromStr for Operator {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Operator::ALL
            .iter()
            .find(|op| op.as_str() == s)
            .cloned()
            .unwrap_or_else(|| Operator::Unknown(s.to_string())))
    }
}

impl From<String> for Operator {
    fn from(s: String) -> Self {
        match Operator::from_str(&s) {
            Ok(op) => op,
            Err(never) => match never {},
        }
    }
}

impl From<Operator> for String {
    fn from(op: Operator) -> Self {
        op.as_str().to_string()
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    #[default]
    String,
    Number,
    Date,
    Boolean,
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataType::String => write!(f, "string"),
            DataType::Number => write!(f, "number"),
            DataType::Date => write!(f, "date"),
            DataType::Boolean => write!(f, "boolean"),
        }
    }
}

/// One filter row: `record[field] <operator> value`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCondition {
    pub id: String,
    pub field: String,
    pub operator: Operator,
    #[serde(default)]
    pub value: Value,
    #[serde(default)]
    pub data_type: DataType,
}

impl FilterCondition {
    pub fn new(
        id: impl Into<String>,
        field: impl Into<String>,
        operator: Operator,
        value: Value,
    ) -> Self {
        Self {
            id: id.into(),
            field: field.into(),
            operator,
            value,
            data_type: DataType::default(),
        }
    }

    pub fn with_data_type(mut self, data_type: DataType) -> Self {
        self.data_type = data_type;
        self
    }

    pub fn matches(&self, record: &ServiceRecord) -> bool {
        evaluate_condition(record, self)
    }
}

/// Evaluates a single condition against a record.
///
/// Never fails: absent fields, unparseable numbers and malformed values
/// resolve to a fixed boolean per operator, and unknown operators pass.
pub fn evaluate_condition(record: &ServiceRecord, condition: &FilterCondition) -> bool {
    let field_value = record.get(&condition.field);
    let value = &condition.value;
    let present = field_value.filter(|v| !v.is_null());

    match &condition.operator {
        Operator::Equals => strict_equals(field_value, value),
        Operator::NotEquals => !strict_equals(field_value, value),
        Operator::Contains => present.map_or(false, |v| lowercase_contains(v, value)),
        Operator::NotContains => present.map_or(true, |v| !lowercase_contains(v, value)),
        Operator::StartsWith => present.map_or(false, |v| lowercase(v).starts_with(&lowercase(value))),
        Operator::EndsWith => present.map_or(false, |v| lowercase(v).ends_with(&lowercase(value))),
        Operator::GreaterThan => compare(present, value, condition.data_type, |a, b| a > b),
        Operator::LessThan => compare(present, value, condition.data_type, |a, b| a < b),
        Operator::GreaterEqual => compare(present, value, condition.data_type, |a, b| a >= b),
        Operator::LessEqual => compare(present, value, condition.data_type, |a, b| a <= b),
        Operator::Between => match (present, range_bounds(value)) {
            (Some(v), Some((min, max))) => in_range(v, min, max, condition.data_type),
            _ => false,
        },
        Operator::NotBetween => match (present, range_bounds(value)) {
            (Some(v), Some((min, max))) => !in_range(v, min, max, condition.data_type),
            _ => true,
        },
        Operator::IsNull => is_blank(field_value),
        Operator::IsNotNull => !is_blank(field_value),
        Operator::In => value
            .as_array()
            .map_or(false, |items| contains_value(items, field_value)),
        Operator::NotIn => value
            .as_array()
            .map_or(true, |items| !contains_value(items, field_value)),
        Operator::Unknown(name) => {
            trace!("Unknown operator {:?} on field {:?}, passing", name, condition.field);
            true
        }
    }
}

fn lowercase(value: &Value) -> String {
    to_display_string(value).to_lowercase()
}

fn lowercase_contains(haystack: &Value, needle: &Value) -> bool {
    lowercase(haystack).contains(&lowercase(needle))
}

fn comparable(value: &Value, data_type: DataType) -> f64 {
    match data_type {
        DataType::Date => to_timestamp_millis(value),
        _ => to_number(value),
    }
}

fn compare(
    field_value: Option<&Value>,
    value: &Value,
    data_type: DataType,
    cmp: impl Fn(f64, f64) -> bool,
) -> bool {
    field_value.map_or(false, |v| {
        cmp(comparable(v, data_type), comparable(value, data_type))
    })
}

fn range_bounds(value: &Value) -> Option<(&Value, &Value)> {
    match value.as_array().map(Vec::as_slice) {
        Some([min, max]) => Some((min, max)),
        _ => None,
    }
}

fn in_range(field_value: &Value, min: &Value, max: &Value, data_type: DataType) -> bool {
    let n = comparable(field_value, data_type);
    n >= comparable(min, data_type) && n <= comparable(max, data_type)
}
