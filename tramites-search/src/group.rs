use crate::condition::{evaluate_condition, FilterCondition};
use crate::ServiceRecord;
use log::debug;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Id of the top-level group of every filter tree.
pub const ROOT_GROUP_ID: &str = "root";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GroupOperator {
    #[default]
    #[serde(rename = "AND", alias = "and")]
    And,
    #[serde(rename = "OR", alias = "or")]
    Or,
}

impl std::fmt::Display for GroupOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GroupOperator::And => write!(f, "AND"),
            GroupOperator::Or => write!(f, "OR"),
        }
    }
}

/// A node of the advanced filter tree. Owns its conditions and subgroups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterGroup {
    pub id: String,
    #[serde(default)]
    pub operator: GroupOperator,
    #[serde(default)]
    pub conditions: Vec<FilterCondition>,
    #[serde(default)]
    pub groups: Vec<FilterGroup>,
}

impl Default for FilterGroup {
    fn default() -> Self {
        Self::root()
    }
}

impl FilterGroup {
    /// An empty `AND` group with the root id.
    pub fn root() -> Self {
        Self::new(ROOT_GROUP_ID, GroupOperator::And)
    }

    pub fn new(id: impl Into<String>, operator: GroupOperator) -> Self {
        Self {
            id: id.into(),
            operator,
            conditions: Vec::new(),
            groups: Vec::new(),
        }
    }

    pub fn with_condition(mut self, condition: FilterCondition) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn with_group(mut self, group: FilterGroup) -> Self {
        self.groups.push(group);
        self
    }

    /// No direct conditions and no subgroups.
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty() && self.groups.is_empty()
    }

    /// Total conditions in this group and all nested groups.
    pub fn condition_count(&self) -> usize {
        self.conditions.len()
            + self
                .groups
                .iter()
                .map(FilterGroup::condition_count)
                .sum::<usize>()
    }

    /// Levels of nesting below this group; a group without subgroups is 0.
    pub fn nesting_depth(&self) -> usize {
        self.groups
            .iter()
            .map(|g| g.nesting_depth() + 1)
            .max()
            .unwrap_or(0)
    }

    pub fn matches(&self, record: &ServiceRecord) -> bool {
        evaluate_filter_group(record, self)
    }
}

/// Combines the results of a group's conditions and subgroups with the
/// group's operator. An empty group matches every record.
pub fn evaluate_filter_group(record: &ServiceRecord, group: &FilterGroup) -> bool {
    if group.is_empty() {
        return true;
    }

    let mut results = group
        .conditions
        .iter()
        .map(|condition| evaluate_condition(record, condition))
        .chain(
            group
                .groups
                .iter()
                .map(|subgroup| evaluate_filter_group(record, subgroup)),
        );

    match group.operator {
        GroupOperator::And => results.all(|matched| matched),
        GroupOperator::Or => results.any(|matched| matched),
    }
}

/// Keeps the records matched by `filter_group`, in their original order.
///
/// With no group, or an empty one, the input slice is returned as is.
pub fn apply_advanced_filters<'a>(
    data: &'a [ServiceRecord],
    filter_group: Option<&FilterGroup>,
) -> Cow<'a, [ServiceRecord]> {
    let group = match filter_group {
        Some(group) if !group.is_empty() => group,
        _ => return Cow::Borrowed(data),
    };

    let filtered: Vec<ServiceRecord> = data
        .iter()
        .filter(|record| evaluate_filter_group(record, group))
        .cloned()
        .collect();
    debug!(
        "Advanced filters kept {} of {} records ({} conditions)",
        filtered.len(),
        data.len(),
        group.condition_count()
    );
    Cow::Owned(filtered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::Operator;
    use serde_json::json;

    fn record(value: serde_json::Value) -> ServiceRecord {
        value.as_object().cloned().unwrap()
    }

    fn always(matches: bool) -> FilterCondition {
        // `x` is 1 in every test record
        let value = if matches { json!(1) } else { json!(2) };
        FilterCondition::new(format!("c{}", matches), "x", Operator::Equals, value)
    }

    #[test]
    fn test_empty_group_is_vacuously_true() {
        let r = record(json!({"x": 1}));
        assert!(evaluate_filter_group(&r, &FilterGroup::root()));
        assert!(evaluate_filter_group(
            &r,
            &FilterGroup::new("g", GroupOperator::Or)
        ));
    }

    #[test]
    fn test_and_or_combination() {
        let r = record(json!({"x": 1}));
        let and = FilterGroup::new("a", GroupOperator::And)
            .with_condition(always(true))
            .with_condition(always(false));
        let or = FilterGroup::new("o", GroupOperator::Or)
            .with_condition(always(true))
            .with_condition(always(false));
        assert!(!evaluate_filter_group(&r, &and));
        assert!(evaluate_filter_group(&r, &or));
    }

    #[test]
    fn test_nested_groups_flatten_into_parent_operator() {
        let r = record(json!({"x": 1}));
        let failing_sub = FilterGroup::new("sub", GroupOperator::And).with_condition(always(false));
        let group = FilterGroup::new("root", GroupOperator::Or)
            .with_condition(always(false))
            .with_group(failing_sub);
        assert!(!evaluate_filter_group(&r, &group));

        let group = group.with_group(FilterGroup::new("empty", GroupOperator::Or));
        assert!(evaluate_filter_group(&r, &group));
    }

    #[test]
    fn test_group_wire_shape() {
        let group: FilterGroup = serde_json::from_value(json!({
            "id": "root",
            "operator": "OR",
            "conditions": [
                {"id": "c1", "field": "tiene_pago", "operator": "equals", "value": true, "dataType": "boolean"}
            ],
            "groups": [{"id": "g1", "operator": "AND", "conditions": [], "groups": []}]
        }))
        .unwrap();
        assert_eq!(group.operator, GroupOperator::Or);
        assert_eq!(group.condition_count(), 1);
        assert_eq!(group.nesting_depth(), 1);
        assert_eq!(serde_json::to_value(&group).unwrap()["operator"], json!("OR"));
    }

    #[test]
    fn test_apply_passes_through_without_filters() {
        let data = vec![record(json!({"x": 1})), record(json!({"x": 2}))];
        assert!(matches!(apply_advanced_filters(&data, None), Cow::Borrowed(_)));
        let empty = FilterGroup::root();
        let result = apply_advanced_filters(&data, Some(&empty));
        assert!(matches!(result, Cow::Borrowed(_)));
        assert_eq!(result.as_ref(), data.as_slice());
    }
}
