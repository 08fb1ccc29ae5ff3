//! Human-readable checks for advanced filters before they are applied or saved.
//!
//! The evaluator tolerates every problem reported here; these messages exist
//! so the filter builder can tell the user why a filter matches nothing (or
//! everything).

use crate::condition::FilterCondition;
use crate::fields::FieldDefinition;
use crate::group::FilterGroup;
use serde_json::Value;

/// Structural problems in `group`, one message per problem.
pub fn validate_filter_group(group: &FilterGroup, max_depth: usize) -> Vec<String> {
    let mut errors = Vec::new();
    validate_group(group, 0, max_depth, &mut errors);
    errors
}

fn validate_group(group: &FilterGroup, depth: usize, max_depth: usize, errors: &mut Vec<String>) {
    if depth > max_depth {
        errors.push(format!(
            "El grupo '{}' supera la profundidad máxima de anidamiento ({})",
            group.id, max_depth
        ));
    }
    for (index, condition) in group.conditions.iter().enumerate() {
        validate_condition(group, index, condition, errors);
    }
    for subgroup in &group.groups {
        validate_group(subgroup, depth + 1, max_depth, errors);
    }
}

fn condition_label(group: &FilterGroup, index: usize) -> String {
    format!("Condición {} del grupo '{}'", index + 1, group.id)
}

fn is_missing(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

fn validate_condition(
    group: &FilterGroup,
    index: usize,
    condition: &FilterCondition,
    errors: &mut Vec<String>,
) {
    let label = condition_label(group, index);
    let operator = &condition.operator;

    if condition.field.trim().is_empty() {
        errors.push(format!("{}: debe seleccionar un campo", label));
    }
    if !operator.is_known() {
        errors.push(format!("{}: operador desconocido '{}'", label, operator));
        return;
    }

    if operator.requires_range() {
        match condition.value.as_array().map(Vec::as_slice) {
            Some([min, max]) if !is_missing(min) && !is_missing(max) => {}
            _ => errors.push(format!(
                "{}: el operador '{}' requiere un valor mínimo y uno máximo",
                label,
                operator.label()
            )),
        }
    } else if operator.accepts_multiple() {
        match condition.value.as_array() {
            Some(items) if !items.is_empty() => {}
            _ => errors.push(format!(
                "{}: el operador '{}' requiere al menos un valor",
                label,
                operator.label()
            )),
        }
    } else if operator.requires_value() && is_missing(&condition.value) {
        errors.push(format!("{}: debe ingresar un valor", label));
    }
}

/// Conditions referring to fields outside `fields`, or using an operator the
/// field's type does not offer.
pub fn validate_against_fields(group: &FilterGroup, fields: &[FieldDefinition]) -> Vec<String> {
    let mut errors = Vec::new();
    check_fields(group, fields, &mut errors);
    errors
}

fn check_fields(group: &FilterGroup, fields: &[FieldDefinition], errors: &mut Vec<String>) {
    for (index, condition) in group.conditions.iter().enumerate() {
        if condition.field.trim().is_empty() {
            continue;
        }
        match fields.iter().find(|f| f.name == condition.field) {
            None => errors.push(format!(
                "{}: el campo '{}' no está disponible",
                condition_label(group, index),
                condition.field
            )),
            Some(field) if condition.operator.is_known()
                && !field.operators().contains(&condition.operator) =>
            {
                errors.push(format!(
                    "{}: el operador '{}' no aplica al campo '{}'",
                    condition_label(group, index),
                    condition.operator.label(),
                    field.label
                ))
            }
            Some(_) => {}
        }
    }
    for subgroup in &group.groups {
        check_fields(subgroup, fields, errors);
    }
}
