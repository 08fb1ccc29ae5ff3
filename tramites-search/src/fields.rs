use crate::condition::{DataType, Operator};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldOption {
    pub value: Value,
    pub label: String,
}

/// A filterable record field as offered in the filter builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinition {
    pub name: String,
    pub label: String,
    #[serde(default)]
    pub data_type: DataType,
    /// Closed set of values, when the field is a dropdown.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<FieldOption>,
}

impl FieldDefinition {
    pub fn new(name: &str, label: &str, data_type: DataType) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            data_type,
            options: Vec::new(),
        }
    }

    pub fn with_options(mut self, options: &[(Value, &str)]) -> Self {
        self.options = options
            .iter()
            .map(|(value, label)| FieldOption {
                value: value.clone(),
                label: label.to_string(),
            })
            .collect();
        self
    }

    pub fn operators(&self) -> Vec<Operator> {
        operators_for(self)
    }
}

/// Operators that make sense for a field, in display order.
pub fn operators_for(field: &FieldDefinition) -> Vec<Operator> {
    operators_for_data_type(field.data_type, !field.options.is_empty())
}

pub fn operators_for_data_type(data_type: DataType, has_options: bool) -> Vec<Operator> {
    let mut operators = match data_type {
        DataType::String => vec![
            Operator::Equals,
            Operator::NotEquals,
            Operator::Contains,
            Operator::NotContains,
            Operator::StartsWith,
            Operator::EndsWith,
        ],
        DataType::Number | DataType::Date => vec![
            Operator::Equals,
            Operator::NotEquals,
            Operator::GreaterThan,
            Operator::LessThan,
            Operator::GreaterEqual,
            Operator::LessEqual,
            Operator::Between,
            Operator::NotBetween,
        ],
        DataType::Boolean => vec![Operator::Equals, Operator::NotEquals],
    };
    if has_options && data_type != DataType::Boolean {
        operators.extend([Operator::In, Operator::NotIn]);
    }
    operators.extend([Operator::IsNull, Operator::IsNotNull]);
    operators
}

/// Fields shared by trámite and OPA records.
pub fn default_service_fields() -> Vec<FieldDefinition> {
    vec![
        FieldDefinition::new("nombre", "Nombre", DataType::String),
        FieldDefinition::new("descripcion", "Descripción", DataType::String),
        FieldDefinition::new("codigo_unico", "Código único", DataType::String),
        FieldDefinition::new("tipo", "Tipo de servicio", DataType::String).with_options(&[
            (Value::from("tramite"), "Trámite"),
            (Value::from("opa"), "OPA"),
        ]),
        FieldDefinition::new("dependencia", "Dependencia", DataType::String),
        FieldDefinition::new("subdependencia", "Subdependencia", DataType::String),
        FieldDefinition::new("tiene_pago", "Tiene pago", DataType::Boolean),
        FieldDefinition::new("valor", "Valor", DataType::Number),
        FieldDefinition::new("tiempo_respuesta", "Tiempo de respuesta", DataType::String),
        FieldDefinition::new("activo", "Activo", DataType::Boolean),
        FieldDefinition::new("visualizacion", "Visible al público", DataType::Boolean),
        FieldDefinition::new("fecha_creacion", "Fecha de creación", DataType::Date),
    ]
}
