//! Editable filter tree backing the advanced filter builder.
//!
//! Nodes live in flat id-keyed maps and reference each other by id, so an
//! edit touches one node instead of rebuilding the whole tree. The nested
//! [`FilterGroup`] form is produced on demand for evaluation and export.

use crate::condition::{DataType, FilterCondition, Operator};
use crate::error::{FilterError, Result};
use crate::fields::operators_for_data_type;
use crate::group::{FilterGroup, GroupOperator, ROOT_GROUP_ID};
use indexmap::IndexMap;
use log::debug;
use serde_json::Value;
use uuid::Uuid;

pub const DEFAULT_MAX_DEPTH: usize = 3;

#[derive(Debug, Clone)]
struct GroupNode {
    operator: GroupOperator,
    parent: Option<String>,
    conditions: Vec<String>,
    groups: Vec<String>,
}

impl GroupNode {
    fn new(operator: GroupOperator, parent: Option<String>) -> Self {
        Self {
            operator,
            parent,
            conditions: Vec::new(),
            groups: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
struct ConditionNode {
    parent: String,
    condition: FilterCondition,
}

/// Partial edit of a condition; `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct ConditionUpdate {
    pub field: Option<String>,
    pub operator: Option<Operator>,
    pub value: Option<Value>,
    pub data_type: Option<DataType>,
}

#[derive(Debug, Clone)]
pub struct FilterTree {
    root_id: String,
    groups: IndexMap<String, GroupNode>,
    conditions: IndexMap<String, ConditionNode>,
    max_depth: usize,
}

impl Default for FilterTree {
    fn default() -> Self {
        Self::new()
    }
}

fn new_id(prefix: &str) -> String {
    format!("{}_{}", prefix, Uuid::new_v4().simple())
}

fn default_value_for(operator: &Operator, data_type: DataType) -> Value {
    if operator.requires_range() {
        Value::Array(vec![Value::Null, Value::Null])
    } else if operator.accepts_multiple() {
        Value::Array(Vec::new())
    } else if !operator.requires_value() {
        Value::Null
    } else {
        match data_type {
            DataType::String => Value::String(String::new()),
            DataType::Boolean => Value::Bool(true),
            DataType::Number | DataType::Date => Value::Null,
        }
    }
}

fn default_operator_for(data_type: DataType) -> Operator {
    match data_type {
        DataType::String => Operator::Contains,
        _ => Operator::Equals,
    }
}

impl FilterTree {
    /// A tree holding only an empty `AND` root group.
    pub fn new() -> Self {
        Self::with_max_depth(DEFAULT_MAX_DEPTH)
    }

    pub fn with_max_depth(max_depth: usize) -> Self {
        let mut groups = IndexMap::new();
        groups.insert(
            ROOT_GROUP_ID.to_string(),
            GroupNode::new(GroupOperator::And, None),
        );
        Self {
            root_id: ROOT_GROUP_ID.to_string(),
            groups,
            conditions: IndexMap::new(),
            max_depth,
        }
    }

    /// Loads a nested group. Duplicate ids inside `group` are replaced with
    /// fresh ones so every node stays addressable.
    pub fn from_group(group: &FilterGroup) -> Self {
        let mut tree = Self {
            root_id: group.id.clone(),
            groups: IndexMap::new(),
            conditions: IndexMap::new(),
            max_depth: DEFAULT_MAX_DEPTH,
        };
        tree.groups.insert(
            group.id.clone(),
            GroupNode::new(group.operator, None),
        );
        tree.load_children(&group.id, group);
        tree
    }

    fn load_children(&mut self, group_id: &str, group: &FilterGroup) {
        for condition in &group.conditions {
            self.attach_condition(group_id, condition.clone());
        }
        for subgroup in &group.groups {
            let id = if self.groups.contains_key(&subgroup.id) {
                new_id("group")
            } else {
                subgroup.id.clone()
            };
            self.groups.insert(
                id.clone(),
                GroupNode::new(subgroup.operator, Some(group_id.to_string())),
            );
            if let Some(parent) = self.groups.get_mut(group_id) {
                parent.groups.push(id.clone());
            }
            self.load_children(&id, subgroup);
        }
    }

    fn attach_condition(&mut self, group_id: &str, mut condition: FilterCondition) -> String {
        if condition.id.is_empty() || self.conditions.contains_key(&condition.id) {
            condition.id = new_id("condition");
        }
        let id = condition.id.clone();
        if let Some(parent) = self.groups.get_mut(group_id) {
            parent.conditions.push(id.clone());
        }
        self.conditions.insert(
            id.clone(),
            ConditionNode {
                parent: group_id.to_string(),
                condition,
            },
        );
        id
    }

    /// Materializes the nested form, preserving child order.
    pub fn to_group(&self) -> FilterGroup {
        self.build_group(&self.root_id)
    }

    fn build_group(&self, id: &str) -> FilterGroup {
        let node = &self.groups[id];
        FilterGroup {
            id: id.to_string(),
            operator: node.operator,
            conditions: node
                .conditions
                .iter()
                .map(|cid| self.conditions[cid].condition.clone())
                .collect(),
            groups: node.groups.iter().map(|gid| self.build_group(gid)).collect(),
        }
    }

    pub fn root_id(&self) -> &str {
        &self.root_id
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn set_max_depth(&mut self, max_depth: usize) {
        self.max_depth = max_depth;
    }

    /// True when the root holds no conditions and no subgroups.
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty() && self.groups.len() == 1
    }

    pub fn condition_count(&self) -> usize {
        self.conditions.len()
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn condition(&self, condition_id: &str) -> Option<&FilterCondition> {
        self.conditions.get(condition_id).map(|node| &node.condition)
    }

    pub fn group_operator(&self, group_id: &str) -> Option<GroupOperator> {
        self.groups.get(group_id).map(|node| node.operator)
    }

    /// Id of the group that owns `node_id`, which may be a group or a condition.
    pub fn parent_of(&self, node_id: &str) -> Option<&str> {
        if let Some(node) = self.conditions.get(node_id) {
            return Some(&node.parent);
        }
        self.groups.get(node_id).and_then(|node| node.parent.as_deref())
    }

    /// Nesting level of a group; the root is at depth 0.
    pub fn depth(&self, group_id: &str) -> Result<usize> {
        let mut node = self
            .groups
            .get(group_id)
            .ok_or_else(|| FilterError::GroupNotFound(group_id.to_string()))?;
        let mut depth = 0;
        while let Some(parent) = &node.parent {
            depth += 1;
            node = &self.groups[parent];
        }
        Ok(depth)
    }

    /// Whether a subgroup may be added under `group_id` without exceeding
    /// the maximum depth. Unknown groups never accept children.
    pub fn can_add_nested_group(&self, group_id: &str) -> bool {
        self.depth(group_id)
            .map_or(false, |depth| depth < self.max_depth)
    }

    /// Adds a blank condition for `field` with the operator and value a new
    /// filter row starts with for its data type. Returns the new id.
    pub fn add_condition(
        &mut self,
        group_id: &str,
        field: impl Into<String>,
        data_type: DataType,
    ) -> Result<String> {
        let operator = default_operator_for(data_type);
        let value = default_value_for(&operator, data_type);
        let condition =
            FilterCondition::new(String::new(), field, operator, value).with_data_type(data_type);
        self.insert_condition(group_id, condition)
    }

    /// Adds a prepared condition, assigning a fresh id if its own is empty or
    /// taken. Returns the id it was stored under.
    pub fn insert_condition(&mut self, group_id: &str, condition: FilterCondition) -> Result<String> {
        if !self.groups.contains_key(group_id) {
            return Err(FilterError::GroupNotFound(group_id.to_string()));
        }
        let id = self.attach_condition(group_id, condition);
        debug!("Added condition {} to group {}", id, group_id);
        Ok(id)
    }

    pub fn update_condition(&mut self, condition_id: &str, update: ConditionUpdate) -> Result<()> {
        let node = self
            .conditions
            .get_mut(condition_id)
            .ok_or_else(|| FilterError::ConditionNotFound(condition_id.to_string()))?;
        let condition = &mut node.condition;

        if let Some(field) = update.field {
            condition.field = field;
        }
        if let Some(data_type) = update.data_type {
            if data_type != condition.data_type {
                condition.data_type = data_type;
                if !operators_for_data_type(data_type, false).contains(&condition.operator) {
                    condition.operator = default_operator_for(data_type);
                }
                condition.value = default_value_for(&condition.operator, data_type);
            }
        }
        if let Some(operator) = update.operator {
            if operator != condition.operator {
                condition.value = default_value_for(&operator, condition.data_type);
                condition.operator = operator;
            }
        }
        if let Some(value) = update.value {
            condition.value = value;
        }
        Ok(())
    }

    pub fn remove_condition(&mut self, condition_id: &str) -> Result<FilterCondition> {
        let node = self
            .conditions
            .swap_remove(condition_id)
            .ok_or_else(|| FilterError::ConditionNotFound(condition_id.to_string()))?;
        if let Some(parent) = self.groups.get_mut(&node.parent) {
            parent.conditions.retain(|id| id != condition_id);
        }
        debug!("Removed condition {}", condition_id);
        Ok(node.condition)
    }

    /// Adds an empty subgroup under `parent_id`. Returns the new id.
    pub fn add_group(&mut self, parent_id: &str, operator: GroupOperator) -> Result<String> {
        let depth = self.depth(parent_id)?;
        if depth >= self.max_depth {
            return Err(FilterError::MaxDepthExceeded {
                depth: depth + 1,
                max: self.max_depth,
            });
        }
        let id = new_id("group");
        self.groups.insert(
            id.clone(),
            GroupNode::new(operator, Some(parent_id.to_string())),
        );
        if let Some(parent) = self.groups.get_mut(parent_id) {
            parent.groups.push(id.clone());
        }
        debug!("Added group {} under {} at depth {}", id, parent_id, depth + 1);
        Ok(id)
    }

    /// Removes a group together with everything nested in it.
    pub fn remove_group(&mut self, group_id: &str) -> Result<()> {
        if group_id == self.root_id {
            return Err(FilterError::RootGroupRemoval);
        }
        let node = self
            .groups
            .get(group_id)
            .ok_or_else(|| FilterError::GroupNotFound(group_id.to_string()))?;
        if let Some(parent_id) = node.parent.clone() {
            if let Some(parent) = self.groups.get_mut(&parent_id) {
                parent.groups.retain(|id| id != group_id);
            }
        }

        let mut pending = vec![group_id.to_string()];
        while let Some(id) = pending.pop() {
            if let Some(node) = self.groups.swap_remove(&id) {
                for condition_id in &node.conditions {
                    self.conditions.swap_remove(condition_id);
                }
                pending.extend(node.groups);
            }
        }
        debug!("Removed group {}", group_id);
        Ok(())
    }

    pub fn set_group_operator(&mut self, group_id: &str, operator: GroupOperator) -> Result<()> {
        let node = self
            .groups
            .get_mut(group_id)
            .ok_or_else(|| FilterError::GroupNotFound(group_id.to_string()))?;
        node.operator = operator;
        Ok(())
    }

    /// Drops every condition and subgroup, keeping the root and its operator.
    pub fn clear(&mut self) {
        let root_id = self.root_id.clone();
        let operator = self.groups[&root_id].operator;
        self.groups.clear();
        self.conditions.clear();
        self.groups.insert(root_id, GroupNode::new(operator, None));
    }
}

impl From<&FilterGroup> for FilterTree {
    fn from(group: &FilterGroup) -> Self {
        FilterTree::from_group(group)
    }
}
