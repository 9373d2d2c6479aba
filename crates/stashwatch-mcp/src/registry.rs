//! Tool declarations and the registry that resolves and validates calls.
//!
//! A [`ToolDescriptor`] declares a tool's name, description and input
//! fields. The [`ToolRegistry`] keeps descriptors in declaration order
//! (that order is what `tools/list` reports), pairs each with an action
//! value, and validates caller arguments before anything is dispatched.

use std::collections::HashMap;
use std::sync::Arc;

use rmcp::model::Tool;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use stashwatch_core::{Error, Result};

/// JSON type of an input field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// `true` / `false`.
    Boolean,
    /// Whole number.
    Integer,
    /// Text.
    String,
}

impl FieldKind {
    /// JSON Schema type name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::String => "string",
        }
    }

    /// Returns `true` if `value` has this type.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            Self::Boolean => value.is_boolean(),
            Self::Integer => value.is_i64() || value.is_u64(),
            Self::String => value.is_string(),
        }
    }
}

/// One declared input field.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldSpec {
    /// Argument name.
    pub name: &'static str,
    /// Expected type.
    pub kind: FieldKind,
    /// Whether the caller must supply it.
    pub required: bool,
    /// Value applied when an optional field is omitted.
    pub default: Option<Value>,
    /// Smallest accepted value, for integers.
    pub minimum: Option<i64>,
    /// Largest accepted value, for integers.
    pub maximum: Option<i64>,
    /// Description shown in the input schema.
    pub description: &'static str,
}

impl FieldSpec {
    /// A required field. Required strings must also be non-empty.
    pub fn required(name: &'static str, kind: FieldKind, description: &'static str) -> Self {
        Self {
            name,
            kind,
            required: true,
            default: None,
            minimum: None,
            maximum: None,
            description,
        }
    }

    /// An optional field with a default.
    pub fn optional(
        name: &'static str,
        kind: FieldKind,
        default: impl Into<Value>,
        description: &'static str,
    ) -> Self {
        Self {
            name,
            kind,
            required: false,
            default: Some(default.into()),
            minimum: None,
            maximum: None,
            description,
        }
    }

    /// Set an integer lower bound.
    pub fn with_minimum(mut self, minimum: i64) -> Self {
        self.minimum = Some(minimum);
        self
    }

    /// Set an integer upper bound.
    pub fn with_maximum(mut self, maximum: i64) -> Self {
        self.maximum = Some(maximum);
        self
    }

    fn schema(&self) -> Value {
        let mut prop = Map::new();
        prop.insert("type".into(), json!(self.kind.as_str()));
        prop.insert("description".into(), json!(self.description));
        if let Some(default) = &self.default {
            prop.insert("default".into(), default.clone());
        }
        if let Some(minimum) = self.minimum {
            prop.insert("minimum".into(), json!(minimum));
        }
        if let Some(maximum) = self.maximum {
            prop.insert("maximum".into(), json!(maximum));
        }
        if self.required && self.kind == FieldKind::String {
            prop.insert("minLength".into(), json!(1));
        }
        Value::Object(prop)
    }

    fn check(&self, tool: &str, value: &Value) -> Result<()> {
        if !self.kind.matches(value) {
            return Err(Error::invalid_arguments(
                tool,
                format!("field '{}' must be a {}", self.name, self.kind.as_str()),
            ));
        }
        if self.required && value.as_str().is_some_and(str::is_empty) {
            return Err(Error::invalid_arguments(
                tool,
                format!("field '{}' must not be empty", self.name),
            ));
        }
        if let (Some(minimum), Some(n)) = (self.minimum, value.as_i64())
            && n < minimum
        {
            return Err(Error::invalid_arguments(
                tool,
                format!("field '{}' must be at least {minimum}", self.name),
            ));
        }
        if let (Some(maximum), Some(n)) = (self.maximum, value.as_i64())
            && n > maximum
        {
            return Err(Error::invalid_arguments(
                tool,
                format!("field '{}' must be at most {maximum}", self.name),
            ));
        }
        let bounded = self.minimum.is_some() || self.maximum.is_some();
        if bounded && value.as_i64().is_none() {
            // u64 beyond i64::MAX
            return Err(Error::invalid_arguments(
                tool,
                format!("field '{}' is out of range", self.name),
            ));
        }
        Ok(())
    }
}

/// Declaration of one tool.
#[derive(Clone, Debug, PartialEq)]
pub struct ToolDescriptor {
    /// Unique tool name.
    pub name: &'static str,
    /// One-line description.
    pub description: &'static str,
    /// Declared input fields.
    pub fields: Vec<FieldSpec>,
}

impl ToolDescriptor {
    /// A tool with no inputs.
    pub fn new(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            description,
            fields: Vec::new(),
        }
    }

    /// Add an input field.
    pub fn field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    /// JSON Schema for the tool's input object.
    pub fn input_schema(&self) -> Map<String, Value> {
        let properties: Map<String, Value> = self
            .fields
            .iter()
            .map(|f| (f.name.to_string(), f.schema()))
            .collect();
        let required: Vec<&str> = self
            .fields
            .iter()
            .filter(|f| f.required)
            .map(|f| f.name)
            .collect();
        let mut schema = Map::new();
        schema.insert("type".into(), json!("object"));
        schema.insert("properties".into(), Value::Object(properties));
        schema.insert("required".into(), json!(required));
        schema
    }

    /// The entry reported by `tools/list`.
    pub fn to_tool(&self) -> Tool {
        Tool::new(self.name, self.description, Arc::new(self.input_schema()))
    }

    /// Validate caller arguments and apply defaults.
    ///
    /// `null` counts as omitted. Undeclared fields are ignored.
    pub fn validate(&self, arguments: &Map<String, Value>) -> Result<Arguments> {
        let mut values = Map::new();
        for field in &self.fields {
            match arguments.get(field.name).filter(|v| !v.is_null()) {
                Some(value) => {
                    field.check(self.name, value)?;
                    values.insert(field.name.to_string(), value.clone());
                }
                None if field.required => {
                    return Err(Error::invalid_arguments(
                        self.name,
                        format!("missing required field '{}'", field.name),
                    ));
                }
                None => {
                    if let Some(default) = &field.default {
                        values.insert(field.name.to_string(), default.clone());
                    }
                }
            }
        }
        Ok(Arguments { values })
    }
}

/// Arguments that passed validation, with defaults applied.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Arguments {
    values: Map<String, Value>,
}

impl Arguments {
    /// A boolean argument.
    pub fn bool(&self, name: &str) -> Option<bool> {
        self.values.get(name).and_then(Value::as_bool)
    }

    /// An integer argument.
    pub fn int(&self, name: &str) -> Option<i64> {
        self.values.get(name).and_then(Value::as_i64)
    }

    /// A string argument.
    pub fn str(&self, name: &str) -> Option<&str> {
        self.values.get(name).and_then(Value::as_str)
    }

    /// All validated values.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.values
    }
}

/// A descriptor paired with the action it dispatches to.
#[derive(Clone, Debug, PartialEq)]
pub struct ToolEntry<A> {
    /// The declaration.
    pub descriptor: ToolDescriptor,
    /// What to run.
    pub action: A,
}

impl<A> ToolEntry<A> {
    /// Pair a descriptor with an action.
    pub fn new(descriptor: ToolDescriptor, action: A) -> Self {
        Self { descriptor, action }
    }
}

/// Ordered, name-indexed collection of tools.
#[derive(Clone, Debug)]
pub struct ToolRegistry<A> {
    entries: Vec<ToolEntry<A>>,
    index: HashMap<&'static str, usize>,
}

impl<A> ToolRegistry<A> {
    /// Build a registry, rejecting duplicate names.
    pub fn new(entries: Vec<ToolEntry<A>>) -> Result<Self> {
        let mut index = HashMap::with_capacity(entries.len());
        for (i, entry) in entries.iter().enumerate() {
            if index.insert(entry.descriptor.name, i).is_some() {
                return Err(Error::DuplicateTool {
                    name: entry.descriptor.name.to_string(),
                });
            }
        }
        Ok(Self { entries, index })
    }

    /// Descriptors in declaration order.
    pub fn descriptors(&self) -> impl Iterator<Item = &ToolDescriptor> {
        self.entries.iter().map(|e| &e.descriptor)
    }

    /// Number of registered tools.
    pub fn tool_count(&self) -> usize {
        self.entries.len()
    }

    /// Check if a tool exists by name.
    pub fn has_tool(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Look up a tool by name.
    pub fn resolve(&self, name: &str) -> Result<&ToolEntry<A>> {
        self.index
            .get(name)
            .and_then(|&i| self.entries.get(i))
            .ok_or_else(|| Error::unknown_tool(name))
    }

    /// The `tools/list` result body.
    pub fn list(&self) -> Result<Value> {
        let tools: Vec<Tool> = self.descriptors().map(ToolDescriptor::to_tool).collect();
        Ok(json!({ "tools": serde_json::to_value(tools)? }))
    }
}
