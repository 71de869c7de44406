//! Schema validation
//!
//! One validation pass per Entity, composed from an explicit rule table:
//! type conformance comes from the attribute's declared type, string format
//! checks from `Attribute::format`, and everything else from the
//! `validations` map (validator name → parameter) resolved against a static
//! `(key → rule function)` table. No validator objects are built at
//! runtime.
//!
//! Errors are collected per field; validation never aborts on the first
//! failure. The caller decides whether a non-empty report blocks the write.

use crate::attribute::{Attribute, AttributeType, Format};
use crate::entity::Entity;
use crate::registry::SchemaRegistry;
use eav_core::timestamp::parse_datetime;
use eav_core::{is_uuid_shaped, RawValue};
use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashMap;

/// One validation failure, attributed to a field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// The attribute name (or `_body` for whole-document failures)
    pub field: String,
    /// Human-readable description of the failure
    pub message: String,
}

/// Collected result of one validation pass
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    errors: Vec<FieldError>,
}

impl ValidationReport {
    /// True when no rule failed
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// The collected failures
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Record a failure for a field
    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field: field.to_string(),
            message: message.into(),
        });
    }

    /// Render the report as a field → messages map (the wire shape of a 400
    /// response body)
    pub fn to_messages(&self) -> HashMap<String, Vec<String>> {
        let mut messages: HashMap<String, Vec<String>> = HashMap::new();
        for error in &self.errors {
            messages
                .entry(error.field.clone())
                .or_default()
                .push(error.message.clone());
        }
        messages
    }
}

/// Signature of one entry in the rule table: `(parameter, input) → failure`
pub type RuleFn = fn(&RawValue, &RawValue) -> Option<String>;

fn as_number(value: &RawValue) -> Option<f64> {
    match value {
        RawValue::Int(i) => Some(*i as f64),
        RawValue::Float(f) => Some(*f),
        _ => None,
    }
}

fn rule_min_length(parameter: &RawValue, input: &RawValue) -> Option<String> {
    let min = parameter.as_int()?;
    let text = input.as_str()?;
    if (text.chars().count() as i64) < min {
        Some(format!("must be at least {min} characters"))
    } else {
        None
    }
}

fn rule_max_length(parameter: &RawValue, input: &RawValue) -> Option<String> {
    let max = parameter.as_int()?;
    let text = input.as_str()?;
    if (text.chars().count() as i64) > max {
        Some(format!("must be at most {max} characters"))
    } else {
        None
    }
}

fn rule_minimum(parameter: &RawValue, input: &RawValue) -> Option<String> {
    let min = as_number(parameter)?;
    let value = as_number(input)?;
    if value < min {
        Some(format!("must be at least {min}"))
    } else {
        None
    }
}

fn rule_maximum(parameter: &RawValue, input: &RawValue) -> Option<String> {
    let max = as_number(parameter)?;
    let value = as_number(input)?;
    if value > max {
        Some(format!("must be at most {max}"))
    } else {
        None
    }
}

fn rule_min_items(parameter: &RawValue, input: &RawValue) -> Option<String> {
    let min = parameter.as_int()?;
    let items = input.as_array()?;
    if (items.len() as i64) < min {
        Some(format!("must contain at least {min} items"))
    } else {
        None
    }
}

fn rule_max_items(parameter: &RawValue, input: &RawValue) -> Option<String> {
    let max = parameter.as_int()?;
    let items = input.as_array()?;
    if (items.len() as i64) > max {
        Some(format!("must contain at most {max} items"))
    } else {
        None
    }
}

fn rule_unique_items(parameter: &RawValue, input: &RawValue) -> Option<String> {
    if parameter.as_bool() != Some(true) {
        return None;
    }
    let items = input.as_array()?;
    for (index, item) in items.iter().enumerate() {
        if items[index + 1..].contains(item) {
            return Some("must not contain duplicate items".to_string());
        }
    }
    None
}

fn rule_multiple_of(parameter: &RawValue, input: &RawValue) -> Option<String> {
    let divisor = parameter.as_int()?;
    let value = input.as_int()?;
    if divisor != 0 && value % divisor != 0 {
        Some(format!("must be a multiple of {divisor}"))
    } else {
        None
    }
}

/// The validator table: validation key → rule function
///
/// Keys follow the OpenAPI schema vocabulary. Unknown keys in an
/// attribute's `validations` map are passed through to documentation but
/// enforce nothing.
static RULES: Lazy<HashMap<&'static str, RuleFn>> = Lazy::new(|| {
    let mut rules: HashMap<&'static str, RuleFn> = HashMap::new();
    rules.insert("minLength", rule_min_length);
    rules.insert("maxLength", rule_max_length);
    rules.insert("minimum", rule_minimum);
    rules.insert("maximum", rule_maximum);
    rules.insert("minItems", rule_min_items);
    rules.insert("maxItems", rule_max_items);
    rules.insert("uniqueItems", rule_unique_items);
    rules.insert("multipleOf", rule_multiple_of);
    rules
});

fn check_format(format: Format, text: &str) -> Option<String> {
    let ok = match format {
        Format::Email => {
            let mut parts = text.splitn(2, '@');
            let local = parts.next().unwrap_or("");
            let domain = parts.next().unwrap_or("");
            !local.is_empty() && domain.contains('.')
        }
        Format::Url => {
            text.starts_with("http://") || text.starts_with("https://") || text.starts_with("www.")
        }
        Format::Uri => text.starts_with('/') || text.starts_with("http"),
        Format::Uuid => is_uuid_shaped(text),
        Format::Phone => {
            let digits = text.strip_prefix('+').unwrap_or(text);
            !digits.is_empty()
                && digits.chars().all(|c| c.is_ascii_digit())
                && (9..=13).contains(&digits.len())
        }
        Format::Json => serde_json::from_str::<serde_json::Value>(text).is_ok(),
        Format::CountryCode => text.len() == 2 && text.chars().all(|c| c.is_ascii_uppercase()),
        Format::Bsn => text.len() == 9 && text.chars().all(|c| c.is_ascii_digit()),
        Format::DutchPc4 => text.len() == 4 && text.chars().all(|c| c.is_ascii_digit()),
    };
    if ok {
        None
    } else {
        Some(format!("is not a valid {}", format.as_str()))
    }
}

/// Type conformance for one scalar element
fn check_element_type(attribute: &Attribute, input: &RawValue) -> Option<String> {
    let ok = match attribute.attr_type {
        AttributeType::String => input.is_string(),
        AttributeType::Integer => matches!(input, RawValue::Int(_)),
        AttributeType::Number => matches!(input, RawValue::Int(_) | RawValue::Float(_)),
        AttributeType::Boolean => matches!(input, RawValue::Bool(_)),
        AttributeType::Date | AttributeType::DateTime => input
            .as_str()
            .map(|s| parse_datetime(s).is_some())
            .unwrap_or(false),
        AttributeType::File => input.is_object(),
        AttributeType::Array => input.is_array(),
        // nested objects are handed to their own validator; here we only
        // accept the shapes hydration understands
        AttributeType::Object => input.is_object() || input.is_string(),
    };
    if ok {
        None
    } else {
        Some(format!(
            "must be of type {}, got {}",
            attribute.attr_type,
            input.type_name()
        ))
    }
}

/// Schema validator over a registry
pub struct Validator<'a> {
    registry: &'a SchemaRegistry,
}

impl<'a> Validator<'a> {
    /// Create a validator backed by the given registry
    pub fn new(registry: &'a SchemaRegistry) -> Self {
        Self { registry }
    }

    /// The registry this validator resolves entities against
    pub fn registry(&self) -> &SchemaRegistry {
        self.registry
    }

    /// Validate one document against an entity schema
    ///
    /// Collects per-field errors; returns an empty report on success.
    pub fn validate(&self, entity: &Entity, data: &RawValue) -> ValidationReport {
        let mut report = ValidationReport::default();
        let map = match data.as_object() {
            Some(map) => map,
            None => {
                report.push("_body", "request body must be an object");
                return report;
            }
        };

        for attribute in entity.attributes() {
            let input = map.get(&attribute.name);
            let input = match input {
                None | Some(RawValue::Null) => {
                    if attribute.required && attribute.default_value.is_none() {
                        report.push(&attribute.name, "is required");
                    }
                    continue;
                }
                Some(value) => value,
            };
            self.validate_attribute(attribute, input, &mut report);
        }

        // anything left that is not an attribute is an error
        for key in map.keys() {
            if entity.attribute(key).is_none() {
                report.push(key, "is not an attribute of this entity");
            }
        }

        report
    }

    fn validate_attribute(
        &self,
        attribute: &Attribute,
        input: &RawValue,
        report: &mut ValidationReport,
    ) {
        // multiplicity shape first; element checks run per item
        if attribute.multiple {
            let items = match input.as_array() {
                Some(items) => items,
                None => {
                    report.push(&attribute.name, "must be an array");
                    return;
                }
            };
            for item in items {
                self.validate_element(attribute, item, report);
            }
        } else {
            self.validate_element(attribute, input, report);
        }

        // array-level rules apply to the sequence itself
        for (key, parameter) in &attribute.validations {
            if matches!(key.as_str(), "minItems" | "maxItems" | "uniqueItems") {
                if let Some(rule) = RULES.get(key.as_str()) {
                    if let Some(message) = rule(parameter, input) {
                        report.push(&attribute.name, message);
                    }
                }
            }
        }
    }

    fn validate_element(
        &self,
        attribute: &Attribute,
        input: &RawValue,
        report: &mut ValidationReport,
    ) {
        if let Some(message) = check_element_type(attribute, input) {
            report.push(&attribute.name, message);
            return;
        }

        if !attribute.enum_values.is_empty() {
            if let Some(text) = input.as_str() {
                if !attribute.enum_values.iter().any(|v| v == text) {
                    report.push(
                        &attribute.name,
                        format!("must be one of: {}", attribute.enum_values.join(", ")),
                    );
                }
            }
        }

        if let (Some(format), Some(text)) = (attribute.format, input.as_str()) {
            if let Some(message) = check_format(format, text) {
                report.push(&attribute.name, message);
            }
        }

        for (key, parameter) in &attribute.validations {
            if matches!(key.as_str(), "minItems" | "maxItems" | "uniqueItems") {
                continue;
            }
            if let Some(rule) = RULES.get(key.as_str()) {
                if let Some(message) = rule(parameter, input) {
                    report.push(&attribute.name, message);
                }
            }
        }
    }
}
