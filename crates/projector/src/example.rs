//! Example generation for schema documentation
//!
//! Every documented property carries example data. An attribute's own
//! example always wins; otherwise the format decides, and the declared type
//! is the fallback. Sample values are fixed so generated documentation
//! stays stable.

use chrono::Utc;
use eav_core::RawValue;
use eav_schema::{Attribute, AttributeType, Format};

/// Example data for one attribute: own example, then format, then type
pub fn example_for_attribute(attribute: &Attribute) -> RawValue {
    if let Some(example) = &attribute.example {
        return example.clone();
    }
    if let Some(format) = attribute.format {
        return example_for_format(format);
    }
    example_for_type(attribute)
}

/// Example data keyed by string format
pub fn example_for_format(format: Format) -> RawValue {
    match format {
        Format::CountryCode => RawValue::from("NL"),
        Format::Bsn => RawValue::from("9999999990"),
        Format::Url => RawValue::from("www.example.nl"),
        Format::Uri => RawValue::from("/api/example/94e8bb2c-e66b-11ec-8fea-0242ac120002"),
        Format::Uuid => RawValue::from("94e8bb2c-e66b-11ec-8fea-0242ac120002"),
        Format::Email => RawValue::from("example@hotmail.com"),
        Format::Phone => RawValue::from("0612345678"),
        Format::Json => RawValue::from(r#"{"string":"string","string1":"string1"}"#),
        Format::DutchPc4 => RawValue::from("1217"),
    }
}

/// Example data keyed by declared type
///
/// Enum attributes document their value set; file attributes document their
/// accepted types when declared.
pub fn example_for_type(attribute: &Attribute) -> RawValue {
    match attribute.attr_type {
        AttributeType::String => {
            if attribute.enum_values.is_empty() {
                RawValue::from("string")
            } else {
                RawValue::Array(
                    attribute
                        .enum_values
                        .iter()
                        .map(|v| RawValue::from(v.as_str()))
                        .collect(),
                )
            }
        }
        AttributeType::Date => RawValue::String(Utc::now().format("%d-%m-%Y").to_string()),
        AttributeType::DateTime => {
            RawValue::String(Utc::now().format("%d-%m-%Y %H:%S").to_string())
        }
        AttributeType::Integer => RawValue::Int(1),
        AttributeType::Array => {
            RawValue::Array(vec![RawValue::from("string"), RawValue::from("string")])
        }
        AttributeType::Boolean => RawValue::Bool(true),
        AttributeType::Number => RawValue::Int(175),
        AttributeType::File => {
            if attribute.file_types.is_empty() {
                RawValue::from("example.pdf")
            } else {
                RawValue::Array(
                    attribute
                        .file_types
                        .iter()
                        .map(|v| RawValue::from(v.as_str()))
                        .collect(),
                )
            }
        }
        AttributeType::Object => RawValue::from("string"),
    }
}
