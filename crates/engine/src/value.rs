//! The Value and its typed set/get dispatch
//!
//! One Value is one concrete slot of data on an object: it belongs to
//! exactly one Attribute and one object, both fixed at creation. All
//! mutation goes through [`Value::set_raw`]; external code never touches
//! the payload slots directly. `set_raw` is the single authoritative
//! translation between a raw external value and the typed storage, driven
//! entirely by the owning Attribute's type and multiplicity.
//!
//! Two inputs are deliberately *not* errors:
//! - `null` on a `file` attribute is an idempotent skip, not a clear
//! - an integer at or above `i64::MAX` is silently dropped ("cannot
//!   represent"), leaving the slot unchanged
//!
//! Everything else that cannot be coerced fails with a type-conversion
//! error; a value whose attribute cannot be resolved fails with a schema
//! error before any dispatch happens.

use crate::file::File;
use crate::payload::{ObjectLinks, Payload};
use chrono::{DateTime, Utc};
use eav_core::timestamp::{format_wire_date, format_wire_datetime, parse_datetime};
use eav_core::{AttributeId, EavError, ObjectId, RawValue, Result, ValueId};
use eav_schema::{Attribute, AttributeType};
use serde::{Deserialize, Serialize};

/// Multiplicity-aware result of reading a Value
#[derive(Debug, Clone, PartialEq)]
pub enum ValueView {
    /// Scalar or array data, dates already formatted for the wire
    Raw(RawValue),
    /// The single owned file of a non-multiple `file` attribute
    File(File),
    /// All owned files of a multiple `file` attribute
    Files(Vec<File>),
    /// The single link of a non-multiple `object` attribute
    Object(ObjectId),
    /// All links of a multiple `object` attribute
    Objects(Vec<ObjectId>),
}

/// One attribute slot on one object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Value {
    id: ValueId,
    attribute: AttributeId,
    payload: Payload,
    /// The moment this value was created
    pub date_created: DateTime<Utc>,
    /// The moment this value last changed
    pub date_modified: DateTime<Utc>,
}

impl Value {
    /// Create the value slot for an attribute
    ///
    /// The payload case is selected here, once, from the attribute's
    /// declared type; it never changes afterwards.
    pub fn new(attribute: &Attribute) -> Self {
        let now = Utc::now();
        Self {
            id: ValueId::new(),
            attribute: attribute.id,
            payload: Payload::for_attribute(attribute),
            date_created: now,
            date_modified: now,
        }
    }

    /// Unique identifier
    pub fn id(&self) -> ValueId {
        self.id
    }

    /// The owning attribute
    pub fn attribute(&self) -> AttributeId {
        self.attribute
    }

    /// The typed payload (read-only; mutation goes through `set_raw` and
    /// the store's relation operations)
    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// Relation edges, when this is an `object`-typed value
    pub fn object_links(&self) -> Option<&ObjectLinks> {
        match &self.payload {
            Payload::Objects(links) => Some(links),
            _ => None,
        }
    }

    pub(crate) fn object_links_mut(&mut self) -> Option<&mut ObjectLinks> {
        match &mut self.payload {
            Payload::Objects(links) => Some(links),
            _ => None,
        }
    }

    /// Owned files, when this is a `file`-typed value
    pub fn files(&self) -> Option<&[File]> {
        match &self.payload {
            Payload::Files(files) => Some(files),
            _ => None,
        }
    }

    fn touch(&mut self) {
        self.date_modified = Utc::now();
    }

    fn slot_mismatch(&self, attribute: &Attribute) -> EavError {
        EavError::Schema(format!(
            "attribute '{}' is declared {} but the value holds a {} slot",
            attribute.name,
            attribute.attr_type,
            self.payload.slot_name()
        ))
    }

    fn conversion(attribute: &Attribute, found: &RawValue) -> EavError {
        EavError::TypeConversion {
            attribute: attribute.name.clone(),
            expected: attribute.attr_type.as_str().to_string(),
            found: found.type_name().to_string(),
        }
    }

    /// Assign a raw external value, dispatching on the attribute's type
    ///
    /// `object`-typed attributes are linked through the store, which owns
    /// both ends of the edge; calling `set_raw` for one is a schema error.
    pub fn set_raw(&mut self, attribute: &Attribute, raw: RawValue) -> Result<&mut Self> {
        if attribute.id != self.attribute {
            return Err(EavError::Schema(format!(
                "value belongs to a different attribute than '{}'",
                attribute.name
            )));
        }
        if attribute.multiple && !attribute.attr_type.has_dedicated_multi_slot() {
            return self.set_array(attribute, raw);
        }
        match attribute.attr_type {
            AttributeType::String => self.set_string(attribute, raw),
            AttributeType::Integer => self.set_integer(attribute, raw),
            AttributeType::Boolean => self.set_boolean(attribute, raw),
            AttributeType::Number => self.set_number(attribute, raw),
            AttributeType::Date | AttributeType::DateTime => self.set_datetime(attribute, raw),
            AttributeType::File => self.set_files(attribute, raw),
            AttributeType::Array => self.set_array(attribute, raw),
            AttributeType::Object => Err(EavError::Schema(format!(
                "object attribute '{}' is linked through the store, not set_raw",
                attribute.name
            ))),
        }
    }

    fn set_string(&mut self, attribute: &Attribute, raw: RawValue) -> Result<&mut Self> {
        let next = match raw {
            RawValue::Null => None,
            RawValue::String(s) => Some(s),
            // scalar input coerces to its canonical text
            RawValue::Int(i) => Some(i.to_string()),
            RawValue::Float(f) => Some(f.to_string()),
            RawValue::Bool(b) => Some(if b { "true" } else { "false" }.to_string()),
            other => return Err(Self::conversion(attribute, &other)),
        };
        match &mut self.payload {
            Payload::SingleString(slot) => *slot = next,
            _ => return Err(self.slot_mismatch(attribute)),
        }
        self.touch();
        Ok(self)
    }

    fn set_integer(&mut self, attribute: &Attribute, raw: RawValue) -> Result<&mut Self> {
        let next = match raw {
            RawValue::Null => None,
            RawValue::Int(i) => {
                if i < i64::MAX {
                    Some(i)
                } else {
                    // cannot represent: silently keep the previous state
                    return Ok(self);
                }
            }
            RawValue::Float(f) => {
                if f < i64::MAX as f64 {
                    Some(f as i64)
                } else {
                    return Ok(self);
                }
            }
            RawValue::String(s) => match s.parse::<i64>() {
                Ok(i) if i < i64::MAX => Some(i),
                Ok(_) => return Ok(self),
                Err(_) => return Err(Self::conversion(attribute, &RawValue::String(s))),
            },
            other => return Err(Self::conversion(attribute, &other)),
        };
        match &mut self.payload {
            Payload::SingleInt(slot) => *slot = next,
            _ => return Err(self.slot_mismatch(attribute)),
        }
        self.touch();
        Ok(self)
    }

    fn set_boolean(&mut self, attribute: &Attribute, raw: RawValue) -> Result<&mut Self> {
        let next = match raw {
            RawValue::Null => None,
            RawValue::Bool(b) => Some(b),
            // default values arrive as strings; only the literal "true"
            // converts to true, every other string is false
            RawValue::String(s) => Some(s == "true"),
            other => return Err(Self::conversion(attribute, &other)),
        };
        match &mut self.payload {
            Payload::SingleBool(slot) => *slot = next,
            _ => return Err(self.slot_mismatch(attribute)),
        }
        self.touch();
        Ok(self)
    }

    fn set_number(&mut self, attribute: &Attribute, raw: RawValue) -> Result<&mut Self> {
        let next = match raw {
            RawValue::Null => None,
            RawValue::Float(f) => Some(f),
            RawValue::Int(i) => Some(i as f64),
            RawValue::String(s) => match s.parse::<f64>() {
                Ok(f) => Some(f),
                Err(_) => return Err(Self::conversion(attribute, &RawValue::String(s))),
            },
            other => return Err(Self::conversion(attribute, &other)),
        };
        match &mut self.payload {
            Payload::SingleFloat(slot) => *slot = next,
            _ => return Err(self.slot_mismatch(attribute)),
        }
        self.touch();
        Ok(self)
    }

    fn set_datetime(&mut self, attribute: &Attribute, raw: RawValue) -> Result<&mut Self> {
        // an auto-converted null would default to the current timestamp, so
        // empty input clears the slot instead
        if raw.is_empty() {
            match &mut self.payload {
                Payload::DateTimeArray(slot) => *slot = None,
                Payload::SingleDateTime(slot) => *slot = None,
                _ => return Err(self.slot_mismatch(attribute)),
            }
            self.touch();
            return Ok(self);
        }
        if attribute.multiple {
            let items = match raw.as_array() {
                Some(items) => items,
                None => return Err(Self::conversion(attribute, &raw)),
            };
            let mut parsed = Vec::with_capacity(items.len());
            for item in items {
                let text = item
                    .as_str()
                    .ok_or_else(|| Self::conversion(attribute, item))?;
                let dt = parse_datetime(text)
                    .ok_or_else(|| Self::conversion(attribute, item))?;
                parsed.push(dt);
            }
            match &mut self.payload {
                Payload::DateTimeArray(slot) => *slot = Some(parsed),
                _ => return Err(self.slot_mismatch(attribute)),
            }
        } else {
            let text = match raw.as_str() {
                Some(text) => text,
                None => return Err(Self::conversion(attribute, &raw)),
            };
            let dt =
                parse_datetime(text).ok_or_else(|| Self::conversion(attribute, &raw))?;
            match &mut self.payload {
                Payload::SingleDateTime(slot) => *slot = Some(dt),
                _ => return Err(self.slot_mismatch(attribute)),
            }
        }
        self.touch();
        Ok(self)
    }

    fn set_files(&mut self, attribute: &Attribute, raw: RawValue) -> Result<&mut Self> {
        // null is an idempotent skip: existing files stay untouched
        if raw.is_null() {
            return Ok(self);
        }
        let mut next = Vec::new();
        if attribute.multiple {
            let items = match raw.as_array() {
                Some(items) => items,
                None => return Err(Self::conversion(attribute, &raw)),
            };
            for item in items {
                let file = File::from_raw(item)
                    .ok_or_else(|| Self::conversion(attribute, item))?;
                next.push(file);
            }
        } else {
            let file = File::from_raw(&raw).ok_or_else(|| Self::conversion(attribute, &raw))?;
            next.push(file);
        }
        match &mut self.payload {
            Payload::Files(files) => *files = next,
            _ => return Err(self.slot_mismatch(attribute)),
        }
        self.touch();
        Ok(self)
    }

    fn set_array(&mut self, attribute: &Attribute, raw: RawValue) -> Result<&mut Self> {
        let next = match raw {
            RawValue::Null => None,
            RawValue::Array(items) => Some(items),
            other => return Err(Self::conversion(attribute, &other)),
        };
        match &mut self.payload {
            Payload::Array(slot) => *slot = next,
            _ => return Err(self.slot_mismatch(attribute)),
        }
        self.touch();
        Ok(self)
    }

    /// Read the value back, multiplicity-aware
    ///
    /// Dates are formatted (`YYYY-MM-DD` for `date`, ISO 8601 with offset
    /// for `datetime`); empty date and relation slots read as None; single
    /// file/object attributes return their first item.
    pub fn get(&self, attribute: &Attribute) -> Option<ValueView> {
        if attribute.multiple && !attribute.attr_type.has_dedicated_multi_slot() {
            return match &self.payload {
                Payload::Array(Some(items)) => {
                    Some(ValueView::Raw(RawValue::Array(items.clone())))
                }
                _ => None,
            };
        }
        match attribute.attr_type {
            AttributeType::String => match &self.payload {
                Payload::SingleString(Some(s)) => {
                    Some(ValueView::Raw(RawValue::String(s.clone())))
                }
                _ => None,
            },
            AttributeType::Integer => match &self.payload {
                Payload::SingleInt(Some(i)) => Some(ValueView::Raw(RawValue::Int(*i))),
                _ => None,
            },
            AttributeType::Boolean => match &self.payload {
                Payload::SingleBool(Some(b)) => Some(ValueView::Raw(RawValue::Bool(*b))),
                _ => None,
            },
            AttributeType::Number => match &self.payload {
                Payload::SingleFloat(Some(f)) => Some(ValueView::Raw(RawValue::Float(*f))),
                _ => None,
            },
            AttributeType::Array => match &self.payload {
                Payload::Array(Some(items)) => {
                    Some(ValueView::Raw(RawValue::Array(items.clone())))
                }
                _ => None,
            },
            AttributeType::Date | AttributeType::DateTime => {
                let format = |dt: &DateTime<Utc>| -> RawValue {
                    if attribute.attr_type == AttributeType::Date {
                        RawValue::String(format_wire_date(dt))
                    } else {
                        RawValue::String(format_wire_datetime(dt))
                    }
                };
                match &self.payload {
                    Payload::SingleDateTime(Some(dt)) => Some(ValueView::Raw(format(dt))),
                    Payload::DateTimeArray(Some(items)) if !items.is_empty() => Some(
                        ValueView::Raw(RawValue::Array(items.iter().map(format).collect())),
                    ),
                    _ => None,
                }
            }
            AttributeType::File => match &self.payload {
                Payload::Files(files) => {
                    if !attribute.multiple {
                        files.first().cloned().map(ValueView::File)
                    } else if files.is_empty() {
                        None
                    } else {
                        Some(ValueView::Files(files.clone()))
                    }
                }
                _ => None,
            },
            AttributeType::Object => match &self.payload {
                Payload::Objects(links) => {
                    if !attribute.multiple {
                        links.links.first().copied().map(ValueView::Object)
                    } else if links.links.is_empty() {
                        None
                    } else {
                        Some(ValueView::Objects(links.links.clone()))
                    }
                }
                _ => None,
            },
        }
    }
}
