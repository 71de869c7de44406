//! Attribute definitions
//!
//! An Attribute describes one named, typed slot on an Entity: its type,
//! multiplicity, nested-object reference, cascade flag, validation rules and
//! inverse relation name. The value engine dispatches entirely on
//! `attr_type` + `multiple`; everything else feeds validation and
//! documentation.

use eav_core::{AttributeId, EntityId, RawValue};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// The declared type of an attribute
///
/// Exactly one of the scalar types or `Object` applies to an attribute;
/// object-typed attributes never populate scalar storage slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeType {
    /// UTF-8 text
    String,
    /// 64-bit signed integer
    Integer,
    /// 64-bit float
    Number,
    /// Boolean
    Boolean,
    /// Calendar date (rendered `YYYY-MM-DD`)
    Date,
    /// Date and time (rendered ISO 8601 with offset)
    DateTime,
    /// Owned file records
    File,
    /// Reference(s) to objects of another Entity
    Object,
    /// Free-form array stored verbatim
    Array,
}

impl AttributeType {
    /// The lowercase wire name of this type
    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeType::String => "string",
            AttributeType::Integer => "integer",
            AttributeType::Number => "number",
            AttributeType::Boolean => "boolean",
            AttributeType::Date => "date",
            AttributeType::DateTime => "datetime",
            AttributeType::File => "file",
            AttributeType::Object => "object",
            AttributeType::Array => "array",
        }
    }

    /// Parse a wire name back into a type
    pub fn from_name(s: &str) -> Option<Self> {
        match s {
            "string" => Some(AttributeType::String),
            "integer" => Some(AttributeType::Integer),
            "number" => Some(AttributeType::Number),
            "boolean" => Some(AttributeType::Boolean),
            "date" => Some(AttributeType::Date),
            "datetime" => Some(AttributeType::DateTime),
            "file" => Some(AttributeType::File),
            "object" => Some(AttributeType::Object),
            "array" => Some(AttributeType::Array),
            _ => None,
        }
    }

    /// Types with a dedicated multi-value representation
    ///
    /// For every other type, `multiple = true` means the generic array slot
    /// holds the sequence verbatim.
    pub fn has_dedicated_multi_slot(&self) -> bool {
        matches!(
            self,
            AttributeType::Object | AttributeType::DateTime | AttributeType::Date | AttributeType::File
        )
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// String formats understood by validation and documentation examples
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Format {
    /// Email address
    #[serde(rename = "email")]
    Email,
    /// Web address
    #[serde(rename = "url")]
    Url,
    /// Resource path
    #[serde(rename = "uri")]
    Uri,
    /// UUID string
    #[serde(rename = "uuid")]
    Uuid,
    /// Phone number
    #[serde(rename = "phone")]
    Phone,
    /// JSON-encoded string
    #[serde(rename = "json")]
    Json,
    /// ISO 3166-1 alpha-2 country code
    #[serde(rename = "countryCode")]
    CountryCode,
    /// Dutch citizen service number
    #[serde(rename = "bsn")]
    Bsn,
    /// Dutch four-digit postal code prefix
    #[serde(rename = "dutch_pc4")]
    DutchPc4,
}

impl Format {
    /// The wire name of this format
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Email => "email",
            Format::Url => "url",
            Format::Uri => "uri",
            Format::Uuid => "uuid",
            Format::Phone => "phone",
            Format::Json => "json",
            Format::CountryCode => "countryCode",
            Format::Bsn => "bsn",
            Format::DutchPc4 => "dutch_pc4",
        }
    }
}

/// One named, typed slot on an Entity schema
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attribute {
    /// Unique identifier
    pub id: AttributeId,
    /// Name, unique within the owning Entity
    pub name: String,
    /// Declared type; drives the value engine dispatch
    #[serde(rename = "type")]
    pub attr_type: AttributeType,
    /// Whether the logical value is a sequence rather than a scalar
    #[serde(default)]
    pub multiple: bool,
    /// Target Entity for `object`-typed attributes
    #[serde(default)]
    pub object: Option<EntityId>,
    /// Embed the nested object as a full sub-schema (true) or expose only a
    /// UUID reference (false) in documentation and serialization
    #[serde(default)]
    pub cascade: bool,
    /// Name of the Attribute on the related Entity kept symmetric with this
    /// relation
    #[serde(default)]
    pub inversed_by: Option<String>,
    /// Reject writes that omit this attribute
    #[serde(default)]
    pub required: bool,
    /// Include this attribute's string projection in text filtering
    #[serde(default)]
    pub searchable: bool,
    /// Closed set of accepted string values
    #[serde(default)]
    pub enum_values: Vec<String>,
    /// String format for validation and example generation
    #[serde(default)]
    pub format: Option<Format>,
    /// Accepted file types for `file` attributes
    #[serde(default)]
    pub file_types: Vec<String>,
    /// Extra validation rules: validator name → parameter
    #[serde(default)]
    pub validations: HashMap<String, RawValue>,
    /// Documentation example; wins over generated examples
    #[serde(default)]
    pub example: Option<RawValue>,
    /// Human-readable description
    #[serde(default)]
    pub description: Option<String>,
    /// Applied when a create omits this attribute
    #[serde(default)]
    pub default_value: Option<RawValue>,
}

impl Attribute {
    /// Create an attribute of the given scalar/array/file type
    pub fn new(name: &str, attr_type: AttributeType) -> Self {
        Self {
            id: AttributeId::new(),
            name: name.to_string(),
            attr_type,
            multiple: false,
            object: None,
            cascade: false,
            inversed_by: None,
            required: false,
            searchable: false,
            enum_values: Vec::new(),
            format: None,
            file_types: Vec::new(),
            validations: HashMap::new(),
            example: None,
            description: None,
            default_value: None,
        }
    }

    /// Create an `object`-typed attribute referencing another Entity
    pub fn object_ref(name: &str, target: EntityId) -> Self {
        let mut attribute = Self::new(name, AttributeType::Object);
        attribute.object = Some(target);
        attribute
    }

    /// Set the multiplicity flag
    pub fn with_multiple(mut self, multiple: bool) -> Self {
        self.multiple = multiple;
        self
    }

    /// Set the cascade flag
    pub fn with_cascade(mut self, cascade: bool) -> Self {
        self.cascade = cascade;
        self
    }

    /// Declare the symmetric attribute on the related Entity
    pub fn with_inversed_by(mut self, inverse: &str) -> Self {
        self.inversed_by = Some(inverse.to_string());
        self
    }

    /// Mark the attribute as required
    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Include this attribute in text filtering
    pub fn with_searchable(mut self, searchable: bool) -> Self {
        self.searchable = searchable;
        self
    }

    /// Set the string format
    pub fn with_format(mut self, format: Format) -> Self {
        self.format = Some(format);
        self
    }

    /// Restrict string values to a closed set
    pub fn with_enum(mut self, values: &[&str]) -> Self {
        self.enum_values = values.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Add one validation rule (validator name → parameter)
    pub fn with_validation(mut self, key: &str, parameter: impl Into<RawValue>) -> Self {
        self.validations.insert(key.to_string(), parameter.into());
        self
    }

    /// Set the documentation example
    pub fn with_example(mut self, example: impl Into<RawValue>) -> Self {
        self.example = Some(example.into());
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// Set the default value applied on create
    pub fn with_default(mut self, value: impl Into<RawValue>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Restrict accepted file types
    pub fn with_file_types(mut self, types: &[&str]) -> Self {
        self.file_types = types.iter().map(|s| s.to_string()).collect();
        self
    }
}
