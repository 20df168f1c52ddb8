//! Asset payload formatting.
//!
//! Turns a set of asset fields into the single string that is QR-encoded
//! and shown as plain text. Stateless: callers recompute on every edit.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Caller-supplied asset attributes. Missing values count as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AssetFields {
    pub asset_name: Option<String>,
    pub specification: Option<String>,
    pub colour: Option<String>,
    pub date: Option<String>,
    pub user: Option<String>,
    pub location: Option<String>,
    pub email_office_activation: Option<String>,
    pub code_number: Option<String>,
    pub secondary_code: Option<String>,
}

/// Field identity, in payload order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    AssetName,
    Specification,
    Colour,
    Date,
    User,
    Location,
    EmailOfficeActivation,
    CodeNumber,
    SecondaryCode,
}

impl Field {
    /// Every field in the fixed output order.
    pub const ORDER: [Field; 9] = [
        Field::AssetName,
        Field::Specification,
        Field::Colour,
        Field::Date,
        Field::User,
        Field::Location,
        Field::EmailOfficeActivation,
        Field::CodeNumber,
        Field::SecondaryCode,
    ];

    /// Human-readable label used by structured payloads.
    pub fn label(self) -> &'static str {
        match self {
            Self::AssetName => "Asset Name",
            Self::Specification => "Specification",
            Self::Colour => "Colour",
            Self::Date => "Date",
            Self::User => "User",
            Self::Location => "Location",
            Self::EmailOfficeActivation => "Email Office Activation",
            Self::CodeNumber => "Code Number",
            Self::SecondaryCode => "Secondary Code",
        }
    }

    /// Only the secondary code may be left out of a payload.
    pub fn is_optional(self) -> bool {
        matches!(self, Self::SecondaryCode)
    }
}

impl AssetFields {
    /// Raw (untrimmed) value of a field, if present.
    pub fn raw(&self, field: Field) -> Option<&str> {
        let value = match field {
            Field::AssetName => &self.asset_name,
            Field::Specification => &self.specification,
            Field::Colour => &self.colour,
            Field::Date => &self.date,
            Field::User => &self.user,
            Field::Location => &self.location,
            Field::EmailOfficeActivation => &self.email_office_activation,
            Field::CodeNumber => &self.code_number,
            Field::SecondaryCode => &self.secondary_code,
        };
        value.as_deref()
    }

    /// Trimmed value of a field; missing fields yield `""`.
    pub fn value(&self, field: Field) -> &str {
        self.raw(field).map(str::trim).unwrap_or_default()
    }

    /// Fields that appear in a payload. Every field is emitted unless
    /// `omit_empty_optional` drops an empty secondary code.
    fn emitted(&self, omit_empty_optional: bool) -> impl Iterator<Item = (Field, &str)> {
        Field::ORDER
            .into_iter()
            .map(|f| (f, self.value(f)))
            .filter(move |(f, v)| !(omit_empty_optional && f.is_optional() && v.is_empty()))
    }
}

/// How the payload string is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PayloadMode {
    /// Labelled multi-line block, one section per field.
    Structured,
    /// Single-line JSON object.
    Compact,
    /// Two-space indented key/value lines without the enclosing braces.
    #[default]
    CompactPretty,
}

impl FromStr for PayloadMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "structured" => Ok(Self::Structured),
            "compact" => Ok(Self::Compact),
            "compact-pretty" | "pretty" => Ok(Self::CompactPretty),
            other => Err(format!("unknown payload mode '{other}'")),
        }
    }
}

/// Payload presentation policy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PayloadPolicy {
    pub mode: PayloadMode,
    /// Leading identifier line (structured mode only).
    pub heading: Option<String>,
    /// Trailing line (structured mode only).
    pub trailer: Option<String>,
    /// Leave out the secondary code section/key when it is empty.
    pub omit_empty_secondary: bool,
}

impl PayloadPolicy {
    pub fn new(mode: PayloadMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Builder: set heading line.
    pub fn with_heading(mut self, heading: impl Into<String>) -> Self {
        self.heading = Some(heading.into());
        self
    }

    /// Builder: set trailing line.
    pub fn with_trailer(mut self, trailer: impl Into<String>) -> Self {
        self.trailer = Some(trailer.into());
        self
    }

    /// Builder: drop an empty secondary code from the payload.
    pub fn with_omit_empty_secondary(mut self, omit: bool) -> Self {
        self.omit_empty_secondary = omit;
        self
    }
}

/// Serialization view with a fixed key order.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CompactPayload<'a> {
    asset_name: &'a str,
    specification: &'a str,
    colour: &'a str,
    date: &'a str,
    user: &'a str,
    location: &'a str,
    email_office_activation: &'a str,
    code_number: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    secondary_code: Option<&'a str>,
}

impl<'a> CompactPayload<'a> {
    fn new(fields: &'a AssetFields, omit_empty_secondary: bool) -> Self {
        let secondary = fields.value(Field::SecondaryCode);
        Self {
            asset_name: fields.value(Field::AssetName),
            specification: fields.value(Field::Specification),
            colour: fields.value(Field::Colour),
            date: fields.value(Field::Date),
            user: fields.value(Field::User),
            location: fields.value(Field::Location),
            email_office_activation: fields.value(Field::EmailOfficeActivation),
            code_number: fields.value(Field::CodeNumber),
            secondary_code: (!omit_empty_secondary || !secondary.is_empty()).then_some(secondary),
        }
    }
}

/// Build the payload string for a set of fields.
///
/// Never fails: missing fields render as empty values.
pub fn build_payload(fields: &AssetFields, policy: &PayloadPolicy) -> String {
    let payload = match policy.mode {
        PayloadMode::Structured => structured(fields, policy),
        PayloadMode::Compact => compact(fields, policy, false),
        PayloadMode::CompactPretty => compact(fields, policy, true),
    };
    debug!(mode = ?policy.mode, len = payload.len(), "Built asset payload");
    payload
}

fn structured(fields: &AssetFields, policy: &PayloadPolicy) -> String {
    let mut sections: Vec<String> = Vec::with_capacity(Field::ORDER.len() + 2);

    if let Some(heading) = policy.heading.as_deref().map(str::trim)
        && !heading.is_empty()
    {
        sections.push(heading.to_string());
    }
    sections.extend(
        fields
            .emitted(policy.omit_empty_secondary)
            .map(|(field, value)| format!("{} :\n{}", field.label(), value)),
    );
    if let Some(trailer) = policy.trailer.as_deref().map(str::trim)
        && !trailer.is_empty()
    {
        sections.push(trailer.to_string());
    }

    sections.join("\n\n")
}

fn compact(fields: &AssetFields, policy: &PayloadPolicy, pretty: bool) -> String {
    let view = CompactPayload::new(fields, policy.omit_empty_secondary);
    // Serializing a struct of plain strings cannot fail.
    let json = if pretty {
        serde_json::to_string_pretty(&view)
    } else {
        serde_json::to_string(&view)
    }
    .unwrap_or_default();

    if !pretty {
        return json;
    }
    json.strip_prefix("{\n")
        .and_then(|s| s.strip_suffix("\n}"))
        .map(str::to_string)
        .unwrap_or(json)
}
