//! Declarative field coercion applied at the gateway boundary.
//!
//! Form transport carries every value as a string: numeric IDs as `"5"`,
//! flags as `"true"`/`"false"`, dates as `"2024-01-31"`. Each entity declares
//! its coercible fields once; gateways run write payloads through the schema
//! so the server always sees properly typed JSON. Fields a schema does not
//! name pass through untouched.

use chrono::NaiveDate;
use crewdesk_core::{CrewdeskError, CrewdeskResult, Record};
use serde_json::Value;

/// How a declared field is parsed and serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text, passed through as-is.
    Text,
    /// A numeric identifier; string digits become a JSON number, empty
    /// becomes null.
    Id,
    /// A boolean carried as `"true"`/`"false"` in form transport.
    Flag,
    /// An ISO `YYYY-MM-DD` date; validated, empty becomes null.
    Date,
}

/// One declared field of an entity schema.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// Field name as the server knows it.
    pub name: &'static str,
    /// Parse/serialize behavior.
    pub kind: FieldKind,
    /// Whether a write payload must carry a non-empty value.
    pub required: bool,
}

impl FieldSpec {
    const fn new(name: &'static str, kind: FieldKind, required: bool) -> Self {
        Self {
            name,
            kind,
            required,
        }
    }

    const fn text(name: &'static str) -> Self {
        Self::new(name, FieldKind::Text, false)
    }

    const fn required_text(name: &'static str) -> Self {
        Self::new(name, FieldKind::Text, true)
    }

    const fn id(name: &'static str) -> Self {
        Self::new(name, FieldKind::Id, false)
    }

    const fn required_id(name: &'static str) -> Self {
        Self::new(name, FieldKind::Id, true)
    }

    const fn flag(name: &'static str) -> Self {
        Self::new(name, FieldKind::Flag, false)
    }

    const fn date(name: &'static str) -> Self {
        Self::new(name, FieldKind::Date, false)
    }
}

/// The declared coercible fields of one entity.
#[derive(Debug)]
pub struct EntitySchema {
    fields: &'static [FieldSpec],
}

impl EntitySchema {
    /// Coerces a full write payload (create): required fields must be
    /// present and non-empty.
    pub fn coerce(&self, record: &mut Record) -> CrewdeskResult<()> {
        self.apply(record, true)
    }

    /// Coerces a partial write payload (update): only fields present in the
    /// record are checked and converted.
    pub fn coerce_partial(&self, record: &mut Record) -> CrewdeskResult<()> {
        self.apply(record, false)
    }

    fn apply(&self, record: &mut Record, enforce_required: bool) -> CrewdeskResult<()> {
        for field in self.fields {
            let Some(value) = record.get(field.name) else {
                if field.required && enforce_required {
                    return Err(required(field.name));
                }
                continue;
            };

            let coerced = coerce_value(field, value)?;
            if field.required && is_blank(&coerced) {
                return Err(required(field.name));
            }
            record.insert(field.name.to_string(), coerced);
        }
        Ok(())
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

fn required(field: &str) -> CrewdeskError {
    CrewdeskError::Validation {
        field: field.to_string(),
        message: "Required".to_string(),
    }
}

fn invalid(field: &str, message: &str) -> CrewdeskError {
    CrewdeskError::Validation {
        field: field.to_string(),
        message: message.to_string(),
    }
}

fn coerce_value(field: &FieldSpec, value: &Value) -> CrewdeskResult<Value> {
    match field.kind {
        FieldKind::Text => Ok(value.clone()),
        FieldKind::Id => match value {
            Value::Null => Ok(Value::Null),
            Value::Number(_) => Ok(value.clone()),
            Value::String(s) => {
                let s = s.trim();
                if s.is_empty() {
                    return Ok(Value::Null);
                }
                s.parse::<i64>()
                    .map(Value::from)
                    .map_err(|_| invalid(field.name, "expected a numeric id"))
            }
            _ => Err(invalid(field.name, "expected a numeric id")),
        },
        FieldKind::Flag => match value {
            Value::Bool(_) => Ok(value.clone()),
            Value::Null => Ok(Value::Bool(false)),
            Value::String(s) => match s.trim() {
                "true" => Ok(Value::Bool(true)),
                "false" | "" => Ok(Value::Bool(false)),
                _ => Err(invalid(field.name, "expected true or false")),
            },
            _ => Err(invalid(field.name, "expected true or false")),
        },
        FieldKind::Date => match value {
            Value::Null => Ok(Value::Null),
            Value::String(s) => {
                let s = s.trim();
                if s.is_empty() {
                    return Ok(Value::Null);
                }
                NaiveDate::parse_from_str(s, "%Y-%m-%d")
                    .map(|_| Value::String(s.to_string()))
                    .map_err(|_| invalid(field.name, "expected a YYYY-MM-DD date"))
            }
            _ => Err(invalid(field.name, "expected a YYYY-MM-DD date")),
        },
    }
}

/// Employee write payloads.
pub static EMPLOYEE: EntitySchema = EntitySchema {
    fields: &[
        FieldSpec::required_text("first_name"),
        FieldSpec::required_text("last_name"),
        FieldSpec::required_text("gender"),
        FieldSpec::date("birth_date"),
        FieldSpec::text("national_id"),
        FieldSpec::required_text("work_email"),
        FieldSpec::text("personal_email"),
        FieldSpec::text("phone"),
        FieldSpec::text("address"),
        FieldSpec::required_id("department_id"),
        FieldSpec::required_id("position_id"),
        FieldSpec::id("manager_id"),
        FieldSpec::text("job_level"),
        FieldSpec::id("location_id"),
        FieldSpec::date("hire_date"),
        FieldSpec::flag("create_portal_account"),
        FieldSpec::text("portal_username"),
        FieldSpec::text("portal_password"),
        FieldSpec::text("portal_password_confirmation"),
    ],
};

/// Department write payloads.
pub static DEPARTMENT: EntitySchema = EntitySchema {
    fields: &[
        FieldSpec::required_text("name"),
        FieldSpec::required_text("code"),
        FieldSpec::id("manager_id"),
        FieldSpec::text("description"),
    ],
};

/// Position write payloads.
pub static POSITION: EntitySchema = EntitySchema {
    fields: &[
        FieldSpec::required_text("name"),
        FieldSpec::required_text("code"),
        FieldSpec::id("department_id"),
        FieldSpec::text("description"),
    ],
};

/// Role write payloads. Permission lists pass through untouched.
pub static ROLE: EntitySchema = EntitySchema {
    fields: &[
        FieldSpec::required_text("name"),
        FieldSpec::text("description"),
    ],
};
