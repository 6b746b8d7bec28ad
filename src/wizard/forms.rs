//! Declarative form framework used by the transaction wizard.
//!
//! A [`FormDescriptor`] lists the fields a form collects, each paired with a
//! [`Validator`]. Validation works on JSON values (the wire shape of collected
//! form data) and returns the normalized values, so that the same descriptor
//! both checks user input and shapes the payload handed to the server.

use std::fmt;
use std::sync::Arc;

use chrono::NaiveDate;
use serde_json::{Map, Number, Value};

/// Collected form data keyed by field name.
pub type FormValues = Map<String, Value>;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Single validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Validation failure attached to a form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Every failing field of one validation pass, in descriptor order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: Vec<FieldError>,
}

impl FieldErrors {
    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Message recorded for `field`, if it failed.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|error| error.field == field)
            .map(|error| error.message.as_str())
    }

    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|error| format!("{}: {}", error.field, error.message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

/// Supported data kinds for form fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer,
    Decimal,
    Date,
    Boolean,
    Choice(Vec<&'static str>),
}

type ValidatorCallback = dyn Fn(&Value) -> Result<Value, String> + Send + Sync;
type SharedValidatorCallback = Arc<ValidatorCallback>;

/// Built-in validation helpers.
#[derive(Clone)]
pub enum Validator {
    None,
    NonEmpty,
    PositiveNumber,
    IntegerRange { min: i64, max: i64 },
    Date,
    Boolean,
    OneOf(Vec<&'static str>),
    Custom(SharedValidatorCallback),
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Validator::None => f.write_str("None"),
            Validator::NonEmpty => f.write_str("NonEmpty"),
            Validator::PositiveNumber => f.write_str("PositiveNumber"),
            Validator::IntegerRange { min, max } => write!(f, "IntegerRange({min}..={max})"),
            Validator::Date => f.write_str("Date"),
            Validator::Boolean => f.write_str("Boolean"),
            Validator::OneOf(options) => write!(f, "OneOf({})", options.join("|")),
            Validator::Custom(_) => f.write_str("Custom"),
        }
    }
}

impl Validator {
    /// Checks `input` and returns its normalized form.
    pub fn validate(&self, input: &Value) -> Result<Value, ValidationError> {
        match self {
            Validator::None => Ok(input.clone()),
            Validator::NonEmpty => match input {
                Value::String(text) if !text.trim().is_empty() => {
                    Ok(Value::String(text.trim().to_string()))
                }
                Value::Number(number) => Ok(Value::String(number.to_string())),
                _ => Err(ValidationError::new("Value cannot be empty")),
            },
            Validator::PositiveNumber => {
                let value = number_from(input)
                    .ok_or_else(|| ValidationError::new("Enter a numeric value"))?;
                normalize_amount(value)
            }
            Validator::IntegerRange { min, max } => {
                let value = integer_from(input).ok_or_else(|| {
                    ValidationError::new("Enter a whole number (e.g., 12)")
                })?;
                if value < *min || value > *max {
                    Err(ValidationError::new(format!(
                        "Value must be between {} and {}",
                        min, max
                    )))
                } else {
                    Ok(Value::from(value))
                }
            }
            Validator::Date => input
                .as_str()
                .and_then(|text| NaiveDate::parse_from_str(text.trim(), DATE_FORMAT).ok())
                .map(|date| Value::String(date.format(DATE_FORMAT).to_string()))
                .ok_or_else(|| ValidationError::new("Use YYYY-MM-DD format")),
            Validator::Boolean => match input {
                Value::Bool(flag) => Ok(Value::Bool(*flag)),
                Value::String(text) => match text.trim().to_ascii_lowercase().as_str() {
                    "true" => Ok(Value::Bool(true)),
                    "false" => Ok(Value::Bool(false)),
                    _ => Err(ValidationError::new("Expected true or false")),
                },
                _ => Err(ValidationError::new("Expected true or false")),
            },
            Validator::OneOf(options) => {
                let normalized = input.as_str().map(|text| text.trim().to_ascii_lowercase());
                normalized
                    .and_then(|needle| {
                        options
                            .iter()
                            .find(|candidate| candidate.to_ascii_lowercase() == needle)
                    })
                    .map(|option| Value::String((*option).to_string()))
                    .ok_or_else(|| {
                        ValidationError::new(format!(
                            "Value must be one of: {}",
                            options.join(", ")
                        ))
                    })
            }
            Validator::Custom(func) => func(input).map_err(ValidationError::new),
        }
    }
}

/// Value a blank field takes when the form is validated or submitted.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldDefault {
    Value(Value),
    /// The session's current date, known only to whoever applies defaults.
    Today,
}

/// Declarative description of a single form field.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    /// Control fields drive the form but are never sent to the server.
    pub client_only: bool,
    pub help: Option<&'static str>,
    pub default: Option<FieldDefault>,
    pub validator: Validator,
}

impl FieldDescriptor {
    pub fn new(
        key: &'static str,
        label: &'static str,
        kind: FieldKind,
        validator: Validator,
    ) -> Self {
        Self {
            key,
            label,
            kind,
            required: true,
            client_only: false,
            help: None,
            default: None,
            validator,
        }
    }

    pub fn with_optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn with_client_only(mut self) -> Self {
        self.client_only = true;
        self
    }

    pub fn with_help(mut self, help: &'static str) -> Self {
        self.help = Some(help);
        self
    }

    pub fn with_default(mut self, value: Value) -> Self {
        self.default = Some(FieldDefault::Value(value));
        self
    }

    pub fn with_default_today(mut self) -> Self {
        self.default = Some(FieldDefault::Today);
        self
    }
}

/// Metadata describing a full form, including field order.
#[derive(Debug, Clone)]
pub struct FormDescriptor {
    pub name: &'static str,
    pub fields: Vec<FieldDescriptor>,
}

impl FormDescriptor {
    pub fn new(name: &'static str, fields: Vec<FieldDescriptor>) -> Self {
        Self { name, fields }
    }

    pub fn field(&self, key: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| field.key == key)
    }

    pub fn has_field(&self, key: &str) -> bool {
        self.field(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|field| field.key)
    }

    /// Copy of `values` with every blank or missing field that declares a
    /// default filled in, date defaults resolved against `today`.
    pub fn apply_defaults(&self, values: &FormValues, today: NaiveDate) -> FormValues {
        let mut filled = values.clone();
        for field in &self.fields {
            if !filled.get(field.key).map_or(true, is_blank) {
                continue;
            }
            let value = match &field.default {
                Some(FieldDefault::Value(value)) => value.clone(),
                Some(FieldDefault::Today) => Value::String(today.format(DATE_FORMAT).to_string()),
                None => continue,
            };
            filled.insert(field.key.to_string(), value);
        }
        filled
    }

    /// Validates submitted values. Required fields must be filled; the result
    /// holds only declared fields, normalized. Blank fields with a fixed
    /// default take it, other blank optional values are dropped.
    pub fn validate(&self, values: &FormValues) -> Result<FormValues, FieldErrors> {
        self.check(values, false)
    }

    /// Validates a form that is still being filled: blank values pass, but
    /// anything present must be well-formed.
    pub fn validate_draft(&self, values: &FormValues) -> Result<FormValues, FieldErrors> {
        self.check(values, true)
    }

    fn check(&self, values: &FormValues, draft: bool) -> Result<FormValues, FieldErrors> {
        let mut errors = FieldErrors::default();
        let mut normalized = FormValues::new();

        for field in &self.fields {
            let fallback = match &field.default {
                Some(FieldDefault::Value(value)) => Some(value),
                _ => None,
            };
            let value = values
                .get(field.key)
                .filter(|value| !is_blank(value))
                .or(fallback);
            match value {
                None => {
                    if field.required && !draft {
                        errors.push(field.key, format!("{} is required", field.label));
                    }
                }
                Some(value) => match field.validator.validate(value) {
                    Ok(clean) => {
                        normalized.insert(field.key.to_string(), clean);
                    }
                    Err(err) => errors.push(field.key, err.message),
                },
            }
        }

        if errors.is_empty() {
            Ok(normalized)
        } else {
            Err(errors)
        }
    }
}

/// Null and whitespace-only strings count as "not filled in".
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(text) => text.trim().is_empty(),
        _ => false,
    }
}

fn number_from(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|number| number.is_finite())
}

fn integer_from(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64().or_else(|| {
            number
                .as_f64()
                .filter(|float| float.fract() == 0.0)
                .map(|float| float as i64)
        }),
        Value::String(text) => text.trim().parse::<i64>().ok(),
        _ => None,
    }
}

/// Rounds a positive amount to cents. Whole amounts become JSON integers; an
/// amount that rounds to zero is rejected.
fn normalize_amount(value: f64) -> Result<Value, ValidationError> {
    let cents = (value * 100.0).round();
    if !cents.is_finite() {
        return Err(ValidationError::new("Amount is too large"));
    }
    if cents <= 0.0 {
        return Err(ValidationError::new("Value must be greater than zero"));
    }
    let amount = cents / 100.0;
    if cents % 100.0 == 0.0 && amount < i64::MAX as f64 {
        Ok(Value::from(amount as i64))
    } else {
        Number::from_f64(amount)
            .map(Value::Number)
            .ok_or_else(|| ValidationError::new("Amount is too large"))
    }
}
