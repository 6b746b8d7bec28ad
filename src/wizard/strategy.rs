//! Per-mode form strategies: which fields a mode collects, how they are
//! validated, and what a freshly opened form starts with.

use std::sync::Arc;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use serde_json::Value;

use crate::domain::{Frequency, TransactionMode, TransactionType, Visibility};
use crate::wizard::forms::{
    FieldDescriptor, FieldErrors, FieldKind, FormDescriptor, FormValues, Validator, DATE_FORMAT,
};

pub const MIN_INSTALLMENTS: i64 = 2;
pub const MAX_INSTALLMENTS: i64 = 99;
pub const MIN_INTERVAL: i64 = 1;
pub const MAX_INTERVAL: i64 = 99;
const DESCRIPTION_MAX_LEN: usize = 255;

/// Schema plus defaults for one transaction mode.
pub trait FormStrategy: Send + Sync {
    fn mode(&self) -> TransactionMode;

    fn descriptor(&self) -> &FormDescriptor;

    /// Initial values for a new form, seeded with the chosen type and `today`.
    fn default_values(&self, kind: TransactionType, today: NaiveDate) -> FormValues;

    /// Full validation of submitted values.
    fn validate(&self, values: &FormValues) -> Result<FormValues, FieldErrors> {
        self.descriptor().validate(values)
    }
}

pub struct SimpleStrategy;
pub struct InstallmentStrategy;
pub struct RecurringStrategy;

static SIMPLE: SimpleStrategy = SimpleStrategy;
static INSTALLMENT: InstallmentStrategy = InstallmentStrategy;
static RECURRING: RecurringStrategy = RecurringStrategy;

/// Resolves the strategy governing `mode`.
pub fn strategy_for(mode: TransactionMode) -> &'static dyn FormStrategy {
    match mode {
        TransactionMode::Simple => &SIMPLE,
        TransactionMode::Installment => &INSTALLMENT,
        TransactionMode::Recurring => &RECURRING,
    }
}

/// Resolves a strategy from a raw mode name; unknown names get the simple form.
pub fn strategy_for_name(name: &str) -> &'static dyn FormStrategy {
    match name.parse::<TransactionMode>() {
        Ok(mode) => strategy_for(mode),
        Err(reason) => {
            tracing::warn!(%reason, "falling back to the simple transaction form");
            &SIMPLE
        }
    }
}

fn make_description_validator(max_len: usize) -> Validator {
    Validator::Custom(Arc::new(move |input| {
        let text = input.as_str().ok_or("Description must be text")?.trim();
        if text.chars().count() > max_len {
            Err(format!(
                "Description cannot exceed {} characters (got {})",
                max_len,
                text.chars().count()
            ))
        } else {
            Ok(Value::String(text.to_string()))
        }
    }))
}

fn type_options() -> Vec<&'static str> {
    TransactionType::ALL.iter().map(|kind| kind.as_str()).collect()
}

fn visibility_options() -> Vec<&'static str> {
    Visibility::ALL.iter().map(|visibility| visibility.as_str()).collect()
}

fn frequency_options() -> Vec<&'static str> {
    Frequency::ALL.iter().map(|frequency| frequency.as_str()).collect()
}

fn common_fields() -> Vec<FieldDescriptor> {
    vec![
        FieldDescriptor::new(
            "type",
            "Transaction type",
            FieldKind::Choice(type_options()),
            Validator::OneOf(type_options()),
        ),
        FieldDescriptor::new("account_id", "Account", FieldKind::Text, Validator::NonEmpty),
        FieldDescriptor::new("category_id", "Category", FieldKind::Text, Validator::NonEmpty)
            .with_optional(),
        FieldDescriptor::new(
            "description",
            "Description",
            FieldKind::Text,
            make_description_validator(DESCRIPTION_MAX_LEN),
        )
        .with_optional(),
        FieldDescriptor::new(
            "is_free_spending",
            "Free spending",
            FieldKind::Boolean,
            Validator::Boolean,
        )
        .with_optional()
        .with_default(Value::Bool(false))
        .with_help("Personal discretionary spending, kept out of the shared budget."),
        FieldDescriptor::new(
            "visibility",
            "Visibility",
            FieldKind::Choice(visibility_options()),
            Validator::OneOf(visibility_options()),
        )
        .with_optional()
        .with_default(Value::from(Visibility::Shared.as_str())),
    ]
}

fn common_defaults(kind: TransactionType) -> FormValues {
    let mut values = FormValues::new();
    values.insert("type".into(), Value::from(kind.as_str()));
    values.insert("account_id".into(), Value::from(""));
    values.insert("category_id".into(), Value::from(""));
    values.insert("description".into(), Value::from(""));
    values.insert("is_free_spending".into(), Value::Bool(false));
    values.insert("visibility".into(), Value::from(Visibility::Shared.as_str()));
    values
}

fn date_value(date: NaiveDate) -> Value {
    Value::String(date.format(DATE_FORMAT).to_string())
}

static SIMPLE_FORM: Lazy<FormDescriptor> = Lazy::new(|| {
    let mut fields = common_fields();
    fields.push(FieldDescriptor::new(
        "amount",
        "Amount",
        FieldKind::Decimal,
        Validator::PositiveNumber,
    ));
    fields.push(
        FieldDescriptor::new(
            "transaction_date",
            "Date (YYYY-MM-DD)",
            FieldKind::Date,
            Validator::Date,
        )
        .with_optional()
        .with_default_today(),
    );
    FormDescriptor::new("simple", fields)
});

static INSTALLMENT_FORM: Lazy<FormDescriptor> = Lazy::new(|| {
    let mut fields = common_fields();
    fields.push(FieldDescriptor::new(
        "total_amount",
        "Total amount",
        FieldKind::Decimal,
        Validator::PositiveNumber,
    ));
    fields.push(
        FieldDescriptor::new(
            "total_installments",
            "Number of installments",
            FieldKind::Integer,
            Validator::IntegerRange {
                min: MIN_INSTALLMENTS,
                max: MAX_INSTALLMENTS,
            },
        )
        .with_help("The total is split into equal monthly parcels."),
    );
    fields.push(
        FieldDescriptor::new(
            "first_installment_date",
            "First installment (YYYY-MM-DD)",
            FieldKind::Date,
            Validator::Date,
        )
        .with_optional()
        .with_default_today(),
    );
    FormDescriptor::new("installment", fields)
});

static RECURRING_FORM: Lazy<FormDescriptor> = Lazy::new(|| {
    let mut fields = common_fields();
    fields.extend([
        FieldDescriptor::new(
            "amount",
            "Amount",
            FieldKind::Decimal,
            Validator::PositiveNumber,
        ),
        FieldDescriptor::new(
            "frequency",
            "Frequency",
            FieldKind::Choice(frequency_options()),
            Validator::OneOf(frequency_options()),
        ),
        FieldDescriptor::new(
            "interval",
            "Repeat every",
            FieldKind::Integer,
            Validator::IntegerRange {
                min: MIN_INTERVAL,
                max: MAX_INTERVAL,
            },
        )
        .with_optional()
        .with_default(Value::from(MIN_INTERVAL))
        .with_help("Number of frequency units between occurrences."),
        FieldDescriptor::new(
            "start_date",
            "Start date (YYYY-MM-DD)",
            FieldKind::Date,
            Validator::Date,
        ),
        FieldDescriptor::new(
            "end_date",
            "End date (YYYY-MM-DD)",
            FieldKind::Date,
            Validator::Date,
        )
        .with_optional(),
        FieldDescriptor::new(
            "has_end_date",
            "Has end date",
            FieldKind::Boolean,
            Validator::Boolean,
        )
        .with_optional()
        .with_default(Value::Bool(false))
        .with_client_only(),
        FieldDescriptor::new(
            "create_first_transaction",
            "Create first occurrence now",
            FieldKind::Boolean,
            Validator::Boolean,
        )
        .with_optional()
        .with_default(Value::Bool(true)),
    ]);
    FormDescriptor::new("recurring", fields)
});

impl FormStrategy for SimpleStrategy {
    fn mode(&self) -> TransactionMode {
        TransactionMode::Simple
    }

    fn descriptor(&self) -> &FormDescriptor {
        &SIMPLE_FORM
    }

    fn default_values(&self, kind: TransactionType, today: NaiveDate) -> FormValues {
        let mut values = common_defaults(kind);
        values.insert("amount".into(), Value::Null);
        values.insert("transaction_date".into(), date_value(today));
        values
    }
}

impl FormStrategy for InstallmentStrategy {
    fn mode(&self) -> TransactionMode {
        TransactionMode::Installment
    }

    fn descriptor(&self) -> &FormDescriptor {
        &INSTALLMENT_FORM
    }

    fn default_values(&self, kind: TransactionType, today: NaiveDate) -> FormValues {
        let mut values = common_defaults(kind);
        values.insert("total_amount".into(), Value::Null);
        values.insert("total_installments".into(), Value::from(MIN_INSTALLMENTS));
        values.insert("first_installment_date".into(), date_value(today));
        values
    }
}

impl FormStrategy for RecurringStrategy {
    fn mode(&self) -> TransactionMode {
        TransactionMode::Recurring
    }

    fn descriptor(&self) -> &FormDescriptor {
        &RECURRING_FORM
    }

    fn default_values(&self, kind: TransactionType, today: NaiveDate) -> FormValues {
        let mut values = common_defaults(kind);
        values.insert("amount".into(), Value::Null);
        values.insert("frequency".into(), Value::from(Frequency::Monthly.as_str()));
        values.insert("interval".into(), Value::from(MIN_INTERVAL));
        values.insert("start_date".into(), date_value(today));
        values.insert("end_date".into(), Value::from(""));
        values.insert("has_end_date".into(), Value::Bool(false));
        values.insert("create_first_transaction".into(), Value::Bool(true));
        values
    }

    fn validate(&self, values: &FormValues) -> Result<FormValues, FieldErrors> {
        let clean = self.descriptor().validate(values)?;
        let bounded = clean.get("has_end_date").and_then(Value::as_bool) == Some(true);
        let start = clean.get("start_date").and_then(Value::as_str);
        let end = clean.get("end_date").and_then(Value::as_str);
        if let (true, Some(start), Some(end)) = (bounded, start, end) {
            // ISO dates order lexicographically.
            if end < start {
                let mut errors = FieldErrors::default();
                errors.push("end_date", "End date must be on or after the start date");
                return Err(errors);
            }
        }
        Ok(clean)
    }
}
