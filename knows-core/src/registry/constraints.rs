//! Constraint parsing and validation for registry types.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use super::{FakeKind, PropertyType, ValueGenerator};
use crate::error::RegistryError;

/// Smallest `maxLength` accepted for `Text`.
pub(crate) const MIN_TEXT_LENGTH: usize = 5;
const DEFAULT_TEXT_LENGTH: usize = 200;
const MAX_PRECISION: u32 = 15;

pub(crate) const fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(value) => value,
        None => panic!("calendar constant out of range"),
    }
}

const fn date_time(day: NaiveDate, hour: u32, minute: u32, second: u32) -> NaiveDateTime {
    match NaiveTime::from_hms_opt(hour, minute, second) {
        Some(time) => NaiveDateTime::new(day, time),
        None => panic!("clock constant out of range"),
    }
}

const DATE_START: NaiveDate = date(1970, 1, 1);
const DATE_END: NaiveDate = date(2025, 12, 31);
const DATE_TIME_START: NaiveDateTime = date_time(date(1995, 1, 1), 0, 0, 0);
const DATE_TIME_END: NaiveDateTime = date_time(date(2025, 12, 31), 23, 59, 59);

/// A `min`/`max` bound as written in a schema.
#[derive(Clone, Debug, PartialEq)]
pub enum Bound {
    /// Integral JSON number.
    Integer(i64),
    /// Non-integral JSON number.
    Float(f64),
    /// ISO date or datetime string.
    Text(String),
}

impl From<i64> for Bound {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for Bound {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Bound {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

/// Optional generation constraints.
///
/// Only the fields relevant to the resolved type are consulted; the rest are
/// ignored.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Constraints {
    /// Inclusive lower bound.
    pub min: Option<Bound>,
    /// Inclusive upper bound.
    pub max: Option<Bound>,
    /// Decimal places kept by float kinds.
    pub precision: Option<u32>,
    /// Longest string produced by `Text`.
    pub max_length: Option<usize>,
}

impl Constraints {
    /// Constraints with both bounds set.
    #[must_use]
    pub fn range(min: impl Into<Bound>, max: impl Into<Bound>) -> Self {
        Self {
            min: Some(min.into()),
            max: Some(max.into()),
            ..Self::default()
        }
    }

    /// Sets the float precision.
    #[must_use]
    pub const fn with_precision(mut self, precision: u32) -> Self {
        self.precision = Some(precision);
        self
    }

    /// Sets the text length limit.
    #[must_use]
    pub const fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    pub(super) fn resolve(&self, kind: PropertyType) -> Result<ValueGenerator, RegistryError> {
        let generator = match kind {
            PropertyType::String => ValueGenerator::Fake(FakeKind::Word),
            PropertyType::Name | PropertyType::FullName => ValueGenerator::Fake(FakeKind::Name),
            PropertyType::FirstName => ValueGenerator::Fake(FakeKind::FirstName),
            PropertyType::LastName => ValueGenerator::Fake(FakeKind::LastName),
            PropertyType::Email => ValueGenerator::Fake(FakeKind::Email),
            PropertyType::Phone => ValueGenerator::Fake(FakeKind::Phone),
            PropertyType::Address => ValueGenerator::Fake(FakeKind::Address),
            PropertyType::City => ValueGenerator::Fake(FakeKind::City),
            PropertyType::Country => ValueGenerator::Fake(FakeKind::Country),
            PropertyType::Company => ValueGenerator::Fake(FakeKind::Company),
            PropertyType::Job => ValueGenerator::Fake(FakeKind::Job),
            PropertyType::Sentence => ValueGenerator::Fake(FakeKind::Sentence),
            PropertyType::Paragraph => ValueGenerator::Fake(FakeKind::Paragraph),
            PropertyType::Url => ValueGenerator::Fake(FakeKind::Url),
            PropertyType::Color => ValueGenerator::Fake(FakeKind::Color),
            PropertyType::Uuid => ValueGenerator::Uuid,
            PropertyType::Text => self.text(kind)?,
            PropertyType::Int | PropertyType::Integer => self.integer(kind, 0, 10_000)?,
            PropertyType::Year => self.integer(kind, 1950, 2025)?,
            PropertyType::Float => self.float(kind, 2)?,
            PropertyType::Double => self.float(kind, 4)?,
            PropertyType::Boolean | PropertyType::Bool => ValueGenerator::Boolean,
            PropertyType::Date => self.date(kind)?,
            PropertyType::DateTime => self.date_time(kind)?,
            PropertyType::Time => ValueGenerator::Time,
        };
        Ok(generator)
    }

    fn text(&self, kind: PropertyType) -> Result<ValueGenerator, RegistryError> {
        let max_length = self.max_length.unwrap_or(DEFAULT_TEXT_LENGTH);
        if max_length < MIN_TEXT_LENGTH {
            return Err(invalid(
                kind,
                format!("maxLength must be at least {MIN_TEXT_LENGTH} (got {max_length})"),
            ));
        }
        Ok(ValueGenerator::Text { max_length })
    }

    fn integer(
        &self,
        kind: PropertyType,
        default_min: i64,
        default_max: i64,
    ) -> Result<ValueGenerator, RegistryError> {
        let min = integer_bound(kind, "min", self.min.as_ref())?.unwrap_or(default_min);
        let max = integer_bound(kind, "max", self.max.as_ref())?.unwrap_or(default_max);
        if min > max {
            return Err(invalid(kind, format!("min ({min}) exceeds max ({max})")));
        }
        Ok(ValueGenerator::Integer { min, max })
    }

    fn float(&self, kind: PropertyType, default_precision: u32) -> Result<ValueGenerator, RegistryError> {
        let min = float_bound(kind, "min", self.min.as_ref())?.unwrap_or(0.0);
        let max = float_bound(kind, "max", self.max.as_ref())?.unwrap_or(1000.0);
        if min > max {
            return Err(invalid(kind, format!("min ({min}) exceeds max ({max})")));
        }
        if !span_is_finite(min, max) {
            return Err(invalid(kind, format!("range {min}..{max} is too wide")));
        }
        let precision = self.precision.unwrap_or(default_precision);
        if precision > MAX_PRECISION {
            return Err(invalid(
                kind,
                format!("precision must be at most {MAX_PRECISION} (got {precision})"),
            ));
        }
        Ok(ValueGenerator::Float {
            min,
            max,
            precision,
        })
    }

    fn date(&self, kind: PropertyType) -> Result<ValueGenerator, RegistryError> {
        let start = text_bound(kind, "min", self.min.as_ref(), parse_date)?.unwrap_or(DATE_START);
        let end = text_bound(kind, "max", self.max.as_ref(), parse_date)?.unwrap_or(DATE_END);
        if start > end {
            return Err(invalid(kind, format!("min ({start}) is after max ({end})")));
        }
        Ok(ValueGenerator::Date { start, end })
    }

    fn date_time(&self, kind: PropertyType) -> Result<ValueGenerator, RegistryError> {
        let start = text_bound(kind, "min", self.min.as_ref(), parse_date_time)?
            .unwrap_or(DATE_TIME_START);
        let end =
            text_bound(kind, "max", self.max.as_ref(), parse_date_time)?.unwrap_or(DATE_TIME_END);
        if start > end {
            return Err(invalid(kind, format!("min ({start}) is after max ({end})")));
        }
        Ok(ValueGenerator::DateTime { start, end })
    }
}

fn invalid(kind: PropertyType, message: String) -> RegistryError {
    RegistryError::InvalidConstraint {
        type_name: kind.name(),
        message,
    }
}

#[expect(clippy::float_arithmetic, reason = "uniform sampling needs a finite width")]
fn span_is_finite(min: f64, max: f64) -> bool {
    (max - min).is_finite()
}

fn integer_bound(
    kind: PropertyType,
    field: &str,
    bound: Option<&Bound>,
) -> Result<Option<i64>, RegistryError> {
    match bound {
        None => Ok(None),
        Some(Bound::Integer(value)) => Ok(Some(*value)),
        Some(other) => Err(invalid(
            kind,
            format!("{field} must be an integer (got {other:?})"),
        )),
    }
}

#[expect(
    clippy::cast_precision_loss,
    reason = "integral bounds on float kinds are widened deliberately"
)]
fn float_bound(
    kind: PropertyType,
    field: &str,
    bound: Option<&Bound>,
) -> Result<Option<f64>, RegistryError> {
    match bound {
        None => Ok(None),
        Some(Bound::Integer(value)) => Ok(Some(*value as f64)),
        Some(Bound::Float(value)) if value.is_finite() => Ok(Some(*value)),
        Some(other) => Err(invalid(
            kind,
            format!("{field} must be a finite number (got {other:?})"),
        )),
    }
}

fn text_bound<T>(
    kind: PropertyType,
    field: &str,
    bound: Option<&Bound>,
    parse: fn(&str) -> Option<T>,
) -> Result<Option<T>, RegistryError> {
    match bound {
        None => Ok(None),
        Some(Bound::Text(text)) => parse(text).map(Some).ok_or_else(|| {
            invalid(kind, format!("{field} is not a valid ISO value: '{text}'"))
        }),
        Some(other) => Err(invalid(
            kind,
            format!("{field} must be an ISO string (got {other:?})"),
        )),
    }
}

fn parse_date(text: &str) -> Option<NaiveDate> {
    text.parse().ok()
}

fn parse_date_time(text: &str) -> Option<NaiveDateTime> {
    text.parse::<NaiveDateTime>()
        .ok()
        .or_else(|| parse_date(text).map(|day| day.and_time(NaiveTime::MIN)))
}
