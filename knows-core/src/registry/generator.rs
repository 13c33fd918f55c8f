//! Closed set of value generators produced by the registry.

use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use fake::{
    Fake,
    faker::{
        address::en::{BuildingNumber, CityName, CountryName, StateAbbr, StreetName, ZipCode},
        company::en::{CompanyName, Profession},
        internet::en::{DomainSuffix, SafeEmail},
        lorem::en::{Sentence, Sentences, Word},
        name::en::{FirstName, LastName, Name},
        phone_number::en::PhoneNumber,
    },
};
use rand::Rng;

use crate::value::PropertyValue;

const COLOR_NAMES: [&str; 32] = [
    "AliceBlue",
    "Aqua",
    "Beige",
    "Black",
    "Blue",
    "Brown",
    "Chocolate",
    "Coral",
    "Crimson",
    "Cyan",
    "DarkGreen",
    "Fuchsia",
    "Gold",
    "Gray",
    "Green",
    "Indigo",
    "Ivory",
    "Khaki",
    "Lavender",
    "Lime",
    "Magenta",
    "Maroon",
    "Navy",
    "Olive",
    "Orange",
    "Orchid",
    "Pink",
    "Purple",
    "Red",
    "Silver",
    "Teal",
    "White",
];

const SECONDS_PER_DAY: u32 = 86_400;

/// Faker-backed textual kinds.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum FakeKind {
    /// One lorem word.
    Word,
    /// Full person name.
    Name,
    /// Given name.
    FirstName,
    /// Family name.
    LastName,
    /// Safe e-mail address.
    Email,
    /// Phone number.
    Phone,
    /// `number street, city, state zip`.
    Address,
    /// City name.
    City,
    /// Country name.
    Country,
    /// Company name.
    Company,
    /// Profession.
    Job,
    /// Lorem sentence.
    Sentence,
    /// Lorem paragraph.
    Paragraph,
    /// `https://www.<word>.<suffix>/`.
    Url,
    /// Colour name.
    Color,
}

impl FakeKind {
    fn generate<R: Rng + ?Sized>(self, rng: &mut R) -> String {
        match self {
            Self::Word => Word().fake_with_rng(rng),
            Self::Name => Name().fake_with_rng(rng),
            Self::FirstName => FirstName().fake_with_rng(rng),
            Self::LastName => LastName().fake_with_rng(rng),
            Self::Email => SafeEmail().fake_with_rng(rng),
            Self::Phone => PhoneNumber().fake_with_rng(rng),
            Self::Address => address(rng),
            Self::City => CityName().fake_with_rng(rng),
            Self::Country => CountryName().fake_with_rng(rng),
            Self::Company => CompanyName().fake_with_rng(rng),
            Self::Job => Profession().fake_with_rng(rng),
            Self::Sentence => Sentence(4..10).fake_with_rng(rng),
            Self::Paragraph => {
                let sentences: Vec<String> = Sentences(3..6).fake_with_rng(rng);
                sentences.join(" ")
            }
            Self::Url => {
                let host: String = Word().fake_with_rng(rng);
                let suffix: String = DomainSuffix().fake_with_rng(rng);
                format!("https://www.{}.{suffix}/", host.to_lowercase())
            }
            Self::Color => {
                let index = rng.gen_range(0..COLOR_NAMES.len());
                COLOR_NAMES.get(index).copied().unwrap_or("Black").to_owned()
            }
        }
    }
}

fn address<R: Rng + ?Sized>(rng: &mut R) -> String {
    let number: String = BuildingNumber().fake_with_rng(rng);
    let street: String = StreetName().fake_with_rng(rng);
    let city: String = CityName().fake_with_rng(rng);
    let state: String = StateAbbr().fake_with_rng(rng);
    let zip: String = ZipCode().fake_with_rng(rng);
    format!("{number} {street}, {city}, {state} {zip}")
}

/// A non-empty set of literal choices.
#[derive(Clone, Debug, PartialEq)]
pub struct ChoiceSet {
    first: PropertyValue,
    rest: Vec<PropertyValue>,
}

impl ChoiceSet {
    /// Builds a set from `values`, returning `None` when it is empty.
    #[must_use]
    pub fn new(values: Vec<PropertyValue>) -> Option<Self> {
        let mut iter = values.into_iter();
        let first = iter.next()?;
        Some(Self {
            first,
            rest: iter.collect(),
        })
    }

    /// Number of choices.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.rest.len() + 1
    }

    /// A choice set is never empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Iterates choices in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &PropertyValue> {
        std::iter::once(&self.first).chain(&self.rest)
    }

    fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> &PropertyValue {
        match rng.gen_range(0..self.len()).checked_sub(1) {
            None => &self.first,
            Some(index) => self.rest.get(index).unwrap_or(&self.first),
        }
    }
}

/// A fully resolved generator for one property.
///
/// Produced by [`crate::TypeRegistry::generator`] or by enum definitions;
/// generation never fails.
#[derive(Clone, Debug, PartialEq)]
pub enum ValueGenerator {
    /// Faker-backed text.
    Fake(FakeKind),
    /// Random UUID drawn from the value stream.
    Uuid,
    /// Whole sentences totalling at most `max_length` characters.
    Text {
        /// Longest string produced.
        max_length: usize,
    },
    /// Uniform integer in `[min, max]`.
    Integer {
        /// Inclusive lower bound.
        min: i64,
        /// Inclusive upper bound.
        max: i64,
    },
    /// Uniform float in `[min, max]` rounded to `precision` places.
    Float {
        /// Inclusive lower bound.
        min: f64,
        /// Inclusive upper bound.
        max: f64,
        /// Decimal places kept.
        precision: u32,
    },
    /// Fair coin.
    Boolean,
    /// Uniform calendar day in `[start, end]`.
    Date {
        /// First day.
        start: NaiveDate,
        /// Last day.
        end: NaiveDate,
    },
    /// Uniform second in `[start, end]`.
    DateTime {
        /// Earliest instant.
        start: NaiveDateTime,
        /// Latest instant.
        end: NaiveDateTime,
    },
    /// Uniform time of day.
    Time,
    /// Uniform pick from literal values.
    Choice(ChoiceSet),
}

impl ValueGenerator {
    /// Draws one value from `rng`.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> PropertyValue {
        match self {
            Self::Fake(kind) => PropertyValue::String(kind.generate(rng)),
            Self::Uuid => {
                let mut bytes = [0_u8; 16];
                rng.fill(&mut bytes);
                PropertyValue::String(
                    uuid::Builder::from_random_bytes(bytes)
                        .into_uuid()
                        .to_string(),
                )
            }
            Self::Text { max_length } => PropertyValue::String(text(rng, *max_length)),
            Self::Integer { min, max } => PropertyValue::Int(rng.gen_range(*min..=*max)),
            Self::Float {
                min,
                max,
                precision,
            } => PropertyValue::Float(float(rng, *min, *max, *precision)),
            Self::Boolean => PropertyValue::Bool(rng.gen_bool(0.5)),
            Self::Date { start, end } => {
                let span = u64::try_from((*end - *start).num_days()).unwrap_or(0);
                let day = start
                    .checked_add_days(Days::new(rng.gen_range(0..=span)))
                    .unwrap_or(*end);
                PropertyValue::String(day.format("%Y-%m-%d").to_string())
            }
            Self::DateTime { start, end } => {
                let span = (*end - *start).num_seconds().max(0);
                let instant = start
                    .checked_add_signed(TimeDelta::seconds(rng.gen_range(0..=span)))
                    .unwrap_or(*end);
                PropertyValue::String(instant.format("%Y-%m-%dT%H:%M:%S").to_string())
            }
            Self::Time => {
                let seconds = rng.gen_range(0..SECONDS_PER_DAY);
                let time = NaiveTime::from_num_seconds_from_midnight_opt(seconds, 0)
                    .unwrap_or(NaiveTime::MIN);
                PropertyValue::String(time.format("%H:%M:%S").to_string())
            }
            Self::Choice(choices) => choices.pick(rng).clone(),
        }
    }
}

#[expect(
    clippy::float_arithmetic,
    reason = "rounding to a fixed number of decimal places"
)]
fn float<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64, precision: u32) -> f64 {
    let raw = rng.gen_range(min..=max);
    let scale = 10_f64.powi(i32::try_from(precision).unwrap_or(i32::MAX));
    let scaled = raw * scale;
    // Magnitudes near f64::MAX already carry fewer decimals than requested.
    if !scaled.is_finite() {
        return raw;
    }
    (scaled.round() / scale).clamp(min, max)
}

/// Concatenates lorem sentences until the next one would overflow
/// `max_length`. When even the first sentence is too long it is cut on a
/// character boundary and closed with a full stop.
fn text<R: Rng + ?Sized>(rng: &mut R, max_length: usize) -> String {
    let mut out = String::new();
    loop {
        let sentence: String = Sentence(4..10).fake_with_rng(rng);
        let extra = usize::from(!out.is_empty());
        if out.chars().count() + extra + sentence.chars().count() > max_length {
            if out.is_empty() {
                out = sentence
                    .chars()
                    .take(max_length.saturating_sub(1))
                    .collect::<String>()
                    .trim_end()
                    .to_owned();
                out.push('.');
            }
            return out;
        }
        if extra == 1 {
            out.push(' ');
        }
        out.push_str(&sentence);
    }
}
