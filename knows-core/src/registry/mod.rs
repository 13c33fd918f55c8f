//! Property type registry.
//!
//! Maps symbolic type names such as `FirstName` or `Date` to
//! [`ValueGenerator`]s. Names are case-sensitive; a small alias table accepts
//! the upper-case spellings used by other graph tooling (`INT64`, `BOOL`, ...).

mod constraints;
mod generator;

use std::{collections::BTreeMap, sync::OnceLock};

use rand::Rng;

pub use self::{
    constraints::{Bound, Constraints},
    generator::{ChoiceSet, FakeKind, ValueGenerator},
};
pub(crate) use self::constraints::date;
use crate::{error::RegistryError, value::PropertyValue};

/// Canonical property types understood by the registry.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum PropertyType {
    /// One lorem word.
    String,
    /// Full person name.
    Name,
    /// Given name.
    FirstName,
    /// Family name.
    LastName,
    /// Full person name.
    FullName,
    /// Safe e-mail address.
    Email,
    /// Phone number.
    Phone,
    /// Single-line postal address.
    Address,
    /// City name.
    City,
    /// Country name.
    Country,
    /// Company name.
    Company,
    /// Job title.
    Job,
    /// Sentences bounded by `maxLength`.
    Text,
    /// Lorem sentence.
    Sentence,
    /// Lorem paragraph.
    Paragraph,
    /// Web address.
    Url,
    /// Colour name.
    Color,
    /// Random UUID.
    Uuid,
    /// Bounded integer.
    Int,
    /// Bounded integer.
    Integer,
    /// Bounded float, two decimal places by default.
    Float,
    /// Bounded float, four decimal places by default.
    Double,
    /// Fair coin.
    Boolean,
    /// Fair coin.
    Bool,
    /// ISO date.
    Date,
    /// ISO datetime without offset.
    DateTime,
    /// Time of day.
    Time,
    /// Calendar year.
    Year,
}

impl PropertyType {
    /// Every canonical type in declaration order.
    pub const ALL: [Self; 28] = [
        Self::String,
        Self::Name,
        Self::FirstName,
        Self::LastName,
        Self::FullName,
        Self::Email,
        Self::Phone,
        Self::Address,
        Self::City,
        Self::Country,
        Self::Company,
        Self::Job,
        Self::Text,
        Self::Sentence,
        Self::Paragraph,
        Self::Url,
        Self::Color,
        Self::Uuid,
        Self::Int,
        Self::Integer,
        Self::Float,
        Self::Double,
        Self::Boolean,
        Self::Bool,
        Self::Date,
        Self::DateTime,
        Self::Time,
        Self::Year,
    ];

    /// Canonical spelling of the type.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::String => "String",
            Self::Name => "Name",
            Self::FirstName => "FirstName",
            Self::LastName => "LastName",
            Self::FullName => "FullName",
            Self::Email => "Email",
            Self::Phone => "Phone",
            Self::Address => "Address",
            Self::City => "City",
            Self::Country => "Country",
            Self::Company => "Company",
            Self::Job => "Job",
            Self::Text => "Text",
            Self::Sentence => "Sentence",
            Self::Paragraph => "Paragraph",
            Self::Url => "Url",
            Self::Color => "Color",
            Self::Uuid => "Uuid",
            Self::Int => "Int",
            Self::Integer => "Integer",
            Self::Float => "Float",
            Self::Double => "Double",
            Self::Boolean => "Boolean",
            Self::Bool => "Bool",
            Self::Date => "Date",
            Self::DateTime => "DateTime",
            Self::Time => "Time",
            Self::Year => "Year",
        }
    }
}

/// Upper-case alias → canonical name.
const ALIASES: [(&str, PropertyType); 10] = [
    ("STRING", PropertyType::String),
    ("INTEGER", PropertyType::Int),
    ("INT64", PropertyType::Int),
    ("UINT64", PropertyType::Int),
    ("FLOAT64", PropertyType::Float),
    ("BOOLEAN", PropertyType::Boolean),
    ("BOOL", PropertyType::Bool),
    ("DATE", PropertyType::Date),
    ("DATETIME", PropertyType::DateTime),
    ("ZONED DATETIME", PropertyType::DateTime),
];

/// Immutable lookup table from type names to [`PropertyType`]s.
///
/// Build it once with [`TypeRegistry::new`] or borrow the process-wide
/// instance from [`TypeRegistry::standard`].
///
/// # Examples
/// ```
/// use knows_core::{Constraints, PropertyType, TypeRegistry};
///
/// let registry = TypeRegistry::standard();
/// assert_eq!(registry.resolve("INT64").unwrap(), PropertyType::Int);
/// assert!(registry.generator("Year", &Constraints::default()).is_ok());
/// ```
#[derive(Clone, Debug)]
pub struct TypeRegistry {
    types: BTreeMap<&'static str, PropertyType>,
    aliases: BTreeMap<&'static str, PropertyType>,
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    /// Builds a registry holding every canonical type and alias.
    #[must_use]
    pub fn new() -> Self {
        Self {
            types: PropertyType::ALL
                .into_iter()
                .map(|kind| (kind.name(), kind))
                .collect(),
            aliases: ALIASES.into_iter().collect(),
        }
    }

    /// Returns the shared standard registry.
    #[must_use]
    pub fn standard() -> &'static Self {
        static STANDARD: OnceLock<TypeRegistry> = OnceLock::new();
        STANDARD.get_or_init(Self::new)
    }

    /// Canonical type names in lexicographic order.
    pub fn available_types(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.types.keys().copied()
    }

    /// Resolves `type_name`, consulting the alias table with the upper-cased
    /// name before falling back to the verbatim spelling.
    ///
    /// # Errors
    /// Returns [`RegistryError::UnknownType`] when neither lookup succeeds.
    pub fn resolve(&self, type_name: &str) -> Result<PropertyType, RegistryError> {
        let upper = type_name.to_uppercase();
        self.aliases
            .get(upper.as_str())
            .or_else(|| self.types.get(type_name))
            .copied()
            .ok_or_else(|| RegistryError::UnknownType {
                name: type_name.to_owned(),
                available: self.available_types().collect::<Vec<_>>().join(", "),
            })
    }

    /// Resolves `type_name` and its constraints into a reusable generator.
    ///
    /// # Errors
    /// Returns [`RegistryError::UnknownType`] for unknown names and
    /// [`RegistryError::InvalidConstraint`] when a constraint does not fit
    /// the resolved type.
    pub fn generator(
        &self,
        type_name: &str,
        constraints: &Constraints,
    ) -> Result<ValueGenerator, RegistryError> {
        let kind = self.resolve(type_name)?;
        constraints.resolve(kind)
    }

    /// Generates a single value for `type_name`.
    ///
    /// # Errors
    /// Propagates the resolution errors of [`TypeRegistry::generator`].
    pub fn generate<R: Rng + ?Sized>(
        &self,
        type_name: &str,
        rng: &mut R,
        constraints: &Constraints,
    ) -> Result<PropertyValue, RegistryError> {
        Ok(self.generator(type_name, constraints)?.generate(rng))
    }
}
