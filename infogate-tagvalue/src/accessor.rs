/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Typed field access over a tag-value scope.
//!
//! A [`Scope`] is a window of fields (a message body or one group instance)
//! together with the directory and the layout that declares which members
//! are required. Every typed read goes through [`Scope::lookup`], which
//! applies, in order:
//!
//! 1. the tag must have a directory entry, else `UndefinedTag`;
//! 2. the requested type must match the declared one (strings may be read
//!    from any field), else `IncorrectDataFormat`;
//! 3. the tag may occur at most once outside the scope's repeating groups,
//!    else `TagAppearsMoreThanOnce`;
//! 4. a present value is coerced strictly, else `IncorrectDataFormat`;
//! 5. an absent required member is `FieldNotFound`; an absent optional one
//!    yields the field's zero if its policy is `Zero`, and `None` otherwise.
//!
//! The zero of a field is the wire text of its declared type (`""` or `0`),
//! coerced like a sent value, so the outcome of step 5 depends on the field
//! definition only and never on the type it is read as. The `get_*` family
//! applies the same rules; [`Scope::require`] is the one read that turns an
//! absent optional value into `FieldNotFound`.

use crate::group::{GroupInstance, extract_groups, group_span};
use chrono::NaiveDate;
use infogate_core::error::MessageRejectError;
use infogate_core::field::{FieldRef, FieldValue};
use infogate_core::message::RawMessage;
use infogate_core::store::FieldSlice;
use infogate_core::types::MarketTime;
use infogate_dictionary::{DefaultPolicy, Directory, FieldDef, Layout, MessageDef, SemanticType};
use rust_decimal::Decimal;
use smallvec::SmallVec;
use std::ops::Range;

/// A Rust type a field can be coerced to.
pub trait FromField<'s>: Sized {
    /// Semantic type the field must be declared with.
    const SEMANTIC: SemanticType;

    /// Coerces the raw field.
    ///
    /// # Errors
    /// Returns `IncorrectDataFormat` if the bytes do not have the wire shape
    /// of the type.
    fn from_field(field: FieldRef<'s>) -> Result<Self, MessageRejectError>;
}

impl<'s> FromField<'s> for &'s str {
    const SEMANTIC: SemanticType = SemanticType::String;

    fn from_field(field: FieldRef<'s>) -> Result<Self, MessageRejectError> {
        field.as_str()
    }
}

impl FromField<'_> for i64 {
    const SEMANTIC: SemanticType = SemanticType::Int;

    fn from_field(field: FieldRef<'_>) -> Result<Self, MessageRejectError> {
        field.as_int()
    }
}

impl FromField<'_> for Decimal {
    const SEMANTIC: SemanticType = SemanticType::Decimal;

    fn from_field(field: FieldRef<'_>) -> Result<Self, MessageRejectError> {
        field.as_decimal()
    }
}

impl FromField<'_> for NaiveDate {
    const SEMANTIC: SemanticType = SemanticType::Date;

    fn from_field(field: FieldRef<'_>) -> Result<Self, MessageRejectError> {
        field.as_date()
    }
}

impl FromField<'_> for MarketTime {
    const SEMANTIC: SemanticType = SemanticType::Time;

    fn from_field(field: FieldRef<'_>) -> Result<Self, MessageRejectError> {
        field.as_time()
    }
}

impl FromField<'_> for char {
    const SEMANTIC: SemanticType = SemanticType::Char;

    fn from_field(field: FieldRef<'_>) -> Result<Self, MessageRejectError> {
        field.as_char()
    }
}

/// Fields readable through one layout.
#[derive(Debug, Clone, Copy)]
pub struct Scope<'s> {
    fields: FieldSlice<'s>,
    directory: &'s Directory,
    layout: Layout<'s>,
}

impl<'s> Scope<'s> {
    /// Creates a scope.
    ///
    /// # Arguments
    /// * `fields` - The fields visible to the scope
    /// * `directory` - The field directory
    /// * `layout` - Members declared for the scope
    #[inline]
    #[must_use]
    pub const fn new(fields: FieldSlice<'s>, directory: &'s Directory, layout: Layout<'s>) -> Self {
        Self {
            fields,
            directory,
            layout,
        }
    }

    /// Creates a scope over a message body using the message layout.
    #[must_use]
    pub fn for_message(
        raw: &'s RawMessage<'_>,
        directory: &'s Directory,
        definition: &'s MessageDef,
    ) -> Self {
        Self::new(raw.body(), directory, definition.layout())
    }

    /// Returns the fields visible to the scope.
    #[inline]
    #[must_use]
    pub const fn fields(&self) -> FieldSlice<'s> {
        self.fields
    }

    /// Returns the field directory.
    #[inline]
    #[must_use]
    pub const fn directory(&self) -> &'s Directory {
        self.directory
    }

    /// Returns the declared members.
    #[inline]
    #[must_use]
    pub const fn layout(&self) -> Layout<'s> {
        self.layout
    }

    /// Reads `tag` as `T`, applying the absent-field policy.
    ///
    /// # Returns
    /// `Some(value)` when present, or the zero value for an absent optional
    /// field with the `Zero` policy, `None` for other absent optional fields.
    ///
    /// # Errors
    /// `UndefinedTag`, `IncorrectDataFormat`, `TagAppearsMoreThanOnce` or
    /// `FieldNotFound`, as described in the module docs.
    pub fn lookup<T: FromField<'s>>(&self, tag: u32) -> Result<Option<T>, MessageRejectError> {
        let def = self.definition(tag)?;
        if T::SEMANTIC != SemanticType::String && T::SEMANTIC != def.semantic_type {
            return Err(MessageRejectError::incorrect_format(
                tag,
                format!(
                    "{} is declared {}, read as {}",
                    def.name,
                    def.semantic_type,
                    T::SEMANTIC
                ),
            ));
        }

        match self.single(tag)? {
            Some(field) => T::from_field(field).map(Some),
            None if self.layout.is_required(tag) => Err(MessageRejectError::FieldNotFound { tag }),
            None => match (def.default, def.semantic_type.zero_text()) {
                (DefaultPolicy::Zero, Some(zero)) => {
                    T::from_field(FieldRef::new(tag, zero.as_bytes())).map(Some)
                }
                _ => Ok(None),
            },
        }
    }

    /// Reads `tag` as `T` for callers that cannot proceed without a value.
    ///
    /// # Errors
    /// As [`lookup`](Self::lookup), plus `FieldNotFound` when an absent
    /// optional field has no default.
    pub fn require<T: FromField<'s>>(&self, tag: u32) -> Result<T, MessageRejectError> {
        self.lookup(tag)?
            .ok_or(MessageRejectError::FieldNotFound { tag })
    }

    /// Reads `tag` as its declared semantic type.
    ///
    /// # Errors
    /// As [`lookup`](Self::lookup).
    pub fn get(&self, tag: u32) -> Result<Option<FieldValue<'s>>, MessageRejectError> {
        Ok(match self.definition(tag)?.semantic_type {
            SemanticType::String => self.lookup::<&str>(tag)?.map(FieldValue::Str),
            SemanticType::Int => self.lookup::<i64>(tag)?.map(FieldValue::Int),
            SemanticType::Decimal => self.lookup::<Decimal>(tag)?.map(FieldValue::Decimal),
            SemanticType::Date => self.lookup::<NaiveDate>(tag)?.map(FieldValue::Date),
            SemanticType::Time => self.lookup::<MarketTime>(tag)?.map(FieldValue::Time),
            SemanticType::Char => self.lookup::<char>(tag)?.map(FieldValue::Char),
        })
    }

    /// Reads `tag` as text. Any declared type may be read this way.
    ///
    /// # Errors
    /// As [`lookup`](Self::lookup).
    pub fn get_string(&self, tag: u32) -> Result<Option<&'s str>, MessageRejectError> {
        self.lookup(tag)
    }

    /// Reads `tag` as an integer.
    ///
    /// # Errors
    /// As [`lookup`](Self::lookup).
    pub fn get_int(&self, tag: u32) -> Result<Option<i64>, MessageRejectError> {
        self.lookup(tag)
    }

    /// Reads `tag` as an exact decimal.
    ///
    /// # Errors
    /// As [`lookup`](Self::lookup).
    pub fn get_decimal(&self, tag: u32) -> Result<Option<Decimal>, MessageRejectError> {
        self.lookup(tag)
    }

    /// Reads `tag` as a date.
    ///
    /// # Errors
    /// As [`lookup`](Self::lookup).
    pub fn get_date(&self, tag: u32) -> Result<Option<NaiveDate>, MessageRejectError> {
        self.lookup(tag)
    }

    /// Reads `tag` as a time of day.
    ///
    /// # Errors
    /// As [`lookup`](Self::lookup).
    pub fn get_time(&self, tag: u32) -> Result<Option<MarketTime>, MessageRejectError> {
        self.lookup(tag)
    }

    /// Reads `tag` as a single character.
    ///
    /// # Errors
    /// As [`lookup`](Self::lookup).
    pub fn get_char(&self, tag: u32) -> Result<Option<char>, MessageRejectError> {
        self.lookup(tag)
    }

    /// Returns the instances of the repeating group opened by `count_tag`.
    ///
    /// # Errors
    /// `UndefinedTag` if no group is defined for `count_tag`, otherwise the
    /// errors of [`extract_groups`].
    pub fn groups(&self, count_tag: u32) -> Result<Vec<GroupInstance<'s>>, MessageRejectError> {
        let def = self
            .directory
            .group(count_tag)
            .ok_or(MessageRejectError::UndefinedTag { tag: count_tag })?;
        extract_groups(self, def)
    }

    /// Validates every declared member eagerly.
    ///
    /// Required members must be present, every present member must coerce,
    /// and every group must match its count, recursively.
    ///
    /// # Errors
    /// The first error found, in layout order.
    pub fn check_required(&self) -> Result<(), MessageRejectError> {
        for member in self.layout.fields {
            self.get(member.tag)?;
        }
        for member in self.layout.groups {
            for instance in self.groups(member.tag)? {
                instance.check_required()?;
            }
        }
        Ok(())
    }

    fn definition(&self, tag: u32) -> Result<&'s FieldDef, MessageRejectError> {
        self.directory
            .field(tag)
            .ok_or(MessageRejectError::UndefinedTag { tag })
    }

    /// Returns the only occurrence of `tag` outside this scope's groups.
    fn single(&self, tag: u32) -> Result<Option<FieldRef<'s>>, MessageRejectError> {
        let mut positions = self.flat_positions(tag);
        let first = positions.next();
        if positions.next().is_some() {
            return Err(MessageRejectError::TagAppearsMoreThanOnce { tag });
        }
        Ok(first.and_then(|i| self.fields.get(i)))
    }

    /// Returns the positions of `tag` that are not inside a group run.
    pub(crate) fn flat_positions(&self, tag: u32) -> impl Iterator<Item = usize> + '_ {
        let spans = self.group_spans();
        self.fields
            .iter()
            .enumerate()
            .filter(move |(i, f)| f.tag == tag && !spans.iter().any(|s| s.contains(i)))
            .map(|(i, _)| i)
    }

    fn group_spans(&self) -> SmallVec<[Range<usize>; 2]> {
        self.layout
            .groups
            .iter()
            .filter_map(|member| {
                let def = self.directory.group(member.tag)?;
                let count_pos = self.fields.position(member.tag)?;
                Some(group_span(self.fields, self.directory, def, count_pos))
            })
            .collect()
    }
}
