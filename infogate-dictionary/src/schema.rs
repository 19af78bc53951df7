/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Schema definitions for the field directory.
//!
//! This module defines the structures that describe tag-value messages:
//! - [`SemanticType`]: the wire type every coercion is driven by
//! - [`FieldDef`]: tag, name, semantic type, cardinality and absent policy
//! - [`MemberDef`]: a field or group used by a message or group layout
//! - [`GroupDef`]: repeating group with count and delimiter tags
//! - [`MessageDef`]: the layout of one message type
//! - [`Layout`]: borrowed member lists shared by messages and groups

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Wire type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SemanticType {
    /// Free text.
    String,
    /// Signed integer.
    Int,
    /// Exact decimal (prices, quantities, amounts).
    Decimal,
    /// Calendar date, `yyyyMMdd`.
    Date,
    /// Time of day, `HH:mm:ss[.sss]`.
    Time,
    /// Single character.
    Char,
}

impl SemanticType {
    /// Returns the type name used in error messages.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Int => "int",
            Self::Decimal => "decimal",
            Self::Date => "date",
            Self::Time => "time",
            Self::Char => "char",
        }
    }

    /// Returns the wire text of the type's zero value, if it has one.
    ///
    /// The `Zero` absent policy reads this text as if it had been sent.
    #[must_use]
    pub const fn zero_text(&self) -> Option<&'static str> {
        match self {
            Self::String => Some(""),
            Self::Int | Self::Decimal => Some("0"),
            Self::Date | Self::Time | Self::Char => None,
        }
    }

    /// Returns true if a zero value exists for this type.
    #[must_use]
    pub const fn has_zero(&self) -> bool {
        self.zero_text().is_some()
    }
}

impl FromStr for SemanticType {
    type Err = std::convert::Infallible;

    /// Maps a QuickFIX dictionary type name to a semantic type.
    ///
    /// Unknown names map to [`SemanticType::String`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_uppercase().as_str() {
            "INT" | "LENGTH" | "SEQNUM" | "NUMINGROUP" | "TAGNUM" | "DAYOFMONTH" => Self::Int,
            "FLOAT" | "QTY" | "QUANTITY" | "PRICE" | "PRICEOFFSET" | "AMT" | "AMOUNT"
            | "PERCENTAGE" => Self::Decimal,
            "CHAR" | "BOOLEAN" => Self::Char,
            "LOCALMKTDATE" | "UTCDATEONLY" | "UTCDATE" | "DATE" => Self::Date,
            "UTCTIMEONLY" | "LOCALMKTTIME" | "TZTIMEONLY" | "TIME" => Self::Time,
            _ => Self::String,
        })
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How a field may occur in a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cardinality {
    /// At most once per scope.
    #[default]
    Single,
    /// NumInGroup field that opens a repeating group.
    GroupCount,
    /// Field that only occurs inside group instances.
    GroupMember,
}

/// Result of reading an optional field that is absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DefaultPolicy {
    /// The zero value of the type (`""`, `0`, `0.0`).
    Zero,
    /// No value.
    #[default]
    NoDefault,
}

/// Definition of a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef {
    /// Field tag number.
    pub tag: u32,
    /// Field name.
    pub name: String,
    /// Wire type.
    pub semantic_type: SemanticType,
    /// How the field may occur.
    #[serde(default)]
    pub cardinality: Cardinality,
    /// Result of reading the field when it is absent and optional.
    #[serde(default)]
    pub default: DefaultPolicy,
}

impl FieldDef {
    /// Creates a single-occurrence field with no default.
    ///
    /// # Arguments
    /// * `tag` - The field tag number
    /// * `name` - The field name
    /// * `semantic_type` - The wire type
    #[must_use]
    pub fn new(tag: u32, name: impl Into<String>, semantic_type: SemanticType) -> Self {
        Self {
            tag,
            name: name.into(),
            semantic_type,
            cardinality: Cardinality::Single,
            default: DefaultPolicy::NoDefault,
        }
    }

    /// Creates a NumInGroup field.
    #[must_use]
    pub fn group_count(tag: u32, name: impl Into<String>) -> Self {
        Self::new(tag, name, SemanticType::Int).with_cardinality(Cardinality::GroupCount)
    }

    /// Sets the cardinality.
    #[must_use]
    pub const fn with_cardinality(mut self, cardinality: Cardinality) -> Self {
        self.cardinality = cardinality;
        self
    }

    /// Sets the absent-optional policy.
    #[must_use]
    pub const fn with_default(mut self, default: DefaultPolicy) -> Self {
        self.default = default;
        self
    }

    /// Shorthand for `with_default(DefaultPolicy::Zero)`.
    #[must_use]
    pub const fn zero_default(self) -> Self {
        self.with_default(DefaultPolicy::Zero)
    }
}

/// A field or group referenced by a layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberDef {
    /// Tag of the field, or count tag of the group.
    pub tag: u32,
    /// Member name.
    pub name: String,
    /// Whether the member must be present.
    pub required: bool,
}

impl MemberDef {
    /// Creates a required member.
    #[must_use]
    pub fn required(tag: u32, name: impl Into<String>) -> Self {
        Self {
            tag,
            name: name.into(),
            required: true,
        }
    }

    /// Creates an optional member.
    #[must_use]
    pub fn optional(tag: u32, name: impl Into<String>) -> Self {
        Self {
            tag,
            name: name.into(),
            required: false,
        }
    }
}

/// Borrowed member lists of a message or group.
#[derive(Debug, Clone, Copy, Default)]
pub struct Layout<'d> {
    /// Plain fields.
    pub fields: &'d [MemberDef],
    /// Repeating groups, by count tag.
    pub groups: &'d [MemberDef],
}

impl<'d> Layout<'d> {
    /// Returns the plain field member for `tag`.
    #[must_use]
    pub fn field(&self, tag: u32) -> Option<&'d MemberDef> {
        self.fields.iter().find(|m| m.tag == tag)
    }

    /// Returns the group member whose count tag is `tag`.
    #[must_use]
    pub fn group(&self, tag: u32) -> Option<&'d MemberDef> {
        self.groups.iter().find(|m| m.tag == tag)
    }

    /// Returns the member for `tag`, field or group.
    #[must_use]
    pub fn member(&self, tag: u32) -> Option<&'d MemberDef> {
        self.field(tag).or_else(|| self.group(tag))
    }

    /// Returns true if `tag` is declared required.
    #[must_use]
    pub fn is_required(&self, tag: u32) -> bool {
        self.member(tag).is_some_and(|m| m.required)
    }

    /// Returns the required tags, fields first.
    ///
    /// Takes the layout by value so the iterator borrows only the member
    /// lists, not a temporary layout.
    pub fn required_tags(self) -> impl Iterator<Item = u32> + 'd {
        self.fields
            .iter()
            .chain(self.groups.iter())
            .filter(|m| m.required)
            .map(|m| m.tag)
    }
}

/// Definition of a repeating group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupDef {
    /// Tag of the count field (NumInGroup).
    pub count_tag: u32,
    /// Name of the group.
    pub name: String,
    /// Tag that starts every instance.
    pub delimiter_tag: u32,
    /// Fields within each instance, in wire order.
    pub fields: Vec<MemberDef>,
    /// Nested groups within each instance, by count tag.
    #[serde(default)]
    pub groups: Vec<MemberDef>,
}

impl GroupDef {
    /// Creates a group with no members.
    ///
    /// # Arguments
    /// * `count_tag` - The NumInGroup tag
    /// * `name` - The group name
    /// * `delimiter_tag` - The tag that starts every instance
    #[must_use]
    pub fn new(count_tag: u32, name: impl Into<String>, delimiter_tag: u32) -> Self {
        Self {
            count_tag,
            name: name.into(),
            delimiter_tag,
            fields: Vec::new(),
            groups: Vec::new(),
        }
    }

    /// Adds a field member.
    #[must_use]
    pub fn with_field(mut self, member: MemberDef) -> Self {
        self.fields.push(member);
        self
    }

    /// Adds a nested group.
    #[must_use]
    pub fn with_group(mut self, member: MemberDef) -> Self {
        self.groups.push(member);
        self
    }

    /// Returns the member lists of one instance.
    #[must_use]
    pub fn layout(&self) -> Layout<'_> {
        Layout {
            fields: &self.fields,
            groups: &self.groups,
        }
    }
}

/// Layout of one message type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageDef {
    /// Message type value (tag 35).
    pub msg_type: String,
    /// Message name.
    pub name: String,
    /// Body fields.
    pub fields: Vec<MemberDef>,
    /// Body repeating groups, by count tag.
    #[serde(default)]
    pub groups: Vec<MemberDef>,
}

impl MessageDef {
    /// Creates a message layout with no members.
    #[must_use]
    pub fn new(msg_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            msg_type: msg_type.into(),
            name: name.into(),
            fields: Vec::new(),
            groups: Vec::new(),
        }
    }

    /// Adds a field member.
    #[must_use]
    pub fn with_field(mut self, member: MemberDef) -> Self {
        self.fields.push(member);
        self
    }

    /// Adds a repeating group.
    #[must_use]
    pub fn with_group(mut self, member: MemberDef) -> Self {
        self.groups.push(member);
        self
    }

    /// Adds every member of `other`, keeping members already present.
    #[must_use]
    pub fn extend_from(mut self, other: &MessageDef) -> Self {
        for member in &other.fields {
            if self.layout().member(member.tag).is_none() {
                self.fields.push(member.clone());
            }
        }
        for member in &other.groups {
            if self.layout().member(member.tag).is_none() {
                self.groups.push(member.clone());
            }
        }
        self
    }

    /// Returns the body member lists.
    #[must_use]
    pub fn layout(&self) -> Layout<'_> {
        Layout {
            fields: &self.fields,
            groups: &self.groups,
        }
    }

    /// Returns the required tags, fields first.
    pub fn required_tags(&self) -> impl Iterator<Item = u32> + '_ {
        self.layout().required_tags()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_semantic_type_from_str() {
        assert_eq!("INT".parse::<SemanticType>().unwrap(), SemanticType::Int);
        assert_eq!(
            "NUMINGROUP".parse::<SemanticType>().unwrap(),
            SemanticType::Int
        );
        assert_eq!(
            "price".parse::<SemanticType>().unwrap(),
            SemanticType::Decimal
        );
        assert_eq!(
            "LOCALMKTDATE".parse::<SemanticType>().unwrap(),
            SemanticType::Date
        );
        assert_eq!(
            "UTCTIMEONLY".parse::<SemanticType>().unwrap(),
            SemanticType::Time
        );
        assert_eq!("CHAR".parse::<SemanticType>().unwrap(), SemanticType::Char);
        assert_eq!(
            "unknown".parse::<SemanticType>().unwrap(),
            SemanticType::String
        );
    }

    #[test]
    fn test_semantic_type_zero() {
        assert!(SemanticType::Decimal.has_zero());
        assert!(!SemanticType::Date.has_zero());
        assert!(!SemanticType::Char.has_zero());
        assert_eq!(SemanticType::String.zero_text(), Some(""));
        assert_eq!(SemanticType::Int.zero_text(), Some("0"));
        assert_eq!(SemanticType::Time.zero_text(), None);
    }

    #[test]
    fn test_field_def_builders() {
        let def = FieldDef::new(387, "TotalVolumeTraded", SemanticType::Decimal).zero_default();
        assert_eq!(def.default, DefaultPolicy::Zero);
        assert_eq!(def.cardinality, Cardinality::Single);

        let count = FieldDef::group_count(555, "NoTopPrice");
        assert_eq!(count.cardinality, Cardinality::GroupCount);
        assert_eq!(count.semantic_type, SemanticType::Int);
    }

    #[test]
    fn test_layout_lookup() {
        let def = MessageDef::new("TP", "TopNPrice")
            .with_field(MemberDef::required(55, "Symbol"))
            .with_field(MemberDef::optional(425, "BoardCode"))
            .with_group(MemberDef::optional(555, "NoTopPrice"));
        let layout = def.layout();

        assert!(layout.is_required(55));
        assert!(!layout.is_required(425));
        assert!(!layout.is_required(9999));
        assert!(layout.group(555).is_some());
        assert!(layout.field(555).is_none());
        assert_eq!(def.required_tags().collect::<Vec<_>>(), vec![55]);
    }

    #[test]
    fn test_message_def_extend_from() {
        let base = MessageDef::new("SI", "StockInfo")
            .with_field(MemberDef::required(55, "Symbol"))
            .with_field(MemberDef::optional(31, "MatchPrice"));
        let derived = MessageDef::new("DI", "DerivativeInfo")
            .with_field(MemberDef::optional(55, "Symbol"))
            .with_field(MemberDef::optional(800, "Underlying"))
            .extend_from(&base);

        assert_eq!(derived.fields.len(), 3);
        assert!(!derived.layout().is_required(55));
        assert!(derived.layout().field(31).is_some());
    }

    #[test]
    fn test_group_def_layout() {
        let group = GroupDef::new(555, "NoTopPrice", 556)
            .with_field(MemberDef::required(556, "NumTopPrice"))
            .with_field(MemberDef::optional(132, "BestBidPrice"));
        assert_eq!(group.layout().fields.len(), 2);
        assert!(group.layout().is_required(556));
    }

    #[test]
    fn test_required_tags_outlive_layout() {
        let def = MessageDef::new("TP", "TopNPrice")
            .with_field(MemberDef::required(55, "Symbol"))
            .with_field(MemberDef::optional(425, "BoardCode"))
            .with_group(MemberDef::required(555, "NoTopPrice"));

        let tags = def.required_tags();
        let from_temporary = def.layout().required_tags();
        assert_eq!(tags.collect::<Vec<_>>(), vec![55, 555]);
        assert_eq!(from_temporary.collect::<Vec<_>>(), vec![55, 555]);
    }
}
