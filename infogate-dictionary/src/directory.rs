/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Process-wide field directory.
//!
//! A [`Directory`] is assembled once with a [`DirectoryBuilder`], validated,
//! and then only read. It serializes as the builder's plain lists so that
//! it can be loaded from any serde format, and loading runs the same
//! validation as [`DirectoryBuilder::build`].

use crate::schema::{Cardinality, DefaultPolicy, FieldDef, GroupDef, SemanticType};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Errors found while building a directory.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    /// Two field definitions share a tag.
    #[error("duplicate field definition for tag {tag}")]
    DuplicateField {
        /// The duplicated tag.
        tag: u32,
    },

    /// Two groups share a count tag.
    #[error("duplicate group definition for count tag {count_tag}")]
    DuplicateGroup {
        /// The duplicated count tag.
        count_tag: u32,
    },

    /// A group's count tag is not an `Int` field with `GroupCount` cardinality.
    #[error("group count tag {count_tag} must be an int field with group-count cardinality")]
    InvalidCountTag {
        /// The offending count tag.
        count_tag: u32,
    },

    /// A group member has no field definition.
    #[error("group {count_tag} references undefined member tag {tag}")]
    UndefinedMember {
        /// The group count tag.
        count_tag: u32,
        /// The undefined tag.
        tag: u32,
    },

    /// A group's delimiter is not one of its field members.
    #[error("group {count_tag} delimiter tag {tag} is not a member of the group")]
    UndefinedDelimiter {
        /// The group count tag.
        count_tag: u32,
        /// The delimiter tag.
        tag: u32,
    },

    /// A nested group has no group definition.
    #[error("group {count_tag} references undefined nested group {nested}")]
    UndefinedNestedGroup {
        /// The enclosing group count tag.
        count_tag: u32,
        /// The undefined nested count tag.
        nested: u32,
    },

    /// A zero default was requested for a type without a zero value.
    #[error("field {tag} of type {semantic_type} cannot have a zero default")]
    InvalidDefault {
        /// The offending tag.
        tag: u32,
        /// Its semantic type.
        semantic_type: SemanticType,
    },
}

/// Immutable mapping from tag to field definition, plus group definitions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "DirectoryBuilder", into = "DirectoryBuilder")]
pub struct Directory {
    fields: HashMap<u32, FieldDef>,
    groups: HashMap<u32, GroupDef>,
}

impl Directory {
    /// Starts an empty builder.
    #[must_use]
    pub fn builder() -> DirectoryBuilder {
        DirectoryBuilder::new()
    }

    /// Gets a field definition by tag.
    #[inline]
    #[must_use]
    pub fn field(&self, tag: u32) -> Option<&FieldDef> {
        self.fields.get(&tag)
    }

    /// Gets a group definition by count tag.
    #[inline]
    #[must_use]
    pub fn group(&self, count_tag: u32) -> Option<&GroupDef> {
        self.groups.get(&count_tag)
    }

    /// Returns true if `tag` belongs to an instance of `group`, directly or
    /// through a nested group.
    #[must_use]
    pub fn is_group_member(&self, group: &GroupDef, tag: u32) -> bool {
        if group.fields.iter().any(|m| m.tag == tag) {
            return true;
        }
        group.groups.iter().any(|nested| {
            nested.tag == tag
                || self
                    .group(nested.tag)
                    .is_some_and(|def| self.is_group_member(def, tag))
        })
    }

    /// Returns an iterator over all field definitions.
    pub fn fields(&self) -> impl Iterator<Item = &FieldDef> {
        self.fields.values()
    }

    /// Returns an iterator over all group definitions.
    pub fn groups(&self) -> impl Iterator<Item = &GroupDef> {
        self.groups.values()
    }

    /// Returns the number of field definitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if no field is defined.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Collects field and group definitions and validates them into a [`Directory`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DirectoryBuilder {
    /// Field definitions.
    #[serde(default)]
    pub fields: Vec<FieldDef>,
    /// Group definitions.
    #[serde(default)]
    pub groups: Vec<GroupDef>,
}

impl DirectoryBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field definition.
    #[must_use]
    pub fn field(mut self, def: FieldDef) -> Self {
        self.fields.push(def);
        self
    }

    /// Adds a group definition.
    #[must_use]
    pub fn group(mut self, def: GroupDef) -> Self {
        self.groups.push(def);
        self
    }

    /// Adds every definition of `other`.
    #[must_use]
    pub fn merge(mut self, other: DirectoryBuilder) -> Self {
        self.fields.extend(other.fields);
        self.groups.extend(other.groups);
        self
    }

    /// Validates the definitions and freezes them.
    ///
    /// # Errors
    /// Returns the first [`DirectoryError`] found, fields before groups.
    pub fn build(self) -> Result<Directory, DirectoryError> {
        let mut fields = HashMap::with_capacity(self.fields.len());
        for def in self.fields {
            if def.default == DefaultPolicy::Zero && !def.semantic_type.has_zero() {
                return Err(DirectoryError::InvalidDefault {
                    tag: def.tag,
                    semantic_type: def.semantic_type,
                });
            }
            if fields.contains_key(&def.tag) {
                return Err(DirectoryError::DuplicateField { tag: def.tag });
            }
            fields.insert(def.tag, def);
        }

        let mut groups = HashMap::with_capacity(self.groups.len());
        for def in &self.groups {
            let count_tag = def.count_tag;
            let count_ok = fields.get(&count_tag).is_some_and(|f: &FieldDef| {
                f.semantic_type == SemanticType::Int && f.cardinality == Cardinality::GroupCount
            });
            if !count_ok {
                return Err(DirectoryError::InvalidCountTag { count_tag });
            }
            if let Some(member) = def.fields.iter().find(|m| !fields.contains_key(&m.tag)) {
                return Err(DirectoryError::UndefinedMember {
                    count_tag,
                    tag: member.tag,
                });
            }
            if !def.fields.iter().any(|m| m.tag == def.delimiter_tag) {
                return Err(DirectoryError::UndefinedDelimiter {
                    count_tag,
                    tag: def.delimiter_tag,
                });
            }
            if groups.insert(count_tag, def.clone()).is_some() {
                return Err(DirectoryError::DuplicateGroup { count_tag });
            }
        }

        for def in groups.values() {
            if let Some(nested) = def.groups.iter().find(|m| !groups.contains_key(&m.tag)) {
                return Err(DirectoryError::UndefinedNestedGroup {
                    count_tag: def.count_tag,
                    nested: nested.tag,
                });
            }
        }

        Ok(Directory { fields, groups })
    }
}

impl TryFrom<DirectoryBuilder> for Directory {
    type Error = DirectoryError;

    fn try_from(builder: DirectoryBuilder) -> Result<Self, Self::Error> {
        builder.build()
    }
}

impl From<Directory> for DirectoryBuilder {
    fn from(directory: Directory) -> Self {
        let mut fields: Vec<_> = directory.fields.into_values().collect();
        fields.sort_by_key(|f| f.tag);
        let mut groups: Vec<_> = directory.groups.into_values().collect();
        groups.sort_by_key(|g| g.count_tag);
        Self { fields, groups }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::MemberDef;

    fn ladder() -> DirectoryBuilder {
        Directory::builder()
            .field(FieldDef::group_count(555, "NoTopPrice"))
            .field(
                FieldDef::new(556, "NumTopPrice", SemanticType::Int)
                    .with_cardinality(Cardinality::GroupMember),
            )
            .field(
                FieldDef::new(132, "BestBidPrice", SemanticType::Decimal)
                    .with_cardinality(Cardinality::GroupMember),
            )
            .group(
                GroupDef::new(555, "NoTopPrice", 556)
                    .with_field(MemberDef::required(556, "NumTopPrice"))
                    .with_field(MemberDef::optional(132, "BestBidPrice")),
            )
    }

    #[test]
    fn test_build_and_lookup() {
        let dir = ladder().build().unwrap();
        assert_eq!(dir.len(), 3);
        assert_eq!(dir.field(132).unwrap().name, "BestBidPrice");
        assert!(dir.field(999).is_none());
        let group = dir.group(555).unwrap();
        assert!(dir.is_group_member(group, 132));
        assert!(!dir.is_group_member(group, 55));
    }

    #[test]
    fn test_duplicate_field() {
        let err = ladder()
            .field(FieldDef::new(132, "Other", SemanticType::String))
            .build()
            .unwrap_err();
        assert_eq!(err, DirectoryError::DuplicateField { tag: 132 });
    }

    #[test]
    fn test_invalid_count_tag() {
        let err = Directory::builder()
            .field(FieldDef::new(555, "NoTopPrice", SemanticType::Int))
            .field(FieldDef::new(556, "NumTopPrice", SemanticType::Int))
            .group(
                GroupDef::new(555, "NoTopPrice", 556)
                    .with_field(MemberDef::required(556, "NumTopPrice")),
            )
            .build()
            .unwrap_err();
        assert_eq!(err, DirectoryError::InvalidCountTag { count_tag: 555 });
    }

    #[test]
    fn test_undefined_member_and_delimiter() {
        let err = ladder()
            .group(
                GroupDef::new(555, "Again", 556)
                    .with_field(MemberDef::required(556, "NumTopPrice"))
                    .with_field(MemberDef::optional(777, "Missing")),
            )
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            DirectoryError::UndefinedMember {
                count_tag: 555,
                tag: 777
            }
        );

        let err = Directory::builder()
            .field(FieldDef::group_count(555, "NoTopPrice"))
            .field(FieldDef::new(132, "BestBidPrice", SemanticType::Decimal))
            .group(
                GroupDef::new(555, "NoTopPrice", 556)
                    .with_field(MemberDef::optional(132, "BestBidPrice")),
            )
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            DirectoryError::UndefinedDelimiter {
                count_tag: 555,
                tag: 556
            }
        );
    }

    #[test]
    fn test_undefined_nested_group() {
        let err = ladder()
            .field(FieldDef::group_count(600, "NoOuter"))
            .field(FieldDef::new(601, "OuterId", SemanticType::String))
            .group(
                GroupDef::new(600, "NoOuter", 601)
                    .with_field(MemberDef::required(601, "OuterId"))
                    .with_group(MemberDef::optional(700, "NoInner")),
            )
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            DirectoryError::UndefinedNestedGroup {
                count_tag: 600,
                nested: 700
            }
        );
    }

    #[test]
    fn test_nested_membership() {
        let dir = ladder()
            .field(FieldDef::group_count(600, "NoOuter"))
            .field(FieldDef::new(601, "OuterId", SemanticType::String))
            .group(
                GroupDef::new(600, "NoOuter", 601)
                    .with_field(MemberDef::required(601, "OuterId"))
                    .with_group(MemberDef::optional(555, "NoTopPrice")),
            )
            .build()
            .unwrap();
        let outer = dir.group(600).unwrap();
        assert!(dir.is_group_member(outer, 555));
        assert!(dir.is_group_member(outer, 132));
        assert!(!dir.is_group_member(outer, 600));
    }

    #[test]
    fn test_zero_default_rejected_for_date() {
        let err = Directory::builder()
            .field(FieldDef::new(388, "TradingDate", SemanticType::Date).zero_default())
            .build()
            .unwrap_err();
        assert!(matches!(err, DirectoryError::InvalidDefault { tag: 388, .. }));
    }

    #[test]
    fn test_load_from_json() {
        let json = r#"{
            "fields": [
                {"tag": 55, "name": "Symbol", "semantic_type": "String"},
                {"tag": 387, "name": "TotalVolumeTraded", "semantic_type": "Decimal", "default": "Zero"},
                {"tag": 555, "name": "NoTopPrice", "semantic_type": "Int", "cardinality": "GroupCount"},
                {"tag": 556, "name": "NumTopPrice", "semantic_type": "Int", "cardinality": "GroupMember"}
            ],
            "groups": [
                {"count_tag": 555, "name": "NoTopPrice", "delimiter_tag": 556,
                 "fields": [{"tag": 556, "name": "NumTopPrice", "required": true}]}
            ]
        }"#;
        let dir: Directory = serde_json::from_str(json).unwrap();
        assert_eq!(dir.field(387).unwrap().default, DefaultPolicy::Zero);
        assert_eq!(dir.field(55).unwrap().cardinality, Cardinality::Single);
        assert_eq!(dir.group(555).unwrap().delimiter_tag, 556);

        let back = serde_json::to_string(&dir).unwrap();
        let again: Directory = serde_json::from_str(&back).unwrap();
        assert_eq!(again.len(), dir.len());
    }

    #[test]
    fn test_load_from_json_validates() {
        let json = r#"{"fields": [
            {"tag": 55, "name": "Symbol", "semantic_type": "String"},
            {"tag": 55, "name": "Again", "semantic_type": "String"}
        ]}"#;
        assert!(serde_json::from_str::<Directory>(json).is_err());
    }
}
