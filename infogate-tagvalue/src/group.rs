/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Repeating group extraction.
//!
//! A group run starts at the first delimiter after its count field and
//! continues while fields belong to the group. Each delimiter opens a new
//! instance, and the number of instances must equal the declared count.

use crate::accessor::Scope;
use infogate_core::error::MessageRejectError;
use infogate_core::store::FieldSlice;
use infogate_dictionary::{Directory, GroupDef};
use std::ops::{Deref, Range};

/// One instance of a repeating group.
///
/// Dereferences to a [`Scope`] over the instance fields, laid out by the
/// group definition.
#[derive(Debug, Clone, Copy)]
pub struct GroupInstance<'s> {
    index: usize,
    scope: Scope<'s>,
}

impl<'s> GroupInstance<'s> {
    /// Returns the zero-based position of the instance in wire order.
    #[inline]
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Returns the instance scope.
    #[inline]
    #[must_use]
    pub const fn scope(&self) -> Scope<'s> {
        self.scope
    }
}

impl<'s> Deref for GroupInstance<'s> {
    type Target = Scope<'s>;

    fn deref(&self) -> &Self::Target {
        &self.scope
    }
}

/// Returns the index range of the group run following `count_pos`.
pub(crate) fn group_span(
    fields: FieldSlice<'_>,
    directory: &Directory,
    def: &GroupDef,
    count_pos: usize,
) -> Range<usize> {
    let Some(start) = fields.position_from(def.delimiter_tag, count_pos + 1) else {
        return count_pos + 1..count_pos + 1;
    };
    let end = fields
        .as_slice()
        .iter()
        .enumerate()
        .skip(start)
        .find(|(_, f)| !directory.is_group_member(def, f.tag))
        .map_or(fields.len(), |(i, _)| i);
    start..end
}

/// Splits the group opened by `def.count_tag` into its instances.
///
/// An absent optional count yields no instances; an absent required count
/// is `FieldNotFound`.
///
/// # Errors
/// - `IncorrectDataFormat` if the count is not a non-negative integer
/// - `RepeatingGroupCountMismatch` if the number of delimiters found
///   differs from the count
pub fn extract_groups<'s>(
    scope: &Scope<'s>,
    def: &'s GroupDef,
) -> Result<Vec<GroupInstance<'s>>, MessageRejectError> {
    let Some(count) = scope.lookup::<i64>(def.count_tag)? else {
        return Ok(Vec::new());
    };
    let expected = usize::try_from(count).map_err(|_| {
        MessageRejectError::incorrect_format(def.count_tag, "negative group count")
    })?;

    let fields = scope.fields();
    let Some(count_pos) = scope.flat_positions(def.count_tag).next() else {
        return check_count(def.count_tag, expected, 0).map(|()| Vec::new());
    };

    let span = group_span(fields, scope.directory(), def, count_pos);
    let starts: Vec<usize> = span
        .clone()
        .filter(|&i| fields.get(i).is_some_and(|f| f.tag == def.delimiter_tag))
        .collect();
    check_count(def.count_tag, expected, starts.len())?;

    let layout = def.layout();
    Ok(starts
        .iter()
        .enumerate()
        .map(|(index, &start)| {
            let end = starts.get(index + 1).copied().unwrap_or(span.end);
            GroupInstance {
                index,
                scope: Scope::new(
                    fields.sub(start..end).unwrap_or_default(),
                    scope.directory(),
                    layout,
                ),
            }
        })
        .collect())
}

fn check_count(count_tag: u32, expected: usize, actual: usize) -> Result<(), MessageRejectError> {
    if expected == actual {
        Ok(())
    } else {
        Err(MessageRejectError::RepeatingGroupCountMismatch {
            count_tag,
            expected,
            actual,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use infogate_core::message::RawMessage;
    use infogate_dictionary::{Cardinality, FieldDef, MemberDef, MessageDef, SemanticType};
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn directory() -> Directory {
        Directory::builder()
            .field(FieldDef::new(55, "Symbol", SemanticType::String))
            .field(FieldDef::new(58, "Text", SemanticType::String))
            .field(FieldDef::group_count(555, "NoTopPrice"))
            .field(
                FieldDef::new(556, "NumTopPrice", SemanticType::Int)
                    .with_cardinality(Cardinality::GroupMember),
            )
            .field(FieldDef::new(132, "BestBidPrice", SemanticType::Decimal))
            .field(FieldDef::new(133, "BestOfferPrice", SemanticType::Decimal))
            .group(
                GroupDef::new(555, "NoTopPrice", 556)
                    .with_field(MemberDef::required(556, "NumTopPrice"))
                    .with_field(MemberDef::optional(132, "BestBidPrice"))
                    .with_field(MemberDef::optional(133, "BestOfferPrice")),
            )
            .build()
            .unwrap()
    }

    fn definition() -> MessageDef {
        MessageDef::new("TP", "TopNPrice")
            .with_field(MemberDef::required(55, "Symbol"))
            .with_field(MemberDef::optional(58, "Text"))
            .with_group(MemberDef::required(555, "NoTopPrice"))
    }

    fn message(fields: &[(u32, &'static str)]) -> RawMessage<'static> {
        let mut builder = RawMessage::builder(b"").header(35, b"TP");
        for &(tag, value) in fields {
            builder.push_body(tag, value.as_bytes());
        }
        builder.build()
    }

    #[test]
    fn test_extract_instances_in_order() {
        let dir = directory();
        let def = definition();
        let raw = message(&[
            (55, "VND"),
            (555, "2"),
            (556, "1"),
            (132, "25350.5"),
            (133, "25400"),
            (556, "2"),
            (132, "25300"),
            (58, "tail"),
        ]);
        let scope = Scope::for_message(&raw, &dir, &def);
        let levels = scope.groups(555).unwrap();

        assert_eq!(levels.len(), 2);
        assert_eq!(levels[0].index(), 0);
        assert_eq!(levels[0].get_int(556).unwrap(), Some(1));
        assert_eq!(
            levels[0].get_decimal(132).unwrap(),
            Some(Decimal::from_str("25350.5").unwrap())
        );
        assert_eq!(levels[1].get_int(556).unwrap(), Some(2));
        assert_eq!(levels[1].lookup::<Decimal>(133).unwrap(), None);
        assert_eq!(scope.get_string(58).unwrap(), Some("tail"));
    }

    #[test]
    fn test_count_mismatch() {
        let dir = directory();
        let def = definition();
        let raw = message(&[
            (55, "VND"),
            (555, "1"),
            (556, "1"),
            (132, "10"),
            (556, "2"),
            (132, "9"),
        ]);
        let scope = Scope::for_message(&raw, &dir, &def);
        assert_eq!(
            scope.groups(555).unwrap_err(),
            MessageRejectError::RepeatingGroupCountMismatch {
                count_tag: 555,
                expected: 1,
                actual: 2,
            }
        );
    }

    #[test]
    fn test_count_without_instances() {
        let dir = directory();
        let def = definition();
        let raw = message(&[(55, "VND"), (555, "1")]);
        let scope = Scope::for_message(&raw, &dir, &def);
        assert!(matches!(
            scope.groups(555),
            Err(MessageRejectError::RepeatingGroupCountMismatch { actual: 0, .. })
        ));
    }

    #[test]
    fn test_zero_count() {
        let dir = directory();
        let def = definition();
        let raw = message(&[(55, "VND"), (555, "0")]);
        let scope = Scope::for_message(&raw, &dir, &def);
        assert!(scope.groups(555).unwrap().is_empty());
    }

    #[test]
    fn test_required_count_missing() {
        let dir = directory();
        let def = definition();
        let raw = message(&[(55, "VND")]);
        let scope = Scope::for_message(&raw, &dir, &def);
        assert_eq!(
            scope.groups(555).unwrap_err(),
            MessageRejectError::FieldNotFound { tag: 555 }
        );
    }

    #[test]
    fn test_negative_and_malformed_count() {
        let dir = directory();
        let def = definition();
        for bad in ["-1", "two"] {
            let raw = message(&[(55, "VND"), (555, bad)]);
            let scope = Scope::for_message(&raw, &dir, &def);
            assert!(matches!(
                scope.groups(555),
                Err(MessageRejectError::IncorrectDataFormat { tag: 555, .. })
            ));
        }
    }

    #[test]
    fn test_instance_required_member() {
        let dir = directory();
        let def = definition();
        let raw = message(&[(55, "VND"), (555, "1"), (556, "1"), (132, "10")]);
        let scope = Scope::for_message(&raw, &dir, &def);
        assert!(scope.check_required().is_ok());
        let levels = scope.groups(555).unwrap();
        assert_eq!(levels[0].get_decimal(133).unwrap(), None);
        assert_eq!(
            levels[0].require::<Decimal>(133).unwrap_err(),
            MessageRejectError::FieldNotFound { tag: 133 }
        );
    }

    fn nested_directory() -> Directory {
        Directory::builder()
            .field(FieldDef::new(55, "Symbol", SemanticType::String))
            .field(FieldDef::new(58, "Text", SemanticType::String))
            .field(FieldDef::group_count(600, "NoLegs"))
            .field(
                FieldDef::new(601, "LegSymbol", SemanticType::String)
                    .with_cardinality(Cardinality::GroupMember),
            )
            .field(FieldDef::group_count(610, "NoLegPrices"))
            .field(
                FieldDef::new(611, "LegPriceLevel", SemanticType::String)
                    .with_cardinality(Cardinality::GroupMember),
            )
            .field(FieldDef::new(612, "LegPrice", SemanticType::Decimal))
            .group(
                GroupDef::new(600, "NoLegs", 601)
                    .with_field(MemberDef::required(601, "LegSymbol"))
                    .with_group(MemberDef::optional(610, "NoLegPrices")),
            )
            .group(
                GroupDef::new(610, "NoLegPrices", 611)
                    .with_field(MemberDef::required(611, "LegPriceLevel"))
                    .with_field(MemberDef::optional(612, "LegPrice")),
            )
            .build()
            .unwrap()
    }

    #[test]
    fn test_nested_groups() {
        let dir = nested_directory();
        let def = MessageDef::new("NG", "Nested")
            .with_field(MemberDef::required(55, "Symbol"))
            .with_field(MemberDef::optional(58, "Text"))
            .with_group(MemberDef::required(600, "NoLegs"));
        let raw = RawMessage::builder(b"")
            .header(35, b"NG")
            .body(55, b"VN30F2401")
            .body(600, b"2")
            .body(601, b"o1")
            .body(610, b"2")
            .body(611, b"i1")
            .body(612, b"1250.5")
            .body(611, b"i2")
            .body(601, b"o2")
            .body(610, b"1")
            .body(611, b"i3")
            .body(58, b"tail")
            .build();
        let scope = Scope::for_message(&raw, &dir, &def);

        let outer = scope.groups(600).unwrap();
        assert_eq!(outer.len(), 2);
        assert_eq!(outer[0].get_string(601).unwrap(), Some("o1"));
        assert_eq!(outer[1].get_string(601).unwrap(), Some("o2"));

        let first: Vec<_> = outer[0].groups(610).unwrap();
        let levels: Vec<_> = first
            .iter()
            .map(|g| g.require::<&str>(611).unwrap())
            .collect();
        assert_eq!(levels, vec!["i1", "i2"]);
        assert_eq!(
            first[0].get_decimal(612).unwrap(),
            Some(Decimal::from_str("1250.5").unwrap())
        );
        assert_eq!(first[1].get_decimal(612).unwrap(), None);

        let second = outer[1].groups(610).unwrap();
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].get_string(611).unwrap(), Some("i3"));

        assert_eq!(scope.get_string(58).unwrap(), Some("tail"));
        assert_eq!(scope.get_string(55).unwrap(), Some("VN30F2401"));
        assert!(scope.check_required().is_ok());
    }

    #[test]
    fn test_nested_count_mismatch() {
        let dir = nested_directory();
        let def = MessageDef::new("NG", "Nested")
            .with_field(MemberDef::required(55, "Symbol"))
            .with_group(MemberDef::required(600, "NoLegs"));
        let raw = RawMessage::builder(b"")
            .header(35, b"NG")
            .body(55, b"VN30F2401")
            .body(600, b"1")
            .body(601, b"o1")
            .body(610, b"3")
            .body(611, b"i1")
            .body(611, b"i2")
            .build();
        let scope = Scope::for_message(&raw, &dir, &def);
        assert_eq!(
            scope.check_required().unwrap_err(),
            MessageRejectError::RepeatingGroupCountMismatch {
                count_tag: 610,
                expected: 3,
                actual: 2,
            }
        );
    }

    #[test]
    fn test_group_undefined() {
        let dir = directory();
        let def = definition();
        let raw = message(&[(55, "VND")]);
        let scope = Scope::for_message(&raw, &dir, &def);
        assert_eq!(
            scope.groups(999).unwrap_err(),
            MessageRejectError::UndefinedTag { tag: 999 }
        );
    }
}
