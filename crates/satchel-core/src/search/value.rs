//! The `Searchable` capability
//!
//! Types describe their own shape to the searcher and the table printer: a
//! scalar presents one value, a record lists named fields, a collection lists
//! its elements. Records are registered with the [`searchable!`] macro, which
//! builds the per-type field table at compile time.
//!
//! [`searchable!`]: crate::searchable

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};
use rust_decimal::Decimal;

/// Invariant short date format used when dates are matched or printed
pub const SHORT_DATE_FORMAT: &str = "%m/%d/%Y";

/// How a value presents itself to the searcher
#[derive(Clone, Copy)]
pub enum FieldValue<'a> {
    Null,
    Boolean(bool),
    Text(&'a str),
    Integer(i128),
    Decimal(Decimal),
    Float(f64),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    /// A record whose fields are read only when the searcher descends into it
    Nested(&'a dyn Searchable),
    /// A collection whose elements are searched one by one
    List(&'a dyn SearchableList),
}

impl<'a> FieldValue<'a> {
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Textual form of a scalar value. Records, lists, booleans and nulls have
    /// no text to match against.
    pub fn render(&self) -> Option<String> {
        match self {
            FieldValue::Text(text) => Some((*text).to_string()),
            FieldValue::Integer(value) => Some(value.to_string()),
            FieldValue::Decimal(value) => Some(value.to_string()),
            FieldValue::Float(value) => Some(value.to_string()),
            FieldValue::Date(date) => Some(date.format(SHORT_DATE_FORMAT).to_string()),
            FieldValue::DateTime(stamp) => Some(stamp.format(SHORT_DATE_FORMAT).to_string()),
            FieldValue::Null
            | FieldValue::Boolean(_)
            | FieldValue::Nested(_)
            | FieldValue::List(_) => None,
        }
    }

    /// Short name of the value kind, used in diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            FieldValue::Null => "null",
            FieldValue::Boolean(_) => "boolean",
            FieldValue::Text(_) => "text",
            FieldValue::Integer(_) => "integer",
            FieldValue::Decimal(_) => "decimal",
            FieldValue::Float(_) => "float",
            FieldValue::Date(_) => "date",
            FieldValue::DateTime(_) => "datetime",
            FieldValue::Nested(_) => "record",
            FieldValue::List(_) => "list",
        }
    }
}

impl std::fmt::Debug for FieldValue<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::Null => f.write_str("Null"),
            FieldValue::Boolean(value) => write!(f, "Boolean({value})"),
            FieldValue::Nested(_) => f.write_str("Nested(..)"),
            FieldValue::List(list) => write!(f, "List({} items)", list.len()),
            other => match other.render() {
                Some(text) => write!(f, "{}({text:?})", other.kind()),
                None => f.write_str(other.kind()),
            },
        }
    }
}

/// A named field of a record
#[derive(Debug, Clone, Copy)]
pub struct Field<'a> {
    pub name: &'a str,
    pub value: FieldValue<'a>,
}

impl<'a> Field<'a> {
    pub fn new(name: &'a str, value: FieldValue<'a>) -> Self {
        Self { name, value }
    }
}

/// Capability of being searched for text and printed as a table row
pub trait Searchable {
    /// How this value appears when it is a field, a list element or a root item
    fn as_field_value(&self) -> FieldValue<'_>;

    /// Named fields of a record, in declaration order. Scalars have none.
    fn fields(&self) -> Vec<Field<'_>> {
        Vec::new()
    }
}

/// Boxed iterator over the elements of a [`SearchableList`]
pub type Elements<'a> = Box<dyn Iterator<Item = &'a dyn Searchable> + 'a>;

/// Element access for collections presented as [`FieldValue::List`]. Maps
/// present their values.
pub trait SearchableList {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn elements(&self) -> Elements<'_>;
}

macro_rules! searchable_collection {
    ($([$($generics:tt)*] $ty:ty => |$this:ident| $iter:expr;)*) => {
        $(
            impl<$($generics)*> SearchableList for $ty {
                fn len(&self) -> usize {
                    let $this = self;
                    $iter.len()
                }

                fn elements(&self) -> Elements<'_> {
                    let $this = self;
                    Box::new($iter.map(|item| item as &dyn Searchable))
                }
            }

            impl<$($generics)*> Searchable for $ty {
                fn as_field_value(&self) -> FieldValue<'_> {
                    FieldValue::List(self)
                }
            }
        )*
    };
}

searchable_collection! {
    [T: Searchable] Vec<T> => |list| list.iter();
    [T: Searchable, const N: usize] [T; N] => |list| list.iter();
    [T: Searchable] VecDeque<T> => |list| list.iter();
    [T: Searchable, S] HashSet<T, S> => |set| set.iter();
    [T: Searchable] BTreeSet<T> => |set| set.iter();
    [K, V: Searchable, S] HashMap<K, V, S> => |map| map.values();
    [K, V: Searchable] BTreeMap<K, V> => |map| map.values();
}

/// Register a record type by listing the fields the searcher may read.
///
/// ```
/// use satchel_core::{searchable, search::Searchable};
///
/// struct Line { name: String, quantity: i32 }
/// searchable!(Line { name, quantity });
///
/// struct Holder<T> { value: T }
/// searchable!([T: Searchable] Holder<T> { value });
/// ```
#[macro_export]
macro_rules! searchable {
    ([$($generics:tt)*] $ty:ty { $($field:ident),* $(,)? }) => {
        impl<$($generics)*> $crate::search::Searchable for $ty {
            fn as_field_value(&self) -> $crate::search::FieldValue<'_> {
                $crate::search::FieldValue::Nested(self)
            }

            fn fields(&self) -> ::std::vec::Vec<$crate::search::Field<'_>> {
                ::std::vec![
                    $($crate::search::Field::new(
                        ::std::stringify!($field),
                        $crate::search::Searchable::as_field_value(&self.$field),
                    )),*
                ]
            }
        }
    };
    ($ty:ty { $($field:ident),* $(,)? }) => {
        $crate::searchable!([] $ty { $($field),* });
    };
}

impl Searchable for String {
    fn as_field_value(&self) -> FieldValue<'_> {
        FieldValue::Text(self)
    }
}

impl Searchable for str {
    fn as_field_value(&self) -> FieldValue<'_> {
        FieldValue::Text(self)
    }
}

impl<T: Searchable + ?Sized> Searchable for &T {
    fn as_field_value(&self) -> FieldValue<'_> {
        (**self).as_field_value()
    }

    fn fields(&self) -> Vec<Field<'_>> {
        (**self).fields()
    }
}

macro_rules! searchable_integer {
    ($($ty:ty),*) => {
        $(
            impl Searchable for $ty {
                fn as_field_value(&self) -> FieldValue<'_> {
                    FieldValue::Integer(i128::from(*self))
                }
            }
        )*
    };
}

searchable_integer!(i8, i16, i32, i64, u8, u16, u32, u64);

impl Searchable for usize {
    fn as_field_value(&self) -> FieldValue<'_> {
        FieldValue::Integer(*self as i128)
    }
}

impl Searchable for isize {
    fn as_field_value(&self) -> FieldValue<'_> {
        FieldValue::Integer(*self as i128)
    }
}

impl Searchable for f64 {
    fn as_field_value(&self) -> FieldValue<'_> {
        FieldValue::Float(*self)
    }
}

impl Searchable for bool {
    fn as_field_value(&self) -> FieldValue<'_> {
        FieldValue::Boolean(*self)
    }
}

impl Searchable for Decimal {
    fn as_field_value(&self) -> FieldValue<'_> {
        FieldValue::Decimal(*self)
    }
}

impl Searchable for NaiveDate {
    fn as_field_value(&self) -> FieldValue<'_> {
        FieldValue::Date(*self)
    }
}

impl Searchable for NaiveDateTime {
    fn as_field_value(&self) -> FieldValue<'_> {
        FieldValue::DateTime(*self)
    }
}

impl<Tz: TimeZone> Searchable for DateTime<Tz> {
    fn as_field_value(&self) -> FieldValue<'_> {
        FieldValue::DateTime(self.naive_local())
    }
}

impl<T: Searchable> Searchable for Option<T> {
    fn as_field_value(&self) -> FieldValue<'_> {
        match self {
            Some(value) => value.as_field_value(),
            None => FieldValue::Null,
        }
    }

    fn fields(&self) -> Vec<Field<'_>> {
        self.as_ref().map(Searchable::fields).unwrap_or_default()
    }
}

impl<T: Searchable + ?Sized> Searchable for Box<T> {
    fn as_field_value(&self) -> FieldValue<'_> {
        (**self).as_field_value()
    }

    fn fields(&self) -> Vec<Field<'_>> {
        (**self).fields()
    }
}

impl Searchable for serde_json::Value {
    fn as_field_value(&self) -> FieldValue<'_> {
        use serde_json::Value;

        match self {
            Value::Null => FieldValue::Null,
            Value::Bool(value) => FieldValue::Boolean(*value),
            Value::Number(number) => {
                if let Some(value) = number.as_i64() {
                    FieldValue::Integer(i128::from(value))
                } else if let Some(value) = number.as_u64() {
                    FieldValue::Integer(i128::from(value))
                } else {
                    FieldValue::Float(number.as_f64().unwrap_or(f64::NAN))
                }
            }
            Value::String(text) => FieldValue::Text(text),
            Value::Array(items) => FieldValue::List(items),
            Value::Object(_) => FieldValue::Nested(self),
        }
    }

    fn fields(&self) -> Vec<Field<'_>> {
        match self {
            serde_json::Value::Object(map) => map
                .iter()
                .map(|(name, value)| Field::new(name, value.as_field_value()))
                .collect(),
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Line {
        name: String,
        quantity: i32,
        note: Option<String>,
    }

    searchable!(Line { name, quantity, note });

    struct Holder<T> {
        value: T,
    }

    searchable!([T: Searchable] Holder<T> { value });

    #[test]
    fn test_macro_lists_fields_in_order() {
        let line = Line {
            name: "Widget".to_string(),
            quantity: 4,
            note: None,
        };
        let fields = line.fields();
        let names: Vec<&str> = fields.iter().map(|f| f.name).collect();
        assert_eq!(names, vec!["name", "quantity", "note"]);
        assert_eq!(fields[0].value.render().as_deref(), Some("Widget"));
        assert_eq!(fields[1].value.render().as_deref(), Some("4"));
        assert!(fields[2].value.is_null());
        assert!(matches!(line.as_field_value(), FieldValue::Nested(_)));
    }

    #[test]
    fn test_generic_record() {
        let holder = Holder { value: 7u64 };
        let fields = holder.fields();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].value.render().as_deref(), Some("7"));
    }

    #[test]
    fn test_render_scalars() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(date.as_field_value().render().as_deref(), Some("03/07/2024"));

        let stamp = date.and_hms_opt(23, 15, 0).unwrap();
        assert_eq!(stamp.as_field_value().render().as_deref(), Some("03/07/2024"));

        assert_eq!(Decimal::new(12550, 2).as_field_value().render().as_deref(), Some("125.50"));
        assert_eq!(125.0f64.as_field_value().render().as_deref(), Some("125"));
        assert_eq!(true.as_field_value().render(), None);
    }

    #[test]
    fn test_render_floats() {
        let rendered = |value: f64| value.as_field_value().render().unwrap();
        assert_eq!(rendered(19.5), "19.5");
        assert_eq!(rendered(-0.25), "-0.25");
        assert_eq!(rendered(0.1 + 0.2), "0.30000000000000004");
        assert_eq!(rendered(1e21), "1000000000000000000000");
        assert_eq!(rendered(1.5e-7), "0.00000015");
        assert_eq!(rendered(f64::NAN), "NaN");
        assert_eq!(rendered(f64::INFINITY), "inf");
    }

    #[test]
    fn test_render_zoned_datetime_uses_local_date() {
        use chrono::{FixedOffset, TimeZone, Utc};

        let utc = Utc.with_ymd_and_hms(2024, 3, 7, 23, 15, 0).unwrap();
        assert_eq!(utc.as_field_value().render().as_deref(), Some("03/07/2024"));

        let tokyo = utc.with_timezone(&FixedOffset::east_opt(9 * 3600).unwrap());
        assert_eq!(tokyo.as_field_value().render().as_deref(), Some("03/08/2024"));
    }

    struct Tagged {
        name: &'static str,
        tags: [String; 2],
        history: VecDeque<String>,
        labels: BTreeSet<String>,
        aliases: HashSet<String>,
        scores: BTreeMap<String, u32>,
        owners: HashMap<u32, String>,
    }

    searchable!(Tagged { name, tags, history, labels, aliases, scores, owners });

    fn tagged() -> Tagged {
        let text = |value: &str| value.to_string();
        Tagged {
            name: "crate",
            tags: [text("rust"), text("library")],
            history: VecDeque::from(vec![text("created"), text("published")]),
            labels: [text("stable")].into_iter().collect(),
            aliases: [text("satchel"), text("bag")].into_iter().collect(),
            scores: [(text("downloads"), 4096)].into_iter().collect(),
            owners: [(7, text("ferris"))].into_iter().collect(),
        }
    }

    #[test]
    fn test_collection_fields_are_lists() {
        let record = tagged();
        let lengths: Vec<(&str, usize)> = record
            .fields()
            .into_iter()
            .filter_map(|field| match field.value {
                FieldValue::List(list) => Some((field.name, list.len())),
                _ => None,
            })
            .collect();
        assert_eq!(
            lengths,
            vec![
                ("tags", 2),
                ("history", 2),
                ("labels", 1),
                ("aliases", 2),
                ("scores", 1),
                ("owners", 1),
            ]
        );
    }

    #[test]
    fn test_collection_elements_are_searched() {
        use crate::search::search;

        let record = tagged();
        // array, deque, both sets, then map values
        for term in ["library", "publish", "stable", "bag", "4096", "ferris"] {
            assert!(search(&record, term), "term '{term}'");
        }
        // map keys are not values
        assert!(!search(&record, "downloads"));
        assert!(!search(&record, "ferris -satchel"));
    }

    #[test]
    fn test_map_presents_values_only() {
        let map: BTreeMap<&str, i32> = [("a", 1), ("b", 22)].into_iter().collect();
        let texts: Vec<String> = match map.as_field_value() {
            FieldValue::List(list) => list
                .elements()
                .filter_map(|item| item.as_field_value().render())
                .collect(),
            other => panic!("expected list, got {other:?}"),
        };
        assert_eq!(texts, vec!["1", "22"]);
    }

    #[test]
    fn test_json_value_shape() {
        let value = json!({ "name": "A B", "tags": ["x", "y"], "count": 3, "gone": null });
        let fields = value.fields();
        let names: Vec<&str> = fields.iter().map(|f| f.name).collect();
        assert_eq!(names, vec!["count", "gone", "name", "tags"]);

        match fields[3].value {
            FieldValue::List(list) => {
                let texts: Vec<String> = list
                    .elements()
                    .filter_map(|item| item.as_field_value().render())
                    .collect();
                assert_eq!(texts, vec!["x", "y"]);
            }
            other => panic!("expected list, got {other:?}"),
        }
    }
}
