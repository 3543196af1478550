//! Deserialization of parsed trees into Rust values.
//!
//! The [`Deserializer`] walks a [`Node`] tree produced by
//! [`parse`](crate::parse); it never looks at the source text again except
//! through node spans, so borrowed `&str` fields point straight into the input.
//!
//! ## Usage
//!
//! ```rust
//! use lisp_list::from_str;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Data { x: i32, name: String }
//!
//! let data: Data = from_str("(x 1 name \"Ada L\")").unwrap();
//! assert_eq!(data, Data { x: 1, name: "Ada L".to_string() });
//! ```
//!
//! ## Scalars
//!
//! Typed targets (integers, floats, booleans) coerce the scalar's text, so a
//! quoted `"5"` still reads as `5`. String targets always receive the text.
//! With self-describing targets (`deserialize_any`), quoted scalars stay
//! strings, bare `nil` is unit, and other atoms go through
//! [`coerce`](crate::coerce).

use crate::ser::NIL;
use crate::token::TokenKind;
use crate::tree::Node;
use crate::value::{coerce, ParsedValue};
use crate::{Error, Result};
use serde::de;
use std::borrow::Cow;

/// A Serde deserializer over one node of a parsed tree.
#[derive(Clone, Copy)]
pub struct Deserializer<'a, 'de> {
    node: &'a Node<'de>,
}

impl<'a, 'de> Deserializer<'a, 'de> {
    pub fn new(node: &'a Node<'de>) -> Self {
        Deserializer { node }
    }

    /// Creates a deserializer for the value held by a parse result.
    ///
    /// A document root must contain exactly one item, which becomes the value;
    /// any other node is used as is.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyDocument`] or [`Error::TrailingValues`] when a document
    /// does not hold exactly one item.
    pub fn from_root(root: &'a Node<'de>) -> Result<Self> {
        if !root.is_document() {
            return Ok(Self::new(root));
        }
        match root.children() {
            [] => Err(Error::EmptyDocument),
            [single] => Ok(Self::new(single)),
            items => Err(Error::TrailingValues { count: items.len() }),
        }
    }

    fn is_nil(&self) -> bool {
        self.node.kind() == TokenKind::UnquotedString && self.node.raw() == NIL
    }

    fn mismatch(&self, expected: &str) -> Error {
        Error::type_mismatch(expected, self.node.kind().as_str())
    }

    fn list_items(&self, expected: &str) -> Result<&'a [Node<'de>]> {
        if self.node.is_list() {
            Ok(self.node.children())
        } else {
            Err(self.mismatch(expected))
        }
    }

    fn visit_text<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        if self.node.is_list() {
            return Err(self.mismatch("string"));
        }
        match self.node.cow_text() {
            Cow::Borrowed(s) => visitor.visit_borrowed_str(*s),
            Cow::Owned(s) => visitor.visit_str(s),
        }
    }

    fn visit_coerced<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        if self.node.is_list() {
            return Err(self.mismatch("scalar"));
        }
        match coerce(self.node.text()) {
            ParsedValue::UInt(v) => visitor.visit_u64(v),
            ParsedValue::Int(v) => visitor.visit_i64(v),
            ParsedValue::Float(v) => visitor.visit_f64(v),
            ParsedValue::Bool(v) => visitor.visit_bool(v),
            ParsedValue::Str(_) => self.visit_text(visitor),
        }
    }
}

impl<'a, 'de> de::Deserializer<'de> for Deserializer<'a, 'de> {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        if self.node.is_list() {
            return visitor.visit_seq(SeqDeserializer::new(self.node.children()));
        }
        if self.node.kind() == TokenKind::QuotedString {
            return self.visit_text(visitor);
        }
        if self.is_nil() {
            return visitor.visit_unit();
        }
        self.visit_coerced(visitor)
    }

    fn deserialize_bool<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.visit_coerced(visitor)
    }

    fn deserialize_i8<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.visit_coerced(visitor)
    }

    fn deserialize_i16<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.visit_coerced(visitor)
    }

    fn deserialize_i32<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.visit_coerced(visitor)
    }

    fn deserialize_i64<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.visit_coerced(visitor)
    }

    fn deserialize_u8<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.visit_coerced(visitor)
    }

    fn deserialize_u16<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.visit_coerced(visitor)
    }

    fn deserialize_u32<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.visit_coerced(visitor)
    }

    fn deserialize_u64<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.visit_coerced(visitor)
    }

    fn deserialize_f32<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.visit_coerced(visitor)
    }

    fn deserialize_f64<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.visit_coerced(visitor)
    }

    fn deserialize_char<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.visit_text(visitor)
    }

    fn deserialize_str<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.visit_text(visitor)
    }

    fn deserialize_string<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.visit_text(visitor)
    }

    fn deserialize_bytes<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_byte_buf<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        if self.is_nil() {
            visitor.visit_none()
        } else {
            visitor.visit_some(self)
        }
    }

    fn deserialize_unit<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        if self.is_nil() {
            visitor.visit_unit()
        } else {
            Err(self.mismatch(NIL))
        }
    }

    fn deserialize_unit_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_unit(visitor)
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_seq<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        let items = self.list_items("list")?;
        visitor.visit_seq(SeqDeserializer::new(items))
    }

    fn deserialize_tuple<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_tuple_struct<V>(
        self,
        _name: &'static str,
        _len: usize,
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_map<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        let items = self.list_items("key/value list")?;
        if items.len() % 2 != 0 {
            return Err(Error::type_mismatch(
                "key/value list",
                "list with an odd number of items",
            ));
        }
        visitor.visit_map(MapDeserializer::new(items))
    }

    fn deserialize_struct<V>(
        self,
        _name: &'static str,
        _fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_map(visitor)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        if self.node.is_scalar() {
            return visitor.visit_enum(EnumDeserializer {
                variant: self.node,
                value: None,
            });
        }
        match self.node.children() {
            [variant, value] if variant.is_scalar() => visitor.visit_enum(EnumDeserializer {
                variant,
                value: Some(value),
            }),
            _ => Err(self.mismatch("enum variant")),
        }
    }

    fn deserialize_identifier<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.visit_text(visitor)
    }

    fn deserialize_ignored_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_unit()
    }
}

struct SeqDeserializer<'a, 'de> {
    iter: std::slice::Iter<'a, Node<'de>>,
}

impl<'a, 'de> SeqDeserializer<'a, 'de> {
    fn new(items: &'a [Node<'de>]) -> Self {
        SeqDeserializer { iter: items.iter() }
    }
}

impl<'a, 'de> de::SeqAccess<'de> for SeqDeserializer<'a, 'de> {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some(node) => seed.deserialize(Deserializer::new(node)).map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

struct MapDeserializer<'a, 'de> {
    pairs: std::slice::ChunksExact<'a, Node<'de>>,
    value: Option<&'a Node<'de>>,
}

impl<'a, 'de> MapDeserializer<'a, 'de> {
    fn new(items: &'a [Node<'de>]) -> Self {
        MapDeserializer {
            pairs: items.chunks_exact(2),
            value: None,
        }
    }
}

impl<'a, 'de> de::MapAccess<'de> for MapDeserializer<'a, 'de> {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        match self.pairs.next() {
            Some(pair) => {
                let key = &pair[0];
                if key.is_list() {
                    return Err(Error::KeyMustBeScalar);
                }
                self.value = Some(&pair[1]);
                seed.deserialize(Deserializer::new(key)).map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        match self.value.take() {
            Some(node) => seed.deserialize(Deserializer::new(node)),
            None => Err(Error::Message(
                "next_value_seed called before next_key_seed".to_string(),
            )),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.pairs.len())
    }
}

struct EnumDeserializer<'a, 'de> {
    variant: &'a Node<'de>,
    value: Option<&'a Node<'de>>,
}

impl<'a, 'de> de::EnumAccess<'de> for EnumDeserializer<'a, 'de> {
    type Error = Error;
    type Variant = VariantDeserializer<'a, 'de>;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, Self::Variant)>
    where
        V: de::DeserializeSeed<'de>,
    {
        let variant = seed.deserialize(Deserializer::new(self.variant))?;
        Ok((variant, VariantDeserializer { value: self.value }))
    }
}

struct VariantDeserializer<'a, 'de> {
    value: Option<&'a Node<'de>>,
}

impl<'a, 'de> de::VariantAccess<'de> for VariantDeserializer<'a, 'de> {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        match self.value {
            None => Ok(()),
            Some(node) if Deserializer::new(node).is_nil() => Ok(()),
            Some(node) => Err(Error::type_mismatch("unit variant", node.kind().as_str())),
        }
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.value {
            Some(node) => seed.deserialize(Deserializer::new(node)),
            None => Err(Error::type_mismatch("newtype variant", "unit variant")),
        }
    }

    fn tuple_variant<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Some(node) => de::Deserializer::deserialize_seq(Deserializer::new(node), visitor),
            None => Err(Error::type_mismatch("tuple variant", "unit variant")),
        }
    }

    fn struct_variant<V>(self, _fields: &'static [&'static str], visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Some(node) => de::Deserializer::deserialize_map(Deserializer::new(node), visitor),
            None => Err(Error::type_mismatch("struct variant", "unit variant")),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{from_str, Error};
    use serde::Deserialize;
    use std::collections::BTreeMap;

    #[derive(Deserialize, Debug, PartialEq)]
    struct Point {
        x: i32,
        y: i32,
    }

    #[derive(Deserialize, Debug, PartialEq)]
    enum Shape {
        Empty,
        Circle(f64),
        Line(Point, Point),
        Rect { w: u32, h: u32 },
    }

    #[test]
    fn test_struct_from_key_value_list() {
        let p: Point = from_str("(y 2 x 1)").unwrap();
        assert_eq!(p, Point { x: 1, y: 2 });
    }

    #[test]
    fn test_quoted_numbers_coerce_for_numeric_targets() {
        let p: Point = from_str(r#"(x "7" y -3)"#).unwrap();
        assert_eq!(p, Point { x: 7, y: -3 });
    }

    #[test]
    fn test_numbers_read_as_strings() {
        let v: Vec<String> = from_str("(1 2.5 true word \"q\")").unwrap();
        assert_eq!(v, vec!["1", "2.5", "true", "word", "q"]);
    }

    #[test]
    fn test_borrowed_strings() {
        let v: Vec<&str> = from_str("(a \"b c\")").unwrap();
        assert_eq!(v, vec!["a", "b c"]);
    }

    #[test]
    fn test_options() {
        let v: Vec<Option<u8>> = from_str("(1 nil 3)").unwrap();
        assert_eq!(v, vec![Some(1), None, Some(3)]);
        let quoted: Option<String> = from_str("\"nil\"").unwrap();
        assert_eq!(quoted.as_deref(), Some("nil"));
    }

    #[test]
    fn test_enums() {
        let shapes: Vec<Shape> = from_str(
            "(Empty (Circle 1.5) (Line ((x 0 y 0) (x 1 y 2))) (Rect (w 3 h 4)))",
        )
        .unwrap();
        assert_eq!(
            shapes,
            vec![
                Shape::Empty,
                Shape::Circle(1.5),
                Shape::Line(Point { x: 0, y: 0 }, Point { x: 1, y: 2 }),
                Shape::Rect { w: 3, h: 4 },
            ]
        );
    }

    #[test]
    fn test_map() {
        let m: BTreeMap<String, i64> = from_str("(a 1 b -2)").unwrap();
        assert_eq!(m.get("b"), Some(&-2));
    }

    #[test]
    fn test_odd_map_is_rejected() {
        let err = from_str::<BTreeMap<String, i64>>("(a 1 b)").unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { .. }));
    }

    #[test]
    fn test_list_key_is_rejected() {
        let err = from_str::<BTreeMap<String, i64>>("((a) 1)").unwrap_err();
        assert_eq!(err, Error::KeyMustBeScalar);
    }

    #[test]
    fn test_document_shape_errors() {
        assert_eq!(from_str::<i32>("   ").unwrap_err(), Error::EmptyDocument);
        assert_eq!(
            from_str::<i32>("1 2").unwrap_err(),
            Error::TrailingValues { count: 2 }
        );
        assert_eq!(
            from_str::<i32>("(1").unwrap_err(),
            Error::UnmatchedBracket
        );
    }

    #[test]
    fn test_value_before_key_is_an_error() {
        use super::MapDeserializer;
        use crate::parse;
        use serde::de::MapAccess;
        use std::marker::PhantomData;

        let root = parse("(a 1)").unwrap().unwrap();
        let mut map = MapDeserializer::new(root[0].children());
        let err = map.next_value_seed(PhantomData::<i32>).unwrap_err();
        assert!(matches!(err, Error::Message(_)));
    }

    #[test]
    fn test_type_mismatch() {
        let err = from_str::<Vec<i32>>("abc").unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { .. }));
        assert!(from_str::<i32>("abc").is_err());
        assert!(from_str::<u8>("300").is_err());
    }
}
