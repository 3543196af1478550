//! Serialization of Rust values into list text.
//!
//! This is the "object encoder" side of the crate: it walks any
//! `T: Serialize` and emits text that the tokenizer accepts.
//!
//! ## Mapping
//!
//! | Rust | List text |
//! |------|-----------|
//! | `bool` | `true` / `false` |
//! | integers, floats | decimal, locale independent |
//! | `None`, `()`, unit structs | `nil` |
//! | strings, chars | bare atom when safe, otherwise `"quoted"` |
//! | sequences, tuples | `(a b c)` |
//! | structs, maps | `(key value key value)` |
//! | unit variant | `Variant` |
//! | other variants | `(Variant payload)` |
//!
//! Struct and map output can be queried with [`Node::get`](crate::Node::get)
//! after parsing.
//!
//! ## Direct Serializer Usage
//!
//! ```rust
//! use lisp_list::Serializer;
//! use serde::Serialize;
//!
//! let mut serializer = Serializer::new();
//! vec![1, 2, 3].serialize(&mut serializer).unwrap();
//! assert_eq!(serializer.into_inner(), "(1 2 3)");
//! ```

use crate::tokenize::{is_neutral, ESCAPE, LIST_END, LIST_START, STRING_DELIMITER};
use crate::value::{coerce, ParsedValue};
use crate::{Error, Result};
use serde::{ser, Serialize};

/// The atom written for `None` and unit values.
pub const NIL: &str = "nil";

/// The list text serializer.
///
/// Always produces compact output; pretty output is a re-rendering of it
/// (see [`to_string_with_options`](crate::to_string_with_options)).
pub struct Serializer {
    output: String,
}

impl Default for Serializer {
    fn default() -> Self {
        Self::new()
    }
}

impl Serializer {
    pub fn new() -> Self {
        Serializer {
            output: String::with_capacity(128),
        }
    }

    pub fn into_inner(self) -> String {
        self.output
    }

    /// Returns `true` if `s` can be written without quotes and reads back as
    /// the same string.
    #[inline]
    fn is_bare_atom(s: &str) -> bool {
        !s.is_empty()
            && s.bytes().all(|b| {
                !is_neutral(b) && !matches!(b, LIST_START | LIST_END | STRING_DELIMITER | ESCAPE)
            })
            && s != NIL
            && matches!(coerce(s), ParsedValue::Str(_))
    }

    fn write_string(&mut self, s: &str) {
        if Self::is_bare_atom(s) {
            self.output.push_str(s);
            return;
        }
        self.output.push('"');
        for ch in s.chars() {
            if ch == '"' || ch == '\\' {
                self.output.push('\\');
            }
            self.output.push(ch);
        }
        self.output.push('"');
    }

    fn open_list(&mut self) {
        self.output.push('(');
    }

    fn close_list(&mut self) {
        self.output.push(')');
    }

    fn separate(&mut self, first: &mut bool) {
        if *first {
            *first = false;
        } else {
            self.output.push(' ');
        }
    }

    fn open_variant(&mut self, variant: &str) {
        self.open_list();
        self.write_string(variant);
        self.output.push(' ');
    }
}

impl<'a> ser::Serializer for &'a mut Serializer {
    type Ok = ();
    type Error = Error;

    type SerializeSeq = SeqSerializer<'a>;
    type SerializeTuple = SeqSerializer<'a>;
    type SerializeTupleStruct = SeqSerializer<'a>;
    type SerializeTupleVariant = SeqSerializer<'a>;
    type SerializeMap = MapSerializer<'a>;
    type SerializeStruct = MapSerializer<'a>;
    type SerializeStructVariant = MapSerializer<'a>;

    fn serialize_bool(self, v: bool) -> Result<Self::Ok> {
        self.output.push_str(if v { "true" } else { "false" });
        Ok(())
    }

    fn serialize_i8(self, v: i8) -> Result<Self::Ok> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i16(self, v: i16) -> Result<Self::Ok> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i32(self, v: i32) -> Result<Self::Ok> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i64(self, v: i64) -> Result<Self::Ok> {
        self.output.push_str(&v.to_string());
        Ok(())
    }

    fn serialize_u8(self, v: u8) -> Result<Self::Ok> {
        self.serialize_u64(v as u64)
    }

    fn serialize_u16(self, v: u16) -> Result<Self::Ok> {
        self.serialize_u64(v as u64)
    }

    fn serialize_u32(self, v: u32) -> Result<Self::Ok> {
        self.serialize_u64(v as u64)
    }

    fn serialize_u64(self, v: u64) -> Result<Self::Ok> {
        self.output.push_str(&v.to_string());
        Ok(())
    }

    fn serialize_f32(self, v: f32) -> Result<Self::Ok> {
        // Widening first would print digits `f32` never had.
        self.output.push_str(&v.to_string());
        Ok(())
    }

    fn serialize_f64(self, v: f64) -> Result<Self::Ok> {
        // `Display` never depends on the locale and reads back with `parse`.
        self.output.push_str(&v.to_string());
        Ok(())
    }

    fn serialize_char(self, v: char) -> Result<Self::Ok> {
        let mut buf = [0u8; 4];
        self.serialize_str(v.encode_utf8(&mut buf))
    }

    fn serialize_str(self, v: &str) -> Result<Self::Ok> {
        self.write_string(v);
        Ok(())
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Self::Ok> {
        use ser::SerializeSeq;
        let mut seq = self.serialize_seq(Some(v.len()))?;
        for byte in v {
            seq.serialize_element(byte)?;
        }
        seq.end()
    }

    fn serialize_none(self) -> Result<Self::Ok> {
        self.serialize_unit()
    }

    fn serialize_some<T>(self, value: &T) -> Result<Self::Ok>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Self::Ok> {
        self.output.push_str(NIL);
        Ok(())
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Self::Ok> {
        self.serialize_unit()
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Self::Ok> {
        self.serialize_str(variant)
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Self::Ok>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Self::Ok>
    where
        T: ?Sized + Serialize,
    {
        self.open_variant(variant);
        value.serialize(&mut *self)?;
        self.close_list();
        Ok(())
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        self.open_list();
        Ok(SeqSerializer {
            ser: self,
            first: true,
            closers: 1,
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<Self::SerializeTuple> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        self.open_variant(variant);
        self.open_list();
        Ok(SeqSerializer {
            ser: self,
            first: true,
            closers: 2,
        })
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        self.open_list();
        Ok(MapSerializer {
            ser: self,
            first: true,
            closers: 1,
        })
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<Self::SerializeStruct> {
        self.serialize_map(Some(len))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        self.open_variant(variant);
        self.open_list();
        Ok(MapSerializer {
            ser: self,
            first: true,
            closers: 2,
        })
    }
}

/// Writes the elements of sequences, tuples and tuple variants.
pub struct SeqSerializer<'a> {
    ser: &'a mut Serializer,
    first: bool,
    // Number of `)` to write at the end: 2 when wrapped in a variant list.
    closers: usize,
}

impl SeqSerializer<'_> {
    fn element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.ser.separate(&mut self.first);
        value.serialize(&mut *self.ser)
    }

    fn finish(self) -> Result<()> {
        for _ in 0..self.closers {
            self.ser.close_list();
        }
        Ok(())
    }
}

impl ser::SerializeSeq for SeqSerializer<'_> {
    type Ok = ();
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.element(value)
    }

    fn end(self) -> Result<Self::Ok> {
        self.finish()
    }
}

impl ser::SerializeTuple for SeqSerializer<'_> {
    type Ok = ();
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.element(value)
    }

    fn end(self) -> Result<Self::Ok> {
        self.finish()
    }
}

impl ser::SerializeTupleStruct for SeqSerializer<'_> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.element(value)
    }

    fn end(self) -> Result<Self::Ok> {
        self.finish()
    }
}

impl ser::SerializeTupleVariant for SeqSerializer<'_> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.element(value)
    }

    fn end(self) -> Result<Self::Ok> {
        self.finish()
    }
}

/// Writes maps, structs and struct variants as alternating key/value lists.
pub struct MapSerializer<'a> {
    ser: &'a mut Serializer,
    first: bool,
    closers: usize,
}

impl MapSerializer<'_> {
    fn key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.ser.separate(&mut self.first);
        let start = self.ser.output.len();
        key.serialize(&mut *self.ser)?;
        if self.ser.output[start..].starts_with('(') {
            return Err(Error::KeyMustBeScalar);
        }
        Ok(())
    }

    fn value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.ser.output.push(' ');
        value.serialize(&mut *self.ser)
    }

    fn finish(self) -> Result<()> {
        for _ in 0..self.closers {
            self.ser.close_list();
        }
        Ok(())
    }
}

impl ser::SerializeMap for MapSerializer<'_> {
    type Ok = ();
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.key(key)
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.value(value)
    }

    fn end(self) -> Result<Self::Ok> {
        self.finish()
    }
}

impl ser::SerializeStruct for MapSerializer<'_> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.key(key)?;
        self.value(value)
    }

    fn end(self) -> Result<Self::Ok> {
        self.finish()
    }
}

impl ser::SerializeStructVariant for MapSerializer<'_> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.key(key)?;
        self.value(value)
    }

    fn end(self) -> Result<Self::Ok> {
        self.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn to_text<T: Serialize + ?Sized>(value: &T) -> String {
        let mut ser = Serializer::new();
        value.serialize(&mut ser).unwrap();
        ser.into_inner()
    }

    #[derive(Serialize)]
    struct Point {
        x: i32,
        y: i32,
    }

    #[derive(Serialize)]
    enum Shape {
        Empty,
        Circle(f64),
        Line(Point, Point),
        Rect { w: u32, h: u32 },
    }

    #[test]
    fn test_primitives() {
        assert_eq!(to_text(&true), "true");
        assert_eq!(to_text(&-12i32), "-12");
        assert_eq!(to_text(&u64::MAX), "18446744073709551615");
        assert_eq!(to_text(&1.5f64), "1.5");
        assert_eq!(to_text(&()), "nil");
        assert_eq!(to_text(&None::<i32>), "nil");
        assert_eq!(to_text(&Some(3)), "3");
    }

    #[test]
    fn test_strings_quote_when_needed() {
        assert_eq!(to_text("plain"), "plain");
        assert_eq!(to_text(""), "\"\"");
        assert_eq!(to_text("two words"), "\"two words\"");
        assert_eq!(to_text("a(b"), "\"a(b\"");
        assert_eq!(to_text("say \"hi\""), r#""say \"hi\"""#);
        assert_eq!(to_text("back\\slash"), r#""back\\slash""#);
        assert_eq!(to_text("42"), "\"42\"");
        assert_eq!(to_text("true"), "\"true\"");
        assert_eq!(to_text("nil"), "\"nil\"");
        assert_eq!(to_text(&'x'), "x");
    }

    #[test]
    fn test_struct_is_key_value_list() {
        assert_eq!(to_text(&Point { x: 1, y: -2 }), "(x 1 y -2)");
    }

    #[test]
    fn test_sequences() {
        assert_eq!(to_text(&Vec::<i32>::new()), "()");
        assert_eq!(to_text(&vec![vec![1], vec![2, 3]]), "((1) (2 3))");
        assert_eq!(to_text(&(1, "a", false)), "(1 a false)");
    }

    #[test]
    fn test_enum_variants() {
        assert_eq!(to_text(&Shape::Empty), "Empty");
        assert_eq!(to_text(&Shape::Circle(2.5)), "(Circle 2.5)");
        assert_eq!(
            to_text(&Shape::Line(Point { x: 0, y: 0 }, Point { x: 1, y: 1 })),
            "(Line ((x 0 y 0) (x 1 y 1)))"
        );
        assert_eq!(to_text(&Shape::Rect { w: 2, h: 3 }), "(Rect (w 2 h 3))");
    }

    #[test]
    fn test_map_keys_must_be_scalars() {
        let mut map = BTreeMap::new();
        map.insert(vec![1], 2);
        let mut ser = Serializer::new();
        assert_eq!(map.serialize(&mut ser), Err(Error::KeyMustBeScalar));
    }

    #[test]
    fn test_map() {
        let mut map = BTreeMap::new();
        map.insert("b", 2);
        map.insert("a", 1);
        assert_eq!(to_text(&map), "(a 1 b 2)");
    }
}
