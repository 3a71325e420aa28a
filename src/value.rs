//! JSON value model.
//!
//! A value is a tagged variant over null, bool, long, float, double,
//! string, array, and object, plus a handle to the allocator context that
//! owns its string buffers. Objects are keyed in byte-wise string order;
//! arrays preserve element order. Values form pure trees: children are
//! destroyed transitively on drop and cycles cannot be constructed.
//!
//! Accessors are fatal on kind mismatch. Reading the wrong kind is a
//! programmer error, not a parse error, and panics with the offending
//! type name; parse errors always travel as
//! [`JsonResult`](crate::JsonResult).

use std::collections::BTreeMap;
use std::fmt;
use std::ops::{Index, IndexMut};

use crate::context::{JsonContext, StrBuf};
use crate::serializer;

/// Discriminant of a [`JsonValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JsonType {
    /// The null literal.
    Null,
    /// A boolean.
    Bool,
    /// A signed 64-bit integer.
    Long,
    /// A single-precision float; produced only by explicit construction,
    /// never by the parser.
    Float,
    /// A double-precision float.
    Double,
    /// An owned UTF-8 string.
    String,
    /// An ordered sequence of values.
    Array,
    /// A string-keyed mapping in byte-wise key order.
    Object,
}

#[derive(Debug, Clone)]
enum Repr {
    Null,
    Bool(bool),
    Long(i64),
    Float(f32),
    Double(f64),
    String(StrBuf),
    Array(Vec<JsonValue>),
    Object(BTreeMap<String, JsonValue>),
}

/// A JSON value bound to the allocator context that owns its buffers.
#[derive(Debug, Clone)]
pub struct JsonValue {
    ctx: JsonContext,
    repr: Repr,
}

impl JsonValue {
    /// The null value.
    pub fn null(ctx: &JsonContext) -> JsonValue {
        JsonValue {
            ctx: ctx.clone(),
            repr: Repr::Null,
        }
    }

    /// A boolean value.
    pub fn boolean(ctx: &JsonContext, value: bool) -> JsonValue {
        JsonValue {
            ctx: ctx.clone(),
            repr: Repr::Bool(value),
        }
    }

    /// A signed integer value.
    pub fn long(ctx: &JsonContext, value: i64) -> JsonValue {
        JsonValue {
            ctx: ctx.clone(),
            repr: Repr::Long(value),
        }
    }

    /// An unsigned integer value; anything above `i64::MAX` becomes a
    /// double.
    pub fn unsigned_long(ctx: &JsonContext, value: u64) -> JsonValue {
        if value <= i64::MAX as u64 {
            JsonValue::long(ctx, value as i64)
        } else {
            JsonValue::double(ctx, value as f64)
        }
    }

    /// A single-precision float value.
    pub fn float(ctx: &JsonContext, value: f32) -> JsonValue {
        JsonValue {
            ctx: ctx.clone(),
            repr: Repr::Float(value),
        }
    }

    /// A double-precision float value.
    pub fn double(ctx: &JsonContext, value: f64) -> JsonValue {
        JsonValue {
            ctx: ctx.clone(),
            repr: Repr::Double(value),
        }
    }

    /// A string value; `text` is copied into a context-owned buffer.
    pub fn string(ctx: &JsonContext, text: &str) -> JsonValue {
        JsonValue {
            ctx: ctx.clone(),
            repr: Repr::String(StrBuf::new(ctx, text)),
        }
    }

    pub(crate) fn array_from(ctx: &JsonContext, items: Vec<JsonValue>) -> JsonValue {
        JsonValue {
            ctx: ctx.clone(),
            repr: Repr::Array(items),
        }
    }

    pub(crate) fn object_from(
        ctx: &JsonContext,
        members: BTreeMap<String, JsonValue>,
    ) -> JsonValue {
        JsonValue {
            ctx: ctx.clone(),
            repr: Repr::Object(members),
        }
    }

    /// The value's kind.
    pub fn json_type(&self) -> JsonType {
        match self.repr {
            Repr::Null => JsonType::Null,
            Repr::Bool(_) => JsonType::Bool,
            Repr::Long(_) => JsonType::Long,
            Repr::Float(_) => JsonType::Float,
            Repr::Double(_) => JsonType::Double,
            Repr::String(_) => JsonType::String,
            Repr::Array(_) => JsonType::Array,
            Repr::Object(_) => JsonType::Object,
        }
    }

    /// The kind name, for messages.
    pub fn type_name(&self) -> &'static str {
        match self.repr {
            Repr::Null => "null",
            Repr::Bool(_) => "boolean",
            Repr::Long(_) => "long",
            Repr::Float(_) => "float",
            Repr::Double(_) => "double",
            Repr::String(_) => "string",
            Repr::Array(_) => "array",
            Repr::Object(_) => "object",
        }
    }

    /// The allocator context this value's buffers come from.
    pub fn context(&self) -> &JsonContext {
        &self.ctx
    }

    /// True for the null value.
    pub fn is_null(&self) -> bool {
        matches!(self.repr, Repr::Null)
    }

    /// True for a boolean.
    pub fn is_bool(&self) -> bool {
        matches!(self.repr, Repr::Bool(_))
    }

    /// True for a long.
    pub fn is_long(&self) -> bool {
        matches!(self.repr, Repr::Long(_))
    }

    /// True for a single-precision float.
    pub fn is_float(&self) -> bool {
        matches!(self.repr, Repr::Float(_))
    }

    /// True for a double-precision float.
    pub fn is_double(&self) -> bool {
        matches!(self.repr, Repr::Double(_))
    }

    /// True for any numeric kind.
    pub fn is_number(&self) -> bool {
        matches!(self.repr, Repr::Long(_) | Repr::Float(_) | Repr::Double(_))
    }

    /// True for a string.
    pub fn is_string(&self) -> bool {
        matches!(self.repr, Repr::String(_))
    }

    /// True for an array.
    pub fn is_array(&self) -> bool {
        matches!(self.repr, Repr::Array(_))
    }

    /// True for an object.
    pub fn is_object(&self) -> bool {
        matches!(self.repr, Repr::Object(_))
    }

    /// The boolean payload.
    ///
    /// # Panics
    ///
    /// Panics when the value is not a boolean.
    pub fn get_bool(&self) -> bool {
        match self.repr {
            Repr::Bool(value) => value,
            _ => self.mismatch("boolean"),
        }
    }

    /// The integer payload.
    ///
    /// # Panics
    ///
    /// Panics when the value is not a long.
    pub fn get_long(&self) -> i64 {
        match self.repr {
            Repr::Long(value) => value,
            _ => self.mismatch("long"),
        }
    }

    /// The float payload, narrowing a double when necessary.
    ///
    /// # Panics
    ///
    /// Panics when the value is not a float or double.
    pub fn get_float(&self) -> f32 {
        match self.repr {
            Repr::Float(value) => value,
            Repr::Double(value) => value as f32,
            _ => self.mismatch("float"),
        }
    }

    /// The double payload, widening a float when necessary.
    ///
    /// # Panics
    ///
    /// Panics when the value is not a float or double.
    pub fn get_double(&self) -> f64 {
        match self.repr {
            Repr::Float(value) => value as f64,
            Repr::Double(value) => value,
            _ => self.mismatch("double"),
        }
    }

    /// Any numeric payload as a double.
    ///
    /// # Panics
    ///
    /// Panics when the value is not numeric.
    pub fn get_number(&self) -> f64 {
        match self.repr {
            Repr::Long(value) => value as f64,
            Repr::Float(value) => value as f64,
            Repr::Double(value) => value,
            _ => self.mismatch("number"),
        }
    }

    /// The string payload as text.
    ///
    /// # Panics
    ///
    /// Panics when the value is not a string.
    pub fn get_str(&self) -> &str {
        match &self.repr {
            Repr::String(buf) => buf.as_str(),
            _ => self.mismatch("string"),
        }
    }

    /// The string payload's owned buffer (NUL-terminated, for C interop).
    ///
    /// # Panics
    ///
    /// Panics when the value is not a string.
    pub fn get_string(&self) -> &StrBuf {
        match &self.repr {
            Repr::String(buf) => buf,
            _ => self.mismatch("string"),
        }
    }

    /// The array payload.
    ///
    /// # Panics
    ///
    /// Panics when the value is not an array.
    pub fn get_array(&self) -> &Vec<JsonValue> {
        match &self.repr {
            Repr::Array(items) => items,
            _ => self.mismatch("array"),
        }
    }

    /// The array payload, mutably.
    ///
    /// # Panics
    ///
    /// Panics when the value is not an array.
    pub fn get_array_mut(&mut self) -> &mut Vec<JsonValue> {
        if !self.is_array() {
            self.mismatch("array");
        }
        let Repr::Array(items) = &mut self.repr else {
            unreachable!()
        };
        items
    }

    /// The object payload.
    ///
    /// # Panics
    ///
    /// Panics when the value is not an object.
    pub fn get_object(&self) -> &BTreeMap<String, JsonValue> {
        match &self.repr {
            Repr::Object(members) => members,
            _ => self.mismatch("object"),
        }
    }

    /// The object payload, mutably.
    ///
    /// # Panics
    ///
    /// Panics when the value is not an object.
    pub fn get_object_mut(&mut self) -> &mut BTreeMap<String, JsonValue> {
        if !self.is_object() {
            self.mismatch("object");
        }
        let Repr::Object(members) = &mut self.repr else {
            unreachable!()
        };
        members
    }

    /// True when the value is an object containing `key`.
    pub fn contains(&self, key: &str) -> bool {
        match &self.repr {
            Repr::Object(members) => members.contains_key(key),
            _ => false,
        }
    }

    /// Replace the payload with an empty array.
    pub fn set_array(&mut self) {
        self.repr = Repr::Array(Vec::new());
    }

    /// Replace the payload with an empty object.
    pub fn set_object(&mut self) {
        self.repr = Repr::Object(BTreeMap::new());
    }

    /// Serialize with two-space indentation.
    pub fn to_string_pretty(&self) -> String {
        serializer::to_string_pretty(self)
    }

    /// Deep copy whose string buffers are re-allocated from `ctx`.
    pub fn clone_into_context(&self, ctx: &JsonContext) -> JsonValue {
        let repr = match &self.repr {
            Repr::String(buf) => Repr::String(StrBuf::new(ctx, buf.as_str())),
            Repr::Array(items) => Repr::Array(
                items.iter().map(|item| item.clone_into_context(ctx)).collect(),
            ),
            Repr::Object(members) => Repr::Object(
                members
                    .iter()
                    .map(|(key, item)| (key.clone(), item.clone_into_context(ctx)))
                    .collect(),
            ),
            other => other.clone(),
        };
        JsonValue {
            ctx: ctx.clone(),
            repr,
        }
    }

    fn mismatch(&self, expected: &str) -> ! {
        panic!(
            "json type mismatch: expected {expected}, found {}",
            self.type_name()
        )
    }
}

impl fmt::Display for JsonValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&serializer::to_string(self))
    }
}

impl PartialEq for JsonValue {
    fn eq(&self, other: &JsonValue) -> bool {
        match (&self.repr, &other.repr) {
            (Repr::Null, Repr::Null) => true,
            (Repr::Bool(a), Repr::Bool(b)) => a == b,
            (Repr::Long(a), Repr::Long(b)) => a == b,
            (Repr::Float(a), Repr::Float(b)) => a == b,
            (Repr::Double(a), Repr::Double(b)) => a == b,
            (Repr::String(a), Repr::String(b)) => a == b,
            (Repr::Array(a), Repr::Array(b)) => a == b,
            (Repr::Object(a), Repr::Object(b)) => a == b,
            _ => false,
        }
    }
}

impl Index<usize> for JsonValue {
    type Output = JsonValue;

    /// # Panics
    ///
    /// Panics when the value is not an array or `index` is out of bounds.
    fn index(&self, index: usize) -> &JsonValue {
        match &self.repr {
            Repr::Array(items) => &items[index],
            _ => panic!("cannot index {} with an integer", self.type_name()),
        }
    }
}

impl IndexMut<usize> for JsonValue {
    /// Null promotes to an array; indexing past the end appends nulls.
    ///
    /// # Panics
    ///
    /// Panics when the value is neither an array nor null.
    fn index_mut(&mut self, index: usize) -> &mut JsonValue {
        if self.is_null() {
            self.set_array();
        }
        if !self.is_array() {
            panic!("cannot index {} with an integer", self.type_name());
        }
        let ctx = self.ctx.clone();
        let Repr::Array(items) = &mut self.repr else {
            unreachable!()
        };
        while items.len() <= index {
            items.push(JsonValue::null(&ctx));
        }
        &mut items[index]
    }
}

impl Index<&str> for JsonValue {
    type Output = JsonValue;

    /// # Panics
    ///
    /// Panics when the value is not an object or `key` is absent.
    fn index(&self, key: &str) -> &JsonValue {
        match &self.repr {
            Repr::Object(members) => &members[key],
            _ => panic!("cannot index {} with a string", self.type_name()),
        }
    }
}

impl IndexMut<&str> for JsonValue {
    /// Null promotes to an object; a missing key is inserted as null.
    ///
    /// # Panics
    ///
    /// Panics when the value is neither an object nor null.
    fn index_mut(&mut self, key: &str) -> &mut JsonValue {
        if self.is_null() {
            self.set_object();
        }
        if !self.is_object() {
            panic!("cannot index {} with a string", self.type_name());
        }
        let ctx = self.ctx.clone();
        let Repr::Object(members) = &mut self.repr else {
            unreachable!()
        };
        members
            .entry(key.to_owned())
            .or_insert_with(|| JsonValue::null(&ctx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> JsonContext {
        JsonContext::new()
    }

    #[test]
    fn test_kinds_and_predicates() {
        let ctx = ctx();
        assert!(JsonValue::null(&ctx).is_null());
        assert!(JsonValue::boolean(&ctx, true).is_bool());
        assert!(JsonValue::long(&ctx, 42).is_long());
        assert!(JsonValue::float(&ctx, 1.5).is_float());
        assert!(JsonValue::double(&ctx, 1.5).is_double());
        assert!(JsonValue::string(&ctx, "x").is_string());
        assert!(JsonValue::long(&ctx, 0).is_number());
        assert_eq!(JsonValue::null(&ctx).json_type(), JsonType::Null);
    }

    #[test]
    fn test_accessors() {
        let ctx = ctx();
        assert!(JsonValue::boolean(&ctx, true).get_bool());
        assert_eq!(JsonValue::long(&ctx, -3).get_long(), -3);
        assert_eq!(JsonValue::double(&ctx, 2.5).get_float(), 2.5f32);
        assert_eq!(JsonValue::float(&ctx, 0.25).get_double(), 0.25);
        assert_eq!(JsonValue::long(&ctx, 7).get_number(), 7.0);
        assert_eq!(JsonValue::string(&ctx, "hi").get_str(), "hi");
    }

    #[test]
    #[should_panic(expected = "json type mismatch")]
    fn test_accessor_mismatch_is_fatal() {
        let ctx = ctx();
        JsonValue::boolean(&ctx, true).get_str();
    }

    #[test]
    fn test_unsigned_promotion() {
        let ctx = ctx();
        let small = JsonValue::unsigned_long(&ctx, 17);
        assert_eq!(small.get_long(), 17);
        let big = JsonValue::unsigned_long(&ctx, u64::MAX);
        assert!(big.is_double());
        assert_eq!(big.get_double(), u64::MAX as f64);
    }

    #[test]
    fn test_set_array_clears_payload() {
        let ctx = ctx();
        let mut value = JsonValue::string(&ctx, "gone");
        value.set_array();
        assert!(value.is_array());
        assert!(value.get_array().is_empty());
        value.set_object();
        assert!(value.is_object());
    }

    #[test]
    fn test_index_mut_promotes_null_to_array() {
        let ctx = ctx();
        let mut value = JsonValue::null(&ctx);
        value[2] = JsonValue::long(&ctx, 9);
        assert!(value.is_array());
        assert_eq!(value.get_array().len(), 3);
        assert!(value[0].is_null());
        assert!(value[1].is_null());
        assert_eq!(value[2].get_long(), 9);
    }

    #[test]
    fn test_index_mut_promotes_null_to_object() {
        let ctx = ctx();
        let mut value = JsonValue::null(&ctx);
        value["k"] = JsonValue::boolean(&ctx, false);
        assert!(value.is_object());
        assert!(value.contains("k"));
        assert!(!value.contains("missing"));
        assert!(!value["k"].get_bool());
    }

    #[test]
    fn test_insert_replaces_existing_key() {
        let ctx = ctx();
        let mut value = JsonValue::null(&ctx);
        value["k"] = JsonValue::long(&ctx, 1);
        value["k"] = JsonValue::long(&ctx, 2);
        assert_eq!(value["k"].get_long(), 2);
        assert_eq!(value.get_object().len(), 1);
    }

    #[test]
    #[should_panic(expected = "cannot index")]
    fn test_index_mut_rejects_scalar() {
        let ctx = ctx();
        let mut value = JsonValue::long(&ctx, 1);
        let _ = &mut value[0];
    }

    #[test]
    fn test_structural_equality() {
        let ctx = ctx();
        let mut a = JsonValue::null(&ctx);
        a["x"] = JsonValue::long(&ctx, 1);
        a["y"][0] = JsonValue::string(&ctx, "s");
        let mut b = JsonValue::null(&ctx);
        b["y"][0] = JsonValue::string(&ctx, "s");
        b["x"] = JsonValue::long(&ctx, 1);
        assert_eq!(a, b);
        b["x"] = JsonValue::long(&ctx, 2);
        assert_ne!(a, b);
        // Kinds never compare equal across each other.
        assert_ne!(JsonValue::long(&ctx, 1), JsonValue::double(&ctx, 1.0));
    }

    #[test]
    fn test_clone_into_context() {
        let source = ctx();
        let target = ctx();
        let mut value = JsonValue::null(&source);
        value["s"] = JsonValue::string(&source, "text");
        let copy = value.clone_into_context(&target);
        assert_eq!(copy, value);
        assert!(copy.context().same_alloc(&target));
        assert!(copy["s"].get_string().context().same_alloc(&target));
    }

    #[test]
    fn test_object_iterates_in_key_order() {
        let ctx = ctx();
        let mut value = JsonValue::null(&ctx);
        for key in ["zeta", "alpha", "mid"] {
            value[key] = JsonValue::long(&ctx, 0);
        }
        let keys: Vec<&str> = value.get_object().keys().map(String::as_str).collect();
        assert_eq!(keys, ["alpha", "mid", "zeta"]);
    }
}
