//! String-interning codec for JSON trees.
//!
//! Every string in a tree, map keys included, is replaced by its position in
//! an intern table written in base 36. Tile arrays repeat a handful of labels
//! thousands of times, so the table stays tiny and each reference is one or
//! two characters.

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::error::{Error, Result};

const BASE: u32 = 36;

/// `n` in lowercase base 36.
pub fn to_base36(mut n: usize) -> String {
    if n == 0 {
        return "0".to_owned();
    }
    let mut digits = Vec::new();
    while n > 0 {
        // from_digit never fails for a digit below BASE
        digits.push(char::from_digit((n % BASE as usize) as u32, BASE).unwrap_or('0'));
        n /= BASE as usize;
    }
    digits.iter().rev().collect()
}

/// Parses a base-36 reference. Case-insensitive, no sign, no padding rules.
pub fn from_base36(s: &str) -> Option<usize> {
    if s.is_empty() || s.starts_with(['+', '-']) {
        return None;
    }
    usize::from_str_radix(s, BASE).ok()
}

#[derive(Default)]
struct Interner {
    index: HashMap<String, String>,
    table: Vec<String>,
}

impl Interner {
    fn intern(&mut self, s: &str) -> String {
        if let Some(reference) = self.index.get(s) {
            return reference.clone();
        }
        let reference = to_base36(self.table.len());
        self.table.push(s.to_owned());
        self.index.insert(s.to_owned(), reference.clone());
        reference
    }

    fn walk(&mut self, value: &Value) -> Value {
        match value {
            Value::String(s) => Value::String(self.intern(s)),
            Value::Array(items) => Value::Array(items.iter().map(|v| self.walk(v)).collect()),
            Value::Object(map) => {
                let mut out = Map::new();
                for (key, v) in map {
                    let key = self.intern(key);
                    out.insert(key, self.walk(v));
                }
                Value::Object(out)
            }
            scalar => scalar.clone(),
        }
    }
}

/// Replaces every string in `value` with a reference into the returned intern
/// table. The table lists strings in the order they were first met.
pub fn compress(value: &Value) -> (Value, Vec<String>) {
    let mut interner = Interner::default();
    let compressed = interner.walk(value);
    (compressed, interner.table)
}

fn lookup(reference: &str, table: &[String]) -> Result<String> {
    from_base36(reference)
        .and_then(|i| table.get(i))
        .cloned()
        .ok_or_else(|| Error::InternIndex {
            reference: reference.to_owned(),
            len: table.len(),
        })
}

/// Inverse of [`compress`]. Arrays are rewritten in place; maps are rebuilt
/// since their keys change.
///
/// A reference that is not base 36 or points past the end of `table` is an
/// [`Error::InternIndex`].
pub fn decompress(value: Value, table: &[String]) -> Result<Value> {
    match value {
        Value::String(s) => Ok(Value::String(lookup(&s, table)?)),
        Value::Array(mut items) => {
            for item in items.iter_mut() {
                let v = std::mem::take(item);
                *item = decompress(v, table)?;
            }
            Ok(Value::Array(items))
        }
        Value::Object(map) => {
            let mut out = Map::new();
            for (key, v) in map {
                out.insert(lookup(&key, table)?, decompress(v, table)?);
            }
            Ok(Value::Object(out))
        }
        scalar => Ok(scalar),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn base36_digits() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(9), "9");
        assert_eq!(to_base36(10), "a");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(1295), "zz");
        for n in [0, 1, 35, 36, 1000, 123_456] {
            assert_eq!(from_base36(&to_base36(n)), Some(n));
        }
        assert_eq!(from_base36("Z"), Some(35));
        assert_eq!(from_base36(""), None);
        assert_eq!(from_base36("-1"), None);
        assert_eq!(from_base36("+1"), None);
        assert_eq!(from_base36("!"), None);
    }

    #[test]
    fn strings_are_interned_in_first_seen_order() {
        let (packed, table) = compress(&json!(["b", "a", "b", 3, null]));
        assert_eq!(table, vec!["b", "a"]);
        assert_eq!(packed, json!(["0", "1", "0", 3, null]));
    }

    #[test]
    fn keys_share_the_table_with_values() {
        let (packed, table) = compress(&json!({"k": "k"}));
        assert_eq!(table, vec!["k"]);
        assert_eq!(packed, json!({"0": "0"}));
    }

    #[test]
    fn decompress_reports_bad_references() {
        let table = vec!["x".to_owned()];
        assert!(matches!(
            decompress(json!(["0", "1"]), &table),
            Err(Error::InternIndex { ref reference, len: 1 }) if reference == "1"
        ));
        assert!(matches!(
            decompress(json!({"?": 1}), &table),
            Err(Error::InternIndex { .. })
        ));
    }
}
