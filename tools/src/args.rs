//! Typed access to the loosely-typed arguments an assistant sends.

use serde_json::{Map, Value};
use thiserror::Error;

/// Client-input errors raised while reading tool arguments.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgumentError {
    /// A required argument was absent (or `null`).
    #[error("missing required argument: {0}")]
    Missing(&'static str),
    /// The argument was present but could not be read as the declared type.
    #[error("invalid argument {name}: expected {expected}")]
    InvalidType {
        /// Argument name.
        name: &'static str,
        /// Human-readable expected type.
        expected: &'static str,
    },
}

/// Borrowed view over the `arguments` object of a tool invocation.
#[derive(Debug, Clone, Copy)]
pub struct Arguments<'a> {
    inner: &'a Map<String, Value>,
}

impl<'a> Arguments<'a> {
    pub fn new(inner: &'a Map<String, Value>) -> Self {
        Self { inner }
    }

    /// Looks up an argument, treating JSON `null` as absent.
    fn get(&self, name: &str) -> Option<&'a Value> {
        self.inner.get(name).filter(|v| !v.is_null())
    }

    /// Reads an integer argument.
    ///
    /// Accepts JSON numbers with no fractional part and strings holding a
    /// decimal integer, since assistants frequently quote IDs.
    pub fn integer(&self, name: &'static str) -> Result<Option<i64>, ArgumentError> {
        let invalid = ArgumentError::InvalidType {
            name,
            expected: "integer",
        };
        match self.get(name) {
            None => Ok(None),
            Some(Value::Number(n)) => n.as_i64().map(Some).ok_or(invalid),
            Some(Value::String(s)) => s.trim().parse::<i64>().map(Some).map_err(|_| invalid),
            Some(_) => Err(invalid),
        }
    }

    /// Reads a string argument.
    pub fn string(&self, name: &'static str) -> Result<Option<&'a str>, ArgumentError> {
        match self.get(name) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(_) => Err(ArgumentError::InvalidType {
                name,
                expected: "string",
            }),
        }
    }

    /// Reads an integer argument that must be present.
    pub fn required_integer(&self, name: &'static str) -> Result<i64, ArgumentError> {
        self.integer(name)?.ok_or(ArgumentError::Missing(name))
    }

    /// Reads an integer argument, falling back to `default` when absent.
    pub fn integer_or(&self, name: &'static str, default: i64) -> Result<i64, ArgumentError> {
        Ok(self.integer(name)?.unwrap_or(default))
    }

    /// Reads a string argument, falling back to `default` when absent.
    pub fn string_or(
        &self,
        name: &'static str,
        default: &'a str,
    ) -> Result<&'a str, ArgumentError> {
        Ok(self.string(name)?.unwrap_or(default))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(v: Value) -> Map<String, Value> {
        v.as_object().cloned().expect("object")
    }

    #[test]
    fn integer_from_number_and_string() {
        let m = map(json!({"a": 7, "b": "42", "c": " 3 "}));
        let args = Arguments::new(&m);
        assert_eq!(args.integer("a"), Ok(Some(7)));
        assert_eq!(args.integer("b"), Ok(Some(42)));
        assert_eq!(args.integer("c"), Ok(Some(3)));
    }

    #[test]
    fn null_counts_as_absent() {
        let m = map(json!({"container_id": null}));
        let args = Arguments::new(&m);
        assert_eq!(
            args.required_integer("container_id"),
            Err(ArgumentError::Missing("container_id"))
        );
        assert_eq!(args.integer_or("container_id", 5), Ok(5));
    }

    #[test]
    fn fractional_and_garbage_are_rejected() {
        let m = map(json!({"x": 1.5, "y": "abc", "z": [1]}));
        let args = Arguments::new(&m);
        for name in ["x", "y", "z"] {
            assert!(matches!(
                args.integer(name),
                Err(ArgumentError::InvalidType { expected: "integer", .. })
            ));
        }
    }

    #[test]
    fn string_rejects_numbers() {
        let m = map(json!({"scope": 3}));
        let args = Arguments::new(&m);
        assert_eq!(
            args.string("scope"),
            Err(ArgumentError::InvalidType {
                name: "scope",
                expected: "string"
            })
        );
    }

    #[test]
    fn defaults_apply_when_absent() {
        let m = Map::new();
        let args = Arguments::new(&m);
        assert_eq!(args.integer_or("page", 0), Ok(0));
        assert_eq!(args.string_or("scope", "all"), Ok("all"));
    }

    #[test]
    fn missing_display_names_the_argument() {
        let err = ArgumentError::Missing("playbook_id");
        assert_eq!(err.to_string(), "missing required argument: playbook_id");
    }
}
