//! Structured function calls produced by the pattern router.

use serde::ser::{Error as _, SerializeMap};
use serde::{Serialize, Serializer};
use std::io;

/// Function name returned when no routing rule matches.
pub const UNKNOWN_FUNCTION: &str = "unknown_function";

/// A single typed argument value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ArgValue {
    Integer(i64),
    Text(String),
}

impl ArgValue {
    #[must_use]
    pub const fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            Self::Text(_) => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Integer(_) => None,
            Self::Text(s) => Some(s),
        }
    }
}

/// Named arguments in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Arguments(Vec<(String, ArgValue)>);

impl Arguments {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, name: impl Into<String>, value: ArgValue) {
        self.0.push((name.into(), value));
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ArgValue> {
        self.0.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ArgValue)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Encode as a JSON object string, `": "` after keys and `","` between
    /// entries, e.g. `{"issue_code": 15801,"department": "IT"}`.
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        let mut buf = Vec::new();
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, SpacedKeyFormatter);
        self.serialize(&mut ser)?;
        String::from_utf8(buf).map_err(serde_json::Error::custom)
    }
}

impl<K: Into<String>> FromIterator<(K, ArgValue)> for Arguments {
    fn from_iter<I: IntoIterator<Item = (K, ArgValue)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl Serialize for Arguments {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in &self.0 {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

struct SpacedKeyFormatter;

impl serde_json::ser::Formatter for SpacedKeyFormatter {
    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }
}

/// A routed function call. On the wire `arguments` is a JSON-encoded string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedCall {
    pub name: String,
    #[serde(serialize_with = "arguments_as_string")]
    pub arguments: Arguments,
}

impl ParsedCall {
    pub fn new(name: impl Into<String>, arguments: Arguments) -> Self {
        Self {
            name: name.into(),
            arguments,
        }
    }

    /// Sentinel call carrying the original query text.
    #[must_use]
    pub fn unknown(query: &str) -> Self {
        let mut arguments = Arguments::new();
        arguments.push("query", ArgValue::Text(query.to_string()));
        Self::new(UNKNOWN_FUNCTION, arguments)
    }

    #[must_use]
    pub fn is_unknown(&self) -> bool {
        self.name == UNKNOWN_FUNCTION
    }
}

fn arguments_as_string<S: Serializer>(args: &Arguments, serializer: S) -> Result<S::Ok, S::Error> {
    let encoded = args.to_json_string().map_err(S::Error::custom)?;
    serializer.serialize_str(&encoded)
}
