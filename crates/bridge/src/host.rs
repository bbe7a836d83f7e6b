//! Values exchanged with the host.

use bytes::Bytes;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use simbridge_engine::Issue;

use crate::Float64Buffer;

/// A host-visible value.
#[derive(Debug, Clone, PartialEq)]
pub enum HostValue {
	/// No value.
	Undefined,
	/// A boolean.
	Bool(bool),
	/// A number; hosts only have doubles.
	Number(f64),
	/// A string.
	String(String),
	/// Raw bytes.
	Bytes(Bytes),
	/// A typed `f64` array.
	Float64Array(Float64Buffer),
	/// A heterogeneous array.
	Array(Vec<HostValue>),
	/// An object with ordered keys.
	Object(Vec<(String, HostValue)>),
}

impl HostValue {
	/// Name of the variant, used in conversion errors.
	pub const fn type_name(&self) -> &'static str {
		match self {
			Self::Undefined => "undefined",
			Self::Bool(_) => "boolean",
			Self::Number(_) => "number",
			Self::String(_) => "string",
			Self::Bytes(_) => "buffer",
			Self::Float64Array(_) => "Float64Array",
			Self::Array(_) => "array",
			Self::Object(_) => "object",
		}
	}

	/// Element count of an array-like value.
	pub fn len(&self) -> Option<usize> {
		match self {
			Self::Bytes(bytes) => Some(bytes.len()),
			Self::Float64Array(buffer) => Some(buffer.len()),
			Self::Array(items) => Some(items.len()),
			_ => None,
		}
	}

	/// Field `key` of an object.
	pub fn get(&self, key: &str) -> Option<&HostValue> {
		match self {
			Self::Object(fields) => fields.iter().find(|(name, _)| name == key).map(|(_, value)| value),
			_ => None,
		}
	}

	/// The number, if this is one.
	pub fn to_f64(&self) -> Option<f64> {
		match self {
			Self::Number(number) => Some(*number),
			_ => None,
		}
	}

	/// The number as a non-negative integer key.
	///
	/// Fractional, negative and non-finite numbers are rejected rather than truncated.
	pub fn to_size_t(&self) -> Option<u64> {
		let number = self.to_f64()?;
		(number.is_finite() && number >= 0.0 && number.fract() == 0.0 && number < u64::MAX as f64).then_some(number as u64)
	}

	/// The number as an `i32` index or count.
	pub fn to_i32(&self) -> Option<i32> {
		let number = self.to_f64()?;
		(number.fract() == 0.0 && number >= f64::from(i32::MIN) && number <= f64::from(i32::MAX)).then_some(number as i32)
	}

	/// The string, if this is one.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::String(text) => Some(text),
			_ => None,
		}
	}

	/// The raw bytes, if this is a buffer.
	pub fn as_bytes(&self) -> Option<&Bytes> {
		match self {
			Self::Bytes(bytes) => Some(bytes),
			_ => None,
		}
	}

	/// Serialises the value as JSON. Buffers become arrays of numbers.
	pub fn to_json(&self) -> serde_json::Result<String> {
		serde_json::to_string(self)
	}
}

impl From<bool> for HostValue {
	fn from(value: bool) -> Self {
		Self::Bool(value)
	}
}

impl From<f64> for HostValue {
	fn from(value: f64) -> Self {
		Self::Number(value)
	}
}

impl From<i32> for HostValue {
	fn from(value: i32) -> Self {
		Self::Number(f64::from(value))
	}
}

impl From<usize> for HostValue {
	fn from(value: usize) -> Self {
		Self::Number(value as f64)
	}
}

impl From<u64> for HostValue {
	fn from(value: u64) -> Self {
		Self::Number(value as f64)
	}
}

impl From<String> for HostValue {
	fn from(value: String) -> Self {
		Self::String(value)
	}
}

impl From<&str> for HostValue {
	fn from(value: &str) -> Self {
		Self::String(value.to_string())
	}
}

impl From<Bytes> for HostValue {
	fn from(value: Bytes) -> Self {
		Self::Bytes(value)
	}
}

impl<T: Into<HostValue>> From<Option<T>> for HostValue {
	fn from(value: Option<T>) -> Self {
		value.map_or(Self::Undefined, Into::into)
	}
}

impl From<&Issue> for HostValue {
	fn from(issue: &Issue) -> Self {
		Self::Object(vec![
			("type".to_string(), Self::from(issue.kind().discriminant())),
			("typeAsString".to_string(), Self::from(issue.kind_as_text())),
			("description".to_string(), Self::from(issue.description())),
		])
	}
}

impl From<Vec<Issue>> for HostValue {
	fn from(issues: Vec<Issue>) -> Self {
		Self::Array(issues.iter().map(Self::from).collect())
	}
}

impl Serialize for HostValue {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		match self {
			Self::Undefined => serializer.serialize_unit(),
			Self::Bool(value) => serializer.serialize_bool(*value),
			Self::Number(value) => serializer.serialize_f64(*value),
			Self::String(value) => serializer.serialize_str(value),
			Self::Bytes(bytes) => serializer.collect_seq(bytes.iter()),
			Self::Float64Array(buffer) => {
				let mut seq = serializer.serialize_seq(Some(buffer.len()))?;
				for value in buffer.to_vec() {
					seq.serialize_element(&value)?;
				}
				seq.end()
			}
			Self::Array(items) => serializer.collect_seq(items),
			Self::Object(fields) => {
				let mut map = serializer.serialize_map(Some(fields.len()))?;
				for (key, value) in fields {
					map.serialize_entry(key, value)?;
				}
				map.end()
			}
		}
	}
}
