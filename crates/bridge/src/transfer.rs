//! Bulk transfer of numeric series across the boundary.

use bytes::{Buf, BufMut, Bytes, BytesMut};
use serde::{Deserialize, Serialize};
use simbridge_engine::Series;

use crate::HostValue;

/// How a series is handed to the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferStrategy {
	/// One [`HostValue::Number`] per element.
	Boxed,
	/// One byte-for-byte copy into a flat buffer.
	#[default]
	Copy,
	/// A view sharing the engine's allocation.
	Shared,
}

impl TransferStrategy {
	/// Name used in logs.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Boxed => "boxed",
			Self::Copy => "copy",
			Self::Shared => "shared",
		}
	}
}

/// Flat `f64` buffer in native byte order.
///
/// Equality is bitwise, so `NaN` payloads and signed zeros compare as they were produced.
#[derive(Debug, Clone)]
pub enum Float64Buffer {
	/// Owned copy of the engine's data.
	Bytes(Bytes),
	/// The engine's own allocation.
	Shared(Series),
}

impl Float64Buffer {
	/// Copies `values` into a fresh byte buffer.
	pub fn copied(values: &[f64]) -> Self {
		Self::Bytes(encode(values))
	}

	/// Wraps `values` without copying.
	pub fn shared(values: Series) -> Self {
		Self::Shared(values)
	}

	/// Number of elements.
	pub fn len(&self) -> usize {
		match self {
			Self::Bytes(bytes) => bytes.len() / size_of::<f64>(),
			Self::Shared(values) => values.len(),
		}
	}

	/// Returns `true` if the buffer holds no element.
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Element at `index`.
	pub fn get(&self, index: usize) -> Option<f64> {
		match self {
			Self::Bytes(bytes) => {
				let start = index.checked_mul(size_of::<f64>())?;
				let mut chunk = bytes.get(start..start.checked_add(size_of::<f64>())?)?;
				Some(chunk.get_f64_ne())
			}
			Self::Shared(values) => values.get(index).copied(),
		}
	}

	/// Elements, in order.
	pub fn to_vec(&self) -> Vec<f64> {
		match self {
			Self::Bytes(bytes) => {
				let mut bytes = bytes.clone();
				let mut values = Vec::with_capacity(bytes.len() / size_of::<f64>());
				while bytes.remaining() >= size_of::<f64>() {
					values.push(bytes.get_f64_ne());
				}
				values
			}
			Self::Shared(values) => values.to_vec(),
		}
	}

	/// Raw native-endian bytes.
	pub fn to_bytes(&self) -> Bytes {
		match self {
			Self::Bytes(bytes) => bytes.clone(),
			Self::Shared(values) => encode(values),
		}
	}
}

fn encode(values: &[f64]) -> Bytes {
	let mut buf = BytesMut::with_capacity(std::mem::size_of_val(values));
	for value in values {
		buf.put_f64_ne(*value);
	}
	buf.freeze()
}

impl PartialEq for Float64Buffer {
	fn eq(&self, other: &Self) -> bool {
		self.to_bytes() == other.to_bytes()
	}
}

/// Converts a native series into a host value using `strategy`.
///
/// Order and length are preserved, and an empty series yields an empty buffer rather than
/// [`HostValue::Undefined`].
pub fn to_host_array(values: Series, strategy: TransferStrategy) -> HostValue {
	tracing::trace!(len = values.len(), strategy = strategy.as_str(), "bridge.transfer");
	match strategy {
		TransferStrategy::Boxed => HostValue::Array(values.iter().copied().map(HostValue::Number).collect()),
		TransferStrategy::Copy => HostValue::Float64Array(Float64Buffer::copied(&values)),
		TransferStrategy::Shared => HostValue::Float64Array(Float64Buffer::shared(values)),
	}
}
