//! Adapters for emitting masked values through `slog`.
//!
//! [`MaskedJson`] is a `slog::Value` holding the JSON form of a value after it
//! went through the default engine, emitted via `slog`'s nested-value support.
//! The unmasked value is never serialized.
//!
//! Logging is infallible from the caller's side: masking or serialization
//! failures are logged as placeholder strings.

use serde::Serialize;
use serde_json::Value as JsonValue;
use slog::{Key, Record, Result as SlogResult, Serializer, Value as SlogValue};

use crate::{global::default_engine, maskable::Maskable};

/// Logged in place of a value the engine refused to mask.
pub const MASK_FAILED: &str = "Failed to mask value";
/// Logged in place of a masked value that could not be serialized.
pub const SERIALIZE_FAILED: &str = "Failed to serialize masked value";

/// A `slog::Value` carrying an owned masked payload as structured JSON.
#[derive(Clone, Debug)]
pub struct MaskedJson {
    value: JsonValue,
}

impl MaskedJson {
    fn new(value: JsonValue) -> Self {
        Self { value }
    }

    /// The JSON that will be logged.
    pub fn as_json(&self) -> &JsonValue {
        &self.value
    }
}

impl SlogValue for MaskedJson {
    fn serialize(
        &self,
        record: &Record<'_>,
        key: Key,
        serializer: &mut dyn Serializer,
    ) -> SlogResult {
        let nested = slog::Serde(self.value.clone());
        SlogValue::serialize(&nested, record, key, serializer)
    }
}

/// Converts values into a `slog::Value` that logs their masked form as JSON.
///
/// ## Example
/// ```ignore
/// use fieldmask::slog::IntoMaskedJson;
///
/// info!(logger, "login"; "request" => request.to_masked_json());
/// ```
pub trait IntoMaskedJson: Maskable + Serialize {
    /// Masks `self` with the default engine and captures the result as JSON.
    fn to_masked_json(&self) -> MaskedJson {
        let json = match default_engine().mask(self) {
            Ok(masked) => serde_json::to_value(&masked)
                .unwrap_or_else(|_| JsonValue::String(SERIALIZE_FAILED.to_string())),
            Err(_) => JsonValue::String(MASK_FAILED.to_string()),
        };
        MaskedJson::new(json)
    }
}

impl<T> IntoMaskedJson for T where T: Maskable + Serialize {}
