//! Partial schema of the Xray configuration document.
//!
//! Only the path `inbounds[0].settings.clients` is modelled. Every level
//! carries a flattened `extra` map holding the keys it does not know about,
//! so a load/save cycle reproduces the rest of the document untouched.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// Flow written into every client record this service creates.
pub const VISION_FLOW: &str = "xtls-rprx-vision";

/// A modelled position in the document that may be missing or wrong-shaped.
///
/// Deserialization never fails: a value that does not fit `T` is kept as
/// [`Slot::Raw`] and written back verbatim.
#[derive(Debug, Clone, PartialEq)]
pub enum Slot<T> {
    /// The key is not present.
    Absent,
    /// The value matches the expected shape.
    Typed(T),
    /// The value is present but has some other shape.
    Raw(Value),
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Slot::Absent
    }
}

impl<T> Slot<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Slot::Absent)
    }

    pub fn typed(&self) -> Option<&T> {
        match self {
            Slot::Typed(value) => Some(value),
            _ => None,
        }
    }

    pub fn typed_mut(&mut self) -> Option<&mut T> {
        match self {
            Slot::Typed(value) => Some(value),
            _ => None,
        }
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Slot<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(match T::deserialize(&value) {
            Ok(typed) => Slot::Typed(typed),
            Err(_) => Slot::Raw(value),
        })
    }
}

impl<T: Serialize> Serialize for Slot<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Slot::Absent => serializer.serialize_none(),
            Slot::Typed(value) => value.serialize(serializer),
            Slot::Raw(value) => value.serialize(serializer),
        }
    }
}

/// Root of the Xray configuration document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct XrayDocument {
    #[serde(default, skip_serializing_if = "Slot::is_absent")]
    pub inbounds: Slot<Vec<Slot<Inbound>>>,

    /// `log`, `routing`, `outbounds` and everything else.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One listening endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Inbound {
    #[serde(default, skip_serializing_if = "Slot::is_absent")]
    pub settings: Slot<InboundSettings>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Protocol settings of an inbound.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InboundSettings {
    #[serde(default, skip_serializing_if = "Slot::is_absent")]
    pub clients: Slot<Vec<Slot<ClientRecord>>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A single authorized client credential.
///
/// Any JSON object is a record. The modelled keys are slots so a `null` or
/// otherwise odd value is written back exactly as it was read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientRecord {
    #[serde(default, skip_serializing_if = "Slot::is_absent")]
    pub id: Slot<String>,

    #[serde(default, skip_serializing_if = "Slot::is_absent")]
    pub email: Slot<String>,

    #[serde(default, skip_serializing_if = "Slot::is_absent")]
    pub flow: Slot<String>,

    /// `level`, `alterId` and any other per-client keys.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ClientRecord {
    /// A record as created by this service.
    pub fn new(id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: Slot::Typed(id.into()),
            email: Slot::Typed(email.into()),
            flow: Slot::Typed(VISION_FLOW.to_string()),
            extra: Map::new(),
        }
    }

    /// The `id` when it is a string.
    pub fn id(&self) -> Option<&str> {
        self.id.typed().map(String::as_str)
    }

    /// The `email` when it is a string.
    pub fn email(&self) -> Option<&str> {
        self.email.typed().map(String::as_str)
    }

    /// The `flow` when it is a string.
    pub fn flow(&self) -> Option<&str> {
        self.flow.typed().map(String::as_str)
    }
}
