use mongodb::bson::Bson;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

/// Order document as submitted by the storefront checkout.
///
/// The shape is owned by the client; it is stored field for field.
pub type OrderPayload = Map<String, Value>;

/// Acknowledgement returned after an order is stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct OrderReceipt {
    pub acknowledged: bool,

    /// Generated ObjectId as hex, or the caller-supplied `_id` as given
    #[serde(rename = "insertedId")]
    #[schema(value_type = Object, example = "65a1f0c2e4b0a1b2c3d4e5f6")]
    pub inserted_id: Value,
}

impl OrderReceipt {
    pub fn new(inserted_id: Value) -> Self {
        Self {
            acknowledged: true,
            inserted_id,
        }
    }
}

/// Render a stored `_id` for JSON clients: ObjectIds as 24-hex strings,
/// anything else as relaxed extended JSON.
pub fn inserted_id_to_json(id: Bson) -> Value {
    match id {
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        other => other.into_relaxed_extjson(),
    }
}
