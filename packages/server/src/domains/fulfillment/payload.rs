use serde_json::{json, Map, Value};

use super::models::LifecycleRequest;

/// Vendor-neutral request body built from the asset.
pub fn build_payload(req: &LifecycleRequest) -> Value {
    let asset = &req.asset;

    let items: Vec<Value> = asset
        .items
        .iter()
        .map(|item| json!({"id": item.id, "quantity": item.quantity}))
        .collect();

    let parameters: Map<String, Value> = asset
        .ordering_params()
        .filter_map(|p| {
            p.value()
                .map(|v| (p.id.clone(), Value::String(v.to_string())))
        })
        .collect();

    json!({
        "external_id": asset.external_id,
        "asset_id": asset.id,
        "items": items,
        "parameters": parameters,
    })
}
