use crate::adjust::AdjustmentInstance;
use crate::error::{TilestackError, TilestackResult};
use crate::model::{Layer, Node, Stack};

/// Build a composition tree from the nested JSON stack document: a list is
/// a nested stack, an object is a single layer. Recognized layer keys are
/// `src`, `color`, `mask`, `opacity`, `mode` and `adjustments`; anything
/// else is rejected here rather than deferred to render time. Which
/// src/color/mask combinations are legal is still a render-time question.
pub fn build_stack(value: &serde_json::Value) -> TilestackResult<Node> {
    match value {
        serde_json::Value::Array(items) => {
            let children = items.iter().map(build_stack).collect::<TilestackResult<Vec<_>>>()?;
            Ok(Node::Stack(Stack::new(children)))
        }
        serde_json::Value::Object(map) => build_layer(map).map(Node::Layer),
        other => Err(TilestackError::invalid_stack(format!(
            "stack node must be an object or a list, got {other}"
        ))),
    }
}

/// Parse a complete JSON stack document.
pub fn stack_from_json_str(text: &str) -> TilestackResult<Node> {
    let value: serde_json::Value = serde_json::from_str(text)
        .map_err(|e| TilestackError::invalid_stack(format!("stack document is not JSON: {e}")))?;
    build_stack(&value)
}

fn build_layer(map: &serde_json::Map<String, serde_json::Value>) -> TilestackResult<Layer> {
    let mut layer = Layer::default();

    for (key, value) in map {
        match key.as_str() {
            "src" => layer.source = Some(name_value(key, value)?),
            "mask" => layer.mask = Some(name_value(key, value)?),
            "color" => {
                let Some(spec) = value.as_str() else {
                    return Err(TilestackError::invalid_color(format!(
                        "color must be a string: {value}"
                    )));
                };
                layer.color = Some(spec.to_string());
            }
            "opacity" => {
                let Some(opacity) = value.as_f64() else {
                    return Err(TilestackError::invalid_stack(format!(
                        "opacity must be a number: {value}"
                    )));
                };
                if !opacity.is_finite() || !(0.0..=1.0).contains(&opacity) {
                    return Err(TilestackError::invalid_stack(format!(
                        "opacity must be within [0, 1]: {opacity}"
                    )));
                }
                layer.opacity = opacity as f32;
            }
            "mode" => layer.mode = Some(name_value(key, value)?),
            "adjustments" => layer.adjustments = adjustments_value(value)?,
            other => {
                return Err(TilestackError::invalid_stack(format!(
                    "unknown layer key \"{other}\""
                )));
            }
        }
    }

    Ok(layer)
}

fn name_value(key: &str, value: &serde_json::Value) -> TilestackResult<String> {
    value.as_str().map(str::to_string).ok_or_else(|| {
        TilestackError::invalid_stack(format!("\"{key}\" must be a string: {value}"))
    })
}

/// Adjustments are a list of `[name, args]` pairs. Names are carried as-is;
/// unknown ones fail later, when the pipeline is applied.
fn adjustments_value(value: &serde_json::Value) -> TilestackResult<Vec<AdjustmentInstance>> {
    let Some(items) = value.as_array() else {
        return Err(TilestackError::invalid_stack(format!(
            "adjustments must be a list: {value}"
        )));
    };

    items
        .iter()
        .map(|entry| {
            let pair = entry.as_array().filter(|p| p.len() == 2).ok_or_else(|| {
                TilestackError::invalid_stack(format!(
                    "each adjustment must be a [name, args] pair: {entry}"
                ))
            })?;
            let kind = pair[0].as_str().ok_or_else(|| {
                TilestackError::invalid_stack(format!("adjustment name must be a string: {entry}"))
            })?;
            Ok(AdjustmentInstance {
                kind: kind.to_string(),
                params: pair[1].clone(),
            })
        })
        .collect()
}
