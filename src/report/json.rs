use serde::Serialize;
use serde_json::json;

use crate::model::ranges::score_ranges;

pub fn render_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    let mut out = serde_json::to_string_pretty(value)?;
    out.push('\n');
    Ok(out)
}

/// The range table keyed by prompt id, then dimension name.
pub fn ranges_json(prompt: Option<u8>) -> serde_json::Value {
    let mut prompts = serde_json::Map::new();
    for entry in score_ranges()
        .iter()
        .filter(|p| prompt.is_none_or(|id| id == p.prompt_id))
    {
        let mut dims = serde_json::Map::new();
        for (dimension, range) in entry.dimensions {
            dims.insert(
                dimension.name().to_string(),
                json!({ "min": range.min, "max": range.max }),
            );
        }
        prompts.insert(entry.prompt_id.to_string(), serde_json::Value::Object(dims));
    }
    serde_json::Value::Object(prompts)
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/json.rs"]
mod tests;
