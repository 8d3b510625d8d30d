use anyhow::Result;
use serde::Serialize;

pub fn render_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[cfg(test)]
mod tests {
    use super::render_json;
    use crate::types::AlternativesResult;

    #[test]
    fn empty_alternatives_render_null_recommendation() {
        let rendered = render_json(&AlternativesResult::default()).expect("json");
        assert!(rendered.contains("\"alternatives\": []"));
        assert!(rendered.contains("\"eco_recommended\": null"));
    }
}
