use serde_json::{Map, Value};

/// A plot layout object (`{"updatemenu": {...}, "font": {...}}`) with dotted-path access.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig(Value);

impl Default for LayoutConfig {
    fn default() -> Self {
        Self::empty_object()
    }
}

impl LayoutConfig {
    pub fn empty_object() -> Self {
        Self(Value::Object(Map::new()))
    }

    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    pub fn get(&self, dotted_path: &str) -> Option<&Value> {
        let mut cur = &self.0;
        for segment in dotted_path.split('.') {
            cur = cur.as_object()?.get(segment)?;
        }
        Some(cur)
    }

    pub fn get_str(&self, dotted_path: &str) -> Option<&str> {
        self.get(dotted_path)?.as_str()
    }

    pub fn get_f64(&self, dotted_path: &str) -> Option<f64> {
        self.get(dotted_path)?.as_f64()
    }

    pub fn set_value(&mut self, dotted_path: &str, value: Value) {
        // Layouts are objects; a non-object root is replaced so this never panics on user input.
        if !self.0.is_object() {
            self.0 = Value::Object(Map::new());
        }

        let Value::Object(ref mut root) = self.0 else {
            return;
        };
        let mut cur: &mut Map<String, Value> = root;
        let mut segments = dotted_path.split('.').peekable();
        while let Some(seg) = segments.next() {
            if segments.peek().is_none() {
                cur.insert(seg.to_string(), value);
                return;
            }
            let slot = cur.entry(seg).or_insert_with(|| Value::Object(Map::new()));
            if !slot.is_object() {
                *slot = Value::Object(Map::new());
            }
            let Some(next) = slot.as_object_mut() else {
                return;
            };
            cur = next;
        }
    }

    /// Applies a `path=value` override. The value is read as JSON when it parses, otherwise it
    /// is taken as a plain string (`updatemenu.xanchor=right`).
    pub fn apply_override(&mut self, assignment: &str) -> Option<()> {
        let (path, raw) = assignment.split_once('=')?;
        let path = path.trim();
        if path.is_empty() {
            return None;
        }
        let value = serde_json::from_str::<Value>(raw.trim())
            .unwrap_or_else(|_| Value::String(raw.trim().to_string()));
        self.set_value(path, value);
        Some(())
    }

    pub fn deep_merge(&mut self, other: &Value) {
        deep_merge_value(&mut self.0, other);
    }
}

fn deep_merge_value(base: &mut Value, incoming: &Value) {
    match (base, incoming) {
        (Value::Object(base_map), Value::Object(in_map)) => {
            for (key, in_value) in in_map {
                match base_map.get_mut(key) {
                    Some(base_value) => deep_merge_value(base_value, in_value),
                    None => {
                        base_map.insert(key.clone(), in_value.clone());
                    }
                }
            }
        }
        (base_slot, in_value) => {
            *base_slot = in_value.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn overrides_parse_json_or_fall_back_to_strings() {
        let mut cfg = LayoutConfig::default();
        cfg.apply_override("updatemenu.x=0.5").unwrap();
        cfg.apply_override("updatemenu.xanchor=right").unwrap();
        cfg.apply_override("updatemenu.buttons=[{\"label\":\"a\"}]").unwrap();

        assert_eq!(cfg.get_f64("updatemenu.x"), Some(0.5));
        assert_eq!(cfg.get_str("updatemenu.xanchor"), Some("right"));
        assert_eq!(cfg.get("updatemenu.buttons.0"), None);
        assert!(cfg.get("updatemenu.buttons").is_some_and(Value::is_array));
        assert!(cfg.apply_override("no-equals-sign").is_none());
    }

    #[test]
    fn deep_merge_keeps_unrelated_keys() {
        let mut cfg = LayoutConfig::from_value(json!({ "font": { "size": 10, "color": "red" } }));
        cfg.deep_merge(&json!({ "font": { "size": 14 } }));
        assert_eq!(cfg.get_f64("font.size"), Some(14.0));
        assert_eq!(cfg.get_str("font.color"), Some("red"));
    }

    #[test]
    fn set_value_replaces_non_object_root() {
        let mut cfg = LayoutConfig::from_value(json!(3));
        cfg.set_value("updatemenu.visible", json!(false));
        assert_eq!(cfg.as_value(), &json!({ "updatemenu": { "visible": false } }));
    }
}
