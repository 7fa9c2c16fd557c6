use serde_json::{Map, Value};

/// Payload subtree for a single edit: value children spliced under a
/// synthesized `module:name` wrapper element.
///
/// Spliced children are deep copies and never alias the patch body they
/// were taken from.
#[derive(Debug, Clone, PartialEq)]
pub struct PatchValue {
    name: String,
    fields: Map<String, Value>,
}

impl PatchValue {
    pub fn new(module: &str, element: &str) -> Self {
        PatchValue {
            name: format!("{module}:{element}"),
            fields: Map::new(),
        }
    }

    /// Copy one child node under the wrapper. A later splice with the
    /// same name overwrites the earlier one.
    pub fn splice(&mut self, name: &str, child: &Value) {
        self.fields.insert(name.to_string(), child.clone());
    }

    /// Encode as a container instance: `{"module:name":{...children}}`.
    pub fn encode_plain(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.wrapped(Value::Object(self.fields.clone())))
    }

    /// Encode as a list instance: `{"module:name":[{...children}]}`.
    /// RFC 7951 gives list entries this array shape even when a payload
    /// carries exactly one entry.
    pub fn encode_list(&self) -> Result<String, serde_json::Error> {
        let instance = Value::Array(vec![Value::Object(self.fields.clone())]);
        serde_json::to_string(&self.wrapped(instance))
    }

    fn wrapped(&self, instance: Value) -> Value {
        let mut root = Map::new();
        root.insert(self.name.clone(), instance);
        Value::Object(root)
    }
}

#[cfg(test)]
mod tests {
    use assert2::{check, let_assert};
    use serde_json::json;

    use super::*;

    #[test]
    fn plain_encoding_nests_children_under_the_wrapper() {
        let mut value = PatchValue::new("example-jukebox", "song");
        value.splice("index", &json!(1));
        value.splice("id", &json!("/library/Foo"));

        let_assert!(Ok(encoded) = value.encode_plain());
        check!(encoded == r#"{"example-jukebox:song":{"index":1,"id":"/library/Foo"}}"#);
    }

    #[test]
    fn list_encoding_wraps_the_children_in_a_one_element_array() {
        let mut value = PatchValue::new("mod", "name");
        value.splice("f1", &json!("v1"));

        let_assert!(Ok(encoded) = value.encode_list());
        check!(encoded == r#"{"mod:name":[{"f1":"v1"}]}"#);
    }

    #[test]
    fn splice_copies_the_child() {
        let mut body = json!({ "enabled": true });
        let mut value = PatchValue::new("m", "interface");
        value.splice("enabled", &body["enabled"]);

        body["enabled"] = json!(false);

        let_assert!(Ok(encoded) = value.encode_plain());
        check!(encoded == r#"{"m:interface":{"enabled":true}}"#);
    }

    #[test]
    fn splice_with_the_same_name_overwrites() {
        let mut value = PatchValue::new("m", "interface");
        value.splice("name", &json!("eth0"));
        value.splice("name", &json!("eth2"));

        let_assert!(Ok(encoded) = value.encode_plain());
        check!(encoded == r#"{"m:interface":{"name":"eth2"}}"#);
    }

    #[test]
    fn children_keep_their_splice_order() {
        let mut value = PatchValue::new("m", "interface");
        value.splice("z", &json!(1));
        value.splice("a", &json!(2));

        let_assert!(Ok(encoded) = value.encode_plain());
        check!(encoded == r#"{"m:interface":{"z":1,"a":2}}"#);
    }
}
