use super::lexer::ParseNode;
use crate::model::SwitchConfig;

/// Serialize a model to a pretty-printed JSON string.
pub fn to_pretty_json(config: &SwitchConfig) -> String {
    serde_json::to_string_pretty(config).expect("SwitchConfig serialization cannot fail")
}

/// Serialize a section forest to a pretty-printed JSON string.
pub fn tree_to_pretty_json(tree: &[ParseNode]) -> String {
    serde_json::to_string_pretty(tree).expect("ParseNode serialization cannot fail")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::lexer::lex;

    #[test]
    fn model_keys_are_strings() {
        let json: serde_json::Value =
            serde_json::from_str(&to_pretty_json(&SwitchConfig::default())).unwrap();
        assert!(json["vlans"]["1"].is_object());
        assert!(json["interfaces"].as_object().unwrap().is_empty());
    }

    #[test]
    fn tree_serializes_words_and_lines() {
        let tree = lex(["protocol lldp", " hello 10"]);
        let json: serde_json::Value = serde_json::from_str(&tree_to_pretty_json(&tree)).unwrap();
        assert_eq!(json[0]["words"][1], "lldp");
        assert_eq!(json[0]["children"][0]["line"], 2);
    }
}
