use crate::compiler::semantics::Package;

use super::Emitter;

/// Dumps the resolved package as pretty printed JSON.
pub struct JsonDump;

impl Emitter for JsonDump {
    fn emit(&self, package: &Package) -> String {
        // Every field of a Package is a string, integer, or list of them.
        let mut text = serde_json::to_string_pretty(package)
            .expect("A resolved package must always serialize to JSON");
        text.push('\n');
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::{
        ast::Docs,
        semantics::{ResolvedItem, ResolvedParameter},
    };

    #[test]
    fn items_are_tagged_with_their_kind() {
        let package = Package {
            name: "pkg".into(),
            source: "pkg.yis".into(),
            doc_summary: None,
            doc_verbose: None,
            items: vec![ResolvedItem::Parameter(ResolvedParameter {
                name: "DEPTH".into(),
                value: 4,
                width: 3,
                count_width: 3,
                width_one: 1,
                docs: Docs::new("Depth", None),
            })],
        };

        let json: serde_json::Value = serde_json::from_str(&JsonDump.emit(&package)).unwrap();
        assert_eq!(json["name"], "pkg");
        assert_eq!(json["items"][0]["kind"], "parameter");
        assert_eq!(json["items"][0]["count_width"], 3);
        assert_eq!(json["items"][0]["docs"]["summary"], "Depth");
        assert!(json.get("doc_summary").is_none());
    }
}
