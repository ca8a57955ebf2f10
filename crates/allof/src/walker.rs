//! Depth-first, post-order traversal over the schema positions of a document.
use crate::{keywords as kw, Path};
use serde_json::Value;

/// Visitor is invoked with each schema of a document and its Path,
/// only after every schema nested within it has been visited.
pub trait Visitor {
    type Error;

    fn visit(&mut self, node: &mut Value, path: &Path) -> Result<(), Self::Error>;
}

// Keywords whose value is an object of schemas.
const SCHEMA_MAPS: &[&str] = &[
    kw::PROPERTIES,
    kw::PATTERN_PROPERTIES,
    kw::DEFINITIONS,
    kw::DEFS,
    kw::DEPENDENCIES,
];
// Keywords whose value is a single schema.
const SCHEMAS: &[&str] = &[
    kw::ADDITIONAL_PROPERTIES,
    kw::ADDITIONAL_ITEMS,
    kw::PROPERTY_NAMES,
    kw::CONTAINS,
    kw::NOT,
    kw::IF,
    kw::THEN,
    kw::ELSE,
];
// Keywords whose value is an array of schemas.
const SCHEMA_ARRAYS: &[&str] = &[kw::ALL_OF, kw::ANY_OF, kw::ONE_OF];

/// Walk the schema `doc`, invoking `visitor` with every schema it contains
/// (and finally with `doc` itself) in post-order.
///
/// Only schema positions are entered: literal keyword values such as
/// `enum`, `const`, `default`, or `examples` are never visited,
/// nor are `dependencies` entries which are arrays of property names.
pub fn walk<V: Visitor>(doc: &mut Value, visitor: &mut V) -> Result<(), V::Error> {
    let mut path = Path::root();
    walk_schema(doc, &mut path, visitor)
}

fn walk_schema<V: Visitor>(
    node: &mut Value,
    path: &mut Path,
    visitor: &mut V,
) -> Result<(), V::Error> {
    if let Value::Object(fields) = node {
        for (keyword, value) in fields.iter_mut() {
            let keyword = keyword.as_str();
            path.push(keyword);

            if SCHEMA_MAPS.contains(&keyword) {
                if let Value::Object(children) = value {
                    for (property, child) in children.iter_mut() {
                        // Property-list dependencies are not schemas.
                        if keyword == kw::DEPENDENCIES && child.is_array() {
                            continue;
                        }
                        path.push(property.as_str());
                        walk_schema(child, path, visitor)?;
                        path.pop();
                    }
                }
            } else if SCHEMAS.contains(&keyword) {
                walk_schema(value, path, visitor)?;
            } else if SCHEMA_ARRAYS.contains(&keyword) || keyword == kw::ITEMS {
                match value {
                    Value::Array(items) => walk_items(items, path, visitor)?,
                    // Single-schema form of `items`.
                    _ if keyword == kw::ITEMS => walk_schema(value, path, visitor)?,
                    _ => (),
                }
            }

            path.pop();
        }
    }
    visitor.visit(node, path)
}

fn walk_items<V: Visitor>(
    items: &mut [Value],
    path: &mut Path,
    visitor: &mut V,
) -> Result<(), V::Error> {
    for (index, item) in items.iter_mut().enumerate() {
        path.push(index);
        walk_schema(item, path, visitor)?;
        path.pop();
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    // Records the path of each visited node.
    #[derive(Default)]
    struct Recorder(Vec<String>);

    impl Visitor for Recorder {
        type Error = std::convert::Infallible;

        fn visit(&mut self, _node: &mut Value, path: &Path) -> Result<(), Self::Error> {
            self.0.push(path.to_string());
            Ok(())
        }
    }

    #[test]
    fn test_post_order_schema_positions() {
        let mut doc = json!({
            "properties": {
                "a": {"items": [true, {"type": "string"}]},
                "b": {"items": {"not": {}}},
            },
            "dependencies": {"a": ["b"], "b": {"required": ["a"]}},
            "allOf": [{"if": {}, "then": {}, "else": false}],
            "$defs": {"x/y": {"additionalProperties": {}}},
            "enum": [{"properties": {"skipped": {}}}],
            "const": {"allOf": []},
            "default": {"items": {}},
            "examples": [{"not": {}}],
        });

        let mut recorder = Recorder::default();
        walk(&mut doc, &mut recorder).unwrap();

        insta::assert_debug_snapshot!(recorder.0, @r###"
        [
            "/$defs/x~1y/additionalProperties",
            "/$defs/x~1y",
            "/allOf/0/else",
            "/allOf/0/if",
            "/allOf/0/then",
            "/allOf/0",
            "/dependencies/b",
            "/properties/a/items/0",
            "/properties/a/items/1",
            "/properties/a",
            "/properties/b/items/not",
            "/properties/b/items",
            "/properties/b",
            "/",
        ]
        "###);
    }

    #[test]
    fn test_visitor_errors_abort_the_walk() {
        struct FailAt(&'static str, usize);

        impl Visitor for FailAt {
            type Error = String;

            fn visit(&mut self, _node: &mut Value, path: &Path) -> Result<(), String> {
                self.1 += 1;
                if path.to_string() == self.0 {
                    Err(format!("failed at {path}"))
                } else {
                    Ok(())
                }
            }
        }

        let mut doc = json!({"anyOf": [{}, {}, {}], "oneOf": [{}]});
        let mut visitor = FailAt("/anyOf/1", 0);

        assert_eq!(walk(&mut doc, &mut visitor).unwrap_err(), "failed at /anyOf/1");
        assert_eq!(visitor.1, 2);
    }

    #[test]
    fn test_nodes_may_be_rewritten() {
        struct Stamp;

        impl Visitor for Stamp {
            type Error = ();

            fn visit(&mut self, node: &mut Value, path: &Path) -> Result<(), ()> {
                if let Value::Object(fields) = node {
                    fields.insert("$comment".to_string(), json!(path.to_string()));
                }
                Ok(())
            }
        }

        let mut doc = json!({"properties": {"a": {}}, "items": true});
        walk(&mut doc, &mut Stamp).unwrap();

        assert_eq!(
            doc,
            json!({
                "$comment": "/",
                "properties": {"a": {"$comment": "/properties/a"}},
                "items": true,
            })
        );
    }
}
