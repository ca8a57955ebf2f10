use crate::{Error, Path, Vocabulary};
use serde_json::Value;

/// Collapse subschema `sub` into `parent`, such that `parent` imposes the
/// constraints of both. `path` locates `parent` within its document.
///
/// Keywords only `sub` defines are moved into `parent`, unless their Merge
/// refuses them (such as `$ref`) or `parent` holds a companion which would
/// change their meaning. Keywords both define are combined by their Merge of
/// `vocabulary`, or keep the parent's value if `vocabulary` has no Merge for them.
///
/// On error `parent` is left partially collapsed.
pub fn collapse(
    parent: &mut Value,
    path: &Path,
    sub: Value,
    vocabulary: &Vocabulary,
) -> Result<(), Error> {
    let (parent, mut sub) = match (parent, sub) {
        (Value::Object(parent), Value::Object(sub)) => (parent, sub),
        (parent, sub) => return collapse_boolean(parent, path, sub),
    };

    // Exclusivity modifiers without their bound have no meaning.
    for (modifier, bound) in vocabulary.modifiers() {
        if !parent.contains_key(bound) && parent.remove(modifier).is_some() {
            tracing::trace!(%path, modifier, "pruned dangling exclusivity modifier");
        }
    }

    let keywords: Vec<String> = sub.keys().cloned().collect();

    for keyword in keywords {
        let merge = vocabulary.get(&keyword);

        if merge.and_then(|m| m.bound()).is_some() {
            continue; // Resolved alongside its bound.
        }
        // Take the value but leave its key, so that merges of
        // other keywords may still observe its presence.
        let Some(value) = sub.get_mut(&keyword).map(std::mem::take) else {
            continue;
        };

        if !parent.contains_key(&keyword) {
            if let Some(merge) = merge {
                merge.admit(parent, path, &keyword, &sub)?;

                if let Some(modifier) = merge.modifier() {
                    if let Some(flag) = sub.remove(modifier) {
                        parent.insert(modifier.to_string(), flag);
                    }
                }
            }
            parent.insert(keyword, value);
        } else if let Some(merge) = merge {
            tracing::trace!(%path, %keyword, ?merge, "merging keyword");
            merge.apply(parent, path, &keyword, value, &sub, vocabulary)?;
        }
    }

    Ok(())
}

fn collapse_boolean(parent: &mut Value, path: &Path, sub: Value) -> Result<(), Error> {
    match (parent.as_bool(), sub.as_bool()) {
        // A `false` parent cannot be restricted further, and
        // a `true` subschema adds no restriction.
        (Some(false), _) | (_, Some(true)) => return Ok(()),
        _ => (),
    }

    let describe = |v: &Value| match v {
        Value::Bool(true) => Some("true"),
        Value::Bool(false) => Some("false"),
        Value::Object(_) => Some("object"),
        _ => None,
    };

    match (describe(&*parent), describe(&sub)) {
        (Some(parent), Some(subschema)) => Err(Error::UnsupportedBooleanSchemaCollapse {
            path: path.clone(),
            parent,
            subschema,
        }),
        _ => Err(Error::ExpectedSchema { path: path.clone() }),
    }
}

#[cfg(test)]
mod test {
    use super::collapse;
    use crate::{Dialect, Error, Merge, Path, Vocabulary};
    use serde_json::{json, Value};

    fn run(dialect: Dialect, mut parent: Value, sub: Value) -> Result<Value, Error> {
        collapse(&mut parent, &Path::root(), sub, dialect.vocabulary())?;
        Ok(parent)
    }

    #[test]
    fn test_boolean_schemas() {
        let d = Dialect::Draft07;

        assert_eq!(run(d, json!(false), json!({"type": "string"})).unwrap(), json!(false));
        assert_eq!(run(d, json!(false), json!(true)).unwrap(), json!(false));
        assert_eq!(run(d, json!({"type": "string"}), json!(true)).unwrap(), json!({"type": "string"}));
        assert_eq!(run(d, json!(true), json!(true)).unwrap(), json!(true));

        for (parent, sub) in [
            (json!(true), json!(false)),
            (json!(true), json!({"type": "string"})),
            (json!({"type": "string"}), json!(false)),
        ] {
            assert!(matches!(
                run(d, parent, sub),
                Err(Error::UnsupportedBooleanSchemaCollapse { .. })
            ));
        }

        assert!(matches!(
            run(d, json!({}), json!(42)),
            Err(Error::ExpectedSchema { .. })
        ));
        assert_eq!(
            run(d, json!(true), json!(false)).unwrap_err().to_string(),
            "at '/': cannot collapse false subschema into true schema"
        );
    }

    #[test]
    fn test_disjoint_keywords_are_moved() {
        let out = run(
            Dialect::Draft07,
            json!({"type": "object", "title": "parent"}),
            json!({"required": ["a"], "x-custom": {"nested": [1, 2]}}),
        );
        assert_eq!(
            out.unwrap(),
            json!({
                "type": "object",
                "title": "parent",
                "required": ["a"],
                "x-custom": {"nested": [1, 2]},
            })
        );
    }

    #[test]
    fn test_keywords_without_merge_pass_through() {
        let out = run(
            Dialect::Draft07,
            json!({"x-custom": "parent"}),
            json!({"x-custom": "sub", "title": "sub"}),
        );
        assert_eq!(out.unwrap(), json!({"x-custom": "parent", "title": "sub"}));

        // An empty vocabulary passes through everything.
        let mut parent = json!({"type": "string", "minLength": 1});
        collapse(
            &mut parent,
            &Path::root(),
            json!({"type": "number", "minLength": 3, "maxLength": 4}),
            &Vocabulary::empty(),
        )
        .unwrap();
        assert_eq!(parent, json!({"type": "string", "minLength": 1, "maxLength": 4}));
    }

    #[test]
    fn test_dangling_modifiers_are_pruned() {
        let out = run(Dialect::Draft04, json!({"exclusiveMaximum": true}), json!({"title": "t"}));
        assert_eq!(out.unwrap(), json!({"title": "t"}));

        // A dangling parent modifier doesn't apply to a subschema bound.
        let out = run(
            Dialect::Draft04,
            json!({"exclusiveMinimum": true}),
            json!({"minimum": 3}),
        );
        assert_eq!(out.unwrap(), json!({"minimum": 3}));

        // Draft-06 exclusive bounds are numeric keywords, and are kept.
        let out = run(Dialect::Draft06, json!({"exclusiveMaximum": 10}), json!({}));
        assert_eq!(out.unwrap(), json!({"exclusiveMaximum": 10}));
        let out = run(
            Dialect::Draft06,
            json!({"exclusiveMaximum": 10}),
            json!({"exclusiveMaximum": 8, "maximum": 9}),
        );
        assert_eq!(out.unwrap(), json!({"exclusiveMaximum": 8, "maximum": 9}));
    }

    #[test]
    fn test_modifiers_travel_with_bounds() {
        // Copied bounds bring their modifier.
        let out = run(
            Dialect::Draft04,
            json!({"type": "number"}),
            json!({"maximum": 3, "exclusiveMaximum": true}),
        );
        assert_eq!(
            out.unwrap(),
            json!({"type": "number", "maximum": 3, "exclusiveMaximum": true})
        );

        // A looser bound's modifier is discarded.
        let out = run(
            Dialect::Draft04,
            json!({"minimum": 5}),
            json!({"minimum": 3, "exclusiveMinimum": true}),
        );
        assert_eq!(out.unwrap(), json!({"minimum": 5}));

        // A subschema's dangling modifier is ignored.
        let out = run(
            Dialect::Draft04,
            json!({"minimum": 5}),
            json!({"exclusiveMinimum": true}),
        );
        assert_eq!(out.unwrap(), json!({"minimum": 5}));
    }

    #[test]
    fn test_nested_properties_and_items() {
        let out = run(
            Dialect::Draft07,
            json!({
                "properties": {"a": {"type": "string"}, "b": {"type": "integer"}},
                "items": [{"type": "string"}, {"minimum": 1}],
            }),
            json!({
                "properties": {"a": {"minLength": 2}, "c": {"const": true}},
                "items": [{"maxLength": 4}, {"minimum": 3}, {"type": "null"}],
            }),
        );
        assert_eq!(
            out.unwrap(),
            json!({
                "properties": {
                    "a": {"type": "string", "minLength": 2},
                    "b": {"type": "integer"},
                    "c": {"const": true},
                },
                "items": [
                    {"type": "string", "maxLength": 4},
                    {"minimum": 3},
                    {"type": "null"},
                ],
            })
        );

        let out = run(
            Dialect::Draft07,
            json!({"items": {"type": "string"}, "propertyNames": {"maxLength": 8}}),
            json!({"items": {"minLength": 1}, "propertyNames": {"maxLength": 4}}),
        );
        assert_eq!(
            out.unwrap(),
            json!({
                "items": {"type": "string", "minLength": 1},
                "propertyNames": {"maxLength": 4},
            })
        );
    }

    #[test]
    fn test_copied_keywords_respect_companions() {
        let d = Dialect::Draft07;

        for (parent, sub) in [
            (json!({"properties": {"a": {}}}), json!({"additionalProperties": false})),
            (json!({"additionalProperties": false}), json!({"properties": {"a": {}}})),
            (json!({"patternProperties": {"^x": {}}}), json!({"additionalProperties": {}})),
            (json!({"items": [{"type": "string"}]}), json!({"additionalItems": false})),
            (json!({"additionalItems": false}), json!({"items": [{"type": "string"}]})),
        ] {
            assert!(matches!(
                run(d, parent, sub),
                Err(Error::UnsupportedInteraction { .. })
            ));
        }

        // A subschema may carry both companions into a parent which has neither.
        let out = run(
            d,
            json!({"type": "array"}),
            json!({"items": [{"type": "string"}], "additionalItems": false}),
        );
        assert_eq!(
            out.unwrap(),
            json!({"type": "array", "items": [{"type": "string"}], "additionalItems": false})
        );
    }

    #[test]
    fn test_unsupported_keywords_of_the_subschema() {
        let err = run(
            Dialect::Draft07,
            json!({"type": "object"}),
            json!({"$ref": "#/definitions/a"}),
        )
        .unwrap_err();
        assert!(matches!(err, Error::UnsupportedKeyword { ref keyword, .. } if keyword == "$ref"));

        let err = run(
            Dialect::Draft04,
            json!({}),
            json!({"dependencies": {"a": ["b"]}}),
        )
        .unwrap_err();
        assert_eq!(err.keyword(), Some("dependencies"));

        // A parent's `$ref` already ignores its siblings.
        let out = run(Dialect::Draft07, json!({"$ref": "#/a"}), json!({"type": "object"}));
        assert_eq!(out.unwrap(), json!({"$ref": "#/a", "type": "object"}));
    }

    #[test]
    fn test_nested_errors_report_their_path() {
        let err = run(
            Dialect::Draft07,
            json!({"properties": {"a/b": {"items": [{"const": "x"}]}}}),
            json!({"properties": {"a/b": {"items": [{"const": "y"}]}}}),
        )
        .unwrap_err();

        assert_eq!(err.path().unwrap().to_string(), "/properties/a~1b/items/0");
        assert_eq!(err.keyword(), Some("const"));

        let err = run(
            Dialect::Draft07,
            json!({"items": [{}]}),
            json!({"items": {}}),
        )
        .unwrap_err();
        assert!(matches!(err, Error::UnsupportedForm { ref keyword, .. } if keyword == "items"));
        assert_eq!(err.path().unwrap().to_string(), "/items");
    }

    #[test]
    fn test_extension_overrides() {
        let vocabulary = Dialect::Draft07
            .vocabulary()
            .compose(&Vocabulary::from_entries(&[
                ("type", Merge::Collision),
                ("x-tags", Merge::Union),
            ]));

        let mut parent = json!({"type": "string", "x-tags": ["a"]});
        collapse(
            &mut parent,
            &Path::root(),
            json!({"type": "string", "x-tags": ["b", "a"]}),
            &vocabulary,
        )
        .unwrap();
        assert_eq!(parent, json!({"type": "string", "x-tags": ["a", "b"]}));

        let err = collapse(
            &mut parent,
            &Path::root(),
            json!({"type": ["string", "null"]}),
            &vocabulary,
        )
        .unwrap_err();
        assert!(matches!(err, Error::Collision { ref keyword, .. } if keyword == "type"));
    }
}
