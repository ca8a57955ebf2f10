use crate::walker::{self, Visitor};
use crate::{collapse, keywords as kw, Dialect, Error, Path, Vocabulary};
use serde_json::Value;

/// Reducer folds away the `allOf` keywords of schemas,
/// using the effective Vocabulary of a dialect and its extensions.
#[derive(Debug, Clone)]
pub struct Reducer {
    vocabulary: Vocabulary,
}

impl Reducer {
    /// Build a Reducer of the `dialect` Vocabulary, layered with each
    /// of `extensions` in turn. Later extensions win over earlier ones.
    pub fn new<'e>(dialect: Dialect, extensions: impl IntoIterator<Item = &'e Vocabulary>) -> Self {
        let vocabulary = extensions
            .into_iter()
            .fold(dialect.vocabulary().clone(), |base, ext| base.compose(ext));

        Self { vocabulary }
    }

    pub fn with_vocabulary(vocabulary: Vocabulary) -> Self {
        Self { vocabulary }
    }

    /// Build a Reducer for `doc`, using the dialect of its `$schema`
    /// keyword, or `default` if `doc` doesn't declare one.
    pub fn for_document<'e>(
        doc: &Value,
        default: Dialect,
        extensions: impl IntoIterator<Item = &'e Vocabulary>,
    ) -> Result<Self, Error> {
        let dialect = match doc.get(kw::SCHEMA) {
            None => default,
            Some(Value::String(uri)) => uri.parse()?,
            Some(_) => {
                return Err(Error::ShapeMismatch {
                    path: Path::root(),
                    keyword: kw::SCHEMA.to_string(),
                    expected: "a dialect URI string",
                })
            }
        };
        tracing::debug!(%dialect, "selected schema dialect");

        Ok(Self::new(dialect, extensions))
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Reduce a single schema `node` located at `path`, by collapsing each
    /// subschema of its `allOf` into it in array order. Schemas nested within
    /// `node` must already have been reduced.
    pub fn reduce(&self, node: &mut Value, path: &Path) -> Result<(), Error> {
        let Some(fields) = node.as_object_mut() else {
            return Ok(());
        };
        let Some(all_of) = fields.remove(kw::ALL_OF) else {
            return Ok(());
        };
        let Value::Array(subschemas) = all_of else {
            return Err(Error::ShapeMismatch {
                path: path.clone(),
                keyword: kw::ALL_OF.to_string(),
                expected: "an array of schemas",
            });
        };
        tracing::debug!(%path, subschemas = subschemas.len(), "folding allOf");

        for (index, sub) in subschemas.into_iter().enumerate() {
            tracing::trace!(%path, index, "collapsing allOf subschema");
            collapse(node, path, sub, &self.vocabulary)?;
        }
        Ok(())
    }

    /// Flatten every `allOf` of the schema document `doc`, in post-order.
    pub fn flatten(&self, doc: &mut Value) -> Result<(), Error> {
        walker::walk(doc, &mut &*self)
    }
}

impl Visitor for &Reducer {
    type Error = Error;

    fn visit(&mut self, node: &mut Value, path: &Path) -> Result<(), Error> {
        self.reduce(node, path)
    }
}
