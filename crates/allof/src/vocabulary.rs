use crate::{keywords as kw, Error};
use std::collections::BTreeMap;

/// Merge is the combination semantic applied to a keyword which is
/// defined by both a parent schema and a subschema folded into it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Merge {
    /// Boolean flags: the parent's `true` is kept, otherwise the subschema's flag is taken.
    Or,
    /// Lower bounds: the larger of the two is kept.
    MaxOfMin,
    /// Upper bounds: the smaller of the two is kept.
    MinOfMax,
    /// Draft-04 `minimum`, resolved together with its boolean `exclusiveMinimum` modifier.
    ExclusiveMinimum,
    /// Draft-04 `maximum`, resolved together with its boolean `exclusiveMaximum` modifier.
    ExclusiveMaximum,
    /// Draft-04 `exclusiveMinimum`, which only has meaning alongside `minimum`.
    MinimumModifier,
    /// Draft-04 `exclusiveMaximum`, which only has meaning alongside `maximum`.
    MaximumModifier,
    /// Deduplicated concatenation of two arrays, parent items first.
    Union,
    /// Array items present in both arrays, in parent order.
    Intersect,
    /// Intersection of two values which are each a scalar or an array of scalars.
    IntersectOneOrMany,
    /// `items`, in either single-schema or tuple form.
    Items,
    /// An object of schemas, such as `properties`, merged per key.
    Properties,
    /// `additionalProperties`, which is rejected alongside `properties` or `patternProperties`.
    AdditionalProperties,
    /// `additionalItems`, which is rejected alongside `items`.
    AdditionalItems,
    /// A single schema, such as `propertyNames`, merged recursively.
    Schema,
    /// `multipleOf`: a value which is a multiple of the other is kept.
    MultipleOf,
    /// The parent's value is kept and the subschema's is discarded.
    ParentWins,
    /// Values must be deeply equal.
    Collision,
    /// The keyword cannot be merged.
    NotSupported,
}

impl Merge {
    /// For exclusive-bound merges, the keyword of the boolean exclusivity modifier.
    pub fn modifier(&self) -> Option<&'static str> {
        match self {
            Merge::ExclusiveMinimum => Some(kw::EXCLUSIVE_MINIMUM),
            Merge::ExclusiveMaximum => Some(kw::EXCLUSIVE_MAXIMUM),
            _ => None,
        }
    }

    /// Keywords which change the meaning of this Merge's keyword when
    /// they appear alongside it, and can't be merged with it.
    pub fn companions(&self) -> &'static [&'static str] {
        match self {
            Merge::Items => &[kw::ADDITIONAL_ITEMS],
            Merge::AdditionalItems => &[kw::ITEMS],
            Merge::Properties => &[kw::ADDITIONAL_PROPERTIES],
            Merge::AdditionalProperties => &[kw::PROPERTIES, kw::PATTERN_PROPERTIES],
            _ => &[],
        }
    }

    /// For exclusivity modifiers, the keyword of the bound they modify.
    pub fn bound(&self) -> Option<&'static str> {
        match self {
            Merge::MinimumModifier => Some(kw::MINIMUM),
            Merge::MaximumModifier => Some(kw::MAXIMUM),
            _ => None,
        }
    }
}

/// Vocabulary maps keywords to their Merge.
/// Keywords without an entry are passed through: a parent's value is kept,
/// and a value only the subschema has is copied.
///
/// Extension vocabularies deserialize from a mapping of keyword to merge kind:
///
/// ```
/// use allof::{Merge, Vocabulary};
///
/// let ext: Vocabulary = serde_json::from_str(r#"{"x-owner": "collision"}"#).unwrap();
/// assert_eq!(ext.get("x-owner"), Some(Merge::Collision));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Vocabulary(BTreeMap<String, Merge>);

impl Vocabulary {
    /// A Vocabulary without any entries, which passes through every keyword.
    pub fn empty() -> Self {
        Self(BTreeMap::new())
    }

    pub fn from_entries<'k>(entries: impl IntoIterator<Item = &'k (&'k str, Merge)>) -> Self {
        Self(
            entries
                .into_iter()
                .map(|(keyword, merge)| (keyword.to_string(), *merge))
                .collect(),
        )
    }

    /// Resolve the built-in Vocabulary of a dialect URI or short name.
    pub fn resolve(dialect: &str) -> Result<&'static Vocabulary, Error> {
        Ok(dialect.parse::<Dialect>()?.vocabulary())
    }

    pub fn get(&self, keyword: &str) -> Option<Merge> {
        self.0.get(keyword).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Merge)> {
        self.0.iter().map(|(keyword, merge)| (keyword.as_str(), *merge))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Compose a new Vocabulary from this one and `overrides`,
    /// where entries of `overrides` replace those of `self`.
    pub fn compose(&self, overrides: &Vocabulary) -> Vocabulary {
        let mut out = self.clone();
        out.0
            .extend(overrides.0.iter().map(|(k, m)| (k.clone(), *m)));
        out
    }

    /// Exclusivity modifiers of this Vocabulary, each with the bound it modifies.
    pub fn modifiers(&self) -> impl Iterator<Item = (&str, &'static str)> {
        self.iter()
            .filter_map(|(keyword, merge)| merge.bound().map(|bound| (keyword, bound)))
    }
}

/// Dialect is a supported JSON Schema specification version.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum Dialect {
    Draft04,
    Draft04Hyper,
    Draft06,
    Draft06Hyper,
    #[default]
    Draft07,
    Draft07Hyper,
}

impl Dialect {
    pub const ALL: [Dialect; 6] = [
        Dialect::Draft04,
        Dialect::Draft04Hyper,
        Dialect::Draft06,
        Dialect::Draft06Hyper,
        Dialect::Draft07,
        Dialect::Draft07Hyper,
    ];

    /// Canonical `$schema` URI of the dialect.
    pub fn uri(&self) -> &'static str {
        match self {
            Dialect::Draft04 => "http://json-schema.org/draft-04/schema#",
            Dialect::Draft04Hyper => "http://json-schema.org/draft-04/hyper-schema#",
            Dialect::Draft06 => "http://json-schema.org/draft-06/schema#",
            Dialect::Draft06Hyper => "http://json-schema.org/draft-06/hyper-schema#",
            Dialect::Draft07 => "http://json-schema.org/draft-07/schema#",
            Dialect::Draft07Hyper => "http://json-schema.org/draft-07/hyper-schema#",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Dialect::Draft04 => "draft-04",
            Dialect::Draft04Hyper => "draft-04-hyper",
            Dialect::Draft06 => "draft-06",
            Dialect::Draft06Hyper => "draft-06-hyper",
            Dialect::Draft07 => "draft-07",
            Dialect::Draft07Hyper => "draft-07-hyper",
        }
    }

    pub fn vocabulary(&self) -> &'static Vocabulary {
        match self {
            Dialect::Draft04 => &*DRAFT_04,
            Dialect::Draft04Hyper => &*DRAFT_04_HYPER,
            Dialect::Draft06 => &*DRAFT_06,
            Dialect::Draft06Hyper => &*DRAFT_06_HYPER,
            Dialect::Draft07 => &*DRAFT_07,
            Dialect::Draft07Hyper => &*DRAFT_07_HYPER,
        }
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Dialect {
    type Err = Error;

    /// Parse a dialect from its `$schema` URI (with or without
    /// a trailing empty fragment) or its short name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim_end_matches('#');

        Dialect::ALL
            .into_iter()
            .find(|d| d.name() == s || d.uri().trim_end_matches('#') == trimmed)
            .ok_or_else(|| Error::UnknownDialect(s.to_string()))
    }
}

/// Extension Vocabulary which rejects the `$merge` and `$patch`
/// keywords of the JSON Schema merge / patch extensions.
pub fn merge_patch() -> Vocabulary {
    Vocabulary::from_entries(&[(kw::MERGE, Merge::NotSupported), (kw::PATCH, Merge::NotSupported)])
}

const DRAFT_04_KEYWORDS: &[(&str, Merge)] = &[
    (kw::SCHEMA, Merge::Collision),
    (kw::ID_DRAFT_04, Merge::ParentWins),
    (kw::REF, Merge::NotSupported),
    (kw::TITLE, Merge::ParentWins),
    (kw::DESCRIPTION, Merge::ParentWins),
    (kw::DEFAULT, Merge::ParentWins),
    (kw::DEFINITIONS, Merge::ParentWins),
    (kw::MULTIPLE_OF, Merge::MultipleOf),
    (kw::MAXIMUM, Merge::ExclusiveMaximum),
    (kw::EXCLUSIVE_MAXIMUM, Merge::MaximumModifier),
    (kw::MINIMUM, Merge::ExclusiveMinimum),
    (kw::EXCLUSIVE_MINIMUM, Merge::MinimumModifier),
    (kw::MAX_LENGTH, Merge::MinOfMax),
    (kw::MIN_LENGTH, Merge::MaxOfMin),
    (kw::PATTERN, Merge::Collision),
    (kw::ITEMS, Merge::Items),
    (kw::ADDITIONAL_ITEMS, Merge::AdditionalItems),
    (kw::MAX_ITEMS, Merge::MinOfMax),
    (kw::MIN_ITEMS, Merge::MaxOfMin),
    (kw::UNIQUE_ITEMS, Merge::Or),
    (kw::MAX_PROPERTIES, Merge::MinOfMax),
    (kw::MIN_PROPERTIES, Merge::MaxOfMin),
    (kw::REQUIRED, Merge::Union),
    (kw::PROPERTIES, Merge::Properties),
    (kw::PATTERN_PROPERTIES, Merge::Properties),
    (kw::ADDITIONAL_PROPERTIES, Merge::AdditionalProperties),
    (kw::DEPENDENCIES, Merge::NotSupported),
    (kw::ENUM, Merge::Intersect),
    (kw::TYPE, Merge::IntersectOneOrMany),
    (kw::FORMAT, Merge::Collision),
    (kw::ALL_OF, Merge::NotSupported),
    (kw::ANY_OF, Merge::Collision),
    (kw::ONE_OF, Merge::Collision),
    (kw::NOT, Merge::Collision),
];

const HYPER_04_KEYWORDS: &[(&str, Merge)] = &[
    (kw::LINKS, Merge::Union),
    (kw::MEDIA, Merge::Collision),
    (kw::FRAGMENT_RESOLUTION, Merge::Collision),
    (kw::PATH_START, Merge::Collision),
    (kw::READ_ONLY, Merge::Or),
];

// Draft-06 makes exclusive bounds into numeric keywords in their own right.
const DRAFT_06_KEYWORDS: &[(&str, Merge)] = &[
    (kw::ID, Merge::ParentWins),
    (kw::EXAMPLES, Merge::ParentWins),
    (kw::MAXIMUM, Merge::MinOfMax),
    (kw::EXCLUSIVE_MAXIMUM, Merge::MinOfMax),
    (kw::MINIMUM, Merge::MaxOfMin),
    (kw::EXCLUSIVE_MINIMUM, Merge::MaxOfMin),
    (kw::CONST, Merge::Collision),
    (kw::CONTAINS, Merge::Collision),
    (kw::PROPERTY_NAMES, Merge::Schema),
];

const HYPER_06_KEYWORDS: &[(&str, Merge)] = &[
    (kw::LINKS, Merge::Union),
    (kw::BASE, Merge::Collision),
    (kw::MEDIA, Merge::Collision),
    (kw::READ_ONLY, Merge::Or),
];

const DRAFT_07_KEYWORDS: &[(&str, Merge)] = &[
    (kw::COMMENT, Merge::ParentWins),
    (kw::IF, Merge::Collision),
    (kw::THEN, Merge::Collision),
    (kw::ELSE, Merge::Collision),
    (kw::CONTENT_ENCODING, Merge::Collision),
    (kw::CONTENT_MEDIA_TYPE, Merge::Collision),
    (kw::READ_ONLY, Merge::Or),
    (kw::WRITE_ONLY, Merge::Or),
];

const HYPER_07_KEYWORDS: &[(&str, Merge)] = &[
    (kw::LINKS, Merge::Union),
    (kw::BASE, Merge::Collision),
];

lazy_static::lazy_static! {
    static ref DRAFT_04: Vocabulary = Vocabulary::from_entries(DRAFT_04_KEYWORDS);
    static ref DRAFT_04_HYPER: Vocabulary =
        DRAFT_04.compose(&Vocabulary::from_entries(HYPER_04_KEYWORDS));
    static ref DRAFT_06: Vocabulary = DRAFT_04.compose(&Vocabulary::from_entries(DRAFT_06_KEYWORDS));
    static ref DRAFT_06_HYPER: Vocabulary =
        DRAFT_06.compose(&Vocabulary::from_entries(HYPER_06_KEYWORDS));
    static ref DRAFT_07: Vocabulary = DRAFT_06.compose(&Vocabulary::from_entries(DRAFT_07_KEYWORDS));
    static ref DRAFT_07_HYPER: Vocabulary =
        DRAFT_07.compose(&Vocabulary::from_entries(HYPER_07_KEYWORDS));
}
