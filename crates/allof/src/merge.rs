// Merge functions of each Merge kind. Each combines a subschema's value of a
// keyword into a parent schema which also defines that keyword, such that the
// parent imposes the constraints of both.
use crate::{collapse, json_eq, keywords as kw, Error, Merge, Number, Path, Vocabulary};
use itertools::{EitherOrBoth, Itertools};
use serde_json::{Map, Value};
use std::cmp::Ordering;

impl Merge {
    /// Apply this Merge to fold the subschema `value` of `keyword` into `parent`.
    ///
    /// `sub` is the remainder of the subschema being folded. It's consulted
    /// for the presence of companion keywords, and for exclusivity modifiers.
    pub fn apply(
        self,
        parent: &mut Map<String, Value>,
        path: &Path,
        keyword: &str,
        value: Value,
        sub: &Map<String, Value>,
        vocabulary: &Vocabulary,
    ) -> Result<(), Error> {
        // A keyword only the subschema defines is taken, if admitted.
        if !parent.contains_key(keyword) {
            self.admit(parent, path, keyword, sub)?;
            parent.insert(keyword.to_string(), value);
            return Ok(());
        }

        match self {
            Merge::Or => or(slot(parent, keyword), path, keyword, value),
            Merge::MaxOfMin => tighten(slot(parent, keyword), path, keyword, value, Ordering::Greater),
            Merge::MinOfMax => tighten(slot(parent, keyword), path, keyword, value, Ordering::Less),
            Merge::ExclusiveMinimum => {
                exclusive_bound(parent, path, keyword, kw::EXCLUSIVE_MINIMUM, value, sub, Ordering::Greater)
            }
            Merge::ExclusiveMaximum => {
                exclusive_bound(parent, path, keyword, kw::EXCLUSIVE_MAXIMUM, value, sub, Ordering::Less)
            }
            // No-op: `collapse` never dispatches modifiers, and resolves
            // them within the ExclusiveMinimum / ExclusiveMaximum arms.
            Merge::MinimumModifier | Merge::MaximumModifier => Ok(()),
            Merge::Union => union(slot(parent, keyword), path, keyword, value),
            Merge::Intersect => intersect(slot(parent, keyword), path, keyword, value),
            Merge::IntersectOneOrMany => {
                intersect_one_or_many(slot(parent, keyword), value);
                Ok(())
            }
            Merge::Items => {
                reject_companions(parent, sub, path, keyword, self.companions())?;
                items(slot(parent, keyword), path, keyword, value, vocabulary)
            }
            Merge::Properties => {
                reject_companions(parent, sub, path, keyword, self.companions())?;
                properties(slot(parent, keyword), path, keyword, value, vocabulary)
            }
            Merge::AdditionalProperties | Merge::AdditionalItems => {
                reject_companions(parent, sub, path, keyword, self.companions())?;
                collapse(slot(parent, keyword), &path.child(keyword), value, vocabulary)
            }
            Merge::Schema => collapse(slot(parent, keyword), &path.child(keyword), value, vocabulary),
            Merge::MultipleOf => multiple_of(slot(parent, keyword), path, keyword, value),
            Merge::ParentWins => Ok(()),
            Merge::Collision => {
                let lhs = slot(parent, keyword);
                if json_eq(lhs, &value) {
                    Ok(())
                } else {
                    Err(Error::Collision {
                        path: path.clone(),
                        keyword: keyword.to_string(),
                        parent: lhs.clone(),
                        subschema: value,
                    })
                }
            }
            Merge::NotSupported => Err(Error::UnsupportedKeyword {
                path: path.clone(),
                keyword: keyword.to_string(),
            }),
        }
    }
}

impl Merge {
    /// Check that `keyword`, which `sub` defines and `parent` does not,
    /// may be moved into `parent` as-is.
    pub fn admit(
        self,
        parent: &Map<String, Value>,
        path: &Path,
        keyword: &str,
        sub: &Map<String, Value>,
    ) -> Result<(), Error> {
        if self == Merge::NotSupported {
            return Err(Error::UnsupportedKeyword {
                path: path.clone(),
                keyword: keyword.to_string(),
            });
        }
        // A companion of only the parent would change the meaning of `keyword`.
        // Companions of both sides are rejected by their own Merge.
        match self
            .companions()
            .iter()
            .find(|c| parent.contains_key(**c) && !sub.contains_key(**c))
        {
            Some(companion) => Err(interaction(path, keyword, companion)),
            None => Ok(()),
        }
    }
}

fn slot<'p>(parent: &'p mut Map<String, Value>, keyword: &str) -> &'p mut Value {
    parent.entry(keyword).or_insert(Value::Null)
}

fn mismatch(path: &Path, keyword: &str, expected: &'static str) -> Error {
    Error::ShapeMismatch {
        path: path.clone(),
        keyword: keyword.to_string(),
        expected,
    }
}

fn number(value: &Value, path: &Path, keyword: &str) -> Result<Number, Error> {
    Number::of(value).ok_or_else(|| mismatch(path, keyword, "a number"))
}

// Exclusivity flags default to false when absent.
fn flag(value: Option<&Value>, path: &Path, keyword: &str) -> Result<bool, Error> {
    match value {
        None => Ok(false),
        Some(Value::Bool(b)) => Ok(*b),
        Some(_) => Err(mismatch(path, keyword, "a boolean")),
    }
}

fn or(lhs: &mut Value, path: &Path, keyword: &str, rhs: Value) -> Result<(), Error> {
    match (lhs.as_bool(), rhs.as_bool()) {
        (Some(true), Some(_)) => Ok(()),
        (Some(false), Some(_)) => {
            *lhs = rhs;
            Ok(())
        }
        _ => Err(mismatch(path, keyword, "a boolean")),
    }
}

// Keep whichever of `lhs` and `rhs` is `tighter`. On ties an integer
// representation is preferred, so `5` wins over `5.0`.
fn tighten(
    lhs: &mut Value,
    path: &Path,
    keyword: &str,
    rhs: Value,
    tighter: Ordering,
) -> Result<(), Error> {
    let (l, r) = (number(lhs, path, keyword)?, number(&rhs, path, keyword)?);

    match r.cmp(&l) {
        Ordering::Equal if l.is_float() && !r.is_float() => *lhs = rhs,
        ord if ord == tighter => *lhs = rhs,
        _ => (),
    }
    Ok(())
}

// Resolve a draft-04 bound together with its boolean exclusivity modifier.
// A strictly tighter bound wins along with its own modifier, while equal
// bounds are exclusive if either side is.
fn exclusive_bound(
    parent: &mut Map<String, Value>,
    path: &Path,
    keyword: &str,
    modifier: &'static str,
    value: Value,
    sub: &Map<String, Value>,
    tighter: Ordering,
) -> Result<(), Error> {
    let l = number(slot(parent, keyword), path, keyword)?;
    let r = number(&value, path, keyword)?;
    let l_exclusive = flag(parent.get(modifier), path, modifier)?;
    let r_exclusive = flag(sub.get(modifier), path, modifier)?;

    match r.cmp(&l) {
        Ordering::Equal => {
            if r_exclusive && !l_exclusive {
                parent.insert(modifier.to_string(), Value::Bool(true));
            }
        }
        ord if ord == tighter => {
            parent.insert(keyword.to_string(), value);

            match sub.get(modifier) {
                Some(r_modifier) => parent.insert(modifier.to_string(), r_modifier.clone()),
                None => parent.remove(modifier),
            };
        }
        _ => (),
    }
    Ok(())
}

fn union(lhs: &mut Value, path: &Path, keyword: &str, rhs: Value) -> Result<(), Error> {
    let (Value::Array(lhs), Value::Array(rhs)) = (lhs, rhs) else {
        return Err(mismatch(path, keyword, "an array"));
    };
    for item in rhs {
        if !lhs.iter().any(|l| json_eq(l, &item)) {
            lhs.push(item);
        }
    }
    Ok(())
}

fn intersect(lhs: &mut Value, path: &Path, keyword: &str, rhs: Value) -> Result<(), Error> {
    let (Value::Array(lhs), Value::Array(rhs)) = (lhs, rhs) else {
        return Err(mismatch(path, keyword, "an array"));
    };
    lhs.retain(|l| rhs.iter().any(|r| json_eq(l, r)));
    Ok(())
}

// Intersect values which are each either a single value or an array of values,
// such as `type`. The result is again a single value if only one remains.
fn intersect_one_or_many(lhs: &mut Value, rhs: Value) {
    let one_or_many = |v: Value| match v {
        Value::Array(arr) => arr,
        v => vec![v],
    };
    let rhs = one_or_many(rhs);

    let mut out = one_or_many(std::mem::take(lhs));
    out.retain(|l| rhs.iter().any(|r| json_eq(l, r)));

    *lhs = match out.len() {
        1 => out.pop().unwrap_or_default(),
        _ => Value::Array(out),
    };
}

fn items(
    lhs: &mut Value,
    path: &Path,
    keyword: &str,
    rhs: Value,
    vocabulary: &Vocabulary,
) -> Result<(), Error> {
    let path = path.child(keyword);

    match (lhs, rhs) {
        // Tuple form: pair-wise collapse over the common prefix,
        // then take remaining subschema items as-is.
        (Value::Array(lhs), Value::Array(rhs)) => {
            let mut extra = Vec::new();

            for (index, eob) in lhs.iter_mut().zip_longest(rhs).enumerate() {
                match eob {
                    EitherOrBoth::Both(l, r) => collapse(l, &path.child(index), r, vocabulary)?,
                    EitherOrBoth::Left(_) => (),
                    EitherOrBoth::Right(r) => extra.push(r),
                }
            }
            lhs.extend(extra);
            Ok(())
        }
        (Value::Array(_), _) | (_, Value::Array(_)) => Err(Error::UnsupportedForm {
            path: path.clone(),
            keyword: keyword.to_string(),
        }),
        (lhs, rhs) => collapse(lhs, &path, rhs, vocabulary),
    }
}

fn properties(
    lhs: &mut Value,
    path: &Path,
    keyword: &str,
    rhs: Value,
    vocabulary: &Vocabulary,
) -> Result<(), Error> {
    let (Value::Object(lhs), Value::Object(rhs)) = (lhs, rhs) else {
        return Err(mismatch(path, keyword, "an object of schemas"));
    };
    let path = path.child(keyword);

    for (property, r) in rhs {
        match lhs.get_mut(&property) {
            Some(l) => collapse(l, &path.child(property.as_str()), r, vocabulary)?,
            None => {
                lhs.insert(property, r);
            }
        }
    }
    Ok(())
}

fn multiple_of(lhs: &mut Value, path: &Path, keyword: &str, rhs: Value) -> Result<(), Error> {
    let (l, r) = (number(lhs, path, keyword)?, number(&rhs, path, keyword)?);

    if l.is_multiple_of(&r) {
        Ok(())
    } else if r.is_multiple_of(&l) {
        *lhs = rhs;
        Ok(())
    } else {
        Err(Error::Collision {
            path: path.clone(),
            keyword: keyword.to_string(),
            parent: lhs.clone(),
            subschema: rhs,
        })
    }
}

fn reject_companions(
    parent: &Map<String, Value>,
    sub: &Map<String, Value>,
    path: &Path,
    keyword: &str,
    companions: &[&str],
) -> Result<(), Error> {
    match companions
        .iter()
        .find(|c| parent.contains_key(**c) || sub.contains_key(**c))
    {
        Some(companion) => Err(interaction(path, keyword, companion)),
        None => Ok(()),
    }
}

fn interaction(path: &Path, keyword: &str, companion: &str) -> Error {
    Error::UnsupportedInteraction {
        path: path.clone(),
        keyword: keyword.to_string(),
        companion: companion.to_string(),
    }
}
