//! Difference tree construction
//!
//! The entry point is [`difference`]. It returns `None` exactly when the two
//! values are deep-equal; otherwise it names the mismatch as precisely as the
//! value kinds allow:
//!
//! - records report one child per differing member
//! - sequences are aligned by their longest common subsequence and report the
//!   positions outside it on each side as `Missing`
//! - maps report keys present on one side only as `Missing` and recurse into
//!   values stored under keys present on both
//! - everything else is a `ValueMismatch`, or a `TypeMismatch` when the
//!   declared types differ

use crate::diff::model::{DiffNode, MapKey, Side};
use crate::equal::{equal_values, lookup};
use crate::errors::{DeepEqError, Result};
use crate::value::{
    opaque_capability, short_type_name, Handle, Identity, Mapping, Reflect, Record, Sequence,
    Value,
};
use crate::{log_op_end, log_op_error, log_op_start};
use std::collections::{BTreeMap, HashSet};

/// Compute the difference tree between two values
///
/// ```
/// use deepeq_core::{difference, DiffNode};
///
/// assert_eq!(difference(&3, &3).unwrap(), None);
/// assert_eq!(difference(&3, &4).unwrap(), Some(DiffNode::ValueMismatch));
/// ```
///
/// # Errors
///
/// - `InvalidHandle`: either handle is absent
/// - `UnsupportedKind`: a function or channel pair had to be decomposed
pub fn difference<'a>(
    a: impl Into<Handle<'a>>,
    b: impl Into<Handle<'a>>,
) -> Result<Option<DiffNode>> {
    let (a, b) = (a.into(), b.into());
    log_op_start!(
        "difference",
        left_type = a.type_name().unwrap_or_default(),
        right_type = b.type_name().unwrap_or_default()
    );
    let start = std::time::Instant::now();

    let node = difference_impl(a, b).map_err(|e| {
        log_op_error!(
            "difference",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64
        );
        e
    })?;

    log_op_end!(
        "difference",
        duration_ms = start.elapsed().as_millis() as u64,
        has_diff = node.is_some()
    );
    Ok(node)
}

fn difference_impl(a: Handle<'_>, b: Handle<'_>) -> Result<Option<DiffNode>> {
    let left = a
        .get()
        .ok_or(DeepEqError::InvalidHandle { side: Side::Left })?;
    let right = b
        .get()
        .ok_or(DeepEqError::InvalidHandle { side: Side::Right })?;
    Differ::default().diff(left, right, false)
}

#[derive(Default)]
struct Differ {
    // Reference pairs currently being descended into
    walking: HashSet<(Identity, Identity)>,
}

impl Differ {
    /// `declared_only` is set inside an opaque value: its internal members
    /// are not part of the comparison.
    fn diff(
        &mut self,
        l: &dyn Reflect,
        r: &dyn Reflect,
        declared_only: bool,
    ) -> Result<Option<DiffNode>> {
        if equal_values(l, r) {
            return Ok(None);
        }

        if l.type_name() != r.type_name() {
            return Ok(Some(DiffNode::TypeMismatch {
                left: short_type_name(l.type_name()).into_owned(),
                right: short_type_name(r.type_name()).into_owned(),
            }));
        }

        let (lv, rv) = (l.reflect(), r.reflect());
        if lv.kind() != rv.kind() {
            return Ok(Some(DiffNode::ValueMismatch));
        }
        let pair = lv.identity().zip(rv.identity());

        match (lv, rv) {
            (Value::Array(a), Value::Array(b)) => Ok(Some(self.sequences(Some(a), Some(b)))),
            (Value::Slice(a), Value::Slice(b)) => Ok(Some(self.sequences(a, b))),
            (Value::Map(a), Value::Map(b)) => self.mappings(a, b, declared_only),
            (Value::Struct(a), Value::Struct(b)) => {
                let declared_only = declared_only || opaque_capability(l).is_some();
                self.records(a, b, declared_only)
            }
            (Value::Pointer(Some(a)), Value::Pointer(Some(b))) => {
                self.descend(pair, a.target, b.target)
            }
            (Value::Interface(Some(a)), Value::Interface(Some(b))) => self.descend(pair, a, b),
            (Value::Func { .. }, _) | (Value::Chan, _) => Err(DeepEqError::UnsupportedKind {
                type_name: short_type_name(l.type_name()).into_owned(),
                kind: lv.kind(),
            }),
            _ => Ok(Some(DiffNode::ValueMismatch)),
        }
    }

    /// Follow a pointer or dynamic box, once per reference pair
    fn descend(
        &mut self,
        pair: Option<(Identity, Identity)>,
        l: &dyn Reflect,
        r: &dyn Reflect,
    ) -> Result<Option<DiffNode>> {
        let declared_only = opaque_capability(l).is_some();
        let Some(pair) = pair else {
            return self.diff(l, r, declared_only);
        };
        if !self.walking.insert(pair) {
            tracing::trace!(left = %pair.0, right = %pair.1, "cycle while diffing");
            return Ok(None);
        }
        let result = self.diff(l, r, declared_only);
        self.walking.remove(&pair);
        result
    }

    fn sequences(&mut self, a: Option<&dyn Sequence>, b: Option<&dyn Sequence>) -> DiffNode {
        let (Some(a), Some(b)) = (a, b) else {
            return DiffNode::ValueMismatch;
        };
        if a.is_empty() || b.is_empty() {
            return DiffNode::ValueMismatch;
        }

        let left: Vec<&dyn Reflect> = a.items().collect();
        let right: Vec<&dyn Reflect> = b.items().collect();
        let common = longest_common_subsequence(&left, &right);
        let left = uncommon(&left, &common);
        let right = uncommon(&right, &common);
        if left.is_empty() && right.is_empty() {
            return DiffNode::ValueMismatch;
        }
        DiffNode::IndexDiff { left, right }
    }

    fn mappings(
        &mut self,
        a: Option<&dyn Mapping>,
        b: Option<&dyn Mapping>,
        declared_only: bool,
    ) -> Result<Option<DiffNode>> {
        let (Some(a), Some(b)) = (a, b) else {
            return Ok(Some(DiffNode::ValueMismatch));
        };
        let (left_entries, right_entries) = (a.entries(), b.entries());
        let left = self.keyed(&left_entries, &right_entries, declared_only)?;
        let right = self.keyed(&right_entries, &left_entries, declared_only)?;
        if left.is_empty() && right.is_empty() {
            return Ok(Some(DiffNode::ValueMismatch));
        }
        Ok(Some(DiffNode::KeyDiff { left, right }))
    }

    /// Children for the keys of `own`, looked up in `other`
    fn keyed(
        &mut self,
        own: &[(&dyn Reflect, &dyn Reflect)],
        other: &[(&dyn Reflect, &dyn Reflect)],
        declared_only: bool,
    ) -> Result<BTreeMap<MapKey, DiffNode>> {
        let mut children = BTreeMap::new();
        for (key, value) in own {
            let child = match lookup(other, *key) {
                None => Some(DiffNode::Missing),
                Some(counterpart) => self.diff(*value, counterpart, declared_only)?,
            };
            if let Some(child) = child {
                children.insert(MapKey::from_reflect(*key), child);
            }
        }
        Ok(children)
    }

    fn records(
        &mut self,
        a: &dyn Record,
        b: &dyn Record,
        declared_only: bool,
    ) -> Result<Option<DiffNode>> {
        let mut fields = BTreeMap::new();
        for (index, desc) in a.fields().iter().enumerate() {
            if declared_only && !desc.declared {
                continue;
            }
            let child = match (a.read_member(index), b.read_member(index)) {
                (Some(x), Some(y)) => self.diff(x, y, declared_only)?,
                (None, None) => None,
                _ => Some(DiffNode::Missing),
            };
            if let Some(child) = child {
                fields.insert(desc.name.to_string(), child);
            }
        }
        // Reached only for unequal records, so an opaque equality that
        // disagrees with the declared members still reports a mismatch.
        if fields.is_empty() {
            return Ok(Some(DiffNode::ValueMismatch));
        }
        Ok(Some(DiffNode::FieldDiff { fields }))
    }
}

/// Longest common subsequence of `x` and `y` under deep equality
///
/// Among equally long candidates the one found by dropping the last element
/// of `x` first is preferred, which keeps the reported positions stable.
fn longest_common_subsequence<'a>(
    x: &[&'a dyn Reflect],
    y: &[&dyn Reflect],
) -> Vec<&'a dyn Reflect> {
    let (n, m) = (x.len(), y.len());
    let mut same = vec![vec![false; m]; n];
    let mut lengths = vec![vec![0usize; m + 1]; n + 1];
    for i in 1..=n {
        for j in 1..=m {
            if equal_values(x[i - 1], y[j - 1]) {
                same[i - 1][j - 1] = true;
                lengths[i][j] = lengths[i - 1][j - 1] + 1;
            } else {
                lengths[i][j] = lengths[i - 1][j].max(lengths[i][j - 1]);
            }
        }
    }

    let mut common = Vec::with_capacity(lengths[n][m]);
    let (mut i, mut j) = (n, m);
    while i > 0 && j > 0 {
        if same[i - 1][j - 1] {
            common.push(x[i - 1]);
            i -= 1;
            j -= 1;
        } else if lengths[i - 1][j] < lengths[i][j - 1] {
            j -= 1;
        } else {
            i -= 1;
        }
    }
    common.reverse();
    common
}

/// Positions of `items` left over after a greedy walk against `common`
fn uncommon(items: &[&dyn Reflect], common: &[&dyn Reflect]) -> BTreeMap<usize, DiffNode> {
    let mut missing = BTreeMap::new();
    let mut j = 0;
    for (i, item) in items.iter().enumerate() {
        if j < common.len() && equal_values(*item, common[j]) {
            j += 1;
        } else {
            missing.insert(i, DiffNode::Missing);
        }
    }
    missing
}
