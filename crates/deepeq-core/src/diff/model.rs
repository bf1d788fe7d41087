//! Difference tree types

use crate::render::render_plain;
use crate::value::{Reflect, Value};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

/// One side of a comparison: left is the expected value, right the actual
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => f.write_str("left"),
            Side::Right => f.write_str("right"),
        }
    }
}

/// A node of the difference tree
///
/// Leaves are [`TypeMismatch`](Self::TypeMismatch),
/// [`ValueMismatch`](Self::ValueMismatch) and [`Missing`](Self::Missing);
/// the others are containers whose entries are never empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DiffNode {
    TypeMismatch {
        left: String,
        right: String,
    },
    ValueMismatch,
    Missing,
    FieldDiff {
        fields: BTreeMap<String, DiffNode>,
    },
    /// Positions are counted independently on each side
    IndexDiff {
        left: BTreeMap<usize, DiffNode>,
        right: BTreeMap<usize, DiffNode>,
    },
    KeyDiff {
        #[serde(with = "key_entries")]
        left: BTreeMap<MapKey, DiffNode>,
        #[serde(with = "key_entries")]
        right: BTreeMap<MapKey, DiffNode>,
    },
}

impl DiffNode {
    /// Leaves are highlighted when rendered; containers only route
    pub fn is_leaf(&self) -> bool {
        matches!(
            self,
            DiffNode::TypeMismatch { .. } | DiffNode::ValueMismatch | DiffNode::Missing
        )
    }

    /// Child node for a record member
    pub fn field(&self, name: &str) -> Option<&DiffNode> {
        match self {
            DiffNode::FieldDiff { fields } => fields.get(name),
            _ => None,
        }
    }

    /// Child node for a sequence position on one side
    pub fn index(&self, side: Side, position: usize) -> Option<&DiffNode> {
        match (self, side) {
            (DiffNode::IndexDiff { left, .. }, Side::Left) => left.get(&position),
            (DiffNode::IndexDiff { right, .. }, Side::Right) => right.get(&position),
            _ => None,
        }
    }

    /// Child node for a map key on one side
    pub fn key(&self, side: Side, key: &MapKey) -> Option<&DiffNode> {
        match (self, side) {
            (DiffNode::KeyDiff { left, .. }, Side::Left) => left.get(key),
            (DiffNode::KeyDiff { right, .. }, Side::Right) => right.get(key),
            _ => None,
        }
    }

    /// Number of leaves in the subtree
    pub fn leaf_count(&self) -> usize {
        match self {
            DiffNode::TypeMismatch { .. } | DiffNode::ValueMismatch | DiffNode::Missing => 1,
            DiffNode::FieldDiff { fields } => fields.values().map(DiffNode::leaf_count).sum(),
            DiffNode::IndexDiff { left, right } => left
                .values()
                .chain(right.values())
                .map(DiffNode::leaf_count)
                .sum(),
            DiffNode::KeyDiff { left, right } => left
                .values()
                .chain(right.values())
                .map(DiffNode::leaf_count)
                .sum(),
        }
    }
}

/// `f64` with a total order, for use as a map key
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FloatKey(pub f64);

impl PartialEq for FloatKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FloatKey {}

impl PartialOrd for FloatKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Ordered projection of a map key
///
/// Scalar keys keep their value; composite keys are identified by their
/// plain rendering. The derived order is the render order of map entries.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MapKey {
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(FloatKey),
    Char(char),
    Str(String),
    Other(String),
}

impl MapKey {
    pub fn from_reflect(key: &dyn Reflect) -> Self {
        match key.reflect() {
            Value::Bool(b) => MapKey::Bool(b),
            Value::Int(i) => MapKey::Int(i),
            Value::Uint(u) => MapKey::Uint(u),
            Value::Float(f) => MapKey::Float(FloatKey(f)),
            Value::Char(c) => MapKey::Char(c),
            Value::Str(s) => MapKey::Str(s.to_string()),
            Value::Pointer(Some(pointee)) => MapKey::from_reflect(pointee.target),
            Value::Interface(Some(inner)) => MapKey::from_reflect(inner),
            _ => MapKey::Other(render_plain(key)),
        }
    }
}

impl fmt::Display for MapKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapKey::Bool(b) => write!(f, "{}", b),
            MapKey::Int(i) => write!(f, "{}", i),
            MapKey::Uint(u) => write!(f, "{}", u),
            MapKey::Float(FloatKey(x)) => write!(f, "{}", x),
            MapKey::Char(c) => write!(f, "{:?}", c),
            MapKey::Str(s) => write!(f, "{:?}", s),
            MapKey::Other(s) => f.write_str(s),
        }
    }
}

// JSON objects only take string keys, so keyed children travel as
// [key, node] pairs.
mod key_entries {
    use super::{DiffNode, MapKey};
    use serde::{Deserialize, Deserializer, Serializer};
    use std::collections::BTreeMap;

    pub fn serialize<S: Serializer>(
        map: &BTreeMap<MapKey, DiffNode>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(map.iter())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<BTreeMap<MapKey, DiffNode>, D::Error> {
        let pairs = Vec::<(MapKey, DiffNode)>::deserialize(deserializer)?;
        Ok(pairs.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaf_classification() {
        let type_mismatch = DiffNode::TypeMismatch {
            left: "i32".into(),
            right: "u8".into(),
        };
        let fields = DiffNode::FieldDiff {
            fields: BTreeMap::new(),
        };
        assert!(DiffNode::ValueMismatch.is_leaf());
        assert!(DiffNode::Missing.is_leaf());
        assert!(type_mismatch.is_leaf());
        assert!(!fields.is_leaf());
    }

    #[test]
    fn test_side_lookups() {
        let node = DiffNode::IndexDiff {
            left: BTreeMap::from([(2, DiffNode::Missing)]),
            right: BTreeMap::new(),
        };
        assert_eq!(node.index(Side::Left, 2), Some(&DiffNode::Missing));
        assert_eq!(node.index(Side::Right, 2), None);
        assert_eq!(node.field("x"), None);
        assert_eq!(node.leaf_count(), 1);
    }

    #[test]
    fn test_map_key_order() {
        let mut keys = vec![
            MapKey::Str("b".into()),
            MapKey::Int(3),
            MapKey::Str("a".into()),
            MapKey::Int(-1),
        ];
        keys.sort();
        assert_eq!(
            keys,
            vec![
                MapKey::Int(-1),
                MapKey::Int(3),
                MapKey::Str("a".into()),
                MapKey::Str("b".into())
            ]
        );
        assert!(MapKey::Float(FloatKey(-0.0)) < MapKey::Float(FloatKey(0.0)));
    }

    #[test]
    fn test_map_key_from_reflect() {
        assert_eq!(MapKey::from_reflect(&"k".to_string()), MapKey::Str("k".into()));
        assert_eq!(MapKey::from_reflect(&Box::new(7u8)), MapKey::Uint(7));
        assert_eq!(MapKey::from_reflect(&'x'), MapKey::Char('x'));
        assert_eq!(MapKey::Str("k".into()).to_string(), "\"k\"");
    }

    #[test]
    fn test_keyed_tree_serializes_as_pairs() {
        let node = DiffNode::KeyDiff {
            left: BTreeMap::from([(MapKey::Int(1), DiffNode::Missing)]),
            right: BTreeMap::new(),
        };
        let text = serde_json::to_string(&node).unwrap();
        assert_eq!(text, r#"{"KeyDiff":{"left":[[{"Int":1},"Missing"]],"right":[]}}"#);
        let back: DiffNode = serde_json::from_str(&text).unwrap();
        assert_eq!(back, node);
    }
}
