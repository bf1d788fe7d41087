//! Rendering of a single value
//!
//! The output is multi-line, two-space indented, with composite members
//! followed by `,`. Given a difference tree, the leaves of that tree are
//! highlighted in the side's color: green for the expected (left) value, red
//! for the actual (right) value.

use crate::diff::{DiffNode, MapKey, Side};
use crate::render::ansi::{GREEN, RED, RESET};
use crate::value::{
    opaque_capability, short_type_name, Identity, Mapping, Reflect, Record, Sequence, Value,
};
use std::collections::HashSet;

/// Renderer for one side of a comparison
pub struct Printer {
    side: Side,
    buf: String,
    emphasis_depth: usize,
    color: bool,
    // Pointers and dynamic boxes on the current rendering path
    rendering: HashSet<Identity>,
}

impl Printer {
    pub fn new(side: Side) -> Self {
        Self {
            side,
            buf: String::new(),
            emphasis_depth: 0,
            color: true,
            rendering: HashSet::new(),
        }
    }

    /// Disable escape sequences entirely
    pub fn plain(mut self) -> Self {
        self.color = false;
        self
    }

    /// Render `value`, highlighting the leaves of `diff` for this side
    pub fn render(mut self, value: &dyn Reflect, diff: Option<&DiffNode>, show_type: bool) -> String {
        self.print_value("", value, diff, false, show_type);
        self.buf
    }

    fn print_value(
        &mut self,
        offset: &str,
        v: &dyn Reflect,
        d: Option<&DiffNode>,
        declared_only: bool,
        show_type: bool,
    ) {
        self.emphasis_on(d);
        self.print_kind(offset, v, d, declared_only, show_type);
        self.emphasis_off(d);
    }

    fn print_kind(
        &mut self,
        offset: &str,
        v: &dyn Reflect,
        d: Option<&DiffNode>,
        declared_only: bool,
        show_type: bool,
    ) {
        let name = short_type_name(v.type_name());
        let value = v.reflect();
        let text = match value {
            Value::Bool(b) => annotate(&name, "bool", b, show_type),
            Value::Int(i) => annotate(&name, "", i, show_type),
            Value::Uint(u) => annotate(&name, "", u, show_type),
            Value::Float(f) => annotate(&name, "", f, show_type),
            Value::Complex { re, im } => annotate(&name, "", format!("({}{:+}i)", re, im), show_type),
            Value::Char(c) => annotate(&name, "char", format!("{:?}", c), show_type),
            Value::Str(s) => {
                if matches!(name.as_ref(), "String" | "&str") {
                    format!("{:?}", s)
                } else {
                    format!("{}({:?})", name, s)
                }
            }
            Value::Array(seq) => return self.print_sequence(offset, &name, Some(seq), d),
            Value::Slice(seq) => return self.print_sequence(offset, &name, seq, d),
            Value::Map(map) => return self.print_map(offset, &name, map, d),
            Value::Struct(record) => {
                let declared_only = declared_only || opaque_capability(v).is_some();
                return self.print_record(offset, &name, record, d, declared_only);
            }
            Value::Pointer(None) | Value::Interface(None) | Value::Func { nil: true } => {
                format!("{}(nil)", name)
            }
            Value::Pointer(Some(pointee)) => {
                let Some(id) = self.enter(&name, value.identity()) else {
                    return;
                };
                self.buf.push('&');
                let declared_only = opaque_capability(pointee.target).is_some();
                self.print_value(offset, pointee.target, d, declared_only, false);
                self.rendering.remove(&id);
                return;
            }
            Value::Interface(Some(inner)) => {
                let Some(id) = self.enter(&name, value.identity()) else {
                    return;
                };
                let declared_only = opaque_capability(inner).is_some();
                self.print_value(offset, inner, d, declared_only, true);
                self.rendering.remove(&id);
                return;
            }
            Value::Func { nil: false } => format!("{}(func)", name),
            Value::Chan => format!("{}(chan)", name),
            Value::RawPointer(addr) => format!("{}({})", name, addr),
        };
        self.buf.push_str(&text);
    }

    /// Mark a reference as being rendered, or write a back-reference when
    /// it already is
    fn enter(&mut self, name: &str, id: Option<Identity>) -> Option<Identity> {
        let id = id?;
        if !self.rendering.insert(id) {
            self.buf.push_str(&format!("({})({})", name, id.addr));
            return None;
        }
        Some(id)
    }

    fn print_sequence(
        &mut self,
        offset: &str,
        name: &str,
        seq: Option<&dyn Sequence>,
        d: Option<&DiffNode>,
    ) {
        let Some(seq) = seq else {
            self.buf.push_str(&format!("{}(nil)", name));
            return;
        };
        if seq.is_empty() {
            self.buf.push_str(&format!("{}{{}}", name));
            return;
        }

        let inner = format!("{}  ", offset);
        self.buf.push_str(&format!("{}{{\n", name));
        for (index, item) in seq.items().enumerate() {
            let child = d.and_then(|d| d.index(self.side, index));
            self.buf.push_str(&inner);
            self.print_value(&inner, item, child, false, false);
            self.buf.push_str(",\n");
        }
        self.buf.push_str(offset);
        self.buf.push('}');
    }

    fn print_map(
        &mut self,
        offset: &str,
        name: &str,
        map: Option<&dyn Mapping>,
        d: Option<&DiffNode>,
    ) {
        let Some(map) = map else {
            self.buf.push_str(&format!("{}(nil)", name));
            return;
        };
        if map.is_empty() {
            self.buf.push_str(&format!("{}{{}}", name));
            return;
        }

        let mut entries: Vec<_> = map
            .entries()
            .into_iter()
            .map(|(key, value)| (MapKey::from_reflect(key), key, value))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));

        let inner = format!("{}  ", offset);
        self.buf.push_str(&format!("{}{{\n", name));
        for (map_key, key, value) in entries {
            let child = d.and_then(|d| d.key(self.side, &map_key));
            self.buf.push_str(&inner);
            self.emphasis_on(child);
            self.print_value(&inner, key, None, false, false);
            self.buf.push_str(": ");
            self.print_value(&inner, value, child, false, false);
            self.emphasis_off(child);
            self.buf.push_str(",\n");
        }
        self.buf.push_str(offset);
        self.buf.push('}');
    }

    fn print_record(
        &mut self,
        offset: &str,
        name: &str,
        record: &dyn Record,
        d: Option<&DiffNode>,
        declared_only: bool,
    ) {
        let fields = record.fields();
        if fields.is_empty() {
            self.buf.push_str(&format!("{}{{}}", name));
            return;
        }

        let inner = format!("{}  ", offset);
        self.buf.push_str(&format!("{}{{\n", name));
        for (index, desc) in fields.iter().enumerate() {
            if declared_only && !desc.declared {
                continue;
            }
            let Some(member) = record.read_member(index) else {
                continue;
            };
            let child = d.and_then(|d| d.field(desc.name));
            self.buf.push_str(&inner);
            self.emphasis_on(child);
            self.buf.push_str(desc.name);
            self.buf.push_str(": ");
            self.print_value(&inner, member, child, declared_only, false);
            self.emphasis_off(child);
            self.buf.push_str(",\n");
        }
        self.buf.push_str(offset);
        self.buf.push('}');
    }

    // Emphasis nests: only the outermost leaf emits the color and its reset.
    fn emphasis_on(&mut self, d: Option<&DiffNode>) {
        if !d.is_some_and(DiffNode::is_leaf) {
            return;
        }
        if self.emphasis_depth == 0 && self.color {
            self.buf.push_str(match self.side {
                Side::Left => GREEN,
                Side::Right => RED,
            });
        }
        self.emphasis_depth += 1;
    }

    fn emphasis_off(&mut self, d: Option<&DiffNode>) {
        if !d.is_some_and(DiffNode::is_leaf) {
            return;
        }
        self.emphasis_depth = self.emphasis_depth.saturating_sub(1);
        if self.emphasis_depth == 0 && self.color {
            self.buf.push_str(RESET);
        }
    }
}

/// `value` alone, or `Type(value)` when the type must be shown or is not
/// the natural type of the literal
fn annotate(name: &str, natural: &str, value: impl std::fmt::Display, show_type: bool) -> String {
    if show_type || (!natural.is_empty() && name != natural) {
        format!("{}({})", name, value)
    } else {
        value.to_string()
    }
}

/// Render a value without type annotation at the root and without any
/// escape sequences
///
/// ```
/// use deepeq_core::render::render_plain;
///
/// assert_eq!(render_plain(&vec![1, 2]), "Vec<i32>{\n  1,\n  2,\n}");
/// ```
pub fn render_plain(value: &dyn Reflect) -> String {
    Printer::new(Side::Left).plain().render(value, None, false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_scalars_with_and_without_type() {
        assert_eq!(render_plain(&5i32), "5");
        assert_eq!(Printer::new(Side::Left).plain().render(&5i32, None, true), "i32(5)");
        assert_eq!(render_plain(&true), "true");
        assert_eq!(render_plain(&"hi".to_string()), "\"hi\"");
        assert_eq!(render_plain(&'c'), "'c'");
        assert_eq!(render_plain(&1.5f64), "1.5");
    }

    #[test]
    fn test_null_and_empty_collections() {
        assert_eq!(render_plain(&None::<Vec<i32>>), "Option<Vec<i32>>(nil)");
        assert_eq!(render_plain(&Vec::<i32>::new()), "Vec<i32>{}");
        assert_eq!(render_plain(&BTreeMap::<u8, u8>::new()), "BTreeMap<u8, u8>{}");
    }

    #[test]
    fn test_pointer_renders_pointee() {
        assert_eq!(render_plain(&Box::new(3u8)), "&3");
        assert_eq!(render_plain(&None::<Box<u8>>), "Option<Box<u8>>(nil)");
    }

    #[test]
    fn test_map_entries_sorted_by_key() {
        let map: BTreeMap<String, i32> = [("b".to_string(), 2), ("a".to_string(), 1)].into();
        assert_eq!(
            render_plain(&map),
            "BTreeMap<String, i32>{\n  \"a\": 1,\n  \"b\": 2,\n}"
        );
    }

    #[test]
    fn test_leaf_is_colored_per_side() {
        let left = Printer::new(Side::Left).render(&1i32, Some(&DiffNode::ValueMismatch), false);
        let right = Printer::new(Side::Right).render(&2i32, Some(&DiffNode::ValueMismatch), false);
        assert_eq!(left, format!("{}1{}", GREEN, RESET));
        assert_eq!(right, format!("{}2{}", RED, RESET));
    }

    #[test]
    fn test_only_indexed_positions_are_colored() {
        let diff = DiffNode::IndexDiff {
            left: BTreeMap::from([(1, DiffNode::Missing)]),
            right: BTreeMap::new(),
        };
        let text = Printer::new(Side::Left).render(&vec![1, 2], Some(&diff), false);
        assert_eq!(text, format!("Vec<i32>{{\n  1,\n  {}2{},\n}}", GREEN, RESET));
        let text = Printer::new(Side::Right).render(&vec![1], Some(&diff), false);
        assert_eq!(text, "Vec<i32>{\n  1,\n}");
    }

    #[test]
    fn test_nested_leaves_emit_one_color_pair() {
        let mut printer = Printer::new(Side::Left);
        printer.emphasis_on(Some(&DiffNode::ValueMismatch));
        printer.emphasis_on(Some(&DiffNode::Missing));
        printer.buf.push('x');
        printer.emphasis_off(Some(&DiffNode::Missing));
        printer.emphasis_off(Some(&DiffNode::ValueMismatch));
        assert_eq!(printer.buf, format!("{}x{}", GREEN, RESET));
    }
}
