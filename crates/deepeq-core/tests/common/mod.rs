//! Shared fixtures: message types with internal bookkeeping, a record that
//! holds one, self-referencing lists and a recording reporter.

#![allow(dead_code)]

use deepeq_core::value::{Message, Reflect};
use deepeq_core::{equal, reflect_message, reflect_record, TestReporter};
use std::cell::OnceCell;
use std::rc::Rc;

/// Nested message; `size_cache` is bookkeeping, not data
#[derive(Debug, Clone, Default)]
pub struct Sub {
    pub id: i64,
    size_cache: i32,
}

impl Sub {
    pub fn new(id: i64) -> Self {
        Self { id, size_cache: 0 }
    }

    pub fn with_cache(mut self, size_cache: i32) -> Self {
        self.size_cache = size_cache;
        self
    }
}

impl Message for Sub {
    fn declared_eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

reflect_message!(Sub { pub id, size_cache });

/// Top-level message with declared fields and two internal ones
#[derive(Debug, Clone, Default)]
pub struct Sample {
    pub text: String,
    pub sub: Option<Box<Sub>>,
    pub tags: Vec<String>,
    size_cache: i32,
    unknown_fields: Vec<u8>,
}

impl Sample {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            ..Self::default()
        }
    }

    pub fn with_sub(mut self, sub: Sub) -> Self {
        self.sub = Some(Box::new(sub));
        self
    }

    pub fn with_tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }

    /// Simulates the bookkeeping a serializer leaves behind
    pub fn touched(mut self, size_cache: i32, unknown: &[u8]) -> Self {
        self.size_cache = size_cache;
        self.unknown_fields = unknown.to_vec();
        self
    }
}

impl Message for Sample {
    fn declared_eq(&self, other: &Self) -> bool {
        self.text == other.text && self.tags == other.tags && equal(&self.sub, &other.sub)
    }
}

reflect_message!(Sample {
    pub text,
    pub sub,
    pub tags,
    size_cache,
    unknown_fields,
});

/// Plain record holding a message behind a pointer
#[derive(Debug, Clone)]
pub struct Holder {
    pub name: String,
    pub sample: Box<Sample>,
}

impl Holder {
    pub fn new(name: &str, sample: Sample) -> Self {
        Self {
            name: name.to_string(),
            sample: Box::new(sample),
        }
    }
}

reflect_record!(Holder { pub name, pub sample });

/// Linked node whose successor can be set after construction
pub struct Node {
    pub value: i32,
    pub next: OnceCell<Rc<Node>>,
}

reflect_record!(Node { pub value, pub next });

/// Circular list holding `values` in order; the last node links back to
/// the first
pub fn ring(values: &[i32]) -> Rc<Node> {
    let nodes: Vec<Rc<Node>> = values
        .iter()
        .map(|&value| {
            Rc::new(Node {
                value,
                next: OnceCell::new(),
            })
        })
        .collect();
    for (i, node) in nodes.iter().enumerate() {
        let _ = node.next.set(nodes[(i + 1) % nodes.len()].clone());
    }
    nodes[0].clone()
}

/// Linked node whose successor is held in a dynamic box
pub struct DynNode {
    pub value: i32,
    pub next: OnceCell<Rc<dyn Reflect>>,
}

reflect_record!(DynNode { pub value, pub next });

/// Like [`ring`], with every link going through `Rc<dyn Reflect>`
pub fn dyn_ring(values: &[i32]) -> Rc<dyn Reflect> {
    let nodes: Vec<Rc<DynNode>> = values
        .iter()
        .map(|&value| {
            Rc::new(DynNode {
                value,
                next: OnceCell::new(),
            })
        })
        .collect();
    for (i, node) in nodes.iter().enumerate() {
        let next: Rc<dyn Reflect> = nodes[(i + 1) % nodes.len()].clone();
        let _ = node.next.set(next);
    }
    nodes[0].clone()
}

#[derive(Debug, Default)]
pub struct RecordingReporter {
    pub failures: Vec<String>,
    pub logs: Vec<String>,
}

impl TestReporter for RecordingReporter {
    fn fail(&mut self, message: &str) {
        self.failures.push(message.to_string());
    }

    fn log(&mut self, text: &str) {
        self.logs.push(text.to_string());
    }
}
