//! Structural model
//!
//! Stores the classes and relationships recovered from one batch.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::core::RelationshipKind;

/// One recognized class
///
/// Members are signature strings, optionally prefixed with a visibility
/// marker (`+`, `-`, `#`), kept in first-seen source order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClassRecord {
    pub name: String,
    pub attributes: Vec<String>,
    pub methods: Vec<String>,
}

impl ClassRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            methods: Vec::new(),
        }
    }

    /// A record for a file without a recognizable class
    pub fn unnamed() -> Self {
        Self::default()
    }

    /// Whether the record can take part in resolution and layout
    pub fn is_usable(&self) -> bool {
        !self.name.is_empty()
    }

    pub fn add_attribute(&mut self, signature: impl Into<String>) {
        self.attributes.push(signature.into());
    }

    pub fn add_method(&mut self, signature: impl Into<String>) {
        self.methods.push(signature.into());
    }

    pub fn with_attribute(mut self, signature: impl Into<String>) -> Self {
        self.add_attribute(signature);
        self
    }

    pub fn with_method(mut self, signature: impl Into<String>) -> Self {
        self.add_method(signature);
        self
    }
}

/// A directed, typed edge between two classes
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Relationship {
    pub from: String,
    pub to: String,
    #[serde(rename = "type")]
    pub kind: RelationshipKind,
}

impl Relationship {
    pub fn new(from: impl Into<String>, to: impl Into<String>, kind: RelationshipKind) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            kind,
        }
    }
}

/// Classes and relationships of one batch
///
/// Class names are unique: adding a second class with a known name is
/// refused. Relationships are only accepted when both endpoints are
/// known classes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawModel")]
pub struct ClassModel {
    classes: Vec<ClassRecord>,
    relationships: Vec<Relationship>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl ClassModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a class; returns `false` if it is unnamed or already present
    pub fn add_class(&mut self, class: ClassRecord) -> bool {
        if !class.is_usable() || self.index.contains_key(&class.name) {
            return false;
        }
        self.index.insert(class.name.clone(), self.classes.len());
        self.classes.push(class);
        true
    }

    /// Add a relationship; returns `false` if an endpoint is unknown
    pub fn add_relationship(&mut self, rel: Relationship) -> bool {
        if !self.contains(&rel.from) || !self.contains(&rel.to) {
            return false;
        }
        self.relationships.push(rel);
        true
    }

    pub fn classes(&self) -> &[ClassRecord] {
        &self.classes
    }

    pub fn relationships(&self) -> &[Relationship] {
        &self.relationships
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    pub fn relationship_count(&self) -> usize {
        self.relationships.len()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn get_class(&self, name: &str) -> Option<&ClassRecord> {
        self.index.get(name).map(|&i| &self.classes[i])
    }

    /// Position of a class in insertion order
    pub fn class_index(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Snapshot of the known class names
    pub fn class_names(&self) -> HashSet<String> {
        self.index.keys().cloned().collect()
    }

    /// Rebuild a model from serialized parts, reapplying the invariants
    pub fn from_parts(classes: Vec<ClassRecord>, relationships: Vec<Relationship>) -> Self {
        let mut model = Self::new();
        for class in classes {
            model.add_class(class);
        }
        for rel in relationships {
            model.add_relationship(rel);
        }
        model
    }
}

/// Serialized form, revalidated on the way in
#[derive(Deserialize)]
struct RawModel {
    #[serde(default)]
    classes: Vec<ClassRecord>,
    #[serde(default)]
    relationships: Vec<Relationship>,
}

impl From<RawModel> for ClassModel {
    fn from(raw: RawModel) -> Self {
        Self::from_parts(raw.classes, raw.relationships)
    }
}
