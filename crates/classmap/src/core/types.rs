//! Core type definitions for class extraction
//!
//! This module contains the small vocabulary shared by every stage of the
//! pipeline: source language variants, member visibility, relationship
//! kinds and extractor modes.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ClassmapError;

/// Source language pattern set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Java: `extends` / `implements` clauses, private fields
    Java,
    /// C#: `: BaseList`, auto-properties, `internal` access
    CSharp,
}

impl Variant {
    /// Pick a variant from a file extension (`.java`, `.cs`)
    ///
    /// Returns `None` for any other extension; such files are excluded
    /// by the caller.
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?;
        match ext.to_ascii_lowercase().as_str() {
            "java" => Some(Variant::Java),
            "cs" => Some(Variant::CSharp),
            _ => None,
        }
    }

    /// Access keywords recognized in front of a member declaration
    pub fn access_keywords(&self) -> &'static [&'static str] {
        match self {
            Variant::Java => &["public", "private", "protected"],
            Variant::CSharp => &["public", "private", "protected", "internal"],
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Java => write!(f, "java"),
            Variant::CSharp => write!(f, "csharp"),
        }
    }
}

impl FromStr for Variant {
    type Err = ClassmapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "java" => Ok(Variant::Java),
            "csharp" | "c#" | "cs" => Ok(Variant::CSharp),
            other => Err(ClassmapError::UnknownVariant {
                variant: other.to_string(),
            }),
        }
    }
}

/// Visibility marker of a member signature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,    // +
    #[default]
    Private,   // -
    Protected, // # (also C# internal)
}

impl Visibility {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Visibility::Public),
            '-' => Some(Visibility::Private),
            '#' => Some(Visibility::Protected),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Visibility::Public => '+',
            Visibility::Private => '-',
            Visibility::Protected => '#',
        }
    }

    /// Normalized row prefix used by the renderers
    pub fn glyph(self) -> &'static str {
        match self {
            Visibility::Public => "+ ",
            Visibility::Private => "- ",
            Visibility::Protected => "# ",
        }
    }

    /// Map a source access keyword to a marker
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "public" => Some(Visibility::Public),
            "private" => Some(Visibility::Private),
            "protected" | "internal" => Some(Visibility::Protected),
            _ => None,
        }
    }

    /// Split a stored signature into its visibility and bare text
    ///
    /// Total over all inputs: a missing or unknown marker yields
    /// `Private` and the whole trimmed signature.
    pub fn split(signature: &str) -> (Visibility, &str) {
        let mut chars = signature.chars();
        match chars.next().and_then(Visibility::from_char) {
            Some(visibility) => (visibility, chars.as_str().trim()),
            None => (Visibility::Private, signature.trim()),
        }
    }

    /// Replace the leading marker of a signature with the normalized glyph
    pub fn normalize(signature: &str) -> String {
        let (visibility, bare) = Self::split(signature);
        format!("{}{}", visibility.glyph(), bare)
    }
}

/// Relationship type between two classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationshipKind {
    Inheritance,
    Implementation,
    Association,
    Composition,
    Aggregation,
}

impl RelationshipKind {
    /// Whether renderers should draw an open triangular arrowhead
    pub fn is_inheritance_like(self) -> bool {
        matches!(
            self,
            RelationshipKind::Inheritance | RelationshipKind::Implementation
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RelationshipKind::Inheritance => "inheritance",
            RelationshipKind::Implementation => "implementation",
            RelationshipKind::Association => "association",
            RelationshipKind::Composition => "composition",
            RelationshipKind::Aggregation => "aggregation",
        }
    }
}

impl fmt::Display for RelationshipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Member extraction strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExtractMode {
    /// Store `"<type> <name>"` and `"<name>()"` only
    NameOnly,
    /// Store the whitespace-normalized declaration with a visibility marker
    #[default]
    FullSignature,
}

impl fmt::Display for ExtractMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractMode::NameOnly => write!(f, "name-only"),
            ExtractMode::FullSignature => write!(f, "full-signature"),
        }
    }
}

impl FromStr for ExtractMode {
    type Err = ClassmapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name-only" | "names" => Ok(ExtractMode::NameOnly),
            "full-signature" | "full" => Ok(ExtractMode::FullSignature),
            other => Err(ClassmapError::UnknownMode {
                mode: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_from_path() {
        assert_eq!(Variant::from_path("src/A.java"), Some(Variant::Java));
        assert_eq!(Variant::from_path("Models/User.CS"), Some(Variant::CSharp));
        assert_eq!(Variant::from_path("main.rs"), None);
        assert_eq!(Variant::from_path("Makefile"), None);
    }

    #[test]
    fn test_variant_from_str() {
        assert_eq!("Java".parse::<Variant>().unwrap(), Variant::Java);
        assert_eq!("c#".parse::<Variant>().unwrap(), Variant::CSharp);
        let err = "kotlin".parse::<Variant>().unwrap_err();
        assert!(err.to_string().contains("kotlin"));
    }

    #[test]
    fn test_visibility_split() {
        assert_eq!(Visibility::split("+int x"), (Visibility::Public, "int x"));
        assert_eq!(Visibility::split("#run()"), (Visibility::Protected, "run()"));
        assert_eq!(Visibility::split("- name"), (Visibility::Private, "name"));
        assert_eq!(Visibility::split("int x"), (Visibility::Private, "int x"));
        assert_eq!(Visibility::split(""), (Visibility::Private, ""));
    }

    #[test]
    fn test_visibility_normalize() {
        assert_eq!(Visibility::normalize("+getName()"), "+ getName()");
        assert_eq!(Visibility::normalize("String name"), "- String name");
    }

    #[test]
    fn test_visibility_keywords() {
        assert_eq!(Visibility::from_keyword("public"), Some(Visibility::Public));
        assert_eq!(Visibility::from_keyword("internal"), Some(Visibility::Protected));
        assert_eq!(Visibility::from_keyword("static"), None);
    }

    #[test]
    fn test_relationship_kind_display() {
        assert_eq!(RelationshipKind::Inheritance.to_string(), "inheritance");
        assert!(RelationshipKind::Implementation.is_inheritance_like());
        assert!(!RelationshipKind::Composition.is_inheritance_like());
    }

    #[test]
    fn test_extract_mode_parsing() {
        assert_eq!("name-only".parse::<ExtractMode>().unwrap(), ExtractMode::NameOnly);
        assert_eq!(
            "FULL-SIGNATURE".parse::<ExtractMode>().unwrap(),
            ExtractMode::FullSignature
        );
        assert!("verbose".parse::<ExtractMode>().is_err());
        assert_eq!(ExtractMode::default(), ExtractMode::FullSignature);
    }
}
