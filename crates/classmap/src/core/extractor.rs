//! Member extraction trait
//!
//! A member extractor turns one compilation unit into one class record.
//! The two strategies shipped with the crate differ only in how much of
//! each declaration they keep; both share the recognizers in
//! [`crate::extract::patterns`].

use super::{ExtractMode, Variant};
use crate::model::ClassRecord;

/// Strategy for recovering a class record from source text
///
/// Extraction never fails: unrecognized text is skipped, and a file
/// without a class declaration yields a record with an empty name.
///
/// # Example
/// ```
/// use classmap::core::{MemberExtractor, Variant};
/// use classmap::extract::NameOnlyExtractor;
///
/// let extractor = NameOnlyExtractor::new();
/// let record = extractor.extract("public class A { private int x; }", Variant::Java);
/// assert_eq!(record.name, "A");
/// assert_eq!(record.attributes, vec!["int x"]);
/// ```
pub trait MemberExtractor: Send + Sync {
    /// Extract the first class declared in `source`
    fn extract(&self, source: &str, variant: Variant) -> ClassRecord;

    /// The mode this extractor implements
    fn mode(&self) -> ExtractMode;
}
