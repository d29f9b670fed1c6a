//! Member pattern extraction
//!
//! Two [`MemberExtractor`] strategies built on the recognizers in
//! [`patterns`].

mod full_signature;
mod name_only;
pub mod patterns;

pub use full_signature::FullSignatureExtractor;
pub use name_only::NameOnlyExtractor;

use crate::core::{ExtractMode, MemberExtractor};

/// Create the extractor for a mode
pub fn extractor_for(mode: ExtractMode) -> Box<dyn MemberExtractor> {
    match mode {
        ExtractMode::NameOnly => Box::new(NameOnlyExtractor::new()),
        ExtractMode::FullSignature => Box::new(FullSignatureExtractor::new()),
    }
}
