//! Types about configuration.

#[cfg(feature = "config_serde")]
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;

#[derive(Clone, Debug)]
#[cfg_attr(feature = "config_serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config_serde", serde(rename_all = "camelCase", default))]
/// Options of the document lexer.
pub struct LexOptions {
    /// Keep text tokens that consist of whitespace only.
    pub whitespace_text: bool,
    /// Reject documents with more open elements than this.
    pub max_depth: Option<NonZeroUsize>,
}

impl Default for LexOptions {
    fn default() -> Self {
        Self {
            whitespace_text: true,
            max_depth: None,
        }
    }
}
