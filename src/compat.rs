//! Construction-time compatibility shims.
//!
//! Older releases named the predecessor argument `layer`; the current name
//! is `prev_layer`. [`PrevLayer`] normalises both spellings at the start of
//! construction: the deprecated one still works but logs a warning naming
//! the removal version. Behaviour is identical either way.

use crate::stack::Layer;

/// Version after which the deprecated `layer` argument is removed.
pub const LAYER_ARG_END_SUPPORT: &str = "1.9";

/// Predecessor argument for layer constructors.
///
/// Any `&Layer` (or `&impl AsRef<Layer>`) converts into this directly, so
/// callers on the current API never see it. The deprecated spelling is
/// reached through [`PrevLayer::deprecated_layer`].
pub struct PrevLayer<'a> {
    prev_layer: Option<&'a Layer>,
    deprecated: Option<&'a Layer>,
}

impl<'a> PrevLayer<'a> {
    /// Current argument name.
    pub fn new(prev_layer: &'a impl AsRef<Layer>) -> Self {
        Self {
            prev_layer: Some(prev_layer.as_ref()),
            deprecated: None,
        }
    }

    /// Deprecated argument name `layer`. Logs a warning when resolved.
    pub fn deprecated_layer(layer: &'a impl AsRef<Layer>) -> Self {
        Self {
            prev_layer: None,
            deprecated: Some(layer.as_ref()),
        }
    }

    /// Normalise to the predecessor, warning if the deprecated spelling
    /// was used. `owner` names the constructing layer in the diagnostic.
    pub(crate) fn resolve(self, owner: &str) -> &'a Layer {
        match (self.prev_layer, self.deprecated) {
            (Some(layer), _) => layer,
            (None, Some(layer)) => {
                tracing::warn!(
                    "{owner}: argument `layer` is deprecated and will be removed in \
                     {LAYER_ARG_END_SUPPORT}; pass `prev_layer` instead"
                );
                layer
            }
            // Both constructors set exactly one side.
            (None, None) => unreachable!("PrevLayer built without a predecessor"),
        }
    }
}

impl<'a, L: AsRef<Layer>> From<&'a L> for PrevLayer<'a> {
    fn from(prev_layer: &'a L) -> Self {
        Self::new(prev_layer)
    }
}
