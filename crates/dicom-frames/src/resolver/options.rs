//! Resolver configuration.

/// Options controlling how a [`FrameResolver`](super::FrameResolver) applies
/// functional group precedence.
///
/// The defaults follow the standard behavior for enhanced multi-frame
/// objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolverOptions {
    /// Hide NumberOfFrames when the record has functional groups.
    ///
    /// NumberOfFrames describes the whole multi-frame record, so reading it
    /// through a per-frame view would give contradictory answers.
    pub hide_number_of_frames: bool,

    /// Fall back to attributes found inside private sequences.
    ///
    /// When enabled, an attribute nested in a private sequence is returned
    /// only if no public source and no base record value exists. When
    /// disabled, such attributes are never returned.
    pub private_fallback: bool,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            hide_number_of_frames: true,
            private_fallback: true,
        }
    }
}

impl ResolverOptions {
    /// Creates the default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options that ignore values nested in private sequences.
    pub fn strict_public() -> Self {
        Self {
            private_fallback: false,
            ..Self::default()
        }
    }

    /// Sets whether NumberOfFrames is hidden in per-frame mode.
    pub fn hide_number_of_frames(mut self, hide: bool) -> Self {
        self.hide_number_of_frames = hide;
        self
    }

    /// Sets whether values nested in private sequences may be returned.
    pub fn private_fallback(mut self, enabled: bool) -> Self {
        self.private_fallback = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ResolverOptions::new();
        assert!(options.hide_number_of_frames);
        assert!(options.private_fallback);
        assert_eq!(options, ResolverOptions::default());
    }

    #[test]
    fn test_builders() {
        let strict = ResolverOptions::strict_public();
        assert!(!strict.private_fallback);
        assert!(strict.hide_number_of_frames);

        let options = ResolverOptions::new()
            .hide_number_of_frames(false)
            .private_fallback(false);
        assert!(!options.hide_number_of_frames);
        assert_eq!(options, strict.hide_number_of_frames(false));
    }
}
