use std::sync::OnceLock;

/// Which kernel implementation processes the rows.
///
/// [`Backend::Scalar`] is always available and is the reference the vector
/// kernels are checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Scalar,
    /// Eight-lane kernels on the `wide` vector types.
    Wide,
}

impl Backend {
    /// The backend chosen for this build. Selection runs once and the
    /// result is cached.
    #[must_use]
    pub fn active() -> Self {
        static ACTIVE: OnceLock<Backend> = OnceLock::new();
        *ACTIVE.get_or_init(|| {
            let backend = Self::detect();
            log::debug!("Using {} kernels", backend.name());
            backend
        })
    }

    /// Every backend usable in this build, scalar first.
    #[must_use]
    pub fn available() -> Vec<Self> {
        let mut backends = vec![Self::Scalar];
        if Self::detect() == Self::Wide {
            backends.push(Self::Wide);
        }
        backends
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Scalar => "scalar",
            Self::Wide => "wide",
        }
    }

    /// `wide` picks its instruction set when the crate is compiled, so there
    /// is nothing to probe at run time. The vector kernels are used when the
    /// target has native 128-bit lanes; without them `wide` falls back to
    /// plain arrays and the scalar kernels are no slower.
    #[cfg(feature = "simd")]
    const fn detect() -> Self {
        if cfg!(any(
            target_feature = "sse2",
            target_feature = "neon",
            target_feature = "simd128"
        )) {
            Self::Wide
        } else {
            Self::Scalar
        }
    }

    #[cfg(not(feature = "simd"))]
    const fn detect() -> Self {
        Self::Scalar
    }
}
