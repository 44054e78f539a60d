use serde::{Deserialize, Serialize};

/// Filtering mode for environment lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FilterMode {
    Nearest,
    #[default]
    Bilinear,
}

/// Filtering configuration paired with an environment map.
///
/// Immutable and shared across all shading invocations of a draw. Wrap
/// behavior is not configurable here: longitude wraps, latitude clamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Sampler {
    pub filter: FilterMode,
}

impl Sampler {
    pub fn nearest() -> Self {
        Self {
            filter: FilterMode::Nearest,
        }
    }

    pub fn bilinear() -> Self {
        Self {
            filter: FilterMode::Bilinear,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_bilinear() {
        assert_eq!(Sampler::default(), Sampler::bilinear());
    }
}
