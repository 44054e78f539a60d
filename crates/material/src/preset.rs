use crate::GlassMaterial;
use std::path::Path;

/// Errors from preset persistence.
#[derive(Debug, thiserror::Error)]
pub enum PresetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl GlassMaterial {
    /// Save the material as a pretty-printed JSON preset.
    pub fn save_preset(&self, path: impl AsRef<Path>) -> Result<(), PresetError> {
        let path = path.as_ref();
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        tracing::info!("saved material preset to {path:?}");
        Ok(())
    }

    /// Load a material preset from JSON.
    pub fn load_preset(path: impl AsRef<Path>) -> Result<Self, PresetError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let material = serde_json::from_reader(file)?;
        tracing::info!("loaded material preset from {path:?}");
        Ok(material)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn preset_roundtrip_preserves_fields() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("frosted.json");

        let mut mat = GlassMaterial::default();
        mat.glow_scale = 12.0;
        mat.glow_tint = Vec3::new(0.1, 0.4, 0.7);
        mat.save_preset(&path).unwrap();

        let loaded = GlassMaterial::load_preset(&path).unwrap();
        assert_eq!(loaded, mat);
    }

    #[test]
    fn load_rejects_garbage() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("broken.json");
        std::fs::write(&path, b"not json at all").unwrap();

        assert!(matches!(
            GlassMaterial::load_preset(&path),
            Err(PresetError::Json(_))
        ));
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(matches!(
            GlassMaterial::load_preset(tmp.path().join("nope.json")),
            Err(PresetError::Io(_))
        ));
    }
}
