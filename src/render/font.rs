use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use resvg::usvg::fontdb;

use crate::error::{Error, Result};

/// A font file loaded from disk, ready to register with `usvg`.
#[derive(Debug, Clone)]
pub struct FontBook {
    path: PathBuf,
    data: Arc<Vec<u8>>,
    family: String,
    weight: u16,
}
impl FontBook {
    /// Reads a TrueType/OpenType font and records its family name and weight.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or holds no usable face.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|e| Error::io(path, e))?;

        let mut db = fontdb::Database::new();
        db.load_font_data(data.clone());

        let face = db.faces().next().ok_or_else(|| Error::Font {
            path: path.to_path_buf(),
            reason: "no font faces found",
        })?;
        let family = face
            .families
            .first()
            .map(|(name, _)| name.clone())
            .ok_or_else(|| Error::Font {
                path: path.to_path_buf(),
                reason: "font has no family name",
            })?;
        let weight = face.weight.0;

        log::debug!("Loaded font `{family}` ({weight}) from {}", path.display());
        Ok(Self {
            path: path.to_path_buf(),
            data: Arc::new(data),
            family,
            weight,
        })
    }

    /// Adds this font to a font database
    pub fn register(&self, db: &mut fontdb::Database) {
        db.load_font_data(self.data.as_ref().clone());
    }

    /// Family name to reference from SVG text
    #[must_use]
    pub fn family(&self) -> &str {
        &self.family
    }

    /// CSS weight of the face
    #[must_use]
    pub fn weight(&self) -> u16 {
        self.weight
    }

    /// File the font was read from
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_font() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = FontBook::load(dir.path().join("missing.ttf")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn test_not_a_font() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("fake.ttf");
        std::fs::write(&path, b"definitely not a font").unwrap();

        let err = FontBook::load(&path).unwrap_err();
        assert!(matches!(err, Error::Font { .. }));
    }
}
