//! Partnames: absolute, `/`-rooted paths of parts inside a package

use crate::error::{Error, Result};
use std::fmt;

/// Absolute name of a part, e.g. `/ppt/slides/slide1.xml`
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PartUri {
    path: String,
}

impl PartUri {
    /// Normalize and validate a partname.
    ///
    /// A missing leading `/` is added and a trailing one dropped.
    pub fn new(path: &str) -> Result<Self> {
        let path = path.trim();
        if path.is_empty() {
            return Err(Error::InvalidPartUri("empty path".into()));
        }

        let normalized = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{}", path)
        };
        let normalized = normalized.trim_end_matches('/').to_string();

        if normalized.is_empty() || normalized.contains("//") {
            return Err(Error::InvalidPartUri(format!("invalid partname '{}'", path)));
        }
        Ok(Self { path: normalized })
    }

    /// Partname from a `%d` template, e.g. `/ppt/slides/slide%d.xml` and 3
    pub fn from_template(template: &str, n: u32) -> Result<Self> {
        if !template.contains("%d") {
            return Err(Error::InvalidPartUri(format!(
                "partname template '{}' has no %d placeholder",
                template
            )));
        }
        PartUri::new(&template.replacen("%d", &n.to_string(), 1))
    }

    pub(crate) fn from_string_unchecked(path: String) -> Self {
        Self { path }
    }

    pub fn as_str(&self) -> &str {
        &self.path
    }

    /// Path inside the ZIP archive (no leading `/`)
    pub fn zip_name(&self) -> &str {
        &self.path[1..]
    }

    /// Last segment, e.g. `slide1.xml`
    pub fn file_name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or_default()
    }

    /// Extension without the dot, lowercase comparisons are up to the caller
    pub fn extension(&self) -> Option<&str> {
        let name = self.file_name();
        let dot = name.rfind('.')?;
        Some(&name[dot + 1..]).filter(|ext| !ext.is_empty())
    }

    /// Directory part, `/` for a part at the package root
    pub fn base_uri(&self) -> &str {
        match self.path.rfind('/') {
            Some(0) | None => "/",
            Some(pos) => &self.path[..pos],
        }
    }

    /// Trailing number of the file stem: 21 for `/ppt/slides/slide21.xml`
    pub fn idx(&self) -> Option<u32> {
        let name = self.file_name();
        let stem = name.rfind('.').map_or(name, |dot| &name[..dot]);
        let digits = stem.len() - stem.trim_end_matches(|c: char| c.is_ascii_digit()).len();
        if digits == 0 || digits == stem.len() {
            return None;
        }
        stem[stem.len() - digits..].parse().ok()
    }

    /// Partname of the `.rels` part holding this part's relationships.
    ///
    /// `/ppt/presentation.xml` gives `/ppt/_rels/presentation.xml.rels`.
    pub fn relationships_uri(&self) -> PartUri {
        let base = self.base_uri().trim_end_matches('/');
        PartUri {
            path: format!("{}/_rels/{}.rels", base, self.file_name()),
        }
    }

    /// Resolve a relationship target relative to this part's directory
    pub fn resolve(&self, relative: &str) -> Result<PartUri> {
        if relative.starts_with('/') {
            return PartUri::new(relative);
        }

        let mut segments: Vec<&str> = self
            .base_uri()
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();
        for segment in relative.split('/') {
            match segment {
                "" | "." => {}
                ".." => {
                    segments.pop();
                }
                s => segments.push(s),
            }
        }
        PartUri::new(&format!("/{}", segments.join("/")))
    }

    /// Target string for a relationship from this part to `target`
    pub fn relative_ref(&self, target: &PartUri) -> String {
        let from: Vec<&str> = self.base_uri().split('/').filter(|s| !s.is_empty()).collect();
        let to: Vec<&str> = target.path.split('/').filter(|s| !s.is_empty()).collect();
        let (to_dir, to_file) = to.split_at(to.len().saturating_sub(1));

        let common = from
            .iter()
            .zip(to_dir.iter())
            .take_while(|(a, b)| a == b)
            .count();

        let mut parts: Vec<&str> = vec![".."; from.len() - common];
        parts.extend_from_slice(&to_dir[common..]);
        parts.extend_from_slice(to_file);
        parts.join("/")
    }

    pub fn is_relationships(&self) -> bool {
        self.path.contains("/_rels/") && self.path.ends_with(".rels")
    }
}

impl fmt::Display for PartUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

impl std::str::FromStr for PartUri {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        PartUri::new(s)
    }
}

/// Partnames fixed by convention in a presentation package
pub mod well_known {
    use super::PartUri;

    pub fn content_types() -> PartUri {
        PartUri::from_string_unchecked("/[Content_Types].xml".into())
    }

    pub fn package_rels() -> PartUri {
        PartUri::from_string_unchecked("/_rels/.rels".into())
    }

    pub fn presentation() -> PartUri {
        PartUri::from_string_unchecked("/ppt/presentation.xml".into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uri(s: &str) -> PartUri {
        PartUri::new(s).unwrap()
    }

    #[test]
    fn test_normalization() {
        assert_eq!(uri("ppt/slides/slide1.xml").as_str(), "/ppt/slides/slide1.xml");
        assert_eq!(uri("/ppt/media/").as_str(), "/ppt/media");
        assert!(PartUri::new("").is_err());
        assert!(PartUri::new("/ppt//slide1.xml").is_err());
    }

    #[test]
    fn test_components() {
        let slide = uri("/ppt/slides/slide21.xml");
        assert_eq!(slide.file_name(), "slide21.xml");
        assert_eq!(slide.extension(), Some("xml"));
        assert_eq!(slide.base_uri(), "/ppt/slides");
        assert_eq!(slide.zip_name(), "ppt/slides/slide21.xml");
        assert_eq!(uri("/[Content_Types].xml").base_uri(), "/");
    }

    #[test]
    fn test_idx() {
        assert_eq!(uri("/ppt/slides/slide21.xml").idx(), Some(21));
        assert_eq!(uri("/ppt/embeddings/oleObject3.bin").idx(), Some(3));
        assert_eq!(uri("/ppt/presentation.xml").idx(), None);
        assert_eq!(uri("/ppt/media/42.png").idx(), None);
    }

    #[test]
    fn test_from_template() {
        let name = PartUri::from_template("/ppt/embeddings/oleObject%d.bin", 2).unwrap();
        assert_eq!(name.as_str(), "/ppt/embeddings/oleObject2.bin");
        assert!(PartUri::from_template("/ppt/embeddings/oleObject.bin", 2).is_err());
    }

    #[test]
    fn test_relationships_uri() {
        assert_eq!(
            uri("/ppt/presentation.xml").relationships_uri().as_str(),
            "/ppt/_rels/presentation.xml.rels"
        );
        assert_eq!(uri("/root.xml").relationships_uri().as_str(), "/_rels/root.xml.rels");
    }

    #[test]
    fn test_resolve() {
        let slide = uri("/ppt/slides/slide1.xml");
        assert_eq!(
            slide.resolve("../slideLayouts/slideLayout2.xml").unwrap().as_str(),
            "/ppt/slideLayouts/slideLayout2.xml"
        );
        assert_eq!(
            uri("/ppt/presentation.xml").resolve("slides/slide1.xml").unwrap().as_str(),
            "/ppt/slides/slide1.xml"
        );
        assert_eq!(uri("/_rels/.rels").resolve("/ppt/presentation.xml").unwrap(), uri("/ppt/presentation.xml"));
    }

    #[test]
    fn test_relative_ref() {
        let slide = uri("/ppt/slides/slide1.xml");
        let embedded = uri("/ppt/embeddings/Microsoft_Excel_Sheet1.xlsx");
        assert_eq!(slide.relative_ref(&embedded), "../embeddings/Microsoft_Excel_Sheet1.xlsx");
        assert_eq!(uri("/ppt/presentation.xml").relative_ref(&slide), "slides/slide1.xml");

        let package_root = uri("/[Content_Types].xml");
        assert_eq!(package_root.relative_ref(&uri("/ppt/presentation.xml")), "ppt/presentation.xml");
    }

    #[test]
    fn test_is_relationships() {
        assert!(uri("/ppt/slides/_rels/slide1.xml.rels").is_relationships());
        assert!(!uri("/ppt/slides/slide1.xml").is_relationships());
    }
}
