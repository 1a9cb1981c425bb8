//! Embedded objects stored as parts under `/ppt/embeddings/`

use std::fmt;

use crate::error::Result;
use crate::opc::{rel_types, Package, Part, PartUri, DOCX, OLE_OBJECT, PPTX, XLSX};

/// OLE programmatic identifier of an embedded object
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ProgId {
    /// `Word.Document.12`
    Docx,
    /// `PowerPoint.Show.12`
    Pptx,
    /// `Excel.Sheet.12`
    Xlsx,
    /// Anything else, e.g. `Package` or `Acrobat.Document.DC`
    Other(String),
}

impl ProgId {
    pub fn as_str(&self) -> &str {
        match self {
            ProgId::Docx => "Word.Document.12",
            ProgId::Pptx => "PowerPoint.Show.12",
            ProgId::Xlsx => "Excel.Sheet.12",
            ProgId::Other(s) => s,
        }
    }
}

impl From<&str> for ProgId {
    fn from(s: &str) -> Self {
        match s {
            "Word.Document.12" => ProgId::Docx,
            "PowerPoint.Show.12" => ProgId::Pptx,
            "Excel.Sheet.12" => ProgId::Xlsx,
            other => ProgId::Other(other.to_string()),
        }
    }
}

impl fmt::Display for ProgId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What an embedded part holds, which fixes its partname and content type
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EmbeddedPackageKind {
    Docx,
    Pptx,
    Xlsx,
    /// Opaque OLE object (`oleObjectN.bin`)
    OleObject,
}

impl EmbeddedPackageKind {
    pub fn partname_template(self) -> &'static str {
        match self {
            EmbeddedPackageKind::Docx => "/ppt/embeddings/Microsoft_Word_Document%d.docx",
            EmbeddedPackageKind::Pptx => "/ppt/embeddings/Microsoft_PowerPoint_Presentation%d.pptx",
            EmbeddedPackageKind::Xlsx => "/ppt/embeddings/Microsoft_Excel_Sheet%d.xlsx",
            EmbeddedPackageKind::OleObject => "/ppt/embeddings/oleObject%d.bin",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            EmbeddedPackageKind::Docx => DOCX,
            EmbeddedPackageKind::Pptx => PPTX,
            EmbeddedPackageKind::Xlsx => XLSX,
            EmbeddedPackageKind::OleObject => OLE_OBJECT,
        }
    }

    /// Relationship type a slide uses to point at a part of this kind
    pub fn rel_type(self) -> &'static str {
        match self {
            EmbeddedPackageKind::OleObject => rel_types::OLE_OBJECT,
            _ => rel_types::PACKAGE,
        }
    }
}

impl From<&ProgId> for EmbeddedPackageKind {
    fn from(prog_id: &ProgId) -> Self {
        match prog_id {
            ProgId::Docx => EmbeddedPackageKind::Docx,
            ProgId::Pptx => EmbeddedPackageKind::Pptx,
            ProgId::Xlsx => EmbeddedPackageKind::Xlsx,
            ProgId::Other(_) => EmbeddedPackageKind::OleObject,
        }
    }
}

/// Handle to an embedded object part that has been added to a package
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmbeddedPackagePart {
    kind: EmbeddedPackageKind,
    partname: PartUri,
}

impl EmbeddedPackagePart {
    /// Store `blob` as a new embedded part suited to `prog_id`.
    ///
    /// Office ProgIDs get a `.docx`, `.pptx` or `.xlsx` part; any other
    /// ProgID gets a generic OLE object part.
    pub fn factory(
        prog_id: impl Into<ProgId>,
        blob: impl Into<Vec<u8>>,
        package: &mut Package,
    ) -> Result<Self> {
        let prog_id = prog_id.into();
        let kind = EmbeddedPackageKind::from(&prog_id);
        log::debug!("embedding {} object as {:?}", prog_id, kind);
        Self::new(kind, blob, package)
    }

    /// Store `blob` under the next free partname for `kind`
    pub fn new(kind: EmbeddedPackageKind, blob: impl Into<Vec<u8>>, package: &mut Package) -> Result<Self> {
        let partname = package.next_partname(kind.partname_template())?;
        package.add_part(Part::new(partname.clone(), kind.content_type(), blob.into()));
        Ok(Self { kind, partname })
    }

    pub fn kind(&self) -> EmbeddedPackageKind {
        self.kind
    }

    pub fn partname(&self) -> &PartUri {
        &self.partname
    }

    pub fn content_type(&self) -> &'static str {
        self.kind.content_type()
    }

    /// Relate `source` (usually a slide) to this part, returning the `r:id`
    pub fn relate_from(&self, package: &mut Package, source: &PartUri) -> Result<String> {
        package.relate_to(source, &self.partname, self.kind.rel_type())
    }
}
