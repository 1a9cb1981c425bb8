//! Open Packaging Conventions: the ZIP container around presentation markup
//!
//! A [`Package`] holds [`Part`]s by partname, the `[Content_Types].xml`
//! table and the package-level relationships. Parts are plain bytes; XML
//! parts are turned into a markup tree with [`Part::xml_root`] and stored
//! back with [`Part::set_xml`].

mod content_types;
mod package;
mod part;
mod part_uri;
mod relationships;

pub use content_types::{
    ContentTypes, DOCX, OLE_OBJECT, PML_PRESENTATION_MAIN, PML_SLIDE, PML_SLIDE_LAYOUT,
    PML_SLIDE_MASTER, PPTX, RELATIONSHIPS, XLSX, XML,
};
pub use package::Package;
pub use part::Part;
pub use part_uri::{well_known, PartUri};
pub use relationships::{rel_types, Relationship, Relationships, TargetMode};
