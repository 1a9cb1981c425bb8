//! # linch-pptx-rs
//!
//! A mutable text object model over PowerPoint (PPTX) slide markup.
//!
//! ## Features
//!
//! - Read and edit run, paragraph and text-frame properties in place
//! - Every edit keeps the markup schema-valid (element order, attribute
//!   defaults, namespace declarations)
//! - Views alias the same tree, so edits made through one are seen by all
//! - Open and save `.pptx` packages, embed Office documents and OLE objects
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use linch_pptx_rs::{Package, Tag, TextFrame, TriState};
//!
//! let mut pkg = Package::open("deck.pptx")?;
//! let slide = pkg.slide_parts()?[0].partname().clone();
//!
//! let root = pkg.part(&slide).unwrap().xml_root()?;
//! for tx_body in root.select(&[Tag::p("cSld"), Tag::p("spTree"), Tag::p("sp"), Tag::p("txBody")]) {
//!     let frame = TextFrame::new(tx_body);
//!     frame.set_word_wrap(TriState::On);
//!     for para in frame.paragraphs() {
//!         para.font().set_bold(true);
//!     }
//! }
//!
//! pkg.part_mut(&slide).unwrap().set_xml(&root)?;
//! pkg.save("deck-edited.pptx")?;
//! ```

pub mod enums;
pub mod error;
pub mod opc;
pub mod oxml;
pub mod parts;
pub mod text;
pub mod util;
pub mod xml;

pub use enums::{AutoSize, ParagraphAlignment, StandardMapping, VerticalAnchor, WireMapping};
pub use error::{Error, Result};
pub use opc::{Package, Part, PartUri};
pub use oxml::TriState;
pub use parts::{EmbeddedPackageKind, EmbeddedPackagePart, ProgId};
pub use text::{Font, Paragraph, Run, TextFrame};
pub use util::{Centipoints, Length, Pt};
pub use xml::{parse_xml, Element, Tag, XmlTree};
