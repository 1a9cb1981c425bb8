//! Character formatting over `a:rPr` / `a:defRPr`

use crate::error::{Error, Result};
use crate::oxml::sequence::ChildRule;
use crate::oxml::simpletypes::text_font_size;
use crate::oxml::{optional_attr, set_tri_state_attr, tri_state_attr, TriState, TriStateCodec};
use crate::util::Centipoints;
use crate::xml::Element;

/// Where the properties element lives, so it can be created on first write
#[derive(Clone, Debug, PartialEq)]
enum Host {
    /// An existing `a:rPr` or `a:defRPr`
    Properties(Element),
    /// `a:r/a:rPr`
    Run(Element),
    /// `a:p/a:pPr/a:defRPr`
    Paragraph(Element),
}

/// Character properties: bold, italic and size.
///
/// Reading never changes the tree. The first write that needs the
/// properties element creates it (and `a:pPr` for a paragraph font).
#[derive(Clone, Debug, PartialEq)]
pub struct Font {
    host: Host,
}

impl Font {
    /// Wrap an existing run-properties element
    pub fn new(properties: Element) -> Self {
        Self {
            host: Host::Properties(properties),
        }
    }

    pub(crate) fn for_run(r: Element) -> Self {
        Self { host: Host::Run(r) }
    }

    pub(crate) fn for_paragraph(p: Element) -> Self {
        Self {
            host: Host::Paragraph(p),
        }
    }

    /// The backing properties element, if it exists yet
    pub fn properties(&self) -> Option<Element> {
        match &self.host {
            Host::Properties(elem) => Some(elem.clone()),
            Host::Run(r) => ChildRule::RUN_PROPERTIES.find(r),
            Host::Paragraph(p) => ChildRule::PARAGRAPH_PROPERTIES
                .find(p)
                .and_then(|p_pr| ChildRule::DEFAULT_RUN_PROPERTIES.find(&p_pr)),
        }
    }

    fn properties_or_create(&self) -> Element {
        match &self.host {
            Host::Properties(elem) => elem.clone(),
            Host::Run(r) => ChildRule::RUN_PROPERTIES.get_or_add(r),
            Host::Paragraph(p) => {
                let p_pr = ChildRule::PARAGRAPH_PROPERTIES.get_or_add(p);
                ChildRule::DEFAULT_RUN_PROPERTIES.get_or_add(&p_pr)
            }
        }
    }

    /// Write a tri-state attribute; `Inherit` never creates the element
    fn set_tri_state(&self, name: &str, value: TriState) {
        let elem = match value {
            TriState::Inherit => self.properties(),
            _ => Some(self.properties_or_create()),
        };
        if let Some(elem) = elem {
            set_tri_state_attr(&elem, name, value, &TriStateCodec::BOOLEAN);
        }
    }

    pub fn bold(&self) -> TriState {
        tri_state_attr(self.properties().as_ref(), "b", &TriStateCodec::BOOLEAN)
    }

    /// Set bold; `TriState::Inherit` (or an `Option<bool>` of `None`) removes the `b` attribute
    pub fn set_bold(&self, value: impl Into<TriState>) {
        self.set_tri_state("b", value.into());
    }

    pub fn italic(&self) -> TriState {
        tri_state_attr(self.properties().as_ref(), "i", &TriStateCodec::BOOLEAN)
    }

    pub fn set_italic(&self, value: impl Into<TriState>) {
        self.set_tri_state("i", value.into());
    }

    /// Font size, `None` when inherited
    pub fn size(&self) -> Option<Centipoints> {
        optional_attr(self.properties().as_ref(), "sz")
    }

    /// Set the font size, e.g. `font.set_size(Pt(24.0))` or `font.set_size(2400u32)`.
    ///
    /// Sizes outside 1..=4000 pt return [`Error::InvalidValue`] and leave the tree as it was.
    pub fn set_size<S>(&self, size: S) -> Result<()>
    where
        S: TryInto<Centipoints>,
        Error: From<S::Error>,
    {
        let size = text_font_size(size.try_into()?)?;
        self.properties_or_create().set_attribute("sz", size.to_string());
        Ok(())
    }

    /// Remove an explicit size so it is inherited again
    pub fn clear_size(&self) {
        if let Some(elem) = self.properties() {
            elem.remove_attribute("sz");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::Pt;
    use crate::xml::{nsdecls, parse_xml};
    use pretty_assertions::assert_eq;

    fn r_pr(attrs: &str) -> Element {
        parse_xml(&format!("<a:rPr {}{}/>", nsdecls(&["a"]), attrs)).unwrap()
    }

    #[test]
    fn test_bold_reading() {
        assert_eq!(Font::new(r_pr("")).bold(), TriState::Inherit);
        assert_eq!(Font::new(r_pr(" b=\"1\"")).bold(), TriState::On);
        assert_eq!(Font::new(r_pr(" b=\"0\"")).bold(), TriState::Off);
    }

    #[test]
    fn test_bold_writing() {
        let plain = format!("<a:rPr {}/>", nsdecls(&["a"]));
        let font = Font::new(r_pr(""));
        let elem = font.properties().unwrap();

        font.set_bold(true);
        assert_eq!(elem.to_xml().unwrap(), format!("<a:rPr {} b=\"1\"/>", nsdecls(&["a"])));
        font.set_bold(false);
        assert_eq!(elem.to_xml().unwrap(), format!("<a:rPr {} b=\"0\"/>", nsdecls(&["a"])));
        font.set_bold(TriState::Inherit);
        assert_eq!(elem.to_xml().unwrap(), plain);
    }

    #[test]
    fn test_set_size() {
        let font = Font::new(r_pr(""));
        font.set_size(Centipoints(2400)).unwrap();
        assert_eq!(
            font.properties().unwrap().to_xml().unwrap(),
            format!("<a:rPr {} sz=\"2400\"/>", nsdecls(&["a"]))
        );
        assert_eq!(font.size(), Some(Centipoints(2400)));

        font.set_size(Pt(18.5)).unwrap();
        assert_eq!(font.size(), Some(Centipoints(1850)));

        font.clear_size();
        assert_eq!(font.size(), None);
    }

    #[test]
    fn test_set_size_rejects_out_of_range() {
        let r = parse_xml(&format!("<a:r {}><a:t>x</a:t></a:r>", nsdecls(&["a"]))).unwrap();
        let font = Font::for_run(r.clone());

        for bad in [Pt(-12.0), Pt(f64::NAN), Pt(0.5), Pt(4000.5)] {
            assert!(matches!(font.set_size(bad), Err(Error::InvalidValue(_))));
        }
        assert!(matches!(font.set_size(0u32), Err(Error::InvalidValue(_))));
        assert!(font.properties().is_none(), "rejected size must not create rPr");
        assert_eq!(r.children().len(), 1);
    }

    #[test]
    fn test_run_font_creates_rpr_before_text() {
        let r = parse_xml(&format!("<a:r {}><a:t>x</a:t></a:r>", nsdecls(&["a"]))).unwrap();
        let font = Font::for_run(r.clone());

        assert_eq!(font.bold(), TriState::Inherit);
        font.set_bold(TriState::Inherit);
        assert!(font.properties().is_none(), "unset must not create rPr");

        font.set_italic(true);
        assert_eq!(
            r.to_xml().unwrap(),
            format!("<a:r {}><a:rPr i=\"1\"/><a:t>x</a:t></a:r>", nsdecls(&["a"]))
        );
        assert_eq!(font.italic(), TriState::On);
    }

    #[test]
    fn test_paragraph_font_is_lazy() {
        let p = parse_xml(&format!("<a:p {}><a:r><a:t>x</a:t></a:r></a:p>", nsdecls(&["a"]))).unwrap();
        let font = Font::for_paragraph(p.clone());

        assert_eq!(font.size(), None);
        font.clear_size();
        assert_eq!(p.children().len(), 1);

        font.set_size(Pt(54.3)).unwrap();
        assert_eq!(
            p.to_xml().unwrap(),
            format!(
                "<a:p {}><a:pPr><a:defRPr sz=\"5430\"/></a:pPr><a:r><a:t>x</a:t></a:r></a:p>",
                nsdecls(&["a"])
            )
        );
    }
}
