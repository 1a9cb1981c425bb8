//! Paragraph element (a:p)

use crate::enums::{ParagraphAlignment, StandardMapping, WireMapping};
use crate::error::Result;
use crate::oxml::sequence::ChildRule;
use crate::oxml::simpletypes::text_indent_level;
use crate::oxml::{attr_or, set_attr_or_remove};
use crate::text::{Font, Run};
use crate::xml::Element;

/// View over an `a:p` element
#[derive(Clone, Debug, PartialEq)]
pub struct Paragraph {
    p: Element,
}

impl Paragraph {
    /// Wrap an existing `a:p` element
    pub fn new(p: Element) -> Self {
        Self { p }
    }

    /// The backing element
    pub fn element(&self) -> &Element {
        &self.p
    }

    fn properties(&self) -> Option<Element> {
        ChildRule::PARAGRAPH_PROPERTIES.find(&self.p)
    }

    fn properties_or_create(&self) -> Element {
        ChildRule::PARAGRAPH_PROPERTIES.get_or_add(&self.p)
    }

    /// Runs in document order
    pub fn runs(&self) -> Vec<Run> {
        ChildRule::RUN
            .find_all(&self.p)
            .into_iter()
            .map(Run::new)
            .collect()
    }

    /// Append an empty run after the last one
    pub fn add_run(&self) -> Run {
        Run::new(ChildRule::RUN.add(&self.p))
    }

    /// Text of all runs, concatenated
    pub fn text(&self) -> String {
        self.runs().iter().map(Run::text).collect()
    }

    /// Replace every run with a single run holding `text`
    pub fn set_text(&self, text: &str) {
        self.clear();
        self.add_run().set_text(text);
    }

    /// Remove all runs. Paragraph properties are left exactly as they were.
    pub fn clear(&self) {
        let removed = ChildRule::RUN.remove_all(&self.p);
        log::trace!("cleared {} run(s) from paragraph", removed);
    }

    /// Indentation level, 0 when unset
    pub fn level(&self) -> u8 {
        attr_or(self.properties().as_ref(), "lvl", 0)
    }

    /// Set the indentation level (0 to 8).
    ///
    /// Out-of-range values fail with `Error::InvalidValue` and leave the
    /// paragraph untouched.
    pub fn set_level(&self, level: i32) -> Result<()> {
        let level = text_indent_level(level)?;
        set_attr_or_remove(&self.properties_or_create(), "lvl", level, 0);
        Ok(())
    }

    /// Horizontal alignment, `None` when inherited
    pub fn alignment(&self) -> Option<ParagraphAlignment> {
        self.alignment_with(&StandardMapping)
    }

    /// Horizontal alignment decoded through `mapping`
    pub fn alignment_with<M>(&self, mapping: &M) -> Option<ParagraphAlignment>
    where
        M: WireMapping<ParagraphAlignment> + ?Sized,
    {
        let algn = self.properties()?.attribute("algn")?;
        let alignment = mapping.from_wire(&algn);
        if alignment.is_none() {
            log::warn!("unknown paragraph alignment '{}'", algn);
        }
        alignment
    }

    /// Set or clear (`None`) the horizontal alignment
    pub fn set_alignment(&self, alignment: Option<ParagraphAlignment>) {
        self.set_alignment_with(alignment, &StandardMapping);
    }

    /// Set or clear the horizontal alignment, encoded through `mapping`
    pub fn set_alignment_with<M>(&self, alignment: Option<ParagraphAlignment>, mapping: &M)
    where
        M: WireMapping<ParagraphAlignment> + ?Sized,
    {
        match alignment {
            Some(alignment) => {
                let algn = mapping.to_wire(alignment);
                self.properties_or_create().set_attribute("algn", algn);
            }
            None => {
                if let Some(p_pr) = self.properties() {
                    p_pr.remove_attribute("algn");
                }
            }
        }
    }

    /// Default character formatting for the paragraph (`a:pPr/a:defRPr`)
    pub fn font(&self) -> Font {
        Font::for_paragraph(self.p.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::xml::{nsdecls, parse_xml};
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;

    const TEST_TEXT: &str = "test text";

    fn paragraph(inner: &str) -> Paragraph {
        Paragraph::new(parse_xml(&format!("<a:p {}>{}</a:p>", nsdecls(&["a"]), inner)).unwrap())
    }

    fn single_run() -> Paragraph {
        paragraph(&format!("<a:r><a:t>{}</a:t></a:r>", TEST_TEXT))
    }

    fn xml(p: &Paragraph) -> String {
        p.element().to_xml().unwrap()
    }

    /// Records every lookup it serves
    #[derive(Default)]
    struct RecordingMapping {
        calls: RefCell<Vec<String>>,
    }

    impl WireMapping<ParagraphAlignment> for RecordingMapping {
        fn to_wire(&self, value: ParagraphAlignment) -> String {
            self.calls.borrow_mut().push(format!("to_wire({:?})", value));
            "custom".to_string()
        }

        fn from_wire(&self, wire: &str) -> Option<ParagraphAlignment> {
            self.calls.borrow_mut().push(format!("from_wire({})", wire));
            Some(ParagraphAlignment::Right)
        }
    }

    #[test]
    fn test_add_run_appends() {
        let p = paragraph("<a:r><a:t>a</a:t></a:r><a:r><a:t>b</a:t></a:r><a:endParaRPr/>");
        let run = p.add_run();
        run.set_text("c");

        let runs = p.runs();
        assert_eq!(runs.len(), 3);
        assert_eq!(runs.last(), Some(&run));
        assert_eq!(p.text(), "abc");
        assert_eq!(p.element().children().last().unwrap().local_name(), "endParaRPr");
    }

    #[test]
    fn test_clear_preserves_properties() {
        let p = paragraph(&format!("<a:pPr lvl=\"1\"/><a:r><a:t>{}</a:t></a:r>", TEST_TEXT));
        let p_pr_before = p.properties().unwrap().to_xml().unwrap();

        p.clear();

        assert_eq!(p.runs().len(), 0);
        assert_eq!(xml(&p), format!("<a:p {}><a:pPr lvl=\"1\"/></a:p>", nsdecls(&["a"])));
        assert_eq!(p.properties().unwrap().to_xml().unwrap(), p_pr_before);
    }

    #[test]
    fn test_set_text_collapses_runs() {
        let p = paragraph("<a:pPr algn=\"r\"/><a:r><a:t>one</a:t></a:r><a:r><a:t>two</a:t></a:r>");
        p.set_text("python-pptx was here!!");

        let runs = p.runs();
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].text(), "python-pptx was here!!");
        assert_eq!(p.alignment(), Some(ParagraphAlignment::Right));
    }

    #[test]
    fn test_set_text_accepts_non_ascii() {
        let p = single_run();
        for text in [
            "String containing only 7-bit (ASCII) characters",
            "unicode literal: Hér er texti með íslenskum stöfum.",
        ] {
            p.set_text(text);
            assert_eq!(p.text(), text);
        }
    }

    #[test]
    fn test_level_default_is_zero() {
        assert_eq!(single_run().level(), 0);
        assert_eq!(paragraph("<a:pPr/>").level(), 0);
    }

    #[test]
    fn test_level_setter_generates_correct_xml() {
        let p = single_run();
        p.set_level(2).unwrap();
        assert_eq!(
            xml(&p),
            format!(
                "<a:p {}><a:pPr lvl=\"2\"/><a:r><a:t>test text</a:t></a:r></a:p>",
                nsdecls(&["a"])
            )
        );
    }

    #[test]
    fn test_level_roundtrips() {
        let p = single_run();
        for level in 0..=8 {
            p.set_level(level).unwrap();
            assert_eq!(i32::from(p.level()), level);
        }
    }

    #[test]
    fn test_level_zero_removes_attribute() {
        let p = paragraph("<a:pPr lvl=\"4\"/>");
        p.set_level(0).unwrap();
        assert!(!p.properties().unwrap().has_attribute("lvl"));
    }

    #[test]
    fn test_level_rejects_out_of_range() {
        let p = single_run();
        p.set_level(5).unwrap();
        let before = xml(&p);

        for bad in [-1, 9] {
            assert!(matches!(p.set_level(bad), Err(Error::InvalidValue(_))));
            assert_eq!(p.level(), 5);
        }
        assert_eq!(xml(&p), before);
    }

    #[test]
    fn test_level_rejection_creates_nothing() {
        let p = single_run();
        assert!(p.set_level(42).is_err());
        assert!(p.properties().is_none());
    }

    #[test]
    fn test_alignment_integrates_with_markup() {
        let p = single_run();
        assert_eq!(p.alignment(), None);

        p.set_alignment(Some(ParagraphAlignment::Center));
        assert_eq!(
            xml(&p),
            format!(
                "<a:p {}><a:pPr algn=\"ctr\"/><a:r><a:t>test text</a:t></a:r></a:p>",
                nsdecls(&["a"])
            )
        );
        assert_eq!(p.alignment(), Some(ParagraphAlignment::Center));

        p.set_alignment(None);
        assert_eq!(p.alignment(), None);
        assert!(!p.properties().unwrap().has_attribute("algn"));
    }

    #[test]
    fn test_alignment_value_comes_from_mapping() {
        let p = paragraph("<a:pPr algn=\"xyz\"/>");
        let mapping = RecordingMapping::default();

        assert_eq!(p.alignment_with(&mapping), Some(ParagraphAlignment::Right));
        assert_eq!(*mapping.calls.borrow(), vec!["from_wire(xyz)".to_string()]);
    }

    #[test]
    fn test_alignment_assignment_goes_through_mapping() {
        let p = single_run();
        let mapping = RecordingMapping::default();

        p.set_alignment_with(Some(ParagraphAlignment::Center), &mapping);

        assert_eq!(*mapping.calls.borrow(), vec!["to_wire(Center)".to_string()]);
        assert_eq!(p.properties().unwrap().attribute("algn").as_deref(), Some("custom"));
    }

    #[test]
    fn test_unknown_alignment_reads_as_none() {
        assert_eq!(paragraph("<a:pPr algn=\"sideways\"/>").alignment(), None);
    }

    #[test]
    fn test_set_font_size() {
        let p = single_run();
        p.font().set_size(crate::util::Pt(54.3)).unwrap();
        assert_eq!(
            xml(&p),
            format!(
                "<a:p {}><a:pPr><a:defRPr sz=\"5430\"/></a:pPr><a:r><a:t>test text</a:t></a:r></a:p>",
                nsdecls(&["a"])
            )
        );
    }

    #[test]
    fn test_reading_font_creates_nothing() {
        let p = single_run();
        let font = p.font();
        assert_eq!(font.size(), None);
        assert!(font.bold().is_inherit());
        assert!(p.properties().is_none());
    }

    #[test]
    fn test_properties_created_once_and_first() {
        let p = single_run();
        p.set_level(3).unwrap();
        p.set_alignment(Some(ParagraphAlignment::Justify));
        p.font().set_bold(true);

        let children = p.element().children();
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].local_name(), "pPr");
        assert_eq!(
            children[0].to_xml().unwrap(),
            format!(
                "<a:pPr {} lvl=\"3\" algn=\"just\"><a:defRPr b=\"1\"/></a:pPr>",
                nsdecls(&["a"])
            )
        );
    }
}
