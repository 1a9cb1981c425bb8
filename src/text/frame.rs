//! Text body of a shape (p:txBody)

use crate::enums::{AutoSize, StandardMapping, VerticalAnchor, WireMapping};
use crate::oxml::sequence::{ChildRule, ChoiceRule, A_NORM_AUTOFIT, A_NO_AUTOFIT, A_SP_AUTO_FIT};
use crate::oxml::{attr_or, set_attr_or_remove, set_tri_state_attr, tri_state_attr, TriState, TriStateCodec};
use crate::text::Paragraph;
use crate::util::Length;
use crate::xml::Element;

const DEFAULT_LEFT_INSET: Length = Length::emu(91_440);
const DEFAULT_TOP_INSET: Length = Length::emu(45_720);
const DEFAULT_RIGHT_INSET: Length = Length::emu(91_440);
const DEFAULT_BOTTOM_INSET: Length = Length::emu(45_720);

/// The text container of a shape: body properties plus paragraphs.
///
/// Body properties (`a:bodyPr`) are read without being created. Any setter
/// creates `a:bodyPr` as the first child of the text body if it is missing.
#[derive(Clone, Debug, PartialEq)]
pub struct TextFrame {
    tx_body: Element,
}

impl TextFrame {
    /// Wrap a `p:txBody` (or `a:txBody`) element
    pub fn new(tx_body: Element) -> Self {
        Self { tx_body }
    }

    /// The backing element
    pub fn element(&self) -> &Element {
        &self.tx_body
    }

    fn body_properties(&self) -> Option<Element> {
        ChildRule::BODY_PROPERTIES.find(&self.tx_body)
    }

    fn body_properties_or_create(&self) -> Element {
        ChildRule::BODY_PROPERTIES.get_or_add(&self.tx_body)
    }

    /// Paragraphs in document order
    pub fn paragraphs(&self) -> Vec<Paragraph> {
        ChildRule::PARAGRAPH
            .find_all(&self.tx_body)
            .into_iter()
            .map(Paragraph::new)
            .collect()
    }

    /// Append an empty paragraph
    pub fn add_paragraph(&self) -> Paragraph {
        Paragraph::new(ChildRule::PARAGRAPH.add(&self.tx_body))
    }

    /// Paragraph texts separated by `\n`
    pub fn text(&self) -> String {
        self.paragraphs()
            .iter()
            .map(Paragraph::text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Reduce the frame to a single paragraph holding `text`
    pub fn set_text(&self, text: &str) {
        self.clear().set_text(text);
    }

    /// Remove all text, leaving exactly one empty paragraph.
    ///
    /// The surviving paragraph is the first one, so its `a:pPr` is kept.
    pub fn clear(&self) -> Paragraph {
        let mut paragraphs = self.paragraphs().into_iter();
        let first = match paragraphs.next() {
            Some(first) => first,
            None => return self.add_paragraph(),
        };
        let mut removed = 0;
        for p in paragraphs {
            if self.tx_body.remove(p.element()) {
                removed += 1;
            }
        }
        log::trace!("cleared text frame, dropped {} paragraph(s)", removed);
        first.clear();
        first
    }

    /// Vertical anchor, `None` when inherited
    pub fn vertical_anchor(&self) -> Option<VerticalAnchor> {
        self.vertical_anchor_with(&StandardMapping)
    }

    /// Vertical anchor decoded through `mapping`
    pub fn vertical_anchor_with<M>(&self, mapping: &M) -> Option<VerticalAnchor>
    where
        M: WireMapping<VerticalAnchor> + ?Sized,
    {
        let anchor = self.body_properties()?.attribute("anchor")?;
        let value = mapping.from_wire(&anchor);
        if value.is_none() {
            log::warn!("unknown vertical anchor '{}'", anchor);
        }
        value
    }

    /// Set or clear (`None`) the vertical anchor
    pub fn set_vertical_anchor(&self, anchor: Option<VerticalAnchor>) {
        self.set_vertical_anchor_with(anchor, &StandardMapping);
    }

    /// Set or clear the vertical anchor, encoded through `mapping`
    pub fn set_vertical_anchor_with<M>(&self, anchor: Option<VerticalAnchor>, mapping: &M)
    where
        M: WireMapping<VerticalAnchor> + ?Sized,
    {
        let body_pr = self.body_properties_or_create();
        match anchor {
            Some(anchor) => body_pr.set_attribute("anchor", mapping.to_wire(anchor)),
            None => {
                body_pr.remove_attribute("anchor");
            }
        }
    }

    /// `On` wraps at the frame edge (`square`), `Off` never wraps (`none`)
    pub fn word_wrap(&self) -> TriState {
        tri_state_attr(self.body_properties().as_ref(), "wrap", &TriStateCodec::WRAP)
    }

    pub fn set_word_wrap(&self, value: impl Into<TriState>) {
        let body_pr = self.body_properties_or_create();
        set_tri_state_attr(&body_pr, "wrap", value.into(), &TriStateCodec::WRAP);
    }

    fn inset(&self, name: &str, default: Length) -> Length {
        attr_or(self.body_properties().as_ref(), name, default)
    }

    fn set_inset(&self, name: &str, value: Length, default: Length) {
        set_attr_or_remove(&self.body_properties_or_create(), name, value, default);
    }

    /// Left inset, 0.1" by default
    pub fn margin_left(&self) -> Length {
        self.inset("lIns", DEFAULT_LEFT_INSET)
    }

    pub fn set_margin_left(&self, value: Length) {
        self.set_inset("lIns", value, DEFAULT_LEFT_INSET);
    }

    /// Top inset, 0.05" by default
    pub fn margin_top(&self) -> Length {
        self.inset("tIns", DEFAULT_TOP_INSET)
    }

    pub fn set_margin_top(&self, value: Length) {
        self.set_inset("tIns", value, DEFAULT_TOP_INSET);
    }

    pub fn margin_right(&self) -> Length {
        self.inset("rIns", DEFAULT_RIGHT_INSET)
    }

    pub fn set_margin_right(&self, value: Length) {
        self.set_inset("rIns", value, DEFAULT_RIGHT_INSET);
    }

    pub fn margin_bottom(&self) -> Length {
        self.inset("bIns", DEFAULT_BOTTOM_INSET)
    }

    pub fn set_margin_bottom(&self, value: Length) {
        self.set_inset("bIns", value, DEFAULT_BOTTOM_INSET);
    }

    /// Auto-fit behaviour, `None` when no choice is present
    pub fn auto_size(&self) -> Option<AutoSize> {
        let choice = ChoiceRule::AUTOFIT.find(&self.body_properties()?)?;
        if choice.is(&A_NO_AUTOFIT) {
            Some(AutoSize::None)
        } else if choice.is(&A_SP_AUTO_FIT) {
            Some(AutoSize::ShapeToFitText)
        } else {
            Some(AutoSize::TextToFitShape)
        }
    }

    /// Replace the auto-fit choice; `None` removes it
    pub fn set_auto_size(&self, value: Option<AutoSize>) {
        let body_pr = self.body_properties_or_create();
        let tag = match value {
            Some(AutoSize::None) => A_NO_AUTOFIT,
            Some(AutoSize::ShapeToFitText) => A_SP_AUTO_FIT,
            Some(AutoSize::TextToFitShape) => A_NORM_AUTOFIT,
            None => {
                ChoiceRule::AUTOFIT.remove(&body_pr);
                return;
            }
        };
        ChoiceRule::AUTOFIT.replace(&body_pr, &tag);
    }
}
