//! Run element (a:r) - a span of text with uniform character formatting

use crate::oxml::sequence::ChildRule;
use crate::text::Font;
use crate::xml::Element;

/// View over an `a:r` element
#[derive(Clone, Debug, PartialEq)]
pub struct Run {
    r: Element,
}

impl Run {
    /// Wrap an existing `a:r` element
    pub fn new(r: Element) -> Self {
        Self { r }
    }

    /// The backing element
    pub fn element(&self) -> &Element {
        &self.r
    }

    /// Text of the run; empty when there is no `a:t` child
    pub fn text(&self) -> String {
        ChildRule::TEXT
            .find(&self.r)
            .map(|t| t.text())
            .unwrap_or_default()
    }

    /// Replace the text of the run, creating `a:t` if needed
    pub fn set_text(&self, text: &str) {
        ChildRule::TEXT.get_or_add(&self.r).set_text(text);
    }

    /// Character formatting of this run (`a:rPr`)
    pub fn font(&self) -> Font {
        Font::for_run(self.r.clone())
    }
}
