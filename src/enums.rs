//! Symbolic text settings and their wire encodings
//!
//! The wrappers never hard-code attribute strings for these values. They go
//! through a [`WireMapping`], by default [`StandardMapping`], so a caller or
//! a test can substitute its own table.

/// Horizontal paragraph alignment (`a:pPr/@algn`)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParagraphAlignment {
    Left,
    Center,
    Right,
    Justify,
    /// Justified, with the last line stretched as well
    Distributed,
    /// Kashida justification, low
    JustifyLow,
    ThaiDistributed,
}

impl ParagraphAlignment {
    /// `ST_TextAlignType` value
    pub fn as_str(&self) -> &'static str {
        match self {
            ParagraphAlignment::Left => "l",
            ParagraphAlignment::Center => "ctr",
            ParagraphAlignment::Right => "r",
            ParagraphAlignment::Justify => "just",
            ParagraphAlignment::Distributed => "dist",
            ParagraphAlignment::JustifyLow => "justLow",
            ParagraphAlignment::ThaiDistributed => "thaiDist",
        }
    }

    /// Parse an `ST_TextAlignType` value
    pub fn from_wire(s: &str) -> Option<Self> {
        Some(match s {
            "l" => ParagraphAlignment::Left,
            "ctr" => ParagraphAlignment::Center,
            "r" => ParagraphAlignment::Right,
            "just" => ParagraphAlignment::Justify,
            "dist" => ParagraphAlignment::Distributed,
            "justLow" => ParagraphAlignment::JustifyLow,
            "thaiDist" => ParagraphAlignment::ThaiDistributed,
            _ => return None,
        })
    }
}

/// Vertical placement of text in its frame (`a:bodyPr/@anchor`)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VerticalAnchor {
    Top,
    Middle,
    Bottom,
    Justified,
    Distributed,
}

impl VerticalAnchor {
    /// `ST_TextAnchoringType` value
    pub fn as_str(&self) -> &'static str {
        match self {
            VerticalAnchor::Top => "t",
            VerticalAnchor::Middle => "ctr",
            VerticalAnchor::Bottom => "b",
            VerticalAnchor::Justified => "just",
            VerticalAnchor::Distributed => "dist",
        }
    }

    /// Parse an `ST_TextAnchoringType` value
    pub fn from_wire(s: &str) -> Option<Self> {
        Some(match s {
            "t" => VerticalAnchor::Top,
            "ctr" => VerticalAnchor::Middle,
            "b" => VerticalAnchor::Bottom,
            "just" => VerticalAnchor::Justified,
            "dist" => VerticalAnchor::Distributed,
            _ => return None,
        })
    }
}

/// How a frame reconciles text and shape size (the `EG_TextAutofit` choice in `a:bodyPr`)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AutoSize {
    /// `a:noAutofit`: neither shape nor text is resized
    None,
    /// `a:spAutoFit`: the shape grows to fit its text
    ShapeToFitText,
    /// `a:normAutofit`: the text shrinks to fit the shape
    TextToFitShape,
}

/// Two-way mapping between a symbolic value and the attribute string that encodes it
pub trait WireMapping<T> {
    /// Attribute value written for `value`
    fn to_wire(&self, value: T) -> String;

    /// Symbolic value for an attribute string, `None` if unrecognized
    fn from_wire(&self, wire: &str) -> Option<T>;
}

/// The schema-defined encodings
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardMapping;

impl WireMapping<ParagraphAlignment> for StandardMapping {
    fn to_wire(&self, value: ParagraphAlignment) -> String {
        value.as_str().to_string()
    }

    fn from_wire(&self, wire: &str) -> Option<ParagraphAlignment> {
        ParagraphAlignment::from_wire(wire)
    }
}

impl WireMapping<VerticalAnchor> for StandardMapping {
    fn to_wire(&self, value: VerticalAnchor) -> String {
        value.as_str().to_string()
    }

    fn from_wire(&self, wire: &str) -> Option<VerticalAnchor> {
        VerticalAnchor::from_wire(wire)
    }
}
