//! Property accessors shared by the text wrappers
//!
//! Each helper encodes one markup convention: an attribute with a default
//! that disappears when set back to it, an optional attribute, a tri-state
//! boolean written as attribute presence, or a child element created on
//! demand at its schema position (see [`sequence`]).

pub(crate) mod sequence;
pub(crate) mod simpletypes;

use std::fmt::Display;
use std::str::FromStr;

use crate::xml::Element;

/// A boolean property that may also be left unset so the value is
/// inherited from an enclosing scope (style, master, theme).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TriState {
    /// Explicitly on
    On,
    /// Explicitly off
    Off,
    /// Not specified at this level
    #[default]
    Inherit,
}

impl TriState {
    /// `Some(true)`, `Some(false)` or `None` for inherit
    pub fn to_option(self) -> Option<bool> {
        match self {
            TriState::On => Some(true),
            TriState::Off => Some(false),
            TriState::Inherit => None,
        }
    }

    pub fn is_inherit(self) -> bool {
        self == TriState::Inherit
    }
}

impl From<bool> for TriState {
    fn from(value: bool) -> Self {
        if value {
            TriState::On
        } else {
            TriState::Off
        }
    }
}

impl From<Option<bool>> for TriState {
    fn from(value: Option<bool>) -> Self {
        value.map_or(TriState::Inherit, TriState::from)
    }
}

/// Wire strings of a tri-state attribute
#[derive(Clone, Copy, Debug)]
pub(crate) struct TriStateCodec {
    pub on: &'static str,
    pub off: &'static str,
    /// Extra spellings accepted when reading
    pub on_aliases: &'static [&'static str],
    pub off_aliases: &'static [&'static str],
}

impl TriStateCodec {
    /// xsd:boolean, written as `1`/`0`
    pub const BOOLEAN: TriStateCodec = TriStateCodec {
        on: "1",
        off: "0",
        on_aliases: &["true"],
        off_aliases: &["false"],
    };

    /// `a:bodyPr/@wrap`
    pub const WRAP: TriStateCodec = TriStateCodec {
        on: "square",
        off: "none",
        on_aliases: &[],
        off_aliases: &[],
    };

    fn decode(&self, value: &str) -> TriState {
        if value == self.on || self.on_aliases.contains(&value) {
            TriState::On
        } else if value == self.off || self.off_aliases.contains(&value) {
            TriState::Off
        } else {
            log::warn!("unrecognized tri-state value '{}', treating as unset", value);
            TriState::Inherit
        }
    }
}

/// Typed attribute value, or `default` when the element or attribute is absent
pub(crate) fn attr_or<T: FromStr>(elem: Option<&Element>, name: &str, default: T) -> T {
    optional_attr(elem, name).unwrap_or(default)
}

/// Typed attribute value, `None` when absent or unparseable
pub(crate) fn optional_attr<T: FromStr>(elem: Option<&Element>, name: &str) -> Option<T> {
    let raw = elem?.attribute(name)?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            log::warn!("ignoring unparseable {}=\"{}\"", name, raw);
            None
        }
    }
}

/// Write the attribute, or remove it when `value` equals the schema default
pub(crate) fn set_attr_or_remove<T>(elem: &Element, name: &str, value: T, default: T)
where
    T: PartialEq + Display,
{
    if value == default {
        elem.remove_attribute(name);
    } else {
        elem.set_attribute(name, value.to_string());
    }
}

/// Read a tri-state attribute; absence of the element or attribute is `Inherit`
pub(crate) fn tri_state_attr(elem: Option<&Element>, name: &str, codec: &TriStateCodec) -> TriState {
    elem.and_then(|e| e.attribute(name))
        .map_or(TriState::Inherit, |value| codec.decode(&value))
}

/// Write a tri-state attribute; `Inherit` removes it
pub(crate) fn set_tri_state_attr(elem: &Element, name: &str, value: TriState, codec: &TriStateCodec) {
    match value {
        TriState::On => elem.set_attribute(name, codec.on),
        TriState::Off => elem.set_attribute(name, codec.off),
        TriState::Inherit => {
            elem.remove_attribute(name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::{Tag, XmlTree};

    fn elem() -> Element {
        XmlTree::new().create_root(&Tag::a("bodyPr"))
    }

    #[test]
    fn test_tri_state_conversions() {
        assert_eq!(TriState::from(true), TriState::On);
        assert_eq!(TriState::from(Some(false)), TriState::Off);
        assert_eq!(TriState::from(None), TriState::Inherit);
        assert_eq!(TriState::Off.to_option(), Some(false));
        assert!(TriState::default().is_inherit());
    }

    #[test]
    fn test_attr_or_default() {
        let e = elem();
        assert_eq!(attr_or(Some(&e), "lIns", 91440i64), 91440);
        assert_eq!(attr_or(None, "lIns", 91440i64), 91440);
        e.set_attribute("lIns", "0");
        assert_eq!(attr_or(Some(&e), "lIns", 91440i64), 0);
        e.set_attribute("lIns", "wide");
        assert_eq!(attr_or(Some(&e), "lIns", 91440i64), 91440);
    }

    #[test]
    fn test_set_attr_or_remove() {
        let e = elem();
        set_attr_or_remove(&e, "tIns", 10i64, 45720);
        assert_eq!(e.attribute("tIns").as_deref(), Some("10"));
        set_attr_or_remove(&e, "tIns", 45720i64, 45720);
        assert!(!e.has_attribute("tIns"));
    }

    #[test]
    fn test_optional_attr() {
        let e = elem();
        e.set_attribute("rot", "5400000");
        assert_eq!(optional_attr::<i64>(Some(&e), "rot"), Some(5400000));
        e.set_attribute("rot", "quarter");
        assert_eq!(optional_attr::<i64>(Some(&e), "rot"), None);
    }

    #[test]
    fn test_tri_state_attr_roundtrip() {
        let e = elem();
        let codec = TriStateCodec::BOOLEAN;
        for value in [TriState::On, TriState::Off, TriState::Inherit] {
            set_tri_state_attr(&e, "b", value, &codec);
            assert_eq!(tri_state_attr(Some(&e), "b", &codec), value);
        }
        assert!(!e.has_attribute("b"));
    }

    #[test]
    fn test_tri_state_aliases_and_garbage() {
        let e = elem();
        e.set_attribute("b", "true");
        assert_eq!(tri_state_attr(Some(&e), "b", &TriStateCodec::BOOLEAN), TriState::On);
        e.set_attribute("b", "maybe");
        assert_eq!(tri_state_attr(Some(&e), "b", &TriStateCodec::BOOLEAN), TriState::Inherit);
        assert_eq!(tri_state_attr(None, "b", &TriStateCodec::BOOLEAN), TriState::Inherit);
    }
}
