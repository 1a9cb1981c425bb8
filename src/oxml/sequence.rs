//! Schema child ordering for elements created on demand

use crate::xml::{Element, Tag};

pub(crate) const A_BODY_PR: Tag = Tag::a("bodyPr");
pub(crate) const A_LST_STYLE: Tag = Tag::a("lstStyle");
pub(crate) const A_P: Tag = Tag::a("p");
pub(crate) const A_P_PR: Tag = Tag::a("pPr");
pub(crate) const A_R: Tag = Tag::a("r");
pub(crate) const A_BR: Tag = Tag::a("br");
pub(crate) const A_FLD: Tag = Tag::a("fld");
pub(crate) const A_END_PARA_RPR: Tag = Tag::a("endParaRPr");
pub(crate) const A_R_PR: Tag = Tag::a("rPr");
pub(crate) const A_DEF_RPR: Tag = Tag::a("defRPr");
pub(crate) const A_T: Tag = Tag::a("t");
pub(crate) const A_EXT_LST: Tag = Tag::a("extLst");
pub(crate) const A_NO_AUTOFIT: Tag = Tag::a("noAutofit");
pub(crate) const A_NORM_AUTOFIT: Tag = Tag::a("normAutofit");
pub(crate) const A_SP_AUTO_FIT: Tag = Tag::a("spAutoFit");
pub(crate) const A_SCENE_3D: Tag = Tag::a("scene3d");
pub(crate) const A_SP_3D: Tag = Tag::a("sp3d");
pub(crate) const A_FLAT_TX: Tag = Tag::a("flatTx");

/// Where an optional child goes among its siblings.
///
/// A new child is inserted before the first existing sibling whose tag is
/// listed in `successors`, or appended when there is none.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ChildRule {
    pub tag: Tag,
    pub successors: &'static [Tag],
}

impl ChildRule {
    /// `a:pPr` heads `a:p`
    pub const PARAGRAPH_PROPERTIES: ChildRule = ChildRule {
        tag: A_P_PR,
        successors: &[A_R, A_BR, A_FLD, A_END_PARA_RPR],
    };

    /// Runs sit between `a:pPr` and `a:endParaRPr`
    pub const RUN: ChildRule = ChildRule {
        tag: A_R,
        successors: &[A_END_PARA_RPR],
    };

    pub const DEFAULT_RUN_PROPERTIES: ChildRule = ChildRule {
        tag: A_DEF_RPR,
        successors: &[A_EXT_LST],
    };

    pub const RUN_PROPERTIES: ChildRule = ChildRule {
        tag: A_R_PR,
        successors: &[A_T],
    };

    pub const TEXT: ChildRule = ChildRule {
        tag: A_T,
        successors: &[],
    };

    /// `a:bodyPr` heads a text body
    pub const BODY_PROPERTIES: ChildRule = ChildRule {
        tag: A_BODY_PR,
        successors: &[A_LST_STYLE, A_P],
    };

    pub const PARAGRAPH: ChildRule = ChildRule {
        tag: A_P,
        successors: &[],
    };

    /// First matching child
    pub fn find(&self, parent: &Element) -> Option<Element> {
        parent.find_child(&self.tag)
    }

    /// Every matching child
    pub fn find_all(&self, parent: &Element) -> Vec<Element> {
        parent.find_children(&self.tag)
    }

    /// Existing child, or a new one inserted at its schema position
    pub fn get_or_add(&self, parent: &Element) -> Element {
        match self.find(parent) {
            Some(child) => child,
            None => self.add(parent),
        }
    }

    /// Always insert a new child at its schema position
    pub fn add(&self, parent: &Element) -> Element {
        log::trace!("creating <{}> in <{}>", self.tag, parent.name());
        let child = parent.new_child_element(&self.tag);
        insert_before_successors(parent, &child, self.successors)
    }

    /// Detach every matching child, returning how many were removed
    pub fn remove_all(&self, parent: &Element) -> usize {
        let children = self.find_all(parent);
        for child in &children {
            parent.remove(child);
        }
        children.len()
    }
}

/// One slot filled by at most one of several alternative elements
#[derive(Clone, Copy, Debug)]
pub(crate) struct ChoiceRule {
    pub choices: &'static [Tag],
    pub successors: &'static [Tag],
}

impl ChoiceRule {
    /// `EG_TextAutofit` in `a:bodyPr`
    pub const AUTOFIT: ChoiceRule = ChoiceRule {
        choices: &[A_NO_AUTOFIT, A_NORM_AUTOFIT, A_SP_AUTO_FIT],
        successors: &[A_SCENE_3D, A_SP_3D, A_FLAT_TX, A_EXT_LST],
    };

    /// The child currently filling the slot
    pub fn find(&self, parent: &Element) -> Option<Element> {
        parent
            .children()
            .into_iter()
            .find(|child| self.choices.iter().any(|tag| child.is(tag)))
    }

    /// Clear the slot
    pub fn remove(&self, parent: &Element) {
        for tag in self.choices {
            parent
                .find_children(tag)
                .iter()
                .for_each(|child| {
                    parent.remove(child);
                });
        }
    }

    /// Replace whatever fills the slot with a new `tag` element
    pub fn replace(&self, parent: &Element, tag: &Tag) -> Element {
        self.remove(parent);
        log::trace!("creating <{}> in <{}>", tag, parent.name());
        let child = parent.new_child_element(tag);
        insert_before_successors(parent, &child, self.successors)
    }
}

fn insert_before_successors(parent: &Element, child: &Element, successors: &[Tag]) -> Element {
    let next = parent
        .children()
        .into_iter()
        .find(|sibling| successors.iter().any(|tag| sibling.is(tag)));
    match next {
        Some(next) => parent.insert_before(child, &next),
        None => parent.append(child),
    }
}
