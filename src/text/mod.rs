//! Text object model: frames, paragraphs, runs and fonts
//!
//! Every type here is a view over a node of a shared [`crate::xml::Element`]
//! tree. Cloning a view, or wrapping the same node twice, yields another
//! handle to the same markup, so a change made through one is seen by all.

mod font;
mod frame;
mod paragraph;
mod run;

pub use font::Font;
pub use frame::TextFrame;
pub use paragraph::Paragraph;
pub use run::Run;
