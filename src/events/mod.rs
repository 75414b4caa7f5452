pub mod document;
pub mod pointer;

pub use document::wire_default_guards;
pub use pointer::wire_card_tilt;
