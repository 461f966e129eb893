//! Output renderers consuming the assembled report structure

pub mod html;
pub mod snow;
pub mod text;
