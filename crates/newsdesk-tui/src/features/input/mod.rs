//! Text input shared by the search box and the modal forms.

mod line;

pub use line::LineInput;
