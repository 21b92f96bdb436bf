// Records module - Renewal record discovery and parsing

pub mod parser;
pub mod scan;

pub use parser::{RecordParser, SyntaxError, normalize_brackets};
pub use scan::list_matching;
