pub mod parser;
pub mod path_segment;
pub mod query_pairs;

pub use parser::*;
pub use path_segment::*;
pub use query_pairs::*;
