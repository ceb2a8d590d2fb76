pub mod markdown;
pub mod season;

pub use markdown::{MarkdownTable, parse_markdown_table};
pub use season::Season;
