pub mod icons;
pub mod output;
pub mod table;
pub mod theme;

pub use icons::Icons;
pub use output::{banner, header, info, item_line, section, styled_item_line, success, summary_row, warn};
pub use table::{TableBuilder, items_table, stats_table};
pub use theme::{theme, Theme};
