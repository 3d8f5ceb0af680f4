pub mod icons;
pub mod output;
pub mod table;
pub mod theme;

pub use icons::Icons;
pub use output::{
    error, header, header_line, info, merge_line, merge_result, section, skipped, success,
    summary_row, warn,
};
pub use table::{PipelineRow, SyncRow, pipeline_table, sync_table};
pub use theme::{Role, Theme, theme};
