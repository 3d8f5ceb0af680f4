use tabled::{Table, Tabled, settings::Style};

#[derive(Tabled)]
pub struct PipelineRow {
    #[tabled(rename = "Pipeline")]
    pub name: String,
    #[tabled(rename = "Parser")]
    pub parser: String,
    #[tabled(rename = "Generator")]
    pub generator: String,
    #[tabled(rename = "Sources")]
    pub sources: String,
    #[tabled(rename = "Targets")]
    pub targets: String,
}

#[derive(Tabled)]
pub struct SyncRow {
    #[tabled(rename = "Pipeline")]
    pub name: String,
    #[tabled(rename = "Rules")]
    pub rules: usize,
    #[tabled(rename = "Categories")]
    pub categories: usize,
    #[tabled(rename = "Status")]
    pub status: String,
}

fn render<T: Tabled>(rows: &[T]) -> String {
    if rows.is_empty() {
        return String::new();
    }
    Table::new(rows).with(Style::rounded()).to_string()
}

pub fn pipeline_table(rows: &[PipelineRow]) -> String {
    render(rows)
}

pub fn sync_table(rows: &[SyncRow]) -> String {
    render(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_table_renders_nothing() {
        assert!(sync_table(&[]).is_empty());
    }

    #[test]
    fn test_sync_table_has_headers_and_values() {
        let table = sync_table(&[SyncRow {
            name: "cursor-rules".to_string(),
            rules: 4,
            categories: 2,
            status: "ok".to_string(),
        }]);
        assert!(table.contains("Pipeline"));
        assert!(table.contains("cursor-rules"));
        assert!(table.contains("Categories"));
    }
}
