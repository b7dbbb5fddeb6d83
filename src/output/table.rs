//! Table output formatting

use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Rows},
};

/// Format data as a table
pub fn format_table<T: Tabled>(data: &[T]) -> String {
    if data.is_empty() {
        return "No cached organizations.".to_string();
    }

    let mut table = Table::new(data);
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));

    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Tabled)]
    struct TestRow {
        #[tabled(rename = "EMAIL")]
        email: String,
        #[tabled(rename = "ORGANIZATION")]
        name: String,
    }

    #[test]
    fn test_format_table_empty() {
        let rows: Vec<TestRow> = vec![];
        assert_eq!(format_table(&rows), "No cached organizations.");
    }

    #[test]
    fn test_format_table_rows() {
        let rows = vec![
            TestRow {
                email: "a@acme.test".to_string(),
                name: "Acme".to_string(),
            },
            TestRow {
                email: "b@globex.test".to_string(),
                name: "Globex".to_string(),
            },
        ];

        let result = format_table(&rows);

        assert!(result.contains("EMAIL"));
        assert!(result.contains("ORGANIZATION"));
        assert!(result.contains("a@acme.test"));
        assert!(result.contains("Globex"));
        // Rounded style uses ╭ for top-left corner
        assert!(result.contains("╭"));
    }
}
