//! Tabular query answers.

use parajudica_core::TermValue;
use std::fmt;
use std::sync::Arc;

/// A query answer: one column per output variable, rows in sorted order.
#[derive(Debug, Clone)]
pub struct Table {
    pub columns: Vec<Arc<str>>,
    pub rows: Vec<Vec<Option<TermValue>>>,
}

impl Table {
    /// Number of answer rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the answer is empty (not an error)
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render a cell for display
    pub fn cell_text(value: &Option<TermValue>) -> String {
        match value {
            Some(TermValue::Ref(sid)) => sid.to_string(),
            Some(TermValue::Long(n)) => n.to_string(),
            Some(TermValue::String(s)) => s.to_string(),
            Some(TermValue::Boolean(b)) => b.to_string(),
            None => String::new(),
        }
    }
}

impl fmt::Display for Table {
    /// Aligned plain-text rendering, header row first.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut widths: Vec<usize> = self.columns.iter().map(|c| c.len()).collect();
        let rendered: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|row| row.iter().map(Self::cell_text).collect())
            .collect();
        for row in &rendered {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(cell.len());
            }
        }

        for (i, column) in self.columns.iter().enumerate() {
            if i > 0 {
                write!(f, "  ")?;
            }
            write!(f, "{column:<width$}", width = widths[i])?;
        }
        writeln!(f)?;
        for (i, width) in widths.iter().enumerate() {
            if i > 0 {
                write!(f, "  ")?;
            }
            write!(f, "{}", "-".repeat(*width))?;
        }
        writeln!(f)?;
        for row in &rendered {
            for (i, cell) in row.iter().enumerate() {
                if i > 0 {
                    write!(f, "  ")?;
                }
                write!(f, "{cell:<width$}", width = widths[i])?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parajudica_core::Sid;

    #[test]
    fn test_display_aligns_columns() {
        let table = Table {
            columns: vec![Arc::from("?c"), Arc::from("?k")],
            rows: vec![vec![
                Some(TermValue::Ref(Sid::new(9, "AggregatedHealth"))),
                Some(TermValue::Long(3)),
            ]],
        };
        let text = table.to_string();
        let mut lines = text.lines();
        assert!(lines.next().unwrap().starts_with("?c"));
        assert!(lines.next().unwrap().starts_with("---"));
        assert!(text.contains("app:AggregatedHealth"));
    }
}
