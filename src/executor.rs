//! Applies parsed statements to a table.

use tracing::debug;

use crate::error::ExecuteError;
use crate::row::Row;
use crate::statement::Statement;
use crate::table::Table;

/// Successful result of a statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecuteOutcome {
    Inserted,
    /// Every row of the table, in insertion order.
    Rows(Vec<Row>),
}

pub fn execute(statement: Statement, table: &mut Table) -> Result<ExecuteOutcome, ExecuteError> {
    match statement {
        Statement::Insert(row) => execute_insert(&row, table),
        Statement::Select => Ok(execute_select(table)),
    }
}

fn execute_insert(row: &Row, table: &mut Table) -> Result<ExecuteOutcome, ExecuteError> {
    table.append(row)?;
    Ok(ExecuteOutcome::Inserted)
}

fn execute_select(table: &Table) -> ExecuteOutcome {
    let rows: Vec<Row> = table.scan().collect();
    debug!(rows = rows.len(), "scanned table");
    ExecuteOutcome::Rows(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Layout;
    use crate::ROW_SIZE;

    fn insert(id: u32) -> Statement {
        Statement::Insert(Row::new(id, format!("user{id}"), format!("person{id}@example.com")))
    }

    #[test]
    fn test_insert_then_select() {
        let mut table = Table::new(Layout::default());

        assert_eq!(execute(insert(1), &mut table), Ok(ExecuteOutcome::Inserted));
        assert_eq!(
            execute(Statement::Select, &mut table),
            Ok(ExecuteOutcome::Rows(vec![Row::new(
                1,
                "user1",
                "person1@example.com"
            )]))
        );
    }

    #[test]
    fn test_select_empty_table() {
        let mut table = Table::new(Layout::default());
        assert_eq!(
            execute(Statement::Select, &mut table),
            Ok(ExecuteOutcome::Rows(Vec::new()))
        );
    }

    #[test]
    fn test_table_full() {
        let mut table = Table::new(Layout::new(ROW_SIZE, 2).unwrap());
        assert_eq!(execute(insert(1), &mut table), Ok(ExecuteOutcome::Inserted));
        assert_eq!(execute(insert(2), &mut table), Ok(ExecuteOutcome::Inserted));
        assert_eq!(execute(insert(3), &mut table), Err(ExecuteError::TableFull));

        let Ok(ExecuteOutcome::Rows(rows)) = execute(Statement::Select, &mut table) else {
            panic!("select failed");
        };
        assert_eq!(rows.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 2]);
    }
}
