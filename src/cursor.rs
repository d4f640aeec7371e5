use crate::error::{Result, StorageError};
use crate::table::Table;
use crate::ROW_SIZE;

/// A position in a table: either a valid row or one past the last row.
pub struct Cursor<'a> {
    table: &'a mut Table,
    row_num: usize,
    end_of_table: bool,
}

impl<'a> Cursor<'a> {
    pub fn at_start(table: &'a mut Table) -> Self {
        let end_of_table = table.num_rows() == 0;
        Self {
            table,
            row_num: 0,
            end_of_table,
        }
    }

    /// The insertion point: one past the last row.
    pub fn at_end(table: &'a mut Table) -> Self {
        let row_num = table.num_rows();
        Self {
            table,
            row_num,
            end_of_table: true,
        }
    }

    pub fn row_num(&self) -> usize {
        self.row_num
    }

    pub fn is_end(&self) -> bool {
        self.end_of_table
    }

    /// The bytes of the row under the cursor, loading its page if needed.
    pub fn value(&mut self) -> Result<&mut [u8]> {
        let (page_num, offset) = self.table.row_location(self.row_num);
        let page = self.table.pager_mut().get_page(page_num)?;
        Ok(&mut page[offset..offset + ROW_SIZE])
    }

    pub fn advance(&mut self) -> Result<()> {
        if self.end_of_table {
            return Err(StorageError::CursorPastEnd);
        }
        self.row_num += 1;
        if self.row_num >= self.table.num_rows() {
            self.end_of_table = true;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Layout, Row};
    use tempfile::tempdir;

    #[test]
    fn start_of_empty_table_is_its_end() -> Result<()> {
        let dir = tempdir()?;
        let mut table = Table::open(dir.path().join("test.db"), Layout::default())?;

        let cursor = Cursor::at_start(&mut table);
        assert!(cursor.is_end());
        assert_eq!(cursor.row_num(), 0);
        Ok(())
    }

    #[test]
    fn walks_every_row_then_stops() -> Result<()> {
        let dir = tempdir()?;
        let mut table = Table::open(dir.path().join("test.db"), Layout::default())?;
        for i in 0..20 {
            table.insert(&Row::new(i, "u", "e"))?;
        }

        let mut cursor = Cursor::at_start(&mut table);
        let mut seen = Vec::new();
        while !cursor.is_end() {
            seen.push(Row::decode(cursor.value()?, 0).id);
            cursor.advance()?;
        }
        assert_eq!(seen, (0..20).collect::<Vec<_>>());
        assert_eq!(cursor.row_num(), 20);

        let err = cursor.advance().err().unwrap();
        assert!(matches!(err, StorageError::CursorPastEnd));
        Ok(())
    }

    #[test]
    fn end_cursor_points_past_last_row() -> Result<()> {
        let dir = tempdir()?;
        let mut table = Table::open(dir.path().join("test.db"), Layout::default())?;
        for i in 0..14 {
            table.insert(&Row::new(i, "u", "e"))?;
        }

        let mut cursor = Cursor::at_end(&mut table);
        assert!(cursor.is_end());
        assert_eq!(cursor.row_num(), 14);
        // Row 14 is the first slot of page 1, still empty.
        assert!(cursor.value()?.iter().all(|&b| b == 0));
        assert_eq!(cursor.value()?.len(), crate::ROW_SIZE);
        Ok(())
    }
}
