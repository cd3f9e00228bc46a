use crate::core::{MapperError, Record, Value};
use crate::driver::Cursor;

use super::scanner::{scan_record, FromRow};

/// Forward-only, single-pass view over a multi-row result.
///
/// Call [`Rows::advance`] before each scan. Once exhausted the set stays
/// exhausted. [`Rows::close`] releases the cursor and reports the driver's
/// close error; dropping an unclosed `Rows` releases it too.
pub struct Rows<'c> {
    cursor: Option<Box<dyn Cursor + 'c>>,
    current: Option<Vec<Value>>,
    exhausted: bool,
}

impl<'c> Rows<'c> {
    pub(crate) fn new(cursor: Box<dyn Cursor + 'c>) -> Self {
        Self {
            cursor: Some(cursor),
            current: None,
            exhausted: false,
        }
    }

    fn cursor(&self) -> Result<&(dyn Cursor + 'c), MapperError> {
        self.cursor.as_deref().ok_or(MapperError::CursorClosed)
    }

    /// Column names of the result set.
    pub fn columns(&self) -> Result<&[String], MapperError> {
        Ok(self.cursor()?.columns())
    }

    /// Move to the next row. Returns `false` when there are no more rows.
    ///
    /// A fetch error ends the iteration: there is no current row afterwards
    /// and later calls return `false`.
    pub fn advance(&mut self) -> Result<bool, MapperError> {
        let cursor = self.cursor.as_deref_mut().ok_or(MapperError::CursorClosed)?;
        self.current = None;
        if self.exhausted {
            return Ok(false);
        }

        match cursor.next_row() {
            Ok(row) => self.current = row,
            Err(e) => {
                self.exhausted = true;
                return Err(e.into());
            }
        }
        if self.current.is_none() {
            self.exhausted = true;
        }
        Ok(!self.exhausted)
    }

    fn current(&self) -> Result<(&[String], &[Value]), MapperError> {
        let cursor = self.cursor()?;
        let values = self.current.as_deref().ok_or(MapperError::NoCurrentRow)?;
        Ok((cursor.columns(), values))
    }

    /// Scan the current row into scalar targets, one per column.
    pub fn scan<T: FromRow>(&self) -> Result<T, MapperError> {
        let (columns, values) = self.current()?;
        T::from_row(columns, values.to_vec())
    }

    /// Scan the current row into a record, mapping columns by name.
    pub fn scan_into<R: Record + ?Sized>(&self, dest: &mut R) -> Result<(), MapperError> {
        let (columns, values) = self.current()?;
        scan_record(columns, values.to_vec(), dest)
    }

    /// Read every remaining row as `T`, then close.
    pub fn collect_all<T: FromRow>(mut self) -> Result<Vec<T>, MapperError> {
        let mut out = Vec::new();
        while self.advance()? {
            out.push(self.scan()?);
        }
        self.close()?;
        Ok(out)
    }

    /// Read every remaining row into a fresh `R`, then close.
    pub fn collect_records<R: Record + Default>(mut self) -> Result<Vec<R>, MapperError> {
        let mut out = Vec::new();
        while self.advance()? {
            let mut record = R::default();
            self.scan_into(&mut record)?;
            out.push(record);
        }
        self.close()?;
        Ok(out)
    }

    /// Release the cursor. Closing twice is a no-op.
    pub fn close(&mut self) -> Result<(), MapperError> {
        self.current = None;
        match self.cursor.take() {
            Some(mut cursor) => Ok(cursor.close()?),
            None => Ok(()),
        }
    }

    #[must_use]
    pub const fn is_closed(&self) -> bool {
        self.cursor.is_none()
    }
}

impl Drop for Rows<'_> {
    fn drop(&mut self) {
        if let Some(mut cursor) = self.cursor.take() {
            if let Err(e) = cursor.close() {
                tracing::warn!(error = %e, "failed to close rows on drop");
            }
        }
    }
}

impl std::fmt::Debug for Rows<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rows")
            .field("closed", &self.is_closed())
            .field("exhausted", &self.exhausted)
            .field("current", &self.current)
            .finish()
    }
}
