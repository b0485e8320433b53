// BSD 3-Clause License
//
// Copyright (c) 2025, BlackPortal ○
//
// Redistribution and use in source and binary forms, with or without
// modification, are permitted provided that the following conditions are met:
//
// 1. Redistributions of source code must retain the above copyright notice, this
//    list of conditions and the following disclaimer.
//
// 2. Redistributions in binary form must reproduce the above copyright notice,
//    this list of conditions and the following disclaimer in the documentation
//    and/or other materials provided with the distribution.
//
// 3. Neither the name of the copyright holder nor the names of its
//    contributors may be used to endorse or promote products derived from
//    this software without specific prior written permission.
//
// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
// AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
// IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
// DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE
// FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
// DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
// SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
// CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY,
// OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
// OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use log::debug;

use super::error::CsvError;

/// An in-memory table of string cells read from a CSV file with a header row.
///
/// Cells are kept exactly as they appear in the source so that a table written
/// back out reproduces the original values. Every row has the same width as the
/// header.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Builds a table from headers and rows, checking that every row matches the
    /// header width.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self, CsvError> {
        for (i, row) in rows.iter().enumerate() {
            if row.len() != headers.len() {
                return Err(CsvError::InconsistentColumns {
                    row: i + 1,
                    actual: row.len(),
                    expected: headers.len(),
                });
            }
        }
        Ok(Table { headers, rows })
    }

    /// Reads a table from a CSV file whose first line is the header.
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self, CsvError> {
        let path = path.as_ref();
        debug!("Reading CSV table from {:?}", path);
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    /// Reads a table from any CSV source whose first line is the header.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CsvError> {
        let mut rdr =
            csv::ReaderBuilder::new().has_headers(true).flexible(true).from_reader(reader);

        let headers: Vec<String> = rdr.headers()?.iter().map(|h| h.to_string()).collect();
        if headers.is_empty() {
            return Err(CsvError::EmptyFile);
        }

        let mut rows: Vec<Vec<String>> = Vec::new();
        for (i, result) in rdr.records().enumerate() {
            let record = result?;
            if record.len() != headers.len() {
                return Err(CsvError::InconsistentColumns {
                    row: i + 1,
                    actual: record.len(),
                    expected: headers.len(),
                });
            }
            rows.push(record.iter().map(|s| s.to_string()).collect());
        }

        debug!("Parsed {} rows with {} columns", rows.len(), headers.len());
        Ok(Table { headers, rows })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_cols(&self) -> usize {
        self.headers.len()
    }

    /// Position of `name` in the header, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// All cells of the named column, top to bottom.
    pub fn column(&self, name: &str) -> Result<Vec<&str>, CsvError> {
        let idx =
            self.column_index(name).ok_or_else(|| CsvError::MissingColumn(name.to_string()))?;
        Ok(self.rows.iter().map(|row| row[idx].as_str()).collect())
    }

    /// Removes the named columns from the table.
    ///
    /// Every name must exist in the header; nothing is removed if one is missing.
    pub fn drop_columns<S: AsRef<str>>(&mut self, names: &[S]) -> Result<(), CsvError> {
        let mut removed = vec![false; self.headers.len()];
        for name in names {
            let name = name.as_ref();
            let idx =
                self.column_index(name).ok_or_else(|| CsvError::MissingColumn(name.to_string()))?;
            removed[idx] = true;
        }

        let keep = |cells: &mut Vec<String>| {
            let mut col = 0;
            cells.retain(|_| {
                let retained = !removed[col];
                col += 1;
                retained
            });
        };

        keep(&mut self.headers);
        for row in self.rows.iter_mut() {
            keep(row);
        }
        Ok(())
    }

    /// Returns a new table holding the rows at `indices`, in that order.
    ///
    /// Panics if an index is out of bounds.
    pub fn select_rows(&self, indices: &[usize]) -> Table {
        Table {
            headers: self.headers.clone(),
            rows: indices.iter().map(|&i| self.rows[i].clone()).collect(),
        }
    }

    /// Writes the header and all rows to `path`, replacing any existing file.
    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> Result<(), CsvError> {
        let path = path.as_ref();
        debug!("Writing {} rows to {:?}", self.rows.len(), path);
        let file = File::create(path)?;
        self.to_writer(file)
    }

    /// Writes the header and all rows to `writer`. No row index is emitted.
    pub fn to_writer<W: Write>(&self, writer: W) -> Result<(), CsvError> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(&self.headers).map_err(CsvError::CsvWrite)?;
        for row in &self.rows {
            wtr.write_record(row).map_err(CsvError::CsvWrite)?;
        }
        wtr.flush().map_err(|e| CsvError::CsvWrite(e.into()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes()).expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    #[test]
    fn test_load_headers_and_rows() {
        let temp_file = create_temp_csv("id,price,zipcode\n1,221900.0,98178\n2,538000.0,98125\n");

        let table = Table::from_csv_path(temp_file.path()).expect("Failed to load CSV");

        assert_eq!(table.headers(), &["id", "price", "zipcode"]);
        assert_eq!(table.n_rows(), 2);
        assert_eq!(table.rows()[1], vec!["2", "538000.0", "98125"]);
    }

    #[test]
    fn test_load_keeps_categorical_cells_verbatim() {
        let temp_file = create_temp_csv("date,price\n20141013T000000,221900.0\n");

        let table = Table::from_csv_path(temp_file.path()).expect("Failed to load CSV");

        assert_eq!(table.column("date").unwrap(), vec!["20141013T000000"]);
    }

    #[test]
    fn test_load_empty_file() {
        let temp_file = create_temp_csv("");

        let result = Table::from_csv_path(temp_file.path());
        assert!(matches!(result, Err(CsvError::EmptyFile)));
    }

    #[test]
    fn test_load_header_only() {
        let temp_file = create_temp_csv("id,price\n");

        let table = Table::from_csv_path(temp_file.path()).expect("Failed to load CSV");
        assert_eq!(table.n_cols(), 2);
        assert_eq!(table.n_rows(), 0);
    }

    #[test]
    fn test_load_inconsistent_columns() {
        let temp_file = create_temp_csv("id,price\n1,2.0\n2,4.0,extra\n");

        let result = Table::from_csv_path(temp_file.path());
        assert!(
            matches!(result, Err(CsvError::InconsistentColumns { row, actual, expected }) if row == 2 && actual == 3 && expected == 2)
        );
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = Table::from_csv_path("nonexistent.csv");
        assert!(matches!(result, Err(CsvError::FileOpen(_))));
    }

    #[test]
    fn test_new_rejects_ragged_rows() {
        let result =
            Table::new(vec!["a".to_string(), "b".to_string()], vec![vec!["1".to_string()]]);
        assert!(matches!(
            result,
            Err(CsvError::InconsistentColumns { row: 1, actual: 1, expected: 2 })
        ));
    }

    #[test]
    fn test_drop_columns() {
        let csv_content = "id,date,price,long,lat\n1,d1,10,-122.2,47.5\n2,d2,20,-122.3,47.7\n";
        let mut table = Table::from_reader(csv_content.as_bytes()).expect("Failed to load CSV");

        table.drop_columns(&["date", "id", "long"]).expect("Failed to drop columns");

        assert_eq!(table.headers(), &["price", "lat"]);
        assert_eq!(table.rows()[0], vec!["10", "47.5"]);
        assert_eq!(table.rows()[1], vec!["20", "47.7"]);
    }

    #[test]
    fn test_drop_missing_column_leaves_table_untouched() {
        let mut table =
            Table::from_reader("id,price\n1,10\n".as_bytes()).expect("Failed to load CSV");
        let before = table.clone();

        let result = table.drop_columns(&["id", "sqft_above"]);

        assert!(matches!(result, Err(CsvError::MissingColumn(name)) if name == "sqft_above"));
        assert_eq!(table, before);
    }

    #[test]
    fn test_select_rows_in_given_order() {
        let table = Table::from_reader("id\na\nb\nc\n".as_bytes()).expect("Failed to load CSV");

        let selected = table.select_rows(&[2, 0]);

        assert_eq!(selected.column("id").unwrap(), vec!["c", "a"]);
        assert_eq!(selected.headers(), table.headers());
    }

    #[test]
    fn test_write_then_read_back() {
        let table = Table::from_reader("bedrooms,price\n3,221900\n2,\"180,000\"\n".as_bytes())
            .expect("Failed to load CSV");
        let out = NamedTempFile::new().expect("Failed to create temp file");

        table.write_csv(out.path()).expect("Failed to write CSV");
        let written = std::fs::read_to_string(out.path()).expect("Failed to read output");

        assert!(written.starts_with("bedrooms,price\n"));
        assert_eq!(Table::from_csv_path(out.path()).unwrap(), table);
    }
}
