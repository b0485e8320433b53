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

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};

use super::csv::Table;
use super::error::DataError;
use super::split::{train_test_split, DEFAULT_SEED, DEFAULT_TEST_SIZE};

/// Columns removed from the housing dataset before it is split.
pub const DEFAULT_DROP_COLUMNS: [&str; 4] = ["date", "sqft_above", "id", "long"];

/// Target column kept in the train partition and removed from the test partition.
pub const DEFAULT_TARGET_COLUMN: &str = "price";

/// Configuration for partitioning a dataset into train and test files
#[derive(Debug, Clone)]
pub struct PartitionConfig {
    source: PathBuf,
    output_dir: PathBuf,
    drop_columns: Vec<String>,
    target_column: String,
    test_size: f64,
    seed: u64,
    train_file: String,
    test_file: String,
}

impl Default for PartitionConfig {
    fn default() -> Self {
        PartitionConfig {
            source: PathBuf::from("data/kc_house_data.csv"),
            output_dir: PathBuf::from("."),
            drop_columns: DEFAULT_DROP_COLUMNS.iter().map(|c| c.to_string()).collect(),
            target_column: DEFAULT_TARGET_COLUMN.to_string(),
            test_size: DEFAULT_TEST_SIZE,
            seed: DEFAULT_SEED,
            train_file: "train.csv".to_string(),
            test_file: "test.csv".to_string(),
        }
    }
}

impl PartitionConfig {
    pub fn new<P: AsRef<Path>>(source: P) -> Self {
        PartitionConfig { source: source.as_ref().to_path_buf(), ..Default::default() }
    }

    pub fn with_output_dir(mut self, dir: PathBuf) -> Self {
        self.output_dir = dir;
        self
    }

    pub fn with_drop_columns<S: AsRef<str>>(mut self, columns: &[S]) -> Self {
        self.drop_columns = columns.iter().map(|c| c.as_ref().to_string()).collect();
        self
    }

    pub fn with_target_column(mut self, column: &str) -> Self {
        self.target_column = column.to_string();
        self
    }

    pub fn with_test_size(mut self, test_size: f64) -> Self {
        self.test_size = test_size;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_file_names(mut self, train_file: &str, test_file: &str) -> Self {
        self.train_file = train_file.to_string();
        self.test_file = test_file.to_string();
        self
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn train_path(&self) -> PathBuf {
        self.output_dir.join(&self.train_file)
    }

    pub fn test_path(&self) -> PathBuf {
        self.output_dir.join(&self.test_file)
    }
}

/// Outcome of a successful [`partition_dataset`] run.
#[derive(Debug, Clone, PartialEq)]
pub struct PartitionSummary {
    pub train_rows: usize,
    pub test_rows: usize,
    pub train_path: PathBuf,
    pub test_path: PathBuf,
}

/// Reads the source dataset, removes the configured columns, splits the rows
/// and writes the train and test partitions to disk.
///
/// The target column stays in the train partition and is removed from the test
/// partition. Existing output files are overwritten. Any failure aborts the run
/// before the next phase starts.
pub fn partition_dataset(config: &PartitionConfig) -> Result<PartitionSummary, DataError> {
    info!("Starting dataset partitioning with config: {:?}", config);

    let mut table = Table::from_csv_path(&config.source)?;
    table.drop_columns(&config.drop_columns)?;
    debug!("Retained columns: {:?}", table.headers());

    let (train, mut test) = train_test_split(&table, config.test_size, config.seed)?;
    test.drop_columns(&[config.target_column.as_str()])?;

    fs::create_dir_all(&config.output_dir).map_err(DataError::OutputDir)?;
    let train_path = config.train_path();
    let test_path = config.test_path();
    train.write_csv(&train_path)?;
    test.write_csv(&test_path)?;

    info!(
        "Dataset partitioning completed: {} train rows -> {:?}, {} test rows -> {:?}",
        train.n_rows(),
        train_path,
        test.n_rows(),
        test_path
    );
    Ok(PartitionSummary {
        train_rows: train.n_rows(),
        test_rows: test.n_rows(),
        train_path,
        test_path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::error::CsvError;
    use std::collections::HashSet;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    const HEADER: &str = "id,date,price,bedrooms,sqft_living,sqft_above,zipcode,lat,long";

    fn housing_csv(n_rows: usize) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        writeln!(file, "{}", HEADER).expect("Failed to write header");
        for i in 0..n_rows {
            writeln!(
                file,
                "{},2014{:04}T000000,{}.0,{},{},{},98{:03},47.{},-122.{}",
                7129300520u64 + i as u64,
                i % 1231,
                200000 + i * 37,
                1 + i % 5,
                1000 + i,
                900 + i,
                i % 200,
                i,
                i
            )
            .expect("Failed to write row");
        }
        file.flush().expect("Failed to flush temp file");
        file
    }

    fn column_set(table: &Table, name: &str) -> HashSet<String> {
        table.column(name).unwrap().into_iter().map(str::to_string).collect()
    }

    #[test]
    fn test_partition_thousand_rows() {
        let _ =
            env_logger::builder().is_test(true).filter_level(log::LevelFilter::Debug).try_init();

        let source = housing_csv(1000);
        let out_dir = TempDir::new().expect("Failed to create temp dir");
        let config =
            PartitionConfig::new(source.path()).with_output_dir(out_dir.path().to_path_buf());

        let summary = partition_dataset(&config).expect("Partitioning failed");

        assert_eq!(summary.train_rows, 800);
        assert_eq!(summary.test_rows, 200);

        let train = Table::from_csv_path(&summary.train_path).unwrap();
        let test = Table::from_csv_path(&summary.test_path).unwrap();
        assert_eq!(train.n_rows(), 800);
        assert_eq!(test.n_rows(), 200);
        assert_eq!(train.headers(), &["price", "bedrooms", "sqft_living", "zipcode", "lat"]);
        assert_eq!(test.headers(), &["bedrooms", "sqft_living", "zipcode", "lat"]);

        // sqft_living is unique per source row, so it identifies rows after `id` is dropped
        let train_rows = column_set(&train, "sqft_living");
        let test_rows = column_set(&test, "sqft_living");
        assert!(train_rows.is_disjoint(&test_rows));
        assert_eq!(train_rows.len() + test_rows.len(), 1000);
    }

    #[test]
    fn test_partition_is_reproducible() {
        let source = housing_csv(40);
        let dir_a = TempDir::new().unwrap();
        let dir_b = TempDir::new().unwrap();

        let a = partition_dataset(
            &PartitionConfig::new(source.path()).with_output_dir(dir_a.path().to_path_buf()),
        )
        .unwrap();
        let b = partition_dataset(
            &PartitionConfig::new(source.path()).with_output_dir(dir_b.path().to_path_buf()),
        )
        .unwrap();

        assert_eq!(
            std::fs::read_to_string(a.train_path).unwrap(),
            std::fs::read_to_string(b.train_path).unwrap()
        );
        assert_eq!(
            std::fs::read_to_string(a.test_path).unwrap(),
            std::fs::read_to_string(b.test_path).unwrap()
        );
    }

    #[test]
    fn test_partition_custom_parameters() {
        let source = housing_csv(20);
        let out_dir = TempDir::new().unwrap();
        let config = PartitionConfig::new(source.path())
            .with_output_dir(out_dir.path().join("nested"))
            .with_drop_columns(&["id"])
            .with_target_column("zipcode")
            .with_test_size(0.5)
            .with_seed(7)
            .with_file_names("fit.csv", "holdout.csv");

        let summary = partition_dataset(&config).unwrap();

        assert_eq!((summary.train_rows, summary.test_rows), (10, 10));
        assert_eq!(summary.train_path, out_dir.path().join("nested").join("fit.csv"));
        let test = Table::from_csv_path(&summary.test_path).unwrap();
        assert!(test.column_index("zipcode").is_none());
        assert!(test.column_index("price").is_some());
    }

    #[test]
    fn test_partition_missing_source() {
        let out_dir = TempDir::new().unwrap();
        let config = PartitionConfig::new(out_dir.path().join("missing.csv"))
            .with_output_dir(out_dir.path().to_path_buf());

        let result = partition_dataset(&config);

        assert!(matches!(result, Err(DataError::Csv(CsvError::FileOpen(_)))));
        assert!(!config.train_path().exists());
        assert!(!config.test_path().exists());
    }

    #[test]
    fn test_partition_missing_dropped_column() {
        let mut source = NamedTempFile::new().unwrap();
        writeln!(source, "id,date,price\n1,d,10\n2,d,20\n3,d,30\n4,d,40\n5,d,50").unwrap();
        source.flush().unwrap();
        let out_dir = TempDir::new().unwrap();
        let config =
            PartitionConfig::new(source.path()).with_output_dir(out_dir.path().to_path_buf());

        let result = partition_dataset(&config);

        assert!(
            matches!(result, Err(DataError::Csv(CsvError::MissingColumn(name))) if name == "sqft_above")
        );
    }

    #[test]
    fn test_default_config() {
        let config = PartitionConfig::default();

        assert_eq!(config.source(), Path::new("data/kc_house_data.csv"));
        assert_eq!(config.train_path(), PathBuf::from("./train.csv"));
        assert_eq!(config.test_path(), PathBuf::from("./test.csv"));
    }
}
