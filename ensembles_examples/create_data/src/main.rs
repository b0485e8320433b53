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

use std::path::PathBuf;

use clap::Parser;
use ensembles::data::{partition_dataset, PartitionConfig};
use log::error;

#[derive(Debug, Parser)]
#[command(name = "create_data", about = "Split the housing dataset into train.csv and test.csv")]
struct Args {
    /// Source dataset with a header row.
    #[arg(long, default_value = "data/kc_house_data.csv")]
    source: PathBuf,

    /// Directory receiving the train and test files.
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Columns removed before splitting.
    #[arg(long, value_delimiter = ',', default_value = "date,sqft_above,id,long")]
    drop_columns: Vec<String>,

    /// Target column, removed from the test partition only.
    #[arg(long, default_value = "price")]
    target: String,

    /// Fraction of rows assigned to the test partition.
    #[arg(long, default_value_t = 0.2)]
    test_size: f64,

    /// Seed for the row shuffle.
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = PartitionConfig::new(&args.source)
        .with_output_dir(args.output_dir)
        .with_drop_columns(&args.drop_columns)
        .with_target_column(&args.target)
        .with_test_size(args.test_size)
        .with_seed(args.seed);

    match partition_dataset(&config) {
        Ok(summary) => println!(
            "{} and {} were created successfully.",
            summary.train_path.display(),
            summary.test_path.display()
        ),
        Err(e) => {
            error!("Failed to partition {:?}: {}", config.source(), e);
            std::process::exit(1);
        }
    }
}
