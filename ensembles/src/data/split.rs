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

use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::csv::Table;
use super::error::SplitError;

/// Fraction of rows assigned to the test partition unless configured otherwise.
pub const DEFAULT_TEST_SIZE: f64 = 0.2;

/// Seed used for the shuffle unless configured otherwise.
pub const DEFAULT_SEED: u64 = 42;

/// Number of test and train rows for a table of `n_rows` rows.
///
/// The test partition receives `ceil(test_size * n_rows)` rows and the train
/// partition the remainder.
pub fn partition_sizes(n_rows: usize, test_size: f64) -> Result<(usize, usize), SplitError> {
    if !(test_size > 0.0 && test_size < 1.0) {
        return Err(SplitError::InvalidTestSize(test_size));
    }

    let n_test = (test_size * n_rows as f64).ceil() as usize;
    let n_train = n_rows.saturating_sub(n_test);
    if n_test == 0 || n_train == 0 {
        return Err(SplitError::EmptyPartition { n_rows, test_size });
    }

    Ok((n_test, n_train))
}

/// Splits the rows of `table` into a train and a test partition.
///
/// Row indices are shuffled uniformly with an RNG seeded from `seed`; the first
/// `ceil(test_size * n_rows)` shuffled rows form the test partition and the
/// rest form the train partition. The same table, `test_size` and `seed` always
/// give the same partitions, and no row lands in both.
///
/// # Returns
/// `(train, test)`, both carrying the full header of `table`.
pub fn train_test_split(
    table: &Table,
    test_size: f64,
    seed: u64,
) -> Result<(Table, Table), SplitError> {
    let n_rows = table.n_rows();
    let (n_test, n_train) = partition_sizes(n_rows, test_size)?;

    let mut indices: Vec<usize> = (0..n_rows).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let (test_idx, train_idx) = indices.split_at(n_test);
    debug!("Split data: train_size={}, test_size={}, seed={}", n_train, n_test, seed);

    Ok((table.select_rows(train_idx), table.select_rows(test_idx)))
}
