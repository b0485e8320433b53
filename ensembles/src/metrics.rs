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

use ndarray::Array1;
use num_traits::{Float, FromPrimitive};

use crate::errors::MetricError;

/// A regression error metric comparing true and predicted values.
///
/// Lower is better for every metric in this module.
pub trait Metric<T: Float> {
    fn calculate(&self, y_true: &Array1<T>, y_pred: &Array1<T>) -> Result<T, MetricError>;

    fn name(&self) -> &str;
}

/// Root Mean Squared Error: sqrt(mean((y_true - y_pred)²))
#[derive(Debug, Clone, Copy, Default)]
pub struct Rmse;

impl<T: Float + FromPrimitive> Metric<T> for Rmse {
    fn calculate(&self, y_true: &Array1<T>, y_pred: &Array1<T>) -> Result<T, MetricError> {
        rmse(y_true, y_pred)
    }

    fn name(&self) -> &str {
        "rmse"
    }
}

/// Root Mean Squared Logarithmic Error: sqrt(mean((ln(1 + y) - ln(1 + z))²))
///
/// Suited to targets spanning several orders of magnitude, such as prices,
/// since it compares values on a log scale.
#[derive(Debug, Clone, Copy, Default)]
pub struct Rmsle;

impl<T: Float + FromPrimitive> Metric<T> for Rmsle {
    fn calculate(&self, y_true: &Array1<T>, y_pred: &Array1<T>) -> Result<T, MetricError> {
        rmsle(y_true, y_pred)
    }

    fn name(&self) -> &str {
        "rmsle"
    }
}

fn check_shapes<T>(y_true: &Array1<T>, y_pred: &Array1<T>) -> Result<(), MetricError> {
    if y_true.is_empty() || y_pred.is_empty() {
        return Err(MetricError::EmptyInput);
    }

    if y_true.len() != y_pred.len() {
        return Err(MetricError::DimensionMismatch {
            expected: y_true.len(),
            actual: y_pred.len(),
        });
    }

    Ok(())
}

fn root_mean_square<T: Float + FromPrimitive>(diff: Array1<T>) -> Result<T, MetricError> {
    let mse = diff.mapv(|x| x * x).mean().ok_or(MetricError::EmptyInput)?;
    Ok(mse.sqrt())
}

/// Calculates the Root Mean Squared Error between true and predicted values.
///
/// # Arguments
/// - `y_true`: True values.
/// - `y_pred`: Predicted values, same length as `y_true`.
///
/// # Errors
/// `MetricError::DimensionMismatch` if the lengths differ and
/// `MetricError::EmptyInput` if either array is empty.
pub fn rmse<T: Float + FromPrimitive>(
    y_true: &Array1<T>,
    y_pred: &Array1<T>,
) -> Result<T, MetricError> {
    check_shapes(y_true, y_pred)?;
    root_mean_square(y_true - y_pred)
}

/// Calculates the Root Mean Squared Logarithmic Error between true values `y`
/// and predicted values `z`.
///
/// Both arrays are expected to hold values `>= -1` so that `ln(1 + x)` is
/// defined. This is not checked: values below `-1` produce `NaN`.
///
/// # Errors
/// `MetricError::DimensionMismatch` if the lengths differ and
/// `MetricError::EmptyInput` if either array is empty.
pub fn rmsle<T: Float + FromPrimitive>(y: &Array1<T>, z: &Array1<T>) -> Result<T, MetricError> {
    check_shapes(y, z)?;
    root_mean_square(y.mapv(T::ln_1p) - z.mapv(T::ln_1p))
}
