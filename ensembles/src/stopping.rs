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

//! Early stopping decisions driven by a recorded convergence history.

use log::debug;

use crate::errors::StoppingError;
use crate::history::ConvergenceHistory;

/// Decides whether training should stop, given the losses recorded so far.
///
/// The validation losses are monitored when present and non-empty, otherwise
/// the training losses. With `patience + 1` or more entries recorded, training
/// stops unless one of the last `patience` losses is strictly below the
/// minimum over the whole sequence. Ties with the minimum are not counted as
/// an improvement.
///
/// # Errors
/// `StoppingError::MissingLossHistory` if the history holds neither training
/// nor validation losses.
pub fn whether_to_stop(
    history: &ConvergenceHistory,
    patience: usize,
) -> Result<bool, StoppingError> {
    let losses = history.monitored_losses().ok_or(StoppingError::MissingLossHistory)?;

    if losses.len() <= patience {
        return Ok(false);
    }

    let min_loss = losses.iter().copied().fold(f64::INFINITY, f64::min);
    for &loss in &losses[losses.len() - patience..] {
        if loss < min_loss {
            return Ok(false);
        }
    }

    debug!("No improvement over min loss {} in the last {} epochs", min_loss, patience);
    Ok(true)
}

/// Early stopping rule with a fixed patience.
///
/// # Example
///
/// ```
/// use ensembles::history::ConvergenceHistory;
/// use ensembles::stopping::EarlyStopping;
///
/// let rule = EarlyStopping::new(2);
/// let mut history = ConvergenceHistory::with_validation();
///
/// for (train_loss, val_loss) in [(0.9, 1.2), (0.7, 1.0), (0.6, 1.1), (0.5, 1.3)] {
///     history.record(train_loss, Some(val_loss));
///     if rule.should_stop(&history).unwrap() {
///         break;
///     }
/// }
/// assert_eq!(history.epochs(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EarlyStopping {
    patience: usize,
}

impl EarlyStopping {
    /// # Arguments
    ///
    /// * `patience` - Number of epochs to tolerate without improvement
    pub fn new(patience: usize) -> Self {
        EarlyStopping { patience }
    }

    pub fn patience(&self) -> usize {
        self.patience
    }

    pub fn should_stop(&self, history: &ConvergenceHistory) -> Result<bool, StoppingError> {
        whether_to_stop(history, self.patience)
    }
}
