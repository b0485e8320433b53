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

use serde::{Deserialize, Serialize};

use crate::errors::HistoryError;

/// A per-epoch loss sequence that is either recorded or absent.
///
/// Serializes as a JSON array, or `null` when absent; a missing key inside a
/// [`ConvergenceHistory`] also reads as `Absent`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Option<Vec<f64>>", into = "Option<Vec<f64>>")]
pub enum LossHistory {
    Present(Vec<f64>),
    #[default]
    Absent,
}

impl LossHistory {
    pub fn is_absent(&self) -> bool {
        matches!(self, LossHistory::Absent)
    }

    pub fn as_slice(&self) -> Option<&[f64]> {
        match self {
            LossHistory::Present(losses) => Some(losses),
            LossHistory::Absent => None,
        }
    }

    /// Appends a loss, turning an absent history into a present one.
    pub fn push(&mut self, loss: f64) {
        match self {
            LossHistory::Present(losses) => losses.push(loss),
            LossHistory::Absent => *self = LossHistory::Present(vec![loss]),
        }
    }
}

impl From<Option<Vec<f64>>> for LossHistory {
    fn from(losses: Option<Vec<f64>>) -> Self {
        match losses {
            Some(losses) => LossHistory::Present(losses),
            None => LossHistory::Absent,
        }
    }
}

impl From<LossHistory> for Option<Vec<f64>> {
    fn from(history: LossHistory) -> Self {
        match history {
            LossHistory::Present(losses) => Some(losses),
            LossHistory::Absent => None,
        }
    }
}

impl From<Vec<f64>> for LossHistory {
    fn from(losses: Vec<f64>) -> Self {
        LossHistory::Present(losses)
    }
}

/// Training and validation losses recorded once per epoch by a training loop.
///
/// When validation losses are present and non-empty they are the signal used
/// for stopping decisions; otherwise the training losses are.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ConvergenceHistory {
    #[serde(default, skip_serializing_if = "LossHistory::is_absent")]
    pub train: LossHistory,
    #[serde(default, skip_serializing_if = "LossHistory::is_absent")]
    pub val: LossHistory,
}

impl ConvergenceHistory {
    /// An empty history tracking training losses only.
    pub fn new() -> Self {
        ConvergenceHistory { train: LossHistory::Present(Vec::new()), val: LossHistory::Absent }
    }

    /// An empty history tracking both training and validation losses.
    pub fn with_validation() -> Self {
        ConvergenceHistory {
            train: LossHistory::Present(Vec::new()),
            val: LossHistory::Present(Vec::new()),
        }
    }

    pub fn from_losses(train: Vec<f64>, val: Option<Vec<f64>>) -> Self {
        ConvergenceHistory { train: train.into(), val: val.into() }
    }

    /// Records the losses of one finished epoch.
    pub fn record(&mut self, train_loss: f64, val_loss: Option<f64>) {
        self.train.push(train_loss);
        if let Some(val_loss) = val_loss {
            self.val.push(val_loss);
        }
    }

    pub fn epochs(&self) -> usize {
        self.train.as_slice().map_or(0, <[f64]>::len)
    }

    /// The loss sequence that drives stopping decisions.
    ///
    /// Validation losses win when present and non-empty, then training losses.
    /// An empty validation sequence is still returned when it is the only one
    /// present. `None` means neither sequence was recorded.
    pub fn monitored_losses(&self) -> Option<&[f64]> {
        match (self.val.as_slice(), self.train.as_slice()) {
            (Some(val), _) if !val.is_empty() => Some(val),
            (_, Some(train)) => Some(train),
            (val, None) => val,
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, HistoryError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_string(&self) -> Result<String, HistoryError> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_train_only() {
        let mut history = ConvergenceHistory::new();
        history.record(0.9, None);
        history.record(0.7, None);

        assert_eq!(history.train, LossHistory::Present(vec![0.9, 0.7]));
        assert!(history.val.is_absent());
        assert_eq!(history.epochs(), 2);
    }

    #[test]
    fn test_record_with_validation() {
        let mut history = ConvergenceHistory::with_validation();
        history.record(0.9, Some(1.1));
        history.record(0.7, Some(1.0));

        assert_eq!(history.val.as_slice(), Some(&[1.1, 1.0][..]));
        assert_eq!(history.monitored_losses(), Some(&[1.1, 1.0][..]));
    }

    #[test]
    fn test_push_onto_absent() {
        let mut losses = LossHistory::Absent;
        losses.push(3.0);
        assert_eq!(losses, LossHistory::Present(vec![3.0]));
    }

    #[test]
    fn test_monitored_losses_prefers_validation() {
        let history = ConvergenceHistory::from_losses(vec![1.0, 0.5], Some(vec![2.0, 1.5]));
        assert_eq!(history.monitored_losses(), Some(&[2.0, 1.5][..]));
    }

    #[test]
    fn test_monitored_losses_falls_back_on_empty_validation() {
        let history = ConvergenceHistory::from_losses(vec![1.0, 0.5], Some(vec![]));
        assert_eq!(history.monitored_losses(), Some(&[1.0, 0.5][..]));
    }

    #[test]
    fn test_monitored_losses_empty_validation_only() {
        let history = ConvergenceHistory { train: LossHistory::Absent, val: vec![].into() };
        assert_eq!(history.monitored_losses(), Some(&[][..]));
    }

    #[test]
    fn test_monitored_losses_none_recorded() {
        assert_eq!(ConvergenceHistory::default().monitored_losses(), None);
    }

    #[test]
    fn test_json_null_and_missing_keys() {
        let history = ConvergenceHistory::from_json_str(r#"{"train": [5, 4, 3], "val": null}"#)
            .expect("Failed to parse history");
        assert_eq!(history, ConvergenceHistory::from_losses(vec![5.0, 4.0, 3.0], None));

        let history =
            ConvergenceHistory::from_json_str(r#"{"val": [5, 3, 1]}"#).expect("Failed to parse");
        assert!(history.train.is_absent());
        assert_eq!(history.val, LossHistory::Present(vec![5.0, 3.0, 1.0]));

        let history = ConvergenceHistory::from_json_str("{}").expect("Failed to parse history");
        assert_eq!(history, ConvergenceHistory::default());
    }

    #[test]
    fn test_json_omits_absent_sequences() {
        let history = ConvergenceHistory::from_losses(vec![0.5], None);
        let json = history.to_json_string().expect("Failed to serialize history");

        assert_eq!(json, r#"{"train":[0.5]}"#);
        assert_eq!(ConvergenceHistory::from_json_str(&json).unwrap(), history);
    }

    #[test]
    fn test_json_rejects_non_numeric_losses() {
        let result = ConvergenceHistory::from_json_str(r#"{"train": ["high"]}"#);
        assert!(matches!(result, Err(HistoryError::Json(_))));
    }
}
