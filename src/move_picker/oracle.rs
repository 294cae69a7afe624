// Copyright 2026 pipesolve contributors
//
// Permission is hereby granted, free of charge, to any person obtaining a copy of
// this software and associated documentation files (the "Software"), to deal in
// the Software without restriction, including without limitation the rights to
// use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of
// the Software, and to permit persons to whom the Software is furnished to do so,
// subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS
// FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR
// COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER
// IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN
// CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! The scoring oracle: the move-picker ranks candidate moves by asking
//! something external "how good is each of these boards", without caring
//! whether that something is a loaded TensorFlow model or a test double.
//! Every TensorFlow call in [`TfScoringOracle`] returns `Result` instead of
//! `unwrap`/`expect`, consistent with the rest of the crate's
//! fail-fast-without-panicking policy.

use std::path::Path;

use tensorflow::{Graph, SavedModelBundle, SessionOptions, SessionRunArgs, Tensor};
use tracing::trace;

use crate::error::Error;

/// Ranks a batch of encoded boards. `encoded` is a flat `4 * n^2` float
/// vector (one float per direction per cell, 1.0/0.0 matching [`crate::pipe::Pipe::encode`]);
/// the returned vector has one score per candidate move the caller supplied,
/// higher is better.
pub trait ScoringOracle {
    fn score(&self, encoded: &[f32]) -> Result<Vec<f32>, Error>;
}

/// A `ScoringOracle` backed by a loaded TensorFlow `SavedModel`.
pub struct TfScoringOracle {
    graph: Graph,
    bundle: SavedModelBundle,
    input_name: String,
    output_name: String,
}

impl TfScoringOracle {
    /// Loads the SavedModel at `model_path` and binds it to the named input
    /// and output tensors of its `serving_default` signature.
    pub fn load<P: AsRef<Path>>(
        model_path: P,
        input_name: impl Into<String>,
        output_name: impl Into<String>,
    ) -> Result<TfScoringOracle, Error> {
        let mut graph = Graph::new();
        let bundle = SavedModelBundle::load(&SessionOptions::new(), &["serve"], &mut graph, model_path)
            .map_err(|e| Error::OracleUnavailable(e.to_string()))?;
        Ok(TfScoringOracle {
            graph,
            bundle,
            input_name: input_name.into(),
            output_name: output_name.into(),
        })
    }
}

impl ScoringOracle for TfScoringOracle {
    fn score(&self, encoded: &[f32]) -> Result<Vec<f32>, Error> {
        let tensor = Tensor::new(&[1, encoded.len() as u64])
            .with_values(encoded)
            .map_err(|e| Error::OracleUnavailable(e.to_string()))?;

        let signature = self
            .bundle
            .meta_graph_def()
            .get_signature("serving_default")
            .map_err(|e| Error::OracleUnavailable(e.to_string()))?;
        let input_info = signature
            .get_input(&self.input_name)
            .map_err(|e| Error::OracleUnavailable(e.to_string()))?;
        let output_info = signature
            .get_output(&self.output_name)
            .map_err(|e| Error::OracleUnavailable(e.to_string()))?;

        let input_op = self
            .graph
            .operation_by_name_required(&input_info.name().name)
            .map_err(|e| Error::OracleUnavailable(e.to_string()))?;
        let output_op = self
            .graph
            .operation_by_name_required(&output_info.name().name)
            .map_err(|e| Error::OracleUnavailable(e.to_string()))?;

        let mut args = SessionRunArgs::new();
        args.add_feed(&input_op, 0, &tensor);
        let out_token = args.request_fetch(&output_op, 0);

        self.bundle
            .session
            .run(&mut args)
            .map_err(|e| Error::OracleUnavailable(e.to_string()))?;

        let out: Tensor<f32> = args
            .fetch(out_token)
            .map_err(|e| Error::OracleUnavailable(e.to_string()))?;
        trace!(scores = out.len(), "oracle inference complete");
        Ok(out.to_vec())
    }
}

/// A deterministic `ScoringOracle` for tests: delegates to a closure instead
/// of a loaded model, so the move-picker core is testable without a real
/// TensorFlow artifact on disk.
pub struct StubOracle<F: Fn(&[f32]) -> Vec<f32>> {
    scorer: F,
}

impl<F: Fn(&[f32]) -> Vec<f32>> StubOracle<F> {
    pub fn new(scorer: F) -> StubOracle<F> {
        StubOracle { scorer }
    }
}

impl<F: Fn(&[f32]) -> Vec<f32>> ScoringOracle for StubOracle<F> {
    fn score(&self, encoded: &[f32]) -> Result<Vec<f32>, Error> {
        Ok((self.scorer)(encoded))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stub_oracle_delegates_to_closure() {
        let oracle = StubOracle::new(|v: &[f32]| v.iter().map(|x| x * 2.0).collect());
        let scores = oracle.score(&[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(scores, vec![2.0, 4.0, 6.0]);
    }
}
