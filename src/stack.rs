//! Layer chain bookkeeping.
//!
//! A [`Layer`] is one node in a sequentially constructed network. Besides its
//! own output tensor it carries two append-only registries accumulated along
//! the chain: every output tensor produced so far (`all_layers`) and every
//! trainable parameter allocated so far (`all_params`). Construction is
//! single-threaded and fail-fast; a layer never mutates its predecessor.
//!
//! Layer names must be unique within a chain. Uniqueness is checked
//! eagerly at construction instead of leaning on the parameter store's
//! scope paths, so a collision fails with a clear diagnostic before any
//! tensor work happens.

use candle_core::{bail, Result, Tensor};

/// One node in a layer chain: a name, an output tensor, and the registries
/// inherited from the predecessor plus this node's own contributions.
#[derive(Debug, Clone)]
pub struct Layer {
    name: String,
    outputs: Tensor,
    all_layers: Vec<Tensor>,
    all_params: Vec<Tensor>,
    used_names: Vec<String>,
}

impl Layer {
    /// Start a chain from an existing tensor (the network input).
    ///
    /// Registers the tensor as the first entry of the layer registry.
    pub fn input(outputs: Tensor, name: impl Into<String>) -> Self {
        let name = name.into();
        tracing::info!("Input {name}: shape {:?}", outputs.dims());
        Self {
            name: name.clone(),
            outputs: outputs.clone(),
            all_layers: vec![outputs],
            all_params: Vec::new(),
            used_names: vec![name],
        }
    }

    /// Extend `prev` with a new node holding `outputs`.
    ///
    /// Clones the predecessor's registries and appends `outputs`. Fails if
    /// `name` is already used anywhere in the chain.
    pub(crate) fn chain(prev: &Layer, name: &str, outputs: Tensor) -> Result<Self> {
        if prev.used_names.iter().any(|n| n == name) {
            bail!("layer name `{name}` is already used in this stack")
        }
        let mut all_layers = prev.all_layers.clone();
        all_layers.push(outputs.clone());
        let mut used_names = prev.used_names.clone();
        used_names.push(name.to_string());
        Ok(Self {
            name: name.to_string(),
            outputs,
            all_layers,
            all_params: prev.all_params.clone(),
            used_names,
        })
    }

    /// Register a trainable parameter allocated by this node.
    pub(crate) fn push_param(&mut self, param: Tensor) {
        self.all_params.push(param);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The tensor this node produced.
    pub fn outputs(&self) -> &Tensor {
        &self.outputs
    }

    /// Output tensors of every node in the chain, oldest first.
    pub fn all_layers(&self) -> &[Tensor] {
        &self.all_layers
    }

    /// Trainable parameters registered along the chain, oldest first.
    pub fn all_params(&self) -> &[Tensor] {
        &self.all_params
    }

    /// Total number of trainable scalar values in the chain.
    pub fn param_count(&self) -> usize {
        self.all_params.iter().map(|p| p.elem_count()).sum()
    }
}

impl AsRef<Layer> for Layer {
    fn as_ref(&self) -> &Layer {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use candle_core::{Device, Tensor};

    #[test]
    fn input_registers_itself() {
        let x = Tensor::zeros((2, 4), candle_core::DType::F32, &Device::Cpu).unwrap();
        let layer = Layer::input(x, "in");
        assert_eq!(layer.name(), "in");
        assert_eq!(layer.all_layers().len(), 1);
        assert!(layer.all_params().is_empty());
        assert_eq!(layer.param_count(), 0);
    }

    #[test]
    fn chain_appends_without_touching_prev() {
        let x = Tensor::zeros((2, 4), candle_core::DType::F32, &Device::Cpu).unwrap();
        let root = Layer::input(x.clone(), "in");
        let next = Layer::chain(&root, "next", x).unwrap();
        assert_eq!(next.all_layers().len(), 2);
        assert_eq!(root.all_layers().len(), 1);
    }

    #[test]
    fn duplicate_name_is_rejected() {
        let x = Tensor::zeros((2, 4), candle_core::DType::F32, &Device::Cpu).unwrap();
        let root = Layer::input(x.clone(), "in");
        assert!(Layer::chain(&root, "in", x).is_err());
    }
}
