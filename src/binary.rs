//! Binary-net output layers: trainable scale and sign quantization.
//!
//! [`ScaleLayer`] multiplies the predecessor's output by one trainable
//! scalar, usually placed after a binary block to recover output energy.
//! [`SignLayer`] quantizes the predecessor's output to ±1 for inference.

use candle_core::{Result, Tensor};
use candle_nn::{Init, VarBuilder};

use crate::compat::PrevLayer;
use crate::quantize::quantize;
use crate::stack::Layer;

/// Default initial value for the scale factor.
pub const DEFAULT_INIT_SCALE: f64 = 0.05;

/// Multiplies the layer outputs by a trainable scale value.
///
/// Allocates one size-1 parameter named `scale` under the layer's scope,
/// seeded to `init_scale`, and broadcasts it over the whole input. The
/// parameter is registered in the chain's parameter registry; this code
/// never mutates it after construction.
pub struct ScaleLayer {
    layer: Layer,
    scale: Tensor,
}

impl ScaleLayer {
    pub fn new<'a>(
        prev: impl Into<PrevLayer<'a>>,
        init_scale: f64,
        name: &str,
        vb: VarBuilder,
    ) -> Result<Self> {
        let prev = prev.into().resolve("ScaleLayer");
        tracing::info!("ScaleLayer {name}: init_scale: {init_scale}");

        let scale = vb
            .pp(name)
            .get_with_hints((1,), "scale", Init::Const(init_scale))?;
        let outputs = prev.outputs().broadcast_mul(&scale)?;

        let mut layer = Layer::chain(prev, name, outputs)?;
        layer.push_param(scale.clone());
        Ok(Self { layer, scale })
    }

    pub fn layer(&self) -> &Layer {
        &self.layer
    }

    pub fn outputs(&self) -> &Tensor {
        self.layer.outputs()
    }

    /// The trainable scale parameter (shape `[1]`).
    pub fn scale(&self) -> &Tensor {
        &self.scale
    }

    pub fn into_layer(self) -> Layer {
        self.layer
    }
}

impl AsRef<Layer> for ScaleLayer {
    fn as_ref(&self) -> &Layer {
        &self.layer
    }
}

/// Quantizes the layer outputs to -1 or 1 while inferencing.
///
/// Parameter-free; gradients flow through the hard-tanh STE in
/// [`quantize`].
pub struct SignLayer {
    layer: Layer,
}

impl SignLayer {
    pub fn new<'a>(prev: impl Into<PrevLayer<'a>>, name: &str) -> Result<Self> {
        let prev = prev.into().resolve("SignLayer");
        tracing::info!("SignLayer {name}");

        let outputs = quantize(prev.outputs())?;
        Ok(Self {
            layer: Layer::chain(prev, name, outputs)?,
        })
    }

    pub fn layer(&self) -> &Layer {
        &self.layer
    }

    pub fn outputs(&self) -> &Tensor {
        self.layer.outputs()
    }

    pub fn into_layer(self) -> Layer {
        self.layer
    }
}

impl AsRef<Layer> for SignLayer {
    fn as_ref(&self) -> &Layer {
        &self.layer
    }
}
