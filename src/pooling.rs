//! Global pooling layers.
//!
//! Each layer collapses every spatial axis of its input with one aggregate
//! (mean or max), keeping the batch axis (0) and the channel axis (last)
//! intact. Input rank is not validated here; a mismatch surfaces as a
//! reduction error from candle at the axis it is given.

use candle_core::{Result, Tensor};

use crate::compat::PrevLayer;
use crate::stack::Layer;

/// Mean over axes `1..=n`, collapsing each.
///
/// Reduces axis 1 repeatedly: removing an axis shifts the next spatial
/// axis into position 1.
fn mean_axes(x: &Tensor, n: usize) -> Result<Tensor> {
    let mut out = x.mean(1)?;
    for _ in 1..n {
        out = out.mean(1)?;
    }
    Ok(out)
}

/// Max over axes `1..=n`, collapsing each.
fn max_axes(x: &Tensor, n: usize) -> Result<Tensor> {
    let mut out = x.max(1)?;
    for _ in 1..n {
        out = out.max(1)?;
    }
    Ok(out)
}

macro_rules! global_pool {
    ($name:ident, $reduce:ident, $axes:expr, $agg:literal, $shape:literal) => {
        #[doc = concat!("Global ", $agg, " pooling over input `", $shape, "`,")]
        #[doc = "collapsing the spatial axes. Parameter-free."]
        pub struct $name {
            layer: Layer,
        }

        impl $name {
            pub fn new<'a>(prev: impl Into<PrevLayer<'a>>, name: &str) -> Result<Self> {
                let prev = prev.into().resolve(stringify!($name));
                tracing::info!("{} {name}", stringify!($name));

                let outputs = $reduce(prev.outputs(), $axes)?;
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

        impl AsRef<Layer> for $name {
            fn as_ref(&self) -> &Layer {
                &self.layer
            }
        }
    };
}

global_pool!(
    GlobalMeanPool1d,
    mean_axes,
    1,
    "mean",
    "[batch, length, channel]"
);
global_pool!(
    GlobalMeanPool2d,
    mean_axes,
    2,
    "mean",
    "[batch, height, width, channel]"
);
global_pool!(
    GlobalMeanPool3d,
    mean_axes,
    3,
    "mean",
    "[batch, depth, height, width, channel]"
);
global_pool!(
    GlobalMaxPool1d,
    max_axes,
    1,
    "max",
    "[batch, length, channel]"
);
global_pool!(
    GlobalMaxPool2d,
    max_axes,
    2,
    "max",
    "[batch, height, width, channel]"
);
global_pool!(
    GlobalMaxPool3d,
    max_axes,
    3,
    "max",
    "[batch, depth, height, width, channel]"
);

#[cfg(test)]
mod tests {
    use super::*;
    use candle_core::{DType, Device, Tensor};

    #[test]
    fn mean_pool_1d_reduces_axis_1() {
        let x = Tensor::ones((2, 100, 30), DType::F32, &Device::Cpu).unwrap();
        let input = Layer::input(x, "in");
        let pooled = GlobalMeanPool1d::new(&input, "globalmeanpool1d").unwrap();
        assert_eq!(pooled.outputs().dims(), &[2, 30]);
        assert!(pooled.layer().all_params().is_empty());
    }

    #[test]
    fn mean_pool_2d_reduces_axes_1_and_2() {
        let x = Tensor::ones((2, 100, 100, 30), DType::F32, &Device::Cpu).unwrap();
        let input = Layer::input(x, "in");
        let pooled = GlobalMeanPool2d::new(&input, "globalmeanpool2d").unwrap();
        assert_eq!(pooled.outputs().dims(), &[2, 30]);
    }

    #[test]
    fn mean_pool_3d_reduces_axes_1_to_3() {
        let x = Tensor::ones((2, 10, 10, 10, 30), DType::F32, &Device::Cpu).unwrap();
        let input = Layer::input(x, "in");
        let pooled = GlobalMeanPool3d::new(&input, "globalmeanpool3d").unwrap();
        assert_eq!(pooled.outputs().dims(), &[2, 30]);
    }

    #[test]
    fn mean_pool_values() {
        // Two channels: means over the length axis are 2.0 and 20.0.
        let rows = [[[1.0f32, 10.0], [2.0, 20.0], [3.0, 30.0]]];
        let x = Tensor::new(&rows, &Device::Cpu).unwrap();
        let input = Layer::input(x, "in");
        let pooled = GlobalMeanPool1d::new(&input, "globalmeanpool1d").unwrap();
        let vals: Vec<Vec<f32>> = pooled.outputs().to_vec2().unwrap();
        assert_eq!(vals, vec![vec![2.0, 20.0]]);
    }

    #[test]
    fn max_pool_values() {
        let rows = [[[1.0f32, 10.0], [2.0, 20.0], [3.0, 30.0]]];
        let x = Tensor::new(&rows, &Device::Cpu).unwrap();
        let input = Layer::input(x, "in");
        let pooled = GlobalMaxPool1d::new(&input, "globalmaxpool1d").unwrap();
        let vals: Vec<Vec<f32>> = pooled.outputs().to_vec2().unwrap();
        assert_eq!(vals, vec![vec![3.0, 30.0]]);
    }

    #[test]
    fn rank_mismatch_surfaces_from_reduction() {
        // Rank-1 input cannot be reduced over axis 1.
        let x = Tensor::ones(4, DType::F32, &Device::Cpu).unwrap();
        let input = Layer::input(x, "in");
        assert!(GlobalMeanPool1d::new(&input, "globalmeanpool1d").is_err());
    }
}
