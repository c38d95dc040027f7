//! Output bit-depth configuration (§4.B).

use serde::{Deserialize, Serialize};

use crate::error::{LfError, LfResult};

/// Color/XY bit-depth negotiated for one projector output. Immutable once
/// an engine is constructed from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    color_bit_depth: u8,
    xy_bit_depth: u8,
}

impl OutputConfig {
    /// Builds a config, accepting only 8 or 16 bits for each axis.
    pub fn make(color_bits: u8, xy_bits: u8) -> LfResult<Self> {
        if !matches!(color_bits, 8 | 16) || !matches!(xy_bits, 8 | 16) {
            return Err(LfError::InvalidConfig {
                color_bits,
                xy_bits,
            });
        }
        Ok(Self {
            color_bit_depth: color_bits,
            xy_bit_depth: xy_bits,
        })
    }

    #[inline]
    pub fn color_bit_depth(&self) -> u8 {
        self.color_bit_depth
    }

    #[inline]
    pub fn xy_bit_depth(&self) -> u8 {
        self.xy_bit_depth
    }

    /// Canonical human-readable name, e.g. "8-bit RGB, 16-bit XY".
    pub fn name(&self) -> String {
        format!(
            "{}-bit RGB, {}-bit XY",
            self.color_bit_depth, self.xy_bit_depth
        )
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            color_bit_depth: 8,
            xy_bit_depth: 16,
        }
    }
}
