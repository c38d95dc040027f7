//! Built-in effect transformers (§4.D, §4.D.1).
//!
//! Each submodule implements one effect kind as a pure `Frame -> Frame`
//! function matching `registry::EffectTransformer`. Zone-rewriting kinds
//! (`zone-reroute`, `zone-broadcast`, `zone-mirror`) have no entry here;
//! they carry no frame-transform meaning and are filtered out of the
//! chain before a transformer would ever be looked up for them (§4.G).

pub mod color;
pub mod curves;
pub mod mask;
pub mod spatial;
