//! Effect registry (§4.D, §4.E unknown-id handling).
//!
//! The source dispatches on effect id through a runtime string switch
//! rebuilt per call. Per the redesign notes this core instead builds a
//! `HashMap<String, EffectTransformer>` once at startup, keyed by the
//! same stable ids, so lookup is a hash probe and the set of known
//! effects is just the registry's key set.

use std::collections::HashSet;
use std::sync::OnceLock;

use log::warn;
use parking_lot::Mutex;
use std::collections::HashMap;

use lf_core::Frame;

use crate::chain::EffectContext;
use crate::library;
use crate::params::EffectParams;

/// A pure per-effect frame transform.
pub type EffectTransformer = fn(&Frame, &EffectParams, &EffectContext) -> Frame;

/// Maps stable effect ids to their transformer function.
pub struct EffectRegistry {
    transformers: HashMap<String, EffectTransformer>,
}

fn warned_ids() -> &'static Mutex<HashSet<String>> {
    static WARNED: OnceLock<Mutex<HashSet<String>>> = OnceLock::new();
    WARNED.get_or_init(|| Mutex::new(HashSet::new()))
}

impl EffectRegistry {
    /// Empty registry; every lookup falls through to identity + warning.
    pub fn empty() -> Self {
        Self {
            transformers: HashMap::new(),
        }
    }

    /// The registry populated with every effect kind this build knows
    /// about (§4.D, §4.D.1). Zone-rewriting effects are intentionally
    /// absent: they never reach a transformer because `apply_chain`
    /// filters them out before calling `apply` (§4.G).
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        registry.register("rgb-curves", library::curves::rgb_curves);
        registry.register("corner-pin", library::spatial::corner_pin);
        registry.register("scale", library::spatial::scale);
        registry.register("offset", library::spatial::offset);
        registry.register("rotate", library::spatial::rotate);
        registry.register("viewport", library::spatial::viewport);
        registry.register("blocked-regions", library::mask::blocked_regions);
        registry.register("hue-shift", library::color::hue_shift);
        registry
    }

    pub fn register(&mut self, effect_id: &str, transformer: EffectTransformer) {
        self.transformers.insert(effect_id.to_string(), transformer);
    }

    /// Applies the transformer registered for `effect_id`, or returns
    /// `frame` unchanged and logs a one-shot warning the first time this
    /// id is seen (§4.E: unrecognized ids mean identity passthrough, not
    /// a hard failure, since the external authoring tool may be ahead of
    /// this build).
    pub fn apply(
        &self,
        effect_id: &str,
        frame: &Frame,
        params: &EffectParams,
        ctx: &EffectContext,
    ) -> Frame {
        match self.transformers.get(effect_id) {
            Some(transformer) => transformer(frame, params, ctx),
            None => {
                self.warn_unknown_once(effect_id);
                frame.clone()
            }
        }
    }

    fn warn_unknown_once(&self, effect_id: &str) {
        let mut warned = warned_ids().lock();
        if warned.insert(effect_id.to_string()) {
            warn!("unrecognized effect id '{effect_id}', applying identity passthrough");
        }
    }
}
