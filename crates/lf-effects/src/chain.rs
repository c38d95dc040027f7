//! Nested effect chain (§3 ChainItem, §4.E apply_chain).
//!
//! The source models a chain as a recursive, untyped list of group/leaf
//! dicts with no enforced depth limit. Per the redesign notes this core
//! instead gives the chain an explicit tagged `ChainItem` enum, so
//! leaf/group dispatch is a compiler-checked match rather than runtime
//! shape-sniffing, and nesting depth is bounded by `MAX_CHAIN_DEPTH`
//! and checked once at snapshot construction (`validate_chain_depth`)
//! rather than per frame.

use lf_core::{EffectInstanceId, Frame, GroupId, LfError, LfResult, TimingContext, MAX_CHAIN_DEPTH};

use crate::params::EffectParams;
use crate::registry::EffectRegistry;

/// Per-frame context threaded through chain evaluation (§4.E, §4.F).
#[derive(Debug, Clone)]
pub struct EffectContext {
    pub time_ms: f64,
    pub trigger_time_ms: f64,
    pub timing: TimingContext,
}

impl EffectContext {
    pub fn new(time_ms: f64, trigger_time_ms: f64, timing: TimingContext) -> Self {
        Self {
            time_ms,
            trigger_time_ms,
            timing,
        }
    }

    pub fn elapsed_since_trigger_ms(&self) -> f64 {
        self.time_ms - self.trigger_time_ms
    }
}

/// One leaf effect in a chain (§3 EffectInstance).
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EffectInstance {
    pub id: EffectInstanceId,
    pub enabled: bool,
    pub params: EffectParams,
}

impl EffectInstance {
    pub fn new(id: EffectInstanceId, params: EffectParams) -> Self {
        Self {
            id,
            enabled: true,
            params,
        }
    }
}

/// A named, collapsible group of chain items (§3 Group).
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GroupNode {
    pub id: GroupId,
    pub name: String,
    pub enabled: bool,
    pub items: Vec<ChainItem>,
}

/// One entry of an effect chain: either a leaf effect or a nested group.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum ChainItem {
    Leaf(EffectInstance),
    Group(GroupNode),
}

/// Deepest nesting level reachable through `items`, where a bare leaf is
/// depth 1.
pub fn chain_depth(items: &[ChainItem]) -> usize {
    items
        .iter()
        .map(|item| match item {
            ChainItem::Leaf(_) => 1,
            ChainItem::Group(group) => 1 + chain_depth(&group.items),
        })
        .max()
        .unwrap_or(0)
}

/// Rejects a chain whose nesting exceeds `MAX_CHAIN_DEPTH` (§3 invariant,
/// §9 ChainTooDeep). Called once when a `WorldSnapshot` is built, not per
/// frame.
pub fn validate_chain_depth(items: &[ChainItem]) -> LfResult<()> {
    let depth = chain_depth(items);
    if depth > MAX_CHAIN_DEPTH {
        Err(LfError::ChainTooDeep {
            max: MAX_CHAIN_DEPTH,
            found: depth,
        })
    } else {
        Ok(())
    }
}

/// Applies a validated chain to `frame` in order, skipping disabled
/// leaves/groups and the zone-rewriting effects (`zone-reroute`,
/// `zone-broadcast`, `zone-mirror`), which lf-routing walks separately
/// and which have no frame-transform meaning here (§4.G).
pub fn apply_chain(
    frame: &Frame,
    items: &[ChainItem],
    ctx: &EffectContext,
    registry: &EffectRegistry,
) -> Frame {
    apply_chain_inner(frame, items, ctx, registry, 0)
}

fn apply_chain_inner(
    frame: &Frame,
    items: &[ChainItem],
    ctx: &EffectContext,
    registry: &EffectRegistry,
    depth: usize,
) -> Frame {
    // Chains are validated at snapshot construction; this guard only
    // protects against a future caller that skips validation.
    if depth >= MAX_CHAIN_DEPTH {
        return frame.clone();
    }

    let mut current = frame.clone();
    for item in items {
        current = match item {
            ChainItem::Leaf(instance) if instance.enabled && !instance.params.is_zone_rewriting() => {
                registry.apply(instance.params.effect_id(), &current, &instance.params, ctx)
            }
            ChainItem::Leaf(_) => current,
            ChainItem::Group(group) if group.enabled => {
                apply_chain_inner(&current, &group.items, ctx, registry, depth + 1)
            }
            ChainItem::Group(_) => current,
        };
    }
    current
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    pub fn ctx_at(time_ms: f64) -> EffectContext {
        EffectContext::new(time_ms, 0.0, TimingContext::new(120.0, 0.0, 0.0))
    }
}
