//! Zone-group set algebra (§4.G).
//!
//! A cue chain's default output assignment may be rewritten by
//! `zone-reroute`, `zone-broadcast`, and `zone-mirror` entries anywhere in
//! its effect chain. The source walks the chain and mutates a routing
//! dict in place as it goes; this resolver instead folds the chain into
//! an explicit `HashSet<OutputId>`, so "what outputs does this cue reach"
//! is always a pure function of the chain and the zone group table, never
//! order-of-mutation state.

use std::collections::{HashMap, HashSet};

use lf_core::{OutputId, ZoneGroupId};
use lf_effects::{ChainItem, EffectParams};

use crate::zone_group::ZoneGroup;

pub struct RoutingResolver<'a> {
    zone_groups: &'a HashMap<ZoneGroupId, ZoneGroup>,
    all_outputs: &'a [OutputId],
}

impl<'a> RoutingResolver<'a> {
    pub fn new(zone_groups: &'a HashMap<ZoneGroupId, ZoneGroup>, all_outputs: &'a [OutputId]) -> Self {
        Self {
            zone_groups,
            all_outputs,
        }
    }

    /// Resolves the final output set a cue reaches, starting from
    /// `default_targets` and folding every zone-rewriting effect found in
    /// `chain` (recursively, respecting `enabled`) in chain order.
    pub fn resolve(&self, default_targets: &[OutputId], chain: &[ChainItem]) -> HashSet<OutputId> {
        let mut current: HashSet<OutputId> = default_targets.iter().copied().collect();
        self.fold(chain, &mut current);
        current
    }

    fn fold(&self, items: &[ChainItem], current: &mut HashSet<OutputId>) {
        for item in items {
            match item {
                ChainItem::Leaf(instance) if instance.enabled => {
                    self.apply_zone_effect(&instance.params, current);
                }
                ChainItem::Leaf(_) => {}
                ChainItem::Group(group) if group.enabled => {
                    self.fold(&group.items, current);
                }
                ChainItem::Group(_) => {}
            }
        }
    }

    fn apply_zone_effect(&self, params: &EffectParams, current: &mut HashSet<OutputId>) {
        match params {
            EffectParams::ZoneReroute {
                mode,
                target_zone_groups,
            } => {
                let target = self.union_of(target_zone_groups);
                *current = match mode {
                    lf_effects::ZoneRerouteMode::Replace => target,
                    lf_effects::ZoneRerouteMode::Add => current.union(&target).copied().collect(),
                    lf_effects::ZoneRerouteMode::Filter => {
                        current.intersection(&target).copied().collect()
                    }
                };
            }
            EffectParams::ZoneBroadcast => {
                *current = self.all_outputs.iter().copied().collect();
            }
            EffectParams::ZoneMirror {
                source_group,
                include_original,
            } => {
                // §4.G: "if source_group ∈ target, add its mirror
                // (left↔right); if ¬include_original?, remove the
                // source." `target` here is the resolved output set, so
                // "source_group ∈ target" means the source group's own
                // outputs are currently among them.
                let source_members = self.members_of(*source_group);
                if source_members.is_disjoint(current) {
                    return;
                }
                if let Some(mirror_members) = self.mirror_members_of(*source_group) {
                    current.extend(mirror_members);
                }
                if !*include_original {
                    for member in &source_members {
                        current.remove(member);
                    }
                }
            }
            _ => {}
        }
    }

    fn members_of(&self, group_id: ZoneGroupId) -> HashSet<OutputId> {
        self.zone_groups
            .get(&group_id)
            .map(|g| g.members.iter().copied().collect())
            .unwrap_or_default()
    }

    /// The output set of `group_id`'s declared mirror pairing, if any.
    fn mirror_members_of(&self, group_id: ZoneGroupId) -> Option<HashSet<OutputId>> {
        let mirror_id = self.zone_groups.get(&group_id)?.mirror_of?;
        Some(self.members_of(mirror_id))
    }

    fn union_of(&self, ids: &[ZoneGroupId]) -> HashSet<OutputId> {
        ids.iter().flat_map(|id| self.members_of(*id)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lf_core::{EffectInstanceId, ProjectorId};
    use lf_effects::{EffectInstance, ZoneRerouteMode};

    fn output(n: u64) -> OutputId {
        OutputId::Projector(ProjectorId::new(n))
    }

    fn zone_map() -> HashMap<ZoneGroupId, ZoneGroup> {
        let mut map = HashMap::new();
        map.insert(
            ZoneGroupId::new(1),
            ZoneGroup::new(ZoneGroupId::new(1), "stage-left", vec![output(1), output(2)])
                .with_mirror_of(ZoneGroupId::new(2)),
        );
        map.insert(
            ZoneGroupId::new(2),
            ZoneGroup::new(ZoneGroupId::new(2), "stage-right", vec![output(3)])
                .with_mirror_of(ZoneGroupId::new(1)),
        );
        map
    }

    fn leaf(params: EffectParams) -> ChainItem {
        ChainItem::Leaf(EffectInstance::new(EffectInstanceId::new(1), params))
    }

    #[test]
    fn no_zone_effects_keeps_default_targets() {
        let zones = zone_map();
        let all = vec![output(1), output(2), output(3)];
        let resolver = RoutingResolver::new(&zones, &all);
        let result = resolver.resolve(&[output(1)], &[]);
        assert_eq!(result, HashSet::from([output(1)]));
    }

    #[test]
    fn zone_reroute_replace_swaps_targets() {
        let zones = zone_map();
        let all = vec![output(1), output(2), output(3)];
        let resolver = RoutingResolver::new(&zones, &all);
        let chain = vec![leaf(EffectParams::ZoneReroute {
            mode: ZoneRerouteMode::Replace,
            target_zone_groups: vec![ZoneGroupId::new(2)],
        })];
        let result = resolver.resolve(&[output(1)], &chain);
        assert_eq!(result, HashSet::from([output(3)]));
    }

    #[test]
    fn zone_reroute_add_unions_targets() {
        let zones = zone_map();
        let all = vec![output(1), output(2), output(3)];
        let resolver = RoutingResolver::new(&zones, &all);
        let chain = vec![leaf(EffectParams::ZoneReroute {
            mode: ZoneRerouteMode::Add,
            target_zone_groups: vec![ZoneGroupId::new(2)],
        })];
        let result = resolver.resolve(&[output(1)], &chain);
        assert_eq!(result, HashSet::from([output(1), output(3)]));
    }

    #[test]
    fn zone_reroute_filter_intersects_targets() {
        let zones = zone_map();
        let all = vec![output(1), output(2), output(3)];
        let resolver = RoutingResolver::new(&zones, &all);
        let chain = vec![leaf(EffectParams::ZoneReroute {
            mode: ZoneRerouteMode::Filter,
            target_zone_groups: vec![ZoneGroupId::new(1)],
        })];
        let result = resolver.resolve(&[output(1), output(3)], &chain);
        assert_eq!(result, HashSet::from([output(1)]));
    }

    #[test]
    fn zone_broadcast_reaches_every_output() {
        let zones = zone_map();
        let all = vec![output(1), output(2), output(3)];
        let resolver = RoutingResolver::new(&zones, &all);
        let chain = vec![leaf(EffectParams::ZoneBroadcast)];
        let result = resolver.resolve(&[output(1)], &chain);
        assert_eq!(result, HashSet::from([output(1), output(2), output(3)]));
    }

    #[test]
    fn zone_mirror_without_original_replaces_source_with_its_mirror() {
        let zones = zone_map();
        let all = vec![output(1), output(2), output(3)];
        let resolver = RoutingResolver::new(&zones, &all);
        let chain = vec![leaf(EffectParams::ZoneMirror {
            source_group: ZoneGroupId::new(1),
            include_original: false,
        })];
        // default target is stage-left (group 1's members), so the guard
        // "source_group ∈ target" holds and the mirror (stage-right) applies.
        let result = resolver.resolve(&[output(1), output(2)], &chain);
        assert_eq!(result, HashSet::from([output(3)]));
    }

    #[test]
    fn zone_mirror_with_original_unions_the_mirror_with_the_source() {
        let zones = zone_map();
        let all = vec![output(1), output(2), output(3)];
        let resolver = RoutingResolver::new(&zones, &all);
        let chain = vec![leaf(EffectParams::ZoneMirror {
            source_group: ZoneGroupId::new(1),
            include_original: true,
        })];
        let result = resolver.resolve(&[output(1), output(2)], &chain);
        assert_eq!(result, HashSet::from([output(1), output(2), output(3)]));
    }

    #[test]
    fn zone_mirror_is_a_no_op_when_source_group_is_not_currently_targeted() {
        let zones = zone_map();
        let all = vec![output(1), output(2), output(3)];
        let resolver = RoutingResolver::new(&zones, &all);
        // default target is stage-right (group 2), which shares no member
        // with source_group 1 (stage-left) — the §4.G guard keeps target
        // unchanged regardless of `include_original`.
        let chain = vec![leaf(EffectParams::ZoneMirror {
            source_group: ZoneGroupId::new(1),
            include_original: false,
        })];
        let result = resolver.resolve(&[output(3)], &chain);
        assert_eq!(result, HashSet::from([output(3)]));
    }

    #[test]
    fn zone_mirror_of_a_group_with_no_declared_mirror_only_applies_the_include_original_guard() {
        let mut zones = zone_map();
        // Give group 1 an unpaired clone with no mirror_of.
        zones.insert(
            ZoneGroupId::new(3),
            ZoneGroup::new(ZoneGroupId::new(3), "unpaired", vec![output(1)]),
        );
        let all = vec![output(1), output(2), output(3)];
        let resolver = RoutingResolver::new(&zones, &all);
        let chain = vec![leaf(EffectParams::ZoneMirror {
            source_group: ZoneGroupId::new(3),
            include_original: false,
        })];
        let result = resolver.resolve(&[output(1)], &chain);
        assert!(result.is_empty());
    }

    #[test]
    fn disabled_zone_effect_is_ignored() {
        let zones = zone_map();
        let all = vec![output(1), output(2), output(3)];
        let resolver = RoutingResolver::new(&zones, &all);
        let mut instance = EffectInstance::new(
            EffectInstanceId::new(1),
            EffectParams::ZoneBroadcast,
        );
        instance.enabled = false;
        let result = resolver.resolve(&[output(1)], &[ChainItem::Leaf(instance)]);
        assert_eq!(result, HashSet::from([output(1)]));
    }

    #[test]
    fn unknown_zone_group_id_resolves_to_empty_membership() {
        let zones = zone_map();
        let all = vec![output(1), output(2), output(3)];
        let resolver = RoutingResolver::new(&zones, &all);
        let chain = vec![leaf(EffectParams::ZoneReroute {
            mode: ZoneRerouteMode::Replace,
            target_zone_groups: vec![ZoneGroupId::new(999)],
        })];
        let result = resolver.resolve(&[output(1)], &chain);
        assert!(result.is_empty());
    }
}
