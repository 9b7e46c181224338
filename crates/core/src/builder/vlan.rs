use std::collections::btree_map::Entry;

use super::args::{parse_ipv4, parse_u8, parse_vlan_id, port_list};
use super::interface::{CommonField, DESCRIPTION, IP_ADDRESS, SHUTDOWN, common_field, helper_address};
use super::{ModelBuilder, Top, flag, optional_number, rest_scalar};
use crate::error::ConfigError;
use crate::grammar::dispatch::{Section, SectionRule, apply_children};
use crate::model::{Vlan, VrrpGroup, set_membership};

#[derive(Debug, Clone, Copy)]
enum VlanDirective {
    Common(CommonField),
    Name,
    Mtu,
    Tagged,
    Untagged,
    HelperAddress,
    VrrpGroup,
}

#[derive(Debug, Clone, Copy)]
enum Vrrp {
    VirtualAddress,
    Priority,
    Preempt,
    AdvertiseInterval,
    Description,
}

const fn common(rule: SectionRule<CommonField>) -> SectionRule<VlanDirective> {
    SectionRule {
        pattern: rule.pattern,
        negation: rule.negation,
        children: rule.children,
        directive: VlanDirective::Common(rule.directive),
    }
}

const VLAN: &[SectionRule<VlanDirective>] = &[
    common(DESCRIPTION),
    common(SHUTDOWN),
    common(IP_ADDRESS),
    SectionRule::new(&["ip", "helper-address"], VlanDirective::HelperAddress).negatable(),
    SectionRule::new(&["name"], VlanDirective::Name).negatable(),
    SectionRule::new(&["mtu"], VlanDirective::Mtu).negatable(),
    SectionRule::new(&["tagged"], VlanDirective::Tagged).negatable(),
    SectionRule::new(&["untagged"], VlanDirective::Untagged).negatable(),
    SectionRule::new(&["vrrp-group"], VlanDirective::VrrpGroup)
        .negatable()
        .container(),
];

const VRRP: &[SectionRule<Vrrp>] = &[
    SectionRule::new(&["virtual-address"], Vrrp::VirtualAddress).negatable(),
    SectionRule::new(&["priority"], Vrrp::Priority).negatable(),
    SectionRule::new(&["preempt"], Vrrp::Preempt).negatable(),
    SectionRule::new(&["advertise-interval"], Vrrp::AdvertiseInterval).negatable(),
    SectionRule::new(&["description"], Vrrp::Description).negatable(),
];

impl ModelBuilder {
    /// `interface Vlan VID` and its body.
    pub(super) fn vlan(&mut self, id: &str, sec: &Section<'_, Top>) -> Result<(), ConfigError> {
        let vid = parse_vlan_id(id)?;
        self.vlan_mut(vid);
        apply_children(sec.children, VLAN, |child| {
            vlan_directive(self.vlan_mut(vid), &child)
        })
    }

    /// Look up a VLAN, creating it with defaults on first reference.
    fn vlan_mut(&mut self, vid: u16) -> &mut Vlan {
        match self.model.vlans.entry(vid) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                tracing::debug!(vlan = vid, "creating VLAN");
                entry.insert(Vlan::new(vid))
            }
        }
    }
}

fn vlan_directive(vlan: &mut Vlan, sec: &Section<'_, VlanDirective>) -> Result<(), ConfigError> {
    match sec.directive {
        VlanDirective::Common(field) => common_field(&mut vlan.common, field, sec),
        VlanDirective::Name => rest_scalar(sec, 1, &mut vlan.name),
        VlanDirective::Mtu => optional_number(sec, 2, "MTU", 594..=12000, &mut vlan.mtu),
        VlanDirective::Tagged | VlanDirective::Untagged => {
            // tagged|untagged TYPE RANGE
            sec.expect_arity(3)?;
            let ports = port_list(sec.arg(1)?, sec.arg(2)?)?;
            let members = match sec.directive {
                VlanDirective::Tagged => &mut vlan.tagged_ports,
                _ => &mut vlan.untagged_ports,
            };
            for port in ports {
                set_membership(members, port, !sec.disable);
            }
            Ok(())
        }
        VlanDirective::HelperAddress => helper_address(sec, &mut vlan.helper_addresses),
        VlanDirective::VrrpGroup => vrrp_group(vlan, sec),
    }
}

/// `vrrp-group N` and its body; `no vrrp-group N` removes the group.
fn vrrp_group(vlan: &mut Vlan, sec: &Section<'_, VlanDirective>) -> Result<(), ConfigError> {
    sec.expect_arity(2)?;
    let id = parse_u8("VRRP group id", sec.arg(1)?, 1..=255)?;
    if sec.disable {
        if !sec.children.is_empty() {
            return Err(sec.malformed());
        }
        vlan.vrrp_groups.remove(&id);
        return Ok(());
    }

    let group = vlan
        .vrrp_groups
        .entry(id)
        .or_insert_with(|| VrrpGroup::new(id));
    apply_children(sec.children, VRRP, |child| match child.directive {
        Vrrp::VirtualAddress => {
            child.expect_arity(2)?;
            let addr = parse_ipv4("virtual address", child.arg(1)?)?;
            set_membership(&mut group.virtual_addresses, addr, !child.disable);
            Ok(())
        }
        Vrrp::Priority => optional_number(&child, 2, "VRRP priority", 1..=254, &mut group.priority),
        Vrrp::Preempt => flag(&child, 1, &mut group.preempt),
        Vrrp::AdvertiseInterval => optional_number(
            &child,
            2,
            "advertise interval",
            1..=4095,
            &mut group.advertise_interval,
        ),
        Vrrp::Description => rest_scalar(&child, 1, &mut group.description),
    })
}
