//! The semantic model built from a configuration.
//!
//! Interfaces and VLANs are created on first reference with type-specific
//! defaults. Unmodelled sections are kept verbatim in [`Passthrough`].

mod interface;
mod service;
mod value;

pub use interface::{
    Aggregation, EthernetInterface, Interface, InterfaceClass, InterfaceCommon, InterfaceKey,
    InterfaceKind, LacpMode, PortChannel, StormControl, StormTraffic, TrafficDirection, Vlan,
    VrrpGroup,
};
pub use service::{
    ExecTimeout, Ftp, FtpUser, IpConfig, Line, LineKind, Lldp, ManagementTlv, Ntp, Protocols,
    Route, RouteMapAction, RouteMapRule, Secret, Servers, Snmp, SnmpAccess, SpanningTree, Ssh,
    Tacacs, TacacsHost, Telnet, User, VltDomain,
};
pub use value::{Ipv4Cidr, MacAddress};

use std::collections::BTreeMap;

use f10cfg_profile::PassthroughSection;
use serde::Serialize;

/// Add `item` when `present` is true, remove it otherwise.
///
/// Insertion order is kept; adding an existing item or removing a missing
/// one does nothing.
pub fn set_membership<T: PartialEq>(collection: &mut Vec<T>, item: T, present: bool) {
    let position = collection.iter().position(|existing| *existing == item);
    match (position, present) {
        (None, true) => collection.push(item),
        (Some(index), false) => {
            collection.remove(index);
        }
        _ => {}
    }
}

/// Verbatim storage for sections whose structure is not modelled.
///
/// Each entry is one directive's tokens, with `no` restored if negated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Passthrough {
    /// `boot ...`
    pub boot: Vec<Vec<String>>,
    /// `redundancy ...`
    pub redundancy: Vec<Vec<String>>,
    /// `hardware ...`
    pub hardware: Vec<Vec<String>>,
    /// `stack-unit ...`
    pub stack_unit: Vec<Vec<String>>,
    /// `logging ...`
    pub logging: Vec<Vec<String>>,
    /// `service ...`
    pub service: Vec<Vec<String>>,
    /// `aaa ...`
    pub aaa: Vec<Vec<String>>,
    /// `eula-consent ...`
    pub eula_consent: Vec<Vec<String>>,
}

impl Passthrough {
    /// The bucket for `section`.
    pub fn bucket(&self, section: PassthroughSection) -> &Vec<Vec<String>> {
        match section {
            PassthroughSection::Boot => &self.boot,
            PassthroughSection::Redundancy => &self.redundancy,
            PassthroughSection::Hardware => &self.hardware,
            PassthroughSection::StackUnit => &self.stack_unit,
            PassthroughSection::Logging => &self.logging,
            PassthroughSection::Service => &self.service,
            PassthroughSection::Aaa => &self.aaa,
            PassthroughSection::EulaConsent => &self.eula_consent,
        }
    }

    /// Mutable access to the bucket for `section`.
    pub fn bucket_mut(&mut self, section: PassthroughSection) -> &mut Vec<Vec<String>> {
        match section {
            PassthroughSection::Boot => &mut self.boot,
            PassthroughSection::Redundancy => &mut self.redundancy,
            PassthroughSection::Hardware => &mut self.hardware,
            PassthroughSection::StackUnit => &mut self.stack_unit,
            PassthroughSection::Logging => &mut self.logging,
            PassthroughSection::Service => &mut self.service,
            PassthroughSection::Aaa => &mut self.aaa,
            PassthroughSection::EulaConsent => &mut self.eula_consent,
        }
    }
}

/// A complete switch configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SwitchConfig {
    /// `hostname NAME`
    pub hostname: Option<String>,
    /// `reload-type TYPE`
    pub reload_type: Option<String>,
    /// `enable secret TYPE VALUE`
    pub enable: Option<Secret>,
    /// Local accounts keyed by user name.
    pub users: BTreeMap<String, User>,
    /// Every referenced interface, VLANs excluded.
    pub interfaces: BTreeMap<InterfaceKey, Interface>,
    /// VLANs keyed by id. VLAN 1 is always present.
    pub vlans: BTreeMap<u16, Vlan>,
    /// Global IP settings.
    pub ip: IpConfig,
    /// Spanning tree and LLDP.
    pub protocols: Protocols,
    /// Management servers.
    pub servers: Servers,
    /// Console and vty lines keyed by `"console 0"`, `"vty 3"`, ...
    pub lines: BTreeMap<String, Line>,
    /// Route maps: name, then sequence number.
    pub route_maps: BTreeMap<String, BTreeMap<u32, RouteMapRule>>,
    /// The VLT domain, if declared.
    pub vlt: Option<VltDomain>,
    /// Unmodelled sections.
    #[serde(flatten)]
    pub passthrough: Passthrough,
}

impl Default for SwitchConfig {
    /// An empty configuration with VLAN 1 seeded.
    fn default() -> Self {
        Self {
            hostname: None,
            reload_type: None,
            enable: None,
            users: BTreeMap::new(),
            interfaces: BTreeMap::new(),
            vlans: BTreeMap::from([(1, Vlan::new(1))]),
            ip: IpConfig::default(),
            protocols: Protocols::default(),
            servers: Servers::default(),
            lines: BTreeMap::new(),
            route_maps: BTreeMap::new(),
            vlt: None,
            passthrough: Passthrough::default(),
        }
    }
}

impl SwitchConfig {
    /// Look up an interface by kind and id.
    pub fn interface(&self, kind: InterfaceKind, id: &str) -> Option<&Interface> {
        self.interfaces.get(&InterfaceKey::new(kind, id))
    }

    /// Look up an ethernet-like interface by kind and id.
    pub fn ethernet(&self, kind: InterfaceKind, id: &str) -> Option<&EthernetInterface> {
        match self.interface(kind, id)? {
            Interface::Ethernet(eth) => Some(eth),
            _ => None,
        }
    }

    /// Look up a port-channel by number.
    pub fn port_channel(&self, id: u32) -> Option<&EthernetInterface> {
        self.ethernet(InterfaceKind::PortChannel, &id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_membership_adds_once_and_removes() {
        let mut ports = vec!["0/2"];
        set_membership(&mut ports, "0/1", true);
        set_membership(&mut ports, "0/1", true);
        assert_eq!(ports, ["0/2", "0/1"]);
        set_membership(&mut ports, "0/2", false);
        set_membership(&mut ports, "0/9", false);
        assert_eq!(ports, ["0/1"]);
    }

    #[test]
    fn default_config_seeds_vlan_1() {
        let cfg = SwitchConfig::default();
        assert_eq!(cfg.vlans.len(), 1);
        assert_eq!(cfg.vlans[&1], Vlan::new(1));
        assert!(cfg.servers.telnet.enabled);
        assert!(!cfg.servers.ssh.enabled);
        assert!(cfg.protocols.lldp.enabled);
    }

    #[test]
    fn passthrough_buckets_are_distinct() {
        let mut p = Passthrough::default();
        for section in PassthroughSection::ALL {
            p.bucket_mut(section).push(vec![section.keyword().to_owned()]);
        }
        for section in PassthroughSection::ALL {
            assert_eq!(p.bucket(section), &[vec![section.keyword().to_owned()]]);
        }
    }
}
