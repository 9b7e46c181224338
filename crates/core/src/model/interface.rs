use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::net::Ipv4Addr;

use serde::{Serialize, Serializer};

use super::value::Ipv4Cidr;

/// Interface types named after their configuration keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum InterfaceKind {
    /// `ManagementEthernet`
    ManagementEthernet,
    /// `Loopback`
    Loopback,
    /// `GigabitEthernet`
    GigabitEthernet,
    /// `TenGigabitEthernet`
    TenGigabitEthernet,
    /// `fortyGigE`
    #[serde(rename = "fortyGigE")]
    FortyGigE,
    /// `hundredGigE`
    #[serde(rename = "hundredGigE")]
    HundredGigE,
    /// `Port-channel`
    #[serde(rename = "Port-channel")]
    PortChannel,
    /// `Vlan`
    Vlan,
}

/// How an interface kind is modelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterfaceClass {
    /// Out-of-band management port.
    Management,
    /// Software loopback.
    Loopback,
    /// Physical port or port-channel.
    Ethernet,
    /// VLAN interface.
    Vlan,
}

impl InterfaceKind {
    /// Every interface kind, in sort order.
    pub const ALL: [InterfaceKind; 8] = [
        InterfaceKind::ManagementEthernet,
        InterfaceKind::Loopback,
        InterfaceKind::GigabitEthernet,
        InterfaceKind::TenGigabitEthernet,
        InterfaceKind::FortyGigE,
        InterfaceKind::HundredGigE,
        InterfaceKind::PortChannel,
        InterfaceKind::Vlan,
    ];

    /// The configuration keyword.
    pub fn keyword(self) -> &'static str {
        match self {
            InterfaceKind::ManagementEthernet => "ManagementEthernet",
            InterfaceKind::Loopback => "Loopback",
            InterfaceKind::GigabitEthernet => "GigabitEthernet",
            InterfaceKind::TenGigabitEthernet => "TenGigabitEthernet",
            InterfaceKind::FortyGigE => "fortyGigE",
            InterfaceKind::HundredGigE => "hundredGigE",
            InterfaceKind::PortChannel => "Port-channel",
            InterfaceKind::Vlan => "Vlan",
        }
    }

    /// Look up a kind by its exact keyword.
    pub fn from_keyword(word: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.keyword() == word)
    }

    /// How this kind is modelled.
    pub fn class(self) -> InterfaceClass {
        match self {
            InterfaceKind::ManagementEthernet => InterfaceClass::Management,
            InterfaceKind::Loopback => InterfaceClass::Loopback,
            InterfaceKind::GigabitEthernet
            | InterfaceKind::TenGigabitEthernet
            | InterfaceKind::FortyGigE
            | InterfaceKind::HundredGigE
            | InterfaceKind::PortChannel => InterfaceClass::Ethernet,
            InterfaceKind::Vlan => InterfaceClass::Vlan,
        }
    }

    /// Physical media, i.e. ports that may join a port-channel.
    pub fn is_physical(self) -> bool {
        self.class() == InterfaceClass::Ethernet && self != InterfaceKind::PortChannel
    }
}

impl fmt::Display for InterfaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Identifies one interface, e.g. `GigabitEthernet 0/1`.
///
/// Keys order by kind, then by the numeric components of the id, so
/// `0/2` sorts before `0/10`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InterfaceKey {
    /// Interface type.
    pub kind: InterfaceKind,
    /// Port or id as written, e.g. `0/1` or `2`.
    pub id: String,
}

impl InterfaceKey {
    /// Create a key.
    pub fn new(kind: InterfaceKind, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
        }
    }

    fn natural_id(&self) -> Vec<(u64, &str)> {
        self.id
            .split(['/', ':'])
            .map(|part| (part.parse::<u64>().unwrap_or(u64::MAX), part))
            .collect()
    }
}

impl Ord for InterfaceKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.kind
            .cmp(&other.kind)
            .then_with(|| self.natural_id().cmp(&other.natural_id()))
    }
}

impl PartialOrd for InterfaceKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for InterfaceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.id)
    }
}

impl Serialize for InterfaceKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Fields every interface carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterfaceCommon {
    /// `description WORDS`
    pub description: Option<String>,
    /// Administratively down; `no shutdown` clears it.
    pub shutdown: bool,
    /// `ip address A.B.C.D/LEN`
    pub ip_address: Option<Ipv4Cidr>,
}

impl Default for InterfaceCommon {
    fn default() -> Self {
        Self {
            description: None,
            shutdown: true,
            ip_address: None,
        }
    }
}

/// Storm-control traffic classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StormTraffic {
    /// `broadcast`
    Broadcast,
    /// `multicast`
    Multicast,
    /// `unknown-unicast`
    UnknownUnicast,
}

/// Traffic direction for storm control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrafficDirection {
    /// `in`
    In,
    /// `out`
    Out,
}

/// `storm-control TRAFFIC RATE DIRECTION`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StormControl {
    /// Traffic class.
    pub traffic: StormTraffic,
    /// Rate limit as written.
    pub rate: u32,
    /// Direction.
    pub direction: TrafficDirection,
}

/// LACP negotiation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LacpMode {
    /// Initiates negotiation.
    Active,
    /// Waits for the peer.
    Passive,
}

/// A physical port's membership in an LACP port-channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Aggregation {
    /// Port-channel number.
    pub port_channel: u32,
    /// Negotiation mode.
    pub mode: LacpMode,
}

/// Data only a port-channel carries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PortChannel {
    /// Static members from `channel-member`.
    pub members: Vec<InterfaceKey>,
    /// Ports that joined through `port-channel-protocol LACP`.
    pub lacp_members: Vec<InterfaceKey>,
    /// `vlt-peer-lag port-channel N`
    pub vlt_peer_lag: Option<u32>,
    /// `lacp fast-switchover`
    pub lacp_fast_switchover: bool,
}

/// A physical port or a port-channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EthernetInterface {
    /// Shared fields.
    #[serde(flatten)]
    pub common: InterfaceCommon,
    /// `mtu N`
    pub mtu: Option<u32>,
    /// Layer-2 mode.
    pub switchport: bool,
    /// `flowcontrol rx on`
    pub flow_rx: bool,
    /// `flowcontrol tx on`
    pub flow_tx: bool,
    /// Storm-control limits, one per traffic class and direction.
    pub storm_control: Vec<StormControl>,
    /// Spanning tree participation; `no spanning-tree` clears it.
    pub stp: bool,
    /// `spanning-tree 0 portfast`
    pub stp_portfast: bool,
    /// `spanning-tree 0 portfast bpduguard`
    pub stp_bpduguard: bool,
    /// `spanning-tree rstp edge-port`
    pub rstp_edge_port: bool,
    /// `rate-interval N`
    pub rate_interval: Option<u32>,
    /// `ip helper-address ADDR`
    pub helper_addresses: Vec<Ipv4Addr>,
    /// LACP membership of a physical port.
    pub aggregation: Option<Aggregation>,
    /// Present exactly when the interface is a port-channel.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port_channel: Option<PortChannel>,
}

impl EthernetInterface {
    /// Defaults for a freshly referenced port of `kind`.
    pub fn new(kind: InterfaceKind) -> Self {
        Self {
            common: InterfaceCommon::default(),
            mtu: None,
            switchport: false,
            flow_rx: false,
            flow_tx: false,
            storm_control: Vec::new(),
            stp: true,
            stp_portfast: false,
            stp_bpduguard: false,
            rstp_edge_port: false,
            rate_interval: None,
            helper_addresses: Vec::new(),
            aggregation: None,
            port_channel: (kind == InterfaceKind::PortChannel).then(PortChannel::default),
        }
    }
}

/// Any interface other than a VLAN.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "class", rename_all = "snake_case")]
pub enum Interface {
    /// `ManagementEthernet`
    Management(InterfaceCommon),
    /// `Loopback`
    Loopback(InterfaceCommon),
    /// Physical ports and port-channels.
    Ethernet(EthernetInterface),
}

impl Interface {
    /// Defaults for a freshly referenced interface, or `None` for VLANs,
    /// which live in their own map.
    pub fn new(kind: InterfaceKind) -> Option<Self> {
        match kind.class() {
            InterfaceClass::Management => Some(Interface::Management(InterfaceCommon::default())),
            InterfaceClass::Loopback => Some(Interface::Loopback(InterfaceCommon::default())),
            InterfaceClass::Ethernet => Some(Interface::Ethernet(EthernetInterface::new(kind))),
            InterfaceClass::Vlan => None,
        }
    }

    /// Shared fields.
    pub fn common(&self) -> &InterfaceCommon {
        match self {
            Interface::Management(common) | Interface::Loopback(common) => common,
            Interface::Ethernet(eth) => &eth.common,
        }
    }
}

/// A VRRP group inside a VLAN.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VrrpGroup {
    /// Group id.
    pub id: u8,
    /// `description WORDS`
    pub description: Option<String>,
    /// `virtual-address ADDR`
    pub virtual_addresses: Vec<Ipv4Addr>,
    /// `priority N`
    pub priority: Option<u32>,
    /// `preempt`, on unless negated.
    pub preempt: bool,
    /// `advertise-interval N`
    pub advertise_interval: Option<u32>,
}

impl VrrpGroup {
    /// Defaults for a new group.
    pub fn new(id: u8) -> Self {
        Self {
            id,
            description: None,
            virtual_addresses: Vec::new(),
            priority: None,
            preempt: true,
            advertise_interval: None,
        }
    }
}

/// A VLAN and its interface settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Vlan {
    /// VLAN id, 1 to 4094.
    pub id: u16,
    /// `name WORDS`
    pub name: Option<String>,
    /// Shared interface fields.
    #[serde(flatten)]
    pub common: InterfaceCommon,
    /// `mtu N`
    pub mtu: Option<u32>,
    /// Ports carrying this VLAN tagged.
    pub tagged_ports: Vec<InterfaceKey>,
    /// Ports carrying this VLAN untagged.
    pub untagged_ports: Vec<InterfaceKey>,
    /// `ip helper-address ADDR`
    pub helper_addresses: Vec<Ipv4Addr>,
    /// VRRP groups keyed by id.
    pub vrrp_groups: BTreeMap<u8, VrrpGroup>,
}

impl Vlan {
    /// Defaults for a freshly referenced VLAN.
    pub fn new(id: u16) -> Self {
        Self {
            id,
            name: None,
            common: InterfaceCommon::default(),
            mtu: None,
            tagged_ports: Vec::new(),
            untagged_ports: Vec::new(),
            helper_addresses: Vec::new(),
            vrrp_groups: BTreeMap::new(),
        }
    }
}
