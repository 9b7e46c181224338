use std::collections::BTreeMap;
use std::net::Ipv4Addr;

use serde::Serialize;

use super::value::{Ipv4Cidr, MacAddress};

/// An encrypted or plain secret: `TYPE VALUE`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Secret {
    /// Encryption type as written (`0`, `5`, `7`, ...).
    #[serde(rename = "type")]
    pub encryption: String,
    /// The secret as written.
    pub value: String,
}

/// `username NAME password TYPE SECRET [privilege N]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    /// Account name.
    pub username: String,
    /// Password.
    pub password: Secret,
    /// Privilege level, 0 to 15.
    pub privilege: Option<u8>,
}

/// `ip route DEST/LEN [Vlan VID] GATEWAY [permanent]`
///
/// Field order defines the sort order applied at `end`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Route {
    /// Destination prefix.
    pub destination: Ipv4Cidr,
    /// Next hop.
    pub gateway: Ipv4Addr,
    /// Egress VLAN, when given.
    pub vlan: Option<u16>,
    /// Survives interface down events.
    pub permanent: bool,
}

/// Global IP settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IpConfig {
    /// `ip name-server ADDR...`
    pub name_servers: Vec<Ipv4Addr>,
    /// `ip domain-name NAME`
    pub domain_name: Option<String>,
    /// `ip domain-lookup`
    pub domain_lookup: bool,
    /// `ip route ...`, in input order until `end` sorts them.
    pub routes: Vec<Route>,
}

/// A spanning tree instance (`rstp` or classic `0`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SpanningTree {
    /// Off until `no disable`.
    pub enabled: bool,
    /// `bridge-priority N`
    pub bridge_priority: Option<u32>,
    /// `hello-time N`
    pub hello_time: Option<u32>,
    /// `max-age N`
    pub max_age: Option<u32>,
    /// `forward-delay N`
    pub forward_delay: Option<u32>,
}

/// TLVs LLDP can advertise under `advertise management-tlv`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ManagementTlv {
    /// `management-address`
    ManagementAddress,
    /// `system-capabilities`
    SystemCapabilities,
    /// `system-description`
    SystemDescription,
    /// `system-name`
    SystemName,
}

impl ManagementTlv {
    /// Look up a TLV by keyword.
    pub fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "management-address" => Some(ManagementTlv::ManagementAddress),
            "system-capabilities" => Some(ManagementTlv::SystemCapabilities),
            "system-description" => Some(ManagementTlv::SystemDescription),
            "system-name" => Some(ManagementTlv::SystemName),
            _ => None,
        }
    }
}

/// `protocol lldp`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Lldp {
    /// On unless `disable` or `no protocol lldp`.
    pub enabled: bool,
    /// Advertised management TLVs.
    pub management_tlv: Vec<ManagementTlv>,
    /// `hello N`
    pub hello: Option<u32>,
}

impl Default for Lldp {
    fn default() -> Self {
        Self {
            enabled: true,
            management_tlv: Vec::new(),
            hello: None,
        }
    }
}

/// Layer-2 control protocols.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Protocols {
    /// `protocol spanning-tree rstp`
    pub rstp: Option<SpanningTree>,
    /// `protocol spanning-tree 0`
    pub stp: Option<SpanningTree>,
    /// `protocol lldp`
    pub lldp: Lldp,
}

/// `ip ssh server ...`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Ssh {
    /// `ip ssh server enable`
    pub enabled: bool,
    /// `ip ssh server version N`
    pub version: Option<u8>,
}

/// `ip telnet server enable`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Telnet {
    /// On unless negated.
    pub enabled: bool,
}

impl Default for Telnet {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// SNMP community access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SnmpAccess {
    /// Read-only.
    Ro,
    /// Read-write.
    Rw,
}

/// `snmp-server ...`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Snmp {
    /// Communities keyed by name.
    pub communities: BTreeMap<String, SnmpAccess>,
    /// `snmp-server contact WORDS`
    pub contact: Option<String>,
    /// `snmp-server location WORDS`
    pub location: Option<String>,
}

/// `ftp-server username NAME password 7 SECRET`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FtpUser {
    /// Account name.
    pub username: String,
    /// Password.
    pub password: Secret,
}

/// `ftp-server ...`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Ftp {
    /// `ftp-server enable`
    pub enabled: bool,
    /// Accounts keyed by user name.
    pub users: BTreeMap<String, FtpUser>,
}

/// `tacacs-server host ADDR [key TYPE SECRET]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TacacsHost {
    /// Server address.
    pub address: Ipv4Addr,
    /// Per-host key.
    pub key: Option<Secret>,
}

/// `tacacs-server ...`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Tacacs {
    /// Global key.
    pub key: Option<Secret>,
    /// Hosts keyed by address.
    pub hosts: BTreeMap<String, TacacsHost>,
}

/// `ntp server ADDR`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Ntp {
    /// Servers in input order.
    pub servers: Vec<Ipv4Addr>,
}

/// Management-plane servers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Servers {
    /// SSH.
    pub ssh: Ssh,
    /// Telnet.
    pub telnet: Telnet,
    /// SNMP.
    pub snmp: Snmp,
    /// FTP.
    pub ftp: Ftp,
    /// TACACS+.
    pub tacacs: Tacacs,
    /// NTP.
    pub ntp: Ntp,
}

/// Terminal line types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineKind {
    /// `line console N`
    Console,
    /// `line vty N`
    Vty,
}

impl LineKind {
    /// Look up a line kind by keyword.
    pub fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "console" => Some(LineKind::Console),
            "vty" => Some(LineKind::Vty),
            _ => None,
        }
    }

    /// The configuration keyword.
    pub fn keyword(self) -> &'static str {
        match self {
            LineKind::Console => "console",
            LineKind::Vty => "vty",
        }
    }
}

/// `exec-timeout MIN [SEC]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExecTimeout {
    /// Minutes.
    pub minutes: u32,
    /// Seconds.
    pub seconds: u32,
}

/// A console or vty line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Line {
    /// Line type.
    pub kind: LineKind,
    /// Line number.
    pub id: u32,
    /// `privilege level N`
    pub privilege_level: Option<u8>,
    /// `exec-timeout MIN [SEC]`
    pub exec_timeout: Option<ExecTimeout>,
    /// `login authentication NAME`
    pub login_authentication: Option<String>,
    /// `access-class NAME`
    pub access_class: Option<String>,
}

impl Line {
    /// Defaults for a freshly referenced line.
    pub fn new(kind: LineKind, id: u32) -> Self {
        Self {
            kind,
            id,
            privilege_level: None,
            exec_timeout: None,
            login_authentication: None,
            access_class: None,
        }
    }
}

/// Whether a route-map entry permits or denies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteMapAction {
    /// `permit`
    Permit,
    /// `deny`
    Deny,
}

/// One sequence entry of a route map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteMapRule {
    /// Permit or deny.
    pub action: RouteMapAction,
    /// `description WORDS`
    pub description: Option<String>,
    /// `match ...` clauses, each as its words after `match`.
    pub matches: Vec<Vec<String>>,
    /// `set ...` clauses, each as its words after `set`.
    pub sets: Vec<Vec<String>>,
}

impl RouteMapRule {
    /// An empty entry.
    pub fn new(action: RouteMapAction) -> Self {
        Self {
            action,
            description: None,
            matches: Vec::new(),
            sets: Vec::new(),
        }
    }
}

/// `vlt domain ID`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VltDomain {
    /// Domain id.
    pub id: u32,
    /// `peer-link port-channel N`
    pub peer_link: Option<u32>,
    /// `back-up destination ADDR`
    pub backup_destination: Option<Ipv4Addr>,
    /// `back-up destination ADDR interval N`
    pub backup_interval: Option<u32>,
    /// `primary-priority N`
    pub primary_priority: Option<u32>,
    /// `system-mac mac-address MAC`
    pub system_mac: Option<MacAddress>,
    /// `unit-id N`
    pub unit_id: Option<u32>,
    /// Unmodelled child directives, verbatim.
    pub body: Vec<Vec<String>>,
}

impl VltDomain {
    /// An empty domain.
    pub fn new(id: u32) -> Self {
        Self {
            id,
            peer_link: None,
            backup_destination: None,
            backup_interval: None,
            primary_priority: None,
            system_mac: None,
            unit_id: None,
            body: Vec::new(),
        }
    }
}
