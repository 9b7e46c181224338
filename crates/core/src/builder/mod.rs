//! Builds a [`SwitchConfig`] from top-level parse nodes.
//!
//! Each nesting context has its own directive table. A table is matched by
//! [`dispatch::apply`](crate::grammar::dispatch::apply), and the matched
//! rule's directive is handled by an exhaustive `match`, so a table entry
//! without a handler does not compile.

mod args;
mod auth;
mod interface;
mod ip;
mod line;
mod protocol;
mod route_map;
mod server;
mod vlan;
mod vlt;

use f10cfg_profile::{PassthroughSection, Profile};

use crate::error::{ConfigError, Words};
use crate::grammar::dispatch::{self, Section, SectionRule};
use crate::grammar::lexer::ParseNode;
use crate::model::{EthernetInterface, Interface, InterfaceKind, SwitchConfig};

#[derive(Debug, Clone, Copy)]
enum Top {
    Passthrough(PassthroughSection),
    Hostname,
    ReloadType,
    EnableSecret,
    Username,
    Interface(InterfaceKind),
    InterfaceOther,
    TelnetServer,
    SshServerEnable,
    SshServerVersion,
    IpRoute,
    DomainName,
    DomainLookup,
    NameServer,
    SnmpContact,
    SnmpLocation,
    SnmpCommunity,
    FtpUser,
    FtpServer,
    TacacsHost,
    TacacsKey,
    NtpServer,
    Lldp,
    Rstp,
    Stp,
    ProtocolOther,
    RouteMap,
    VltDomain,
    Line,
    End,
}

const fn passthrough_rule(
    pattern: &'static [&'static str],
    section: PassthroughSection,
) -> SectionRule<Top> {
    SectionRule::new(pattern, Top::Passthrough(section)).negatable()
}

const fn interface_rule(pattern: &'static [&'static str], kind: InterfaceKind) -> SectionRule<Top> {
    SectionRule::new(pattern, Top::Interface(kind)).container()
}

const TOP_LEVEL: &[SectionRule<Top>] = &[
    passthrough_rule(&["boot"], PassthroughSection::Boot),
    passthrough_rule(&["redundancy"], PassthroughSection::Redundancy),
    passthrough_rule(&["hardware"], PassthroughSection::Hardware),
    passthrough_rule(&["stack-unit"], PassthroughSection::StackUnit),
    passthrough_rule(&["logging"], PassthroughSection::Logging),
    passthrough_rule(&["service"], PassthroughSection::Service),
    passthrough_rule(&["aaa"], PassthroughSection::Aaa),
    passthrough_rule(&["eula-consent"], PassthroughSection::EulaConsent),
    SectionRule::new(&["hostname"], Top::Hostname).negatable(),
    SectionRule::new(&["reload-type"], Top::ReloadType).negatable(),
    SectionRule::new(&["enable"], Top::EnableSecret),
    SectionRule::new(&["username"], Top::Username),
    interface_rule(&["interface", "Vlan"], InterfaceKind::Vlan),
    interface_rule(&["interface", "ManagementEthernet"], InterfaceKind::ManagementEthernet),
    interface_rule(&["interface", "Loopback"], InterfaceKind::Loopback),
    interface_rule(&["interface", "GigabitEthernet"], InterfaceKind::GigabitEthernet),
    interface_rule(&["interface", "TenGigabitEthernet"], InterfaceKind::TenGigabitEthernet),
    interface_rule(&["interface", "fortyGigE"], InterfaceKind::FortyGigE),
    interface_rule(&["interface", "hundredGigE"], InterfaceKind::HundredGigE),
    interface_rule(&["interface", "Port-channel"], InterfaceKind::PortChannel),
    SectionRule::new(&["interface"], Top::InterfaceOther).container(),
    SectionRule::new(&["ip", "telnet", "server", "enable"], Top::TelnetServer).negatable(),
    SectionRule::new(&["ip", "ssh", "server", "enable"], Top::SshServerEnable).negatable(),
    SectionRule::new(&["ip", "ssh", "server", "version"], Top::SshServerVersion).negatable(),
    SectionRule::new(&["ip", "route"], Top::IpRoute),
    SectionRule::new(&["ip", "domain-name"], Top::DomainName).negatable(),
    SectionRule::new(&["ip", "domain-lookup"], Top::DomainLookup).negatable(),
    SectionRule::new(&["ip", "name-server"], Top::NameServer).negatable(),
    SectionRule::new(&["snmp-server", "contact"], Top::SnmpContact).negatable(),
    SectionRule::new(&["snmp-server", "location"], Top::SnmpLocation).negatable(),
    SectionRule::new(&["snmp-server", "community"], Top::SnmpCommunity).negatable(),
    SectionRule::new(&["ftp-server", "username"], Top::FtpUser),
    SectionRule::new(&["ftp-server", "enable"], Top::FtpServer).negatable(),
    SectionRule::new(&["tacacs-server", "host"], Top::TacacsHost),
    SectionRule::new(&["tacacs-server", "key"], Top::TacacsKey),
    SectionRule::new(&["ntp", "server"], Top::NtpServer).negatable(),
    SectionRule::new(&["protocol", "lldp"], Top::Lldp)
        .negatable()
        .container(),
    SectionRule::new(&["protocol", "spanning-tree", "rstp"], Top::Rstp)
        .negatable()
        .container(),
    SectionRule::new(&["protocol", "spanning-tree", "0"], Top::Stp)
        .negatable()
        .container(),
    SectionRule::new(&["protocol"], Top::ProtocolOther)
        .negatable()
        .container(),
    SectionRule::new(&["route-map"], Top::RouteMap)
        .negatable()
        .container(),
    SectionRule::new(&["vlt", "domain"], Top::VltDomain)
        .negatable()
        .container(),
    SectionRule::new(&["line"], Top::Line).container(),
    SectionRule::new(&["end"], Top::End),
];

/// Applies top-level sections to a model, one at a time.
///
/// The builder starts with VLAN 1 seeded. Once `end` has been applied the
/// model is finalised and every further section is rejected.
///
/// The first error is latched: every later [`apply`](Self::apply) and
/// [`finish`](Self::finish) returns [`ConfigError::Aborted`].
#[derive(Debug)]
pub struct ModelBuilder {
    model: SwitchConfig,
    ended: bool,
    failed: bool,
    profile: Profile,
}

impl ModelBuilder {
    /// Create a builder whose completeness checks come from `profile`.
    pub fn new(profile: Profile) -> Self {
        Self {
            model: SwitchConfig::default(),
            ended: false,
            failed: false,
            profile,
        }
    }

    /// Whether `end` has been applied and the model passed its checks.
    pub fn ended(&self) -> bool {
        self.ended
    }

    /// Whether an earlier section failed.
    pub fn failed(&self) -> bool {
        self.failed
    }

    /// Apply one top-level section.
    pub fn apply(&mut self, node: &ParseNode) -> Result<(), ConfigError> {
        if self.failed {
            return Err(ConfigError::Aborted);
        }
        let result = if self.ended {
            Err(ConfigError::AfterEnd {
                words: Words::from(node.words.as_slice()),
                line: node.line,
            })
        } else {
            tracing::debug!(line = node.line, words = ?node.words, "dispatching section");
            dispatch::apply(node, TOP_LEVEL, |sec| self.top_level(sec))
        };
        if let Err(err) = &result {
            tracing::debug!(line = node.line, error = %err, "section failed, builder latched");
            self.failed = true;
        }
        result
    }

    /// Return the finished model.
    ///
    /// Fails with [`ConfigError::Aborted`] after any earlier error, and with
    /// [`ConfigError::Truncated`] if `end` was never applied.
    pub fn finish(self) -> Result<SwitchConfig, ConfigError> {
        if self.failed {
            Err(ConfigError::Aborted)
        } else if self.ended {
            Ok(self.model)
        } else {
            Err(ConfigError::Truncated)
        }
    }

    fn top_level(&mut self, sec: Section<'_, Top>) -> Result<(), ConfigError> {
        match sec.directive {
            Top::Passthrough(section) => {
                self.model.passthrough.bucket_mut(section).push(sec.verbatim());
                Ok(())
            }
            Top::Hostname => scalar(&sec, &mut self.model.hostname),
            Top::ReloadType => scalar(&sec, &mut self.model.reload_type),
            Top::EnableSecret => self.enable_secret(&sec),
            Top::Username => self.username(&sec),
            Top::Interface(kind) => self.interface(kind, &sec),
            Top::InterfaceOther => Err(ConfigError::Unsupported {
                what: "interface type",
                value: sec.word(1).unwrap_or_default().to_owned(),
            }),
            Top::TelnetServer => flag(&sec, 4, &mut self.model.servers.telnet.enabled),
            Top::SshServerEnable => flag(&sec, 4, &mut self.model.servers.ssh.enabled),
            Top::SshServerVersion => self.ssh_version(&sec),
            Top::IpRoute => self.ip_route(&sec),
            Top::DomainName => self.domain_name(&sec),
            Top::DomainLookup => flag(&sec, 2, &mut self.model.ip.domain_lookup),
            Top::NameServer => self.name_server(&sec),
            Top::SnmpContact => rest_scalar(&sec, 2, &mut self.model.servers.snmp.contact),
            Top::SnmpLocation => rest_scalar(&sec, 2, &mut self.model.servers.snmp.location),
            Top::SnmpCommunity => self.snmp_community(&sec),
            Top::FtpUser => self.ftp_user(&sec),
            Top::FtpServer => flag(&sec, 2, &mut self.model.servers.ftp.enabled),
            Top::TacacsHost => self.tacacs_host(&sec),
            Top::TacacsKey => self.tacacs_key(&sec),
            Top::NtpServer => self.ntp_server(&sec),
            Top::Lldp => self.lldp(&sec),
            Top::Rstp => {
                sec.expect_arity(3)?;
                protocol::spanning_tree(&sec, &mut self.model.protocols.rstp)
            }
            Top::Stp => {
                sec.expect_arity(3)?;
                protocol::spanning_tree(&sec, &mut self.model.protocols.stp)
            }
            Top::ProtocolOther => Err(ConfigError::Unsupported {
                what: "protocol",
                value: sec.rest(1).unwrap_or_default(),
            }),
            Top::RouteMap => self.route_map(&sec),
            Top::VltDomain => self.vlt_domain(&sec),
            Top::Line => self.line(&sec),
            Top::End => {
                sec.expect_arity(1)?;
                self.finalize()?;
                self.ended = true;
                Ok(())
            }
        }
    }

    /// Sort collections for deterministic output, then run the profile's
    /// completeness checks.
    fn finalize(&mut self) -> Result<(), ConfigError> {
        let model = &mut self.model;
        model.ip.name_servers.sort();
        model.ip.routes.sort();
        model.servers.ntp.servers.sort();
        for vlan in model.vlans.values_mut() {
            vlan.tagged_ports.sort();
            vlan.untagged_ports.sort();
        }
        for iface in model.interfaces.values_mut() {
            if let Interface::Ethernet(EthernetInterface {
                port_channel: Some(pc),
                ..
            }) = iface
            {
                pc.members.sort();
                pc.lacp_members.sort();
            }
        }
        tracing::debug!(
            interfaces = model.interfaces.len(),
            vlans = model.vlans.len(),
            profile = %self.profile.id,
            "finalizing model"
        );

        for (section, expected) in &self.profile.expected_sections {
            let actual = model.passthrough.bucket(*section);
            if !same_directives(actual, expected) {
                return Err(ConfigError::Incomplete {
                    section: *section,
                    expected: expected.clone(),
                    actual: actual.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Order-insensitive comparison of two directive lists.
fn same_directives(actual: &[Vec<String>], expected: &[Vec<String>]) -> bool {
    let mut actual = actual.to_vec();
    let mut expected = expected.to_vec();
    actual.sort();
    expected.sort();
    actual == expected
}

/// `KEYWORD VALUE`; negation clears the field, with or without the value.
fn scalar<D>(sec: &Section<'_, D>, field: &mut Option<String>) -> Result<(), ConfigError> {
    if sec.disable && sec.arity() <= 2 {
        *field = None;
        return Ok(());
    }
    sec.expect_arity(2)?;
    *field = Some(sec.arg(1)?.to_owned());
    Ok(())
}

/// `KEYWORD... WORDS...`: everything from `start` onwards; negation clears
/// the field and ignores any trailing words.
fn rest_scalar<D>(
    sec: &Section<'_, D>,
    start: usize,
    field: &mut Option<String>,
) -> Result<(), ConfigError> {
    if sec.disable {
        *field = None;
        return Ok(());
    }
    *field = Some(sec.rest(start).ok_or_else(|| sec.malformed())?);
    Ok(())
}

/// A bare keyword sequence of `arity` words; the value is `!disable`.
fn flag<D>(sec: &Section<'_, D>, arity: usize, field: &mut bool) -> Result<(), ConfigError> {
    sec.expect_arity(arity)?;
    *field = !sec.disable;
    Ok(())
}

/// An optional numeric setting `KEYWORD... N` of `arity` words; negation
/// clears it and may omit the value.
fn optional_number<D>(
    sec: &Section<'_, D>,
    arity: usize,
    what: &'static str,
    range: std::ops::RangeInclusive<u32>,
    field: &mut Option<u32>,
) -> Result<(), ConfigError> {
    if sec.disable && sec.arity() == arity - 1 {
        *field = None;
        return Ok(());
    }
    sec.expect_arity(arity)?;
    let value = args::parse_bounded(what, sec.arg(arity - 1)?, range)?;
    *field = (!sec.disable).then_some(value);
    Ok(())
}
