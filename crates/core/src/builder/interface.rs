use std::collections::btree_map::Entry;
use std::net::Ipv4Addr;

use super::args::{
    interface_id, invalid, parse_bounded, parse_cidr, parse_ipv4, parse_on_off, parse_u32,
    port_list,
};
use super::{ModelBuilder, Top, flag, optional_number, rest_scalar};
use crate::error::{ConfigError, Words};
use crate::grammar::dispatch::{Section, SectionRule, apply_children};
use crate::model::{
    Aggregation, EthernetInterface, Interface, InterfaceClass, InterfaceCommon, InterfaceKey,
    InterfaceKind, Ipv4Cidr, LacpMode, PortChannel, StormControl, StormTraffic, TrafficDirection,
    set_membership,
};

/// Fields every interface type accepts.
#[derive(Debug, Clone, Copy)]
pub(super) enum CommonField {
    Description,
    Shutdown,
    IpAddress,
}

#[derive(Debug, Clone, Copy)]
enum EthernetField {
    Mtu,
    Switchport,
    FlowControl,
    StormControl,
    SpanningTree,
    Portfast,
    EdgePort,
    RateInterval,
    HelperAddress,
}

#[derive(Debug, Clone, Copy)]
enum ChannelField {
    Member,
    VltPeerLag,
    FastSwitchover,
}

#[derive(Debug, Clone, Copy)]
enum Ethernet {
    Common(CommonField),
    Field(EthernetField),
    Lacp,
    Channel(ChannelField),
}

#[derive(Debug, Clone, Copy)]
enum Lacp {
    PortChannel,
}

pub(super) const DESCRIPTION: SectionRule<CommonField> =
    SectionRule::new(&["description"], CommonField::Description).negatable();
pub(super) const SHUTDOWN: SectionRule<CommonField> =
    SectionRule::new(&["shutdown"], CommonField::Shutdown).negatable();
pub(super) const IP_ADDRESS: SectionRule<CommonField> =
    SectionRule::new(&["ip", "address"], CommonField::IpAddress).negatable();

const BASIC: &[SectionRule<CommonField>] = &[DESCRIPTION, SHUTDOWN, IP_ADDRESS];

const fn common(rule: SectionRule<CommonField>) -> SectionRule<Ethernet> {
    SectionRule {
        pattern: rule.pattern,
        negation: rule.negation,
        children: rule.children,
        directive: Ethernet::Common(rule.directive),
    }
}

const fn field(
    pattern: &'static [&'static str],
    directive: EthernetField,
) -> SectionRule<Ethernet> {
    SectionRule::new(pattern, Ethernet::Field(directive)).negatable()
}

const PHYSICAL: &[SectionRule<Ethernet>] = &[
    common(DESCRIPTION),
    common(SHUTDOWN),
    common(IP_ADDRESS),
    field(&["ip", "helper-address"], EthernetField::HelperAddress),
    field(&["mtu"], EthernetField::Mtu),
    field(&["switchport"], EthernetField::Switchport),
    SectionRule::new(&["flowcontrol"], Ethernet::Field(EthernetField::FlowControl)),
    field(&["storm-control"], EthernetField::StormControl),
    field(&["spanning-tree", "0", "portfast"], EthernetField::Portfast),
    field(&["spanning-tree", "rstp", "edge-port"], EthernetField::EdgePort),
    field(&["spanning-tree"], EthernetField::SpanningTree),
    field(&["rate-interval"], EthernetField::RateInterval),
    SectionRule::new(&["port-channel-protocol", "LACP"], Ethernet::Lacp).container(),
];

const PORT_CHANNEL: &[SectionRule<Ethernet>] = &[
    common(DESCRIPTION),
    common(SHUTDOWN),
    common(IP_ADDRESS),
    field(&["ip", "helper-address"], EthernetField::HelperAddress),
    field(&["mtu"], EthernetField::Mtu),
    field(&["switchport"], EthernetField::Switchport),
    SectionRule::new(&["flowcontrol"], Ethernet::Field(EthernetField::FlowControl)),
    field(&["storm-control"], EthernetField::StormControl),
    field(&["spanning-tree", "0", "portfast"], EthernetField::Portfast),
    field(&["spanning-tree", "rstp", "edge-port"], EthernetField::EdgePort),
    field(&["spanning-tree"], EthernetField::SpanningTree),
    field(&["rate-interval"], EthernetField::RateInterval),
    SectionRule::new(&["channel-member"], Ethernet::Channel(ChannelField::Member)).negatable(),
    SectionRule::new(
        &["vlt-peer-lag", "port-channel"],
        Ethernet::Channel(ChannelField::VltPeerLag),
    )
    .negatable(),
    SectionRule::new(
        &["lacp", "fast-switchover"],
        Ethernet::Channel(ChannelField::FastSwitchover),
    )
    .negatable(),
];

const LACP: &[SectionRule<Lacp>] = &[SectionRule::new(&["port-channel"], Lacp::PortChannel)];

impl ModelBuilder {
    /// `interface TYPE ID` and its body.
    pub(super) fn interface(
        &mut self,
        kind: InterfaceKind,
        sec: &Section<'_, Top>,
    ) -> Result<(), ConfigError> {
        sec.expect_arity(3)?;
        let id = interface_id(kind, sec.arg(2)?)?;
        match kind.class() {
            InterfaceClass::Vlan => self.vlan(&id, sec),
            InterfaceClass::Ethernet => {
                let key = InterfaceKey::new(kind, id);
                self.get_or_create(&key)?;
                let table = if kind == InterfaceKind::PortChannel {
                    PORT_CHANNEL
                } else {
                    PHYSICAL
                };
                apply_children(sec.children, table, |child| {
                    self.ethernet_directive(&key, &child)
                })
            }
            InterfaceClass::Management | InterfaceClass::Loopback => {
                let key = InterfaceKey::new(kind, id);
                self.get_or_create(&key)?;
                apply_children(sec.children, BASIC, |child| {
                    common_field(self.common_mut(&key)?, child.directive, &child)
                })
            }
        }
    }

    /// Look up an interface, creating it with defaults on first reference.
    fn get_or_create(&mut self, key: &InterfaceKey) -> Result<&mut Interface, ConfigError> {
        match self.model.interfaces.entry(key.clone()) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let iface = Interface::new(key.kind).ok_or_else(|| ConfigError::Unsupported {
                    what: "interface type",
                    value: key.kind.to_string(),
                })?;
                tracing::debug!(interface = %key, "creating interface");
                Ok(entry.insert(iface))
            }
        }
    }

    fn common_mut(&mut self, key: &InterfaceKey) -> Result<&mut InterfaceCommon, ConfigError> {
        Ok(match self.get_or_create(key)? {
            Interface::Management(common) | Interface::Loopback(common) => common,
            Interface::Ethernet(eth) => &mut eth.common,
        })
    }

    fn ethernet_mut(&mut self, key: &InterfaceKey) -> Result<&mut EthernetInterface, ConfigError> {
        match self.get_or_create(key)? {
            Interface::Ethernet(eth) => Ok(eth),
            Interface::Management(_) | Interface::Loopback(_) => Err(ConfigError::Unsupported {
                what: "ethernet setting on",
                value: key.to_string(),
            }),
        }
    }

    fn port_channel_mut(&mut self, key: &InterfaceKey) -> Result<&mut PortChannel, ConfigError> {
        self.ethernet_mut(key)?
            .port_channel
            .as_mut()
            .ok_or_else(|| ConfigError::Unsupported {
                what: "port-channel setting on",
                value: key.to_string(),
            })
    }

    fn ethernet_directive(
        &mut self,
        key: &InterfaceKey,
        sec: &Section<'_, Ethernet>,
    ) -> Result<(), ConfigError> {
        match sec.directive {
            Ethernet::Common(field) => {
                common_field(&mut self.ethernet_mut(key)?.common, field, sec)
            }
            Ethernet::Field(field) => ethernet_field(self.ethernet_mut(key)?, field, sec),
            Ethernet::Lacp => self.lacp(key, sec),
            Ethernet::Channel(field) => channel_field(self.port_channel_mut(key)?, field, sec),
        }
    }

    /// `port-channel-protocol LACP`; only the physical-port table lists it.
    fn lacp(&mut self, key: &InterfaceKey, sec: &Section<'_, Ethernet>) -> Result<(), ConfigError> {
        sec.expect_arity(2)?;
        apply_children(sec.children, LACP, |child| match child.directive {
            Lacp::PortChannel => self.lacp_member(key, &child),
        })
    }

    /// `port-channel N mode active|passive`: records the port's aggregation
    /// and registers it with Port-channel N, creating that on first use.
    fn lacp_member(
        &mut self,
        key: &InterfaceKey,
        sec: &Section<'_, Lacp>,
    ) -> Result<(), ConfigError> {
        sec.expect_arity(4)?;
        sec.expect_word(2, "mode")?;
        let channel = parse_bounded("port-channel number", sec.arg(1)?, 1..=4096)?;
        let mode = match sec.arg(3)? {
            "active" => LacpMode::Active,
            "passive" => LacpMode::Passive,
            other => return Err(invalid("LACP mode", other)),
        };

        let port = self.ethernet_mut(key)?;
        if port.aggregation.is_some() {
            return Err(ConfigError::Duplicate {
                what: "port channel",
                words: Words::from(sec.words.as_slice()),
            });
        }
        port.aggregation = Some(Aggregation {
            port_channel: channel,
            mode,
        });

        let channel_key = InterfaceKey::new(InterfaceKind::PortChannel, channel.to_string());
        let pc = self.port_channel_mut(&channel_key)?;
        set_membership(&mut pc.lacp_members, key.clone(), true);
        Ok(())
    }
}

/// `description`, `shutdown` and `ip address`, shared by every interface.
pub(super) fn common_field<D>(
    common: &mut InterfaceCommon,
    field: CommonField,
    sec: &Section<'_, D>,
) -> Result<(), ConfigError> {
    match field {
        CommonField::Description => rest_scalar(sec, 1, &mut common.description),
        CommonField::Shutdown => flag(sec, 1, &mut common.shutdown),
        CommonField::IpAddress => ip_address(sec, &mut common.ip_address),
    }
}

/// `ip address A.B.C.D/LEN`; `no ip address` clears it.
fn ip_address<D>(sec: &Section<'_, D>, field: &mut Option<Ipv4Cidr>) -> Result<(), ConfigError> {
    if sec.disable && sec.arity() <= 3 {
        *field = None;
        return Ok(());
    }
    sec.expect_arity(3)?;
    *field = Some(parse_cidr(sec.arg(2)?)?);
    Ok(())
}

/// `ip helper-address ADDR`; negation removes it.
pub(super) fn helper_address<D>(
    sec: &Section<'_, D>,
    addresses: &mut Vec<Ipv4Addr>,
) -> Result<(), ConfigError> {
    sec.expect_arity(3)?;
    let addr = parse_ipv4("helper address", sec.arg(2)?)?;
    set_membership(addresses, addr, !sec.disable);
    Ok(())
}

fn ethernet_field(
    eth: &mut EthernetInterface,
    field: EthernetField,
    sec: &Section<'_, Ethernet>,
) -> Result<(), ConfigError> {
    match field {
        EthernetField::Mtu => optional_number(sec, 2, "MTU", 594..=12000, &mut eth.mtu),
        EthernetField::Switchport => flag(sec, 1, &mut eth.switchport),
        EthernetField::FlowControl => {
            // flowcontrol rx on|off tx on|off
            sec.expect_arity(5)?;
            sec.expect_word(1, "rx")?;
            sec.expect_word(3, "tx")?;
            eth.flow_rx = parse_on_off(sec.arg(2)?)?;
            eth.flow_tx = parse_on_off(sec.arg(4)?)?;
            Ok(())
        }
        EthernetField::StormControl => storm_control(eth, sec),
        EthernetField::SpanningTree => flag(sec, 1, &mut eth.stp),
        EthernetField::Portfast => {
            // spanning-tree 0 portfast [bpduguard]
            match sec.arity() {
                3 => {}
                4 => sec.expect_word(3, "bpduguard")?,
                _ => return Err(sec.malformed()),
            }
            if sec.disable {
                eth.stp_portfast = false;
                eth.stp_bpduguard = false;
            } else {
                eth.stp_portfast = true;
                eth.stp_bpduguard = sec.arity() == 4;
            }
            Ok(())
        }
        EthernetField::EdgePort => flag(sec, 3, &mut eth.rstp_edge_port),
        EthernetField::RateInterval => {
            optional_number(sec, 2, "rate interval", 5..=299, &mut eth.rate_interval)
        }
        EthernetField::HelperAddress => helper_address(sec, &mut eth.helper_addresses),
    }
}

/// `storm-control TRAFFIC RATE in|out`. Negation removes the limit for
/// that traffic class and direction; the rate may be omitted.
fn storm_control(
    eth: &mut EthernetInterface,
    sec: &Section<'_, Ethernet>,
) -> Result<(), ConfigError> {
    let arity = sec.arity();
    if arity != 4 && !(sec.disable && arity == 3) {
        return Err(sec.malformed());
    }
    let traffic = match sec.arg(1)? {
        "broadcast" => StormTraffic::Broadcast,
        "multicast" => StormTraffic::Multicast,
        "unknown-unicast" => StormTraffic::UnknownUnicast,
        other => return Err(invalid("storm-control traffic class", other)),
    };
    let direction = match sec.arg(arity - 1)? {
        "in" => TrafficDirection::In,
        "out" => TrafficDirection::Out,
        other => return Err(invalid("traffic direction", other)),
    };

    eth.storm_control
        .retain(|sc| (sc.traffic, sc.direction) != (traffic, direction));
    if !sec.disable {
        let rate = parse_u32("storm-control rate", sec.arg(2)?)?;
        eth.storm_control.push(StormControl {
            traffic,
            rate,
            direction,
        });
    }
    Ok(())
}

fn channel_field(
    pc: &mut PortChannel,
    field: ChannelField,
    sec: &Section<'_, Ethernet>,
) -> Result<(), ConfigError> {
    match field {
        ChannelField::Member => {
            // channel-member TYPE RANGE
            sec.expect_arity(3)?;
            for port in port_list(sec.arg(1)?, sec.arg(2)?)? {
                set_membership(&mut pc.members, port, !sec.disable);
            }
            Ok(())
        }
        ChannelField::VltPeerLag => {
            optional_number(sec, 3, "port-channel number", 1..=4096, &mut pc.vlt_peer_lag)
        }
        ChannelField::FastSwitchover => flag(sec, 2, &mut pc.lacp_fast_switchover),
    }
}
