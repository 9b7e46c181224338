//! Argument parsing shared by directive handlers.

use std::net::Ipv4Addr;
use std::ops::RangeInclusive;

use crate::error::ConfigError;
use crate::model::{InterfaceClass, InterfaceKey, InterfaceKind, Ipv4Cidr, MacAddress, Secret};
use crate::port_range::expand_port_range;

pub(super) fn invalid(what: &'static str, word: &str) -> ConfigError {
    ConfigError::InvalidValue {
        what,
        value: word.to_owned(),
    }
}

/// An unsigned decimal integer; signs and surrounding junk are rejected.
pub(super) fn parse_u32(what: &'static str, word: &str) -> Result<u32, ConfigError> {
    if word.is_empty() || !word.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid(what, word));
    }
    word.parse().map_err(|_| invalid(what, word))
}

pub(super) fn parse_bounded(
    what: &'static str,
    word: &str,
    range: RangeInclusive<u32>,
) -> Result<u32, ConfigError> {
    let n = parse_u32(what, word)?;
    if range.contains(&n) {
        Ok(n)
    } else {
        Err(invalid(what, word))
    }
}

pub(super) fn parse_u8(
    what: &'static str,
    word: &str,
    range: RangeInclusive<u8>,
) -> Result<u8, ConfigError> {
    let n = parse_bounded(what, word, u32::from(*range.start())..=u32::from(*range.end()))?;
    u8::try_from(n).map_err(|_| invalid(what, word))
}

pub(super) fn parse_vlan_id(word: &str) -> Result<u16, ConfigError> {
    let n = parse_bounded("VLAN id", word, 1..=4094)?;
    u16::try_from(n).map_err(|_| invalid("VLAN id", word))
}

pub(super) fn parse_ipv4(what: &'static str, word: &str) -> Result<Ipv4Addr, ConfigError> {
    word.parse().map_err(|_| invalid(what, word))
}

pub(super) fn parse_cidr(word: &str) -> Result<Ipv4Cidr, ConfigError> {
    word.parse().map_err(|()| invalid("IPv4 prefix", word))
}

pub(super) fn parse_mac(word: &str) -> Result<MacAddress, ConfigError> {
    word.parse().map_err(|()| invalid("MAC address", word))
}

pub(super) fn parse_on_off(word: &str) -> Result<bool, ConfigError> {
    match word {
        "on" => Ok(true),
        "off" => Ok(false),
        other => Err(invalid("on/off", other)),
    }
}

pub(super) fn secret(encryption: &str, value: &str) -> Secret {
    Secret {
        encryption: encryption.to_owned(),
        value: value.to_owned(),
    }
}

/// Resolve an interface keyword, reporting unknown ones as unsupported.
pub(super) fn interface_kind(word: &str) -> Result<InterfaceKind, ConfigError> {
    InterfaceKind::from_keyword(word).ok_or_else(|| ConfigError::Unsupported {
        what: "interface type",
        value: word.to_owned(),
    })
}

/// Validate and normalise an interface id for `kind`.
///
/// Ports and the management interface are `UNIT/PORT`; port-channels,
/// loopbacks and VLANs are plain numbers.
pub(super) fn interface_id(kind: InterfaceKind, id: &str) -> Result<String, ConfigError> {
    let what = "interface id";
    if kind.is_physical() || kind.class() == InterfaceClass::Management {
        let (unit, port) = id.split_once('/').ok_or_else(|| invalid(what, id))?;
        let unit = parse_u32(what, unit).map_err(|_| invalid(what, id))?;
        let port = parse_u32(what, port).map_err(|_| invalid(what, id))?;
        Ok(format!("{unit}/{port}"))
    } else if kind == InterfaceKind::Vlan {
        Ok(parse_vlan_id(id)?.to_string())
    } else {
        Ok(parse_u32(what, id)?.to_string())
    }
}

/// Expand `TYPE RANGE` into interface keys. Only ethernet-like types may be
/// listed.
pub(super) fn port_list(kind_word: &str, range: &str) -> Result<Vec<InterfaceKey>, ConfigError> {
    let kind = interface_kind(kind_word)?;
    if kind.class() != InterfaceClass::Ethernet {
        return Err(ConfigError::Unsupported {
            what: "port type",
            value: kind_word.to_owned(),
        });
    }
    let ports = expand_port_range(range).map_err(|source| ConfigError::InvalidPortRange {
        range: range.to_owned(),
        source,
    })?;
    ports
        .iter()
        .map(|port| Ok(InterfaceKey::new(kind, interface_id(kind, port)?)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_reject_signs_and_junk() {
        assert_eq!(parse_u32("n", "42").unwrap(), 42);
        for bad in ["", "+1", "-1", "1a", " 1", "99999999999"] {
            assert!(parse_u32("n", bad).is_err(), "{bad}");
        }
    }

    #[test]
    fn bounded_integers() {
        assert!(parse_bounded("mtu", "594", 594..=12000).is_ok());
        assert!(parse_bounded("mtu", "593", 594..=12000).is_err());
        assert_eq!(parse_u8("level", "15", 0..=15).unwrap(), 15);
        assert!(parse_u8("level", "16", 0..=15).is_err());
    }

    #[test]
    fn vlan_ids() {
        assert_eq!(parse_vlan_id("4094").unwrap(), 4094);
        assert!(parse_vlan_id("0").is_err());
        assert!(parse_vlan_id("4095").is_err());
    }

    #[test]
    fn interface_ids_are_normalised() {
        assert_eq!(
            interface_id(InterfaceKind::GigabitEthernet, "0/01").unwrap(),
            "0/1"
        );
        assert_eq!(interface_id(InterfaceKind::PortChannel, "007").unwrap(), "7");
        assert!(interface_id(InterfaceKind::GigabitEthernet, "1").is_err());
        assert!(interface_id(InterfaceKind::GigabitEthernet, "0/1/2").is_err());
        assert!(interface_id(InterfaceKind::PortChannel, "0/1").is_err());
    }

    #[test]
    fn port_lists_expand() {
        let ports = port_list("TenGigabitEthernet", "0/1-2,4").unwrap();
        let rendered: Vec<String> = ports.iter().map(ToString::to_string).collect();
        assert_eq!(
            rendered,
            [
                "TenGigabitEthernet 0/1",
                "TenGigabitEthernet 0/2",
                "TenGigabitEthernet 0/4",
            ]
        );
        let channels = port_list("Port-channel", "1-2").unwrap();
        assert_eq!(channels[1], InterfaceKey::new(InterfaceKind::PortChannel, "2"));
    }

    #[test]
    fn port_lists_reject_bad_types_and_ranges() {
        assert!(matches!(
            port_list("Vlan", "10"),
            Err(ConfigError::Unsupported { .. })
        ));
        assert!(matches!(
            port_list("FastEthernet", "0/1"),
            Err(ConfigError::Unsupported { .. })
        ));
        assert!(matches!(
            port_list("GigabitEthernet", "1/11-1/16"),
            Err(ConfigError::InvalidPortRange { .. })
        ));
        // A physical port without a stack unit.
        assert!(matches!(
            port_list("GigabitEthernet", "5"),
            Err(ConfigError::InvalidValue { .. })
        ));
    }
}
