use super::args::{parse_bounded, parse_ipv4, parse_mac, parse_u32};
use super::{ModelBuilder, Top, optional_number};
use crate::error::{ConfigError, Words};
use crate::grammar::dispatch::{Section, SectionRule, apply_children};
use crate::model::VltDomain;

#[derive(Debug, Clone, Copy)]
enum Vlt {
    PeerLink,
    BackupDestination,
    PrimaryPriority,
    SystemMac,
    UnitId,
    Body,
}

const VLT_DOMAIN: &[SectionRule<Vlt>] = &[
    SectionRule::new(&["peer-link", "port-channel"], Vlt::PeerLink).negatable(),
    SectionRule::new(&["back-up", "destination"], Vlt::BackupDestination).negatable(),
    SectionRule::new(&["primary-priority"], Vlt::PrimaryPriority).negatable(),
    SectionRule::new(&["system-mac", "mac-address"], Vlt::SystemMac).negatable(),
    SectionRule::new(&["unit-id"], Vlt::UnitId).negatable(),
    SectionRule::new(&[], Vlt::Body).negatable(),
];

impl ModelBuilder {
    /// `vlt domain ID` and its body. Only one domain may be configured.
    pub(super) fn vlt_domain(&mut self, sec: &Section<'_, Top>) -> Result<(), ConfigError> {
        sec.expect_arity(3)?;
        let id = parse_bounded("VLT domain id", sec.arg(2)?, 1..=1000)?;
        if sec.disable {
            if !sec.children.is_empty() {
                return Err(sec.malformed());
            }
            self.model.vlt = None;
            return Ok(());
        }

        let domain = self.model.vlt.get_or_insert_with(|| VltDomain::new(id));
        if domain.id != id {
            return Err(ConfigError::Duplicate {
                what: "VLT domain",
                words: Words::from(sec.words.as_slice()),
            });
        }
        apply_children(sec.children, VLT_DOMAIN, |child| match child.directive {
            Vlt::PeerLink => optional_number(
                &child,
                3,
                "port-channel number",
                1..=4096,
                &mut domain.peer_link,
            ),
            Vlt::BackupDestination => backup_destination(&child, domain),
            Vlt::PrimaryPriority => optional_number(
                &child,
                2,
                "primary priority",
                1..=65535,
                &mut domain.primary_priority,
            ),
            Vlt::SystemMac => {
                if child.disable {
                    domain.system_mac = None;
                    return Ok(());
                }
                child.expect_arity(3)?;
                domain.system_mac = Some(parse_mac(child.arg(2)?)?);
                Ok(())
            }
            Vlt::UnitId => optional_number(&child, 2, "VLT unit id", 0..=1, &mut domain.unit_id),
            Vlt::Body => {
                domain.body.push(child.verbatim());
                Ok(())
            }
        })
    }
}

/// `back-up destination ADDR [interval N]`; negation clears both.
fn backup_destination(sec: &Section<'_, Vlt>, domain: &mut VltDomain) -> Result<(), ConfigError> {
    if sec.disable {
        domain.backup_destination = None;
        domain.backup_interval = None;
        return Ok(());
    }
    let interval = match sec.arity() {
        3 => None,
        5 => {
            sec.expect_word(3, "interval")?;
            Some(parse_u32("back-up interval", sec.arg(4)?)?)
        }
        _ => return Err(sec.malformed()),
    };
    domain.backup_destination = Some(parse_ipv4("back-up destination", sec.arg(2)?)?);
    domain.backup_interval = interval;
    Ok(())
}
