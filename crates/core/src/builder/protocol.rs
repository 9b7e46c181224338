use super::args::invalid;
use super::{ModelBuilder, Top, optional_number};
use crate::error::ConfigError;
use crate::grammar::dispatch::{Section, SectionRule, apply_children};
use crate::model::{ManagementTlv, SpanningTree, set_membership};

const BRIDGE_PRIORITY_STEP: u32 = 4096;

#[derive(Debug, Clone, Copy)]
enum Stp {
    Disable,
    BridgePriority,
    HelloTime,
    MaxAge,
    ForwardDelay,
}

const SPANNING_TREE: &[SectionRule<Stp>] = &[
    SectionRule::new(&["disable"], Stp::Disable).negatable(),
    SectionRule::new(&["bridge-priority"], Stp::BridgePriority).negatable(),
    SectionRule::new(&["hello-time"], Stp::HelloTime).negatable(),
    SectionRule::new(&["max-age"], Stp::MaxAge).negatable(),
    SectionRule::new(&["forward-delay"], Stp::ForwardDelay).negatable(),
];

#[derive(Debug, Clone, Copy)]
enum Lldp {
    Disable,
    AdvertiseManagementTlv,
    Hello,
}

const LLDP: &[SectionRule<Lldp>] = &[
    SectionRule::new(&["disable"], Lldp::Disable).negatable(),
    SectionRule::new(
        &["advertise", "management-tlv"],
        Lldp::AdvertiseManagementTlv,
    )
    .negatable(),
    SectionRule::new(&["hello"], Lldp::Hello).negatable(),
];

/// `protocol spanning-tree rstp|0` and its body. Negation removes the
/// instance.
pub(super) fn spanning_tree(
    sec: &Section<'_, Top>,
    slot: &mut Option<SpanningTree>,
) -> Result<(), ConfigError> {
    if sec.disable {
        if !sec.children.is_empty() {
            return Err(sec.malformed());
        }
        *slot = None;
        return Ok(());
    }
    let stp = slot.get_or_insert_with(SpanningTree::default);
    apply_children(sec.children, SPANNING_TREE, |child| match child.directive {
        // Instances start disabled; "no disable" turns one on.
        Stp::Disable => {
            child.expect_arity(1)?;
            stp.enabled = child.disable;
            Ok(())
        }
        Stp::BridgePriority => {
            optional_number(
                &child,
                2,
                "bridge priority",
                0..=61440,
                &mut stp.bridge_priority,
            )?;
            match stp.bridge_priority {
                Some(p) if p % BRIDGE_PRIORITY_STEP != 0 => {
                    Err(invalid("bridge priority", child.arg(1)?))
                }
                _ => Ok(()),
            }
        }
        Stp::HelloTime => optional_number(&child, 2, "hello time", 1..=10, &mut stp.hello_time),
        Stp::MaxAge => optional_number(&child, 2, "max age", 6..=40, &mut stp.max_age),
        Stp::ForwardDelay => {
            optional_number(&child, 2, "forward delay", 4..=30, &mut stp.forward_delay)
        }
    })
}

impl ModelBuilder {
    /// `protocol lldp` and its body. `no protocol lldp` disables LLDP and
    /// clears the advertised TLVs.
    pub(super) fn lldp(&mut self, sec: &Section<'_, Top>) -> Result<(), ConfigError> {
        sec.expect_arity(2)?;
        let lldp = &mut self.model.protocols.lldp;
        if sec.disable {
            if !sec.children.is_empty() {
                return Err(sec.malformed());
            }
            lldp.enabled = false;
            lldp.management_tlv.clear();
            return Ok(());
        }
        apply_children(sec.children, LLDP, |child| match child.directive {
            Lldp::Disable => {
                child.expect_arity(1)?;
                lldp.enabled = child.disable;
                Ok(())
            }
            Lldp::AdvertiseManagementTlv => {
                if child.arity() < 3 {
                    return Err(child.malformed());
                }
                let tlvs = child.words[2..]
                    .iter()
                    .map(|word| {
                        ManagementTlv::from_keyword(word)
                            .ok_or_else(|| invalid("management TLV", word))
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                for tlv in tlvs {
                    set_membership(&mut lldp.management_tlv, tlv, !child.disable);
                }
                Ok(())
            }
            Lldp::Hello => {
                optional_number(&child, 2, "LLDP hello interval", 5..=180, &mut lldp.hello)
            }
        })
    }
}
