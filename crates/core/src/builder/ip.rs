use super::args::{parse_cidr, parse_ipv4, parse_vlan_id};
use super::{ModelBuilder, Top};
use crate::error::ConfigError;
use crate::grammar::dispatch::Section;
use crate::model::{Route, set_membership};

impl ModelBuilder {
    /// `ip route DEST/LEN [Vlan VID] GATEWAY [permanent]`
    pub(super) fn ip_route(&mut self, sec: &Section<'_, Top>) -> Result<(), ConfigError> {
        let destination = parse_cidr(sec.arg(2)?)?;

        let mut next = 3;
        let vlan = if sec.word(next) == Some("Vlan") {
            let vid = parse_vlan_id(sec.arg(next + 1)?)?;
            next += 2;
            Some(vid)
        } else {
            None
        };
        let gateway = parse_ipv4("gateway address", sec.arg(next)?)?;
        next += 1;

        let permanent = match sec.word(next) {
            None => false,
            Some("permanent") if sec.arity() == next + 1 => true,
            Some(_) => return Err(sec.malformed()),
        };

        self.model.ip.routes.push(Route {
            destination,
            gateway,
            vlan,
            permanent,
        });
        Ok(())
    }

    /// `ip domain-name NAME`; `no ip domain-name` clears it.
    pub(super) fn domain_name(&mut self, sec: &Section<'_, Top>) -> Result<(), ConfigError> {
        if sec.disable && sec.arity() <= 3 {
            self.model.ip.domain_name = None;
            return Ok(());
        }
        sec.expect_arity(3)?;
        self.model.ip.domain_name = Some(sec.arg(2)?.to_owned());
        Ok(())
    }

    /// `ip name-server ADDR...`; negation removes the listed servers.
    pub(super) fn name_server(&mut self, sec: &Section<'_, Top>) -> Result<(), ConfigError> {
        if sec.arity() < 3 {
            return Err(sec.malformed());
        }
        let servers = sec.words[2..]
            .iter()
            .map(|word| parse_ipv4("name server address", word))
            .collect::<Result<Vec<_>, _>>()?;
        for server in servers {
            set_membership(&mut self.model.ip.name_servers, server, !sec.disable);
        }
        Ok(())
    }
}
