use super::args::{invalid, parse_ipv4, parse_u8, secret};
use super::{ModelBuilder, Top};
use crate::error::ConfigError;
use crate::grammar::dispatch::Section;
use crate::model::{FtpUser, SnmpAccess, TacacsHost, set_membership};

impl ModelBuilder {
    /// `ip ssh server version 1|2`; negation clears it.
    pub(super) fn ssh_version(&mut self, sec: &Section<'_, Top>) -> Result<(), ConfigError> {
        if sec.disable && sec.arity() <= 5 {
            self.model.servers.ssh.version = None;
            return Ok(());
        }
        sec.expect_arity(5)?;
        self.model.servers.ssh.version = Some(parse_u8("SSH version", sec.arg(4)?, 1..=2)?);
        Ok(())
    }

    /// `snmp-server community NAME ro|rw`; negation removes the community.
    pub(super) fn snmp_community(&mut self, sec: &Section<'_, Top>) -> Result<(), ConfigError> {
        let communities = &mut self.model.servers.snmp.communities;
        if sec.disable && sec.arity() == 3 {
            communities.remove(sec.arg(2)?);
            return Ok(());
        }
        sec.expect_arity(4)?;
        let access = match sec.arg(3)? {
            "ro" => SnmpAccess::Ro,
            "rw" => SnmpAccess::Rw,
            other => return Err(invalid("SNMP access", other)),
        };
        let name = sec.arg(2)?;
        if sec.disable {
            communities.remove(name);
        } else {
            communities.insert(name.to_owned(), access);
        }
        Ok(())
    }

    /// `ftp-server username NAME password 7 SECRET`
    pub(super) fn ftp_user(&mut self, sec: &Section<'_, Top>) -> Result<(), ConfigError> {
        sec.expect_arity(6)?;
        sec.expect_word(3, "password")?;
        sec.expect_word(4, "7")?;
        let username = sec.arg(2)?.to_owned();
        let user = FtpUser {
            username: username.clone(),
            password: secret(sec.arg(4)?, sec.arg(5)?),
        };
        self.model.servers.ftp.users.insert(username, user);
        Ok(())
    }

    /// `tacacs-server host ADDR [key TYPE SECRET]`
    pub(super) fn tacacs_host(&mut self, sec: &Section<'_, Top>) -> Result<(), ConfigError> {
        let key = match sec.arity() {
            3 => None,
            6 => {
                sec.expect_word(3, "key")?;
                Some(secret(sec.arg(4)?, sec.arg(5)?))
            }
            _ => return Err(sec.malformed()),
        };
        let address = parse_ipv4("TACACS+ host address", sec.arg(2)?)?;
        self.model
            .servers
            .tacacs
            .hosts
            .insert(address.to_string(), TacacsHost { address, key });
        Ok(())
    }

    /// `tacacs-server key TYPE SECRET`
    pub(super) fn tacacs_key(&mut self, sec: &Section<'_, Top>) -> Result<(), ConfigError> {
        sec.expect_arity(4)?;
        self.model.servers.tacacs.key = Some(secret(sec.arg(2)?, sec.arg(3)?));
        Ok(())
    }

    /// `ntp server ADDR`; negation removes it.
    pub(super) fn ntp_server(&mut self, sec: &Section<'_, Top>) -> Result<(), ConfigError> {
        sec.expect_arity(3)?;
        let server = parse_ipv4("NTP server address", sec.arg(2)?)?;
        set_membership(&mut self.model.servers.ntp.servers, server, !sec.disable);
        Ok(())
    }
}
