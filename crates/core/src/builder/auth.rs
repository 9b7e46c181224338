use super::ModelBuilder;
use super::Top;
use super::args::{parse_u8, secret};
use crate::error::ConfigError;
use crate::grammar::dispatch::Section;
use crate::model::User;

impl ModelBuilder {
    /// `enable secret TYPE VALUE`
    pub(super) fn enable_secret(&mut self, sec: &Section<'_, Top>) -> Result<(), ConfigError> {
        sec.expect_arity(4)?;
        sec.expect_word(1, "secret")?;
        self.model.enable = Some(secret(sec.arg(2)?, sec.arg(3)?));
        Ok(())
    }

    /// `username NAME password TYPE SECRET [privilege N]`
    pub(super) fn username(&mut self, sec: &Section<'_, Top>) -> Result<(), ConfigError> {
        if sec.arity() != 5 && sec.arity() != 7 {
            return Err(sec.malformed());
        }
        sec.expect_word(2, "password")?;
        let privilege = if sec.arity() == 7 {
            sec.expect_word(5, "privilege")?;
            Some(parse_u8("privilege level", sec.arg(6)?, 0..=15)?)
        } else {
            None
        };

        let username = sec.arg(1)?.to_owned();
        let user = User {
            username: username.clone(),
            password: secret(sec.arg(3)?, sec.arg(4)?),
            privilege,
        };
        self.model.users.insert(username, user);
        Ok(())
    }
}
