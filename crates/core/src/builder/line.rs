use super::args::{invalid, parse_u32, parse_u8};
use super::{ModelBuilder, Top};
use crate::error::ConfigError;
use crate::grammar::dispatch::{Section, SectionRule, apply_children};
use crate::model::{ExecTimeout, Line, LineKind};

#[derive(Debug, Clone, Copy)]
enum LineDirective {
    PrivilegeLevel,
    ExecTimeout,
    LoginAuthentication,
    AccessClass,
}

const LINE: &[SectionRule<LineDirective>] = &[
    SectionRule::new(&["privilege", "level"], LineDirective::PrivilegeLevel).negatable(),
    SectionRule::new(&["exec-timeout"], LineDirective::ExecTimeout).negatable(),
    SectionRule::new(
        &["login", "authentication"],
        LineDirective::LoginAuthentication,
    )
    .negatable(),
    SectionRule::new(&["access-class"], LineDirective::AccessClass).negatable(),
];

impl ModelBuilder {
    /// `line console|vty N` and its body.
    pub(super) fn line(&mut self, sec: &Section<'_, Top>) -> Result<(), ConfigError> {
        sec.expect_arity(3)?;
        let kind_word = sec.arg(1)?;
        let kind = LineKind::from_keyword(kind_word).ok_or_else(|| ConfigError::Unsupported {
            what: "line type",
            value: kind_word.to_owned(),
        })?;
        let id = parse_u32("line number", sec.arg(2)?)?;

        let line = self
            .model
            .lines
            .entry(format!("{} {id}", kind.keyword()))
            .or_insert_with(|| Line::new(kind, id));
        apply_children(sec.children, LINE, |child| match child.directive {
            LineDirective::PrivilegeLevel => {
                if child.disable && child.arity() == 2 {
                    line.privilege_level = None;
                    return Ok(());
                }
                child.expect_arity(3)?;
                let level = parse_u8("privilege level", child.arg(2)?, 0..=15)?;
                line.privilege_level = (!child.disable).then_some(level);
                Ok(())
            }
            LineDirective::ExecTimeout => exec_timeout(&child, &mut line.exec_timeout),
            LineDirective::LoginAuthentication => {
                name(&child, 3, &mut line.login_authentication)
            }
            LineDirective::AccessClass => name(&child, 2, &mut line.access_class),
        })
    }
}

/// `KEYWORD... NAME` of `arity` words; negation clears it, with or without
/// the name.
fn name(
    sec: &Section<'_, LineDirective>,
    arity: usize,
    field: &mut Option<String>,
) -> Result<(), ConfigError> {
    if sec.disable {
        *field = None;
        return Ok(());
    }
    sec.expect_arity(arity)?;
    *field = Some(sec.arg(arity - 1)?.to_owned());
    Ok(())
}

/// `exec-timeout MIN [SEC]`; negation clears it.
fn exec_timeout(
    sec: &Section<'_, LineDirective>,
    field: &mut Option<ExecTimeout>,
) -> Result<(), ConfigError> {
    if sec.disable {
        *field = None;
        return Ok(());
    }
    let seconds = match sec.arity() {
        2 => 0,
        3 => parse_u32("exec-timeout seconds", sec.arg(2)?)?,
        _ => return Err(sec.malformed()),
    };
    if seconds > 59 {
        return Err(invalid("exec-timeout seconds", sec.arg(2)?));
    }
    let minutes = parse_u32("exec-timeout minutes", sec.arg(1)?)?;
    *field = Some(ExecTimeout { minutes, seconds });
    Ok(())
}
