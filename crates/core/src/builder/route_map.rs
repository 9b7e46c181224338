use super::args::{invalid, parse_u32};
use super::{ModelBuilder, Top, rest_scalar};
use crate::error::ConfigError;
use crate::grammar::dispatch::{Section, SectionRule, apply_children};
use crate::model::{RouteMapAction, RouteMapRule, set_membership};

const DEFAULT_SEQUENCE: u32 = 10;

#[derive(Debug, Clone, Copy)]
enum RouteMap {
    Description,
    Match,
    Set,
}

const ROUTE_MAP: &[SectionRule<RouteMap>] = &[
    SectionRule::new(&["description"], RouteMap::Description).negatable(),
    SectionRule::new(&["match"], RouteMap::Match).negatable(),
    SectionRule::new(&["set"], RouteMap::Set).negatable(),
];

impl ModelBuilder {
    /// `route-map NAME [permit|deny] [SEQ]` and its body.
    ///
    /// `no route-map NAME` drops the whole map; with an action and sequence
    /// it drops only that entry.
    pub(super) fn route_map(&mut self, sec: &Section<'_, Top>) -> Result<(), ConfigError> {
        if !(2..=4).contains(&sec.arity()) {
            return Err(sec.malformed());
        }
        let name = sec.arg(1)?.to_owned();
        let action = match sec.word(2) {
            None | Some("permit") => RouteMapAction::Permit,
            Some("deny") => RouteMapAction::Deny,
            Some(other) => return Err(invalid("route-map action", other)),
        };
        let sequence = match sec.word(3) {
            Some(word) => parse_u32("route-map sequence", word)?,
            None => DEFAULT_SEQUENCE,
        };

        if sec.disable {
            if !sec.children.is_empty() {
                return Err(sec.malformed());
            }
            if sec.arity() == 2 {
                self.model.route_maps.remove(&name);
            } else if let Some(map) = self.model.route_maps.get_mut(&name) {
                map.remove(&sequence);
                if map.is_empty() {
                    self.model.route_maps.remove(&name);
                }
            }
            return Ok(());
        }

        let rule = self
            .model
            .route_maps
            .entry(name)
            .or_default()
            .entry(sequence)
            .or_insert_with(|| RouteMapRule::new(action));
        // Re-entering an entry may flip its action.
        rule.action = action;
        apply_children(sec.children, ROUTE_MAP, |child| match child.directive {
            RouteMap::Description => rest_scalar(&child, 1, &mut rule.description),
            RouteMap::Match => clause(&child, &mut rule.matches),
            RouteMap::Set => clause(&child, &mut rule.sets),
        })
    }
}

/// `match|set WORDS...`, stored as the words after the keyword. Negation
/// removes an identical clause.
fn clause(sec: &Section<'_, RouteMap>, clauses: &mut Vec<Vec<String>>) -> Result<(), ConfigError> {
    if sec.arity() < 2 {
        return Err(sec.malformed());
    }
    set_membership(clauses, sec.words[1..].to_vec(), !sec.disable);
    Ok(())
}
