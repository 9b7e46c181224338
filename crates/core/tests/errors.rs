//! Error propagation: fail-fast behaviour, the context chain, and
//! diagnostic conversion.

mod common;

use common::{REQUIRED, parse_err};
use f10cfg_core::{
    ConfigError, ConfigParser, LineIndex, ModelBuilder, PassthroughSection, PortRangeError,
    Profile, codes, lex, parse_str, parse_with_profile,
};

#[test]
fn chain_runs_outermost_to_innermost() {
    let err = parse_err("interface Vlan 10\n tagged GigabitEthernet 1/11-1/16\n");

    let sections: Vec<String> = err.sections().iter().map(ToString::to_string).collect();
    assert_eq!(
        sections,
        [
            "\"interface Vlan 10\"",
            "\"tagged GigabitEthernet 1/11-1/16\"",
        ]
    );
    let ConfigError::InvalidPortRange { range, source } = err.root_cause() else {
        panic!("unexpected root cause: {err:?}");
    };
    assert_eq!(range, "1/11-1/16");
    assert_eq!(*source, PortRangeError::StackUnitInRange);

    let chain = err.chain();
    assert!(chain[0].contains("interface Vlan 10"));
    assert!(chain.len() >= 3);
    assert_eq!(err.line(), Some(2));
    assert_eq!(err.code(), codes::INVALID_PORT_RANGE);
}

#[test]
fn no_partial_model_after_failed_directive() {
    let text = format!("hostname ok\ninterface GigabitEthernet 0/1\n mtu 1\n{REQUIRED}end\n");
    let mut parser = ConfigParser::new(Profile::default());
    let mut first = None;
    for line in text.lines() {
        if let Err(err) = parser.push_line(line) {
            first.get_or_insert(err);
        }
    }
    let first = first.expect("mtu 1 should be rejected");
    assert!(matches!(
        first.root_cause(),
        ConfigError::InvalidValue { what: "MTU", .. }
    ));
    let err = parser.finish().unwrap_err();
    assert!(matches!(err, ConfigError::Aborted));
    assert_eq!(err.code(), codes::PARSE_ABORTED);
}

#[test]
fn no_partial_model_after_failed_end() {
    let mut builder = ModelBuilder::new(Profile::default());
    let nodes = lex("hostname partial\nend\n".lines());
    builder.apply(&nodes[0]).unwrap();
    let err = builder.apply(&nodes[1]).unwrap_err();
    assert!(matches!(err.root_cause(), ConfigError::Incomplete { .. }));
    assert!(!builder.ended());
    assert!(matches!(builder.finish(), Err(ConfigError::Aborted)));
}

#[test]
fn later_sections_rejected_after_failure() {
    let mut builder = ModelBuilder::new(Profile::permissive());
    let nodes = lex("hostname a\nbogus directive\nhostname b\nend\n".lines());
    builder.apply(&nodes[0]).unwrap();
    assert!(builder.apply(&nodes[1]).is_err());
    for node in &nodes[2..] {
        assert!(matches!(builder.apply(node), Err(ConfigError::Aborted)));
    }
    assert!(builder.finish().is_err());
}

#[test]
fn unexpected_negation() {
    let err = parse_err("no username admin password 0 x\n");
    assert!(matches!(
        err,
        ConfigError::UnexpectedNegation { line: 1, .. }
    ));
    assert_eq!(err.code(), codes::UNEXPECTED_NEGATION);
}

#[test]
fn unexpected_children() {
    let err = parse_err("hostname sw1\n description nope\n");
    assert!(matches!(err, ConfigError::UnexpectedChildren { .. }));
}

#[test]
fn comments_are_stripped() {
    let cfg = parse_str(&format!(
        "interface GigabitEthernet 0/1 ! uplink\n description pass!word\n{REQUIRED}end\n"
    ))
    .unwrap();
    let port = cfg
        .ethernet(f10cfg_core::model::InterfaceKind::GigabitEthernet, "0/1")
        .unwrap();
    assert_eq!(port.common.description.as_deref(), Some("pass!word"));
}

#[test]
fn crlf_input() {
    let text = format!("hostname sw1\r\n{}end\r\n", REQUIRED.replace('\n', "\r\n"));
    let cfg = parse_str(&text).unwrap();
    assert_eq!(cfg.hostname.as_deref(), Some("sw1"));
}

#[test]
fn incomplete_reports_expected_and_actual() {
    let err = parse_str("hardware watchdog\nredundancy auto-synchronize off\nend\n").unwrap_err();
    let ConfigError::Incomplete {
        section,
        expected,
        actual,
    } = err.root_cause()
    else {
        panic!("unexpected error: {err:?}");
    };
    assert_eq!(*section, PassthroughSection::Redundancy);
    assert_eq!(expected, &[["redundancy", "auto-synchronize", "full"]]);
    assert_eq!(actual, &[["redundancy", "auto-synchronize", "off"]]);
}

#[test]
fn permissive_profile_skips_completeness() {
    assert!(parse_with_profile("end\n", Profile::permissive()).is_ok());
    assert!(parse_str("end\n").is_err());
}

#[test]
fn diagnostic_points_at_innermost_line() {
    let text = "interface Vlan 10\n name users\n vrrp-group 1\n  priority 300\nend\n";
    let err = parse_with_profile(text, Profile::permissive()).unwrap_err();
    let index = LineIndex::new(text);
    let diag = err.to_diagnostic(Some(&index));

    assert_eq!(diag.id, codes::INVALID_VALUE);
    assert_eq!(diag.line, Some(4));
    let span = diag.span.expect("span");
    assert_eq!(&text[span.start..span.end], "  priority 300");
    assert_eq!(
        diag.notes,
        [
            "in section \"priority 300\"",
            "in section \"vrrp-group 1\"",
            "in section \"interface Vlan 10\"",
        ]
    );
    let context = diag.context.expect("context");
    assert_eq!(context["value"], "300");
}

#[test]
fn diagnostic_without_line_index_has_no_span() {
    let err = parse_with_profile("hostname x\n", Profile::permissive()).unwrap_err();
    let diag = err.to_diagnostic(None);
    assert_eq!(diag.id, codes::TRUNCATED_CONFIG);
    assert!(diag.span.is_none());
    assert!(diag.line.is_none());
}
