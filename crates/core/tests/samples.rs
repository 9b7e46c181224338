//! Sample-based integration tests: parse the realistic configurations under
//! `samples/` and spot-check the resulting models.

mod common;

use std::fs;
use std::io::{BufRead, BufReader};

use f10cfg_core::model::InterfaceKind;
use f10cfg_core::{Profile, parse_str, read_config};

fn sample(name: &str) -> String {
    let path = common::samples_dir().join(name);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("failed to read {}: {e}", path.display()))
}

#[test]
fn every_sample_parses() {
    let mut seen = 0;
    for entry in fs::read_dir(common::samples_dir()).expect("samples") {
        let path = entry.unwrap().path();
        if path.extension().and_then(|s| s.to_str()) != Some("conf") {
            continue;
        }
        let input = fs::read_to_string(&path).expect("read sample");
        if let Err(err) = parse_str(&input) {
            panic!("{} rejected: {:#?}", path.display(), err.chain());
        }
        seen += 1;
    }
    assert!(seen >= 3, "expected at least three samples, found {seen}");
}

#[test]
fn streamed_and_batch_parses_agree() {
    let text = sample("s4810-leaf.conf");
    let path = common::samples_dir().join("s4810-leaf.conf");
    let reader = BufReader::new(fs::File::open(path).expect("open sample"));
    let streamed = read_config(reader.lines(), Profile::default()).unwrap();
    assert_eq!(streamed, parse_str(&text).unwrap());
}

#[test]
fn leaf_sample_model() {
    let cfg = parse_str(&sample("s4810-leaf.conf")).unwrap();
    assert_eq!(cfg.hostname.as_deref(), Some("leaf-a1"));

    let uplinks = cfg.port_channel(10).unwrap();
    let pc = uplinks.port_channel.as_ref().unwrap();
    assert_eq!(pc.lacp_members.len(), 2);
    assert_eq!(pc.vlt_peer_lag, Some(10));
    assert_eq!(uplinks.rate_interval, Some(30));

    let vlan = &cfg.vlans[&100];
    assert_eq!(vlan.tagged_ports.len(), 3);
    assert_eq!(vlan.vrrp_groups[&100].priority, Some(120));
    assert!(cfg.vlans.contains_key(&1));

    let vlt = cfg.vlt.as_ref().unwrap();
    assert_eq!(vlt.peer_link, Some(128));
    assert_eq!(vlt.body, [["delay-restore", "300"]]);

    assert!(
        cfg.ethernet(InterfaceKind::TenGigabitEthernet, "0/2")
            .unwrap()
            .common
            .shutdown
    );
    assert_eq!(cfg.ip.routes[0].destination.to_string(), "0.0.0.0/0");
    assert_eq!(cfg.lines.len(), 3);
    assert_eq!(cfg.passthrough.boot.len(), 2);
}

#[test]
fn access_sample_model() {
    let cfg = parse_str(&sample("s60-access.conf")).unwrap();
    let stp = cfg.protocols.stp.as_ref().unwrap();
    assert!(stp.enabled);
    assert_eq!(stp.bridge_priority, Some(32768));
    assert!(cfg.protocols.rstp.is_none());

    let desk = cfg.ethernet(InterfaceKind::GigabitEthernet, "0/1").unwrap();
    assert!(desk.stp_portfast && desk.stp_bpduguard);
    assert!(
        !cfg.ethernet(InterfaceKind::GigabitEthernet, "0/3")
            .unwrap()
            .stp
    );

    assert_eq!(cfg.vlans[&30].untagged_ports.len(), 2);
    assert_eq!(cfg.servers.snmp.communities.len(), 1);
    assert_eq!(cfg.servers.tacacs.hosts.len(), 2);
    assert!(cfg.port_channel(1).unwrap().port_channel.as_ref().unwrap().lacp_fast_switchover);
}
