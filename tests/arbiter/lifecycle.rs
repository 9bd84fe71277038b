use std::fs;

use skill_arbiter::audit::Category;
use skill_arbiter::error::TransitionError;
use skill_arbiter::lifecycle::QuarantineOutcome;
use skill_arbiter::skills::SkillStatus;

use super::workspace_harness::TestWorkspace;

#[test]
fn quarantine_twice_is_not_an_error() {
    let ws = TestWorkspace::new();
    ws.add_skill("weather", "main.py", "import requests\n");
    let mut manager = ws.manager();

    assert_eq!(
        manager.quarantine("weather").expect("first quarantine"),
        QuarantineOutcome::Quarantined
    );
    assert_eq!(
        manager.quarantine("weather").expect("second quarantine"),
        QuarantineOutcome::AlreadyQuarantined
    );
    assert!(manager.active_skills().is_empty());
    assert_eq!(manager.quarantined_skills()[0].name, "weather");
}

#[test]
fn unquarantine_refuses_when_active_copy_exists() {
    let ws = TestWorkspace::new();
    ws.add_skill("weather", "main.py", "import requests\n");
    let mut manager = ws.manager();
    manager.quarantine("weather").expect("quarantine");
    ws.add_skill("weather", "main.py", "print('reinstalled')\n");

    let err = manager.unquarantine("weather").expect_err("collision");
    assert!(matches!(err, TransitionError::Collision { .. }));
    assert!(ws.skill_dir(".quarantined-weather").join("main.py").is_file());
    assert_eq!(
        fs::read_to_string(ws.skill_dir("weather").join("main.py")).expect("active copy"),
        "print('reinstalled')\n"
    );
}

#[test]
fn revoke_twice_overwrites_vault_entry() {
    let ws = TestWorkspace::new();
    ws.add_skill("fetcher", "v1.py", "import requests\n");
    let mut manager = ws.manager();

    let first = manager.revoke("fetcher").expect("first revoke");
    assert_eq!(first.record.permissions[&Category::Network], 1);
    assert!(first.backup_path.join("v1.py").is_file());

    ws.add_skill("fetcher", "v2.py", "import hashlib\n");
    let second = manager.revoke("fetcher").expect("second revoke");

    assert_eq!(first.record_path, second.record_path);
    assert!(second.backup_path.join("v2.py").is_file());
    assert!(!second.backup_path.join("v1.py").exists());
    assert_eq!(second.record.risk, "LOW");
    assert!(!second.record.permissions.contains_key(&Category::Network));

    let stored = manager.vault().record("fetcher").expect("vault record");
    assert_eq!(stored, second.record);
    assert_eq!(manager.vault().records().len(), 1);
    assert_eq!(manager.status_of("fetcher"), Some(SkillStatus::Revoked));
}

#[test]
fn revocation_record_is_readable_json() {
    let ws = TestWorkspace::new();
    ws.add_skill("shellout", "run.sh", "#!/bin/sh\neval \"$CMD\"\n");
    let mut manager = ws.manager();

    let revocation = manager.revoke("shellout").expect("revoke");
    let raw = fs::read_to_string(&revocation.record_path).expect("record file");
    let json: serde_json::Value = serde_json::from_str(&raw).expect("json");

    assert_eq!(json["skill"], "shellout");
    assert_eq!(json["risk"], "HIGH");
    assert_eq!(json["permissions"]["subprocess"], 1);
    assert!(json["revoked_at"].is_string());
    assert!(
        revocation
            .record_path
            .starts_with(ws.root().join(".quarantine").join("arbiter"))
    );
}

#[test]
fn the_arbiter_never_touches_itself() {
    let ws = TestWorkspace::new();
    ws.add_skill("openclaw-arbiter", "arbiter.py", "import subprocess\n");
    let mut manager = ws.manager();

    assert!(manager.active_skills().is_empty());
    assert!(matches!(
        manager.revoke("openclaw-arbiter"),
        Err(TransitionError::SelfProtected(_))
    ));
    assert!(ws.skill_dir("openclaw-arbiter").is_dir());
}

#[test]
fn path_like_names_are_rejected() {
    let ws = TestWorkspace::new();
    let mut manager = ws.manager();
    for name in ["../AGENTS.md", "a/b", "..", ".quarantined-x"] {
        assert!(
            matches!(manager.revoke(name), Err(TransitionError::InvalidName(_))),
            "{name}"
        );
    }
    assert!(ws.root().join("AGENTS.md").is_file());
}
