use skill_arbiter::Outcome;
use skill_arbiter::lifecycle::SweepAction;
use skill_arbiter::skills::SkillStatus;

use super::workspace_harness::TestWorkspace;

fn populate(ws: &TestWorkspace) {
    ws.add_skill("deserializer", "load.py", "import pickle\ndata = pickle.loads(blob)\n");
    ws.add_skill("downloader", "dl.sh", "#!/bin/bash\nwget https://example.test/file\n");
    ws.add_skill("notes", "notes.py", "with open(path, 'r') as fh:\n    print(fh.read())\n");
}

#[tokio::test]
async fn sweep_twice_makes_no_further_transitions() {
    let ws = TestWorkspace::new();
    populate(&ws);
    let mut manager = ws.manager();

    let first = manager.protect().await;
    assert_eq!(first.quarantined(), 1);
    assert_eq!(first.flagged(), 1);
    assert_eq!(first.outcome(), Outcome::Blocking);
    let tree_after_first = skill_dirs(&ws);

    let second = manager.protect().await;
    assert_eq!(second.quarantined(), 0);
    assert_eq!(second.flagged(), 1);
    assert_eq!(second.outcome(), Outcome::Attention);
    assert_eq!(skill_dirs(&ws), tree_after_first);
}

#[tokio::test]
async fn workspace_policy_denies_network() {
    let ws = TestWorkspace::new();
    populate(&ws);
    ws.write_policy(r#"{"max_risk": "CRITICAL", "rules": {"network": "deny"}}"#);
    let mut manager = ws.manager();

    let report = manager.protect().await;
    assert!(report.policy_in_force);
    assert_eq!(report.quarantined(), 2);
    assert_eq!(manager.status_of("downloader"), Some(SkillStatus::Quarantined));
    assert_eq!(manager.status_of("notes"), Some(SkillStatus::Active));

    let notes = report
        .entries
        .iter()
        .find(|e| e.skill == "notes")
        .expect("notes entry");
    assert_eq!(notes.action, SweepAction::Clean);
}

#[tokio::test]
async fn malformed_policy_falls_back_to_unmanaged_sweep() {
    let ws = TestWorkspace::new();
    populate(&ws);
    ws.write_policy("{ this is not json");
    let mut manager = ws.manager();

    let report = manager.protect().await;
    assert!(!report.policy_in_force);
    assert_eq!(report.quarantined(), 1);
    assert_eq!(manager.status_of("downloader"), Some(SkillStatus::Active));
}

#[tokio::test]
async fn sweep_report_serializes_actions() {
    let ws = TestWorkspace::new();
    populate(&ws);
    let mut manager = ws.manager();

    let report = manager.protect().await;
    let json = serde_json::to_value(&report).expect("json");
    let entries = json["entries"].as_array().expect("entries");
    assert_eq!(entries[0]["skill"], "deserializer");
    assert_eq!(entries[0]["action"], "quarantined");
    assert_eq!(entries[0]["decision"]["decision"], "denied");
    assert_eq!(entries[0]["decision"]["reasons"][0]["trigger"], "system_rule");
    assert_eq!(entries[1]["action"], "flagged");
    assert_eq!(entries[2]["action"], "clean");
}

fn skill_dirs(ws: &TestWorkspace) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(ws.root().join("skills"))
        .expect("skills dir")
        .flatten()
        .filter_map(|entry| entry.file_name().to_str().map(ToString::to_string))
        .collect();
    names.sort();
    names
}
