use skill_arbiter::audit::{Category, RiskLevel, Severity, highest_risk};
use skill_arbiter::policy::{Decision, Policy, Rule, Trigger, decide};

use super::workspace_harness::TestWorkspace;

fn profile_of(ws: &TestWorkspace, name: &str) -> skill_arbiter::audit::PermissionProfile {
    let manager = ws.manager();
    manager
        .scanner()
        .scan(&ws.skill_dir(name), ws.root())
        .expect("scan should succeed")
}

#[test]
fn eval_is_denied_even_under_critical_cap() {
    let ws = TestWorkspace::new();
    ws.add_skill("calc", "calc.py", "result = eval(user_input)\nprint(result)\n");

    let profile = profile_of(&ws, "calc");
    let findings = profile.findings(Category::Serialization);
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].line, 1);
    assert!(findings[0].file.ends_with("skills/calc/calc.py"));

    let policy = Policy::permissive(Severity::Critical);
    let decision = decide(&profile, Some(&policy));
    assert!(decision.is_denied());
    assert_eq!(decision.reasons()[0].trigger, Trigger::SystemRule);

    assert!(decide(&profile, None).is_denied());
}

#[test]
fn read_and_env_without_policy_is_allowed() {
    let ws = TestWorkspace::new();
    ws.add_skill(
        "config-reader",
        "read.py",
        "import os\nwith open(path, 'r') as fh:\n    data = fh.read()\nhome = os.environ['HOME']\n",
    );

    let profile = profile_of(&ws, "config-reader");
    let categories: Vec<Category> = profile.categories().collect();
    assert_eq!(categories, [Category::FileRead, Category::Environment]);
    assert_eq!(highest_risk(&profile), RiskLevel::Medium);
    assert_eq!(decide(&profile, None), Decision::Allowed);
    assert_eq!(decide(&profile, Some(&Policy::default())), Decision::Allowed);
}

#[test]
fn subprocess_review_rule_yields_review() {
    let ws = TestWorkspace::new();
    ws.add_skill("runner", "run.py", "import subprocess\nsubprocess.run(['ls'])\n");

    let profile = profile_of(&ws, "runner");
    let policy = Policy::permissive(Severity::High).with_rule(Category::Subprocess, Rule::Review);
    let decision = decide(&profile, Some(&policy));

    assert!(decision.is_review());
    assert_eq!(decision.categories(), [Category::Subprocess]);
    assert_eq!(decision.reasons()[0].count, 2);
}

#[test]
fn shell_scripts_are_detected_by_shebang() {
    let ws = TestWorkspace::new();
    ws.add_skill(
        "sync",
        "bin/sync",
        "#!/usr/bin/env bash\ncurl -s https://example.test > out.json\n",
    );

    let profile = profile_of(&ws, "sync");
    assert!(profile.contains(Category::Network));
    assert!(profile.contains(Category::FileWrite));
}

#[test]
fn vendored_directories_are_not_scanned() {
    let ws = TestWorkspace::new();
    ws.add_skill("tidy", "main.py", "x = 1\n");
    ws.add_file("tidy", "node_modules/pkg/evil.py", "eval(x)\n");
    ws.add_file("tidy", "__pycache__/cached.py", "import pickle\n");

    let profile = profile_of(&ws, "tidy");
    assert!(profile.is_empty());
    assert_eq!(highest_risk(&profile), RiskLevel::Clean);
}
