use clap::Parser;

use skill_arbiter::app::dispatch::{build_manager, run};
use skill_arbiter::cli::{Cli, Commands};
use skill_arbiter::error::{ConfigError, WorkspaceError};
use skill_arbiter::{ArbiterConfig, ArbiterError, LifecycleManager, Outcome};

use super::workspace_harness::TestWorkspace;

fn cli_for(ws: &TestWorkspace, args: &[&str]) -> Cli {
    let root = ws.root().to_str().expect("utf-8 temp path");
    let mut argv = vec!["skill-arbiter", "--workspace", root];
    argv.extend_from_slice(args);
    Cli::parse_from(argv)
}

async fn invoke(ws: &TestWorkspace, args: &[&str]) -> (serde_json::Value, Outcome) {
    let cli = cli_for(ws, args);
    let mut manager = build_manager(&cli, &ArbiterConfig::default()).expect("manager");
    run(&cli.command, &mut manager).await.expect("command")
}

#[tokio::test]
async fn audit_exit_codes_follow_worst_risk() {
    let ws = TestWorkspace::new();
    ws.add_skill("hasher", "h.py", "import hashlib\n");
    let (json, outcome) = invoke(&ws, &["audit"]).await;
    assert_eq!(outcome, Outcome::Clean);
    assert_eq!(json["skills"][0]["risk"], "LOW");
    assert_eq!(json["skills"][0]["metadata"]["requires_bins"][0], "python3");

    ws.add_skill("loader", "l.py", "yaml.load(stream)\n");
    let (_, outcome) = invoke(&ws, &["audit"]).await;
    assert_eq!(outcome.exit_code(), 2);
}

#[tokio::test]
async fn audit_of_unknown_skill_is_an_invocation_error() {
    let ws = TestWorkspace::new();
    let cli = cli_for(&ws, &["audit", "ghost"]);
    let mut manager = build_manager(&cli, &ArbiterConfig::default()).expect("manager");
    let err = run(&cli.command, &mut manager).await.expect_err("unknown skill");
    assert!(err.to_string().contains("ghost"));
}

#[tokio::test]
async fn report_is_always_clean() {
    let ws = TestWorkspace::new();
    ws.add_skill("loader", "l.py", "import pickle\n");
    let (json, outcome) = invoke(&ws, &["report"]).await;
    assert_eq!(outcome, Outcome::Clean);
    assert_eq!(json["rows"][0]["counts"]["serialization"], 1);
    assert_eq!(json["rows"][0]["counts"]["network"], 0);
}

#[tokio::test]
async fn policy_init_then_show() {
    let ws = TestWorkspace::new();

    let (json, outcome) = invoke(&ws, &["policy"]).await;
    assert!(json["policy"].is_null());
    assert_eq!(outcome, Outcome::Attention);

    let (json, outcome) = invoke(&ws, &["policy", "--init"]).await;
    assert_eq!(json["created"], true);
    assert_eq!(json["policy"]["max_risk"], "MEDIUM");
    assert_eq!(json["policy"]["rules"]["serialization"], "deny");
    assert_eq!(outcome, Outcome::Clean);

    let (json, _) = invoke(&ws, &["policy", "--init"]).await;
    assert_eq!(json["created"], false);
}

#[tokio::test]
async fn enforce_previews_without_moving() {
    let ws = TestWorkspace::new();
    ws.add_skill("runner", "r.py", "import subprocess\n");
    let (json, outcome) = invoke(&ws, &["enforce"]).await;
    assert_eq!(outcome, Outcome::Blocking);
    assert_eq!(json["policy_source"], "default");
    assert_eq!(json["entries"][0]["decision"], "denied");
    assert!(ws.skill_dir("runner").is_dir());
}

#[tokio::test]
async fn transitions_through_dispatch() {
    let ws = TestWorkspace::new();
    ws.add_skill("weather", "w.py", "import requests\n");

    let (json, outcome) = invoke(&ws, &["quarantine", "weather"]).await;
    assert_eq!(json["result"], "quarantined");
    assert_eq!(outcome, Outcome::Clean);

    let (json, _) = invoke(&ws, &["status"]).await;
    assert_eq!(json["quarantined"][0], "weather");
    assert_eq!(json["active"], 0);

    let (json, _) = invoke(&ws, &["unquarantine", "weather"]).await;
    assert_eq!(json["result"], "unquarantined");

    let (json, _) = invoke(&ws, &["revoke", "weather"]).await;
    assert_eq!(json["record"]["skill"], "weather");

    let (json, outcome) = invoke(&ws, &["status"]).await;
    assert_eq!(json["revoked"][0]["skill"], "weather");
    assert_eq!(outcome, Outcome::Clean);
}

#[tokio::test]
async fn protect_through_dispatch() {
    let ws = TestWorkspace::new();
    ws.add_skill("dyn", "d.py", "__import__('os')\n");
    let (json, outcome) = invoke(&ws, &["protect"]).await;
    assert_eq!(outcome, Outcome::Blocking);
    assert_eq!(json["entries"][0]["action"], "quarantined");
    assert!(matches!(
        cli_for(&ws, &["protect"]).command,
        Commands::Protect
    ));
}

#[test]
fn missing_workspace_is_reported() {
    let cli = Cli::parse_from(["skill-arbiter", "-w", "/definitely/not/here", "status"]);
    let err = build_manager(&cli, &ArbiterConfig::default()).expect_err("missing workspace");
    assert!(format!("{err:#}").contains("workspace not found"));
}

#[test]
fn manager_errors_keep_their_kind() {
    let err = LifecycleManager::from_config(&ArbiterConfig::default(), Some("/definitely/not/here"))
        .expect_err("missing workspace");
    assert!(matches!(err, ArbiterError::Workspace(WorkspaceError::NotFound(_))));

    let ws = TestWorkspace::new();
    let root = ws.root().to_str().expect("utf-8 temp path");
    let config = ArbiterConfig {
        scan_concurrency: 0,
        ..ArbiterConfig::default()
    };
    let err = LifecycleManager::from_config(&config, Some(root)).expect_err("invalid config");
    assert!(matches!(err, ArbiterError::Config(ConfigError::Validation(_))));

    let manager = LifecycleManager::from_config(&ArbiterConfig::default(), Some(root))
        .expect("manager");
    assert_eq!(manager.workspace().root(), ws.root().canonicalize().unwrap());
}
