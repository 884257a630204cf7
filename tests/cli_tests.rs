// ABOUTME: Integration tests for the CLI application
// ABOUTME: Runs the tmplgate binary against temporary templates, contexts and config files

use std::process::{Command, Output};

mod common;
use common::TestEnvironment;

fn tmplgate(env: &TestEnvironment, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_tmplgate"))
        .args(args)
        .current_dir(env.path())
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute command")
}

#[test]
fn test_cli_help_command() {
    let env = TestEnvironment::new();
    let output = tmplgate(&env, &["--help"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("render"));
    assert!(stdout.contains("--help"));
}

#[test]
fn test_cli_version_flag() {
    let env = TestEnvironment::new();
    let output = tmplgate(&env, &["--version"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(tmplgate::VERSION));
}

#[test]
fn test_cli_missing_config_file_fails() {
    let env = TestEnvironment::new();
    let template = env.write_file("title.hbs", "{{depName}}");

    let output = tmplgate(
        &env,
        &[
            "--config",
            "absent.yaml",
            "render",
            template.to_str().unwrap(),
        ],
    );

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("absent.yaml"));
}

#[test]
fn test_cli_render_filters_context() {
    let env = TestEnvironment::new();
    let template = env.write_file("title.hbs", "Update {{depName}} to {{newVersion}}{{token}}");
    let context = env.write_file(
        "context.json",
        r#"{"depName": "serde", "newVersion": "1.0.200", "token": "s3cr3t"}"#,
    );

    let output = tmplgate(
        &env,
        &[
            "render",
            template.to_str().unwrap(),
            "--context",
            context.to_str().unwrap(),
        ],
    );

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "Update serde to 1.0.200"
    );
}

#[test]
fn test_cli_render_without_filter() {
    let env = TestEnvironment::new();
    let template = env.write_file("title.hbs", "{{depName}}:{{token}}");

    let output = tmplgate(
        &env,
        &[
            "render",
            template.to_str().unwrap(),
            "--var",
            "depName=serde",
            "--var",
            "token=s3cr3t",
            "--no-filter",
        ],
    );

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "serde:s3cr3t");
}

#[test]
fn test_cli_render_uses_config_global() {
    let env = TestEnvironment::new();
    env.write_file(
        "tmplgate.yaml",
        "global:\n  branchPrefix: \"deps/\"\n  hostToken: leaked\n",
    );
    let template = env.write_file("branch.hbs", "{{branchPrefix}}{{depName}}{{hostToken}}");

    let output = tmplgate(
        &env,
        &["render", template.to_str().unwrap(), "-V", "depName=serde"],
    );

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "deps/serde");
}

#[test]
fn test_cli_check_reports_disallowed() {
    let env = TestEnvironment::new();
    let template = env.write_file("body.hbs", "{{header}}{{depName}}{{apiKey}}");

    let output = tmplgate(&env, &["check", template.to_str().unwrap()]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("disallowed: apiKey"));
    assert!(!stdout.contains("disallowed: header"));
}

#[test]
fn test_cli_check_invalid_syntax() {
    let env = TestEnvironment::new();
    let template = env.write_file("broken.hbs", "{{#if isMajor}}x{{/unless}}");

    let output = tmplgate(&env, &["check", template.to_str().unwrap()]);

    assert!(!output.status.success());
}

#[test]
fn test_cli_fields_listing() {
    let env = TestEnvironment::new();

    let fields = tmplgate(&env, &["fields"]);
    assert!(fields.status.success());
    let stdout = String::from_utf8_lossy(&fields.stdout);
    assert!(stdout.contains("depName"));
    assert!(stdout.contains("The name of the dependency being updated"));

    let options = tmplgate(&env, &["fields", "--options"]);
    assert!(options.status.success());
    assert!(String::from_utf8_lossy(&options.stdout).contains("commitMessagePrefix"));
}
