// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! End-to-end tests for `pickaxe_report::run`


use pickaxe_report::config::{Config, ReportFormat};
use pickaxe_report::run;
use test_utils::{TempTestDir, TestGitRepo};

fn config(repo: &TestGitRepo, out: &TempTestDir, search: &str, file: &str) -> Config {
    Config {
        search: search.to_string(),
        repo: Some(repo.path().to_path_buf()),
        output: Some(out.path().join(file)),
        no_open: true,
        ..Default::default()
    }
}

#[test]
fn test_html_report_lists_finding() {
    let repo = TestGitRepo::new("html");
    let out = TempTestDir::new("html-out");
    let sha = repo.commit_file("notes.txt", "remember the <needle>\n", "add needle");

    let summary = run(&config(&repo, &out, "<needle>", "report.html")).expect("run");

    assert_eq!(summary.findings, 1);
    let html = std::fs::read_to_string(&summary.report_path).expect("read report");
    assert!(html.contains(&sha));
    assert!(html.contains("Found 1 commit(s)."));
    assert!(html.contains("notes.txt: +remember the &lt;needle&gt;"));
    assert!(html.contains("<span>main</span>"));
    assert!(!html.contains("{{ TABLE_ROWS }}"));
}

#[test]
fn test_empty_result_still_writes_report() {
    let repo = TestGitRepo::new("empty");
    let out = TempTestDir::new("empty-out");
    repo.commit_file("a.txt", "hay\n", "hay");

    let summary = run(&config(&repo, &out, "needle", "report.html")).expect("run");

    assert_eq!(summary.findings, 0);
    let html = std::fs::read_to_string(&summary.report_path).expect("read report");
    assert!(html.contains("No commits found introducing this specific string"));
}

#[test]
fn test_json_report() {
    let repo = TestGitRepo::new("json");
    let out = TempTestDir::new("json-out");
    let sha = repo.commit_file("a.txt", "needle\n", "add");

    let cfg = Config {
        format: ReportFormat::Json,
        ..config(&repo, &out, "needle", "report.json")
    };
    let summary = run(&cfg).expect("run");

    let json = std::fs::read_to_string(&summary.report_path).expect("read report");
    let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
    assert_eq!(value["search_string"], "needle");
    assert_eq!(value["findings"][0]["hash"], sha.as_str());
    assert_eq!(value["findings"][0]["evidence"][0]["file"], "a.txt");
}

#[test]
fn test_custom_template() {
    let repo = TestGitRepo::new("template");
    let out = TempTestDir::new("template-out");
    repo.commit_file("a.txt", "needle\n", "add");
    let template = out.path().join("tpl.html");
    std::fs::write(&template, "<h1>{{ SEARCH_STRING }}</h1>{{ TABLE_ROWS }}").expect("write");

    let cfg = Config {
        template: Some(template),
        ..config(&repo, &out, "needle", "report.html")
    };
    let summary = run(&cfg).expect("run");

    let html = std::fs::read_to_string(&summary.report_path).expect("read report");
    assert!(html.starts_with("<h1>needle</h1><p class=\"text-muted\">Found 1 commit(s).</p>"));
}

#[test]
fn test_bad_branch_fails_without_report() {
    let repo = TestGitRepo::new("badbranch");
    let out = TempTestDir::new("badbranch-out");
    repo.commit_file("a.txt", "needle\n", "add");

    let cfg = Config {
        branch: Some("does-not-exist".to_string()),
        ..config(&repo, &out, "needle", "report.html")
    };
    let err = run(&cfg).expect_err("bad branch must fail");

    assert!(format!("{err:#}").contains("does-not-exist"));
    assert!(!out.path().join("report.html").exists());
}

#[test]
fn test_not_a_repository_fails() {
    let dir = TempTestDir::new("norepo");
    let cfg = Config {
        search: "needle".to_string(),
        repo: Some(dir.path().to_path_buf()),
        output: Some(dir.path().join("report.html")),
        no_open: true,
        ..Default::default()
    };
    assert!(run(&cfg).is_err());
}

#[test]
fn test_invalid_config_fails() {
    let repo = TestGitRepo::new("invalid");
    let out = TempTestDir::new("invalid-out");
    assert!(run(&config(&repo, &out, "", "report.html")).is_err());
}
