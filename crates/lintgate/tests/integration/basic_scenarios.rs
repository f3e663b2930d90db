use crate::test_repo::TestRepo;

#[test]
fn unformatted_file_fails_with_count_as_exit_code() {
    let repo = TestRepo::new();
    repo.write_file("src/a.py", "x=1  # FORMAT_ME\n");
    repo.write_file("src/b.py", "x = 1\n");

    let result = repo.run_check(&["--extensions", "py"]);

    result.assert_exit_code(1).assert_step_output(1);
    assert_eq!(result.checks_failed(), 1);
    assert!(!result.overall_pass());
    assert!(result.has_diagnostic("src/a.py", "format"));
    assert!(!result.has_diagnostic("src/b.py", "format"));

    let receipt = result.receipt();
    assert_eq!(receipt["files_examined"].as_u64(), Some(2));
    assert_eq!(receipt["schema"].as_str(), Some("lintgate.report.v1"));
}

#[test]
fn clean_tree_passes_with_exit_zero() {
    let repo = TestRepo::new();
    repo.write_file("src/a.py", "x = 1\n");
    repo.write_file("src/b.py", "y = 2\n");

    let result = repo.run_check(&[]);

    result.assert_exit_code(0).assert_step_output(0);
    assert!(result.overall_pass());
    assert!(result.diagnostics().is_empty());
}

#[test]
fn ignoring_src_selects_nothing_and_passes() {
    let repo = TestRepo::new();
    repo.write_file("src/a.py", "x=1  # FORMAT_ME\n");
    repo.write_file("src/b.py", "x = 1\n");

    let result = repo.run_check(&["--extensions", "py", "--ignore", "src"]);

    result.assert_exit_code(0).assert_step_output(0);
    assert_eq!(result.checks_failed(), 0);
    assert_eq!(result.receipt()["files_examined"].as_u64(), Some(0));
    let reasons = result.receipt()["reasons"].as_array().cloned().unwrap_or_default();
    assert!(reasons.iter().any(|r| r.as_str() == Some("no_files")));
}

#[test]
fn analyzer_findings_split_into_advisory_and_blocking() {
    let repo = TestRepo::new();
    repo.write_file(
        "src/app.py",
        "import os\nunused = 1  # LINT_WARN\nbroken()  # LINT_ERROR\n",
    );

    let result = repo.run_check(&[]);

    result.assert_exit_code(1);
    assert_eq!(result.checks_failed(), 1);

    let diags = result.diagnostics();
    assert_eq!(diags.len(), 2);
    assert_eq!(diags[0]["line"].as_u64(), Some(2));
    assert_eq!(diags[0]["severity"].as_str(), Some("advisory"));
    assert_eq!(diags[1]["line"].as_u64(), Some(3));
    assert_eq!(diags[1]["severity"].as_str(), Some("blocking"));
    assert_eq!(diags[1]["code"].as_str(), Some("stub-error [E9001]"));
}

#[test]
fn exit_code_sums_failures_across_files_and_linters() {
    let repo = TestRepo::new();
    repo.write_file("src/a.py", "x=1  # FORMAT_ME\n");
    repo.write_file("src/b.py", "boom()  # LINT_ERROR\n");
    repo.write_file("src/c.py", "x=1  # FORMAT_ME and boom()  # LINT_ERROR\n");

    let result = repo.run_check(&[]);

    // a: format; b: analyzer; c: both.
    result.assert_exit_code(4).assert_step_output(4);
    assert_eq!(result.checks_failed(), 4);
}

#[test]
fn nested_repository_is_never_analyzed() {
    let repo = TestRepo::new();
    repo.write_file("src/a.py", "x = 1\n");
    repo.write_file("vendor/lib.py", "x=1  # FORMAT_ME\n");
    std::fs::create_dir_all(repo.path().join("vendor/.git")).expect("nested .git");

    let result = repo.run_check(&[]);

    result.assert_exit_code(0);
    assert_eq!(result.diagnostic_paths(), Vec::<String>::new());
    assert_eq!(result.receipt()["files_examined"].as_u64(), Some(1));
}

#[test]
fn extension_matching_is_case_insensitive() {
    let repo = TestRepo::new();
    repo.write_file("src/Weird.PY", "x=1  # FORMAT_ME\n");

    let result = repo.run_check(&["--extensions", "py"]);

    result.assert_exit_code(1);
    assert!(result.has_diagnostic("src/Weird.PY", "format"));
}

#[test]
fn markdown_summary_is_written_when_requested() {
    let repo = TestRepo::new();
    repo.write_file("src/a.py", "x=1  # FORMAT_ME\n");

    let result = repo.run_check(&["--md", "artifacts/lintgate/comment.md"]);
    result.assert_exit_code(1);

    let md = std::fs::read_to_string(repo.path().join("artifacts/lintgate/comment.md"))
        .expect("markdown summary");
    assert!(md.contains("## lintgate — FAIL"));
    assert!(md.contains("src/a.py"));
}

#[test]
fn github_annotations_are_emitted_on_stdout() {
    let repo = TestRepo::new();
    repo.write_file("src/app.py", "boom()  # LINT_ERROR\n");

    let result = repo.run_check(&["--github-annotations"]);

    result.assert_exit_code(1);
    assert!(result
        .stdout
        .contains("::error file=src/app.py,line=1::stub-error [E9001]: stub blocking finding"));
}

#[test]
fn receipts_are_deterministic_across_runs() {
    let repo = TestRepo::new();
    repo.write_file("src/b.py", "boom()  # LINT_ERROR\n");
    repo.write_file("src/a.py", "x=1  # FORMAT_ME\n");

    let first = repo.run_check(&[]);
    let second = repo.run_check(&[]);

    assert_eq!(first.diagnostic_paths(), second.diagnostic_paths());
    assert_eq!(first.checks_failed(), second.checks_failed());
    // Ordering is path-sorted, independent of worker scheduling.
    assert_eq!(first.diagnostic_paths(), vec!["src/a.py", "src/b.py"]);
}
