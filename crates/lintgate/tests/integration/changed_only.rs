use crate::test_repo::TestRepo;

#[test]
fn untouched_files_are_not_analyzed() {
    let (repo, base_sha) = TestRepo::with_git(&[
        ("src/a.py", "x = 1\n"),
        ("src/b.py", "boom()  # LINT_ERROR\n"),
    ]);

    // Only a.py changes; b.py keeps its pre-existing blocking finding.
    repo.write_file("src/a.py", "x = 1\ny = 2\n");

    let result = repo.run_check(&["--files-changed-only", "--base", &base_sha]);

    result.assert_exit_code(0);
    assert_eq!(result.receipt()["files_examined"].as_u64(), Some(1));
    assert!(!result.diagnostic_paths().contains(&"src/b.py".to_string()));
}

#[test]
fn finding_on_unchanged_line_is_reported_but_does_not_fail() {
    let (repo, base_sha) = TestRepo::with_git(&[(
        "src/app.py",
        "import os\nboom()  # LINT_ERROR\nx = 1\n",
    )]);

    // Touch line 4 only; the blocking finding on line 2 is pre-existing.
    repo.write_file(
        "src/app.py",
        "import os\nboom()  # LINT_ERROR\nx = 1\ny = 2\n",
    );

    let result = repo.run_check(&["--files-changed-only", "--base", &base_sha]);

    result.assert_exit_code(0).assert_step_output(0);
    assert!(result.overall_pass());

    // The finding is still in the full report, marked out of scope.
    let diags = result.diagnostics();
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0]["line"].as_u64(), Some(2));
    assert_eq!(diags[0]["in_scope"].as_bool(), Some(false));
    assert_eq!(
        result.receipt()["verdict"]["counts"]["out_of_scope"].as_u64(),
        Some(1)
    );
}

#[test]
fn finding_on_changed_line_fails_the_run() {
    let (repo, base_sha) = TestRepo::with_git(&[("src/app.py", "import os\nx = 1\n")]);

    repo.write_file("src/app.py", "import os\nx = 1\nboom()  # LINT_ERROR\n");

    let result = repo.run_check(&["--files-changed-only", "--base", &base_sha]);

    result.assert_exit_code(1);
    let diags = result.diagnostics();
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0]["line"].as_u64(), Some(3));
    assert_eq!(diags[0]["in_scope"].as_bool(), Some(true));
}

#[test]
fn reformat_of_a_changed_file_still_blocks() {
    let (repo, base_sha) = TestRepo::with_git(&[("src/app.py", "x = 1\n")]);

    // The touched line is 2, not 1, but formatting is a whole-file check.
    repo.write_file("src/app.py", "x = 1\nz=3  # FORMAT_ME\n");

    let result = repo.run_check(&["--files-changed-only", "--base", &base_sha]);

    result.assert_exit_code(1);
    assert!(result.has_diagnostic("src/app.py", "format"));
    assert_eq!(result.checks_failed(), 1);
}

#[test]
fn change_scoped_run_without_git_is_fatal() {
    let repo = TestRepo::new();
    repo.write_file("src/a.py", "x = 1\n");

    let result = repo.run_check(&["--files-changed-only", "--base", "HEAD"]);

    result.assert_exit_code(101);
    assert!(
        result.stderr.contains("git"),
        "stderr should mention git: {}",
        result.stderr
    );
    assert!(result.receipt.is_none(), "no report on fatal errors");
}

#[test]
fn full_run_succeeds_without_git() {
    let repo = TestRepo::new();
    repo.write_file("src/a.py", "x = 1\n");

    // Diff availability is irrelevant unless change scoping was requested.
    let result = repo.run_check(&[]);
    result.assert_exit_code(0);
}
