use std::os::unix::fs::PermissionsExt;

use crate::test_repo::TestRepo;

#[test]
fn missing_tool_becomes_blocking_diagnostics_per_file() {
    let repo = TestRepo::new();
    repo.write_file("src/a.py", "x = 1\n");
    repo.write_file("src/b.py", "y = 2\n");

    let format_stub = repo.format_stub.to_string_lossy().into_owned();
    let result =
        repo.run_check_with_tools(&format_stub, "/no/such/analyzer-binary", &[]);

    // The run completes and reports every file; exit code counts the
    // affected files.
    result.assert_exit_code(2).assert_step_output(2);
    assert_eq!(result.checks_failed(), 2);
    assert!(result.has_diagnostic("src/a.py", "analyzer"));
    assert!(result.has_diagnostic("src/b.py", "analyzer"));

    let diags = result.diagnostics();
    assert!(diags.iter().all(|d| d["severity"].as_str() == Some("blocking")));
    assert!(diags.iter().all(|d| d["line"].as_u64() == Some(0)));

    let reasons = result.receipt()["reasons"].as_array().cloned().unwrap_or_default();
    assert!(reasons.iter().any(|r| r.as_str() == Some("tool_error")));
}

#[test]
fn one_broken_tool_does_not_hide_the_other() {
    let repo = TestRepo::new();
    repo.write_file("src/a.py", "x=1  # FORMAT_ME\n");

    let format_stub = repo.format_stub.to_string_lossy().into_owned();
    let result = repo.run_check_with_tools(&format_stub, "/no/such/analyzer-binary", &[]);

    // One format finding plus one analyzer failure.
    result.assert_exit_code(2);
    assert!(result.has_diagnostic("src/a.py", "format"));
    assert!(result.has_diagnostic("src/a.py", "analyzer"));
}

#[test]
fn slow_tool_times_out_into_a_blocking_diagnostic() {
    let repo = TestRepo::new();
    repo.write_file("src/a.py", "x = 1\n");

    let slow = repo.path().join(".tools/slow-analyzer");
    std::fs::write(&slow, "#!/bin/sh\nsleep 30\nexit 0\n").expect("write slow stub");
    let mut perms = std::fs::metadata(&slow).expect("stat stub").permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&slow, perms).expect("chmod stub");

    let format_stub = repo.format_stub.to_string_lossy().into_owned();
    let result = repo.run_check_with_tools(
        &format_stub,
        &slow.to_string_lossy(),
        &["--timeout-secs", "1"],
    );

    result.assert_exit_code(1);
    let diags = result.diagnostics();
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0]["message"].as_str(), Some("analysis timed out"));
    assert_eq!(diags[0]["severity"].as_str(), Some("blocking"));
}
