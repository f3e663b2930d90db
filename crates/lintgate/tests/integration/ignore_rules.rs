use crate::test_repo::TestRepo;

#[test]
fn negation_overrides_earlier_ignore() {
    let repo = TestRepo::new();
    repo.write_file("docs/conf.py", "x=1  # FORMAT_ME\n");
    repo.write_file("docs/src/gen.py", "y=2  # FORMAT_ME\n");
    repo.write_file("src/a.py", "z = 3\n");

    let result = repo.run_check(&["--ignore", "docs|!docs/src"]);

    result.assert_exit_code(1);
    assert_eq!(result.diagnostic_paths(), vec!["docs/src/gen.py"]);
}

#[test]
fn declaration_order_decides_overlapping_prefixes() {
    let repo = TestRepo::new();
    repo.write_file("docs/src/gen.py", "y=2  # FORMAT_ME\n");

    // Negation first, broad ignore last: the broad rule wins.
    let result = repo.run_check(&["--ignore", "!docs/src|docs"]);

    result.assert_exit_code(0);
    assert!(result.diagnostics().is_empty());
}

#[test]
fn ignore_can_name_a_single_file() {
    let repo = TestRepo::new();
    repo.write_file("src/legacy.py", "x=1  # FORMAT_ME\n");
    repo.write_file("src/fresh.py", "y=2  # FORMAT_ME\n");

    let result = repo.run_check(&["--ignore", "src/legacy.py"]);

    result.assert_exit_code(1);
    assert_eq!(result.diagnostic_paths(), vec!["src/fresh.py"]);
}

#[test]
fn star_in_ignore_entry_is_literal() {
    let repo = TestRepo::new();
    repo.write_file("src/real/a.py", "x=1  # FORMAT_ME\n");

    // "src/*" names a literal "*" directory, so src/real is still analyzed.
    let result = repo.run_check(&["--ignore", "src/*"]);

    result.assert_exit_code(1);
    assert_eq!(result.diagnostic_paths(), vec!["src/real/a.py"]);
}

#[test]
fn malformed_ignore_spec_is_fatal() {
    let repo = TestRepo::new();
    repo.write_file("src/a.py", "x = 1\n");

    let result = repo.run_check(&["--ignore", "src|!"]);

    result.assert_exit_code(101);
    assert!(
        result.stderr.contains("ignore"),
        "stderr should name the failing input: {}",
        result.stderr
    );
}
