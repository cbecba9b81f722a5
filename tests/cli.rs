use assert_cmd::Command;

#[test]
fn version_flag_prints_version() {
    let out = Command::cargo_bin("farmquest")
        .unwrap()
        .arg("--version")
        .output()
        .unwrap();

    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn help_lists_flags() {
    let out = Command::cargo_bin("farmquest")
        .unwrap()
        .arg("--help")
        .output()
        .unwrap();

    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    for flag in ["--lang", "--points", "--seed", "--screen", "--save-config"] {
        assert!(stdout.contains(flag), "missing {flag} in help");
    }
}

#[test]
fn invalid_screen_fails() {
    Command::cargo_bin("farmquest")
        .unwrap()
        .args(["--screen", "market"])
        .assert()
        .failure();
}
