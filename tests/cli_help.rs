use assert_cmd::Command;

#[test]
fn cli_help_smoke() {
    let mut cmd = Command::cargo_bin("kira-moha").unwrap();
    cmd.arg("--help");
    cmd.assert().success();
}

#[test]
fn subcommand_help_smoke() {
    for sub in ["thresholds", "cell-states", "heterogeneity", "geneset-heterogeneity"] {
        let mut cmd = Command::cargo_bin("kira-moha").unwrap();
        cmd.args([sub, "--help"]);
        cmd.assert().success();
    }
}

#[test]
fn missing_subcommand_fails() {
    Command::cargo_bin("kira-moha").unwrap().assert().failure();
}
