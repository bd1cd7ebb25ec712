//! Command-line behavior of the `discordant-reads` binary.

mod common;

use assert_cmd::Command;
use predicates::prelude::*;

use common::{read_bam, scenario_records, Workspace};

fn command(workspace: &Workspace) -> Command {
    let mut cmd = Command::cargo_bin("discordant-reads").unwrap();
    cmd.arg(&workspace.transcripts).arg(&workspace.input);
    for output in workspace.outputs() {
        cmd.arg(output);
    }
    cmd
}

#[test]
fn test_text_summary() {
    let workspace = Workspace::new(&scenario_records());

    command(&workspace)
        .args(["--max-multihits", "1"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"Fragments:\s+5\n").unwrap())
        .stdout(predicate::str::contains("DISCORDANT_GENE"));

    let [paired, discordant, unpaired, multimap] = workspace.outputs();
    assert_eq!(read_bam(&paired).len(), 4);
    assert_eq!(read_bam(&discordant).len(), 2);
    assert_eq!(read_bam(&unpaired).len(), 4);
    assert_eq!(read_bam(&multimap).len(), 3);
}

#[test]
fn test_json_summary() {
    let workspace = Workspace::new(&scenario_records());

    let output = command(&workspace)
        .args(["--format", "json", "--library", "fr-unstranded"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["fragments"], 5);
    assert_eq!(summary["discordant_pairs"], 1);
    assert_eq!(summary["pairs_by_tag"]["discordant_gene"], 1);
}

#[test]
fn test_tsv_summary() {
    let workspace = Workspace::new(&scenario_records());

    command(&workspace)
        .args(["-f", "tsv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("category\tcount"))
        .stdout(predicate::str::contains("unpaired\t1"));
}

#[test]
fn test_bad_library_type_fails() {
    let workspace = Workspace::new(&scenario_records());

    command(&workspace)
        .args(["--library", "sideways"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown library type 'sideways'"));

    // rejected before any output is created
    assert!(!workspace.output("paired").exists());
}

#[test]
fn test_non_positive_multihits_fails() {
    let workspace = Workspace::new(&scenario_records());

    command(&workspace)
        .args(["--max-multihits", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Maximum multihits must be positive"));
}

#[test]
fn test_missing_annotation_fails() {
    let workspace = Workspace::new(&scenario_records());
    std::fs::write(&workspace.transcripts, "TX1\t1\tchr1\t+\t1000\t3000\n").unwrap();

    command(&workspace)
        .assert()
        .failure()
        .stderr(predicate::str::contains("has no transcript annotation"));
}

#[test]
fn test_missing_positional_arguments() {
    Command::cargo_bin("discordant-reads")
        .unwrap()
        .arg("transcripts.tsv")
        .assert()
        .failure();
}
