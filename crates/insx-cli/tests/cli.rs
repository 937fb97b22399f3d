use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const POLICY_TEXT: &str =
    "Policy Number: POL-998877\nInsured: Jane Doe\nPremium: $1,200.00\nEffective 03/01/2023";

fn insx() -> Command {
    Command::cargo_bin("insx").unwrap()
}

#[test]
fn text_command_extracts_policy_fields() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("upload.txt");
    fs::write(&input, POLICY_TEXT).unwrap();

    insx()
        .arg("text")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"document_type\": \"policy\""))
        .stdout(predicate::str::contains("POL-998877"))
        .stdout(predicate::str::contains("\"confidence\": 0.93"));
}

#[test]
fn text_command_reads_stdin_as_csv() {
    insx()
        .args(["text", "-", "--filename", "loss_notice.txt", "-f", "csv"])
        .write_stdin("Claim Number: CLM-204817\nDate of Loss: 12/10/2024")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "loss_notice.txt,claim,Claim Number,CLM-204817,0.90",
        ))
        .stdout(predicate::str::contains(
            "loss_notice.txt,claim,Date of Loss,12/10/2024,0.90",
        ));
}

#[test]
fn process_mock_uses_filename_hint() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("claim_form.pdf");
    fs::write(&input, b"%PDF-1.4 placeholder").unwrap();

    insx()
        .args(["process", "--mock", "--seed", "3", "-f", "text"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Type: claim"))
        .stdout(predicate::str::contains("Rear-end collision at intersection"));
}

#[test]
fn process_mock_accepts_spreadsheets() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("quote_request.xlsx");
    fs::write(&input, b"PK\x03\x04").unwrap();

    insx()
        .args(["process", "--mock", "--seed", "3"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"document_type\": \"submission\""))
        .stdout(predicate::str::contains("APP-"));
}

#[test]
fn process_rejects_unsupported_type() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("policy.docx");
    fs::write(&input, b"PK\x03\x04").unwrap();

    insx()
        .args(["process", "-m"])
        .arg(dir.path())
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported file type"));
}

#[test]
fn process_unreadable_pdf_degrades_to_unknown() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("random.pdf");
    fs::write(&input, b"not really a pdf").unwrap();

    insx()
        .args(["process", "-m"])
        .arg(dir.path())
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"document_type\": \"unknown\""))
        .stdout(predicate::str::contains("\"confidence\": 0.99"))
        .stderr(predicate::str::contains("No text could be read"));
}

#[test]
fn batch_mock_writes_outputs_and_summary() {
    let input_dir = TempDir::new().unwrap();
    let output_dir = TempDir::new().unwrap();
    for name in ["policy_a.pdf", "claim_b.png", "notes.txt"] {
        fs::write(input_dir.path().join(name), b"content").unwrap();
    }
    let pattern = format!("{}/*", input_dir.path().display());

    insx()
        .args(["batch", "--mock", "--seed", "11", "--summary", &pattern])
        .arg("--output-dir")
        .arg(output_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("2 successful, 1 failed"))
        .stdout(predicate::str::contains("notes.txt"));

    assert!(output_dir.path().join("policy_a.json").exists());
    assert!(output_dir.path().join("claim_b.json").exists());

    let summary = fs::read_to_string(output_dir.path().join("summary.csv")).unwrap();
    let mut lines = summary.lines();
    assert_eq!(
        lines.next(),
        Some("filename,status,document_type,confidence,field_count,error")
    );
    assert!(summary.contains("claim_b.png,success,claim,"));
    assert!(summary.contains("policy_a.pdf,success,policy,"));
    assert!(summary.contains("notes.txt,failed,"));
}

#[test]
fn batch_keeps_outputs_for_files_sharing_a_stem() {
    let input_dir = TempDir::new().unwrap();
    let output_dir = TempDir::new().unwrap();
    for name in ["report.pdf", "report.png"] {
        fs::write(input_dir.path().join(name), b"content").unwrap();
    }
    let pattern = format!("{}/report.*", input_dir.path().display());

    insx()
        .args(["batch", "--mock", "--seed", "4", &pattern])
        .arg("--output-dir")
        .arg(output_dir.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("report.png.json"));

    let first = fs::read_to_string(output_dir.path().join("report.json")).unwrap();
    let second = fs::read_to_string(output_dir.path().join("report.png.json")).unwrap();
    assert!(first.contains("\"filename\": \"report.pdf\""));
    assert!(second.contains("\"filename\": \"report.png\""));
}

#[test]
fn process_reports_unread_image_even_with_filename_hint() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("claim_01.png");
    fs::write(&input, b"\x89PNG not really").unwrap();

    insx()
        .args(["process", "-m"])
        .arg(dir.path())
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"document_type\": \"claim\""))
        .stderr(predicate::str::contains("No text could be read from claim_01.png"));
}

#[test]
fn batch_fails_when_every_file_fails() {
    let input_dir = TempDir::new().unwrap();
    for name in ["a.txt", "b.txt"] {
        fs::write(input_dir.path().join(name), b"content").unwrap();
    }
    let pattern = format!("{}/*.txt", input_dir.path().display());

    insx()
        .args(["batch", "--mock", &pattern])
        .assert()
        .failure()
        .stderr(predicate::str::contains("All 2 files failed"));
}

#[test]
fn config_init_get_and_set() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.json");

    insx()
        .arg("-c")
        .arg(&config)
        .args(["config", "init"])
        .assert()
        .success();
    assert!(config.exists());

    insx()
        .arg("-c")
        .arg(&config)
        .args(["config", "set", "mock.seed", "5"])
        .assert()
        .success();

    insx()
        .arg("-c")
        .arg(&config)
        .args(["config", "get", "mock.seed"])
        .assert()
        .success()
        .stdout(predicate::str::contains("5"));

    insx()
        .arg("-c")
        .arg(&config)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));
}

#[test]
fn config_path_reports_location() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("insx.json");

    insx()
        .arg("-c")
        .arg(&config)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("insx.json"))
        .stdout(predicate::str::contains("not created"));
}
