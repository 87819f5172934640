//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn slam() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("slam").unwrap()
}

fn write(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).unwrap();
}

/// A data directory with one active user on the es_en track
fn data_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    let p = dir.path();

    write(p, "en_es.slam.20190204.train", "");
    write(
        p,
        "es_en.slam.20190204.train",
        "\
# prompt:I eat an apple.
# user:D1x7 countries:US days:0.4 client:ios session:lesson format:reverse_translate time:12
aaa0101  Como     VERB  _  ROOT  0  1
aaa0102  manzana  NOUN  _  obj   1  0

# user:D1x7 countries:US days:0.5 client:ios session:lesson format:listen time:8
aaa0201  ojo      NOUN  _  ROOT  0  0
",
    );
    write(p, "fr_en.slam.20190204.train", "");
    write(
        p,
        "BrysbaertConcretenessFrequency.csv",
        "Word,Bigram,Conc.M\neat,0,4.44\napple,0,5.0\neye,0,4.9\n",
    );
    write(
        p,
        "SUBTLEX_En.csv",
        "Word,a,b,c,d,SUBTLWF\neat,0,0,0,0,112.0\napple,0,0,0,0,33.5\neye,0,0,0,0,80.25\n",
    );
    write(p, "SUBTLEX-ESP.csv", "Word,a,Freq\n");
    write(p, "en_sp_words.csv", "word,translation\n");
    write(
        p,
        "es_en_words.csv",
        "word,translation\ncomo,I eat\nmanzana,Apple\nojo,eye\n",
    );
    write(p, "fr_en_words.csv", "word,translation\n");
    dir
}

#[test]
fn build_writes_feature_table() {
    let dir = data_dir();
    let output = dir.path().join("ftrs.csv");

    slam()
        .arg("build")
        .arg("--data-dir")
        .arg(dir.path())
        .arg("--output")
        .arg(&output)
        .arg("--min-activity")
        .arg("1")
        .arg("--max-activity")
        .arg("10")
        .assert()
        .success()
        .stderr(predicate::str::contains("Wrote 3 rows"));

    let csv = fs::read_to_string(&output).unwrap();
    let lines: Vec<_> = csv.lines().collect();
    assert_eq!(
        lines[0],
        "User,Word,Task_Format,PoS,Word_length,Track,Word_exp,Frequency,Distance,Concreteness,Unfamiliar_Sound,Nr_Mistakes"
    );
    assert_eq!(lines.len(), 4);
    assert!(lines.contains(&"D1x7,como,reverse_translate,VERB,4,es_en,1,112,4,4.44,0,1"));
    assert!(lines.contains(&"D1x7,ojo,listen,NOUN,3,es_en,1,80.25,3,4.9,1,0"));
}

#[test]
fn build_default_activity_range_drops_light_users() {
    let dir = data_dir();
    let output = dir.path().join("ftrs.csv");

    slam()
        .arg("build")
        .arg("--data-dir")
        .arg(dir.path())
        .arg("--output")
        .arg(&output)
        .arg("--report")
        .arg("-")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"dropped_users\""))
        .stdout(predicate::str::contains("D1x7"));

    let csv = fs::read_to_string(&output).unwrap();
    assert_eq!(csv.lines().count(), 1);
}

#[test]
fn build_with_config_file() {
    let dir = data_dir();
    let config = dir.path().join("slam.toml");
    let output = dir.path().join("out.csv");
    fs::write(
        &config,
        format!(
            "data_dir = {:?}\noutput = {:?}\nwrite_row_index = true\n\n[activity]\nmin = 1\nmax = 3\n",
            dir.path(),
            output
        ),
    )
    .unwrap();

    slam()
        .arg("build")
        .arg("--config")
        .arg(&config)
        .assert()
        .success();

    let csv = fs::read_to_string(&output).unwrap();
    assert!(csv.starts_with(",User,Word"));
}

#[test]
fn build_missing_inputs_fails() {
    let dir = TempDir::new().unwrap();

    slam()
        .arg("build")
        .arg("--data-dir")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("FILE_NOT_FOUND"));
}

#[test]
fn validate_reports_malformed_lines() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "bad.train",
        "# user:a format:listen\nid1 hola INTJ _ _ 0 0\nid2 adios\n",
    );

    slam()
        .arg("validate")
        .arg("--input")
        .arg(dir.path().join("bad.train"))
        .arg("--track")
        .arg("es_en")
        .assert()
        .failure()
        .stdout(predicate::str::contains("line 3"))
        .stderr(predicate::str::contains("VALIDATION_FAILED"));
}

#[test]
fn validate_clean_log_json() {
    let dir = data_dir();

    slam()
        .arg("validate")
        .arg("--input")
        .arg(dir.path().join("es_en.slam.20190204.train"))
        .arg("--track")
        .arg("es_en")
        .arg("--json")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"instances\": 3"))
        .stdout(predicate::str::contains("\"exercises\": 2"));
}

#[test]
fn doctor_flags_missing_files() {
    let dir = TempDir::new().unwrap();

    slam()
        .arg("doctor")
        .arg("--data-dir")
        .arg(dir.path())
        .assert()
        .failure()
        .stdout(predicate::str::contains("[ERR] log:en_es"));
}

#[test]
fn doctor_passes_with_all_inputs() {
    let dir = data_dir();

    slam()
        .arg("doctor")
        .arg("--data-dir")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("[OK] spanish_frequency"));
}

#[test]
fn schema_lists_columns() {
    slam()
        .arg("schema")
        .assert()
        .success()
        .stdout(predicate::str::contains("Unfamiliar_Sound"))
        .stdout(predicate::str::contains("12. Nr_Mistakes"));
}
