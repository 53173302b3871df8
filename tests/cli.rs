use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn csvprep() -> Command {
    Command::cargo_bin("csvprep").unwrap()
}

fn write(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}

#[test]
fn test_column_add_from_stdin() {
    csvprep()
        .args(["column-add", "--column", "[0,-1]"])
        .write_stdin("a,b\nc,d\n")
        .assert()
        .success()
        .stdout(",a,b,\n,c,d,\n");
}

#[test]
fn test_column_del_with_files() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "in.csv", "a,b,c\n1,2,3\n");
    let output = dir.path().join("out.csv");

    csvprep()
        .args(["column-del", "--column", "[1]", "-i"])
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .success();

    assert_eq!(read(&output), "a,c\n1,3\n");
}

#[test]
fn test_column_exclusive_then_merge() {
    let input = "k,a,b\nk2,c,\n";
    let split = csvprep()
        .args([
            "column-exclusive",
            "--column-group",
            "[1]",
            "--column-group",
            "[2]",
        ])
        .write_stdin(input)
        .assert()
        .success()
        .stdout("k,a,\nk,,b\nk2,c,\n")
        .get_output()
        .stdout
        .clone();

    csvprep()
        .args([
            "column-merge",
            "--column-key",
            "[0]",
            "--column-group",
            "[1]",
            "--column-group",
            "[2]",
        ])
        .write_stdin(split)
        .assert()
        .success()
        .stdout(input);
}

#[test]
fn test_column_fill_ffill() {
    csvprep()
        .args([
            "column-fill",
            "--column",
            "[0]",
            "--value-source",
            "ffill",
            "--value",
            "x",
        ])
        .write_stdin(",a\n2,b\n,c\n")
        .assert()
        .success()
        .stdout("x,a\n2,b\n2,c\n");
}

#[test]
fn test_column_fill_with_condition_and_header() {
    csvprep()
        .args([
            "column-fill",
            "--column",
            "[1]",
            "--value",
            "none",
            "--column-if",
            "0==yes",
            "--header",
            "1",
        ])
        .write_stdin("flag,val\nyes,\nno,\n")
        .assert()
        .success()
        .stdout("flag,val\nyes,none\nno,\n");
}

#[test]
fn test_column_fill_bad_condition() {
    csvprep()
        .args(["column-fill", "--column", "[0]", "--column-if", "0>=1"])
        .write_stdin("a\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_column_move() {
    csvprep()
        .args(["column-move", "--from", "[0]", "--to", "[2]"])
        .write_stdin("a,b,c\n")
        .assert()
        .success()
        .stdout("b,c,a\n");
}

#[test]
fn test_column_move_count_mismatch() {
    csvprep()
        .args(["column-move", "--from", "[0,1]", "--to", "[2]"])
        .write_stdin("a,b,c\n")
        .assert()
        .failure()
        .stdout("");
}

#[test]
fn test_column_quote_and_replace() {
    csvprep()
        .args(["column-quote", "--column", "[0]"])
        .write_stdin("a,b\n\"q\",c\n")
        .assert()
        .success()
        .stdout("\"a\",b\n\"q\",c\n");

    csvprep()
        .args([
            "column-replace",
            "--column",
            "[1]",
            "--regex",
            "(\\d+)-(\\d+)",
            "--repl",
            "$2-$1",
        ])
        .write_stdin("x,10-20\n")
        .assert()
        .success()
        .stdout("x,20-10\n");
}

#[test]
fn test_column_select() {
    csvprep()
        .args(["column-select", "--column", "[2,0]"])
        .write_stdin("a,b,c\n1,2,3\n")
        .assert()
        .success()
        .stdout("c,a\n3,1\n");
}

#[test]
fn test_column_sort_typed_reverse() {
    csvprep()
        .args([
            "column-sort",
            "--column-key",
            "[0]",
            "--column-attr",
            "[int]",
            "--reverse",
        ])
        .write_stdin("2\n10\n1\n")
        .assert()
        .success()
        .stdout("10\n2\n1\n");
}

#[test]
fn test_column_sort_unparsable_key() {
    csvprep()
        .args(["column-sort", "--column-key", "[0]", "--column-attr", "[int]"])
        .write_stdin("2\nabc\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("abc"));
}

#[test]
fn test_delimiter_and_trim() {
    csvprep()
        .args(["--delimiter", ";", "--trim", "column-del", "--column", "[0]"])
        .write_stdin(" a ; b \n")
        .assert()
        .success()
        .stdout("b\n");
}

#[test]
fn test_header_commands() {
    let dir = TempDir::new().unwrap();
    let old = write(&dir, "old_header.csv", "id,name\n");
    let new = write(&dir, "new_header.csv", "ID,NAME\n#,#\n");

    csvprep()
        .args(["csv-header-add", "--add-header"])
        .arg(&old)
        .write_stdin("1,x\n")
        .assert()
        .success()
        .stdout("id,name\n1,x\n");

    csvprep()
        .args(["csv-header-change", "--input-header"])
        .arg(&old)
        .arg("--output-header")
        .arg(&new)
        .write_stdin("id,name\n1,x\n")
        .assert()
        .success()
        .stdout("ID,NAME\n#,#\n1,x\n");

    csvprep()
        .args(["csv-header-del", "--input-header"])
        .arg(&new)
        .write_stdin("ID,NAME\n#,#\n1,x\n")
        .assert()
        .success()
        .stdout("1,x\n");

    csvprep()
        .args(["csv-header-del", "--header", "1"])
        .write_stdin("h\n1\n")
        .assert()
        .success()
        .stdout("1\n");
}

#[test]
fn test_header_change_rejects_wrong_header() {
    let dir = TempDir::new().unwrap();
    let old = write(&dir, "old_header.csv", "id,name\n");
    let new = write(&dir, "new_header.csv", "ID,NAME\n");

    csvprep()
        .args(["csv-header-change", "--input-header"])
        .arg(&old)
        .arg("--output-header")
        .arg(&new)
        .write_stdin("other,header\n1,x\n")
        .assert()
        .failure();
}

#[test]
fn test_header_del_needs_source() {
    csvprep()
        .arg("csv-header-del")
        .write_stdin("h\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--input-header"));
}

#[test]
fn test_filetype_and_report() {
    let dir = TempDir::new().unwrap();
    let info = dir.path().join("info");
    fs::create_dir(&info).unwrap();
    fs::write(info.join("sales_header.csv"), "date,amount\n").unwrap();
    let known = write(&dir, "known.csv", "date,amount\n1,2\n3\n");
    let unknown = write(&dir, "unknown.csv", "x\n");

    csvprep()
        .arg("csv-filetype")
        .arg("--csv-info-dir")
        .arg(&info)
        .arg(&known)
        .arg(&unknown)
        .assert()
        .success()
        .stdout(predicate::str::contains("\tsales\n"))
        .stdout(predicate::str::contains("\t***unknown***\n"));

    let output = csvprep()
        .arg("csv-report")
        .arg("--csv-info-dir")
        .arg(&info)
        .arg(&known)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let report: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(report[0]["csv_type_name"], "sales");
    assert_eq!(report[0]["header_row_count"], 1);
    assert_eq!(report[0]["column_count_min"], 1);
    assert_eq!(report[0]["column_count_max"], 2);
    assert_eq!(report[0]["row_count"], 3);
}

#[test]
fn test_missing_input_file() {
    csvprep()
        .args(["column-del", "--column", "[0]", "-i", "/nonexistent/input.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read"));
}

#[test]
fn test_custom_header_get() {
    csvprep()
        .arg("custom-header-get")
        .write_stdin("grp,\na,b\n==,\n1,2\n")
        .assert()
        .success()
        .stdout("grp,\na,b\n==,\n");
}

#[test]
fn test_custom_header_line1() {
    csvprep()
        .args(["--trim", "custom-header-line1"])
        .write_stdin("id, grp ,\n  ,a , b\n==,,\n1,2,3\n")
        .assert()
        .success()
        .stdout("id,grp_a,grp_b\n");
}

#[test]
fn test_column_sort_wide_int_keys() {
    csvprep()
        .args(["column-sort", "--column-key", "[0]", "--column-attr", "[int]"])
        .write_stdin("99999999999999999999\n1\n")
        .assert()
        .success()
        .stdout("1\n99999999999999999999\n");
}

#[test]
fn test_column_fill_from_column() {
    csvprep()
        .args([
            "column-fill",
            "--column",
            "[1]",
            "--value-source",
            "column",
            "--value",
            "0",
        ])
        .write_stdin("a,\nb,c\n")
        .assert()
        .success()
        .stdout("a,a\nb,c\n");
}

#[test]
fn test_column_replace_bad_regex() {
    csvprep()
        .args(["column-replace", "--column", "[0]", "--regex", "(", "--repl", ""])
        .write_stdin("a\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid --regex"));
}
