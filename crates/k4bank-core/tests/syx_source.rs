mod common;

use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use k4bank_core::{
    DecodeError, DecodeOptions, DumpSource, REPORT_VERSION, SourceError, SyxFileSource,
    decode_bank_file,
};

use common::{DUMP_LEN, bank_dump};

fn temp_path(label: &str) -> PathBuf {
    let unique = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("k4bank_{label}_{unique}.syx"))
}

#[test]
fn file_source_reads_whole_dump() {
    let path = temp_path("source");
    fs::write(&path, bank_dump()).unwrap();

    let mut source = SyxFileSource::open(&path).unwrap();
    let bytes = source.read_dump().unwrap();
    let _ = fs::remove_file(&path);

    assert_eq!(bytes.len(), DUMP_LEN);
    assert_eq!(bytes[0], 0xF0);
}

#[test]
fn decode_bank_file_builds_report() {
    let path = temp_path("report");
    fs::write(&path, bank_dump()).unwrap();

    let report = decode_bank_file(&path, &DecodeOptions::default());
    let _ = fs::remove_file(&path);
    let report = report.unwrap();

    assert_eq!(report.report_version, REPORT_VERSION);
    assert_eq!(report.tool.name, "k4tool");
    assert_eq!(report.input.bytes, DUMP_LEN as u64);
    assert_eq!(report.input.path, path.display().to_string());
    assert_eq!(report.bank.singles.len(), 64);

    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(value["bank"]["singles"][0]["name"], "SINGLE 00 ");
    assert_eq!(value["bank"]["identity"]["kind"], "all");
}

#[test]
fn empty_file_is_rejected() {
    let path = temp_path("empty");
    fs::write(&path, []).unwrap();

    let err = decode_bank_file(&path, &DecodeOptions::default()).unwrap_err();
    let _ = fs::remove_file(&path);

    assert!(matches!(err, DecodeError::Source(SourceError::Empty)));
}
