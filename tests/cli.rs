use hdrcheck::cli::{cmd_check, cmd_dump};
use hdrcheck::{Config, Error, OutputFormat};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

fn header_file(content: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content).unwrap();
    file
}

#[test]
fn test_check_file() {
    let file = header_file(b"From: a@example.org\nReceived: from x by y\n");
    let config = Config {
        placeholder: "-".to_string(),
        ..Default::default()
    };
    let output = cmd_check(&config, Some(file.path())).unwrap();
    assert!(output.starts_with("From: a@example.org\nTo: -\nSubject: -\n"));
    assert!(output.contains("Received Path:\n  - from x by y\n"));
    assert!(output.ends_with("- No obvious signs of spoofing detected.\n"));
}

#[test]
fn test_check_json() {
    let file = header_file(b"Subject: hello\n");
    let config = Config {
        format: OutputFormat::Json,
        ..Default::default()
    };
    let output = cmd_check(&config, Some(file.path())).unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value["fields"]["Subject"], "hello");
}

#[test]
fn test_check_missing_file() {
    let err = cmd_check(&Config::default(), Some(Path::new("/nonexistent/headers.txt")))
        .unwrap_err();
    assert!(matches!(err, Error::Read { .. }));
    assert!(err.to_string().contains("/nonexistent/headers.txt"));
}

#[test]
fn test_dump() {
    let file = header_file(
        b"Received: from a\n  by b\nX-Spam-Score: 3.2\nSubject: hi\nreceived: from c by a\n",
    );
    let output = cmd_dump(file.path()).unwrap();
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "Received: from a by b");
    assert_eq!(lines[1], "X-Spam-Score: 3.2");
    assert_eq!(lines[2], "Subject: hi");
    assert_eq!(lines[3], "Received: from c by a");
}
