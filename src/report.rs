use crate::header::{Field, HeaderRecord};
use crate::spoofing::{WarningList, evaluate};
use crate::{Config, OutputFormat, Result};
use serde::Serialize;
use std::fmt;

/// Outcome of one analysis: the parsed record and the heuristic findings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub record: HeaderRecord,
    pub warnings: WarningList,
}

impl Report {
    pub fn new(record: HeaderRecord) -> Self {
        let warnings = evaluate(&record.received);
        Report { record, warnings }
    }

    pub fn render(&self, config: &Config) -> Result<String> {
        match config.format {
            OutputFormat::Text => Ok(self.render_text(&config.placeholder)),
            OutputFormat::Json => self.render_json(),
        }
    }

    pub fn render_text(&self, placeholder: &str) -> String {
        TextReport {
            report: self,
            placeholder,
        }
        .to_string()
    }

    pub fn render_json(&self) -> Result<String> {
        let record = &self.record;
        let view = JsonReport {
            fields: JsonFields {
                from: record.get(Field::From),
                to: record.get(Field::To),
                subject: record.get(Field::Subject),
                date: record.get(Field::Date),
                message_id: record.get(Field::MessageId),
            },
            received_path: record.received.entries(),
            spoofing_analysis: &self.warnings,
        };
        let mut out = serde_json::to_string_pretty(&view)?;
        out.push('\n');
        Ok(out)
    }
}

struct TextReport<'a> {
    report: &'a Report,
    placeholder: &'a str,
}

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let record = &self.report.record;
        for field in Field::ALL {
            writeln!(f, "{}: {}", field, record.get(field).unwrap_or(self.placeholder))?;
        }
        writeln!(f, "Received Path:")?;
        for entry in record.received.entries() {
            writeln!(f, "  - {entry}")?;
        }
        writeln!(f)?;
        writeln!(f, "Spoofing Analysis:")?;
        for warning in &self.report.warnings {
            writeln!(f, "- {warning}")?;
        }
        Ok(())
    }
}

#[derive(Serialize)]
struct JsonFields<'a> {
    #[serde(rename = "From")]
    from: Option<&'a str>,
    #[serde(rename = "To")]
    to: Option<&'a str>,
    #[serde(rename = "Subject")]
    subject: Option<&'a str>,
    #[serde(rename = "Date")]
    date: Option<&'a str>,
    #[serde(rename = "Message-ID")]
    message_id: Option<&'a str>,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    fields: JsonFields<'a>,
    received_path: Vec<&'a str>,
    spoofing_analysis: &'a WarningList,
}

#[test]
fn test_render_empty_record() {
    let report = Report::new(HeaderRecord::default());
    assert_eq!(
        report.render_text("None"),
        "From: None\n\
         To: None\n\
         Subject: None\n\
         Date: None\n\
         Message-ID: None\n\
         Received Path:\n  \
         - No Received headers found.\n\
         \n\
         Spoofing Analysis:\n\
         - No received headers to analyze for spoofing.\n"
    );
}

#[test]
fn test_render_placeholder() {
    let record = HeaderRecord {
        subject: Some("hello".to_string()),
        ..Default::default()
    };
    let text = Report::new(record).render_text("(absent)");
    assert!(text.starts_with("From: (absent)\nTo: (absent)\nSubject: hello\n"));
}
