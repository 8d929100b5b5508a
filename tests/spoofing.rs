use hdrcheck::{Warning, analyze, analyze_str};

fn received(n: usize, hop: &str) -> String {
    let mut text = String::from("From: a@example.org\r\nTo: b@example.net\r\n");
    for i in 0..n {
        text.push_str(&format!("Received: from relay{i}.example.net {hop}\r\n"));
    }
    text
}

#[test]
fn no_received_headers() {
    let report = analyze_str("From: a@example.org\r\nSubject: hello\r\n");
    assert_eq!(report.warnings, [Warning::NoReceivedHeaders]);
    assert_eq!(
        report.warnings[0].to_string(),
        "No received headers to analyze for spoofing."
    );
}

#[test]
fn six_clean_hops() {
    let report = analyze_str(&received(6, "by mx.example.net with ESMTP"));
    assert_eq!(report.record.hop_count(), 6);
    assert_eq!(report.warnings, [Warning::TooManyHops]);
}

#[test]
fn five_clean_hops() {
    let report = analyze_str(&received(5, "by mx.example.net with ESMTP"));
    assert_eq!(report.warnings, [Warning::NoSignsOfSpoofing]);
}

#[test]
fn spf_fail_case_insensitive() {
    let text = "Received: from a.example by b.example; SPF=FAIL smtp.mailfrom=x\r\n\
                Received: from c.example by a.example; spf=pass\r\n";
    let report = analyze_str(text);
    assert_eq!(report.warnings, [Warning::SpfFailed]);
    assert_eq!(report.warnings[0].to_string(), "SPF check failed.");
}

#[test]
fn single_clean_hop() {
    let report = analyze_str(&received(1, "by mx.example.net"));
    assert_eq!(report.warnings, [Warning::NoSignsOfSpoofing]);
    assert_eq!(
        report.warnings[0].to_string(),
        "No obvious signs of spoofing detected."
    );
}

#[test]
fn failures_in_every_hop_are_reported() {
    let report = analyze_str(&received(2, "dkim=fail spf=fail"));
    assert_eq!(
        report.warnings,
        [
            Warning::SpfFailed,
            Warning::DkimFailed,
            Warning::SpfFailed,
            Warning::DkimFailed
        ]
    );
}

#[test]
fn marker_split_by_folding_is_not_matched() {
    // unfolding inserts a space, so the literal marker no longer appears
    let report = analyze_str("Received: from a by b; dkim=\r\n fail\r\n");
    assert_eq!(report.warnings, [Warning::NoSignsOfSpoofing]);
}

#[test]
fn fixture_with_failures() {
    let mail_buffer = std::fs::read("tests/parse_002.eml").unwrap();
    let report = analyze(&mail_buffer);
    assert_eq!(
        report.warnings,
        [
            Warning::TooManyHops,
            Warning::SpfFailed,
            Warning::DkimFailed
        ]
    );
}

#[test]
fn deterministic() {
    let mail_buffer = std::fs::read("tests/parse_001.eml").unwrap();
    let first = analyze(&mail_buffer).render_text("None");
    let second = analyze(&mail_buffer).render_text("None");
    assert_eq!(first, second);
}
