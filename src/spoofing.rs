use crate::header::RelayPath;
use serde::{Serialize, Serializer};
use std::fmt;

/// More hops than this is reported as an unusually long relay chain.
pub const MAX_HOPS: usize = 5;

const SPF_FAIL: &str = "spf=fail";
const DKIM_FAIL: &str = "dkim=fail";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Warning {
    NoReceivedHeaders,
    TooManyHops,
    SpfFailed,
    DkimFailed,
    NoSignsOfSpoofing,
}

impl Warning {
    pub fn text(self) -> &'static str {
        match self {
            Warning::NoReceivedHeaders => "No received headers to analyze for spoofing.",
            Warning::TooManyHops => "Email passed through an unusually high number of servers.",
            Warning::SpfFailed => "SPF check failed.",
            Warning::DkimFailed => "DKIM check failed.",
            Warning::NoSignsOfSpoofing => "No obvious signs of spoofing detected.",
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

impl Serialize for Warning {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.text())
    }
}

pub type WarningList = Vec<Warning>;

/// Run the spoofing heuristics over a relay path.
///
/// The authentication markers are plain case-insensitive substrings; a hop
/// carrying a marker twice still counts once, but every hop is counted.
pub fn evaluate(path: &RelayPath) -> WarningList {
    let hops = match path {
        RelayPath::NotFound => {
            log::debug!("no relay hops, skipping spoofing rules");
            return vec![Warning::NoReceivedHeaders];
        }
        RelayPath::Hops(hops) => hops,
    };

    let mut warnings = WarningList::new();
    if hops.len() > MAX_HOPS {
        log::debug!("hop count {} exceeds {MAX_HOPS}", hops.len());
        warnings.push(Warning::TooManyHops);
    }
    for (idx, hop) in hops.iter().enumerate() {
        let hop = hop.to_lowercase();
        if hop.contains(SPF_FAIL) {
            log::debug!("hop {idx}: {SPF_FAIL}");
            warnings.push(Warning::SpfFailed);
        }
        if hop.contains(DKIM_FAIL) {
            log::debug!("hop {idx}: {DKIM_FAIL}");
            warnings.push(Warning::DkimFailed);
        }
    }
    if warnings.is_empty() {
        warnings.push(Warning::NoSignsOfSpoofing);
    }
    warnings
}

#[cfg(test)]
fn path(hops: &[&str]) -> RelayPath {
    RelayPath::from_hops(hops.iter().map(|h| h.to_string()).collect())
}

#[test]
fn test_not_found() {
    assert_eq!(evaluate(&RelayPath::NotFound), [Warning::NoReceivedHeaders]);
}

#[test]
fn test_hop_threshold() {
    assert_eq!(evaluate(&path(&["x"; 5])), [Warning::NoSignsOfSpoofing]);
    assert_eq!(evaluate(&path(&["x"; 6])), [Warning::TooManyHops]);
}

#[test]
fn test_markers_per_hop() {
    let warnings = evaluate(&path(&[
        "by mx; spf=fail dkim=FAIL",
        "by relay; Spf=Fail spf=fail",
        "by clean; spf=pass dkim=pass",
    ]));
    assert_eq!(
        warnings,
        [Warning::SpfFailed, Warning::DkimFailed, Warning::SpfFailed]
    );
}

#[test]
fn test_blank_hop() {
    assert_eq!(evaluate(&path(&[""])), [Warning::NoSignsOfSpoofing]);
}

#[test]
fn test_rules_combine() {
    let mut hops = vec!["hop"; 7];
    hops[6] = "dkim=fail";
    assert_eq!(
        evaluate(&path(&hops)),
        [Warning::TooManyHops, Warning::DkimFailed]
    );
}
