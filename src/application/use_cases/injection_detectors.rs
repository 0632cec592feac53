//! Injection pattern detectors
//!
//! Heuristic tripwires over raw cell text: substring and regex checks,
//! not SQL or HTML parsers. A match means "suspicious enough to refuse",
//! never a proof of exploitability, and a clean pass is no guarantee.
//! Detectors are a named capability so a host can swap in stronger
//! implementations (a real tokenizer, say) without touching the
//! validator contract.

use once_cell::sync::Lazy;
use regex::Regex;

/// A named check that flags suspicious cell content
pub trait InjectionDetector: Send + Sync {
    /// Stable detector name, used in violation messages
    fn name(&self) -> &'static str;

    /// Whether the cell trips this detector
    fn detects(&self, cell: &str) -> bool;
}

static SQL_KEYWORD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(SELECT|INSERT|UPDATE|DELETE|DROP|CREATE|ALTER|EXEC|UNION)\b")
        .expect("SQL keyword pattern is valid")
});

/// Substrings associated with SQL injection payloads
const SQL_FRAGMENTS: [&str; 6] = ["--", ";", "/*", "*/", "xp_", "sp_"];

/// Flags SQL reserved keywords (as whole words, any case) and
/// comment/statement fragments
pub struct SqlPatternDetector;

impl InjectionDetector for SqlPatternDetector {
    fn name(&self) -> &'static str {
        "sql pattern"
    }

    fn detects(&self, cell: &str) -> bool {
        SQL_KEYWORD_RE.is_match(cell) || SQL_FRAGMENTS.iter().any(|f| cell.contains(f))
    }
}

static SCRIPT_TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<script\b[^>]*>.*?</script>").expect("script tag pattern is valid"));

static EVENT_HANDLER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bon\w+\s*=").expect("event handler pattern is valid"));

/// Flags `<script>` elements, `javascript:` URLs and HTML
/// event-handler attribute assignments
pub struct ScriptPatternDetector;

impl InjectionDetector for ScriptPatternDetector {
    fn name(&self) -> &'static str {
        "script pattern"
    }

    fn detects(&self, cell: &str) -> bool {
        SCRIPT_TAG_RE.is_match(cell)
            || cell.to_lowercase().contains("javascript:")
            || EVENT_HANDLER_RE.is_match(cell)
    }
}

/// The detector set shipped by default
pub fn default_detectors() -> Vec<Box<dyn InjectionDetector>> {
    vec![Box::new(SqlPatternDetector), Box::new(ScriptPatternDetector)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sql_keywords_match_as_whole_words() {
        let detector = SqlPatternDetector;
        assert!(detector.detects("DROP TABLE users"));
        assert!(detector.detects("please select everything"));
        assert!(detector.detects("Union Station")); // heuristic, by intent
        assert!(!detector.detects("a selection of items"));
        assert!(!detector.detects("updates pending"));
    }

    #[test]
    fn sql_fragments_match_anywhere() {
        let detector = SqlPatternDetector;
        assert!(detector.detects("1; rm -rf"));
        assert!(detector.detects("value -- comment"));
        assert!(detector.detects("/* hidden */"));
        assert!(detector.detects("xp_cmdshell"));
        assert!(!detector.detects("O'Brien"));
        assert!(!detector.detects("plain text"));
    }

    #[test]
    fn script_elements_are_detected() {
        let detector = ScriptPatternDetector;
        assert!(detector.detects("<script>alert(1)</script>"));
        assert!(detector.detects("<SCRIPT type=\"text/javascript\">x</SCRIPT>"));
        assert!(detector.detects("<script>\nalert(1)\n</script>"));
        assert!(!detector.detects("<b>bold</b>"));
    }

    #[test]
    fn javascript_urls_and_event_handlers_are_detected() {
        let detector = ScriptPatternDetector;
        assert!(detector.detects("JAVASCRIPT:alert(1)"));
        assert!(detector.detects("<img src=x onerror=alert(1)>"));
        assert!(detector.detects("onclick = doThing()"));
        assert!(!detector.detects("monday=payday"));
        assert!(!detector.detects("confirmation"));
    }
}
