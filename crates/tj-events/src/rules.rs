//! Event-name cleaning as explicit, ordered substitution rules.
//!
//! Different data sources (and the same source at different times) decorate
//! recurring releases with date suffixes: `Consumer Confidence (May)`,
//! `Initial Jobless Claims Oct25`, `CPI m/m 10/15/2024`. Matching needs the
//! undecorated name.
//!
//! A [`RuleSet`] applies its rules in order and repeats the pass until nothing
//! changes, so cleaning is idempotent even when suffixes are stacked.
//! Every rule is anchored at the end of the name and removes a non-empty
//! match, which bounds the number of passes by the input length.
//!
//! Month names are matched in their capitalized form only; data sources
//! emit them that way and lower-case words are left alone.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

const MONTH: &str = "(?:Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)";
const MONTH_FULL: &str =
    "(?:January|February|March|April|May|June|July|August|September|October|November|December)";
/// Full name, abbreviation or "Sept"; never an arbitrary word sharing a prefix.
const MONTH_NAME: &str = "(?:January|February|March|April|May|June|July|August|September|October|November|December|Sept|Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)";

// ---------------------------------------------------------------------------
// CleaningRule / RuleSet
// ---------------------------------------------------------------------------

/// One named suffix-stripping rule.
#[derive(Debug, Clone)]
pub struct CleaningRule {
    name: &'static str,
    pattern: Regex,
}

impl CleaningRule {
    fn new(name: &'static str, pattern: &str) -> Self {
        Self {
            name,
            pattern: Regex::new(pattern).unwrap(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn apply<'a>(&self, s: &'a str) -> Cow<'a, str> {
        self.pattern.replace(s, "")
    }
}

/// An ordered list of cleaning rules applied to a fixpoint.
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<CleaningRule>,
}

impl RuleSet {
    pub fn rules(&self) -> &[CleaningRule] {
        &self.rules
    }

    pub fn clean(&self, raw: &str) -> String {
        let mut current = raw.trim().to_string();
        loop {
            let mut changed = false;
            for rule in &self.rules {
                let next = rule.apply(&current);
                if next != current {
                    current = next.trim().to_string();
                    changed = true;
                }
            }
            if !changed {
                return current;
            }
        }
    }
}

fn pinning_rules() -> Vec<CleaningRule> {
    vec![
        // "Consumer Confidence (May)", "PMI (Sept.)"
        CleaningRule::new("paren_month", &format!(r"\s*\({MONTH_NAME}\.?\)\s*$")),
        // "Budget Balance (2024)"
        CleaningRule::new("paren_year", r"\s*\(\d{4}\)\s*$"),
        // "Trade Balance Sep", "Initial Jobless Claims Oct25"
        CleaningRule::new("month_abbrev_day", &format!(r"\s+{MONTH}(?:\d{{2}})?\s*$")),
        // "Housing Starts 2024"
        CleaningRule::new("bare_year", r"\s+\d{4}\s*$"),
        // "CPI m/m 10/15/2024"
        CleaningRule::new("us_date", r"\s+\d{1,2}/\d{1,2}/\d{4}\s*$"),
    ]
}

/// Multi-token conventions run first: the single-token pinning rules would
/// otherwise take "Oct" off "25 Oct" and leave the day behind.
fn base_name_rules() -> Vec<CleaningRule> {
    let mut rules = vec![
        // "Retail Sales (Oct 2024)"
        CleaningRule::new(
            "paren_month_year",
            &format!(r"\s*\({MONTH_NAME}\.?\s+\d{{4}}\)\s*$"),
        ),
        // "Retail Sales (10/15)", "Retail Sales (10/15/2024)"
        CleaningRule::new(
            "paren_us_date",
            r"\s*\(\d{1,2}/\d{1,2}(?:/\d{2,4})?\)\s*$",
        ),
        // "GDP q/q Oct 25", "GDP q/q October 25, 2024"
        CleaningRule::new(
            "month_spaced_day",
            &format!(r"\s+{MONTH_NAME}\.?\s+\d{{1,2}}(?:,?\s+\d{{4}})?\s*$"),
        ),
        // "GDP q/q 25 Oct"
        CleaningRule::new("day_month", &format!(r"\s+\d{{1,2}}\s+{MONTH_NAME}\.?\s*$")),
        // "GDP q/q 2024-10-25"
        CleaningRule::new("iso_date", r"\s+\d{4}-\d{2}-\d{2}\s*$"),
        // "Industrial Production October"
        CleaningRule::new("month_full", &format!(r"\s+{MONTH_FULL}\s*$")),
    ];
    rules.extend(pinning_rules());
    // "CPI - Oct" leaves "CPI -" behind
    rules.push(CleaningRule::new("dangling_separator", r"\s*[-–—:,|]+\s*$"));
    rules
}

static PINNING: LazyLock<RuleSet> = LazyLock::new(|| RuleSet {
    rules: pinning_rules(),
});

static BASE_NAME: LazyLock<RuleSet> = LazyLock::new(|| RuleSet {
    rules: base_name_rules(),
});

/// Rules used to derive the stored name of a pinned event.
pub fn pinning_rule_set() -> &'static RuleSet {
    &PINNING
}

/// Pinning rules extended with the other date-suffix conventions seen across
/// sources. Used when correlating trade-embedded events.
pub fn base_name_rule_set() -> &'static RuleSet {
    &BASE_NAME
}

/// Strip trailing date/month annotations so the name is a stable pin key.
pub fn clean_event_name_for_pinning(raw_name: &str) -> String {
    PINNING.clean(raw_name)
}

/// Base event name with every known date-suffix convention removed.
pub fn base_event_name(raw_name: &str) -> String {
    BASE_NAME.clean(raw_name)
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
