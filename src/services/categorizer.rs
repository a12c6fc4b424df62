//! Package categorization by name pattern
//!
//! Rules are tried in order and the first hit wins. Several rules overlap on
//! purpose: the specific rules (EV charging, weatherproof outlets) sit ahead
//! of the generic ones, and the generic ones additionally refuse names where
//! the specific keyword appears after their match.

use regex::Regex;
use std::sync::LazyLock;

/// Category for names no rule matches
pub const OTHER_SERVICES: &str = "Other Services";

struct Rule {
    pattern: Regex,
    /// Reject a match when this text follows it on the same line
    unless_followed_by: Option<&'static str>,
    category: &'static str,
}

impl Rule {
    fn new(pattern: &str, category: &'static str) -> Self {
        Self {
            pattern: Regex::new(pattern).expect("valid category pattern"),
            unless_followed_by: None,
            category,
        }
    }

    fn unless_followed_by(mut self, excluded: &'static str) -> Self {
        self.unless_followed_by = Some(excluded);
        self
    }

    fn matches(&self, name: &str) -> bool {
        self.pattern.find_iter(name).any(|m| match self.unless_followed_by {
            None => true,
            Some(excluded) => !rest_of_line(&name[m.end()..]).contains(excluded),
        })
    }
}

fn rest_of_line(text: &str) -> &str {
    text.split('\n').next().unwrap_or_default()
}

static RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        Rule::new(r"PANEL|SERVICE.*PANEL|SUB PANEL", "Panel Upgrades"),
        Rule::new(r"SURGE", "Surge Protection"),
        Rule::new(r"E CAR|EV CIRCUIT|EV CHARGER", "EV Charging"),
        Rule::new(r"HOT TUB", "Hot Tub Circuits"),
        Rule::new(r"240V.*CKT", "Heavy Duty Circuits").unless_followed_by("EV"),
        Rule::new(r"OUTLET.*WP|WP.*OUTLET", "Exterior Outlets"),
        Rule::new(r"FLOOD|SOFFIT|COACH LT|LANDSCAPE", "Exterior Lighting"),
        Rule::new(r"RCAN|WAFER|RECESSED", "Recessed Lighting"),
        Rule::new(r"TAPE LT", "LED Tape Lighting"),
        Rule::new(r"OUTLET|SWITCH|DIMMER|RECEPTACLE", "Outlets & Switches").unless_followed_by("WP"),
        Rule::new(r"FIXTURE|LIGHT BOX|CHANDELIER|PENDANT", "Interior Lighting"),
        Rule::new(r"FAN|CEILING FAN", "Ceiling Fans"),
        Rule::new(r"EXHAUST|BATH FAN|VENT FAN", "Bathrooms"),
        Rule::new(r"GEN |GENERATOR|18KW|22KW|24KW|26KW", "Home Generators"),
        Rule::new(r"INTERLOCK", "Portable Generator"),
        Rule::new(r"AIR CONDITIONER|A/C|AC CIRCUIT", "HVAC Circuits"),
        Rule::new(r"SMOKE|CARBON|CO DETECTOR", "Safety Devices"),
        Rule::new(r"GFCI|GFI", "GFCI Protection"),
        Rule::new(r"BREAKER", "Breakers"),
    ]
});

/// Assign a package to exactly one category based on its raw CRM name.
///
/// # Examples
/// ```
/// use pricebook::services::categorizer::categorize;
///
/// assert_eq!(categorize("240V CKT FOR EV CHARGER"), "EV Charging");
/// assert_eq!(categorize("WP OUTLET EXTERIOR"), "Exterior Outlets");
/// assert_eq!(categorize("misc trip charge"), "Other Services");
/// ```
pub fn categorize(name: &str) -> &'static str {
    let upper = name.to_uppercase();
    RULES
        .iter()
        .find(|rule| rule.matches(&upper))
        .map(|rule| rule.category)
        .unwrap_or(OTHER_SERVICES)
}

/// Every category a rule can produce, in rule order, without the fallback
#[cfg(test)]
pub(crate) fn rule_categories() -> impl Iterator<Item = &'static str> {
    RULES.iter().map(|rule| rule.category)
}
