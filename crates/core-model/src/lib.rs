//! Line classification (spec component B).
//!
//! `Classifier` holds the ordered rule tables and the skip countdown and
//! implements a fixed evaluation order: active skip countdown, then skip
//! rules, then heading rules, then level rules, each in declaration order,
//! falling through to `Regular` when nothing matches. Rule construction is
//! infallible here by design: callers (`core-config`) are responsible for
//! validating skip counts (`>= 1`) and regex patterns before handing them
//! to [`ClassifierBuilder`]; this crate only encodes the mechanics of
//! evaluation order, not option parsing.

use regex::Regex;

/// The class assigned to a single classified line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineClass {
    /// Printed as-is on its own line; does not flush the live status.
    Heading,
    /// Updates the status table at `level`, clearing all higher levels.
    Context(u32),
    /// Flushes the current status (promoting it to permanent output) and
    /// prints the line.
    Regular,
}

#[derive(Debug, Clone, Copy, Default)]
struct SkipState {
    remaining: u32,
}

struct SkipRule {
    count: u32,
    pattern: Regex,
}

struct LevelRule {
    level: u32,
    pattern: Regex,
}

/// Builds up the ordered rule tables one `--*-regex` flag at a time, in
/// declaration order, matching the CLI's repeatable flags.
#[derive(Default)]
pub struct ClassifierBuilder {
    skip_rules: Vec<SkipRule>,
    heading_rules: Vec<Regex>,
    level_rules: Vec<LevelRule>,
}

impl ClassifierBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// `count` must be `>= 1`; the caller validates this (see module docs).
    pub fn add_skip_rule(&mut self, count: u32, pattern: Regex) -> &mut Self {
        debug_assert!(count >= 1, "skip count must be >= 1");
        self.skip_rules.push(SkipRule { count, pattern });
        self
    }

    pub fn add_heading_rule(&mut self, pattern: Regex) -> &mut Self {
        self.heading_rules.push(pattern);
        self
    }

    pub fn add_level_rule(&mut self, level: u32, pattern: Regex) -> &mut Self {
        self.level_rules.push(LevelRule { level, pattern });
        self
    }

    pub fn build(self) -> Classifier {
        Classifier {
            skip_rules: self.skip_rules,
            heading_rules: self.heading_rules,
            level_rules: self.level_rules,
            skip_state: SkipState::default(),
        }
    }
}

pub struct Classifier {
    skip_rules: Vec<SkipRule>,
    heading_rules: Vec<Regex>,
    level_rules: Vec<LevelRule>,
    skip_state: SkipState,
}

impl Classifier {
    pub fn builder() -> ClassifierBuilder {
        ClassifierBuilder::new()
    }

    /// Classify one complete line. `bypass` is set for lines assembled from
    /// [`core_text::FrameEvent::EndOfPartialRun`]: those skip every rule
    /// below and are always `Regular`.
    ///
    /// Returns `None` when the line is consumed by a skip countdown (either
    /// already in progress or newly triggered) — no event is produced.
    pub fn classify(&mut self, line: &str, bypass: bool) -> Option<LineClass> {
        if bypass {
            return Some(LineClass::Regular);
        }

        // 1. Existing skip countdown.
        if self.skip_state.remaining > 0 {
            self.skip_state.remaining -= 1;
            tracing::trace!(target: "classifier", remaining = self.skip_state.remaining, "skip_continue");
            return None;
        }

        // 2. Skip rules, declaration order. The matching line counts as the
        //    first of `count`.
        for rule in &self.skip_rules {
            if rule.pattern.is_match(line) {
                self.skip_state.remaining = rule.count - 1;
                tracing::trace!(target: "classifier", count = rule.count, pattern = %rule.pattern, "skip_start");
                return None;
            }
        }

        // 3. Heading rules, declaration order.
        for pattern in &self.heading_rules {
            if pattern.is_match(line) {
                return Some(LineClass::Heading);
            }
        }

        // 4. Level-context rules, declaration order.
        for rule in &self.level_rules {
            if rule.pattern.is_match(line) {
                return Some(LineClass::Context(rule.level));
            }
        }

        // 5. No match.
        Some(LineClass::Regular)
    }

    /// Lines still pending in an active skip countdown (for diagnostics).
    pub fn skip_remaining(&self) -> u32 {
        self.skip_state.remaining
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn re(s: &str) -> Regex {
        Regex::new(s).unwrap()
    }

    #[test]
    fn no_rules_match_falls_through_to_regular() {
        let mut c = Classifier::builder().build();
        assert_eq!(c.classify("anything", false), Some(LineClass::Regular));
    }

    #[test]
    fn bare_regex_matches_as_level_zero_context() {
        let mut c = Classifier::builder()
            .add_level_rule(0, re("^gcc"))
            .build();
        assert_eq!(c.classify("gcc a.c", false), Some(LineClass::Context(0)));
        assert_eq!(c.classify("warning: x", false), Some(LineClass::Regular));
    }

    #[test]
    fn heading_beats_level_rule_when_both_match() {
        // Heading rules are evaluated before level rules (step 3 before 4).
        let mut c = Classifier::builder()
            .add_heading_rule(re("^-----"))
            .add_level_rule(0, re("^-----|^gcc"))
            .build();
        assert_eq!(c.classify("----- x86 -----", false), Some(LineClass::Heading));
    }

    #[test]
    fn skip_rule_drops_matching_line_and_following_count_minus_one() {
        let mut c = Classifier::builder()
            .add_skip_rule(3, re("^system-header"))
            .build();
        assert_eq!(c.classify("system-header:1: warn", false), None);
        assert_eq!(c.classify("in arg", false), None);
        assert_eq!(c.classify("---^", false), None);
        assert_eq!(c.classify("[compile] f2.o", false), Some(LineClass::Regular));
    }

    #[test]
    fn skip_count_one_only_drops_matching_line() {
        let mut c = Classifier::builder().add_skip_rule(1, re("^drop")).build();
        assert_eq!(c.classify("drop me", false), None);
        assert_eq!(c.classify("keep me", false), Some(LineClass::Regular));
    }

    #[test]
    fn bypass_line_is_always_regular_even_with_matching_patterns() {
        let mut c = Classifier::builder()
            .add_level_rule(0, re(".*"))
            .add_heading_rule(re(".*"))
            .build();
        assert_eq!(c.classify("anything", true), Some(LineClass::Regular));
    }

    #[test]
    fn declaration_order_within_level_rules_first_match_wins() {
        let mut c = Classifier::builder()
            .add_level_rule(0, re("^x86"))
            .add_level_rule(1, re("^x86_64"))
            .build();
        // "x86_64:" matches the level-0 rule too (prefix "x86"); first rule wins.
        assert_eq!(c.classify("x86_64:", false), Some(LineClass::Context(0)));
    }

    #[test]
    fn skip_remaining_reports_active_countdown() {
        let mut c = Classifier::builder().add_skip_rule(3, re("^s")).build();
        c.classify("start", false);
        assert_eq!(c.skip_remaining(), 2);
    }
}
