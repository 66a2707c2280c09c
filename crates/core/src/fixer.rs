use regex::Regex;
use std::sync::LazyLock;

#[derive(Debug, Clone)]
pub struct RewriteRule {
    pattern: Regex,
    replacement: String,
}

impl RewriteRule {
    pub fn new(pattern: &str, replacement: impl Into<String>) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
            replacement: replacement.into(),
        })
    }

    pub fn apply(&self, input: &str) -> String {
        self.pattern
            .replace_all(input, self.replacement.as_str())
            .into_owned()
    }
}

// `[0-9]` rather than `\d`: digit runs are ASCII only.
static DEFAULT_RULES: LazyLock<Vec<RewriteRule>> = LazyLock::new(|| {
    vec![
        RewriteRule::new(r" \([0-9]+\)$", "").expect("invalid duplicate counter regex"),
        RewriteRule::new(r"(DSC_[0-9]+)_[0-9]+$", "${1}")
            .expect("invalid segmented capture regex"),
    ]
});

#[derive(Debug, Clone)]
pub struct FilenameFixer {
    rules: Vec<RewriteRule>,
}

impl Default for FilenameFixer {
    fn default() -> Self {
        Self::new()
    }
}

impl FilenameFixer {
    pub fn new() -> Self {
        Self::from_rules(DEFAULT_RULES.clone())
    }

    pub fn from_rules(rules: Vec<RewriteRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[RewriteRule] {
        &self.rules
    }

    /// Applies each rule once, in order, to the previous rule's output. The
    /// pass is not repeated: `"beach (2) (3)"` becomes `"beach (2)"`.
    pub fn fix(&self, filename: &str) -> String {
        self.rules
            .iter()
            .fold(filename.to_string(), |value, rule| rule.apply(&value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fix(input: &str) -> String {
        FilenameFixer::new().fix(input)
    }

    #[test]
    fn strips_trailing_duplicate_counter() {
        assert_eq!(fix("beach (2)"), "beach");
        assert_eq!(fix("IMG_1234 (10)"), "IMG_1234");
    }

    #[test]
    fn keeps_non_numeric_parenthetical() {
        assert_eq!(fix("photo (a)"), "photo (a)");
        assert_eq!(fix("photo (2a)"), "photo (2a)");
        assert_eq!(fix("photo ()"), "photo ()");
    }

    #[test]
    fn duplicate_counter_must_be_at_the_end() {
        assert_eq!(fix("beach (2) edit"), "beach (2) edit");
        assert_eq!(fix("beach(2)"), "beach(2)");
    }

    #[test]
    fn collapses_segmented_capture_suffix() {
        assert_eq!(fix("DSC_0001_2"), "DSC_0001");
        assert_eq!(fix("holiday_DSC_0042_17"), "holiday_DSC_0042");
    }

    #[test]
    fn leaves_plain_capture_name_alone() {
        assert_eq!(fix("DSC_0001"), "DSC_0001");
    }

    #[test]
    fn segmented_suffix_needs_dsc_prefix() {
        assert_eq!(fix("IMG_0001_2"), "IMG_0001_2");
        assert_eq!(fix("dsc_0001_2"), "dsc_0001_2");
        assert_eq!(fix("DSCF_0001_2"), "DSCF_0001_2");
    }

    #[test]
    fn chained_segments_do_not_match() {
        assert_eq!(fix("DSC_0001_2_3"), "DSC_0001_2_3");
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(fix(""), "");
    }

    #[test]
    fn unmarked_names_are_unchanged() {
        for name in ["beach", "IMG_1234", "2019-05-04 10.20.30", "写真 (一)", "a_1"] {
            assert_eq!(fix(name), name);
        }
    }

    #[test]
    fn chained_duplicate_counters_lose_only_the_last() {
        assert_eq!(fix("beach (2) (3)"), "beach (2)");
        // A second call strips the next layer; one call never does both.
        assert_eq!(fix(&fix("beach (2) (3)")), "beach");
    }

    #[test]
    fn stray_closing_paren_blocks_the_counter_rule() {
        assert_eq!(fix("beach (2) (3))"), "beach (2) (3))");
    }

    #[test]
    fn rules_run_in_order_on_previous_output() {
        assert_eq!(fix("DSC_0001_2 (1)"), "DSC_0001");
    }

    #[test]
    fn non_ascii_digits_are_not_counters() {
        assert_eq!(fix("beach (٢)"), "beach (٢)");
    }

    #[test]
    fn custom_rules_can_be_appended() {
        let mut rules = FilenameFixer::new().rules().to_vec();
        rules.push(RewriteRule::new(r"-edited$", "").expect("valid regex"));
        let fixer = FilenameFixer::from_rules(rules);

        assert_eq!(fixer.fix("beach-edited"), "beach");
        assert_eq!(fixer.fix("beach (2)"), "beach");
        assert_eq!(fixer.rules().len(), 3);
    }

    #[test]
    fn invalid_rule_pattern_is_rejected() {
        assert!(RewriteRule::new("(", "").is_err());
    }

    #[test]
    fn shared_fixer_is_usable_from_many_threads() {
        let fixer = FilenameFixer::new();
        let shared = &fixer;
        let inputs = ["beach (2)", "DSC_0001_2", "photo (a)", ""];

        let outputs: Vec<String> = std::thread::scope(|scope| {
            let handles: Vec<_> = inputs
                .iter()
                .map(|input| scope.spawn(move || shared.fix(input)))
                .collect();
            handles
                .into_iter()
                .map(|h| h.join().expect("worker panicked"))
                .collect()
        });

        assert_eq!(outputs, vec!["beach", "DSC_0001", "photo (a)", ""]);
    }
}
