//! Integration tests for the CNXML linter.
//!
//! These run the full pipeline (walk, parse, segment, check, CSV) against
//! the fixture book with an in-memory grammar checker.

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use cnxml_linter::checker::MatchRule;
use cnxml_linter::output::CsvIssueWriter;
use cnxml_linter::profile::SuppressionSet;
use cnxml_linter::xml::{Document, NodeId};
use cnxml_linter::{
    create_cnxml_profile, GrammarChecker, GrammarMatch, Issue, LintError, LintProfile, Linter,
    Result,
};
use pretty_assertions::assert_eq;

fn fixture_book() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/book")
}

/// Reports the first occurrence of each scripted phrase unless its rule
/// is disabled, the way a LanguageTool server would.
struct ScriptedChecker {
    findings: Vec<(&'static str, &'static str, &'static str)>,
    requests: RefCell<Vec<(String, SuppressionSet)>>,
}

impl ScriptedChecker {
    fn new(findings: Vec<(&'static str, &'static str, &'static str)>) -> Self {
        Self {
            findings,
            requests: RefCell::new(Vec::new()),
        }
    }

    fn submitted_texts(&self) -> Vec<String> {
        self.requests
            .borrow()
            .iter()
            .map(|(text, _)| text.clone())
            .collect()
    }
}

impl GrammarChecker for ScriptedChecker {
    fn check(&self, text: &str, disabled_rules: &SuppressionSet) -> Result<Vec<GrammarMatch>> {
        self.requests
            .borrow_mut()
            .push((text.to_string(), disabled_rules.clone()));

        let matches = self
            .findings
            .iter()
            .filter(|(_, rule, _)| !disabled_rules.contains(*rule))
            .filter_map(|&(phrase, rule, issue_type)| {
                let start = text.find(phrase)?;
                Some(GrammarMatch {
                    offset: text[..start].encode_utf16().count(),
                    length: phrase.encode_utf16().count(),
                    message: format!("Check '{phrase}'."),
                    rule: MatchRule {
                        id: rule.to_string(),
                        issue_type: issue_type.to_string(),
                    },
                })
            })
            .collect();

        Ok(matches)
    }
}

fn book_checker() -> ScriptedChecker {
    ScriptedChecker::new(vec![
        ("an typical", "EN_A_VS_AN", "misspelling"),
        ("chromosomes:", "PUNCTUATION_PARAGRAPH_END", "typographical"),
        ("the boundary", "UPPERCASE_SENTENCE_START", "typographical"),
        ("chromatin", "UPPERCASE_SENTENCE_START", "typographical"),
        ("A typical", "A_TYPICAL", "style"),
    ])
}

#[test]
fn test_lint_fixture_book_to_csv() {
    let profile = create_cnxml_profile();
    let checker = book_checker();
    let linter = Linter::new(&profile, &checker);

    let mut writer = CsvIssueWriter::new(Vec::new()).unwrap();
    let summary = linter
        .lint_tree(&fixture_book(), "cnxml", &mut writer, |_| {})
        .unwrap();
    let csv = String::from_utf8(writer.into_inner().unwrap()).unwrap();

    let file = fixture_book().join("m1/index.cnxml").display().to_string();
    let expected = format!(
        "page title,type,message,text,rule,file,node path\n\
         Cell Structure,style,Check 'A typical'.,[A typical] cell.,A_TYPICAL,{file},\
         #document > document#m1 > content > section#s1 > figure#fig1 > caption\n\
         Cell Structure,typographical,Check 'chromosomes:'.,The nucleus holds MATH [chromosomes:],\
         PUNCTUATION_PARAGRAPH_END,{file},#document > document#m1 > content > section#s1 > para#p2\n"
    );
    assert_eq!(csv, expected);

    // m2 has no title, m3 is not well-formed
    assert_eq!(summary.files, 1);
    assert_eq!(summary.failed, 2);
    assert_eq!(summary.stats.issues, 2);
    assert_eq!(summary.stats.suppressed, 1);
}

#[test]
fn test_lint_fixture_submitted_blocks() {
    let profile = create_cnxml_profile();
    let checker = book_checker();
    let linter = Linter::new(&profile, &checker);
    let mut issues: Vec<Issue> = Vec::new();

    let stats = linter
        .lint_file(&fixture_book().join("m1/index.cnxml"), &mut issues)
        .unwrap();

    assert_eq!(
        checker.submitted_texts(),
        vec![
            "Cell Structure",
            "A typical cell.",
            "Parts of a cell",
            "Every cell has a membrane. See LINK for\nan overview of an typical cell.",
            "chromatin",
            "nucleolus",
            "The nucleus holds MATH chromosomes:",
            "membrane",
            "the boundary of a cell",
        ]
    );
    assert_eq!(stats.blocks, 9);
}

#[test]
fn test_lint_fixture_disabled_rules_per_block() {
    let profile = create_cnxml_profile();
    let checker = book_checker();
    let linter = Linter::new(&profile, &checker);
    let mut issues: Vec<Issue> = Vec::new();

    linter
        .lint_file(&fixture_book().join("m1/index.cnxml"), &mut issues)
        .unwrap();

    let uppercase: SuppressionSet = ["UPPERCASE_SENTENCE_START".to_string()].into();
    for (text, disabled) in checker.requests.borrow().iter() {
        let expected = match text.as_str() {
            "chromatin" | "nucleolus" | "membrane" | "the boundary of a cell" => uppercase.clone(),
            _ => SuppressionSet::new(),
        };
        assert_eq!(disabled, &expected, "{text}");
    }

    // Neither lowercase fragment was reported
    assert!(issues
        .iter()
        .all(|issue| issue.rule != "UPPERCASE_SENTENCE_START"));
}

#[test]
fn test_lint_fixture_emphasis_match_is_dropped() {
    let profile = create_cnxml_profile();
    let checker = book_checker();
    let linter = Linter::new(&profile, &checker);
    let mut issues: Vec<Issue> = Vec::new();

    let stats = linter
        .lint_file(&fixture_book().join("m1/index.cnxml"), &mut issues)
        .unwrap();

    assert_eq!(stats.suppressed, 1);
    assert!(issues.iter().all(|issue| issue.rule != "EN_A_VS_AN"));
}

#[test]
fn test_lint_tree_custom_extension_finds_nothing() {
    let profile = create_cnxml_profile();
    let checker = book_checker();
    let linter = Linter::new(&profile, &checker);
    let mut issues: Vec<Issue> = Vec::new();
    let mut seen = Vec::new();

    let summary = linter
        .lint_tree(&fixture_book(), "xml", &mut issues, |path| {
            seen.push(path.to_path_buf())
        })
        .unwrap();

    assert!(seen.is_empty());
    assert_eq!(summary.files, 0);
    assert!(issues.is_empty());
}

#[test]
fn test_lint_tree_reports_files_in_order() {
    let profile = create_cnxml_profile();
    let checker = ScriptedChecker::new(Vec::new());
    let linter = Linter::new(&profile, &checker);
    let mut issues: Vec<Issue> = Vec::new();
    let mut seen = Vec::new();

    linter
        .lint_tree(&fixture_book(), "cnxml", &mut issues, |path| {
            seen.push(path.strip_prefix(fixture_book()).unwrap().to_path_buf())
        })
        .unwrap();

    assert_eq!(
        seen,
        vec![
            PathBuf::from("m1/index.cnxml"),
            PathBuf::from("m2/index.cnxml"),
            PathBuf::from("m3/index.cnxml"),
        ]
    );
}

struct BrokenChecker;

impl GrammarChecker for BrokenChecker {
    fn check(&self, _text: &str, _disabled_rules: &SuppressionSet) -> Result<Vec<GrammarMatch>> {
        Err(LintError::CheckerStatus {
            status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
            body: "down".to_string(),
        })
    }
}

#[test]
fn test_lint_tree_checker_failure_aborts() {
    let profile = create_cnxml_profile();
    let linter = Linter::new(&profile, &BrokenChecker);
    let mut issues: Vec<Issue> = Vec::new();

    let err = linter
        .lint_tree(&fixture_book(), "cnxml", &mut issues, |_| {})
        .unwrap_err();

    assert!(matches!(err, LintError::CheckerStatus { .. }));
    assert!(!err.is_file_local());
}

fn assert_monotonic(profile: &LintProfile, doc: &Document, node: NodeId, inherited: &SuppressionSet) {
    let effective = profile.effective_suppressions(doc, node, inherited);
    assert!(
        effective.is_superset(inherited),
        "suppressions shrank at {}",
        doc.node_path(node)
    );

    for &child in doc.children(node) {
        assert_monotonic(profile, doc, child, &effective);
    }
}

#[test]
fn test_suppressions_never_shrink_with_depth() {
    let profile = create_cnxml_profile();
    let xml = std::fs::read_to_string(fixture_book().join("m1/index.cnxml")).unwrap();
    let doc = Document::parse(&xml).unwrap();

    assert_monotonic(&profile, &doc, doc.root(), &SuppressionSet::new());
}

fn rule_set(rules: &[&str]) -> SuppressionSet {
    rules.iter().map(|rule| rule.to_string()).collect()
}

#[test]
fn test_nested_blocks_submit_accumulated_rules() {
    let profile = create_cnxml_profile();
    let checker = ScriptedChecker::new(Vec::new());
    let linter = Linter::new(&profile, &checker);
    let mut issues: Vec<Issue> = Vec::new();

    let xml = "<document><title>Notes</title><content><footnote id=\"f1\">\
               <para>Note text <emphasis>with<list><item>deep item</item></list></emphasis> end.</para>\
               </footnote></content></document>";
    linter
        .lint_source(xml, "notes.cnxml", &mut issues)
        .unwrap();

    let footnote = rule_set(&["SENTENCE_WHITESPACE"]);
    let item = rule_set(&[
        "SENTENCE_WHITESPACE",
        "EN_A_VS_AN",
        "THE_SENT_END",
        "THE_PUNCT",
        "I_LOWERCASE",
        "UPPERCASE_SENTENCE_START",
    ]);
    assert_eq!(
        *checker.requests.borrow(),
        vec![
            ("Notes".to_string(), SuppressionSet::new()),
            ("deep item".to_string(), item.clone()),
            ("Note text with end.".to_string(), footnote.clone()),
        ]
    );

    // The item sits inside the paragraph, so it disables everything the paragraph does
    assert!(item.is_superset(&footnote));
}
