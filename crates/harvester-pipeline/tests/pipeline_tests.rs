//! Crash and resume tests for the fetch and analysis pipelines

use async_trait::async_trait;
use harvester_domain::traits::{ClassifyError, Classifier, IssueSource, Page, SourceError};
use harvester_domain::{Checkpoint, Cursor, Issue, RetryPolicy, ServerMention, TechAnnotation, TechLabel};
use harvester_extractor::{ClassificationConfig, LlmClassifier};
use harvester_llm::MockProvider;
use harvester_pipeline::{
    load_issues, read_issues, AnalysisPipeline, FetchPipeline, OutputConfig, PipelineConfig,
    PipelineError, UnresolvedIssue, UnresolvedReason,
};
use harvester_store::{read_records, CheckpointStore};
use std::collections::{HashMap, HashSet, VecDeque};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::tempdir;

const QUERY: &str = "project = OPS ORDER BY created DESC";

/// In-memory paginated source; page `n` is reached with token `p{n}`
struct ScriptedSource {
    pages: Vec<Vec<Issue>>,
    failures: VecDeque<(usize, SourceError)>,
    reject_tokens: bool,
    malformed: HashMap<usize, usize>,
    block_on_page: Option<(usize, PathBuf)>,
    calls: usize,
}

impl ScriptedSource {
    fn new(pages: Vec<Vec<Issue>>) -> Self {
        Self {
            pages,
            failures: VecDeque::new(),
            reject_tokens: false,
            malformed: HashMap::new(),
            block_on_page: None,
            calls: 0,
        }
    }

    /// Report `count` undecodable entries on `page`
    fn with_malformed(mut self, page: usize, count: usize) -> Self {
        self.malformed.insert(page, count);
        self
    }

    /// Put a directory at `path` when `page` is requested
    fn block_path_on_page(mut self, page: usize, path: PathBuf) -> Self {
        self.block_on_page = Some((page, path));
        self
    }

    /// Fail the request for `page` once with `error`
    fn fail_at(mut self, page: usize, error: SourceError) -> Self {
        self.failures.push_back((page, error));
        self
    }

    fn rejecting_tokens(mut self) -> Self {
        self.reject_tokens = true;
        self
    }
}

#[async_trait]
impl IssueSource for ScriptedSource {
    async fn next_page(&mut self, cursor: &Cursor) -> Result<Page, SourceError> {
        self.calls += 1;
        let index = match cursor {
            Cursor::Start => 0,
            Cursor::Token(token) => {
                if self.reject_tokens {
                    self.reject_tokens = false;
                    return Err(SourceError::InvalidCursor("expired".into()));
                }
                token
                    .trim_start_matches('p')
                    .parse::<usize>()
                    .map_err(|_| SourceError::InvalidCursor(token.clone()))?
            }
            Cursor::Offset(_) => return Err(SourceError::InvalidCursor("offset".into())),
            Cursor::Exhausted => return Ok(Page::last(Vec::new())),
        };

        if let Some(position) = self.failures.iter().position(|(page, _)| *page == index) {
            if let Some((_, error)) = self.failures.remove(position) {
                return Err(error);
            }
        }

        if let Some((page, path)) = &self.block_on_page {
            if *page == index {
                fs::create_dir_all(path).unwrap();
            }
        }

        let items = self.pages.get(index).cloned().unwrap_or_default();
        let next = if index + 1 < self.pages.len() {
            Cursor::Token(format!("p{}", index + 1))
        } else {
            Cursor::Exhausted
        };
        let rejected = self.malformed.get(&index).copied().unwrap_or(0);
        Ok(Page::new(items, next).with_rejected(rejected))
    }
}

fn issue(n: usize) -> Issue {
    Issue::new(
        format!("OPS-{}", n),
        format!("Incident {}", n),
        format!("srv-node{} misbehaving", n % 3),
    )
}

fn five_pages() -> Vec<Vec<Issue>> {
    (0..5).map(|p| (0..4).map(|i| issue(p * 4 + i)).collect()).collect()
}

fn config(dir: &Path) -> PipelineConfig {
    let mut config = PipelineConfig::default();
    config.output = OutputConfig::new(dir);
    config.retry = RetryPolicy::immediate(3);
    config
}

fn keys(issues: &[Issue]) -> Vec<String> {
    issues.iter().map(|i| i.key.clone()).collect()
}

fn assert_unique<T: AsRef<str>>(keys: &[T]) {
    let mut seen = HashSet::new();
    for key in keys {
        assert!(seen.insert(key.as_ref()), "duplicate key {}", key.as_ref());
    }
}

// ---------------------------------------------------------------- fetch

#[tokio::test]
async fn test_fetch_complete_run() {
    let dir = tempdir().unwrap();
    let config = config(dir.path());
    let mut source = ScriptedSource::new(five_pages());

    let report = FetchPipeline::new(&config, QUERY).run(&mut source).await.unwrap();

    assert_eq!(report.consolidated, 20);
    assert_eq!(report.metrics.pages, 5);
    assert_eq!(report.resumed_from, Cursor::Start);

    let issues = load_issues(&config.output.issues_data()).unwrap();
    let expected: Vec<String> = (0..20).map(|n| format!("OPS-{}", n)).collect();
    assert_eq!(keys(&issues), expected);

    let checkpoint = CheckpointStore::new(config.output.fetch_checkpoint())
        .load_for(QUERY)
        .unwrap()
        .unwrap();
    assert_eq!(checkpoint.cursor, Cursor::Exhausted);
    assert_eq!(checkpoint.count, 20);
}

#[tokio::test]
async fn test_fetch_resumes_after_abort() {
    let dir = tempdir().unwrap();
    let config = config(dir.path());

    let mut failing = ScriptedSource::new(five_pages())
        .fail_at(3, SourceError::Fatal("boom".into()));
    let result = FetchPipeline::new(&config, QUERY).run(&mut failing).await;
    assert!(matches!(result, Err(PipelineError::Source(SourceError::Fatal(_)))));

    let checkpoints = CheckpointStore::new(config.output.fetch_checkpoint());
    let checkpoint = checkpoints.load_for(QUERY).unwrap().unwrap();
    assert_eq!(checkpoint.cursor, Cursor::Token("p3".into()));
    assert_eq!(checkpoint.count, 12);
    assert!(!config.output.issues_data().exists());

    let mut healthy = ScriptedSource::new(five_pages());
    let report = FetchPipeline::new(&config, QUERY).run(&mut healthy).await.unwrap();

    assert_eq!(report.resumed_from, Cursor::Token("p3".into()));
    assert_eq!(healthy.calls, 2);
    assert_eq!(report.metrics.duplicates, 0);

    let issues = load_issues(&config.output.issues_data()).unwrap();
    assert_eq!(issues.len(), 20);
    assert_unique(&keys(&issues));
}

#[tokio::test]
async fn test_fetch_crash_before_checkpoint_save() {
    let dir = tempdir().unwrap();
    let config = config(dir.path());

    let mut source = ScriptedSource::new(five_pages());
    FetchPipeline::new(&config, QUERY).run(&mut source).await.unwrap();

    // Pages 2.. were appended but the process died before their checkpoints
    CheckpointStore::new(config.output.fetch_checkpoint())
        .save(&Checkpoint::new(QUERY, Cursor::Token("p2".into()), 8))
        .unwrap();

    let mut source = ScriptedSource::new(five_pages());
    let report = FetchPipeline::new(&config, QUERY).run(&mut source).await.unwrap();

    assert_eq!(report.metrics.duplicates, 12);
    assert_eq!(report.metrics.written, 0);
    let stored: Vec<Issue> = read_records(&config.output.issues_partial()).unwrap();
    assert_eq!(stored.len(), 20);
    assert_unique(&keys(&stored));
}

#[tokio::test]
async fn test_fetch_crash_mid_append() {
    let dir = tempdir().unwrap();
    let config = config(dir.path());

    let mut failing = ScriptedSource::new(five_pages())
        .fail_at(1, SourceError::Fatal("boom".into()));
    assert!(FetchPipeline::new(&config, QUERY).run(&mut failing).await.is_err());

    let mut file = OpenOptions::new()
        .append(true)
        .open(config.output.issues_partial())
        .unwrap();
    file.write_all(b"{\"key\":\"OPS-4\",\"summ").unwrap();
    drop(file);

    let mut healthy = ScriptedSource::new(five_pages());
    let report = FetchPipeline::new(&config, QUERY).run(&mut healthy).await.unwrap();

    assert_eq!(report.consolidated, 20);
    let stored: Vec<Issue> = read_records(&config.output.issues_partial()).unwrap();
    assert_eq!(stored.len(), 20);
    assert_unique(&keys(&stored));
}

#[tokio::test]
async fn test_fetch_retries_transient_failures() {
    let dir = tempdir().unwrap();
    let config = config(dir.path());

    let mut source = ScriptedSource::new(five_pages())
        .fail_at(2, SourceError::Transient("503".into()))
        .fail_at(2, SourceError::Transient("503".into()));
    let report = FetchPipeline::new(&config, QUERY).run(&mut source).await.unwrap();

    assert_eq!(report.consolidated, 20);
    assert_eq!(source.calls, 7);
}

#[tokio::test]
async fn test_fetch_transient_budget_exhausted() {
    let dir = tempdir().unwrap();
    let config = config(dir.path());

    let mut source = ScriptedSource::new(five_pages());
    for _ in 0..3 {
        source = source.fail_at(1, SourceError::Transient("timeout".into()));
    }
    let result = FetchPipeline::new(&config, QUERY).run(&mut source).await;

    assert!(matches!(result, Err(PipelineError::Source(SourceError::Transient(_)))));
    let checkpoint = CheckpointStore::new(config.output.fetch_checkpoint())
        .load_for(QUERY)
        .unwrap()
        .unwrap();
    assert_eq!(checkpoint.cursor, Cursor::Token("p1".into()));
}

#[tokio::test]
async fn test_fetch_invalid_cursor_restarts_with_dedup() {
    let dir = tempdir().unwrap();
    let config = config(dir.path());

    let mut failing = ScriptedSource::new(five_pages())
        .fail_at(2, SourceError::Fatal("boom".into()));
    assert!(FetchPipeline::new(&config, QUERY).run(&mut failing).await.is_err());

    let mut source = ScriptedSource::new(five_pages()).rejecting_tokens();
    let report = FetchPipeline::new(&config, QUERY).run(&mut source).await.unwrap();

    assert_eq!(report.metrics.cursor_resets, 1);
    assert_eq!(report.metrics.duplicates, 8);
    assert_eq!(report.metrics.written, 12);
    let issues = load_issues(&config.output.issues_data()).unwrap();
    assert_eq!(issues.len(), 20);
    assert_unique(&keys(&issues));
}

#[tokio::test]
async fn test_fetch_exhausted_checkpoint_skips_source() {
    let dir = tempdir().unwrap();
    let config = config(dir.path());

    let mut source = ScriptedSource::new(five_pages());
    FetchPipeline::new(&config, QUERY).run(&mut source).await.unwrap();

    let mut again = ScriptedSource::new(five_pages());
    let report = FetchPipeline::new(&config, QUERY).run(&mut again).await.unwrap();
    assert!(!report.fetched);
    assert_eq!(again.calls, 0);
    assert_eq!(report.consolidated, 20);

    let mut refreshed = ScriptedSource::new(five_pages());
    let report = FetchPipeline::new(&config, QUERY)
        .with_refresh(true)
        .run(&mut refreshed)
        .await
        .unwrap();
    assert!(report.fetched);
    assert_eq!(refreshed.calls, 5);
    assert_eq!(report.metrics.duplicates, 20);
}

#[tokio::test]
async fn test_fetch_other_query_ignores_checkpoint() {
    let dir = tempdir().unwrap();
    let config = config(dir.path());

    let mut source = ScriptedSource::new(five_pages());
    FetchPipeline::new(&config, QUERY).run(&mut source).await.unwrap();

    let mut other = ScriptedSource::new(five_pages());
    let report = FetchPipeline::new(&config, "project = NET")
        .run(&mut other)
        .await
        .unwrap();
    assert_eq!(report.resumed_from, Cursor::Start);
    assert_eq!(other.calls, 5);
}

#[tokio::test]
async fn test_fetch_skips_keyless_items() {
    let dir = tempdir().unwrap();
    let config = config(dir.path());

    let mut source = ScriptedSource::new(vec![vec![issue(1), Issue::new("", "orphan", ""), issue(2)]]);
    let report = FetchPipeline::new(&config, QUERY).run(&mut source).await.unwrap();

    assert_eq!(report.metrics.skipped, 1);
    assert_eq!(report.consolidated, 2);
}

#[tokio::test]
async fn test_fetch_counts_malformed_entries_and_continues() {
    let dir = tempdir().unwrap();
    let config = config(dir.path());

    let mut source = ScriptedSource::new(five_pages()).with_malformed(1, 2);
    let report = FetchPipeline::new(&config, QUERY).run(&mut source).await.unwrap();

    assert_eq!(report.metrics.skipped, 2);
    assert_eq!(report.metrics.items_seen, 22);
    assert_eq!(report.consolidated, 20);
    assert_eq!(source.calls, 5);
}

#[tokio::test]
async fn test_fetch_refetches_when_store_behind_checkpoint() {
    let dir = tempdir().unwrap();
    let config = config(dir.path());
    let three_pages: Vec<Vec<Issue>> = five_pages().into_iter().take(3).collect();

    let mut source = ScriptedSource::new(three_pages.clone());
    FetchPipeline::new(&config, QUERY).run(&mut source).await.unwrap();

    CheckpointStore::new(config.output.fetch_checkpoint())
        .save(&Checkpoint::new(QUERY, Cursor::Token("p2".into()), 8))
        .unwrap();
    fs::remove_file(config.output.issues_partial()).unwrap();

    let mut source = ScriptedSource::new(three_pages);
    let report = FetchPipeline::new(&config, QUERY).run(&mut source).await.unwrap();

    assert_eq!(report.resumed_from, Cursor::Start);
    assert_eq!(source.calls, 3);
    assert_eq!(report.consolidated, 12);
}

#[tokio::test]
async fn test_fetch_refetches_lost_store_after_exhaustion() {
    let dir = tempdir().unwrap();
    let config = config(dir.path());

    let mut source = ScriptedSource::new(five_pages());
    FetchPipeline::new(&config, QUERY).run(&mut source).await.unwrap();
    fs::remove_file(config.output.issues_partial()).unwrap();

    let mut source = ScriptedSource::new(five_pages());
    let report = FetchPipeline::new(&config, QUERY).run(&mut source).await.unwrap();

    assert!(report.fetched);
    assert_eq!(source.calls, 5);
    assert_eq!(report.consolidated, 20);
}

#[tokio::test]
async fn test_fetch_checkpoint_save_failure_is_fatal() {
    let dir = tempdir().unwrap();
    let config = config(dir.path());
    let blocker = dir.path().join("fetch_checkpoint.json.tmp");

    let mut source = ScriptedSource::new(five_pages()).block_path_on_page(1, blocker);
    let result = FetchPipeline::new(&config, QUERY).run(&mut source).await;

    assert!(matches!(result, Err(PipelineError::CheckpointSave(_))));
    assert_eq!(source.calls, 2);

    // The checkpoint written after the first page is still the live one
    let checkpoint = CheckpointStore::new(config.output.fetch_checkpoint())
        .load_for(QUERY)
        .unwrap()
        .unwrap();
    assert_eq!(checkpoint.cursor, Cursor::Token("p1".into()));
    assert_eq!(checkpoint.count, 4);
    assert!(!config.output.issues_data().exists());
}

// ------------------------------------------------------------- analysis

/// Classifier driven by keywords in the text; `hang` never answers
struct KeywordClassifier {
    failing: HashSet<String>,
}

impl KeywordClassifier {
    fn new(failing: &[&str]) -> Self {
        Self {
            failing: failing.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[async_trait]
impl Classifier for KeywordClassifier {
    async fn classify(&self, text: &str) -> Result<TechLabel, ClassifyError> {
        if text.contains("hang") {
            std::future::pending::<()>().await;
        }
        if self.failing.iter().any(|word| text.contains(word.as_str())) {
            return Err(ClassifyError::Provider("unavailable".into()));
        }
        if text.contains("dns") {
            Ok(TechLabel::Networking)
        } else {
            Ok(TechLabel::Database)
        }
    }
}

fn analysis_input() -> Vec<Issue> {
    vec![
        Issue::new("OPS-1", "Replica lag", "contact srv-db1 and srv-auth03 about the outage"),
        Issue::new("OPS-2", "dns flapping", "general outage, no server named"),
        Issue::new("OPS-3", "Slow queries", "srv-db1 again"),
        Issue::new("", "keyless", "srv-x9"),
        Issue::new("OPS-4", "dns timeouts", "srv-edge7 resolver"),
    ]
}

#[tokio::test]
async fn test_analysis_full_pass() {
    let dir = tempdir().unwrap();
    let config = config(dir.path());
    let issues = analysis_input();

    let pipeline = AnalysisPipeline::new(&config, KeywordClassifier::new(&[]), "issues_data.json").unwrap();
    let report = pipeline.run(&issues).await.unwrap();

    assert_eq!(report.processed, 4);
    assert_eq!(report.metrics.skipped, 1);
    assert_eq!(report.consolidation.servers.get("srv-db1"), 2);
    assert_eq!(report.consolidation.servers.get("srv-auth03"), 1);
    assert_eq!(report.consolidation.technologies.get("networking"), 2);
    assert_eq!(report.consolidation.technologies.total(), 4);

    let mentions: Vec<ServerMention> = serde_json::from_str(
        &fs::read_to_string(config.output.server_final()).unwrap(),
    )
    .unwrap();
    assert_eq!(mentions[0].servers, vec!["srv-db1", "srv-auth03"]);
    assert!(mentions[1].servers.is_empty());

    let unresolved: Vec<UnresolvedIssue> =
        serde_json::from_str(&fs::read_to_string(config.output.unresolved()).unwrap()).unwrap();
    assert_eq!(unresolved.len(), 1);
    assert_eq!(unresolved[0].key, "OPS-2");
    assert_eq!(unresolved[0].reasons, vec![UnresolvedReason::NoServerMatch]);

    // Checkpoint is cleared once consolidated
    assert!(CheckpointStore::new(config.output.analysis_checkpoint())
        .load()
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_failed_classification_retried_next_run() {
    let dir = tempdir().unwrap();
    let config = config(dir.path());
    let issues = analysis_input();

    let first = AnalysisPipeline::new(&config, KeywordClassifier::new(&["Slow"]), "in").unwrap();
    let report = first.run(&issues).await.unwrap();
    assert_eq!(report.metrics.classification_failed, 1);
    assert_eq!(report.consolidation.technologies.total(), 3);
    assert!(report
        .consolidation
        .unresolved
        .iter()
        .any(|u| u.key == "OPS-3" && u.reasons == vec![UnresolvedReason::ClassificationFailed]));

    let second = AnalysisPipeline::new(&config, KeywordClassifier::new(&[]), "in").unwrap();
    let report = second.run(&issues).await.unwrap();
    assert_eq!(report.processed, 1);
    assert_eq!(report.already_complete, 3);
    assert_eq!(report.metrics.server_matches + report.metrics.no_server_match, 0);
    assert_eq!(report.consolidation.technologies.total(), 4);

    let annotations: Vec<TechAnnotation> = read_records(&config.output.tech_partial()).unwrap();
    assert_eq!(annotations.len(), 4);
    assert_unique(&annotations.iter().map(|a| a.key.clone()).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_analysis_interrupted_then_resumed() {
    let dir = tempdir().unwrap();
    let config = config(dir.path());
    let mut issues = analysis_input();
    issues[2].description = "srv-db1 again, hang".to_string();

    let pipeline = AnalysisPipeline::new(&config, KeywordClassifier::new(&[]), "in").unwrap();
    let interrupted = tokio::time::timeout(Duration::from_millis(200), pipeline.run(&issues)).await;
    assert!(interrupted.is_err());

    let checkpoint = CheckpointStore::new(config.output.analysis_checkpoint())
        .load_for("in")
        .unwrap()
        .unwrap();
    assert_eq!(checkpoint.cursor, Cursor::Offset(2));
    // The server record of the third issue was durable before the hang
    let mentions: Vec<ServerMention> = read_records(&config.output.server_partial()).unwrap();
    assert_eq!(mentions.len(), 3);

    issues[2].description = "srv-db1 again".to_string();
    let pipeline = AnalysisPipeline::new(&config, KeywordClassifier::new(&[]), "in").unwrap();
    let report = pipeline.run(&issues).await.unwrap();

    assert_eq!(report.resumed_from, 2);
    assert_eq!(report.processed, 2);
    let mentions: Vec<ServerMention> = read_records(&config.output.server_partial()).unwrap();
    assert_eq!(mentions.len(), 4);
    assert_unique(&mentions.iter().map(|m| m.key.clone()).collect::<Vec<_>>());
    assert_eq!(report.consolidation.technologies.total(), 4);
}

#[tokio::test]
async fn test_analysis_limit() {
    let dir = tempdir().unwrap();
    let config = config(dir.path());
    let issues = analysis_input();

    let pipeline = AnalysisPipeline::new(&config, KeywordClassifier::new(&[]), "in")
        .unwrap()
        .with_limit(Some(2));
    let report = pipeline.run(&issues).await.unwrap();

    assert_eq!(report.total, 2);
    assert_eq!(report.processed, 2);
    assert_eq!(report.consolidation.mentions, 2);
}

#[tokio::test]
async fn test_analysis_with_llm_classifier() {
    let dir = tempdir().unwrap();
    let config = config(dir.path());
    let issues = analysis_input();

    let provider = MockProvider::new("maybe networking?");
    let classifier = LlmClassifier::new(
        provider.clone(),
        ClassificationConfig {
            reask_delay_ms: 0,
            ..Default::default()
        },
    );
    let pipeline = AnalysisPipeline::new(&config, classifier, "in").unwrap();
    let report = pipeline.run(&issues).await.unwrap();

    // Every reply is out of set: nothing labelled, every issue re-asked once
    assert_eq!(report.metrics.classification_failed, 4);
    assert_eq!(provider.call_count(), 8);
    assert!(report.consolidation.technologies.is_empty());
    assert_eq!(report.consolidation.unresolved.len(), 4);
}

#[tokio::test]
async fn test_analysis_checkpoint_save_failure_is_fatal() {
    let dir = tempdir().unwrap();
    let config = config(dir.path());
    fs::create_dir_all(dir.path().join("analysis_checkpoint.json.tmp")).unwrap();

    let pipeline = AnalysisPipeline::new(&config, KeywordClassifier::new(&[]), "in").unwrap();
    let result = pipeline.run(&analysis_input()).await;

    assert!(matches!(result, Err(PipelineError::CheckpointSave(_))));
    // The first issue's records were durable before the failed save
    let mentions: Vec<ServerMention> = read_records(&config.output.server_partial()).unwrap();
    assert_eq!(mentions.len(), 1);
    assert!(!config.output.unresolved().exists());
}

#[tokio::test]
async fn test_analysis_skips_malformed_input_entries() {
    let dir = tempdir().unwrap();
    let config = config(dir.path());
    let input = dir.path().join("input.json");
    fs::write(
        &input,
        r#"[
            {"key": "A-1", "summary": "srv-db1 down"},
            {"key": "A-2", "summary": 42},
            {"summary": ["no", "key"]},
            {"key": "A-3", "summary": "dns flapping on srv-edge7"}
        ]"#,
    )
    .unwrap();

    let loaded = read_issues(&input).unwrap();
    assert_eq!(keys(&loaded.issues), vec!["A-1", "A-3"]);
    assert_eq!(loaded.rejected, vec!["A-2".to_string(), String::new()]);

    let pipeline = AnalysisPipeline::new(&config, KeywordClassifier::new(&[]), "input.json")
        .unwrap()
        .with_rejected(loaded.rejected);
    let report = pipeline.run(&loaded.issues).await.unwrap();

    assert_eq!(report.processed, 2);
    assert_eq!(report.metrics.skipped, 2);
    assert_eq!(report.consolidation.technologies.total(), 2);

    let unresolved: Vec<UnresolvedIssue> =
        serde_json::from_str(&fs::read_to_string(config.output.unresolved()).unwrap()).unwrap();
    assert_eq!(unresolved.len(), 1);
    assert_eq!(unresolved[0].key, "A-2");
    assert_eq!(unresolved[0].reasons, vec![UnresolvedReason::Malformed]);
}

#[test]
fn test_input_that_is_not_an_array_is_rejected() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("input.json");
    fs::write(&input, r#"{"issues": []}"#).unwrap();
    assert!(matches!(read_issues(&input), Err(PipelineError::Config(_))));
}
