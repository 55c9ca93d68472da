/*!
 * End-to-end synchronization tests on real files
 */

use std::fs;
use std::sync::Arc;

use xliffsync::document::{DocumentStore, FsDocumentStore};
use xliffsync::nodes::LocalizationNode;
use xliffsync::sync::{CollectingReporter, SyncAction, SyncDriver};

use crate::common;

fn languages(codes: &[&str]) -> Vec<String> {
    codes.iter().map(|c| c.to_string()).collect()
}

fn driver() -> SyncDriver {
    SyncDriver::new(Arc::new(FsDocumentStore::new()))
}

#[test]
fn test_sync_withMixedNodes_shouldAnnotateAndRemoveInEveryLanguage() {
    let dir = common::create_temp_dir().unwrap();
    common::write_sample_documents(dir.path(), &["de", "fr"]).unwrap();
    let nodes = vec![
        LocalizationNode::enabled("btn1", "Play button on the start screen"),
        LocalizationNode::disabled("lbl2"),
    ];
    let reporter = CollectingReporter::new();

    let report = driver().sync(&languages(&["de", "fr"]), dir.path(), &nodes, &reporter);

    assert!(report.is_success());
    assert_eq!(report.saved_languages(), vec!["de", "fr"]);
    for language in ["de", "fr"] {
        let xml = fs::read_to_string(dir.path().join(format!("{}.xliff", language))).unwrap();
        assert_eq!(
            xml.matches("<note>Play button on the start screen</note>").count(),
            2
        );
        assert!(!xml.contains("lbl2.text"));
        assert!(xml.contains(&format!("btn1.title text ({})", language)));
        assert!(xml.contains(r#"<tool tool-id="com.apple.dt.xcode""#));
    }

    let events = reporter.events();
    assert_eq!(events.len(), 4);
    assert_eq!(events[0].language, "de");
    assert_eq!(events[0].outcome.action, SyncAction::Annotated);
    assert_eq!(events[0].outcome.count, 2);
    assert_eq!(events[1].outcome.action, SyncAction::Removed);
    assert_eq!(events[1].outcome.count, 1);
    assert_eq!(events[2].language, "fr");
}

#[test]
fn test_sync_withUnmatchedNode_shouldLeaveFileByteIdentical() {
    let dir = common::create_temp_dir().unwrap();
    common::write_sample_documents(dir.path(), &["de"]).unwrap();
    let path = dir.path().join("de.xliff");
    let before = fs::read(&path).unwrap();

    let report = driver().sync(
        &languages(&["de"]),
        dir.path(),
        &[LocalizationNode::disabled("zzz-99")],
        &CollectingReporter::new(),
    );

    assert!(report.is_success());
    assert_eq!(report.languages[0].count(SyncAction::None), 0);
    assert_eq!(report.languages[0].events[0].outcome.action, SyncAction::None);
    assert_eq!(fs::read(&path).unwrap(), before);
}

#[test]
fn test_sync_withMissingLanguage_shouldContinueWithOthers() {
    common::init_test_logger();
    let dir = common::create_temp_dir().unwrap();
    common::write_sample_documents(dir.path(), &["de", "it"]).unwrap();
    let reporter = CollectingReporter::new();

    let report = driver().sync(
        &languages(&["de", "fr", "it"]),
        dir.path(),
        &[LocalizationNode::disabled("btn1.subtitle")],
        &reporter,
    );

    assert!(!report.is_success());
    assert_eq!(report.failed_languages(), vec!["fr"]);
    assert_eq!(reporter.failed_languages(), vec!["fr".to_string()]);
    assert!(!dir.path().join("fr.xliff").exists());
    for language in ["de", "it"] {
        let xml = fs::read_to_string(dir.path().join(format!("{}.xliff", language))).unwrap();
        assert!(!xml.contains("btn1.subtitle"));
        assert!(xml.contains("btn1.title"));
    }
}

#[test]
fn test_sync_twice_shouldProduceSameBytes() {
    let dir = common::create_temp_dir().unwrap();
    common::write_sample_documents(dir.path(), &["de"]).unwrap();
    let path = dir.path().join("de.xliff");
    let nodes = vec![
        LocalizationNode::enabled("btn1.title", "Title <bold> & \"quoted\""),
        LocalizationNode::disabled("lbl2"),
    ];

    driver().sync(&languages(&["de"]), dir.path(), &nodes, &CollectingReporter::new());
    let first = fs::read(&path).unwrap();
    driver().sync(&languages(&["de"]), dir.path(), &nodes, &CollectingReporter::new());
    let second = fs::read(&path).unwrap();

    assert_eq!(first, second);
    let document = FsDocumentStore::new().load(&path).unwrap();
    assert_eq!(
        document.unit("btn1.title").unwrap().note.as_deref(),
        Some("Title <bold> & \"quoted\"")
    );
    assert_eq!(document.unit_ids(), vec!["btn1.title", "btn1.subtitle"]);
}

#[test]
fn test_sync_withCustomExtension_shouldUseIt() {
    let dir = common::create_temp_dir().unwrap();
    common::create_test_file(
        dir.path(),
        "de.xlf",
        &common::xliff_with_units("de", &["abc-12.text"]),
    )
    .unwrap();

    let report = driver().with_extension(".xlf").sync(
        &languages(&["de"]),
        dir.path(),
        &[LocalizationNode::enabled("abc-12", "Header")],
        &CollectingReporter::new(),
    );

    assert!(report.is_success());
    let xml = fs::read_to_string(dir.path().join("de.xlf")).unwrap();
    assert!(xml.contains("<note>Header</note>"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_sync_concurrent_onFiles_shouldMatchSequentialResult() {
    let sequential_dir = common::create_temp_dir().unwrap();
    let concurrent_dir = common::create_temp_dir().unwrap();
    let langs = ["de", "fr", "it", "es"];
    common::write_sample_documents(sequential_dir.path(), &langs).unwrap();
    common::write_sample_documents(concurrent_dir.path(), &langs).unwrap();
    let nodes = vec![
        LocalizationNode::enabled("btn1", "Play"),
        LocalizationNode::disabled("btn1.subtitle"),
    ];

    driver().sync(&languages(&langs), sequential_dir.path(), &nodes, &CollectingReporter::new());
    let report = driver()
        .sync_concurrent(
            &languages(&langs),
            concurrent_dir.path(),
            Arc::new(nodes),
            Arc::new(CollectingReporter::new()),
        )
        .await
        .unwrap();

    let order: Vec<&str> = report.languages.iter().map(|l| l.language.as_str()).collect();
    assert_eq!(order, langs.to_vec());
    for language in langs {
        let name = format!("{}.xliff", language);
        assert_eq!(
            fs::read(sequential_dir.path().join(&name)).unwrap(),
            fs::read(concurrent_dir.path().join(&name)).unwrap()
        );
    }
}
