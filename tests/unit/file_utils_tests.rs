/*!
 * Tests for file utility functions
 */

use xliffsync::file_utils::FileManager;

use crate::common;

#[test]
fn test_ensure_dir_withNestedPath_shouldCreateAllLevels() {
    let dir = common::create_temp_dir().unwrap();
    let nested = dir.path().join("a").join("b");

    FileManager::ensure_dir(&nested).unwrap();
    FileManager::ensure_dir(&nested).unwrap();

    assert!(FileManager::dir_exists(&nested));
    assert!(!FileManager::file_exists(&nested));
}

#[test]
fn test_existing_documents_shouldSkipMissingAndKeepOrder() {
    let dir = common::create_temp_dir().unwrap();
    common::write_sample_documents(dir.path(), &["fr", "de"]).unwrap();
    let languages = vec!["de".to_string(), "it".to_string(), "fr".to_string()];

    let found = FileManager::existing_documents(dir.path(), &languages, "xliff");

    assert_eq!(
        found,
        vec![dir.path().join("de.xliff"), dir.path().join("fr.xliff")]
    );
    assert!(FileManager::existing_documents(dir.path(), &languages, "xlf").is_empty());
}
