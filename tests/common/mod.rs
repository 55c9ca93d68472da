/*!
 * Common test utilities for the xliffsync test suite
 */

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub mod fake_exporter;

/// Routes library log output to the test harness, once per process
pub fn init_test_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Builds an Xcode-style XLIFF document with one unit per id
pub fn xliff_with_units(language: &str, ids: &[&str]) -> String {
    let mut units = String::new();
    for id in ids {
        units.push_str(&format!(
            r#"
      <trans-unit id="{id}" xml:space="preserve">
        <source>{id} text</source>
        <target>{id} text ({language})</target>
        <note>Class = "UIView"; ObjectID = "{id}";</note>
      </trans-unit>"#
        ));
    }
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<xliff xmlns="urn:oasis:names:tc:xliff:document:1.2" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" version="1.2" xsi:schemaLocation="urn:oasis:names:tc:xliff:document:1.2 http://docs.oasis-open.org/xliff/v1.2/os/xliff-core-1.2-strict.xsd">
  <file original="App/Base.lproj/Main.storyboard" source-language="en" target-language="{language}" datatype="plaintext">
    <header>
      <tool tool-id="com.apple.dt.xcode" tool-name="Xcode" tool-version="15.0" build-num="15A240d"/>
    </header>
    <body>{units}
    </body>
  </file>
</xliff>
"#
    )
}

/// Writes `{language}.xliff` with the standard sample units for every language
pub fn write_sample_documents(dir: &Path, languages: &[&str]) -> Result<()> {
    for language in languages {
        create_test_file(
            dir,
            &format!("{}.xliff", language),
            &xliff_with_units(language, &["btn1.title", "btn1.subtitle", "lbl2.text"]),
        )?;
    }
    Ok(())
}
