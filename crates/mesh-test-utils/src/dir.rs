//! [`TestConfigDir`] for tests that read and write configuration files.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// File name used for the configuration inside the directory.
pub const CONFIG_FILE: &str = "config.xml";

/// A temporary directory with one configuration file location.
///
/// # Example
///
/// ```rust,no_run
/// use mesh_test_utils::dir::TestConfigDir;
/// use mesh_test_utils::fixtures;
///
/// let dir = TestConfigDir::new();
/// dir.write_config(&fixtures::v5_document());
/// dir.assert_config_contains("version=\"5\"");
/// ```
pub struct TestConfigDir {
    temp_dir: TempDir,
}

impl Default for TestConfigDir {
    fn default() -> Self {
        Self::new()
    }
}

impl TestConfigDir {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Location of the configuration file. It does not exist until written.
    pub fn config_path(&self) -> PathBuf {
        self.root().join(CONFIG_FILE)
    }

    /// Staging path an atomic save writes before renaming.
    pub fn temp_path(&self) -> PathBuf {
        self.root().join(format!("{CONFIG_FILE}.tmp"))
    }

    pub fn write_config(&self, content: &str) -> PathBuf {
        let path = self.config_path();
        fs::write(&path, content).unwrap();
        path
    }

    /// Current bytes of the configuration file.
    ///
    /// # Panics
    /// Panics if the file cannot be read.
    pub fn read_config(&self) -> String {
        let path = self.config_path();
        fs::read_to_string(&path)
            .unwrap_or_else(|_| panic!("Could not read file: {}", path.display()))
    }

    /// Assert that the configuration file contains `content`.
    ///
    /// # Panics
    /// Panics if the file cannot be read or does not contain `content`.
    pub fn assert_config_contains(&self, content: &str) {
        let file_content = self.read_config();
        assert!(
            file_content.contains(content),
            "Config does not contain expected content.\nExpected: {}\nActual: {}",
            content,
            file_content
        );
    }

    /// Assert that no staging file is left next to the configuration.
    pub fn assert_no_temp_file(&self) {
        let temp = self.temp_path();
        assert!(!temp.exists(), "Expected file NOT to exist: {}", temp.display());
    }
}
