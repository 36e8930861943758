use std::path::PathBuf;

pub const RULES_FILE_NAME: &str = ".gitignore";
pub const DEFAULT_OUTPUT_FILE: &str = "project_contents.txt";
pub const DEFAULT_SPECIAL_EXCLUDE: &str = ".aggregate_exclude";

#[derive(Debug, Clone)]
pub struct AggregateConfig {
    pub root: PathBuf,
    pub output_path: PathBuf,
    /// Root-relative, slash-separated path skipped by exact match.
    pub special_exclude: String,
    pub rules_file: String,
}

impl AggregateConfig {
    pub fn new(root: PathBuf, output_path: PathBuf, special_exclude: String) -> Self {
        Self {
            root,
            output_path,
            special_exclude,
            rules_file: RULES_FILE_NAME.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordBody {
    Text(String),
    Unreadable(String),
}

#[derive(Debug, Clone)]
pub struct FileRecord {
    pub rel_path: String,
    pub body: RecordBody,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AggregateSummary {
    pub files_written: usize,
    pub files_failed: usize,
    pub entries_excluded: usize,
}
