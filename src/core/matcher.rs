use crate::infra::file_system::load_rules;
use anyhow::Context;
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use log::{debug, info};
use std::path::Path;

/// Decides whether a root-relative path is left out of the aggregate.
///
/// Combines a compiled gitignore rule set with one literal path that is
/// always skipped. Built once and queried for every entry of the walk.
#[derive(Debug)]
pub struct ExclusionPredicate {
    rules: Gitignore,
    special_exclude: String,
}

impl ExclusionPredicate {
    pub fn load(root: &Path, rules_path: &Path, special_exclude: &str) -> anyhow::Result<Self> {
        match load_rules(rules_path)? {
            Some(text) => Self::from_lines(root, text.lines(), special_exclude)
                .with_context(|| format!("Invalid pattern in {}", rules_path.display())),
            None => Ok(Self::empty(special_exclude)),
        }
    }

    pub fn from_lines<'a, I>(root: &Path, lines: I, special_exclude: &str) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut builder = GitignoreBuilder::new(root);
        for line in lines {
            builder.add_line(None, line)?;
        }
        let rules = builder.build()?;
        info!("Compiled {} ignore patterns", rules.num_ignores() + rules.num_whitelists());

        Ok(Self {
            rules,
            special_exclude: special_exclude.to_string(),
        })
    }

    pub fn empty(special_exclude: &str) -> Self {
        Self {
            rules: Gitignore::empty(),
            special_exclude: special_exclude.to_string(),
        }
    }

    /// `rel_path` must be relative to the root and `/`-separated.
    pub fn is_ignored(&self, rel_path: &str, is_dir: bool) -> bool {
        let matched = self.rules.matched(Path::new(rel_path), is_dir);
        if matched.is_ignore() {
            debug!("Path {} matches ignore rules", rel_path);
            return true;
        }
        false
    }

    pub fn is_special_excluded(&self, rel_path: &str) -> bool {
        rel_path == self.special_exclude
    }

    pub fn is_excluded(&self, rel_path: &str, is_dir: bool) -> bool {
        self.is_ignored(rel_path, is_dir) || self.is_special_excluded(rel_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn predicate(lines: &[&str]) -> ExclusionPredicate {
        ExclusionPredicate::from_lines(Path::new("/test"), lines.iter().copied(), ".aggregate_exclude")
            .unwrap()
    }

    #[test]
    fn test_negation_reincludes() {
        let p = predicate(&["*.log", "!keep.log"]);

        assert!(!p.is_excluded("keep.log", false));
        assert!(p.is_excluded("other.log", false));
        assert!(p.is_excluded("logs/server.log", false));
        assert!(!p.is_excluded("logs/keep.log", false));
    }

    #[test]
    fn test_later_pattern_wins() {
        let p = predicate(&["!keep.log", "*.log"]);
        assert!(p.is_excluded("keep.log", false));
    }

    #[test]
    fn test_gitignore_syntax() {
        let p = predicate(&[
            "# Comment line",
            "",
            "node_modules/",
            "/dist",
            "temp*",
            "**/coverage",
            "docs/**/*.tmp",
        ]);

        assert!(p.is_excluded("node_modules", true));
        assert!(p.is_excluded("web/node_modules", true));
        assert!(!p.is_excluded("node_modules", false));
        assert!(!p.is_excluded("node_modules.txt", false));

        assert!(p.is_excluded("dist", true));
        assert!(!p.is_excluded("src/dist", true));

        assert!(p.is_excluded("temporary.txt", false));
        assert!(p.is_excluded("a/b/coverage", true));
        assert!(p.is_excluded("docs/a/b/x.tmp", false));
        assert!(!p.is_excluded("x.tmp", false));

        assert!(!p.is_excluded("# Comment line", false));
        assert!(!p.is_excluded("src/index.js", false));
    }

    #[test]
    fn test_special_exclude_is_literal() {
        let p = predicate(&[]);

        assert!(p.is_special_excluded(".aggregate_exclude"));
        assert!(p.is_excluded(".aggregate_exclude", false));
        assert!(!p.is_excluded(".aggregate_exclude.bak", false));
        assert!(!p.is_excluded("sub/.aggregate_exclude", false));
        assert!(!p.is_ignored(".aggregate_exclude", false));
    }

    #[test]
    fn test_load_missing_rules_matches_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let rules_path = root.join(".gitignore");
        assert!(load_rules(&rules_path).unwrap().is_none());

        let loaded = ExclusionPredicate::load(root, &rules_path, "special");
        assert!(loaded.is_ok());
        let p = loaded.unwrap();

        assert!(!p.is_excluded("anything.log", false));
        assert!(!p.is_excluded("target", true));
        assert!(p.is_excluded("special", false));
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(root.join(".gitignore"), "target/\r\n*.log\r\n!keep.log\r\n").unwrap();

        let p = ExclusionPredicate::load(root, &root.join(".gitignore"), "special").unwrap();

        assert!(p.is_excluded("target", true));
        assert!(p.is_excluded("debug.log", false));
        assert!(!p.is_excluded("keep.log", false));
        assert!(!p.is_excluded("src/main.rs", false));
    }
}
