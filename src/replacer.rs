use crate::config::{Config, ConfigLoader};
use crate::environment::resolve_replacement;
use crate::errors::{FileError, Result};
use crate::file_selector::select_files;
use crate::file_system::FileSystem;
use crate::report::Report;
use regex::{Captures, Regex};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

/// Core engine for substituting one pattern in file contents.
///
/// A `Replacer` holds the search pattern, compiled once, and the replacement
/// template chosen for the run. Templates use the `regex` crate's expansion
/// syntax: `$1`, `${1}`, `$name`, `${name}`, and `$$` for a literal dollar.
pub struct Replacer {
    pattern: Regex,
    template: String,
}

/// A single substituted match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    /// The matched text.
    pub original: String,
    /// The template expanded against the match's captures.
    pub replacement: String,
}

/// The outcome of substituting over a whole text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    /// The text with every match replaced.
    pub content: String,
    /// One entry per match, in order of appearance.
    pub edits: Vec<Edit>,
}

/// What happened to one selected file.
#[derive(Debug)]
pub enum FileOutcome {
    /// Read, substituted and written back.
    Processed { matches: usize },
    /// The file could not be read; it was left alone.
    ReadFailed(FileError),
    /// The substituted content could not be written back.
    WriteFailed(FileError),
}

impl FileOutcome {
    pub fn is_processed(&self) -> bool {
        matches!(self, FileOutcome::Processed { .. })
    }
}

impl Replacer {
    /// Compiles `search` and pairs it with the replacement `template`.
    pub fn new(search: &str, template: &str) -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(search)?,
            template: template.to_string(),
        })
    }

    /// Replaces every non-overlapping match in `content`, left to right.
    ///
    /// Text outside of matches is carried over verbatim.
    pub fn substitute(&self, content: &str) -> Substitution {
        let mut edits = Vec::new();
        let replaced = self.pattern.replace_all(content, |caps: &Captures| {
            let mut expanded = String::new();
            caps.expand(&self.template, &mut expanded);
            edits.push(Edit {
                original: caps[0].to_string(),
                replacement: expanded.clone(),
            });
            expanded
        });

        Substitution {
            content: replaced.into_owned(),
            edits,
        }
    }

    /// Processes a single file: read, substitute, report each match, write back.
    ///
    /// Read and write failures are logged and returned as a `FileOutcome`
    /// rather than an error, so the caller can move on to the next file.
    /// The file is written back even when nothing matched.
    ///
    /// # Errors
    ///
    /// Only a failure to write the report itself is returned as `Err`.
    pub fn process_file<F, W>(
        &self,
        path: &Path,
        fs: &F,
        report: &mut Report<W>,
    ) -> Result<FileOutcome>
    where
        F: FileSystem + ?Sized,
        W: Write,
    {
        report.file_started(path)?;

        let content = match fs.read_to_string(path) {
            Ok(content) => content,
            Err(source) => {
                let e = FileError::Read {
                    path: path.to_path_buf(),
                    source,
                };
                error!("{e}");
                return Ok(FileOutcome::ReadFailed(e));
            }
        };

        let substitution = self.substitute(&content);
        for edit in &substitution.edits {
            report.replaced(&edit.original, &edit.replacement)?;
        }

        if let Err(source) = fs.write(path, &substitution.content) {
            let e = FileError::Write {
                path: path.to_path_buf(),
                source,
            };
            error!("{e}");
            return Ok(FileOutcome::WriteFailed(e));
        }

        debug!(path = %path.display(), matches = substitution.edits.len(), "file written");
        report.file_succeeded()?;
        Ok(FileOutcome::Processed {
            matches: substitution.edits.len(),
        })
    }
}

/// Everything derived from the configuration before any file is touched.
pub struct RunContext {
    /// The files to process, in selection order.
    pub files: Vec<PathBuf>,
    /// The compiled pattern together with the resolved template.
    pub replacer: Replacer,
}

/// Resolves the replacement, selects files and compiles the pattern, in that order.
///
/// Any failure here is fatal for the run and happens before a single
/// target file is read.
pub fn prepare(config: &Config, environment: &str) -> Result<RunContext> {
    let template = resolve_replacement(config, environment)?;
    info!(environment, "using replacement '{template}'");

    let files = select_files(&config.folder, &config.file_filter)?;
    info!(count = files.len(), "matched files");

    let replacer = Replacer::new(&config.search, template)?;

    Ok(RunContext {
        files,
        replacer,
    })
}

impl RunContext {
    /// Processes every selected file in order, one at a time.
    ///
    /// A failing file never stops the loop. The closing banner is written
    /// once all files have been attempted.
    pub fn execute<F, W>(
        &self,
        fs: &F,
        report: &mut Report<W>,
    ) -> Result<Vec<(PathBuf, FileOutcome)>>
    where
        F: FileSystem + ?Sized,
        W: Write,
    {
        let mut outcomes = Vec::with_capacity(self.files.len());
        for path in &self.files {
            let outcome = self.replacer.process_file(path, fs, report)?;
            outcomes.push((path.clone(), outcome));
        }
        report.finished()?;
        Ok(outcomes)
    }
}

/// The main entry point for a replace run.
///
/// This function orchestrates the entire process:
/// 1. It loads the configuration from `config_path`.
/// 2. It resolves the template for `environment`, selects files and compiles the pattern.
/// 3. It rewrites each file through `fs`, reporting progress to `out`.
pub fn run<F, W>(
    config_path: &Path,
    environment: &str,
    fs: &F,
    out: W,
) -> Result<Vec<(PathBuf, FileOutcome)>>
where
    F: FileSystem + ?Sized,
    W: Write,
{
    let config = ConfigLoader::load(config_path)?;
    debug!(path = %config_path.display(), "configuration loaded");

    let context = prepare(&config, environment)?;
    let mut report = Report::new(out);
    context.execute(fs, &mut report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CONFIG_FILE;
    use crate::errors::Error;
    use crate::file_system::{MemoryFileSystem, OsFileSystem};
    use std::collections::HashMap;
    use std::fs;
    use tempfile::TempDir;

    fn config(folder: &str, filter: &str, search: &str) -> Config {
        Config {
            folder: folder.into(),
            file_filter: filter.into(),
            search: search.into(),
            replacements: HashMap::from([
                ("dev".to_string(), "bar$1".to_string()),
                ("staging".to_string(), "stage$1".to_string()),
            ]),
        }
    }

    fn context(files: &[&str], search: &str, template: &str) -> RunContext {
        RunContext {
            files: files.iter().map(PathBuf::from).collect(),
            replacer: Replacer::new(search, template).unwrap(),
        }
    }

    fn report_lines(report: Report<Vec<u8>>) -> Vec<String> {
        String::from_utf8(report.into_inner())
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_substitute_with_back_references() {
        let replacer = Replacer::new(r"foo(\d+)", "bar$1").unwrap();
        let result = replacer.substitute("foo1 and foo22");

        assert_eq!(result.content, "bar1 and bar22");
        assert_eq!(
            result.edits,
            vec![
                Edit { original: "foo1".into(), replacement: "bar1".into() },
                Edit { original: "foo22".into(), replacement: "bar22".into() },
            ]
        );
    }

    #[test]
    fn test_substitute_named_groups_and_literal_dollar() {
        let replacer = Replacer::new(r"(?P<key>\w+)=(?P<value>\w+)", "${value}=${key} $$").unwrap();
        let result = replacer.substitute("a=1, b=2");

        assert_eq!(result.content, "1=a $, 2=b $");
        assert_eq!(result.edits.len(), 2);
    }

    #[test]
    fn test_substitute_without_matches_is_identity() {
        let replacer = Replacer::new(r"foo(\d+)", "bar$1").unwrap();
        let content = "nothing to see\nhere\r\n\ttabs stay\n";
        let result = replacer.substitute(content);

        assert_eq!(result.content, content);
        assert!(result.edits.is_empty());
    }

    #[test]
    fn test_substitute_is_idempotent_once_applied() {
        let replacer = Replacer::new(r"foo(\d+)", "bar$1").unwrap();
        let once = replacer.substitute("x foo7 y foo8 z");
        let twice = replacer.substitute(&once.content);

        assert_eq!(twice.content, once.content);
        assert!(twice.edits.is_empty());
    }

    #[test]
    fn test_process_file_reports_each_match() {
        let fs = MemoryFileSystem::default().with_file("a.txt", "foo1 and foo22");
        let ctx = context(&["a.txt"], r"foo(\d+)", "bar$1");
        let mut report = Report::new(Vec::new());

        let outcomes = ctx.execute(&fs, &mut report).unwrap();

        assert!(matches!(outcomes[0].1, FileOutcome::Processed { matches: 2 }));
        assert_eq!(fs.contents("a.txt").unwrap(), "bar1 and bar22");
        let lines = report_lines(report);
        assert_eq!(
            lines.iter().filter(|l| l.starts_with(" - replaced")).count(),
            2
        );
        assert!(lines.contains(&" - replaced 'foo1' with 'bar1'".to_string()));
        assert!(lines.contains(&" - replaced 'foo22' with 'bar22'".to_string()));
        assert_eq!(lines.last().unwrap(), "Search and replace completed.");
    }

    #[test]
    fn test_read_failure_does_not_stop_run() {
        let fs = MemoryFileSystem::default()
            .with_file("a.txt", "foo1")
            .with_file("b.txt", "foo2")
            .with_file("c.txt", "foo3")
            .unreadable("b.txt");
        let ctx = context(&["a.txt", "b.txt", "c.txt"], r"foo(\d+)", "bar$1");
        let mut report = Report::new(Vec::new());

        let outcomes = ctx.execute(&fs, &mut report).unwrap();

        assert!(outcomes[0].1.is_processed());
        assert!(matches!(outcomes[1].1, FileOutcome::ReadFailed(_)));
        assert!(outcomes[2].1.is_processed());
        assert_eq!(fs.contents("a.txt").unwrap(), "bar1");
        assert_eq!(fs.contents("b.txt").unwrap(), "foo2");
        assert_eq!(fs.contents("c.txt").unwrap(), "bar3");
        let lines = report_lines(report);
        assert_eq!(
            lines.iter().filter(|l| *l == " - successfully processed.").count(),
            2
        );
    }

    #[test]
    fn test_write_failure_does_not_stop_run() {
        let fs = MemoryFileSystem::default()
            .with_file("a.txt", "foo1")
            .with_file("b.txt", "foo2")
            .unwritable("a.txt");
        let ctx = context(&["a.txt", "b.txt"], r"foo(\d+)", "bar$1");
        let mut report = Report::new(Vec::new());

        let outcomes = ctx.execute(&fs, &mut report).unwrap();

        match &outcomes[0].1 {
            FileOutcome::WriteFailed(e) => assert!(e.to_string().contains("a.txt")),
            other => panic!("expected write failure, got {other:?}"),
        }
        assert_eq!(fs.contents("a.txt").unwrap(), "foo1");
        assert_eq!(fs.contents("b.txt").unwrap(), "bar2");
    }

    #[test]
    fn test_empty_file_list_prints_footer_only() {
        let fs = MemoryFileSystem::default();
        let ctx = context(&[], "foo", "bar");
        let mut report = Report::new(Vec::new());

        let outcomes = ctx.execute(&fs, &mut report).unwrap();

        assert!(outcomes.is_empty());
        assert_eq!(report_lines(report).len(), 2);
    }

    #[test]
    fn test_prepare_resolves_environment_first() {
        // Both the environment and the glob are bad; the environment is checked first.
        let cfg = config(".", "file[.txt", "(");
        let err = prepare(&cfg, "production").err().unwrap();
        assert!(matches!(err, Error::Environment { .. }));
    }

    #[test]
    fn test_prepare_rejects_bad_glob_before_regex() {
        let cfg = config(".", "file[.txt", "(");
        let err = prepare(&cfg, "dev").err().unwrap();
        assert!(matches!(err, Error::Glob(_)));
    }

    #[test]
    fn test_prepare_rejects_bad_regex() {
        let temp_dir = TempDir::new().unwrap();
        let cfg = config(&temp_dir.path().to_string_lossy(), "*.txt", "foo(");
        let err = prepare(&cfg, "dev").err().unwrap();
        assert!(matches!(err, Error::Regex(_)));
    }

    #[test]
    fn test_prepare_selects_template_for_environment() {
        let temp_dir = TempDir::new().unwrap();
        let cfg = config(&temp_dir.path().to_string_lossy(), "*.txt", r"foo(\d+)");
        let ctx = prepare(&cfg, "staging").unwrap();

        assert_eq!(ctx.replacer.substitute("foo4").content, "stage4");
        assert!(ctx.files.is_empty());
    }

    #[test]
    fn test_run_rewrites_files_on_disk() {
        let temp_dir = TempDir::new().unwrap();
        let data = temp_dir.path().join("data");
        fs::create_dir(&data).unwrap();
        fs::write(data.join("a.txt"), "foo1 and foo22").unwrap();
        fs::write(data.join("b.txt"), "no match here").unwrap();
        fs::write(data.join("c.md"), "foo3").unwrap();

        let config_path = temp_dir.path().join(CONFIG_FILE);
        let config = serde_json::json!({
            "folder": data.to_string_lossy(),
            "fileFilter": "*.txt",
            "search": "foo(\\d+)",
            "replacements": {"dev": "bar$1"}
        });
        fs::write(&config_path, config.to_string()).unwrap();

        let mut out = Vec::new();
        let outcomes = run(&config_path, "dev", &OsFileSystem, &mut out).unwrap();

        assert_eq!(outcomes.len(), 2);
        assert!(outcomes.iter().all(|(_, o)| o.is_processed()));
        assert_eq!(fs::read_to_string(data.join("a.txt")).unwrap(), "bar1 and bar22");
        assert_eq!(fs::read_to_string(data.join("b.txt")).unwrap(), "no match here");
        assert_eq!(fs::read_to_string(data.join("c.md")).unwrap(), "foo3");
    }

    #[test]
    fn test_run_with_unknown_environment_touches_nothing() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a.txt"), "foo1").unwrap();
        let config_path = temp_dir.path().join(CONFIG_FILE);
        let config = serde_json::json!({
            "folder": temp_dir.path().to_string_lossy(),
            "fileFilter": "*.txt",
            "search": "foo(\\d+)",
            "replacements": {"dev": "bar$1"}
        });
        fs::write(&config_path, config.to_string()).unwrap();

        let mut out = Vec::new();
        let err = run(&config_path, "prod", &OsFileSystem, &mut out).err().unwrap();

        assert!(matches!(err, Error::Environment { .. }));
        assert!(out.is_empty());
        assert_eq!(fs::read_to_string(temp_dir.path().join("a.txt")).unwrap(), "foo1");
    }
}
