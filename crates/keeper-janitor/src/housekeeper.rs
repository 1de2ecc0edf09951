//! Core housekeeping implementation: select, confirm, delete

use crate::{HousekeeperConfig, HousekeeperError};
use keeper_domain::traits::{is_affirmative, FileSystem, Operator};
use keeper_domain::{describe_age, FileEntry, RetentionPolicy, Selection};
use std::fmt::Display;
use std::path::Path;
use std::time::{Duration, SystemTime};

const CONFIRM_PROMPT: &str = "Proceed? (y/N): ";

/// Housekeeping service deleting files from a directory tree under a
/// [`RetentionPolicy`]
///
/// Every run is independent: the tree is walked afresh, candidates are
/// selected, the operator is optionally asked to confirm, and deletion is
/// best-effort. A file that cannot be deleted is reported and skipped; the
/// returned count covers successful deletions only.
///
/// # Examples
///
/// ```no_run
/// use keeper_janitor::{ConsoleOperator, Housekeeper, HousekeeperConfig, LocalFileSystem};
/// use std::path::Path;
/// use std::time::Duration;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut housekeeper = Housekeeper::new(
///     HousekeeperConfig::default(),
///     LocalFileSystem::new(),
///     ConsoleOperator::stdio(),
/// );
///
/// // Ask before deleting files older than a week
/// let deleted = housekeeper.cleanup_by_age(Path::new("/var/log/app"), Duration::from_secs(7 * 86400), true)?;
/// println!("Deleted {} files", deleted);
/// # Ok(())
/// # }
/// ```
pub struct Housekeeper<F, O> {
    config: HousekeeperConfig,
    fs: F,
    operator: O,
}

impl<F, O> Housekeeper<F, O>
where
    F: FileSystem,
    F::Error: Display,
    O: Operator,
    O::Error: Display,
{
    /// Create a new Housekeeper over the given collaborators
    pub fn new(config: HousekeeperConfig, fs: F, operator: O) -> Self {
        Self { config, fs, operator }
    }

    /// Create a Housekeeper with default configuration
    pub fn default_config(fs: F, operator: O) -> Self {
        Self::new(HousekeeperConfig::default(), fs, operator)
    }

    /// Get the active configuration
    pub fn config(&self) -> &HousekeeperConfig {
        &self.config
    }

    /// Get the filesystem collaborator
    pub fn file_system(&self) -> &F {
        &self.fs
    }

    /// Get the operator collaborator
    pub fn operator(&self) -> &O {
        &self.operator
    }

    /// Consume the Housekeeper and return its collaborators
    pub fn into_parts(self) -> (F, O) {
        (self.fs, self.operator)
    }

    /// Delete every file under `directory` last modified more than `max_age` ago.
    ///
    /// With `confirm` set, the candidates are previewed and the operator must
    /// answer `y` before anything is deleted.
    ///
    /// # Errors
    ///
    /// [`HousekeeperError::DirectoryNotFound`] if `directory` does not exist,
    /// [`HousekeeperError::Filesystem`] if the tree cannot be walked, and
    /// [`HousekeeperError::Prompt`] if the operator's answer cannot be read.
    pub fn cleanup_by_age(
        &mut self,
        directory: &Path,
        max_age: Duration,
        confirm: bool,
    ) -> Result<usize, HousekeeperError> {
        let entries = self.scan(directory)?;
        let policy = RetentionPolicy::ByAge(max_age);
        let age = describe_age(max_age);

        let selection = policy.select(entries, SystemTime::now());
        self.log_selection(directory, &policy, &selection);

        if selection.is_empty() {
            self.operator.say(&format!("No files older than {} found.", age));
            return Ok(0);
        }

        if self.config.dry_run {
            return Ok(self.report_dry_run(directory, &policy, &selection.eligible));
        }

        if confirm {
            self.operator.say(&format!(
                "Will delete {} files older than {}:",
                selection.eligible.len(),
                age
            ));
            self.preview(&selection.eligible);

            if !self.confirm()? {
                return Ok(0);
            }
        }

        let deleted = self.delete_all(&selection.eligible);
        tracing::info!(
            directory = %directory.display(),
            policy = %policy,
            deleted,
            failed = selection.eligible.len() - deleted,
            "Age cleanup finished"
        );
        Ok(deleted)
    }

    /// Keep the `keep_count` most recently modified files under `directory`
    /// and delete the rest.
    ///
    /// Nothing is deleted, and no prompt is shown, when the tree holds at most
    /// `keep_count` files.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Housekeeper::cleanup_by_age`].
    pub fn cleanup_by_count(
        &mut self,
        directory: &Path,
        keep_count: usize,
        confirm: bool,
    ) -> Result<usize, HousekeeperError> {
        let entries = self.scan(directory)?;

        if entries.len() <= keep_count {
            self.operator.say(&format!(
                "Only {} files found, no deletion needed.",
                entries.len()
            ));
            return Ok(0);
        }

        let policy = RetentionPolicy::ByCount(keep_count);
        let selection = policy.select(entries, SystemTime::now());
        self.log_selection(directory, &policy, &selection);

        if self.config.dry_run {
            return Ok(self.report_dry_run(directory, &policy, &selection.eligible));
        }

        if confirm {
            self.operator.say(&format!(
                "Will delete {} files, keeping {} newest.",
                selection.eligible.len(),
                selection.retained.len()
            ));

            if !self.confirm()? {
                return Ok(0);
            }
        }

        let deleted = self.delete_all(&selection.eligible);
        tracing::info!(
            directory = %directory.display(),
            policy = %policy,
            deleted,
            failed = selection.eligible.len() - deleted,
            "Count cleanup finished"
        );
        Ok(deleted)
    }

    /// Run a cleanup under an explicit policy
    pub fn cleanup(
        &mut self,
        directory: &Path,
        policy: &RetentionPolicy,
        confirm: bool,
    ) -> Result<usize, HousekeeperError> {
        match *policy {
            RetentionPolicy::ByAge(max_age) => self.cleanup_by_age(directory, max_age, confirm),
            RetentionPolicy::ByCount(keep) => self.cleanup_by_count(directory, keep, confirm),
        }
    }

    /// Non-interactive cleanup choosing the policy from whichever limit is set.
    ///
    /// `max_age` wins when both are given. With neither, a usage hint is
    /// printed and nothing happens.
    pub fn cleanup_directory(
        &mut self,
        directory: &Path,
        max_age: Option<Duration>,
        keep_count: Option<usize>,
    ) -> Result<usize, HousekeeperError> {
        match (max_age, keep_count) {
            (Some(max_age), _) => self.cleanup_by_age(directory, max_age, false),
            (None, Some(keep)) => self.cleanup_by_count(directory, keep, false),
            (None, None) => {
                self.operator.say("Specify a maximum age or a keep count.");
                Ok(0)
            }
        }
    }

    /// Walk `directory` and stat every file found
    fn scan(&self, directory: &Path) -> Result<Vec<FileEntry>, HousekeeperError> {
        if !self.fs.exists(directory) {
            return Err(HousekeeperError::DirectoryNotFound(directory.to_path_buf()));
        }

        let paths = self.fs.list_files(directory).map_err(|e| {
            HousekeeperError::Filesystem(format!("Failed to list {}: {}", directory.display(), e))
        })?;

        paths
            .into_iter()
            .map(|path| -> Result<FileEntry, HousekeeperError> {
                let modified = self.fs.modified(&path).map_err(|e| {
                    HousekeeperError::Filesystem(format!("Failed to stat {}: {}", path.display(), e))
                })?;
                Ok(FileEntry::new(path, modified))
            })
            .collect()
    }

    fn log_selection(&self, directory: &Path, policy: &RetentionPolicy, selection: &Selection) {
        tracing::debug!(
            directory = %directory.display(),
            policy = %policy,
            eligible = selection.eligible.len(),
            retained = selection.retained.len(),
            "Selected cleanup candidates"
        );
    }

    /// Show the first few candidates before a prompt
    fn preview(&mut self, eligible: &[FileEntry]) {
        let limit = self.config.preview_limit;
        for entry in eligible.iter().take(limit) {
            self.operator.say(&format!("  {}", entry.path.display()));
        }
        if eligible.len() > limit {
            self.operator
                .say(&format!("  ... and {} more", eligible.len() - limit));
        }
    }

    fn confirm(&mut self) -> Result<bool, HousekeeperError> {
        let response = self
            .operator
            .prompt(CONFIRM_PROMPT)
            .map_err(|e| HousekeeperError::Prompt(e.to_string()))?;

        if is_affirmative(&response) {
            return Ok(true);
        }

        self.operator.say("Deletion cancelled.");
        tracing::info!("Deletion cancelled by operator");
        Ok(false)
    }

    fn report_dry_run(&mut self, directory: &Path, policy: &RetentionPolicy, eligible: &[FileEntry]) -> usize {
        self.operator.say(&format!(
            "Dry run: would delete {} files ({}):",
            eligible.len(),
            policy
        ));
        for entry in eligible {
            self.operator.say(&format!("  {}", entry.path.display()));
        }

        tracing::info!(
            directory = %directory.display(),
            policy = %policy,
            eligible = eligible.len(),
            "DRY RUN: nothing deleted"
        );
        0
    }

    /// Best-effort deletion: failures are reported and skipped
    fn delete_all(&mut self, eligible: &[FileEntry]) -> usize {
        let mut deleted = 0;

        for entry in eligible {
            match self.fs.remove_file(&entry.path) {
                Ok(()) => {
                    deleted += 1;
                    tracing::debug!(path = %entry.path.display(), "Deleted file");
                }
                Err(e) => {
                    tracing::warn!(path = %entry.path.display(), error = %e, "Failed to delete file");
                    let failure = HousekeeperError::DeletionFailed {
                        path: entry.path.clone(),
                        cause: e.to_string(),
                    };
                    self.operator.say(&failure.to_string());
                }
            }
        }

        deleted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{BTreeMap, HashSet, VecDeque};
    use std::path::PathBuf;

    const HOUR: u64 = 3600;
    const DAY: u64 = 24 * HOUR;

    // In-memory filesystem rooted at a single directory
    struct MockFs {
        root: PathBuf,
        files: BTreeMap<PathBuf, SystemTime>,
        failing: HashSet<PathBuf>,
        remove_calls: usize,
    }

    impl MockFs {
        fn new(root: &str) -> Self {
            Self {
                root: PathBuf::from(root),
                files: BTreeMap::new(),
                failing: HashSet::new(),
                remove_calls: 0,
            }
        }

        fn add_file(&mut self, name: &str, age_secs: u64) -> PathBuf {
            let path = self.root.join(name);
            let modified = SystemTime::now() - Duration::from_secs(age_secs);
            self.files.insert(path.clone(), modified);
            path
        }

        fn fail_on(&mut self, path: PathBuf) {
            self.failing.insert(path);
        }
    }

    impl FileSystem for MockFs {
        type Error = String;

        fn exists(&self, path: &Path) -> bool {
            path == self.root || self.files.contains_key(path)
        }

        fn list_files(&self, dir: &Path) -> Result<Vec<PathBuf>, Self::Error> {
            Ok(self
                .files
                .keys()
                .filter(|p| p.starts_with(dir))
                .cloned()
                .collect())
        }

        fn modified(&self, path: &Path) -> Result<SystemTime, Self::Error> {
            self.files
                .get(path)
                .copied()
                .ok_or_else(|| format!("{} not found", path.display()))
        }

        fn remove_file(&mut self, path: &Path) -> Result<(), Self::Error> {
            self.remove_calls += 1;
            if self.failing.contains(path) {
                return Err("Permission denied".to_string());
            }
            self.files
                .remove(path)
                .map(|_| ())
                .ok_or_else(|| format!("{} not found", path.display()))
        }
    }

    // Operator answering prompts from a script
    #[derive(Default)]
    struct ScriptedOperator {
        responses: VecDeque<String>,
        lines: Vec<String>,
        prompts: usize,
    }

    impl ScriptedOperator {
        fn answering(responses: &[&str]) -> Self {
            Self {
                responses: responses.iter().map(|r| r.to_string()).collect(),
                ..Default::default()
            }
        }

        fn printed(&self, needle: &str) -> bool {
            self.lines.iter().any(|line| line.contains(needle))
        }
    }

    impl Operator for ScriptedOperator {
        type Error = String;

        fn say(&mut self, message: &str) {
            self.lines.push(message.to_string());
        }

        fn prompt(&mut self, _question: &str) -> Result<String, Self::Error> {
            self.prompts += 1;
            self.responses
                .pop_front()
                .ok_or_else(|| "stdin closed".to_string())
        }
    }

    fn housekeeper(fs: MockFs, operator: ScriptedOperator) -> Housekeeper<MockFs, ScriptedOperator> {
        Housekeeper::default_config(fs, operator)
    }

    fn week() -> Duration {
        Duration::from_secs(7 * DAY)
    }

    #[test]
    fn test_age_missing_directory() {
        let fs = MockFs::new("/data");
        let mut keeper = housekeeper(fs, ScriptedOperator::default());

        let result = keeper.cleanup_by_age(Path::new("/missing"), week(), false);

        assert!(matches!(result, Err(HousekeeperError::DirectoryNotFound(_))));
        assert_eq!(keeper.file_system().remove_calls, 0);
    }

    #[test]
    fn test_count_missing_directory() {
        let fs = MockFs::new("/data");
        let mut keeper = housekeeper(fs, ScriptedOperator::default());

        let result = keeper.cleanup_by_count(Path::new("/missing"), 3, true);

        assert!(matches!(result, Err(HousekeeperError::DirectoryNotFound(_))));
        assert_eq!(keeper.file_system().remove_calls, 0);
        assert_eq!(keeper.operator().prompts, 0);
    }

    #[test]
    fn test_age_deletes_old_file() {
        let mut fs = MockFs::new("/data");
        fs.add_file("old.txt", 10 * DAY);
        let mut keeper = housekeeper(fs, ScriptedOperator::default());

        let deleted = keeper.cleanup_by_age(Path::new("/data"), week(), false).unwrap();

        assert_eq!(deleted, 1);
        assert_eq!(keeper.file_system().remove_calls, 1);
        assert!(keeper.file_system().files.is_empty());
    }

    #[test]
    fn test_age_keeps_recent_files() {
        let mut fs = MockFs::new("/data");
        fs.add_file("recent.txt", HOUR);
        let mut keeper = housekeeper(fs, ScriptedOperator::answering(&["y"]));

        let deleted = keeper.cleanup_by_age(Path::new("/data"), week(), true).unwrap();

        assert_eq!(deleted, 0);
        assert_eq!(keeper.file_system().remove_calls, 0);
        assert_eq!(keeper.operator().prompts, 0);
        assert!(keeper.operator().printed("No files older than 7 days found."));
    }

    #[test]
    fn test_empty_directory_never_prompts() {
        let fs = MockFs::new("/data");
        let mut keeper = housekeeper(fs, ScriptedOperator::answering(&["y", "y"]));

        assert_eq!(keeper.cleanup_by_age(Path::new("/data"), week(), true).unwrap(), 0);
        assert_eq!(keeper.cleanup_by_count(Path::new("/data"), 0, true).unwrap(), 0);
        assert_eq!(keeper.operator().prompts, 0);
    }

    #[test]
    fn test_count_deletes_oldest() {
        let mut fs = MockFs::new("/data");
        for i in 0..7 {
            fs.add_file(&format!("file_{}.txt", i), i * HOUR);
        }
        let mut keeper = housekeeper(fs, ScriptedOperator::default());

        let deleted = keeper.cleanup_by_count(Path::new("/data"), 3, false).unwrap();

        assert_eq!(deleted, 4);
        let remaining: Vec<&PathBuf> = keeper.file_system().files.keys().collect();
        assert_eq!(
            remaining,
            vec![
                &PathBuf::from("/data/file_0.txt"),
                &PathBuf::from("/data/file_1.txt"),
                &PathBuf::from("/data/file_2.txt"),
            ]
        );
    }

    #[test]
    fn test_count_fewer_files_than_keep() {
        let mut fs = MockFs::new("/data");
        for i in 0..3 {
            fs.add_file(&format!("file_{}.txt", i), i * DAY);
        }
        let mut keeper = housekeeper(fs, ScriptedOperator::answering(&["y"]));

        let deleted = keeper.cleanup_by_count(Path::new("/data"), 5, true).unwrap();

        assert_eq!(deleted, 0);
        assert_eq!(keeper.file_system().remove_calls, 0);
        assert_eq!(keeper.operator().prompts, 0);
        assert!(keeper.operator().printed("Only 3 files found, no deletion needed."));
    }

    #[test]
    fn test_non_affirmative_answers_cancel() {
        for answer in ["n", "", "no", "yes", "N\n"] {
            let mut fs = MockFs::new("/data");
            fs.add_file("old.txt", 30 * DAY);
            fs.add_file("older.txt", 40 * DAY);
            let mut keeper = housekeeper(fs, ScriptedOperator::answering(&[answer, answer]));

            assert_eq!(keeper.cleanup_by_age(Path::new("/data"), week(), true).unwrap(), 0);
            assert_eq!(keeper.cleanup_by_count(Path::new("/data"), 0, true).unwrap(), 0);

            assert_eq!(keeper.file_system().remove_calls, 0, "answer {:?}", answer);
            assert!(keeper.operator().printed("Deletion cancelled."));
        }
    }

    #[test]
    fn test_affirmative_answer_proceeds() {
        let mut fs = MockFs::new("/data");
        fs.add_file("old.txt", 30 * DAY);
        let mut keeper = housekeeper(fs, ScriptedOperator::answering(&["Y\n"]));

        let deleted = keeper.cleanup_by_age(Path::new("/data"), week(), true).unwrap();

        assert_eq!(deleted, 1);
        assert_eq!(keeper.operator().prompts, 1);
        assert!(keeper.operator().printed("Will delete 1 files older than 7 days:"));
        assert!(keeper.operator().printed("  /data/old.txt"));
    }

    #[test]
    fn test_confirmation_preview_is_truncated() {
        let mut fs = MockFs::new("/data");
        for i in 0..8 {
            fs.add_file(&format!("log_{}.txt", i), (10 + i) * DAY);
        }
        let mut keeper = housekeeper(fs, ScriptedOperator::answering(&["n"]));

        keeper.cleanup_by_age(Path::new("/data"), week(), true).unwrap();

        let operator = keeper.operator();
        let listed = operator.lines.iter().filter(|l| l.starts_with("  /data/")).count();
        assert_eq!(listed, 5);
        assert!(operator.printed("  ... and 3 more"));
    }

    #[test]
    fn test_count_confirmation_message() {
        let mut fs = MockFs::new("/data");
        for i in 0..4 {
            fs.add_file(&format!("file_{}.txt", i), i * HOUR);
        }
        let mut keeper = housekeeper(fs, ScriptedOperator::answering(&["y"]));

        let deleted = keeper.cleanup_by_count(Path::new("/data"), 1, true).unwrap();

        assert_eq!(deleted, 3);
        assert!(keeper.operator().printed("Will delete 3 files, keeping 1 newest."));
    }

    #[test]
    fn test_unreadable_answer_is_an_error() {
        let mut fs = MockFs::new("/data");
        fs.add_file("old.txt", 30 * DAY);
        let mut keeper = housekeeper(fs, ScriptedOperator::default());

        let result = keeper.cleanup_by_age(Path::new("/data"), week(), true);

        assert!(matches!(result, Err(HousekeeperError::Prompt(_))));
        assert_eq!(keeper.file_system().remove_calls, 0);
    }

    #[test]
    fn test_partial_failure_continues() {
        let mut fs = MockFs::new("/data");
        fs.add_file("a.txt", 10 * DAY);
        let stuck = fs.add_file("b.txt", 11 * DAY);
        fs.add_file("c.txt", 12 * DAY);
        fs.fail_on(stuck.clone());
        let mut keeper = housekeeper(fs, ScriptedOperator::default());

        let deleted = keeper.cleanup_by_age(Path::new("/data"), week(), false).unwrap();

        assert_eq!(deleted, 2);
        assert_eq!(keeper.file_system().remove_calls, 3);
        assert!(keeper.file_system().files.contains_key(&stuck));
        assert!(keeper
            .operator()
            .printed("Error deleting /data/b.txt: Permission denied"));
    }

    #[test]
    fn test_age_cleanup_is_idempotent() {
        let mut fs = MockFs::new("/data");
        fs.add_file("old.txt", 10 * DAY);
        fs.add_file("older.txt", 20 * DAY);
        fs.add_file("new.txt", DAY);
        let mut keeper = housekeeper(fs, ScriptedOperator::default());

        assert_eq!(keeper.cleanup_by_age(Path::new("/data"), week(), false).unwrap(), 2);
        assert_eq!(keeper.cleanup_by_age(Path::new("/data"), week(), false).unwrap(), 0);
        assert_eq!(keeper.file_system().files.len(), 1);
    }

    #[test]
    fn test_dry_run_deletes_nothing() {
        let mut fs = MockFs::new("/data");
        fs.add_file("old.txt", 10 * DAY);
        for i in 0..3 {
            fs.add_file(&format!("file_{}.txt", i), i * HOUR);
        }
        let mut keeper = Housekeeper::new(
            HousekeeperConfig::preview_only(),
            fs,
            ScriptedOperator::answering(&["y"]),
        );

        assert_eq!(keeper.cleanup_by_age(Path::new("/data"), week(), true).unwrap(), 0);
        assert_eq!(keeper.cleanup_by_count(Path::new("/data"), 1, true).unwrap(), 0);

        assert_eq!(keeper.file_system().remove_calls, 0);
        assert_eq!(keeper.operator().prompts, 0);
        assert!(keeper.operator().printed("Dry run: would delete 1 files (older than 7 days):"));
        assert!(keeper.operator().printed("Dry run: would delete 3 files (keep 1 newest):"));
    }

    #[test]
    fn test_cleanup_with_policy() {
        let mut fs = MockFs::new("/data");
        fs.add_file("old.txt", 10 * DAY);
        fs.add_file("new.txt", HOUR);
        let mut keeper = housekeeper(fs, ScriptedOperator::default());

        let deleted = keeper
            .cleanup(Path::new("/data"), &RetentionPolicy::ByCount(1), false)
            .unwrap();

        assert_eq!(deleted, 1);
        assert!(keeper.file_system().files.contains_key(Path::new("/data/new.txt")));
    }

    #[test]
    fn test_cleanup_directory_prefers_age() {
        let mut fs = MockFs::new("/data");
        fs.add_file("old.txt", 10 * DAY);
        fs.add_file("a.txt", HOUR);
        fs.add_file("b.txt", 2 * HOUR);
        let mut keeper = housekeeper(fs, ScriptedOperator::default());

        // Age wins: only the 10-day-old file goes, although keep=0 would remove all
        let deleted = keeper
            .cleanup_directory(Path::new("/data"), Some(week()), Some(0))
            .unwrap();

        assert_eq!(deleted, 1);
        assert_eq!(keeper.file_system().files.len(), 2);
        assert_eq!(keeper.operator().prompts, 0);
    }

    #[test]
    fn test_cleanup_directory_by_count_is_non_interactive() {
        let mut fs = MockFs::new("/data");
        for i in 0..4 {
            fs.add_file(&format!("file_{}.txt", i), i * HOUR);
        }
        let mut keeper = housekeeper(fs, ScriptedOperator::default());

        let deleted = keeper
            .cleanup_directory(Path::new("/data"), None, Some(2))
            .unwrap();

        assert_eq!(deleted, 2);
        assert_eq!(keeper.operator().prompts, 0);
    }

    #[test]
    fn test_cleanup_directory_without_limits() {
        let mut fs = MockFs::new("/data");
        fs.add_file("old.txt", 10 * DAY);
        let mut keeper = housekeeper(fs, ScriptedOperator::default());

        let deleted = keeper
            .cleanup_directory(Path::new("/data"), None, None)
            .unwrap();

        assert_eq!(deleted, 0);
        assert_eq!(keeper.file_system().remove_calls, 0);
        assert!(keeper.operator().printed("Specify a maximum age or a keep count."));
    }

    #[test]
    fn test_cleanup_directory_without_limits_ignores_missing_directory() {
        let mut keeper = housekeeper(MockFs::new("/data"), ScriptedOperator::default());
        let result = keeper.cleanup_directory(Path::new("/missing"), None, None);
        assert_eq!(result.unwrap(), 0);
    }

    #[test]
    fn test_deletion_failed_display() {
        let err = HousekeeperError::DeletionFailed {
            path: PathBuf::from("/data/x.log"),
            cause: "busy".to_string(),
        };
        assert_eq!(err.to_string(), "Error deleting /data/x.log: busy");

        let err = HousekeeperError::DirectoryNotFound(PathBuf::from("/nope"));
        assert_eq!(err.to_string(), "Directory /nope does not exist");
    }
}
