use std::cmp::max;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::{anyhow, Context};
use rlimit::{getrlimit, setrlimit, Resource};

use crate::config::Config;
use crate::line::Line;
use crate::merge;
use crate::partition;
use crate::registry::Registry;

/// Sort a `N. W1 W2 ... Wk` text file by word-suffix, then numeric
/// prefix as tie-break.
///
/// # Examples
/// ```
/// use std::path::PathBuf;
/// use wordsuffix_sort::sort::Sort;
///
/// fn sort_lines(input: PathBuf) -> Result<(), anyhow::Error> {
///     let mut sort = Sort::new(input, None);
///     // set number of CPU cores the sort will attempt to use. When given a
///     // number that exceeds the number of available cores the work will be
///     // split among available cores with somewhat degraded performance.
///     sort.with_tasks(2);
///     sort.sort()
/// }
/// ```
pub struct Sort {
    input: PathBuf,
    output: Option<PathBuf>,
    tmp: PathBuf,
    tasks: usize,
    chunk_size: usize,
}

impl Sort {
    /// Create a default Sort definition for `input`, writing to `output`
    /// if given or else `<input-stem>-sorted<ext>` in the input's own
    /// directory.
    ///
    /// A default Sort definition will use the system temporary directory
    /// as defined by `std::env::temp_dir()`, all available CPU cores, and
    /// a chunk size of 1000 lines.
    ///
    /// The Sort implementation will increase the file descriptor rlimit
    /// to accommodate the temp files it opens concurrently, then restore
    /// it once the run completes.
    pub fn new(input: PathBuf, output: Option<PathBuf>) -> Sort {
        Sort {
            input,
            output,
            tmp: std::env::temp_dir(),
            tasks: 0,
            chunk_size: 1000,
        }
    }

    /// Set directory for intermediate files. By default uses
    /// `std::env::temp_dir()`. For large inputs it is recommended to
    /// provide a dedicated directory, preferably on the same file system
    /// as the output.
    pub fn with_tmp_dir(&mut self, tmp: PathBuf) {
        self.tmp = tmp;
    }

    /// Set the number of concurrent tasks. The default is zero, which
    /// results in using all system cores.
    pub fn with_tasks(&mut self, tasks: usize) {
        self.tasks = tasks;
    }

    /// Set the maximum number of lines held in memory per partitioned
    /// chunk.
    pub fn with_chunk_size(&mut self, chunk_size: usize) {
        self.chunk_size = chunk_size;
    }

    /// Run the sort: validate the input and output paths, partition,
    /// merge, then clean up every intermediate temp file regardless of
    /// outcome.
    pub fn sort(&self) -> Result<(), anyhow::Error> {
        let output = self.resolve_output()?;
        self.validate(&output)?;

        let config = self.create_config();
        let registry = Registry::new();

        let (current_soft, current_hard) = Self::get_rlimits()?;
        log::info!(
            "Current rlimit NOFILE, soft: {}, hard: {}",
            current_soft,
            current_hard
        );
        let new_soft = max(256, current_soft);
        log::info!(
            "Set new rlimit NOFILE, soft: {}, hard: {}",
            new_soft,
            current_hard
        );
        Self::set_rlimits(new_soft, current_hard)?;

        let result = self.run_pipeline(&output, &config, &registry);

        registry.cleanup();
        log::info!(
            "Restore rlimit NOFILE, soft: {}, hard: {}",
            current_soft,
            current_hard
        );
        Self::set_rlimits(current_soft, current_hard)?;

        result
    }

    fn run_pipeline(
        &self,
        output: &PathBuf,
        config: &Config,
        registry: &Registry,
    ) -> Result<(), anyhow::Error> {
        log::info!("Start partitioning {}", self.input.display());
        let runs = partition::partition(&self.input, config, registry)?;
        log::info!("Partitioned into {} sorted runs", runs.len());

        log::info!("Start merging sorted runs");
        merge::merge(runs, output, config, registry)?;
        log::info!("Finished sort, output at {}", output.display());
        Ok(())
    }

    /// Check whether `self.input` is already sorted by this crate's
    /// composite key - a cheap, read-only diagnostic.
    pub fn check(&self) -> Result<bool, anyhow::Error> {
        if !self.input.is_file() {
            return Err(anyhow!("input file does not exist: {}", self.input.display()));
        }
        let mut reader = BufReader::new(
            File::open(&self.input).with_context(|| format!("open {}", self.input.display()))?,
        );
        let mut previous: Option<Line> = None;
        while let Some(current) = Line::read_next(&mut reader)
            .with_context(|| format!("read {}", self.input.display()))?
        {
            if let Some(previous_line) = &previous {
                if previous_line > &current {
                    return Ok(false);
                }
            }
            previous = Some(current);
        }
        Ok(true)
    }

    fn resolve_output(&self) -> Result<PathBuf, anyhow::Error> {
        match &self.output {
            Some(output) => Ok(output.clone()),
            None => {
                let stem = self
                    .input
                    .file_stem()
                    .ok_or_else(|| anyhow!("cannot derive output name from {}", self.input.display()))?
                    .to_string_lossy()
                    .into_owned();
                let mut name = format!("{}-sorted", stem);
                if let Some(ext) = self.input.extension() {
                    name.push('.');
                    name.push_str(&ext.to_string_lossy());
                }
                let dir = self.input.parent().unwrap_or_else(|| std::path::Path::new("."));
                Ok(dir.join(name))
            }
        }
    }

    fn validate(&self, output: &PathBuf) -> Result<(), anyhow::Error> {
        if !self.input.is_file() {
            return Err(anyhow!("input file does not exist: {}", self.input.display()));
        }
        if output.exists() {
            return Err(anyhow!(
                "refusing to overwrite existing output file: {}",
                output.display()
            ));
        }
        Ok(())
    }

    fn create_config(&self) -> Config {
        let tasks = if self.tasks == 0 { num_cpus::get() } else { self.tasks };
        Config::new(
            self.tmp.clone(),
            "wordsuffix-".to_string(),
            ".unmerged".to_string(),
            tasks,
            self.chunk_size,
        )
    }

    fn get_rlimits() -> Result<(u64, u64), anyhow::Error> {
        getrlimit(Resource::NOFILE).with_context(|| "getrlimit")
    }

    fn set_rlimits(soft: u64, hard: u64) -> Result<(), anyhow::Error> {
        setrlimit(Resource::NOFILE, soft, hard)
            .with_context(|| format!("set rlimit NOFILE, soft: {}, hard: {}", soft, hard))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(path: &std::path::Path, contents: &str) {
        let mut f = File::create(path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
    }

    #[test]
    fn sorts_an_unsorted_file_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.txt");
        write_file(&input, "3. cherry\n1. apple\n2. banana\n");

        let mut sort = Sort::new(input.clone(), None);
        sort.with_tmp_dir(dir.path().to_path_buf());
        sort.with_chunk_size(2);
        sort.sort().unwrap();

        let output = dir.path().join("in-sorted.txt");
        let contents = std::fs::read_to_string(&output).unwrap();
        assert_eq!(contents, "1. apple\n2. banana\n3. cherry\n");
    }

    #[test]
    fn refuses_to_overwrite_existing_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.txt");
        write_file(&input, "1. apple\n");
        let output = dir.path().join("out.txt");
        write_file(&output, "untouched\n");

        let mut sort = Sort::new(input, Some(output.clone()));
        sort.with_tmp_dir(dir.path().to_path_buf());
        let err = sort.sort().unwrap_err();
        assert!(err.to_string().contains("refusing to overwrite"));
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "untouched\n");
    }

    #[test]
    fn missing_input_file_is_an_error_with_no_side_effects() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("missing.txt");

        let mut sort = Sort::new(input, None);
        sort.with_tmp_dir(dir.path().to_path_buf());
        let err = sort.sort().unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn empty_input_produces_no_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.txt");
        write_file(&input, "");

        let mut sort = Sort::new(input, None);
        sort.with_tmp_dir(dir.path().to_path_buf());
        sort.sort().unwrap();

        assert!(!dir.path().join("in-sorted.txt").exists());
    }

    #[test]
    fn check_reports_true_for_sorted_and_false_for_unsorted() {
        let dir = tempfile::tempdir().unwrap();
        let sorted = dir.path().join("sorted.txt");
        write_file(&sorted, "1. apple\n2. banana\n");
        let sort = Sort::new(sorted, None);
        assert!(sort.check().unwrap());

        let unsorted = dir.path().join("unsorted.txt");
        write_file(&unsorted, "2. banana\n1. apple\n");
        let sort = Sort::new(unsorted, None);
        assert!(!sort.check().unwrap());
    }
}
