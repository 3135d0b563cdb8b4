use std::path::PathBuf;

#[derive(Clone)]
pub(crate) struct Config {
    tmp: PathBuf,
    tmp_prefix: String,
    tmp_suffix: String,
    tasks: usize,
    chunk_size: usize,
}

impl Config {
    pub(crate) fn new(
        tmp: PathBuf,
        tmp_prefix: String,
        tmp_suffix: String,
        tasks: usize,
        chunk_size: usize,
    ) -> Config {
        Config {
            tmp,
            tmp_prefix,
            tmp_suffix,
            tasks,
            chunk_size,
        }
    }

    pub(crate) fn tmp(&self) -> &PathBuf {
        &self.tmp
    }

    pub(crate) fn tmp_prefix(&self) -> &String {
        &self.tmp_prefix
    }

    pub(crate) fn tmp_suffix(&self) -> &String {
        &self.tmp_suffix
    }

    pub(crate) fn tasks(&self) -> usize {
        self.tasks
    }

    /// Maximum number of lines held in memory per chunk.
    pub(crate) fn chunk_size(&self) -> usize {
        self.chunk_size
    }
}
