use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Context;

use crate::config::Config;
use crate::line::Line;
use crate::registry::Registry;
use crate::tempfiles;

/// Stream `input_path`, slice it into chunks of at most `chunk_size`
/// non-empty lines, and dispatch each chunk to a concurrent task that
/// sorts it in memory and writes it out as a sorted run. Reading the
/// next chunk overlaps with sorting and writing the previous one - the
/// reader never waits on a dispatched task, only the final barrier at
/// end-of-stream does.
///
/// Every run path, successful or not, that is produced by a completed
/// task is tracked in `registry` before this function returns, so a
/// failure here still leaves the Janitor with a complete picture of
/// what needs to be removed.
pub(crate) fn partition(
    input_path: &Path,
    config: &Config,
    registry: &Registry,
) -> Result<Vec<PathBuf>, anyhow::Error> {
    let file = File::open(input_path)
        .with_context(|| format!("open input file {}", input_path.display()))?;
    let mut reader = BufReader::new(file);

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.tasks().max(1))
        .build()
        .context("build partition thread pool")?;

    let outcomes: Mutex<Vec<Result<PathBuf, anyhow::Error>>> = Mutex::new(Vec::new());

    pool.scope(|scope| loop {
        let (chunk, end) = match read_chunk(&mut reader, config.chunk_size()) {
            Ok(result) => result,
            Err(e) => {
                outcomes.lock().unwrap().push(Err(e));
                break;
            }
        };
        if !chunk.is_empty() {
            let outcomes = &outcomes;
            scope.spawn(move |_| {
                let outcome = sort_and_write(chunk, config);
                outcomes.lock().unwrap().push(outcome);
            });
        }
        // a blank line only ends the current chunk early - the reader
        // keeps going and slices the next one. Only end-of-stream stops
        // the loop itself.
        if end == ChunkEnd::Eof {
            break;
        }
    });

    let mut run_paths = Vec::new();
    let mut first_error: Option<anyhow::Error> = None;
    for outcome in outcomes.into_inner().unwrap() {
        match outcome {
            Ok(path) => {
                registry.track(path.clone());
                run_paths.push(path);
            }
            Err(e) => {
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
        }
    }

    match first_error {
        Some(e) => Err(e),
        None => Ok(run_paths),
    }
}

/// Why `read_chunk` stopped filling its buffer - distinguishing a blank
/// line (more input follows) from end-of-stream (nothing more to read)
/// is what lets the partitioner keep slicing chunks past a blank line
/// instead of treating it as the end of the whole file.
#[derive(Debug, Eq, PartialEq)]
enum ChunkEnd {
    ChunkFull,
    Blank,
    Eof,
}

fn read_chunk<R: BufRead>(
    reader: &mut R,
    chunk_size: usize,
) -> Result<(Vec<Line>, ChunkEnd), anyhow::Error> {
    let mut lines = Vec::with_capacity(chunk_size);
    while lines.len() < chunk_size {
        match Line::read_next(reader)? {
            Some(line) if line.as_str().is_empty() => return Ok((lines, ChunkEnd::Blank)),
            Some(line) => lines.push(line),
            None => return Ok((lines, ChunkEnd::Eof)),
        }
    }
    Ok((lines, ChunkEnd::ChunkFull))
}

fn sort_and_write(mut chunk: Vec<Line>, config: &Config) -> Result<PathBuf, anyhow::Error> {
    chunk.sort_unstable();
    let path = tempfiles::allocate(config)?;
    if let Err(e) = write_chunk(&path, &chunk) {
        let _ = std::fs::remove_file(&path);
        return Err(e);
    }
    Ok(path)
}

fn write_chunk(path: &Path, lines: &[Line]) -> Result<(), anyhow::Error> {
    let file = File::create(path)
        .with_context(|| format!("create run file {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    for line in lines {
        writer.write_all(line.as_str().as_bytes())?;
        writer.write_all(b"\n")?;
    }
    writer
        .flush()
        .with_context(|| format!("flush run file {}", path.display()))?;
    Ok(())
}
