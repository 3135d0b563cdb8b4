use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Context;

use crate::config::Config;
use crate::line::Line;
use crate::registry::Registry;
use crate::tempfiles;

/// Merge a queue of sorted runs down to a single file at `output_path`,
/// wave by wave: each wave pairs up adjacent runs and merges each pair
/// concurrently, any odd run left over carries straight into the next
/// wave untouched. The queue always shrinks by roughly half per wave,
/// so a pairing is guaranteed whenever more than one run remains -
/// there is no separate "drain the last one" case to special-case.
pub(crate) fn merge(
    mut queue: Vec<PathBuf>,
    output_path: &Path,
    config: &Config,
    registry: &Registry,
) -> Result<(), anyhow::Error> {
    if queue.is_empty() {
        return Ok(());
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.tasks().max(1))
        .build()
        .context("build merge thread pool")?;

    while queue.len() > 1 {
        let mut pairs = Vec::new();
        let mut leftover = None;
        {
            let mut it = queue.into_iter();
            loop {
                match (it.next(), it.next()) {
                    (Some(a), Some(b)) => pairs.push((a, b)),
                    (Some(a), None) => {
                        leftover = Some(a);
                        break;
                    }
                    (None, _) => break,
                }
            }
        }

        let results: Mutex<Vec<Result<PathBuf, anyhow::Error>>> =
            Mutex::new(Vec::with_capacity(pairs.len()));
        pool.scope(|scope| {
            for (a, b) in &pairs {
                let results = &results;
                scope.spawn(move |_| {
                    let outcome = merge_pair(a, b, config);
                    results.lock().unwrap().push(outcome);
                });
            }
        });

        let mut next_queue = Vec::new();
        let mut first_error = None;
        for outcome in results.into_inner().unwrap() {
            match outcome {
                Ok(path) => {
                    registry.track(path.clone());
                    next_queue.push(path);
                }
                Err(e) => {
                    if first_error.is_none() {
                        first_error = Some(e);
                    }
                }
            }
        }
        // the two inputs of every pair are already tracked from the
        // previous wave (or from the partitioner). merge_pair only reads
        // them, it does not delete them, so they stay tracked until the
        // Janitor's final cleanup removes them from disk.
        if let Some(e) = first_error {
            return Err(e);
        }
        if let Some(x) = leftover {
            next_queue.push(x);
        }
        queue = next_queue;
    }

    let last = queue
        .pop()
        .expect("queue non-empty is the loop's own exit condition");
    std::fs::rename(&last, output_path).with_context(|| {
        format!(
            "rename {} to {}",
            last.display(),
            output_path.display()
        )
    })?;
    registry.untrack(&last);
    Ok(())
}

/// Merge two sorted runs into a fresh temp file. Unlike the
/// partitioner's per-chunk sort, a failure here does *not* delete the
/// partial output itself - it is left for the registry's cleanup pass,
/// since by the time this runs the path has already been handed to the
/// caller for tracking.
fn merge_pair(a: &Path, b: &Path, config: &Config) -> Result<PathBuf, anyhow::Error> {
    let mut left = BufReader::new(
        File::open(a).with_context(|| format!("open {}", a.display()))?,
    );
    let mut right = BufReader::new(
        File::open(b).with_context(|| format!("open {}", b.display()))?,
    );

    let out_path = tempfiles::allocate(config)?;
    let mut out = BufWriter::new(
        File::create(&out_path).with_context(|| format!("create {}", out_path.display()))?,
    );

    let mut next_left = Line::read_next(&mut left)
        .with_context(|| format!("read {}", a.display()))?;
    let mut next_right = Line::read_next(&mut right)
        .with_context(|| format!("read {}", b.display()))?;

    loop {
        match (next_left.take(), next_right.take()) {
            (Some(l), Some(r)) => {
                if l <= r {
                    write_line(&mut out, &l)?;
                    next_left = Line::read_next(&mut left)
                        .with_context(|| format!("read {}", a.display()))?;
                    next_right = Some(r);
                } else {
                    write_line(&mut out, &r)?;
                    next_right = Line::read_next(&mut right)
                        .with_context(|| format!("read {}", b.display()))?;
                    next_left = Some(l);
                }
            }
            (Some(l), None) => {
                write_line(&mut out, &l)?;
                next_left = Line::read_next(&mut left)
                    .with_context(|| format!("read {}", a.display()))?;
            }
            (None, Some(r)) => {
                write_line(&mut out, &r)?;
                next_right = Line::read_next(&mut right)
                    .with_context(|| format!("read {}", b.display()))?;
            }
            (None, None) => break,
        }
    }

    out.flush()
        .with_context(|| format!("flush {}", out_path.display()))?;
    Ok(out_path)
}

fn write_line(out: &mut impl Write, line: &Line) -> Result<(), anyhow::Error> {
    out.write_all(line.as_str().as_bytes())?;
    out.write_all(b"\n")?;
    Ok(())
}
