use std::io::Write;
use std::path::PathBuf;

use wordsuffix_sort::sort::Sort;

mod common;

/// 100 lines at chunk size 10 produces 10 sorted runs, merged across
/// four waves (10 -> 5 -> 3 -> 2 -> 1), with every intermediate
/// deleted and the final result totally ordered.
#[test]
fn test_merge_many_runs_across_several_waves() -> Result<(), anyhow::Error> {
    let dir = tempfile::tempdir()?;
    let input_path: PathBuf = dir.path().join("input.txt");
    let output_path: PathBuf = dir.path().join("output.txt");

    {
        let mut f = std::fs::File::create(&input_path)?;
        for n in (0..100).rev() {
            writeln!(f, "{}. word{}", n, n % 7)?;
        }
    }

    let mut sort = Sort::new(input_path, Some(output_path.clone()));
    sort.with_chunk_size(10);
    sort.with_tmp_dir(dir.path().to_path_buf());
    sort.sort()?;

    let lines = common::read_lines(output_path)?;
    assert_eq!(lines.len(), 100);
    assert!(common::is_ordered_by_suffix_then_prefix(&lines));

    // no leftover intermediates in the tmp directory
    let leftovers: Vec<_> = std::fs::read_dir(dir.path())?
        .filter_map(|e| e.ok())
        .filter(|e| e.path() != dir.path().join("input.txt") && e.path() != dir.path().join("output.txt"))
        .collect();
    assert!(leftovers.is_empty(), "leftover temp files: {:?}", leftovers);
    Ok(())
}

/// A single-run input skips merging entirely and is renamed straight
/// through to the output.
#[test]
fn test_merge_single_run_passthrough() -> Result<(), anyhow::Error> {
    let dir = tempfile::tempdir()?;
    let input_path: PathBuf = dir.path().join("input.txt");
    let output_path: PathBuf = dir.path().join("output.txt");

    {
        let mut f = std::fs::File::create(&input_path)?;
        writeln!(f, "1. apple")?;
        writeln!(f, "2. banana")?;
    }

    let mut sort = Sort::new(input_path, Some(output_path.clone()));
    sort.with_chunk_size(1000);
    sort.with_tmp_dir(dir.path().to_path_buf());
    sort.sort()?;

    let lines = common::read_lines(output_path)?;
    assert_eq!(lines, vec!["1. apple", "2. banana"]);
    Ok(())
}
