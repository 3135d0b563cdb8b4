use std::io::Write;
use std::path::PathBuf;

use wordsuffix_sort::sort::Sort;

mod common;

#[test]
fn test_parallel_sort_totally_orders_a_large_input() -> Result<(), anyhow::Error> {
    let dir = tempfile::tempdir()?;
    let input_path: PathBuf = dir.path().join("input.txt");
    let output_path: PathBuf = dir.path().join("output.txt");

    let words = ["One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine"];
    {
        let mut f = std::fs::File::create(&input_path)?;
        for n in 0..10_000 {
            writeln!(f, "{}. {}", n, words[n % words.len()])?;
        }
    }

    let mut sort = Sort::new(input_path, Some(output_path.clone()));
    sort.with_tasks(8);
    sort.with_chunk_size(500);
    sort.with_tmp_dir(dir.path().to_path_buf());
    sort.sort()?;

    let lines = common::read_lines(output_path)?;
    assert_eq!(lines.len(), 10_000);
    assert!(common::is_ordered_by_suffix_then_prefix(&lines));
    Ok(())
}

/// Re-sorting an already-sorted file yields byte-identical output.
#[test]
fn test_idempotent_resort() -> Result<(), anyhow::Error> {
    let dir = tempfile::tempdir()?;
    let input_path: PathBuf = dir.path().join("input.txt");
    let once_path: PathBuf = dir.path().join("once.txt");
    let twice_path: PathBuf = dir.path().join("twice.txt");

    {
        let mut f = std::fs::File::create(&input_path)?;
        for n in (0..500).rev() {
            writeln!(f, "{}. word{}", n, n % 11)?;
        }
    }

    let mut first = Sort::new(input_path, Some(once_path.clone()));
    first.with_tasks(2);
    first.with_chunk_size(37);
    first.with_tmp_dir(dir.path().to_path_buf());
    first.sort()?;

    let mut second = Sort::new(once_path.clone(), Some(twice_path.clone()));
    second.with_tasks(4);
    second.with_chunk_size(13);
    second.with_tmp_dir(dir.path().to_path_buf());
    second.sort()?;

    let once = std::fs::read_to_string(once_path)?;
    let twice = std::fs::read_to_string(twice_path)?;
    assert_eq!(once, twice);
    Ok(())
}

#[test]
fn test_empty_input_produces_no_output() -> Result<(), anyhow::Error> {
    let dir = tempfile::tempdir()?;
    let input_path: PathBuf = dir.path().join("empty.txt");
    std::fs::File::create(&input_path)?;

    let output_path: PathBuf = dir.path().join("output.txt");
    let mut sort = Sort::new(input_path, Some(output_path.clone()));
    sort.with_tmp_dir(dir.path().to_path_buf());
    sort.sort()?;

    assert!(!output_path.exists());
    Ok(())
}
