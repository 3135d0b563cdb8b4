use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::mpsc;
use std::thread;

use anyhow::Context;
use rand::Rng;

const WORD_BANK: [&str; 9] = [
    "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine",
];

/// Fabricate a synthetic `N. W1 W2 ... Wk` test input: a generator
/// thread produces lines onto a bounded channel, this thread drains it
/// straight to `output`. `max_line_number` bounds the numeric prefix
/// (exclusive), `max_words_per_line` bounds the number of trailing
/// words (exclusive, at least one word is always emitted),
/// `queue_size` is the channel's capacity.
pub fn generate(
    output: &Path,
    line_count: usize,
    max_line_number: usize,
    max_words_per_line: usize,
    queue_size: usize,
) -> Result<(), anyhow::Error> {
    let (sender, receiver) = mpsc::sync_channel::<String>(queue_size.max(1));

    let producer = thread::spawn(move || {
        let mut rng = rand::thread_rng();
        for _ in 0..line_count {
            let n = rng.gen_range(0..max_line_number.max(1));
            let word_count = rng.gen_range(1..max_words_per_line.max(2));
            let mut line = format!("{}.", n);
            for _ in 0..word_count {
                let word = WORD_BANK[rng.gen_range(0..WORD_BANK.len())];
                line.push(' ');
                line.push_str(word);
            }
            if sender.send(line).is_err() {
                break;
            }
        }
    });

    let file = File::create(output).with_context(|| format!("create {}", output.display()))?;
    let mut writer = BufWriter::new(file);
    for line in receiver {
        writeln!(writer, "{}", line)?;
    }
    writer
        .flush()
        .with_context(|| format!("flush {}", output.display()))?;

    producer
        .join()
        .map_err(|_| anyhow::anyhow!("generator thread panicked"))?;
    Ok(())
}
