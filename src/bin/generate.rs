use std::path::PathBuf;

use wordsuffix_sort::generator;

struct Args {
    output: PathBuf,
    count: usize,
    max_line_number: usize,
    max_words: usize,
    queue_size: usize,
}

fn parse_args() -> Args {
    let mut output = PathBuf::from("generated.txt");
    let mut count = 1000usize;
    let mut max_line_number = 1000usize;
    let mut max_words = 4usize;
    let mut queue_size = 64usize;

    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "-o" => {
                if let Some(v) = it.next() {
                    output = PathBuf::from(v);
                }
            }
            "--count" => {
                if let Some(v) = it.next().and_then(|s| s.parse().ok()) {
                    count = v;
                }
            }
            "--max-line-number" => {
                if let Some(v) = it.next().and_then(|s| s.parse().ok()) {
                    max_line_number = v;
                }
            }
            "--max-words" => {
                if let Some(v) = it.next().and_then(|s| s.parse().ok()) {
                    max_words = v;
                }
            }
            "--queue-size" => {
                if let Some(v) = it.next().and_then(|s| s.parse().ok()) {
                    queue_size = v;
                }
            }
            _ => {}
        }
    }

    Args {
        output,
        count,
        max_line_number,
        max_words,
        queue_size,
    }
}

fn main() {
    simple_logger::init_with_level(log::Level::Info).unwrap();
    let args = parse_args();

    if let Err(e) = generator::generate(
        &args.output,
        args.count,
        args.max_line_number,
        args.max_words,
        args.queue_size,
    ) {
        println!("generate failed: {:#}", e);
    }
}
