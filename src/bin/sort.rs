use std::path::PathBuf;

use wordsuffix_sort::sort::Sort;

/// Manual flag scan instead of `clap`: the required behavior here -
/// missing `-i` prints a diagnostic and still exits 0, unknown flags
/// are silently ignored - doesn't match clap's default exit-2-on-
/// missing-required-arg behavior.
struct Args {
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    chunk_size: Option<usize>,
    check: bool,
}

fn parse_args() -> Args {
    let mut args = Args {
        input: None,
        output: None,
        chunk_size: None,
        check: false,
    };
    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "-i" => args.input = it.next().map(PathBuf::from),
            "-o" => args.output = it.next().map(PathBuf::from),
            "-s" => {
                args.chunk_size = it.next().and_then(|s| s.parse().ok());
            }
            "--check" => args.check = true,
            _ => {}
        }
    }
    args
}

fn main() {
    simple_logger::init_with_level(log::Level::Info).unwrap();
    let args = parse_args();

    let input = match args.input {
        Some(input) => input,
        None => {
            println!("missing required -i <input-path> argument");
            return;
        }
    };

    let mut sort = Sort::new(input, args.output);
    if let Some(chunk_size) = args.chunk_size {
        sort.with_chunk_size(chunk_size);
    }

    if args.check {
        match sort.check() {
            Ok(true) => println!("sorted"),
            Ok(false) => println!("not sorted"),
            Err(e) => println!("check failed: {:#}", e),
        }
        return;
    }

    if let Err(e) = sort.sort() {
        println!("sort failed: {:#}", e);
    }
}
