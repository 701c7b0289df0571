mod analyze;
mod load;
mod report;

use anyhow::{ensure, Result};
use bpaf::Bpaf;
use std::io::Write;
use std::path::PathBuf;

/// Print descriptive statistics for every column of a CSV file
#[derive(Debug, Clone, Bpaf)]
#[bpaf(options, version)]
struct Options {
    /// Field delimiter (a single ASCII character)
    #[bpaf(short('d'), long, argument("CHAR"), fallback(','))]
    delimiter: char,
    /// Print the report as JSON instead of aligned text
    json: bool,
    /// The CSV file to analyse
    #[bpaf(positional("FILE"))]
    file_path: PathBuf,
}

fn main() {
    env_logger::init();
    let stdout = std::io::stdout();
    let result = run(options().run(), stdout.lock());
    match result {
        Ok(()) => (),
        Err(e) => {
            // Ignore EPIPE
            if let Some(e) = e.downcast_ref::<std::io::Error>() {
                if e.kind() == std::io::ErrorKind::BrokenPipe {
                    return;
                }
            }
            eprintln!("Error: {}", e);
            std::process::exit(1)
        }
    }
}

// parse args -> load -> analyze -> report
fn run(opts: Options, mut out: impl Write) -> Result<()> {
    ensure!(
        opts.delimiter.is_ascii(),
        "delimiter must be a single ASCII character"
    );
    let cfg = load::Config {
        delimiter: opts.delimiter as u8,
    };

    // Fallible on purpose: a closed stdout must come back as an io::Error
    writeln!(out, "Analyzing file: {}...", opts.file_path.display())?;
    let table = load::load_csv(&opts.file_path, &cfg)?;
    let report = analyze::analyze(&table);

    if opts.json {
        report::write_json(out, &report)?;
    } else {
        report::write_text(out, &report)?;
    }
    Ok(())
}
