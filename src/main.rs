use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::process::ExitCode;

use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, ValueEnum};
use deparc::{ArrowPlacement, BlockReader, Options, Rasterizer, Sentence, parse_sentence};
use miette::{IntoDiagnostic, Report, WrapErr};
use tracing_subscriber::EnvFilter;

/// Draw CoNLL dependency trees as PNG arc diagrams.
///
/// Sentences are read as blank-line separated blocks: an id line, the
/// sentence text, then one tab-separated token line per word.
#[derive(Parser, Debug)]
#[command(name = "deparc", version)]
struct Cli {
    /// Read sentences from FILE instead of stdin
    #[arg(short, long, value_name = "FILE")]
    input: Option<Utf8PathBuf>,

    /// Directory that receives the images
    #[arg(short, long, default_value = ".")]
    out_dir: Utf8PathBuf,

    /// Also write `<id>_tagged.png` with lemma, tag and feature rows
    #[arg(long)]
    tags: bool,

    /// Draw the root relation from a `-Root-` pseudo word
    #[arg(long)]
    draw_root: bool,

    /// Arc end that carries the arrowhead
    #[arg(long, value_enum, default_value_t = ArrowArg::Head)]
    arrow: ArrowArg,

    /// Print `<id>\t<base64 png>` lines instead of writing files
    #[arg(long)]
    base64: bool,

    /// Stop at the first sentence that cannot be drawn
    #[arg(long)]
    strict: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ArrowArg {
    Head,
    Dependent,
}

impl From<ArrowArg> for ArrowPlacement {
    fn from(arg: ArrowArg) -> Self {
        match arg {
            ArrowArg::Head => ArrowPlacement::Head,
            ArrowArg::Dependent => ArrowPlacement::Dependent,
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(report) => {
            eprintln!("{report:?}");
            ExitCode::FAILURE
        }
    }
}

/// Whether whoever reads our stdout is still there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Output {
    Open,
    Closed,
}

/// Write `lines` to `out`, one per line, flushing at the end.
///
/// A reader that went away (`BrokenPipe`) is reported as [`Output::Closed`]
/// instead of an error.
fn emit<W: Write>(out: &mut W, lines: &[String]) -> io::Result<Output> {
    let written = lines
        .iter()
        .try_for_each(|line| writeln!(out, "{line}"))
        .and_then(|()| out.flush());
    match written {
        Ok(()) => Ok(Output::Open),
        Err(err) if err.kind() == io::ErrorKind::BrokenPipe => Ok(Output::Closed),
        Err(err) => Err(err),
    }
}

fn run(cli: &Cli) -> miette::Result<()> {
    let (source_name, reader): (String, Box<dyn BufRead>) = match &cli.input {
        Some(path) => {
            let file = File::open(path)
                .into_diagnostic()
                .wrap_err_with(|| format!("cannot open {path}"))?;
            (path.to_string(), Box::new(BufReader::new(file)))
        }
        None => ("<stdin>".to_string(), Box::new(io::stdin().lock())),
    };

    if !cli.base64 {
        std::fs::create_dir_all(&cli.out_dir)
            .into_diagnostic()
            .wrap_err_with(|| format!("cannot create {}", cli.out_dir))?;
    }

    let options = Options {
        draw_root: cli.draw_root,
        arrow: cli.arrow.into(),
        ..Options::default()
    };
    let rasterizer = Rasterizer::new();
    let mut stdout = io::stdout().lock();
    let mut drawn = 0usize;
    let mut skipped = 0usize;

    for block in BlockReader::new(reader) {
        let block = block.into_diagnostic()?;
        let name = format!("{source_name}:{}", block.line);

        let sentence = match parse_sentence(&name, &block.text) {
            Ok(Some(sentence)) => sentence,
            Ok(None) => {
                tracing::debug!("{name}: no token lines, skipped");
                continue;
            }
            Err(err) if cli.strict => return Err(err.into()),
            Err(err) => {
                eprintln!("{:?}", Report::new(err));
                skipped += 1;
                continue;
            }
        };

        match draw(cli, &sentence, &options, &rasterizer) {
            Ok(lines) => {
                drawn += 1;
                if emit(&mut stdout, &lines).into_diagnostic()? == Output::Closed {
                    tracing::debug!("stdout closed after {drawn} sentences");
                    return Ok(());
                }
            }
            Err(deparc::Error::Structure(err)) if !cli.strict => {
                let report = Report::new(err).wrap_err(format!("sentence {:?} ({name})", sentence.id));
                eprintln!("{report:?}");
                skipped += 1;
            }
            Err(err) => {
                return Err(Report::new(err).wrap_err(format!("sentence {:?} ({name})", sentence.id)));
            }
        }
    }

    tracing::info!("{drawn} sentences drawn, {skipped} skipped");
    if skipped > 0 {
        tracing::warn!("{skipped} sentences could not be drawn");
    }
    Ok(())
}

/// Draw one sentence and return what to print for it.
fn draw(
    cli: &Cli,
    sentence: &Sentence,
    options: &Options,
    rasterizer: &Rasterizer,
) -> Result<Vec<String>, deparc::Error> {
    let mut variants = vec![(file_stem(sentence), options.clone())];
    if cli.tags {
        variants.push((format!("{}_tagged", file_stem(sentence)), options.tagged()));
    }

    let mut lines = Vec::with_capacity(variants.len());
    for (stem, options) in variants {
        let svg = deparc::render_svg(sentence, &options)?;
        if cli.base64 {
            lines.push(format!("{stem}\t{}", rasterizer.encode_png_base64(&svg)?));
        } else {
            let path = cli.out_dir.join(format!("{stem}.png"));
            rasterizer.save_png(&svg, &path)?;
            lines.push(path.to_string());
        }
    }
    Ok(lines)
}

/// Sentence id made safe to use as a file name.
fn file_stem(sentence: &Sentence) -> String {
    let stem: String = sentence
        .id
        .chars()
        .map(|c| match c {
            '/' | '\\' | '\0' => '_',
            c => c,
        })
        .collect();
    if stem.is_empty() || Utf8Path::new(&stem).file_name() != Some(stem.as_str()) {
        format!("sentence_{}", stem.replace('.', "_"))
    } else {
        stem
    }
}
