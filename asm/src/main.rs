use color_print::{cformat, cprintln};
use pasm::{report, Assembly, Config, Error};
use std::process::ExitCode;
use tracing::Level;

const HELP_TEMPLATE: &str = "\
{before-help}{bin} {version}
  {author}
  {about}

{usage-heading}
{tab}{usage}

{all-args}{after-help}";

#[derive(Debug, clap::Parser)]
#[clap(author, version, about, help_template = HELP_TEMPLATE)]
struct Args {
    /// Input file
    #[clap(default_value = "main.asm")]
    input: String,

    /// Output file
    #[clap(short, long, default_value = "main.asm.out")]
    output: String,

    /// Write the macro expanded source
    #[clap(short, long)]
    expanded: Option<String>,

    /// Write the intermediate code
    #[clap(short, long)]
    intermediate: Option<String>,

    /// YAML config file
    #[clap(short, long)]
    config: Option<String>,

    /// Dump tables
    #[clap(short, long)]
    dump: bool,

    /// One of `TRACE`, `DEBUG`, `INFO`, `WARN`, or `ERROR`
    #[clap(short, long, default_value_t = Level::WARN)]
    log_level: Level,
}

fn main() -> ExitCode {
    use clap::Parser;

    let args: Args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .with_writer(std::io::stderr)
        .init();

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            cprintln!("<red,bold>error</>: {}", err);
            if let Some(source) = std::error::Error::source(&err) {
                cprintln!("  <blue>caused by</>: {}", source);
            }
            ExitCode::FAILURE
        }
    }
}

fn write(path: &str, text: &str) -> Result<(), Error> {
    println!("  > {}", path);
    std::fs::write(path, text).map_err(|e| Error::FileWrite(path.to_string(), e))
}

/// Returns whether the source assembled without errors.
fn run(args: &Args) -> Result<bool, Error> {
    println!("Pooled Two-Pass Assembler");

    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    println!("1. Read File");
    println!("  < {}", args.input);
    let src = std::fs::read_to_string(&args.input)
        .map_err(|e| Error::FileRead(args.input.clone(), e))?;

    println!("2. Expand Macros & Assemble");
    let asm = Assembly::run(&src, &config);
    if let Some(path) = &args.expanded {
        write(path, &asm.expansion.text())?;
    }
    if let Some(path) = &args.intermediate {
        write(path, &report::intermediate(&asm.pass1.ic))?;
    }

    for diag in &asm.diags {
        diag.error.print_diag(&args.input, diag.line, &diag.text);
    }

    println!("3. Generate Machine Code");
    write(&args.output, &asm.listing(config.output.location))?;

    if args.dump {
        report::print_dump(&asm);
    }

    let errors = asm.diags.iter().filter(|d| !d.error.is_warning()).count();
    if errors > 0 {
        println!("{}", cformat!("<r,s>{} error(s)</>", errors));
    }
    Ok(!asm.has_error())
}
