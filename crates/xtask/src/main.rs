//! This program is a development tool for working on the generated types.
//!
//! `hlsl-rs` runs the generator from its build script, so this is only
//! needed to look at the output or to check whether a directory holds the
//! current output. The generated `mod.rs` includes its siblings from
//! `OUT_DIR`, so only the build script's copy compiles as a module.

use std::path::PathBuf;

use clap::Parser;
use hlsl_rs_gen::{Driver, GenerateOptions};

#[derive(clap::Parser)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct GenerateArgs {
    /// Directory to write the generated files into
    #[arg(long)]
    out_dir: PathBuf,
    /// Also generate `from_<type>` functions for narrowing conversions
    #[arg(long)]
    explicit_casts: bool,
    /// Put array and iterator members in the primary file of each type
    #[arg(long)]
    no_separate_extensions: bool,
}

impl GenerateArgs {
    fn options(&self) -> GenerateOptions {
        GenerateOptions {
            explicit_casts: self.explicit_casts,
            separate_extensions: !self.no_separate_extensions,
            ..Default::default()
        }
    }
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Generate every type into a directory, rewriting only changed files
    Generate(GenerateArgs),
    /// Exit with an error if generating into a directory would change it
    Check(GenerateArgs),
    /// List the HLSL name and Rust type of every generated type
    Types,
}

fn main() {
    env_logger::builder().init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate(args) => generate(&args),
        Commands::Check(args) => check(&args),
        Commands::Types => types(),
    };
    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn generate(args: &GenerateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let report = Driver::new(args.options())?.run(&args.out_dir)?;
    println!(
        "{} written, {} unchanged in {}",
        report.written.len(),
        report.unchanged.len(),
        args.out_dir.display()
    );
    Ok(())
}

fn check(args: &GenerateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let stale = Driver::new(args.options())?.check(&args.out_dir)?;
    if stale.is_empty() {
        log::info!("{} is up to date", args.out_dir.display());
        return Ok(());
    }
    for path in &stale {
        println!("{}", path.display());
    }
    Err(format!(
        "{} file(s) out of date, run 'cargo xtask generate --out-dir {}'",
        stale.len(),
        args.out_dir.display()
    )
    .into())
}

fn types() -> Result<(), Box<dyn std::error::Error>> {
    let driver = Driver::new(GenerateOptions::default())?;
    let crate_name = &driver.options().crate_name;
    for shape in driver.registry().shapes() {
        println!("{:<10} {crate_name}::{}", shape.hlsl_name(), shape.name());
    }
    Ok(())
}
