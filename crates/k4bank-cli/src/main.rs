use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use glob::glob;
use k4bank_core::{
    BankFormat, BankLayout, DecodeError, DecodeOptions, DumpSource, LayoutError, Report,
    SectionError, SyxFileSource, patch_index, patch_label, validate_envelope,
};
use log::debug;

mod render;

const SYX_HINT: &str = "expected a .syx file";

#[derive(Parser, Debug)]
#[command(name = "k4tool")]
#[command(version)]
#[command(
    about = "Decoder for Kawai K4 SysEx bank dumps.",
    long_about = None,
    after_help = "Examples:\n  k4tool list bank.syx\n  k4tool list bank.syx --format json --pretty -o bank.json\n  k4tool dump bank.syx SA-1\n  k4tool dump bank.syx md-16\n  k4tool identify 'dumps/*.syx'"
)]
struct Cli {
    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the singles, multis, drum and effects of an all-patch dump.
    List {
        /// Path or glob pattern matching one .syx file
        input: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,

        /// Decode name bytes above 0x7F as U+FFFD instead of failing
        #[arg(long)]
        lenient_names: bool,

        /// Write output to a file instead of stdout
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,
    },
    /// Print every parameter of one single or multi patch.
    Dump {
        /// Path or glob pattern matching one .syx file
        input: PathBuf,

        /// Patch to print: SA-1 through SD-16 for singles, MA-1 through MD-16 for multis
        #[arg(value_parser = parse_patch_ref)]
        patch: PatchRef,

        /// Decode name bytes above 0x7F as U+FFFD instead of failing
        #[arg(long)]
        lenient_names: bool,
    },
    /// Show the SysEx header fields and section offsets of a dump.
    Identify {
        /// Path or glob pattern matching one .syx file
        input: PathBuf,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PatchRef {
    Single(usize),
    Multi(usize),
}

/// `S` or `M` followed by a bank label, in either case.
fn parse_patch_ref(text: &str) -> Result<PatchRef, String> {
    let invalid = || format!("'{}' is not a patch; use SA-1 to SD-16 or MA-1 to MD-16", text);
    let mut chars = text.chars();
    let kind = chars.next().map(|c| c.to_ascii_uppercase());
    let index = patch_index(chars.as_str()).ok_or_else(invalid)?;
    match kind {
        Some('S') => Ok(PatchRef::Single(index)),
        Some('M') => Ok(PatchRef::Multi(index)),
        _ => Err(invalid()),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::List {
            input,
            format,
            pretty,
            lenient_names,
            output,
        } => cmd_list(input, format, pretty, lenient_names, output),
        Commands::Dump {
            input,
            patch,
            lenient_names,
        } => cmd_dump(input, patch, lenient_names),
        Commands::Identify { input } => cmd_identify(input),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

/// Message for `error:` plus an optional `hint:` line.
#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            hint: None,
        }
    }

    fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(format!("{:#}", err))
    }
}

impl From<DecodeError> for CliError {
    fn from(err: DecodeError) -> Self {
        let hint = match &err {
            DecodeError::NotBankDump { .. } => {
                Some("only all-patch data dumps (function 0x22) can be decoded")
            }
            DecodeError::Layout(LayoutError::TruncatedData { .. })
            | DecodeError::MissingEndOfExclusive { .. } => {
                Some("the file is not a complete 15123-byte bank dump")
            }
            DecodeError::Section {
                source: SectionError::InvalidCharacter { .. },
                ..
            } => Some("use --lenient-names to decode non-ASCII name bytes"),
            _ => None,
        };
        let error = CliError::new(format!("bank decode failed: {}", err));
        match hint {
            Some(hint) => error.with_hint(hint),
            None => error,
        }
    }
}

fn cmd_list(
    input: PathBuf,
    format: OutputFormat,
    pretty: bool,
    lenient_names: bool,
    output: Option<PathBuf>,
) -> Result<(), CliError> {
    if pretty && format != OutputFormat::Json {
        return Err(
            CliError::new("--pretty only applies to JSON output").with_hint("add --format json")
        );
    }

    let report = decode_input(&input, lenient_names)?;
    let rendered = match format {
        OutputFormat::Text => render::listing(&report.bank).context("rendering failed")?,
        OutputFormat::Json => serialize_report(&report, pretty)?,
    };

    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent).with_context(|| {
                        format!("Failed to create output directory: {}", parent.display())
                    })?;
                }
            }
            fs::write(&path, rendered)
                .with_context(|| format!("Failed to write output: {}", path.display()))?;
            eprintln!("OK: listing written -> {}", path.display());
        }
        None => print!("{}", rendered),
    }
    Ok(())
}

fn cmd_dump(input: PathBuf, patch: PatchRef, lenient_names: bool) -> Result<(), CliError> {
    let report = decode_input(&input, lenient_names)?;
    let bank = &report.bank;
    let rendered = match patch {
        PatchRef::Single(index) => {
            let single = bank
                .singles
                .get(index)
                .ok_or_else(|| CliError::new(format!("no single at index {}", index)))?;
            render::single_sheet(&format!("S{}", patch_label(index)), single)
        }
        PatchRef::Multi(index) => {
            let multi = bank
                .multis
                .get(index)
                .ok_or_else(|| CliError::new(format!("no multi at index {}", index)))?;
            render::multi_sheet(&format!("M{}", patch_label(index)), multi, &bank.singles)
        }
    }
    .context("rendering failed")?;
    print!("{}", rendered);
    Ok(())
}

fn cmd_identify(input: PathBuf) -> Result<(), CliError> {
    let path = resolve_input_path(&input)?;
    validate_input_file(&path)?;

    let mut source = SyxFileSource::open(&path)
        .with_context(|| format!("Failed to open input: {}", path.display()))?;
    let bytes = source
        .read_dump()
        .with_context(|| format!("Failed to read input: {}", path.display()))?;
    let envelope = validate_envelope(&bytes).map_err(|err| {
        CliError::new(format!("invalid SysEx header: {}", err))
            .with_hint("expected a Kawai SysEx dump starting with F0 40")
    })?;
    let layout = BankLayout::for_format(&BankFormat::K4)
        .map_err(|err| CliError::new(format!("layout failed: {}", err)))?;

    let rendered = render::identification(&path, bytes.len(), &envelope, &layout)
        .context("rendering failed")?;
    print!("{}", rendered);
    Ok(())
}

fn decode_input(input: &Path, lenient_names: bool) -> Result<Report, CliError> {
    let path = resolve_input_path(input)?;
    validate_input_file(&path)?;

    let options = DecodeOptions {
        strict_names: !lenient_names,
    };
    let report = k4bank_core::decode_bank_file(&path, &options)?;
    debug!(
        "decoded {} ({} bytes)",
        report.input.path, report.input.bytes
    );
    Ok(report)
}

fn serialize_report(report: &Report, pretty: bool) -> Result<String, CliError> {
    let json = if pretty {
        serde_json::to_string_pretty(report)
    } else {
        serde_json::to_string(report)
    };
    let mut json = json.context("JSON serialization failed")?;
    json.push('\n');
    Ok(json)
}

fn validate_input_file(input: &Path) -> Result<(), CliError> {
    if !input.is_file() {
        let problem = if input.exists() {
            "input is not a file"
        } else {
            "input file not found"
        };
        return Err(CliError::new(format!("{}: {}", problem, input.display())).with_hint(SYX_HINT));
    }
    let is_syx = input
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("syx"));
    if !is_syx {
        return Err(
            CliError::new(format!("unsupported input format '{}'", input.display()))
                .with_hint(SYX_HINT),
        );
    }
    Ok(())
}

/// A glob pattern must resolve to exactly one file; plain paths pass through.
fn resolve_input_path(input: &Path) -> Result<PathBuf, CliError> {
    let pattern = input.to_string_lossy();
    if !is_glob_pattern(&pattern) {
        return Ok(input.to_path_buf());
    }

    let bad_pattern = |detail: String| {
        CliError::new(format!("invalid input pattern '{}'", pattern)).with_hint(detail)
    };
    let mut matches = glob(&pattern)
        .map_err(|err| bad_pattern(err.msg.to_string()))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| bad_pattern(err.to_string()))?;
    matches.retain(|path| path.is_file());

    match matches.len() {
        0 => Err(CliError::new(format!("no dump matches '{}'", pattern))
            .with_hint(format!("quote the pattern or check the directory; {}", SYX_HINT))),
        1 => Ok(matches.remove(0)),
        count => {
            let shown: Vec<String> = matches
                .iter()
                .take(3)
                .map(|path| path.display().to_string())
                .collect();
            let ellipsis = if count > 3 { ", ..." } else { "" };
            Err(CliError::new(format!(
                "multiple files match '{}': {}{} ({} in total)",
                pattern,
                shown.join(", "),
                ellipsis,
                count
            ))
            .with_hint("give one dump per run"))
        }
    }
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains(['*', '?', '['])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_refs_accept_both_cases() {
        assert_eq!(parse_patch_ref("SA-1"), Ok(PatchRef::Single(0)));
        assert_eq!(parse_patch_ref("sd-16"), Ok(PatchRef::Single(63)));
        assert_eq!(parse_patch_ref("Mb-3"), Ok(PatchRef::Multi(18)));
    }

    #[test]
    fn patch_refs_need_kind_and_label() {
        for text in ["", "S", "A-1", "XA-1", "SA-17", "ME-1", "S A-1"] {
            assert!(parse_patch_ref(text).is_err(), "{text:?} should be rejected");
        }
    }

    #[test]
    fn glob_characters_are_detected() {
        assert!(is_glob_pattern("dumps/*.syx"));
        assert!(is_glob_pattern("bank?.syx"));
        assert!(is_glob_pattern("bank[12].syx"));
        assert!(!is_glob_pattern("dumps/bank.syx"));
    }
}
