use std::path::PathBuf;
use std::str::FromStr;

use qpack_format::CompressionMode;
use structopt::clap::AppSettings::*;
use structopt::StructOpt;

/// Default arena size for `create`: 64 MiB.
pub const DEFAULT_CAPACITY: usize = 64 * 1024 * 1024;

#[derive(Debug)]
pub struct ParseCompressionError(String);

impl std::error::Error for ParseCompressionError {}

impl std::fmt::Display for ParseCompressionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Unknown compression method: {} (expected one of: {})",
            self.0,
            CompressionMode::available_variants().join(", ")
        )
    }
}

fn parse_compression(src: &str) -> Result<CompressionMode, ParseCompressionError> {
    let compression = match src {
        "none" | "stored" => CompressionMode::None,
        "lz4" => CompressionMode::Lz4,
        "deflate" => CompressionMode::Deflate,
        _ => return Err(ParseCompressionError(src.to_string())),
    };

    Ok(compression)
}

/// How `get` prints an entry.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ValueKind {
    Raw,
    U64,
    I64,
    F32,
    F64,
    Str,
}

impl ValueKind {
    pub const VARIANTS: &'static [&'static str] = &["raw", "u64", "i64", "f32", "f64", "str"];
}

impl FromStr for ValueKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "raw" => ValueKind::Raw,
            "u64" => ValueKind::U64,
            "i64" => ValueKind::I64,
            "f32" => ValueKind::F32,
            "f64" => ValueKind::F64,
            "str" => ValueKind::Str,
            _ => return Err(format!("Unknown value kind: {}", s)),
        })
    }
}

#[derive(Debug, StructOpt)]
pub enum Commands {
    #[structopt(name = "c", visible_alias = "create", about = "Create a package and its manifest")]
    Create(CreateArgs),

    #[structopt(name = "l", visible_alias = "list", about = "List the entries of a package")]
    List(ListArgs),

    #[structopt(name = "g", visible_alias = "get", about = "Print a single entry")]
    Get(GetArgs),

    #[structopt(
        name = "x",
        visible_alias = "extract",
        about = "Extract the entries of a package"
    )]
    Extract(ExtractArgs),
}

#[derive(Debug, StructOpt)]
pub struct CreateArgs {
    #[structopt(
        short = "C",
        long,
        parse(try_from_str = parse_compression),
        default_value = "none",
        help = "Compression mode recorded in the package header (data is stored as-is)"
    )]
    pub compression: CompressionMode,

    #[structopt(short, long, help = "Recursively handle provided paths")]
    pub recursive: bool,

    #[structopt(
        short,
        long,
        parse(from_os_str),
        help = "Path to the manifest [default: <package> with a .manifest extension]"
    )]
    pub manifest: Option<PathBuf>,

    #[structopt(long, help = "Bytes reserved up front for file contents [default: 64 MiB]")]
    pub capacity: Option<usize>,

    #[structopt(long, help = "Write files in place instead of through a temporary file")]
    pub no_atomic: bool,

    #[structopt(name = "package", parse(from_os_str), help = "Path to the package")]
    pub package: PathBuf,

    #[structopt(
        name = "files",
        parse(from_os_str),
        help = "Files/directories to add to the package"
    )]
    pub files: Vec<PathBuf>,
}

impl CreateArgs {
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.capacity.unwrap_or(DEFAULT_CAPACITY)
    }
}

#[derive(Debug, StructOpt)]
pub struct ListArgs {
    #[structopt(short, long, parse(from_os_str), help = "Path to the manifest")]
    pub manifest: Option<PathBuf>,

    #[structopt(long, help = "Print the listing as JSON")]
    pub json: bool,

    #[structopt(name = "package", parse(from_os_str), help = "Path to the package")]
    pub package: PathBuf,
}

#[derive(Debug, StructOpt)]
pub struct GetArgs {
    #[structopt(
        long = "as",
        default_value = "raw",
        possible_values = ValueKind::VARIANTS,
        help = "How to print the entry"
    )]
    pub kind: ValueKind,

    #[structopt(name = "package", parse(from_os_str), help = "Path to the package")]
    pub package: PathBuf,

    #[structopt(name = "name", help = "Name of the entry")]
    pub name: String,
}

#[derive(Debug, StructOpt)]
pub struct ExtractArgs {
    #[structopt(short, long, parse(from_os_str), help = "Path to the manifest")]
    pub manifest: Option<PathBuf>,

    #[structopt(
        short,
        long,
        parse(from_os_str),
        default_value = ".",
        help = "Directory to extract into"
    )]
    pub output: PathBuf,

    #[structopt(name = "package", parse(from_os_str), help = "Path to the package")]
    pub package: PathBuf,
}

#[derive(Debug, StructOpt)]
#[structopt(
    name = "qpack",
    about = "Create, inspect and extract qpack packages.",
    settings = &[SubcommandRequiredElseHelp, DisableHelpSubcommand, VersionlessSubcommands],
    usage = "qpack (c|l|g|x) [FLAGS|OPTIONS] <package> [files]..."
)]
pub struct CliOpts {
    #[structopt(short, long, help = "Show verbose output", global = true)]
    pub verbose: bool,

    #[structopt(subcommand)]
    pub cmd: Commands,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliOpts {
        CliOpts::from_iter_safe(args).unwrap()
    }

    #[test]
    fn create_defaults() {
        match parse(&["qpack", "c", "out.package", "a.txt", "b.txt"]).cmd {
            Commands::Create(args) => {
                assert_eq!(args.compression, CompressionMode::None);
                assert_eq!(args.capacity(), DEFAULT_CAPACITY);
                assert_eq!(args.files.len(), 2);
                assert!(args.manifest.is_none());
                assert!(!args.no_atomic);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn explicit_capacity() {
        match parse(&["qpack", "create", "--capacity", "4096", "out.package"]).cmd {
            Commands::Create(args) => assert_eq!(args.capacity(), 4096),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn long_aliases() {
        let opts = parse(&["qpack", "get", "-v", "x.package", "apple", "--as", "u64"]);
        assert!(opts.verbose);
        match opts.cmd {
            Commands::Get(args) => {
                assert_eq!(args.kind, ValueKind::U64);
                assert_eq!(args.name, "apple");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn unknown_compression_is_rejected() {
        assert!(CliOpts::from_iter_safe(&["qpack", "c", "-C", "zstd", "out.package"]).is_err());
    }
}
