use clap::builder::styling::AnsiColor;
use clap::builder::Styles;
use clap::{Parser, Subcommand};

const fn extra_build_info() -> &'static str {
    match option_env!("CARGO_BUILD_DESC") {
        Some(e) => e,
        None => env!("CARGO_PKG_VERSION"),
    }
}
pub const VERSION: &str = extra_build_info();
const INFO_STRING: &str = "
🧬 dnapool version ";
const AFTER_STRING: &str = "
   ──────────────────────────────────
   one byte pool for many DNA sequences, located by a start/width table
   valid letters: ACGTRYSWKMBDHVN- (any case, stored uppercase)

   dnapool pack seqs.txt -o pool.bin --ranges ranges.tsv
   dnapool summary --ranges ranges.tsv";

// colouring of the help
const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Yellow.on_default().bold())
    .usage(AnsiColor::BrightMagenta.on_default().bold())
    .literal(AnsiColor::BrightMagenta.on_default())
    .placeholder(AnsiColor::White.on_default());

#[derive(Parser)]
#[command(
    version = VERSION,
    about = format!("{}{}{}", INFO_STRING, VERSION, AFTER_STRING),
    arg_required_else_help = true,
    flatten_help = true,
    styles = STYLES
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Pack a list of sequences into a pool file and a ranges file
    #[command(arg_required_else_help = true)]
    Pack {
        /// the input sequence list, with every line in one of two formats:
        ///   1. SEQUENCE
        ///   2. SEQUENCE<TAB>NAME
        /// lines starting with # are ignored
        #[arg(verbatim_doc_comment)]
        input: String,

        /// the output pool file, holding every sequence back to back
        #[arg(short, default_value = "pool.bin")]
        output: String,

        /// the output ranges file
        #[arg(long, default_value = "ranges.tsv")]
        ranges: String,

        /// the number of threads to use for validation
        #[arg(short, long, default_value_t = 1)]
        threads: usize,
    },

    /// Print statistics about a ranges file as JSON
    #[command(arg_required_else_help = true)]
    Summary {
        /// the ranges file
        #[arg(long)]
        ranges: String,
    },
}
