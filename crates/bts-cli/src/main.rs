/// Block trace stream command-line tool — decode raw kernel block-layer
/// trace streams from files, pipes, live `blktrace` output, or the
/// network.
///
/// # Command overview
///
/// ```text
/// bts <COMMAND> [OPTIONS]
///
/// Commands:
///   ingest     Decode a raw trace stream from a file or stdin
///   serve      Listen for TCP trace streams, one decoder per connection
///   fork       Spawn blktrace and decode its output live
///   inspect    Per-record dump of a captured trace file
///   help       Print help information
///
/// Global options:
///   --big-endian          Treat the stream as big-endian (default: little)
///   --max-frame-len N     Frame-size ceiling in bytes
///   -h, --help            Print help
///   -V, --version         Print version
/// ```
///
/// # Exit codes
///
/// | Code | Meaning                                    |
/// |------|--------------------------------------------|
/// | 0    | Success                                    |
/// | 1    | Error (I/O failure, protocol fault, etc.)  |
///
/// Errors go to stderr so record output on stdout pipes cleanly.
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use bts_decoder::{DEFAULT_MAX_FRAME_LEN, FrameConfig};
use bts_wire::ByteOrder;

mod cmd_fork;
mod cmd_ingest;
mod cmd_inspect;
mod cmd_serve;
mod hexdump;

// ── CLI root ──────────────────────────────────────────────────────────────────

/// The block trace stream (bts) command-line tool.
#[derive(Parser)]
#[command(name = "bts", version, about = "Block trace stream decoder")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Decode multi-byte fields as big-endian. The byte order is a
    /// stream-global setting that must match the producing kernel; it is
    /// never auto-detected.
    #[arg(long, global = true)]
    big_endian: bool,

    /// Frame-size ceiling in bytes (header + payload). A header declaring
    /// a larger frame is treated as a protocol violation.
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_FRAME_LEN)]
    max_frame_len: usize,
}

impl Cli {
    fn frame_config(&self) -> FrameConfig {
        FrameConfig {
            byte_order: if self.big_endian {
                ByteOrder::Big
            } else {
                ByteOrder::Little
            },
            max_frame_len: self.max_frame_len,
        }
    }
}

// ── Sub-commands ──────────────────────────────────────────────────────────────

#[derive(Subcommand)]
enum Commands {
    /// Decode a raw trace stream from a file or stdin.
    Ingest(IngestArgs),
    /// Listen for TCP trace streams, one decoder per connection.
    Serve(ServeArgs),
    /// Spawn blktrace and decode its output live.
    Fork(ForkArgs),
    /// Per-record dump of a captured trace file.
    Inspect(InspectArgs),
}

// ── Argument structs ──────────────────────────────────────────────────────────

/// Arguments for `bts ingest`.
///
/// Reads the whole stream synchronously and prints one summary line per
/// record. `-` (the default) reads stdin, so `blktrace -d /dev/sda -o - |
/// bts ingest` works as a pipeline.
#[derive(clap::Args)]
pub struct IngestArgs {
    /// Input file path, `-` for stdin.
    #[arg(short, long, default_value = "-")]
    pub input: String,
}

/// Arguments for `bts serve`.
///
/// Binds a TCP listener and decodes every connection independently. One
/// faulting peer never affects the listener or its siblings; the fault is
/// reported on stderr and that connection alone is abandoned.
#[derive(clap::Args)]
pub struct ServeArgs {
    /// Address to bind.
    #[arg(long, default_value = "0.0.0.0")]
    pub bind: String,

    /// TCP port to listen on.
    #[arg(short, long, default_value_t = 2000)]
    pub port: u16,
}

/// Arguments for `bts fork`.
///
/// Spawns `blktrace -d <dev> ... -o -` and decodes its stdout until the
/// child exits.
#[derive(clap::Args)]
pub struct ForkArgs {
    /// Device to trace; repeat for multiple devices.
    #[arg(short, long, required = true)]
    pub device: Vec<String>,
}

/// Arguments for `bts inspect`.
///
/// Decodes a captured trace file and prints an indexed record dump.
///
/// ```text
/// ┌───────────┬────────────────────────────────────────────────┐
/// │ Flag      │ Effect                                         │
/// ├───────────┼────────────────────────────────────────────────┤
/// │ --limit N │ Stop after N records                           │
/// │ --payload │ Hex dump each record's payload, 16 bytes/line  │
/// └───────────┴────────────────────────────────────────────────┘
/// ```
#[derive(clap::Args)]
pub struct InspectArgs {
    /// Path to the captured trace file.
    pub file: PathBuf,

    /// Stop after this many records.
    #[arg(long)]
    pub limit: Option<usize>,

    /// Hex dump each record's payload.
    #[arg(long)]
    pub payload: bool,
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let config = cli.frame_config();

    let result = match cli.command {
        Commands::Ingest(args) => cmd_ingest::run(&args, config),
        Commands::Serve(args) => cmd_serve::run(&args, config).await,
        Commands::Fork(args) => cmd_fork::run(&args, config).await,
        Commands::Inspect(args) => cmd_inspect::run(&args, config),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}
