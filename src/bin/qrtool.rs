use clap::{Parser, Subcommand, ValueEnum};
use rust_qr_encoder::encoder::CharacterSetEci;
use rust_qr_encoder::tools::{module_stats, save_image, to_ascii};
use rust_qr_encoder::{DEFAULT_QUIET_ZONE, ECLevel, EncodeHints, QrWriter, encode_with_hints};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "qrtool", version, about = "RustQR encoder CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, ValueEnum)]
enum Level {
    L,
    M,
    Q,
    H,
}

impl From<Level> for ECLevel {
    fn from(level: Level) -> Self {
        match level {
            Level::L => ECLevel::L,
            Level::M => ECLevel::M,
            Level::Q => ECLevel::Q,
            Level::H => ECLevel::H,
        }
    }
}

#[derive(clap::Args)]
struct EncodeArgs {
    /// Text to encode
    text: String,
    #[arg(long, value_enum, default_value = "l")]
    level: Level,
    /// Character set name for byte mode (e.g. UTF-8, Shift_JIS)
    #[arg(long)]
    charset: Option<String>,
    #[arg(long, default_value_t = 1)]
    min_version: u32,
    /// Light border in modules
    #[arg(long, default_value_t = DEFAULT_QUIET_ZONE as u16)]
    quiet_zone: u16,
}

#[derive(Subcommand)]
enum Command {
    /// Encode text and write a PNG
    Encode {
        #[command(flatten)]
        args: EncodeArgs,
        #[arg(long)]
        output: PathBuf,
        /// Requested width and height in pixels
        #[arg(long, default_value_t = 256)]
        size: u32,
    },
    /// Encode text and draw it in the terminal
    Ascii {
        #[command(flatten)]
        args: EncodeArgs,
        /// Light modules as blocks, for dark terminals
        #[arg(long)]
        invert: bool,
    },
    /// Print the chosen mode, version, mask and block layout
    Info {
        #[command(flatten)]
        args: EncodeArgs,
        /// Also dump the module matrix
        #[arg(long)]
        matrix: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Encode { args, output, size } => encode_cmd(&args, &output, size),
        Command::Ascii { args, invert } => ascii_cmd(&args, invert),
        Command::Info { args, matrix } => info_cmd(&args, matrix),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", err);
            ExitCode::FAILURE
        }
    }
}

fn hints(args: &EncodeArgs) -> Result<EncodeHints, String> {
    let character_set = match &args.charset {
        Some(name) => CharacterSetEci::for_name(name)
            .ok_or_else(|| format!("Unknown character set: {}", name))?,
        None => CharacterSetEci::default(),
    };
    Ok(EncodeHints {
        error_correction: args.level.into(),
        character_set,
        min_version: args.min_version,
        quiet_zone: usize::from(args.quiet_zone),
    })
}

fn encode_cmd(args: &EncodeArgs, output: &Path, size: u32) -> Result<(), String> {
    let hints = hints(args)?;
    let start = Instant::now();
    let image = QrWriter::encode(&args.text, size, size, &hints)
        .map_err(|err| format!("Failed to encode: {}", err))?;
    let elapsed = start.elapsed();
    save_image(&image, output)
        .map_err(|err| format!("Failed to save image {}: {}", output.display(), err))?;
    println!(
        "Wrote {} ({}x{}) in {:.2}ms",
        output.display(),
        image.width(),
        image.height(),
        elapsed.as_secs_f64() * 1000.0
    );
    Ok(())
}

fn ascii_cmd(args: &EncodeArgs, invert: bool) -> Result<(), String> {
    let hints = hints(args)?;
    let symbol =
        encode_with_hints(&args.text, &hints).map_err(|err| format!("Failed to encode: {}", err))?;
    print!("{}", to_ascii(&symbol, hints.quiet_zone, invert));
    Ok(())
}

fn info_cmd(args: &EncodeArgs, show_matrix: bool) -> Result<(), String> {
    let hints = hints(args)?;
    let start = Instant::now();
    let symbol =
        encode_with_hints(&args.text, &hints).map_err(|err| format!("Failed to encode: {}", err))?;
    let elapsed = start.elapsed();

    println!("Text: {:?} ({} chars)", args.text, args.text.chars().count());
    println!("Character set: {}", hints.character_set);
    println!(
        "Mode: {}  Level: {}  Version: {} ({}x{})",
        symbol.mode(),
        symbol.ec_level(),
        symbol.version().number(),
        symbol.matrix_width(),
        symbol.matrix_width()
    );
    println!("Mask pattern: {}", symbol.mask_pattern().bits());
    println!(
        "Codewords: {} total, {} data, {} EC in {} blocks",
        symbol.num_total_bytes(),
        symbol.num_data_bytes(),
        symbol.num_ec_bytes(),
        symbol.num_rs_blocks()
    );
    let stats = module_stats(&symbol);
    println!(
        "Modules: dark={} total={} dark_ratio={:.2}%",
        stats.dark_modules,
        stats.total_modules,
        stats.dark_ratio * 100.0
    );
    println!("Encoded in {:.2}ms", elapsed.as_secs_f64() * 1000.0);
    if show_matrix {
        print!("{}", symbol.matrix());
    }
    Ok(())
}
