//! # Command-Line Front-End
//!
//! Hide and recover messages in PNG files from the shell.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --bin stego -- encode -i photo.png -o imatge_encriptada.png -m "Hi" -a 5 -b 8
//! cargo run --bin stego -- decode -i imatge_encriptada.png -a 5 -b 8
//! cargo run --bin stego -- check -a 5 -b 8
//! cargo run --bin stego -- preview -i photo.png
//! cargo run --bin stego -- letters -t "Hola" -a 5 -k 8
//! ```
//!
//! `a` and `b` are taken as text so that non-numeric input is reported the
//! same way the HTTP API reports it.

use anyhow::Context;
use clap::{Parser, Subcommand};
use log::info;
use std::fs;
use std::path::PathBuf;

use modular_stego::cipher::affine::{self, DEFAULT_TRIAL_TEXT};
use modular_stego::cipher::CipherParams;
use modular_stego::common::logging::init_logger;
use modular_stego::processing::png::{embed_message_png, extract_message_png, load_png};
use modular_stego::processing::preview::{pixel_matrix, DEFAULT_PREVIEW_SIDE};
use modular_stego::processing::steganography::capacity;
use modular_stego::server::server::DETAIL_CHARS;
use modular_stego::StegoService;

/// Command-line arguments for the stego binary
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Hide a message in a PNG image
    Encode {
        #[arg(short, long)]
        input: PathBuf,
        #[arg(short, long, default_value = "imatge_encriptada.png")]
        output: PathBuf,
        #[arg(short, long)]
        message: String,
        #[arg(short, allow_hyphen_values = true)]
        a: String,
        #[arg(short, allow_hyphen_values = true)]
        b: String,
    },
    /// Recover a message hidden in a PNG image
    Decode {
        #[arg(short, long)]
        input: PathBuf,
        #[arg(short, allow_hyphen_values = true)]
        a: String,
        #[arg(short, allow_hyphen_values = true)]
        b: String,
    },
    /// Validate a key and show how it transforms a sample text
    Check {
        #[arg(short, allow_hyphen_values = true)]
        a: String,
        #[arg(short, allow_hyphen_values = true)]
        b: String,
        #[arg(short, long, default_value = DEFAULT_TRIAL_TEXT)]
        text: String,
    },
    /// Print the top-left blue channel values and their LSBs
    Preview {
        #[arg(short, long)]
        input: PathBuf,
        #[arg(short, long, default_value_t = DEFAULT_PREVIEW_SIDE)]
        side: u32,
    },
    /// Letter affine cipher mod 26 (Caesar when a = 1)
    Letters {
        #[arg(short, long)]
        text: String,
        #[arg(short, allow_hyphen_values = true)]
        a: i64,
        #[arg(short, allow_hyphen_values = true)]
        k: i64,
        #[arg(short, long)]
        decrypt: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logger(&args.log_level);

    match args.command {
        Command::Encode {
            input,
            output,
            message,
            a,
            b,
        } => {
            let params = CipherParams::parse(&a, &b)?;
            let image_data =
                fs::read(&input).with_context(|| format!("Failed to read {}", input.display()))?;
            let stego = embed_message_png(&image_data, &message, &params)?;
            fs::write(&output, &stego)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            info!("Wrote {} ({} bytes)", output.display(), stego.len());

            println!("Message hidden with {} -> {}", params, output.display());
            for trace in affine::details(&message, &params, DETAIL_CHARS) {
                println!(
                    "  '{}'  code {:>3}  ({} x {} + {}) mod 256 = {:>3}  {}",
                    trace.character,
                    trace.code,
                    params.a(),
                    trace.code,
                    params.b(),
                    trace.encrypted,
                    trace.binary
                );
            }
        }
        Command::Decode { input, a, b } => {
            let params = CipherParams::parse(&a, &b)?;
            let image_data =
                fs::read(&input).with_context(|| format!("Failed to read {}", input.display()))?;
            let message = extract_message_png(&image_data, &params)?;
            println!("{}", message);
        }
        Command::Check { a, b, text } => {
            let check = StegoService::check_params(&a, &b, Some(&text))?;
            println!("Formula: {}", check.formula);
            println!("Inverse of a: {}", check.inverse);
            for trace in check.trial {
                println!(
                    "  '{}' -> {:>3} -> encrypted {:>3} -> decrypted {:>3} {}",
                    trace.character,
                    trace.code,
                    trace.encrypted,
                    trace.decrypted,
                    if trace.round_trip { "ok" } else { "MISMATCH" }
                );
            }
        }
        Command::Preview { input, side } => {
            let image_data =
                fs::read(&input).with_context(|| format!("Failed to read {}", input.display()))?;
            let img = load_png(&image_data)?;
            println!(
                "{}x{} image, room for {} characters",
                img.width(),
                img.height(),
                capacity(img.width(), img.height())
            );
            print!("{}", pixel_matrix(&img, side));
        }
        Command::Letters { text, a, k, decrypt } => {
            println!("{}", StegoService::letters(&text, a, k, decrypt)?);
        }
    }

    Ok(())
}
