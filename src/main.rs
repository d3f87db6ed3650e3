//! # QrCard CLI
//!
//! Command-line interface for generating QR code cards.
//!
//! ## Usage
//!
//! ```bash
//! # Generate a card with captions and a centered logo
//! qrcard generate https://example.com \
//!     --caption-above "Scan Me" --caption-below "Example Inc" \
//!     --logo logo.png
//!
//! # Custom colors, font, and output resolution
//! qrcard generate https://example.com \
//!     --fill-color "#1a3a8f" --font Inter-Bold.ttf --output-size 2000x2000
//!
//! # Interactive mode: one card per URL entered
//! qrcard prompt --caption-below "Example Inc" --logo logo.png
//! ```

use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use qrcard::{
    ComposeConfig, ComposeRequest, Compositor, QrCardError,
    compose::{FontSource, LogoStatus},
    config,
    encode::{self, ErrorLevel, QrOptions},
};

/// QrCard - QR code card generator
#[derive(Parser, Debug)]
#[command(name = "qrcard")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate one card for a URL
    Generate {
        /// URL (or any text payload) to encode
        url: String,

        /// Caption rendered above the QR code
        #[arg(long)]
        caption_above: Option<String>,

        /// Output filename (defaults to QRCARD_<date>_<caption>.png)
        #[arg(long, value_name = "FILE")]
        out: Option<String>,

        #[command(flatten)]
        style: StyleArgs,
    },

    /// Read URLs and captions from stdin, one card per entry
    Prompt {
        #[command(flatten)]
        style: StyleArgs,
    },
}

/// Appearance options shared by both subcommands.
#[derive(Args, Debug)]
struct StyleArgs {
    /// Caption rendered below the QR code
    #[arg(long)]
    caption_below: Option<String>,

    /// Logo image to overlay at the center of the QR code
    #[arg(long, value_name = "FILE")]
    logo: Option<PathBuf>,

    /// TTF/OTF caption font (built-in bitmap font when omitted or unloadable)
    #[arg(long, value_name = "FILE")]
    font: Option<PathBuf>,

    /// Caption font size in pixels
    #[arg(long, default_value_t = 40.0)]
    font_size: f32,

    /// QR and caption foreground color (name or #RRGGBB)
    #[arg(long, default_value = "black")]
    fill_color: String,

    /// Background color (name or #RRGGBB)
    #[arg(long, default_value = "white")]
    back_color: String,

    /// Final output size
    #[arg(long, default_value = "1000x1000", value_name = "WxH")]
    output_size: String,

    /// Margin around the QR symbol
    #[arg(long, default_value_t = 30)]
    qr_margin: u32,

    /// Margin between the QR code and each caption
    #[arg(long, default_value_t = 10)]
    text_margin: u32,

    /// Margin between each caption and the outer border
    #[arg(long, default_value_t = 10)]
    border_margin: u32,

    /// QR version 1-40 (smallest that fits when omitted)
    #[arg(long, value_name = "N")]
    qr_version: Option<i16>,

    /// Error correction level: l, m, q, or h
    #[arg(long, default_value = "h")]
    error_correction: String,

    /// Rendered size of one QR module in pixels
    #[arg(long, default_value_t = 20)]
    module_size: u32,

    /// Quiet zone width in modules
    #[arg(long, default_value_t = 6)]
    quiet_zone: u32,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), QrCardError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            url,
            caption_above,
            out,
            style,
        } => {
            let compositor = Compositor::new(build_config(&style)?)?;
            let qr_opts = build_qr_options(&style)?;
            let request = ComposeRequest {
                caption_above,
                caption_below: style.caption_below.clone(),
                logo_path: style.logo.clone(),
                filename: out,
            };
            generate_card(&compositor, &qr_opts, &url, &request)
        }

        Commands::Prompt { style } => {
            let compositor = Compositor::new(build_config(&style)?)?;
            let qr_opts = build_qr_options(&style)?;
            run_prompt(&compositor, &qr_opts, &style)
        }
    }
}

/// Generate, report, and save one card.
fn generate_card(
    compositor: &Compositor,
    qr_opts: &QrOptions,
    url: &str,
    request: &ComposeRequest,
) -> Result<(), QrCardError> {
    let config = compositor.config();
    let qr = encode::render_qr(url, qr_opts, config.fill_color, config.back_color)?;
    println!("QR code generated ({}x{} px)", qr.width(), qr.height());

    let card = compositor.compose(qr, request)?;

    match &card.logo {
        LogoStatus::Applied => println!("Logo added"),
        LogoStatus::Missing(path) => eprintln!(
            "Warning: logo file {} could not be loaded, continuing without it",
            path.display()
        ),
        LogoStatus::NotRequested => {}
    }

    if let Some(FontSource::Fallback { requested }) = &card.font {
        eprintln!(
            "Warning: font {} could not be loaded, using the built-in font",
            requested.display()
        );
    }

    card.image.save(&card.filename)?;
    println!("Saved {}", card.filename);
    Ok(())
}

/// Interactive loop: one card per URL read from stdin, until "exit" or EOF.
fn run_prompt(
    compositor: &Compositor,
    qr_opts: &QrOptions,
    style: &StyleArgs,
) -> Result<(), QrCardError> {
    let stdin = io::stdin();

    loop {
        print!("URL (or 'exit' to quit): ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {
            break;
        }
        let url = line.trim().to_string();
        if url.is_empty() {
            continue;
        }
        if url.eq_ignore_ascii_case("exit") {
            break;
        }

        print!("Caption: ");
        io::stdout().flush()?;
        let mut caption = String::new();
        stdin.read_line(&mut caption)?;
        let caption = caption.trim();

        let request = ComposeRequest {
            caption_above: (!caption.is_empty()).then(|| caption.to_string()),
            caption_below: style.caption_below.clone(),
            logo_path: style.logo.clone(),
            filename: None,
        };
        generate_card(compositor, qr_opts, &url, &request)?;

        println!("Card generated. Enter another URL or 'exit' to quit.");
    }

    Ok(())
}

fn build_config(style: &StyleArgs) -> Result<ComposeConfig, QrCardError> {
    let fill_color = config::parse_color(&style.fill_color).ok_or_else(|| {
        QrCardError::InvalidArgument(format!("unrecognized color '{}'", style.fill_color))
    })?;
    let back_color = config::parse_color(&style.back_color).ok_or_else(|| {
        QrCardError::InvalidArgument(format!("unrecognized color '{}'", style.back_color))
    })?;

    Ok(ComposeConfig {
        qr_margin: style.qr_margin,
        text_margin: style.text_margin,
        border_margin: style.border_margin,
        font_path: style.font.clone(),
        font_size: style.font_size,
        fill_color,
        back_color,
        output_size: parse_output_size(&style.output_size)?,
    })
}

fn build_qr_options(style: &StyleArgs) -> Result<QrOptions, QrCardError> {
    Ok(QrOptions {
        version: style.qr_version,
        error_level: parse_error_level(&style.error_correction)?,
        module_size: style.module_size,
        quiet_zone: style.quiet_zone,
    })
}

fn parse_output_size(s: &str) -> Result<(u32, u32), QrCardError> {
    let invalid = || {
        QrCardError::InvalidArgument(format!(
            "output size '{}' is not of the form WIDTHxHEIGHT",
            s
        ))
    };

    let (w, h) = s.split_once(['x', 'X']).ok_or_else(invalid)?;
    let width = w.trim().parse::<u32>().map_err(|_| invalid())?;
    let height = h.trim().parse::<u32>().map_err(|_| invalid())?;
    Ok((width, height))
}

fn parse_error_level(s: &str) -> Result<ErrorLevel, QrCardError> {
    match s.to_ascii_lowercase().as_str() {
        "l" | "low" => Ok(ErrorLevel::Low),
        "m" | "medium" => Ok(ErrorLevel::Medium),
        "q" | "quartile" => Ok(ErrorLevel::Quartile),
        "h" | "high" => Ok(ErrorLevel::High),
        _ => Err(QrCardError::InvalidArgument(format!(
            "unknown error correction level '{}' (expected l, m, q, or h)",
            s
        ))),
    }
}
