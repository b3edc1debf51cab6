use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use chanquant::{Image, Mode, Options};
use clap::{Parser, ValueEnum};

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    /// Levels solved from each channel's histogram
    Optimal,
    /// Evenly spaced levels
    Uniform,
    /// Exponentially spaced levels, see --bias
    Log,
}

#[derive(Parser)]
#[command(name = "chanquant_demo")]
#[command(version, about = "Quantize the channels of a PNG image", long_about = None)]
struct Cli {
    /// Source PNG
    #[arg(value_name = "SRC")]
    src: PathBuf,

    /// Destination PNG
    #[arg(value_name = "DST")]
    dst: PathBuf,

    /// Quality budget; every 3 units add one bit per channel, below 3 the image is kept as is
    #[arg(short, long, default_value_t = 12, allow_negative_numbers = true)]
    quality: i32,

    /// Level generation
    #[arg(short, long, value_enum, default_value = "uniform")]
    mode: ModeArg,

    /// Bias of the logarithmic curve
    #[arg(short, long, default_value_t = 64, allow_negative_numbers = true)]
    bias: i32,

    /// Resize factor applied before quantization
    #[arg(short, long, default_value_t = 1.0)]
    scale: f32,
}

fn load_image(path: &Path) -> anyhow::Result<Image> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;

    let mut decoder = png::Decoder::new(file);
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);

    let mut reader = decoder.read_info()?;
    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf)?;
    let bytes = &buf[..info.buffer_size()];

    let width = info.width as usize;
    let height = info.height as usize;

    let image = match info.color_type {
        png::ColorType::Rgb => Image::from_rgb(bytes, width, height)?,
        png::ColorType::Rgba => Image::from_rgba(bytes, width, height)?,
        png::ColorType::Grayscale => {
            let rgb: Vec<u8> = bytes.iter().flat_map(|&v| [v, v, v]).collect();
            Image::from_rgb(&rgb, width, height)?
        }
        png::ColorType::GrayscaleAlpha => {
            let rgb: Vec<u8> = bytes.chunks_exact(2).flat_map(|p| [p[0], p[0], p[0]]).collect();
            Image::from_rgb(&rgb, width, height)?
        }
        other => bail!("unsupported color type {:?}", other),
    };

    Ok(image)
}

fn save_image(path: &Path, image: &Image) -> anyhow::Result<()> {
    let file = File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let w = BufWriter::new(file);

    let mut encoder = png::Encoder::new(w, image.width() as u32, image.height() as u32);
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;

    writer.write_image_data(&image.to_rgb())?;

    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mode = match cli.mode {
        ModeArg::Optimal => Mode::Optimal,
        ModeArg::Uniform => Mode::Uniform,
        ModeArg::Log => Mode::Logarithmic(cli.bias),
    };
    let opts = Options::new(cli.quality, mode);

    let image = load_image(&cli.src)?;
    let scaled = chanquant::scale(&image, cli.scale)?;
    let out = chanquant::quantize_with(&scaled, &opts);

    match opts.level_count() {
        Some(count) => println!("{} levels per channel, {:?}", count, mode),
        None => println!("quality {} keeps the image as is", cli.quality),
    }

    save_image(&cli.dst, &out)
}
