use argh::FromArgs;
use std::{
    fs::File,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use unblack::{
    imgproc::edges::unblack_edges,
    io::{
        pbm::{self, PbmEncoding},
        IoError,
    },
};

#[derive(FromArgs)]
/// Remove the black pixels connected to the border of a PBM image
struct Args {
    /// path to an input PBM image, read from stdin if omitted
    #[argh(positional)]
    input: Option<PathBuf>,

    /// path to the output image, written to stdout if omitted
    #[argh(option, short = 'o')]
    output: Option<PathBuf>,

    /// write a raw (P4) bitmap instead of a plain (P1) one
    #[argh(switch)]
    raw: bool,
}

// a missing input is reported by its path rather than as a bare io error
fn open_input(path: &Path) -> Result<File, IoError> {
    File::open(path).map_err(|err| match err.kind() {
        ErrorKind::NotFound => IoError::FileDoesNotExist(path.to_path_buf()),
        _ => IoError::FileError(err),
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Args = argh::from_env();

    // read the image
    let mut grid = match &args.input {
        Some(path) => pbm::read_pbm(open_input(path)?)?,
        None => pbm::read_pbm(std::io::stdin().lock())?,
    };

    log::info!(
        "read {}x{} image with {} black pixels",
        grid.width(),
        grid.height(),
        grid.count_ones()
    );

    // erase the regions connected to the border
    let stats = unblack_edges(&mut grid)?;

    log::info!(
        "erased {} pixels from {} border seeds",
        stats.erased,
        stats.seeds
    );

    let encoding = if args.raw {
        PbmEncoding::Raw
    } else {
        PbmEncoding::Plain
    };

    match &args.output {
        Some(path) => pbm::write_image_pbm(path, &grid, encoding)?,
        None => pbm::write_pbm(std::io::stdout().lock(), &grid, encoding)?,
    }

    Ok(())
}
