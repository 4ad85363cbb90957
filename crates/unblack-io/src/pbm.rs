use std::{
    fs,
    io::{Read, Write},
    path::Path,
};

use log::debug;
use unblack_grid::{BitGrid, GridSize};

use crate::error::IoError;

/// The encoding of the raster of a PBM image.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PbmEncoding {
    /// ASCII raster of `0` and `1`, magic number `P1`.
    #[default]
    Plain,
    /// Packed binary raster with eight pixels per byte, magic number `P4`.
    Raw,
}

impl PbmEncoding {
    /// Get the magic number that identifies the encoding.
    pub fn magic(&self) -> &'static str {
        match self {
            PbmEncoding::Plain => "P1",
            PbmEncoding::Raw => "P4",
        }
    }
}

// magic number and dimensions, the raster follows
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct PbmHeader {
    encoding: PbmEncoding,
    size: GridSize,
}

/// Read a PBM image from the given file path.
///
/// # Arguments
///
/// * `file_path` - The path to the PBM file.
///
/// # Returns
///
/// A grid with black pixels set to `true`.
pub fn read_image_pbm(file_path: impl AsRef<Path>) -> Result<BitGrid, IoError> {
    // verify the file exists
    let file_path = file_path.as_ref();
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    // verify the file extension
    match file_path.extension() {
        Some(extension) if extension.eq_ignore_ascii_case("pbm") => {}
        _ => return Err(IoError::InvalidFileExtension(file_path.to_path_buf())),
    }

    let bytes = fs::read(file_path)?;
    decode_image_pbm(&bytes)
}

/// Read a PBM image from any reader, e.g. the standard input.
pub fn read_pbm<R: Read>(mut reader: R) -> Result<BitGrid, IoError> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    decode_image_pbm(&bytes)
}

/// Decodes a PBM image, plain (`P1`) or raw (`P4`), from raw bytes.
///
/// Comments (`#` up to the end of the line) are accepted between the header fields and, in
/// plain images, inside the raster.
///
/// # Arguments
///
/// * `bytes` - Raw bytes of the PBM file.
///
/// # Examples
///
/// ```
/// use unblack_io::pbm::decode_image_pbm;
///
/// let grid = decode_image_pbm(b"P1\n# sample\n3 2\n1 0 0\n0 1 1\n").unwrap();
///
/// assert_eq!(grid.width(), 3);
/// assert_eq!(grid.height(), 2);
/// assert_eq!(grid.to_bits(), vec![1, 0, 0, 0, 1, 1]);
/// ```
pub fn decode_image_pbm(bytes: &[u8]) -> Result<BitGrid, IoError> {
    let mut cursor = Cursor::new(bytes);
    let header = read_header(&mut cursor)?;

    let grid = match header.encoding {
        PbmEncoding::Plain => decode_plain(&mut cursor, header.size)?,
        PbmEncoding::Raw => decode_raw(&mut cursor, header.size)?,
    };

    debug!(
        "decoded {} bitmap of {}x{}",
        header.encoding.magic(),
        header.size.width,
        header.size.height
    );

    Ok(grid)
}

/// Encodes a grid as a PBM image.
///
/// Plain images are written one row per line with the pixels separated by a single space. No
/// comment line is emitted, the header is only the magic number and the dimensions.
///
/// # Arguments
///
/// * `grid` - The grid to encode, black pixels set to `true`.
/// * `encoding` - The encoding of the raster.
///
/// # Examples
///
/// ```
/// use unblack_grid::BitGrid;
/// use unblack_io::pbm::{encode_image_pbm, PbmEncoding};
///
/// let grid = BitGrid::from_bits([3, 2].into(), &[1, 0, 0, 0, 1, 1]).unwrap();
/// let bytes = encode_image_pbm(&grid, PbmEncoding::Plain);
///
/// assert_eq!(bytes, b"P1\n3 2\n1 0 0\n0 1 1\n");
/// ```
pub fn encode_image_pbm(grid: &BitGrid, encoding: PbmEncoding) -> Vec<u8> {
    let (width, height) = (grid.width(), grid.height());
    let mut buf = format!("{}\n{} {}\n", encoding.magic(), width, height).into_bytes();

    match encoding {
        PbmEncoding::Plain => {
            buf.reserve(2 * width * height);
            grid.for_each_row_major(|x, _, value| {
                buf.push(if value { b'1' } else { b'0' });
                buf.push(if x + 1 == width { b'\n' } else { b' ' });
            });
        }
        PbmEncoding::Raw => {
            let stride = width.div_ceil(8);
            let offset = buf.len();
            buf.resize(offset + stride * height, 0);
            grid.for_each_row_major(|x, y, value| {
                if value {
                    buf[offset + y * stride + x / 8] |= 0x80 >> (x % 8);
                }
            });
        }
    }

    buf
}

/// Writes a grid as a PBM image to any writer, e.g. the standard output.
pub fn write_pbm<W: Write>(
    mut writer: W,
    grid: &BitGrid,
    encoding: PbmEncoding,
) -> Result<(), IoError> {
    writer.write_all(&encode_image_pbm(grid, encoding))?;
    writer.flush()?;
    Ok(())
}

/// Writes a grid as a PBM image to the given file path.
///
/// # Arguments
///
/// * `file_path` - The path to the PBM file.
/// * `grid` - The grid to encode, black pixels set to `true`.
/// * `encoding` - The encoding of the raster.
pub fn write_image_pbm(
    file_path: impl AsRef<Path>,
    grid: &BitGrid,
    encoding: PbmEncoding,
) -> Result<(), IoError> {
    let file = fs::File::create(file_path)?;
    write_pbm(std::io::BufWriter::new(file), grid, encoding)
}

struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn remaining(&self) -> &'a [u8] {
        self.bytes.get(self.pos..).unwrap_or_default()
    }

    // skips whitespace and comments running to the end of the line
    fn skip_whitespace(&mut self) {
        while let Some(b) = self.peek() {
            if b == b'#' {
                while let Some(c) = self.peek() {
                    self.pos += 1;
                    if c == b'\n' || c == b'\r' {
                        break;
                    }
                }
            } else if b.is_ascii_whitespace() {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn read_magic(&mut self) -> Result<PbmEncoding, IoError> {
        let magic = self
            .bytes
            .get(self.pos..self.pos + 2)
            .ok_or(IoError::InvalidMagic)?;

        let encoding = match magic {
            b"P1" => PbmEncoding::Plain,
            b"P4" => PbmEncoding::Raw,
            [b'P', b'2'..=b'7'] => {
                return Err(IoError::UnsupportedFormat(
                    String::from_utf8_lossy(magic).into_owned(),
                ))
            }
            _ => return Err(IoError::InvalidMagic),
        };
        self.pos += 2;

        match self.peek() {
            Some(b) if b.is_ascii_whitespace() || b == b'#' => Ok(encoding),
            _ => Err(IoError::InvalidMagic),
        }
    }

    fn read_dimension(&mut self, name: &str) -> Result<usize, IoError> {
        self.skip_whitespace();

        let start = self.pos;
        while matches!(self.peek(), Some(b'0'..=b'9')) {
            self.pos += 1;
        }

        let digits = &self.bytes[start..self.pos];
        if digits.is_empty() {
            return Err(IoError::InvalidHeader(format!("missing {name}")));
        }

        std::str::from_utf8(digits)
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
            .ok_or_else(|| IoError::InvalidHeader(format!("{name} is too large")))
    }
}

fn read_header(cursor: &mut Cursor) -> Result<PbmHeader, IoError> {
    let encoding = cursor.read_magic()?;
    let width = cursor.read_dimension("width")?;
    let height = cursor.read_dimension("height")?;

    if width == 0 || height == 0 {
        return Err(IoError::EmptyImage(width, height));
    }

    if width.checked_mul(height).is_none() {
        return Err(IoError::InvalidHeader(format!(
            "image size {width}x{height} is too large"
        )));
    }

    Ok(PbmHeader {
        encoding,
        size: GridSize { width, height },
    })
}

fn decode_plain(cursor: &mut Cursor, size: GridSize) -> Result<BitGrid, IoError> {
    // every pixel takes at least one byte, reject short inputs before allocating
    let available = cursor.remaining().len();
    if available < size.area() {
        return Err(IoError::UnexpectedEof(available, size.area()));
    }

    let mut grid = BitGrid::new(size)?;

    for y in 0..size.height {
        for x in 0..size.width {
            cursor.skip_whitespace();
            let value = match cursor.peek() {
                Some(b'0') => false,
                Some(b'1') => true,
                Some(other) => return Err(IoError::InvalidPixelValue(other as char)),
                None => return Err(IoError::UnexpectedEof(y * size.width + x, size.area())),
            };
            cursor.pos += 1;

            if value {
                grid.set(x, y, true)?;
            }
        }
    }

    Ok(grid)
}

fn decode_raw(cursor: &mut Cursor, size: GridSize) -> Result<BitGrid, IoError> {
    // a single whitespace byte separates the header from the raster
    match cursor.peek() {
        Some(b) if b.is_ascii_whitespace() => cursor.pos += 1,
        _ => {
            return Err(IoError::InvalidHeader(
                "missing whitespace before the raster".to_string(),
            ))
        }
    }

    let stride = size.width.div_ceil(8);
    let raster = cursor.remaining();
    if raster.len() < stride * size.height {
        let rows_read = raster.len() / stride;
        return Err(IoError::UnexpectedEof(rows_read * size.width, size.area()));
    }

    let mut grid = BitGrid::new(size)?;

    for (y, row) in raster.chunks_exact(stride).take(size.height).enumerate() {
        for x in 0..size.width {
            if row[x / 8] & (0x80 >> (x % 8)) != 0 {
                grid.set(x, y, true)?;
            }
        }
    }

    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IoError;
    use std::fs::create_dir_all;

    fn sample_grid() -> Result<BitGrid, IoError> {
        let size = GridSize {
            width: 13,
            height: 5,
        };
        let data = (0..size.area())
            .map(|i| ((i * 7) % 3 == 0) as u8)
            .collect::<Vec<_>>();
        Ok(BitGrid::from_bits(size, &data)?)
    }

    #[test]
    fn decode_plain_with_comments() -> Result<(), IoError> {
        let bytes = b"P1\n# a comment\n4 # width\n3\n0 1 0 1\n1 1 1 1 # full row\n0 0 0 0\n";
        let grid = decode_image_pbm(bytes)?;

        assert_eq!(grid.size(), [4, 3].into());
        assert_eq!(grid.to_bits(), vec![0, 1, 0, 1, 1, 1, 1, 1, 0, 0, 0, 0]);
        Ok(())
    }

    #[test]
    fn decode_plain_without_separators() -> Result<(), IoError> {
        let grid = decode_image_pbm(b"P1 3 2 010\r\n101")?;
        assert_eq!(grid.to_bits(), vec![0, 1, 0, 1, 0, 1]);
        Ok(())
    }

    #[test]
    fn decode_raw_ignores_padding() -> Result<(), IoError> {
        let mut bytes = b"P4\n10 2\n".to_vec();
        bytes.extend_from_slice(&[0b1000_0000, 0b0100_0000, 0b0111_1111, 0b1011_1111]);

        let grid = decode_image_pbm(&bytes)?;

        assert_eq!(
            grid.to_bits(),
            vec![1, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 1, 1, 1, 1, 1, 1, 1, 1, 0]
        );
        Ok(())
    }

    #[test]
    fn decode_header() -> Result<(), IoError> {
        let header = read_header(&mut Cursor::new(b"P4 # raw\n640 480\n"))?;
        assert_eq!(header.encoding, PbmEncoding::Raw);
        assert_eq!(header.size, [640, 480].into());
        Ok(())
    }

    #[test]
    fn decode_errors() {
        assert!(matches!(
            decode_image_pbm(b"hello"),
            Err(IoError::InvalidMagic)
        ));
        assert!(matches!(decode_image_pbm(b"P"), Err(IoError::InvalidMagic)));
        assert!(matches!(
            decode_image_pbm(b"P12 2\n"),
            Err(IoError::InvalidMagic)
        ));
        assert!(matches!(
            decode_image_pbm(b"P2\n2 2\n255\n0 0 0 0\n"),
            Err(IoError::UnsupportedFormat(magic)) if magic == "P2"
        ));
        assert!(matches!(
            decode_image_pbm(b"P1\n3\n"),
            Err(IoError::InvalidHeader(_))
        ));
        assert!(matches!(
            decode_image_pbm(b"P1\n0 3\n"),
            Err(IoError::EmptyImage(0, 3))
        ));
        assert!(matches!(
            decode_image_pbm(b"P1\n2 1\n0 2\n"),
            Err(IoError::InvalidPixelValue('2'))
        ));
        assert!(matches!(
            decode_image_pbm(b"P1\n2 2\n0 1 1\n"),
            Err(IoError::UnexpectedEof(3, 4))
        ));
        assert!(matches!(
            decode_image_pbm(b"P4\n9 2\n\xff\x80\xff"),
            Err(IoError::UnexpectedEof(9, 18))
        ));
    }

    #[test]
    fn decode_plain_huge_header_short_raster() {
        assert!(matches!(
            decode_image_pbm(b"P1\n100000 40000\n1"),
            Err(IoError::UnexpectedEof(2, 4_000_000_000))
        ));
        assert!(matches!(
            decode_image_pbm(b"P1 1000000 100000 1 0"),
            Err(IoError::UnexpectedEof(4, 100_000_000_000))
        ));
    }

    #[test]
    fn encode_plain() -> Result<(), IoError> {
        let grid = BitGrid::from_bits([3, 2].into(), &[1, 0, 0, 0, 1, 1])?;
        let bytes = encode_image_pbm(&grid, PbmEncoding::Plain);
        assert_eq!(bytes, b"P1\n3 2\n1 0 0\n0 1 1\n");
        Ok(())
    }

    #[test]
    fn encode_raw() -> Result<(), IoError> {
        let grid = BitGrid::from_bits([3, 2].into(), &[1, 0, 0, 0, 1, 1])?;
        let bytes = encode_image_pbm(&grid, PbmEncoding::Raw);
        assert_eq!(bytes, b"P4\n3 2\n\x80\x60");
        Ok(())
    }

    #[test]
    fn read_write_pbm() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        create_dir_all(tmp_dir.path())?;

        let grid = sample_grid()?;

        for encoding in [PbmEncoding::Plain, PbmEncoding::Raw] {
            let file_path = tmp_dir.path().join(format!("sample-{}.pbm", encoding.magic()));
            write_image_pbm(&file_path, &grid, encoding)?;
            assert!(file_path.exists(), "File does not exist: {:?}", file_path);

            let grid_back = read_image_pbm(&file_path)?;
            assert_eq!(grid_back, grid);
        }

        Ok(())
    }

    #[test]
    fn read_pbm_from_reader() -> Result<(), IoError> {
        let grid = sample_grid()?;
        let bytes = encode_image_pbm(&grid, PbmEncoding::Plain);

        let grid_back = read_pbm(bytes.as_slice())?;
        assert_eq!(grid_back, grid);
        Ok(())
    }

    #[test]
    fn read_invalid_path() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;

        let missing = tmp_dir.path().join("missing.pbm");
        assert!(matches!(
            read_image_pbm(&missing),
            Err(IoError::FileDoesNotExist(_))
        ));

        let wrong_extension = tmp_dir.path().join("image.txt");
        fs::write(&wrong_extension, b"P1\n1 1\n1\n")?;
        assert!(matches!(
            read_image_pbm(&wrong_extension),
            Err(IoError::InvalidFileExtension(_))
        ));

        Ok(())
    }

    #[test]
    fn read_pbm_fixture() -> Result<(), IoError> {
        let grid = read_image_pbm("../../tests/data/frame.pbm")?;
        assert_eq!(grid.width(), 12);
        assert_eq!(grid.height(), 8);
        Ok(())
    }
}
