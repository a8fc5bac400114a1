//!
//! GeoTIFF shift grid decoding
//!
//! Minimal TIFF reader for horizontal shift grids: classic TIFF, both
//! byte orders, strip organised, chunky planar layout, float32 or
//! float64 samples. Band 0 carries the latitude shift and band 1 the
//! longitude shift, both in arc-seconds.
//!
//! Georeferencing comes from ModelTiepointTag + ModelPixelScaleTag,
//! or from an axis aligned ModelTransformationTag. Each IFD of a
//! multi image file becomes one subgrid; files store the lowest
//! resolution first, so images are registered in reverse order.
//!
use crate::errors::{Error, Result};
use crate::log::trace;
use crate::math::consts::SEC_TO_RAD;
use crate::nadgrids::grid::{Grid, GridId, Lp};

const ERR_MAGIC: &str = "Not a TIFF file";
const ERR_TRUNCATED: &str = "Unexpected end of data";
const ERR_LAYOUT: &str = "Unsupported image layout";
const ERR_GEOREF: &str = "Missing georeferencing tags";
const ERR_SAMPLES: &str = "Shift grids need at least 2 bands";

// Tags of interest
const TAG_IMAGE_WIDTH: u16 = 256;
const TAG_IMAGE_LENGTH: u16 = 257;
const TAG_BITS_PER_SAMPLE: u16 = 258;
const TAG_STRIP_OFFSETS: u16 = 273;
const TAG_SAMPLES_PER_PIXEL: u16 = 277;
const TAG_ROWS_PER_STRIP: u16 = 278;
const TAG_STRIP_BYTE_COUNTS: u16 = 279;
const TAG_PLANAR_CONFIG: u16 = 284;
const TAG_SAMPLE_FORMAT: u16 = 339;
const TAG_MODEL_PIXEL_SCALE: u16 = 0x830E;
const TAG_MODEL_TIEPOINT: u16 = 0x8482;
const TAG_MODEL_TRANSFORMATION: u16 = 0x85D8;

struct Reader<'a> {
    buf: &'a [u8],
    le: bool,
}

impl<'a> Reader<'a> {
    fn slice(&self, offset: usize, len: usize) -> Result<&'a [u8]> {
        self.buf
            .get(offset..offset + len)
            .ok_or(Error::InvalidGeoTiffFormat(ERR_TRUNCATED))
    }

    fn u16(&self, offset: usize) -> Result<u16> {
        let b: [u8; 2] = self.slice(offset, 2)?.try_into().unwrap();
        Ok(if self.le {
            u16::from_le_bytes(b)
        } else {
            u16::from_be_bytes(b)
        })
    }

    fn u32(&self, offset: usize) -> Result<u32> {
        let b: [u8; 4] = self.slice(offset, 4)?.try_into().unwrap();
        Ok(if self.le {
            u32::from_le_bytes(b)
        } else {
            u32::from_be_bytes(b)
        })
    }

    fn f32(&self, offset: usize) -> Result<f32> {
        let b: [u8; 4] = self.slice(offset, 4)?.try_into().unwrap();
        Ok(if self.le {
            f32::from_le_bytes(b)
        } else {
            f32::from_be_bytes(b)
        })
    }

    fn f64(&self, offset: usize) -> Result<f64> {
        let b: [u8; 8] = self.slice(offset, 8)?.try_into().unwrap();
        Ok(if self.le {
            f64::from_le_bytes(b)
        } else {
            f64::from_be_bytes(b)
        })
    }
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    typ: u16,
    count: u32,
    // raw value/offset field location
    value_offset: usize,
}

impl Entry {
    fn type_size(&self) -> usize {
        match self.typ {
            1 | 2 | 6 | 7 => 1, // BYTE, ASCII, SBYTE, UNDEFINED
            3 | 8 => 2,         // SHORT, SSHORT
            4 | 9 | 11 => 4,    // LONG, SLONG, FLOAT
            5 | 10 | 12 => 8,   // RATIONAL, SRATIONAL, DOUBLE
            _ => 0,
        }
    }

    // Location of the value data, inline or offsetted
    fn data_offset(&self, r: &Reader) -> Result<usize> {
        let total = self.type_size() * self.count as usize;
        if total <= 4 {
            Ok(self.value_offset)
        } else {
            Ok(r.u32(self.value_offset)? as usize)
        }
    }

    fn uint_at(&self, r: &Reader, index: usize) -> Result<u32> {
        let data = self.data_offset(r)?;
        match self.typ {
            3 => r.u16(data + 2 * index).map(u32::from),
            4 => r.u32(data + 4 * index),
            _ => Err(Error::InvalidGeoTiffFormat(ERR_LAYOUT)),
        }
    }

    fn uint(&self, r: &Reader) -> Result<u32> {
        self.uint_at(r, 0)
    }

    fn f64_at(&self, r: &Reader, index: usize) -> Result<f64> {
        let data = self.data_offset(r)?;
        match self.typ {
            12 => r.f64(data + 8 * index),
            11 => r.f32(data + 4 * index).map(f64::from),
            _ => Err(Error::InvalidGeoTiffFormat(ERR_LAYOUT)),
        }
    }
}

struct Ifd {
    entries: Vec<(u16, Entry)>,
    next: usize,
}

impl Ifd {
    fn parse(r: &Reader, offset: usize) -> Result<Self> {
        let count = r.u16(offset)? as usize;
        let mut entries = Vec::with_capacity(count);
        let mut pos = offset + 2;
        for _ in 0..count {
            let tag = r.u16(pos)?;
            entries.push((
                tag,
                Entry {
                    typ: r.u16(pos + 2)?,
                    count: r.u32(pos + 4)?,
                    value_offset: pos + 8,
                },
            ));
            pos += 12;
        }
        Ok(Self {
            entries,
            next: r.u32(pos)? as usize,
        })
    }

    fn get(&self, tag: u16) -> Option<&Entry> {
        self.entries
            .iter()
            .find(|(t, _)| *t == tag)
            .map(|(_, e)| e)
    }

    fn require(&self, tag: u16) -> Result<&Entry> {
        self.get(tag)
            .ok_or(Error::InvalidGeoTiffFormat(ERR_LAYOUT))
    }
}

/// Decode a GeoTIFF shift grid into its subgrids
pub(super) fn read_geotiff(key: &str, buf: &[u8]) -> Result<Vec<Grid>> {
    let le = match buf.get(0..2) {
        Some([b'I', b'I']) => true,
        Some([b'M', b'M']) => false,
        _ => return Err(Error::InvalidGeoTiffFormat(ERR_MAGIC)),
    };
    let r = Reader { buf, le };
    if r.u16(2)? != 42 {
        return Err(Error::InvalidGeoTiffFormat(ERR_MAGIC));
    }

    let mut grids = vec![];
    let mut offset = r.u32(4)? as usize;
    let mut index = 0u32;
    while offset != 0 {
        let ifd = Ifd::parse(&r, offset)?;
        grids.push(read_subgrid(key, &r, &ifd, index)?);
        offset = ifd.next;
        index += 1;
    }

    trace!("Read geotiff {}: {} subgrids", key, grids.len());

    // Files store the lowest resolution first
    grids.reverse();
    Ok(grids)
}

fn read_subgrid(key: &str, r: &Reader, ifd: &Ifd, index: u32) -> Result<Grid> {
    let width = ifd.require(TAG_IMAGE_WIDTH)?.uint(r)? as usize;
    let height = ifd.require(TAG_IMAGE_LENGTH)?.uint(r)? as usize;
    if width < 2 || height < 2 {
        return Err(Error::InvalidGeoTiffFormat(ERR_LAYOUT));
    }

    let samples = match ifd.get(TAG_SAMPLES_PER_PIXEL) {
        Some(e) => e.uint(r)? as usize,
        None => 1,
    };
    if samples < 2 {
        return Err(Error::InvalidGeoTiffFormat(ERR_SAMPLES));
    }

    if let Some(e) = ifd.get(TAG_PLANAR_CONFIG) {
        if e.uint(r)? != 1 {
            return Err(Error::InvalidGeoTiffFormat(ERR_LAYOUT));
        }
    }

    let bits = ifd.require(TAG_BITS_PER_SAMPLE)?.uint(r)? as usize;
    if bits != 32 && bits != 64 {
        return Err(Error::InvalidGeoTiffFormat(ERR_LAYOUT));
    }
    if let Some(e) = ifd.get(TAG_SAMPLE_FORMAT) {
        // IEEE float expected
        if e.uint(r)? != 3 {
            return Err(Error::InvalidGeoTiffFormat(ERR_LAYOUT));
        }
    }

    // Georeferencing: upper left corner and pixel size in degrees
    let (ul_lon, ul_lat, sx, sy) = if let Some(tie) = ifd.get(TAG_MODEL_TIEPOINT) {
        let scale = ifd
            .get(TAG_MODEL_PIXEL_SCALE)
            .ok_or(Error::InvalidGeoTiffFormat(ERR_GEOREF))?;
        let (i, j) = (tie.f64_at(r, 0)?, tie.f64_at(r, 1)?);
        let (x, y) = (tie.f64_at(r, 3)?, tie.f64_at(r, 4)?);
        let (sx, sy) = (scale.f64_at(r, 0)?, scale.f64_at(r, 1)?);
        (x - i * sx, y + j * sy, sx, sy)
    } else if let Some(m) = ifd.get(TAG_MODEL_TRANSFORMATION) {
        // Axis aligned transformation only
        if m.f64_at(r, 1)? != 0. || m.f64_at(r, 4)? != 0. {
            return Err(Error::InvalidGeoTiffFormat(ERR_GEOREF));
        }
        (
            m.f64_at(r, 3)?,
            m.f64_at(r, 7)?,
            m.f64_at(r, 0)?,
            -m.f64_at(r, 5)?,
        )
    } else {
        return Err(Error::InvalidGeoTiffFormat(ERR_GEOREF));
    };

    if sx <= 0. || sy <= 0. {
        return Err(Error::InvalidGeoTiffFormat(ERR_GEOREF));
    }

    // Collect samples; row 0 is the northernmost
    let offsets = ifd.require(TAG_STRIP_OFFSETS)?;
    let counts = ifd.require(TAG_STRIP_BYTE_COUNTS)?;
    let rows_per_strip = match ifd.get(TAG_ROWS_PER_STRIP) {
        Some(e) => e.uint(r)? as usize,
        None => height,
    };

    let sample_size = bits / 8;
    let row_bytes = width * samples * sample_size;

    let mut samples_raw: Vec<f64> = Vec::with_capacity(width * height * samples);
    let nstrips = offsets.count as usize;
    for s in 0..nstrips {
        let strip_offset = offsets.uint_at(r, s)? as usize;
        let strip_len = counts.uint_at(r, s)? as usize;
        let rows = (strip_len / row_bytes).min(rows_per_strip);
        for row in 0..rows {
            for col in 0..width {
                for band in 0..samples {
                    let at = strip_offset
                        + row * row_bytes
                        + (col * samples + band) * sample_size;
                    samples_raw.push(if bits == 32 {
                        r.f32(at)? as f64
                    } else {
                        r.f64(at)?
                    });
                }
            }
        }
    }

    if samples_raw.len() != width * height * samples {
        return Err(Error::InvalidGeoTiffFormat(ERR_TRUNCATED));
    }

    // Build the grid in the lower left origin frame: mirror rows,
    // convert arc-seconds to radians, negate longitude
    let mut cvs: Vec<Lp> = Vec::with_capacity(width * height);
    for row in (0..height).rev() {
        for col in 0..width {
            let at = (row * width + col) * samples;
            cvs.push(Lp {
                lam: -samples_raw[at + 1] * SEC_TO_RAD,
                phi: samples_raw[at] * SEC_TO_RAD,
            });
        }
    }

    let ll = Lp {
        lam: ul_lon.to_radians(),
        phi: (ul_lat - sy * (height - 1) as f64).to_radians(),
    };
    let del = Lp {
        lam: sx.to_radians(),
        phi: sy.to_radians(),
    };
    let ur = Lp {
        lam: ll.lam + del.lam * (width - 1) as f64,
        phi: ul_lat.to_radians(),
    };

    // Synthesize an id, TIFF subgrids have no names
    let mut id = [b' '; 8];
    for (i, b) in format!("{index:04}").bytes().take(4).enumerate() {
        id[i] = b;
    }
    for (i, b) in key.bytes().take(4).enumerate() {
        id[4 + i] = b;
    }

    Ok(Grid {
        id: GridId::from(id),
        lineage: GridId::root(),
        ll,
        ur,
        del,
        lim: Lp {
            lam: width as f64,
            phi: height as f64,
        },
        epsilon: (del.lam.abs() + del.phi.abs()) / 10_000.,
        cvs: cvs.into_boxed_slice(),
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Build a tiny single IFD little-endian GeoTIFF: 4 x 3 pixels,
    /// 2 f32 bands (lat shift 1", lon shift 2"), pixel scale 1 degree,
    /// tiepoint mapping pixel (0,0) to (10E, 52N).
    pub(crate) fn sample_geotiff() -> Vec<u8> {
        let width = 4u32;
        let height = 3u32;

        let mut buf = vec![];
        buf.extend_from_slice(b"II");
        buf.extend_from_slice(&42u16.to_le_bytes());
        buf.extend_from_slice(&8u32.to_le_bytes()); // first IFD offset

        // IFD at offset 8 with 10 entries
        let nentries = 10u16;
        let ifd_size = 2 + 12 * nentries as usize + 4;
        let after_ifd = 8 + ifd_size;

        // External data: pixel scale (3 f64), tiepoint (6 f64), strip data
        let scale_offset = after_ifd;
        let tie_offset = scale_offset + 3 * 8;
        let data_offset = tie_offset + 6 * 8;

        buf.extend_from_slice(&nentries.to_le_bytes());
        let mut entry = |tag: u16, typ: u16, count: u32, value: u32| {
            buf.extend_from_slice(&tag.to_le_bytes());
            buf.extend_from_slice(&typ.to_le_bytes());
            buf.extend_from_slice(&count.to_le_bytes());
            buf.extend_from_slice(&value.to_le_bytes());
        };
        entry(TAG_IMAGE_WIDTH, 4, 1, width);
        entry(TAG_IMAGE_LENGTH, 4, 1, height);
        entry(TAG_BITS_PER_SAMPLE, 3, 1, 32);
        entry(TAG_STRIP_OFFSETS, 4, 1, data_offset as u32);
        entry(TAG_SAMPLES_PER_PIXEL, 3, 1, 2);
        entry(TAG_ROWS_PER_STRIP, 4, 1, height);
        entry(TAG_STRIP_BYTE_COUNTS, 4, 1, width * height * 2 * 4);
        entry(TAG_SAMPLE_FORMAT, 3, 1, 3);
        entry(TAG_MODEL_PIXEL_SCALE, 12, 3, scale_offset as u32);
        entry(TAG_MODEL_TIEPOINT, 12, 6, tie_offset as u32);
        buf.extend_from_slice(&0u32.to_le_bytes()); // no next IFD

        // pixel scale
        for v in [1.0f64, 1.0, 0.0] {
            buf.extend_from_slice(&v.to_le_bytes());
        }
        // tiepoint (i, j, k, x, y, z)
        for v in [0.0f64, 0.0, 0.0, 10.0, 52.0, 0.0] {
            buf.extend_from_slice(&v.to_le_bytes());
        }
        // strip data: band 0 = 1" lat shift, band 1 = 2" lon shift
        for _ in 0..(width * height) {
            buf.extend_from_slice(&1.0f32.to_le_bytes());
            buf.extend_from_slice(&2.0f32.to_le_bytes());
        }
        buf
    }

    #[test]
    fn geotiff_parse_sample() {
        let buf = sample_geotiff();
        let grids = read_geotiff("sample.tif", &buf).unwrap();
        assert_eq!(grids.len(), 1);

        let grid = &grids[0];
        assert_eq!(grid.row_len(), 4);
        assert_eq!(grid.num_rows(), 3);

        approx::assert_abs_diff_eq!(grid.ll.lam, 10f64.to_radians(), epsilon = 1e-12);
        approx::assert_abs_diff_eq!(grid.ll.phi, 50f64.to_radians(), epsilon = 1e-12);
        approx::assert_abs_diff_eq!(grid.ur.phi, 52f64.to_radians(), epsilon = 1e-12);

        approx::assert_abs_diff_eq!(grid.cvs[0].phi, SEC_TO_RAD, epsilon = 1e-18);
        approx::assert_abs_diff_eq!(grid.cvs[0].lam, -2.0 * SEC_TO_RAD, epsilon = 1e-18);
    }

    #[test]
    fn geotiff_rejects_garbage() {
        assert!(read_geotiff("bad", b"not a tiff").is_err());
        assert!(read_geotiff("bad", b"II\x2b\x00").is_err());
    }
}
