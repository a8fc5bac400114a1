//!
//! NTv2 (.gsb) decoding
//!
//! Layout is a 176 byte overview header followed by subgrid records,
//! each with its own 176 byte header and N_LAT x N_LON rows of
//! (lat shift, lon shift, lat accuracy, lon accuracy) f32 values in
//! arc-seconds. Both byte orders are accepted, detected from the
//! NUM_OREC field.
//!
//! On load shifts are converted to radians, the longitude shift is
//! negated into the positive east frame and row values are mirrored
//! since NTv2 stores longitudes positive west.
//!
use crate::errors::{Error, Result};
use crate::math::consts::SEC_TO_RAD;
use crate::nadgrids::grid::{Grid, GridId, Lp};
use crate::nadgrids::header::{Endianness, Header};
use std::io::Read;

const NTV2_HEADER_SIZE: usize = 11 * 16;

const ERR_INVALID_HEADER: &str = "Invalid header";
const ERR_GSCOUNT_NOT_MATCHING: &str = "GS COUNT not matching";

/// Decode a NTv2 byte stream into its subgrids
///
/// Subgrids are returned in file order with their lineage
/// relationships preserved through the PARENT field.
pub(super) fn read_ntv2<R: Read>(read: &mut R) -> Result<Vec<Grid>> {
    let mut head = Header::<NTV2_HEADER_SIZE>::new();

    // Read overview header
    head.read(read)?;

    match head.get_str(0, 8) {
        Ok("NUM_OREC") => (),
        _ => return Err(Error::InvalidNtv2GridFormat(ERR_INVALID_HEADER)),
    }

    // Check endianness
    head.endian = if head.get_u8(8) == 11 {
        Endianness::native()
    } else {
        Endianness::other()
    };

    let nsubgrids = head.get_u32(40) as usize;

    (0..nsubgrids)
        .map(|_| read_ntv2_grid(head.read(read)?, read))
        .collect()
}

/// Read one ntv2 subgrid
fn read_ntv2_grid<R: Read>(head: &Header<NTV2_HEADER_SIZE>, read: &mut R) -> Result<Grid> {
    match head.get_str(0, 8) {
        Ok("SUB_NAME") => (),
        _ => return Err(Error::InvalidNtv2GridFormat(ERR_INVALID_HEADER)),
    }

    let id = head.get_id(8);
    let mut lineage = head.get_id(24);
    if lineage.as_str().trim() == "NONE" {
        lineage = GridId::root();
    }

    // Longitudes are positive west on disk
    let mut ll = Lp {
        lam: -head.get_f64(120), // W_LONG
        phi: head.get_f64(72),   // S_LAT
    };

    let mut ur = Lp {
        lam: -head.get_f64(104), // E_LONG
        phi: head.get_f64(88),   // N_LAT
    };

    let mut del = Lp {
        lam: head.get_f64(152), // longitude interval
        phi: head.get_f64(136), // latitude interval
    };

    let lim = Lp {
        lam: (((ur.lam - ll.lam).abs() / del.lam + 0.5) + 1.).floor(),
        phi: (((ur.phi - ll.phi).abs() / del.phi + 0.5) + 1.).floor(),
    };

    // units are in seconds of degree
    ll.lam *= SEC_TO_RAD;
    ll.phi *= SEC_TO_RAD;
    ur.lam *= SEC_TO_RAD;
    ur.phi *= SEC_TO_RAD;
    del.lam *= SEC_TO_RAD;
    del.phi *= SEC_TO_RAD;

    let nrows = lim.phi as usize;
    let rowsize = lim.lam as usize;

    let gs_count = head.get_u32(168) as usize;
    if gs_count != nrows * rowsize {
        return Err(Error::InvalidNtv2GridFormat(ERR_GSCOUNT_NOT_MATCHING));
    }

    // Each record is (lat shift, lon shift, lat acc, lon acc)
    let mut buf = head.rebind::<16>();
    let mut cvs: Vec<Lp> = (0..gs_count)
        .map(|_| {
            buf.read(read)?;
            Ok(Lp {
                lam: -SEC_TO_RAD * (buf.get_f32(4) as f64),
                phi: SEC_TO_RAD * (buf.get_f32(0) as f64),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    // Values run east to west within a row, mirror them into the
    // positive east frame
    for i in 0..nrows {
        let offs = i * rowsize;
        cvs[offs..(offs + rowsize)].reverse();
    }

    let epsilon = (del.lam.abs() + del.phi.abs()) / 10_000.;

    Ok(Grid {
        id,
        lineage,
        ll,
        ur,
        del,
        lim,
        epsilon,
        cvs: cvs.into_boxed_slice(),
    })
}
