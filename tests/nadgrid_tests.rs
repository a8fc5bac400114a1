//!
//! Grid shift tests over synthetic NTv2 data
//!
use approx::assert_abs_diff_eq;
use proj4crs::nadgrids::{self, NadGrids};
use proj4crs::proj::Proj;
use proj4crs::transform::{transform, Direction};

const SEC_TO_RAD: f64 = 4.848_136_811_095_36e-6;

/// Build a single subgrid NTv2 buffer covering the continental US
/// east coast with slowly varying shifts in the NAD27 -> NAD83 order
/// of magnitude (a fraction of an arc-second).
fn conus_like_ntv2() -> Vec<u8> {
    fn field(name: &[u8; 8], value: &[u8]) -> Vec<u8> {
        let mut rec = Vec::with_capacity(16);
        rec.extend_from_slice(name);
        rec.extend_from_slice(value);
        rec.resize(16, 0);
        rec
    }
    fn f64v(v: f64) -> [u8; 8] {
        v.to_ne_bytes()
    }
    fn i32v(v: i32) -> Vec<u8> {
        let mut buf = v.to_ne_bytes().to_vec();
        buf.resize(8, 0);
        buf
    }

    let sec = 3600.0;
    // 11 x 9 mesh of 0.5 degree cells over [80W..75W] x [37N..41N]
    let (ncols, nrows) = (11usize, 9usize);

    let mut buf = vec![];
    buf.extend(field(b"NUM_OREC", &i32v(11)));
    buf.extend(field(b"NUM_SREC", &i32v(11)));
    buf.extend(field(b"NUM_FILE", &i32v(1)));
    buf.extend(field(b"GS_TYPE ", b"SECONDS "));
    buf.extend(field(b"VERSION ", b"NTv2.0  "));
    buf.extend(field(b"SYSTEM_F", b"NAD27   "));
    buf.extend(field(b"SYSTEM_T", b"NAD83   "));
    buf.extend(field(b"MAJOR_F ", &f64v(6378206.4)));
    buf.extend(field(b"MINOR_F ", &f64v(6356583.8)));
    buf.extend(field(b"MAJOR_T ", &f64v(6378137.0)));
    buf.extend(field(b"MINOR_T ", &f64v(6356752.314)));

    buf.extend(field(b"SUB_NAME", b"EASTCOAS"));
    buf.extend(field(b"PARENT  ", b"NONE    "));
    buf.extend(field(b"CREATED ", b"        "));
    buf.extend(field(b"UPDATED ", b"        "));
    buf.extend(field(b"S_LAT   ", &f64v(37.0 * sec)));
    buf.extend(field(b"N_LAT   ", &f64v(41.0 * sec)));
    // positive west longitudes
    buf.extend(field(b"E_LONG  ", &f64v(75.0 * sec)));
    buf.extend(field(b"W_LONG  ", &f64v(80.0 * sec)));
    buf.extend(field(b"LAT_INC ", &f64v(0.5 * sec)));
    buf.extend(field(b"LONG_INC", &f64v(0.5 * sec)));
    buf.extend(field(b"GS_COUNT", &i32v((ncols * nrows) as i32)));

    // rows south to north, columns east to west on disk
    for row in 0..nrows {
        for col in 0..ncols {
            let lat_shift = 0.30 + 0.002 * row as f64 + 0.001 * col as f64;
            let lon_shift = 0.50 - 0.003 * row as f64 + 0.002 * col as f64;
            buf.extend_from_slice(&(lat_shift as f32).to_ne_bytes());
            buf.extend_from_slice(&(lon_shift as f32).to_ne_bytes());
            buf.extend_from_slice(&0.0f32.to_ne_bytes());
            buf.extend_from_slice(&0.0f32.to_ne_bytes());
        }
    }
    buf
}

#[test]
fn test_grid_forward_inverse_recovers_input() {
    nadgrids::read_ntv2_bytes("conus_roundtrip", &conus_like_ntv2()).unwrap();

    let grids = NadGrids::new_grid_transform("conus_roundtrip").unwrap();

    // Washington DC
    let (lam, phi) = ((-77.0369f64).to_radians(), 38.9072f64.to_radians());
    let (slam, sphi, _) = grids.apply_shift(Direction::Forward, lam, phi, 0.).unwrap();

    // shift is well below 0.01 degree on both axes
    assert!((slam - lam).to_degrees().abs() < 0.01);
    assert!((sphi - phi).to_degrees().abs() < 0.01);
    // and in the expected direction: on disk lon shifts are positive
    // west, so the longitude moves west
    assert!(slam < lam);
    assert!(sphi > phi);

    let (rlam, rphi, _) = grids
        .apply_shift(Direction::Inverse, slam, sphi, 0.)
        .unwrap();
    assert_abs_diff_eq!(rlam, lam, epsilon = 1e-12);
    assert_abs_diff_eq!(rphi, phi, epsilon = 1e-12);

    nadgrids::remove_grids("conus_roundtrip");
}

#[test]
fn test_nad27_to_nad83_pipeline() {
    nadgrids::read_ntv2_bytes("conus_pipeline", &conus_like_ntv2()).unwrap();

    let nad27 =
        Proj::from_user_string("+proj=longlat +ellps=clrk66 +nadgrids=conus_pipeline").unwrap();
    let nad83 = Proj::from_user_string("+proj=longlat +datum=NAD83").unwrap();

    let orig = ((-77.0369f64).to_radians(), 38.9072f64.to_radians(), 0.);
    let mut pt = orig;
    transform(&nad27, &nad83, &mut pt).unwrap();

    assert!((pt.0 - orig.0).to_degrees().abs() < 0.01);
    assert!((pt.1 - orig.1).to_degrees().abs() < 0.01);
    // interpolated magnitude sanity: about half an arc-second west
    assert_abs_diff_eq!(orig.0 - pt.0, 0.5 * SEC_TO_RAD, epsilon = 0.2 * SEC_TO_RAD);

    transform(&nad83, &nad27, &mut pt).unwrap();
    assert_abs_diff_eq!(pt.0, orig.0, epsilon = 1e-9);
    assert_abs_diff_eq!(pt.1, orig.1, epsilon = 1e-9);

    nadgrids::remove_grids("conus_pipeline");
}

#[test]
fn test_missing_mandatory_grid_fails_at_parse() {
    assert!(
        Proj::from_user_string("+proj=longlat +ellps=clrk66 +nadgrids=does_not_exist.gsb")
            .is_err()
    );
    // optional grids are skipped silently
    assert!(
        Proj::from_user_string("+proj=longlat +ellps=clrk66 +nadgrids=@does_not_exist.gsb")
            .is_ok()
    );
}

#[test]
fn test_projected_crs_with_grid_shift() {
    nadgrids::read_ntv2_bytes("conus_projected", &conus_like_ntv2()).unwrap();

    // A state plane like lcc on the clrk66 ellipsoid with grid shift
    let sp = Proj::from_user_string(concat!(
        "+proj=lcc +lat_1=38.3 +lat_2=39.45 +lat_0=37.666 +lon_0=-77 ",
        "+x_0=400000 +y_0=0 +ellps=clrk66 +nadgrids=conus_projected",
    ))
    .unwrap();
    let wgs84 = Proj::from_user_string("+proj=longlat +datum=WGS84").unwrap();

    let orig = ((-77.0369f64).to_radians(), 38.9072f64.to_radians(), 0.);
    let mut pt = orig;
    transform(&wgs84, &sp, &mut pt).unwrap();

    // plausible state plane coordinates
    assert!((300_000.0..500_000.0).contains(&pt.0));
    assert!(pt.1 > 0.);

    transform(&sp, &wgs84, &mut pt).unwrap();
    assert_abs_diff_eq!(pt.0, orig.0, epsilon = 1e-9);
    assert_abs_diff_eq!(pt.1, orig.1, epsilon = 1e-9);

    nadgrids::remove_grids("conus_projected");
}
