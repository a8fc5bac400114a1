//!
//! End to end transformation tests
//!
use approx::assert_abs_diff_eq;
use proj4crs::adaptors::{transform_xy, transform_xyz};
use proj4crs::proj::Proj;
use proj4crs::transform::transform;
use proj4crs::{registry, serializers, Point, Transformer};

#[test]
fn test_transform_with_datum() {
    // EPSG:3006 - Sweden coordinate reference system
    let sweref99tm = concat!(
        "+proj=utm +zone=33 +ellps=GRS80 ",
        "+towgs84=0,0,0,0,0,0,0 +units=m +no_defs"
    );
    // EPSG:3021 - Sweden coordinate reference system
    let rt90 = concat!(
        "+proj=tmerc +lon_0=15.808277777799999 +lat_0=0.0 +k=1.0 ",
        "+x_0=1500000.0 +y_0=0.0 +ellps=bessel ",
        "+units=m +towgs84=414.1,41.3,603.1,-0.855,2.141,-7.023,0 ",
        "+no_defs"
    );

    let from = Proj::from_user_string(sweref99tm).unwrap();
    let to = Proj::from_user_string(rt90).unwrap();

    let mut inp = (319180., 6399862., 0.);

    transform(&from, &to, &mut inp).unwrap();
    assert_abs_diff_eq!(inp.0, 1271137.92755580, epsilon = 1.0e-5);
    assert_abs_diff_eq!(inp.1, 6404230.29136189, epsilon = 1.0e-5);
}

#[test]
fn test_transform_null_datum() {
    // EPSG:2154
    let epsg2154 = concat!(
        "+proj=lcc +lat_0=46.5 +lon_0=3 +lat_1=49 +lat_2=44 ",
        "+x_0=700000 +y_0=6600000 +ellps=GRS80 +towgs84=0,0,0,0,0,0,0 ",
        "+units=m +no_defs +type=crs"
    );
    // EPSG:3857
    let epsg3857 = concat!(
        "+proj=merc +a=6378137 +b=6378137 +lat_ts=0 +lon_0=0 +x_0=0 +y_0=0 +k=1 ",
        "+units=m +nadgrids=@null +wktext +no_defs +type=crs",
    );

    let from = Proj::from_user_string(epsg2154).unwrap();
    let to = Proj::from_user_string(epsg3857).unwrap();

    let mut inp = (489353.59, 6587552.2, 0.);
    transform(&from, &to, &mut inp).unwrap();
    assert_abs_diff_eq!(inp.0, 28943.07106250, epsilon = 1.0e-5);
    assert_abs_diff_eq!(inp.1, 5837421.86618963, epsilon = 1.0e-5);
}

#[test]
fn test_longlat_alias() {
    let wgs84 = concat!(
        "+title=WGS 84 (long/lat) +proj=longlat +ellps=WGS84 ",
        "+datum=WGS84 +units=degrees",
    );

    let projection = Proj::from_user_string(wgs84);
    assert!(projection.is_ok());
}

// ---------------------------------------------------------------
// Registry backed scenarios
// ---------------------------------------------------------------

#[test]
fn test_wgs84_to_webmercator_origin() {
    let t = Transformer::new("EPSG:4326", "EPSG:3857").unwrap();

    let mut pt = (0.0f64, 0.0f64, 0.);
    t.forward(&mut pt).unwrap();
    assert_abs_diff_eq!(pt.0, 0., epsilon = 1e-2);
    assert_abs_diff_eq!(pt.1, 0., epsilon = 1e-2);
}

#[test]
fn test_wgs84_to_webmercator_san_francisco() {
    let from = registry::get("EPSG:4326").unwrap();
    let to = registry::get("EPSG:3857").unwrap();

    let (x, y) = transform_xy(
        &from,
        &to,
        (-122.4194f64).to_radians(),
        37.7749f64.to_radians(),
    )
    .unwrap();

    assert_abs_diff_eq!(x, -13627665.27, epsilon = 10.0);
    assert_abs_diff_eq!(y, 4547675.35, epsilon = 10.0);
}

#[test]
fn test_utm32n_munich() {
    let t = Transformer::new("EPSG:4326", "EPSG:32632").unwrap();

    let orig = (11.5820f64.to_radians(), 48.1351f64.to_radians(), 0.);
    let mut pt = orig;
    t.forward(&mut pt).unwrap();

    assert!((500_000.0..700_000.0).contains(&pt.0), "easting {}", pt.0);
    assert!(
        (5_300_000.0..5_400_000.0).contains(&pt.1),
        "northing {}",
        pt.1
    );

    t.inverse(&mut pt).unwrap();
    assert_abs_diff_eq!(pt.0, orig.0, epsilon = 1e-6f64.to_radians());
    assert_abs_diff_eq!(pt.1, orig.1, epsilon = 1e-6f64.to_radians());
}

#[test]
fn test_utm_south_hemisphere() {
    let t = Transformer::new("EPSG:4326", "EPSG:32733").unwrap();

    let orig = (20f64.to_radians(), -25f64.to_radians(), 0.);
    let mut pt = orig;
    t.forward(&mut pt).unwrap();

    // south of the equator, the false northing keeps values positive
    assert!(
        (7_200_000.0..7_400_000.0).contains(&pt.1),
        "northing {}",
        pt.1
    );
    // 20E is well east of the zone 33 central meridian
    assert!(pt.0 > 500_000., "easting {}", pt.0);

    t.inverse(&mut pt).unwrap();
    assert_abs_diff_eq!(pt.0, orig.0, epsilon = 1e-6f64.to_radians());
    assert_abs_diff_eq!(pt.1, orig.1, epsilon = 1e-6f64.to_radians());
}

#[test]
fn test_ed50_to_wgs84_helmert() {
    let ed50 = Proj::from_user_string("+proj=longlat +ellps=intl +towgs84=-87,-98,-121").unwrap();
    let wgs84 = registry::get("EPSG:4326").unwrap();

    let (lon, lat) = (2.3522f64.to_radians(), 48.8566f64.to_radians());
    let (olon, olat, _) = transform_xyz(&ed50, &wgs84, lon, lat, 0.).unwrap();

    // small shift, longitude moves west with these translations
    assert!((olon - lon).to_degrees().abs() < 0.01);
    assert!((olat - lat).to_degrees().abs() < 0.01);
    assert!(olon < lon);

    // roundtrip
    let (rlon, rlat, _) = transform_xyz(&wgs84, &ed50, olon, olat, 0.).unwrap();
    assert_abs_diff_eq!(rlon, lon, epsilon = 1e-9);
    assert_abs_diff_eq!(rlat, lat, epsilon = 1e-9);
}

#[test]
fn test_robinson_world_roundtrip() {
    let geo = Proj::from_user_string("+proj=longlat +a=6378137 +b=6378137").unwrap();
    let robin = Proj::from_user_string("+proj=robin +a=6378137 +b=6378137").unwrap();

    // a graticule staying 5 degrees inside the bounds
    let mut lat = -85.0f64;
    while lat <= 85. {
        let mut lon = -175.0f64;
        while lon <= 175. {
            let orig = (lon.to_radians(), lat.to_radians(), 0.);
            let mut pt = orig;
            transform(&geo, &robin, &mut pt).unwrap();
            transform(&robin, &geo, &mut pt).unwrap();
            assert_abs_diff_eq!(pt.0, orig.0, epsilon = 1e-6f64.to_radians());
            assert_abs_diff_eq!(pt.1, orig.1, epsilon = 1e-6f64.to_radians());
            lon += 35.;
        }
        lat += 17.;
    }
}

#[test]
fn test_identity_pair_is_bit_exact() {
    for defn in [
        "+proj=longlat +datum=WGS84",
        "+proj=utm +zone=31 +ellps=GRS80",
        "+proj=robin +a=6378137",
    ] {
        let src = Proj::from_user_string(defn).unwrap();
        let dst = Proj::from_user_string(defn).unwrap();

        let orig = (0.3f64, 0.7f64, 42.1f64);
        let mut pt = orig;
        transform(&src, &dst, &mut pt).unwrap();
        assert_eq!(pt, orig, "definition {defn} drifted");
    }
}

#[test]
fn test_wgs84_grs80_datum_equivalence() {
    let wgs84 = Proj::from_user_string("+proj=longlat +datum=WGS84").unwrap();
    let grs80 = Proj::from_user_string("+proj=longlat +ellps=GRS80 +towgs84=0,0,0").unwrap();

    let orig = (12.3456f64.to_radians(), 45.6789f64.to_radians(), 0.);
    let mut pt = orig;
    transform(&wgs84, &grs80, &mut pt).unwrap();
    // the datum block short circuits: no geocentric roundtrip noise
    assert_eq!((pt.0, pt.1), (orig.0, orig.1));

    let mut pt = orig;
    transform(&grs80, &wgs84, &mut pt).unwrap();
    assert_eq!((pt.0, pt.1), (orig.0, orig.1));
}

#[test]
fn test_point_type_through_pipeline() {
    let t = Transformer::new("EPSG:4326", "EPSG:3857").unwrap();

    let mut pt = Point::with_m(2.3522f64.to_radians(), 48.8566f64.to_radians(), 0., 7.);
    t.forward(&mut pt).unwrap();
    assert_abs_diff_eq!(pt.x, 261845.71, epsilon = 10.0);
    assert_abs_diff_eq!(pt.y, 6250564.35, epsilon = 10.0);
    assert_eq!(pt.m, 7.);

    let mut pts = [
        Point::new(0., 0.),
        Point::new(0.1, 0.1),
        Point::new(-0.1, -0.1),
    ];
    t.forward(&mut pts[..]).unwrap();
    assert!(pts[1].x > 0. && pts[2].x < 0.);
}

// ---------------------------------------------------------------
// Projection level roundtrips over the catalogue
// ---------------------------------------------------------------

#[test]
fn test_projection_roundtrips() {
    let defs = [
        "+proj=merc +ellps=WGS84",
        "+proj=tmerc +ellps=GRS80",
        "+proj=etmerc +ellps=GRS80 +lat_0=10 +lon_0=5",
        "+proj=utm +zone=17 +ellps=WGS84",
        "+proj=lcc +lat_1=33 +lat_2=45 +lat_0=40 +lon_0=-97 +ellps=GRS80",
        "+proj=aea +lat_1=29.5 +lat_2=45.5 +lat_0=23 +lon_0=-96 +ellps=GRS80",
        "+proj=stere +lat_0=90 +lat_ts=70 +ellps=WGS84",
        "+proj=stere +lat_0=52 +lon_0=5 +k=0.9999 +ellps=bessel",
        "+proj=aeqd +lat_0=40 +lon_0=-100 +ellps=GRS80",
        "+proj=sinu +ellps=GRS80",
        "+proj=cea +lat_ts=30 +ellps=GRS80",
        "+proj=eqc +lat_ts=20 +ellps=WGS84",
        "+proj=robin +a=6378137",
        "+proj=moll +a=6378137",
    ];

    let geo = Proj::from_user_string("+proj=longlat +ellps=GRS80").unwrap();

    for defn in defs {
        let p = Proj::from_user_string(defn).unwrap();
        let orig = (4.5f64.to_radians(), 39.7f64.to_radians(), 0.);
        let mut pt = orig;
        transform(&geo, &p, &mut pt).unwrap();
        transform(&p, &geo, &mut pt).unwrap();
        assert_abs_diff_eq!(pt.0, orig.0, epsilon = 1e-6);
        assert_abs_diff_eq!(pt.1, orig.1, epsilon = 1e-6);
    }
}

// ---------------------------------------------------------------
// Serializer roundtrips
// ---------------------------------------------------------------

#[test]
fn test_serializer_roundtrips() {
    let defs = [
        "+proj=longlat +datum=WGS84",
        "+proj=utm +zone=32 +datum=WGS84",
        "+proj=lcc +lat_1=49 +lat_2=44 +lat_0=46.5 +lon_0=3 +x_0=700000 +y_0=6600000 +ellps=GRS80",
        "+proj=merc +lat_ts=15 +ellps=WGS84",
        "+proj=robin +a=6378137 +rf=298.257223563",
    ];

    for defn in defs {
        let p = Proj::from_user_string(defn).unwrap();

        // proj string
        let p2 = Proj::from_user_string(&serializers::to_proj_string(&p)).unwrap();
        assert_abs_diff_eq!(p2.ellps().a, p.ellps().a, epsilon = 0.1);
        assert_abs_diff_eq!(p2.data().k0, p.data().k0, epsilon = 1e-6);

        // WKT1
        let p2 = Proj::from_user_string(&serializers::to_wkt1(&p)).unwrap();
        assert_abs_diff_eq!(p2.ellps().a, p.ellps().a, epsilon = 0.1);
        assert_abs_diff_eq!(p2.data().k0, p.data().k0, epsilon = 1e-6);

        // WKT2
        let p2 = Proj::from_user_string(&serializers::to_wkt2(&p)).unwrap();
        assert_abs_diff_eq!(p2.ellps().a, p.ellps().a, epsilon = 0.1);
        assert_abs_diff_eq!(p2.data().k0, p.data().k0, epsilon = 1e-6);

        // PROJJSON
        let p2 = Proj::from_user_string(&serializers::to_projjson(&p)).unwrap();
        assert_abs_diff_eq!(p2.ellps().a, p.ellps().a, epsilon = 0.1);
        assert_abs_diff_eq!(p2.data().k0, p.data().k0, epsilon = 1e-6);
    }
}

#[test]
fn test_epsg_guess() {
    for code in ["EPSG:4326", "EPSG:3857", "EPSG:32632", "EPSG:32733"] {
        let p = registry::get(code).unwrap();
        assert_eq!(serializers::guess_epsg(&p).as_deref(), Some(code));
    }
}

#[test]
fn test_user_string_dispatch() {
    // proj string
    assert!(Proj::from_user_string("+proj=longlat +ellps=WGS84").is_ok());
    // WKT
    assert!(Proj::from_user_string(
        r#"GEOGCS["WGS 84",DATUM["WGS_1984",SPHEROID["WGS 84",6378137,298.257223563]],PRIMEM["Greenwich",0],UNIT["degree",0.0174532925199433]]"#
    )
    .is_ok());
    // PROJJSON
    assert!(Proj::from_user_string(
        r#"{"type":"GeographicCRS","name":"WGS 84","datum":{"name":"World Geodetic System 1984","ellipsoid":{"name":"WGS 84","semi_major_axis":6378137,"inverse_flattening":298.257223563}}}"#
    )
    .is_ok());
    // authority code
    assert!(Proj::from_user_string("EPSG:3857").is_ok());
    // garbage
    assert!(Proj::from_user_string("certainly not a crs").is_err());
}
