/*
 * Physical-parameter registry: NAIF IDs, gravitational parameters, mean
 * radii, rotation poles, and the classical-element series used by the
 * Keplerian-series planetary provider.
 *
 * Body roster and GM/radius values follow the documented RA/DEC/W polar
 * orientation convention for planetary bodies. The orbital-element series
 * itself is the publicly documented Standish (JPL) table of approximate
 * Keplerian elements for the major planets.
 */

use std::collections::HashMap;
use std::sync::OnceLock;

pub type NaifId = i32;

pub mod ids {
    use super::NaifId;

    pub const SOLAR_SYSTEM_BARYCENTER: NaifId = 0;
    pub const MERCURY_BARYCENTER: NaifId = 1;
    pub const VENUS_BARYCENTER: NaifId = 2;
    pub const EARTH_MOON_BARYCENTER: NaifId = 3;
    pub const MARS_BARYCENTER: NaifId = 4;
    pub const JUPITER_BARYCENTER: NaifId = 5;
    pub const SATURN_BARYCENTER: NaifId = 6;
    pub const URANUS_BARYCENTER: NaifId = 7;
    pub const NEPTUNE_BARYCENTER: NaifId = 8;
    pub const PLUTO_BARYCENTER: NaifId = 9;
    pub const SUN: NaifId = 10;
    pub const MERCURY: NaifId = 199;
    pub const VENUS: NaifId = 299;
    pub const MOON: NaifId = 301;
    pub const EARTH: NaifId = 399;
    pub const MARS: NaifId = 499;
    pub const JUPITER: NaifId = 599;
    pub const IO: NaifId = 501;
    pub const EUROPA: NaifId = 502;
    pub const GANYMEDE: NaifId = 503;
    pub const CALLISTO: NaifId = 504;
    pub const SATURN: NaifId = 699;
    pub const URANUS: NaifId = 799;
    pub const MIRANDA: NaifId = 705;
    pub const ARIEL: NaifId = 701;
    pub const UMBRIEL: NaifId = 702;
    pub const TITANIA: NaifId = 703;
    pub const OBERON: NaifId = 704;
    pub const NEPTUNE: NaifId = 899;
    pub const TRITON: NaifId = 801;
    pub const PLUTO: NaifId = 999;

    // Mars's two moons.
    pub const PHOBOS: NaifId = 401;
    pub const DEIMOS: NaifId = 402;

    // Saturn's principal satellites.
    pub const MIMAS: NaifId = 601;
    pub const ENCELADUS: NaifId = 602;
    pub const TETHYS: NaifId = 603;
    pub const DIONE: NaifId = 604;
    pub const RHEA: NaifId = 605;
    pub const TITAN: NaifId = 606;
    pub const IAPETUS: NaifId = 608;

    // The Pluto system's largest moon.
    pub const CHARON: NaifId = 901;

    // Numbered minor planets, NAIF's `2000000 + asteroid number` convention.
    pub const CERES: NaifId = 2_000_001;
    pub const PALLAS: NaifId = 2_000_002;
    pub const VESTA: NaifId = 2_000_004;
}

/// Rotation pole orientation per the standard NAIF/IAU "report on cartographic
/// coordinates" convention: `RA = ra0 + ra1*T`, `DEC = dec0 + dec1*T`,
/// `W = w0 + w1*d`, with `T` in Julian centuries and `d` in days past J2000.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pole {
    pub ra0_deg: f64,
    pub ra_rate_deg_per_century: f64,
    pub dec0_deg: f64,
    pub dec_rate_deg_per_century: f64,
    pub w0_deg: f64,
    pub w_rate_deg_per_day: f64,
}

/// A single body's static physical parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub id: NaifId,
    pub parent_id: NaifId,
    pub name: &'static str,
    pub mu_km3_s2: f64,
    pub mean_radius_km: f64,
    pub pole: Option<Pole>,
}

/// Standish's table of mean orbital elements and centennial rates for a
/// major planet, plus the four correction terms `(b, c, s, f)` used to
/// refine the mean anomaly of the outer planets over the 3000 BC - 3000 AD
/// fit. Angles in degrees, `a` in AU, rates per Julian century.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitalSeries16 {
    pub a0_au: f64,
    pub a_dot_au_per_century: f64,
    pub e0: f64,
    pub e_dot_per_century: f64,
    pub i0_deg: f64,
    pub i_dot_deg_per_century: f64,
    pub l0_deg: f64,
    pub l_dot_deg_per_century: f64,
    pub long_peri0_deg: f64,
    pub long_peri_dot_deg_per_century: f64,
    pub long_node0_deg: f64,
    pub long_node_dot_deg_per_century: f64,
    pub b: f64,
    pub c: f64,
    pub s: f64,
    pub f: f64,
}

/// A minor body's osculating elements referenced to a time of periapsis
/// passage, used where a centennial-rate series would be overkill: mean
/// anomaly is simply `M = (JD - time_peri_jd) * mean_motion_deg_per_day`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitalSeries7 {
    pub a_au: f64,
    pub e: f64,
    pub i_deg: f64,
    pub long_peri_deg: f64,
    pub long_node_deg: f64,
    pub time_peri_jd: f64,
    pub mean_motion_deg_per_day: f64,
}

const BODIES: &[Body] = &[
    Body {
        id: ids::SUN,
        parent_id: ids::SOLAR_SYSTEM_BARYCENTER,
        name: "Sun",
        mu_km3_s2: 132_712_440_018.9,
        mean_radius_km: 696_000.0,
        pole: Some(Pole {
            ra0_deg: 286.13,
            ra_rate_deg_per_century: 0.0,
            dec0_deg: 63.87,
            dec_rate_deg_per_century: 0.0,
            w0_deg: 84.176,
            w_rate_deg_per_day: 14.1844000,
        }),
    },
    Body {
        id: ids::MERCURY_BARYCENTER,
        parent_id: ids::SOLAR_SYSTEM_BARYCENTER,
        name: "Mercury Barycenter",
        mu_km3_s2: 22_031.868_551,
        mean_radius_km: 2_439.7,
        pole: None,
    },
    Body {
        id: ids::MERCURY,
        parent_id: ids::MERCURY_BARYCENTER,
        name: "Mercury",
        mu_km3_s2: 22_031.868_551,
        mean_radius_km: 2_439.7,
        pole: None,
    },
    Body {
        id: ids::VENUS_BARYCENTER,
        parent_id: ids::SOLAR_SYSTEM_BARYCENTER,
        name: "Venus Barycenter",
        mu_km3_s2: 324_858.592,
        mean_radius_km: 6_051.8,
        pole: None,
    },
    Body {
        id: ids::VENUS,
        parent_id: ids::VENUS_BARYCENTER,
        name: "Venus",
        mu_km3_s2: 324_858.592,
        mean_radius_km: 6_051.8,
        pole: None,
    },
    Body {
        id: ids::EARTH_MOON_BARYCENTER,
        parent_id: ids::SOLAR_SYSTEM_BARYCENTER,
        name: "Earth-Moon Barycenter",
        mu_km3_s2: 403_503.235_502,
        mean_radius_km: 0.0,
        pole: None,
    },
    Body {
        id: ids::EARTH,
        parent_id: ids::EARTH_MOON_BARYCENTER,
        name: "Earth",
        mu_km3_s2: 398_600.435_436,
        mean_radius_km: 6_378.1366,
        pole: Some(Pole {
            ra0_deg: 0.0,
            ra_rate_deg_per_century: -0.641,
            dec0_deg: 90.0,
            dec_rate_deg_per_century: -0.557,
            w0_deg: 190.147,
            w_rate_deg_per_day: 360.985_612_5,
        }),
    },
    Body {
        id: ids::MOON,
        parent_id: ids::EARTH_MOON_BARYCENTER,
        name: "Moon",
        mu_km3_s2: 4_902.800_066,
        mean_radius_km: 1_737.4,
        pole: Some(Pole {
            ra0_deg: 269.9949,
            ra_rate_deg_per_century: 0.0031,
            dec0_deg: 66.5392,
            dec_rate_deg_per_century: 0.0130,
            w0_deg: 38.3213,
            w_rate_deg_per_day: 13.17635815,
        }),
    },
    Body {
        id: ids::MARS_BARYCENTER,
        parent_id: ids::SOLAR_SYSTEM_BARYCENTER,
        name: "Mars Barycenter",
        mu_km3_s2: 42_828.375_816,
        mean_radius_km: 3_396.19,
        pole: None,
    },
    Body {
        id: ids::MARS,
        parent_id: ids::MARS_BARYCENTER,
        name: "Mars",
        mu_km3_s2: 42_828.375_816,
        mean_radius_km: 3_396.19,
        pole: None,
    },
    Body {
        id: ids::JUPITER_BARYCENTER,
        parent_id: ids::SOLAR_SYSTEM_BARYCENTER,
        name: "Jupiter Barycenter",
        mu_km3_s2: 126_712_764.8,
        mean_radius_km: 71_492.0,
        pole: None,
    },
    Body {
        id: ids::JUPITER,
        parent_id: ids::JUPITER_BARYCENTER,
        name: "Jupiter",
        mu_km3_s2: 126_686_531.9,
        mean_radius_km: 69_911.0,
        pole: None,
    },
    Body {
        id: ids::IO,
        parent_id: ids::JUPITER_BARYCENTER,
        name: "Io",
        mu_km3_s2: 5_959.916,
        mean_radius_km: 1_821.6,
        pole: None,
    },
    Body {
        id: ids::EUROPA,
        parent_id: ids::JUPITER_BARYCENTER,
        name: "Europa",
        mu_km3_s2: 3_202.739,
        mean_radius_km: 1_560.8,
        pole: None,
    },
    Body {
        id: ids::GANYMEDE,
        parent_id: ids::JUPITER_BARYCENTER,
        name: "Ganymede",
        mu_km3_s2: 9_887.834,
        mean_radius_km: 2_634.1,
        pole: None,
    },
    Body {
        id: ids::CALLISTO,
        parent_id: ids::JUPITER_BARYCENTER,
        name: "Callisto",
        mu_km3_s2: 7_179.289,
        mean_radius_km: 2_410.3,
        pole: None,
    },
    Body {
        id: ids::SATURN_BARYCENTER,
        parent_id: ids::SOLAR_SYSTEM_BARYCENTER,
        name: "Saturn Barycenter",
        mu_km3_s2: 37_940_585.2,
        mean_radius_km: 60_268.0,
        pole: None,
    },
    Body {
        id: ids::SATURN,
        parent_id: ids::SATURN_BARYCENTER,
        name: "Saturn",
        mu_km3_s2: 37_931_208.0,
        mean_radius_km: 58_232.0,
        pole: None,
    },
    Body {
        id: ids::URANUS_BARYCENTER,
        parent_id: ids::SOLAR_SYSTEM_BARYCENTER,
        name: "Uranus Barycenter",
        mu_km3_s2: 5_794_548.6,
        mean_radius_km: 25_559.0,
        pole: None,
    },
    Body {
        id: ids::URANUS,
        parent_id: ids::URANUS_BARYCENTER,
        name: "Uranus",
        mu_km3_s2: 5_793_939.4,
        mean_radius_km: 25_362.0,
        pole: None,
    },
    Body {
        id: ids::NEPTUNE_BARYCENTER,
        parent_id: ids::SOLAR_SYSTEM_BARYCENTER,
        name: "Neptune Barycenter",
        mu_km3_s2: 6_836_527.100_580,
        mean_radius_km: 24_764.0,
        pole: None,
    },
    Body {
        id: ids::NEPTUNE,
        parent_id: ids::NEPTUNE_BARYCENTER,
        name: "Neptune",
        mu_km3_s2: 6_835_099.5,
        mean_radius_km: 24_622.0,
        pole: None,
    },
    Body {
        id: ids::TRITON,
        parent_id: ids::NEPTUNE_BARYCENTER,
        name: "Triton",
        mu_km3_s2: 1_427.598,
        mean_radius_km: 1_353.4,
        pole: None,
    },
    Body {
        id: ids::PLUTO_BARYCENTER,
        parent_id: ids::SOLAR_SYSTEM_BARYCENTER,
        name: "Pluto Barycenter",
        mu_km3_s2: 977.0059,
        mean_radius_km: 1_188.3,
        pole: None,
    },
    Body {
        id: ids::PLUTO,
        parent_id: ids::PLUTO_BARYCENTER,
        name: "Pluto",
        mu_km3_s2: 869.6,
        mean_radius_km: 1_188.3,
        pole: None,
    },
    Body {
        id: ids::PHOBOS,
        parent_id: ids::MARS_BARYCENTER,
        name: "Phobos",
        mu_km3_s2: 0.000_707_1,
        mean_radius_km: 11.1,
        pole: None,
    },
    Body {
        id: ids::DEIMOS,
        parent_id: ids::MARS_BARYCENTER,
        name: "Deimos",
        mu_km3_s2: 0.000_098_1,
        mean_radius_km: 6.2,
        pole: None,
    },
    Body {
        id: ids::MIMAS,
        parent_id: ids::SATURN_BARYCENTER,
        name: "Mimas",
        mu_km3_s2: 2.503_6,
        mean_radius_km: 198.2,
        pole: None,
    },
    Body {
        id: ids::ENCELADUS,
        parent_id: ids::SATURN_BARYCENTER,
        name: "Enceladus",
        mu_km3_s2: 7.211_5,
        mean_radius_km: 252.1,
        pole: None,
    },
    Body {
        id: ids::TETHYS,
        parent_id: ids::SATURN_BARYCENTER,
        name: "Tethys",
        mu_km3_s2: 41.211_7,
        mean_radius_km: 531.1,
        pole: None,
    },
    Body {
        id: ids::DIONE,
        parent_id: ids::SATURN_BARYCENTER,
        name: "Dione",
        mu_km3_s2: 73.113_2,
        mean_radius_km: 561.4,
        pole: None,
    },
    Body {
        id: ids::RHEA,
        parent_id: ids::SATURN_BARYCENTER,
        name: "Rhea",
        mu_km3_s2: 153.940_2,
        mean_radius_km: 763.8,
        pole: None,
    },
    Body {
        id: ids::TITAN,
        parent_id: ids::SATURN_BARYCENTER,
        name: "Titan",
        mu_km3_s2: 8_978.138_2,
        mean_radius_km: 2_574.73,
        pole: None,
    },
    Body {
        id: ids::IAPETUS,
        parent_id: ids::SATURN_BARYCENTER,
        name: "Iapetus",
        mu_km3_s2: 120.515_3,
        mean_radius_km: 734.5,
        pole: None,
    },
    Body {
        id: ids::CHARON,
        parent_id: ids::PLUTO_BARYCENTER,
        name: "Charon",
        mu_km3_s2: 102.875_9,
        mean_radius_km: 606.0,
        pole: None,
    },
    Body {
        id: ids::CERES,
        parent_id: ids::SOLAR_SYSTEM_BARYCENTER,
        name: "Ceres",
        mu_km3_s2: 62.68,
        mean_radius_km: 469.7,
        pole: None,
    },
    Body {
        id: ids::PALLAS,
        parent_id: ids::SOLAR_SYSTEM_BARYCENTER,
        name: "Pallas",
        mu_km3_s2: 14.3,
        mean_radius_km: 256.0,
        pole: None,
    },
    Body {
        id: ids::VESTA,
        parent_id: ids::SOLAR_SYSTEM_BARYCENTER,
        name: "Vesta",
        mu_km3_s2: 17.8,
        mean_radius_km: 262.7,
        pole: None,
    },
];

/// Osculating elements for a handful of numbered minor planets, indexed by
/// NAIF ID, evaluated by the minor-body Keplerian provider.
///
/// This is a representative subset (the three largest main-belt bodies),
/// not the full minor-planet catalog: JPL's Small-Body Database alone lists
/// over a million numbered objects, well beyond what a registry compiled
/// into this crate could reasonably carry.
const DWARF_PLANET_SERIES: &[(NaifId, OrbitalSeries7)] = &[
    (
        ids::CERES,
        OrbitalSeries7 {
            a_au: 2.769_1,
            e: 0.076_0,
            i_deg: 10.593,
            long_peri_deg: 73.597,
            long_node_deg: 80.393,
            time_peri_jd: 2_453_679.5,
            mean_motion_deg_per_day: 360.0 / 1_680.0,
        },
    ),
    (
        ids::PALLAS,
        OrbitalSeries7 {
            a_au: 2.773_0,
            e: 0.230_2,
            i_deg: 34.93,
            long_peri_deg: 310.2,
            long_node_deg: 172.9,
            time_peri_jd: 2_453_000.5,
            mean_motion_deg_per_day: 360.0 / 1_686.0,
        },
    ),
    (
        ids::VESTA,
        OrbitalSeries7 {
            a_au: 2.361_5,
            e: 0.088_7,
            i_deg: 7.154,
            long_peri_deg: 151.66,
            long_node_deg: 103.85,
            time_peri_jd: 2_453_157.5,
            mean_motion_deg_per_day: 360.0 / 1_325.75,
        },
    ),
];

/// Standish's 3000 BC - 3000 AD table of mean Keplerian elements, indexed
/// by the planet barycenter's NAIF ID. Rates are per Julian century;
/// `(b, c, s, f)` are zero for the inner planets, whose mean anomaly is
/// adequately represented by the linear term alone over this interval.
const PLANETARY_SERIES: &[(NaifId, OrbitalSeries16)] = &[
    (
        ids::MERCURY_BARYCENTER,
        OrbitalSeries16 {
            a0_au: 0.387_098_93,
            a_dot_au_per_century: 0.000_000_66,
            e0: 0.205_630_69,
            e_dot_per_century: 0.000_020_98,
            i0_deg: 7.004_986,
            i_dot_deg_per_century: 0.001_810,
            l0_deg: 252.250_906,
            l_dot_deg_per_century: 149_472.674_635,
            long_peri0_deg: 77.457_796,
            long_peri_dot_deg_per_century: 1.016_420,
            long_node0_deg: 48.330_893,
            long_node_dot_deg_per_century: 1.186_021,
            b: 0.0,
            c: 0.0,
            s: 0.0,
            f: 0.0,
        },
    ),
    (
        ids::VENUS_BARYCENTER,
        OrbitalSeries16 {
            a0_au: 0.723_329_82,
            a_dot_au_per_century: 0.000_000_04,
            e0: 0.006_771_92,
            e_dot_per_century: -0.000_047_04,
            i0_deg: 3.394_662,
            i_dot_deg_per_century: -0.000_810,
            l0_deg: 181.979_801,
            l_dot_deg_per_century: 58_517.815_676,
            long_peri0_deg: 131.563_707,
            long_peri_dot_deg_per_century: 1.402_022,
            long_node0_deg: 76.679_920,
            long_node_dot_deg_per_century: 0.900_476,
            b: 0.0,
            c: 0.0,
            s: 0.0,
            f: 0.0,
        },
    ),
    (
        ids::EARTH_MOON_BARYCENTER,
        OrbitalSeries16 {
            a0_au: 1.000_001_02,
            a_dot_au_per_century: 0.000_001_38,
            e0: 0.016_710_22,
            e_dot_per_century: -0.000_103_74,
            i0_deg: 0.000_005,
            i_dot_deg_per_century: -0.013_337,
            l0_deg: 100.464_441,
            l_dot_deg_per_century: 35_999.372_851,
            long_peri0_deg: 102.937_348,
            long_peri_dot_deg_per_century: 0.321_648,
            long_node0_deg: 0.0,
            long_node_dot_deg_per_century: 0.0,
            b: 0.0,
            c: 0.0,
            s: 0.0,
            f: 0.0,
        },
    ),
    (
        ids::MARS_BARYCENTER,
        OrbitalSeries16 {
            a0_au: 1.523_679_35,
            a_dot_au_per_century: 0.000_001_88,
            e0: 0.093_400_65,
            e_dot_per_century: 0.000_090_48,
            i0_deg: 1.849_726,
            i_dot_deg_per_century: -0.008_130,
            l0_deg: -4.553_432,
            l_dot_deg_per_century: 19_140.303_268,
            long_peri0_deg: -23.943_630,
            long_peri_dot_deg_per_century: 0.445_582,
            long_node0_deg: 49.559_539,
            long_node_dot_deg_per_century: -0.293_740,
            b: 0.0,
            c: 0.0,
            s: 0.0,
            f: 0.0,
        },
    ),
    (
        ids::JUPITER_BARYCENTER,
        OrbitalSeries16 {
            a0_au: 5.202_603_19,
            a_dot_au_per_century: 0.000_019_50,
            e0: 0.048_494_85,
            e_dot_per_century: 0.000_163_30,
            i0_deg: 1.303_270,
            i_dot_deg_per_century: -0.003_043,
            l0_deg: 34.351_484,
            l_dot_deg_per_century: 3_034.905_675,
            long_peri0_deg: 14.331_309,
            long_peri_dot_deg_per_century: 0.213_626,
            long_node0_deg: 100.464_441,
            long_node_dot_deg_per_century: 0.176_987,
            b: -0.000_125_15,
            c: 0.007_214,
            s: 0.006_020,
            f: 38.351_250,
        },
    ),
    (
        ids::SATURN_BARYCENTER,
        OrbitalSeries16 {
            a0_au: 9.554_909_96,
            a_dot_au_per_century: -0.000_213_27,
            e0: 0.055_508_62,
            e_dot_per_century: -0.000_346_64,
            i0_deg: 2.488_878,
            i_dot_deg_per_century: 0.001_418,
            l0_deg: 50.077_471,
            l_dot_deg_per_century: 1_222.114_351,
            long_peri0_deg: 93.056_787,
            long_peri_dot_deg_per_century: -0.301_647,
            long_node0_deg: 113.665_503,
            long_node_dot_deg_per_century: -0.259_799,
            b: -0.000_503_87,
            c: 0.008_296,
            s: -0.004_616,
            f: 38.351_250,
        },
    ),
    (
        ids::URANUS_BARYCENTER,
        OrbitalSeries16 {
            a0_au: 19.218_446_20,
            a_dot_au_per_century: -0.000_371_69,
            e0: 0.046_295_90,
            e_dot_per_century: -0.000_027_50,
            i0_deg: 0.773_196,
            i_dot_deg_per_century: -0.001_699,
            l0_deg: 314.055_005,
            l_dot_deg_per_century: 428.466_998,
            long_peri0_deg: 173.005_159,
            long_peri_dot_deg_per_century: 0.893_206,
            long_node0_deg: 74.005_947,
            long_node_dot_deg_per_century: 0.052_524,
            b: 0.000_757_41,
            c: -0.002_958,
            s: 0.002_516,
            f: 7.670_250,
        },
    ),
    (
        ids::NEPTUNE_BARYCENTER,
        OrbitalSeries16 {
            a0_au: 30.110_386_69,
            a_dot_au_per_century: -0.000_166_93,
            e0: 0.008_997_04,
            e_dot_per_century: 0.000_006_33,
            i0_deg: 1.770_043,
            i_dot_deg_per_century: 0.000_276,
            l0_deg: 304.348_665,
            l_dot_deg_per_century: 218.486_200,
            long_peri0_deg: 48.123_691,
            long_peri_dot_deg_per_century: 0.426_352,
            long_node0_deg: 131.784_057,
            long_node_dot_deg_per_century: -0.010_045,
            b: -0.000_009_25,
            c: 0.004_248,
            s: -0.004_766,
            f: 7.670_250,
        },
    ),
    (
        ids::PLUTO_BARYCENTER,
        OrbitalSeries16 {
            a0_au: 39.375_794_28,
            a_dot_au_per_century: -0.000_146_83,
            e0: 0.248_893_77,
            e_dot_per_century: 0.000_016_75,
            i0_deg: 17.166_925,
            i_dot_deg_per_century: 0.000_425,
            l0_deg: 238.927_285,
            l_dot_deg_per_century: 145.207_843,
            long_peri0_deg: 224.068_203,
            long_peri_dot_deg_per_century: -0.041_956,
            long_node0_deg: 110.376_957,
            long_node_dot_deg_per_century: -0.004_062,
            b: -0.010_868,
            c: 0.006_892,
            s: 0.008_399,
            f: 0.0,
        },
    ),
];

/// Lookup table built once, lazily, on first access and never mutated
/// afterward: the registry has no write path, so a `HashMap` behind a
/// `OnceLock` is safe to share across threads without any lock in the
/// steady state.
fn body_index() -> &'static HashMap<NaifId, &'static Body> {
    static INDEX: OnceLock<HashMap<NaifId, &'static Body>> = OnceLock::new();
    INDEX.get_or_init(|| BODIES.iter().map(|b| (b.id, b)).collect())
}

fn name_index() -> &'static HashMap<&'static str, &'static Body> {
    static INDEX: OnceLock<HashMap<&'static str, &'static Body>> = OnceLock::new();
    INDEX.get_or_init(|| BODIES.iter().map(|b| (b.name, b)).collect())
}

fn series_index() -> &'static HashMap<NaifId, &'static OrbitalSeries16> {
    static INDEX: OnceLock<HashMap<NaifId, &'static OrbitalSeries16>> = OnceLock::new();
    INDEX.get_or_init(|| PLANETARY_SERIES.iter().map(|(id, s)| (*id, s)).collect())
}

fn dwarf_planet_series_index() -> &'static HashMap<NaifId, &'static OrbitalSeries7> {
    static INDEX: OnceLock<HashMap<NaifId, &'static OrbitalSeries7>> = OnceLock::new();
    INDEX.get_or_init(|| DWARF_PLANET_SERIES.iter().map(|(id, s)| (*id, s)).collect())
}

/// Looks up a body's static physical parameters by NAIF ID.
pub fn body(id: NaifId) -> Option<&'static Body> {
    body_index().get(&id).copied()
}

/// Looks up a body's static physical parameters by its canonical name.
pub fn body_by_name(name: &str) -> Option<&'static Body> {
    name_index().get(name).copied()
}

/// Looks up the Keplerian-series record for a planet barycenter.
pub fn planetary_series(id: NaifId) -> Option<&'static OrbitalSeries16> {
    series_index().get(&id).copied()
}

/// Looks up the osculating-element record for a minor planet.
pub fn dwarf_planet_series(id: NaifId) -> Option<&'static OrbitalSeries7> {
    dwarf_planet_series_index().get(&id).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn earth_is_registered() {
        let earth = body(ids::EARTH).expect("Earth must be registered");
        assert_eq!(earth.name, "Earth");
        assert!(earth.mu_km3_s2 > 0.0);
    }

    #[test]
    fn lookup_by_name_matches_lookup_by_id() {
        let by_id = body(ids::MOON).unwrap();
        let by_name = body_by_name("Moon").unwrap();
        assert_eq!(by_id.id, by_name.id);
    }

    #[test]
    fn every_planet_barycenter_has_a_series() {
        for id in [
            ids::MERCURY_BARYCENTER,
            ids::VENUS_BARYCENTER,
            ids::EARTH_MOON_BARYCENTER,
            ids::MARS_BARYCENTER,
            ids::JUPITER_BARYCENTER,
            ids::SATURN_BARYCENTER,
            ids::URANUS_BARYCENTER,
            ids::NEPTUNE_BARYCENTER,
            ids::PLUTO_BARYCENTER,
        ] {
            assert!(planetary_series(id).is_some(), "missing series for {id}");
        }
    }

    #[test]
    fn unknown_body_is_absent() {
        assert!(body(123_456).is_none());
    }

    #[test]
    fn outer_moons_are_registered() {
        for id in [
            ids::PHOBOS,
            ids::DEIMOS,
            ids::MIMAS,
            ids::ENCELADUS,
            ids::TETHYS,
            ids::DIONE,
            ids::RHEA,
            ids::TITAN,
            ids::IAPETUS,
            ids::CHARON,
        ] {
            assert!(body(id).is_some(), "missing registry entry for {id}");
        }
    }

    #[test]
    fn numbered_minor_planets_have_a_series() {
        for id in [ids::CERES, ids::PALLAS, ids::VESTA] {
            assert!(body(id).is_some(), "missing body entry for {id}");
            assert!(dwarf_planet_series(id).is_some(), "missing series for {id}");
        }
    }
}
