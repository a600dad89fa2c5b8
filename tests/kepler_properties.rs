//! Property-based coverage of the Kepler round-trip and energy-conservation
//! invariants across a grid of eccentricities and inclinations, parameterized
//! with `rstest`.

use approx::assert_relative_eq;
use astrodyne::math::kepler::{elements_from_state, state_from_elements, Elements};
use rstest::rstest;

const MU_SUN: f64 = 1.327_124_400_18e20;

#[rstest]
#[case(0.001, 0.1)]
#[case(0.1, 0.0)]
#[case(0.5, 0.5)]
#[case(0.85, 1.2)]
#[case(1.0e-9, 0.3)]
fn elements_round_trip_through_state(#[case] e: f64, #[case] i_rad: f64) {
    let elements = Elements {
        a_m: 1.5e11,
        e,
        i_rad,
        m_rad: 0.7,
        aop_rad: 0.4,
        raan_rad: 2.1,
    };

    let (r, v) = state_from_elements(&elements, MU_SUN).unwrap();
    let recovered = elements_from_state(MU_SUN, r, v).unwrap();

    assert_relative_eq!(recovered.a_m, elements.a_m, max_relative = 1e-9);
    assert_relative_eq!(recovered.e, elements.e, max_relative = 1e-9);
}

#[rstest]
#[case(0.0, 0.2)]
#[case(0.3, 0.0)]
#[case(0.6, 1.0)]
#[case(0.9, 2.5)]
fn specific_energy_is_constant_along_the_arc(#[case] e: f64, #[case] i_rad: f64) {
    let elements = Elements {
        a_m: 2.2e11,
        e,
        i_rad,
        m_rad: 0.0,
        aop_rad: 0.2,
        raan_rad: 0.9,
    };

    let energies: Vec<f64> = (0..16)
        .map(|k| {
            let m_rad = elements.m_rad + k as f64 * (core::f64::consts::TAU / 16.0);
            let (r, v) = state_from_elements(&Elements { m_rad, ..elements }, MU_SUN).unwrap();
            0.5 * v.norm_squared() - MU_SUN / r.norm()
        })
        .collect();

    let reference = energies[0];
    for energy in &energies {
        assert_relative_eq!(*energy, reference, max_relative = 1e-8);
    }
}
