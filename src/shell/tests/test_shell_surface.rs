use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::geom::{Point3, Surface, Tolerance, tessellate_surface_grid};
use crate::shell::{ShellParameters, ShellPreset, ShellSurface};

fn upright() -> ShellParameters {
    ShellParameters {
        d: 1.0,
        big_a: 5.0,
        alpha: 90.0,
        beta: 90.0,
        a: 2.0,
        b: 2.0,
        mu: 0.0,
        omega: 0.0,
        phi: 0.0,
        theta: 2.0,
    }
}

fn assert_close(p: Point3, expected: [f64; 3]) {
    let tol = Tolerance::new(1e-12);
    let got = p.to_array();
    for axis in 0..3 {
        assert!(tol.approx_eq_f64(got[axis], expected[axis]), "{got:?} != {expected:?}");
    }
}

#[test]
fn closed_form_matches_hand_values() {
    let surface = ShellSurface::new(upright());

    // theta = 0, s = 0: re = a, no growth.
    assert_close(surface.evaluate(0.0, 0.0).unwrap(), [7.0, 0.0, 0.0]);
    // s = π/2 lifts the aperture point onto +z.
    assert_close(surface.evaluate(0.0, 0.125).unwrap(), [5.0, 0.0, 2.0]);
    // Half a turn along the spiral at alpha = 90° stays at the same radius.
    assert_close(surface.evaluate(0.5, 0.0).unwrap(), [-7.0, 0.0, 0.0]);
}

#[test]
fn handedness_mirrors_x() {
    let right = ShellSurface::new(ShellParameters::preset(ShellPreset::Shell1));
    let mut mirrored = ShellParameters::preset(ShellPreset::Shell1);
    mirrored.d = -1.0;
    let left = ShellSurface::new(mirrored);

    let p = right.evaluate(0.3, 0.7).unwrap();
    let q = left.evaluate(0.3, 0.7).unwrap();
    assert_eq!(q, Point3::new(-p.x, p.y, p.z));
}

#[test]
fn growth_follows_alpha() {
    let mut params = upright();
    params.alpha = 80.0;
    let surface = ShellSurface::new(params);
    let start = surface.evaluate(0.0, 0.0).unwrap().to_vec3().length();
    let end = surface.evaluate(1.0, 0.0).unwrap().to_vec3().length();
    let expected = (2.0 * std::f64::consts::PI / 80f64.to_radians().tan()).exp();
    assert!(Tolerance::new(1e-6).approx_eq_f64(end / start, expected));
}

#[test]
fn every_sample_is_finite_for_random_and_degenerate_sets() {
    let mut rng = StdRng::seed_from_u64(2024);
    let mut sets: Vec<ShellParameters> =
        (0..20).map(|_| ShellParameters::random_with(&mut rng)).collect();
    sets.extend(ShellPreset::ALL.map(ShellParameters::preset));

    let mut flat = upright();
    flat.a = 0.0;
    flat.b = 0.0;
    sets.push(flat);
    let mut no_growth = upright();
    no_growth.alpha = 0.0;
    sets.push(no_growth);

    for params in sets {
        let surface = ShellSurface::new(params);
        for i in 0..=20 {
            for j in 0..=20 {
                let p = surface.point_at(f64::from(i) / 20.0, f64::from(j) / 20.0);
                assert!(p.is_finite(), "{params} at ({i}, {j})");
            }
        }
    }
}

#[test]
fn degenerate_samples_are_reported_and_substituted() {
    let mut params = upright();
    params.alpha = 0.0;
    let surface = ShellSurface::new(params);

    // tan(0) = 0 sends the growth factor to infinity or NaN.
    assert_eq!(surface.evaluate(0.0, 0.3), None);
    assert_eq!(surface.evaluate(0.5, 0.3), None);
    assert_eq!(surface.point_at(0.5, 0.3), Point3::ORIGIN);

    let mut params = upright();
    params.a = 0.0;
    params.b = 0.0;
    // sin(0) / 0 is NaN.
    assert_eq!(ShellSurface::new(params).evaluate(0.2, 0.0), None);
}

// Runs with and without the `parallel` feature; both row samplers must agree with
// point-by-point evaluation in row-major order, v outer.
#[test]
fn grid_sampling_matches_pointwise_evaluation() {
    let mut rng = StdRng::seed_from_u64(99);
    let mut flat = upright();
    flat.a = 0.0;
    flat.b = 0.0;
    let sets = [
        ShellParameters::preset(ShellPreset::Shell3),
        ShellParameters::random_with(&mut rng),
        flat,
    ];

    for params in sets {
        let surface = ShellSurface::new(params);
        let (u_count, v_count) = (13, 9);
        let grid = tessellate_surface_grid(&surface, u_count, v_count);
        assert_eq!((grid.u_count, grid.v_count), (u_count, v_count));

        let mut expected = Vec::with_capacity(u_count * v_count);
        let mut degenerate = 0;
        for j in 0..v_count {
            let v = j as f64 / (v_count - 1) as f64;
            for i in 0..u_count {
                let u = i as f64 / (u_count - 1) as f64;
                match surface.evaluate(u, v) {
                    Some(p) => expected.push(p),
                    None => {
                        degenerate += 1;
                        expected.push(Point3::ORIGIN);
                    }
                }
            }
        }

        assert_eq!(grid.points, expected, "{params}");
        assert_eq!(grid.degenerate_count, degenerate, "{params}");
    }
}
