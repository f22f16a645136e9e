use clusterscope::{profile, Particle, Snapshot};
use nalgebra::Vector3;
use proptest::prelude::*;

fn snapshot(positions: Vec<(f64, f64, f64)>) -> Snapshot {
    let particles: Vec<Particle> = positions
        .into_iter()
        .enumerate()
        .map(|(i, (x, y, z))| {
            Particle::new(i as i64, 1.0, Vector3::new(x, y, z), Vector3::new(z, x, y))
        })
        .collect();
    Snapshot {
        snapshot_id: 0,
        n_particles: particles.len(),
        time: 0.0,
        particles,
    }
}

proptest! {
    #[test]
    fn structural_radii_are_ordered(
        positions in prop::collection::vec((-1e3..1e3f64, -1e3..1e3f64, -1e3..1e3f64), 1..200)
    ) {
        let metrics = profile(&snapshot(positions)).unwrap();
        prop_assert!(metrics.r_core <= metrics.r_half);
        prop_assert!(metrics.r_half <= metrics.r_tidal);
        prop_assert!(metrics.r_tidal <= metrics.r_max);
        prop_assert!(metrics.v_std >= 0.0);
        prop_assert!(metrics.density_core >= 0.0);
    }

    #[test]
    fn origin_concentrated_core_has_zero_density(
        n_center in 1usize..50,
        outer in prop::collection::vec(0.1..10.0f64, 0..4)
    ) {
        // more than 10 % of the particles sit on the origin, so r_core = 0
        let n_center = n_center.max(outer.len());
        let mut positions = vec![(0.0, 0.0, 0.0); n_center];
        positions.extend(outer.into_iter().map(|r| (r, 0.0, 0.0)));

        let metrics = profile(&snapshot(positions)).unwrap();
        prop_assert_eq!(metrics.r_core, 0.0);
        prop_assert_eq!(metrics.density_core, 0.0);
    }
}
