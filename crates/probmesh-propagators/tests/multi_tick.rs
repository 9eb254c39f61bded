//! Integration tests: the diffusion rule driven over several ticks without
//! an engine, committing through `ProbabilityField::apply_deltas`.

use probmesh_core::{NoObservations, ObservationMask, ObservationSource, ProbabilityField, TickId};
use probmesh_mesh::MeshTopology;
use probmesh_propagator::{Propagator, StepContext};
use probmesh_propagators::{OccupancyDiffusion, UNCERTAINTY_FLOOR};
use probmesh_test_utils::{grid_mesh, grid_mesh_unshared, quad_pair};

fn tick(
    rule: &OccupancyDiffusion,
    mesh: &MeshTopology,
    field: &mut ProbabilityField,
    observations: &dyn ObservationSource,
    tick_id: u64,
) {
    let mut deltas = vec![0.0; field.len()];
    let mut ctx = StepContext::new(
        field.as_slice(),
        &mut deltas,
        mesh,
        observations,
        TickId(tick_id),
    );
    rule.step(&mut ctx).unwrap();
    field.apply_deltas(&deltas).unwrap();
}

#[test]
fn quad_pair_settles_at_the_floor() {
    let mesh = quad_pair();
    let rule = OccupancyDiffusion::default();
    let mut field = ProbabilityField::from_values(vec![1.0, 0.0]).unwrap();

    tick(&rule, &mesh, &mut field, &NoObservations, 1);
    assert_eq!(field.as_slice(), &[0.5, 0.5]);
    // Equal beliefs exchange nothing; the pair is now stable.
    for t in 2..10 {
        tick(&rule, &mesh, &mut field, &NoObservations, t);
    }
    assert_eq!(field.as_slice(), &[0.5, 0.5]);
}

#[test]
fn shared_and_unshared_vertices_diffuse_identically() {
    let rule = OccupancyDiffusion::default();
    let shared = grid_mesh(3, 5);
    let unshared = grid_mesh_unshared(3, 5);
    let mut values = vec![0.0; shared.triangle_count()];
    values[0] = 1.0;
    values[17] = 0.7;
    let mut a = ProbabilityField::from_values(values.clone()).unwrap();
    let mut b = ProbabilityField::from_values(values).unwrap();

    for t in 1..=20 {
        tick(&rule, &shared, &mut a, &NoObservations, t);
        tick(&rule, &unshared, &mut b, &NoObservations, t);
    }
    assert_eq!(a, b);
}

#[test]
fn observation_wall_blocks_spread() {
    // A 1x4 strip of squares: observing both triangles of square 1 cuts
    // square 0 off from squares 2 and 3.
    let mesh = grid_mesh(1, 4);
    let rule = OccupancyDiffusion::default();
    let mut values = vec![0.0; mesh.triangle_count()];
    values[0] = 1.0;
    let mut field = ProbabilityField::from_values(values).unwrap();
    let wall: ObservationMask = [2, 3].into_iter().collect();

    for t in 1..=50 {
        tick(&rule, &mesh, &mut field, &wall, t);
    }
    assert!(field.get(1).unwrap() > 0.0);
    for blocked in 2..8 {
        assert_eq!(field.get(blocked).unwrap(), 0.0, "triangle {blocked} leaked");
    }
}

#[test]
fn custom_floor_is_respected() {
    let mesh = quad_pair();
    let rule = OccupancyDiffusion::new(0.05, 0.8).unwrap();
    let mut field = ProbabilityField::from_values(vec![1.0, 0.0]).unwrap();
    tick(&rule, &mesh, &mut field, &NoObservations, 1);
    // Receiver still gets its share; the donor refuses to go under 0.8.
    assert_eq!(field.as_slice(), &[1.0, 0.5]);
    assert!(UNCERTAINTY_FLOOR < rule.floor());
}
