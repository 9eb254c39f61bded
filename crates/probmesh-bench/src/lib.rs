//! Benchmark mesh profiles for the probmesh workspace.
//!
//! - [`reference_mesh`]: 100x100 squares (20K triangles), shared vertices
//! - [`soup_mesh`]: the same footprint with every triangle independently
//!   indexed, the layout navmesh exporters often produce
//! - [`seeded_engine`]: an engine over a profile with deterministic belief
//!   hot spots and a band of observed triangles

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use probmesh_engine::{ConfigError, DiffusionEngine, EngineConfig};
use probmesh_mesh::MeshTopology;
use probmesh_test_utils::{grid_mesh, grid_mesh_unshared};

/// 100x100 squares with shared vertices.
pub fn reference_mesh() -> MeshTopology {
    grid_mesh(100, 100)
}

/// 100x100 squares, three private vertices per triangle.
pub fn soup_mesh() -> MeshTopology {
    grid_mesh_unshared(100, 100)
}

/// Wrap `mesh` in an engine with belief at every 97th triangle and the
/// first `observed` triangles marked observed.
pub fn seeded_engine(mesh: MeshTopology, observed: usize) -> Result<DiffusionEngine, ConfigError> {
    let n = mesh.triangle_count();
    let values = (0..n)
        .map(|i| if i % 97 == 0 { 1.0 } else { 0.0 })
        .collect();
    let mut engine = DiffusionEngine::with_probabilities(mesh, values, EngineConfig::default())?;
    engine.replace_observations(0..observed.min(n))?;
    Ok(engine)
}
