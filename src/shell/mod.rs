//! Seashell surface family: parameters, surface function, mesh generation,
//! similarity scoring and the guessing game.

mod game;
mod mesh;
mod parameters;
mod similarity;
mod surface;

pub use game::GameRound;
pub use mesh::{ShellMesh, ShellMeshOptions, shell_mesh, shell_mesh_with_context};
pub use parameters::{
    ParameterError, ParameterRange, ParameterRanges, ShellParameter, ShellParameters, ShellPreset,
};
pub use similarity::{Mismatch, SimilarityThresholds, distance, first_mismatch, is_similar};
pub use surface::ShellSurface;

#[cfg(test)]
mod tests;
