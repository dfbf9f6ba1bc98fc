use shell_engine::geom::{BBox, Tolerance};
use shell_engine::shell::{
    GameRound, ParameterError, ShellMeshOptions, ShellParameter, ShellParameters, ShellPreset,
    SimilarityThresholds, is_similar, shell_mesh,
};
use shell_engine::{GameSession, ShellEngine};

fn assert_normalised(positions: &[f64]) {
    let points: Vec<[f64; 3]> = positions
        .chunks_exact(3)
        .map(|c| [c[0], c[1], c[2]])
        .collect();
    let bbox = BBox::from_positions(&points).expect("non-empty mesh");
    let tol = Tolerance::new(1e-9);
    assert!(tol.approx_zero_f64(bbox.min.x + bbox.max.x));
    assert!(tol.approx_zero_f64(bbox.min.y + bbox.max.y));
    assert!(tol.approx_zero_f64(bbox.min.z + bbox.max.z));
    assert!(tol.approx_eq_f64(bbox.max_extent(), 1.0));
}

#[test]
fn engine_starts_on_shell1() {
    let mut engine = ShellEngine::new();
    assert_eq!(engine.parameters(), ShellParameters::preset(ShellPreset::Shell1));
    assert!(engine.is_stale());

    let positions = engine.positions();
    assert_eq!(positions.len(), 101 * 101 * 3);
    assert!(positions.iter().all(|v| v.is_finite()));
    assert_normalised(&positions);

    assert_eq!(engine.normals().len(), positions.len());
    assert_eq!(engine.indices().len(), 100 * 100 * 6);
    assert_eq!(engine.wireframe().len(), (2 * 100 * 101 + 100 * 100) * 2);
    assert!(engine.diagnostics_summary().starts_with("V:10201 T:20000 E:30200"));
}

#[test]
fn engine_regenerates_only_when_inputs_change() {
    let mut engine = ShellEngine::new();
    engine.set_divisions(10);
    engine.generate();
    assert!(!engine.is_stale());

    engine.set_divisions(10);
    assert!(!engine.is_stale());

    engine.set_parameter("beta", 30.0).expect("known parameter");
    assert!(engine.is_stale());
    assert_eq!(engine.parameters().beta, 30.0);
    engine.generate();

    assert!(engine.set_parameter("gamma", 1.0).is_err());
    assert!(engine.set_parameter("beta", f64::NAN).is_err());
    assert!(!engine.is_stale());

    let stats = engine.context().cache.stats();
    assert_eq!(stats.grid_triangulation_entries, 1);
    assert_eq!(stats.grid_triangulation_hits, 1);
}

#[test]
fn engine_rejects_non_finite_parameter_sets() {
    let mut engine = ShellEngine::new();
    engine.set_divisions(6);
    engine.generate();
    let before = engine.parameters();

    let mut bad = ShellParameters::preset(ShellPreset::Shell2);
    bad.alpha = f64::INFINITY;
    assert_eq!(
        engine.replace_parameters(bad),
        Err(ParameterError::NonFiniteValue(ShellParameter::Alpha))
    );
    bad.alpha = 10.0;
    bad.d = f64::NAN;
    assert_eq!(engine.replace_parameters(bad), Err(ParameterError::NonFiniteHandedness));
    assert_eq!(engine.parameters(), before);
    assert!(!engine.is_stale());

    bad.d = -1.0;
    engine.replace_parameters(bad).expect("finite parameters");
    assert_eq!(engine.parameters(), bad);
    assert!(engine.is_stale());
    assert!(engine.positions().iter().all(|v| v.is_finite()));
}

#[test]
fn engine_presets_scale_rules_and_random() {
    let mut engine = ShellEngine::new();
    engine.set_divisions(20);

    for preset in ["shell1", "shell2", "shell3", "shell4"] {
        engine.load_preset(preset).expect("preset");
        assert_normalised(&engine.positions());
    }
    assert!(engine.load_preset("shell7").is_err());

    engine.set_scale_rule("z").expect("rule");
    assert!(engine.set_scale_rule("diagonal").is_err());
    let (mesh, _) = engine.mesh();
    let height = mesh.surface.bounding_box().unwrap().size().z;
    assert!(Tolerance::new(1e-9).approx_eq_f64(height, 1.0));

    engine.randomize(Some(17));
    let first = engine.parameters();
    engine.randomize(Some(17));
    assert_eq!(engine.parameters(), first);
    assert!(shell_engine::shell::ParameterRanges::DEFAULT.contains(&first));
}

#[test]
fn game_session_round_trip() {
    let mut session = GameSession::new(Some(8));
    let target = *session.round().target();

    assert!(session.set_guess("theta", 3.0).is_err());
    assert!(session.set_guess("nope", 3.0).is_err());

    for param in [
        ShellParameter::BigA,
        ShellParameter::Alpha,
        ShellParameter::Beta,
        ShellParameter::A,
    ] {
        let stored = session
            .set_guess(param.name(), target.get(param))
            .expect("free parameter");
        assert_eq!(stored, target.get(param));
    }
    assert!(session.is_won());
    assert_eq!(session.distance(), 0.0);
    assert_eq!(session.current_mismatch(), None);

    session.set_divisions(12);
    let (guess, _) = session.guess_shell_mesh();
    let (target_mesh, _) = session.target_shell_mesh();
    assert_eq!(guess, target_mesh);

    session.new_round(Some(9));
    assert_ne!(*session.round().target(), target);
}

#[test]
fn public_api_meshes_and_scores() {
    let shell1 = ShellParameters::preset(ShellPreset::Shell1);
    let (mesh, diagnostics) = shell_mesh(&shell1, &ShellMeshOptions::default());
    assert!(!mesh.surface.has_invalid_vertices());
    assert_normalised(mesh.surface.positions_flat());
    assert!(diagnostics.is_clean());

    let mut nudged = shell1;
    nudged.big_a += 1.5;
    assert!(is_similar(&shell1, &nudged, &SimilarityThresholds::GAME));

    let round = GameRound::with_target(shell1);
    assert!(!round.is_won());
}
