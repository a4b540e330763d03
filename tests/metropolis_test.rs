//! Local Metropolis sweeps: golden values, acceptance rules, physics sanity.

mod common;

use common::ScriptedRng;
use pimc::lattice::{Configuration, Shape};
use pimc::metropolis::{
    local_sweep, site_action_change, update_site, LocalMetropolis, PathAction, SweepResult,
};
use pimc::potential::{Potential, PotentialParameters};
use pimc::utils::rng::seeded_rng;

use rand::SeedableRng;
use rand_pcg::Pcg64;

fn qho() -> Potential {
    PotentialParameters::default().bind("harmonic").unwrap()
}

#[test]
fn test_golden_four_site_path() {
    // m = 1, a = 0.5 → kinetic prefactor m/2a = 1, potential weight a/2 = 0.25
    let path = PathAction { mass: 1.0, spacing: 0.5 };
    let mut cfg = Configuration::path(4).unwrap();

    // Proposal fraction f maps to offset 2f - 1 for step 1.0.
    //   site 0: +0.5, ΔS = 0.5625  > 0, u = 0.25 < e^-0.5625 → accept
    //   site 1: -0.5, ΔS = 1.0625  > 0, u = 0.5  > e^-1.0625 → reject
    //   site 2:  0.0, ΔS = 0             → accept, no draw
    //   site 3: +0.25, ΔS = -0.109375    → accept, no draw
    let mut rng = ScriptedRng::from_fractions(&[0.75, 0.25, 0.25, 0.5, 0.5, 0.625]);
    let result = local_sweep(&mut cfg, &qho(), &path, 1.0, &mut rng);

    assert_eq!(cfg.as_slice(), &[0.5, 0.0, 0.0, 0.25]);
    assert_eq!(result.accepted, 3);
    assert_eq!(result.attempts, 4);
    assert_eq!(result.acceptance_rate(), 0.75);
    assert_eq!(rng.remaining(), 0, "every scripted draw should be consumed");

    // The φ⁴ form with λ = 0 in the path-mass convention walks the same chain
    let mut cfg_phi4 = Configuration::path(4).unwrap();
    let mut rng = ScriptedRng::from_fractions(&[0.75, 0.25, 0.25, 0.5, 0.5, 0.625]);
    local_sweep(&mut cfg_phi4, &Potential::phi4_from_path_mass(1.0, 0.0), &path, 1.0, &mut rng);
    assert_eq!(cfg_phi4, cfg);
}

#[test]
fn test_downhill_move_always_accepted() {
    // A lone bump on a flat lattice: dropping it back to zero lowers the action
    let potential = Potential::Phi4 { mass_sq: 1.0, lambda: 0.0 };
    let mut values = vec![0.0; 9];
    values[4] = 3.0;
    let mut cfg = Configuration::from_vec(Shape::Lattice { rows: 3, cols: 3 }, values).unwrap();

    let ds = site_action_change(&cfg, 4, 0.0, &potential, &PathAction::default());
    assert!(ds < 0.0, "ΔS = {ds}");

    // The only scripted draw would reject any uphill move
    let mut rng = ScriptedRng::from_fractions(&[0.999755859375]);
    assert!(update_site(&mut cfg, 4, 0.0, &potential, &PathAction::default(), &mut rng));
    assert_eq!(cfg.get(4), 0.0);
    assert_eq!(rng.consumed(), 0, "ΔS ≤ 0 must not consume the acceptance draw");
}

#[test]
fn test_uphill_move_consumes_one_draw() {
    let potential = Potential::Phi4 { mass_sq: 1.0, lambda: 0.0 };
    let mut cfg = Configuration::lattice(3, 3).unwrap();

    // ΔS for 0 → 3 on a flat lattice: 2·9 + 4.5 = 22.5, e^-22.5 ≈ 1.7e-10
    let mut rng = ScriptedRng::from_fractions(&[0.5]);
    assert!(!update_site(&mut cfg, 4, 3.0, &potential, &PathAction::default(), &mut rng));
    assert_eq!(cfg.get(4), 0.0);
    assert_eq!(rng.consumed(), 1);
}

#[test]
fn test_field_kinetic_term() {
    let potential = Potential::Phi4 { mass_sq: 0.0, lambda: 0.0 };
    let values = vec![
        0.0, 1.0, 0.0, //
        2.0, 0.5, 3.0, //
        0.0, 4.0, 0.0,
    ];
    let cfg = Configuration::from_vec(Shape::Lattice { rows: 3, cols: 3 }, values).unwrap();
    // 2(x'² - x²) - (x' - x) Σ_nn with Σ_nn = 10
    let ds = site_action_change(&cfg, 4, 1.5, &potential, &PathAction::default());
    assert_eq!(ds, 2.0 * (2.25 - 0.25) - 1.0 * 10.0);
}

#[test]
fn test_same_seed_reproduces_chain() {
    let sampler = LocalMetropolis::field(Potential::Phi4 { mass_sq: -2.0, lambda: 1.0 }, 0.6);

    let run = |seed: u64| {
        let mut rng = seeded_rng(seed);
        let mut cfg = Configuration::lattice(8, 8).unwrap();
        let stats = sampler.run(&mut cfg, 50, &mut rng);
        (cfg, stats)
    };

    let (cfg_a, stats_a) = run(0xDEADBEEF);
    let (cfg_b, stats_b) = run(0xDEADBEEF);
    let (cfg_c, _) = run(0xDEADBEF0);

    assert_eq!(cfg_a, cfg_b);
    assert_eq!(stats_a, stats_b);
    assert_ne!(cfg_a, cfg_c);
}

#[test]
fn test_field_acceptance_rate_is_plausible() {
    let mut rng = Pcg64::seed_from_u64(42);
    let sampler = LocalMetropolis::field(Potential::Phi4 { mass_sq: -2.0, lambda: 1.0 }, 0.5);
    let mut cfg = Configuration::lattice(16, 16).unwrap();

    let stats = sampler.run(&mut cfg, 200, &mut rng);
    let acc_rate = stats.acceptance_rate();

    assert_eq!(stats.attempts, 200 * 256);
    assert!(
        (0.01..=0.99).contains(&acc_rate),
        "Acceptance rate {acc_rate:.3} is outside plausible range"
    );
}

#[test]
fn test_qho_ground_state_width() {
    // N a = 32 is deep in the ground-state limit; ⟨x²⟩ → 1/(2ω) up to O(a²)
    let mut rng = Pcg64::seed_from_u64(7);
    let sampler = LocalMetropolis::new(qho(), PathAction { mass: 1.0, spacing: 0.5 }, 1.0);
    let mut cfg = Configuration::path(64).unwrap();

    sampler.run(&mut cfg, 500, &mut rng);

    let mut x2_sum = 0.0;
    let mut n = 0usize;
    for sweep in 0..4000 {
        sampler.sweep(&mut cfg, &mut rng);
        if sweep % 10 == 0 {
            x2_sum += cfg.as_slice().iter().map(|x| x * x).sum::<f64>();
            n += cfg.len();
        }
    }
    let x2 = x2_sum / n as f64;
    println!("<x^2> = {x2:.4}");
    assert!((0.35..0.65).contains(&x2), "<x²> = {x2}");
}

#[test]
fn test_double_well_path_splits_into_wells() {
    let params = PotentialParameters { v0: 0.5, well_separation: 2.0, ..Default::default() };
    let sampler =
        LocalMetropolis::new(params.bind("double_well").unwrap(), PathAction::default(), 1.5);
    let mut rng = Pcg64::seed_from_u64(11);
    let mut cfg = Configuration::path(100).unwrap();

    sampler.run(&mut cfg, 2000, &mut rng);

    // Barrier V0 a⁴ = 8 pins most slices near ±2, far from the origin
    let near_minima = cfg.as_slice().iter().filter(|x| (x.abs() - 2.0).abs() < 1.0).count();
    assert!(near_minima > 60, "only {near_minima} slices near a minimum");
}

#[test]
fn test_zero_step_freezes_chain() {
    let start = Configuration::from_vec(Shape::Path { len: 4 }, vec![0.3, -1.2, 0.8, 2.0]).unwrap();
    let mut cfg = start.clone();
    let mut rng = seeded_rng(1);

    let result = local_sweep(&mut cfg, &qho(), &PathAction::default(), 0.0, &mut rng);

    assert_eq!(cfg, start);
    assert_eq!(result.attempts, 4);
    assert_eq!(result.acceptance_rate(), 1.0);
}

#[test]
fn test_negative_step_mirrors_proposal() {
    // Offset s(2f - 1): s = -1 turns the golden proposals into their mirror images
    let path = PathAction { mass: 1.0, spacing: 0.5 };
    let mut cfg = Configuration::path(4).unwrap();
    let mut rng = ScriptedRng::from_fractions(&[0.25, 0.25, 0.75, 0.5, 0.5, 0.375]);
    let result = local_sweep(&mut cfg, &qho(), &path, -1.0, &mut rng);

    assert_eq!(cfg.as_slice(), &[0.5, 0.0, 0.0, 0.25]);
    assert_eq!(result.acceptance_rate(), 0.75);
    assert_eq!(rng.remaining(), 0);

    // A frozen lattice sweep still attempts every site
    let mut field = Configuration::lattice(3, 3).unwrap();
    let stats = LocalMetropolis::field(Potential::Phi4 { mass_sq: 1.0, lambda: 1.0 }, -0.0)
        .sweep(&mut field, &mut Pcg64::seed_from_u64(3));
    assert_eq!(stats, SweepResult { accepted: 9, attempts: 9 });
    assert!(field.as_slice().iter().all(|&x| x == 0.0));
}
