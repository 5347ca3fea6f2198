//! Error-model tests: shape of each simulated outcome and parameter checks.

use electoral_core::{
    ballot::{BallotRow, BallotTable},
    config::SimConfig,
    error::SimError,
    rng::RngBank,
    simulator::{
        ErrorModel, HeavyTailedNationalError, IndependentStateError, NationalError,
        VoteShareSimulator,
    },
};

fn table() -> BallotTable {
    BallotTable::from_rows(vec![
        BallotRow { state: "A".into(), electors: 10, baseline_share: 55.0 },
        BallotRow { state: "B".into(), electors: 5, baseline_share: 45.0 },
        BallotRow { state: "C".into(), electors: 8, baseline_share: 49.5 },
        BallotRow { state: "D".into(), electors: 3, baseline_share: 61.25 },
    ])
    .unwrap()
}

fn shifts(sim: &dyn VoteShareSimulator, table: &BallotTable, seed: u64, index: u64) -> Vec<f64> {
    let mut rng = RngBank::new(seed).for_replication(index);
    let run = sim.simulate(table, &mut rng).unwrap();
    run.outcomes
        .iter()
        .zip(table.records())
        .map(|(o, r)| o.simulated_share - r.baseline_share)
        .collect()
}

/// Every variant yields exactly one outcome per state, in table order,
/// with electors copied through.
#[test]
fn one_outcome_per_state_for_every_variant() {
    let table = table();
    let config = SimConfig::default_test();
    for model in ErrorModel::ALL {
        let sim = model.build(&config).unwrap();
        let mut rng = RngBank::new(5).for_replication(0);
        let run = sim.simulate(&table, &mut rng).unwrap();

        assert_eq!(run.outcomes.len(), table.len(), "{}", sim.name());
        for (o, r) in run.outcomes.iter().zip(table.records()) {
            assert_eq!(o.state_id, r.state_id);
            assert_eq!(o.electors, r.electors);
            assert!(o.simulated_share.is_finite());
        }
    }
}

/// The national variant applies one shift to every state within a
/// replication, and the shift changes between replications.
#[test]
fn national_error_is_shared_within_replication() {
    let table = table();
    let sim = NationalError::new(2.0).unwrap();

    let first = shifts(&sim, &table, 2024, 0);
    for d in &first {
        assert!((d - first[0]).abs() < 1e-9, "shifts differ within replication: {first:?}");
    }

    let second = shifts(&sim, &table, 2024, 1);
    assert!(
        (second[0] - first[0]).abs() > 1e-12,
        "national error did not vary between replications"
    );

    let mut rng = RngBank::new(2024).for_replication(0);
    let run = sim.simulate(&table, &mut rng).unwrap();
    let recorded = run.national_error.expect("national variant records its error");
    assert!((recorded - first[0]).abs() < 1e-9);
}

#[test]
fn heavy_tailed_error_is_shared_within_replication() {
    let table = table();
    let sim = HeavyTailedNationalError::new(2.0, 2.0).unwrap();
    let d = shifts(&sim, &table, 77, 3);
    assert!(d.iter().all(|x| (x - d[0]).abs() < 1e-9), "{d:?}");
}

/// Independent draws differ from state to state.
#[test]
fn independent_errors_vary_across_states() {
    let table = table();
    let sim = IndependentStateError::new(2.0).unwrap();
    let d = shifts(&sim, &table, 11, 0);
    assert!(d.iter().any(|x| (x - d[0]).abs() > 1e-9), "{d:?}");

    let mut rng = RngBank::new(11).for_replication(0);
    assert_eq!(sim.simulate(&table, &mut rng).unwrap().national_error, None);
}

#[test]
fn zero_sigma_reproduces_baseline() {
    let table = table();
    for sim in [
        Box::new(IndependentStateError::new(0.0).unwrap()) as Box<dyn VoteShareSimulator>,
        Box::new(NationalError::new(0.0).unwrap()),
    ] {
        assert!(shifts(sim.as_ref(), &table, 9, 0).iter().all(|d| *d == 0.0));
    }
}

#[test]
fn simulate_leaves_table_untouched() {
    let table = table();
    let before = table.clone();
    let sim = NationalError::new(2.0).unwrap();
    let mut rng = RngBank::new(1).for_replication(0);
    sim.simulate(&table, &mut rng).unwrap();
    assert_eq!(table, before);
}

#[test]
fn constructors_reject_bad_parameters() {
    assert!(matches!(
        IndependentStateError::new(-1.0),
        Err(SimError::InvalidParameter { name: "sigma", .. })
    ));
    assert!(NationalError::new(f64::NAN).is_err());
    assert!(matches!(
        HeavyTailedNationalError::new(2.0, 0.0),
        Err(SimError::InvalidParameter { name: "df", .. })
    ));
    assert!(matches!(
        HeavyTailedNationalError::new(0.0, 2.0),
        Err(SimError::InvalidParameter { name: "scale", .. })
    ));
}

#[test]
fn default_config_builds_canonical_parameters() {
    let config = SimConfig::default();
    assert_eq!(IndependentStateError::new(config.state_sigma).unwrap().sigma(), 2.0);
    assert_eq!(NationalError::new(config.national_sigma).unwrap().sigma(), 2.0);
    let heavy = HeavyTailedNationalError::new(config.heavy_tail_scale, config.heavy_tail_df).unwrap();
    assert_eq!((heavy.scale(), heavy.df()), (2.0, 2.0));
}

#[test]
fn model_names_round_trip_through_parse() {
    for model in ErrorModel::ALL {
        assert_eq!(ErrorModel::parse(model.name()).unwrap(), model);
        assert_eq!(model.build(&SimConfig::default()).unwrap().name(), model.name());
    }
    assert!(matches!(
        ErrorModel::parse("uniform"),
        Err(SimError::InvalidParameter { name: "variant", .. })
    ));
}
