//! Stepper tests: clock, phase ordering, agent registration, config.

use zoonosis_core::{
    animal::AnimalPresence,
    config::SimConfig,
    engine::Simulation,
    error::SimError,
    event::SimEvent,
    human::Human,
    motion::{NoisyInterpolation, Stationary},
    types::{HealthStatus, Location, ReportSchedule, Trajectory},
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn at(points: &[(u64, f64, f64)]) -> Trajectory {
    points.iter().map(|&(t, x, y)| (t, Location::new(x, y))).collect()
}

#[test]
fn clock_starts_at_zero_and_advances_per_step() {
    init_logging();
    let mut sim = Simulation::new(SimConfig::default(), 1).unwrap();
    assert_eq!(sim.current_tick(), 0);

    let events = sim.step().unwrap();
    assert_eq!(events.last(), Some(&SimEvent::TickCompleted { tick: 0 }));
    assert_eq!(sim.current_tick(), 1);

    sim.run_ticks(4).unwrap();
    assert_eq!(sim.current_tick(), 5);

    sim.run_until(9).unwrap();
    assert_eq!(sim.current_tick(), 10);
}

#[test]
fn trajectory_entries_are_applied_exactly() {
    init_logging();
    let mut sim = Simulation::new(SimConfig::default(), 2)
        .unwrap()
        .with_human_motion(NoisyInterpolation { max_noise: 0.0 });
    sim.add_agent(Human::new(0, at(&[(0, 0.0, 0.0), (4, 40.0, 80.0)]), ReportSchedule::new()).unwrap())
        .unwrap();

    sim.run_ticks(3).unwrap();
    let mid = sim.human(0).unwrap().location();
    assert!((mid.x - 20.0).abs() < 1e-9 && (mid.y - 40.0).abs() < 1e-9, "mid={mid:?}");

    sim.step().unwrap();
    sim.step().unwrap();
    assert_eq!(sim.human(0).unwrap().location(), Location::new(40.0, 80.0));
}

/// The animal reaches the human at tick 3 on its migration pattern. The
/// human is registered first, yet sees the animal's tick-3 position on
/// tick 3 because every move finishes before any update.
#[test]
fn updates_see_post_move_positions() {
    init_logging();
    let mut sim = Simulation::new(SimConfig::default(), 3)
        .unwrap()
        .with_human_motion(Stationary)
        .with_animal_motion(Stationary);
    sim.add_agent(Human::new(0, at(&[(0, 0.0, 0.0)]), ReportSchedule::new()).unwrap()).unwrap();
    sim.add_agent(AnimalPresence::new(0, at(&[(0, 500.0, 0.0), (3, 0.0, 0.0)]), 10.0, 0.5).unwrap())
        .unwrap();

    sim.run_ticks(3).unwrap();
    assert_eq!(sim.human(0).unwrap().hazard().experienced_animal_hazard, 0.0);

    sim.step().unwrap();
    assert_eq!(sim.human(0).unwrap().hazard().experienced_animal_hazard, 0.5);
}

#[test]
fn self_reports_drive_status() {
    init_logging();
    let mut sim = Simulation::new(SimConfig::default(), 4).unwrap().with_human_motion(Stationary);
    let reports: ReportSchedule =
        [(2, HealthStatus::Sick), (5, HealthStatus::Healthy), (8, HealthStatus::Sick)].into_iter().collect();
    sim.add_agent(Human::new(0, at(&[(0, 0.0, 0.0)]), reports).unwrap()).unwrap();

    let events = sim.run_ticks(10).unwrap();

    let human = sim.human(0).unwrap();
    assert_eq!(human.status(), HealthStatus::Sick);
    let spans: Vec<(u64, Option<u64>)> =
        human.sickness_records().iter().map(|r| (r.start_tick, r.end_tick)).collect();
    assert_eq!(spans, vec![(2, Some(5)), (8, None)]);

    let onsets = events.iter().filter(|e| matches!(e, SimEvent::IllnessOnset { .. })).count();
    let recoveries = events.iter().filter(|e| matches!(e, SimEvent::Recovered { .. })).count();
    assert_eq!((onsets, recoveries), (2, 1));
}

#[test]
fn without_spread_exposure_alone_never_sickens() {
    init_logging();
    let mut sim = Simulation::new(SimConfig::default(), 5).unwrap().with_human_motion(Stationary);
    sim.add_agent(Human::new(0, at(&[(0, 0.0, 0.0)]), ReportSchedule::new()).unwrap()).unwrap();
    sim.add_agent(AnimalPresence::new(0, at(&[(0, 0.0, 0.0)]), 10.0, 5.0).unwrap()).unwrap();

    sim.run_ticks(200).unwrap();
    assert_eq!(sim.human(0).unwrap().status(), HealthStatus::Healthy);
    assert!(sim.human(0).unwrap().sickness_records().is_empty());
}

#[test]
fn spread_can_sicken_a_heavily_exposed_human() {
    init_logging();
    let config = SimConfig { simulate_spread: true, ..SimConfig::default() };
    let mut sim = Simulation::new(config, 6).unwrap().with_human_motion(Stationary);
    sim.add_agent(Human::new(0, at(&[(0, 0.0, 0.0)]), ReportSchedule::new()).unwrap()).unwrap();
    sim.add_agent(AnimalPresence::new(0, at(&[(0, 0.0, 0.0)]), 10.0, 5.0).unwrap()).unwrap();

    // Exposure of 5.0 gives p = 1 - e^-5 > 0.99 on the very first tick.
    sim.run_ticks(20).unwrap();
    let human = sim.human(0).unwrap();
    assert_eq!(human.status(), HealthStatus::Sick);
    let record = human.current_sickness().unwrap();
    assert_eq!(record.source, zoonosis_core::sickness::OnsetSource::SimulatedSpread);
    assert!(record.p_zoonotic > 0.0);
}

#[test]
fn duplicate_ids_are_rejected_per_kind() {
    init_logging();
    let mut sim = Simulation::new(SimConfig::default(), 7).unwrap();
    sim.add_agent(Human::new(1, at(&[(0, 0.0, 0.0)]), ReportSchedule::new()).unwrap()).unwrap();
    // Animal ids live in their own space.
    sim.add_agent(AnimalPresence::new(1, at(&[(0, 0.0, 0.0)]), 1.0, 0.1).unwrap()).unwrap();

    let err = sim
        .add_agent(Human::new(1, at(&[(0, 9.0, 9.0)]), ReportSchedule::new()).unwrap())
        .unwrap_err();
    assert!(matches!(err, SimError::DuplicateAgent { id: 1, kind: "human" }));
    assert!(err.is_usage_error());
    assert_eq!(sim.humans().len(), 1);
    assert_eq!(sim.animals().len(), 1);
}

#[test]
fn invalid_config_is_rejected() {
    let config = SimConfig { lambda_human: 0.0, ..SimConfig::default() };
    let err = Simulation::new(config, 8).err().expect("config must be rejected");
    assert!(matches!(err, SimError::InvalidConfig { field: "lambda_human", .. }));
}

#[test]
fn summary_logging_does_not_disturb_state() {
    init_logging();
    let mut sim = Simulation::new(SimConfig::default(), 9).unwrap();
    let reports: ReportSchedule = [(1, HealthStatus::Sick)].into_iter().collect();
    sim.add_agent(Human::new(0, at(&[(0, 0.0, 0.0)]), reports).unwrap()).unwrap();
    sim.run_ticks(3).unwrap();

    let before = sim.human(0).unwrap().sickness_records().to_vec();
    sim.log_summary();
    assert_eq!(sim.human(0).unwrap().sickness_records(), before.as_slice());
}

type HumanState = (
    u32,
    Location,
    HealthStatus,
    zoonosis_core::hazard::HazardModel,
    Vec<zoonosis_core::sickness::SicknessRecord>,
    zoonosis_core::contact::ContactNetwork,
);

fn state_by_id(sim: &Simulation) -> Vec<HumanState> {
    let mut state: Vec<HumanState> = sim
        .humans()
        .iter()
        .map(|h| {
            (h.id(), h.location(), h.status(), *h.hazard(), h.sickness_records().to_vec(), h.contact_network().clone())
        })
        .collect();
    state.sort_by_key(|s| s.0);
    state
}

/// Subject sick from tick 1; the partner drops by on tick 2 and reports
/// sick on tick 5. `reversed` registers the partner first.
fn visit_then_report(reversed: bool) -> Simulation {
    let mut sim = Simulation::new(SimConfig::default(), 12).unwrap().with_human_motion(Stationary);
    let subject = Human::new(
        0,
        at(&[(0, 0.0, 0.0)]),
        [(1, HealthStatus::Sick)].into_iter().collect(),
    )
    .unwrap();
    let partner = Human::new(
        1,
        at(&[(0, 1000.0, 0.0), (2, 10.0, 0.0), (3, 1000.0, 0.0)]),
        [(5, HealthStatus::Sick)].into_iter().collect(),
    )
    .unwrap();
    let mut roster = vec![subject, partner];
    if reversed {
        roster.reverse();
    }
    for human in roster {
        sim.add_agent(human).unwrap();
    }
    sim
}

#[test]
fn registration_order_does_not_change_results() {
    init_logging();
    let mut forward = visit_then_report(false);
    let mut reversed = visit_then_report(true);

    forward.run_until(5).unwrap();
    reversed.run_until(5).unwrap();
    for sim in [&forward, &reversed] {
        // The partner's record opens during tick 5 and is visible from tick 6.
        assert_eq!(sim.human(0).unwrap().current_sickness().unwrap().secondary_cases, 0);
    }
    assert_eq!(state_by_id(&forward), state_by_id(&reversed));

    forward.run_until(12).unwrap();
    reversed.run_until(12).unwrap();
    assert_eq!(forward.human(0).unwrap().current_sickness().unwrap().secondary_cases, 1);
    assert_eq!(state_by_id(&forward), state_by_id(&reversed));
}

/// Human 0 stands on a potent animal and is infected by spread on tick 0.
/// Human 1 is in contact with 0 but outside the animal's radius.
fn spread_neighbours(reversed: bool) -> Simulation {
    let config = SimConfig { simulate_spread: true, ..SimConfig::default() };
    let mut sim = Simulation::new(config, 13).unwrap().with_human_motion(Stationary);
    let mut roster = vec![
        Human::new(0, at(&[(0, 0.0, 0.0)]), ReportSchedule::new()).unwrap(),
        Human::new(1, at(&[(0, 10.0, 0.0)]), ReportSchedule::new()).unwrap(),
    ];
    if reversed {
        roster.reverse();
    }
    for human in roster {
        sim.add_agent(human).unwrap();
    }
    sim.add_agent(AnimalPresence::new(0, at(&[(0, 0.0, 0.0)]), 3.0, 50.0).unwrap()).unwrap();
    sim
}

#[test]
fn spread_flip_is_seen_on_the_next_tick_in_any_order() {
    init_logging();
    let sick_output = SimConfig::default().sick_output_hazard;
    for reversed in [false, true] {
        let mut sim = spread_neighbours(reversed);

        sim.step().unwrap();
        let infected = sim.human(0).unwrap();
        assert_eq!(infected.status(), HealthStatus::Sick, "reversed={reversed}");
        let neighbour = sim.human(1).unwrap();
        let contact = &neighbour.active_contacts()[&0];
        assert_eq!(contact.other_status, HealthStatus::Healthy, "reversed={reversed}");
        assert_eq!(neighbour.hazard().experienced_human_hazard, 0.0, "reversed={reversed}");

        sim.step().unwrap();
        let neighbour = sim.human(1).unwrap();
        assert_eq!(neighbour.hazard().experienced_human_hazard, sick_output, "reversed={reversed}");
        assert_eq!(sim.human(0).unwrap().hazard().experienced_human_hazard, 0.0, "reversed={reversed}");
    }
}
