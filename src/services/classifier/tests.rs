//! Tests for the DriveClassifier module

use super::*;
use crate::domain::clock::DayClock;
use crate::domain::types::Timestamp;

fn at(hms: &str) -> Timestamp {
    Timestamp::parse(&format!("2023-05-01 {}", hms))
}

fn sample(vehicle: &str, hms: &str, speed: i64) -> Sample {
    Sample::new(at(hms), vehicle, speed)
}

fn classifier() -> DriveClassifier {
    DriveClassifier::with_threshold(SHORT_STOP_THRESHOLD_SECS)
}

fn secs(s: i64) -> DayClock {
    DayClock::from_secs(s)
}

fn run(samples: &[Sample]) -> Vec<DriveSummary> {
    let mut c = classifier();
    c.ingest_all(samples);
    c.finalize()
}

#[test]
fn test_first_sample_accrues_nothing() {
    let mut c = classifier();
    let transition = c.ingest(&sample("truck-1", "10:00:00", 40));

    assert_eq!(transition, Transition::First);
    let state = c.state(&VehicleId::from("truck-1")).unwrap();
    assert_eq!(state.travel_time, DayClock::MIDNIGHT);
    assert_eq!(state.parking_time, DayClock::MIDNIGHT);
    assert_eq!(state.prev_speed, 40);
    assert_eq!(state.prev_timestamp, at("10:00:00"));
}

#[test]
fn test_short_stop_counts_as_travel() {
    let mut c = classifier();
    c.ingest(&sample("truck-1", "00:00:00", 10));
    let stop = c.ingest(&sample("truck-1", "00:01:00", 0));
    let resume = c.ingest(&sample("truck-1", "00:02:30", 10));

    assert_eq!(stop, Transition::Stopped { travel_secs: 60 });
    assert_eq!(resume, Transition::Resumed { gap_secs: 90, parked: false });

    let state = c.state(&VehicleId::from("truck-1")).unwrap();
    assert_eq!(state.travel_time, secs(150));
    assert_eq!(state.parking_time, DayClock::MIDNIGHT);
}

#[test]
fn test_long_stop_counts_as_parking() {
    let mut c = classifier();
    c.ingest(&sample("truck-1", "00:00:00", 10));
    c.ingest(&sample("truck-1", "00:01:00", 0));
    let resume = c.ingest(&sample("truck-1", "00:05:00", 10));

    assert_eq!(resume, Transition::Resumed { gap_secs: 240, parked: true });

    let state = c.state(&VehicleId::from("truck-1")).unwrap();
    assert_eq!(state.travel_time, secs(60));
    assert_eq!(state.parking_time, secs(240));
}

#[test]
fn test_stop_exactly_at_threshold_is_travel() {
    let mut c = classifier();
    c.ingest(&sample("truck-1", "00:00:00", 10));
    c.ingest(&sample("truck-1", "00:01:00", 0));
    let resume = c.ingest(&sample("truck-1", "00:03:00", 10));

    assert_eq!(resume, Transition::Resumed { gap_secs: 120, parked: false });
}

#[test]
fn test_stop_run_measured_from_first_zero_sample() {
    let mut c = classifier();
    c.ingest(&sample("truck-1", "00:00:00", 10));
    c.ingest(&sample("truck-1", "00:01:00", 0));
    assert_eq!(c.ingest(&sample("truck-1", "00:02:00", 0)), Transition::StillStopped);
    assert_eq!(c.ingest(&sample("truck-1", "00:04:00", 0)), Transition::StillStopped);

    let state = c.state(&VehicleId::from("truck-1")).unwrap();
    assert_eq!(state.zero_speed_since, Some(at("00:01:00")));
    assert_eq!(state.prev_timestamp, at("00:04:00"));

    let resume = c.ingest(&sample("truck-1", "00:05:00", 10));
    assert_eq!(resume, Transition::Resumed { gap_secs: 240, parked: true });
}

#[test]
fn test_vehicle_first_seen_stopped() {
    let mut c = classifier();
    c.ingest(&sample("van-2", "08:00:00", 0));
    let resume = c.ingest(&sample("van-2", "08:01:00", 25));

    assert_eq!(resume, Transition::Resumed { gap_secs: 60, parked: false });
    assert_eq!(c.state(&VehicleId::from("van-2")).unwrap().travel_time, secs(60));
}

#[test]
fn test_moving_intervals_accumulate_travel() {
    let mut c = classifier();
    c.ingest(&sample("bus-3", "12:00:00", 30));
    assert_eq!(
        c.ingest(&sample("bus-3", "12:00:45", 50)),
        Transition::StillMoving { travel_secs: 45 }
    );
    c.ingest(&sample("bus-3", "12:10:45", 20));

    assert_eq!(c.state(&VehicleId::from("bus-3")).unwrap().travel_time, secs(645));
}

#[test]
fn test_finalize_assigns_long_remainder_to_parking() {
    let summaries = run(&[
        sample("truck-1", "00:00:00", 10),
        sample("truck-1", "00:01:00", 0),
        sample("truck-1", "00:02:30", 10),
    ]);

    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].travel_time.to_string(), "00:02:30");
    assert_eq!(summaries[0].parking_time.to_string(), "23:57:29");
}

#[test]
fn test_finalize_assigns_short_remainder_to_travel() {
    let summaries = run(&[sample("bus-3", "00:00:00", 30), sample("bus-3", "23:58:30", 30)]);

    assert_eq!(summaries[0].travel_time, DayClock::END_OF_DAY);
    assert_eq!(summaries[0].parking_time, DayClock::MIDNIGHT);
}

#[test]
fn test_single_sample_vehicle_parks_whole_day() {
    let mut c = classifier();
    c.ingest(&sample("van-2", "14:20:00", 15));
    let summaries = c.finalize();

    assert_eq!(summaries[0].travel_time, DayClock::MIDNIGHT);
    assert_eq!(summaries[0].parking_time, DayClock::END_OF_DAY);
}

#[test]
fn test_finalized_totals_fill_reference_day() {
    let summaries = run(&[
        sample("a", "06:00:00", 40),
        sample("b", "07:00:00", 0),
        sample("a", "06:30:00", 0),
        sample("b", "07:01:00", 10),
        sample("a", "09:00:00", 35),
        sample("b", "07:30:00", 0),
        sample("a", "09:00:50", 0),
        sample("a", "09:02:00", 20),
        sample("c", "23:00:00", 0),
    ]);

    assert_eq!(summaries.len(), 3);
    for summary in &summaries {
        assert_eq!(
            summary.travel_time + summary.parking_time,
            DayClock::END_OF_DAY,
            "vehicle {}",
            summary.vehicle_id
        );
    }
}

#[test]
fn test_finalize_sorts_by_vehicle_id() {
    let summaries = run(&[
        sample("zeta", "01:00:00", 10),
        sample("alpha", "01:00:00", 10),
        sample("mike", "01:00:00", 10),
    ]);

    let ids: Vec<&str> = summaries.iter().map(|s| s.vehicle_id.0.as_str()).collect();
    assert_eq!(ids, vec!["alpha", "mike", "zeta"]);
}

#[test]
fn test_same_sequence_gives_same_result() {
    let samples = vec![
        sample("a", "06:00:00", 40),
        sample("a", "06:30:00", 0),
        sample("a", "09:00:00", 35),
        sample("b", "10:00:00", 0),
        sample("b", "10:01:00", 5),
    ];

    assert_eq!(run(&samples), run(&samples));
}

#[test]
fn test_interleaved_vehicles_match_isolated_runs() {
    let a = vec![
        sample("a", "06:00:00", 40),
        sample("a", "06:30:00", 0),
        sample("a", "09:00:00", 35),
        sample("a", "09:00:40", 0),
        sample("a", "09:01:30", 12),
    ];
    let b = vec![
        sample("b", "05:00:00", 0),
        sample("b", "05:10:00", 60),
        sample("b", "05:20:00", 0),
    ];

    let mut interleaved = Vec::new();
    for i in 0..a.len().max(b.len()) {
        interleaved.extend(a.get(i).cloned());
        interleaved.extend(b.get(i).cloned());
    }

    let together = run(&interleaved);
    let mut isolated = run(&a);
    isolated.extend(run(&b));

    assert_eq!(together, isolated);
}

#[test]
fn test_midnight_crossing_wraps_on_time_of_day() {
    let mut c = classifier();
    c.ingest(&Sample::new(Timestamp::parse("2023-05-01 23:59:00"), "night-bus", 30));
    let t = c.ingest(&Sample::new(Timestamp::parse("2023-05-02 00:01:00"), "night-bus", 30));

    assert_eq!(t, Transition::StillMoving { travel_secs: -86_280 });
    assert_eq!(c.state(&VehicleId::from("night-bus")).unwrap().travel_time, secs(120));
}

#[test]
fn test_stop_across_midnight_counts_as_travel() {
    let mut c = classifier();
    c.ingest(&Sample::new(Timestamp::parse("2023-05-01 23:50:00"), "night-bus", 10));
    c.ingest(&Sample::new(Timestamp::parse("2023-05-01 23:59:00"), "night-bus", 0));
    let resume = c.ingest(&Sample::new(Timestamp::parse("2023-05-02 00:30:00"), "night-bus", 10));

    // Negative time-of-day gap never exceeds the threshold, so it wraps into travel
    assert_eq!(resume, Transition::Resumed { gap_secs: -84_540, parked: false });

    let summaries = c.finalize();
    assert_eq!(summaries[0].travel_time.to_string(), "00:40:00");
    assert_eq!(summaries[0].parking_time.to_string(), "23:19:59");
}

#[test]
fn test_same_clock_time_on_next_day_is_zero_elapsed() {
    let mut c = classifier();
    c.ingest(&Sample::new(Timestamp::parse("2023-05-01 10:00:00"), "van-2", 30));
    let t = c.ingest(&Sample::new(Timestamp::parse("2023-05-02 10:00:00"), "van-2", 30));

    assert_eq!(t, Transition::StillMoving { travel_secs: 0 });
}

#[test]
fn test_invalid_timestamp_contributes_nothing() {
    let mut c = classifier();
    c.ingest(&sample("van-2", "10:00:00", 30));
    let t = c.ingest(&Sample::new(Timestamp::INVALID, "van-2", 30));
    assert_eq!(t, Transition::StillMoving { travel_secs: 0 });

    let t = c.ingest(&sample("van-2", "10:05:00", 30));
    assert_eq!(t, Transition::StillMoving { travel_secs: 0 });
    assert_eq!(c.state(&VehicleId::from("van-2")).unwrap().travel_time, DayClock::MIDNIGHT);
}

#[test]
fn test_threshold_from_config() {
    let config = Config::default().with_short_stop_threshold_secs(300);
    let mut c = DriveClassifier::new(&config);
    c.ingest(&sample("truck-1", "00:00:00", 10));
    c.ingest(&sample("truck-1", "00:01:00", 0));
    let resume = c.ingest(&sample("truck-1", "00:05:00", 10));

    assert_eq!(resume, Transition::Resumed { gap_secs: 240, parked: false });
}

#[test]
fn test_vehicle_count() {
    let mut c = classifier();
    assert_eq!(c.vehicle_count(), 0);
    c.ingest(&sample("a", "01:00:00", 0));
    c.ingest(&sample("b", "01:00:00", 0));
    c.ingest(&sample("a", "01:00:10", 0));
    assert_eq!(c.vehicle_count(), 2);
}

#[test]
fn test_transition_names() {
    assert_eq!(Transition::First.as_str(), "first");
    assert_eq!(
        Transition::Resumed { gap_secs: 500, parked: true }.as_str(),
        "resumed_after_parking"
    );
    assert_eq!(
        Transition::Resumed { gap_secs: 30, parked: false }.as_str(),
        "resumed_after_short_stop"
    );
}
