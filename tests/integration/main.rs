use std::collections::HashMap;

use anyhow::Result;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use quickquack::database::*;
use quickquack::{Leaderboard, ScoringConfig, Submission};

fn init_logging() {
    // Enable logging output
    let _ = env_logger::builder().is_test(true).try_init();
}

fn season(nb_maps: usize, nb_players: usize) -> Leaderboard {
    init_logging();
    let mut lb = Leaderboard::new(ScoringConfig::default());
    for i in 1..=nb_maps {
        lb.create_map(&format!("M{}", i));
    }
    for i in 1..=nb_players {
        lb.create_player(&format!("P{}", i));
    }
    lb
}

/// 2 maps, 3 players:
/// - M1: P3 = 9, P1 = 10, P2 = 20
/// - M2: P1 = 10, P2 = 20
fn two_map_season() -> Result<Leaderboard> {
    let mut lb = season(2, 3);
    lb.submit("M1", "P1", 10.0)?;
    lb.submit("M1", "P2", 20.0)?;
    lb.submit("M1", "P3", 9.0)?;
    lb.submit("M2", "P1", 10.0)?;
    lb.submit("M2", "P2", 20.0)?;
    Ok(lb)
}

fn rank(lb: &Leaderboard, map_id: &str, player_id: &str) -> usize {
    lb.record(map_id, player_id).expect("missing record").rank
}

#[test]
fn test_two_map_ranks() -> Result<()> {
    let lb = two_map_season()?;

    assert_eq!(1, rank(&lb, "M1", "P3"));
    assert_eq!(2, rank(&lb, "M1", "P1"));
    assert_eq!(3, rank(&lb, "M1", "P2"));
    assert_eq!(1, rank(&lb, "M2", "P1"));
    assert_eq!(2, rank(&lb, "M2", "P2"));

    assert_eq!(3, lb.metadata().total_participating_players_count);
    assert_eq!(2, lb.metadata().total_map_count);

    let p1 = lb.player("P1").unwrap();
    assert_eq!(2, p1.map_participation_count);
    assert_eq!(Some(1.5), p1.avg_rank);
    assert_eq!(Some(1.5), lb.player_average_rank("P1"));
    Ok(())
}

#[test]
fn test_two_map_maps() -> Result<()> {
    let lb = two_map_season()?;

    let m1 = lb.map("M1").unwrap();
    assert_eq!(3, m1.records_count);
    assert_eq!(Some(9.0), m1.best_time);
    assert_eq!(Some(20.0), m1.worst_time);
    assert_eq!(0.0, m1.attendance_score);

    let m2 = lb.map("M2").unwrap();
    assert_eq!(2, m2.records_count);
    assert_eq!(Some(10.0), m2.best_time);
    assert_eq!(Some(20.0), m2.worst_time);
    assert_eq!(0.5, m2.attendance_score);
    Ok(())
}

#[test]
fn test_two_map_records() -> Result<()> {
    let lb = two_map_season()?;

    let expected = Record {
        time: 10.0,
        rank: 2,
        norm_rank: 9.182,
        confidence_factor: 0.5,
        base_score: 4.591,
        attendance_score: 0.0,
        map_score: 4.591,
    };
    assert_eq!(Some(&expected), lb.record("M1", "P1"));

    let expected = Record {
        time: 9.0,
        rank: 1,
        norm_rank: 10.0,
        confidence_factor: 1.0,
        base_score: 10.0,
        attendance_score: 0.0,
        map_score: 10.0,
    };
    assert_eq!(Some(&expected), lb.record("M1", "P3"));

    let expected = Record {
        time: 10.0,
        rank: 1,
        norm_rank: 10.0,
        confidence_factor: 0.5,
        base_score: 5.0,
        attendance_score: 0.5,
        map_score: 5.5,
    };
    assert_eq!(Some(&expected), lb.record("M2", "P1"));

    // last place on both maps
    for map_id in &["M1", "M2"] {
        let rec = lb.record(map_id, "P2").unwrap();
        assert_eq!(1.0, rec.norm_rank);
        assert_eq!(0.0, rec.confidence_factor);
        assert_eq!(0.0, rec.base_score);
    }
    assert_eq!(None, lb.record("M2", "P3"));
    Ok(())
}

#[test]
fn test_two_map_season_ranking() -> Result<()> {
    let lb = two_map_season()?;
    assert_eq!(1, lb.min_participation());

    let p1 = lb.player("P1").unwrap();
    assert_eq!(Some(9.591), p1.avg_norm_rank);
    assert_eq!(Some(0.5), p1.avg_confidence_factor);
    assert_eq!(Some(0.25), p1.avg_attendance_score);
    assert_eq!(Some(5.5), p1.avg_map_score);
    assert_eq!(Some(5.5), p1.final_score);

    let ranking: Vec<(usize, String, f64)> = lb
        .season_ranking()
        .into_iter()
        .map(|r| (r.pos, r.player_id, r.final_score))
        .collect();
    assert_eq!(
        vec![
            (1, "P3".to_string(), 10.0),
            (2, "P1".to_string(), 5.5),
            (3, "P2".to_string(), 0.5),
        ],
        ranking
    );
    Ok(())
}

#[test]
fn test_new_player_reweights_every_map() -> Result<()> {
    let mut lb = two_map_season()?;
    lb.create_player("P4");
    lb.create_map("M3");

    // P4 never touches M1 or M2, but changes how many players
    // those records could have beaten.
    lb.submit("M3", "P4", 50.0)?;

    assert_eq!(4, lb.metadata().total_participating_players_count);
    assert_eq!(0.333, lb.map("M1").unwrap().attendance_score);
    assert_eq!(0.667, lb.map("M2").unwrap().attendance_score);
    assert_eq!(1.0, lb.map("M3").unwrap().attendance_score);

    let rec = lb.record("M1", "P3").unwrap();
    assert_eq!(0.667, rec.confidence_factor);
    assert_eq!(6.67, rec.base_score);
    assert_eq!(0.333, rec.attendance_score);
    assert_eq!(7.003, rec.map_score);

    // K = 2 of 3 maps
    assert_eq!(2, lb.min_participation());
    assert_eq!(Some(0.0), lb.player("P3").unwrap().final_score);
    assert_eq!(Some(0.0), lb.player("P4").unwrap().final_score);
    assert!(lb.player("P1").unwrap().final_score.unwrap() > 0.0);
    Ok(())
}

#[test]
fn test_ignored_submission_changes_nothing() -> Result<()> {
    let mut lb = two_map_season()?;
    let before = lb.export_state();

    assert_eq!(Submission::Ignored, lb.submit("M1", "P1", 10.0)?);
    assert_eq!(Submission::Ignored, lb.submit("M1", "P1", 10.5)?);
    assert_eq!(Submission::Ignored, lb.submit("M2", "P2", 99.0)?);

    assert_eq!(before, lb.export_state());
    Ok(())
}

#[test]
fn test_failed_submission_changes_nothing() -> Result<()> {
    let mut lb = two_map_season()?;
    let before = lb.export_state();

    assert_eq!(
        Err(SubmitError::UnknownMap("M3".to_string())),
        lb.submit("M3", "P1", 1.0)
    );
    assert_eq!(
        Err(SubmitError::UnknownPlayer("P4".to_string())),
        lb.submit("M1", "P4", 1.0)
    );

    assert_eq!(before, lb.export_state());
    Ok(())
}

#[test]
fn test_personal_best_is_minimum() -> Result<()> {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let mut lb = season(3, 5);
    let mut best = HashMap::<(String, String), f64>::new();

    for _ in 0..200 {
        let map_id = format!("M{}", rng.gen_range(1..=3));
        let player_id = format!("P{}", rng.gen_range(1..=5));
        let time: f64 = rng.gen_range(1.0..100.0);
        lb.submit(&map_id, &player_id, time)?;

        let entry = best.entry((map_id, player_id)).or_insert(time);
        *entry = entry.min(time);
    }

    for ((map_id, player_id), time) in best.iter() {
        assert_eq!(*time, lb.record(map_id, player_id).unwrap().time);
    }
    Ok(())
}

#[test]
fn test_ranks_are_permutation() -> Result<()> {
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    let mut lb = season(4, 9);

    for _ in 0..150 {
        let map_id = format!("M{}", rng.gen_range(1..=4));
        let player_id = format!("P{}", rng.gen_range(1..=9));
        // coarse times to provoke ties
        let time = rng.gen_range(1..=6) as f64;
        lb.submit(&map_id, &player_id, time)?;
    }

    let map_ids: Vec<String> = lb.map_ids().map(String::from).collect();
    for map_id in map_ids.iter() {
        let map = lb.map(map_id).unwrap();
        let ranking = lb.map_ranking(map_id);
        assert_eq!(map.records_count, ranking.len());

        let mut ranks: Vec<usize> = ranking.iter().map(|(_, rec)| rec.rank).collect();
        ranks.sort_unstable();
        let expected: Vec<usize> = (1..=map.records_count).collect();
        assert_eq!(expected, ranks);

        if let (Some((_, best)), Some((_, worst))) = (ranking.first(), ranking.last()) {
            assert_eq!(map.best_time, Some(best.time));
            assert_eq!(map.worst_time, Some(worst.time));
        }
    }
    Ok(())
}

#[test]
fn test_submission_order_does_not_matter() -> Result<()> {
    let mut rng = ChaCha8Rng::seed_from_u64(3);

    // Distinct times: ties would be broken by submission order.
    let mut times: Vec<f64> = (1..=400).map(|t| t as f64 / 4.0).collect();
    times.shuffle(&mut rng);

    let mut submissions = Vec::new();
    for map in 1..=4 {
        for player in 1..=8 {
            if rng.gen_bool(0.3) {
                continue;
            }
            for _ in 0..rng.gen_range(1..=3) {
                let time = times.pop().unwrap();
                submissions.push((format!("M{}", map), format!("P{}", player), time));
            }
        }
    }

    let apply = |submissions: &[(String, String, f64)]| -> Result<Snapshot> {
        let mut lb = season(4, 8);
        for (map_id, player_id, time) in submissions {
            lb.submit(map_id, player_id, *time)?;
        }
        Ok(lb.export_state())
    };

    let expected = apply(&submissions)?;
    for _ in 0..5 {
        submissions.shuffle(&mut rng);
        assert_eq!(expected, apply(&submissions)?);
    }
    Ok(())
}

#[test]
fn test_final_score_requires_min_participation() -> Result<()> {
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let mut lb = season(6, 10);

    for _ in 0..40 {
        let map_id = format!("M{}", rng.gen_range(1..=6));
        let player_id = format!("P{}", rng.gen_range(1..=10));
        lb.submit(&map_id, &player_id, rng.gen_range(1.0..100.0))?;
    }

    let k = lb.min_participation();
    assert_eq!(3, k);

    let player_ids: Vec<String> = lb.player_ids().map(String::from).collect();
    for player_id in player_ids.iter() {
        let player = lb.player(player_id).unwrap();
        assert_eq!(
            lb.player_records(player_id).len(),
            player.map_participation_count
        );
        if player.map_participation_count == 0 {
            assert_eq!(None, player.final_score);
        } else if player.map_participation_count < k {
            assert_eq!(Some(0.0), player.final_score);
        } else {
            assert_eq!(player.avg_map_score, player.final_score);
        }
    }
    Ok(())
}

#[test]
fn test_export_schema() -> Result<()> {
    let lb = two_map_season()?;
    let json = serde_json::to_value(lb.export_state())?;

    assert_eq!(3, json["metadata"]["total_participating_players_count"]);
    assert_eq!(2, json["metadata"]["total_map_count"]);
    assert_eq!(9.0, json["maps"]["M1"]["best_time"]);
    assert_eq!(3, json["maps"]["M1"]["records_count"]);
    assert_eq!(2, json["players"]["P1"]["map_participation_count"]);
    assert_eq!(1.5, json["players"]["P1"]["avg_rank"]);
    assert_eq!(1, json["records"]["M1"]["P3"]["rank"]);
    assert_eq!(5.5, json["records"]["M2"]["P1"]["map_score"]);

    let fresh = season(1, 1).export_state();
    let json = serde_json::to_value(fresh)?;
    assert!(json["maps"]["M1"]["best_time"].is_null());
    assert!(json["players"]["P1"]["final_score"].is_null());
    Ok(())
}

#[test]
fn test_import_state() -> Result<()> {
    let exported = two_map_season()?.export_state();
    let json = serde_json::to_string(&exported)?;

    let mut lb = Leaderboard::new(ScoringConfig::default());
    lb.import_state(serde_json::from_str(&json)?);
    assert_eq!(exported, lb.export_state());

    // Recomputing an up-to-date season changes nothing.
    lb.recompute();
    assert_eq!(exported, lb.export_state());

    // The imported season keeps accepting submissions.
    lb.submit("M2", "P3", 5.0)?;
    assert_eq!(1, rank(&lb, "M2", "P3"));
    assert_eq!(3, lb.map("M2").unwrap().records_count);
    Ok(())
}

#[test]
fn test_import_replaces_state_verbatim() -> Result<()> {
    let mut lb = two_map_season()?;
    let mut stale = lb.export_state();
    stale.records.get_mut("M1").unwrap().get_mut("P1").unwrap().rank = 42;

    lb.import_state(stale.clone());
    assert_eq!(stale, lb.export_state());

    lb.recompute();
    assert_eq!(2, rank(&lb, "M1", "P1"));
    Ok(())
}
