use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use wiezen_core::{GameLedger, RoundCatalog, RoundResult, RoundRule, Seat, Snapshot};

fn random_result(rng: &mut StdRng, rule: &RoundRule, valid: bool) -> RoundResult {
    let mut seats = Seat::LOOP.to_vec();
    seats.shuffle(rng);
    let mut count = usize::from(rule.attackers());
    let mut tricks = rng.gen_range(0..=13u8);
    if !valid {
        if rng.gen_bool(0.5) {
            count = if count == 1 { 2 } else { 1 };
        } else {
            tricks = rng.gen_range(14..=40u8);
        }
    }
    seats.truncate(count);
    RoundResult::new(seats, tricks)
}

fn assert_lockstep(ledger: &GameLedger) {
    for player in ledger.players() {
        assert_eq!(player.history().len(), ledger.round_count());
    }
}

fn column_sum(ledger: &GameLedger, round: usize) -> i32 {
    ledger
        .players()
        .iter()
        .map(|player| player.history()[round])
        .sum()
}

#[test]
fn seeded_games_keep_histories_consistent() {
    let catalog = RoundCatalog::standard();
    let rules: Vec<&RoundRule> = catalog.iter().collect();

    for seed in 0..32u64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut ledger = GameLedger::new();
        let mut committed = 0usize;

        for _ in 0..60 {
            let rule = *rules.choose(&mut rng).expect("catalog is not empty");
            let before = ledger.snapshot();
            let sub_rounds = if rule.is_simultaneous() {
                rng.gen_range(1..=3)
            } else {
                1
            };
            let poison = rng.gen_bool(0.2).then(|| rng.gen_range(0..sub_rounds));
            let results: Vec<RoundResult> = (0..sub_rounds)
                .map(|i| random_result(&mut rng, rule, poison != Some(i)))
                .collect();

            match ledger.add_round(rule, &results) {
                Ok(deltas) => {
                    assert!(poison.is_none(), "seed {seed}: invalid input accepted");
                    committed += 1;
                    assert_eq!(deltas.iter().sum::<i32>(), 0);
                    assert_eq!(ledger.round_count(), before.rounds.len() + 1);
                    assert_eq!(column_sum(&ledger, ledger.round_count() - 1), 0);
                }
                Err(err) => {
                    assert!(poison.is_some(), "seed {seed}: valid input rejected: {err}");
                    assert_eq!(ledger.snapshot(), before);
                }
            }

            assert_lockstep(&ledger);
            assert_eq!(ledger.dealer().index(), committed % 4);

            if rng.gen_bool(0.1) {
                let snapshot = ledger.snapshot();
                let label = ledger.remove_last_round();
                assert_eq!(label.is_some(), !snapshot.rounds.is_empty());
                assert_lockstep(&ledger);
                if let Some(label) = label {
                    assert_eq!(snapshot.rounds.last(), Some(&label));
                }
            }
        }

        assert_eq!(ledger.totals().iter().sum::<i32>(), 0);
    }
}

#[test]
fn add_then_remove_restores_every_rule() {
    let catalog = RoundCatalog::standard();
    let mut rng = StdRng::seed_from_u64(7);
    let mut ledger = GameLedger::new();

    for rule in catalog.iter() {
        ledger
            .add_round(rule, &[random_result(&mut rng, rule, true)])
            .expect("valid round");
    }

    for rule in catalog.iter() {
        let before = ledger.snapshot();
        let results: Vec<RoundResult> = (0..if rule.is_simultaneous() { 3 } else { 1 })
            .map(|_| random_result(&mut rng, rule, true))
            .collect();
        ledger.add_round(rule, &results).expect("valid round");
        ledger.remove_last_round().expect("round to remove");

        let after = ledger.snapshot();
        assert_eq!(after.players, before.players, "{}", rule.name());
        assert_eq!(after.rounds, before.rounds, "{}", rule.name());
    }
}

#[test]
fn simultaneous_miserie_scenario() {
    let catalog = RoundCatalog::standard();
    let rule = catalog.get("Miserie").expect("miserie in catalog");
    let mut ledger = GameLedger::new();

    let deltas = ledger
        .add_round(
            rule,
            &[
                RoundResult::solo(Seat::South, 0),
                RoundResult::solo(Seat::West, 1),
            ],
        )
        .expect("both results are valid");

    assert_eq!(ledger.rounds(), ["Miserie × 2"]);
    assert_eq!(deltas, [0, 0, 28, -28]);
    assert_eq!(ledger.dealer(), Seat::East);

    let json = Snapshot::to_json(&ledger).expect("encode");
    let restored = Snapshot::from_json(&json)
        .expect("decode")
        .restore()
        .expect("valid snapshot");
    assert_eq!(restored.snapshot(), ledger.snapshot());
}
