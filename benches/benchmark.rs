use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use league_sim::{
    championship_odds, generate_schedule, simulate_playoffs, win_chance, League, SimConfig, Team,
    TeamId,
};

fn create_32_team_league() -> League {
    let divisions = ["Atlantic", "Metropolitan", "Central", "Pacific"];
    let teams = (0..32)
        .map(|i| {
            let rating = 60.0 + (i as f64 % 16.0) * 2.5;
            Team::new(TeamId::new(format!("Team{}", i), "2024"), rating, divisions[i % 4])
        })
        .collect();
    League::new(teams, SimConfig::default()).expect("valid league")
}

fn bench_win_chance(c: &mut Criterion) {
    c.bench_function("win_chance", |b| {
        b.iter(|| win_chance(black_box(91.0), black_box(78.5)))
    });
}

fn bench_schedule(c: &mut Criterion) {
    let league = create_32_team_league();
    let ids = league.team_ids();

    c.bench_function("schedule_32_teams_82_games", |b| {
        b.iter(|| generate_schedule(black_box(&ids), 82))
    });
}

fn bench_season(c: &mut Criterion) {
    let league = create_32_team_league();

    c.bench_function("season_32_teams", |b| {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        b.iter(|| black_box(&league).simulate_season(&mut rng))
    });
}

fn bench_playoffs(c: &mut Criterion) {
    let league = create_32_team_league();
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let season = league.simulate_season(&mut rng).expect("season");

    c.bench_function("playoffs_16_teams", |b| {
        b.iter(|| {
            simulate_playoffs(
                black_box(&season.standings),
                league.ratings(),
                league.config(),
                &mut rng,
            )
        })
    });
}

fn bench_odds(c: &mut Criterion) {
    let league = create_32_team_league();

    c.bench_function("championship_odds_100_sims", |b| {
        b.iter(|| championship_odds(black_box(&league), 100, Some(42)))
    });
}

criterion_group!(
    benches,
    bench_win_chance,
    bench_schedule,
    bench_season,
    bench_playoffs,
    bench_odds,
);
criterion_main!(benches);
