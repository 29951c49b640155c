//! Benchmark of action discovery and resolution on a busy pitch
//!
//! Run with: cargo bench --bench resolve_benchmark

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::time::Duration;

use dicebowl_core::actions::core::registry::ActionRegistry;
use dicebowl_core::dice::RandomDice;
use dicebowl_core::model::ball::Ball;
use dicebowl_core::model::enums::{ActionType, TeamSide};
use dicebowl_core::model::game::GameState;
use dicebowl_core::model::player::Player;
use dicebowl_core::model::position::Square;

/// Two lines of scrimmage with the home side carrying the ball in the middle
fn create_scrimmage() -> GameState {
    let mut state = GameState::default();
    for (index, y) in (2..13).enumerate() {
        state.add_player(Player {
            player_id: format!("home_{index}"),
            side: TeamSide::Home,
            position: Some(Square::new(12, y)),
            ..Default::default()
        });
        state.add_player(Player {
            player_id: format!("away_{index}"),
            side: TeamSide::Away,
            position: Some(Square::new(13, y)),
            ..Default::default()
        });
    }
    state.ball = Ball::Carried {
        position: Square::new(12, 7),
        carrier: "home_5".to_string(),
    };
    state
}

fn benchmark_discovery(c: &mut Criterion) {
    let registry = ActionRegistry::new();
    let state = create_scrimmage();

    let mut group = c.benchmark_group("discovery");
    group.throughput(Throughput::Elements(1));
    group.measurement_time(Duration::from_secs(5));

    group.bench_function("available_actions", |b| {
        b.iter(|| black_box(registry.available_actions(black_box(&state))))
    });
    group.finish();
}

fn benchmark_resolution(c: &mut Criterion) {
    let registry = ActionRegistry::new();
    let state = create_scrimmage();
    let actions = registry.available_actions(&state);

    let mut group = c.benchmark_group("resolution");
    group.throughput(Throughput::Elements(1));
    group.measurement_time(Duration::from_secs(5));

    for kind in [ActionType::Move, ActionType::Block, ActionType::Blitz, ActionType::Pass] {
        let Some(action) = actions.iter().find(|action| action.action_type() == kind) else {
            eprintln!("Warning: no {kind:?} available on the scrimmage, skipping");
            continue;
        };
        group.bench_with_input(BenchmarkId::new("resolve", format!("{kind:?}")), action, |b, action| {
            let mut dice = RandomDice::with_seed(7);
            b.iter(|| black_box(registry.resolve(black_box(&state), action, &mut dice)))
        });
    }
    group.finish();
}

fn init_tracing(_: &mut Criterion) {
    // RUST_LOG=dicebowl_core=trace shows every roll
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .try_init();
}

criterion_group!(benches, init_tracing, benchmark_discovery, benchmark_resolution);
criterion_main!(benches);
