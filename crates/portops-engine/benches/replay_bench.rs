// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use portops_core::time::{Duration, TimeWindow};
use portops_engine::{
    allocation::BerthTopology,
    ledger::replay,
    occupancy::occupancy_report,
    stays::reconstruct_stays,
};
use portops_model::{
    generator::{ScenarioGenConfigBuilder, ScenarioGenerator},
    scenario::Scenario,
};
use std::hint::black_box;

const SEED: u64 = 0x5EA_F0A7;

fn scenario() -> Scenario {
    ScenarioGenerator::new(
        ScenarioGenConfigBuilder::new()
            .quays(4)
            .berths_per_quay(8)
            .ships(40)
            .updates(5_000)
            .seed(SEED)
            .build()
            .expect("valid scenario config"),
    )
    .generate()
}

fn bench_replay(c: &mut Criterion) {
    let scenario = scenario();
    let topology = BerthTopology::new(scenario.berths().to_vec()).expect("valid topology");

    c.bench_function("replay_5000_updates", |b| {
        b.iter_batched(
            || scenario.clone(),
            |s| black_box(replay(&s, &topology).expect("replay")),
            BatchSize::LargeInput,
        );
    });

    let replayed = replay(&scenario, &topology).expect("replay");
    let events = replayed.ledger().events();
    let window = TimeWindow::trailing(replayed.as_of(), Duration::from_days(30));

    c.bench_function("occupancy_report_30_days", |b| {
        b.iter(|| black_box(occupancy_report(&topology, events, window)));
    });

    c.bench_function("reconstruct_stays_all_ships", |b| {
        b.iter(|| {
            for ship in replayed.ships() {
                let own: Vec<_> = replayed.ledger().events_for_ship(ship.id()).cloned().collect();
                black_box(reconstruct_stays(&own, replayed.as_of()));
            }
        });
    });
}

criterion_group!(ledger, bench_replay);
criterion_main!(ledger);
