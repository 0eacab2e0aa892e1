use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use sandfall_core::simulation::{BehaviorDef, ElementDefinition, ElementDefinitions, Role};
use sandfall_core::world::{GridDims, World};

fn bench_definitions() -> ElementDefinitions {
    ElementDefinitions {
        elements: vec![
            ElementDefinition::new("air")
                .with_role(Role::Air)
                .with_behavior(BehaviorDef::Air),
            ElementDefinition::new("wall").with_role(Role::Wall),
            ElementDefinition::new("sand")
                .with_density(2.0)
                .with_behavior(BehaviorDef::MovableSolid),
            ElementDefinition::new("water")
                .with_density(1.0)
                .with_behavior(BehaviorDef::Liquid),
            ElementDefinition::new("steam")
                .with_density(0.1)
                .with_behavior(BehaviorDef::Gas { weight: 0.3 }),
        ],
    }
}

fn filled_world(dims: GridDims) -> World {
    let definitions = bench_definitions();
    let mut world = World::new(dims, &definitions, 0xBEEF).expect("valid bench world");
    let (w, h) = (dims.total_width() as i32, dims.total_height() as i32);

    // Stripes of each moving element across the upper half
    for (i, name) in ["sand", "water", "steam"].iter().enumerate() {
        let element = world.registry().id_of(name).expect("bench element");
        for y in (1 + i as i32..h / 2).step_by(3) {
            for x in 1..w - 1 {
                let _ = world.set_cell_type(x, y, element);
            }
        }
    }
    world
}

fn bench_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("world_tick");

    for (name, dims) in [
        ("4x4_chunks_32", GridDims::new(4, 4, 32, 32)),
        ("8x8_chunks_32", GridDims::new(8, 8, 32, 32)),
    ] {
        group.bench_function(name, |b| {
            b.iter_batched(
                || filled_world(dims),
                |mut world| {
                    for _ in 0..8 {
                        world.tick();
                    }
                    world
                },
                BatchSize::LargeInput,
            )
        });
    }

    group.finish();
}

criterion_group!(benches, bench_tick);
criterion_main!(benches);
