use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ferrous_injector::*;
use std::sync::Arc;

struct Leaf;

impl Constructible for Leaf {
    fn construct(_: &mut Arguments<'_>) -> DiResult<Self> {
        Ok(Leaf)
    }
}

struct Mid {
    _leaf: Arc<Leaf>,
}

impl Constructible for Mid {
    fn construct(args: &mut Arguments<'_>) -> DiResult<Self> {
        Ok(Mid { _leaf: args.next()? })
    }
}

struct Top {
    _mid: Arc<Mid>,
    _leaf: Arc<Leaf>,
}

impl Constructible for Top {
    fn construct(args: &mut Arguments<'_>) -> DiResult<Self> {
        Ok(Top {
            _mid: args.next()?,
            _leaf: args.next()?,
        })
    }
}

fn metadata() -> InjectableRegistry {
    InjectableRegistry::new()
        .with(Injectable::of::<Leaf>())
        .with(Injectable::of::<Mid>().param::<Leaf>())
        .with(Injectable::of::<Top>().param::<Mid>().param::<Leaf>())
}

fn container(top: Lifetime) -> Container {
    Container::with_metadata(
        [
            Provider::class::<Leaf>(),
            Provider::class::<Mid>(),
            ExplicitProvider::class::<Top>(Token::of::<Top>()).with_lifetime(top).into(),
        ],
        metadata(),
    )
}

// ===== Micro Benchmarks =====

fn bench_value_hit(c: &mut Criterion) {
    let port = Token::new("port");
    let container = Container::create([ExplicitProvider::value(port.clone(), 8080u16)]);
    let _ = container.resolve::<u16>(&port).unwrap();

    c.bench_function("value_hit", |b| {
        b.iter(|| {
            let v = container.resolve::<u16>(&port).unwrap();
            black_box(v);
        })
    });
}

fn bench_singleton_hit(c: &mut Criterion) {
    let container = container(Lifetime::Singleton);
    let _ = container.resolve_class::<Top>().unwrap();

    c.bench_function("singleton_hit", |b| {
        b.iter(|| {
            let v = container.resolve_class::<Top>().unwrap();
            black_box(v);
        })
    });
}

fn bench_singleton_cold(c: &mut Criterion) {
    c.bench_function("singleton_cold", |b| {
        b.iter_batched(
            || container(Lifetime::Singleton),
            |container| {
                let v = container.resolve_class::<Top>().unwrap();
                black_box(v);
            },
            criterion::BatchSize::SmallInput,
        )
    });
}

fn bench_transient(c: &mut Criterion) {
    let container = container(Lifetime::Transient);
    let _ = container.resolve_class::<Top>().unwrap();

    c.bench_function("transient_cached_order", |b| {
        b.iter(|| {
            let v = container.resolve_class::<Top>().unwrap();
            black_box(v);
        })
    });
}

// ===== Scaling =====

fn bench_wide_class(c: &mut Criterion) {
    let mut group = c.benchmark_group("wide_class_cold");

    for depth in [4usize, 16, 64] {
        group.bench_with_input(BenchmarkId::from_parameter(depth), &depth, |b, &depth| {
            b.iter_batched(
                || wide(depth),
                |(container, root)| {
                    black_box(container.resolve_any(&root).unwrap());
                },
                criterion::BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

/// `depth` value bindings plus one class depending on all of them.
fn wide(depth: usize) -> (Container, Token) {
    struct Sink;

    let tokens: Vec<Token> = (0..depth).map(|i| Token::with_id(format!("v{i}"), format!("v{i}"))).collect();
    let mut providers: Vec<Provider> = tokens
        .iter()
        .enumerate()
        .map(|(i, t)| ExplicitProvider::value(t.clone(), i).into())
        .collect();
    let sink = ClassType::from_fn::<Sink, _>(|_| Ok(Sink));
    providers.push(sink.clone().into());

    let declared: Vec<Option<Token>> = tokens.into_iter().map(Some).collect();
    let supplier = move |_: &ClassType| -> Option<Vec<Option<Token>>> { Some(declared.clone()) };
    (Container::with_metadata(providers, supplier), sink.token().clone())
}

fn bench_child_spawn(c: &mut Criterion) {
    let parent = container(Lifetime::Singleton);
    let _ = parent.resolve_class::<Top>().unwrap();
    let greeting = Token::new("greeting");

    c.bench_function("create_child_container", |b| {
        b.iter(|| {
            let child = parent.create_child_container([ExplicitProvider::value(greeting.clone(), "hi")]);
            black_box(child);
        })
    });
}

criterion_group!(
    benches,
    bench_value_hit,
    bench_singleton_hit,
    bench_singleton_cold,
    bench_transient,
    bench_wide_class,
    bench_child_spawn
);
criterion_main!(benches);
