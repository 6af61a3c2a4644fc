use ferrous_injector::{
    Arguments, Constructible, Container, DiError, DiResult, ExplicitProvider, Injectable, InjectableRegistry,
    InjectorOptions, Provider, Resolve, ResolveCore, Token,
};

struct ServiceA;
struct ServiceB;
struct ServiceC;

impl Constructible for ServiceA {
    fn construct(_: &mut Arguments<'_>) -> DiResult<Self> {
        Ok(ServiceA)
    }
}

impl Constructible for ServiceB {
    fn construct(_: &mut Arguments<'_>) -> DiResult<Self> {
        Ok(ServiceB)
    }
}

impl Constructible for ServiceC {
    fn construct(_: &mut Arguments<'_>) -> DiResult<Self> {
        Ok(ServiceC)
    }
}

fn all() -> [Provider; 3] {
    [Provider::class::<ServiceA>(), Provider::class::<ServiceB>(), Provider::class::<ServiceC>()]
}

fn path(names: &[&str]) -> DiError {
    DiError::Circular(names.iter().map(|n| n.to_string()).collect())
}

#[test]
fn test_self_circular_dependency() {
    let container = Container::with_metadata(
        [Provider::class::<ServiceA>()],
        InjectableRegistry::new().with(Injectable::of::<ServiceA>().param::<ServiceA>()),
    );

    let err = container.resolve_class::<ServiceA>().err().unwrap();
    assert_eq!(err, path(&["ServiceA", "ServiceA"]));
}

#[test]
fn test_two_service_cycle() {
    let container = Container::with_metadata(
        all(),
        InjectableRegistry::new()
            .with(Injectable::of::<ServiceA>().param::<ServiceB>())
            .with(Injectable::of::<ServiceB>().param::<ServiceA>()),
    );

    assert_eq!(
        container.resolve_class::<ServiceA>().err(),
        Some(path(&["ServiceA", "ServiceB", "ServiceA"]))
    );
    assert_eq!(
        container.resolve_class::<ServiceB>().err(),
        Some(path(&["ServiceB", "ServiceA", "ServiceB"]))
    );
}

#[test]
fn test_cycle_below_the_requested_token() {
    let container = Container::with_metadata(
        all(),
        InjectableRegistry::new()
            .with(Injectable::of::<ServiceA>().param::<ServiceB>())
            .with(Injectable::of::<ServiceB>().param::<ServiceC>())
            .with(Injectable::of::<ServiceC>().param::<ServiceB>()),
    );

    let err = container.resolve_class::<ServiceA>().err().unwrap();
    assert_eq!(err, path(&["ServiceB", "ServiceC", "ServiceB"]));
    assert_eq!(err.to_string(), "Circular dependency: ServiceB -> ServiceC -> ServiceB");
    assert!(container.injector().resolution_order(&Token::of::<ServiceA>()).is_none());
}

#[test]
fn test_cycle_through_explicit_tokens() {
    let a = Token::new("a");
    let b = Token::new("b");
    let container = Container::with_metadata(
        [
            ExplicitProvider::class::<ServiceA>(a.clone()),
            ExplicitProvider::class::<ServiceB>(b.clone()),
        ],
        InjectableRegistry::new()
            .with(Injectable::of::<ServiceA>().inject(0, b.clone()))
            .with(Injectable::of::<ServiceB>().inject(0, a.clone())),
    );

    assert_eq!(container.resolve_any(&a).err(), Some(path(&["a", "b", "a"])));
}

#[test]
fn test_validation_reports_cycles() {
    let container = Container::with_metadata(
        all(),
        InjectableRegistry::new()
            .with(Injectable::of::<ServiceA>().param::<ServiceB>())
            .with(Injectable::of::<ServiceB>().param::<ServiceA>())
            .with(Injectable::of::<ServiceC>()),
    );

    let report = container.validate();
    assert_eq!(report.errors(), &[path(&["ServiceA", "ServiceB", "ServiceA"])]);
}

#[test]
fn test_depth_limit() {
    let container = Container::builder()
        .providers(all())
        .metadata(
            InjectableRegistry::new()
                .with(Injectable::of::<ServiceA>().param::<ServiceB>())
                .with(Injectable::of::<ServiceB>().param::<ServiceC>())
                .with(Injectable::of::<ServiceC>()),
        )
        .options(InjectorOptions::default().max_depth(2))
        .build()
        .unwrap();

    assert_eq!(container.resolve_class::<ServiceA>().err(), Some(DiError::DepthExceeded(2)));
    assert!(container.resolve_class::<ServiceB>().is_ok());
}
