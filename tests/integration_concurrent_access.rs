/// Concurrent access integration tests
///
/// One lock guards each injector, so concurrent first resolutions of a
/// singleton must still build it exactly once.

use ferrous_injector::{
    Arguments, Constructible, Container, DiResult, ExplicitProvider, Injectable, InjectableRegistry, Provider,
    Resolve, Token,
};
use std::sync::{Arc, Barrier};
use std::thread;

struct ConnectionPool {
    url: Arc<String>,
}

impl Constructible for ConnectionPool {
    fn construct(args: &mut Arguments<'_>) -> DiResult<Self> {
        // Widen the window for racing resolutions
        thread::sleep(std::time::Duration::from_millis(5));
        Ok(ConnectionPool { url: args.next()? })
    }
}

struct Handler {
    pool: Arc<ConnectionPool>,
}

impl Constructible for Handler {
    fn construct(args: &mut Arguments<'_>) -> DiResult<Self> {
        Ok(Handler { pool: args.next()? })
    }
}

fn database_url() -> Token {
    Token::with_id("database.url", "database url")
}

fn container() -> Container {
    Container::with_metadata(
        [
            Provider::class::<ConnectionPool>(),
            ExplicitProvider::class::<Handler>(Token::of::<Handler>()).transient().into(),
            ExplicitProvider::value(database_url(), "postgres://db".to_string()).into(),
        ],
        InjectableRegistry::new()
            .with(Injectable::of::<ConnectionPool>().inject(0, database_url()))
            .with(Injectable::of::<Handler>().param::<ConnectionPool>()),
    )
}

#[test]
fn test_singleton_built_once_under_contention() {
    let container = container();
    let barrier = Arc::new(Barrier::new(8));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let container = container.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                container.resolve_class::<ConnectionPool>().unwrap()
            })
        })
        .collect();

    let pools: Vec<Arc<ConnectionPool>> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    for pool in &pools[1..] {
        assert!(Arc::ptr_eq(&pools[0], pool));
    }
    assert_eq!(pools[0].url.as_str(), "postgres://db");
    assert!(container.vertices()[0].is_instantiated());
}

#[test]
fn test_transients_across_threads_share_the_singleton() {
    let container = container();

    let handlers: Vec<Arc<Handler>> = crossbeam_utils::thread::scope(|scope| {
        let workers: Vec<_> = (0..4)
            .map(|_| scope.spawn(|_| container.resolve_class::<Handler>().unwrap()))
            .collect();
        workers.into_iter().map(|w| w.join().unwrap()).collect()
    })
    .unwrap();

    for handler in &handlers[1..] {
        assert!(!Arc::ptr_eq(&handlers[0], handler));
        assert!(Arc::ptr_eq(&handlers[0].pool, &handler.pool));
    }
}

#[test]
fn test_children_resolve_concurrently_with_parent() {
    let parent = container();
    let children: Vec<Container> = (0..4)
        .map(|i| parent.create_child_container([ExplicitProvider::value(Token::new("worker"), i)]))
        .collect();

    crossbeam_utils::thread::scope(|scope| {
        scope.spawn(|_| parent.resolve_class::<Handler>().unwrap());
        for child in &children {
            scope.spawn(move |_| child.resolve_class::<Handler>().unwrap());
        }
    })
    .unwrap();

    assert!(parent.resolve_class::<ConnectionPool>().is_ok());
}
