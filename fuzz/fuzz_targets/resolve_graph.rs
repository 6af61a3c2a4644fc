#![no_main]

use ferrous_injector::{
    ClassType, Container, DiError, ExplicitProvider, Lifetime, Provider, ResolveCore, Token,
};
use libfuzzer_sys::fuzz_target;

const NODES: usize = 6;

struct Node<const I: usize>;

fn classes() -> [ClassType; NODES] {
    [
        ClassType::from_fn::<Node<0>, _>(|_| Ok(Node)),
        ClassType::from_fn::<Node<1>, _>(|_| Ok(Node)),
        ClassType::from_fn::<Node<2>, _>(|_| Ok(Node)),
        ClassType::from_fn::<Node<3>, _>(|_| Ok(Node)),
        ClassType::from_fn::<Node<4>, _>(|_| Ok(Node)),
        ClassType::from_fn::<Node<5>, _>(|_| Ok(Node)),
    ]
}

// Byte layout: one adjacency byte per node (bit j = depends on node j,
// cycles allowed), one lifetime byte, one byte of bound nodes, then
// requested roots.
fuzz_target!(|data: &[u8]| {
    if data.len() < NODES + 3 {
        return;
    }

    let classes = classes();
    let tokens: Vec<Token> = classes.iter().map(|c| c.token().clone()).collect();
    let adjacency = &data[..NODES];
    let transient = data[NODES];
    let bound = data[NODES + 1];

    let table: Vec<Vec<Option<Token>>> = adjacency
        .iter()
        .map(|bits| (0..NODES).filter(|j| bits & (1 << j) != 0).map(|j| Some(tokens[j].clone())).collect())
        .collect();
    let ids: Vec<_> = classes.iter().map(ClassType::type_id).collect();
    let supplier = move |class: &ClassType| -> Option<Vec<Option<Token>>> {
        ids.iter().position(|id| *id == class.type_id()).map(|i| table[i].clone())
    };

    let providers: Vec<Provider> = classes
        .iter()
        .enumerate()
        .filter(|(i, _)| bound & (1 << i) != 0)
        .map(|(i, class)| {
            let lifetime = if transient & (1 << i) != 0 { Lifetime::Transient } else { Lifetime::Singleton };
            ExplicitProvider::new(class.token().clone(), class.clone()).with_lifetime(lifetime).into()
        })
        .collect();

    let container = Container::with_metadata(providers, supplier);
    for &root in &data[NODES + 2..] {
        let token = &tokens[root as usize % NODES];
        match container.resolve_any(token) {
            Ok(_) => {
                let order = container.injector().resolution_order(token).unwrap();
                assert_eq!(order.last(), Some(token));
            }
            Err(DiError::Circular(path)) => assert_eq!(path.first(), path.last()),
            Err(DiError::MissingProvider(_)) | Err(DiError::LifetimeConflict { .. }) => {}
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    let _ = container.validate();
});
