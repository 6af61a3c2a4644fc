//! Defining components in an external registry.

use ferrous_injector::{
    Arguments, ComponentFactory, ComponentRegistrar, ComponentRegistration, ComponentRegistry, Constructible,
    Container, DefinitionOptions, DiError, DiResult, ExplicitProvider, Injectable, InjectableRegistry,
    MemoryRegistry, Provider, Resolve, Token,
};
use std::sync::Arc;

struct Theme {
    accent: &'static str,
}

impl Constructible for Theme {
    fn construct(_: &mut Arguments<'_>) -> DiResult<Self> {
        Ok(Theme { accent: "teal" })
    }
}

struct Counter;

impl Constructible for Counter {
    fn construct(_: &mut Arguments<'_>) -> DiResult<Self> {
        Ok(Counter)
    }
}

struct Header {
    theme: Arc<Theme>,
    title: Arc<String>,
}

impl Constructible for Header {
    fn construct(args: &mut Arguments<'_>) -> DiResult<Self> {
        Ok(Header {
            theme: args.next()?,
            title: args.next()?,
        })
    }
}

fn title() -> Token {
    Token::with_id("title", "page title")
}

fn container() -> Container {
    Container::with_metadata(
        [
            Provider::class::<Theme>(),
            ExplicitProvider::value(title(), "Dashboard".to_string()).into(),
        ],
        InjectableRegistry::new()
            .with(Injectable::of::<Theme>())
            .with(Injectable::of::<Counter>())
            .with(Injectable::of::<Header>().param::<Theme>().value_param().inject(1, title())),
    )
}

#[test]
fn test_component_without_dependencies() {
    let mut registrar = ComponentRegistrar::new(container(), MemoryRegistry::new());
    registrar.register([ComponentRegistration::of::<Counter>("x-counter")]).unwrap();

    let factory = registrar.registry().get("x-counter").unwrap();
    assert_eq!(factory.arity(), 0);
    assert_eq!(factory.class().name(), "Counter");
    assert!(registrar.registry().create_as::<Counter>("x-counter").is_ok());
}

#[test]
fn test_component_dependencies_come_from_the_container() {
    let mut registrar = ComponentRegistrar::new(container(), MemoryRegistry::new());
    registrar.register([ComponentRegistration::of::<Header>("x-header")]).unwrap();

    let first = registrar.registry().create_as::<Header>("x-header").unwrap();
    let second = registrar.registry().create_as::<Header>("x-header").unwrap();

    assert_eq!(first.title.as_str(), "Dashboard");
    assert_eq!(first.theme.accent, "teal");
    // Each creation is a new component sharing the resolved singletons
    assert!(!Arc::ptr_eq(&first, &second));
    assert!(Arc::ptr_eq(&first.theme, &second.theme));
    assert!(Arc::ptr_eq(&first.theme, &registrar.container().resolve_class::<Theme>().unwrap()));
}

#[test]
fn test_options_are_passed_through() {
    let options = DefinitionOptions {
        extends: Some("button".to_string()),
    };
    let mut registrar = ComponentRegistrar::new(container(), MemoryRegistry::new());
    registrar
        .register([
            ComponentRegistration::of::<Counter>("fancy-button").with_options(options.clone()),
            ComponentRegistration::of::<Theme>("x-theme"),
        ])
        .unwrap();

    let registry = registrar.into_registry();
    assert_eq!(registry.len(), 2);
    assert_eq!(registry.options("fancy-button"), Some(&options));
    assert_eq!(registry.options("x-theme"), None);
}

#[test]
fn test_missing_metadata_stops_registration() {
    struct Undeclared;
    impl Constructible for Undeclared {
        fn construct(_: &mut Arguments<'_>) -> DiResult<Self> {
            Ok(Undeclared)
        }
    }

    let mut registrar = ComponentRegistrar::new(container(), MemoryRegistry::new());
    let err = registrar
        .register([
            ComponentRegistration::of::<Counter>("x-counter"),
            ComponentRegistration::of::<Undeclared>("x-undeclared"),
            ComponentRegistration::of::<Theme>("x-theme"),
        ])
        .unwrap_err();

    assert_eq!(err, DiError::MissingMetadata("Undeclared".to_string()));
    assert!(registrar.registry().get("x-counter").is_some());
    assert!(registrar.registry().get("x-theme").is_none());
}

#[test]
fn test_unbound_dependency_fails_at_registration() {
    let container = Container::with_metadata(
        Vec::<Provider>::new(),
        InjectableRegistry::new().with(Injectable::of::<Header>().param::<Theme>().value_param().inject(1, title())),
    );

    let mut registrar = ComponentRegistrar::new(container, MemoryRegistry::new());
    let err = registrar.register([ComponentRegistration::of::<Header>("x-header")]).unwrap_err();
    assert_eq!(err, DiError::MissingProvider("Theme".to_string()));
    assert!(registrar.registry().is_empty());
}

#[test]
fn test_duplicate_names_are_rejected() {
    let mut registrar = ComponentRegistrar::new(container(), MemoryRegistry::new());
    let err = registrar
        .register([
            ComponentRegistration::of::<Counter>("x-widget"),
            ComponentRegistration::of::<Theme>("x-widget"),
        ])
        .unwrap_err();
    assert!(matches!(err, DiError::Construction(_)));
}

#[test]
fn test_custom_registry() {
    #[derive(Default)]
    struct Names(Vec<String>);

    impl ComponentRegistry for Names {
        fn define(&mut self, name: &str, factory: ComponentFactory, _: Option<&DefinitionOptions>) -> DiResult<()> {
            factory.create()?;
            self.0.push(name.to_string());
            Ok(())
        }
    }

    let mut registrar = ComponentRegistrar::new(container(), Names::default());
    registrar
        .register([
            ComponentRegistration::of::<Header>("x-header"),
            ComponentRegistration::of::<Counter>("x-counter"),
        ])
        .unwrap();
    assert_eq!(registrar.into_registry().0, vec!["x-header", "x-counter"]);
}
