mod common;

use common::fixtures::{SHIPPED_DEFAULTS, SITE, USER};
use common::{TestResult, build, init_logging, xml};
use layerconf::{
    CompoundPropertyResolver, ConfigError, ConfigOptions, Element, LayeredConfig, MapPropertyResolver,
    OneOfPropertyResolver, PropertyError, PropertyResolver, RecursivePropertyResolver, ResolveContext,
    XmlPropertyResolver, filter, resolve,
};
use std::sync::atomic::{AtomicUsize, Ordering};

fn value(root: &Element, path: &str) -> Option<String> {
    XmlPropertyResolver::new(root.clone(), true).lookup(path)
}

/// Answers `letter` with `A`, but only from the second request on.
#[derive(Debug, Default)]
struct LateLetter(AtomicUsize);

impl PropertyResolver for LateLetter {
    fn resolve(&self, name: &str, _: &mut ResolveContext<'_>) -> Result<Option<String>, PropertyError> {
        if name != "letter" {
            return Ok(None);
        }
        let seen = self.0.fetch_add(1, Ordering::SeqCst);
        Ok((seen > 0).then(|| "A".to_string()))
    }
}

#[derive(Debug)]
struct Refusing;

impl PropertyResolver for Refusing {
    fn resolve(&self, name: &str, _: &mut ResolveContext<'_>) -> Result<Option<String>, PropertyError> {
        Err(PropertyError::not_found(name))
    }
}

#[test]
fn test_layered_deployment_resolves_end_to_end() -> TestResult {
    init_logging();
    let root = build(&[SHIPPED_DEFAULTS, SITE, USER])?;

    assert_eq!(
        value(&root, "config.datasource.url").as_deref(),
        Some("postgres://db.internal:5432/app")
    );
    assert_eq!(value(&root, "config.datasource.pool").as_deref(), Some("20"));
    assert_eq!(value(&root, "config.service.port").as_deref(), Some("80"));

    let filters: Vec<String> = root
        .child_elements()
        .find(|e| e.tag == "service")
        .map(|service| service.child_elements().map(Element::text_content).collect())
        .unwrap_or_default();
    assert_eq!(filters, vec!["gzip", "auth"]);
    assert_eq!(value(&root, "config.banner").as_deref(), Some("Welcome to 80"));

    let tags: Vec<&str> = root.child_elements().map(|e| e.tag.as_str()).collect();
    assert_eq!(tags, vec!["properties", "service", "datasource", "banner"]);

    let serialized = root.to_xml_string()?;
    assert!(!serialized.contains("combine."));
    assert!(!serialized.contains("${"));
    Ok(())
}

#[test]
fn test_properties_section_values_are_filtered_in_place() -> TestResult {
    let root = build(&[SHIPPED_DEFAULTS, SITE])?;
    let section = root
        .child_elements()
        .find(|e| e.tag == "properties")
        .ok_or("missing properties")?;
    let url = section
        .child_elements()
        .find(|e| e.tag == "db.url")
        .ok_or("missing db.url")?;
    assert_eq!(url.text_content(), "postgres://db.internal:5432/app");
    Ok(())
}

#[test]
fn test_cycle_names_repeated_key() {
    let resolver = RecursivePropertyResolver::new(
        MapPropertyResolver::new().with("a", "${b}").with("b", "${a}"),
    );
    assert_eq!(
        filter("${a}", &resolver),
        Err(PropertyError::Circular {
            name: "a".to_string()
        })
    );
}

#[test]
fn test_cycle_in_properties_section_fails_build() {
    let err = build(&["<config><properties><a>${b}</a><b>${a}</b></properties></config>"]).unwrap_err();
    assert!(
        matches!(&err, ConfigError::Property(PropertyError::Circular { name }) if name == "b"),
        "unexpected error: {}",
        err
    );
}

#[test]
fn test_oneof_takes_first_alternative_that_resolves() -> TestResult {
    let chain = CompoundPropertyResolver::new()
        .with(OneOfPropertyResolver::new())
        .with(LateLetter::default());
    assert_eq!(resolve("oneof:1${letter},2${letter}", &chain)?, Some("2A".to_string()));

    let nothing = CompoundPropertyResolver::new()
        .with(OneOfPropertyResolver::new())
        .with(MapPropertyResolver::new());
    assert_eq!(resolve("oneof:1${letter},2${letter}", &nothing)?, None);
    Ok(())
}

#[test]
fn test_oneof_inside_document() -> TestResult {
    let root = LayeredConfig::new()
        .with_resolver(LateLetter::default())
        .add_xml("<config><code>${oneof:1${letter},2${letter}}</code><fallback>${oneof:${env.LAYERCONF_TEST_UNSET},none}</fallback></config>")?
        .build()?;
    assert_eq!(value(&root, "config.code").as_deref(), Some("2A"));
    assert_eq!(value(&root, "config.fallback").as_deref(), Some("none"));
    Ok(())
}

#[test]
fn test_text_without_placeholders_is_untouched() -> TestResult {
    let resolver = Refusing;
    for text in ["", "plain", "{not} a $placeholder", "$ {x}", "}{"] {
        assert_eq!(filter(text, &resolver)?, text);
    }
    Ok(())
}

#[test]
fn test_definite_absence_stops_the_chain() {
    let chain = CompoundPropertyResolver::new()
        .with(Refusing)
        .with(MapPropertyResolver::new().with("a", "1"));
    assert_eq!(filter("${a}", &chain), Err(PropertyError::not_found("a")));

    let err = LayeredConfig::new()
        .with_resolver(Refusing)
        .add_xml("<config><properties><a>1</a></properties><v>${a}</v></config>")
        .and_then(LayeredConfig::build)
        .unwrap_err();
    assert!(matches!(err, ConfigError::Property(PropertyError::NotFound { .. })));
}

#[test]
fn test_plain_absence_falls_through() -> TestResult {
    let chain = CompoundPropertyResolver::new()
        .with(MapPropertyResolver::new())
        .with(MapPropertyResolver::new().with("a", "1"));
    assert_eq!(filter("x${a}x", &chain)?, "x1x");
    Ok(())
}

#[test]
fn test_environment_variables_are_resolved() -> TestResult {
    let Ok(path) = std::env::var("PATH") else {
        return Ok(());
    };
    let root = build(&["<config><path>${env.PATH}</path></config>"])?;
    assert_eq!(value(&root, "config.path"), Some(path));

    let options = ConfigOptions {
        environment: false,
        ..ConfigOptions::default()
    };
    let err = LayeredConfig::new()
        .with_options(options)
        .add_xml("<config><path>${env.PATH}</path></config>")?
        .build()
        .unwrap_err();
    assert!(matches!(err, ConfigError::Property(PropertyError::NotFound { .. })));
    Ok(())
}

#[test]
fn test_environment_variable_name_may_be_computed() -> TestResult {
    let Ok(path) = std::env::var("PATH") else {
        return Ok(());
    };
    let root = build(&["<config><properties><var>PATH</var></properties><v>${env.${var}}</v></config>"])?;
    assert_eq!(value(&root, "config.v"), Some(path));

    let err = build(&["<config><v>${env.${undefined.var}}</v></config>"]).unwrap_err();
    assert!(
        matches!(&err, ConfigError::Property(PropertyError::NotFound { name }) if name == "undefined.var"),
        "unexpected error: {}",
        err
    );
    Ok(())
}

#[test]
fn test_document_paths_without_root_segment() -> TestResult {
    let options = ConfigOptions {
        match_root: false,
        ..ConfigOptions::default()
    };
    let root = LayeredConfig::new()
        .with_options(options)
        .add_xml(r#"<config><server port="8443"/><url>https://localhost:${server.port}/</url></config>"#)?
        .build()?;
    assert_eq!(value(&root, "config.url").as_deref(), Some("https://localhost:8443/"));
    Ok(())
}

#[test]
fn test_comments_are_never_filtered() -> TestResult {
    let root = build(&["<config><!-- ${not.resolved} --><a/></config>"])?;
    assert_eq!(root.to_xml_string()?, "<config><!-- ${not.resolved} --><a/></config>");
    Ok(())
}

#[test]
fn test_one_chain_serves_concurrent_callers() {
    let chain = RecursivePropertyResolver::new(
        MapPropertyResolver::new()
            .with("a", "${b}${b}")
            .with("b", "${c}")
            .with("c", "x"),
    );
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| filter("${a}-${a}", &chain)))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), Ok("xx-xx".to_string()));
        }
    });
}

#[test]
fn test_fixture_layers_parse() {
    for layer in [SHIPPED_DEFAULTS, SITE, USER] {
        assert_eq!(xml(layer).tag, "config");
    }
}
