//! Domain map and resolution of files and specifiers to domains.

use std::fmt;
use std::path::{Component, Path};

use domain_lint_core::utils::relative_to;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use tracing::debug;

/// Marker that introduces an alias-style (scoped package) domain key.
const ALIAS_MARKER: char = '@';

/// Source-directory prefix that also matches when written without `src/`.
const SOURCE_DIR: &str = "./src/";

/// Strips a trailing `/*` wildcard segment.
#[must_use]
pub fn strip_wildcard(key: &str) -> &str {
    key.strip_suffix("/*").unwrap_or(key)
}

/// One configured domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Domain {
    key: String,
    prefixes: Vec<String>,
}

impl Domain {
    /// The key as configured, e.g. `"@feature/*"`.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The key without its wildcard segment; this is what resolution
    /// reports.
    #[must_use]
    pub fn name(&self) -> &str {
        strip_wildcard(&self.key)
    }

    /// All path prefixes, in listed order.
    #[must_use]
    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }

    /// The first listed prefix, without its wildcard segment.
    #[must_use]
    pub fn canonical_prefix(&self) -> Option<&str> {
        self.prefixes.first().map(|p| strip_wildcard(p))
    }
}

/// Ordered mapping from domain key to path prefixes.
///
/// Iteration follows declaration order. Inserting an existing key replaces
/// its prefixes but keeps its position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomainMap {
    domains: Vec<Domain>,
}

impl DomainMap {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a domain.
    pub fn insert(&mut self, key: impl Into<String>, prefixes: Vec<String>) {
        let key = key.into();
        if let Some(existing) = self.domains.iter_mut().find(|d| d.key == key) {
            existing.prefixes = prefixes;
        } else {
            self.domains.push(Domain { key, prefixes });
        }
    }

    /// Builder-style [`Self::insert`].
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, prefixes: &[&str]) -> Self {
        self.insert(key, prefixes.iter().map(ToString::to_string).collect());
        self
    }

    /// Returns the domain whose name (wildcard stripped) is `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Domain> {
        self.domains.iter().find(|d| d.name() == name)
    }

    /// Iterates domains in declaration order.
    pub fn iter(&self) -> std::slice::Iter<'_, Domain> {
        self.domains.iter()
    }

    /// Number of domains.
    #[must_use]
    pub fn len(&self) -> usize {
        self.domains.len()
    }

    /// Returns true if no domains are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }

    /// Appends the domains of `fallback` whose names are not declared here.
    #[must_use]
    pub fn merged_with(mut self, fallback: Self) -> Self {
        for domain in fallback.domains {
            if self.get(domain.name()).is_none() {
                self.domains.push(domain);
            }
        }
        self
    }
}

impl<'a> IntoIterator for &'a DomainMap {
    type Item = &'a Domain;
    type IntoIter = std::slice::Iter<'a, Domain>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A single prefix or a list of them.
#[derive(Deserialize)]
#[serde(untagged)]
enum Prefixes {
    One(String),
    Many(Vec<String>),
}

impl From<Prefixes> for Vec<String> {
    fn from(value: Prefixes) -> Self {
        match value {
            Prefixes::One(p) => vec![p],
            Prefixes::Many(ps) => ps,
        }
    }
}

struct DomainMapVisitor;

impl<'de> Visitor<'de> for DomainMapVisitor {
    type Value = DomainMap;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a table of domain keys to a path prefix or a list of prefixes")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut map = DomainMap::new();
        while let Some((key, prefixes)) = access.next_entry::<String, Prefixes>()? {
            map.insert(key, prefixes.into());
        }
        Ok(map)
    }
}

impl<'de> Deserialize<'de> for DomainMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(DomainMapVisitor)
    }
}

/// `path` relative to `root`, folded and joined with `/`.
fn root_relative(root: &Path, path: &Path) -> String {
    relative_to(root, path)
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            Component::ParentDir => Some("..".into()),
            Component::RootDir | Component::Prefix(_) | Component::CurDir => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Resolves the domain a file belongs to.
///
/// Both `file` and every prefix are taken relative to `root` and folded
/// lexically before a plain string prefix test, so `./src/core` also claims
/// `src/coreutils/x.ts`. Domains are tried in declaration order, so the
/// earlier one wins on overlap.
#[must_use]
pub fn resolve_own_domain<'m>(root: &Path, file: &Path, domains: &'m DomainMap) -> Option<&'m str> {
    let file = root_relative(root, file);
    domains
        .iter()
        .find(|domain| {
            domain.prefixes().iter().any(|p| {
                file.starts_with(&root_relative(root, Path::new(strip_wildcard(p))))
            })
        })
        .map(Domain::name)
}

/// A way of matching a specifier to a domain.
type Strategy = for<'m> fn(&str, &'m DomainMap) -> Option<&'m str>;

/// Resolution strategies, tried in order; the first hit wins.
const IMPORT_STRATEGIES: &[(&str, Strategy)] = &[("alias", by_alias), ("path", by_path)];

/// Resolves the domain an import specifier points into.
#[must_use]
pub fn resolve_import_domain<'m>(specifier: &str, domains: &'m DomainMap) -> Option<&'m str> {
    IMPORT_STRATEGIES.iter().find_map(|(strategy, resolve)| {
        let domain = resolve(specifier, domains)?;
        debug!(specifier, domain, strategy, "resolved import domain");
        Some(domain)
    })
}

/// Scoped names like `@core` match anything under `@core/`. The bare name
/// is left to the path phase.
fn by_alias<'m>(specifier: &str, domains: &'m DomainMap) -> Option<&'m str> {
    domains
        .iter()
        .map(Domain::name)
        .filter(|name| *name != "*" && name.starts_with(ALIAS_MARKER))
        .find(|name| {
            specifier
                .strip_prefix(*name)
                .is_some_and(|rest| rest.starts_with('/'))
        })
}

/// Specifiers match a domain's path prefixes as plain string prefixes, with
/// `./src/x` also accepted as `./x`.
fn by_path<'m>(specifier: &str, domains: &'m DomainMap) -> Option<&'m str> {
    domains
        .iter()
        .find(|domain| {
            domain.prefixes().iter().any(|prefix| {
                let prefix = strip_wildcard(prefix);
                specifier.starts_with(prefix)
                    || prefix
                        .strip_prefix(SOURCE_DIR)
                        .is_some_and(|rest| specifier.starts_with(&format!("./{rest}")))
            })
        })
        .map(Domain::name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn core_ui() -> DomainMap {
        DomainMap::new()
            .with("@core", &["./src/core"])
            .with("@ui", &["./src/ui"])
    }

    #[test]
    fn insert_replaces_in_place() {
        let mut map = core_ui();
        map.insert("@core", vec!["./lib/core".into()]);
        let keys: Vec<&str> = map.iter().map(Domain::key).collect();
        assert_eq!(keys, vec!["@core", "@ui"]);
        assert_eq!(map.get("@core").unwrap().canonical_prefix(), Some("./lib/core"));
    }

    #[test]
    fn merge_skips_declared_names() {
        let aliases = DomainMap::new()
            .with("@core/*", &["./lib/core/*"])
            .with("@api/*", &["./src/api/*"]);
        let merged = core_ui().merged_with(aliases);
        let keys: Vec<&str> = merged.iter().map(Domain::key).collect();
        assert_eq!(keys, vec!["@core", "@ui", "@api/*"]);
        assert_eq!(merged.get("@api").unwrap().canonical_prefix(), Some("./src/api"));
    }

    #[test]
    fn deserializes_in_document_order() {
        let map: DomainMap = serde_json::from_str(
            r#"{"@zeta/*": ["./src/zeta/*"], "@alpha": "./src/alpha", "@core": ["./a", "./b"]}"#,
        )
        .unwrap();
        let keys: Vec<&str> = map.iter().map(Domain::key).collect();
        assert_eq!(keys, vec!["@zeta/*", "@alpha", "@core"]);
        assert_eq!(map.get("@core").unwrap().prefixes(), ["./a", "./b"]);
    }

    #[test]
    fn rejects_non_string_prefixes() {
        assert!(serde_json::from_str::<DomainMap>(r#"{"@core": 3}"#).is_err());
    }

    #[test]
    fn own_domain_from_relative_and_absolute_paths() {
        let root = Path::new("/project");
        let map = core_ui();
        assert_eq!(
            resolve_own_domain(root, Path::new("./src/ui/button.ts"), &map),
            Some("@ui")
        );
        assert_eq!(
            resolve_own_domain(root, Path::new("/project/src/core/x.ts"), &map),
            Some("@core")
        );
        assert_eq!(
            resolve_own_domain(root, Path::new("/project/scripts/build.js"), &map),
            None
        );
    }

    #[test]
    fn own_domain_checks_every_prefix() {
        let map = DomainMap::new().with("@core", &["./src/core", "./legacy/core"]);
        assert_eq!(
            resolve_own_domain(Path::new("/p"), Path::new("/p/legacy/core/a.js"), &map),
            Some("@core")
        );
    }

    #[test]
    fn own_domain_strips_wildcard() {
        let map = DomainMap::new().with("@ui/*", &["./src/ui/*"]);
        assert_eq!(
            resolve_own_domain(Path::new("/p"), Path::new("/p/src/ui/a.tsx"), &map),
            Some("@ui")
        );
    }

    #[test]
    fn own_domain_first_declared_wins_on_overlap() {
        let map = DomainMap::new()
            .with("A", &["./src/foo"])
            .with("B", &["./src/foo/bar"]);
        assert_eq!(
            resolve_own_domain(Path::new("/p"), Path::new("./src/foo/bar/x.ext"), &map),
            Some("A")
        );
    }

    #[test]
    fn own_domain_is_a_plain_string_prefix() {
        let map = core_ui();
        assert_eq!(
            resolve_own_domain(Path::new("/p"), Path::new("/p/src/coreutils/x.ts"), &map),
            Some("@core")
        );
        assert_eq!(
            resolve_own_domain(Path::new("/p"), Path::new("/p/src/cor/x.ts"), &map),
            None
        );
    }

    #[test]
    fn alias_requires_separator() {
        let map = DomainMap::new().with("@foo", &["./src/foo"]);
        assert_eq!(resolve_import_domain("@foo/x", &map), Some("@foo"));
        assert_eq!(resolve_import_domain("@foo", &map), None);
        assert_eq!(resolve_import_domain("@foobar/x", &map), None);
    }

    #[test]
    fn bare_alias_name_falls_through_to_path_phase() {
        let map = DomainMap::new()
            .with("@foo", &["./src/foo"])
            .with("@bar", &["@foo"]);
        assert_eq!(resolve_import_domain("@foo", &map), Some("@bar"));
    }

    #[test]
    fn alias_phase_short_circuits_path_phase() {
        let map = DomainMap::new()
            .with("./lib", &["@shared"])
            .with("@shared", &["./src/shared"]);
        // "./lib" would claim "@shared/utils" by its prefix, but aliases win.
        assert_eq!(resolve_import_domain("@shared/utils", &map), Some("@shared"));
    }

    #[test]
    fn bare_wildcard_key_is_not_an_alias() {
        let map = DomainMap::new().with("*", &["./vendor/*"]);
        assert_eq!(resolve_import_domain("./vendor/a", &map), Some("*"));
        assert_eq!(resolve_import_domain("@x/y", &map), None);
    }

    #[test]
    fn path_phase_matches_prefix_and_source_dir_rewrite() {
        let map = DomainMap::new().with("feature", &["./src/feature"]);
        assert_eq!(resolve_import_domain("./src/feature/x", &map), Some("feature"));
        assert_eq!(resolve_import_domain("./feature/x", &map), Some("feature"));
        assert_eq!(resolve_import_domain("./features/x", &map), Some("feature"));
        assert_eq!(resolve_import_domain("../feature/x", &map), None);
    }

    #[test]
    fn path_phase_does_not_stop_at_boundaries() {
        let map = DomainMap::new().with("@core", &["./src/core"]);
        assert_eq!(resolve_import_domain("./src/core-utils/x", &map), Some("@core"));
        assert_eq!(resolve_import_domain("./core-utils/x", &map), Some("@core"));
    }

    #[test]
    fn path_phase_checks_every_prefix_in_declaration_order() {
        let map = DomainMap::new()
            .with("@a", &["./src/a", "./shared"])
            .with("@b", &["./shared/b"]);
        assert_eq!(resolve_import_domain("./shared/b/x", &map), Some("@a"));
    }

    #[test]
    fn unknown_specifier_is_absent() {
        assert_eq!(resolve_import_domain("react", &core_ui()), None);
        assert_eq!(resolve_import_domain("./icon", &core_ui()), None);
    }

    #[test]
    fn same_domain_is_reflexive() {
        let map = core_ui();
        let root = Path::new("/p");
        for (file, spec) in [
            ("/p/src/ui/button.ts", "./src/ui/icon"),
            ("/p/src/core/a.ts", "@core/b"),
            ("/p/src/core/a.ts", "./core/b"),
        ] {
            assert_eq!(
                resolve_own_domain(root, Path::new(file), &map),
                resolve_import_domain(spec, &map),
                "{file} -> {spec}"
            );
        }
    }
}
