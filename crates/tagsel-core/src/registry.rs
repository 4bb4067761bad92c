//! Declaration registry mapping unit identities to their effective tags.
//!
//! Units are declared in order. A parent must be declared before its children,
//! the same way a base class exists before its subclasses.
use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tagsel_model::{NODATABASE, TagSet, UnitId};
use tracing::{debug, instrument};

use crate::attach::tag;
use crate::error::{CoreError, CoreResult};

/// Declaration of a test unit as written by its author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Declaration {
    /// Stable identity of the unit.
    pub id: UnitId,
    /// Parent units, leftmost first.
    ///
    /// The first parent supplies the inherited tag set.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parents: Vec<UnitId>,
    /// Raw tag specifiers (`X` adds, `-X` removes).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl Declaration {
    pub fn new(id: impl Into<UnitId>) -> Self {
        Self {
            id: id.into(),
            parents: Vec::new(),
            tags: Vec::new(),
        }
    }

    /// Append a parent unit.
    pub fn parent(mut self, parent: impl Into<UnitId>) -> Self {
        self.parents.push(parent.into());
        self
    }

    /// Append tag specifiers.
    pub fn tags<I, S>(mut self, specifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(specifiers.into_iter().map(Into::into));
        self
    }
}

/// A declared unit with its resolved tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestUnit {
    id: UnitId,
    parents: Vec<UnitId>,
    tags: TagSet,
}

impl TestUnit {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn parents(&self) -> &[UnitId] {
        &self.parents
    }

    /// Effective tags after defaults and inheritance.
    pub fn tags(&self) -> &TagSet {
        &self.tags
    }

    /// `false` when the unit opted out of the data fixture with `nodatabase`.
    pub fn requires_database(&self) -> bool {
        !self.tags.contains(NODATABASE)
    }
}

/// Ordered collection of declared units.
#[derive(Default, Debug, Clone)]
pub struct UnitRegistry {
    units: Vec<TestUnit>,
    index: HashMap<UnitId, usize>,
}

impl UnitRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a unit and resolve its effective tags.
    ///
    /// Fails if the id is already taken, a parent is unknown, or a specifier
    /// is malformed. On failure the registry is left unchanged.
    #[instrument(level = "debug", skip(self, decl), fields(unit = %decl.id))]
    pub fn declare(&mut self, decl: Declaration) -> CoreResult<&TestUnit> {
        if self.index.contains_key(&decl.id) {
            return Err(CoreError::DuplicateUnit(decl.id));
        }

        let mut inherited = None;
        for parent in &decl.parents {
            let Some(unit) = self.get(parent) else {
                return Err(CoreError::UnknownParent {
                    unit: decl.id.clone(),
                    parent: parent.clone(),
                });
            };
            inherited.get_or_insert(&unit.tags);
        }

        let tags = tag(&decl.id, inherited, &decl.tags)?;
        debug!(parents = decl.parents.len(), tags = %tags, "unit declared");

        let idx = self.units.len();
        self.index.insert(decl.id.clone(), idx);
        self.units.push(TestUnit {
            id: decl.id,
            parents: decl.parents,
            tags,
        });
        Ok(&self.units[idx])
    }

    /// Declare several units in order, stopping at the first error.
    pub fn declare_all<I>(&mut self, decls: I) -> CoreResult<()>
    where
        I: IntoIterator<Item = Declaration>,
    {
        for decl in decls {
            self.declare(decl)?;
        }
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&TestUnit> {
        self.index.get(id).map(|&i| &self.units[i])
    }

    /// Effective tags of a declared unit.
    pub fn effective_tags(&self, id: &str) -> Option<&TagSet> {
        self.get(id).map(TestUnit::tags)
    }

    /// Iterate units in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &TestUnit> {
        self.units.iter()
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declares_in_order_and_resolves_tags() {
        let mut reg = UnitRegistry::new();
        reg.declare(Declaration::new("a")).unwrap();
        reg.declare(Declaration::new("b").tags(["stock"])).unwrap();

        let ids: Vec<_> = reg.iter().map(TestUnit::id).collect();
        assert_eq!(ids, ["a", "b"]);
        assert!(reg.effective_tags("b").unwrap().contains("stock"));
        assert!(reg.effective_tags("missing").is_none());
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn child_without_specifiers_inherits_exactly() {
        let mut reg = UnitRegistry::new();
        reg.declare(Declaration::new("P").tags(["slow"])).unwrap();
        let child = reg.declare(Declaration::new("C").parent("P")).unwrap().clone();

        assert_eq!(child.tags(), reg.effective_tags("P").unwrap());
        assert_eq!(child.parents(), ["P".to_string()]);
    }

    #[test]
    fn removal_propagates_to_descendants() {
        let mut reg = UnitRegistry::new();
        reg.declare(Declaration::new("P").tags(["-base"])).unwrap();
        reg.declare(Declaration::new("C").parent("P")).unwrap();
        reg.declare(Declaration::new("G").parent("C").tags(["slow"]))
            .unwrap();

        assert!(!reg.effective_tags("C").unwrap().contains("base"));
        assert!(!reg.effective_tags("G").unwrap().contains("base"));
    }

    #[test]
    fn first_parent_supplies_inherited_set() {
        let mut reg = UnitRegistry::new();
        reg.declare(Declaration::new("A").tags(["slow"])).unwrap();
        reg.declare(Declaration::new("B").tags(["nightly"])).unwrap();
        reg.declare(Declaration::new("C").parent("A").parent("B"))
            .unwrap();

        let tags = reg.effective_tags("C").unwrap();
        assert!(tags.contains("slow"));
        assert!(!tags.contains("nightly"));
    }

    #[test]
    fn unknown_parent_is_rejected() {
        let mut reg = UnitRegistry::new();
        let err = reg
            .declare(Declaration::new("C").parent("Nope"))
            .unwrap_err();
        assert_eq!(
            err,
            CoreError::UnknownParent {
                unit: "C".into(),
                parent: "Nope".into()
            }
        );
        assert!(reg.is_empty());
    }

    #[test]
    fn duplicate_unit_is_rejected() {
        let mut reg = UnitRegistry::new();
        reg.declare(Declaration::new("A")).unwrap();
        assert_eq!(
            reg.declare(Declaration::new("A")).unwrap_err(),
            CoreError::DuplicateUnit("A".into())
        );
    }

    #[test]
    fn invalid_specifier_leaves_registry_unchanged() {
        let mut reg = UnitRegistry::new();
        let err = reg
            .declare(Declaration::new("A").tags(["ok", "not ok"]))
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidTag { ref unit, .. } if unit == "A"));
        assert!(reg.get("A").is_none());
    }

    #[test]
    fn nodatabase_opts_out_of_fixture() {
        let mut reg = UnitRegistry::new();
        reg.declare(Declaration::new("A")).unwrap();
        reg.declare(Declaration::new("B").tags(["nodatabase"])).unwrap();

        assert!(reg.get("A").unwrap().requires_database());
        assert!(!reg.get("B").unwrap().requires_database());
    }

    #[test]
    fn declare_all_stops_at_first_error() {
        let mut reg = UnitRegistry::new();
        reg.declare_all([Declaration::new("A"), Declaration::new("B").parent("A")])
            .unwrap();
        assert_eq!(reg.len(), 2);

        let err = reg
            .declare_all([
                Declaration::new("C"),
                Declaration::new("D").parent("Z"),
                Declaration::new("E"),
            ])
            .unwrap_err();
        assert!(matches!(err, CoreError::UnknownParent { .. }));
        assert!(reg.get("C").is_some());
        assert!(reg.get("E").is_none());
    }

    #[test]
    fn declaration_deserializes_with_defaults() {
        let json = r#"{"id": "stock.TestMove", "tags": ["slow", "-at_install"]}"#;
        let decl: Declaration = serde_json::from_str(json).unwrap();
        assert_eq!(decl.id, "stock.TestMove");
        assert!(decl.parents.is_empty());
        assert_eq!(decl.tags, ["slow", "-at_install"]);
    }

    #[test]
    fn declaration_rejects_misspelled_field() {
        let json = r#"{"id": "stock.TestMove", "tag": ["slow"]}"#;
        let err = serde_json::from_str::<Declaration>(json).unwrap_err();
        assert!(err.to_string().contains("unknown field `tag`"), "{err}");
    }
}
