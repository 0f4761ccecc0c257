//! The fixed relationship catalog.
//!
//! The `relationships` map in a root document is unordered, but final
//! entity ordering must be identical across every version of a dataset.
//! Enumeration therefore never relies on container iteration order: it
//! walks this catalog, whose array position is the priority ordinal.
//! Single-valued relationships form the first group, array-valued
//! relationships the second, each in declared order.

/// How a relationship's pointers are declared in the root document.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RelationshipKind {
    /// One pointer.
    Single,
    /// An array of pointers, each element resolved with its index.
    Array,
}

/// One catalog entry. Priority is the entry's position in
/// [`RELATIONSHIP_CATALOG`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RelationshipSpec {
    pub name: &'static str,
    pub kind: RelationshipKind,
}

const fn single(name: &'static str) -> RelationshipSpec {
    RelationshipSpec {
        name,
        kind: RelationshipKind::Single,
    }
}

const fn array(name: &'static str) -> RelationshipSpec {
    RelationshipSpec {
        name,
        kind: RelationshipKind::Array,
    }
}

/// Declared processing order for every known relationship name.
pub const RELATIONSHIP_CATALOG: [RelationshipSpec; 13] = [
    single("property_has_address"),
    single("property_has_lot"),
    single("property_has_structure"),
    single("property_has_utility"),
    single("property_has_flood_storm_information"),
    array("company_has_property"),
    array("person_has_property"),
    array("property_has_file"),
    array("property_has_layout"),
    array("property_has_tax"),
    array("property_has_sales_history"),
    array("sales_history_has_company"),
    array("sales_history_has_person"),
];

/// Separator splitting a relationship name into its from/to roles.
pub const ROLE_SEPARATOR: &str = "_has_";

/// Split a relationship name into `(from_role, to_role)`.
///
/// `property_has_sales` yields `("property", "sales")`. A name without a
/// well-formed separator falls back to the full name for both roles, so
/// labels stay traceable to the source relationship.
pub fn split_roles(name: &str) -> (&str, &str) {
    match name.split_once(ROLE_SEPARATOR) {
        Some((from, to)) if !from.is_empty() && !to.is_empty() => (from, to),
        _ => (name, name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn singles_precede_arrays() {
        let first_array = RELATIONSHIP_CATALOG
            .iter()
            .position(|spec| spec.kind == RelationshipKind::Array)
            .unwrap();
        assert!(RELATIONSHIP_CATALOG[..first_array]
            .iter()
            .all(|spec| spec.kind == RelationshipKind::Single));
        assert!(RELATIONSHIP_CATALOG[first_array..]
            .iter()
            .all(|spec| spec.kind == RelationshipKind::Array));
    }

    #[test]
    fn catalog_names_are_unique() {
        for (i, a) in RELATIONSHIP_CATALOG.iter().enumerate() {
            for b in &RELATIONSHIP_CATALOG[i + 1..] {
                assert_ne!(a.name, b.name);
            }
        }
    }

    #[test]
    fn declared_order_is_stable() {
        assert_eq!(RELATIONSHIP_CATALOG[0].name, "property_has_address");
        assert_eq!(RELATIONSHIP_CATALOG[5].name, "company_has_property");
        assert_eq!(RELATIONSHIP_CATALOG[12].name, "sales_history_has_person");
    }

    #[test]
    fn split_roles_on_separator() {
        assert_eq!(split_roles("property_has_sales"), ("property", "sales"));
        assert_eq!(
            split_roles("sales_history_has_person"),
            ("sales_history", "person")
        );
    }

    #[test]
    fn split_roles_fallback_for_malformed_names() {
        assert_eq!(split_roles("ownership"), ("ownership", "ownership"));
        assert_eq!(split_roles("_has_x"), ("_has_x", "_has_x"));
        assert_eq!(split_roles("x_has_"), ("x_has_", "x_has_"));
    }
}
