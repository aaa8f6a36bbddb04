use contracts::domain::a001_pilgrim::identity::AliasSet;
use contracts::domain::a001_pilgrim::relation::RelationTarget;
use contracts::domain::a001_pilgrim::summary::PilgrimSummary;

/// Pure lookup of a full pilgrim record from a heterogeneous identifier.
///
/// Candidates are searched in a fixed priority order: the family-summary
/// members first, then the general pilgrim list, then the single currently
/// loaded pilgrim. The first match wins; a record matches when its own alias
/// set intersects the aliases of the queried identifier. Blank identifiers
/// never match anything.
pub struct IdentityResolver<'a> {
    family: &'a [PilgrimSummary],
    pilgrims: &'a [PilgrimSummary],
    current: Option<&'a PilgrimSummary>,
}

impl<'a> IdentityResolver<'a> {
    pub fn new(
        family: &'a [PilgrimSummary],
        pilgrims: &'a [PilgrimSummary],
        current: Option<&'a PilgrimSummary>,
    ) -> Self {
        Self {
            family,
            pilgrims,
            current,
        }
    }

    /// Resolver with no candidate lists; resolves nothing
    pub fn empty() -> Self {
        Self {
            family: &[],
            pilgrims: &[],
            current: None,
        }
    }

    /// Resolve a bare string identifier
    pub fn resolve_id(&self, raw: &str) -> Option<&'a PilgrimSummary> {
        self.resolve_aliases(&AliasSet::from_raw(raw))
    }

    /// Resolve a legacy relation-target reference
    pub fn resolve_target(&self, target: &RelationTarget) -> Option<&'a PilgrimSummary> {
        self.resolve_aliases(&target.alias_set())
    }

    /// Resolve by an already-derived alias set
    pub fn resolve_aliases(&self, aliases: &AliasSet) -> Option<&'a PilgrimSummary> {
        if aliases.is_empty() {
            return None;
        }
        self.family
            .iter()
            .find(|candidate| candidate.alias_set().intersects(aliases))
            .or_else(|| {
                self.pilgrims
                    .iter()
                    .find(|candidate| candidate.alias_set().intersects(aliases))
            })
            .or_else(|| {
                self.current
                    .filter(|candidate| candidate.alias_set().intersects(aliases))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(id: &str, legacy: Option<&str>, customer: Option<&str>, name: &str) -> PilgrimSummary {
        PilgrimSummary {
            id: Some(id.to_string()),
            legacy_id: legacy.map(str::to_string),
            customer_id: customer.map(str::to_string),
            name: Some(name.to_string()),
            mobile: None,
        }
    }

    #[test]
    fn test_resolution_is_alias_insensitive() {
        let pilgrims = vec![summary("64fa0c", Some("H-55"), Some("C100"), "Karim")];
        let resolver = IdentityResolver::new(&[], &pilgrims, None);

        for query in ["64fa0c", "H-55", "C100"] {
            let hit = resolver.resolve_id(query).expect("should resolve");
            assert_eq!(hit.name.as_deref(), Some("Karim"), "query {}", query);
        }

        let target = RelationTarget {
            customer_id: Some("C100".into()),
            ..Default::default()
        };
        assert_eq!(
            resolver.resolve_target(&target).unwrap().name.as_deref(),
            Some("Karim")
        );
    }

    #[test]
    fn test_family_list_wins_over_pilgrim_list() {
        let family = vec![summary("64fa0c", None, None, "Family copy")];
        let pilgrims = vec![summary("64fa0c", None, None, "List copy")];
        let resolver = IdentityResolver::new(&family, &pilgrims, None);

        let hit = resolver.resolve_id("64fa0c").unwrap();
        assert_eq!(hit.name.as_deref(), Some("Family copy"));
    }

    #[test]
    fn test_falls_back_to_current_pilgrim() {
        let current = summary("64fa0c", None, Some("C100"), "Current");
        let resolver = IdentityResolver::new(&[], &[], Some(&current));

        assert_eq!(
            resolver.resolve_id("C100").unwrap().name.as_deref(),
            Some("Current")
        );
        assert!(resolver.resolve_id("C999").is_none());
    }

    #[test]
    fn test_blank_identifier_never_matches() {
        // A record with no identifiers must not be matched by a blank query
        let pilgrims = vec![PilgrimSummary {
            name: Some("No IDs".into()),
            ..Default::default()
        }];
        let resolver = IdentityResolver::new(&[], &pilgrims, None);

        assert!(resolver.resolve_id("").is_none());
        assert!(resolver.resolve_id("   ").is_none());
        assert!(resolver.resolve_target(&RelationTarget::default()).is_none());
    }
}
