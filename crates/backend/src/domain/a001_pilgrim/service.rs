use super::repository;
use contracts::domain::a001_pilgrim::aggregate::{Pilgrim, PilgrimDto};
use contracts::domain::a001_pilgrim::identity::AliasSet;
use contracts::domain::a001_pilgrim::relation::{Relation, RelationTarget};
use contracts::enums::RelationType;
use uuid::Uuid;

pub async fn create(dto: PilgrimDto) -> anyhow::Result<Uuid> {
    let code = dto
        .code
        .clone()
        .unwrap_or_else(|| format!("PIL-{}", Uuid::new_v4()));
    let mut aggregate = Pilgrim::new_for_insert(
        code,
        dto.description,
        dto.pilgrim_type,
        dto.mobile.unwrap_or_default(),
        dto.passport_no.unwrap_or_default(),
        dto.legacy_id,
        dto.comment,
    );

    aggregate
        .validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;
    aggregate.before_write();

    repository::insert(&aggregate).await
}

pub async fn update(dto: PilgrimDto) -> anyhow::Result<()> {
    let id = dto
        .id
        .as_ref()
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| anyhow::anyhow!("Invalid ID"))?;

    let mut aggregate = repository::get_by_id(id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Not found"))?;

    aggregate.update(&dto);

    aggregate
        .validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;
    aggregate.before_write();

    repository::update(&aggregate).await
}

pub async fn delete(id: Uuid) -> anyhow::Result<bool> {
    repository::soft_delete(id).await
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Pilgrim>> {
    repository::get_by_id(id).await
}

pub async fn list_all() -> anyhow::Result<Vec<Pilgrim>> {
    repository::list_all().await
}

/// Relation edge pointing at `target`, with the display snapshot the legacy
/// records carried
fn edge_to(target: &Pilgrim, relation_type: RelationType) -> Relation {
    Relation {
        target: RelationTarget::from_id(&target.to_string_id()),
        name: Some(target.base.description.clone()),
        mobile: if target.mobile.trim().is_empty() {
            None
        } else {
            Some(target.mobile.clone())
        },
        relation_type,
    }
}

fn has_edge_to(owner: &Pilgrim, target_aliases: &AliasSet) -> bool {
    owner
        .relations
        .iter()
        .any(|r| r.target.alias_set().intersects(target_aliases))
}

/// Link two pilgrims. The edge is written on both records, the way the legacy
/// back office kept relations; the given type is stored on the primary side
/// and mirrored verbatim on the related side. Each record's checks and edge
/// write happen inside one `mutate_by_alias` call, so concurrent links on the
/// same pilgrim cannot drop each other's edges.
pub async fn add_relation(
    primary_id: &str,
    related_id: &str,
    relation_type: RelationType,
) -> anyhow::Result<()> {
    // Snapshot of the related record for the edge display fields
    let related = repository::find_by_alias(related_id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Pilgrim {} not found", related_id))?;
    let related_aliases = related.alias_set();

    let (mirror, primary_aliases) = repository::mutate_by_alias(primary_id, |primary| {
        if primary.alias_set().intersects(&related_aliases) {
            anyhow::bail!("A pilgrim cannot be linked to themselves");
        }
        if has_edge_to(primary, &related_aliases) {
            anyhow::bail!("Pilgrims are already linked");
        }
        primary.relations.push(edge_to(&related, relation_type));
        primary.before_write();
        Ok((edge_to(primary, relation_type), primary.alias_set()))
    })
    .await?;

    repository::mutate_by_alias(&related.to_string_id(), |related| {
        if !has_edge_to(related, &primary_aliases) {
            related.relations.push(mirror);
            related.before_write();
        }
        Ok(())
    })
    .await
}

/// Unlink two pilgrims, dropping every matching edge from both records.
/// Returns false when the primary held no edge to the target.
pub async fn remove_relation(primary_id: &str, related_id: &str) -> anyhow::Result<bool> {
    let related = repository::find_by_alias(related_id).await?;
    let removal_aliases = match &related {
        Some(pilgrim) => pilgrim.alias_set(),
        // Target record may be gone already; fall back to the raw identifier
        None => AliasSet::from_raw(related_id),
    };

    let (removed, primary_aliases) = repository::mutate_by_alias(primary_id, |primary| {
        let before = primary.relations.len();
        primary
            .relations
            .retain(|r| !r.target.alias_set().intersects(&removal_aliases));
        let removed = primary.relations.len() < before;
        if removed {
            primary.before_write();
        }
        Ok((removed, primary.alias_set()))
    })
    .await?;

    if let Some(related) = related {
        repository::mutate_by_alias(&related.to_string_id(), |related| {
            let before = related.relations.len();
            related
                .relations
                .retain(|r| !r.target.alias_set().intersects(&primary_aliases));
            if related.relations.len() < before {
                related.before_write();
            }
            Ok(())
        })
        .await?;
    }

    Ok(removed)
}

pub async fn insert_test_data() -> anyhow::Result<()> {
    let karim = PilgrimDto {
        code: Some("C100".into()),
        description: "Karim Uddin".into(),
        mobile: Some("01712000001".into()),
        ..Default::default()
    };
    let rahim = PilgrimDto {
        code: Some("C200".into()),
        description: "Rahim Uddin".into(),
        mobile: Some("01812000002".into()),
        legacy_id: Some("H-55".into()),
        ..Default::default()
    };
    let karim_id = create(karim).await?;
    let rahim_id = create(rahim).await?;
    add_relation(
        &karim_id.to_string(),
        &rahim_id.to_string(),
        RelationType::Brother,
    )
    .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::enums::PilgrimType;

    // The repository is a process-wide store shared between tests, so every
    // assertion here is scoped to records created by the test itself.

    async fn make_pilgrim(code: &str, name: &str, legacy_id: Option<&str>) -> Uuid {
        create(PilgrimDto {
            code: Some(code.into()),
            description: name.into(),
            pilgrim_type: PilgrimType::Hajj,
            legacy_id: legacy_id.map(str::to_string),
            ..Default::default()
        })
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_add_relation_writes_both_sides() {
        let a = make_pilgrim("SVC-A1", "Abul", None).await;
        let b = make_pilgrim("SVC-B1", "Babul", None).await;

        add_relation(&a.to_string(), &b.to_string(), RelationType::Brother)
            .await
            .unwrap();

        let a_record = get_by_id(a).await.unwrap().unwrap();
        let b_record = get_by_id(b).await.unwrap().unwrap();
        assert!(a_record
            .relations
            .iter()
            .any(|r| r.target.alias_set().contains(&b.to_string())));
        assert!(b_record
            .relations
            .iter()
            .any(|r| r.target.alias_set().contains(&a.to_string())));
    }

    #[tokio::test]
    async fn test_add_relation_accepts_legacy_alias() {
        let a = make_pilgrim("SVC-A2", "Abul", None).await;
        let _b = make_pilgrim("SVC-B2", "Babul", Some("SVC-LEG-B2")).await;

        // Link by the related record's legacy identifier
        add_relation(&a.to_string(), "SVC-LEG-B2", RelationType::Sister)
            .await
            .unwrap();

        let a_record = get_by_id(a).await.unwrap().unwrap();
        assert_eq!(a_record.relations.len(), 1);
        // Duplicate via a different alias of the same pilgrim is rejected
        let b_id = a_record.relations[0].target.canonical_id().unwrap().to_string();
        assert!(add_relation(&a.to_string(), &b_id, RelationType::Brother)
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_self_link_is_rejected() {
        let a = make_pilgrim("SVC-A3", "Abul", None).await;
        assert!(
            add_relation(&a.to_string(), "SVC-A3", RelationType::Relative)
                .await
                .is_err()
        );
    }

    #[tokio::test]
    async fn test_remove_relation_clears_both_sides() {
        let a = make_pilgrim("SVC-A4", "Abul", None).await;
        let b = make_pilgrim("SVC-B4", "Babul", None).await;
        add_relation(&a.to_string(), &b.to_string(), RelationType::Son)
            .await
            .unwrap();

        let removed = remove_relation(&a.to_string(), &b.to_string()).await.unwrap();
        assert!(removed);

        let a_record = get_by_id(a).await.unwrap().unwrap();
        let b_record = get_by_id(b).await.unwrap().unwrap();
        assert!(a_record.relations.is_empty());
        assert!(b_record.relations.is_empty());

        // Removing again is a no-op, not an error
        let removed = remove_relation(&a.to_string(), &b.to_string()).await.unwrap();
        assert!(!removed);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_concurrent_adds_do_not_lose_edges() {
        use std::sync::Arc;
        use tokio::sync::Barrier;

        let primary = make_pilgrim("SVC-P6", "Primary", None).await;
        let mut related_ids = Vec::new();
        for i in 0..50 {
            let code = format!("SVC-R6-{}", i);
            let name = format!("Related {}", i);
            related_ids.push(make_pilgrim(&code, &name, None).await);
        }

        // All tasks hit add_relation at once; every edge must survive
        let barrier = Arc::new(Barrier::new(related_ids.len()));
        let mut handles = Vec::new();
        for related in &related_ids {
            let related = *related;
            let barrier = barrier.clone();
            handles.push(tokio::spawn(async move {
                barrier.wait().await;
                add_relation(
                    &primary.to_string(),
                    &related.to_string(),
                    RelationType::Relative,
                )
                .await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let record = get_by_id(primary).await.unwrap().unwrap();
        assert_eq!(record.relations.len(), related_ids.len());
        for related in &related_ids {
            let mirror = get_by_id(*related).await.unwrap().unwrap();
            assert_eq!(mirror.relations.len(), 1);
        }
    }

    #[tokio::test]
    async fn test_soft_deleted_pilgrims_are_not_linkable() {
        let a = make_pilgrim("SVC-A5", "Abul", None).await;
        let b = make_pilgrim("SVC-B5", "Babul", None).await;
        assert!(delete(b).await.unwrap());

        assert!(
            add_relation(&a.to_string(), &b.to_string(), RelationType::Relative)
                .await
                .is_err()
        );
    }
}
