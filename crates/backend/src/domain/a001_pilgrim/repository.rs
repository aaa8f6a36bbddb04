use contracts::domain::a001_pilgrim::aggregate::Pilgrim;
use contracts::domain::a001_pilgrim::identity::AliasSet;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

// Keyed by the string form of the store ID. The legacy database is out of
// scope; the whole working set lives in process memory behind one lock,
// matching the single global connection of the previous setup.
static STORE: Lazy<RwLock<HashMap<String, Pilgrim>>> = Lazy::new(|| RwLock::new(HashMap::new()));

fn store() -> &'static RwLock<HashMap<String, Pilgrim>> {
    &STORE
}

pub async fn list_all() -> anyhow::Result<Vec<Pilgrim>> {
    let guard = store().read().expect("pilgrim store poisoned");
    let mut items: Vec<Pilgrim> = guard
        .values()
        .filter(|p| !p.base.metadata.is_deleted)
        .cloned()
        .collect();
    // Sort by name (case-insensitive)
    items.sort_by(|a, b| {
        a.base
            .description
            .to_lowercase()
            .cmp(&b.base.description.to_lowercase())
    });
    Ok(items)
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Pilgrim>> {
    let guard = store().read().expect("pilgrim store poisoned");
    Ok(guard.get(&id.to_string()).cloned())
}

/// Find a live record by any of its identifier aliases (store ID, legacy ID,
/// customer code). Relation endpoints accept all of them.
pub async fn find_by_alias(raw: &str) -> anyhow::Result<Option<Pilgrim>> {
    let aliases = AliasSet::from_raw(raw);
    if aliases.is_empty() {
        return Ok(None);
    }
    let guard = store().read().expect("pilgrim store poisoned");
    Ok(guard
        .values()
        .find(|p| !p.base.metadata.is_deleted && p.alias_set().intersects(&aliases))
        .cloned())
}

/// Apply `f` to the live record matching `raw` while holding the store's
/// write lock. The lookup, the mutation, and the write-back happen under one
/// lock acquisition, so concurrent edge writes on the same record cannot
/// overwrite each other.
pub async fn mutate_by_alias<T>(
    raw: &str,
    f: impl FnOnce(&mut Pilgrim) -> anyhow::Result<T>,
) -> anyhow::Result<T> {
    let aliases = AliasSet::from_raw(raw);
    if aliases.is_empty() {
        anyhow::bail!("Pilgrim {} not found", raw);
    }
    let mut guard = store().write().expect("pilgrim store poisoned");
    let pilgrim = guard
        .values_mut()
        .find(|p| !p.base.metadata.is_deleted && p.alias_set().intersects(&aliases))
        .ok_or_else(|| anyhow::anyhow!("Pilgrim {} not found", raw))?;
    f(pilgrim)
}

pub async fn insert(aggregate: &Pilgrim) -> anyhow::Result<Uuid> {
    let uuid = aggregate.base.id.value();
    let mut guard = store().write().expect("pilgrim store poisoned");
    guard.insert(uuid.to_string(), aggregate.clone());
    Ok(uuid)
}

pub async fn update(aggregate: &Pilgrim) -> anyhow::Result<()> {
    let key = aggregate.base.id.value().to_string();
    let mut guard = store().write().expect("pilgrim store poisoned");
    if !guard.contains_key(&key) {
        anyhow::bail!("pilgrim {} not found", key);
    }
    guard.insert(key, aggregate.clone());
    Ok(())
}

pub async fn soft_delete(id: Uuid) -> anyhow::Result<bool> {
    let mut guard = store().write().expect("pilgrim store poisoned");
    match guard.get_mut(&id.to_string()) {
        Some(pilgrim) => {
            pilgrim.base.metadata.is_deleted = true;
            pilgrim.base.touch();
            Ok(true)
        }
        None => Ok(false),
    }
}
