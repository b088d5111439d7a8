//! Placed objects on the player's grid.

use std::collections::BTreeMap;

use strum::{AsRefStr, Display, EnumIter};

use super::common::{Coordinates, ItemName, ObjectId, Timestamp};
use super::error::StateError;

/// Broad family of a placeable kind. Decides which list a placed instance
/// lives in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display, AsRefStr, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PlaceableCategory {
    Building,
    Collectible,
    Resource,
}

/// One instance of a placeable kind on the grid.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct PlacedObject {
    pub id: ObjectId,
    pub coordinates: Coordinates,
    pub created_at: Timestamp,
    pub ready_at: Timestamp,
}

impl PlacedObject {
    /// New object whose creation and readiness coincide.
    pub fn new(id: ObjectId, coordinates: Coordinates, now: Timestamp) -> Self {
        Self {
            id,
            coordinates,
            created_at: now,
            ready_at: now,
        }
    }
}

type KindMap = BTreeMap<ItemName, Vec<PlacedObject>>;

/// Every placed object, grouped by category then by kind.
///
/// Lists preserve insertion order. Ids are unique within a kind's list;
/// [`PlacedObjects::insert`] is the only way to add an object and refuses
/// duplicates.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlacedObjects {
    #[cfg_attr(feature = "serde", serde(default))]
    buildings: KindMap,
    #[cfg_attr(feature = "serde", serde(default))]
    collectibles: KindMap,
    #[cfg_attr(feature = "serde", serde(default))]
    resources: KindMap,
}

impl PlacedObjects {
    pub fn new() -> Self {
        Self::default()
    }

    fn kinds(&self, category: PlaceableCategory) -> &KindMap {
        match category {
            PlaceableCategory::Building => &self.buildings,
            PlaceableCategory::Collectible => &self.collectibles,
            PlaceableCategory::Resource => &self.resources,
        }
    }

    fn kinds_mut(&mut self, category: PlaceableCategory) -> &mut KindMap {
        match category {
            PlaceableCategory::Building => &mut self.buildings,
            PlaceableCategory::Collectible => &mut self.collectibles,
            PlaceableCategory::Resource => &mut self.resources,
        }
    }

    /// Placed instances of one kind, in placement order.
    pub fn list(&self, category: PlaceableCategory, name: &ItemName) -> &[PlacedObject] {
        self.kinds(category)
            .get(name)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn count(&self, category: PlaceableCategory, name: &ItemName) -> usize {
        self.list(category, name).len()
    }

    pub fn find(
        &self,
        category: PlaceableCategory,
        name: &ItemName,
        id: &ObjectId,
    ) -> Option<&PlacedObject> {
        self.list(category, name).iter().find(|object| &object.id == id)
    }

    pub fn contains(&self, category: PlaceableCategory, name: &ItemName, id: &ObjectId) -> bool {
        self.find(category, name, id).is_some()
    }

    /// Appends `object` to its kind's list.
    pub fn insert(
        &mut self,
        category: PlaceableCategory,
        name: &ItemName,
        object: PlacedObject,
    ) -> Result<(), StateError> {
        if self.contains(category, name, &object.id) {
            return Err(StateError::DuplicateObjectId {
                name: name.clone(),
                id: object.id,
            });
        }
        self.kinds_mut(category)
            .entry(name.clone())
            .or_default()
            .push(object);
        Ok(())
    }

    /// Moves an existing object. Only coordinates change.
    pub fn relocate(
        &mut self,
        category: PlaceableCategory,
        name: &ItemName,
        id: &ObjectId,
        coordinates: Coordinates,
    ) -> Result<(), StateError> {
        let object = self
            .kinds_mut(category)
            .get_mut(name)
            .and_then(|list| list.iter_mut().find(|object| &object.id == id))
            .ok_or_else(|| StateError::ObjectNotFound {
                name: name.clone(),
                id: id.clone(),
            })?;
        object.coordinates = coordinates;
        Ok(())
    }

    /// Removes an object and returns it. Empty kind lists are dropped.
    pub fn remove(
        &mut self,
        category: PlaceableCategory,
        name: &ItemName,
        id: &ObjectId,
    ) -> Result<PlacedObject, StateError> {
        let kinds = self.kinds_mut(category);
        let not_found = || StateError::ObjectNotFound {
            name: name.clone(),
            id: id.clone(),
        };
        let list = kinds.get_mut(name).ok_or_else(not_found)?;
        let index = list
            .iter()
            .position(|object| &object.id == id)
            .ok_or_else(not_found)?;
        let removed = list.remove(index);
        if list.is_empty() {
            kinds.remove(name);
        }
        Ok(removed)
    }

    /// Iterates every placed object across all categories.
    ///
    /// Order is deterministic: buildings, collectibles, resources; kinds by
    /// name; objects in placement order.
    pub fn iter(&self) -> impl Iterator<Item = (PlaceableCategory, &ItemName, &PlacedObject)> {
        [
            (PlaceableCategory::Building, &self.buildings),
            (PlaceableCategory::Collectible, &self.collectibles),
            (PlaceableCategory::Resource, &self.resources),
        ]
        .into_iter()
        .flat_map(|(category, kinds)| {
            kinds.iter().flat_map(move |(name, objects)| {
                objects.iter().map(move |object| (category, name, object))
            })
        })
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.buildings.is_empty() && self.collectibles.is_empty() && self.resources.is_empty()
    }

    /// First kind whose list holds the same id twice.
    pub fn first_duplicate(&self) -> Option<(&ItemName, &ObjectId)> {
        [&self.buildings, &self.collectibles, &self.resources]
            .into_iter()
            .flat_map(|kinds| kinds.iter())
            .find_map(|(name, objects)| {
                objects.iter().enumerate().find_map(|(index, object)| {
                    objects[..index]
                        .iter()
                        .any(|earlier| earlier.id == object.id)
                        .then_some((name, &object.id))
                })
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree(id: &str, x: i32, y: i32) -> PlacedObject {
        PlacedObject::new(ObjectId::from(id), Coordinates::new(x, y), Timestamp::ZERO)
    }

    #[test]
    fn insert_rejects_duplicate_ids_within_a_kind() {
        let mut placed = PlacedObjects::new();
        let name = ItemName::from("Tree");
        placed
            .insert(PlaceableCategory::Resource, &name, tree("a", 0, 0))
            .unwrap();

        let err = placed
            .insert(PlaceableCategory::Resource, &name, tree("a", 4, 4))
            .unwrap_err();

        assert!(matches!(err, StateError::DuplicateObjectId { .. }));
        assert_eq!(placed.count(PlaceableCategory::Resource, &name), 1);
    }

    #[test]
    fn same_id_is_allowed_across_kinds() {
        let mut placed = PlacedObjects::new();
        placed
            .insert(PlaceableCategory::Resource, &ItemName::from("Tree"), tree("a", 0, 0))
            .unwrap();
        placed
            .insert(PlaceableCategory::Resource, &ItemName::from("Stone Rock"), tree("a", 2, 2))
            .unwrap();

        assert_eq!(placed.len(), 2);
        assert!(placed.first_duplicate().is_none());
    }

    #[test]
    fn remove_drops_empty_lists() {
        let mut placed = PlacedObjects::new();
        let name = ItemName::from("Gnome");
        placed
            .insert(PlaceableCategory::Collectible, &name, tree("g1", 1, 1))
            .unwrap();

        let removed = placed
            .remove(PlaceableCategory::Collectible, &name, &ObjectId::from("g1"))
            .unwrap();

        assert_eq!(removed.coordinates, Coordinates::new(1, 1));
        assert!(placed.is_empty());
    }

    #[test]
    fn relocate_changes_only_coordinates() {
        let mut placed = PlacedObjects::new();
        let name = ItemName::from("Gnome");
        placed
            .insert(PlaceableCategory::Collectible, &name, tree("g1", 1, 1))
            .unwrap();

        placed
            .relocate(
                PlaceableCategory::Collectible,
                &name,
                &ObjectId::from("g1"),
                Coordinates::new(5, -2),
            )
            .unwrap();

        let moved = placed
            .find(PlaceableCategory::Collectible, &name, &ObjectId::from("g1"))
            .unwrap();
        assert_eq!(moved.coordinates, Coordinates::new(5, -2));
        assert_eq!(moved.created_at, Timestamp::ZERO);
    }
}
