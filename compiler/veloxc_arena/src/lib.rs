//! Contains the definition of [`Arena`] and [`ID`].
//!
//! [`Arena`] is a data structure that stores items of type `T` and hands out
//! typed [`ID`]s referring to them. The typed index prevents accidentally
//! using an ID of one arena to index into another.

use std::{
    borrow::Borrow,
    collections::{hash_map::Entry, HashMap},
    fmt::Debug,
    hash::Hash,
    marker::PhantomData,
    ops::{Index, IndexMut},
};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Represents an unique identifier to a particular entry in the [`Arena`] of
/// type `T`.
pub struct ID<T> {
    index: usize,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Debug for ID<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let type_name = std::any::type_name::<T>();
        f.debug_tuple(format!("ID<{type_name}>").as_str())
            .field(&self.index)
            .finish()
    }
}

impl<T> ID<T> {
    /// Creates a new [`ID`] with the given index.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self { index, _marker: PhantomData }
    }

    /// Returns the index of the [`ID`].
    #[must_use]
    pub const fn into_index(self) -> usize { self.index }
}

impl<T> Clone for ID<T> {
    fn clone(&self) -> Self { *self }
}

impl<T> Copy for ID<T> {}

impl<T> PartialEq for ID<T> {
    fn eq(&self, other: &Self) -> bool { self.index == other.index }
}

impl<T> Eq for ID<T> {}

impl<T> PartialOrd for ID<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for ID<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.index.cmp(&other.index)
    }
}

impl<T> Hash for ID<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.index.hash(state);
    }
}

impl<T> Serialize for ID<T> {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        self.index.serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for ID<T> {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Self, D::Error> {
        usize::deserialize(deserializer).map(Self::new)
    }
}

/// Represents a collection of items of type `T` that can be referenced by an
/// [`ID`].
///
/// Internally, all the items are stored in a [`Vec`], and the [`ID`] is just
/// an index to the item in the [`Vec`]. Unlike [`Vec`], the [`Arena`] doesn't
/// allow removing items in between since it would invalidate all the [`ID`]s
/// given out before.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Arena<T> {
    items: Vec<T>,
}

impl<T> Default for Arena<T> {
    fn default() -> Self { Self { items: Vec::new() } }
}

impl<T> Arena<T> {
    /// Creates a new empty [`Arena`].
    #[must_use]
    pub const fn new() -> Self { Self { items: Vec::new() } }

    /// Returns the number of items in the [`Arena`].
    #[must_use]
    pub fn len(&self) -> usize { self.items.len() }

    /// Returns `true` if the [`Arena`] contains no items.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.items.is_empty() }

    /// Inserts a new item into the [`Arena`] and returns its [`ID`].
    pub fn insert(&mut self, item: T) -> ID<T> {
        let index = self.items.len();
        self.items.push(item);
        ID::new(index)
    }

    /// Returns a reference to the item in the [`Arena`] with the given [`ID`].
    #[must_use]
    pub fn get(&self, id: ID<T>) -> Option<&T> {
        self.items.get(id.into_index())
    }

    /// Returns a mutable reference to the item in the [`Arena`] with the
    /// given [`ID`].
    #[must_use]
    pub fn get_mut(&mut self, id: ID<T>) -> Option<&mut T> {
        self.items.get_mut(id.into_index())
    }

    /// Returns an iterator over the items in the [`Arena`] in insertion
    /// order.
    #[must_use]
    pub fn items(&self) -> impl ExactSizeIterator<Item = &T> {
        self.items.iter()
    }

    /// Returns a mutable iterator over the items in the [`Arena`] in
    /// insertion order.
    pub fn items_mut(&mut self) -> impl ExactSizeIterator<Item = &mut T> {
        self.items.iter_mut()
    }

    /// Returns an iterator over the [`ID`]s of the items in the [`Arena`].
    #[must_use]
    pub fn ids(&self) -> impl ExactSizeIterator<Item = ID<T>> {
        (0..self.items.len()).map(ID::new)
    }

    /// Returns an iterator over the `(ID, &T)` pairs in the [`Arena`] in
    /// insertion order.
    #[must_use]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (ID<T>, &T)> {
        self.items.iter().enumerate().map(|(index, item)| (ID::new(index), item))
    }
}

impl<T> Index<ID<T>> for Arena<T> {
    type Output = T;

    fn index(&self, id: ID<T>) -> &Self::Output { self.get(id).unwrap() }
}

impl<T> IndexMut<ID<T>> for Arena<T> {
    fn index_mut(&mut self, id: ID<T>) -> &mut Self::Output {
        self.get_mut(id).unwrap()
    }
}

impl<T> IntoIterator for Arena<T> {
    type IntoIter = std::vec::IntoIter<T>;
    type Item = T;

    fn into_iter(self) -> Self::IntoIter { self.items.into_iter() }
}

impl<'a, T> IntoIterator for &'a Arena<T> {
    type IntoIter = std::slice::Iter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter { self.items.iter() }
}

impl<T: Serialize> Serialize for Arena<T> {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        self.items.serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Arena<T> {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Self, D::Error> {
        Vec::deserialize(deserializer).map(|items| Self { items })
    }
}

/// Represents a collection that allows referencing items either by their `K`
/// key or by their [`ID`].
///
/// Accessing the items by their [`ID`] is more efficient than accessing them
/// by their `K` key since the former is just an index into the underlying
/// [`Arena`], while the latter requires a hash map lookup.
#[derive(
    Debug, Clone, PartialEq, Eq, derive_more::Index, derive_more::IndexMut,
)]
pub struct Map<T, K: Hash + Eq = String> {
    #[index]
    #[index_mut]
    arena: Arena<T>,

    ids_by_key: HashMap<K, ID<T>>,
}

impl<T, K: Hash + Eq> Map<T, K> {
    /// Creates a new empty [`Map`].
    #[must_use]
    pub fn new() -> Self {
        Self { arena: Arena::new(), ids_by_key: HashMap::new() }
    }

    /// Returns the number of items in the [`Map`].
    #[must_use]
    pub fn len(&self) -> usize { self.arena.len() }

    /// Returns `true` if the [`Map`] contains no items.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.arena.is_empty() }

    /// Inserts a new item into the [`Map`] with the given key.
    ///
    /// # Errors
    ///
    /// Returns [`Err`] with the [`ID`] of the existing item and the rejected
    /// new item if the key already exists in the [`Map`].
    pub fn insert(&mut self, key: K, item: T) -> Result<ID<T>, (ID<T>, T)> {
        match self.ids_by_key.entry(key) {
            Entry::Occupied(entry) => Err((*entry.get(), item)),
            Entry::Vacant(entry) => {
                let id = self.arena.insert(item);
                entry.insert(id);
                Ok(id)
            }
        }
    }

    /// Returns the [`ID`] of the item in the [`Map`] with the given key.
    #[must_use]
    pub fn get_id<Q: ?Sized + Hash + Eq>(&self, key: &Q) -> Option<ID<T>>
    where
        K: Borrow<Q>,
    {
        self.ids_by_key.get(key).copied()
    }

    /// Returns a reference to the item in the [`Map`] with the given [`ID`].
    #[must_use]
    pub fn get(&self, id: ID<T>) -> Option<&T> { self.arena.get(id) }

    /// Returns a mutable reference to the item in the [`Map`] with the given
    /// [`ID`].
    #[must_use]
    pub fn get_mut(&mut self, id: ID<T>) -> Option<&mut T> {
        self.arena.get_mut(id)
    }

    /// Returns an iterator over the [`ID`]s of the items in the [`Map`] in
    /// insertion order.
    #[must_use]
    pub fn ids(&self) -> impl ExactSizeIterator<Item = ID<T>> {
        self.arena.ids()
    }

    /// Returns an iterator over the items in the [`Map`] in insertion order.
    #[must_use]
    pub fn items(&self) -> impl ExactSizeIterator<Item = &T> {
        self.arena.items()
    }

    /// Returns an iterator over the `(ID, &T)` pairs in the [`Map`] in
    /// insertion order.
    #[must_use]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (ID<T>, &T)> {
        self.arena.iter()
    }
}

impl<T, K: Hash + Eq> Default for Map<T, K> {
    fn default() -> Self { Self::new() }
}

#[cfg(test)]
mod test;
