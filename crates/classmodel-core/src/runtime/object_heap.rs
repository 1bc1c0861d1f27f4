//! Generational arena for class instances.

use std::fmt;

use rustc_hash::FxHashMap;

use crate::{TypeHash, Value};

/// Handle to a heap-allocated instance.
///
/// A copyable reference to an object in the `ObjectHeap`. The generation
/// makes handles to released instances detectable instead of aliasing
/// whatever reuses the slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObjectHandle {
    /// Index into ObjectHeap.slots
    pub index: u32,
    /// Generation for use-after-release detection
    pub generation: u32,
}

impl ObjectHandle {
    /// Create a new object handle.
    pub fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }
}

/// Instance state: the class it was constructed from and its own fields.
///
/// Fields are never shared between instances; static members live in the
/// registry, not here.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptObject {
    /// Hash of the instantiated class.
    pub class: TypeHash,
    /// Instance properties by (case-sensitive) name.
    pub fields: FxHashMap<String, Value>,
}

impl ScriptObject {
    /// Create an instance of `class` with the given initial fields.
    pub fn new(class: TypeHash, fields: FxHashMap<String, Value>) -> Self {
        Self { class, fields }
    }

    /// Read a field.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Overwrite (or create) a field.
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.fields.insert(name.into(), value);
    }
}

/// Heap storage for instances with generational indices.
///
/// Objects are stored in a Vec with generation tracking. When an object
/// is released, its slot is reused but the generation is incremented.
pub struct ObjectHeap {
    slots: Vec<HeapSlot>,
    free_list: Vec<u32>,
}

struct HeapSlot {
    generation: u32,
    value: Option<ScriptObject>,
}

impl ObjectHeap {
    /// Create a new empty object heap.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_list: Vec::new(),
        }
    }

    /// Allocate a new object on the heap.
    pub fn allocate(&mut self, object: ScriptObject) -> ObjectHandle {
        if let Some(index) = self.free_list.pop() {
            let slot = &mut self.slots[index as usize];
            slot.value = Some(object);
            ObjectHandle::new(index, slot.generation)
        } else {
            let index = self.slots.len() as u32;
            self.slots.push(HeapSlot {
                generation: 0,
                value: Some(object),
            });
            ObjectHandle::new(index, 0)
        }
    }

    /// Get an immutable reference to an object.
    ///
    /// Returns None if the handle is stale.
    pub fn get(&self, handle: ObjectHandle) -> Option<&ScriptObject> {
        let slot = self.slots.get(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        slot.value.as_ref()
    }

    /// Get a mutable reference to an object.
    ///
    /// Returns None if the handle is stale.
    pub fn get_mut(&mut self, handle: ObjectHandle) -> Option<&mut ScriptObject> {
        let slot = self.slots.get_mut(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        slot.value.as_mut()
    }

    /// Release an object.
    ///
    /// Returns true if the handle was live.
    pub fn free(&mut self, handle: ObjectHandle) -> bool {
        if let Some(slot) = self.slots.get_mut(handle.index as usize)
            && slot.generation == handle.generation
            && slot.value.is_some()
        {
            slot.value = None;
            slot.generation = slot.generation.wrapping_add(1);
            self.free_list.push(handle.index);
            return true;
        }
        false
    }

    /// Number of live objects.
    pub fn live_count(&self) -> usize {
        self.slots.len() - self.free_list.len()
    }
}

impl Default for ObjectHeap {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ObjectHeap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectHeap")
            .field("slot_count", &self.slots.len())
            .field("free_count", &self.free_list.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn object(value: &str) -> ScriptObject {
        let mut fields = FxHashMap::default();
        fields.insert("value".to_string(), Value::from(value));
        ScriptObject::new(TypeHash::from_name("a"), fields)
    }

    #[test]
    fn allocate_and_get() {
        let mut heap = ObjectHeap::new();
        let h = heap.allocate(object("str"));
        assert_eq!(heap.get(h).unwrap().get("value"), Some(&Value::from("str")));
        assert_eq!(heap.live_count(), 1);
    }

    #[test]
    fn instances_are_independent() {
        let mut heap = ObjectHeap::new();
        let a = heap.allocate(object("str"));
        let b = heap.allocate(object("str"));
        heap.get_mut(a).unwrap().set("value", Value::from("hello"));
        assert_eq!(
            heap.get(a).unwrap().get("value"),
            Some(&Value::from("hello"))
        );
        assert_eq!(heap.get(b).unwrap().get("value"), Some(&Value::from("str")));
    }

    #[test]
    fn freed_handle_is_stale() {
        let mut heap = ObjectHeap::new();
        let h = heap.allocate(object("str"));
        assert!(heap.free(h));
        assert!(heap.get(h).is_none());
        assert!(!heap.free(h));
        assert_eq!(heap.live_count(), 0);
    }

    #[test]
    fn slot_reuse_bumps_generation() {
        let mut heap = ObjectHeap::new();
        let old = heap.allocate(object("old"));
        heap.free(old);
        let new = heap.allocate(object("new"));
        assert_eq!(old.index, new.index);
        assert_ne!(old.generation, new.generation);
        assert!(heap.get(old).is_none());
        let object = heap.get(new).unwrap();
        assert_eq!(object.get("value"), Some(&Value::from("new")));
    }
}
