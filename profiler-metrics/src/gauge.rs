use fnv::FnvHashMap;
use std::hash::Hash;

pub struct Gauges<T> {
    data: FnvHashMap<T, u64>,
}

impl<T> Default for Gauges<T>
where
    T: Hash + Eq,
{
    fn default() -> Self {
        Gauges::new()
    }
}

impl<T> Gauges<T>
where
    T: Hash + Eq,
{
    /// Create a new `Gauges` object with no interests.
    pub fn new() -> Gauges<T> {
        Gauges {
            data: FnvHashMap::default(),
        }
    }

    /// Register an interest and set its value to 0
    pub fn init(&mut self, key: T) {
        self.data.insert(key, 0);
    }

    /// Set the gauge with the given key to the given value.
    /// If the key hasn't been registered, this is ignored.
    pub fn set(&mut self, key: &T, val: u64) {
        if let Some(v) = self.data.get_mut(key) {
            *v = val;
        }
    }

    /// Get the value of the gauge with the given key, if that key is registered
    pub fn get(&self, key: &T) -> Option<u64> {
        self.data.get(key).copied()
    }
}
