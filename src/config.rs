/// Bucket count of the first allocation.
pub const DEFAULT_INITIAL_CAPACITY: usize = 16;

/// What happens to existing entries when the bucket array grows.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum Growth {
    /// Relink every entry into `hash mod new_capacity`.
    #[default]
    Rehash,

    /// Append empty buckets and leave existing chains where they are.
    ///
    /// Entries whose bucket index changes with the new capacity can no
    /// longer be found by key. They are still counted, iterated and
    /// dropped with the map.
    InPlace,
}

/// Hash map configuration
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct MapConfig {
    pub(crate) growth: Growth,
    pub(crate) initial_capacity: usize,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            growth: Growth::default(),
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
        }
    }
}

impl MapConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the growth mode.
    #[must_use]
    pub fn with_growth(mut self, growth: Growth) -> Self {
        self.growth = growth;
        self
    }

    /// Sets the bucket count of the first allocation (at least 1).
    #[must_use]
    pub fn with_initial_capacity(mut self, buckets: usize) -> Self {
        self.initial_capacity = buckets.max(1);
        self
    }

    pub fn growth(&self) -> Growth {
        self.growth
    }

    pub fn initial_capacity(&self) -> usize {
        self.initial_capacity
    }
}
