/// Default number of slots allocated by [`RingBuffer::new`].
pub const DEFAULT_CAPACITY: usize = 256;

/// A growable circular buffer that owns its elements.
///
/// Elements are appended at the tail and removed from the head. Logical index
/// 0 is always the oldest element. The physical layout wraps modulo the
/// capacity, which is always a power of two and doubles when the buffer is
/// full.
#[derive(Debug)]
pub struct RingBuffer<T> {
    slots: Vec<Option<T>>,
    /// Physical slot of logical index 0.
    head: usize,
    len: usize,
}

impl<T> RingBuffer<T> {
    /// Creates an empty buffer with [`DEFAULT_CAPACITY`] slots.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty buffer with at least `capacity` slots, rounded up to
    /// a power of two.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1).next_power_of_two();
        Self {
            slots: std::iter::repeat_with(|| None).take(capacity).collect(),
            head: 0,
            len: 0,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of slots currently allocated.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    fn mask(&self) -> usize {
        self.slots.len() - 1
    }

    #[inline]
    fn physical(&self, index: usize) -> usize {
        (self.head + index) & self.mask()
    }

    /// Returns the element at logical `index`, oldest first.
    pub fn get(&self, index: usize) -> Option<&T> {
        if index >= self.len {
            return None;
        }
        self.slots[self.physical(index)].as_ref()
    }

    pub fn first(&self) -> Option<&T> {
        self.get(0)
    }

    pub fn last(&self) -> Option<&T> {
        self.len.checked_sub(1).and_then(|i| self.get(i))
    }

    pub fn last_mut(&mut self) -> Option<&mut T> {
        let index = self.len.checked_sub(1)?;
        let slot = self.physical(index);
        self.slots[slot].as_mut()
    }

    /// Appends `item` at the tail, doubling the capacity first if full.
    pub fn push(&mut self, item: T) {
        if self.len == self.slots.len() {
            self.grow();
        }
        let slot = self.physical(self.len);
        self.slots[slot] = Some(item);
        self.len += 1;
    }

    /// Removes and returns the oldest element.
    pub fn pop_front(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        let item = self.slots[self.head].take();
        self.head = (self.head + 1) & self.mask();
        self.len -= 1;
        item
    }

    /// Iterates over the elements, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        (0..self.len).filter_map(move |i| self.get(i))
    }

    /// Moves every element into a buffer of twice the capacity, unwrapping
    /// the logical order so that the head lands on slot 0.
    fn grow(&mut self) {
        let capacity = self.slots.len() * 2;
        let mut slots: Vec<Option<T>> = Vec::with_capacity(capacity);
        for i in 0..self.len {
            let slot = self.physical(i);
            slots.push(self.slots[slot].take());
        }
        slots.resize_with(capacity, || None);

        log::debug!("ring buffer grown from {} to {} slots", self.slots.len(), capacity);
        self.slots = slots;
        self.head = 0;
    }
}

impl<T> Default for RingBuffer<T> {
    fn default() -> Self {
        Self::new()
    }
}
