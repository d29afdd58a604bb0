//! Reusable string buffers for script assembly.
//!
//! Generated scripts run to tens of kilobytes; keeping a few warm buffers
//! around avoids regrowing one on every call. Buffers that grew past
//! `max_capacity` are dropped instead of pooled.

use std::ops::{Deref, DerefMut};
use std::sync::{Mutex, MutexGuard, PoisonError};

const INITIAL_CAPACITY: usize = 16 * 1024;
const MAX_POOLED_CAPACITY: usize = 256 * 1024;
const MAX_IDLE_BUFFERS: usize = 16;

/// Pool shared by every generator call.
pub(crate) static SCRIPT_BUFFERS: BufferPool = BufferPool::new(MAX_POOLED_CAPACITY, MAX_IDLE_BUFFERS);

pub(crate) struct BufferPool {
    idle: Mutex<Vec<String>>,
    max_capacity: usize,
    max_idle: usize,
}

impl BufferPool {
    pub(crate) const fn new(max_capacity: usize, max_idle: usize) -> Self {
        Self {
            idle: Mutex::new(Vec::new()),
            max_capacity,
            max_idle,
        }
    }

    /// Takes an empty buffer from the pool, allocating when none is idle.
    pub(crate) fn acquire(&self) -> PooledBuffer<'_> {
        let buf = self
            .lock()
            .pop()
            .unwrap_or_else(|| String::with_capacity(INITIAL_CAPACITY));
        PooledBuffer { buf, pool: self }
    }

    fn release(&self, mut buf: String) {
        if buf.capacity() > self.max_capacity {
            return;
        }
        buf.clear();
        let mut idle = self.lock();
        if idle.len() < self.max_idle {
            idle.push(buf);
        }
    }

    #[cfg(test)]
    fn idle_count(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<String>> {
        self.idle.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// A buffer that returns to its pool when dropped.
pub(crate) struct PooledBuffer<'a> {
    buf: String,
    pool: &'a BufferPool,
}

impl Deref for PooledBuffer<'_> {
    type Target = String;

    fn deref(&self) -> &String {
        &self.buf
    }
}

impl DerefMut for PooledBuffer<'_> {
    fn deref_mut(&mut self) -> &mut String {
        &mut self.buf
    }
}

impl Drop for PooledBuffer<'_> {
    fn drop(&mut self) {
        self.pool.release(std::mem::take(&mut self.buf));
    }
}
