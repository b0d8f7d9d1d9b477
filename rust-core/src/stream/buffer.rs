//! Lock-free frame queue
//!
//! Single-producer/single-consumer hand-off of channel vectors from an
//! acquisition thread to the thread that owns the processing chain.

use ringbuf::{HeapConsumer, HeapProducer, HeapRb};

use crate::Frame;

/// Queue of `C`-channel frames
pub struct FrameQueue<const C: usize> {
    producer: HeapProducer<Frame<C>>,
    consumer: HeapConsumer<Frame<C>>,
    capacity: usize,
}

impl<const C: usize> FrameQueue<C> {
    /// Create a queue holding up to `capacity` frames
    ///
    /// # Panics
    /// If `capacity` is zero. `ProcessingConfig::validate` rejects a zero
    /// `queue_capacity` before a queue is built from it.
    pub fn new(capacity: usize) -> Self {
        let rb = HeapRb::<Frame<C>>::new(capacity);
        let (producer, consumer) = rb.split();

        Self {
            producer,
            consumer,
            capacity,
        }
    }

    /// Split into producer and consumer ends
    pub fn split(self) -> (FrameProducer<C>, FrameConsumer<C>) {
        (
            FrameProducer {
                producer: self.producer,
                capacity: self.capacity,
            },
            FrameConsumer {
                consumer: self.consumer,
                capacity: self.capacity,
            },
        )
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Writing end of a [`FrameQueue`]
pub struct FrameProducer<const C: usize> {
    producer: HeapProducer<Frame<C>>,
    capacity: usize,
}

impl<const C: usize> FrameProducer<C> {
    /// Queue one frame; `false` if the queue is full and the frame was dropped
    pub fn push(&mut self, frame: Frame<C>) -> bool {
        self.producer.push(frame).is_ok()
    }

    /// Queue as many frames as fit, returning how many were written
    pub fn push_slice(&mut self, frames: &[Frame<C>]) -> usize {
        self.producer.push_slice(frames)
    }

    pub fn free_len(&self) -> usize {
        self.producer.free_len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Reading end of a [`FrameQueue`]
pub struct FrameConsumer<const C: usize> {
    consumer: HeapConsumer<Frame<C>>,
    capacity: usize,
}

impl<const C: usize> FrameConsumer<C> {
    pub fn pop(&mut self) -> Option<Frame<C>> {
        self.consumer.pop()
    }

    /// Read up to `frames.len()` frames, returning how many were read
    pub fn pop_slice(&mut self, frames: &mut [Frame<C>]) -> usize {
        self.consumer.pop_slice(frames)
    }

    /// Number of queued frames
    pub fn len(&self) -> usize {
        self.consumer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.consumer.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
