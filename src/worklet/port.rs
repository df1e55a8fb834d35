//! Message channel from the audio thread to the main-thread consumer.

use crossbeam::channel::{Receiver, Sender, unbounded};

/// A PCM buffer with transferable-object semantics.
///
/// The samples can be taken out exactly once with [`detach`](Self::detach);
/// every access after that panics. Combined with [`MessagePort::post`] taking
/// the buffer by value, this enforces the one-shot ownership handoff: once a
/// buffer has been posted or detached, no producer-side alias can observe or
/// mutate it.
#[derive(Debug)]
pub struct PcmBuffer {
    samples: Option<Box<[i16]>>,
}

impl PcmBuffer {
    pub fn new(samples: Vec<i16>) -> Self {
        Self {
            samples: Some(samples.into_boxed_slice()),
        }
    }

    /// Number of samples. Panics if the buffer has been detached.
    pub fn len(&self) -> usize {
        self.samples().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Borrow the samples. Panics if the buffer has been detached.
    pub fn samples(&self) -> &[i16] {
        self.samples
            .as_deref()
            .expect("PcmBuffer accessed after detach")
    }

    /// Take the samples out, leaving the buffer detached.
    ///
    /// Panics if called twice.
    pub fn detach(&mut self) -> Box<[i16]> {
        self.samples
            .take()
            .expect("PcmBuffer detached twice")
    }
}

/// Audio-thread end of the port: one-way, non-blocking, unbounded, in-order.
///
/// There is no acknowledgment and no backpressure. If the consumer is slow,
/// messages queue without bound; if the consumer is gone, posted buffers are
/// dropped silently. Posting never blocks the real-time thread.
pub struct MessagePort {
    sender: Sender<PcmBuffer>,
}

impl MessagePort {
    /// Create a connected port pair: the audio-thread sender and the
    /// main-thread receiver.
    pub fn channel() -> (Self, Receiver<PcmBuffer>) {
        let (sender, receiver) = unbounded();
        (Self { sender }, receiver)
    }

    /// Transfer a buffer to the consumer.
    ///
    /// Takes the buffer by value; the move is the ownership transfer. No
    /// error is surfaced when the receiving side has hung up.
    pub fn post(&self, buffer: PcmBuffer) {
        let _ = self.sender.send(buffer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_arrive_in_post_order() {
        let (port, rx) = MessagePort::channel();
        for i in 0..10i16 {
            port.post(PcmBuffer::new(vec![i]));
        }
        for i in 0..10i16 {
            assert_eq!(rx.recv().unwrap().samples(), &[i]);
        }
    }

    #[test]
    fn test_post_with_dead_consumer_does_not_panic() {
        let (port, rx) = MessagePort::channel();
        drop(rx);
        port.post(PcmBuffer::new(vec![1, 2, 3]));
    }

    #[test]
    fn test_detach_yields_samples() {
        let mut buffer = PcmBuffer::new(vec![1, 2, 3]);
        assert_eq!(buffer.len(), 3);
        let samples = buffer.detach();
        assert_eq!(&samples[..], &[1, 2, 3]);
    }

    #[test]
    #[should_panic(expected = "detached twice")]
    fn test_double_detach_panics() {
        let mut buffer = PcmBuffer::new(vec![1]);
        let _ = buffer.detach();
        let _ = buffer.detach();
    }

    #[test]
    #[should_panic(expected = "accessed after detach")]
    fn test_access_after_detach_panics() {
        let mut buffer = PcmBuffer::new(vec![1]);
        let _ = buffer.detach();
        let _ = buffer.samples();
    }
}
