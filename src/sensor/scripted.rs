use std::collections::VecDeque;

use super::SampleStream;

/// Replays a fixed sequence of samples.
///
/// Stands in for the real platform sensors in the demo binary and in tests,
/// the way a mock transceiver stands in for hardware.
pub struct ScriptedStream<S> {
    script: Vec<S>,
    queue: VecDeque<S>,
    cancelled: bool,
}

impl<S: Clone> ScriptedStream<S> {
    pub fn new(script: Vec<S>) -> Self {
        let queue = script.iter().cloned().collect();
        Self {
            script,
            queue,
            cancelled: false,
        }
    }
}

impl<S: Clone> SampleStream for ScriptedStream<S> {
    type Sample = S;

    fn next_sample(&mut self) -> Option<S> {
        if self.cancelled {
            return None;
        }
        self.queue.pop_front()
    }

    fn cancel(&mut self) {
        self.cancelled = true;
    }

    fn restart(&mut self) {
        self.cancelled = false;
        self.queue = self.script.iter().cloned().collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replays_script_in_order() {
        let mut stream = ScriptedStream::new(vec![1, 2, 3]);
        assert_eq!(stream.next_sample(), Some(1));
        assert_eq!(stream.next_sample(), Some(2));
        assert_eq!(stream.next_sample(), Some(3));
        assert_eq!(stream.next_sample(), None);
    }

    #[test]
    fn test_cancel_stops_delivery() {
        let mut stream = ScriptedStream::new(vec![1, 2]);
        assert_eq!(stream.next_sample(), Some(1));
        stream.cancel();
        assert_eq!(stream.next_sample(), None);
    }

    #[test]
    fn test_restart_rewinds_to_start() {
        let mut stream = ScriptedStream::new(vec![1, 2]);
        stream.next_sample();
        stream.cancel();
        stream.restart();
        assert_eq!(stream.next_sample(), Some(1));
    }
}
