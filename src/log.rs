use std::{
    fmt::Display,
    sync::{Mutex, PoisonError},
};

use chrono::Local;
use itertools::Itertools;
use lazy_static::lazy_static;
use ringbuffer::RingBufferWrite;
use ringbuffer::{AllocRingBuffer, RingBufferExt};

/// How many messages survive. Must stay a power of two.
pub const LOG_CAPACITY: usize = 256;

lazy_static! {
    static ref BUFFER: Mutex<AllocRingBuffer<String>> =
        Mutex::new(AllocRingBuffer::with_capacity(LOG_CAPACITY));
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Info,
    /// Something was filled in or worked around, e.g. an unset knob.
    Warning,
}

impl Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Level::Info => write!(f, "info"),
            Level::Warning => write!(f, "warn"),
        }
    }
}

pub fn write_message(level: Level, message: &str) {
    // runs finish in milliseconds, seconds alone tell them apart poorly
    let human_readable = Local::now().format("%d.%m %H:%M:%S%.3f");

    let mut buffer = BUFFER.lock().unwrap_or_else(PoisonError::into_inner);

    buffer.push(format!("[{human_readable}] {level}: {message}"))
}

macro_rules! log{
    ($($e:expr),+) => {
        crate::log::write_message(crate::log::Level::Info, &format!($($e),+))
    }
}

macro_rules! warn_message{
    ($($e:expr),+) => {
        crate::log::write_message(crate::log::Level::Warning, &format!($($e),+))
    }
}

pub(crate) use log;
pub(crate) use warn_message as warn;

/// Last `n` messages, oldest first.
pub fn pull_messages(n: usize) -> Vec<String> {
    let mut items = {
        let buffer = BUFFER.lock().unwrap_or_else(PoisonError::into_inner);

        buffer.iter().rev().take(n).map(Clone::clone).collect_vec()
    };
    items.reverse();
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_time_and_level() {
        log!("marker {} for log test", 7331);
        warn!("marker {} for log test", 7332);

        let messages = pull_messages(LOG_CAPACITY);
        let info = messages
            .iter()
            .find(|m| m.ends_with("info: marker 7331 for log test"))
            .expect("info message should be in the buffer");
        assert!(info.starts_with('['));
        assert!(messages
            .iter()
            .any(|m| m.ends_with("warn: marker 7332 for log test")));
    }

    #[test]
    fn pull_respects_limit() {
        for i in 0..5 {
            write_message(Level::Info, &format!("limit {i}"));
        }
        assert!(pull_messages(3).len() <= 3);
    }

    #[test]
    fn buffer_is_bounded() {
        for i in 0..LOG_CAPACITY + 10 {
            write_message(Level::Info, &format!("overflow {i}"));
        }
        assert!(pull_messages(usize::MAX).len() <= LOG_CAPACITY);
    }
}
