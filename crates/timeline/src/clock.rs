/// Whole seconds spent on a game.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ElapsedClock {
    seconds: u64,
}

impl ElapsedClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tick(&mut self) {
        self.seconds += 1;
    }

    pub fn seconds(&self) -> u64 {
        self.seconds
    }

    pub fn formatted(&self) -> String {
        format_elapsed(self.seconds)
    }
}

/// `MM:SS`, or `H:MM:SS` from the first hour on.
pub fn format_elapsed(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{:02}:{:02}", minutes, seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(0), "00:00");
        assert_eq!(format_elapsed(65), "01:05");
        assert_eq!(format_elapsed(3599), "59:59");
        assert_eq!(format_elapsed(3600), "1:00:00");
        assert_eq!(format_elapsed(4 * 3600 + 7 * 60 + 9), "4:07:09");
    }

    #[test]
    fn test_tick() {
        let mut clock = ElapsedClock::new();
        for _ in 0..61 {
            clock.tick();
        }
        assert_eq!(clock.seconds(), 61);
        assert_eq!(clock.formatted(), "01:01");
    }
}
